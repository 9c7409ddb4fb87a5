//! Plain-text ledger report, suitable as an e-mail body.
use super::analytics::{
    self, BudgetSummary, ComparisonMode, MonthDelta, MonthlyTotals,
};
use super::ledger::Ledger;
use super::models::SpendCategory;
use std::fmt::Write;

/// Renders the budget summary, ledger totals, month-over-month changes,
/// expense breakdown and snapshot budgets as plain text.
pub fn render_report(
    ledger: &Ledger,
    summary: &BudgetSummary,
    mode: ComparisonMode,
    currency: &str,
) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    write_report(&mut out, ledger, summary, mode, currency)?;
    Ok(out)
}

fn write_report(
    out: &mut String,
    ledger: &Ledger,
    summary: &BudgetSummary,
    mode: ComparisonMode,
    currency: &str,
) -> std::fmt::Result {
    writeln!(out, "Personal Finance Report")?;
    writeln!(out, "=======================")?;
    writeln!(out)?;

    writeln!(out, "Budget Summary")?;
    writeln!(out, "  Monthly Income:       {:.2} {currency}", summary.monthly_income)?;
    writeln!(out, "  Total Fixed Expenses: {:.2} {currency}", summary.total_fixed_expenses)?;
    writeln!(out, "  Discretionary Income: {:.2} {currency}", summary.discretionary_income)?;
    writeln!(out)?;

    let transactions = ledger.transactions();
    writeln!(out, "Transactions ({})", transactions.len())?;
    if transactions.is_empty() {
        writeln!(out, "  No transactions yet.")?;
    } else {
        let totals = analytics::totals_by_kind(transactions);
        writeln!(out, "  Total Income:  {:.2} {currency}", totals.total_income)?;
        writeln!(out, "  Total Expense: {:.2} {currency}", totals.total_expense)?;
        writeln!(out, "  Net Savings:   {:.2} {currency}", totals.net_savings)?;

        let monthly = analytics::monthly_totals_by_kind(transactions);
        write_monthly(out, "Income", &monthly.income, mode, currency)?;
        write_monthly(out, "Expense", &monthly.expense, mode, currency)?;
    }
    writeln!(out)?;

    writeln!(out, "Expenses by Category")?;
    match analytics::category_breakdown(&analytics::expense_by_category(transactions)) {
        Some(breakdown) => {
            for (category, amount) in breakdown {
                writeln!(out, "  {category}: {amount:.2} {currency}")?;
            }
        }
        None => writeln!(out, "  No expense data to report.")?,
    }

    let mut snapshots = ledger.snapshots().peekable();
    if snapshots.peek().is_some() {
        writeln!(out)?;
        writeln!(out, "Monthly Budgets")?;
        for snapshot in snapshots {
            writeln!(
                out,
                "  {}: funds {:.2}, expected income {:.2}, fixed expenses {:.2}",
                snapshot.month,
                snapshot.current_funds,
                snapshot.expected_income,
                snapshot.fixed_expenses
            )?;
            for category in SpendCategory::BUDGETED {
                if let Some(budget) = snapshot.budgets.get(&category) {
                    let marker = if snapshot.is_over_budget(category) {
                        " (over budget)"
                    } else {
                        ""
                    };
                    writeln!(
                        out,
                        "    {category}: spent {:.2} of {budget:.2}{marker}",
                        snapshot.spent(category)
                    )?;
                }
            }
        }
    }

    Ok(())
}

fn write_monthly(
    out: &mut String,
    label: &str,
    totals: &MonthlyTotals,
    mode: ComparisonMode,
    currency: &str,
) -> std::fmt::Result {
    if totals.is_empty() {
        return Ok(());
    }
    writeln!(out, "  Monthly {label}:")?;
    for (month, total) in totals.iter() {
        writeln!(out, "    {month}: {total:.2} {currency}")?;
    }
    for MonthDelta {
        month,
        previous_month,
        delta,
        direction,
        ..
    } in analytics::month_over_month_delta(totals, mode)
    {
        writeln!(
            out,
            "    {label} {direction} by {:.2} {currency} in {month} (vs {previous_month})",
            delta.abs()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analytics::{PayFrequency, budget_summary};
    use crate::core::models::{Category, SnapshotFields, TransactionKind};
    use chrono::NaiveDate;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        let entries = [
            (1, TransactionKind::Income, Category::Other, 1000.0),
            (1, TransactionKind::Expense, Category::Food, 400.0),
            (2, TransactionKind::Income, Category::Other, 1200.0),
            (2, TransactionKind::Expense, Category::Rent, 500.0),
        ];
        for (month, kind, category, amount) in entries {
            let date = NaiveDate::from_ymd_opt(2024, month, 1).unwrap();
            ledger.add_transaction(date, category, amount, kind).unwrap();
        }
        ledger
    }

    #[test]
    fn report_includes_totals_and_deltas() {
        let ledger = sample_ledger();
        let summary = budget_summary(3000.0, PayFrequency::Monthly, &[1200.0, 300.0]);
        let report = render_report(&ledger, &summary, ComparisonMode::Insertion, "USD").unwrap();

        assert!(report.contains("Monthly Income:       3000.00 USD"));
        assert!(report.contains("Discretionary Income: 1500.00 USD"));
        assert!(report.contains("Net Savings:   1300.00 USD"));
        assert!(report.contains("Income increased by 200.00 USD in 2024-02 (vs 2024-01)"));
        assert!(report.contains("Expense increased by 100.00 USD in 2024-02 (vs 2024-01)"));
        assert!(report.contains("Food: 400.00 USD"));
        assert!(report.contains("Rent: 500.00 USD"));
    }

    #[test]
    fn report_handles_empty_ledger() {
        let ledger = Ledger::new();
        let summary = budget_summary(0.0, PayFrequency::Monthly, &[]);
        let report = render_report(&ledger, &summary, ComparisonMode::Insertion, "EUR").unwrap();

        assert!(report.contains("No transactions yet."));
        assert!(report.contains("No expense data to report."));
        assert!(!report.contains("Monthly Budgets"));
    }

    #[test]
    fn report_marks_over_budget_categories() {
        let mut ledger = Ledger::new();
        ledger
            .upsert_monthly_snapshot(
                2024,
                5,
                SnapshotFields {
                    eating_out_budget: 50.0,
                    entertainment_budget: 80.0,
                    ..Default::default()
                },
            )
            .unwrap();
        ledger
            .record_spend(2024, 5, SpendCategory::EatingOut, 75.0)
            .unwrap();

        let summary = budget_summary(0.0, PayFrequency::Monthly, &[]);
        let report = render_report(&ledger, &summary, ComparisonMode::Insertion, "USD").unwrap();
        assert!(report.contains("Eating Out: spent 75.00 of 50.00 (over budget)"));
        assert!(report.contains("Entertainment: spent 0.00 of 80.00\n"));
    }
}
