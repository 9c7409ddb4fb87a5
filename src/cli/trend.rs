use super::ui;
use crate::core::analytics::{self, ComparisonMode, MonthlyTotals};
use crate::core::{Ledger, Transaction, YearMonth};
use comfy_table::Cell;

pub fn render_totals(ledger: &Ledger, month: Option<YearMonth>, currency: &str) -> String {
    let transactions: Vec<&Transaction> = match month {
        Some(m) => ledger.transactions_by_month(m.year, m.month).collect(),
        None => ledger.transactions().iter().collect(),
    };
    let totals = analytics::totals_by_kind(transactions);

    let net_style = if totals.net_savings >= 0.0 {
        ui::StyleType::TotalValue
    } else {
        ui::StyleType::Error
    };
    let scope = month.map_or("all months".to_string(), |m| m.to_string());
    format!(
        "Totals for {}\n\nTotal Income: {:.2} {currency}\nTotal Expense: {:.2} {currency}\n{}: {}",
        ui::style_text(&scope, ui::StyleType::Title),
        totals.total_income,
        totals.total_expense,
        ui::style_text("Net Savings", ui::StyleType::TotalLabel),
        ui::style_text(&format!("{:.2} {currency}", totals.net_savings), net_style),
    )
}

/// Month-by-month table for one transaction kind.
pub fn render_trend(label: &str, totals: &MonthlyTotals, mode: ComparisonMode, good_when_up: bool) -> String {
    if totals.is_empty() {
        return format!("No {} data to report.", label.to_lowercase());
    }

    let ordered = match mode {
        ComparisonMode::Insertion => totals.clone(),
        ComparisonMode::Chronological => totals.chronological(),
    };
    let deltas = analytics::month_over_month_delta(totals, mode);

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Month"),
        ui::header_cell(label),
        ui::header_cell("Change"),
        ui::header_cell("Direction"),
    ]);
    for (month, total) in ordered.iter() {
        let row = match deltas.iter().find(|d| d.month == month) {
            Some(delta) => vec![
                Cell::new(month),
                ui::money_cell(total),
                ui::change_cell(delta.delta, good_when_up),
                Cell::new(delta.direction),
            ],
            None => vec![
                Cell::new(month),
                ui::money_cell(total),
                ui::na_cell(false),
                ui::na_cell(false),
            ],
        };
        table.add_row(row);
    }

    format!(
        "{}\n\n{table}",
        ui::style_text(label, ui::StyleType::Title)
    )
}

pub fn run(ledger: &Ledger, mode: ComparisonMode) {
    let monthly = analytics::monthly_totals_by_kind(ledger.transactions());
    println!("{}", render_trend("Income", &monthly.income, mode, true));
    ui::print_separator();
    println!("{}", render_trend("Expense", &monthly.expense, mode, false));
}
