use super::ui;
use crate::core::analytics;
use crate::core::{Ledger, YearMonth};
use anyhow::{Result, anyhow};
use comfy_table::Cell;
use std::collections::BTreeMap;
use std::fmt::Display;

/// Category breakdown of a month's snapshot spending, or of all expense
/// transactions when no month is given.
pub fn render(ledger: &Ledger, month: Option<YearMonth>, currency: &str) -> Result<String> {
    match month {
        Some(m) => {
            let snapshot = ledger
                .snapshot(m)
                .ok_or_else(|| anyhow!("No monthly snapshot found for {m}"))?;
            Ok(render_breakdown(
                &format!("Spending by Category ({m})"),
                &snapshot.spending,
                currency,
            ))
        }
        None => {
            let expenses = analytics::expense_by_category(ledger.transactions());
            Ok(render_breakdown("Expenses by Category", &expenses, currency))
        }
    }
}

fn render_breakdown<K: Ord + Copy + Display>(
    title: &str,
    spending: &BTreeMap<K, f64>,
    currency: &str,
) -> String {
    let Some(breakdown) = analytics::category_breakdown(spending) else {
        return "No expense data to report.".to_string();
    };
    let total: f64 = breakdown.values().sum();

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Category"),
        ui::header_cell(&format!("Amount ({currency})")),
        ui::header_cell("Share (%)"),
    ]);
    for (category, amount) in &breakdown {
        table.add_row(vec![
            Cell::new(category),
            ui::money_cell(*amount),
            ui::format_optional_cell(Some(amount / total * 100.0), |s| format!("{s:.1}%")),
        ]);
    }

    format!(
        "{}\n\n{table}\n\n{}: {}",
        ui::style_text(title, ui::StyleType::Title),
        ui::style_text("Total", ui::StyleType::TotalLabel),
        ui::style_text(&format!("{total:.2} {currency}"), ui::StyleType::TotalValue)
    )
}
