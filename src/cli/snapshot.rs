use super::ui;
use crate::core::{MonthlySnapshot, SpendOutcome};
use comfy_table::Cell;

pub fn render_snapshot(snapshot: &MonthlySnapshot, currency: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Category"),
        ui::header_cell(&format!("Budget ({currency})")),
        ui::header_cell(&format!("Spent ({currency})")),
        ui::header_cell(&format!("Remaining ({currency})")),
    ]);

    for (category, spent) in &snapshot.spending {
        let remaining = snapshot.remaining_budget(*category);
        let remaining_cell = match remaining {
            Some(r) if r < 0.0 => ui::change_cell(r, true),
            _ => ui::format_optional_cell(remaining, |r| format!("{r:.2}")),
        };
        table.add_row(vec![
            Cell::new(category),
            ui::format_optional_cell(snapshot.budgets.get(category), |b| format!("{b:.2}")),
            ui::money_cell(*spent),
            remaining_cell,
        ]);
    }

    format!(
        "Snapshot: {}\n\nCurrent Funds: {:.2} {currency}\nExpected Income: {:.2} {currency}\nFixed Expenses: {:.2} {currency}\n\n{table}",
        ui::style_text(&snapshot.month.to_string(), ui::StyleType::Title),
        snapshot.current_funds,
        snapshot.expected_income,
        snapshot.fixed_expenses,
    )
}

pub fn render_spend(outcome: &SpendOutcome, currency: &str) -> String {
    let mut line = format!(
        "{} spending for {}: {:.2} {currency}",
        outcome.category, outcome.month, outcome.cumulative
    );
    if outcome.over_budget {
        line.push_str(&format!(
            " {}",
            ui::style_text("(over budget)", ui::StyleType::Warning)
        ));
    }
    line
}
