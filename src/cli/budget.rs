use super::ui;
use crate::core::analytics::BudgetSummary;

pub fn render(summary: &BudgetSummary, currency: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Item"),
        ui::header_cell(&format!("Amount ({currency})")),
        ui::header_cell("Share of Income (%)"),
    ]);

    let share = |value: f64| {
        (summary.monthly_income > 0.0).then(|| value / summary.monthly_income * 100.0)
    };
    for (label, value) in [
        ("Monthly Income", summary.monthly_income),
        ("Total Fixed Expenses", summary.total_fixed_expenses),
        ("Discretionary Income", summary.discretionary_income),
    ] {
        table.add_row(vec![
            comfy_table::Cell::new(label),
            ui::money_cell(value),
            ui::format_optional_cell(share(value), |s| format!("{s:.1}%")),
        ]);
    }

    let mut output = format!(
        "{}\n\n{table}",
        ui::style_text("Budget Summary", ui::StyleType::Title)
    );
    if !summary.has_chart_data() {
        output.push_str(&format!(
            "\n\n{}",
            ui::style_text(
                "Please enter valid income and expense amounts to visualize the budget.",
                ui::StyleType::Subtle
            )
        ));
    } else if summary.discretionary_income < 0.0 {
        output.push_str(&format!(
            "\n\n{}",
            ui::style_text(
                "Fixed expenses exceed monthly income.",
                ui::StyleType::Warning
            )
        ));
    }
    output
}
