use super::ui;
use crate::core::analytics::{InvestmentProjection, StrategyBucket};
use comfy_table::Cell;

/// Required return, suggested strategy and the projected value per year.
pub fn render(projection: &InvestmentProjection, currency: &str) -> String {
    let percentage = projection.required_annual_return * 100.0;
    let strategy_style = match projection.strategy {
        StrategyBucket::Conservative => ui::StyleType::TotalValue,
        StrategyBucket::Moderate => ui::StyleType::TotalLabel,
        StrategyBucket::Aggressive => ui::StyleType::Warning,
    };

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Year"),
        ui::header_cell(&format!("Projected Value ({currency})")),
    ]);
    for (year, value) in projection.growth.iter().enumerate() {
        table.add_row(vec![Cell::new(year), ui::money_cell(*value)]);
    }

    format!(
        "To reach your target of {:.2} {currency} in {} years, you need an annual return of {percentage:.2}%.\n{}: {}\n\n{table}",
        projection.target_amount,
        projection.years,
        ui::style_text("Suggested Investment Strategy", ui::StyleType::TotalLabel),
        ui::style_text(&projection.strategy.to_string(), strategy_style),
    )
}
