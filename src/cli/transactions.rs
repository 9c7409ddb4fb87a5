use super::ui;
use crate::core::{Ledger, Transaction, TransactionKind, YearMonth};
use comfy_table::Cell;

pub fn render_added(transaction: &Transaction, currency: &str) -> String {
    format!(
        "{} {} {:.2} {currency} ({}) on {}",
        ui::style_text("Added", ui::StyleType::TotalLabel),
        transaction.kind,
        transaction.amount,
        transaction.category,
        transaction.date
    )
}

/// Transaction history, optionally limited to one month.
pub fn render_list(ledger: &Ledger, month: Option<YearMonth>) -> String {
    let transactions: Vec<&Transaction> = match month {
        Some(m) => ledger.transactions_by_month(m.year, m.month).collect(),
        None => ledger.transactions().iter().collect(),
    };

    if transactions.is_empty() {
        return "No transactions yet.".to_string();
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Date"),
        ui::header_cell("Category"),
        ui::header_cell("Type"),
        ui::header_cell("Amount"),
    ]);

    for (i, t) in transactions.iter().enumerate() {
        let kind = match t.kind {
            TransactionKind::Income => ui::style_text("Income", ui::StyleType::TotalValue),
            TransactionKind::Expense => ui::style_text("Expense", ui::StyleType::Error),
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(t.date),
            Cell::new(t.category),
            Cell::new(kind),
            ui::money_cell(t.amount),
        ]);
    }

    let title = match month {
        Some(m) => format!("Transactions for {m}"),
        None => "Transaction History".to_string(),
    };
    format!(
        "{}\n\n{table}",
        ui::style_text(&title, ui::StyleType::Title)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Category;
    use chrono::NaiveDate;

    #[test]
    fn test_render_list_filters_by_month() {
        let mut ledger = Ledger::new();
        for (month, amount) in [(1, 11.0), (2, 22.0)] {
            ledger
                .add_transaction(
                    NaiveDate::from_ymd_opt(2024, month, 5).unwrap(),
                    Category::Food,
                    amount,
                    TransactionKind::Expense,
                )
                .unwrap();
        }

        let february = render_list(&ledger, Some(YearMonth::new(2024, 2).unwrap()));
        assert!(february.contains("22.00"));
        assert!(!february.contains("11.00"));
        assert!(february.contains("2024-02"));

        let all = render_list(&ledger, None);
        assert!(all.contains("11.00") && all.contains("22.00"));
    }

    #[test]
    fn test_render_list_empty() {
        assert_eq!(render_list(&Ledger::new(), None), "No transactions yet.");
    }
}
