//! Ledger records and the closed enumerations they are built from

use super::error::{LedgerError, LedgerResult};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    Food,
    Rent,
    Utilities,
    Entertainment,
    Other,
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Category::Food => "Food",
                Category::Rent => "Rent",
                Category::Utilities => "Utilities",
                Category::Entertainment => "Entertainment",
                Category::Other => "Other",
            }
        )
    }
}

impl FromStr for Category {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(Category::Food),
            "rent" => Ok(Category::Rent),
            "utilities" => Ok(Category::Utilities),
            "entertainment" => Ok(Category::Entertainment),
            "other" => Ok(Category::Other),
            _ => Err(LedgerError::Validation(format!("unknown category: {s}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "Income"),
            TransactionKind::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(LedgerError::Validation(format!(
                "unknown transaction kind: {s}"
            ))),
        }
    }
}

/// Categories tracked against a monthly snapshot. Only `EatingOut` and
/// `Entertainment` carry a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum SpendCategory {
    EatingOut,
    Entertainment,
    Food,
    Rent,
    Utilities,
    Other,
}

impl SpendCategory {
    pub const BUDGETED: [SpendCategory; 2] = [SpendCategory::EatingOut, SpendCategory::Entertainment];
}

impl From<Category> for SpendCategory {
    fn from(category: Category) -> Self {
        match category {
            Category::Food => SpendCategory::Food,
            Category::Rent => SpendCategory::Rent,
            Category::Utilities => SpendCategory::Utilities,
            Category::Entertainment => SpendCategory::Entertainment,
            Category::Other => SpendCategory::Other,
        }
    }
}

impl Display for SpendCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SpendCategory::EatingOut => "Eating Out",
            SpendCategory::Entertainment => "Entertainment",
            SpendCategory::Food => "Food",
            SpendCategory::Rent => "Rent",
            SpendCategory::Utilities => "Utilities",
            SpendCategory::Other => "Other",
        };
        write!(f, "{name}")
    }
}

impl FromStr for SpendCategory {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        match normalized.as_str() {
            "eatingout" => Ok(SpendCategory::EatingOut),
            _ => s.parse::<Category>().map(SpendCategory::from),
        }
    }
}

/// Calendar month key, ordered chronologically and displayed as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "RawYearMonth")]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

#[derive(Deserialize)]
struct RawYearMonth {
    year: i32,
    month: u32,
}

impl TryFrom<RawYearMonth> for YearMonth {
    type Error = LedgerError;

    fn try_from(raw: RawYearMonth) -> Result<Self, Self::Error> {
        YearMonth::new(raw.year, raw.month)
    }
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> LedgerResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(LedgerError::Validation(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || LedgerError::Validation(format!("malformed month, expected YYYY-MM: {s}"));
        let (year, month) = s.trim().split_once('-').ok_or_else(malformed)?;
        let year = year.parse::<i32>().map_err(|_| malformed())?;
        let month = month.parse::<u32>().map_err(|_| malformed())?;
        Self::new(year, month)
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(text: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|e| LedgerError::Validation(format!("malformed date '{text}': {e}")))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub category: Category,
    pub amount: f64,
    pub kind: TransactionKind,
}

impl Transaction {
    pub fn month(&self) -> YearMonth {
        YearMonth::of(self.date)
    }
}

/// Raw inputs for creating or replacing a monthly snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotFields {
    pub current_funds: f64,
    pub expected_income: f64,
    pub fixed_expenses: f64,
    pub eating_out_budget: f64,
    pub entertainment_budget: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySnapshot {
    pub month: YearMonth,
    pub current_funds: f64,
    pub expected_income: f64,
    pub fixed_expenses: f64,
    pub budgets: BTreeMap<SpendCategory, f64>,
    pub spending: BTreeMap<SpendCategory, f64>,
}

impl MonthlySnapshot {
    pub fn new(month: YearMonth, fields: SnapshotFields) -> Self {
        let budgets = BTreeMap::from([
            (SpendCategory::EatingOut, fields.eating_out_budget),
            (SpendCategory::Entertainment, fields.entertainment_budget),
        ]);
        let spending = budgets.keys().map(|category| (*category, 0.0)).collect();
        Self {
            month,
            current_funds: fields.current_funds,
            expected_income: fields.expected_income,
            fixed_expenses: fields.fixed_expenses,
            budgets,
            spending,
        }
    }

    pub fn spent(&self, category: SpendCategory) -> f64 {
        self.spending.get(&category).copied().unwrap_or(0.0)
    }

    pub fn is_over_budget(&self, category: SpendCategory) -> bool {
        self.budgets
            .get(&category)
            .is_some_and(|budget| self.spent(category) > *budget)
    }

    /// Budget left for a budgeted category; negative once overspent.
    pub fn remaining_budget(&self, category: SpendCategory) -> Option<f64> {
        self.budgets
            .get(&category)
            .map(|budget| budget - self.spent(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_categories_case_insensitively() {
        assert_eq!("food".parse::<Category>(), Ok(Category::Food));
        assert_eq!(" Utilities ".parse::<Category>(), Ok(Category::Utilities));
        assert!(matches!(
            "Groceries".parse::<Category>(),
            Err(LedgerError::Validation(_))
        ));
    }

    #[test]
    fn parses_spend_categories() {
        assert_eq!("Eating Out".parse::<SpendCategory>(), Ok(SpendCategory::EatingOut));
        assert_eq!("eating_out".parse::<SpendCategory>(), Ok(SpendCategory::EatingOut));
        assert_eq!("rent".parse::<SpendCategory>(), Ok(SpendCategory::Rent));
        assert!("travel".parse::<SpendCategory>().is_err());
    }

    #[test]
    fn parses_transaction_kinds() {
        assert_eq!("INCOME".parse::<TransactionKind>(), Ok(TransactionKind::Income));
        assert_eq!("expense".parse::<TransactionKind>(), Ok(TransactionKind::Expense));
        assert!("refund".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn year_month_validates_and_formats() {
        let ym = YearMonth::new(2024, 3).unwrap();
        assert_eq!(ym.to_string(), "2024-03");
        assert_eq!("2024-03".parse::<YearMonth>(), Ok(ym));
        assert!(YearMonth::new(2024, 13).is_err());
        assert!(YearMonth::new(2024, 0).is_err());
        assert!("2024/03".parse::<YearMonth>().is_err());
    }

    #[test]
    fn year_month_deserialization_validates_month() {
        let ym: YearMonth = serde_json::from_str(r#"{"year":2024,"month":12}"#).unwrap();
        assert_eq!(ym, YearMonth::new(2024, 12).unwrap());

        let err = serde_json::from_str::<YearMonth>(r#"{"year":2024,"month":13}"#).unwrap_err();
        assert!(err.to_string().contains("month must be between 1 and 12"));
        assert!(serde_json::from_str::<YearMonth>(r#"{"year":2024,"month":0}"#).is_err());
    }

    #[test]
    fn year_month_contains_only_its_own_dates() {
        let march = YearMonth::new(2024, 3).unwrap();
        assert!(march.contains(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
        assert!(!march.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
        assert!(!march.contains(NaiveDate::from_ymd_opt(2023, 3, 15).unwrap()));
    }

    #[test]
    fn year_month_orders_chronologically() {
        let dec = YearMonth::new(2023, 12).unwrap();
        let jan = YearMonth::new(2024, 1).unwrap();
        assert!(dec < jan);
    }

    #[test]
    fn parse_date_rejects_malformed_input() {
        assert_eq!(
            parse_date("2024-02-29"),
            Ok(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
        assert!(matches!(
            parse_date("2023-02-29"),
            Err(LedgerError::Validation(_))
        ));
        assert!(parse_date("29/02/2024").is_err());
    }

    #[test]
    fn new_snapshot_zeroes_budgeted_spending() {
        let snapshot = MonthlySnapshot::new(
            YearMonth::new(2024, 1).unwrap(),
            SnapshotFields {
                eating_out_budget: 200.0,
                entertainment_budget: 100.0,
                ..Default::default()
            },
        );
        assert_eq!(snapshot.spending.len(), 2);
        assert_eq!(snapshot.spent(SpendCategory::EatingOut), 0.0);
        assert_eq!(snapshot.spent(SpendCategory::Entertainment), 0.0);
        assert_eq!(snapshot.remaining_budget(SpendCategory::EatingOut), Some(200.0));
        assert_eq!(snapshot.remaining_budget(SpendCategory::Food), None);
        assert!(!snapshot.is_over_budget(SpendCategory::Food));
    }
}
