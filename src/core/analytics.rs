//! Provides functions for deriving budget summaries, period totals and
//! investment projections from ledger contents.
//!
//! Everything here is a pure calculation over its inputs; the ledger is only
//! ever read.
use super::error::{LedgerError, LedgerResult};
use super::models::{Category, Transaction, TransactionKind, YearMonth};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use tracing::debug;

/// Tolerance, in percentage points, applied at the strategy boundaries.
const STRATEGY_BOUNDARY_EPSILON: f64 = 1e-9;

/// Longest investment horizon a projection is computed for.
pub const MAX_INVESTMENT_YEARS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayFrequency {
    Weekly,
    BiWeekly,
    Monthly,
    Annually,
}

impl From<&str> for PayFrequency {
    fn from(s: &str) -> Self {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        match normalized.as_str() {
            "weekly" => PayFrequency::Weekly,
            "biweekly" => PayFrequency::BiWeekly,
            "annually" | "annual" | "yearly" => PayFrequency::Annually,
            _ => PayFrequency::Monthly,
        }
    }
}

impl PayFrequency {
    pub fn to_monthly(&self, amount: f64) -> f64 {
        match self {
            PayFrequency::Weekly => amount * 4.0,
            PayFrequency::BiWeekly => amount * 2.0,
            PayFrequency::Monthly => amount,
            PayFrequency::Annually => amount / 12.0,
        }
    }
}

impl Display for PayFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PayFrequency::Weekly => "Weekly",
                PayFrequency::BiWeekly => "Bi-Weekly",
                PayFrequency::Monthly => "Monthly",
                PayFrequency::Annually => "Annually",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub monthly_income: f64,
    pub total_fixed_expenses: f64,
    pub discretionary_income: f64,
}

impl BudgetSummary {
    /// Whether a fixed vs discretionary split has anything to show.
    pub fn has_chart_data(&self) -> bool {
        self.total_fixed_expenses > 0.0 || self.discretionary_income > 0.0
    }
}

/// Converts the salary to a monthly figure and subtracts the fixed expenses.
pub fn budget_summary(
    salary: f64,
    frequency: PayFrequency,
    fixed_expense_items: &[f64],
) -> BudgetSummary {
    let monthly_income = frequency.to_monthly(salary);
    let total_fixed_expenses: f64 = fixed_expense_items.iter().sum();
    debug!("Budget summary for {salary} paid {frequency}: income {monthly_income}, fixed {total_fixed_expenses}");
    BudgetSummary {
        monthly_income,
        total_fixed_expenses,
        discretionary_income: monthly_income - total_fixed_expenses,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KindTotals {
    pub total_income: f64,
    pub total_expense: f64,
    pub net_savings: f64,
}

pub fn totals_by_kind<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> KindTotals {
    let (total_income, total_expense) =
        transactions
            .into_iter()
            .fold((0.0, 0.0), |(income, expense), t| match t.kind {
                TransactionKind::Income => (income + t.amount, expense),
                TransactionKind::Expense => (income, expense + t.amount),
            });
    KindTotals {
        total_income,
        total_expense,
        net_savings: total_income - total_expense,
    }
}

/// Per-month sums, iterated in the order each month was first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyTotals {
    entries: Vec<(YearMonth, f64)>,
}

impl MonthlyTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, month: YearMonth, amount: f64) {
        match self.entries.iter_mut().find(|(m, _)| *m == month) {
            Some((_, total)) => *total += amount,
            None => self.entries.push((month, amount)),
        }
    }

    pub fn get(&self, month: YearMonth) -> Option<f64> {
        self.entries
            .iter()
            .find(|(m, _)| *m == month)
            .map(|(_, total)| *total)
    }

    pub fn iter(&self) -> impl Iterator<Item = (YearMonth, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn months(&self) -> impl Iterator<Item = YearMonth> + '_ {
        self.entries.iter().map(|(m, _)| *m)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn chronological(&self) -> Self {
        let mut entries = self.entries.clone();
        entries.sort_by_key(|(m, _)| *m);
        Self { entries }
    }
}

impl FromIterator<(YearMonth, f64)> for MonthlyTotals {
    fn from_iter<T: IntoIterator<Item = (YearMonth, f64)>>(iter: T) -> Self {
        let mut totals = MonthlyTotals::new();
        for (month, amount) in iter {
            totals.add(month, amount);
        }
        totals
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyKindTotals {
    pub income: MonthlyTotals,
    pub expense: MonthlyTotals,
}

/// Groups income and expense sums by calendar month. A month only appears in
/// a mapping when it holds at least one transaction of that kind.
pub fn monthly_totals_by_kind<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> MonthlyKindTotals {
    let mut totals = MonthlyKindTotals::default();
    for t in transactions {
        let bucket = match t.kind {
            TransactionKind::Income => &mut totals.income,
            TransactionKind::Expense => &mut totals.expense,
        };
        bucket.add(t.month(), t.amount);
    }
    totals
}

/// How consecutive months are paired for month-over-month comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonMode {
    /// Compare against the previous month in first-seen order.
    #[default]
    Insertion,
    /// Compare against the previous month on the calendar axis.
    Chronological,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Increased,
    Decreased,
}

impl Direction {
    /// Zero counts as a decrease.
    pub fn of(delta: f64) -> Self {
        if delta > 0.0 {
            Direction::Increased
        } else {
            Direction::Decreased
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Increased => write!(f, "increased"),
            Direction::Decreased => write!(f, "decreased"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthDelta {
    pub month: YearMonth,
    pub previous_month: YearMonth,
    pub value: f64,
    pub delta: f64,
    pub direction: Direction,
}

/// Deltas between each month and the one before it in `mode` order. The
/// first month has no predecessor and is left out.
pub fn month_over_month_delta(totals: &MonthlyTotals, mode: ComparisonMode) -> Vec<MonthDelta> {
    let ordered = match mode {
        ComparisonMode::Insertion => totals.clone(),
        ComparisonMode::Chronological => totals.chronological(),
    };
    ordered
        .entries
        .windows(2)
        .map(|pair| {
            let (previous_month, previous) = pair[0];
            let (month, value) = pair[1];
            let delta = value - previous;
            MonthDelta {
                month,
                previous_month,
                value,
                delta,
                direction: Direction::of(delta),
            }
        })
        .collect()
}

/// Drops non-positive entries. `None` means there is nothing to present.
pub fn category_breakdown<K: Ord + Copy>(spending: &BTreeMap<K, f64>) -> Option<BTreeMap<K, f64>> {
    let breakdown: BTreeMap<K, f64> = spending
        .iter()
        .filter(|(_, amount)| **amount > 0.0)
        .map(|(category, amount)| (*category, *amount))
        .collect();
    if breakdown.is_empty() {
        None
    } else {
        Some(breakdown)
    }
}

/// Expense totals per category.
pub fn expense_by_category<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> BTreeMap<Category, f64> {
    let mut totals = BTreeMap::new();
    for t in transactions
        .into_iter()
        .filter(|t| t.kind == TransactionKind::Expense)
    {
        *totals.entry(t.category).or_insert(0.0) += t.amount;
    }
    totals
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyBucket {
    Conservative,
    Moderate,
    Aggressive,
}

impl StrategyBucket {
    /// Classifies a fractional annual return; 5 % and 10 % are both Moderate.
    pub fn from_rate(rate: f64) -> Self {
        let percentage = rate * 100.0;
        if percentage < 5.0 - STRATEGY_BOUNDARY_EPSILON {
            StrategyBucket::Conservative
        } else if percentage <= 10.0 + STRATEGY_BOUNDARY_EPSILON {
            StrategyBucket::Moderate
        } else {
            StrategyBucket::Aggressive
        }
    }
}

impl Display for StrategyBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                StrategyBucket::Conservative => "Conservative",
                StrategyBucket::Moderate => "Moderate",
                StrategyBucket::Aggressive => "Aggressive",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentProjection {
    pub initial_investment: f64,
    pub target_amount: f64,
    pub years: u32,
    pub required_annual_return: f64,
    pub strategy: StrategyBucket,
    pub growth: Vec<f64>,
}

/// Value at the start of each year, `years + 1` points including year 0.
pub fn growth_sequence(initial_investment: f64, rate: f64, years: u32) -> Vec<f64> {
    (0..=years)
        .map(|i| initial_investment * (1.0 + rate).powf(f64::from(i)))
        .collect()
}

/// Annual return needed to grow `initial_investment` into `target_amount`
/// over `years`: `(target / initial)^(1 / years) - 1`.
pub fn required_annual_return(
    initial_investment: f64,
    target_amount: f64,
    years: u32,
) -> LedgerResult<InvestmentProjection> {
    if !(initial_investment.is_finite() && initial_investment > 0.0) {
        return Err(LedgerError::PreconditionNotMet(format!(
            "initial investment must be greater than zero, got {initial_investment}"
        )));
    }
    if !(target_amount.is_finite() && target_amount > 0.0) {
        return Err(LedgerError::PreconditionNotMet(format!(
            "target amount must be greater than zero, got {target_amount}"
        )));
    }
    if years == 0 {
        return Err(LedgerError::PreconditionNotMet(
            "investment duration must be at least one year".to_string(),
        ));
    }
    if years > MAX_INVESTMENT_YEARS {
        return Err(LedgerError::PreconditionNotMet(format!(
            "investment duration must be at most {MAX_INVESTMENT_YEARS} years, got {years}"
        )));
    }

    let rate = (target_amount / initial_investment).powf(1.0 / years as f64) - 1.0;
    let strategy = StrategyBucket::from_rate(rate);
    debug!("Required return {initial_investment} -> {target_amount} over {years}y: {rate} ({strategy})");

    Ok(InvestmentProjection {
        initial_investment,
        target_amount,
        years,
        required_annual_return: rate,
        strategy,
        growth: growth_sequence(initial_investment, rate, years),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::SpendCategory;
    use chrono::NaiveDate;

    fn tx(y: i32, m: u32, kind: TransactionKind, amount: f64) -> Transaction {
        Transaction {
            date: NaiveDate::from_ymd_opt(y, m, 10).unwrap(),
            category: Category::Other,
            amount,
            kind,
        }
    }

    fn ym(y: i32, m: u32) -> YearMonth {
        YearMonth::new(y, m).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn converts_each_pay_frequency_to_monthly() {
        let items = [0.0];
        assert_eq!(budget_summary(1000.0, PayFrequency::Weekly, &items).monthly_income, 4000.0);
        assert_eq!(budget_summary(1000.0, PayFrequency::BiWeekly, &items).monthly_income, 2000.0);
        assert_eq!(budget_summary(1000.0, PayFrequency::Monthly, &items).monthly_income, 1000.0);
        assert_eq!(budget_summary(1200.0, PayFrequency::Annually, &items).monthly_income, 100.0);
    }

    #[test]
    fn unknown_pay_frequency_is_monthly() {
        assert_eq!(PayFrequency::from("Bi-Weekly"), PayFrequency::BiWeekly);
        assert_eq!(PayFrequency::from("annually"), PayFrequency::Annually);
        assert_eq!(PayFrequency::from("fortnightly"), PayFrequency::Monthly);
        assert_eq!(PayFrequency::from(""), PayFrequency::Monthly);
    }

    #[test]
    fn discretionary_income_can_go_negative() {
        let summary = budget_summary(2000.0, PayFrequency::Monthly, &[1500.0, 300.0, 400.0]);
        assert_eq!(summary.total_fixed_expenses, 2200.0);
        assert_eq!(summary.discretionary_income, -200.0);
        assert!(summary.has_chart_data());
    }

    #[test]
    fn empty_budget_has_no_chart_data() {
        let summary = budget_summary(0.0, PayFrequency::Monthly, &[]);
        assert_eq!(summary, BudgetSummary {
            monthly_income: 0.0,
            total_fixed_expenses: 0.0,
            discretionary_income: 0.0,
        });
        assert!(!summary.has_chart_data());
    }

    fn scenario() -> Vec<Transaction> {
        vec![
            tx(2024, 1, TransactionKind::Income, 1000.0),
            tx(2024, 1, TransactionKind::Expense, 400.0),
            tx(2024, 2, TransactionKind::Income, 1200.0),
            tx(2024, 2, TransactionKind::Expense, 500.0),
        ]
    }

    #[test]
    fn totals_income_and_expense() {
        let totals = totals_by_kind(&scenario());
        assert_eq!(totals, KindTotals {
            total_income: 2200.0,
            total_expense: 900.0,
            net_savings: 1300.0,
        });
    }

    #[test]
    fn month_over_month_scenario() {
        let monthly = monthly_totals_by_kind(&scenario());

        let income = month_over_month_delta(&monthly.income, ComparisonMode::Insertion);
        assert_eq!(income.len(), 1);
        assert_eq!(income[0].month, ym(2024, 2));
        assert_eq!(income[0].delta, 200.0);
        assert_eq!(income[0].direction, Direction::Increased);

        let expense = month_over_month_delta(&monthly.expense, ComparisonMode::Insertion);
        assert_eq!(expense.len(), 1);
        assert_eq!(expense[0].delta, 100.0);
        assert_eq!(expense[0].direction, Direction::Increased);
    }

    #[test]
    fn months_keep_first_seen_order() {
        let transactions = vec![
            tx(2024, 3, TransactionKind::Expense, 300.0),
            tx(2024, 1, TransactionKind::Expense, 100.0),
            tx(2024, 3, TransactionKind::Expense, 50.0),
            tx(2024, 2, TransactionKind::Expense, 200.0),
        ];
        let monthly = monthly_totals_by_kind(&transactions);
        let months: Vec<YearMonth> = monthly.expense.months().collect();
        assert_eq!(months, vec![ym(2024, 3), ym(2024, 1), ym(2024, 2)]);
        assert_eq!(monthly.expense.get(ym(2024, 3)), Some(350.0));
        assert!(monthly.income.is_empty());
    }

    #[test]
    fn insertion_mode_compares_with_previous_entry_not_calendar_month() {
        let transactions = vec![
            tx(2024, 3, TransactionKind::Expense, 300.0),
            tx(2024, 1, TransactionKind::Expense, 100.0),
            tx(2024, 2, TransactionKind::Expense, 200.0),
        ];
        let monthly = monthly_totals_by_kind(&transactions);

        let insertion = month_over_month_delta(&monthly.expense, ComparisonMode::Insertion);
        assert_eq!(insertion.len(), 2);
        assert_eq!(insertion[0].month, ym(2024, 1));
        assert_eq!(insertion[0].previous_month, ym(2024, 3));
        assert_eq!(insertion[0].delta, -200.0);
        assert_eq!(insertion[0].direction, Direction::Decreased);

        let chronological =
            month_over_month_delta(&monthly.expense, ComparisonMode::Chronological);
        assert_eq!(chronological[0].month, ym(2024, 2));
        assert_eq!(chronological[0].delta, 100.0);
        assert_eq!(chronological[1].month, ym(2024, 3));
        assert_eq!(chronological[1].delta, 100.0);
    }

    #[test]
    fn zero_delta_reads_as_decreased() {
        let totals: MonthlyTotals = [(ym(2024, 1), 100.0), (ym(2024, 2), 100.0)]
            .into_iter()
            .collect();
        let deltas = month_over_month_delta(&totals, ComparisonMode::Insertion);
        assert_eq!(deltas[0].delta, 0.0);
        assert_eq!(deltas[0].direction, Direction::Decreased);
        assert_eq!(deltas[0].direction.to_string(), "decreased");
    }

    #[test]
    fn single_month_has_no_deltas() {
        let totals: MonthlyTotals = [(ym(2024, 1), 100.0)].into_iter().collect();
        assert!(month_over_month_delta(&totals, ComparisonMode::Insertion).is_empty());
        assert!(month_over_month_delta(&MonthlyTotals::new(), ComparisonMode::Chronological).is_empty());
    }

    #[test]
    fn category_breakdown_filters_and_is_idempotent() {
        let spending = BTreeMap::from([
            (SpendCategory::EatingOut, 45.0),
            (SpendCategory::Entertainment, 0.0),
            (SpendCategory::Food, 12.5),
        ]);
        let first = category_breakdown(&spending).unwrap();
        let second = category_breakdown(&spending).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert!(!first.contains_key(&SpendCategory::Entertainment));
    }

    #[test]
    fn category_breakdown_signals_no_data() {
        let spending = BTreeMap::from([(SpendCategory::EatingOut, 0.0)]);
        assert!(category_breakdown(&spending).is_none());
        assert!(category_breakdown::<SpendCategory>(&BTreeMap::new()).is_none());
    }

    #[test]
    fn expense_by_category_ignores_income() {
        let mut transactions = scenario();
        transactions.push(Transaction {
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            category: Category::Food,
            amount: 60.0,
            kind: TransactionKind::Expense,
        });
        let totals = expense_by_category(&transactions);
        assert_eq!(totals[&Category::Other], 900.0);
        assert_eq!(totals[&Category::Food], 60.0);
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn required_return_boundaries_are_moderate() {
        let five = required_annual_return(1000.0, 1000.0 * 1.05_f64.powi(3), 3).unwrap();
        assert_close(five.required_annual_return, 0.05);
        assert_eq!(five.strategy, StrategyBucket::Moderate);

        let ten = required_annual_return(1000.0, 1000.0 * 1.10_f64.powi(3), 3).unwrap();
        assert_close(ten.required_annual_return, 0.10);
        assert_eq!(ten.strategy, StrategyBucket::Moderate);

        let above = required_annual_return(1000.0, 1000.0 * 1.1001_f64.powi(3), 3).unwrap();
        assert_eq!(above.strategy, StrategyBucket::Aggressive);
    }

    #[test]
    fn strategy_bucket_thresholds() {
        assert_eq!(StrategyBucket::from_rate(0.0499), StrategyBucket::Conservative);
        assert_eq!(StrategyBucket::from_rate(-0.02), StrategyBucket::Conservative);
        assert_eq!(StrategyBucket::from_rate(0.05), StrategyBucket::Moderate);
        assert_eq!(StrategyBucket::from_rate(0.10), StrategyBucket::Moderate);
        assert_eq!(StrategyBucket::from_rate(0.100000001), StrategyBucket::Aggressive);
        assert_eq!(StrategyBucket::from_rate(0.25), StrategyBucket::Aggressive);
    }

    #[test]
    fn growth_sequence_includes_starting_value() {
        let growth = growth_sequence(1000.0, 0.05, 2);
        assert_eq!(growth.len(), 3);
        assert_close(growth[0], 1000.0);
        assert_close(growth[1], 1050.0);
        assert_close(growth[2], 1102.5);
    }

    #[test]
    fn projection_growth_reaches_target() {
        let projection = required_annual_return(2000.0, 5000.0, 10).unwrap();
        assert_eq!(projection.growth.len(), 11);
        assert!((projection.growth[10] - 5000.0).abs() < 1e-6);
    }

    #[test]
    fn required_return_rejects_out_of_domain_inputs() {
        assert!(matches!(
            required_annual_return(0.0, 1000.0, 3),
            Err(LedgerError::PreconditionNotMet(_))
        ));
        assert!(matches!(
            required_annual_return(1000.0, -1.0, 3),
            Err(LedgerError::PreconditionNotMet(_))
        ));
        assert!(matches!(
            required_annual_return(1000.0, 2000.0, 0),
            Err(LedgerError::PreconditionNotMet(_))
        ));
        assert!(matches!(
            required_annual_return(f64::NAN, 2000.0, 1),
            Err(LedgerError::PreconditionNotMet(_))
        ));
    }

    #[test]
    fn required_return_caps_investment_horizon() {
        let longest = required_annual_return(1000.0, 2000.0, MAX_INVESTMENT_YEARS).unwrap();
        assert_eq!(longest.growth.len(), MAX_INVESTMENT_YEARS as usize + 1);
        assert!((longest.growth[MAX_INVESTMENT_YEARS as usize] - 2000.0).abs() < 1e-6);

        for years in [MAX_INVESTMENT_YEARS + 1, 3_000_000_000, u32::MAX] {
            assert!(matches!(
                required_annual_return(1000.0, 2000.0, years),
                Err(LedgerError::PreconditionNotMet(_))
            ));
        }
    }

    #[test]
    fn growth_sequence_stays_positive_for_long_horizons() {
        let growth = growth_sequence(1.0, 0.0000001, MAX_INVESTMENT_YEARS);
        assert!(growth.windows(2).all(|w| w[1] >= w[0]));
        assert!(growth.iter().all(|v| *v >= 1.0));
    }
}
