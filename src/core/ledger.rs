//! In-memory ledger store: ordered transactions plus keyed monthly snapshots.
use super::error::{LedgerError, LedgerResult, ensure_amount};
use super::models::{
    Category, MonthlySnapshot, SnapshotFields, SpendCategory, Transaction, TransactionKind,
    YearMonth,
};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

/// Result of recording spend against a monthly snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpendOutcome {
    pub month: YearMonth,
    pub category: SpendCategory,
    pub cumulative: f64,
    pub over_budget: bool,
}

/// Holds the transactions and monthly snapshots of a single session.
///
/// Transactions keep their insertion order; aggregation over them is
/// reproducible because of it. Snapshots are unique per month.
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    snapshots: BTreeMap<YearMonth, MonthlySnapshot>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a ledger from previously stored records.
    pub fn from_parts(
        transactions: Vec<Transaction>,
        snapshots: impl IntoIterator<Item = MonthlySnapshot>,
    ) -> Self {
        Self {
            transactions,
            snapshots: snapshots
                .into_iter()
                .map(|snapshot| (snapshot.month, snapshot))
                .collect(),
        }
    }

    pub fn add_transaction(
        &mut self,
        date: NaiveDate,
        category: Category,
        amount: f64,
        kind: TransactionKind,
    ) -> LedgerResult<&Transaction> {
        let amount = ensure_amount(amount)?;
        debug!("Adding {kind} transaction: {date} {category} {amount}");
        self.transactions.push(Transaction {
            date,
            category,
            amount,
            kind,
        });
        Ok(&self.transactions[self.transactions.len() - 1])
    }

    /// Creates or wholesale replaces the snapshot for a month.
    pub fn upsert_monthly_snapshot(
        &mut self,
        year: i32,
        month: u32,
        fields: SnapshotFields,
    ) -> LedgerResult<&MonthlySnapshot> {
        let key = YearMonth::new(year, month)?;
        for amount in [
            fields.current_funds,
            fields.expected_income,
            fields.fixed_expenses,
            fields.eating_out_budget,
            fields.entertainment_budget,
        ] {
            ensure_amount(amount)?;
        }

        let snapshot = MonthlySnapshot::new(key, fields);
        if self.snapshots.insert(key, snapshot).is_some() {
            debug!("Replaced monthly snapshot for {key}");
        } else {
            debug!("Created monthly snapshot for {key}");
        }
        Ok(&self.snapshots[&key])
    }

    /// Adds spend to a snapshot category. Fails with `NotFound` and leaves
    /// the ledger untouched when the month has no snapshot.
    pub fn record_spend(
        &mut self,
        year: i32,
        month: u32,
        category: SpendCategory,
        amount: f64,
    ) -> LedgerResult<SpendOutcome> {
        let key = YearMonth::new(year, month)?;
        let amount = ensure_amount(amount)?;
        let snapshot = self
            .snapshots
            .get_mut(&key)
            .ok_or_else(|| LedgerError::NotFound(key.to_string()))?;

        let spent = snapshot.spending.entry(category).or_insert(0.0);
        *spent += amount;
        let cumulative = *spent;
        let over_budget = snapshot.is_over_budget(category);
        debug!("Recorded {amount} of {category} spend for {key}, cumulative {cumulative}");

        Ok(SpendOutcome {
            month: key,
            category,
            cumulative,
            over_budget,
        })
    }

    /// Transactions dated within the month, in insertion order. Each call
    /// starts a fresh iteration; an invalid month yields nothing.
    pub fn transactions_by_month(
        &self,
        year: i32,
        month: u32,
    ) -> impl Iterator<Item = &Transaction> + '_ {
        let key = YearMonth::new(year, month).ok();
        self.transactions
            .iter()
            .filter(move |t| key.is_some_and(|key| key.contains(t.date)))
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn snapshot(&self, month: YearMonth) -> Option<&MonthlySnapshot> {
        self.snapshots.get(&month)
    }

    /// Snapshots in chronological order.
    pub fn snapshots(&self) -> impl Iterator<Item = &MonthlySnapshot> + '_ {
        self.snapshots.values()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() && self.snapshots.is_empty()
    }

    /// Drops every transaction and snapshot.
    pub fn reset(&mut self) {
        debug!(
            "Resetting ledger ({} transactions, {} snapshots)",
            self.transactions.len(),
            self.snapshots.len()
        );
        self.transactions.clear();
        self.snapshots.clear();
    }
}
