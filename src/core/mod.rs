//! Core ledger and analytics logic

pub mod analytics;
pub mod config;
pub mod error;
pub mod ledger;
pub mod log;
pub mod models;
pub mod report;
pub mod session;

// Re-export main types for cleaner imports
pub use error::{LedgerError, LedgerResult};
pub use ledger::{Ledger, SpendOutcome};
pub use models::{
    Category, MonthlySnapshot, SnapshotFields, SpendCategory, Transaction, TransactionKind,
    YearMonth,
};
