//! Terminal rendering for each command

pub mod breakdown;
pub mod budget;
pub mod invest;
pub mod setup;
pub mod snapshot;
pub mod transactions;
pub mod trend;
pub mod ui;
