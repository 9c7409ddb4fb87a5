use thiserror::Error;

/// Errors raised by the ledger store and the analytics engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Input rejected at the store boundary; nothing was stored.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// No monthly snapshot exists for the requested month.
    #[error("No monthly snapshot found for {0}")]
    NotFound(String),

    /// Inputs outside the domain of a calculation.
    #[error("Precondition not met: {0}")]
    PreconditionNotMet(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Rejects negative, NaN and infinite amounts.
pub(crate) fn ensure_amount(amount: f64) -> LedgerResult<f64> {
    if !amount.is_finite() {
        return Err(LedgerError::Validation(format!(
            "amount must be a finite number, got {amount}"
        )));
    }
    if amount < 0.0 {
        return Err(LedgerError::Validation(format!(
            "amount must not be negative, got {amount}"
        )));
    }
    Ok(amount)
}
