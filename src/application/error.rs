use thiserror::Error;

use crate::domain::Amount;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Category cannot be empty.")]
    EmptyCategory,

    #[error("'{0}' is not a valid number.")]
    InvalidAmount(String),

    #[error("Amount must be positive.")]
    NonPositiveAmount(Amount),

    #[error("Amount '{0}' is too large to record.")]
    AmountOutOfRange(String),

    #[error("Invalid date '{0}'. Use YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("'{0}' is not a valid ID number.")]
    InvalidId(String),
}

impl LedgerError {
    /// True for every rejection of an add: bad category, amount or date.
    pub fn is_validation(&self) -> bool {
        !matches!(self, LedgerError::InvalidId(_))
    }

    /// True when the input text could not be read as a number at all.
    pub fn is_parse(&self) -> bool {
        matches!(self, LedgerError::InvalidAmount(_) | LedgerError::InvalidId(_))
    }
}
