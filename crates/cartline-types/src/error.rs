use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid money amount: {0}")]
    InvalidMoney(String),

    #[error("money amount out of range: {0}")]
    OutOfRange(String),
}
