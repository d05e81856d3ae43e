use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("remote error: {0}")]
    Remote(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("cart error: {0}")]
    Cart(#[from] cartline_ledger::CartError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SyncResult<T> = Result<T, SyncError>;
