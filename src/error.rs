use crate::domain::order::OrderId;
use thiserror::Error;

/// Classification the transaction boundary inspects to pick commit or rollback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Expected domain failure; work done so far is still valid.
    Business,
    /// Unexpected failure; everything done in the operation must be discarded.
    System,
}

#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Not enough money for order {order_id}: {message}")]
    NotEnoughMoney { order_id: OrderId, message: String },
    #[error("System error: {0}")]
    System(String),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Transaction error: {0}")]
    TransactionError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::NotEnoughMoney { .. } => ErrorKind::Business,
            _ => ErrorKind::System,
        }
    }

    pub fn is_business(&self) -> bool {
        self.kind() == ErrorKind::Business
    }
}

pub type Result<T> = std::result::Result<T, OrderError>;
