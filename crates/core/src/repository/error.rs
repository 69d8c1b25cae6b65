//! Repository error types.

use procura_shared::AppError;
use thiserror::Error;

use crate::fulfillment::OrderRef;

/// Errors raised by a fulfillment repository.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The order does not exist.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderRef),

    /// The backing store rejected a write.
    #[error("Failed to write status of order {order}: {reason}")]
    WriteFailed {
        /// Order being written.
        order: OrderRef,
        /// Backend message.
        reason: String,
    },

    /// The backing store could not be read.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::OrderNotFound(_) => Self::NotFound(err.to_string()),
            RepositoryError::WriteFailed { .. } | RepositoryError::Unavailable(_) => {
                Self::Storage(err.to_string())
            }
        }
    }
}
