//! Reconciliation error types.

use procura_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::repository::RepositoryError;
use crate::returns::ReturnNoteError;
use crate::shortfall::OverReceivedError;

/// Reconciliation-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconciliationError {
    /// A receipt note receives more than was ordered.
    #[error(transparent)]
    OverReceived(#[from] OverReceivedError),

    /// A return note sends back more than is returnable.
    #[error(transparent)]
    ReturnNote(#[from] ReturnNoteError),

    /// Order data could not be read.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// More holdback released than was withheld.
    #[error("Release amount {release} exceeds holdback total {holdback}")]
    ReleaseExceedsHoldback {
        /// Requested release.
        release: Decimal,
        /// Withheld total.
        holdback: Decimal,
    },

    /// Amount cannot be negative.
    #[error("Amount cannot be negative")]
    NegativeAmount,
}

impl From<ReconciliationError> for AppError {
    fn from(err: ReconciliationError) -> Self {
        match err {
            ReconciliationError::OverReceived(e) => e.into(),
            ReconciliationError::ReturnNote(e) => e.into(),
            ReconciliationError::Repository(e) => e.into(),
            ReconciliationError::ReleaseExceedsHoldback { .. } => {
                Self::BusinessRule(err.to_string())
            }
            ReconciliationError::NegativeAmount => Self::Validation(err.to_string()),
        }
    }
}
