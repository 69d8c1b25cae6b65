//! Return-note error types.

use procura_shared::AppError;
use procura_shared::types::ItemKey;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A return line sending back more than is still returnable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcessReturnLine {
    /// Item identity.
    pub item: ItemKey,
    /// Name shown to the user.
    pub label: String,
    /// Received minus already returned, floored at zero.
    pub returnable_quantity: Decimal,
    /// Quantity on the draft.
    pub return_quantity: Decimal,
}

/// Errors raised while validating a return note.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReturnNoteError {
    /// At least one line returns more than what was received and not yet returned.
    #[error("Return quantity exceeds returnable quantity for: {}", describe(.0))]
    ExceedsReturnable(Vec<ExcessReturnLine>),

    /// The note has no line with a positive quantity.
    #[error("Return note must have at least one line with a positive quantity")]
    Empty,
}

fn describe(lines: &[ExcessReturnLine]) -> String {
    lines
        .iter()
        .map(|line| {
            format!(
                "{} (returnable {}, returning {})",
                line.label,
                line.returnable_quantity.normalize(),
                line.return_quantity.normalize()
            )
        })
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<ReturnNoteError> for AppError {
    fn from(err: ReturnNoteError) -> Self {
        match err {
            ReturnNoteError::ExceedsReturnable(_) => Self::BusinessRule(err.to_string()),
            ReturnNoteError::Empty => Self::Validation(err.to_string()),
        }
    }
}
