//! Receipt validation errors.

use procura_shared::AppError;
use thiserror::Error;

use super::over_received::OverReceivedLine;

/// A receipt note receives more than was ordered on at least one line.
///
/// Blocks the save. The message names every offending item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Received quantity exceeds ordered quantity for: {}", describe(.lines))]
pub struct OverReceivedError {
    /// Every offending line, in draft order.
    pub lines: Vec<OverReceivedLine>,
}

fn describe(lines: &[OverReceivedLine]) -> String {
    lines
        .iter()
        .map(|line| {
            format!(
                "{} (ordered {}, received {})",
                line.label(),
                line.ordered_quantity.normalize(),
                line.received_quantity.normalize()
            )
        })
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<OverReceivedError> for AppError {
    fn from(err: OverReceivedError) -> Self {
        Self::Validation(err.to_string())
    }
}
