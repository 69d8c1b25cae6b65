//! Receipt-note quantity checks.
//!
//! - `leftover` - outstanding quantity per order line
//! - `detector` - under-receipt (shortfall) detection
//! - `over_received` - hard over-receipt gate
//! - `coverage` - shortfall already covered by return notes

pub mod coverage;
pub mod detector;
pub mod error;
pub mod leftover;
pub mod over_received;

#[cfg(test)]
mod shortfall_props;

pub use coverage::remaining_shortfall;
pub use detector::{ShortfallLine, detect};
pub use error::OverReceivedError;
pub use leftover::{LeftoverLine, leftover, leftovers};
pub use over_received::{OverReceivedLine, ensure_not_over_received, validate_over_received};
