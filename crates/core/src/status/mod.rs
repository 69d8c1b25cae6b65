//! Order fulfillment status state machine.
//!
//! Approved → Partially_Received → Completed, derived from receipt totals.

pub mod deriver;
pub mod types;

#[cfg(test)]
mod deriver_props;

pub use deriver::{StatusWrite, derive_status, plan_status_write};
pub use types::OrderFulfillmentStatus;
