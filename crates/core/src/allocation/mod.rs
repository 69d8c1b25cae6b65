//! Financial proration.
//!
//! - `allocator` - proportional allocation of a total across weighted items
//! - `financials` - receipt-note charges, taxes and landed cost per line
//! - `holdback` - retention and release shares per cost code

pub mod allocator;
pub mod financials;
pub mod holdback;

#[cfg(test)]
mod allocation_props;

pub use allocator::{Allocation, Allocator, ProrationItem};
pub use financials::{FinancialLine, LineFinancials, NoteCharges, NoteFinancials, NoteTaxes};
pub use holdback::{CostCodeLine, CostCodeRelease, HoldbackBreakdown};
