//! Common types used across the application.

pub mod id;
pub mod item_key;
pub mod quantity;

pub use id::*;
pub use item_key::ItemKey;
pub use quantity::{Amount, Quantity, lenient_amount, lenient_quantity};
