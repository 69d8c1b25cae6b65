//! Return-note checks and suggestions.

pub mod error;
pub mod suggestion;
pub mod validation;

pub use error::{ExcessReturnLine, ReturnNoteError};
pub use suggestion::suggest_return_lines;
pub use validation::validate_return;
