//! Error taxonomy for the parsing core.
//!
//! The public `parse` surface never returns these directly — failures are
//! folded into `ParseResult { success: false, .. }`. The variants exist for
//! the internal stage boundaries (preprocessor, expander, calculator) and
//! for callers of the lower-level entry points.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListeroError {
    /// Unclassified parse failure, with optional context in the message.
    #[error("parse error: {0}")]
    Parser(String),

    /// Semantic validation failed; carries the individual messages.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// A shorthand pattern could not be expanded (bad bounds, cap exceeded).
    #[error("cannot expand '{token}': {reason}")]
    Expansion { token: String, reason: String },

    /// Arithmetic failure while aggregating amounts.
    #[error("calculation error in {op} (operands: {})", .operands.join(", "))]
    Calculation { op: &'static str, operands: Vec<String> },

    /// The parse exceeded the configured wall-clock budget.
    #[error("parse exceeded {budget_ms} ms budget")]
    Timeout { budget_ms: u64 },
}

pub type Result<T> = std::result::Result<T, ListeroError>;
