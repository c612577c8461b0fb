//! Engine run metrics.
//!
//! Small opt-in structs used to observe where a parse spends its time.
//!
//! - [`crate::parse`] / [`crate::Parser::parse`] collect only the total.
//! - [`crate::parse_verbose_with`] additionally returns per-stage timings
//!   and a per-block trace.
//!
//! Metrics are intentionally simple: the hot path never allocates for them,
//! and callers choose the level of visibility they want.

use std::time::Duration;

/// Wall-clock spent in each pipeline stage.
#[derive(Debug, Default, Clone)]
pub struct StageMetrics {
    /// Lexical normalization.
    pub preprocess: Duration,
    /// Block segmentation.
    pub segment: Duration,
    /// Recognizer dispatch across all blocks.
    pub recognize: Duration,
    /// Syntax + jugada validation.
    pub validate: Duration,
    /// Total elapsed for the parse call.
    pub total: Duration,
}

/// Compact per-block trace for the verbose API.
#[derive(Debug, Clone)]
pub struct BlockTrace {
    pub player: String,
    pub lines: usize,
    pub details_produced: usize,
}

/// Extra details returned by [`crate::parse_verbose_with`].
#[derive(Debug, Default, Clone)]
pub struct ParseDetails {
    pub stages: StageMetrics,
    pub blocks: Vec<BlockTrace>,
    /// Names of recognizers in the chain, in dispatch order.
    pub recognizers: Vec<&'static str>,
}
