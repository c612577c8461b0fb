//! Parsing pipeline engine.
//!
//! This module is the internal entry point for turning canonical text into
//! jugadas. The public surface lives in `src/api.rs`; the pipeline is split
//! into focused submodules here:
//!
//! ```text
//! canonical text (preprocess.rs)
//!        │
//!        ▼
//!  segment::segment            per-player blocks (name-line heuristic,
//!        │                     blank separators, Desconocido fallback)
//!        ▼
//!  dispatch::Dispatcher        priority-ordered recognizers; per-block
//!        │                     BlockContext carries the stake-carryover
//!        ▼                     state (last fijo / corrido unit)
//!  recognize::*                claim a line, emit DetalleApuesta rows
//!        │
//!        ▼
//!  calc::*                     decimal-exact totals, reconciliation,
//!        │                     confidence scoring
//!        ▼
//!  Vec<Jugada> + Summary
//! ```
//!
//! ## Responsibilities by module
//!
//! - `segment.rs`: name/total-line heuristics and block partitioning.
//! - `dispatch.rs`: the recognizer chain, its priorities, and the per-block
//!   context object; also the extension point for registered recognizers.
//! - `recognize.rs`: the built-in recognizers (autocorrect, special
//!   patterns, candado, centena, parle, basic bets) and number/amount
//!   extraction helpers.
//! - `calc.rs`: amount aggregation, declared-total reconciliation, and the
//!   confidence formula.
//! - `metrics.rs`: opt-in stage timing for the verbose API.
//!
//! ## Ordering guarantees
//!
//! Details within a jugada appear in source-line order; details within one
//! line appear in the claiming recognizer's emission order; jugadas appear
//! in block order. Recognizers run sequentially — the stake-carryover rule
//! makes line order semantically significant.
//!
//! ## Debugging
//!
//! Set `LISTERO_DEBUG_RULES=1` to print recognizer claim traces.

#[path = "engine/calc.rs"]
pub(crate) mod calc;
#[path = "engine/dispatch.rs"]
pub(crate) mod dispatch;
#[path = "engine/metrics.rs"]
pub(crate) mod metrics;
#[path = "engine/recognize.rs"]
pub(crate) mod recognize;
#[path = "engine/segment.rs"]
pub(crate) mod segment;
