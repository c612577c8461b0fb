//! # listero
//!
//! Parser for informally written lottery-bet tickets (bolita). Free-form,
//! multi-player Spanish ticket text goes in; a deterministic, validated bet
//! ledger comes out: per-player [`Jugada`]s with typed [`DetalleApuesta`]
//! rows, decimal-exact totals, and a reconciliation against declared
//! totals.
//!
//! ```
//! use listero::parse;
//!
//! let out = parse("Juan\n05 10 con 20\nTotal: 40");
//! assert!(out.success);
//! let jugada = &out.jugadas[0];
//! assert_eq!(jugada.player_name, "Juan");
//! assert!(jugada.is_valid);
//! ```
//!
//! The pipeline has four stages: lexical normalization (`preprocess`),
//! shorthand expansion (`expand`), block segmentation plus per-line
//! recognition through a prioritized dispatcher (`engine`), and
//! decimal-exact calculation with reconciliation (`engine::calc`). See the
//! `engine` module docs for the full picture.

extern crate self as listero;

#[macro_use]
mod macros;

mod analyze;
mod api;
mod cache;
mod config;
mod engine;
mod error;
mod expand;
mod patterns;
mod preprocess;
mod ticket;
mod validate;

pub use analyze::{analyze, TicketAnalysis};
pub use api::{
    extract_structure, parse, parse_verbose_with, parse_with, validate, validate_with, Parser, ParseResultVerbose,
};
pub use config::{CacheConfig, ParserConfig};
pub use engine::dispatch::{BlockContext, CustomRecognizer};
pub use engine::metrics::{BlockTrace, ParseDetails, StageMetrics};
pub use error::{ListeroError, Result};
pub use expand::{centenas_todas, decena, expand_text, pares_relativos, rango, repeticion, terminal, volteo};
pub use preprocess::preprocess;
pub use ticket::{
    BetKind, BetTypeSet, BlockInfo, CacheStats, DetalleApuesta, Expansion, Jugada, JugadaMetadata, ParseMetadata,
    ParseResult, ParseStats, PatternType, Summary, ValidationResult,
};
