//! Domain model — the normalized layer between raw ticket text and consumers.
//!
//! Everything monetary is a [`Decimal`]; bet numbers are canonical digit
//! *strings* (2 or 3 digits, leading zeros significant), never integers.
//! Entities are produced by the parse pipeline, owned by the returned
//! [`ParseResult`], and immutable once returned.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The closed set of typed bets a line can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BetKind {
    /// Straight bet on individual 2-digit numbers.
    Fijo,
    /// Companion "run" bet on the same numbers, usually at a second stake.
    Corrido,
    /// Pair-combination bet; stake applies per unordered pair.
    Parle,
    /// 3-digit-number bet.
    Centena,
    /// All pairs of a set of numbers for a flat total price.
    Candado,
    /// Result of a shorthand pattern expansion (volteo, rango, decena, ...).
    Especial,
}

impl BetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BetKind::Fijo => "fijo",
            BetKind::Corrido => "corrido",
            BetKind::Parle => "parle",
            BetKind::Centena => "centena",
            BetKind::Candado => "candado",
            BetKind::Especial => "especial",
        }
    }
}

/// Which shorthand produced an expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternType {
    Volteo,
    Rango,
    Decena,
    Terminal,
    ParesRelativos,
    CentenasTodas,
    Repeticion,
    Simple,
}

bitflags::bitflags! {
    /// Compact set of bet kinds observed in a jugada.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct BetTypeSet: u8 {
        const FIJO     = 1 << 0;
        const CORRIDO  = 1 << 1;
        const PARLE    = 1 << 2;
        const CENTENA  = 1 << 3;
        const CANDADO  = 1 << 4;
        const ESPECIAL = 1 << 5;
    }
}

// Serialized as the raw bit pattern; unknown bits are dropped on the way in.
impl Serialize for BetTypeSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for BetTypeSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(BetTypeSet::from_bits_truncate(u8::deserialize(deserializer)?))
    }
}

impl From<BetKind> for BetTypeSet {
    fn from(kind: BetKind) -> Self {
        match kind {
            BetKind::Fijo => BetTypeSet::FIJO,
            BetKind::Corrido => BetTypeSet::CORRIDO,
            BetKind::Parle => BetTypeSet::PARLE,
            BetKind::Centena => BetTypeSet::CENTENA,
            BetKind::Candado => BetTypeSet::CANDADO,
            BetKind::Especial => BetTypeSet::ESPECIAL,
        }
    }
}

/// Provenance of a shorthand expansion, kept on the detail that consumed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expansion {
    /// The token as written, e.g. `10v` or `5 al 9`.
    pub original_token: String,
    /// The explicit list the token expanded to, before any 4-digit split.
    pub expanded: Vec<String>,
    pub pattern_type: PatternType,
}

/// One typed row of a parsed bet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetalleApuesta {
    pub kind: BetKind,
    /// Canonical digit strings, 2 or 3 digits each, in source order.
    pub numbers: Vec<String>,
    /// Total monetary value for the row.
    pub amount: Decimal,
    /// Per-number (or per-combination) stake.
    pub unit_amount: Decimal,
    /// Number of pairwise combinations, for Parle and Candado.
    pub combinations: Option<u32>,
    /// Ordered pairs, for explicit parles (`25*33`).
    pub pairs: Option<Vec<(String, String)>>,
    pub original_line: String,
    /// 1-based line number in the canonical (preprocessed) text.
    pub line_number: usize,
    pub expansion: Option<Expansion>,
}

/// Per-jugada bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JugadaMetadata {
    pub timestamp: DateTime<Utc>,
    pub processing_time_ms: f64,
    pub line_count: usize,
    pub number_count: usize,
    pub bet_types: BetTypeSet,
}

/// One player's complete ticket: name + bets + optional declared total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jugada {
    pub player_name: String,
    pub total_calculated: Decimal,
    pub total_declared: Option<Decimal>,
    pub original_lines: Vec<String>,
    pub details: Vec<DetalleApuesta>,
    pub is_valid: bool,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    pub metadata: JugadaMetadata,
}

/// Roll-up over all jugadas in a parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_jugadas: usize,
    pub total_calculated: Decimal,
    pub total_declared: Option<Decimal>,
    /// Absolute difference between calculated and declared totals.
    pub difference: Decimal,
    pub is_valid: bool,
    /// Heuristic confidence in \[0, 1\].
    pub confidence: f64,
}

/// Per-kind row counts plus grand totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    pub fijos: usize,
    pub corridos: usize,
    pub parles: usize,
    pub centenas: usize,
    pub candados: usize,
    pub especiales: usize,
    pub total_apuestas: usize,
    pub total_numeros: usize,
}

impl ParseStats {
    pub(crate) fn record(&mut self, detail: &DetalleApuesta) {
        match detail.kind {
            BetKind::Fijo => self.fijos += 1,
            BetKind::Corrido => self.corridos += 1,
            BetKind::Parle => self.parles += 1,
            BetKind::Centena => self.centenas += 1,
            BetKind::Candado => self.candados += 1,
            BetKind::Especial => self.especiales += 1,
        }
        self.total_apuestas += 1;
        self.total_numeros += detail.numbers.len();
    }
}

/// Cache observability counters, surfaced in [`ParseMetadata`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub evictions: u64,
    pub hit_rate: f64,
}

/// Run-level bookkeeping for a parse call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseMetadata {
    pub parse_time_ms: f64,
    pub original_length: usize,
    pub processed_length: usize,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    pub cache_stats: Option<CacheStats>,
}

/// Result of [`crate::parse`]: the full ledger plus reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub success: bool,
    pub jugadas: Vec<Jugada>,
    pub summary: Summary,
    pub metadata: ParseMetadata,
    pub stats: ParseStats,
}

impl ParseResult {
    /// An empty failure result carrying `errors`. Elapsed time is stamped by
    /// the caller once the run finishes.
    pub(crate) fn failure(errors: Vec<String>) -> Self {
        ParseResult {
            success: false,
            jugadas: Vec::new(),
            summary: Summary {
                total_jugadas: 0,
                total_calculated: Decimal::ZERO,
                total_declared: None,
                difference: Decimal::ZERO,
                is_valid: false,
                confidence: 0.0,
            },
            metadata: ParseMetadata { errors, ..ParseMetadata::default() },
            stats: ParseStats::default(),
        }
    }
}

/// Outcome of syntactic or semantic validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub(crate) fn ok() -> Self {
        ValidationResult { is_valid: true, errors: Vec::new(), warnings: Vec::new() }
    }

    pub(crate) fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
        self.is_valid = false;
    }

    pub(crate) fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub(crate) fn merge(&mut self, other: ValidationResult) {
        self.is_valid &= other.is_valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

/// Segmentation-only view of a ticket, from [`crate::Parser::extract_structure`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInfo {
    /// `None` when the block had no name-line (player defaults to `Desconocido`).
    pub player_name: Option<String>,
    /// Bet/total lines of the block, in source order.
    pub lines: Vec<String>,
    /// 1-based line number of the block's first line in the preprocessed text.
    pub start_line: usize,
    pub has_total: bool,
}
