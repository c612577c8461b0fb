//! Monetary aggregation and reconciliation.
//!
//! All arithmetic stays in [`Decimal`]; binary floating point never touches
//! an amount. Summation is bottom-up: detail amounts into jugada totals,
//! jugada totals into the summary. Equality of calculated and declared
//! totals is judged against an absolute tolerance of `0.01`.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::ticket::{Jugada, JugadaMetadata, ParseStats, Summary};

/// `C(n, 2)` — unordered pairs of `n` numbers.
pub(crate) fn pair_combinations(n: usize) -> u32 {
    (n * n.saturating_sub(1) / 2) as u32
}

/// Absolute tolerance under which two totals are considered equal.
pub(crate) fn tolerance() -> Decimal {
    Decimal::new(1, 2)
}

/// Mismatch at or above this is an error rather than a warning.
pub(crate) fn mismatch_error_threshold() -> Decimal {
    Decimal::ONE
}

/// Fresh jugada shell for a segmented block.
pub(crate) fn new_jugada(player_name: String, original_lines: Vec<String>) -> Jugada {
    Jugada {
        player_name,
        total_calculated: Decimal::ZERO,
        total_declared: None,
        metadata: JugadaMetadata {
            timestamp: Utc::now(),
            processing_time_ms: 0.0,
            line_count: original_lines.len(),
            number_count: 0,
            bet_types: Default::default(),
        },
        original_lines,
        details: Vec::new(),
        is_valid: true,
        warnings: Vec::new(),
        errors: Vec::new(),
    }
}

/// Sum details into the jugada total and settle its validity:
/// valid iff no declared total, or the difference is under tolerance.
pub(crate) fn finalize_jugada(jugada: &mut Jugada) {
    jugada.total_calculated = jugada.details.iter().map(|d| d.amount).sum();
    jugada.metadata.number_count = jugada.details.iter().map(|d| d.numbers.len()).sum();
    for detail in &jugada.details {
        jugada.metadata.bet_types |= detail.kind.into();
    }
    jugada.is_valid = match jugada.total_declared {
        None => true,
        Some(declared) => (jugada.total_calculated - declared).abs() < tolerance(),
    };
}

/// Confidence score in \[0, 1\]: starts at 1.0, penalized by syntax errors
/// (0.1 each), syntax warnings (0.05 each), and the invalid-jugada ratio
/// (0.3 weight); rewarded by the exact-match ratio (0.2 weight).
pub(crate) fn confidence(
    syntax_errors: usize,
    syntax_warnings: usize,
    invalid_jugadas: usize,
    exact_match_jugadas: usize,
    total_jugadas: usize,
) -> f64 {
    let mut score = 1.0 - 0.1 * syntax_errors as f64 - 0.05 * syntax_warnings as f64;
    if total_jugadas > 0 {
        score -= 0.3 * invalid_jugadas as f64 / total_jugadas as f64;
        score += 0.2 * exact_match_jugadas as f64 / total_jugadas as f64;
    }
    score.clamp(0.0, 1.0)
}

/// Roll jugadas up into the result summary.
pub(crate) fn build_summary(jugadas: &[Jugada], syntax_errors: usize, syntax_warnings: usize) -> Summary {
    let total_calculated: Decimal = jugadas.iter().map(|j| j.total_calculated).sum();
    let declared: Vec<Decimal> = jugadas.iter().filter_map(|j| j.total_declared).collect();
    let total_declared =
        if declared.is_empty() { None } else { Some(declared.iter().copied().sum::<Decimal>()) };

    let difference = match total_declared {
        Some(declared) => (total_calculated - declared).abs(),
        None => Decimal::ZERO,
    };

    let invalid = jugadas.iter().filter(|j| !j.is_valid).count();
    let exact = jugadas
        .iter()
        .filter(|j| j.total_declared.is_some_and(|d| (j.total_calculated - d).abs() < tolerance()))
        .count();

    Summary {
        total_jugadas: jugadas.len(),
        total_calculated,
        total_declared,
        difference,
        is_valid: invalid == 0 && difference < tolerance(),
        confidence: confidence(syntax_errors, syntax_warnings, invalid, exact, jugadas.len()),
    }
}

/// Per-kind row counts across all jugadas.
pub(crate) fn build_stats(jugadas: &[Jugada]) -> ParseStats {
    let mut stats = ParseStats::default();
    for jugada in jugadas {
        for detail in &jugada.details {
            stats.record(detail);
        }
    }
    stats
}
