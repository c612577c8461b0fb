//! Syntactic and semantic validation.
//!
//! Two entry points with different costs:
//!
//! - [`validate_syntax`] — pre-parse, line-by-line classification of the
//!   canonical text. Cheap; never builds jugadas.
//! - [`validate_jugada`] — post-parse checks over produced details and the
//!   declared-total reconciliation ladder (under 0.01 valid, under 1.00 a
//!   warning, at or above 1.00 an error when `validate_totals` is set).

use rust_decimal::Decimal;

use crate::analyze;
use crate::config::ParserConfig;
use crate::engine::calc::{mismatch_error_threshold, tolerance};
use crate::engine::segment::{is_name_line, is_total_line};
use crate::patterns;
use crate::ticket::{BetKind, Jugada, ValidationResult};

/// Complexity score above which a ticket earns a diagnostic warning.
const COMPLEXITY_WARN_THRESHOLD: f64 = 75.0;

/// Line-by-line syntactic validation of canonical text.
pub(crate) fn validate_syntax(text: &str, config: &ParserConfig) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if text.trim().is_empty() {
        result.error("Empty text");
        return result;
    }

    let mut name_lines = 0usize;
    // Total-lines are counted per block: a blank separator or a name-line
    // opens a new block, exactly as the segmenter does. One total per block
    // is the normal shape; only a second total within the same block warns.
    let mut block_total_lines = 0usize;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            block_total_lines = 0;
            continue;
        }
        if is_name_line(trimmed, 0.6) {
            name_lines += 1;
            block_total_lines = 0;
            continue;
        }
        if is_total_line(trimmed) {
            block_total_lines += 1;
            if block_total_lines == 2 {
                result.warn(format!("line {line_no}: more than one total line in a block"));
            }
            continue;
        }
        validate_bet_line(trimmed, line_no, &mut result);
    }

    if name_lines > config.max_jugadores {
        result.error(format!("{name_lines} player blocks exceed the limit of {}", config.max_jugadores));
    }

    let analysis = analyze::analyze_canonical(text);
    if analysis.complexity > COMPLEXITY_WARN_THRESHOLD {
        result.warn(format!("ticket complexity {:.1} is unusually high", analysis.complexity));
    }

    result
}

fn validate_bet_line(line: &str, line_no: usize, result: &mut ValidationResult) {
    let has_keyword = regex!(r"\b(?:con|parle|candado)\b").is_match(line);
    let (numbers_part, stake_part) = crate::engine::recognize::split_at_con(line);
    let numbers = crate::engine::recognize::extract_numbers(numbers_part);

    // Digit runs too long for any canonical length.
    for m in patterns::number_token().find_iter(numbers_part) {
        if m.as_str().len() > 4 {
            result.error(format!("line {line_no}: number '{}' out of range for its length", m.as_str()));
        }
    }

    if has_keyword && numbers.is_empty() && !patterns::parle_explicito().is_match(line) {
        result.error(format!("line {line_no}: bet line without numbers"));
        return;
    }
    if !has_keyword && numbers.is_empty() {
        result.warn(format!("line {line_no}: unclassified line: '{line}'"));
        return;
    }

    if stake_part.is_some() {
        match crate::engine::recognize::con_stakes(line) {
            Some((amount, _)) => {
                if amount == Decimal::ZERO {
                    result.warn(format!("line {line_no}: zero amount"));
                }
            }
            None => result.warn(format!("line {line_no}: missing amount after 'con'")),
        }
    } else if !patterns::parle_inline().is_match(line) && !patterns::centenas_todas().is_match(line) {
        result.warn(format!("line {line_no}: missing amount, default stake applies"));
    }

    let mut seen = std::collections::HashSet::new();
    for number in &numbers {
        if !seen.insert(number.clone()) {
            result.warn(format!("line {line_no}: duplicated number {number}"));
            break;
        }
    }
}

/// Post-parse semantic validation of one jugada.
pub(crate) fn validate_jugada(jugada: &Jugada, config: &ParserConfig) -> ValidationResult {
    let mut result = ValidationResult::ok();
    let canonical = regex!(r"^[0-9]{2,3}$");

    for detail in &jugada.details {
        let line_no = detail.line_number;

        for number in &detail.numbers {
            if !canonical.is_match(number) {
                result.error(format!("line {line_no}: '{number}' is not a canonical 2- or 3-digit number"));
            }
        }
        if detail.kind == BetKind::Centena && detail.numbers.iter().any(|n| n.len() != 3) {
            result.error(format!("line {line_no}: centena numbers must be 3 digits"));
        }

        if detail.amount.is_sign_negative() && !config.allow_negative {
            result.error(format!("line {line_no}: negative amount {}", detail.amount));
        }
        if detail.amount.abs() > config.max_monto {
            result.warn(format!(
                "line {line_no}: amount {}{} exceeds {}",
                config.currency_symbol, detail.amount, config.max_monto
            ));
        }

        if matches!(detail.kind, BetKind::Parle | BetKind::Candado) {
            if detail.numbers.len() < 2 {
                result.error(format!("line {line_no}: {} needs at least two numbers", detail.kind.as_str()));
            }
            if detail.combinations.is_none() {
                result.error(format!("line {line_no}: {} without a combination count", detail.kind.as_str()));
            }
        }

        let mut seen = std::collections::HashSet::new();
        for number in &detail.numbers {
            if !seen.insert(number.clone()) && detail.expansion.is_none() {
                result.warn(format!("line {line_no}: duplicated number {number} in one bet"));
                break;
            }
        }
    }

    if config.validate_totals {
        if let Some(declared) = jugada.total_declared {
            let diff = (jugada.total_calculated - declared).abs();
            if diff >= mismatch_error_threshold() {
                result.error(format!(
                    "declared total {declared} differs from calculated {} by {diff}",
                    jugada.total_calculated
                ));
            } else if diff >= tolerance() {
                result.warn(format!(
                    "declared total {declared} differs from calculated {} by {diff}",
                    jugada.total_calculated
                ));
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::calc::new_jugada;
    use crate::ticket::DetalleApuesta;
    use std::str::FromStr;

    fn cfg() -> ParserConfig {
        ParserConfig::default()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn empty_text_is_an_error() {
        let result = validate_syntax("", &cfg());
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["Empty text"]);
    }

    #[test]
    fn syntax_classification() {
        // (input, expect_valid, expect_warnings)
        let cases: Vec<(&str, bool, bool)> = vec![
            ("Juan\n05 10 con 20\ntotal: 40", true, false),
            ("con 20", false, false),         // bet keyword, no numbers
            ("05 10 con 0", true, true),      // zero amount
            ("05 05 con 5", true, true),      // duplicate number
            ("123456 con 5", false, false),   // digit run too long
            ("05 10", true, true),            // missing amount
        ];
        for (input, expect_valid, expect_warn) in cases {
            let result = validate_syntax(input, &cfg());
            assert_eq!(result.is_valid, expect_valid, "input {:?}: {:?}", input, result.errors);
            assert_eq!(!result.warnings.is_empty(), expect_warn, "input {:?}: {:?}", input, result.warnings);
        }
    }

    #[test]
    fn duplicate_totals_warn_per_block_only() {
        // Two totals in one block: a genuine duplicate.
        let result = validate_syntax("05 con 1\ntotal: 1\ntotal: 2", &cfg());
        assert!(result.warnings.iter().any(|w| w.contains("more than one total line")));

        // One total per block is the normal multi-player shape; no warning,
        // whether blocks are split by a blank line or by the next name-line.
        let result = validate_syntax("Juan\n05 con 1\ntotal: 1\n\nPedro\n10 con 2\ntotal: 2", &cfg());
        assert!(result.warnings.iter().all(|w| !w.contains("more than one total line")));
        let result = validate_syntax("Juan\n05 con 1\ntotal: 1\nPedro\n10 con 2\ntotal: 2", &cfg());
        assert!(result.warnings.iter().all(|w| !w.contains("more than one total line")));
    }

    fn detail(kind: BetKind, numbers: &[&str], amount: &str) -> DetalleApuesta {
        DetalleApuesta {
            kind,
            numbers: numbers.iter().map(|s| s.to_string()).collect(),
            amount: dec(amount),
            unit_amount: dec(amount),
            combinations: matches!(kind, BetKind::Parle | BetKind::Candado).then(|| 1),
            pairs: None,
            original_line: String::new(),
            line_number: 1,
            expansion: None,
        }
    }

    #[test]
    fn jugada_checks() {
        let mut jugada = new_jugada("Juan".into(), vec![]);
        jugada.details.push(detail(BetKind::Fijo, &["05", "10"], "40"));
        assert!(validate_jugada(&jugada, &cfg()).is_valid);

        // Negative amount with allow_negative off.
        jugada.details.push(detail(BetKind::Fijo, &["05"], "-5"));
        assert!(!validate_jugada(&jugada, &cfg()).is_valid);
        let mut permissive = cfg();
        permissive.allow_negative = true;
        assert!(validate_jugada(&jugada, &permissive).is_valid);

        // Centena with a 2-digit number.
        let mut jugada = new_jugada("Juan".into(), vec![]);
        jugada.details.push(detail(BetKind::Centena, &["123", "45"], "5"));
        assert!(!validate_jugada(&jugada, &cfg()).is_valid);

        // Parle without combinations.
        let mut jugada = new_jugada("Juan".into(), vec![]);
        let mut parle = detail(BetKind::Parle, &["05", "10"], "5");
        parle.combinations = None;
        jugada.details.push(parle);
        assert!(!validate_jugada(&jugada, &cfg()).is_valid);
    }

    #[test]
    fn totals_ladder() {
        let mut jugada = new_jugada("Juan".into(), vec![]);
        jugada.details.push(detail(BetKind::Fijo, &["05", "10"], "40"));
        jugada.total_calculated = dec("40");

        jugada.total_declared = Some(dec("40"));
        let result = validate_jugada(&jugada, &cfg());
        assert!(result.is_valid && result.warnings.is_empty());

        jugada.total_declared = Some(dec("40.50"));
        let result = validate_jugada(&jugada, &cfg());
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);

        jugada.total_declared = Some(dec("100"));
        let result = validate_jugada(&jugada, &cfg());
        assert!(!result.is_valid);

        let mut lenient = cfg();
        lenient.validate_totals = false;
        assert!(validate_jugada(&jugada, &lenient).is_valid);
    }

    #[test]
    fn excessive_amount_warns() {
        let mut jugada = new_jugada("Juan".into(), vec![]);
        jugada.details.push(detail(BetKind::Fijo, &["05"], "2000000"));
        let result = validate_jugada(&jugada, &cfg());
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
    }
}
