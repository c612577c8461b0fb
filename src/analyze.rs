//! Ticket analysis.
//!
//! Auxiliary scoring over a ticket: complexity, number-frequency
//! distribution, and shorthand-pattern coverage. The validator uses the
//! complexity score to flag pathologically dense tickets; consumers can use
//! the distributions for reporting.
//!
//! Frequency maps are `BTreeMap`s so iteration order — and therefore any
//! derived output — is deterministic.

use std::collections::BTreeMap;

use crate::config::ParserConfig;
use crate::engine::recognize::{extract_numbers, split_at_con};
use crate::engine::segment::{is_name_line, is_total_line};
use crate::patterns;
use crate::preprocess::preprocess;

/// Analysis of one ticket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketAnalysis {
    pub line_count: usize,
    pub bet_line_count: usize,
    /// Canonical number -> occurrences across all bet lines.
    pub number_frequency: BTreeMap<String, usize>,
    /// Shorthand pattern name -> match count.
    pub pattern_coverage: BTreeMap<&'static str, usize>,
    /// Heuristic density score; grows with bet lines, shorthand use, and
    /// distinct numbers.
    pub complexity: f64,
}

/// Analyze raw ticket text (normalizes it first with default options).
pub fn analyze(text: &str) -> TicketAnalysis {
    let canonical = preprocess(text, &ParserConfig::default()).unwrap_or_default();
    analyze_canonical(&canonical)
}

/// Analyze text that is already in canonical form.
pub(crate) fn analyze_canonical(text: &str) -> TicketAnalysis {
    let mut analysis = TicketAnalysis::default();

    let pattern_table: [(&'static str, &regex::Regex); 6] = [
        ("volteo", patterns::volteo()),
        ("rango", patterns::rango()),
        ("decena", patterns::decena()),
        ("terminal", patterns::terminal()),
        ("pares_relativos", patterns::pares_relativos()),
        ("centenas_todas", patterns::centenas_todas()),
    ];

    let mut pattern_matches = 0usize;
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        analysis.line_count += 1;
        if is_name_line(trimmed, 0.6) || is_total_line(trimmed) {
            continue;
        }
        analysis.bet_line_count += 1;

        for (name, re) in pattern_table {
            let count = re.find_iter(trimmed).count();
            if count > 0 {
                *analysis.pattern_coverage.entry(name).or_insert(0) += count;
                pattern_matches += count;
            }
        }

        for number in extract_numbers(split_at_con(trimmed).0) {
            *analysis.number_frequency.entry(number).or_insert(0) += 1;
        }
    }

    analysis.complexity = analysis.bet_line_count as f64
        + 2.0 * pattern_matches as f64
        + 0.1 * analysis.number_frequency.len() as f64;
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_lines_numbers_and_patterns() {
        let analysis = analyze("Juan\n05 10 con 20\n10v con 5\ntotal: 45");
        assert_eq!(analysis.line_count, 4);
        assert_eq!(analysis.bet_line_count, 2);
        assert_eq!(analysis.pattern_coverage.get("volteo"), Some(&1));
        assert_eq!(analysis.number_frequency.get("05"), Some(&1));
        // "10" appears in both bet lines (the volteo base is extracted too).
        assert_eq!(analysis.number_frequency.get("10"), Some(&2));
        assert!(analysis.complexity > 0.0);
    }

    #[test]
    fn empty_ticket_is_trivial() {
        let analysis = analyze("");
        assert_eq!(analysis, TicketAnalysis::default());
    }

    #[test]
    fn deterministic_iteration_order() {
        let analysis = analyze("90 10 05 con 1");
        let keys: Vec<&String> = analysis.number_frequency.keys().collect();
        assert_eq!(keys, vec!["05", "10", "90"]);
    }
}
