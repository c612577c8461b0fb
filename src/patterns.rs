//! Patterns catalog.
//!
//! The closed set of regular expressions and keyword literals that define the
//! domain grammar. Every pattern is compiled exactly once (via the `regex!`
//! macro) and shared process-wide; the catalog is read-only after
//! initialization. All patterns assume preprocessed input: single spaces,
//! lowercased bet lines, operators tightened against their digits.
//!
//! Amount captures accept both `.` and `,` as the decimal mark so the catalog
//! works for either configured separator; [`crate::engine::recognize`] folds
//! the mark before decimal parsing.

use regex::Regex;

/// Reserved words that disqualify a line from being a player name. Shared
/// between the preprocessor's case-folding step and the block segmenter.
pub(crate) const RESERVED_WORDS: &[&str] =
    &["con", "parle", "candado", "total", "fijo", "corrido", "al", "pr", "v", "d", "t"];

/// Amount literal: optional sign, digits, optional decimal part.
pub(crate) const AMOUNT: &str = r"-?\d+(?:[.,]\d+)?";

/// `NN v` — a number and its digit-reversal.
pub(crate) fn volteo() -> &'static Regex {
    regex!(r"\b(\d{1,2})\s*v\b")
}

/// `A al B` — inclusive range of 2-digit numbers.
pub(crate) fn rango() -> &'static Regex {
    regex!(r"\b(\d{1,3})\s*al\s*(\d{1,3})\b")
}

/// `d X` — the ten numbers ending in digit X.
pub(crate) fn decena() -> &'static Regex {
    regex!(r"\bd\s*(\d)\b")
}

/// `t X` — the ten numbers starting with digit X.
pub(crate) fn terminal() -> &'static Regex {
    regex!(r"\bt\s*(\d)\b")
}

/// `NN pr K` — relative pairs `NN01..NN{K}`.
pub(crate) fn pares_relativos() -> &'static Regex {
    regex!(r"\b(\d{1,2})\s*pr\s*(\d{1,3})\b")
}

/// `NN [NN ...] por todas las centenas [con M]`.
pub(crate) fn centenas_todas() -> &'static Regex {
    regex!(r"\b((?:\d{1,2}\s+)*\d{1,2})\s+por\s+todas\s+las\s+centenas(?:\s+con\s+(-?\d+(?:[.,]\d+)?))?")
}

/// `NN*NN` or `NNxNN` — one explicit parle pair.
pub(crate) fn parle_explicito() -> &'static Regex {
    regex!(r"\b(\d{1,2})[*x](\d{1,2})\b")
}

/// Trailing `p M` — implicit parle stake over the preceding numbers.
pub(crate) fn parle_inline() -> &'static Regex {
    regex!(r"\bp\s*(\d+(?:[.,]\d+)?)\s*$")
}

/// The `parle` keyword with its stake clause.
pub(crate) fn parle_con() -> &'static Regex {
    regex!(r"\bparle\s+con\s+(-?\d+(?:[.,]\d+)?)")
}

/// `candado con M` — flat-priced all-pairs lock.
pub(crate) fn candado() -> &'static Regex {
    regex!(r"\bcandado\s+con\s+(-?\d+(?:[.,]\d+)?)")
}

/// A line of 3-digit numbers with one to three stake amounts:
/// `NNN [NNN ...] con Mc [y Mf [y Mco]]`.
pub(crate) fn centena_linea() -> &'static Regex {
    regex!(
        r"^((?:\d{3}\s+)*\d{3})\s+con\s+(-?\d+(?:[.,]\d+)?)(?:\s+y\s+(-?\d+(?:[.,]\d+)?))?(?:\s+y\s+(-?\d+(?:[.,]\d+)?))?\s*$"
    )
}

/// Line-anchored declared total: `total[:=]? amount`.
pub(crate) fn total_line() -> &'static Regex {
    regex!(r"^\s*total\s*[:=]?\s*(-?\d+(?:[.,]\d+)?)\s*$")
}

/// Generic stake clause: `con A [y B]`.
pub(crate) fn con_amounts() -> &'static Regex {
    regex!(r"\bcon\s+(-?\d+(?:[.,]\d+)?)(?:\s+y\s+(-?\d+(?:[.,]\d+)?))?")
}

/// Bare number token, 1 to 4 digits. Longer runs are rejected by validation.
pub(crate) fn number_token() -> &'static Regex {
    regex!(r"\d+")
}

/// True when `word` is one of the closed reserved keywords. Surrounding
/// punctuation is ignored so `total:` still counts as `total`.
pub(crate) fn is_reserved_word(word: &str) -> bool {
    let lower = word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
    RESERVED_WORDS.iter().any(|w| *w == lower)
}

/// True when the line contains any expandable shorthand pattern.
pub(crate) fn has_special_pattern(line: &str) -> bool {
    volteo().is_match(line)
        || rango().is_match(line)
        || decena().is_match(line)
        || terminal().is_match(line)
        || pares_relativos().is_match(line)
        || centenas_todas().is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_matches_core_shorthand() {
        // Array of (pattern, input, should_match)
        let cases: Vec<(&Regex, &str, bool)> = vec![
            (volteo(), "10v con 10", true),
            (volteo(), "10 v con 10", true),
            (volteo(), "volteo", false),
            (rango(), "5 al 9 con 2", true),
            (rango(), "al 9", false),
            (decena(), "d0 con 5", true),
            (decena(), "d 7", true),
            (decena(), "candado", false),
            (terminal(), "t3 con 1", true),
            (pares_relativos(), "05 pr 12", true),
            (centenas_todas(), "23 45 por todas las centenas con 2", true),
            (parle_explicito(), "25*33 parle con 5", true),
            (parle_explicito(), "25x33", true),
            (parle_inline(), "05 10 15 con 20 p5", true),
            (parle_inline(), "p5 con 10", false),
            (candado(), "05 10 candado con 12", true),
            (centena_linea(), "123 456 con 5", true),
            (centena_linea(), "12 34 con 5", false),
            (total_line(), "total: 40", true),
            (total_line(), "total 40", true),
            (total_line(), "total=40.50", true),
            (total_line(), "subtotal 40", false),
        ];

        for (re, input, expected) in cases {
            assert_eq!(re.is_match(input), expected, "pattern {:?} on {:?}", re.as_str(), input);
        }
    }

    #[test]
    fn total_line_captures_amount() {
        let caps = total_line().captures("total: 40.50").unwrap();
        assert_eq!(&caps[1], "40.50");
    }

    #[test]
    fn reserved_words_are_case_insensitive() {
        assert!(is_reserved_word("Total"));
        assert!(is_reserved_word("CANDADO"));
        assert!(!is_reserved_word("juan"));
    }
}
