//! Lexical normalization.
//!
//! Turns raw ticket text into the canonical form the segmenter and
//! recognizers operate on. The steps run in a fixed order:
//!
//! ```text
//! raw text
//!   │ 1. line endings        \r\n, \r -> \n; 3+ blank runs -> one separator
//!   │ 2. whitespace          tabs/NBSP -> space, collapse runs, trim lines
//!   │ 3. operator spacing    "25 * 33" -> "25*33", "×" -> "x"
//!   │ 4. confusables         2o -> 20, l5 -> 15 (digit-bearing tokens only)
//!   │ 5. case folding        lowercase, name-lines keep their casing
//!   │ 6. monetary            "con20" -> "con 20", "$" stripped, "2,5" -> "2.5"
//!   │ 7. cleanup             conservative character filter, drop gutted lines
//!   ▼
//! canonical text
//! ```
//!
//! The whole pass is pure and idempotent: `preprocess(preprocess(x)) ==
//! preprocess(x)` for any input. Shorthand patterns (volteo, rango, ...) are
//! deliberately left in place — expanding them here would erase the
//! provenance the recognizers must attach to `Especial` rows, so expansion
//! is gated by `auto_expand` at recognition time instead.

use crate::config::ParserConfig;
use crate::engine::segment::is_name_line;
use crate::error::Result;

/// Letter ratio used when deciding whether a line keeps its casing.
/// Stricter than the segmenter's 0.6 so that only clearly name-shaped
/// lines keep their capitals.
const NAME_CASE_RATIO: f64 = 0.7;

/// Normalize `text` into canonical form. Pure; never mutates shared state.
pub fn preprocess(text: &str, config: &ParserConfig) -> Result<String> {
    let text = normalize_line_endings(text);
    let text = normalize_whitespace(&text);
    let text = tighten_operators(&text);
    let text = normalize_confusables(&text);
    let text = fold_case(&text);
    let text = normalize_monetary(&text, config.decimal_separator);
    Ok(final_cleanup(&text))
}

fn normalize_line_endings(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    // Collapse runs of 3+ newlines to exactly 2 (one blank separator line).
    regex!(r"\n{3,}").replace_all(&unified, "\n\n").into_owned()
}

fn normalize_whitespace(text: &str) -> String {
    text.lines()
        .map(|line| {
            let spaced: String =
                line.chars().map(|c| if c == '\t' || (c.is_whitespace() && c != '\n') { ' ' } else { c }).collect();
            regex!(r" {2,}").replace_all(&spaced, " ").trim().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip whitespace around operators between digits and fold `×` to `x`.
/// Runs to fixpoint because adjacent operator pairs ("1 - 2 - 3") overlap.
fn tighten_operators(text: &str) -> String {
    let re = regex!(r"(\d)\s*([*x×+.-])\s*(\d)");
    let mut current = text.to_string();
    loop {
        let next = re
            .replace_all(&current, |caps: &regex::Captures| {
                let op = if &caps[2] == "×" { "x" } else { &caps[2] };
                format!("{}{}{}", &caps[1], op, &caps[3])
            })
            .into_owned();
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Map character confusables to digits, but only inside tokens that already
/// carry a digit; purely alphabetic words (`con`, player names) are never
/// touched. Stray quote characters are dropped everywhere.
fn normalize_confusables(text: &str) -> String {
    let text: String = text.chars().filter(|c| !matches!(c, '\'' | '"' | '`' | '´')).collect();

    text.lines()
        .map(|line| {
            line.split(' ')
                .map(|token| {
                    if token.chars().any(|c| c.is_ascii_digit()) {
                        token
                            .chars()
                            .map(|c| match c {
                                'o' | 'O' | 'ø' | 'Ø' | 'ο' | 'Ο' => '0',
                                'l' | 'I' | '|' => '1',
                                other => other,
                            })
                            .collect()
                    } else {
                        token.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lowercase every line except name-lines, whose casing is kept for display.
///
/// The segmenter opens a new block at every name-line, wherever it appears,
/// so every line passing the heuristic keeps its casing. Bet and total
/// lines never pass it (digits, reserved words).
fn fold_case(text: &str) -> String {
    text.lines()
        .map(|line| if is_name_line(line, NAME_CASE_RATIO) { line.to_string() } else { line.to_lowercase() })
        .collect::<Vec<_>>()
        .join("\n")
}

fn normalize_monetary(text: &str, decimal_separator: char) -> String {
    // Currency symbols add nothing to the canonical form and would keep the
    // respacing rules below from seeing their digits.
    let text: String = text.chars().filter(|c| !matches!(c, '$' | '€' | '£')).collect();
    // `2,5` -> configured decimal mark (default `.`).
    let text = regex!(r"(\d),(\d)")
        .replace_all(&text, |caps: &regex::Captures| format!("{}{}{}", &caps[1], decimal_separator, &caps[2]))
        .into_owned();
    // Re-space `con` and `y` when glued to digits.
    let text = regex!(r"\bcon(\d)").replace_all(&text, "con $1").into_owned();
    let text = regex!(r"(\d)y(\d)").replace_all(&text, "$1 y $2").into_owned();
    regex!(r"(\d)\s*(?:pesos|bss|bs)\b").replace_all(&text, "$1").into_owned()
}

/// Conservative character filter. Letters (including accented), digits,
/// whitespace, and the operator/punctuation set the grammar uses survive;
/// everything else is dropped. Lines gutted to nothing by the filter are
/// removed entirely; original blank lines stay as block separators.
fn final_cleanup(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    for line in text.lines() {
        if line.is_empty() {
            out.push(String::new());
            continue;
        }
        let kept: String = line
            .chars()
            .filter(|c| {
                c.is_alphanumeric() || c.is_whitespace() || matches!(c, '.' | ',' | '-' | '+' | '*' | 'x' | ':' | '=')
            })
            .collect();
        let kept = regex!(r" {2,}").replace_all(kept.trim(), " ").into_owned();
        if !kept.is_empty() {
            out.push(kept);
        }
    }
    // The filter may have removed a line between two separators; re-collapse
    // so downstream never sees a run of blanks.
    let joined = out.join("\n");
    let joined = regex!(r"\n{3,}").replace_all(&joined, "\n\n").into_owned();
    joined.trim_matches('\n').to_string()
}
