//! Shorthand pattern expansion.
//!
//! A pure transformation layer with bounded output. Two modes:
//!
//! - **value mode** — given already-parsed arguments, produce the explicit
//!   number list (`volteo`, `rango`, ...). Used by the special-patterns
//!   recognizer, which needs the list *and* the provenance.
//! - **text mode** — rewrite every shorthand match inside a line with its
//!   expansion, in the fixed order volteo, rango, decena, terminal, pares
//!   relativos, centenas todas. Order matters: an earlier expansion may
//!   produce digits a later pattern must not re-interpret.
//!
//! Every entry point enforces the expansion cap; a line whose expanded form
//! exceeds it is rejected with [`ListeroError::Expansion`].

use crate::error::{ListeroError, Result};
use crate::patterns;

/// Zero-pad to canonical 2-digit form.
pub(crate) fn pad2(n: u32) -> String {
    format!("{:02}", n % 100)
}

/// `NN v` — the number and its digit-reversal.
pub fn volteo(nn: &str) -> Vec<String> {
    let padded = pad2(nn.parse::<u32>().unwrap_or(0));
    let reversed: String = padded.chars().rev().collect();
    vec![padded, reversed]
}

/// `A al B` — inclusive 2-digit range. Bounds above 99 or non-numeric fail.
pub fn rango(a: &str, b: &str) -> Result<Vec<String>> {
    let (a, b) = match (a.parse::<u32>(), b.parse::<u32>()) {
        (Ok(a), Ok(b)) => (a, b),
        _ => {
            return Err(ListeroError::Expansion {
                token: format!("{a} al {b}"),
                reason: "non-numeric range bound".into(),
            })
        }
    };
    if a > 99 || b > 99 {
        return Err(ListeroError::Expansion {
            token: format!("{a} al {b}"),
            reason: "range bound out of 2-digit domain".into(),
        });
    }
    let (lo, hi) = if a > b { (b, a) } else { (a, b) };
    Ok((lo..=hi).map(pad2).collect())
}

/// `d X` — the ten numbers ending in digit X.
pub fn decena(x: u32) -> Vec<String> {
    (0..10).map(|d| pad2(d * 10 + (x % 10))).collect()
}

/// `t X` — the ten numbers starting with digit X.
pub fn terminal(x: u32) -> Vec<String> {
    (0..10).map(|u| pad2((x % 10) * 10 + u)).collect()
}

/// `NN pr K` — `NN01 .. NN{K}` as 4-digit strings, K capped at 100.
///
/// The extractor downstream splits each 4-digit string into two 2-digit
/// canonical numbers; the raw strings are kept for provenance.
pub fn pares_relativos(nn: &str, k: u32) -> Vec<String> {
    let base = pad2(nn.parse::<u32>().unwrap_or(0));
    (1..=k.min(100)).map(|i| format!("{base}{:02}", i % 100)).collect()
}

/// For each 2-digit number, all ten centena prefixes `0NN .. 9NN`.
pub fn centenas_todas(numbers: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(numbers.len() * 10);
    for nn in numbers {
        let padded = pad2(nn.parse::<u32>().unwrap_or(0));
        for c in 0..10 {
            out.push(format!("{c}{padded}"));
        }
    }
    out
}

/// `NN` repeated K times.
pub fn repeticion(k: u32, nn: &str) -> Vec<String> {
    let padded = pad2(nn.parse::<u32>().unwrap_or(0));
    std::iter::repeat(padded).take(k as usize).collect()
}

/// Text-mode expansion: rewrite every shorthand match in `line` with its
/// explicit number list. A rango with unusable bounds is left unchanged.
pub fn expand_text(line: &str, cap: usize) -> Result<String> {
    let line = patterns::volteo().replace_all(line, |caps: &regex::Captures| volteo(&caps[1]).join(" ")).into_owned();

    let line = patterns::rango()
        .replace_all(&line, |caps: &regex::Captures| match rango(&caps[1], &caps[2]) {
            Ok(numbers) => numbers.join(" "),
            Err(_) => caps[0].to_string(),
        })
        .into_owned();

    let line = patterns::decena()
        .replace_all(&line, |caps: &regex::Captures| decena(caps[1].parse().unwrap_or(0)).join(" "))
        .into_owned();

    let line = patterns::terminal()
        .replace_all(&line, |caps: &regex::Captures| terminal(caps[1].parse().unwrap_or(0)).join(" "))
        .into_owned();

    let line = patterns::pares_relativos()
        .replace_all(&line, |caps: &regex::Captures| {
            pares_relativos(&caps[1], caps[2].parse().unwrap_or(0)).join(" ")
        })
        .into_owned();

    let line = patterns::centenas_todas()
        .replace_all(&line, |caps: &regex::Captures| {
            let numbers: Vec<String> = caps[1].split_whitespace().map(str::to_string).collect();
            let mut expanded = centenas_todas(&numbers).join(" ");
            if let Some(amount) = caps.get(2) {
                expanded.push_str(" con ");
                expanded.push_str(amount.as_str());
            }
            expanded
        })
        .into_owned();

    enforce_cap(&line, line.split_whitespace().filter(|t| t.chars().all(|c| c.is_ascii_digit())).count(), cap)?;
    Ok(line)
}

/// Reject expansions past the configured cap.
pub(crate) fn enforce_cap(token: &str, produced: usize, cap: usize) -> Result<()> {
    if produced > cap {
        return Err(ListeroError::Expansion {
            token: token.chars().take(40).collect(),
            reason: format!("expands to {produced} numbers, cap is {cap}"),
        });
    }
    Ok(())
}
