//! Built-in bet recognizers and extraction helpers.
//!
//! Each recognizer inspects one canonical line and, if it claims it, emits
//! zero or more [`DetalleApuesta`] rows. The dispatcher (`dispatch.rs`)
//! queries them in priority order; the first claimant wins. Number
//! extraction always operates *before* the `con` keyword boundary so that
//! digits inside amounts (`20.50`) are never harvested as bet numbers.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::engine::calc::pair_combinations;
use crate::engine::dispatch::BlockContext;
use crate::expand;
use crate::patterns;
use crate::ticket::{BetKind, DetalleApuesta, Expansion, PatternType};

/// Parse a monetary literal, accepting either decimal mark.
pub(crate) fn parse_amount(s: &str) -> Option<Decimal> {
    Decimal::from_str(&s.replace(',', ".")).ok()
}

/// Split a line at the first `con` keyword: `(numbers part, stake part)`.
pub(crate) fn split_at_con(line: &str) -> (&str, Option<&str>) {
    match regex!(r"\bcon\b").find(line) {
        Some(m) => (&line[..m.start()], Some(&line[m.end()..])),
        None => (line, None),
    }
}

/// Harvest canonical numbers from a pre-`con` segment. 1-digit tokens are
/// zero-padded, 2- and 3-digit tokens pass through, 4-digit tokens split
/// into two 2-digit numbers. Longer runs are left for the validator.
pub(crate) fn extract_numbers(segment: &str) -> Vec<String> {
    let mut out = Vec::new();
    for m in patterns::number_token().find_iter(segment) {
        let tok = m.as_str();
        match tok.len() {
            1 => out.push(format!("0{tok}")),
            2 | 3 => out.push(tok.to_string()),
            4 => {
                out.push(tok[..2].to_string());
                out.push(tok[2..].to_string());
            }
            _ => {}
        }
    }
    out
}

/// `con A [y B]` stake clause, if present.
pub(crate) fn con_stakes(line: &str) -> Option<(Decimal, Option<Decimal>)> {
    let caps = patterns::con_amounts().captures(line)?;
    let first = parse_amount(&caps[1])?;
    let second = caps.get(2).and_then(|m| parse_amount(m.as_str()));
    Some((first, second))
}

/// Row constructor for the simple kinds: `amount = unit × |numbers|`.
fn simple_detail(
    kind: BetKind,
    numbers: Vec<String>,
    unit: Decimal,
    line: &str,
    line_number: usize,
) -> DetalleApuesta {
    let amount = unit * Decimal::from(numbers.len() as u64);
    DetalleApuesta {
        kind,
        numbers,
        amount,
        unit_amount: unit,
        combinations: None,
        pairs: None,
        original_line: line.to_string(),
        line_number,
        expansion: None,
    }
}

/// Row constructor for expanded shorthand: `raw` is the provenance list
/// (pre-split for pares relativos), `numbers` the canonical bet numbers.
fn especial_detail(
    token: &str,
    raw: Vec<String>,
    numbers: Vec<String>,
    pattern_type: PatternType,
    unit: Decimal,
    line: &str,
    line_number: usize,
) -> DetalleApuesta {
    let mut detail = simple_detail(BetKind::Especial, numbers, unit, line, line_number);
    detail.expansion = Some(Expansion { original_token: token.to_string(), expanded: raw, pattern_type });
    detail
}

// --- AutoCorrect -------------------------------------------------------------

/// Textual corrections applied before any recognizer sees the line. Never a
/// claimant: it only rewrites.
pub(crate) fn autocorrect(line: &str) -> String {
    // Hyphen/plus-joined number runs back to spaced numbers ("05-10-15").
    let re_join = regex!(r"(\d)[-+](\d)");
    let mut current = line.to_string();
    loop {
        let next = re_join.replace_all(&current, "$1 $2").into_owned();
        if next == current {
            break;
        }
        current = next;
    }
    // "2 y media" -> "2.5".
    let current = regex!(r"(\d+)\s+y\s+media\b").replace_all(&current, "$1.5").into_owned();
    // "parle:" / "parle=" -> "parle con".
    let current = regex!(r"\bparle\s*[:=]\s*").replace_all(&current, "parle con ").into_owned();
    // Unit words that survived preprocessing.
    regex!(r"(\d)\s*(?:pesos|bss|bs)\b").replace_all(&current, "$1").into_owned()
}

// --- SpecialPatterns ---------------------------------------------------------

pub(crate) fn claims_special(line: &str, ctx: &BlockContext) -> bool {
    ctx.auto_expand && patterns::has_special_pattern(line)
}

/// Expand every shorthand match on the line into `Especial` rows. Leftover
/// plain numbers on the same line are emitted as one `Fijo` row at the same
/// unit stake.
pub(crate) fn process_special(line: &str, line_number: usize, ctx: &mut BlockContext) -> Vec<DetalleApuesta> {
    let mut details = Vec::new();
    let mut produced = 0usize;

    // `por todas las centenas` carries its own stake and must be consumed
    // before the generic `con` split.
    let mut remainder = line.to_string();
    if let Some(caps) = patterns::centenas_todas().captures(line) {
        let whole = caps.get(0).unwrap();
        let base_numbers: Vec<String> = caps[1].split_whitespace().map(str::to_string).collect();
        let expanded = expand::centenas_todas(&base_numbers);
        let unit = caps.get(2).and_then(|m| parse_amount(m.as_str())).unwrap_or_else(|| ctx.fijo_unit());

        produced += expanded.len();
        let mut detail = simple_detail(BetKind::Especial, expanded.clone(), unit, line, line_number);
        detail.expansion = Some(Expansion {
            original_token: whole.as_str().to_string(),
            expanded,
            pattern_type: PatternType::CentenasTodas,
        });
        details.push(detail);

        remainder.replace_range(whole.range(), "");
    }

    let (numbers_part, stake_part) = split_at_con(&remainder);
    let unit = stake_part
        .and_then(|s| parse_amount(s.trim().split_whitespace().next().unwrap_or("")))
        .unwrap_or_else(|| ctx.fijo_unit());

    let mut consumed: Vec<(usize, usize)> = Vec::new();
    for caps in patterns::volteo().captures_iter(numbers_part) {
        let whole = caps.get(0).unwrap();
        let numbers = expand::volteo(&caps[1]);
        produced += numbers.len();
        details.push(especial_detail(whole.as_str(), numbers.clone(), numbers, PatternType::Volteo, unit, line, line_number));
        consumed.push((whole.start(), whole.end()));
    }
    for caps in patterns::rango().captures_iter(numbers_part) {
        let whole = caps.get(0).unwrap();
        match expand::rango(&caps[1], &caps[2]) {
            Ok(numbers) => {
                produced += numbers.len();
                details.push(especial_detail(
                    whole.as_str(),
                    numbers.clone(),
                    numbers,
                    PatternType::Rango,
                    unit,
                    line,
                    line_number,
                ));
            }
            Err(err) => ctx.error(format!("line {line_number}: {err}")),
        }
        // Consume the span either way so a failed rango's bounds are not
        // harvested as plain numbers.
        consumed.push((whole.start(), whole.end()));
    }
    for caps in patterns::decena().captures_iter(numbers_part) {
        let whole = caps.get(0).unwrap();
        let numbers = expand::decena(caps[1].parse().unwrap_or(0));
        produced += numbers.len();
        details.push(especial_detail(whole.as_str(), numbers.clone(), numbers, PatternType::Decena, unit, line, line_number));
        consumed.push((whole.start(), whole.end()));
    }
    for caps in patterns::terminal().captures_iter(numbers_part) {
        let whole = caps.get(0).unwrap();
        let numbers = expand::terminal(caps[1].parse().unwrap_or(0));
        produced += numbers.len();
        details.push(especial_detail(whole.as_str(), numbers.clone(), numbers, PatternType::Terminal, unit, line, line_number));
        consumed.push((whole.start(), whole.end()));
    }
    for caps in patterns::pares_relativos().captures_iter(numbers_part) {
        let whole = caps.get(0).unwrap();
        let raw = expand::pares_relativos(&caps[1], caps[2].parse().unwrap_or(0));
        // 4-digit strings split into independent 2-digit numbers; the raw
        // list is kept as provenance.
        let numbers: Vec<String> = raw.iter().flat_map(|s| extract_numbers(s)).collect();
        produced += numbers.len();
        details.push(especial_detail(whole.as_str(), raw, numbers, PatternType::ParesRelativos, unit, line, line_number));
        consumed.push((whole.start(), whole.end()));
    }

    if produced > ctx.max_expansion {
        ctx.error(format!(
            "line {line_number}: expansion produced {produced} numbers, cap is {}",
            ctx.max_expansion
        ));
        return Vec::new();
    }

    // Plain numbers that were not part of any pattern become one Fijo row.
    let mut leftover = String::new();
    let mut cursor = 0usize;
    let mut spans = consumed;
    spans.sort_unstable();
    for (start, end) in spans {
        if start > cursor {
            leftover.push_str(&numbers_part[cursor..start]);
            leftover.push(' ');
        }
        cursor = cursor.max(end);
    }
    if cursor < numbers_part.len() {
        leftover.push_str(&numbers_part[cursor..]);
    }
    let leftover_numbers = extract_numbers(&leftover);
    if !leftover_numbers.is_empty() {
        details.push(simple_detail(BetKind::Fijo, leftover_numbers, unit, line, line_number));
        ctx.last_fijo_monto = Some(unit);
    }

    details
}

// --- Candado -----------------------------------------------------------------

pub(crate) fn claims_candado(line: &str) -> bool {
    patterns::candado().is_match(line)
}

/// `NN NN [NN ...] [con F [y C]] candado con M`: up to three rows — Fijo and
/// Corrido on the base numbers when staked, plus the Candado itself priced
/// at `M` split across all pairs.
pub(crate) fn process_candado(line: &str, line_number: usize, ctx: &mut BlockContext) -> Vec<DetalleApuesta> {
    let caps = match patterns::candado().captures(line) {
        Some(caps) => caps,
        None => return Vec::new(),
    };
    let total = match parse_amount(&caps[1]) {
        Some(total) => total,
        None => {
            ctx.error(format!("line {line_number}: unreadable candado amount"));
            return Vec::new();
        }
    };

    let head = &line[..caps.get(0).unwrap().start()];
    let (numbers_part, _) = split_at_con(head);
    let numbers = extract_numbers(numbers_part);
    if numbers.len() < 2 {
        ctx.error(format!("line {line_number}: candado needs at least two numbers"));
        return Vec::new();
    }

    let mut details = Vec::new();
    if let Some((fijo_unit, corrido_unit)) = con_stakes(head) {
        details.push(simple_detail(BetKind::Fijo, numbers.clone(), fijo_unit, line, line_number));
        ctx.last_fijo_monto = Some(fijo_unit);
        if let Some(corrido_unit) = corrido_unit {
            details.push(simple_detail(BetKind::Corrido, numbers.clone(), corrido_unit, line, line_number));
            ctx.last_corrido_monto = Some(corrido_unit);
        }
    }

    let combinations = pair_combinations(numbers.len());
    let unit = total / Decimal::from(combinations);
    details.push(DetalleApuesta {
        kind: BetKind::Candado,
        numbers,
        amount: total,
        unit_amount: unit,
        combinations: Some(combinations),
        pairs: None,
        original_line: line.to_string(),
        line_number,
        expansion: None,
    });
    details
}

// --- Centena -----------------------------------------------------------------

pub(crate) fn claims_centena(line: &str) -> bool {
    patterns::centena_linea().is_match(line) || regex!(r"^(?:\d{3}\s+)*\d{3}$").is_match(line)
}

/// 3-digit lines. The composite form `NNN ... con Mc y Mf [y Mco]` derives
/// Fijo/Corrido rows on the last two digits of each centena.
pub(crate) fn process_centena(line: &str, line_number: usize, ctx: &mut BlockContext) -> Vec<DetalleApuesta> {
    let (numbers, stakes) = match patterns::centena_linea().captures(line) {
        Some(caps) => {
            let numbers: Vec<String> = caps[1].split_whitespace().map(str::to_string).collect();
            let mc = parse_amount(&caps[2]);
            let mf = caps.get(3).and_then(|m| parse_amount(m.as_str()));
            let mco = caps.get(4).and_then(|m| parse_amount(m.as_str()));
            (numbers, (mc, mf, mco))
        }
        None => {
            // Bare 3-digit line: stake comes from carryover or the default.
            (extract_numbers(line), (None, None, None))
        }
    };

    if numbers.is_empty() {
        ctx.warn(format!("line {line_number}: centena line without numbers"));
        return Vec::new();
    }

    let (mc, mf, mco) = stakes;
    let centena_unit = mc.unwrap_or_else(|| ctx.fijo_unit());
    let mut details = vec![simple_detail(BetKind::Centena, numbers.clone(), centena_unit, line, line_number)];

    if let Some(fijo_unit) = mf {
        let tails: Vec<String> = numbers.iter().map(|n| n[n.len() - 2..].to_string()).collect();
        details.push(simple_detail(BetKind::Fijo, tails.clone(), fijo_unit, line, line_number));
        ctx.last_fijo_monto = Some(fijo_unit);
        if let Some(corrido_unit) = mco {
            details.push(simple_detail(BetKind::Corrido, tails, corrido_unit, line, line_number));
            ctx.last_corrido_monto = Some(corrido_unit);
        }
    }
    details
}

// --- Parle -------------------------------------------------------------------

pub(crate) fn claims_parle(line: &str) -> bool {
    patterns::parle_explicito().is_match(line)
        || regex!(r"\bparle\b").is_match(line)
        || patterns::parle_inline().is_match(line)
}

pub(crate) fn process_parle(line: &str, line_number: usize, ctx: &mut BlockContext) -> Vec<DetalleApuesta> {
    // Explicit pairs: `25*33 [10x20 ...] [parle] con M`.
    let explicit: Vec<(String, String)> = patterns::parle_explicito()
        .captures_iter(line)
        .map(|caps| (expand::pad2(caps[1].parse().unwrap_or(0)), expand::pad2(caps[2].parse().unwrap_or(0))))
        .collect();
    if !explicit.is_empty() {
        let unit = patterns::parle_con()
            .captures(line)
            .and_then(|caps| parse_amount(&caps[1]))
            .or_else(|| con_stakes(line).map(|(a, _)| a))
            .unwrap_or_else(|| ctx.fijo_unit());
        let combinations = explicit.len() as u32;
        let numbers: Vec<String> = explicit.iter().flat_map(|(a, b)| [a.clone(), b.clone()]).collect();
        return vec![DetalleApuesta {
            kind: BetKind::Parle,
            numbers,
            amount: unit * Decimal::from(combinations),
            unit_amount: unit,
            combinations: Some(combinations),
            pairs: Some(explicit),
            original_line: line.to_string(),
            line_number,
            expansion: None,
        }];
    }

    // Inline stake: `05 10 15 con 20 p5` — basic bet plus an implicit parle
    // over the same numbers.
    if let Some(caps) = patterns::parle_inline().captures(line) {
        let parle_unit = match parse_amount(&caps[1]) {
            Some(unit) => unit,
            None => {
                ctx.error(format!("line {line_number}: unreadable parle stake"));
                return Vec::new();
            }
        };
        let head = line[..caps.get(0).unwrap().start()].trim();
        let mut details = process_basic(head, line_number, ctx);
        for detail in &mut details {
            detail.original_line = line.to_string();
        }
        let numbers = extract_numbers(split_at_con(head).0);
        if numbers.len() < 2 {
            ctx.error(format!("line {line_number}: parle needs at least two numbers"));
            return details;
        }
        let combinations = pair_combinations(numbers.len());
        details.push(DetalleApuesta {
            kind: BetKind::Parle,
            numbers,
            amount: parle_unit * Decimal::from(combinations),
            unit_amount: parle_unit,
            combinations: Some(combinations),
            pairs: None,
            original_line: line.to_string(),
            line_number,
            expansion: None,
        });
        return details;
    }

    // Keyword form: `NN NN [con F [y C]] parle con P` — implicit parle over
    // the listed numbers, composite when a fijo stake precedes it.
    let (parle_unit, head) = match patterns::parle_con().captures(line) {
        Some(caps) => match parse_amount(&caps[1]) {
            Some(unit) => (unit, line[..caps.get(0).unwrap().start()].trim().to_string()),
            None => {
                ctx.error(format!("line {line_number}: unreadable parle stake"));
                return Vec::new();
            }
        },
        None => {
            ctx.warn(format!("line {line_number}: parle without a stake, using default"));
            let head = regex!(r"\bparle\b").replace(line, "").trim().to_string();
            (ctx.fijo_unit(), head)
        }
    };

    let mut details = Vec::new();
    let (numbers_part, _) = split_at_con(&head);
    let numbers = extract_numbers(numbers_part);
    if numbers.len() < 2 {
        ctx.error(format!("line {line_number}: parle needs at least two numbers"));
        return details;
    }
    if let Some((fijo_unit, corrido_unit)) = con_stakes(&head) {
        details.push(simple_detail(BetKind::Fijo, numbers.clone(), fijo_unit, line, line_number));
        ctx.last_fijo_monto = Some(fijo_unit);
        if let Some(corrido_unit) = corrido_unit {
            details.push(simple_detail(BetKind::Corrido, numbers.clone(), corrido_unit, line, line_number));
            ctx.last_corrido_monto = Some(corrido_unit);
        }
    }
    let combinations = pair_combinations(numbers.len());
    details.push(DetalleApuesta {
        kind: BetKind::Parle,
        numbers,
        amount: parle_unit * Decimal::from(combinations),
        unit_amount: parle_unit,
        combinations: Some(combinations),
        pairs: None,
        original_line: line.to_string(),
        line_number,
        expansion: None,
    });
    details
}

// --- BasicBet ----------------------------------------------------------------

pub(crate) fn claims_basic(line: &str) -> bool {
    patterns::number_token().is_match(line)
}

/// `N N ... [con A [y B]]` — one Fijo, optionally one Corrido. Without a
/// stake clause the unit falls back to the block carryover, then the
/// configured default.
pub(crate) fn process_basic(line: &str, line_number: usize, ctx: &mut BlockContext) -> Vec<DetalleApuesta> {
    let (numbers_part, _) = split_at_con(line);
    let numbers = extract_numbers(numbers_part);
    if numbers.is_empty() {
        ctx.warn(format!("line {line_number}: no numbers found"));
        return Vec::new();
    }

    let mut details = Vec::new();
    match con_stakes(line) {
        Some((fijo_unit, corrido_unit)) => {
            details.push(simple_detail(BetKind::Fijo, numbers.clone(), fijo_unit, line, line_number));
            ctx.last_fijo_monto = Some(fijo_unit);
            if let Some(corrido_unit) = corrido_unit {
                details.push(simple_detail(BetKind::Corrido, numbers, corrido_unit, line, line_number));
                ctx.last_corrido_monto = Some(corrido_unit);
            }
        }
        None => {
            let fijo_unit = ctx.fijo_unit();
            details.push(simple_detail(BetKind::Fijo, numbers.clone(), fijo_unit, line, line_number));
            if let Some(corrido_unit) = ctx.corrido_unit() {
                details.push(simple_detail(BetKind::Corrido, numbers, corrido_unit, line, line_number));
            }
        }
    }
    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;

    fn ctx() -> BlockContext {
        BlockContext::new(&ParserConfig::default())
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn extracts_and_splits_numbers() {
        assert_eq!(extract_numbers("05 10"), vec!["05", "10"]);
        assert_eq!(extract_numbers("5 10"), vec!["05", "10"]);
        assert_eq!(extract_numbers("123 456"), vec!["123", "456"]);
        assert_eq!(extract_numbers("0510"), vec!["05", "10"]);
        assert_eq!(extract_numbers("12345"), Vec::<String>::new());
    }

    #[test]
    fn autocorrect_rewrites() {
        let cases: Vec<(&str, &str)> = vec![
            ("05-10-15 con 5", "05 10 15 con 5"),
            ("con 2 y media", "con 2.5"),
            ("25*33 parle: 5", "25*33 parle con 5"),
            ("05 con 20 pesos", "05 con 20"),
            ("05 10 con 20", "05 10 con 20"),
        ];
        for (input, expected) in cases {
            assert_eq!(autocorrect(input), expected, "input {:?}", input);
        }
    }

    #[test]
    fn basic_fijo_and_corrido() {
        let mut ctx = ctx();
        let details = process_basic("05 10 con 20", 1, &mut ctx);
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].kind, BetKind::Fijo);
        assert_eq!(details[0].numbers, vec!["05", "10"]);
        assert_eq!(details[0].unit_amount, dec("20"));
        assert_eq!(details[0].amount, dec("40"));

        let details = process_basic("05 10 con 20 y 30", 1, &mut ctx);
        assert_eq!(details.len(), 2);
        assert_eq!(details[1].kind, BetKind::Corrido);
        assert_eq!(details[1].amount, dec("60"));
    }

    #[test]
    fn stake_carryover_within_block() {
        let mut ctx = ctx();
        process_basic("05 10 con 20", 1, &mut ctx);
        let details = process_basic("15 25", 2, &mut ctx);
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].unit_amount, dec("20"));
        assert_eq!(details[0].amount, dec("40"));
    }

    #[test]
    fn bare_numbers_use_default_stake() {
        let mut ctx = ctx();
        let details = process_basic("15 25", 1, &mut ctx);
        assert_eq!(details[0].unit_amount, Decimal::ONE);
    }

    #[test]
    fn special_volteo() {
        let mut ctx = ctx();
        let details = process_special("10v con 10", 1, &mut ctx);
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].kind, BetKind::Especial);
        assert_eq!(details[0].numbers, vec!["10", "01"]);
        assert_eq!(details[0].amount, dec("20"));
        let expansion = details[0].expansion.as_ref().unwrap();
        assert_eq!(expansion.pattern_type, PatternType::Volteo);
        assert_eq!(expansion.original_token, "10v");
    }

    #[test]
    fn special_decena() {
        let mut ctx = ctx();
        let details = process_special("d0 con 5", 1, &mut ctx);
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].numbers.len(), 10);
        assert_eq!(details[0].numbers[0], "00");
        assert_eq!(details[0].numbers[9], "90");
        assert_eq!(details[0].amount, dec("50"));
    }

    #[test]
    fn special_mixed_line_keeps_plain_numbers_as_fijo() {
        let mut ctx = ctx();
        let details = process_special("10v 33 con 5", 1, &mut ctx);
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].kind, BetKind::Especial);
        assert_eq!(details[1].kind, BetKind::Fijo);
        assert_eq!(details[1].numbers, vec!["33"]);
        assert_eq!(details[1].amount, dec("5"));
    }

    #[test]
    fn special_pares_relativos_splits_four_digit_strings() {
        let mut ctx = ctx();
        let details = process_special("07 pr 2 con 1", 1, &mut ctx);
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].numbers, vec!["07", "01", "07", "02"]);
        let expansion = details[0].expansion.as_ref().unwrap();
        assert_eq!(expansion.expanded, vec!["0701", "0702"]);
        assert_eq!(details[0].amount, dec("4"));
    }

    #[test]
    fn special_expansion_cap_rejects_line() {
        let mut config = ParserConfig::default();
        config.max_expansion = 5;
        let mut ctx = BlockContext::new(&config);
        let details = process_special("d0 con 5", 1, &mut ctx);
        assert!(details.is_empty());
        assert_eq!(ctx.errors.len(), 1);
    }

    #[test]
    fn candado_three_rows() {
        let mut ctx = ctx();
        let details = process_candado("05 10 15 con 5 y 3 candado con 12", 1, &mut ctx);
        assert_eq!(details.len(), 3);
        assert_eq!(details[0].kind, BetKind::Fijo);
        assert_eq!(details[0].amount, dec("15"));
        assert_eq!(details[1].kind, BetKind::Corrido);
        assert_eq!(details[1].amount, dec("9"));
        assert_eq!(details[2].kind, BetKind::Candado);
        assert_eq!(details[2].combinations, Some(3));
        assert_eq!(details[2].amount, dec("12"));
        assert_eq!(details[2].unit_amount, dec("4"));
    }

    #[test]
    fn candado_alone_keeps_flat_total() {
        let mut ctx = ctx();
        let details = process_candado("05 10 candado con 9", 1, &mut ctx);
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].combinations, Some(1));
        assert_eq!(details[0].amount, dec("9"));
        assert_eq!(details[0].unit_amount, dec("9"));
    }

    #[test]
    fn candado_rejects_single_number() {
        let mut ctx = ctx();
        let details = process_candado("05 candado con 9", 1, &mut ctx);
        assert!(details.is_empty());
        assert_eq!(ctx.errors.len(), 1);
    }

    #[test]
    fn centena_simple_and_composite() {
        let mut ctx = ctx();
        let details = process_centena("123 456 con 5", 1, &mut ctx);
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].kind, BetKind::Centena);
        assert_eq!(details[0].amount, dec("10"));

        let details = process_centena("123 456 con 5 y 2 y 1", 1, &mut ctx);
        assert_eq!(details.len(), 3);
        assert_eq!(details[1].kind, BetKind::Fijo);
        assert_eq!(details[1].numbers, vec!["23", "56"]);
        assert_eq!(details[1].amount, dec("4"));
        assert_eq!(details[2].kind, BetKind::Corrido);
        assert_eq!(details[2].amount, dec("2"));
    }

    #[test]
    fn parle_explicit_pair() {
        let mut ctx = ctx();
        let details = process_parle("25*33 parle con 5", 1, &mut ctx);
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].kind, BetKind::Parle);
        assert_eq!(details[0].pairs, Some(vec![("25".to_string(), "33".to_string())]));
        assert_eq!(details[0].combinations, Some(1));
        assert_eq!(details[0].amount, dec("5"));
    }

    #[test]
    fn parle_inline_after_basic() {
        let mut ctx = ctx();
        let details = process_parle("05 10 15 con 20 p5", 1, &mut ctx);
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].kind, BetKind::Fijo);
        assert_eq!(details[0].amount, dec("60"));
        assert_eq!(details[1].kind, BetKind::Parle);
        assert_eq!(details[1].combinations, Some(3));
        assert_eq!(details[1].amount, dec("15"));
    }

    #[test]
    fn parle_implicit_combinations() {
        let mut ctx = ctx();
        let details = process_parle("05 10 15 parle con 2", 1, &mut ctx);
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].combinations, Some(3));
        assert_eq!(details[0].amount, dec("6"));
    }

    #[test]
    fn parle_compuesto_emits_fijo_too() {
        let mut ctx = ctx();
        let details = process_parle("05 10 con 3 parle con 2", 1, &mut ctx);
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].kind, BetKind::Fijo);
        assert_eq!(details[0].amount, dec("6"));
        assert_eq!(details[1].kind, BetKind::Parle);
        assert_eq!(details[1].combinations, Some(1));
        assert_eq!(details[1].amount, dec("2"));
    }
}
