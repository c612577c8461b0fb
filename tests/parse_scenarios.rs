//! End-to-end scenarios with exact expected field values.

use listero::{parse, BetKind, PatternType};
use rust_decimal_macros::dec;

#[test]
fn fijo_single_stake() {
    let out = parse("05 10 con 20");
    assert!(out.success);
    assert_eq!(out.jugadas.len(), 1);

    let jugada = &out.jugadas[0];
    assert_eq!(jugada.player_name, "Desconocido");
    assert_eq!(jugada.details.len(), 1);

    let fijo = &jugada.details[0];
    assert_eq!(fijo.kind, BetKind::Fijo);
    assert_eq!(fijo.numbers, vec!["05", "10"]);
    assert_eq!(fijo.unit_amount, dec!(20));
    assert_eq!(fijo.amount, dec!(40));

    assert_eq!(jugada.total_calculated, dec!(40));
    assert!(jugada.is_valid);
    assert_eq!(out.stats.fijos, 1);
    assert_eq!(out.stats.total_numeros, 2);
}

#[test]
fn fijo_with_corrido() {
    let out = parse("05 10 con 20 y 30");
    let jugada = &out.jugadas[0];
    assert_eq!(jugada.details.len(), 2);

    let fijo = &jugada.details[0];
    assert_eq!(fijo.kind, BetKind::Fijo);
    assert_eq!(fijo.numbers, vec!["05", "10"]);
    assert_eq!(fijo.amount, dec!(40));

    let corrido = &jugada.details[1];
    assert_eq!(corrido.kind, BetKind::Corrido);
    assert_eq!(corrido.numbers, vec!["05", "10"]);
    assert_eq!(corrido.amount, dec!(60));

    assert_eq!(jugada.total_calculated, dec!(100));
    assert_eq!(out.stats.corridos, 1);
}

#[test]
fn explicit_parle_pair() {
    let out = parse("25*33 parle con 5");
    let jugada = &out.jugadas[0];
    assert_eq!(jugada.details.len(), 1);

    let parle = &jugada.details[0];
    assert_eq!(parle.kind, BetKind::Parle);
    assert_eq!(parle.pairs, Some(vec![("25".to_string(), "33".to_string())]));
    assert_eq!(parle.combinations, Some(1));
    assert_eq!(parle.amount, dec!(5));
    assert_eq!(jugada.total_calculated, dec!(5));
}

#[test]
fn inline_parle_after_fijo() {
    let out = parse("05 10 15 con 20 p5");
    let jugada = &out.jugadas[0];
    assert_eq!(jugada.details.len(), 2);

    let fijo = &jugada.details[0];
    assert_eq!(fijo.kind, BetKind::Fijo);
    assert_eq!(fijo.amount, dec!(60));

    let parle = &jugada.details[1];
    assert_eq!(parle.kind, BetKind::Parle);
    assert_eq!(parle.numbers, vec!["05", "10", "15"]);
    assert_eq!(parle.combinations, Some(3));
    assert_eq!(parle.unit_amount, dec!(5));
    assert_eq!(parle.amount, dec!(15));

    assert_eq!(jugada.total_calculated, dec!(75));
}

#[test]
fn volteo_expansion() {
    let out = parse("10v con 10");
    let jugada = &out.jugadas[0];
    assert_eq!(jugada.details.len(), 1);

    let especial = &jugada.details[0];
    assert_eq!(especial.kind, BetKind::Especial);
    assert_eq!(especial.numbers, vec!["10", "01"]);
    assert_eq!(especial.unit_amount, dec!(10));
    assert_eq!(especial.amount, dec!(20));

    let expansion = especial.expansion.as_ref().expect("volteo keeps provenance");
    assert_eq!(expansion.pattern_type, PatternType::Volteo);
    assert_eq!(expansion.original_token, "10v");
}

#[test]
fn decena_expansion() {
    let out = parse("d0 con 5");
    let especial = &out.jugadas[0].details[0];
    assert_eq!(especial.kind, BetKind::Especial);
    assert_eq!(
        especial.numbers,
        vec!["00", "10", "20", "30", "40", "50", "60", "70", "80", "90"]
    );
    assert_eq!(especial.unit_amount, dec!(5));
    assert_eq!(especial.amount, dec!(50));
}

#[test]
fn named_ticket_reconciles() {
    let out = parse("Juan\n05 10 con 20\nTotal: 40");
    assert!(out.success);
    assert_eq!(out.jugadas.len(), 1);

    let jugada = &out.jugadas[0];
    assert_eq!(jugada.player_name, "Juan");
    assert_eq!(jugada.total_declared, Some(dec!(40)));
    assert!(jugada.is_valid);

    assert_eq!(out.summary.difference, dec!(0));
    assert!(out.summary.is_valid);
    assert_eq!(out.summary.total_declared, Some(dec!(40)));
}

#[test]
fn declared_total_mismatch() {
    let out = parse("05 10 con 20\nTotal: 100");
    let jugada = &out.jugadas[0];
    assert!(!jugada.is_valid);
    assert_eq!(jugada.total_calculated, dec!(40));
    assert_eq!(jugada.total_declared, Some(dec!(100)));

    assert_eq!(out.summary.difference, dec!(60));
    assert!(!out.summary.is_valid);
    assert!(out.summary.confidence < 0.9);
}

#[test]
fn multi_player_ticket() {
    let text = "Juan\n05 10 con 20\nTotal: 40\n\nPedro\n25*33 parle con 5\n10v con 10\nTotal: 25";
    let out = parse(text);
    assert!(out.success);
    assert_eq!(out.jugadas.len(), 2);

    let juan = &out.jugadas[0];
    assert_eq!(juan.player_name, "Juan");
    assert!(juan.is_valid);

    let pedro = &out.jugadas[1];
    assert_eq!(pedro.player_name, "Pedro");
    assert_eq!(pedro.total_calculated, dec!(25));
    assert!(pedro.is_valid);

    assert_eq!(out.summary.total_jugadas, 2);
    assert_eq!(out.summary.total_calculated, dec!(65));
    assert_eq!(out.summary.total_declared, Some(dec!(65)));
    assert_eq!(out.stats.parles, 1);
    assert_eq!(out.stats.especiales, 1);
    assert_eq!(out.stats.fijos, 1);

    // A clean two-player ticket with one total per block produces no
    // warnings at all.
    assert!(out.metadata.warnings.is_empty(), "{:?}", out.metadata.warnings);
}

#[test]
fn candado_splits_flat_total_across_pairs() {
    let out = parse("05 10 15 con 5 y 3 candado con 12");
    let jugada = &out.jugadas[0];
    assert_eq!(jugada.details.len(), 3);

    let candado = jugada.details.iter().find(|d| d.kind == BetKind::Candado).unwrap();
    assert_eq!(candado.combinations, Some(3));
    assert_eq!(candado.amount, dec!(12));
    assert_eq!(candado.unit_amount, dec!(4));

    // 15 fijo + 9 corrido + 12 candado
    assert_eq!(jugada.total_calculated, dec!(36));
}

#[test]
fn centena_composite_derives_two_digit_bets() {
    let out = parse("123 456 con 5 y 2 y 1");
    let jugada = &out.jugadas[0];
    assert_eq!(jugada.details.len(), 3);

    let centena = &jugada.details[0];
    assert_eq!(centena.kind, BetKind::Centena);
    assert_eq!(centena.numbers, vec!["123", "456"]);
    assert_eq!(centena.amount, dec!(10));

    let fijo = &jugada.details[1];
    assert_eq!(fijo.kind, BetKind::Fijo);
    assert_eq!(fijo.numbers, vec!["23", "56"]);

    assert_eq!(jugada.total_calculated, dec!(16));
}

#[test]
fn stake_carries_over_across_block_lines() {
    let out = parse("Juan\n05 10 con 20\n15 25\nTotal: 80");
    let jugada = &out.jugadas[0];
    assert_eq!(jugada.details.len(), 2);
    assert_eq!(jugada.details[1].unit_amount, dec!(20));
    assert_eq!(jugada.total_calculated, dec!(80));
    assert!(jugada.is_valid);
}

#[test]
fn messy_input_normalizes_before_recognition() {
    // Confusables, currency, glued keywords, hyphen runs.
    let out = parse("Juan\n2o 3o con$20\n05-10-15 con 5\nTOTAL: 115");
    assert!(out.success);
    let jugada = &out.jugadas[0];
    assert_eq!(jugada.details[0].numbers, vec!["20", "30"]);
    assert_eq!(jugada.details[1].numbers, vec!["05", "10", "15"]);
    assert_eq!(jugada.total_calculated, dec!(115));
    assert!(jugada.is_valid);
}

#[test]
fn four_digit_literals_split() {
    let out = parse("0510 con 20");
    let fijo = &out.jugadas[0].details[0];
    assert_eq!(fijo.numbers, vec!["05", "10"]);
    assert_eq!(fijo.amount, dec!(40));
}
