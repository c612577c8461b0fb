//! Block segmentation.
//!
//! Partitions canonical text into per-player blocks. A block begins at a
//! name-line and runs until the next name-line or a blank separator after
//! non-empty content. Content with no name-line at all forms a single
//! anonymous block attributed to `Desconocido`.
//!
//! The name-line heuristic is deliberately conservative: bet lines are full
//! of short reserved words (`con`, `al`, `v`, `d`, `t`) and digits, so a
//! line only counts as a name when it is digit-free at the front, contains
//! no reserved token, and is mostly letters.

use crate::patterns;
use crate::ticket::BlockInfo;

/// Fallback player for anonymous blocks.
pub(crate) const UNKNOWN_PLAYER: &str = "Desconocido";

/// Letter ratio the segmenter requires of a name-line.
const NAME_RATIO: f64 = 0.6;

/// One segmented block: optional player name plus its content lines with
/// their 1-based line numbers in the canonical text.
#[derive(Debug, Clone)]
pub(crate) struct RawBlock {
    pub player_name: Option<String>,
    pub lines: Vec<(usize, String)>,
    pub start_line: usize,
}

/// Name-line heuristic. All conditions must hold:
/// length in `[2, 35]`, no leading digit, no reserved token, and a
/// letter-to-length ratio above `ratio`.
pub(crate) fn is_name_line(line: &str, ratio: f64) -> bool {
    let trimmed = line.trim();
    let len = trimmed.chars().count();
    if !(2..=35).contains(&len) {
        return false;
    }
    if trimmed.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return false;
    }
    if trimmed.split_whitespace().any(patterns::is_reserved_word) {
        return false;
    }
    let letters = trimmed.chars().filter(|c| c.is_alphabetic()).count();
    letters as f64 / len as f64 > ratio
}

/// True for a declared-total line (`total[:=]? amount`).
pub(crate) fn is_total_line(line: &str) -> bool {
    patterns::total_line().is_match(line)
}

/// Partition `text` (already canonical) into blocks.
pub(crate) fn segment(text: &str) -> Vec<RawBlock> {
    let mut blocks: Vec<RawBlock> = Vec::new();
    let mut current: Option<RawBlock> = None;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            // Separator: close the current block if it has seen content.
            if let Some(block) = current.take() {
                if block.player_name.is_some() || !block.lines.is_empty() {
                    blocks.push(block);
                }
            }
            continue;
        }

        if is_name_line(trimmed, NAME_RATIO) {
            if let Some(block) = current.take() {
                if block.player_name.is_some() || !block.lines.is_empty() {
                    blocks.push(block);
                }
            }
            current =
                Some(RawBlock { player_name: Some(trimmed.to_string()), lines: Vec::new(), start_line: line_no });
            continue;
        }

        match current.as_mut() {
            Some(block) => block.lines.push((line_no, trimmed.to_string())),
            None => {
                current = Some(RawBlock {
                    player_name: None,
                    lines: vec![(line_no, trimmed.to_string())],
                    start_line: line_no,
                });
            }
        }
    }

    if let Some(block) = current.take() {
        if block.player_name.is_some() || !block.lines.is_empty() {
            blocks.push(block);
        }
    }

    blocks
}

/// Segmentation-only public view, used by `extract_structure`.
pub(crate) fn block_infos(text: &str) -> Vec<BlockInfo> {
    segment(text)
        .into_iter()
        .map(|block| BlockInfo {
            has_total: block.lines.iter().any(|(_, line)| is_total_line(line)),
            lines: block.lines.iter().map(|(_, line)| line.clone()).collect(),
            player_name: block.player_name,
            start_line: block.start_line,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_line_heuristic() {
        // Array of (line, expected)
        let cases: Vec<(&str, bool)> = vec![
            ("Juan", true),
            ("Juan Pérez", true),
            ("maria la del barrio", true),
            ("X", false),                                      // too short
            ("05 10 con 20", false),                           // digits + reserved
            ("total: 40", false),                              // reserved
            ("Juan con Pedro", false),                         // reserved word inside
            ("1ra fila", false),                               // leading digit
            ("a-b-c-d-e-f-g-h", false),                        // ratio too low
            ("nombre demasiado largo para ser un jugador real", false), // > 35 chars
        ];
        for (line, expected) in cases {
            assert_eq!(is_name_line(line, 0.6), expected, "line {:?}", line);
        }
    }

    #[test]
    fn single_anonymous_block() {
        let blocks = segment("05 10 con 20");
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].player_name.is_none());
        assert_eq!(blocks[0].lines.len(), 1);
    }

    #[test]
    fn named_blocks_split_on_names_and_blanks() {
        let text = "Juan\n05 10 con 20\ntotal: 40\n\nPedro\n25*33 parle con 5";
        let blocks = segment(text);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].player_name.as_deref(), Some("Juan"));
        assert_eq!(blocks[0].lines.len(), 2);
        assert_eq!(blocks[1].player_name.as_deref(), Some("Pedro"));
        assert_eq!(blocks[1].start_line, 5);
    }

    #[test]
    fn name_only_block_is_kept() {
        let blocks = segment("Juan");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].player_name.as_deref(), Some("Juan"));
        assert!(blocks[0].lines.is_empty());
    }

    #[test]
    fn blank_separated_anonymous_chunks_become_blocks() {
        let blocks = segment("05 con 1\n\n10 con 2");
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].player_name.is_none());
        assert!(blocks[1].player_name.is_none());
    }

    #[test]
    fn block_infos_flags_totals() {
        let infos = block_infos("Juan\n05 10 con 20\ntotal: 40");
        assert_eq!(infos.len(), 1);
        assert!(infos[0].has_total);
        assert_eq!(infos[0].player_name.as_deref(), Some("Juan"));
    }
}
