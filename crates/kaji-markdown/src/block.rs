// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Block-level parsing: one top-to-bottom scan over the reply text.

/// A block-level node of the markdown subset.
///
/// Produced in input order by [`parse`]; immutable once emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `# ` / `## ` / `### ` heading. `level` is 1, 2, or 3.
    Heading { level: u8, text: String },
    /// Any non-empty line that matches no other prefix, kept verbatim.
    Paragraph(String),
    /// A run of consecutive `* ` / `- ` lines, prefixes stripped.
    List(Vec<String>),
}

/// Split `text` into block nodes.
///
/// Consecutive bullet lines accumulate into a pending buffer that is flushed
/// into exactly one [`Block::List`] by the first non-bullet line, by a blank
/// line, or by the end of input. Blank lines emit no node of their own.
/// Heading prefixes require the trailing space: a bare `"##"` line is a
/// literal paragraph.
pub fn parse(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut pending_list: Vec<String> = Vec::new();

    for line in text.lines() {
        if let Some(rest) = line.strip_prefix("### ") {
            flush_list(&mut blocks, &mut pending_list);
            blocks.push(Block::Heading { level: 3, text: rest.to_string() });
        } else if let Some(rest) = line.strip_prefix("## ") {
            flush_list(&mut blocks, &mut pending_list);
            blocks.push(Block::Heading { level: 2, text: rest.to_string() });
        } else if let Some(rest) = line.strip_prefix("# ") {
            flush_list(&mut blocks, &mut pending_list);
            blocks.push(Block::Heading { level: 1, text: rest.to_string() });
        } else if let Some(rest) = line.strip_prefix("* ").or_else(|| line.strip_prefix("- ")) {
            pending_list.push(rest.to_string());
        } else if line.trim().is_empty() {
            flush_list(&mut blocks, &mut pending_list);
        } else {
            flush_list(&mut blocks, &mut pending_list);
            blocks.push(Block::Paragraph(line.to_string()));
        }
    }

    // The text may end inside a list.
    flush_list(&mut blocks, &mut pending_list);
    blocks
}

/// Convert the pending item buffer into one `List` node. Empty buffer → no node.
fn flush_list(blocks: &mut Vec<Block>, pending: &mut Vec<String>) {
    if !pending.is_empty() {
        blocks.push(Block::List(std::mem::take(pending)));
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_blocks() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn plain_text_is_a_single_paragraph() {
        let blocks = parse("just some prose without markdown");
        assert_eq!(
            blocks,
            vec![Block::Paragraph("just some prose without markdown".into())]
        );
    }

    #[test]
    fn heading_levels_strip_their_prefixes() {
        let blocks = parse("# One\n## Two\n### Three");
        assert_eq!(
            blocks,
            vec![
                Block::Heading { level: 1, text: "One".into() },
                Block::Heading { level: 2, text: "Two".into() },
                Block::Heading { level: 3, text: "Three".into() },
            ]
        );
    }

    #[test]
    fn heading_prefix_requires_trailing_space() {
        // A bare "##" line has no space after the markers → literal paragraph.
        let blocks = parse("##");
        assert_eq!(blocks, vec![Block::Paragraph("##".into())]);
    }

    #[test]
    fn consecutive_bullets_coalesce_into_one_list() {
        let blocks = parse("* one\n- two\n* three");
        assert_eq!(
            blocks,
            vec![Block::List(vec!["one".into(), "two".into(), "three".into()])]
        );
    }

    #[test]
    fn blank_line_splits_two_bullet_runs() {
        let blocks = parse("- a\n- b\n\n- c");
        assert_eq!(
            blocks,
            vec![
                Block::List(vec!["a".into(), "b".into()]),
                Block::List(vec!["c".into()]),
            ]
        );
    }

    #[test]
    fn list_is_flushed_at_end_of_input() {
        let blocks = parse("intro\n- tail item");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph("intro".into()),
                Block::List(vec!["tail item".into()]),
            ]
        );
    }

    #[test]
    fn heading_closes_a_pending_list() {
        let blocks = parse("- a\n## Next section");
        assert_eq!(
            blocks,
            vec![
                Block::List(vec!["a".into()]),
                Block::Heading { level: 2, text: "Next section".into() },
            ]
        );
    }

    #[test]
    fn blank_lines_emit_no_nodes() {
        let blocks = parse("\n\n   \n");
        assert!(blocks.is_empty());
    }

    #[test]
    fn whitespace_only_line_flushes_like_a_blank_one() {
        let blocks = parse("- a\n   \n- b");
        assert_eq!(
            blocks,
            vec![
                Block::List(vec!["a".into()]),
                Block::List(vec!["b".into()]),
            ]
        );
    }

    #[test]
    fn unrecognised_markdown_degrades_to_paragraphs() {
        // Ordered lists and tables are outside the subset.
        let blocks = parse("1. first\n| a | b |");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph("1. first".into()),
                Block::Paragraph("| a | b |".into()),
            ]
        );
    }

    #[test]
    fn mixed_document_preserves_input_order() {
        let blocks = parse("## Title\n- one\n- two\n\nBody text");
        assert_eq!(
            blocks,
            vec![
                Block::Heading { level: 2, text: "Title".into() },
                Block::List(vec!["one".into(), "two".into()]),
                Block::Paragraph("Body text".into()),
            ]
        );
    }
}
