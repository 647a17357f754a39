// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Mapping the block/span tree onto Ratatui primitives.
//!
//! Pure functions only: the parser and formatter know nothing about
//! rendering, and this module holds no state of its own.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span as RSpan};
use unicode_width::UnicodeWidthStr;

use crate::block::{parse, Block};
use crate::inline::{format, Span};

/// A list of styled lines ready for Ratatui rendering.
pub type StyledLines = Vec<Line<'static>>;

/// Convert a markdown string into styled [`Line`]s.
///
/// `ascii` — when true, use a plain ASCII bullet instead of `•` so fonts
/// without wide Unicode support render cleanly.
pub fn render_markdown(text: &str, wrap_width: u16, ascii: bool) -> StyledLines {
    render_blocks(&parse(text), wrap_width, ascii)
}

/// Render already-parsed blocks. Each block ends with one blank spacer line;
/// trailing spacers are trimmed.
pub fn render_blocks(blocks: &[Block], wrap_width: u16, ascii: bool) -> StyledLines {
    let width = if wrap_width == 0 { 80 } else { wrap_width as usize };
    let mut lines: StyledLines = Vec::new();

    for block in blocks {
        match block {
            Block::Heading { level, text } => {
                let style = heading_style(*level);
                lines.extend(wrap_spans(&format(text), style, width, "", "", Style::default()));
                lines.push(Line::default());
            }
            Block::Paragraph(text) => {
                lines.extend(wrap_spans(
                    &format(text),
                    Style::default(),
                    width,
                    "",
                    "",
                    Style::default(),
                ));
                lines.push(Line::default());
            }
            Block::List(items) => {
                let marker = format!("  {}", bullet(ascii));
                let hang = " ".repeat(marker.width());
                for item in items {
                    lines.extend(wrap_spans(
                        &format(item),
                        Style::default(),
                        width,
                        &marker,
                        &hang,
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                lines.push(Line::default());
            }
        }
    }

    while lines.last().is_some_and(|l| l.spans.is_empty()) {
        lines.pop();
    }
    lines
}

fn heading_style(level: u8) -> Style {
    match level {
        1 => Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD),
        2 => Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        _ => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    }
}

fn bullet(ascii: bool) -> &'static str {
    if ascii { "* " } else { "• " }
}

/// Word-wrap a span sequence at `width` columns.
///
/// `first_prefix` opens the first output line (list marker), `rest_prefix`
/// opens every continuation line (hanging indent). Bold spans get the BOLD
/// modifier on top of `base`.
fn wrap_spans(
    spans: &[Span],
    base: Style,
    width: usize,
    first_prefix: &str,
    rest_prefix: &str,
    prefix_style: Style,
) -> StyledLines {
    let mut out: StyledLines = Vec::new();
    let mut current: Vec<RSpan<'static>> = Vec::new();
    let mut col = 0usize;

    if !first_prefix.is_empty() {
        current.push(RSpan::styled(first_prefix.to_string(), prefix_style));
        col = first_prefix.width();
    }

    for span in spans {
        let style = match span {
            Span::Bold(_) => base.add_modifier(Modifier::BOLD),
            Span::Text(_) => base,
        };
        let mut buf = String::new();
        for word in span.text().split_inclusive(' ') {
            if col + word.width() > width && !buf.is_empty() {
                current.push(RSpan::styled(std::mem::take(&mut buf), style));
                out.push(Line::from(std::mem::take(&mut current)));
                if !rest_prefix.is_empty() {
                    current.push(RSpan::styled(rest_prefix.to_string(), prefix_style));
                }
                col = rest_prefix.width();
            }
            buf.push_str(word);
            col += word.width();
        }
        if !buf.is_empty() {
            current.push(RSpan::styled(buf, style));
        }
    }

    if !current.is_empty() {
        out.push(Line::from(current));
    }
    if out.is_empty() {
        out.push(Line::default());
    }
    out
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_text(lines: &StyledLines) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn scenario_heading_list_and_bold_paragraph() {
        let blocks = parse("## Title\n- one\n- two\n\nBody **word**");
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], Block::Heading { level: 2, text: "Title".into() });
        assert_eq!(blocks[1], Block::List(vec!["one".into(), "two".into()]));
        match &blocks[2] {
            Block::Paragraph(text) => assert_eq!(
                format(text),
                vec![Span::Text("Body ".into()), Span::Bold("word".into())]
            ),
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn heading_line_is_bold_styled() {
        let lines = render_markdown("## Section", 80, false);
        let first = &lines[0].spans[0];
        assert!(first.style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(first.content.as_ref(), "Section");
    }

    #[test]
    fn bold_span_carries_the_bold_modifier() {
        let lines = render_markdown("a **b** c", 80, false);
        let bold = lines[0]
            .spans
            .iter()
            .find(|s| s.content.as_ref() == "b")
            .expect("bold fragment rendered");
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn list_items_get_bullet_markers() {
        let lines = render_markdown("- alpha\n- beta", 80, false);
        assert!(flat_text(&lines).contains("• alpha"));
        assert!(flat_text(&lines).contains("• beta"));
    }

    #[test]
    fn ascii_mode_uses_plain_bullets() {
        let lines = render_markdown("- alpha", 80, true);
        let text = flat_text(&lines);
        assert!(text.contains("* alpha"), "got: {text:?}");
        assert!(!text.contains('•'));
    }

    #[test]
    fn long_paragraph_wraps_at_width() {
        let lines = render_markdown("one two three four five six seven eight", 16, false);
        assert!(lines.len() > 1, "expected wrapping, got {lines:?}");
        for line in &lines {
            let w: usize = line.spans.iter().map(|s| s.content.as_ref().width()).sum();
            // split_inclusive keeps the trailing space on the wrapped word
            assert!(w <= 17, "line too wide: {line:?}");
        }
    }

    #[test]
    fn wrapped_list_item_keeps_a_hanging_indent() {
        let lines = render_markdown("- a rather long list item that wraps", 18, false);
        assert!(lines.len() > 1);
        let second = lines[1]
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect::<String>();
        assert!(second.starts_with("    "), "continuation not indented: {second:?}");
    }

    #[test]
    fn trailing_spacer_lines_are_trimmed() {
        let lines = render_markdown("last paragraph", 80, false);
        assert!(!lines.last().expect("some output").spans.is_empty());
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert!(render_markdown("", 80, false).is_empty());
    }

    #[test]
    fn zero_width_falls_back_to_eighty_columns() {
        let lines = render_markdown("short", 0, false);
        assert_eq!(lines.len(), 1);
    }
}
