// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Chat display data: the `ChatSegment` enum and its rendering into styled
//! lines. Error segments are display-only and never enter the
//! provider-visible history.

use kaji_markdown::{render_markdown, StyledLines};
use kaji_model::{ChatMessage, Role};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// One entry in the chat display (a conversation message or a note).
#[derive(Debug, Clone)]
pub enum ChatSegment {
    Message(ChatMessage),
    /// A failed provider call, shown inline but excluded from history.
    Error(String),
}

/// Colour of the per-segment bar drawn down the left edge.
pub fn segment_bar_style(seg: &ChatSegment) -> Style {
    match seg {
        ChatSegment::Message(m) => match m.role {
            Role::User => Style::default().fg(Color::Green),
            Role::Model => Style::default().fg(Color::Blue),
        },
        ChatSegment::Error(_) => Style::default().fg(Color::Red),
    }
}

/// Render one segment into styled lines at the given wrap width.
///
/// Model replies go through the markdown engine; user messages and error
/// notes stay plain text, exactly as typed or reported.
pub fn render_segment(seg: &ChatSegment, width: u16, ascii: bool) -> StyledLines {
    let mut lines = match seg {
        ChatSegment::Message(m) if m.role == Role::Model => {
            render_markdown(&m.content, width, ascii)
        }
        ChatSegment::Message(m) => m
            .content
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Green))))
            .collect(),
        ChatSegment::Error(e) => vec![Line::from(vec![
            Span::styled("error: ", Style::default().fg(Color::Red)),
            Span::styled(e.clone(), Style::default().fg(Color::Red)),
        ])],
    };
    if lines.is_empty() {
        lines.push(Line::default());
    }
    lines
}

/// Prepend the coloured segment bar to every line.
pub fn apply_bar(lines: StyledLines, bar_style: Style, bar_char: &str) -> StyledLines {
    lines
        .into_iter()
        .map(|line| {
            let mut spans = vec![Span::styled(bar_char.to_string(), bar_style)];
            spans.extend(line.spans);
            Line::from(spans)
        })
        .collect()
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
