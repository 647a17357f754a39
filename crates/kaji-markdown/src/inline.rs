// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Inline formatting: bold-emphasis splitting for a single line of text.

use std::sync::OnceLock;

use regex::Regex;

/// A styled fragment of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Bold(String),
}

impl Span {
    /// The textual content of the span, markers stripped.
    pub fn text(&self) -> &str {
        match self {
            Span::Text(t) | Span::Bold(t) => t,
        }
    }
}

/// Non-greedy, non-nesting bold token: `**` + shortest run + `**`.
fn bold_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*.*?\*\*").expect("bold marker pattern"))
}

/// Split one line into [`Span`]s.
///
/// `<strong>` / `</strong>` are first normalised to the `**` marker so the
/// HTML alias and the markdown spelling are indistinguishable. The
/// normalised line is then split on the leftmost-shortest `**…**` matches;
/// matched tokens become [`Span::Bold`] with the markers stripped, the text
/// between them becomes [`Span::Text`] verbatim. Empty gaps produce no span,
/// so concatenating all span contents (re-adding `**` around bold ones)
/// reconstructs the normalised line exactly.
///
/// Unbalanced markers follow from the leftmost-shortest rule and nothing
/// else: `"**a**b**"` → `[Bold("a"), Text("b**")]`.
pub fn format(line: &str) -> Vec<Span> {
    let normalized = line.replace("<strong>", "**").replace("</strong>", "**");

    let mut spans = Vec::new();
    let mut tail = 0;
    for m in bold_marker().find_iter(&normalized) {
        if m.start() > tail {
            spans.push(Span::Text(normalized[tail..m.start()].to_string()));
        }
        spans.push(Span::Bold(normalized[m.start() + 2..m.end() - 2].to_string()));
        tail = m.end();
    }
    if tail < normalized.len() {
        spans.push(Span::Text(normalized[tail..].to_string()));
    }
    spans
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
