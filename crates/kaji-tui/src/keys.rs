// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// All logical actions the TUI can perform, independent of key binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Navigation
    ToggleFocus,

    // Scrolling (in chat pane)
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollTop,
    ScrollBottom,

    // Input
    InputChar(char),
    InputBackspace,
    InputDelete,
    InputMoveCursorLeft,
    InputMoveCursorRight,
    InputMoveLineStart,
    InputMoveLineEnd,
    InputDeleteToEnd,
    InputDeleteToStart,
    Submit,

    // App
    Quit,
    Help,
}

/// Map a raw key event to an [`Action`], depending on which pane has focus.
pub fn map_key(event: KeyEvent, in_input: bool) -> Option<Action> {
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = event.modifiers.contains(KeyModifiers::ALT);
    // "plain" = no modifier that would make a char a control sequence
    let plain = !ctrl && !alt;

    match event.code {
        // ── Input-pane overrides come FIRST so they shadow global bindings ────
        // Ctrl+u — delete to line start
        KeyCode::Char('u') if ctrl && in_input => Some(Action::InputDeleteToStart),
        // Ctrl+k — delete to line end
        KeyCode::Char('k') if ctrl && in_input => Some(Action::InputDeleteToEnd),

        // ── Global bindings ───────────────────────────────────────────────────
        KeyCode::Char('q') if ctrl => Some(Action::Quit),
        KeyCode::Char('c') if ctrl => Some(Action::Quit),
        KeyCode::Tab => Some(Action::ToggleFocus),
        KeyCode::F(1) => Some(Action::Help),

        // ── Rest of input pane ────────────────────────────────────────────────
        KeyCode::Enter if in_input => Some(Action::Submit),
        KeyCode::Backspace if in_input => Some(Action::InputBackspace),
        KeyCode::Delete if in_input => Some(Action::InputDelete),
        KeyCode::Left if in_input => Some(Action::InputMoveCursorLeft),
        KeyCode::Right if in_input => Some(Action::InputMoveCursorRight),
        KeyCode::Home if in_input => Some(Action::InputMoveLineStart),
        KeyCode::End if in_input => Some(Action::InputMoveLineEnd),
        // Printable characters — only when no ctrl/alt modifier
        KeyCode::Char(c) if in_input && plain => Some(Action::InputChar(c)),

        // ── Chat pane ─────────────────────────────────────────────────────────
        KeyCode::Up | KeyCode::Char('k') if !in_input && plain => Some(Action::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') if !in_input && plain => Some(Action::ScrollDown),
        KeyCode::Char('u') if ctrl && !in_input => Some(Action::ScrollPageUp),
        KeyCode::Char('d') if ctrl && !in_input => Some(Action::ScrollPageDown),
        KeyCode::Char('g') if !in_input && plain => Some(Action::ScrollTop),
        KeyCode::Char('G') if !in_input => Some(Action::ScrollBottom),
        KeyCode::PageUp if !in_input => Some(Action::ScrollPageUp),
        KeyCode::PageDown if !in_input => Some(Action::ScrollPageDown),

        _ => None,
    }
}

// ─── Unit tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    use super::*;

    fn key(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: mods,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    fn plain_key(c: char) -> KeyEvent { key(KeyCode::Char(c), KeyModifiers::NONE) }
    fn ctrl_key(c: char) -> KeyEvent { key(KeyCode::Char(c), KeyModifiers::CONTROL) }

    // ── Normal typing ─────────────────────────────────────────────────────────

    #[test]
    fn plain_char_in_input_types() {
        assert_eq!(map_key(plain_key('h'), true), Some(Action::InputChar('h')));
    }

    #[test]
    fn plain_char_not_in_input_does_not_type() {
        assert_eq!(map_key(plain_key('x'), false), None);
    }

    #[test]
    fn alt_char_in_input_does_not_type() {
        let ev = key(KeyCode::Char('a'), KeyModifiers::ALT);
        assert_eq!(map_key(ev, true), None);
    }

    #[test]
    fn enter_in_input_submits() {
        assert_eq!(map_key(key(KeyCode::Enter, KeyModifiers::NONE), true), Some(Action::Submit));
    }

    // ── Focus & quit ──────────────────────────────────────────────────────────

    #[test]
    fn tab_toggles_focus_from_both_panes() {
        let ev = key(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(map_key(ev, true), Some(Action::ToggleFocus));
        assert_eq!(map_key(ev, false), Some(Action::ToggleFocus));
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        assert_eq!(map_key(ctrl_key('c'), false), Some(Action::Quit));
        assert_eq!(map_key(ctrl_key('c'), true), Some(Action::Quit));
    }

    // ── Input-pane line editing ───────────────────────────────────────────────

    #[test]
    fn ctrl_k_in_input_deletes_to_end() {
        assert_eq!(map_key(ctrl_key('k'), true), Some(Action::InputDeleteToEnd));
    }

    #[test]
    fn ctrl_u_in_input_deletes_to_start() {
        assert_eq!(map_key(ctrl_key('u'), true), Some(Action::InputDeleteToStart));
    }

    #[test]
    fn ctrl_x_unbound_does_not_type_x() {
        assert_eq!(map_key(ctrl_key('x'), true), None);
    }

    // ── Chat scrolling ────────────────────────────────────────────────────────

    #[test]
    fn j_in_chat_scrolls_down() {
        assert_eq!(map_key(plain_key('j'), false), Some(Action::ScrollDown));
    }

    #[test]
    fn k_in_chat_scrolls_up() {
        assert_eq!(map_key(plain_key('k'), false), Some(Action::ScrollUp));
    }

    #[test]
    fn ctrl_u_in_chat_page_up() {
        assert_eq!(map_key(ctrl_key('u'), false), Some(Action::ScrollPageUp));
    }

    #[test]
    fn g_and_shift_g_jump_top_and_bottom() {
        assert_eq!(map_key(plain_key('g'), false), Some(Action::ScrollTop));
        assert_eq!(
            map_key(key(KeyCode::Char('G'), KeyModifiers::SHIFT), false),
            Some(Action::ScrollBottom)
        );
    }
}
