// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Top-level TUI application state and event loop.

use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use kaji_config::Config;
use kaji_markdown::StyledLines;
use kaji_model::ChatMessage;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tracing::debug;

use crate::{
    input,
    keys::{map_key, Action},
    layout::AppLayout,
    segment::{apply_bar, render_segment, segment_bar_style, ChatSegment},
    session::{session_task, SessionEvent, SessionRequest},
    widgets::{bar_char, draw_chat, draw_help, draw_input, draw_status},
};

/// Options passed when constructing the TUI app.
pub struct AppOptions {
    /// Topic from the CLI; submitted automatically on startup when set.
    pub initial_topic: Option<String>,
}

/// Which pane currently holds keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Chat,
    Input,
}

/// The top-level TUI application state.
pub struct App {
    config: Arc<Config>,
    focus: FocusPane,
    /// Structured display segments; source of truth for the chat pane.
    segments: Vec<ChatSegment>,
    chat_lines: StyledLines,
    scroll_offset: u16,
    /// When `true`, new content scrolls the chat pane to the bottom. Cleared
    /// when the user scrolls up so replies do not fight their position.
    auto_scroll: bool,
    input_buffer: String,
    input_cursor: usize,
    /// At-most-one-in-flight latch: set when a request is dispatched,
    /// cleared when its event arrives. Input is disabled while set.
    busy: bool,
    /// False until the first analysis succeeds; decides whether a submit is
    /// a topic or a follow-up.
    discussion_open: bool,
    show_help: bool,
    session_tx: Option<mpsc::Sender<SessionRequest>>,
    chat_height: u16,
    last_chat_inner_width: u16,
    model_display: String,
    initial_topic: Option<String>,
}

impl App {
    pub fn new(config: Arc<Config>, opts: AppOptions) -> Self {
        let model_display = format!("{}/{}", config.model.provider, config.model.name);
        Self {
            config,
            focus: FocusPane::Input,
            segments: Vec::new(),
            chat_lines: Vec::new(),
            scroll_offset: 0,
            auto_scroll: true,
            input_buffer: String::new(),
            input_cursor: 0,
            busy: false,
            discussion_open: false,
            show_help: false,
            session_tx: None,
            chat_height: 24,
            last_chat_inner_width: 78,
            model_display,
            initial_topic: opts.initial_topic,
        }
    }

    fn ascii(&self) -> bool {
        self.config.tui.ascii
    }

    /// Wrap width for chat content: the configured override, or the pane
    /// width minus the segment bar.
    fn wrap_width(&self) -> u16 {
        if self.config.tui.wrap_width > 0 {
            self.config.tui.wrap_width
        } else {
            self.last_chat_inner_width.saturating_sub(2)
        }
    }

    /// Run the TUI event loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> anyhow::Result<()> {
        let (submit_tx, submit_rx) = mpsc::channel::<SessionRequest>(8);
        let (event_tx, mut event_rx) = mpsc::channel::<SessionEvent>(8);

        tokio::spawn(session_task(self.config.clone(), submit_rx, event_tx));
        self.session_tx = Some(submit_tx);

        if let Some(topic) = self.initial_topic.take() {
            self.submit_text(topic).await;
        }

        let mut crossterm_events = EventStream::new();

        loop {
            if let Ok(size) = terminal.size() {
                let layout = AppLayout::compute(Rect::new(0, 0, size.width, size.height));
                self.chat_height = layout.chat_inner_height().max(1);
                let width = layout.chat_pane.width.saturating_sub(2).max(20);
                if width != self.last_chat_inner_width {
                    self.last_chat_inner_width = width;
                    self.rebuild_chat();
                }
            }

            terminal.draw(|f| self.draw(f))?;

            tokio::select! {
                maybe_event = crossterm_events.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if !self.handle_key(key).await {
                            break;
                        }
                    }
                    Some(Ok(_)) => {} // resize etc. — redrawn on the next pass
                    Some(Err(e)) => debug!("terminal event error: {e}"),
                    None => break,
                },
                Some(ev) = event_rx.recv() => self.handle_session_event(ev),
            }
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        let layout = AppLayout::new(frame);
        let ascii = self.ascii();

        draw_status(
            frame,
            layout.status_bar,
            &self.model_display,
            self.busy,
            self.user_turns(),
            ascii,
        );
        draw_chat(
            frame,
            layout.chat_pane,
            &self.chat_lines,
            self.scroll_offset,
            self.focus == FocusPane::Chat,
            ascii,
        );
        draw_input(
            frame,
            layout.input_pane,
            &self.input_buffer,
            self.input_cursor,
            self.focus == FocusPane::Input,
            self.busy,
            self.discussion_open,
            ascii,
        );
        if self.show_help {
            draw_help(frame, ascii);
        }
    }

    /// Handle one key press. Returns `false` to quit.
    async fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.show_help {
            self.show_help = false;
            return true;
        }
        let Some(action) = map_key(key, self.focus == FocusPane::Input) else {
            return true;
        };
        match action {
            Action::Quit => return false,
            Action::Help => self.show_help = true,
            Action::ToggleFocus => {
                self.focus = match self.focus {
                    FocusPane::Chat => FocusPane::Input,
                    FocusPane::Input => FocusPane::Chat,
                };
            }

            Action::ScrollUp => self.scroll_by(-1),
            Action::ScrollDown => self.scroll_by(1),
            Action::ScrollPageUp => self.scroll_by(-(self.chat_height as i32 / 2)),
            Action::ScrollPageDown => self.scroll_by(self.chat_height as i32 / 2),
            Action::ScrollTop => {
                self.scroll_offset = 0;
                self.auto_scroll = false;
            }
            Action::ScrollBottom => self.scroll_to_bottom(),

            // Editing is latched off while a request is in flight.
            _ if self.busy => {}
            Action::InputChar(c) => {
                input::insert_char(&mut self.input_buffer, &mut self.input_cursor, c);
            }
            Action::InputBackspace => {
                input::backspace(&mut self.input_buffer, &mut self.input_cursor);
            }
            Action::InputDelete => {
                input::delete(&mut self.input_buffer, &mut self.input_cursor);
            }
            Action::InputMoveCursorLeft => input::move_left(&mut self.input_cursor),
            Action::InputMoveCursorRight => {
                input::move_right(&self.input_buffer, &mut self.input_cursor);
            }
            Action::InputMoveLineStart => input::move_start(&mut self.input_cursor),
            Action::InputMoveLineEnd => {
                input::move_end(&self.input_buffer, &mut self.input_cursor);
            }
            Action::InputDeleteToEnd => {
                input::delete_to_end(&mut self.input_buffer, &self.input_cursor);
            }
            Action::InputDeleteToStart => {
                input::delete_to_start(&mut self.input_buffer, &mut self.input_cursor);
            }
            Action::Submit => self.submit_input().await,
        }
        true
    }

    /// Submit the input buffer as a topic or follow-up message.
    async fn submit_input(&mut self) {
        if self.busy {
            return;
        }
        let text = self.input_buffer.trim().to_string();
        if text.is_empty() {
            return;
        }
        self.input_buffer.clear();
        self.input_cursor = 0;
        self.submit_text(text).await;
    }

    async fn submit_text(&mut self, text: String) {
        self.segments.push(ChatSegment::Message(ChatMessage::user(text.clone())));
        self.rebuild_chat();
        self.scroll_to_bottom();

        let req = if self.discussion_open {
            SessionRequest::Follow(text)
        } else {
            SessionRequest::Analyze(text)
        };
        self.busy = true;
        if let Some(tx) = &self.session_tx {
            let _ = tx.send(req).await;
        }
    }

    fn handle_session_event(&mut self, ev: SessionEvent) {
        self.busy = false;
        match ev {
            SessionEvent::Analysis(text) => {
                self.discussion_open = true;
                self.segments.push(ChatSegment::Message(ChatMessage::model(text)));
            }
            SessionEvent::Reply(text) => {
                self.segments.push(ChatSegment::Message(ChatMessage::model(text)));
            }
            SessionEvent::Error(e) => {
                self.segments.push(ChatSegment::Error(e));
            }
        }
        self.rebuild_chat();
        if self.auto_scroll {
            self.scroll_to_bottom();
        }
    }

    /// Rebuild `chat_lines` from the segments at the current pane width.
    fn rebuild_chat(&mut self) {
        let width = self.wrap_width();
        let ascii = self.ascii();
        let mut lines: StyledLines = Vec::new();
        for seg in &self.segments {
            let rendered = render_segment(seg, width, ascii);
            lines.extend(apply_bar(rendered, segment_bar_style(seg), bar_char(ascii)));
            lines.push(Line::default());
        }
        self.chat_lines = lines;
    }

    fn user_turns(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| {
                matches!(s, ChatSegment::Message(m) if m.role == kaji_model::Role::User)
            })
            .count()
    }

    fn max_scroll(&self) -> u16 {
        (self.chat_lines.len() as u16).saturating_sub(self.chat_height)
    }

    fn scroll_by(&mut self, delta: i32) {
        let target = (self.scroll_offset as i32 + delta).max(0) as u16;
        self.scroll_offset = target.min(self.max_scroll());
        // Re-arm auto-scroll only when the user lands back on the bottom.
        self.auto_scroll = self.scroll_offset == self.max_scroll();
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.max_scroll();
        self.auto_scroll = true;
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
