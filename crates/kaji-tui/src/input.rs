// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Line-editing primitives for the input box.
//!
//! The cursor is a character index (not a byte index) so that multi-byte
//! input behaves correctly; conversion to byte offsets happens here only.

/// Byte offset of the `char_idx`-th character.
fn byte_index(buf: &str, char_idx: usize) -> usize {
    buf.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(buf.len())
}

pub fn insert_char(buf: &mut String, cursor: &mut usize, c: char) {
    let at = byte_index(buf, *cursor);
    buf.insert(at, c);
    *cursor += 1;
}

pub fn backspace(buf: &mut String, cursor: &mut usize) {
    if *cursor == 0 {
        return;
    }
    let at = byte_index(buf, *cursor - 1);
    buf.remove(at);
    *cursor -= 1;
}

pub fn delete(buf: &mut String, cursor: &mut usize) {
    if *cursor >= buf.chars().count() {
        return;
    }
    let at = byte_index(buf, *cursor);
    buf.remove(at);
}

pub fn move_left(cursor: &mut usize) {
    *cursor = cursor.saturating_sub(1);
}

pub fn move_right(buf: &str, cursor: &mut usize) {
    if *cursor < buf.chars().count() {
        *cursor += 1;
    }
}

pub fn move_start(cursor: &mut usize) {
    *cursor = 0;
}

pub fn move_end(buf: &str, cursor: &mut usize) {
    *cursor = buf.chars().count();
}

pub fn delete_to_end(buf: &mut String, cursor: &usize) {
    let at = byte_index(buf, *cursor);
    buf.truncate(at);
}

pub fn delete_to_start(buf: &mut String, cursor: &mut usize) {
    let at = byte_index(buf, *cursor);
    buf.replace_range(..at, "");
    *cursor = 0;
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
