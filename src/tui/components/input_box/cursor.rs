//! Cursor position and internal scroll for the input box.
//!
//! The text itself is the chat session's draft, so every method takes
//! `buffer: &str` explicitly. The buffer can change underneath the cursor
//! (a send clears it), which is why callers `clamp` before use.

use super::{BORDER_OFFSET, MAX_VISIBLE_LINES, inner_width};
use crate::tui::wrap;
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

/// Start of the char before `pos`, or 0.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos].char_indices().next_back().map_or(0, |(i, _)| i)
}

/// Start of the char after the one at `pos`, or the end of `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len(), |c| pos + c.len_utf8())
}

#[derive(Debug, Default)]
pub(super) struct CursorState {
    /// Byte offset into the buffer (0..=buffer.len())
    pub pos: usize,
    /// Line offset for internal scrolling (0 when content fits in viewport)
    pub scroll_offset: u16,
}

impl CursorState {
    /// Keeps `pos` inside the buffer and on a char boundary.
    pub fn clamp(&mut self, buffer: &str) {
        if self.pos > buffer.len() {
            self.pos = buffer.len();
        }
        while !buffer.is_char_boundary(self.pos) {
            self.pos -= 1;
        }
        if buffer.is_empty() {
            self.scroll_offset = 0;
        }
    }

    /// Which wrapped line (0-based) the cursor is on.
    pub fn calculate_line(&self, buffer: &str, content_width: u16) -> u16 {
        let width = inner_width(content_width);
        if width == 0 {
            return 0;
        }

        let text_before_cursor = &buffer[..self.pos];
        let lines = textwrap::wrap(text_before_cursor, wrap::options(width));
        let mut cursor_line = u16::try_from(lines.len().saturating_sub(1)).unwrap_or(u16::MAX);

        // Cursor right after a newline textwrap didn't represent
        if self.pos > 0
            && buffer.as_bytes()[self.pos - 1] == b'\n'
            && !lines.last().is_some_and(|l| l.is_empty())
        {
            cursor_line = cursor_line.saturating_add(1);
        }

        cursor_line
    }

    /// Update scroll offset to keep the cursor visible.
    pub fn update_scroll_offset(&mut self, buffer: &str, content_width: u16) {
        let width = inner_width(content_width);
        if wrap::text_rows(buffer, width) <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }

        let cursor_line = self.calculate_line(buffer, content_width);
        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset.saturating_add(MAX_VISIBLE_LINES) {
            self.scroll_offset = cursor_line.saturating_sub(MAX_VISIBLE_LINES - 1);
        }
    }

    /// Screen position `(column, row)` of the cursor inside `area`.
    /// Columns are display widths, so wide glyphs advance by two.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        if width == 0 {
            return (area.x + BORDER_OFFSET, area.y + BORDER_OFFSET);
        }

        let cursor_line = self.calculate_line(buffer, area.width);

        // Measure from the last newline: textwrap trims trailing spaces, which
        // would otherwise drag the cursor left while typing.
        let text_before_cursor = &buffer[..self.pos];
        let line_start = text_before_cursor.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let logical_line = &text_before_cursor[line_start..];
        let segments = textwrap::wrap(logical_line, wrap::options(width));
        let consumed: usize = segments
            .iter()
            .take(segments.len().saturating_sub(1))
            .map(|seg| seg.width())
            .sum();
        let cursor_col = u16::try_from(logical_line.width().saturating_sub(consumed)).unwrap_or(u16::MAX);

        let visible_line = cursor_line.saturating_sub(self.scroll_offset);
        (
            (area.x + BORDER_OFFSET).saturating_add(cursor_col),
            (area.y + BORDER_OFFSET).saturating_add(visible_line),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_follows_a_cleared_buffer() {
        let mut cursor = CursorState {
            pos: 12,
            scroll_offset: 3,
        };
        cursor.clamp("");
        assert_eq!(cursor.pos, 0);
        assert_eq!(cursor.scroll_offset, 0);
    }

    #[test]
    fn clamp_lands_on_char_boundary() {
        let mut cursor = CursorState {
            pos: 4,
            scroll_offset: 0,
        };
        // 'é' occupies bytes 3..5
        cursor.clamp("café");
        assert_eq!(cursor.pos, 3);
    }

    #[test]
    fn screen_pos_counts_display_width() {
        let area = Rect::new(0, 0, 40, 4);
        let buffer = "日本";
        let cursor = CursorState {
            pos: buffer.len(),
            scroll_offset: 0,
        };
        assert_eq!(cursor.screen_pos(buffer, area), (BORDER_OFFSET + 4, BORDER_OFFSET));
    }

    #[test]
    fn screen_pos_keeps_trailing_space() {
        let area = Rect::new(0, 0, 40, 4);
        let buffer = "helm ";
        let cursor = CursorState {
            pos: buffer.len(),
            scroll_offset: 0,
        };
        assert_eq!(cursor.screen_pos(buffer, area).0, BORDER_OFFSET + 5);
    }

    #[test]
    fn char_boundaries_step_over_multibyte() {
        // 'é' occupies bytes 3..5
        let s = "café";
        assert_eq!(prev_char_boundary(s, 5), 3);
        assert_eq!(prev_char_boundary(s, 3), 2);
        assert_eq!(prev_char_boundary(s, 1), 0);
        assert_eq!(next_char_boundary(s, 2), 3);
        assert_eq!(next_char_boundary(s, 3), 5);
        assert_eq!(next_char_boundary(s, 5), 5);
    }

    #[test]
    fn newline_moves_cursor_to_next_line() {
        let area = Rect::new(0, 0, 40, 6);
        let buffer = "line one\n";
        let cursor = CursorState {
            pos: buffer.len(),
            scroll_offset: 0,
        };
        assert_eq!(cursor.screen_pos(buffer, area), (BORDER_OFFSET, BORDER_OFFSET + 1));
    }
}
