//! # InputBox Component
//!
//! Edits the chat session's draft in place. The draft belongs to
//! `ChatSession` (a send clears it); the box only owns cursor and scroll
//! state, so every call takes the buffer as a prop.
//!
//! While a request is in flight the box is locked: edits are dropped and the
//! border shows a spinner, matching the disabled input of the web dashboard.

mod cursor;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::Component;
use crate::tui::event::TuiEvent;
use crate::tui::wrap;

use cursor::{CursorState, next_char_boundary, prev_char_boundary};

pub const PLACEHOLDER: &str = "Ask about the Digital Record Label System...";

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Rounded border plus one column of padding on each side.
const HORIZONTAL_OVERHEAD: u16 = 4;
const VERTICAL_OVERHEAD: u16 = 2;
/// Draft rows shown before the box scrolls internally.
const MAX_VISIBLE_LINES: u16 = 4;
const BORDER_OFFSET: u16 = 1;

/// Width left for the draft inside the border, 0 when the area is too narrow.
fn inner_width(content_width: u16) -> u16 {
    content_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed with a non-blank draft
    Submit,
    ContentChanged,
}

#[derive(Debug, Default)]
pub struct InputBox {
    cursor: CursorState,
}

impl InputBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Required height for the buffer, clamped to
    /// `[1 + VERTICAL_OVERHEAD, MAX_VISIBLE_LINES + VERTICAL_OVERHEAD]`.
    pub fn calculate_height(buffer: &str, content_width: u16) -> u16 {
        let lines = wrap::text_rows(buffer, inner_width(content_width));
        lines.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// Applies an editing event to `buffer`. Nothing changes while `locked`.
    pub fn handle_edit(
        &mut self,
        buffer: &mut String,
        event: &TuiEvent,
        locked: bool,
    ) -> Option<InputEvent> {
        if locked {
            return None;
        }
        self.cursor.clamp(buffer);
        let pos = self.cursor.pos;

        match event {
            TuiEvent::InputChar(c) => {
                buffer.insert(pos, *c);
                self.cursor.pos += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Terminals send \r for newlines inside bracketed paste
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                buffer.insert_str(pos, &text);
                self.cursor.pos += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace if pos > 0 => {
                let prev = prev_char_boundary(buffer, pos);
                buffer.drain(prev..pos);
                self.cursor.pos = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete if pos < buffer.len() => {
                let next = next_char_boundary(buffer, pos);
                buffer.drain(pos..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft if pos > 0 => {
                self.cursor.pos = prev_char_boundary(buffer, pos);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorRight if pos < buffer.len() => {
                self.cursor.pos = next_char_boundary(buffer, pos);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorHome => {
                let line_start = buffer[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
                (pos != line_start).then(|| {
                    self.cursor.pos = line_start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = buffer[pos..]
                    .find('\n')
                    .map(|i| pos + i)
                    .unwrap_or(buffer.len());
                (pos != line_end).then(|| {
                    self.cursor.pos = line_end;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::Submit if !buffer.trim().is_empty() => Some(InputEvent::Submit),
            _ => None,
        }
    }

    /// Borrow the box for one render pass.
    pub fn view<'a>(&'a mut self, buffer: &'a str, locked: bool, spinner_frame: usize) -> InputView<'a> {
        InputView {
            cursor: &mut self.cursor,
            buffer,
            locked,
            spinner_frame,
        }
    }
}

/// Transient render view over the draft.
pub struct InputView<'a> {
    cursor: &'a mut CursorState,
    buffer: &'a str,
    locked: bool,
    spinner_frame: usize,
}

impl InputView<'_> {
    fn visible_text(&self, content_width: u16) -> String {
        if self.cursor.scroll_offset == 0 {
            return self.buffer.to_string();
        }
        let width = inner_width(content_width);
        if width == 0 {
            return String::new();
        }
        let lines = textwrap::wrap(self.buffer, wrap::options(width));
        let start = (self.cursor.scroll_offset as usize).min(lines.len());
        let end = (start + MAX_VISIBLE_LINES as usize).min(lines.len());
        lines[start..end].join("\n")
    }
}

impl Component for InputView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.clamp(self.buffer);
        self.cursor.update_scroll_offset(self.buffer, area.width);

        let (title, border_style) = if self.locked {
            let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
            (
                format!(" {spinner} Waiting for the assistant... "),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            (
                String::from(" Message (Enter to send, Ctrl+J for newline) "),
                Style::default().fg(Color::Cyan),
            )
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title);

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(PLACEHOLDER).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            let fg = if self.locked { Color::DarkGray } else { Color::White };
            Paragraph::new(self.visible_text(area.width)).style(Style::default().fg(fg))
        };
        frame.render_widget(paragraph.block(block), area);

        if !self.locked {
            frame.set_cursor_position(self.cursor.screen_pos(self.buffer, area));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = InputBox::new();
        let mut draft = String::new();

        for c in "ab".chars() {
            let res = input.handle_edit(&mut draft, &TuiEvent::InputChar(c), false);
            assert_eq!(res, Some(InputEvent::ContentChanged));
        }
        assert_eq!(draft, "ab");

        input.handle_edit(&mut draft, &TuiEvent::Backspace, false);
        assert_eq!(draft, "a");
    }

    #[test]
    fn test_edits_in_the_middle() {
        let mut input = InputBox::new();
        let mut draft = String::new();
        input.handle_edit(&mut draft, &TuiEvent::Paste("helm".into()), false);
        input.handle_edit(&mut draft, &TuiEvent::CursorHome, false);
        input.handle_edit(&mut draft, &TuiEvent::Delete, false);
        input.handle_edit(&mut draft, &TuiEvent::InputChar('H'), false);
        assert_eq!(draft, "Helm");
    }

    #[test]
    fn test_paste_normalizes_carriage_returns() {
        let mut input = InputBox::new();
        let mut draft = String::new();
        input.handle_edit(&mut draft, &TuiEvent::Paste("a\r\nb\rc".into()), false);
        assert_eq!(draft, "a\nb\nc");
    }

    #[test]
    fn test_submit_requires_non_blank_draft() {
        let mut input = InputBox::new();
        let mut draft = String::from("   ");
        assert_eq!(input.handle_edit(&mut draft, &TuiEvent::Submit, false), None);

        draft.push_str("status?");
        assert_eq!(
            input.handle_edit(&mut draft, &TuiEvent::Submit, false),
            Some(InputEvent::Submit)
        );
        // Submitting leaves the draft alone; the session clears it
        assert_eq!(draft, "   status?");
    }

    #[test]
    fn test_locked_ignores_edits() {
        let mut input = InputBox::new();
        let mut draft = String::from("pending");
        assert_eq!(input.handle_edit(&mut draft, &TuiEvent::InputChar('x'), true), None);
        assert_eq!(input.handle_edit(&mut draft, &TuiEvent::Submit, true), None);
        assert_eq!(draft, "pending");
    }

    #[test]
    fn test_cursor_survives_cleared_draft() {
        let mut input = InputBox::new();
        let mut draft = String::new();
        input.handle_edit(&mut draft, &TuiEvent::Paste("long question".into()), false);
        draft.clear();
        input.handle_edit(&mut draft, &TuiEvent::InputChar('n'), false);
        assert_eq!(draft, "n");
    }

    #[test]
    fn test_height_is_clamped() {
        assert_eq!(InputBox::calculate_height("", 40), 1 + VERTICAL_OVERHEAD);
        let tall = "x\n".repeat(20);
        assert_eq!(
            InputBox::calculate_height(&tall, 40),
            MAX_VISIBLE_LINES + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn test_render_placeholder_and_spinner() {
        let mut terminal = Terminal::new(TestBackend::new(60, 3)).unwrap();
        let mut input = InputBox::new();

        terminal
            .draw(|f| input.view("", false, 0).render(f, f.area()))
            .unwrap();
        assert!(screen_text(&terminal).contains("Ask about the Digital Record Label System"));

        terminal
            .draw(|f| input.view("hi", true, 0).render(f, f.area()))
            .unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Waiting for the assistant"));
        assert!(text.contains("hi"));
    }
}
