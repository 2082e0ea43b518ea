//! # Transcript Component
//!
//! Scrollable view of the chat session's turns.
//!
//! `Transcript` is a transient component (created each frame) that wraps
//! `&'a mut TranscriptState` (persistent state) and the turns (props).
//! Turns never change once appended, so their heights are cached per width
//! and only new turns are measured.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::chat::Turn;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;
use crate::tui::wrap;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Gap between turns.
const TURN_GAP: u16 = 1;

pub const EMPTY_HINT: &str = "Ask a question about the Digital Record Label Agent System: \
    architecture, Docker and Kubernetes deployment, configuration, or verification.";

/// Layout and scroll state for the transcript.
/// Must be persisted in the parent TuiState.
#[derive(Default)]
pub struct TranscriptState {
    pub scroll_state: ScrollViewState,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    pub viewport_height: u16,
    heights: Vec<u16>,
    cached_width: u16,
}

impl TranscriptState {
    pub fn new() -> Self {
        Self {
            stick_to_bottom: true,
            ..Default::default()
        }
    }

    fn total_height(&self) -> u16 {
        wrap::total(&self.heights)
    }

    /// Measures any turns not yet in the cache.
    fn update_heights(&mut self, turns: &[Turn], width: u16) {
        if width != self.cached_width || turns.len() < self.heights.len() {
            self.heights.clear();
            self.cached_width = width;
        }
        for turn in turns.iter().skip(self.heights.len()) {
            self.heights
                .push(Message::calculate_height(turn, width).saturating_add(TURN_GAP));
        }
    }

    fn max_offset(&self, canvas_height: u16) -> u16 {
        canvas_height.saturating_sub(self.viewport_height)
    }

    /// Re-engage auto-scroll once the user scrolls back to the bottom.
    fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset(self.total_height());
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }
}

impl EventHandler for TranscriptState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::CursorDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

pub struct Transcript<'a> {
    pub state: &'a mut TranscriptState,
    pub turns: &'a [Turn],
    pub sending: bool,
    pub spinner_frame: usize,
}

impl Component for Transcript<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.turns.is_empty() {
            let hint = Paragraph::new(EMPTY_HINT)
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
                .alignment(Alignment::Center)
                .wrap(ratatui::widgets::Wrap { trim: true });
            let y = area.y + area.height / 3;
            let hint_area = Rect::new(area.x, y, area.width, area.height.saturating_sub(y - area.y));
            frame.render_widget(hint, hint_area);
            return;
        }

        let content_width = area.width.saturating_sub(1); // scrollbar
        self.state.update_heights(self.turns, content_width);
        self.state.viewport_height = area.height;

        let pending_rows = if self.sending { 1 } else { 0 };
        let canvas_height = self.state.total_height().saturating_add(pending_rows);

        // Settle the offset before culling so the rendered turns match the viewport
        let max_y = self.state.max_offset(canvas_height);
        let current = self.state.scroll_state.offset();
        if self.state.stick_to_bottom || current.y > max_y {
            self.state
                .scroll_state
                .set_offset(Position { x: current.x, y: max_y });
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let offset = self.state.scroll_state.offset().y;
        let mut y: u16 = 0;
        for (turn, &height) in self.turns.iter().zip(&self.state.heights) {
            // Only render turns that intersect the viewport
            if y.saturating_add(height) > offset && y < offset.saturating_add(area.height) {
                let rect = Rect::new(0, y, content_width, height.saturating_sub(TURN_GAP));
                scroll_view.render_widget(Message::new(turn), rect);
            }
            y = y.saturating_add(height);
        }

        if self.sending {
            let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
            let line = Line::from(vec![
                Span::styled(format!("{spinner} "), Style::default().fg(Color::Green)),
                Span::styled(
                    "Thinking...",
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                ),
            ]);
            scroll_view.render_widget(Paragraph::new(line), Rect::new(0, y, content_width, 1));
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
