//! # PageView Component
//!
//! Scrollable body for the static pages (dashboard, verification,
//! configuration, deployment). Pages hand over pre-styled lines plus the
//! index of the focused line; the view keeps that line on screen while the
//! selection moves, and lets PageUp/PageDown scroll freely.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::wrap;

#[derive(Default)]
pub struct PageViewState {
    pub scroll_state: ScrollViewState,
    /// Scroll to the focused line on next render. Cleared by manual paging.
    pub follow_focus: bool,
}

impl EventHandler for PageViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.follow_focus = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.follow_focus = false;
            }
            _ => {}
        }
        None
    }
}

/// Offset that brings rows `top..bottom` into a viewport of `height` at `current`.
fn reveal(current: u16, top: u16, bottom: u16, height: u16) -> u16 {
    if top < current {
        top
    } else if bottom > current.saturating_add(height) {
        bottom.saturating_sub(height).min(top)
    } else {
        current
    }
}

pub struct PageView<'a> {
    pub state: &'a mut PageViewState,
    pub lines: Vec<Line<'static>>,
    pub focus: Option<usize>,
}

impl Component for PageView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // scrollbar
        let heights = wrap::line_heights(&self.lines, content_width);
        let total = wrap::total(&heights);
        let max_y = total.saturating_sub(area.height);

        let mut y = self.state.scroll_state.offset().y;
        if self.state.follow_focus
            && let Some(focus) = self.focus.filter(|f| *f < heights.len())
        {
            let top = wrap::total(&heights[..focus]);
            y = reveal(y, top, top.saturating_add(heights[focus]), area.height);
            self.state.follow_focus = false;
        }
        self.state.scroll_state.set_offset(Position { x: 0, y: y.min(max_y) });

        let mut scroll_view = ScrollView::new(Size::new(content_width, total))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        let paragraph = Paragraph::new(std::mem::take(&mut self.lines)).wrap(Wrap { trim: false });
        scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, total));

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
