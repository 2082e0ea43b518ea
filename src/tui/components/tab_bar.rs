//! # TabBar Component
//!
//! Top line: app name, one tab per page (with its function key), and the
//! assistant's availability on the right.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Tabs};

use crate::core::chat::CapabilityState;
use crate::core::state::Page;
use crate::tui::component::Component;

pub struct TabBar<'a> {
    pub page: Page,
    pub model: &'a str,
    pub capability: CapabilityState,
}

impl TabBar<'_> {
    fn assistant_badge(&self) -> Line<'static> {
        let (label, color) = match self.capability {
            CapabilityState::Disabled => (String::from("AI disabled"), Color::Red),
            CapabilityState::Ready => (format!("AI ready · {}", self.model), Color::Green),
            CapabilityState::Sending => (format!("AI busy · {}", self.model), Color::Yellow),
        };
        Line::from(Span::styled(label, Style::default().fg(color))).right_aligned()
    }
}

impl Component for TabBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let badge = self.assistant_badge();
        let badge_width = u16::try_from(badge.width() + 1)
            .unwrap_or(u16::MAX)
            .min(area.width / 3);
        let [name_area, tabs_area, badge_area] = Layout::horizontal([
            Constraint::Length(11),
            Constraint::Min(0),
            Constraint::Length(badge_width),
        ])
        .areas(area);

        frame.render_widget(
            Span::styled(
                " labeldesk",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ),
            name_area,
        );

        let titles = Page::ALL
            .iter()
            .enumerate()
            .map(|(i, page)| format!("F{} {}", i + 1, page.title()));
        let selected = Page::ALL.iter().position(|p| *p == self.page);
        let tabs = Tabs::new(titles)
            .select(selected.unwrap_or(0))
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            );
        frame.render_widget(tabs, tabs_area);
        frame.render_widget(Paragraph::new(badge), badge_area);
    }
}
