use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::chat::{Author, Turn};
use crate::tui::{markdown, wrap};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Assistant replies stop this far from the right edge, user turns this far from the left.
const SIDE_GUTTER: u16 = 6;

/// A single transcript turn: a rounded block titled with the author and time.
///
/// User turns sit to the right, assistant turns to the left, the way the web
/// dashboard lays out chat bubbles. Bodies go through the markdown renderer
/// and grounded replies list their citations under it.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub turn: &'a Turn,
}

fn author_style(author: Author) -> Style {
    match author {
        Author::User => Style::default().fg(Color::Cyan),
        Author::Assistant => Style::default().fg(Color::Green),
    }
}

fn author_label(author: Author) -> &'static str {
    match author {
        Author::User => "You",
        Author::Assistant => "AI Assistant",
    }
}

impl<'a> Message<'a> {
    pub fn new(turn: &'a Turn) -> Self {
        Self { turn }
    }

    fn body(turn: &Turn) -> Text<'static> {
        let fg = match turn.author {
            Author::User => Color::White,
            Author::Assistant => Color::Gray,
        };
        markdown::render_turn(turn, fg)
    }

    /// Area the bubble occupies within a row of the given width.
    fn bubble(turn: &Turn, area: Rect) -> Rect {
        let gutter = SIDE_GUTTER.min(area.width / 4);
        let width = area.width.saturating_sub(gutter);
        let x = match turn.author {
            Author::User => area.x + gutter,
            Author::Assistant => area.x,
        };
        Rect::new(x, area.y, width, area.height)
    }

    /// Height of this turn at `width`, borders included.
    pub fn calculate_height(turn: &Turn, width: u16) -> u16 {
        let bubble_width = Self::bubble(turn, Rect::new(0, 0, width, 0)).width;
        let content_width = bubble_width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }
        let body = Self::body(turn);
        wrap::text_height(&body.lines, content_width)
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD)
    }
}

impl Widget for Message<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = author_style(self.turn.author);
        let border_style = style.add_modifier(Modifier::DIM);
        let bubble = Self::bubble(self.turn, area);

        let title = Line::from(format!(
            " {} · {} ",
            author_label(self.turn.author),
            self.turn.time_label()
        ));
        let title = match self.turn.author {
            Author::User => title.alignment(Alignment::Right),
            Author::Assistant => title,
        };

        let block = Block::bordered()
            .title(title)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(style)
            .padding(Padding::horizontal(CONTENT_PAD_H));
        let inner = block.inner(bubble);
        block.render(bubble, buf);

        Paragraph::new(Self::body(self.turn))
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::citations::compose_reply;
    use crate::inference::Citation;
    use chrono::Local;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn turn(author: Author, text: &str) -> Turn {
        Turn {
            id: 1,
            author,
            text: text.to_string(),
            created_at: Local::now(),
            citations: Vec::new(),
        }
    }

    #[test]
    fn calculate_height_single_line() {
        let t = turn(Author::User, "Hello");
        assert_eq!(Message::calculate_height(&t, 80), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_counts_sources_block() {
        let citations = vec![
            Citation::new(Some("https://helm.sh"), Some("Helm")),
            Citation::new(Some("https://k8s.io"), Some("K8s")),
        ];
        let t = Turn {
            text: compose_reply("Use Helm.", &citations),
            citations,
            ..turn(Author::Assistant, "")
        };
        // "Use Helm.", blank, "Sources:", two entries
        assert_eq!(Message::calculate_height(&t, 80), 5 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn grounded_reply_lists_sources_once() {
        let citations = vec![Citation::new(None, Some("Internal wiki"))];
        let t = Turn {
            text: compose_reply("Ask ops.", &citations),
            citations,
            ..turn(Author::Assistant, "")
        };
        let mut terminal = Terminal::new(TestBackend::new(50, 7)).unwrap();
        terminal
            .draw(|f| f.render_widget(Message::new(&t), f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert_eq!(text.matches("Sources:").count(), 1);
        assert!(text.contains("1. Internal wiki (No valid link)"));
        assert!(!text.contains("**"));
    }

    #[test]
    fn calculate_height_zero_width_returns_minimum() {
        let t = turn(Author::Assistant, "Hello world");
        assert_eq!(Message::calculate_height(&t, 0), 1);
    }

    #[test]
    fn renders_author_and_body() {
        let mut terminal = Terminal::new(TestBackend::new(50, 3)).unwrap();
        let t = turn(Author::Assistant, "Pods look **healthy**");
        terminal
            .draw(|f| f.render_widget(Message::new(&t), f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("AI Assistant"));
        assert!(text.contains("Pods look healthy"));
    }

    #[test]
    fn author_colors() {
        assert_eq!(author_style(Author::User).fg, Some(Color::Cyan));
        assert_eq!(author_style(Author::Assistant).fg, Some(Color::Green));
    }
}
