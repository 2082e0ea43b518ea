use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::state::{App, Page};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{PageView, TabBar};
use crate::tui::pages;

const PAGE_KEYS: &str = "↑/↓ select · Enter/Space toggle · PgUp/PgDn scroll · Tab/F1-F5 pages · q quit";
const ASSISTANT_KEYS: &str = "Enter send · Ctrl+J newline · ↑/↓ PgUp/PgDn scroll · Esc dismiss · Tab/F1-F5 pages · Ctrl+C quit";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(1), Min(0), Length(1)]);
    let [tab_area, _gap, body_area, status_area] = layout.areas(frame.area());

    TabBar {
        page: app.page,
        model: &app.chat.settings().model,
        capability: app.chat.capability_state(),
    }
    .render(frame, tab_area);

    let body_area = body_area.inner(Margin::new(1, 0));
    match app.page {
        Page::Assistant => pages::assistant::render(
            frame,
            body_area,
            &app.chat,
            &mut tui.transcript,
            &mut tui.input_box,
            spinner_frame,
        ),
        page => draw_reference_page(frame, body_area, app, tui, page),
    }

    draw_status_line(frame, status_area, app);
}

fn draw_reference_page(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState, page: Page) {
    let cursor = tui.cursor_mut(page);
    let content = pages::build(app, page, cursor.selected);
    let focus = content.focus_line();
    PageView {
        state: &mut cursor.view,
        lines: content.lines,
        focus,
    }
    .render(frame, area);
}

fn draw_status_line(frame: &mut Frame, area: Rect, app: &App) {
    let keys = match app.page {
        Page::Assistant => ASSISTANT_KEYS,
        _ => PAGE_KEYS,
    };
    let line = Line::from(vec![
        Span::styled(format!(" {} ", app.status_message), Style::default().fg(Color::Gray)),
        Span::styled("│ ", Style::default().fg(Color::DarkGray)),
        Span::styled(keys, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
