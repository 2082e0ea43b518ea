//! # Assistant Page
//!
//! ```text
//! ┌ transcript (scrolls) ───────────────┐
//! │                                     │
//! ├ error banner (only after a failure) ┤
//! ├ input box (grows to 4 lines) ───────┤
//! └─────────────────────────────────────┘
//! ```
//!
//! When the session is disabled the whole page is replaced by a notice.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::core::chat::{CapabilityState, ChatError, ChatSession};
use crate::tui::component::Component;
use crate::tui::components::input_box::InputBox;
use crate::tui::components::transcript::{Transcript, TranscriptState};

const CREDENTIAL_HELP: &str = "The API key for the AI service is not configured. \
    Please ensure the API_KEY environment variable is set correctly (GEMINI_API_KEY and \
    api_key under [gemini] in ~/.labeldesk/config.toml also work), then restart labeldesk.";
const CLIENT_HELP: &str = "An API key was found but the Gemini client could not be created. \
    Check that the key is valid and that base_url points at the Gemini API, then restart labeldesk.";

fn help_lines(reason: &ChatError) -> Vec<Line<'static>> {
    let help = Style::default().fg(Color::Gray);
    match reason {
        ChatError::InitializationFailed(detail) => vec![
            Line::styled(format!("Details: {detail}"), Style::default().fg(Color::DarkGray)),
            Line::default(),
            Line::styled(CLIENT_HELP, help),
        ],
        _ => vec![Line::styled(CREDENTIAL_HELP, help)],
    }
}

fn render_disabled(frame: &mut Frame, area: Rect, notice: &str, reason: &ChatError) {
    let mut lines = vec![
        Line::styled(
            "AI Assistant Disabled",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Line::default(),
        Line::styled(notice.to_string(), Style::default().fg(Color::White)),
        Line::default(),
    ];
    lines.extend(help_lines(reason));
    let width = area.width.min(72);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + area.height / 4;
    let notice_area = Rect::new(x, y, width, area.height.saturating_sub(y - area.y));
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(paragraph, notice_area);
}

fn banner(message: &str) -> Paragraph<'static> {
    Paragraph::new(Line::from(vec![
        Span::styled(
            " Error: ",
            Style::default().fg(Color::White).bg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {message}"), Style::default().fg(Color::Red)),
        Span::styled("  (Esc to dismiss)", Style::default().fg(Color::DarkGray)),
    ]))
    .wrap(Wrap { trim: true })
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    chat: &ChatSession,
    transcript: &mut TranscriptState,
    input_box: &mut InputBox,
    spinner_frame: usize,
) {
    if let Some(reason) = chat.disabled_reason()
        && let Some(notice) = chat.disabled_notice()
    {
        render_disabled(frame, area, notice, reason);
        return;
    }

    let sending = chat.capability_state() == CapabilityState::Sending;
    let error = chat.last_error();
    let banner_height = match &error {
        Some(message) => {
            let width = area.width.max(1) as usize;
            let len = message.chars().count() + 27;
            len.div_ceil(width).clamp(1, 3) as u16
        }
        None => 0,
    };
    let input_height = InputBox::calculate_height(chat.draft(), area.width);

    let [transcript_area, banner_area, input_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(banner_height),
        Constraint::Length(input_height),
    ])
    .areas(area);

    Transcript {
        state: transcript,
        turns: chat.current_transcript(),
        sending,
        spinner_frame,
    }
    .render(frame, transcript_area);

    if let Some(message) = error {
        frame.render_widget(banner(&message), banner_area);
    }

    input_box
        .view(chat.draft(), sending, spinner_frame)
        .render(frame, input_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::ProviderError;
    use crate::test_support::{ScriptedProvider, disabled_app, settings};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    fn draw(chat: &ChatSession) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        let mut transcript = TranscriptState::new();
        let mut input_box = InputBox::new();
        terminal
            .draw(|f| render(f, f.area(), chat, &mut transcript, &mut input_box, 0))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn disabled_session_shows_notice() {
        let app = disabled_app();
        let screen = draw(&app.chat);
        assert!(screen.contains("AI Assistant Disabled"));
        assert!(screen.contains("API Key is not configured"));
        assert!(screen.contains("API_KEY environment variable"));
        assert!(!screen.contains("Ask about the Digital Record Label System"));
    }

    #[test]
    fn failed_client_shows_its_detail() {
        let chat = ChatSession::initialize(Some("bad key"), settings(), |_| {
            Err(ProviderError::Config("invalid header value".to_string()))
        });
        let screen = draw(&chat);
        assert!(screen.contains("Failed to initialize AI"));
        assert!(screen.contains("Details: config error: invalid header value"));
        assert!(screen.contains("could not be created"));
        assert!(!screen.contains("API_KEY environment variable"));
    }

    #[test]
    fn ready_session_shows_placeholder() {
        let chat = ChatSession::with_provider(Arc::new(ScriptedProvider::new()), settings());
        let screen = draw(&chat);
        assert!(screen.contains("Ask about the Digital Record Label System..."));
        assert!(screen.contains("Enter to send"));
    }

    #[tokio::test]
    async fn failure_shows_banner() {
        let provider = ScriptedProvider::new();
        provider.push(Err(ProviderError::Network("connection refused".into())));
        let mut chat = ChatSession::with_provider(Arc::new(provider), settings());
        chat.send("hello").await;
        let screen = draw(&chat);
        assert!(screen.contains("Error:"));
        assert!(screen.contains("Failed to get response from AI"));
    }
}
