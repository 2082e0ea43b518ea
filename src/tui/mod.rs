//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Key Routing
//!
//! Page switching (Tab, Shift+Tab, F1-F5) and Ctrl+C work everywhere. On the
//! reference pages Up/Down move the selection and Enter/Space toggle it. On
//! the assistant page keys edit the draft, Up/Down scroll the transcript and
//! Esc dismisses the error banner.
//!
//! ## Redraw Strategy
//!
//! - **Sending**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
pub mod highlight;
pub mod markdown;
mod pages;
mod ui;
mod wrap;

use log::{debug, info, warn};
use std::collections::HashMap;
use std::io::stdout;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::chat::{CapabilityState, PendingRequest};
use crate::core::state::{App, Page};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, PageViewState, TranscriptState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Selection and scroll position of one reference page.
#[derive(Default)]
pub struct PageCursor {
    pub selected: usize,
    pub view: PageViewState,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub input_box: InputBox,
    pub transcript: TranscriptState,
    pages: HashMap<Page, PageCursor>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            input_box: InputBox::new(),
            transcript: TranscriptState::new(),
            pages: HashMap::new(),
        }
    }

    pub fn cursor_mut(&mut self, page: Page) -> &mut PageCursor {
        self.pages.entry(page).or_default()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty protocol is harmlessly ignored by terminals that don't support it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Runs the dashboard until the user quits. Returns the final state so the
/// caller can export the transcript.
pub fn run(mut app: App) -> std::io::Result<App> {
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        let animating = app.chat.capability_state() == CapabilityState::Sending;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Drain every pending event before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let effect = handle_event(&mut app, &mut tui, event);
            if apply_effect(effect, &tx) {
                break 'main;
            }
        }

        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if apply_effect(effect, &tx) {
                break 'main;
            }
        }
    }

    ratatui::restore();
    Ok(app)
}

/// Performs an effect. Returns true when the loop should exit.
fn apply_effect(effect: Effect, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => false,
        Effect::Dispatch(pending) => {
            spawn_request(pending, tx.clone());
            false
        }
        Effect::Quit => true,
    }
}

fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    match event {
        TuiEvent::Resize => Effect::None,
        TuiEvent::ForceQuit => update(app, Action::Quit),
        TuiEvent::NextPage => update(app, Action::NextPage),
        TuiEvent::PrevPage => update(app, Action::PrevPage),
        TuiEvent::GoTo(page) => update(app, Action::GoTo(page)),
        event if app.page == Page::Assistant => handle_assistant_event(app, tui, event),
        event => handle_page_event(app, tui, event),
    }
}

fn handle_assistant_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    match event {
        TuiEvent::CursorUp
        | TuiEvent::CursorDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.transcript.handle_event(&event);
            Effect::None
        }
        TuiEvent::Escape if app.chat.last_failure().is_some() => update(app, Action::DismissError),
        _ => {
            let locked = match app.chat.capability_state() {
                CapabilityState::Disabled => return Effect::None,
                CapabilityState::Sending => true,
                CapabilityState::Ready => false,
            };
            match tui.input_box.handle_edit(app.chat.draft_mut(), &event, locked) {
                Some(InputEvent::Submit) => {
                    tui.transcript.stick_to_bottom = true;
                    update(app, Action::Submit)
                }
                Some(InputEvent::ContentChanged) | None => Effect::None,
            }
        }
    }
}

fn handle_page_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    let page = app.page;
    let target_count = pages::build(app, page, 0).targets.len();
    let cursor = tui.cursor_mut(page);

    match event {
        TuiEvent::CursorUp => {
            cursor.selected = cursor.selected.saturating_sub(1);
            cursor.view.follow_focus = true;
            Effect::None
        }
        TuiEvent::CursorDown => {
            if cursor.selected + 1 < target_count {
                cursor.selected += 1;
            }
            cursor.view.follow_focus = true;
            Effect::None
        }
        TuiEvent::ScrollPageUp | TuiEvent::ScrollPageDown => {
            cursor.view.handle_event(&event);
            Effect::None
        }
        TuiEvent::Submit | TuiEvent::InputChar(' ') => {
            let selected = cursor.selected;
            let Some(target) = pages::build(app, page, selected).targets.get(selected).copied()
            else {
                return Effect::None;
            };
            let effect = update(app, target.action());

            // Collapsing a checklist category can shrink the row list
            let remaining = pages::build(app, page, 0).targets.len();
            let cursor = tui.cursor_mut(page);
            cursor.selected = cursor.selected.min(remaining.saturating_sub(1));
            cursor.view.follow_focus = true;
            effect
        }
        TuiEvent::InputChar('q') => update(app, Action::Quit),
        _ => Effect::None,
    }
}

fn spawn_request(pending: PendingRequest, tx: mpsc::Sender<Action>) {
    info!("Spawning chat request: {:?}", pending);
    tokio::spawn(async move {
        let outcome = pending.dispatch().await;
        if let Err(e) = &outcome {
            warn!("Chat request failed: {}", e);
        }
        if tx.send(Action::ResponseReceived(outcome)).is_err() {
            warn!("Failed to send chat response: receiver dropped");
        }
    });
}
