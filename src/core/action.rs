//! # Actions
//!
//! Everything that can happen in labeldesk becomes an `Action`.
//! User presses Enter on the assistant page? That's `Action::Submit`.
//! API responds? That's `Action::ResponseReceived(outcome)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing any I/O the adapter must
//! perform. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info};

use crate::core::chat::{CapabilityState, PendingRequest};
use crate::core::checklist::ChecklistRow;
use crate::core::state::{App, Page};
use crate::inference::{Completion, ProviderError};

#[derive(Debug)]
pub enum Action {
    NextPage,
    PrevPage,
    GoTo(Page),
    ToggleCard(&'static str),
    TogglePanel(&'static str),
    ChecklistActivate(ChecklistRow),
    /// Send the assistant draft.
    Submit,
    ResponseReceived(Result<Completion, ProviderError>),
    DismissError,
    Quit,
}

/// I/O requested by `update`.
#[derive(Debug)]
pub enum Effect {
    None,
    /// Run the request off the UI thread and feed the outcome back as
    /// `Action::ResponseReceived`.
    Dispatch(PendingRequest),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::NextPage => {
            app.page = app.page.next();
            Effect::None
        }
        Action::PrevPage => {
            app.page = app.page.prev();
            Effect::None
        }
        Action::GoTo(page) => {
            app.page = page;
            Effect::None
        }
        Action::ToggleCard(id) => {
            app.toggle_card(id);
            Effect::None
        }
        Action::TogglePanel(id) => {
            app.toggle_panel(id);
            Effect::None
        }
        Action::ChecklistActivate(row) => {
            app.checklist.activate(row);
            Effect::None
        }
        Action::Submit => match app.chat.submit_draft() {
            Some(pending) => {
                app.status_message = String::from("Thinking...");
                Effect::Dispatch(pending)
            }
            None => Effect::None,
        },
        Action::ResponseReceived(outcome) => {
            if app.chat.complete(outcome).is_some() {
                app.status_message = match app.chat.last_failure() {
                    Some(_) => String::from("Request failed"),
                    None => String::from("Response received"),
                };
            }
            Effect::None
        }
        Action::DismissError => {
            app.chat.dismiss_error();
            Effect::None
        }
        Action::Quit => {
            if app.chat.capability_state() == CapabilityState::Sending {
                info!("Quitting with a request in flight");
            }
            Effect::Quit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chat::Author;
    use crate::test_support::{disabled_app, test_app};

    #[test]
    fn test_page_navigation() {
        let mut app = test_app();
        update(&mut app, Action::NextPage);
        assert_eq!(app.page, Page::Verification);
        update(&mut app, Action::PrevPage);
        update(&mut app, Action::PrevPage);
        assert_eq!(app.page, Page::Assistant);
        update(&mut app, Action::GoTo(Page::Deployment));
        assert_eq!(app.page, Page::Deployment);
    }

    #[test]
    fn test_submit_dispatches_and_response_completes() {
        let mut app = test_app();
        app.chat.draft_mut().push_str("What runs on port 9000?");

        let effect = update(&mut app, Action::Submit);
        assert!(matches!(effect, Effect::Dispatch(_)));
        assert_eq!(app.chat.capability_state(), CapabilityState::Sending);
        assert_eq!(app.status_message, "Thinking...");

        // Submitting again while in flight does nothing
        app.chat.draft_mut().push_str("again");
        assert!(matches!(update(&mut app, Action::Submit), Effect::None));
        assert_eq!(app.chat.current_transcript().len(), 1);

        update(
            &mut app,
            Action::ResponseReceived(Ok(Completion {
                text: "The MCP Server.".to_string(),
                citations: vec![],
            })),
        );
        let transcript = app.chat.current_transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[1].author, Author::Assistant);
        assert_eq!(app.chat.capability_state(), CapabilityState::Ready);
        assert_eq!(app.status_message, "Response received");
    }

    #[test]
    fn test_failed_response_sets_banner_and_dismisses() {
        let mut app = test_app();
        app.chat.draft_mut().push_str("hi");
        update(&mut app, Action::Submit);
        update(
            &mut app,
            Action::ResponseReceived(Err(ProviderError::Network("connection refused".into()))),
        );
        assert_eq!(app.status_message, "Request failed");
        assert!(app.chat.last_error().is_some());

        update(&mut app, Action::DismissError);
        assert!(app.chat.last_error().is_none());
    }

    #[test]
    fn test_submit_when_disabled_is_noop() {
        let mut app = disabled_app();
        app.chat.draft_mut().push_str("hello");
        assert!(matches!(update(&mut app, Action::Submit), Effect::None));
        assert!(app.chat.current_transcript().is_empty());
        assert_eq!(app.chat.draft(), "hello");
    }

    #[test]
    fn test_checklist_and_panels() {
        let mut app = test_app();
        update(&mut app, Action::ChecklistActivate(ChecklistRow::SubStep(0, 0)));
        assert!(app.checklist.is_verified("local-dev", "lc-build"));
        update(&mut app, Action::TogglePanel("config-ingress"));
        assert!(app.is_panel_open("config-ingress"));
        update(&mut app, Action::ToggleCard("mcp-server"));
        assert!(app.is_card_expanded("mcp-server"));
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert!(matches!(update(&mut app, Action::Quit), Effect::Quit));
    }
}
