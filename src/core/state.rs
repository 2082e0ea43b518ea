//! # Application State
//!
//! Core business state for labeldesk. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── page: Page                         // which page is showing
//! ├── chat: ChatSession                  // assistant transcript + capability
//! ├── checklist: Checklist               // verification progress
//! ├── expanded_cards: HashSet            // dashboard cards showing details
//! ├── open_panels: HashSet               // snippet panels currently open
//! └── status_message: String             // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::collections::HashSet;

use clap::ValueEnum;

use crate::core::catalog::{self, SYSTEM_COMPONENTS};
use crate::core::chat::ChatSession;
use crate::core::checklist::Checklist;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum Page {
    #[default]
    Dashboard,
    Verification,
    Configuration,
    Deployment,
    Assistant,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Dashboard,
        Page::Verification,
        Page::Configuration,
        Page::Deployment,
        Page::Assistant,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Verification => "Verification",
            Page::Configuration => "Configuration",
            Page::Deployment => "Deployment",
            Page::Assistant => "AI Assistant",
        }
    }

    fn index(self) -> usize {
        Page::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    /// Cycles to the next page (wraps around)
    pub fn next(self) -> Page {
        Page::ALL[(self.index() + 1) % Page::ALL.len()]
    }

    pub fn prev(self) -> Page {
        Page::ALL[(self.index() + Page::ALL.len() - 1) % Page::ALL.len()]
    }
}

pub struct App {
    pub page: Page,
    pub chat: ChatSession,
    pub checklist: Checklist,
    pub expanded_cards: HashSet<&'static str>,
    pub open_panels: HashSet<&'static str>,
    pub status_message: String,
}

impl App {
    pub fn new(chat: ChatSession) -> Self {
        let open_panels = catalog::configuration_snippets()
            .into_iter()
            .chain(catalog::deployment_snippets())
            .filter(|s| s.open_by_default)
            .map(|s| s.id)
            .collect();

        Self {
            page: Page::default(),
            chat,
            checklist: Checklist::new(),
            expanded_cards: HashSet::new(),
            open_panels,
            status_message: String::from("Welcome to labeldesk!"),
        }
    }

    /// Expands or collapses a dashboard card. Cards without details stay closed.
    pub fn toggle_card(&mut self, id: &str) {
        let Some(component) = SYSTEM_COMPONENTS.iter().find(|c| c.id == id) else {
            return;
        };
        if !component.has_details() {
            return;
        }
        if !self.expanded_cards.remove(component.id) {
            self.expanded_cards.insert(component.id);
        }
    }

    pub fn is_card_expanded(&self, id: &str) -> bool {
        self.expanded_cards.contains(id)
    }

    pub fn toggle_panel(&mut self, id: &'static str) {
        if !self.open_panels.remove(id) {
            self.open_panels.insert(id);
        }
    }

    pub fn is_panel_open(&self, id: &str) -> bool {
        self.open_panels.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.page, Page::Dashboard);
        assert_eq!(app.status_message, "Welcome to labeldesk!");
        assert!(app.is_panel_open("config-configmap"));
        assert!(app.is_panel_open("deploy-orchestrator"));
        assert!(!app.is_panel_open("config-secret"));
        assert!(app.expanded_cards.is_empty());
    }

    #[test]
    fn test_page_cycle_wraps() {
        assert_eq!(Page::Dashboard.next(), Page::Verification);
        assert_eq!(Page::Assistant.next(), Page::Dashboard);
        assert_eq!(Page::Dashboard.prev(), Page::Assistant);
        for page in Page::ALL {
            assert_eq!(page.next().prev(), page);
        }
    }

    #[test]
    fn test_toggle_card() {
        let mut app = test_app();
        app.toggle_card("orchestrator");
        assert!(app.is_card_expanded("orchestrator"));
        app.toggle_card("orchestrator");
        assert!(!app.is_card_expanded("orchestrator"));
        app.toggle_card("no-such-card");
        assert!(app.expanded_cards.is_empty());
    }

    #[test]
    fn test_toggle_panel() {
        let mut app = test_app();
        app.toggle_panel("config-secret");
        assert!(app.is_panel_open("config-secret"));
        app.toggle_panel("config-configmap");
        assert!(!app.is_panel_open("config-configmap"));
    }
}
