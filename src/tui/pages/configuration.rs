//! Reference configuration files, each in a collapsible panel.

use ratatui::style::Color;

use crate::core::catalog::{self, CONFIGURATION_NOTE};
use crate::core::state::App;
use crate::tui::pages::PageContent;

pub fn build(app: &App, selected: usize) -> PageContent {
    let mut content = PageContent::new(selected);
    content.heading("System Configuration Files");
    for snippet in catalog::configuration_snippets() {
        content.snippet(&snippet, app.is_panel_open(snippet.id));
    }
    content.callout("Note", CONFIGURATION_NOTE, Color::Yellow);
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::pages::{Target, plain};
    use crate::test_support::test_app;

    #[test]
    fn one_panel_per_snippet() {
        let app = test_app();
        let content = build(&app, 0);
        let ids: Vec<Target> = catalog::configuration_snippets()
            .iter()
            .map(|s| Target::Panel(s.id))
            .collect();
        assert_eq!(content.targets, ids);
    }

    #[test]
    fn only_open_panels_show_bodies() {
        let mut app = test_app();
        let lines = plain(&build(&app, 0));
        assert!(lines.iter().any(|l| l.contains("API_TIMEOUT")));
        assert!(!lines.iter().any(|l| l.contains("kind: Secret")));

        app.toggle_panel("config-secret");
        let lines = plain(&build(&app, 0));
        assert!(lines.iter().any(|l| l.contains("kind: Secret")));
    }

    #[test]
    fn ends_with_note() {
        let app = test_app();
        let lines = plain(&build(&app, 0));
        assert!(lines.last().unwrap().starts_with("Note: "));
    }
}
