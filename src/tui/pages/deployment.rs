//! Deployment guide: common commands and the orchestrator snippet.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;

use crate::core::catalog::{self, Command, DEPLOYMENT_TIP, DOCKER_COMPOSE_COMMANDS, KUBERNETES_COMMANDS};
use crate::core::state::App;
use crate::tui::pages::PageContent;

fn commands(content: &mut PageContent, title: &str, commands: &[Command]) {
    content.push(Line::styled(
        title.to_string(),
        Style::default().fg(Color::LightMagenta).add_modifier(Modifier::BOLD),
    ));
    for command in commands {
        content.push(Line::styled(
            format!("  $ {}", command.command),
            Style::default().fg(Color::Green),
        ));
        content.push(Line::styled(
            format!("    {}", command.description),
            Style::default().fg(Color::Gray),
        ));
    }
    content.blank();
}

pub fn build(app: &App, selected: usize) -> PageContent {
    let mut content = PageContent::new(selected);
    content.heading("Deployment Guide & Snippets");
    commands(&mut content, "Docker Compose Commands", DOCKER_COMPOSE_COMMANDS);
    commands(&mut content, "Kubernetes (kubectl) Commands", KUBERNETES_COMMANDS);
    for snippet in catalog::deployment_snippets() {
        content.snippet(&snippet, app.is_panel_open(snippet.id));
    }
    content.callout("Tip", DEPLOYMENT_TIP, Color::Cyan);
    content
}
