//! System overview: one card per component.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::catalog::{ComponentStatus, SYSTEM_COMPONENTS, SystemComponent};
use crate::core::state::App;
use crate::tui::pages::{PageContent, Target};

const INDENT: &str = "    ";

pub fn status_color(status: ComponentStatus) -> Color {
    match status {
        ComponentStatus::Running => Color::Green,
        ComponentStatus::Stopped => Color::Red,
        ComponentStatus::Error => Color::Yellow,
        ComponentStatus::Building => Color::Blue,
        ComponentStatus::Pending => Color::LightBlue,
        ComponentStatus::NotDeployed => Color::Gray,
        ComponentStatus::Unknown => Color::DarkGray,
    }
}

fn badge(status: ComponentStatus) -> Span<'static> {
    Span::styled(
        format!(" {} ", status.label()),
        Style::default().fg(Color::Black).bg(status_color(status)),
    )
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::raw(INDENT),
        Span::styled(format!("{label} "), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(Color::Gray)),
    ])
}

fn details(content: &mut PageContent, component: &SystemComponent) {
    if let Some(port) = component.port {
        content.push(field("Port:", port.to_string()));
    }
    if let Some(path) = component.path {
        content.push(field("Path:", path.to_string()));
    }
    if let Some(dockerfile) = component.dockerfile {
        content.push(field("Dockerfile:", dockerfile.to_string()));
    }
    if !component.related_files.is_empty() {
        content.push(field("Related Files:", String::new()));
        for file in component.related_files {
            content.push(Line::styled(
                format!("{INDENT}  - {file}"),
                Style::default().fg(Color::Gray),
            ));
        }
    }
    if !component.agents.is_empty() {
        content.push(field("Individual Agents:", String::new()));
        for agent in component.agents {
            content.push(Line::from(vec![
                Span::raw(format!("{INDENT}  ")),
                Span::styled(agent.name, Style::default().fg(Color::White)),
                Span::raw(" "),
                Span::styled(agent.status.label(), Style::default().fg(status_color(agent.status))),
            ]));
            content.push(Line::styled(
                format!("{INDENT}    {}", agent.description),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }
}

pub fn build(app: &App, selected: usize) -> PageContent {
    let mut content = PageContent::new(selected);
    content.heading("System Overview");

    for component in SYSTEM_COMPONENTS {
        content.target(
            Target::Card(component.id),
            Line::from(vec![
                Span::styled(
                    component.name,
                    Style::default().fg(Color::LightMagenta).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                badge(component.status),
            ]),
        );
        content.push(Line::styled(
            format!("{INDENT}{}", component.kind.label()),
            Style::default().fg(Color::DarkGray),
        ));
        content.push(Line::styled(
            format!("{INDENT}{}", component.description),
            Style::default().fg(Color::Gray),
        ));

        if component.has_details() {
            let expanded = app.is_card_expanded(component.id);
            let toggle = if expanded { "▾ Show Less" } else { "▸ Show More Details" };
            content.push(Line::styled(
                format!("{INDENT}{toggle}"),
                Style::default().fg(Color::Cyan),
            ));
            if expanded {
                details(&mut content, component);
            }
        }
        content.blank();
    }
    content
}
