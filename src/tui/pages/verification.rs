//! Manual verification checklist. Category headers collapse, sub-steps check off.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::catalog::VERIFICATION_STEPS;
use crate::core::checklist::ChecklistRow;
use crate::core::state::App;
use crate::tui::pages::{PageContent, Target};

pub fn build(app: &App, selected: usize) -> PageContent {
    let mut content = PageContent::new(selected);
    content.heading("System Verification Checklist");

    let checklist = &app.checklist;
    for (step_index, step) in VERIFICATION_STEPS.iter().enumerate() {
        let expanded = checklist.is_expanded(step.id);
        let (done, total) = checklist.progress(step);
        let progress_color = if done == total { Color::Green } else { Color::DarkGray };

        content.target(
            Target::Checklist(ChecklistRow::Category(step_index)),
            Line::from(vec![
                Span::styled(
                    if expanded { "▾ " } else { "▸ " },
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    step.title,
                    Style::default().fg(Color::LightMagenta).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {done}/{total}"), Style::default().fg(progress_color)),
            ]),
        );
        content.push(Line::styled(
            format!("    {} · {}", step.category.label(), step.details),
            Style::default().fg(Color::Gray),
        ));

        if expanded {
            for (sub_index, sub) in step.sub_steps.iter().enumerate() {
                let verified = checklist.is_verified(step.id, sub.id);
                let (mark, style) = if verified {
                    (
                        "[x] ",
                        Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT),
                    )
                } else {
                    ("[ ] ", Style::default().fg(Color::White))
                };
                content.target(
                    Target::Checklist(ChecklistRow::SubStep(step_index, sub_index)),
                    Line::from(vec![
                        Span::raw("    "),
                        Span::styled(mark, Style::default().fg(Color::Green)),
                        Span::styled(sub.text, style),
                    ]),
                );
                if let Some(command) = sub.status_command {
                    content.push(Line::styled(
                        format!("          e.g., {command}"),
                        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                    ));
                }
            }
        }
        content.blank();
    }
    content
}
