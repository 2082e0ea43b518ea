//! # Pages
//!
//! One module per tab. The four reference pages build a `PageContent`: styled
//! lines plus the selectable targets (cards, panels, checklist rows) in
//! display order. The assistant page lays out its own widgets.

pub mod assistant;
pub mod configuration;
pub mod dashboard;
pub mod deployment;
pub mod verification;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::action::Action;
use crate::core::catalog::Snippet;
use crate::core::checklist::ChecklistRow;
use crate::core::state::{App, Page};
use crate::tui::highlight;

/// Something Enter/Space can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Card(&'static str),
    Panel(&'static str),
    Checklist(ChecklistRow),
}

impl Target {
    pub fn action(self) -> Action {
        match self {
            Target::Card(id) => Action::ToggleCard(id),
            Target::Panel(id) => Action::TogglePanel(id),
            Target::Checklist(row) => Action::ChecklistActivate(row),
        }
    }
}

pub struct PageContent {
    pub lines: Vec<Line<'static>>,
    pub targets: Vec<Target>,
    target_lines: Vec<usize>,
    selected: usize,
}

impl PageContent {
    pub fn new(selected: usize) -> Self {
        Self {
            lines: Vec::new(),
            targets: Vec::new(),
            target_lines: Vec::new(),
            selected,
        }
    }

    pub fn push(&mut self, line: impl Into<Line<'static>>) {
        self.lines.push(line.into());
    }

    pub fn blank(&mut self) {
        self.lines.push(Line::default());
    }

    pub fn heading(&mut self, title: &str) {
        self.push(Line::styled(
            title.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
        self.blank();
    }

    /// Whether the next target pushed will be the selected one.
    pub fn next_is_selected(&self) -> bool {
        self.targets.len() == self.selected
    }

    /// Pushes a selectable line, prefixed with the selection marker.
    pub fn target(&mut self, target: Target, line: Line<'static>) {
        let selected = self.next_is_selected();
        let marker = if selected {
            Span::styled("▶ ", Style::default().fg(Color::Yellow))
        } else {
            Span::raw("  ")
        };
        let mut line = line;
        line.spans.insert(0, marker);
        if selected {
            line = line.patch_style(Style::default().add_modifier(Modifier::BOLD));
        }
        self.target_lines.push(self.lines.len());
        self.targets.push(target);
        self.lines.push(line);
    }

    /// Line index of the selected target.
    pub fn focus_line(&self) -> Option<usize> {
        self.target_lines.get(self.selected).copied()
    }

    /// Boxed call-out at the bottom of a page (`Note:` / `Tip:`).
    pub fn callout(&mut self, label: &str, text: &str, color: Color) {
        self.blank();
        self.push(Line::from(vec![
            Span::styled(
                format!("{label}: "),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(text.to_string(), Style::default().fg(color)),
        ]));
    }

    /// Collapsible snippet: a header target, and the highlighted body when open.
    pub fn snippet(&mut self, snippet: &Snippet, open: bool) {
        let chevron = if open { "▾ " } else { "▸ " };
        self.target(
            Target::Panel(snippet.id),
            Line::from(vec![
                Span::styled(chevron, Style::default().fg(Color::DarkGray)),
                Span::styled(snippet.title, Style::default().fg(Color::LightMagenta)),
            ]),
        );
        if open {
            let gutter = Span::styled("    │ ", Style::default().fg(Color::DarkGray));
            for mut line in highlight::highlight(snippet.body, snippet.language.extension()) {
                line.spans.insert(0, gutter.clone());
                self.lines.push(line);
            }
        }
        self.blank();
    }
}

/// Builds one of the four reference pages. The assistant page has no content here.
pub fn build(app: &App, page: Page, selected: usize) -> PageContent {
    match page {
        Page::Dashboard => dashboard::build(app, selected),
        Page::Verification => verification::build(app, selected),
        Page::Configuration => configuration::build(app, selected),
        Page::Deployment => deployment::build(app, selected),
        Page::Assistant => PageContent::new(selected),
    }
}

#[cfg(test)]
pub(crate) fn plain(content: &PageContent) -> Vec<String> {
    content
        .lines
        .iter()
        .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
        .collect()
}
