//! Terminal rendering of transcript turns.
//!
//! Reply bodies are markdown parsed with `pulldown_cmark`. Gemini answers stay
//! inside a small subset (emphasis, inline code, fenced snippets, lists, links),
//! so anything else degrades to its plain text. Grounding sources are drawn
//! from the turn's citations, not from the markdown.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::core::chat::Turn;
use crate::core::citations::{label, link};
use crate::inference::Citation;
use crate::tui::highlight::highlight;

const LINK: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED);
const MUTED: Style = Style::new().fg(Color::DarkGray);
const INLINE_CODE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);
/// Same gutter the reference pages put in front of snippets.
const CODE_GUTTER: &str = "  │ ";

/// A turn's body followed by its numbered sources, if any.
pub fn render_turn(turn: &Turn, base_fg: Color) -> Text<'static> {
    let mut text = render(turn.body().trim(), base_fg);
    if !turn.citations.is_empty() {
        if !text.lines.is_empty() {
            text.lines.push(Line::default());
        }
        text.lines.extend(sources(&turn.citations, base_fg));
    }
    text
}

/// `Sources:` and one numbered line per citation. Linkable entries show the
/// title underlined with the URI after it.
pub fn sources(citations: &[Citation], base_fg: Color) -> Vec<Line<'static>> {
    let heading = Line::styled("Sources:", Style::new().fg(base_fg).add_modifier(Modifier::BOLD));
    let entries = citations
        .iter()
        .filter_map(|c| Some((label(c)?, link(c))))
        .enumerate()
        .map(|(i, (title, uri))| {
            let number = Span::styled(format!("{}. ", i + 1), MUTED);
            match uri {
                Some(uri) => Line::from(vec![
                    number,
                    Span::styled(title.to_string(), LINK),
                    Span::raw(" ("),
                    Span::styled(uri.to_string(), LINK),
                    Span::raw(")"),
                ]),
                None => Line::from(vec![
                    number,
                    Span::styled(title.to_string(), Style::new().fg(base_fg)),
                    Span::styled(" (No valid link)", MUTED),
                ]),
            }
        });
    std::iter::once(heading).chain(entries).collect()
}

/// Renders markdown with `base_fg` for plain prose.
pub fn render(markdown: &str, base_fg: Color) -> Text<'static> {
    let mut renderer = Renderer::new(base_fg);
    for event in Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH) {
        renderer.event(event);
    }
    renderer.finish()
}

struct Renderer {
    base: Style,
    lines: Vec<Line<'static>>,
    /// Spans of the line being built.
    pending: Vec<Span<'static>>,
    /// Open inline modifiers, innermost last.
    modifiers: Vec<Modifier>,
    /// One entry per open list, holding the next number of ordered lists.
    lists: Vec<Option<u64>>,
    /// Language token and collected source of the open code block.
    code: Option<(String, String)>,
    /// Destination of the open link.
    link: Option<String>,
    /// A block just ended; the next one starts after a blank line.
    gap: bool,
}

impl Renderer {
    fn new(base_fg: Color) -> Self {
        Self {
            base: Style::new().fg(base_fg),
            lines: Vec::new(),
            pending: Vec::new(),
            modifiers: Vec::new(),
            lists: Vec::new(),
            code: None,
            link: None,
            gap: false,
        }
    }

    fn finish(mut self) -> Text<'static> {
        self.flush();
        Text::from(self.lines)
    }

    fn style(&self) -> Style {
        let style = self
            .modifiers
            .iter()
            .fold(self.base, |style, m| style.add_modifier(*m));
        if self.link.is_some() {
            style.patch(LINK)
        } else {
            style
        }
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.pending)));
        }
    }

    fn start_block(&mut self) {
        self.flush();
        if self.gap && !self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        self.gap = false;
    }

    fn end_block(&mut self) {
        self.flush();
        self.gap = true;
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.pending.push(Span::styled(code.into_string(), INLINE_CODE)),
            Event::SoftBreak => self.pending.push(Span::raw(" ")),
            Event::HardBreak => self.flush(),
            // Shown as typed, never interpreted
            Event::InlineHtml(html) => {
                let style = self.style();
                self.pending.push(Span::styled(html.into_string(), style));
            }
            Event::Html(html) => {
                self.pending
                    .push(Span::styled(html.trim_end_matches('\n').to_string(), self.base));
                self.flush();
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph if self.lists.is_empty() => self.start_block(),
            Tag::HtmlBlock => self.start_block(),
            Tag::Heading { .. } => {
                self.start_block();
                self.modifiers.push(Modifier::BOLD);
            }
            Tag::CodeBlock(kind) => {
                self.start_block();
                let lang = match kind {
                    CodeBlockKind::Fenced(lang) => lang.into_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                self.code = Some((lang, String::new()));
            }
            Tag::List(first) => {
                if self.lists.is_empty() {
                    self.start_block();
                } else {
                    self.flush();
                }
                self.lists.push(first);
            }
            Tag::Item => {
                self.flush();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        *n += 1;
                        format!("{indent}{}. ", *n - 1)
                    }
                    _ => format!("{indent}- "),
                };
                self.pending.push(Span::styled(marker, MUTED));
            }
            Tag::Emphasis => self.modifiers.push(Modifier::ITALIC),
            Tag::Strong => self.modifiers.push(Modifier::BOLD),
            Tag::Strikethrough => self.modifiers.push(Modifier::CROSSED_OUT),
            Tag::Link { dest_url, .. } => self.link = Some(dest_url.into_string()),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph if self.lists.is_empty() => self.end_block(),
            TagEnd::Paragraph | TagEnd::Item => self.flush(),
            TagEnd::HtmlBlock => self.end_block(),
            TagEnd::Heading(_) => {
                self.modifiers.pop();
                self.end_block();
            }
            TagEnd::CodeBlock => {
                if let Some((lang, source)) = self.code.take() {
                    for line in highlight(&source, &lang) {
                        let mut spans = vec![Span::styled(CODE_GUTTER, MUTED)];
                        spans.extend(line.spans);
                        self.lines.push(Line::from(spans));
                    }
                }
                self.end_block();
            }
            TagEnd::List(_) => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.end_block();
                }
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.modifiers.pop();
            }
            TagEnd::Link => {
                let Some(url) = self.link.take() else { return };
                // Autolinks already show their URL
                if self.pending.last().is_some_and(|s| s.content == url) {
                    return;
                }
                self.pending.push(Span::raw(" ("));
                self.pending.push(Span::styled(url, LINK));
                self.pending.push(Span::raw(")"));
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some((_, source)) = self.code.as_mut() {
            source.push_str(text);
            return;
        }
        let style = self.style();
        self.pending.push(Span::styled(text.replace('\t', "    "), style));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chat::Author;
    use crate::core::citations::compose_reply;
    use chrono::Local;

    fn plain_lines(text: &Text) -> Vec<String> {
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect()
    }

    fn span<'a>(text: &'a Text<'static>, content: &str) -> &'a Span<'static> {
        text.lines
            .iter()
            .flat_map(|l| l.spans.iter())
            .find(|s| s.content == content)
            .unwrap()
    }

    fn grounded_turn(reply: &str, citations: Vec<Citation>) -> Turn {
        Turn {
            id: 2,
            author: Author::Assistant,
            text: compose_reply(reply, &citations),
            created_at: Local::now(),
            citations,
        }
    }

    #[test]
    fn heading_is_bold_in_base_color() {
        let text = render("## Orchestrator", Color::Blue);
        assert_eq!(plain_lines(&text), vec!["Orchestrator"]);
        let heading = span(&text, "Orchestrator");
        assert!(heading.style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(heading.style.fg, Some(Color::Blue));
    }

    #[test]
    fn nested_emphasis_composes() {
        let text = render("Check the ***MCP Server*** logs", Color::Blue);
        let style = span(&text, "MCP Server").style;
        assert!(style.add_modifier.contains(Modifier::BOLD | Modifier::ITALIC));
        assert!(span(&text, " logs").style.add_modifier.is_empty());
    }

    #[test]
    fn inline_code_styled() {
        let text = render("Run `kubectl get pods` first", Color::Blue);
        let code = span(&text, "kubectl get pods");
        assert_eq!(code.style.fg, Some(Color::White));
        assert_eq!(code.style.bg, Some(Color::DarkGray));
    }

    #[test]
    fn code_block_sits_behind_gutter() {
        let text = render("Apply this:\n\n```yaml\nkind: Secret\ntype: Opaque\n```\n\nThen restart.", Color::Blue);
        assert_eq!(
            plain_lines(&text),
            vec![
                "Apply this:",
                "",
                "  │ kind: Secret",
                "  │ type: Opaque",
                "",
                "Then restart.",
            ]
        );
    }

    #[test]
    fn lists_number_and_nest() {
        let text = render("1. Build\n2. Push\n   - tag latest\n3. Deploy", Color::Blue);
        assert_eq!(
            plain_lines(&text),
            vec!["1. Build", "2. Push", "  - tag latest", "3. Deploy"]
        );
    }

    #[test]
    fn links_show_destination() {
        let text = render("See [the chart](https://helm.sh) or <https://k8s.io>.", Color::Blue);
        assert_eq!(
            plain_lines(&text),
            vec!["See the chart (https://helm.sh) or https://k8s.io."]
        );
        assert!(span(&text, "the chart").style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn raw_html_is_not_interpreted() {
        let text = render("a <b>tag</b> here", Color::Green);
        assert_eq!(plain_lines(&text), vec!["a <b>tag</b> here"]);
    }

    #[test]
    fn tabs_expanded_to_spaces() {
        let text = render("```\n\tindented\n```", Color::Blue);
        assert_eq!(plain_lines(&text), vec!["  │     indented"]);
    }

    #[test]
    fn turn_sources_come_from_citations() {
        let turn = grounded_turn(
            "Use Helm.",
            vec![
                Citation::new(Some("https://helm.sh/docs"), Some("Helm Docs")),
                Citation::new(Some("gs://bucket/runbook"), Some("Runbook")),
            ],
        );
        let text = render_turn(&turn, Color::Gray);
        assert_eq!(
            plain_lines(&text),
            vec![
                "Use Helm.",
                "",
                "Sources:",
                "1. Helm Docs (https://helm.sh/docs)",
                "2. Runbook (No valid link)",
            ]
        );
        assert_eq!(span(&text, "Helm Docs").style, LINK);
        assert_eq!(span(&text, "Runbook").style.fg, Some(Color::Gray));
    }

    #[test]
    fn turn_without_citations_is_just_markdown() {
        let turn = grounded_turn("**Sources:** none needed", Vec::new());
        assert_eq!(plain_lines(&render_turn(&turn, Color::Gray)), vec!["Sources: none needed"]);
    }
}
