//! Syntax highlighting for configuration and deployment snippets.
//!
//! Shares one lazily loaded `SyntaxSet`/`ThemeSet` with the markdown renderer.

use std::sync::LazyLock;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

pub(crate) static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const THEME: &str = "base16-ocean.dark";

/// Highlighter for a language token (`yaml`, `sh`, `rust`, ...), if syntect knows it.
pub(crate) fn highlighter_for(token: &str) -> Option<HighlightLines<'static>> {
    let syntax = SYNTAX_SET.find_syntax_by_token(token)?;
    let theme = THEME_SET.themes.get(THEME)?;
    Some(HighlightLines::new(syntax, theme))
}

/// Highlights one line (with its newline) into owned spans.
/// Tabs become four spaces since ratatui renders `\t` as zero-width.
pub(crate) fn highlight_line(hl: &mut HighlightLines<'static>, line: &str) -> Vec<Span<'static>> {
    let Ok(ranges) = hl.highlight_line(line, &SYNTAX_SET) else {
        return vec![Span::raw(line.trim_end_matches('\n').replace('\t', "    "))];
    };
    ranges
        .into_iter()
        .filter_map(|(style, fragment)| {
            let content = fragment.trim_end_matches('\n').replace('\t', "    ");
            if content.is_empty() {
                return None;
            }
            let fg = Color::Rgb(style.foreground.r, style.foreground.g, style.foreground.b);
            Some(Span::styled(content, Style::default().fg(fg)))
        })
        .collect()
}

/// Highlights a whole snippet. Falls back to plain white text for unknown languages.
pub fn highlight(code: &str, token: &str) -> Vec<Line<'static>> {
    let code = code.trim_matches('\n');
    match highlighter_for(token) {
        Some(mut hl) => LinesWithEndings::from(code)
            .map(|line| Line::from(highlight_line(&mut hl, line)))
            .collect(),
        None => code
            .lines()
            .map(|line| Line::styled(line.replace('\t', "    "), Style::default().fg(Color::White)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn yaml_is_highlighted_line_by_line() {
        let lines = highlight("apiVersion: v1\nkind: Secret\n", "yaml");
        assert_eq!(lines.len(), 2);
        assert_eq!(plain(&lines[0]), "apiVersion: v1");
        assert!(lines[0].spans.iter().all(|s| matches!(s.style.fg, Some(Color::Rgb(..)))));
    }

    #[test]
    fn unknown_language_falls_back_to_plain() {
        let lines = highlight("a\tb", "no-such-language");
        assert_eq!(plain(&lines[0]), "a    b");
        assert_eq!(lines[0].style.fg, Some(Color::White));
    }

    #[test]
    fn surrounding_newlines_are_trimmed() {
        let lines = highlight("\nkubectl get pods\n", "sh");
        assert_eq!(lines.len(), 1);
        assert_eq!(plain(&lines[0]), "kubectl get pods");
    }
}
