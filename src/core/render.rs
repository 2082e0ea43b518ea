//! Markdown-lite → HTML fragment renderer for turn text.
//!
//! The transform is an ordered pipeline of pure text stages:
//!
//! ```text
//! escape → bold → italic → link → fenced code → inline code → line breaks
//! ```
//!
//! Escaping runs first so that any markup in the input reaches the later
//! stages as inert entities; the generated tags are never escaped. Bold runs
//! before italic so `**x**` is not consumed as two empty `*` spans. Line breaks
//! run last so fenced code bodies keep their newlines until every other stage
//! has matched.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\((https?://[^\s)]+)\)").unwrap());
static FENCED_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").unwrap());
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// One named text transform.
pub struct Stage {
    pub name: &'static str,
    pub apply: fn(&str) -> Cow<'_, str>,
}

/// The pipeline, in the order it must run.
pub const STAGES: &[Stage] = &[
    Stage { name: "escape", apply: escape_html },
    Stage { name: "bold", apply: bold },
    Stage { name: "italic", apply: italic },
    Stage { name: "link", apply: link },
    Stage { name: "fenced_code", apply: fenced_code },
    Stage { name: "inline_code", apply: inline_code },
    Stage { name: "line_breaks", apply: line_breaks },
];

/// Renders turn text into a display-safe HTML fragment.
pub fn renderable_text(text: &str) -> String {
    STAGES
        .iter()
        .fold(text.to_string(), |acc, stage| (stage.apply)(&acc).into_owned())
}

/// Escapes the five HTML metacharacters.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

fn bold(text: &str) -> Cow<'_, str> {
    BOLD.replace_all(text, "<strong>$1</strong>")
}

fn italic(text: &str) -> Cow<'_, str> {
    ITALIC.replace_all(text, "<em>$1</em>")
}

fn link(text: &str) -> Cow<'_, str> {
    LINK.replace_all(
        text,
        r#"<a href="$2" target="_blank" rel="noopener noreferrer">$1</a>"#,
    )
}

fn fenced_code(text: &str) -> Cow<'_, str> {
    FENCED_CODE.replace_all(text, "<pre><code>$1</code></pre>")
}

fn inline_code(text: &str) -> Cow<'_, str> {
    INLINE_CODE.replace_all(text, "<code>$1</code>")
}

fn line_breaks(text: &str) -> Cow<'_, str> {
    if text.contains('\n') {
        Cow::Owned(text.replace('\n', "<br />"))
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order() {
        let names: Vec<&str> = STAGES.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            [
                "escape",
                "bold",
                "italic",
                "link",
                "fenced_code",
                "inline_code",
                "line_breaks"
            ]
        );
    }

    #[test]
    fn test_escaped_markup_is_not_reinterpreted() {
        assert_eq!(
            renderable_text("<b>hi</b> **bold**"),
            "&lt;b&gt;hi&lt;/b&gt; <strong>bold</strong>"
        );
    }

    #[test]
    fn test_escape_all_five_metacharacters() {
        assert_eq!(escape_html(r#"& < > " '"#), "&amp; &lt; &gt; &quot; &#039;");
        assert!(matches!(escape_html("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_bold_before_italic() {
        assert_eq!(
            renderable_text("**strong** and *soft*"),
            "<strong>strong</strong> and <em>soft</em>"
        );
    }

    #[test]
    fn test_link_only_for_http_urls() {
        assert_eq!(
            renderable_text("[Docs](https://k8s.io/docs)"),
            r#"<a href="https://k8s.io/docs" target="_blank" rel="noopener noreferrer">Docs</a>"#
        );
        assert_eq!(renderable_text("[x](javascript:alert(1))"), "[x](javascript:alert(1))");
    }

    #[test]
    fn test_quote_in_url_cannot_break_attribute() {
        let out = renderable_text(r#"[a](https://x.com/"onmouseover="y)"#);
        assert!(!out.contains(r#""onmouseover""#));
        assert!(out.contains("&quot;onmouseover=&quot;"));
    }

    #[test]
    fn test_fenced_code_keeps_inner_lines_as_breaks() {
        assert_eq!(
            renderable_text("```\nkubectl get pods\n```"),
            "<pre><code><br />kubectl get pods<br /></code></pre>"
        );
    }

    #[test]
    fn test_inline_code_and_escaped_angle_brackets() {
        assert_eq!(
            renderable_text("run `kubectl logs <pod>`"),
            "run <code>kubectl logs &lt;pod&gt;</code>"
        );
    }

    #[test]
    fn test_newlines_become_breaks() {
        assert_eq!(renderable_text("one\ntwo"), "one<br />two");
    }

    #[test]
    fn test_sources_block_renders() {
        let text = "Answer\n\n**Sources:**\n1. [A](https://a.com)";
        assert_eq!(
            renderable_text(text),
            "Answer<br /><br /><strong>Sources:</strong><br />1. <a href=\"https://a.com\" target=\"_blank\" rel=\"noopener noreferrer\">A</a>"
        );
    }
}
