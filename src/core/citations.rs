//! # Citations
//!
//! Turns the grounding citations of a completion into the `**Sources:**`
//! block appended to an assistant turn.
//!
//! ```text
//! <reply text>
//!
//! **Sources:**
//! 1. [Title](https://example.com)
//! 2. Internal wiki (No valid link)
//! ```

use crate::inference::Citation;

/// True for URIs that may be rendered as clickable links.
pub fn is_linkable(uri: &str) -> bool {
    uri.starts_with("http://") || uri.starts_with("https://")
}

/// Separates the reply from its sources block inside a composed turn.
pub const SOURCES_HEADING: &str = "\n\n**Sources:**\n";

/// Title shown for a citation: its own title, else its URI.
pub fn label(citation: &Citation) -> Option<&str> {
    citation.title.as_deref().or(citation.uri.as_deref())
}

/// The URI of a citation when it may be rendered as a link.
pub fn link(citation: &Citation) -> Option<&str> {
    citation.uri.as_deref().filter(|uri| is_linkable(uri))
}

/// Keeps the citations that have something to show, in order.
pub fn displayable(citations: Vec<Citation>) -> Vec<Citation> {
    citations.into_iter().filter(|c| label(c).is_some()).collect()
}

/// Builds the numbered source list from displayable citations, or None if
/// there are none. A non-http(s) URI keeps its label but loses the link.
pub fn format_sources(citations: &[Citation]) -> Option<String> {
    let lines: Vec<String> = citations
        .iter()
        .filter_map(|c| Some((label(c)?, link(c))))
        .enumerate()
        .map(|(i, (title, uri))| match uri {
            Some(uri) => format!("{}. [{title}]({uri})", i + 1),
            None => format!("{}. {title} (No valid link)", i + 1),
        })
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Composes the final assistant text: the reply verbatim, then the sources
/// block after a blank line when any citation is displayable.
pub fn compose_reply(text: &str, citations: &[Citation]) -> String {
    match format_sources(citations) {
        Some(sources) => format!("{text}{SOURCES_HEADING}{sources}"),
        None => text.to_string(),
    }
}

/// The reply part of a composed text. Text without citations is all reply.
pub fn reply_body<'a>(text: &'a str, citations: &[Citation]) -> &'a str {
    if citations.is_empty() {
        return text;
    }
    text.rsplit_once(SOURCES_HEADING)
        .map_or(text, |(body, _)| body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cite(uri: Option<&str>, title: Option<&str>) -> Citation {
        Citation::new(uri, title)
    }

    #[test]
    fn test_empty_entry_is_dropped() {
        let citations = vec![cite(Some("https://a.com"), Some("A")), cite(Some(""), Some(""))];
        assert_eq!(
            compose_reply("Answer", &citations),
            "Answer\n\n**Sources:**\n1. [A](https://a.com)"
        );
    }

    #[test]
    fn test_title_only_has_no_valid_link() {
        let citations = vec![cite(None, Some("Title"))];
        assert_eq!(format_sources(&citations).unwrap(), "1. Title (No valid link)");
    }

    #[test]
    fn test_uri_only_uses_uri_as_title() {
        let citations = vec![cite(Some("https://b.com/page"), None)];
        assert_eq!(
            format_sources(&citations).unwrap(),
            "1. [https://b.com/page](https://b.com/page)"
        );
    }

    #[test]
    fn test_non_http_scheme_keeps_title_without_link() {
        let citations = vec![cite(Some("mailto:press@label.example"), Some("Press desk"))];
        assert_eq!(
            format_sources(&citations).unwrap(),
            "1. Press desk (No valid link)"
        );

        let bare = vec![cite(Some("ftp://files.example"), None)];
        assert_eq!(
            format_sources(&bare).unwrap(),
            "1. ftp://files.example (No valid link)"
        );
    }

    #[test]
    fn test_numbering_skips_filtered_entries() {
        let citations = vec![
            cite(None, None),
            cite(Some("http://one.example"), Some("One")),
            cite(None, None),
            cite(None, Some("Two")),
        ];
        assert_eq!(
            format_sources(&displayable(citations)).unwrap(),
            "1. [One](http://one.example)\n2. Two (No valid link)"
        );
    }

    #[test]
    fn test_displayable_keeps_order() {
        let kept = displayable(vec![
            cite(None, Some("Two")),
            cite(None, None),
            cite(Some("https://one.example"), None),
        ]);
        assert_eq!(
            kept,
            vec![cite(None, Some("Two")), cite(Some("https://one.example"), None)]
        );
    }

    #[test]
    fn test_reply_body_strips_sources_block() {
        let citations = vec![cite(Some("https://helm.sh"), Some("Helm"))];
        let text = compose_reply("See **Sources:** below", &citations);
        assert_eq!(reply_body(&text, &citations), "See **Sources:** below");
        assert_eq!(reply_body("Plain", &[]), "Plain");
    }

    #[test]
    fn test_no_citations_leaves_text_untouched() {
        assert_eq!(compose_reply("Plain", &[]), "Plain");
        assert_eq!(compose_reply("Plain", &[cite(None, None)]), "Plain");
    }
}
