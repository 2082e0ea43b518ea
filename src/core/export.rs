//! Transcript export.
//!
//! Writes the assistant conversation as a standalone HTML document. Each
//! turn's body goes through `render::renderable_text`, so the file shows the
//! same escaped, lightly formatted markup the web dashboard would.

use std::fmt;
use std::fs;
use std::path::Path;

use log::info;

use crate::core::chat::{Author, Turn};
use crate::core::render::{escape_html, renderable_text};

#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "export I/O error: {e}"),
        }
    }
}

impl std::error::Error for ExportError {}

const STYLE: &str = "body{font-family:sans-serif;max-width:48rem;margin:2rem auto;}\
.turn{padding:.75rem 1rem;margin:.5rem 0;border-radius:.5rem;}\
.user{background:#e0e7ff;margin-left:4rem;}\
.assistant{background:#f3f4f6;margin-right:4rem;}\
.meta{font-size:.75rem;color:#6b7280;}";

fn author_class(author: Author) -> (&'static str, &'static str) {
    match author {
        Author::User => ("user", "You"),
        Author::Assistant => ("assistant", "AI Assistant"),
    }
}

/// Builds the full HTML document for a transcript.
pub fn transcript_html(title: &str, turns: &[Turn]) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\" />\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    html.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n"));
    html.push_str(&format!("<h1>{}</h1>\n", escape_html(title)));

    if turns.is_empty() {
        html.push_str("<p class=\"meta\">No messages.</p>\n");
    }

    for turn in turns {
        let (class, label) = author_class(turn.author);
        html.push_str(&format!(
            "<div class=\"turn {class}\" id=\"turn-{}\">\n<div class=\"meta\">{label} &middot; {}</div>\n<div>{}</div>\n</div>\n",
            turn.id,
            turn.time_label(),
            renderable_text(&turn.text)
        ));
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Writes the transcript to `path`, overwriting any existing file.
pub fn write_transcript(path: &Path, title: &str, turns: &[Turn]) -> Result<(), ExportError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(ExportError::Io)?;
    }
    fs::write(path, transcript_html(title, turns)).map_err(ExportError::Io)?;
    info!("Exported {} turns to {}", turns.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn turn(id: u64, author: Author, text: &str) -> Turn {
        Turn {
            id,
            author,
            text: text.to_string(),
            created_at: Local::now(),
            citations: Vec::new(),
        }
    }

    #[test]
    fn test_empty_transcript() {
        let html = transcript_html("Chat", &[]);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("No messages."));
    }

    #[test]
    fn test_turns_are_rendered_and_escaped() {
        let turns = vec![
            turn(1, Author::User, "<script>alert(1)</script>"),
            turn(
                2,
                Author::Assistant,
                "**Yes.**\n\n**Sources:**\n1. [Docs](https://example.com/docs)",
            ),
        ];
        let html = transcript_html("Chat", &turns);
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("<strong>Yes.</strong>"));
        assert!(html.contains(
            "<a href=\"https://example.com/docs\" target=\"_blank\" rel=\"noopener noreferrer\">Docs</a>"
        ));
        assert!(html.contains("id=\"turn-1\""));
        assert!(html.contains("class=\"turn assistant\""));
    }

    #[test]
    fn test_title_is_escaped() {
        let html = transcript_html("A & B", &[]);
        assert!(html.contains("<title>A &amp; B</title>"));
    }

    #[test]
    fn test_write_transcript_creates_file() {
        let dir = std::env::temp_dir().join(format!("labeldesk-export-{}", std::process::id()));
        let path = dir.join("nested").join("chat.html");
        write_transcript(&path, "Chat", &[turn(1, Author::User, "hello")]).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("hello"));
        fs::remove_dir_all(&dir).ok();
    }
}
