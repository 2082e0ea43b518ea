//! Height prediction for wrapped text.
//!
//! Scroll views need a canvas height before anything is rendered, so heights
//! are measured with `textwrap` using options that track ratatui's
//! `Paragraph` word wrapping (`Wrap { trim: false }`). The input box wraps
//! its draft with the same options. Row counts saturate at `u16::MAX`.

use ratatui::text::Line;

/// Wrapping that breaks long words and splits on ASCII spaces only.
pub fn options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

fn rows(count: usize) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX)
}

/// Rows a single line occupies at `width`. Empty lines still take one row.
pub fn line_height(line: &Line, width: u16) -> u16 {
    if width == 0 {
        return 1;
    }
    let content: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
    if content.trim().is_empty() {
        return 1;
    }
    rows(textwrap::wrap(&content, options(width)).len()).max(1)
}

/// Per-line heights.
pub fn line_heights(lines: &[Line], width: u16) -> Vec<u16> {
    lines.iter().map(|l| line_height(l, width)).collect()
}

/// Sum of row counts.
pub fn total(heights: &[u16]) -> u16 {
    heights.iter().fold(0u16, |sum, h| sum.saturating_add(*h))
}

pub fn text_height(lines: &[Line], width: u16) -> u16 {
    total(&line_heights(lines, width))
}

/// Rows a raw draft takes, counting the empty row a trailing newline opens
/// even when `textwrap` drops it. Never less than one.
pub fn text_rows(text: &str, width: u16) -> u16 {
    if width == 0 || text.is_empty() {
        return 1;
    }
    let wrapped = textwrap::wrap(text, options(width));
    let trailing = text.ends_with('\n') && !wrapped.last().is_some_and(|l| l.is_empty());
    rows(wrapped.len() + usize::from(trailing)).max(1)
}
