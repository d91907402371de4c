//! Plain-text issue tables for `jt list`.
//!
//! Widths are measured in terminal columns, so CJK summaries stay aligned.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// Longest prefix of `s` whose display width is at most `max_width`.
fn prefix_within(s: &str, max_width: usize) -> &str {
    let mut width = 0;
    for (i, c) in s.char_indices() {
        width += c.width().unwrap_or(0);
        if width > max_width {
            return &s[..i];
        }
    }
    s
}

/// Fits `s` into exactly `width` display columns.
///
/// Overlong text is cut and marked with an ellipsis when there is room for one.
/// Wide characters that would straddle the edge are dropped and the gap is padded.
pub fn fit_to_width(s: &str, width: usize) -> String {
    let (text, suffix) = if s.width() <= width {
        (s, "")
    } else if width < ELLIPSIS.len() {
        (prefix_within(s, width), "")
    } else {
        (prefix_within(s, width - ELLIPSIS.len()), ELLIPSIS)
    };
    let used = text.width() + suffix.len();
    format!("{text}{suffix}{}", " ".repeat(width.saturating_sub(used)))
}

/// Column separator between cells.
const SEPARATOR: &str = "  ";

/// One table cell, optionally carrying a hyperlink target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextCell {
    pub text: String,
    pub url: Option<String>,
}

impl TextCell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: None,
        }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: Some(url.into()),
        }
    }

    /// Visible text. Without terminal hyperlinks the URL is appended so it is not lost.
    fn visible_text(&self, hyperlinks: bool) -> String {
        match &self.url {
            Some(url) if !hyperlinks => format!("{} ({url})", self.text),
            _ => self.text.clone(),
        }
    }
}

/// Renders a header line, a dashed rule and one line per row.
///
/// Column widths fit the widest cell, capped at `max_column_width`.
/// With `hyperlinks`, link cells are wrapped in OSC 8 escape sequences.
pub fn render_table(
    headers: &[&str],
    rows: &[Vec<TextCell>],
    max_column_width: usize,
    hyperlinks: bool,
) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.visible_text(hyperlinks).width())
                .chain(std::iter::once(header.width()))
                .max()
                .unwrap_or(0)
                .min(max_column_width)
        })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(join_line(
        headers
            .iter()
            .zip(&widths)
            .map(|(header, &width)| fit_to_width(header, width)),
    ));
    lines.push(join_line(widths.iter().map(|&width| "-".repeat(width))));

    for row in rows {
        lines.push(join_line(row.iter().zip(&widths).map(|(cell, &width)| {
            let padded = fit_to_width(&cell.visible_text(hyperlinks), width);
            match (&cell.url, hyperlinks) {
                (Some(url), true) => wrap_hyperlink(&padded, url),
                _ => padded,
            }
        })));
    }

    lines.join("\n")
}

fn join_line(cells: impl Iterator<Item = String>) -> String {
    let line = cells.collect::<Vec<_>>().join(SEPARATOR);
    line.trim_end().to_string()
}

/// Wraps the visible part of a padded cell in an OSC 8 hyperlink, keeping padding outside.
fn wrap_hyperlink(padded: &str, url: &str) -> String {
    let visible = padded.trim_end_matches(' ');
    let padding = &padded[visible.len()..];
    format!("\x1b]8;;{url}\x1b\\{visible}\x1b]8;;\x1b\\{padding}")
}
