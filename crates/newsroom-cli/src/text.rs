//! Terminal text from rendered article HTML
//!
//! The renderer emits a small, known set of tags. This turns that output
//! back into plain lines for the terminal: headings and list items are
//! tagged so the TUI can style them, links keep their target in angle
//! brackets, everything else loses its markup.

use once_cell::sync::Lazy;
use regex::Regex;

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<h([1-3])>(.*)</h[1-3]>$").expect("valid heading regex"));
static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<a href="([^"]*)"[^>]*>(.*?)</a>"#).expect("valid anchor regex")
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

/// Kind of a rendered line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Heading of level 1 to 3
    Heading(u8),
    /// List item (text excludes the bullet)
    Bullet,
    Text,
}

/// One line of terminal output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub kind: LineKind,
    pub text: String,
}

impl TextLine {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// The line as it reads on a plain terminal
    pub fn plain(&self) -> String {
        match self.kind {
            LineKind::Bullet => format!("  • {}", self.text),
            _ => self.text.clone(),
        }
    }
}

/// Split rendered HTML into terminal lines
pub fn html_to_lines(html: &str) -> Vec<TextLine> {
    let html = html
        .replace("<br/>", "\n")
        .replace("<ul>", "")
        .replace("</ul>", "")
        .replace("</li><li>", "</li>\n<li>");

    let mut lines = Vec::new();
    let mut last_blank = true;
    for raw in html.split('\n') {
        let raw = raw.trim_end();
        if raw.is_empty() {
            // Collapse runs of blank lines left by list and break markup
            if !last_blank {
                lines.push(TextLine::new(LineKind::Text, ""));
            }
            last_blank = true;
            continue;
        }
        last_blank = false;

        let line = if let Some(caps) = HEADING_RE.captures(raw) {
            let level = caps[1].parse().unwrap_or(1);
            TextLine::new(LineKind::Heading(level), inline_text(&caps[2]))
        } else if let Some(item) = raw
            .strip_prefix("<li>")
            .and_then(|r| r.strip_suffix("</li>"))
        {
            TextLine::new(LineKind::Bullet, inline_text(item))
        } else {
            TextLine::new(LineKind::Text, inline_text(raw))
        };
        lines.push(line);
    }

    while lines.last().is_some_and(|l| l.text.is_empty()) {
        lines.pop();
    }
    lines
}

/// Rendered HTML as plain text
pub fn html_to_plain(html: &str) -> String {
    html_to_lines(html)
        .iter()
        .map(TextLine::plain)
        .collect::<Vec<_>>()
        .join("\n")
}

fn inline_text(fragment: &str) -> String {
    let with_links = LINK_RE.replace_all(fragment, |caps: &regex::Captures| {
        if &caps[1] == "#" {
            caps[2].to_string()
        } else {
            format!("{} <{}>", &caps[2], &caps[1])
        }
    });
    unescape_html(&TAG_RE.replace_all(&with_links, ""))
}

fn unescape_html(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsroom_core::markdown::{render_escaped, render_trusted};

    #[test]
    fn test_headings_and_emphasis() {
        let lines = html_to_lines(&render_trusted("# Title\n**bold** and *italic*"));
        assert_eq!(
            lines,
            vec![
                TextLine::new(LineKind::Heading(1), "Title"),
                TextLine::new(LineKind::Text, "bold and italic"),
            ]
        );
    }

    #[test]
    fn test_list_items() {
        let lines = html_to_lines(&render_trusted("Intro\n- one\n- two\n\nAfter"));
        let plain: Vec<String> = lines.iter().map(TextLine::plain).collect();
        assert_eq!(plain, vec!["Intro", "  • one", "  • two", "", "After"]);
    }

    #[test]
    fn test_links_keep_target() {
        let text = html_to_plain(&render_trusted("See [site](https://a.org)"));
        assert_eq!(text, "See site <https://a.org>");
    }

    #[test]
    fn test_blocked_link_shows_label_only() {
        let text = html_to_plain(&render_escaped("[x](javascript:alert)"));
        assert_eq!(text, "x");
    }

    #[test]
    fn test_escaped_markup_is_restored_as_text() {
        let text = html_to_plain(&render_escaped("<b>hi</b> & bye"));
        assert_eq!(text, "<b>hi</b> & bye");
    }

    #[test]
    fn test_blank_lines_collapse() {
        let text = html_to_plain(&render_trusted("a\n\n\n\nb"));
        assert_eq!(text, "a\n\nb");
    }
}
