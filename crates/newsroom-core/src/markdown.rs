//! Restricted markdown to HTML
//!
//! Supports headings (`#`, `##`, `###`), `**bold**`, `*italic*`, `- ` list
//! items, blank-line breaks and `[label](url)` links. This is a sequence of
//! regex substitutions, each applied to the output of the previous one, not
//! a parser: nesting and escaping are not understood and unbalanced markers
//! can produce malformed fragments.
//!
//! Order:
//! 1. headings (longest prefix first)
//! 2. bold, then italic
//! 3. list items, one `<ul>` per line
//! 4. `\n\n` to `<br/>`
//! 5. links
//! 6. adjacent `</ul><ul>` boundaries removed, merging the list items

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

static H3_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^### (.*)$").expect("valid h3 regex"));
static H2_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^## (.*)$").expect("valid h2 regex"));
static H1_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^# (.*)$").expect("valid h1 regex"));
static BOLD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid bold regex"));
static ITALIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").expect("valid italic regex"));
static LIST_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^- (.*)$").expect("valid list item regex"));
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("valid link regex"));
static LIST_BOUNDARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</ul>\s*<ul>").expect("valid list boundary regex"));

/// How much the renderer trusts its input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderPolicy {
    /// Source markup passes through untouched
    Trusted,
    /// Source is HTML-escaped before the transforms and link targets are
    /// limited to http(s), mailto and relative URLs
    #[default]
    Escaped,
}

impl RenderPolicy {
    /// Policy for a `trust_content` configuration flag
    pub fn from_trust(trust_content: bool) -> Self {
        if trust_content {
            RenderPolicy::Trusted
        } else {
            RenderPolicy::Escaped
        }
    }
}

/// Render restricted markdown to an HTML fragment
pub fn render(source: &str, policy: RenderPolicy) -> String {
    let source = source.replace("\r\n", "\n");
    let source = match policy {
        RenderPolicy::Trusted => source,
        RenderPolicy::Escaped => escape_html(&source),
    };

    let html = H3_RE.replace_all(&source, "<h3>${1}</h3>");
    let html = H2_RE.replace_all(&html, "<h2>${1}</h2>");
    let html = H1_RE.replace_all(&html, "<h1>${1}</h1>");
    let html = BOLD_RE.replace_all(&html, "<strong>${1}</strong>");
    let html = ITALIC_RE.replace_all(&html, "<em>${1}</em>");
    let html = LIST_ITEM_RE.replace_all(&html, "<ul><li>${1}</li></ul>");
    let html = html.replace("\n\n", "<br/>\n");
    let html = LINK_RE.replace_all(&html, |caps: &Captures| {
        let label = &caps[1];
        let url = match policy {
            RenderPolicy::Trusted => &caps[2],
            RenderPolicy::Escaped if is_allowed_url(&caps[2]) => &caps[2],
            RenderPolicy::Escaped => "#",
        };
        format!(
            r#"<a href="{}" target="_blank" rel="noreferrer">{}</a>"#,
            url, label
        )
    });

    LIST_BOUNDARY_RE.replace_all(&html, "").into_owned()
}

/// Render with raw markup passed through
pub fn render_trusted(source: &str) -> String {
    render(source, RenderPolicy::Trusted)
}

/// Render with the source escaped first
pub fn render_escaped(source: &str) -> String {
    render(source, RenderPolicy::Escaped)
}

/// Escape the HTML special characters
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Link targets allowed under [`RenderPolicy::Escaped`]
fn is_allowed_url(url: &str) -> bool {
    let url = url.trim();
    // A scheme is whatever precedes the first ':' when no '/', '?' or '#' comes first
    let scheme_end = url.find(':');
    let path_start = url.find(|c| matches!(c, '/' | '?' | '#'));
    match (scheme_end, path_start) {
        (Some(colon), Some(path)) if path < colon => true,
        (Some(colon), _) => {
            let scheme = url[..colon].to_ascii_lowercase();
            matches!(scheme.as_str(), "http" | "https" | "mailto")
        }
        (None, _) => true,
    }
}
