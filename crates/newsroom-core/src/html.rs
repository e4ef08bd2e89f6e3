//! HTML fragments for articles
//!
//! The article viewer: title, byline, tags, optional cover and the rendered
//! body. Metadata fields are always escaped; the body follows the
//! [`RenderPolicy`].

use crate::markdown::{escape_html, render, RenderPolicy};
use crate::models::Article;

/// Whether a cover is safe to place in an `<img src>` attribute
///
/// Empty covers and base64 `data:image/...` URLs qualify.
pub fn is_safe_cover(cover: &str) -> bool {
    if cover.is_empty() {
        return true;
    }
    let Some(rest) = cover.strip_prefix("data:image/") else {
        return false;
    };
    let Some((subtype, payload)) = rest.split_once(";base64,") else {
        return false;
    };
    !subtype.is_empty()
        && subtype
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        && payload
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
}

/// Render the full article view as an HTML fragment
pub fn article_fragment(article: &Article, policy: RenderPolicy) -> String {
    let mut lines = vec![
        "<article>".to_string(),
        format!("<h2>{}</h2>", escape_html(&article.title)),
        format!("<p class=\"byline\">{}</p>", escape_html(&article.byline())),
    ];

    if !article.tags.is_empty() {
        let tags: Vec<String> = article
            .tags
            .iter()
            .map(|tag| format!("<span>#{}</span>", escape_html(tag)))
            .collect();
        lines.push(format!("<p class=\"tags\">{}</p>", tags.join(" ")));
    }

    let show_cover = match policy {
        RenderPolicy::Trusted => article.has_cover(),
        RenderPolicy::Escaped => article.has_cover() && is_safe_cover(&article.cover),
    };
    if show_cover {
        lines.push(format!("<img src=\"{}\" alt=\"cover\"/>", article.cover));
    }

    lines.push(format!(
        "<div class=\"content\">{}</div>",
        render(&article.content, policy)
    ));
    lines.push("</article>".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn article() -> Article {
        let mut a = Article::with_id(
            "a1",
            "Fees <rise>",
            "Desk",
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        );
        a.category = "Campus".to_string();
        a.tags = vec!["fees".to_string(), "campus".to_string()];
        a.content = "# Head\nBody".to_string();
        a
    }

    #[test]
    fn test_safe_cover() {
        assert!(is_safe_cover(""));
        assert!(is_safe_cover("data:image/png;base64,iVBORw0KGgo="));
        assert!(is_safe_cover("data:image/svg+xml;base64,PHN2Zz4="));
        assert!(!is_safe_cover("https://example.com/a.png"));
        assert!(!is_safe_cover("data:text/html;base64,PHNjcmlwdD4="));
        assert!(!is_safe_cover("data:image/png;base64,\" onerror=\"x"));
    }

    #[test]
    fn test_fragment_escapes_metadata() {
        let html = article_fragment(&article(), RenderPolicy::Trusted);
        assert!(html.contains("<h2>Fees &lt;rise&gt;</h2>"));
        assert!(html.contains("Desk · 2024-05-01 · Campus"));
        assert!(html.contains("<span>#fees</span> <span>#campus</span>"));
        assert!(html.contains("<h1>Head</h1>"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_unsafe_cover_dropped_when_escaped() {
        let mut a = article();
        a.cover = "javascript:alert(1)".to_string();

        let escaped = article_fragment(&a, RenderPolicy::Escaped);
        assert!(!escaped.contains("<img"));

        let trusted = article_fragment(&a, RenderPolicy::Trusted);
        assert!(trusted.contains("<img src=\"javascript:alert(1)\""));
    }

    #[test]
    fn test_safe_cover_rendered() {
        let mut a = article();
        a.cover = "data:image/png;base64,AAAA".to_string();
        let html = article_fragment(&a, RenderPolicy::Escaped);
        assert!(html.contains("<img src=\"data:image/png;base64,AAAA\""));
    }

    #[test]
    fn test_fragment_layout() {
        let mut a = Article::with_id("a2", "T", "A", NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        a.content = "x".to_string();
        assert_eq!(
            article_fragment(&a, RenderPolicy::Escaped),
            "<article>\n<h2>T</h2>\n<p class=\"byline\">A · 2024-05-01 · </p>\n\
             <div class=\"content\">x</div>\n</article>"
        );
    }
}
