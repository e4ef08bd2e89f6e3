//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use serde::Serialize;

use newsroom_core::{Article, NewsletterIssue};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Check if output is JSON
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a single article; `body` is the text shown under the header
    pub fn print_article(&self, article: &Article, body: &str) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:       {}", article.id);
                println!("Title:    {}", article.title);
                println!("Author:   {}", article.author);
                println!("Date:     {}", article.date);
                println!("Category: {}", display_or_dash(&article.category));
                if !article.tags.is_empty() {
                    println!("Tags:     {}", hashtags(&article.tags));
                }
                if !article.summary.is_empty() {
                    println!("Summary:  {}", article.summary);
                }
                if article.has_cover() {
                    println!("Cover:    yes");
                }
                if !body.is_empty() {
                    println!();
                    println!("{}", body);
                }
            }
            OutputFormat::Json => print_json(article),
            OutputFormat::Quiet => {
                println!("{}", article.id);
            }
        }
    }

    /// Print a list of articles
    pub fn print_articles(&self, articles: &[Article]) {
        match self.format {
            OutputFormat::Human => {
                if articles.is_empty() {
                    println!("No articles found.");
                    return;
                }
                for article in articles {
                    println!(
                        "{} | {} | {} | {}",
                        short_id(&article.id),
                        article.date,
                        truncate(&article.title, 40),
                        truncate(&article.author, 20)
                    );
                }
                println!("\n{} article(s)", articles.len());
            }
            OutputFormat::Json => print_json(articles),
            OutputFormat::Quiet => {
                for article in articles {
                    println!("{}", article.id);
                }
            }
        }
    }

    /// Print a single newsletter issue
    pub fn print_newsletter(&self, issue: &NewsletterIssue) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:        {}", issue.id);
                println!("Title:     {}", issue.title);
                println!("Date:      {}", issue.display_date());
                if !issue.highlight.is_empty() {
                    println!("Highlight: {}", issue.highlight);
                }
                if !issue.content.is_empty() {
                    println!();
                    println!("{}", issue.content);
                }
            }
            OutputFormat::Json => print_json(issue),
            OutputFormat::Quiet => {
                println!("{}", issue.id);
            }
        }
    }

    /// Print a list of newsletter issues
    pub fn print_newsletters(&self, issues: &[NewsletterIssue]) {
        match self.format {
            OutputFormat::Human => {
                if issues.is_empty() {
                    println!("No newsletter issues found.");
                    return;
                }
                for issue in issues {
                    println!(
                        "{} | {} | {} | {}",
                        short_id(&issue.id),
                        issue.display_date(),
                        truncate(&issue.title, 35),
                        truncate_line(&issue.highlight, 40)
                    );
                }
                println!("\n{} issue(s)", issues.len());
            }
            OutputFormat::Json => print_json(issues),
            OutputFormat::Quiet => {
                for issue in issues {
                    println!("{}", issue.id);
                }
            }
        }
    }

    /// Print a list of tags
    pub fn print_tags(&self, tags: &[(String, usize)]) {
        match self.format {
            OutputFormat::Human => {
                if tags.is_empty() {
                    println!("No tags found.");
                    return;
                }
                for (name, count) in tags {
                    println!("#{} ({})", name, count);
                }
                println!("\n{} tag(s)", tags.len());
            }
            OutputFormat::Json => {
                let json_tags: Vec<_> = tags
                    .iter()
                    .map(|(name, count)| serde_json::json!({"name": name, "count": count}))
                    .collect();
                print_json(&json_tags);
            }
            OutputFormat::Quiet => {
                for (name, _) in tags {
                    println!("{}", name);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize output: {}", e),
    }
}

/// First 8 characters of an id
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// `#a #b #c`
pub fn hashtags(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ")
}

fn display_or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

/// Truncate a string to max characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Truncate to first line and max length
pub fn truncate_line(s: &str, max_len: usize) -> String {
    let first_line = s.lines().next().unwrap_or("");
    truncate(first_line, max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
        // Counts characters, not bytes
        assert_eq!(truncate("가나다라마바사", 5), "가나...");
    }

    #[test]
    fn test_truncate_line() {
        assert_eq!(truncate_line("single line", 20), "single line");
        assert_eq!(truncate_line("line one\nline two", 20), "line one");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn test_hashtags() {
        let tags = vec!["campus".to_string(), "dining".to_string()];
        assert_eq!(hashtags(&tags), "#campus #dining");
        assert_eq!(hashtags(&[]), "");
    }
}
