//! Data models for Newsroom
//!
//! Defines the core data structures: Article and NewsletterIssue.
//! Both serialize to the same JSON shape the export file and the store use.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used for display and for the export filename
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A published article
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    /// Opaque identifier, assigned once at creation
    pub id: String,
    /// Headline
    pub title: String,
    /// Byline name (reporter or desk)
    pub author: String,
    /// Publication date (no time component)
    pub date: NaiveDate,
    /// Free-form section label
    #[serde(default)]
    pub category: String,
    /// Tags in insertion order
    #[serde(default)]
    pub tags: Vec<String>,
    /// Short teaser shown in listings
    #[serde(default)]
    pub summary: String,
    /// Body in restricted markdown
    #[serde(default)]
    pub content: String,
    /// Empty, or a data URL with the cover image
    #[serde(default)]
    pub cover: String,
}

impl Article {
    /// Create an article with the given id and required fields
    pub fn with_id(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            date,
            category: String::new(),
            tags: Vec::new(),
            summary: String::new(),
            content: String::new(),
            cover: String::new(),
        }
    }

    /// Whether the article carries a cover image
    pub fn has_cover(&self) -> bool {
        !self.cover.is_empty()
    }

    /// Whether the article has exactly this tag (case-sensitive)
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// `author · date · category`
    pub fn byline(&self) -> String {
        format!(
            "{} · {} · {}",
            self.author,
            self.date.format(DATE_FORMAT),
            self.category
        )
    }

    /// Date formatted for display
    pub fn display_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// A newsletter issue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsletterIssue {
    /// Opaque identifier, assigned once at creation
    pub id: String,
    /// Issue title
    pub title: String,
    /// Issue date (no time component)
    pub date: NaiveDate,
    /// Short teaser
    #[serde(default)]
    pub highlight: String,
    /// Plain-text body (never markdown-rendered)
    #[serde(default)]
    pub content: String,
}

impl NewsletterIssue {
    /// Create an issue with the given id, title and date
    pub fn with_id(id: impl Into<String>, title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            date,
            highlight: String::new(),
            content: String::new(),
        }
    }

    /// Date formatted for display
    pub fn display_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}
