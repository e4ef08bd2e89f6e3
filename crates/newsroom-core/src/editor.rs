//! Drafts for new articles and newsletter issues
//!
//! A draft collects form input and turns into a model only after
//! validation. Validation failures are user-facing messages, not program
//! errors.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{Article, NewsletterIssue};

/// Category given to new article drafts
pub const DEFAULT_CATEGORY: &str = "General";

/// Why a draft was not accepted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter the {0}.")]
    MissingField(&'static str),

    #[error("Please enter a title and an author.")]
    MissingTitleAndAuthor,
}

/// Form state for a new article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    pub title: String,
    pub author: String,
    pub date: NaiveDate,
    pub category: String,
    pub tags: Vec<String>,
    pub summary: String,
    pub content: String,
    pub cover: String,
}

impl ArticleDraft {
    /// Empty draft dated `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            date: today,
            category: DEFAULT_CATEGORY.to_string(),
            tags: Vec::new(),
            summary: String::new(),
            content: String::new(),
            cover: String::new(),
        }
    }

    /// Add a tag from user input
    ///
    /// Input is trimmed; empty input and duplicates are ignored. Returns
    /// whether the tag was added.
    pub fn add_tag(&mut self, input: &str) -> bool {
        let tag = input.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Remove a tag
    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// Embed an image file as the cover
    ///
    /// The file is inlined as a base64 data URL. There is no size or type
    /// check; large images make the stored JSON large.
    pub fn set_cover_from_file(&mut self, path: &Path) -> Result<()> {
        self.cover = image_data_url(path)?;
        Ok(())
    }

    /// Clear every field back to a fresh draft dated `today`
    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }

    /// Check required fields
    pub fn validate(&self) -> Result<(), ValidationError> {
        let title_missing = self.title.trim().is_empty();
        let author_missing = self.author.trim().is_empty();
        match (title_missing, author_missing) {
            (true, true) => Err(ValidationError::MissingTitleAndAuthor),
            (true, false) => Err(ValidationError::MissingField("title")),
            (false, true) => Err(ValidationError::MissingField("author")),
            (false, false) => Ok(()),
        }
    }

    /// Validate and build the article with the given id
    pub fn into_article(self, id: impl Into<String>) -> Result<Article, ValidationError> {
        self.validate()?;
        Ok(Article {
            id: id.into(),
            title: self.title,
            author: self.author,
            date: self.date,
            category: self.category,
            tags: self.tags,
            summary: self.summary,
            content: self.content,
            cover: self.cover,
        })
    }
}

/// Form state for a new newsletter issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsletterDraft {
    pub title: String,
    pub date: NaiveDate,
    pub highlight: String,
    pub content: String,
}

impl NewsletterDraft {
    /// Empty draft dated `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            title: String::new(),
            date: today,
            highlight: String::new(),
            content: String::new(),
        }
    }

    /// Clear every field back to a fresh draft dated `today`
    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }

    /// Check required fields
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        Ok(())
    }

    /// Validate and build the issue with the given id
    pub fn into_issue(self, id: impl Into<String>) -> Result<NewsletterIssue, ValidationError> {
        self.validate()?;
        Ok(NewsletterIssue {
            id: id.into(),
            title: self.title,
            date: self.date,
            highlight: self.highlight,
            content: self.content,
        })
    }
}

/// Read an image file into a `data:` URL
pub fn image_data_url(path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read image file: {:?}", path))?;
    Ok(format!(
        "data:{};base64,{}",
        mime_for_path(path),
        STANDARD.encode(bytes)
    ))
}

/// MIME type from a file extension
fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}
