//! Search, filter and sort over in-memory collections
//!
//! All functions are pure: they take slices and return new vectors.
//! Sorting is by date, most recent first, and stable, so articles sharing
//! a date keep their collection order (newest-created first).

use std::collections::BTreeMap;

use crate::models::{Article, NewsletterIssue};

/// A free-text query plus an optional exact tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleQuery {
    /// Free text, matched case-insensitively as a substring
    pub text: String,
    /// Exact, case-sensitive tag; empty means any
    pub tag: String,
}

impl ArticleQuery {
    pub fn new(text: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: tag.into(),
        }
    }

    /// Whether both predicates pass for `article`
    pub fn matches(&self, article: &Article) -> bool {
        self.matches_text(article) && self.matches_tag(article)
    }

    fn matches_text(&self, article: &Article) -> bool {
        let needle = self.text.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        let tags = article.tags.join(" ");
        [
            article.title.as_str(),
            article.author.as_str(),
            article.summary.as_str(),
            article.content.as_str(),
            article.category.as_str(),
            tags.as_str(),
        ]
        .iter()
        .filter(|field| !field.is_empty())
        .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_tag(&self, article: &Article) -> bool {
        self.tag.is_empty() || article.has_tag(&self.tag)
    }

    /// Apply the query to a collection
    pub fn apply(&self, articles: &[Article]) -> Vec<Article> {
        let mut results: Vec<Article> = articles
            .iter()
            .filter(|a| self.matches(a))
            .cloned()
            .collect();
        sort_by_date_desc(&mut results);
        results
    }
}

/// Filter `articles` by free text and tag, most recent first
pub fn query(articles: &[Article], text: &str, tag: &str) -> Vec<Article> {
    ArticleQuery::new(text, tag).apply(articles)
}

/// Stable sort, most recent date first
pub fn sort_by_date_desc(articles: &mut [Article]) {
    articles.sort_by(|a, b| b.date.cmp(&a.date));
}

/// The most recent article, if any
pub fn headline(articles: &[Article]) -> Option<&Article> {
    // First of equally recent articles wins, matching the stable sort
    articles
        .iter()
        .fold(None, |best: Option<&Article>, a| match best {
            Some(b) if b.date >= a.date => Some(b),
            _ => Some(a),
        })
}

/// Every tag in use, in first-seen order
pub fn all_tags(articles: &[Article]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in articles.iter().flat_map(|a| a.tags.iter()) {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}

/// Tags with the number of articles carrying them, alphabetical
pub fn tags_with_counts(articles: &[Article]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for article in articles {
        let mut seen: Vec<&str> = Vec::new();
        for tag in &article.tags {
            if !seen.contains(&tag.as_str()) {
                seen.push(tag.as_str());
                *counts.entry(tag.as_str()).or_default() += 1;
            }
        }
    }
    counts
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect()
}

/// Newsletter issues, most recent first
pub fn sorted_newsletters(issues: &[NewsletterIssue]) -> Vec<NewsletterIssue> {
    let mut sorted = issues.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// The `limit` most recent newsletter issues
pub fn latest_newsletters(issues: &[NewsletterIssue], limit: usize) -> Vec<NewsletterIssue> {
    let mut sorted = sorted_newsletters(issues);
    sorted.truncate(limit);
    sorted
}
