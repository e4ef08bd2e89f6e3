//! Application state
//!
//! `Newsroom` owns both collections and the store they persist to. It is
//! the only writer to storage: every mutator marks the collection it
//! changed as dirty and then calls [`Newsroom::persist`], which saves the
//! dirty collections and nothing else.
//!
//! ## Usage
//!
//! ```ignore
//! let store = FileStore::from_config(&config);
//! let mut newsroom = Newsroom::open(store, today);
//!
//! let mut draft = ArticleDraft::new(newsroom.today());
//! draft.title = "Budget vote".to_string();
//! draft.author = "Council Desk".to_string();
//! newsroom.publish_article(draft)?;
//!
//! let results = newsroom.search("budget", "");
//! ```

use std::fmt;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::editor::{ArticleDraft, NewsletterDraft, ValidationError};
use crate::id::IdGenerator;
use crate::models::{Article, NewsletterIssue};
use crate::query;
use crate::seed;
use crate::storage::{self, KeyValueStore, ARTICLES_KEY, NEWSLETTERS_KEY};
use crate::transfer::{self, ExportDocument, ImportError};

/// What an import replaced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Number of articles now held, if the file carried articles
    pub articles: Option<usize>,
    /// Number of newsletter issues now held, if the file carried them
    pub newsletters: Option<usize>,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(n) = self.articles {
            parts.push(format!("{} article(s)", n));
        }
        if let Some(n) = self.newsletters {
            parts.push(format!("{} newsletter issue(s)", n));
        }
        write!(f, "Imported {}", parts.join(" and "))
    }
}

/// Articles, newsletter issues and the store behind them
pub struct Newsroom<S: KeyValueStore> {
    store: S,
    articles: Vec<Article>,
    newsletters: Vec<NewsletterIssue>,
    ids: IdGenerator,
    today: NaiveDate,
    articles_dirty: bool,
    newsletters_dirty: bool,
}

impl<S: KeyValueStore> Newsroom<S> {
    /// Load both collections from `store`
    ///
    /// A collection that is missing or unreadable starts from the seed
    /// data; the seed is not written back until something changes.
    pub fn open(store: S, today: NaiveDate) -> Self {
        let articles = storage::load(&store, ARTICLES_KEY, seed::default_articles(today));
        let newsletters =
            storage::load(&store, NEWSLETTERS_KEY, seed::default_newsletters(today));
        debug!(
            "Opened newsroom with {} articles and {} newsletter issues",
            articles.len(),
            newsletters.len()
        );

        Self {
            store,
            articles,
            newsletters,
            ids: IdGenerator::new(),
            today,
            articles_dirty: false,
            newsletters_dirty: false,
        }
    }

    /// The date drafts and exports are stamped with
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// The backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the container, returning the store
    pub fn into_store(self) -> S {
        self.store
    }

    // ==================== Reads ====================

    /// All articles in collection order (newest created first)
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// All newsletter issues in collection order
    pub fn newsletters(&self) -> &[NewsletterIssue] {
        &self.newsletters
    }

    pub fn article(&self, id: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }

    pub fn newsletter(&self, id: &str) -> Option<&NewsletterIssue> {
        self.newsletters.iter().find(|n| n.id == id)
    }

    /// Articles matching `text` and `tag`, most recent first
    pub fn search(&self, text: &str, tag: &str) -> Vec<Article> {
        query::query(&self.articles, text, tag)
    }

    /// The most recent article
    pub fn headline(&self) -> Option<&Article> {
        query::headline(&self.articles)
    }

    /// The `limit` most recent newsletter issues
    pub fn latest_newsletters(&self, limit: usize) -> Vec<NewsletterIssue> {
        query::latest_newsletters(&self.newsletters, limit)
    }

    /// Newsletter archive, most recent first
    pub fn sorted_newsletters(&self) -> Vec<NewsletterIssue> {
        query::sorted_newsletters(&self.newsletters)
    }

    pub fn all_tags(&self) -> Vec<String> {
        query::all_tags(&self.articles)
    }

    pub fn tags_with_counts(&self) -> Vec<(String, usize)> {
        query::tags_with_counts(&self.articles)
    }

    // ==================== Mutations ====================

    /// Validate a draft and publish it at the front of the collection
    pub fn publish_article(&mut self, draft: ArticleDraft) -> Result<Article, ValidationError> {
        let article = draft.into_article(self.ids.generate())?;
        info!("Published article {} ({})", article.id, article.title);
        self.articles.insert(0, article.clone());
        self.articles_dirty = true;
        self.persist();
        Ok(article)
    }

    /// Validate a draft and add it to the front of the newsletter archive
    pub fn add_newsletter(
        &mut self,
        draft: NewsletterDraft,
    ) -> Result<NewsletterIssue, ValidationError> {
        let issue = draft.into_issue(self.ids.generate())?;
        info!("Added newsletter issue {} ({})", issue.id, issue.title);
        self.newsletters.insert(0, issue.clone());
        self.newsletters_dirty = true;
        self.persist();
        Ok(issue)
    }

    /// Remove the article with exactly this id
    pub fn delete_article(&mut self, id: &str) -> Option<Article> {
        let index = self.articles.iter().position(|a| a.id == id)?;
        let removed = self.articles.remove(index);
        info!("Deleted article {} ({})", removed.id, removed.title);
        self.articles_dirty = true;
        self.persist();
        Some(removed)
    }

    /// Replace the collections present in an import file
    ///
    /// On error nothing changes.
    pub fn import(&mut self, json: &str) -> Result<ImportSummary, ImportError> {
        let payload = transfer::parse_import(json)?;
        let mut summary = ImportSummary::default();

        if let Some(articles) = payload.articles {
            summary.articles = Some(articles.len());
            self.articles = articles;
            self.articles_dirty = true;
        }
        if let Some(newsletters) = payload.newsletters {
            summary.newsletters = Some(newsletters.len());
            self.newsletters = newsletters;
            self.newsletters_dirty = true;
        }

        info!("{}", summary);
        self.persist();
        Ok(summary)
    }

    /// Snapshot of both collections for export
    pub fn export(&self) -> ExportDocument {
        ExportDocument::new(self.articles.clone(), self.newsletters.clone())
    }

    /// Pretty-printed export JSON
    pub fn export_json(&self) -> Result<String> {
        self.export()
            .to_json()
            .context("Failed to serialize export")
    }

    /// Default export filename for today
    pub fn export_filename(&self) -> String {
        transfer::export_filename(self.today)
    }

    /// Save the collections changed since the last persist
    ///
    /// Failed writes are logged and dropped; the in-memory state is kept
    /// either way. Returns whether every attempted write succeeded.
    pub fn persist(&mut self) -> bool {
        let mut ok = true;
        if self.articles_dirty {
            ok &= storage::save(&mut self.store, ARTICLES_KEY, &self.articles);
            self.articles_dirty = false;
        }
        if self.newsletters_dirty {
            ok &= storage::save(&mut self.store, NEWSLETTERS_KEY, &self.newsletters);
            self.newsletters_dirty = false;
        }
        ok
    }
}
