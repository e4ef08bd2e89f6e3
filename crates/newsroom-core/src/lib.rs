//! Newsroom Core Library
//!
//! This crate provides the core functionality for Newsroom, a local-first
//! publishing tool for a student newsroom: articles, newsletter issues,
//! search, a restricted markdown renderer and JSON backup.
//!
//! # Architecture
//!
//! - **`Newsroom`**: the application state, the only writer to storage
//! - **`KeyValueStore`**: JSON documents under string keys, one per
//!   collection
//!
//! Queries are pure functions over the in-memory collections.
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let mut newsroom = Newsroom::open(FileStore::from_config(&config), today);
//!
//! // Publish an article
//! let mut draft = ArticleDraft::new(newsroom.today());
//! draft.title = "Budget vote".to_string();
//! draft.author = "Council Desk".to_string();
//! newsroom.publish_article(draft)?;
//!
//! // Query articles
//! let results = newsroom.search("budget", "");
//! ```
//!
//! # Modules
//!
//! - `app`: Application state (main entry point)
//! - `models`: Articles and newsletter issues
//! - `editor`: Drafts and validation
//! - `query`: Search, tag filter and date sort
//! - `markdown`: Restricted markdown to HTML
//! - `html`: Article HTML fragments and cover checks
//! - `transfer`: JSON export and import
//! - `storage`: Key-value persistence
//! - `config`: Application configuration

pub mod app;
pub mod config;
pub mod editor;
pub mod html;
pub mod id;
pub mod markdown;
pub mod models;
pub mod query;
pub mod seed;
pub mod storage;
pub mod subscribe;
pub mod transfer;

pub use app::{ImportSummary, Newsroom};
pub use config::Config;
pub use editor::{ArticleDraft, NewsletterDraft, ValidationError};
pub use markdown::RenderPolicy;
pub use models::{Article, NewsletterIssue};
pub use query::ArticleQuery;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use transfer::{ExportDocument, ImportError, ImportPayload};
