//! JSON export and import
//!
//! The export file is a single object holding both collections. Import
//! checks the shape explicitly and either yields a typed payload or an
//! [`ImportError`]; nothing is applied on failure.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::models::{Article, NewsletterIssue, DATE_FORMAT};

/// Why an import file was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("File is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Expected a JSON object at the top level")]
    NotAnObject,

    #[error("Field '{0}' must be an array")]
    NotAnArray(&'static str),

    #[error("File contains neither 'articles' nor 'newsletters'")]
    NothingToImport,

    #[error("Invalid entry {index} in '{field}': {reason}")]
    InvalidRecord {
        field: &'static str,
        index: usize,
        reason: String,
    },
}

/// Both collections, as written to an export file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportDocument {
    pub articles: Vec<Article>,
    pub newsletters: Vec<NewsletterIssue>,
}

impl ExportDocument {
    pub fn new(articles: Vec<Article>, newsletters: Vec<NewsletterIssue>) -> Self {
        Self {
            articles,
            newsletters,
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Parsed import file; `None` means the field was absent and that
/// collection stays as it is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportPayload {
    pub articles: Option<Vec<Article>>,
    pub newsletters: Option<Vec<NewsletterIssue>>,
}

/// Default name for an export written on `date`
pub fn export_filename(date: NaiveDate) -> String {
    format!("newsroom-export-{}.json", date.format(DATE_FORMAT))
}

/// Check and parse the contents of an import file
pub fn parse_import(json: &str) -> Result<ImportPayload, ImportError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| ImportError::InvalidJson(e.to_string()))?;
    let Value::Object(mut object) = value else {
        return Err(ImportError::NotAnObject);
    };

    let articles = take_array(&mut object, "articles")?;
    let newsletters = take_array(&mut object, "newsletters")?;
    if articles.is_none() && newsletters.is_none() {
        return Err(ImportError::NothingToImport);
    }

    Ok(ImportPayload {
        articles,
        newsletters,
    })
}

fn take_array<T: DeserializeOwned>(
    object: &mut serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<Option<Vec<T>>, ImportError> {
    let items = match object.remove(field) {
        None => return Ok(None),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ImportError::NotAnArray(field)),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| ImportError::InvalidRecord {
                field,
                index,
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<T>, _>>()
        .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
    }

    fn document() -> ExportDocument {
        let mut first = Article::with_id("a1", "Same title", "Desk", date(1));
        first.tags = vec!["x".to_string()];
        first.cover = "data:image/png;base64,AAAA".to_string();
        let second = Article::with_id("a2", "Same title", "Desk", date(2));
        let issue = NewsletterIssue::with_id("n1", "Weekly", date(3));
        ExportDocument::new(vec![first, second], vec![issue])
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename(date(9)), "newsroom-export-2024-02-09.json");
    }

    #[test]
    fn test_export_is_pretty_printed() {
        let json = document().to_json().unwrap();
        assert!(json.starts_with("{\n  \"articles\": ["));
    }

    #[test]
    fn test_round_trip() {
        let doc = document();
        let payload = parse_import(&doc.to_json().unwrap()).unwrap();
        assert_eq!(payload.articles.as_deref(), Some(doc.articles.as_slice()));
        assert_eq!(
            payload.newsletters.as_deref(),
            Some(doc.newsletters.as_slice())
        );
    }

    #[test]
    fn test_partial_shape() {
        let payload = parse_import(r#"{"newsletters": []}"#).unwrap();
        assert!(payload.articles.is_none());
        assert_eq!(payload.newsletters, Some(vec![]));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            parse_import("{not json"),
            Err(ImportError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_not_an_object() {
        assert_eq!(parse_import("[1, 2]"), Err(ImportError::NotAnObject));
        assert_eq!(parse_import("null"), Err(ImportError::NotAnObject));
    }

    #[test]
    fn test_not_an_array() {
        assert_eq!(
            parse_import(r#"{"articles": {"id": "a"}}"#),
            Err(ImportError::NotAnArray("articles"))
        );
        assert_eq!(
            parse_import(r#"{"articles": [], "newsletters": "none"}"#),
            Err(ImportError::NotAnArray("newsletters"))
        );
    }

    #[test]
    fn test_nothing_to_import() {
        assert_eq!(
            parse_import(r#"{"posts": []}"#),
            Err(ImportError::NothingToImport)
        );
    }

    #[test]
    fn test_invalid_record() {
        let json = r#"{"articles": [
            {"id": "a1", "title": "T", "author": "A", "date": "2024-02-01"},
            {"id": "a2", "title": "T"}
        ]}"#;
        match parse_import(json) {
            Err(ImportError::InvalidRecord { field, index, .. }) => {
                assert_eq!(field, "articles");
                assert_eq!(index, 1);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
