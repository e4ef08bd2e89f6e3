//! Command handlers

pub mod article;
pub mod config;
pub mod home;
pub mod newsletter;
pub mod render;
pub mod status;
pub mod tag;
pub mod transfer;

use anyhow::{bail, Result};

/// Resolve a full id or unique prefix against `(id, title)` pairs
///
/// An exact match wins even when it is also a prefix of other ids.
pub fn resolve_id<'a, I>(input: &str, candidates: I, kind: &str) -> Result<String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let input = input.trim();
    if input.is_empty() {
        bail!("No {} ID given", kind);
    }

    let matches: Vec<(&str, &str)> = candidates
        .into_iter()
        .filter(|(id, _)| id.starts_with(input))
        .collect();

    if let Some((id, _)) = matches.iter().find(|(id, _)| *id == input) {
        return Ok(id.to_string());
    }

    match matches.len() {
        0 => bail!("No {} found matching: {}", kind, input),
        1 => Ok(matches[0].0.to_string()),
        _ => {
            eprintln!("Multiple {}s match '{}':", kind, input);
            for (id, title) in &matches {
                eprintln!("  {} - {}", id, title);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<(&'static str, &'static str)> {
        vec![
            ("abc123", "First"),
            ("abd456", "Second"),
            ("abc", "Short"),
        ]
    }

    #[test]
    fn test_unique_prefix() {
        assert_eq!(resolve_id("abd", candidates(), "article").unwrap(), "abd456");
    }

    #[test]
    fn test_exact_match_wins() {
        assert_eq!(resolve_id("abc", candidates(), "article").unwrap(), "abc");
    }

    #[test]
    fn test_ambiguous_prefix() {
        let err = resolve_id("ab", candidates(), "article").unwrap_err();
        assert!(err.to_string().contains("Ambiguous"));
    }

    #[test]
    fn test_no_match() {
        let err = resolve_id("zz", candidates(), "article").unwrap_err();
        assert_eq!(err.to_string(), "No article found matching: zz");
        assert!(resolve_id("  ", candidates(), "article").is_err());
    }
}
