//! Article command handlers

use std::fs;

use anyhow::{anyhow, bail, Context, Result};

use newsroom_core::html::article_fragment;
use newsroom_core::markdown::render;
use newsroom_core::{ArticleDraft, Config, KeyValueStore, Newsroom};

use crate::commands::resolve_id;
use crate::editor::{confirm, edit_text, is_interactive, strip_template};
use crate::output::{short_id, Output};
use crate::text::html_to_plain;
use crate::ArticleArgs;

const CONTENT_TEMPLATE: &str = "<!-- Write the article body in markdown. Comment lines are removed. -->\n\n";

/// List articles, optionally filtered by text and tag
pub fn list<S: KeyValueStore>(
    newsroom: &Newsroom<S>,
    query: Option<String>,
    tag: Option<String>,
    output: &Output,
) -> Result<()> {
    let articles = newsroom.search(
        query.as_deref().unwrap_or(""),
        tag.as_deref().unwrap_or(""),
    );
    output.print_articles(&articles);
    Ok(())
}

/// Show a single article
///
/// The body is rendered through the configured policy. `html` prints the
/// full HTML fragment instead of terminal text.
pub fn show<S: KeyValueStore>(
    newsroom: &Newsroom<S>,
    id: &str,
    html: bool,
    config: &Config,
    output: &Output,
) -> Result<()> {
    let id = parse_article_id(id, newsroom)?;
    let article = newsroom
        .article(&id)
        .ok_or_else(|| anyhow!("Article not found: {}", id))?;

    if html && !output.is_json() {
        println!("{}", article_fragment(article, config.render_policy()));
        return Ok(());
    }

    let body = html_to_plain(&render(&article.content, config.render_policy()));
    output.print_article(article, &body);
    Ok(())
}

/// Publish a new article
pub fn create<S: KeyValueStore>(
    newsroom: &mut Newsroom<S>,
    args: ArticleArgs,
    output: &Output,
) -> Result<()> {
    let mut draft = ArticleDraft::new(newsroom.today());
    draft.title = args.title;
    draft.author = args.author;
    if let Some(date) = args.date {
        draft.date = date;
    }
    if let Some(category) = args.category {
        draft.category = category;
    }
    for tag in &args.tag {
        draft.add_tag(tag);
    }
    draft.summary = args.summary.unwrap_or_default();
    if let Some(path) = &args.cover {
        draft
            .set_cover_from_file(path)
            .context("Failed to embed cover image")?;
    }

    // Validate before spending the user's time in the editor
    draft.validate()?;

    draft.content = match (args.content, args.content_file) {
        (Some(content), _) => content,
        (None, Some(path)) => fs::read_to_string(&path)
            .with_context(|| format!("Failed to read content file: {:?}", path))?,
        (None, None) => strip_template(&edit_text(CONTENT_TEMPLATE)?),
    };

    let article = newsroom.publish_article(draft)?;

    output.success(&format!("Published article: {}", article.id));
    if !output.is_quiet() && !output.is_json() {
        println!("{}", article.byline());
    }
    Ok(())
}

/// Delete an article
///
/// Without `yes` the user must confirm on a terminal; scripted output
/// formats never delete without it.
pub fn delete<S: KeyValueStore>(
    newsroom: &mut Newsroom<S>,
    id: &str,
    yes: bool,
    output: &Output,
) -> Result<()> {
    let id = parse_article_id(id, newsroom)?;
    let article = newsroom
        .article(&id)
        .ok_or_else(|| anyhow!("Article not found: {}", id))?;

    if !yes {
        if !output.should_prompt() || !is_interactive() {
            bail!("Refusing to delete without --yes");
        }
        println!("Delete article: {} - {}", short_id(&article.id), article.title);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    newsroom
        .delete_article(&id)
        .ok_or_else(|| anyhow!("Article not found: {}", id))?;

    output.success(&format!("Deleted article: {}", id));
    Ok(())
}

/// Parse an article ID (full or unique prefix)
fn parse_article_id<S: KeyValueStore>(id: &str, newsroom: &Newsroom<S>) -> Result<String> {
    resolve_id(
        id,
        newsroom
            .articles()
            .iter()
            .map(|a| (a.id.as_str(), a.title.as_str())),
        "article",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use chrono::NaiveDate;
    use newsroom_core::storage::{MemoryStore, ARTICLES_KEY, NEWSLETTERS_KEY};

    fn newsroom() -> Newsroom<MemoryStore> {
        let mut store = MemoryStore::new();
        store.insert_raw(ARTICLES_KEY, "[]");
        store.insert_raw(NEWSLETTERS_KEY, "[]");
        Newsroom::open(store, NaiveDate::from_ymd_opt(2024, 5, 20).unwrap())
    }

    fn args(title: &str, author: &str) -> ArticleArgs {
        ArticleArgs {
            title: title.to_string(),
            author: author.to_string(),
            date: None,
            category: None,
            tag: vec!["news".to_string(), " news ".to_string()],
            summary: None,
            content: Some("# Body".to_string()),
            content_file: None,
            cover: None,
        }
    }

    #[test]
    fn test_create_and_delete_by_prefix() {
        let output = Output::new(OutputFormat::Quiet);
        let mut newsroom = newsroom();

        create(&mut newsroom, args("Budget", "Desk"), &output).unwrap();
        let article = newsroom.articles()[0].clone();
        assert_eq!(article.tags, vec!["news"]);
        assert_eq!(article.category, "General");
        assert_eq!(article.content, "# Body");

        delete(&mut newsroom, &article.id[..6], true, &output).unwrap();
        assert!(newsroom.articles().is_empty());
    }

    #[test]
    fn test_create_rejects_missing_author() {
        let output = Output::new(OutputFormat::Quiet);
        let mut newsroom = newsroom();

        let err = create(&mut newsroom, args("Budget", ""), &output).unwrap_err();
        assert_eq!(err.to_string(), "Please enter the author.");
        assert!(newsroom.articles().is_empty());
    }

    #[test]
    fn test_content_from_file() {
        let output = Output::new(OutputFormat::Quiet);
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("body.md");
        std::fs::write(&path, "From a file").unwrap();

        let mut newsroom = newsroom();
        let mut a = args("Budget", "Desk");
        a.content = None;
        a.content_file = Some(path);
        create(&mut newsroom, a, &output).unwrap();
        assert_eq!(newsroom.articles()[0].content, "From a file");
    }

    #[test]
    fn test_delete_without_yes_needs_a_prompt() {
        let mut newsroom = newsroom();
        let quiet = Output::new(OutputFormat::Quiet);
        create(&mut newsroom, args("Budget", "Desk"), &quiet).unwrap();
        create(&mut newsroom, args("Budget", "Desk"), &quiet).unwrap();
        let id = newsroom.articles()[0].id.clone();

        for format in [OutputFormat::Json, OutputFormat::Quiet] {
            let err = delete(&mut newsroom, &id, false, &Output::new(format)).unwrap_err();
            assert!(err.to_string().contains("--yes"));
        }
        assert_eq!(newsroom.articles().len(), 2);
        assert!(newsroom.article(&id).is_some());
    }
}
