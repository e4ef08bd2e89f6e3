//! Newsletter command handlers

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;

use newsroom_core::subscribe::subscribe_link;
use newsroom_core::{Config, KeyValueStore, NewsletterDraft, Newsroom};

use crate::commands::resolve_id;
use crate::editor::{edit_text, strip_template};
use crate::output::Output;

const CONTENT_TEMPLATE: &str = "<!-- Write the newsletter in plain text. Comment lines are removed. -->\n\n";

/// List the newsletter archive, most recent first
pub fn list<S: KeyValueStore>(newsroom: &Newsroom<S>, output: &Output) -> Result<()> {
    output.print_newsletters(&newsroom.sorted_newsletters());
    Ok(())
}

/// Show a single issue
pub fn show<S: KeyValueStore>(newsroom: &Newsroom<S>, id: &str, output: &Output) -> Result<()> {
    let id = resolve_id(
        id,
        newsroom
            .newsletters()
            .iter()
            .map(|n| (n.id.as_str(), n.title.as_str())),
        "newsletter issue",
    )?;
    let issue = newsroom
        .newsletter(&id)
        .ok_or_else(|| anyhow!("Newsletter issue not found: {}", id))?;

    output.print_newsletter(issue);
    Ok(())
}

/// Add a newsletter issue
pub fn create<S: KeyValueStore>(
    newsroom: &mut Newsroom<S>,
    title: String,
    date: Option<NaiveDate>,
    highlight: Option<String>,
    content: Option<String>,
    output: &Output,
) -> Result<()> {
    let mut draft = NewsletterDraft::new(newsroom.today());
    draft.title = title;
    if let Some(date) = date {
        draft.date = date;
    }
    draft.highlight = highlight.unwrap_or_default();
    draft.validate()?;

    draft.content = match content {
        Some(content) => content,
        None => strip_template(&edit_text(CONTENT_TEMPLATE)?),
    };

    let issue = newsroom.add_newsletter(draft)?;
    output.success(&format!("Added newsletter issue: {}", issue.id));
    Ok(())
}

/// Open (or print) the subscription mailto link
pub fn subscribe(config: &Config, print: bool, output: &Output) -> Result<()> {
    let link = subscribe_link(&config.subscribe_email);

    if print || !output.should_prompt() {
        println!("{}", link);
        return Ok(());
    }

    open::that(&link).context("Failed to open the default mail client")?;
    output.success(&format!("Opened a subscription request to {}", config.subscribe_email));
    Ok(())
}
