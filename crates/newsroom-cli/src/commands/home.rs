//! Home command handler

use anyhow::Result;

use newsroom_core::{KeyValueStore, Newsroom};

use crate::output::{hashtags, Output, OutputFormat};

/// Issues shown on the home screen
pub const HOME_NEWSLETTERS: usize = 4;

/// Show the headline article and the latest newsletter issues
pub fn show<S: KeyValueStore>(newsroom: &Newsroom<S>, output: &Output) -> Result<()> {
    let headline = newsroom.headline();
    let latest = newsroom.latest_newsletters(HOME_NEWSLETTERS);

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "headline": headline,
                    "newsletters": latest,
                })
            );
        }
        OutputFormat::Quiet => {
            if let Some(article) = headline {
                println!("{}", article.id);
            }
        }
        OutputFormat::Human => {
            println!("Headline");
            println!("========");
            match headline {
                Some(article) => {
                    println!("{}", article.title);
                    println!("{}", article.byline());
                    if !article.tags.is_empty() {
                        println!("{}", hashtags(&article.tags));
                    }
                    if !article.summary.is_empty() {
                        println!();
                        println!("{}", article.summary);
                    }
                    if article.has_cover() {
                        println!("[cover image]");
                    }
                }
                None => println!("No articles yet."),
            }

            println!();
            println!("Latest newsletters");
            println!("==================");
            if latest.is_empty() {
                println!("No newsletter issues yet.");
            }
            for issue in &latest {
                println!("{}  {}", issue.display_date(), issue.title);
                if !issue.highlight.is_empty() {
                    println!("            {}", issue.highlight);
                }
            }
        }
    }

    Ok(())
}
