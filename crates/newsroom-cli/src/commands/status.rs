//! Status command handler

use anyhow::Result;

use newsroom_core::storage::{ARTICLES_KEY, NEWSLETTERS_KEY};
use newsroom_core::{Config, FileStore, Newsroom};

use crate::output::{Output, OutputFormat};

/// Show storage location and collection sizes
pub fn show(newsroom: &Newsroom<FileStore>, config: &Config, output: &Output) -> Result<()> {
    let store = newsroom.store();
    let articles_size = store.size_of(ARTICLES_KEY);
    let newsletters_size = store.size_of(NEWSLETTERS_KEY);

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": store.dir(),
                    "render_policy": config.render_policy(),
                    "storage": {
                        "articles_size": articles_size,
                        "newsletters_size": newsletters_size,
                    },
                    "counts": {
                        "articles": newsroom.articles().len(),
                        "newsletters": newsroom.newsletters().len(),
                        "tags": newsroom.all_tags().len(),
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", store.dir().display());
        }
        OutputFormat::Human => {
            println!("Newsroom Status");
            println!("===============");
            println!();
            println!("Storage:");
            println!("  Location:    {}", store.dir().display());
            println!("  Articles:    {}", human_size(articles_size));
            println!("  Newsletters: {}", human_size(newsletters_size));
            println!();
            println!("Rendering:");
            println!(
                "  Content:     {}",
                if config.trust_content {
                    "trusted (raw HTML passes through)"
                } else {
                    "escaped"
                }
            );
            println!();
            println!("Contents:");
            println!("  Articles:    {}", newsroom.articles().len());
            println!("  Newsletters: {}", newsroom.newsletters().len());
            println!("  Tags:        {}", newsroom.all_tags().len());
        }
    }

    Ok(())
}

/// File size for display; absent files have not been saved yet
fn human_size(size: Option<u64>) -> String {
    match size {
        None => "not saved yet".to_string(),
        Some(bytes) if bytes < 1024 => format!("{} B", bytes),
        Some(bytes) if bytes < 1024 * 1024 => format!("{:.1} KB", bytes as f64 / 1024.0),
        Some(bytes) => format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(None), "not saved yet");
        assert_eq!(human_size(Some(512)), "512 B");
        assert_eq!(human_size(Some(2048)), "2.0 KB");
        assert_eq!(human_size(Some(3 * 1024 * 1024)), "3.0 MB");
    }
}
