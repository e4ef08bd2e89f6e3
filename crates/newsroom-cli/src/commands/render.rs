//! Render command handler

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};

use newsroom_core::markdown::render as render_markdown;
use newsroom_core::Config;

use crate::output::{Output, OutputFormat};

/// Render markdown from `file` (or stdin) with the configured policy
pub fn render(file: Option<&Path>, config: &Config, output: &Output) -> Result<()> {
    let source = match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read markdown file: {:?}", path))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read markdown from stdin")?;
            buf
        }
    };

    let html = render_markdown(&source, config.render_policy());

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "policy": config.render_policy(),
                    "html": html,
                })
            );
        }
        OutputFormat::Human | OutputFormat::Quiet => println!("{}", html),
    }
    Ok(())
}
