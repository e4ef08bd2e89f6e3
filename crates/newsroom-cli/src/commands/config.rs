//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use newsroom_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "trust_content": config.trust_content,
                    "subscribe_email": config.subscribe_email,
                    "log_file": config.log_file,
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:        {}", config.data_dir.display());
            println!("  trust_content:   {}", config.trust_content);
            println!("  subscribe_email: {}", config.subscribe_email);
            println!(
                "  log_file:        {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    // Save to the CLI-specified path or default
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

/// Apply a `key = value` assignment to `config`
fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_dir" => {
            config.data_dir = value.into();
        }
        "trust_content" => {
            config.trust_content = value
                .parse()
                .context("Invalid value for trust_content. Use 'true' or 'false'.")?;
        }
        "subscribe_email" => {
            if value.trim().is_empty() {
                bail!("subscribe_email cannot be empty");
            }
            config.subscribe_email = value.trim().to_string();
        }
        "log_file" => {
            config.log_file = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.into())
            };
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, trust_content, subscribe_email, log_file",
                key
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_known_keys() {
        let mut config = Config::default();

        apply(&mut config, "trust_content", "true").unwrap();
        assert!(config.trust_content);

        apply(&mut config, "subscribe_email", " desk@school.edu ").unwrap();
        assert_eq!(config.subscribe_email, "desk@school.edu");

        apply(&mut config, "log_file", "/tmp/n.log").unwrap();
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/n.log")));
        apply(&mut config, "log_file", "none").unwrap();
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_apply_rejects_bad_values() {
        let mut config = Config::default();
        assert!(apply(&mut config, "trust_content", "maybe").is_err());
        assert!(apply(&mut config, "subscribe_email", "  ").is_err());
        assert!(apply(&mut config, "sync_url", "x").is_err());
    }
}
