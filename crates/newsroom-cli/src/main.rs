//! Newsroom CLI
//!
//! Command-line and terminal interface for Newsroom - articles and
//! newsletters for a student newsroom.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use newsroom_core::{Config, FileStore, Newsroom};

mod commands;
mod editor;
mod output;
mod text;
mod tui;

use output::{Output, OutputFormat};

/// Environment variable holding the log level
const LOG_ENV: &str = "NEWSROOM_LOG";

#[derive(Parser)]
#[command(name = "newsroom")]
#[command(about = "Newsroom - articles and newsletters for a student newsroom")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use a specific config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI interface
    Tui,
    /// Show the headline and the latest newsletter issues
    Home,
    /// Manage articles
    Article {
        #[command(subcommand)]
        command: ArticleCommands,
    },
    /// Manage newsletter issues
    Newsletter {
        #[command(subcommand)]
        command: NewsletterCommands,
    },
    /// List all tags with article counts
    Tags,
    /// Export all articles and newsletters to a JSON file
    Export {
        /// Output path (defaults to newsroom-export-<date>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import articles and/or newsletters from a JSON export
    Import {
        /// Path of the export file
        path: PathBuf,
    },
    /// Render markdown from a file (or stdin) to HTML
    Render {
        /// Markdown file; reads stdin when omitted
        file: Option<PathBuf>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show storage location and collection sizes
    Status,
}

#[derive(Subcommand)]
enum ArticleCommands {
    /// List articles, most recent first
    #[command(alias = "ls")]
    List {
        /// Only articles with this exact tag
        #[arg(short, long)]
        tag: Option<String>,
        /// Free-text filter
        #[arg(short = 'Q', long)]
        query: Option<String>,
    },
    /// Search articles
    Search {
        /// Search query
        query: String,
        /// Only articles with this exact tag
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// Show an article
    Show {
        /// Article ID (full or prefix)
        id: String,
        /// Print the rendered HTML fragment
        #[arg(long)]
        html: bool,
    },
    /// Publish a new article
    #[command(alias = "add")]
    Create(ArticleArgs),
    /// Delete an article
    #[command(alias = "rm")]
    Delete {
        /// Article ID (full or prefix)
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(clap::Args)]
pub struct ArticleArgs {
    /// Headline
    #[arg(short = 'T', long)]
    pub title: String,
    /// Byline name
    #[arg(short, long)]
    pub author: String,
    /// Publication date (YYYY-MM-DD, defaults to today)
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
    /// Section label
    #[arg(short, long)]
    pub category: Option<String>,
    /// Tags to add
    #[arg(short, long)]
    pub tag: Vec<String>,
    /// Short teaser
    #[arg(short, long)]
    pub summary: Option<String>,
    /// Body in markdown (opens editor if neither this nor --content-file is given)
    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,
    /// Read the body from a file
    #[arg(long)]
    pub content_file: Option<PathBuf>,
    /// Cover image file, embedded as a data URL
    #[arg(long)]
    pub cover: Option<PathBuf>,
}

#[derive(Subcommand)]
enum NewsletterCommands {
    /// List newsletter issues, most recent first
    #[command(alias = "ls")]
    List,
    /// Show a newsletter issue
    Show {
        /// Issue ID (full or prefix)
        id: String,
    },
    /// Add a newsletter issue
    #[command(alias = "add")]
    Create {
        /// Issue title
        #[arg(short = 'T', long)]
        title: String,
        /// Issue date (YYYY-MM-DD, defaults to today)
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Short teaser
        #[arg(short = 'H', long)]
        highlight: Option<String>,
        /// Body text (opens editor if not provided)
        #[arg(short, long)]
        content: Option<String>,
    },
    /// Open a subscription request in the default mail client
    Subscribe {
        /// Print the mailto link instead of opening it
        #[arg(long)]
        print: bool,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, trust_content, subscribe_email, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Commands that don't need the store
    match &cli.command {
        Some(Commands::Config { command }) => {
            return handle_config_command(command.clone(), config_path, &output);
        }
        Some(Commands::Render { file }) => {
            let config = Config::load_with_cli_override(config_path)
                .context("Failed to load configuration")?;
            init_logging(None);
            return commands::render::render(file.as_deref(), &config, &output);
        }
        _ => {}
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    // Handle TUI (default when no command given)
    let Some(command) = cli.command else {
        return tui::run(config);
    };
    if matches!(command, Commands::Tui) {
        return tui::run(config);
    }

    init_logging(None);
    let mut newsroom = Newsroom::open(FileStore::from_config(&config), today());

    match command {
        Commands::Tui | Commands::Config { .. } | Commands::Render { .. } => {
            unreachable!("handled above")
        }
        Commands::Home => commands::home::show(&newsroom, &output),
        Commands::Article { command } => {
            handle_article_command(command, &mut newsroom, &config, &output)
        }
        Commands::Newsletter { command } => {
            handle_newsletter_command(command, &mut newsroom, &config, &output)
        }
        Commands::Tags => commands::tag::list(&newsroom, &output),
        Commands::Export { output: path } => {
            commands::transfer::export(&newsroom, path, &output)
        }
        Commands::Import { path } => commands::transfer::import(&mut newsroom, &path, &output),
        Commands::Status => commands::status::show(&newsroom, &config, &output),
    }
}

fn handle_article_command(
    command: ArticleCommands,
    newsroom: &mut Newsroom<FileStore>,
    config: &Config,
    output: &Output,
) -> Result<()> {
    match command {
        ArticleCommands::List { tag, query } => {
            commands::article::list(newsroom, query, tag, output)
        }
        ArticleCommands::Search { query, tag } => {
            commands::article::list(newsroom, Some(query), tag, output)
        }
        ArticleCommands::Show { id, html } => {
            commands::article::show(newsroom, &id, html, config, output)
        }
        ArticleCommands::Create(args) => commands::article::create(newsroom, args, output),
        ArticleCommands::Delete { id, yes } => {
            commands::article::delete(newsroom, &id, yes, output)
        }
    }
}

fn handle_newsletter_command(
    command: NewsletterCommands,
    newsroom: &mut Newsroom<FileStore>,
    config: &Config,
    output: &Output,
) -> Result<()> {
    match command {
        NewsletterCommands::List => commands::newsletter::list(newsroom, output),
        NewsletterCommands::Show { id } => commands::newsletter::show(newsroom, &id, output),
        NewsletterCommands::Create {
            title,
            date,
            highlight,
            content,
        } => commands::newsletter::create(newsroom, title, date, highlight, content, output),
        NewsletterCommands::Subscribe { print } => {
            commands::newsletter::subscribe(config, print, output)
        }
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date argument
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), newsroom_core::models::DATE_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

/// Initialize logging
///
/// Only initializes if NEWSROOM_LOG is set. Logs to `writer` when given
/// (the TUI passes its log file), otherwise to stderr.
pub fn init_logging(writer: Option<std::fs::File>) {
    let Ok(log_level) = std::env::var(LOG_ENV) else {
        return;
    };

    let env_filter = EnvFilter::new(format!(
        "newsroom_core={},newsroom_cli={}",
        log_level, log_level
    ));

    // Ignore the error if a subscriber is already installed
    let _ = match writer {
        Some(file) => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .try_init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init(),
    };
}
