//! $EDITOR integration and y/N prompts

use anyhow::{anyhow, bail, Context, Result};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::Command;

/// Tried in order when neither $EDITOR nor $VISUAL is set
const FALLBACK_EDITORS: [&str; 4] = ["nano", "vim", "vi", "notepad"];

/// Edit `initial` in the user's editor and return the saved text
///
/// The text goes through a markdown temp file so editors pick the right
/// syntax mode. `$EDITOR` may carry arguments, e.g. `code --wait`.
pub fn edit_text(initial: &str) -> Result<String> {
    let (program, args) = editor_command()?;
    let draft = env::temp_dir().join(format!("newsroom_edit_{}.md", std::process::id()));

    fs::write(&draft, initial).with_context(|| format!("Failed to create draft file {:?}", draft))?;
    let result = run_editor(&program, &args, &draft);
    let _ = fs::remove_file(&draft);
    result
}

fn run_editor(program: &str, args: &[String], draft: &Path) -> Result<String> {
    let status = Command::new(program)
        .args(args)
        .arg(draft)
        .status()
        .with_context(|| format!("Failed to start editor '{}'", program))?;

    if !status.success() {
        bail!("Editor '{}' failed ({}); nothing was saved", program, status);
    }

    fs::read_to_string(draft).with_context(|| format!("Failed to read back {:?}", draft))
}

/// Drop whole-line `<!-- ... -->` hints and trim the result
pub fn strip_template(content: &str) -> String {
    let kept: Vec<&str> = content
        .lines()
        .filter(|line| !is_hint_line(line))
        .collect();
    kept.join("\n").trim().to_string()
}

fn is_hint_line(line: &str) -> bool {
    let line = line.trim();
    line.starts_with("<!--") && line.ends_with("-->")
}

/// Program and leading arguments of the editor to launch
fn editor_command() -> Result<(String, Vec<String>)> {
    let configured = ["EDITOR", "VISUAL"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find(|value| !value.trim().is_empty());

    if let Some(value) = configured {
        return split_command(&value)
            .ok_or_else(|| anyhow!("Could not parse editor command: {:?}", value));
    }

    FALLBACK_EDITORS
        .iter()
        .find(|name| command_exists(name))
        .map(|name| (name.to_string(), Vec::new()))
        .ok_or_else(|| anyhow!("No editor found. Set $EDITOR, for example: export EDITOR=nano"))
}

fn split_command(value: &str) -> Option<(String, Vec<String>)> {
    let mut parts = value.split_whitespace().map(str::to_string);
    let program = parts.next()?;
    Some((program, parts.collect()))
}

fn command_exists(cmd: &str) -> bool {
    Command::new("which")
        .arg(cmd)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Whether stdin is a terminal someone can answer prompts on
pub fn is_interactive() -> bool {
    atty::is(atty::Stream::Stdin)
}

/// Ask a y/N question on the terminal
///
/// Without a TTY on stdin the answer is always no.
pub fn confirm(prompt: &str) -> Result<bool> {
    if !is_interactive() {
        return Ok(false);
    }

    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
