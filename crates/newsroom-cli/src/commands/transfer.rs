//! Export and import command handlers

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use newsroom_core::{KeyValueStore, Newsroom};

use crate::output::Output;

/// Write both collections to a JSON file
///
/// Defaults to `newsroom-export-<date>.json` in the current directory.
pub fn export<S: KeyValueStore>(
    newsroom: &Newsroom<S>,
    path: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let path = path.unwrap_or_else(|| PathBuf::from(newsroom.export_filename()));
    let json = newsroom.export_json()?;

    fs::write(&path, json).with_context(|| format!("Failed to write export file: {:?}", path))?;

    output.success(&format!(
        "Exported {} article(s) and {} newsletter issue(s) to {}",
        newsroom.articles().len(),
        newsroom.newsletters().len(),
        path.display()
    ));
    Ok(())
}

/// Replace collections from a JSON export
pub fn import<S: KeyValueStore>(
    newsroom: &mut Newsroom<S>,
    path: &Path,
    output: &Output,
) -> Result<()> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read import file: {:?}", path))?;

    let summary = newsroom
        .import(&json)
        .with_context(|| format!("Import failed for {:?}", path))?;

    output.success(&summary.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use chrono::NaiveDate;
    use newsroom_core::storage::MemoryStore;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    #[test]
    fn test_export_then_import() {
        let output = Output::new(OutputFormat::Quiet);
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("backup.json");

        let source = Newsroom::open(MemoryStore::new(), today());
        export(&source, Some(path.clone()), &output).unwrap();

        let mut target = Newsroom::open(MemoryStore::new(), today());
        import(&mut target, &path, &output).unwrap();
        assert_eq!(target.articles(), source.articles());
        assert_eq!(target.newsletters(), source.newsletters());
    }

    #[test]
    fn test_import_invalid_file_keeps_state() {
        let output = Output::new(OutputFormat::Quiet);
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();

        let mut newsroom = Newsroom::open(MemoryStore::new(), today());
        let before = newsroom.export();
        assert!(import(&mut newsroom, &path, &output).is_err());
        assert_eq!(newsroom.export(), before);
    }

    #[test]
    fn test_import_missing_file() {
        let output = Output::new(OutputFormat::Quiet);
        let mut newsroom = Newsroom::open(MemoryStore::new(), today());
        assert!(import(&mut newsroom, Path::new("/nonexistent.json"), &output).is_err());
    }
}
