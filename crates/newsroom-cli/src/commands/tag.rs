//! Tag command handlers

use anyhow::Result;

use newsroom_core::{KeyValueStore, Newsroom};

use crate::output::Output;

/// List all tags with article counts
pub fn list<S: KeyValueStore>(newsroom: &Newsroom<S>, output: &Output) -> Result<()> {
    output.print_tags(&newsroom.tags_with_counts());
    Ok(())
}
