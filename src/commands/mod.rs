pub mod conflicts;
pub mod optimize;
pub mod slots;

use std::path::Path;

use anyhow::{Context, Result};
use calsight_core::source::JsonFileSource;
use calsight_core::{DateRange, Event};
use serde::Serialize;

/// Read events from a JSON file and keep those starting inside `range`.
pub async fn load_events(file: &Path, range: &DateRange) -> Result<Vec<Event>> {
    let source = JsonFileSource::new(file);
    let events = source
        .load()
        .await
        .with_context(|| format!("Failed to read events from {}", source.path().display()))?;

    Ok(range.filter(events))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
