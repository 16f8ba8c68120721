use std::path::Path;

use anyhow::Result;
use calsight_core::{DateRange, detect_conflicts};
use owo_colors::OwoColorize;

use crate::render::Render;

pub async fn run(file: &Path, range: &DateRange, json: bool) -> Result<()> {
    let events = super::load_events(file, range).await?;
    let conflicts = detect_conflicts(&events);

    if json {
        return super::print_json(&conflicts);
    }

    if conflicts.is_empty() {
        println!("{}", "No conflicts found".dimmed());
        return Ok(());
    }

    println!(
        "{} across {} events",
        crate::render::count(conflicts.len(), "conflict").bold(),
        events.len()
    );
    for conflict in &conflicts {
        println!();
        println!("{}", conflict.render());
    }

    Ok(())
}
