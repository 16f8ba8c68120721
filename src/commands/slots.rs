use std::path::Path;

use anyhow::Result;
use calsight_core::{AnalysisConfig, DateRange, SlotRequest, find_free_slots};
use chrono::{FixedOffset, NaiveDate};
use owo_colors::OwoColorize;

use crate::render::Render;

pub async fn run(
    file: &Path,
    day: NaiveDate,
    offset: FixedOffset,
    duration: u32,
    config: &AnalysisConfig,
    json: bool,
) -> Result<()> {
    config.check_duration(duration)?;

    let range = DateRange::for_day(day, offset)?;
    let events = super::load_events(file, &range).await?;
    let request = SlotRequest::new(day, duration).with_offset(offset);
    let slots = find_free_slots(&events, &request, config)?;

    if json {
        return super::print_json(&slots);
    }

    let heading = format!("{} ({} min)", day.format("%a %b %-d"), duration);
    println!("{}", heading.bold());

    if slots.is_empty() {
        println!("   {}", "No free slots within working hours".dimmed());
        return Ok(());
    }

    for slot in &slots {
        println!("   {}", slot.render());
    }

    Ok(())
}
