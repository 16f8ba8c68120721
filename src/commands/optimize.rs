use std::path::Path;

use anyhow::Result;
use calsight_core::{AnalysisConfig, DateRange, analyze_schedule};

use crate::render::Render;

pub async fn run(file: &Path, range: &DateRange, config: &AnalysisConfig, json: bool) -> Result<()> {
    let events = super::load_events(file, range).await?;
    let report = analyze_schedule(&events, config);

    if json {
        return super::print_json(&report);
    }

    println!("{}", report.render());
    Ok(())
}
