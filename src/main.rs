mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use calsight_core::AnalysisConfig;
use calsight_core::date_range::{DateRange, parse_day};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "calsight")]
#[command(about = "Find conflicts, tight schedules and free slots in your calendar")]
struct Cli {
    /// Print JSON instead of colored text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List overlapping events
    Conflicts {
        /// JSON file holding an array of events
        #[arg(short, long)]
        file: PathBuf,

        /// Only analyze events from this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Only analyze events until this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Conflicts plus buffer and workload suggestions
    Optimize {
        /// JSON file holding an array of events
        #[arg(short, long)]
        file: PathBuf,

        /// Only analyze events from this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Only analyze events until this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Free meeting slots within working hours on one day
    Slots {
        /// JSON file holding an array of events
        #[arg(short, long)]
        file: PathBuf,

        /// Day to search (YYYY-MM-DD or a timestamp with offset)
        #[arg(short, long)]
        date: String,

        /// Meeting length in minutes
        #[arg(long, default_value_t = 60)]
        duration: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AnalysisConfig::load()?;

    match cli.command {
        Commands::Conflicts { file, from, to } => {
            let range = DateRange::from_args(from.as_deref(), to.as_deref())?;
            commands::conflicts::run(&file, &range, cli.json).await
        }
        Commands::Optimize { file, from, to } => {
            let range = DateRange::from_args(from.as_deref(), to.as_deref())?;
            commands::optimize::run(&file, &range, &config, cli.json).await
        }
        Commands::Slots {
            file,
            date,
            duration,
        } => {
            let (day, offset) = parse_day(&date)?;
            commands::slots::run(&file, day, offset, duration, &config, cli.json).await
        }
    }
}
