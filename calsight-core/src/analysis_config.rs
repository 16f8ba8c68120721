//! Analysis policy configuration.

use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

/// Gaps shorter than this between consecutive events get a buffer suggestion.
pub const DEFAULT_BUFFER_MINUTES: i64 = 15;
/// Upper bound for `buffer_minutes`: one day.
pub const MAX_BUFFER_MINUTES: i64 = 24 * 60;
/// More WORK events than this triggers a break recommendation.
pub const DEFAULT_OVERLOAD_THRESHOLD: usize = 4;
pub const DEFAULT_MAX_SLOTS: usize = 5;
pub const MIN_SLOT_MINUTES: u32 = 15;
pub const MAX_SLOT_MINUTES: u32 = 480;

const ENV_PREFIX: &str = "CALSIGHT";

fn default_working_hours_start() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn default_working_hours_end() -> NaiveTime {
    NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn default_buffer_minutes() -> i64 {
    DEFAULT_BUFFER_MINUTES
}

fn default_overload_threshold() -> usize {
    DEFAULT_OVERLOAD_THRESHOLD
}

fn default_max_slots() -> usize {
    DEFAULT_MAX_SLOTS
}

fn default_min_duration() -> u32 {
    MIN_SLOT_MINUTES
}

fn default_max_duration() -> u32 {
    MAX_SLOT_MINUTES
}

/// Policy knobs for the analysis engine.
///
/// Every field has a default, so an empty file (or no file) yields the
/// stock 09:00-18:00 / 15 minute / 4 event policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_working_hours_start")]
    pub working_hours_start: NaiveTime,

    #[serde(default = "default_working_hours_end")]
    pub working_hours_end: NaiveTime,

    #[serde(default = "default_buffer_minutes")]
    pub buffer_minutes: i64,

    #[serde(default = "default_overload_threshold")]
    pub overload_threshold: usize,

    #[serde(default = "default_max_slots")]
    pub max_slots: usize,

    #[serde(default = "default_min_duration")]
    pub min_duration_minutes: u32,

    #[serde(default = "default_max_duration")]
    pub max_duration_minutes: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            working_hours_start: default_working_hours_start(),
            working_hours_end: default_working_hours_end(),
            buffer_minutes: DEFAULT_BUFFER_MINUTES,
            overload_threshold: DEFAULT_OVERLOAD_THRESHOLD,
            max_slots: DEFAULT_MAX_SLOTS,
            min_duration_minutes: MIN_SLOT_MINUTES,
            max_duration_minutes: MAX_SLOT_MINUTES,
        }
    }
}

impl AnalysisConfig {
    /// ~/.config/calsight/analysis.toml
    pub fn config_path() -> AnalysisResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AnalysisError::Config("Could not determine config directory".into()))?
            .join("calsight");

        Ok(config_dir.join("analysis.toml"))
    }

    /// Load from the user config file (if present) layered under
    /// `CALSIGHT_*` environment variables.
    pub fn load() -> AnalysisResult<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load from an explicit path. `~` is expanded; a missing file is not an error.
    pub fn load_from(path: &Path) -> AnalysisResult<Self> {
        let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());

        let config: AnalysisConfig = Config::builder()
            .add_source(File::from(expanded).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .map_err(|e| AnalysisError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| AnalysisError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AnalysisResult<()> {
        if self.working_hours_end <= self.working_hours_start {
            return Err(AnalysisError::Config(format!(
                "working_hours_end ({}) must be after working_hours_start ({})",
                self.working_hours_end, self.working_hours_start
            )));
        }

        if !(1..=MAX_BUFFER_MINUTES).contains(&self.buffer_minutes) {
            return Err(AnalysisError::Config(format!(
                "buffer_minutes ({}) must be between 1 and {}",
                self.buffer_minutes, MAX_BUFFER_MINUTES
            )));
        }

        if self.max_slots == 0 {
            return Err(AnalysisError::Config("max_slots must be at least 1".into()));
        }

        if self.min_duration_minutes > self.max_duration_minutes {
            return Err(AnalysisError::Config(format!(
                "min_duration_minutes ({}) exceeds max_duration_minutes ({})",
                self.min_duration_minutes, self.max_duration_minutes
            )));
        }

        Ok(())
    }

    /// Reject slot durations outside the configured bounds.
    pub fn check_duration(&self, minutes: u32) -> AnalysisResult<()> {
        if minutes < self.min_duration_minutes || minutes > self.max_duration_minutes {
            return Err(AnalysisError::InvalidDuration {
                minutes,
                min: self.min_duration_minutes,
                max: self.max_duration_minutes,
            });
        }
        Ok(())
    }
}
