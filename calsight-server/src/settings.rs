//! Server settings.

use std::path::PathBuf;

use anyhow::{Context, Result};
use calsight_core::AnalysisConfig;
use config::{Config, Environment, File};
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_GRAPHQL_ENDPOINT: &str = "http://localhost:8080/graphql";
const DEFAULT_BACKEND_HEALTH_URL: &str = "http://localhost:8080/actuator/health";

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_graphql_endpoint() -> String {
    DEFAULT_GRAPHQL_ENDPOINT.to_string()
}

fn default_backend_health_url() -> String {
    DEFAULT_BACKEND_HEALTH_URL.to_string()
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:8080".to_string(),
    ]
}

/// Settings for calsight-server.
///
/// Read from `~/.config/calsight/server.toml`, then `./calsight.toml`, then
/// `CALSIGHT_*` environment variables (nested keys use `__`, e.g.
/// `CALSIGHT_ANALYSIS__BUFFER_MINUTES=10`).
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_graphql_endpoint")]
    pub backend_graphql_endpoint: String,

    #[serde(default = "default_backend_health_url")]
    pub backend_health_url: String,

    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            host: default_host(),
            port: default_port(),
            backend_graphql_endpoint: default_graphql_endpoint(),
            backend_health_url: default_backend_health_url(),
            allowed_origins: default_allowed_origins(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl ServerSettings {
    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("calsight").join("server.toml"))
    }

    pub fn load() -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = Self::user_config_path() {
            builder = builder.add_source(File::from(path).required(false));
        }

        let settings: ServerSettings = builder
            .add_source(File::with_name("calsight").required(false))
            .add_source(
                Environment::with_prefix("CALSIGHT")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("allowed_origins")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read server settings")?
            .try_deserialize()
            .context("Invalid server settings")?;

        settings.analysis.validate()?;
        Ok(settings)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
