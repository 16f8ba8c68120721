use std::sync::Arc;

use anyhow::Result;
use calsight_core::source::{EventSource, GraphqlSource};
use calsight_core::ScheduleAnalyzer;

use crate::settings::ServerSettings;

pub type SharedSource = Arc<dyn EventSource>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<ScheduleAnalyzer<SharedSource>>,
    pub settings: Arc<ServerSettings>,
}

impl AppState {
    /// State backed by the GraphQL endpoint from the settings.
    pub fn new(settings: ServerSettings) -> Result<Self> {
        let source = GraphqlSource::new(settings.backend_graphql_endpoint.clone())?;
        Ok(Self::with_source(settings, Arc::new(source)))
    }

    pub fn with_source(settings: ServerSettings, source: SharedSource) -> Self {
        let analyzer = ScheduleAnalyzer::new(source, settings.analysis.clone());
        AppState {
            analyzer: Arc::new(analyzer),
            settings: Arc::new(settings),
        }
    }
}
