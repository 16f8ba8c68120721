use anyhow::Result;
use calsight_server::settings::ServerSettings;
use calsight_server::state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "calsight_server=debug,calsight_core=info,tower_http=debug,axum::rejection=trace"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = ServerSettings::load()?;
    let addr = settings.bind_address();
    let state = AppState::new(settings)?;
    let app = calsight_server::app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("calsight-server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
