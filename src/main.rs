use sports_feed_mock::app;
use sports_feed_mock::state::AppConfig;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Log initialized");

    let config = AppConfig::from_env();
    tracing::info!("Config: {:?}", config);

    let app_state = sports_feed_mock::build_state(config)?;

    // 初回リクエストを待たずに時刻オフセットを確定させておく
    let dataset = app_state.feed.dataset().ensure_initialized()?;
    tracing::info!(
        "Timestamp offset: {:?} ms ({} posts)",
        app_state.feed.timestamp_offset()?,
        dataset.len()
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], app_state.config.port));
    tracing::info!("Mock feed server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    let router = app(app_state);
    axum::serve(listener, router).await?;

    Ok(())
}
