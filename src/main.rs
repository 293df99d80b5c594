use std::net::SocketAddr;

use anyhow::Context;
use mimalloc::MiMalloc;
use recipient_filter::config::AppConfig;
use recipient_filter::db::{self, schema};
use recipient_filter::{routes, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// M-MIMALLOC-APP: Use mimalloc as global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recipient_filter=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let host: std::net::IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid BACKEND_HOST '{}'", config.host))?;
    let addr = SocketAddr::from((host, config.port));

    let pool = db::create_pool(&config.database_url, config.database_max_connections).await?;

    if config.auto_install {
        let report = schema::install(
            &pool,
            &schema::SchemaOptions::new(config.table_prefix.clone()),
        )
        .await?;
        tracing::info!(
            applied = ?report.applied,
            version = report.current_version,
            "Filter schema installed"
        );
    }

    tracing::info!(
        host = %addr,
        prefix = %config.table_prefix,
        fail_closed = config.fail_closed,
        "Starting recipient filter API server"
    );

    let state = AppState::new(pool, config)?;
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
