//! Schema lifecycle tool: creates or removes the filter tables.
//!
//! Usage: `cargo run --bin schema -- install|uninstall|reset`
//!
//! Requires `DATABASE_URL`; honours `TABLE_PREFIX` (reads .env).

use anyhow::{bail, Context};
use recipient_filter::db::{self, schema};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "recipient_filter=info".into()),
        )
        .init();

    let action = std::env::args().nth(1).unwrap_or_default();
    let db_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let prefix = std::env::var("TABLE_PREFIX").unwrap_or_else(|_| "tb_".to_string());
    let options = schema::SchemaOptions::new(prefix);

    let pool = db::create_pool(&db_url, 2).await?;

    match action.as_str() {
        "install" => {
            let report = schema::install(&pool, &options).await?;
            println!(
                "[done] schema at version {} (applied: {:?})",
                report.current_version, report.applied
            );
        }
        "uninstall" => {
            schema::uninstall(&pool, &options).await?;
            println!("[done] filter tables removed");
        }
        "reset" => {
            let report = schema::reset(&pool, &options).await?;
            println!("[done] filter tables recreated at version {}", report.current_version);
        }
        other => bail!("unknown action '{other}', expected install, uninstall or reset"),
    }

    Ok(())
}
