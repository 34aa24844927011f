//! API server binary

use std::net::SocketAddr;

use clap::Parser;
use clickhouse::ClickhouseReader;
use config::Opts;
use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_subscriber::filter::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    if let Ok(custom_env_file) = std::env::var("ENV_FILE") {
        dotenvy::from_filename(custom_env_file)?;
    } else {
        dotenv().ok();
    }
    let opts = Opts::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    info!("🔭 Neoscope API starting...");

    let client = ClickhouseReader::new(
        opts.clickhouse.url,
        opts.clickhouse.db,
        opts.clickhouse.username,
        opts.clickhouse.password,
    )?;
    client.ping().await?;

    if opts.skip_schema_check {
        warn!("Skipping schema check");
    } else {
        let missing = client.verify_schema().await?;
        if !missing.is_empty() {
            eyre::bail!(
                "database `{}` is missing columns: {}",
                client.db_name(),
                missing.join(", ")
            );
        }
    }

    let addr: SocketAddr = format!("{}:{}", opts.api.host, opts.api.port).parse()?;
    server::run(addr, client, opts.api.allowed_origins).await
}
