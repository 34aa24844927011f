//! Neoscope terminal entrypoint.

mod cli;
mod output;

use clap::Parser;
use clickhouse::{CatalogueQuery, ClickhouseReader};
use config::ClickhouseOpts;
use dotenvy::dotenv;
use eyre::Context;
use tracing::debug;
use tracing_subscriber::filter::EnvFilter;

use crate::cli::{Cli, Command};

fn reader(opts: ClickhouseOpts) -> eyre::Result<ClickhouseReader> {
    ClickhouseReader::new(opts.url, opts.db, opts.username, opts.password)
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Queries => {
            println!("{}", output::render_catalogue());
        }
        Command::Run { id, clickhouse } => {
            let query = id.parse::<CatalogueQuery>()?;
            let reader = reader(clickhouse)?;
            reader.ping().await?;
            debug!(query = %query.id(), "Running catalogue query");
            let table = reader.run_catalogue_query(query).await?;
            println!("{}", output::format_result(&query.to_string(), &table));
        }
        Command::Filter { args, clickhouse } => {
            let filter = args.to_filter();
            filter.validate().wrap_err("invalid filter")?;
            let reader = reader(clickhouse)?;
            reader.ping().await?;
            let table = reader.get_filtered_table(&filter).await?;
            let title = format!(
                "Approaches {} to {} (hazardous: {})",
                filter.start_date, filter.end_date, filter.hazardous
            );
            println!("{}", output::format_result(&title, &table));
        }
    }
    Ok(())
}
