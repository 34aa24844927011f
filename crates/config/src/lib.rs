//! Neoscope configuration
use clap::Parser;
use url::Url;

/// Default comma-separated list of origins allowed to call the API.
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

/// Clickhouse database configuration options
#[derive(Debug, Clone, Parser)]
pub struct ClickhouseOpts {
    /// Clickhouse URL
    #[clap(long = "clickhouse-url", env = "CLICKHOUSE_URL")]
    pub url: Url,
    /// Clickhouse database holding the `asteroids` and `close_approach` tables
    #[clap(long = "clickhouse-db", env = "CLICKHOUSE_DB")]
    pub db: String,
    /// Clickhouse username
    #[clap(long = "clickhouse-username", env = "CLICKHOUSE_USERNAME")]
    pub username: String,
    /// Clickhouse password
    #[clap(long = "clickhouse-password", env = "CLICKHOUSE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// API server configuration options
#[derive(Debug, Clone, Parser)]
pub struct ApiOpts {
    /// Host to bind the API server to
    #[clap(long = "api-host", env = "API_HOST", default_value = "127.0.0.1")]
    pub host: String,
    /// Port to bind the API server to
    #[clap(long = "api-port", env = "API_PORT", default_value = "3000")]
    pub port: u16,
    /// Comma-separated list of additional CORS origins
    #[clap(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = DEFAULT_ALLOWED_ORIGINS
    )]
    pub allowed_origins: Vec<String>,
}

/// CLI options for the API server
#[derive(Debug, Clone, Parser)]
pub struct Opts {
    /// Clickhouse database configuration
    #[clap(flatten)]
    pub clickhouse: ClickhouseOpts,

    /// API server configuration
    #[clap(flatten)]
    pub api: ApiOpts,

    /// Skip the startup check that the expected tables and columns exist
    #[clap(long, env = "SKIP_SCHEMA_CHECK")]
    pub skip_schema_check: bool,
}
