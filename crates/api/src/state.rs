//! Shared state for API handlers

use clickhouse_lib::ClickhouseReader;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub(crate) client: ClickhouseReader,
}

impl std::fmt::Debug for ApiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiState").finish_non_exhaustive()
    }
}

impl ApiState {
    /// Create a new [`ApiState`] around a reader handle scoped to the server.
    pub const fn new(client: ClickhouseReader) -> Self {
        Self { client }
    }
}
