use thiserror::Error;

/// Failure talking to the market-data API.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("Request error. Cause: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Upstream answered {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed upstream response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Failure loading the dashboard seed. Start-up cannot continue without it.
#[derive(Error, Debug)]
pub enum LocalDashboardSeedError {
    #[error("Dashboard seed request failed: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Cannot read dashboard seed {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dashboard seed: {0}")]
    Malformed(#[source] serde_json::Error),
}
