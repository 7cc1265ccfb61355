use std::path::PathBuf;

use clap::Parser;

use crate::config::{DEFAULT_COIN_ID, DEFAULT_DAYS};
use crate::data::currency::DEFAULT_CURRENCY;
use crate::third_party::coingecko::api_path::COINGECKO_API_URL;

/// Where the dashboard seed comes from, if anywhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeedSource {
    None,
    Http(String),
    File(PathBuf),
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Terminal crypto market dashboard", long_about = None)]
pub struct Settings {
    /// Market data API root
    #[arg(long, env = "COINGECKO_BASE_URL", default_value = COINGECKO_API_URL)]
    pub base_url: String,

    /// Display currency selected at start-up
    #[arg(long, default_value = DEFAULT_CURRENCY)]
    pub currency: String,

    /// Coin id charted at start-up
    #[arg(long, default_value = DEFAULT_COIN_ID)]
    pub coin: String,

    /// Price history window in days
    #[arg(long, default_value_t = DEFAULT_DAYS)]
    pub days: u32,

    /// Server that answers `/api/dashboards/crypto`
    #[arg(long, env = "COIN_DASH_SEED_URL", conflicts_with = "seed_file")]
    pub seed_url: Option<String>,

    /// JSON file with the dashboard seed
    #[arg(long, env = "COIN_DASH_SEED_FILE")]
    pub seed_file: Option<PathBuf>,

    /// Log output; the terminal belongs to the dashboard
    #[arg(long, default_value = "/tmp/coin_dash.log")]
    pub log_file: PathBuf,
}

impl Settings {
    pub fn seed_source(&self) -> SeedSource {
        match (&self.seed_url, &self.seed_file) {
            (Some(url), _) => SeedSource::Http(url.clone()),
            (None, Some(path)) => SeedSource::File(path.clone()),
            (None, None) => SeedSource::None,
        }
    }
}
