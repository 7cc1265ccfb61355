use const_format::concatcp;

// Root
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

// Paths
pub const COINS_MARKETS_PATH: &str = "/coins/markets";
pub const COINS_PATH: &str = "/coins";
pub const MARKET_CHART_SUFFIX: &str = "/market_chart";
pub const DASHBOARD_SEED_PATH: &str = "/api/dashboards/crypto";

// Headers
pub const USER_AGENT: &str = concatcp!("coin-dash/", env!("CARGO_PKG_VERSION"));

// Fixed query parameters of the markets endpoint
pub const MARKETS_ORDER: &str = "market_cap_desc";
pub const MARKETS_PAGE: u32 = 1;
pub const MARKETS_SPARKLINE: bool = false;
pub const MARKETS_PRICE_CHANGE_WINDOW: &str = "24h";

/// `{base}/coins/{id}/market_chart`
pub fn market_chart_path(base_url: &str, coin_id: &str) -> String {
    format!("{base_url}{COINS_PATH}/{coin_id}{MARKET_CHART_SUFFIX}")
}

pub fn coins_markets_path(base_url: &str) -> String {
    format!("{base_url}{COINS_MARKETS_PATH}")
}

pub fn dashboard_seed_path(seed_base: &str) -> String {
    format!("{}{DASHBOARD_SEED_PATH}", seed_base.trim_end_matches('/'))
}
