use serde::{Deserialize, Serialize};

/// One row of `/coins/markets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinMarket {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    #[serde(default)]
    pub high_24h: Option<f64>,
    #[serde(default)]
    pub low_24h: Option<f64>,
    #[serde(default)]
    pub price_change_24h: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// Body of `/coins/{id}/market_chart`. Every entry is `[timestamp_ms, value]`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMarketChartResponse {
    pub prices: Vec<[f64; 2]>,
    #[serde(default)]
    pub market_caps: Vec<[f64; 2]>,
    #[serde(default)]
    pub total_volumes: Vec<[f64; 2]>,
}

/// Error body CoinGecko sends with 4xx answers, e.g. an unknown coin id.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
}
