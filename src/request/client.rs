use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::TOP_COINS_PER_PAGE;
use crate::data::PricePoint;
use crate::data::seed::DashboardSeed;
use crate::request::{LocalDashboardSeedError, UpstreamError};
use crate::third_party::coingecko::{api_path::*, data::*};

/// Read-only market data endpoints the dashboard consumes.
#[async_trait]
pub trait MarketApi: Send + Sync {
    /// Top coins ordered by market capitalisation, descending.
    async fn top_coins_by_market_cap(&self, currency: &str)
    -> Result<Vec<CoinMarket>, UpstreamError>;

    /// Raw `(timestamp, price)` points over the last `days` days.
    async fn price_history(
        &self,
        coin_id: &str,
        currency: &str,
        days: u32,
    ) -> Result<Vec<PricePoint>, UpstreamError>;
}

#[derive(Clone, Debug)]
pub struct MarketClient {
    http: Client,
    base_url: String,
}

impl MarketClient {
    pub fn new(base_url: &str) -> Result<Self, UpstreamError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, UpstreamError> {
        debug!("GET {url} {query:?}");

        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            warn!("GET {url} answered {status}: {message}");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch `{seed_base}/api/dashboards/crypto`.
    pub async fn fetch_dashboard_seed(
        &self,
        seed_base: &str,
    ) -> Result<DashboardSeed, LocalDashboardSeedError> {
        let seed: DashboardSeed = self.get_json(&dashboard_seed_path(seed_base), &[]).await?;
        Ok(seed)
    }
}

#[async_trait]
impl MarketApi for MarketClient {
    async fn top_coins_by_market_cap(
        &self,
        currency: &str,
    ) -> Result<Vec<CoinMarket>, UpstreamError> {
        let query = [
            ("vs_currency", currency.to_lowercase()),
            ("order", MARKETS_ORDER.to_string()),
            ("per_page", TOP_COINS_PER_PAGE.to_string()),
            ("page", MARKETS_PAGE.to_string()),
            ("sparkline", MARKETS_SPARKLINE.to_string()),
            ("price_change_percentage", MARKETS_PRICE_CHANGE_WINDOW.to_string()),
        ];

        self.get_json(&coins_markets_path(&self.base_url), &query)
            .await
    }

    async fn price_history(
        &self,
        coin_id: &str,
        currency: &str,
        days: u32,
    ) -> Result<Vec<PricePoint>, UpstreamError> {
        let query = [
            ("vs_currency", currency.to_lowercase()),
            ("days", days.to_string()),
        ];

        let chart: ApiMarketChartResponse = self
            .get_json(&market_chart_path(&self.base_url, coin_id), &query)
            .await?;

        Ok(chart.prices.into_iter().map(PricePoint::from).collect())
    }
}
