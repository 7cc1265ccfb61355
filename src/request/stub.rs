//! In-memory `MarketApi` for tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::data::PricePoint;
use crate::request::{MarketApi, UpstreamError};
use crate::third_party::coingecko::data::CoinMarket;

pub fn market_row(id: &str, symbol: &str, name: &str, rank: u32, price: f64) -> CoinMarket {
    CoinMarket {
        id: id.to_string(),
        symbol: symbol.to_string(),
        name: name.to_string(),
        image: None,
        current_price: Some(price),
        market_cap: Some(price * 1_000_000.0),
        market_cap_rank: Some(rank),
        total_volume: None,
        high_24h: None,
        low_24h: None,
        price_change_24h: None,
        price_change_percentage_24h: Some(-1.25),
        last_updated: None,
    }
}

/// Answers every call from fixed data and records what was asked.
#[derive(Clone, Default)]
pub struct StubApi {
    calls: Arc<Mutex<Vec<String>>>,
    failing: bool,
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), UpstreamError> {
        self.calls.lock().unwrap().push(call);
        if self.failing {
            return Err(UpstreamError::Status {
                status: 503,
                message: "service unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl MarketApi for StubApi {
    async fn top_coins_by_market_cap(
        &self,
        currency: &str,
    ) -> Result<Vec<CoinMarket>, UpstreamError> {
        self.record(format!("markets:{currency}"))?;
        Ok(vec![
            market_row("bitcoin", "btc", "Bitcoin", 1, 64000.0),
            market_row("ethereum", "eth", "Ethereum", 2, 3100.0),
            market_row("solana", "sol", "Solana", 5, 140.0),
        ])
    }

    async fn price_history(
        &self,
        coin_id: &str,
        currency: &str,
        days: u32,
    ) -> Result<Vec<PricePoint>, UpstreamError> {
        self.record(format!("chart:{coin_id}:{currency}:{days}"))?;
        let base = match coin_id {
            "bitcoin" => 64000.0,
            "ethereum" => 3100.0,
            _ => 1.0,
        };
        Ok((0..4)
            .map(|i| PricePoint::new(1_711_929_600_000 + i * 3_600_000, base + i as f64))
            .collect())
    }
}
