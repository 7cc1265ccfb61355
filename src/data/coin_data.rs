use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_COIN_ID, DEFAULT_COIN_NAME, DEFAULT_COIN_SYMBOL};

/// The coin whose price history is on screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinRef {
    pub id: String,
    pub name: String,
    pub symbol: String,
}

impl CoinRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            symbol: symbol.into(),
        }
    }
}

impl Default for CoinRef {
    fn default() -> Self {
        Self::new(DEFAULT_COIN_ID, DEFAULT_COIN_NAME, DEFAULT_COIN_SYMBOL)
    }
}

impl From<&crate::third_party::coingecko::data::CoinMarket> for CoinRef {
    fn from(row: &crate::third_party::coingecko::data::CoinMarket) -> Self {
        Self::new(row.id.clone(), row.name.clone(), row.symbol.clone())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp_ms: i64,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp_ms: i64, price: f64) -> Self {
        Self {
            timestamp_ms,
            price,
        }
    }
}

impl From<[f64; 2]> for PricePoint {
    fn from([timestamp_ms, price]: [f64; 2]) -> Self {
        Self::new(timestamp_ms as i64, price)
    }
}

/// Latest outcome of a background request.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Feed<T> {
    #[default]
    Pending,
    Ready(T),
    Failed(String),
}

impl<T> Feed<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Feed::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Feed::Ready(value) => Some(value),
            _ => None,
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for Feed<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Feed::Ready(value),
            Err(err) => Feed::Failed(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_coin_is_bitcoin() {
        let coin = CoinRef::default();
        assert_eq!(coin.id, "bitcoin");
        assert_eq!(coin.name, "Bitcoin");
        assert_eq!(coin.symbol, "btc");
    }

    #[test]
    fn price_point_from_api_pair() {
        let point = PricePoint::from([1711929600000.0, 71246.95]);
        assert_eq!(point.timestamp_ms, 1_711_929_600_000);
        assert_eq!(point.price, 71246.95);
    }

    #[test]
    fn feed_from_result() {
        let ok: Feed<u8> = Ok::<u8, String>(7).into();
        assert_eq!(ok.ready(), Some(&7));

        let failed: Feed<u8> = Err::<u8, String>("boom".to_string()).into();
        assert_eq!(failed, Feed::Failed("boom".to_string()));
        assert!(!failed.is_ready());
    }
}
