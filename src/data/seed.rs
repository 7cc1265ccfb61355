use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::CoinRef;
use crate::request::LocalDashboardSeedError;
use crate::third_party::coingecko::data::CoinMarket;

/// Initial state served by `/api/dashboards/crypto`.
///
/// Every field is optional: an empty object `{}` is a valid seed and leaves the
/// built-in defaults alone.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSeed {
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub coin: Option<CoinRef>,
    #[serde(default)]
    pub days: Option<u32>,
    #[serde(default)]
    pub trending: Vec<CoinMarket>,
}

impl DashboardSeed {
    pub fn parse(body: &str) -> Result<Self, LocalDashboardSeedError> {
        serde_json::from_str(body).map_err(LocalDashboardSeedError::Malformed)
    }

    pub fn from_file(path: &Path) -> Result<Self, LocalDashboardSeedError> {
        let body = std::fs::read_to_string(path).map_err(|source| LocalDashboardSeedError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_a_valid_seed() {
        assert_eq!(DashboardSeed::parse("{}").unwrap(), DashboardSeed::default());
    }

    #[test]
    fn seed_with_coin_and_rows() {
        let body = r#"{
            "currency": "eur",
            "coin": { "id": "ethereum", "name": "Ethereum", "symbol": "eth" },
            "days": 1,
            "trending": [
                { "id": "bitcoin", "symbol": "btc", "name": "Bitcoin", "current_price": 64000.5, "market_cap_rank": 1 }
            ]
        }"#;

        let seed = DashboardSeed::parse(body).unwrap();

        assert_eq!(seed.currency.as_deref(), Some("eur"));
        assert_eq!(seed.coin, Some(CoinRef::new("ethereum", "Ethereum", "eth")));
        assert_eq!(seed.days, Some(1));
        assert_eq!(seed.trending.len(), 1);
        assert_eq!(seed.trending[0].current_price, Some(64000.5));
    }

    #[test]
    fn garbage_is_reported_as_malformed() {
        let err = DashboardSeed::parse("<html>").unwrap_err();
        assert!(matches!(err, LocalDashboardSeedError::Malformed(_)));
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        let err = DashboardSeed::from_file(Path::new("/nonexistent/coin-dash/seed.json")).unwrap_err();
        match err {
            LocalDashboardSeedError::Read { path, .. } => {
                assert_eq!(path, "/nonexistent/coin-dash/seed.json")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
