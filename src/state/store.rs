use crate::data::{Feed, currency};
use crate::state::Observable;
use crate::third_party::coingecko::data::CoinMarket;

/// State shared by everything that reads market data.
///
/// Only `MarketService` writes to it; views subscribe.
pub struct MarketStore {
    pub snapshot: Observable<Feed<Vec<CoinMarket>>>,
    pub selected_currency: Observable<String>,
    pub supported_currencies: Observable<Vec<String>>,
}

impl MarketStore {
    pub fn new(currency: &str) -> Self {
        Self {
            snapshot: Observable::new(Feed::Pending),
            selected_currency: Observable::new(currency.to_uppercase()),
            supported_currencies: Observable::new(currency::supported_currencies()),
        }
    }
}

impl Default for MarketStore {
    fn default() -> Self {
        Self::new(currency::DEFAULT_CURRENCY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_pending_with_the_default_currency() {
        let store = MarketStore::default();

        assert_eq!(store.snapshot.get(), Feed::Pending);
        assert_eq!(store.selected_currency.get(), "USD");
        assert_eq!(store.supported_currencies.get().len(), 62);
    }

    #[test]
    fn initial_currency_is_upper_cased() {
        let store = MarketStore::new("eur");
        assert_eq!(store.selected_currency.get(), "EUR");
    }
}
