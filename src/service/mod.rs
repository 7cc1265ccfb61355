//! Data access layer: typed market-data reads plus the shared state slices.

use std::future::Future;
use std::rc::Rc;
use std::sync::Arc;

use log::{info, warn};

use crate::data::seed::DashboardSeed;
use crate::data::{Feed, PricePoint, currency};
use crate::request::{MarketApi, UpstreamError};
use crate::state::{MarketStore, Observable};
use crate::third_party::coingecko::data::CoinMarket;

pub struct MarketService<A> {
    api: Arc<A>,
    store: Rc<MarketStore>,
}

impl<A> Clone for MarketService<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            store: Rc::clone(&self.store),
        }
    }
}

impl<A: MarketApi + 'static> MarketService<A> {
    pub fn new(api: A, store: Rc<MarketStore>) -> Self {
        Self {
            api: Arc::new(api),
            store,
        }
    }

    /// The request owns its inputs, so it can be spawned on the runtime.
    pub fn fetch_top_coins_by_market_cap(
        &self,
        currency: &str,
    ) -> impl Future<Output = Result<Vec<CoinMarket>, UpstreamError>> + Send + use<A> {
        let api = Arc::clone(&self.api);
        let currency = currency.to_string();
        async move { api.top_coins_by_market_cap(&currency).await }
    }

    pub fn fetch_price_history(
        &self,
        coin_id: &str,
        currency: &str,
        days: u32,
    ) -> impl Future<Output = Result<Vec<PricePoint>, UpstreamError>> + Send + use<A> {
        let api = Arc::clone(&self.api);
        let coin_id = coin_id.to_string();
        let currency = currency.to_string();
        async move { api.price_history(&coin_id, &currency, days).await }
    }

    /// Last write wins. Unknown codes are kept and passed on to the API as-is.
    pub fn set_selected_currency(&self, code: &str) {
        let code = code.trim().to_uppercase();
        if !currency::is_supported(&code) {
            warn!("Selecting unsupported currency {code}");
        }
        info!("Selected currency {code}");
        self.store.selected_currency.set(code);
    }

    pub fn current_currency(&self) -> String {
        self.store.selected_currency.get()
    }

    pub fn get_supported_currencies(&self) -> Vec<String> {
        self.store.supported_currencies.get()
    }

    pub fn filter_currencies(&self, needle: &str) -> Vec<String> {
        currency::filter_currencies(&self.store.supported_currencies.get(), needle)
    }

    pub fn currency_symbol_for(&self, code: &str) -> Option<String> {
        currency::currency_symbol_for(code)
    }

    pub fn publish_snapshot(&self, result: Result<Vec<CoinMarket>, UpstreamError>) {
        match &result {
            Ok(rows) => info!("Market snapshot with {} rows", rows.len()),
            Err(err) => warn!("Market snapshot failed: {err}"),
        }
        self.store.snapshot.set(Feed::from(result));
    }

    /// Push whatever the dashboard seed provides into the shared state.
    pub fn apply_seed(&self, seed: &DashboardSeed) {
        if let Some(code) = &seed.currency {
            self.set_selected_currency(code);
        }
        if !seed.trending.is_empty() {
            self.store.snapshot.set(Feed::Ready(seed.trending.clone()));
        }
    }

    pub fn snapshot(&self) -> &Observable<Feed<Vec<CoinMarket>>> {
        &self.store.snapshot
    }

    pub fn selected_currency(&self) -> &Observable<String> {
        &self.store.selected_currency
    }

    pub fn supported_currencies(&self) -> &Observable<Vec<String>> {
        &self.store.supported_currencies
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::request::stub::{StubApi, market_row};

    fn service(api: StubApi) -> MarketService<StubApi> {
        MarketService::new(api, Rc::new(MarketStore::default()))
    }

    #[tokio::test]
    async fn fetches_go_through_the_api() {
        let api = StubApi::new();
        let service = service(api.clone());

        let rows = service.fetch_top_coins_by_market_cap("EUR").await.unwrap();
        let points = service.fetch_price_history("bitcoin", "EUR", 10).await.unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(points.len(), 4);
        assert_eq!(api.calls(), vec!["markets:EUR", "chart:bitcoin:EUR:10"]);
    }

    #[tokio::test]
    async fn identical_requests_are_not_coalesced() {
        let api = StubApi::new();
        let service = service(api.clone());

        let (a, b) = tokio::join!(
            service.fetch_top_coins_by_market_cap("usd"),
            service.fetch_top_coins_by_market_cap("usd")
        );

        assert!(a.is_ok() && b.is_ok());
        assert_eq!(api.calls().len(), 2);
    }

    #[tokio::test]
    async fn fetch_future_can_be_spawned() {
        let service = service(StubApi::new());

        let handle = tokio::spawn(service.fetch_price_history("ethereum", "usd", 1));

        let points = handle.await.unwrap().unwrap();
        assert_eq!(points[0].price, 3100.0);
    }

    #[test]
    fn selected_currency_replays_to_late_subscribers() {
        let service = service(StubApi::new());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let early = {
            let seen = Rc::clone(&seen);
            service
                .selected_currency()
                .subscribe(move |c: &String| seen.borrow_mut().push(format!("early:{c}")))
        };
        service.set_selected_currency("eur");

        let late = {
            let seen = Rc::clone(&seen);
            service
                .selected_currency()
                .subscribe(move |c: &String| seen.borrow_mut().push(format!("late:{c}")))
        };

        assert_eq!(*seen.borrow(), vec!["early:USD", "early:EUR", "late:EUR"]);
        assert_eq!(service.current_currency(), "EUR");
        drop((early, late));
    }

    #[test]
    fn unsupported_currency_is_passed_through() {
        let service = service(StubApi::new());

        service.set_selected_currency("doge");

        assert_eq!(service.current_currency(), "DOGE");
    }

    #[test]
    fn supported_currencies_do_not_alias() {
        let service = service(StubApi::new());

        let mut first = service.get_supported_currencies();
        first.truncate(1);
        first[0] = "MUTATED".to_string();

        let second = service.get_supported_currencies();
        assert_eq!(second.len(), 62);
        assert_eq!(second[0], "BTC");
    }

    #[test]
    fn filter_and_symbol_lookups() {
        let service = service(StubApi::new());

        assert_eq!(service.filter_currencies("bt"), vec!["BTC"]);
        assert_eq!(service.currency_symbol_for("GBP").as_deref(), Some("£"));
        assert_eq!(service.currency_symbol_for("sats"), None);
    }

    #[test]
    fn failed_snapshot_becomes_an_observable_error_state() {
        let service = service(StubApi::new());

        service.publish_snapshot(Err(UpstreamError::Status {
            status: 429,
            message: "Throttled".to_string(),
        }));

        assert_eq!(
            service.snapshot().get(),
            Feed::Failed("Upstream answered 429: Throttled".to_string())
        );
    }

    #[test]
    fn seed_sets_currency_and_rows() {
        let service = service(StubApi::new());
        let seed = DashboardSeed {
            currency: Some("jpy".to_string()),
            trending: vec![market_row("bitcoin", "btc", "Bitcoin", 1, 9_800_000.0)],
            ..DashboardSeed::default()
        };

        service.apply_seed(&seed);

        assert_eq!(service.current_currency(), "JPY");
        assert_eq!(service.snapshot().get().ready().map(Vec::len), Some(1));
    }
}
