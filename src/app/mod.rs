use std::rc::Rc;

use color_eyre::Result;
use log::info;

use crate::config::{DEFAULT_COIN_ID, SeedSource, Settings};
use crate::data::CoinRef;
use crate::data::seed::DashboardSeed;
use crate::request::{LocalDashboardSeedError, MarketClient};
use crate::service::MarketService;
use crate::state::MarketStore;
use crate::ui::TuiApp;
use crate::view::ViewController;

#[derive(Debug, Clone)]
pub struct App {
    settings: Settings,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    async fn load_seed(
        &self,
        client: &MarketClient,
    ) -> Result<Option<DashboardSeed>, LocalDashboardSeedError> {
        let seed = match self.settings.seed_source() {
            SeedSource::None => return Ok(None),
            SeedSource::Http(base) => client.fetch_dashboard_seed(&base).await?,
            SeedSource::File(path) => DashboardSeed::from_file(&path)?,
        };
        info!(
            "Loaded dashboard seed: currency={:?} coin={:?} days={:?} trending={}",
            seed.currency,
            seed.coin.as_ref().map(|c| c.id.as_str()),
            seed.days,
            seed.trending.len()
        );
        Ok(Some(seed))
    }

    /// Coin charted before the user picks one from the table.
    fn initial_coin(&self, seed: Option<&DashboardSeed>) -> CoinRef {
        if let Some(coin) = seed.and_then(|s| s.coin.clone()) {
            return coin;
        }
        let id = self.settings.coin.trim().to_lowercase();
        if id == DEFAULT_COIN_ID {
            CoinRef::default()
        } else {
            CoinRef::new(id.clone(), id.clone(), id)
        }
    }

    pub async fn run(self) -> Result<()> {
        let client = MarketClient::new(&self.settings.base_url)?;
        info!("Market data from {}", client.base_url());

        let seed = self.load_seed(&client).await?;

        let store = Rc::new(MarketStore::new(&self.settings.currency));
        let service = MarketService::new(client, store);
        if let Some(seed) = &seed {
            service.apply_seed(seed);
        }

        let coin = self.initial_coin(seed.as_ref());
        let days = seed
            .as_ref()
            .and_then(|s| s.days)
            .unwrap_or(self.settings.days);
        let view = ViewController::new(service, coin, days);

        let terminal = ratatui::init();
        let result = TuiApp::new(view).run(terminal);
        ratatui::restore();
        result
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn app(args: &[&str]) -> App {
        let mut argv = vec!["coin-dash"];
        argv.extend_from_slice(args);
        App::new(Settings::try_parse_from(argv).unwrap())
    }

    #[tokio::test]
    async fn no_seed_source_means_no_seed() {
        let app = app(&[]);
        let client = MarketClient::new("http://127.0.0.1:1").unwrap();

        assert!(app.load_seed(&client).await.unwrap().is_none());
        assert_eq!(app.initial_coin(None), CoinRef::default());
    }

    #[tokio::test]
    async fn seed_over_http_picks_the_coin() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/dashboards/crypto"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"currency":"eur","coin":{"id":"solana","name":"Solana","symbol":"sol"},"days":30}"#,
            ))
            .mount(&server)
            .await;

        let uri = server.uri();
        let app = app(&["--seed-url", uri.as_str()]);
        let client = MarketClient::new(&uri).unwrap();
        let seed = app.load_seed(&client).await.unwrap().unwrap();

        assert_eq!(seed.currency.as_deref(), Some("eur"));
        assert_eq!(seed.days, Some(30));
        assert_eq!(app.initial_coin(Some(&seed)).id, "solana");
    }

    #[tokio::test]
    async fn missing_seed_file_is_an_error() {
        let app = app(&["--seed-file", "/nonexistent/coin-dash-seed.json"]);
        let client = MarketClient::new("http://127.0.0.1:1").unwrap();

        let err = app.load_seed(&client).await.unwrap_err();
        assert!(matches!(err, LocalDashboardSeedError::Read { .. }));
    }

    #[test]
    fn coin_flag_without_seed() {
        let app = app(&["--coin", "Ethereum"]);
        assert_eq!(app.initial_coin(None).id, "ethereum");
    }
}
