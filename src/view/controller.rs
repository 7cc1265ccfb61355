use log::{debug, info, warn};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::data::{CoinRef, Feed, PricePoint};
use crate::request::{MarketApi, UpstreamError};
use crate::service::MarketService;
use crate::state::{Observable, SubscriptionScope};
use crate::third_party::coingecko::data::CoinMarket;
use crate::view::chart::{ChartOptions, build_chart_options};
use crate::view::panel::{PanelState, panel_state};
use crate::view::trending::{TrendingView, trending_view};

/// Everything that can change the view, in arrival order.
#[derive(Debug)]
pub enum ViewEvent {
    Layout(Vec<String>),
    Currency(String),
    Snapshot(Feed<Vec<CoinMarket>>),
    TopCoins {
        currency: String,
        result: Result<Vec<CoinMarket>, UpstreamError>,
    },
    PriceHistory {
        generation: u64,
        result: Result<Vec<PricePoint>, UpstreamError>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Active,
    TornDown,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ChartView {
    #[default]
    Loading,
    Unavailable(String),
    Ready(ChartOptions),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    pub selected_currency: String,
    pub selected_coin: CoinRef,
    pub days: u32,
    pub trending: TrendingView,
    pub chart: ChartView,
    pub panel: PanelState,
}

/// Binds the data access layer and the layout signal into renderable state.
pub struct ViewController<A> {
    service: MarketService<A>,
    scope: SubscriptionScope,
    tx: mpsc::UnboundedSender<ViewEvent>,
    rx: mpsc::UnboundedReceiver<ViewEvent>,
    fetches: JoinSet<ViewEvent>,
    phase: Phase,
    state: ViewState,
    chart_generation: u64,
    dirty: bool,
    rebuilds: usize,
}

impl<A: MarketApi + 'static> ViewController<A> {
    pub fn new(service: MarketService<A>, coin: CoinRef, days: u32) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let state = ViewState {
            selected_currency: service.current_currency(),
            selected_coin: coin,
            days,
            trending: TrendingView::Loading,
            chart: ChartView::Loading,
            panel: PanelState::default(),
        };

        Self {
            service,
            scope: SubscriptionScope::new(),
            tx,
            rx,
            fetches: JoinSet::new(),
            phase: Phase::Idle,
            state,
            chart_generation: 0,
            dirty: true,
            rebuilds: 0,
        }
    }

    /// Subscribe to the layout signal and the shared market state.
    ///
    /// The selected currency replays on subscription, which starts the first
    /// trending and price-history fetches.
    pub fn activate(&mut self, layout: &Observable<Vec<String>>) {
        if self.phase != Phase::Idle {
            warn!("activate called in phase {:?}", self.phase);
            return;
        }
        self.phase = Phase::Active;

        let tx = self.tx.clone();
        self.scope.add(layout.subscribe(move |matching: &Vec<String>| {
            let _ = tx.send(ViewEvent::Layout(matching.clone()));
        }));

        let tx = self.tx.clone();
        self.scope
            .add(self.service.selected_currency().subscribe(move |code: &String| {
                let _ = tx.send(ViewEvent::Currency(code.clone()));
            }));

        let tx = self.tx.clone();
        self.scope
            .add(self.service.snapshot().subscribe(move |feed: &Feed<Vec<CoinMarket>>| {
                let _ = tx.send(ViewEvent::Snapshot(feed.clone()));
            }));

        info!("View activated with {} subscriptions", self.scope.len());
        self.pump();
    }

    pub fn select_coin(&mut self, coin: CoinRef) {
        if self.phase != Phase::Active {
            return;
        }
        info!("Selected coin {}", coin.id);
        self.state.chart = ChartView::Loading;
        self.state.selected_coin = coin;
        self.dirty = true;
        self.request_price_history();
    }

    /// Goes through the shared currency stream; the subscription does the re-fetch.
    pub fn currency_selected(&mut self, code: &str) {
        if self.phase != Phase::Active {
            return;
        }
        self.service.set_selected_currency(code);
        self.pump();
    }

    pub fn set_days(&mut self, days: u32) {
        if self.phase != Phase::Active || days == self.state.days {
            return;
        }
        self.state.days = days;
        self.state.chart = ChartView::Loading;
        self.dirty = true;
        self.request_price_history();
    }

    pub fn toggle_panel(&mut self) {
        self.state.panel.toggle();
        self.dirty = true;
    }

    /// Handle every event that is ready without waiting. Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        if self.phase == Phase::TornDown {
            return 0;
        }
        let mut handled = 0;
        loop {
            if let Ok(event) = self.rx.try_recv() {
                self.handle(event);
                handled += 1;
                continue;
            }
            match self.fetches.try_join_next() {
                Some(Ok(event)) => {
                    self.handle(event);
                    handled += 1;
                }
                Some(Err(err)) => {
                    if !err.is_cancelled() {
                        warn!("Fetch task failed: {err}");
                    }
                }
                None => break,
            }
        }
        handled
    }

    /// Wait for the next event and handle it. Returns `false` once torn down.
    pub async fn process_next(&mut self) -> bool {
        if self.phase == Phase::TornDown {
            return false;
        }

        let event = tokio::select! {
            Some(event) = self.rx.recv() => event,
            Some(joined) = self.fetches.join_next() => match joined {
                Ok(event) => event,
                Err(err) => {
                    if !err.is_cancelled() {
                        warn!("Fetch task failed: {err}");
                    }
                    return true;
                }
            },
            else => return false,
        };

        self.handle(event);
        true
    }

    /// Release every subscription and abort in-flight fetches.
    pub fn teardown(&mut self) {
        if self.phase == Phase::TornDown {
            return;
        }
        let released = self.scope.release_all();
        self.fetches.abort_all();
        while self.rx.try_recv().is_ok() {}
        self.phase = Phase::TornDown;
        info!("View torn down, released {released} subscriptions");
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn service(&self) -> &MarketService<A> {
        &self.service
    }

    /// Number of trending or chart view-model rebuilds so far.
    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }

    pub fn pending_fetches(&self) -> usize {
        self.fetches.len()
    }

    /// Returns whether the view needs a redraw and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn currency_symbol(&self) -> Option<String> {
        self.service.currency_symbol_for(&self.state.selected_currency)
    }

    fn handle(&mut self, event: ViewEvent) {
        if self.phase != Phase::Active {
            return;
        }

        match event {
            ViewEvent::Layout(matching) => {
                self.state.panel = panel_state(&matching);
                self.dirty = true;
            }
            ViewEvent::Currency(code) => {
                debug!("Currency stream delivered {code}");
                self.state.selected_currency = code;
                self.state.trending = TrendingView::Loading;
                self.state.chart = ChartView::Loading;
                self.dirty = true;
                self.request_top_coins();
                self.request_price_history();
            }
            ViewEvent::Snapshot(feed) => {
                let symbol = self.currency_symbol();
                self.state.trending = trending_view(&feed, symbol.as_deref());
                self.rebuilds += 1;
                self.dirty = true;
            }
            ViewEvent::TopCoins { currency, result } => {
                if currency != self.state.selected_currency {
                    debug!(
                        "Dropping {currency} market snapshot, {} is selected",
                        self.state.selected_currency
                    );
                    return;
                }
                self.service.publish_snapshot(result);
            }
            ViewEvent::PriceHistory { generation, result } => {
                if generation != self.chart_generation {
                    debug!("Dropping stale price history {generation}");
                    return;
                }
                self.state.chart = match result {
                    Ok(points) => {
                        debug!("Price history with {} points", points.len());
                        let symbol = self.currency_symbol();
                        ChartView::Ready(build_chart_options(&points, symbol.as_deref()))
                    }
                    Err(err) => {
                        warn!("Price history failed: {err}");
                        ChartView::Unavailable(err.to_string())
                    }
                };
                self.rebuilds += 1;
                self.dirty = true;
            }
        }
    }

    fn request_top_coins(&mut self) {
        let currency = self.state.selected_currency.clone();
        let request = self.service.fetch_top_coins_by_market_cap(&currency);
        self.fetches.spawn(async move {
            let result = request.await;
            ViewEvent::TopCoins { currency, result }
        });
    }

    fn request_price_history(&mut self) {
        self.chart_generation += 1;
        let generation = self.chart_generation;
        let request = self.service.fetch_price_history(
            &self.state.selected_coin.id,
            &self.state.selected_currency,
            self.state.days,
        );
        self.fetches.spawn(async move {
            let result = request.await;
            ViewEvent::PriceHistory { generation, result }
        });
    }
}
