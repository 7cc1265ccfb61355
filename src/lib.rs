//! Terminal crypto market dashboard backed by the CoinGecko API.
//!
//! Top coins by market cap on one side, a price chart for the selected coin on
//! the other, both following a shared display currency.

pub mod app;
pub mod config;
pub mod data;
pub mod request;
pub mod service;
pub mod state;
pub mod third_party;
pub mod ui;
pub mod view;
