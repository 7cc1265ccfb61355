use crate::data::{CoinRef, Feed};
use crate::third_party::coingecko::data::CoinMarket;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrendingRow {
    pub coin: CoinRef,
    pub rank: Option<u32>,
    pub symbol: String,
    pub price: String,
    pub market_cap: String,
    pub change: String,
    pub trend: Trend,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum TrendingView {
    #[default]
    Loading,
    Unavailable(String),
    Rows(Vec<TrendingRow>),
}

/// `1234567.891` -> `1,234,567.89`; sub-unit prices keep six decimals.
pub fn format_price(value: f64, symbol: &str) -> String {
    if value.abs() < 1.0 {
        return format!("{symbol}{value:.6}");
    }

    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{symbol}{grouped}.{fraction}")
}

pub fn format_compact(value: f64, symbol: &str) -> String {
    if value >= 1_000_000_000_000.0 {
        format!("{symbol}{:.2}T", value / 1_000_000_000_000.0)
    } else if value >= 1_000_000_000.0 {
        format!("{symbol}{:.2}B", value / 1_000_000_000.0)
    } else if value >= 1_000_000.0 {
        format!("{symbol}{:.2}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{symbol}{:.2}K", value / 1_000.0)
    } else {
        format!("{symbol}{value:.2}")
    }
}

fn trend(change: Option<f64>) -> Trend {
    match change {
        Some(c) if c > 0.0 => Trend::Up,
        Some(c) if c < 0.0 => Trend::Down,
        _ => Trend::Flat,
    }
}

pub fn trending_rows(rows: &[CoinMarket], currency_symbol: Option<&str>) -> Vec<TrendingRow> {
    let symbol = currency_symbol.unwrap_or_default();

    rows.iter()
        .map(|row| TrendingRow {
            coin: CoinRef::from(row),
            rank: row.market_cap_rank,
            symbol: row.symbol.to_uppercase(),
            price: row
                .current_price
                .map(|p| format_price(p, symbol))
                .unwrap_or_else(|| "-".to_string()),
            market_cap: row
                .market_cap
                .map(|m| format_compact(m, symbol))
                .unwrap_or_else(|| "-".to_string()),
            change: row
                .price_change_percentage_24h
                .map(|c| format!("{c:+.2}%"))
                .unwrap_or_else(|| "-".to_string()),
            trend: trend(row.price_change_percentage_24h),
        })
        .collect()
}

pub fn trending_view(feed: &Feed<Vec<CoinMarket>>, currency_symbol: Option<&str>) -> TrendingView {
    match feed {
        Feed::Pending => TrendingView::Loading,
        Feed::Failed(reason) => TrendingView::Unavailable(reason.clone()),
        Feed::Ready(rows) => TrendingView::Rows(trending_rows(rows, currency_symbol)),
    }
}
