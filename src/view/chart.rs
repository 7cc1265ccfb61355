//! Price chart configuration handed to the renderer.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use itertools::{Itertools, MinMaxResult};
use serde::Serialize;

use crate::config::{
    CHART_LINE_COLOR, CHART_SERIES_NAME, CHART_STROKE_WIDTH, CHART_TICK_AMOUNT,
    CHART_TIME_FORMAT,
};
use crate::data::PricePoint;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct XY {
    pub x: i64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub data: Vec<XY>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub chart_type: &'static str,
    pub colors: Vec<&'static str>,
    pub stroke_width: u16,
    pub tick_amount: usize,
    pub time_format: &'static str,
    pub currency_symbol: String,
    pub series: Vec<ChartSeries>,
    pub bounds: Option<Bounds>,
}

impl ChartOptions {
    /// Axis label for a timestamp in milliseconds.
    pub fn x_label<Tz>(&self, timestamp_ms: f64, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        DateTime::from_timestamp_millis(timestamp_ms.round() as i64)
            .map(|utc| utc.with_timezone(tz).format(self.time_format).to_string())
            .unwrap_or_default()
    }

    /// Price axis label, whole units.
    pub fn y_label(&self, value: f64) -> String {
        format!("{}{:.0}", self.currency_symbol, value)
    }

    /// Tooltip value, two decimals.
    pub fn tooltip(&self, value: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, value)
    }

    /// `tick_amount` evenly spaced x labels across the bounds.
    pub fn x_ticks<Tz>(&self, tz: &Tz) -> Vec<String>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let Some(bounds) = self.bounds else {
            return Vec::new();
        };
        if self.tick_amount < 2 || bounds.x_max <= bounds.x_min {
            return vec![self.x_label(bounds.x_min, tz)];
        }

        let step = (bounds.x_max - bounds.x_min) / (self.tick_amount - 1) as f64;
        (0..self.tick_amount)
            .map(|i| self.x_label(bounds.x_min + step * i as f64, tz))
            .collect()
    }

    /// Points of the first series as `(x, y)` for plotting.
    pub fn plot_points(&self) -> Vec<(f64, f64)> {
        self.series
            .first()
            .map(|series| series.data.iter().map(|p| (p.x as f64, p.y)).collect())
            .unwrap_or_default()
    }
}

fn bounds(points: &[PricePoint]) -> Option<Bounds> {
    let (first, last) = (points.first()?, points.last()?);
    let (y_min, y_max) = match points.iter().map(|p| p.price).minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => return None,
        MinMaxResult::OneElement(y) => (y, y),
        MinMaxResult::MinMax(min, max) => (min, max),
    };

    Some(Bounds {
        x_min: first.timestamp_ms as f64,
        x_max: last.timestamp_ms as f64,
        y_min,
        y_max,
    })
}

/// Build the line chart for one price series. A missing symbol prints bare numbers.
pub fn build_chart_options(points: &[PricePoint], currency_symbol: Option<&str>) -> ChartOptions {
    let data = points
        .iter()
        .map(|p| XY {
            x: p.timestamp_ms,
            y: p.price,
        })
        .collect();

    ChartOptions {
        chart_type: "line",
        colors: vec![CHART_LINE_COLOR],
        stroke_width: CHART_STROKE_WIDTH,
        tick_amount: CHART_TICK_AMOUNT,
        time_format: CHART_TIME_FORMAT,
        currency_symbol: currency_symbol.unwrap_or_default().to_string(),
        series: vec![ChartSeries {
            name: CHART_SERIES_NAME.to_string(),
            data,
        }],
        bounds: bounds(points),
    }
}
