use ratatui::style::palette::tailwind;

mod settings;

pub use settings::*;

pub const PALETTES: [tailwind::Palette; 4] = [
    tailwind::INDIGO,
    tailwind::BLUE,
    tailwind::EMERALD,
    tailwind::RED,
];

pub const INFO_TEXT: [&str; 2] = [
    "(Esc) quit | (↑/↓) move row | (Enter) chart coin | (/) currency | (d) days",
    "(p) toggle panel | (Shift + →/←) cycle color",
];

pub const POLL_DURATION_MS: u64 = 50;
pub const ERROR_POPUP_DURATION_MS: u64 = 1500;

// Coin charted before the user picks one
pub const DEFAULT_COIN_ID: &str = "bitcoin";
pub const DEFAULT_COIN_NAME: &str = "Bitcoin";
pub const DEFAULT_COIN_SYMBOL: &str = "btc";
pub const DEFAULT_DAYS: u32 = 10;
pub const DAY_WINDOWS: [u32; 5] = [1, 7, 10, 30, 90];

pub const TOP_COINS_PER_PAGE: u32 = 10;

// Layout breakpoints, minimum terminal columns
pub const BREAKPOINTS: [(&str, u16); 4] = [("sm", 60), ("md", 100), ("lg", 140), ("xl", 180)];
pub const DOCKING_BREAKPOINT: &str = "lg";
pub const PANEL_WIDTH: u16 = 58;

// Chart
pub const CHART_LINE_COLOR: &str = "#5A67D8";
pub const CHART_SERIES_NAME: &str = "Price";
pub const CHART_STROKE_WIDTH: u16 = 2;
pub const CHART_TICK_AMOUNT: usize = 8;
pub const CHART_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Next entry of `DAY_WINDOWS`, wrapping around.
pub fn next_day_window(current: u32) -> u32 {
    DAY_WINDOWS
        .iter()
        .position(|days| *days == current)
        .map(|i| DAY_WINDOWS[(i + 1) % DAY_WINDOWS.len()])
        .unwrap_or(DAY_WINDOWS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_windows_cycle() {
        assert_eq!(next_day_window(1), 7);
        assert_eq!(next_day_window(10), 30);
        assert_eq!(next_day_window(90), 1);
        assert_eq!(next_day_window(3), 1);
    }
}
