use ratatui::style::{Color, palette::tailwind};

use crate::view::trending::Trend;

pub struct DashColors {
    pub buffer_bg: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub row_fg: Color,
    pub selected_row_style_fg: Color,
    pub normal_row_color: Color,
    pub alt_row_color: Color,
    pub border_color: Color,
    pub chart_line: Color,
    pub muted_fg: Color,
}

impl DashColors {
    pub const fn new(color: &tailwind::Palette) -> Self {
        Self {
            buffer_bg: tailwind::SLATE.c950,
            header_bg: color.c900,
            header_fg: tailwind::SLATE.c200,
            row_fg: tailwind::SLATE.c200,
            selected_row_style_fg: color.c400,
            normal_row_color: tailwind::SLATE.c950,
            alt_row_color: tailwind::SLATE.c900,
            border_color: color.c400,
            chart_line: color.c500,
            muted_fg: tailwind::SLATE.c500,
        }
    }

    pub fn trend_color(&self, trend: Trend) -> Color {
        match trend {
            Trend::Up => Color::Green,
            Trend::Down => Color::Red,
            Trend::Flat => self.row_fg,
        }
    }
}
