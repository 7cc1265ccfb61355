use chrono::Local;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style, Stylize},
    symbols,
    text::{Line, Text},
    widgets::{
        Axis, Block, BorderType, Cell, Chart, Clear, Dataset, GraphType, HighlightSpacing, List,
        ListState, Paragraph, Row, Table, TableState,
    },
};
use std::time::Duration;
use tokio::time::Instant;

use crate::config::{
    ERROR_POPUP_DURATION_MS, INFO_TEXT, PALETTES, PANEL_WIDTH, POLL_DURATION_MS, next_day_window,
};
use crate::request::MarketApi;
use crate::state::Observable;
use crate::ui::DashColors;
use crate::view::chart::ChartOptions;
use crate::view::panel::{PanelMode, matching_breakpoints};
use crate::view::trending::{TrendingRow, TrendingView};
use crate::view::{ChartView, ViewController};

pub struct TuiApp<A> {
    view: ViewController<A>,
    layout: Observable<Vec<String>>,
    table_state: TableState,
    colors: DashColors,
    color_index: usize,
    popup: bool,
    popup_message: String,
    popup_state: ListState,
    error_popup_timer: Option<Instant>,
    redraw: bool,
}

impl<A: MarketApi + 'static> TuiApp<A> {
    pub fn new(view: ViewController<A>) -> Self {
        Self {
            view,
            layout: Observable::new(Vec::new()),
            table_state: TableState::default().with_selected(0),
            colors: DashColors::new(&PALETTES[0]),
            color_index: 0,
            popup: false,
            popup_message: String::new(),
            popup_state: ListState::default().with_selected(Some(0)),
            error_popup_timer: None,
            redraw: true,
        }
    }

    /// Feed the layout signal, then subscribe the view to it.
    pub fn activate(&mut self, width: u16) {
        self.layout.set(matching_breakpoints(width));
        self.view.activate(&self.layout);
    }

    fn rows(&self) -> &[TrendingRow] {
        match &self.view.state().trending {
            TrendingView::Rows(rows) => rows,
            _ => &[],
        }
    }

    fn next_row(&mut self) {
        let len = self.rows().len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 >= len => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn previous_row(&mut self) {
        let len = self.rows().len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    fn chart_highlighted_coin(&mut self) {
        let coin = self
            .table_state
            .selected()
            .and_then(|i| self.rows().get(i))
            .map(|row| row.coin.clone());
        if let Some(coin) = coin {
            self.view.select_coin(coin);
        }
    }

    fn next_color(&mut self) {
        self.color_index = (self.color_index + 1) % PALETTES.len();
        self.set_colors();
    }

    fn previous_color(&mut self) {
        let count = PALETTES.len();
        self.color_index = (self.color_index + count - 1) % count;
        self.set_colors();
    }

    fn set_colors(&mut self) {
        self.colors = DashColors::new(&PALETTES[self.color_index]);
    }

    fn toggle_popup(&mut self) {
        self.popup = !self.popup;
        self.popup_message.clear();
        self.popup_state.select(Some(0));
    }

    fn filtered_currencies(&self) -> Vec<String> {
        self.view.service().filter_currencies(&self.popup_message)
    }

    fn popup_next(&mut self) {
        let len = self.filtered_currencies().len();
        if len > 0 {
            let i = self.popup_state.selected().map_or(0, |i| (i + 1) % len);
            self.popup_state.select(Some(i));
        }
    }

    fn popup_previous(&mut self) {
        let len = self.filtered_currencies().len();
        if len > 0 {
            let i = self.popup_state.selected().map_or(0, |i| (i + len - 1) % len);
            self.popup_state.select(Some(i));
        }
    }

    fn confirm_currency(&mut self) -> Result<()> {
        let filtered = self.filtered_currencies();
        let code = self
            .popup_state
            .selected()
            .and_then(|i| filtered.get(i))
            .or_else(|| filtered.first())
            .cloned()
            .ok_or_else(|| {
                color_eyre::eyre::eyre!("No currency matches '{}'", self.popup_message)
            })?;

        self.view.currency_selected(&code);
        self.table_state.select(Some(0));
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.redraw = true;
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        if !self.popup {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return true,
                KeyCode::Char('j') | KeyCode::Down => self.next_row(),
                KeyCode::Char('k') | KeyCode::Up => self.previous_row(),
                KeyCode::Char('l') | KeyCode::Right if shift => self.next_color(),
                KeyCode::Char('h') | KeyCode::Left if shift => self.previous_color(),
                KeyCode::Enter => self.chart_highlighted_coin(),
                KeyCode::Char('d') => {
                    let days = next_day_window(self.view.state().days);
                    self.view.set_days(days);
                }
                KeyCode::Char('p') => self.view.toggle_panel(),
                KeyCode::Char('/') => self.toggle_popup(),
                _ => {}
            }
        } else {
            match key.code {
                KeyCode::Char('/') | KeyCode::Esc => self.toggle_popup(),
                KeyCode::Down => self.popup_next(),
                KeyCode::Up => self.popup_previous(),
                KeyCode::Backspace => {
                    let _ = self.popup_message.pop();
                    self.popup_state.select(Some(0));
                }
                KeyCode::Char(c) => {
                    self.popup_message.push(c);
                    self.popup_state.select(Some(0));
                }
                KeyCode::Enter => {
                    if self.confirm_currency().is_err() {
                        self.error_popup_timer = Some(Instant::now());
                    }
                    self.toggle_popup();
                }
                _ => {}
            }
        }
        false
    }

    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let size = terminal.size()?;
        self.activate(size.width);

        let result = self.event_loop(&mut terminal);
        self.view.teardown();
        result
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            self.view.pump();

            if self.view.take_dirty() || self.redraw || self.error_popup_timer.is_some() {
                terminal.draw(|frame| self.draw(frame))?;
                self.redraw = false;
            }

            if event::poll(Duration::from_millis(POLL_DURATION_MS))? {
                // Drain ALL events, not just one
                while event::poll(Duration::from_millis(0))? {
                    match event::read()? {
                        Event::Key(key) if key.kind == KeyEventKind::Press => {
                            if self.handle_key(key) {
                                return Ok(());
                            }
                        }
                        Event::Resize(width, _) => {
                            self.layout.set(matching_breakpoints(width));
                            self.redraw = true;
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let [main, footer] =
            Layout::vertical([Constraint::Min(8), Constraint::Length(4)]).areas(frame.area());
        let panel = self.view.state().panel;

        match panel.mode {
            PanelMode::Docked => {
                let [chart, side] =
                    Layout::horizontal([Constraint::Min(40), Constraint::Length(PANEL_WIDTH)])
                        .areas(main);
                self.render_chart(frame, chart);
                self.render_trending(frame, side);
            }
            PanelMode::Overlay => {
                self.render_chart(frame, main);
                if panel.open {
                    let [_, side] =
                        Layout::horizontal([Constraint::Fill(1), Constraint::Length(PANEL_WIDTH)])
                            .areas(main);
                    frame.render_widget(Clear, side);
                    self.render_trending(frame, side);
                }
            }
        }
        self.render_footer(frame, footer);

        if self.popup {
            self.render_popup(frame);
        }
        if let Some(error_popup_timer) = self.error_popup_timer {
            if error_popup_timer.elapsed().as_millis() > ERROR_POPUP_DURATION_MS.into() {
                self.error_popup_timer = None;
            } else {
                self.render_popup_not_found(frame);
            }
        }
    }

    fn chart_title(&self) -> String {
        let state = self.view.state();
        format!(
            " {} ({}) · {} · {}d ",
            state.selected_coin.name,
            state.selected_coin.symbol.to_uppercase(),
            state.selected_currency,
            state.days
        )
    }

    fn render_chart(&self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(self.colors.border_color))
            .title(self.chart_title())
            .bg(self.colors.buffer_bg);

        match &self.view.state().chart {
            ChartView::Loading => {
                self.render_placeholder(frame, area, block, "Loading price history…")
            }
            ChartView::Unavailable(reason) => self.render_placeholder(
                frame,
                area,
                block,
                &format!("Data unavailable\n{reason}"),
            ),
            ChartView::Ready(options) => self.render_price_chart(frame, area, block, options),
        }
    }

    fn render_placeholder(&self, frame: &mut Frame, area: Rect, block: Block, message: &str) {
        let paragraph = Paragraph::new(message)
            .style(Style::new().fg(self.colors.muted_fg))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
    }

    fn render_price_chart(
        &self,
        frame: &mut Frame,
        area: Rect,
        block: Block,
        options: &ChartOptions,
    ) {
        let Some(bounds) = options.bounds else {
            self.render_placeholder(frame, area, block, "No price points");
            return;
        };

        let points = options.plot_points();
        let name = options
            .series
            .first()
            .map(|series| series.name.clone())
            .unwrap_or_default();
        let datasets = vec![
            Dataset::default()
                .name(name)
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::new().fg(self.colors.chart_line))
                .data(&points),
        ];

        let ticks = options.x_ticks(&Local);
        let label_width = ticks.first().map_or(0, |t| t.len() + 2) as u16;
        let x_labels = if label_width * ticks.len() as u16 <= area.width {
            ticks
        } else {
            [ticks.first(), ticks.last()]
                .into_iter()
                .flatten()
                .cloned()
                .collect()
        };

        let pad = ((bounds.y_max - bounds.y_min) * 0.02).max(bounds.y_max.abs() * 0.001);
        let (y_min, y_max) = (bounds.y_min - pad, bounds.y_max + pad);
        let y_labels = [y_min, (y_min + y_max) / 2.0, y_max].map(|v| options.y_label(v));

        let last = points.last().map(|(_, y)| options.tooltip(*y)).unwrap_or_default();
        let chart = Chart::new(datasets)
            .block(block.title_bottom(Line::from(format!(" last {last} ")).right_aligned()))
            .x_axis(
                Axis::default()
                    .style(Style::new().fg(self.colors.muted_fg))
                    .bounds([bounds.x_min, bounds.x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(Style::new().fg(self.colors.muted_fg))
                    .bounds([y_min, y_max])
                    .labels(y_labels),
            );

        frame.render_widget(chart, area);
    }

    fn render_trending(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(self.colors.border_color))
            .title(" Top coins by market cap ")
            .bg(self.colors.buffer_bg);

        match &self.view.state().trending {
            TrendingView::Loading => {
                self.render_placeholder(frame, area, block, "Loading…");
                return;
            }
            TrendingView::Unavailable(reason) => {
                self.render_placeholder(frame, area, block, &format!("Data unavailable\n{reason}"));
                return;
            }
            TrendingView::Rows(_) => {}
        }

        let header_style = Style::default()
            .fg(self.colors.header_fg)
            .bg(self.colors.header_bg);
        let selected_row_style = Style::default()
            .add_modifier(Modifier::REVERSED)
            .fg(self.colors.selected_row_style_fg);

        let header: Row<'static> = ["#", "Coin", "Price", "Mkt cap", "24h"]
            .into_iter()
            .map(Cell::from)
            .collect::<Row>()
            .style(header_style);

        let colors = &self.colors;
        let rows: Vec<Row<'static>> = self
            .rows()
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let bg = if i % 2 == 0 {
                    colors.normal_row_color
                } else {
                    colors.alt_row_color
                };

                Row::new(vec![
                    Cell::from(row.rank.map(|r| r.to_string()).unwrap_or_default()),
                    Cell::from(row.symbol.clone()),
                    Cell::from(Text::from(row.price.clone()).right_aligned()),
                    Cell::from(Text::from(row.market_cap.clone()).right_aligned()),
                    Cell::from(Text::from(row.change.clone()).right_aligned())
                        .style(Style::new().fg(colors.trend_color(row.trend))),
                ])
                .style(Style::new().fg(colors.row_fg).bg(bg))
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(3),
                Constraint::Length(6),
                Constraint::Fill(2),
                Constraint::Fill(1),
                Constraint::Length(8),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(selected_row_style)
        .highlight_spacing(HighlightSpacing::Always)
        .bg(self.colors.buffer_bg);

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let state = self.view.state();
        let status = format!(
            "{} {} | {} days",
            state.selected_currency,
            self.view
                .service()
                .currency_symbol_for(&state.selected_currency)
                .unwrap_or_default(),
            state.days
        );
        let lines: Vec<Line> = INFO_TEXT
            .iter()
            .map(|line| Line::from(*line))
            .chain(std::iter::once(Line::from(status)))
            .collect();

        let info_footer = Paragraph::new(lines)
            .style(
                Style::new()
                    .fg(self.colors.row_fg)
                    .bg(self.colors.buffer_bg),
            )
            .centered()
            .block(
                Block::bordered()
                    .border_type(BorderType::Double)
                    .border_style(Style::new().fg(self.colors.border_color)),
            );
        frame.render_widget(info_footer, area);
    }

    fn render_popup(&mut self, frame: &mut Frame) {
        let area = self.popup_area(frame.area(), 40, 60);
        frame.render_widget(Clear, area);

        let [input, list] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).areas(area);

        let paragraph = Paragraph::new(self.popup_message.as_str())
            .block(Block::bordered().title("Currency"))
            .style(Style::default())
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, input);

        let items = self.filtered_currencies();
        let list_widget = List::new(items)
            .block(Block::bordered())
            .highlight_style(
                Style::default()
                    .add_modifier(Modifier::REVERSED)
                    .fg(self.colors.selected_row_style_fg),
            );
        frame.render_stateful_widget(list_widget, list, &mut self.popup_state);
    }

    fn render_popup_not_found(&mut self, frame: &mut Frame) {
        let area = self.popup_area(frame.area(), 40, 20);
        frame.render_widget(Clear, area);
        let paragraph = Paragraph::new("Not found")
            .block(Block::bordered().title("Currency"))
            .style(Style::default())
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn popup_area(&self, area: Rect, percent_x: u16, percent_y: u16) -> Rect {
        let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
        let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
        let [area] = vertical.areas(area);
        let [area] = horizontal.areas(area);
        area
    }
}
