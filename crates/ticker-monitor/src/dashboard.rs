//! TUI dashboard using ratatui.

use chrono::{DateTime, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Cell, Paragraph, Row, Table},
    DefaultTerminal, Frame,
};
use std::io;
use std::time::Duration;
use ticker_core::types::Signal;
use ticker_store::TickerRow;

/// Dashboard state.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub policy_name: String,
    pub tracked: usize,
    pub rows: Vec<TickerRow>,
    pub messages: Vec<String>,
    pub updated: DateTime<Utc>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            policy_name: String::new(),
            tracked: 0,
            rows: Vec::new(),
            messages: Vec::new(),
            updated: Utc::now(),
        }
    }
}

/// Price cell text; blank when unset.
pub fn format_price(price: f64) -> String {
    if price.is_finite() && price > 0.0 {
        format!("{price:.2}")
    } else {
        String::new()
    }
}

/// Change cell text, e.g. `+4.20%`; blank when no buy price is set.
pub fn format_change(change: f64) -> String {
    if change.is_finite() {
        format!("{change:+.2}%")
    } else {
        String::new()
    }
}

fn change_color(change: f64) -> Color {
    if !change.is_finite() {
        Color::Reset
    } else if change >= 0.0 {
        Color::Green
    } else {
        Color::Red
    }
}

fn signal_color(signal: Signal) -> Color {
    match signal {
        Signal::Buy => Color::Green,
        Signal::Sell => Color::Red,
        Signal::Hold => Color::Reset,
    }
}

/// TUI Dashboard.
pub struct Dashboard {
    refresh_ms: u64,
}

impl Dashboard {
    /// Create a new dashboard.
    pub fn new(refresh_ms: u64) -> Self {
        Self { refresh_ms }
    }

    /// Run the dashboard until `q` or `Esc` is pressed.
    ///
    /// `snapshot` is polled once per refresh.
    pub fn run<F>(&self, snapshot: F) -> io::Result<()>
    where
        F: FnMut() -> DashboardState,
    {
        let mut terminal = ratatui::init();
        let result = self.run_loop(&mut terminal, snapshot);
        ratatui::restore();
        result
    }

    fn run_loop<F>(&self, terminal: &mut DefaultTerminal, mut snapshot: F) -> io::Result<()>
    where
        F: FnMut() -> DashboardState,
    {
        let tick = Duration::from_millis(self.refresh_ms);
        loop {
            let state = snapshot();
            terminal.draw(|f| self.ui(f, &state))?;

            if !event::poll(tick)? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                let quit = matches!(key.code, KeyCode::Char('q') | KeyCode::Esc);
                if quit && key.kind == KeyEventKind::Press {
                    return Ok(());
                }
            }
        }
    }

    fn ui(&self, frame: &mut Frame, state: &DashboardState) {
        let [header, tickers, alerts] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(7),
        ])
        .margin(1)
        .areas(frame.area());

        self.render_header(frame, header, state);
        self.render_tickers(frame, tickers, state);
        self.render_messages(frame, alerts, state);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let status = Line::from(vec![
            "tickerwatch".bold(),
            Span::raw(" | "),
            state.policy_name.as_str().cyan(),
            Span::raw(format!(
                " | {}/{} with history | {} | q to quit",
                state.rows.len(),
                state.tracked,
                state.updated.format("%H:%M:%S UTC")
            )),
        ]);
        let header = Paragraph::new(status).block(Block::bordered().title("Status"));
        frame.render_widget(header, area);
    }

    fn render_tickers(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let header = Row::new(["Symbol", "Buy Price", "Close", "Change", "Signal"])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let rows = state.rows.iter().map(|row| {
            Row::new([
                Cell::from(row.symbol.as_str()),
                Cell::from(format_price(row.buy_price)),
                Cell::from(format_price(row.close)),
                Cell::from(format_change(row.change)).fg(change_color(row.change)),
                Cell::from(row.signal.as_str()).fg(signal_color(row.signal)),
            ])
        });

        let table = Table::new(rows, [Constraint::Percentage(20); 5])
            .header(header)
            .block(Block::bordered().title("Tickers"));

        frame.render_widget(table, area);
    }

    fn render_messages(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        // newest first
        let lines: Vec<Line> = state
            .messages
            .iter()
            .rev()
            .take(5)
            .map(|m| Line::raw(m.as_str()))
            .collect();
        let paragraph = Paragraph::new(lines).block(Block::bordered().title("Alerts"));
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(250.0), "250.00");
        assert_eq!(format_price(0.0), "");
        assert_eq!(format_price(f64::NAN), "");
    }

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(20.0), "+20.00%");
        assert_eq!(format_change(-3.456), "-3.46%");
        assert_eq!(format_change(f64::NAN), "");
    }

    #[test]
    fn test_renders_rows() {
        let state = DashboardState {
            policy_name: "Band Trend".into(),
            tracked: 2,
            rows: vec![TickerRow {
                symbol: "TSLA".into(),
                buy_price: 250.0,
                close: 300.0,
                change: 20.0,
                signal: Signal::Buy,
            }],
            messages: vec!["buy TSLA +20.00%".into()],
            updated: Utc::now(),
        };

        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal
            .draw(|f| Dashboard::new(250).ui(f, &state))
            .unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("TSLA"));
        assert!(screen.contains("+20.00%"));
        assert!(screen.contains("Band Trend"));
    }
}
