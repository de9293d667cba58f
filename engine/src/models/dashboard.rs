// What the dashboard asks for and what each tab gets back.
use chrono::{DateTime, Utc};
use shared::chart::{ComponentsFigure, LineChart};
use shared::utils::{clamp_years, forecast_horizon_days, HistoryWindow, TableView};

use crate::data::normalize_ticker;

pub const EMPTY_TICKER_WARNING: &str = "Stock Ticker Empty";
pub const INVALID_TICKER_ERROR: &str = "Invalid Ticker";

/// The two widgets above the tabs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardInputs {
    pub ticker: String,
    pub years: u32,
}

impl DashboardInputs {
    pub fn new(ticker: impl Into<String>, years: u32) -> Self {
        Self {
            ticker: ticker.into(),
            years: clamp_years(years),
        }
    }

    /// Normalized symbol, or `None` when the ticker is blank.
    pub fn symbol(&self) -> Option<String> {
        let symbol = normalize_ticker(&self.ticker);
        (!symbol.is_empty()).then_some(symbol)
    }

    pub fn window(&self, now: DateTime<Utc>) -> HistoryWindow {
        HistoryWindow::ending_at(now, self.years)
    }

    pub fn horizon_days(&self) -> usize {
        forecast_horizon_days(self.years)
    }
}

/// A message shown instead of a tab's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Warning(String),
    Error(String),
}

impl Notice {
    pub fn empty_ticker() -> Self {
        Notice::Warning(EMPTY_TICKER_WARNING.to_string())
    }

    pub fn invalid_ticker() -> Self {
        Notice::Error(INVALID_TICKER_ERROR.to_string())
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Warning(m) | Notice::Error(m) => m,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Notice::Warning(_) => "⚠️",
            Notice::Error(_) => "🚨",
        }
    }
}

/// Either a guard message or the rendered content of a tab.
#[derive(Debug, Clone, PartialEq)]
pub enum TabOutcome<T> {
    Notice(Notice),
    Ready(T),
}

impl<T> TabOutcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> TabOutcome<U> {
        match self {
            TabOutcome::Notice(n) => TabOutcome::Notice(n),
            TabOutcome::Ready(v) => TabOutcome::Ready(f(v)),
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            TabOutcome::Notice(n) => Some(n),
            TabOutcome::Ready(_) => None,
        }
    }

    pub fn ready(self) -> Option<T> {
        match self {
            TabOutcome::Notice(_) => None,
            TabOutcome::Ready(v) => Some(v),
        }
    }
}

/// Content of the "Current" tab.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentView {
    pub symbol: String,
    /// First rows of the raw table, every column.
    pub raw_head: TableView,
    pub chart: LineChart,
    pub rows: usize,
}

/// Content of the "Forecast" tab.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastView {
    pub symbol: String,
    /// Last rows of the forecast table.
    pub forecast_tail: TableView,
    pub forecast_chart: LineChart,
    pub components: ComponentsFigure,
    pub horizon_days: usize,
    pub total_rows: usize,
}
