// Date-window arithmetic and table formatting shared by the engine and the GUI.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::models::{ForecastRow, PriceBar};

/// Bounds of the "Data Range (years)" slider.
pub const MIN_YEARS: u32 = 1;
pub const MAX_YEARS: u32 = 10;

/// A "year" is a flat 365 days for both the history window and the forecast horizon.
/// Leap days are not accounted for.
pub const DAYS_PER_YEAR: i64 = 365;

/// Number of rows shown in the raw/forecast table previews.
pub const PREVIEW_ROWS: usize = 5;

pub fn clamp_years(years: u32) -> u32 {
    years.clamp(MIN_YEARS, MAX_YEARS)
}

/// Forecast horizon in days for a slider value of `years`.
pub fn forecast_horizon_days(years: u32) -> usize {
    (clamp_years(years) as i64 * DAYS_PER_YEAR) as usize
}

/// The history window requested from the provider.
///
/// `start` keeps the time of day of "now"; `end` is today's date and is exclusive,
/// so the provider does not return today's partial bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryWindow {
    pub start: DateTime<Utc>,
    pub end: NaiveDate,
}

impl HistoryWindow {
    pub fn ending_at(now: DateTime<Utc>, years: u32) -> Self {
        let days = clamp_years(years) as i64 * DAYS_PER_YEAR;
        Self {
            start: now - Duration::days(days),
            end: now.date_naive(),
        }
    }

    /// `end` as an instant (midnight UTC).
    pub fn end_instant(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.end.and_time(NaiveTime::MIN), Utc)
    }
}

/// A rendered preview of a table: header, row labels and stringified cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableView {
    pub columns: Vec<String>,
    pub index: Vec<usize>,
    pub rows: Vec<Vec<String>>,
}

pub fn format_price(value: f64) -> String {
    format!("{:.6}", value)
}

pub fn format_volume(value: f64) -> String {
    format!("{:.0}", value)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn format_optional(value: Option<f64>) -> String {
    value.map(format_price).unwrap_or_else(|| "None".to_string())
}

/// Builds a preview of price rows. `offset` is the position of the first row in the full table.
pub fn price_table_view(bars: &[PriceBar], offset: usize) -> TableView {
    let columns = ["Date", "Open", "High", "Low", "Close", "Adj Close", "Volume"]
        .iter()
        .map(|c| c.to_string())
        .collect();

    let rows = bars
        .iter()
        .map(|bar| {
            vec![
                format_date(bar.date),
                format_price(bar.open),
                format_price(bar.high),
                format_price(bar.low),
                format_price(bar.close),
                format_optional(bar.adj_close),
                format_volume(bar.volume),
            ]
        })
        .collect();

    TableView {
        columns,
        index: (offset..offset + bars.len()).collect(),
        rows,
    }
}

/// Builds a preview of forecast rows. Disabled seasonalities get no column.
pub fn forecast_table_view(rows: &[ForecastRow], offset: usize) -> TableView {
    let has_weekly = rows.iter().any(|r| r.weekly.is_some());
    let has_yearly = rows.iter().any(|r| r.yearly.is_some());

    let mut columns = vec!["ds", "trend", "yhat_lower", "yhat_upper", "trend_lower", "trend_upper", "additive_terms"];
    if has_weekly {
        columns.push("weekly");
    }
    if has_yearly {
        columns.push("yearly");
    }
    columns.push("yhat");

    let cells = rows
        .iter()
        .map(|row| {
            let mut cells = vec![
                format_date(row.ds),
                format_price(row.trend),
                format_price(row.yhat_lower),
                format_price(row.yhat_upper),
                format_price(row.trend_lower),
                format_price(row.trend_upper),
                format_price(row.additive_terms),
            ];
            if has_weekly {
                cells.push(format_optional(row.weekly));
            }
            if has_yearly {
                cells.push(format_optional(row.yearly));
            }
            cells.push(format_price(row.yhat));
            cells
        })
        .collect();

    TableView {
        columns: columns.into_iter().map(String::from).collect(),
        index: (offset..offset + rows.len()).collect(),
        rows: cells,
    }
}
