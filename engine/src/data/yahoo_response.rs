// Wire types of the Yahoo `v8/finance/chart` endpoint and their conversion into price bars.
use chrono::DateTime;
use serde::Deserialize;
use shared::models::PriceBar;

/// Error code the endpoint uses for unknown or delisted symbols.
pub const NOT_FOUND_CODE: &str = "Not Found";

#[derive(Deserialize, Debug)]
pub struct ChartEnvelope {
    pub chart: ChartBody,
}

#[derive(Deserialize, Debug)]
pub struct ChartBody {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ChartError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

impl ChartError {
    pub fn is_not_found(&self) -> bool {
        self.code == NOT_FOUND_CODE
    }
}

#[derive(Deserialize, Debug)]
pub struct ChartResult {
    pub meta: ChartMeta,
    /// Absent when the symbol exists but has no bars in the range.
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    pub indicators: Indicators,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub exchange_timezone_name: Option<String>,
    /// Seconds east of UTC for the exchange.
    #[serde(default)]
    pub gmtoffset: i64,
}

#[derive(Deserialize, Debug, Default)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
    #[serde(default)]
    pub adjclose: Option<Vec<AdjClose>>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

#[derive(Deserialize, Debug, Default)]
pub struct AdjClose {
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}

fn at(values: &[Option<f64>], i: usize) -> Option<f64> {
    values.get(i).copied().flatten()
}

impl ChartResult {
    /// Converts the column arrays into rows.
    ///
    /// Timestamps are shifted into exchange time before taking the calendar date.
    /// Rows with a missing open, high, low or close are dropped.
    pub fn into_bars(self) -> Vec<PriceBar> {
        let Some(timestamps) = self.timestamp else {
            return Vec::new();
        };
        let quote = self.indicators.quote.into_iter().next().unwrap_or_default();
        let adjclose = self
            .indicators
            .adjclose
            .and_then(|a| a.into_iter().next())
            .unwrap_or_default()
            .adjclose;
        let offset = self.meta.gmtoffset;

        timestamps
            .iter()
            .enumerate()
            .filter_map(|(i, ts)| {
                let date = DateTime::from_timestamp(ts + offset, 0)?.date_naive();
                Some(PriceBar {
                    date,
                    open: at(&quote.open, i)?,
                    high: at(&quote.high, i)?,
                    low: at(&quote.low, i)?,
                    close: at(&quote.close, i)?,
                    adj_close: at(&adjclose, i),
                    volume: at(&quote.volume, i).unwrap_or(0.0),
                })
            })
            .collect()
    }
}
