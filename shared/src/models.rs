use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily OHLCV row as returned by the market-data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Trading day in the exchange's local calendar.
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Split/dividend adjusted close. Not every symbol carries one.
    pub adj_close: Option<f64>,
    pub volume: f64,
}

/// Daily price history for a single symbol, in the order the provider returned it.
///
/// An empty table means the provider did not recognise the symbol or had no
/// rows inside the requested window.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceTable {
    pub symbol: String,
    pub bars: Vec<PriceBar>,
}

impl PriceTable {
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> Self {
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    pub fn empty(symbol: impl Into<String>) -> Self {
        Self::new(symbol, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// First `n` rows (fewer if the table is shorter).
    pub fn head(&self, n: usize) -> &[PriceBar] {
        &self.bars[..n.min(self.bars.len())]
    }
}

/// A `(ds, y)` row, the two columns the forecaster understands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingRow {
    pub ds: NaiveDate,
    pub y: f64,
}

/// Input table for the forecaster: `Date` renamed to `ds`, `Close` renamed to `y`,
/// every other column dropped.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrainingFrame {
    pub rows: Vec<TrainingRow>,
}

impl TrainingFrame {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<&PriceTable> for TrainingFrame {
    fn from(table: &PriceTable) -> Self {
        let rows = table
            .bars
            .iter()
            .map(|bar| TrainingRow {
                ds: bar.date,
                y: bar.close,
            })
            .collect();
        Self { rows }
    }
}

/// One row of model output: fitted values over history, predictions beyond it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub ds: NaiveDate,
    pub trend: f64,
    pub trend_lower: f64,
    pub trend_upper: f64,
    /// Weekly seasonal contribution, `None` when the seasonality is disabled.
    pub weekly: Option<f64>,
    /// Yearly seasonal contribution, `None` when the seasonality is disabled.
    pub yearly: Option<f64>,
    pub additive_terms: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
    pub yhat: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastTable {
    pub rows: Vec<ForecastRow>,
}

impl ForecastTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Last `n` rows (fewer if the table is shorter).
    pub fn tail(&self, n: usize) -> &[ForecastRow] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }

    /// Row offset of the first row returned by [`ForecastTable::tail`].
    pub fn tail_offset(&self, n: usize) -> usize {
        self.rows.len().saturating_sub(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close - 1.0,
            high: close + 1.0,
            low: close - 2.0,
            close,
            adj_close: Some(close * 0.98),
            volume: 1_000.0,
        }
    }

    #[test]
    fn test_training_frame_keeps_only_date_and_close() {
        let table = PriceTable::new("AAPL", vec![bar(2, 10.0), bar(3, 11.5)]);
        let frame = TrainingFrame::from(&table);

        assert_eq!(frame.len(), 2);
        assert_eq!(frame.rows[0].ds, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(frame.rows[0].y, 10.0);
        assert_eq!(frame.rows[1].y, 11.5);
    }

    #[test]
    fn test_head_is_bounded_by_table_length() {
        let table = PriceTable::new("AAPL", vec![bar(2, 10.0), bar(3, 11.0)]);
        assert_eq!(table.head(5).len(), 2);
        assert_eq!(table.head(1)[0].close, 10.0);
        assert!(PriceTable::empty("AAPL").head(5).is_empty());
    }

    #[test]
    fn test_tail_returns_last_rows() {
        let rows = (1..=8)
            .map(|d| ForecastRow {
                ds: NaiveDate::from_ymd_opt(2024, 1, d).unwrap(),
                trend: d as f64,
                trend_lower: d as f64,
                trend_upper: d as f64,
                weekly: None,
                yearly: None,
                additive_terms: 0.0,
                yhat_lower: d as f64,
                yhat_upper: d as f64,
                yhat: d as f64,
            })
            .collect();
        let table = ForecastTable { rows };

        let tail = table.tail(5);
        assert_eq!(tail.len(), 5);
        assert_eq!(tail[0].yhat, 4.0);
        assert_eq!(tail[4].yhat, 8.0);
        assert_eq!(table.tail_offset(5), 3);
        assert_eq!(table.tail_offset(20), 0);
    }
}
