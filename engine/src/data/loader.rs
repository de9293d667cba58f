// Loads the daily history shown by the dashboard.
use shared::models::PriceTable;
use shared::utils::HistoryWindow;

use crate::data::provider::MarketDataProvider;
use crate::error::EngineError;

/// Ticker symbols are matched case-insensitively by the provider; normalize before requesting.
pub fn normalize_ticker(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}

/// Fetches daily bars for `ticker` over `window`.
///
/// An empty table means the provider knows no data for the symbol in that range.
pub async fn load_data(
    provider: &dyn MarketDataProvider,
    ticker: &str,
    window: &HistoryWindow,
) -> Result<PriceTable, EngineError> {
    let symbol = normalize_ticker(ticker);
    let end = window.end_instant();

    tracing::info!(
        provider = provider.name(),
        symbol = %symbol,
        start = %window.start,
        end = %end,
        "Loading daily history"
    );

    match provider.fetch_daily_bars(&symbol, window.start, end).await {
        Ok(table) => {
            tracing::info!(symbol = %symbol, rows = table.len(), "History loaded");
            Ok(table)
        }
        Err(e) => {
            tracing::error!(symbol = %symbol, kind = e.kind(), error = %e, "Failed to load history");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use shared::models::PriceBar;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingProvider {
        requests: Mutex<Vec<(String, DateTime<Utc>, DateTime<Utc>)>>,
    }

    #[async_trait]
    impl MarketDataProvider for RecordingProvider {
        fn name(&self) -> &str {
            "recording"
        }

        async fn fetch_daily_bars(
            &self,
            symbol: &str,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> Result<PriceTable, EngineError> {
            self.requests.lock().unwrap().push((symbol.to_string(), start, end));
            let bar = PriceBar {
                date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                open: 1.0,
                high: 2.0,
                low: 0.5,
                close: 1.5,
                adj_close: Some(1.5),
                volume: 10.0,
            };
            Ok(PriceTable::new(symbol, vec![bar]))
        }
    }

    #[test]
    fn test_normalize_ticker() {
        assert_eq!(normalize_ticker("  aapl "), "AAPL");
        assert_eq!(normalize_ticker("brk-b"), "BRK-B");
        assert_eq!(normalize_ticker(""), "");
    }

    #[tokio::test]
    async fn test_load_data_requests_normalized_symbol_and_window() {
        let provider = RecordingProvider::default();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 15, 0, 0).unwrap();
        let window = HistoryWindow::ending_at(now, 1);

        let table = load_data(&provider, " msft", &window).await.unwrap();
        assert_eq!(table.symbol, "MSFT");
        assert_eq!(table.len(), 1);

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let (symbol, start, end) = &requests[0];
        assert_eq!(symbol, "MSFT");
        assert_eq!(*start, Utc.with_ymd_and_hms(2023, 6, 2, 15, 0, 0).unwrap());
        assert_eq!(*end, Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
    }
}
