//! Provider abstraction for daily price history.
//!
//! A provider turns a symbol and a time range into a [`PriceTable`]. An
//! unknown symbol is not an error: providers return an empty table and leave
//! the decision to the caller. Transport and decoding failures are errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::models::PriceTable;

use crate::error::EngineError;

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Name used in log fields.
    fn name(&self) -> &str;

    /// Fetches daily bars for `symbol` with `start <= time < end`.
    async fn fetch_daily_bars(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<PriceTable, EngineError>;
}
