// Guards shared by both tabs.
use chrono::{DateTime, Utc};
use shared::models::PriceTable;

use crate::data::{load_data, MarketDataProvider};
use crate::error::EngineError;
use crate::models::{DashboardInputs, Notice, TabOutcome};

/// Runs the two input guards around a fetch.
///
/// A blank ticker stops before any request. An empty table stops after one.
pub async fn fetch_guarded(
    provider: &dyn MarketDataProvider,
    inputs: &DashboardInputs,
    now: DateTime<Utc>,
    tab: &'static str,
) -> Result<TabOutcome<PriceTable>, EngineError> {
    let Some(symbol) = inputs.symbol() else {
        tracing::warn!(tab, "Ticker is empty, skipping fetch");
        return Ok(TabOutcome::Notice(Notice::empty_ticker()));
    };

    let window = inputs.window(now);
    let table = load_data(provider, &symbol, &window).await?;
    if table.is_empty() {
        tracing::warn!(tab, symbol = %symbol, years = inputs.years, "No rows returned, treating ticker as invalid");
        return Ok(TabOutcome::Notice(Notice::invalid_ticker()));
    }

    Ok(TabOutcome::Ready(table))
}
