// "Current" tab: raw table preview and the open/close chart.
use chrono::{DateTime, Utc};
use shared::utils::{price_table_view, PREVIEW_ROWS};

use super::helpers::fetch_guarded;
use crate::charts::price_figure;
use crate::data::MarketDataProvider;
use crate::error::EngineError;
use crate::models::{CurrentView, DashboardInputs, TabOutcome};

pub async fn handle_current(
    provider: &dyn MarketDataProvider,
    inputs: &DashboardInputs,
    now: DateTime<Utc>,
) -> Result<TabOutcome<CurrentView>, EngineError> {
    tracing::debug!(ticker = %inputs.ticker, years = inputs.years, "Building current tab");

    let outcome = fetch_guarded(provider, inputs, now, "current").await?;
    Ok(outcome.map(|table| CurrentView {
        raw_head: price_table_view(table.head(PREVIEW_ROWS), 0),
        chart: price_figure(&table),
        rows: table.len(),
        symbol: table.symbol,
    }))
}
