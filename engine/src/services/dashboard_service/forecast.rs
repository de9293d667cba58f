// "Forecast" tab: fit the additive model and build its table and figures.
use chrono::{DateTime, Utc};
use shared::utils::{forecast_table_view, PREVIEW_ROWS};

use super::helpers::fetch_guarded;
use crate::charts::{components_figure, forecast_figure};
use crate::config::ForecastSettings;
use crate::data::MarketDataProvider;
use crate::error::EngineError;
use crate::forecast::{prepare_training_frame, train_model, AdditiveModel};
use crate::models::{DashboardInputs, ForecastView, TabOutcome};

pub async fn handle_forecast(
    provider: &dyn MarketDataProvider,
    settings: &ForecastSettings,
    inputs: &DashboardInputs,
    now: DateTime<Utc>,
) -> Result<TabOutcome<ForecastView>, EngineError> {
    tracing::debug!(ticker = %inputs.ticker, years = inputs.years, "Building forecast tab");

    let table = match fetch_guarded(provider, inputs, now, "forecast").await? {
        TabOutcome::Ready(table) => table,
        TabOutcome::Notice(notice) => return Ok(TabOutcome::Notice(notice)),
    };

    let horizon_days = inputs.horizon_days();
    let frame = prepare_training_frame(&table);
    let mut model = AdditiveModel::new(settings.clone())?;
    let forecast = match train_model(&mut model, &frame, horizon_days) {
        Ok(forecast) => forecast,
        Err(e) => {
            tracing::error!(symbol = %table.symbol, rows = frame.len(), error = %e, "Forecast failed");
            return Err(e.into());
        }
    };

    let history = model.history().unwrap_or(frame.rows.as_slice());
    let view = ForecastView {
        symbol: table.symbol.clone(),
        forecast_tail: forecast_table_view(
            forecast.tail(PREVIEW_ROWS),
            forecast.tail_offset(PREVIEW_ROWS),
        ),
        forecast_chart: forecast_figure(history, &forecast),
        components: components_figure(&model, &forecast),
        horizon_days,
        total_rows: forecast.len(),
    };
    Ok(TabOutcome::Ready(view))
}
