// Glue between a fetched price table and the additive model.
use shared::models::{ForecastTable, PriceTable, TrainingFrame};

use crate::forecast::model::AdditiveModel;
use crate::forecast::ForecastError;

/// Renames `Date` to `ds` and `Close` to `y`; every other column is dropped.
pub fn prepare_training_frame(table: &PriceTable) -> TrainingFrame {
    TrainingFrame::from(table)
}

/// Fits `model` on `frame` and predicts over the history plus `horizon_days` future days.
pub fn train_model(
    model: &mut AdditiveModel,
    frame: &TrainingFrame,
    horizon_days: usize,
) -> Result<ForecastTable, ForecastError> {
    model.fit(&frame.rows)?;
    let future = model.make_future_dataframe(horizon_days)?;
    let forecast = model.predict(&future)?;
    tracing::info!(
        history_rows = frame.len(),
        horizon_days,
        forecast_rows = forecast.len(),
        "Forecast produced"
    );
    Ok(forecast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ForecastSettings;
    use chrono::{Duration, NaiveDate};
    use shared::models::PriceBar;

    fn table(days: usize) -> PriceTable {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let bars = (0..days)
            .map(|i| PriceBar {
                date: start + Duration::days(i as i64),
                open: 100.0 + i as f64,
                high: 102.0 + i as f64,
                low: 99.0 + i as f64,
                close: 101.0 + i as f64,
                adj_close: Some(100.5 + i as f64),
                volume: 1_000.0,
            })
            .collect();
        PriceTable::new("TEST", bars)
    }

    #[test]
    fn test_training_frame_keeps_date_and_close_only() {
        let frame = prepare_training_frame(&table(3));
        assert_eq!(frame.len(), 3);
        assert_eq!(frame.rows[0].ds, NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
        assert_eq!(frame.rows[0].y, 101.0);
        assert_eq!(frame.rows[2].y, 103.0);
    }

    #[test]
    fn test_forecast_covers_history_and_horizon() {
        let frame = prepare_training_frame(&table(60));
        let mut model = AdditiveModel::new(ForecastSettings::default()).unwrap();
        let forecast = train_model(&mut model, &frame, 365).unwrap();
        assert_eq!(forecast.len(), 60 + 365);
        assert_eq!(forecast.rows[0].ds, frame.rows[0].ds);
        assert_eq!(forecast.rows[60].ds, frame.rows[59].ds + Duration::days(1));
    }

    #[test]
    fn test_single_row_is_a_forecast_error() {
        let frame = prepare_training_frame(&table(1));
        let mut model = AdditiveModel::new(ForecastSettings::default()).unwrap();
        let err = train_model(&mut model, &frame, 365).unwrap_err();
        assert!(err.to_string().contains("less than 2"));
    }
}
