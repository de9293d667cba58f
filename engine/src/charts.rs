// Figure builders: tables in, chart descriptions out. Drawing happens in the GUI.
use shared::chart::{
    date_to_x, Band, ChartPoint, ComponentsFigure, LineChart, Series, SeriesStyle, XAxisKind,
};
use shared::models::{ForecastRow, ForecastTable, PriceTable, TrainingRow};

use crate::forecast::{AdditiveModel, Seasonality};

pub const OPEN_COLOR: &str = "#636efa";
pub const CLOSE_COLOR: &str = "#ef553b";
pub const ACTUAL_COLOR: &str = "#000000";
pub const PREDICTED_COLOR: &str = "#0072b2";
pub const INTERVAL_COLOR: &str = "rgba(0, 114, 178, 0.2)";

/// Width of the forecast chart in pixels.
pub const FORECAST_CHART_WIDTH: u32 = 700;

fn series(name: &str, color: &str, style: SeriesStyle, points: Vec<ChartPoint>) -> Series {
    Series {
        name: name.to_string(),
        color: color.to_string(),
        style,
        points,
    }
}

/// Open and close prices over time, with a range slider.
pub fn price_figure(table: &PriceTable) -> LineChart {
    let open = table
        .bars
        .iter()
        .map(|b| ChartPoint::new(date_to_x(b.date), b.open))
        .collect();
    let close = table
        .bars
        .iter()
        .map(|b| ChartPoint::new(date_to_x(b.date), b.close))
        .collect();

    LineChart::new("Time Series Data", XAxisKind::Date)
        .with_series(series("Stock Open", OPEN_COLOR, SeriesStyle::Line, open))
        .with_series(series("Stock Close", CLOSE_COLOR, SeriesStyle::Line, close))
        .with_range_slider()
}

fn uncertainty_band(
    name: &str,
    forecast: &ForecastTable,
    lower: fn(&ForecastRow) -> f64,
    upper: fn(&ForecastRow) -> f64,
) -> Band {
    Band {
        name: name.to_string(),
        color: INTERVAL_COLOR.to_string(),
        lower: forecast
            .rows
            .iter()
            .map(|r| ChartPoint::new(date_to_x(r.ds), lower(r)))
            .collect(),
        upper: forecast
            .rows
            .iter()
            .map(|r| ChartPoint::new(date_to_x(r.ds), upper(r)))
            .collect(),
    }
}

/// Actual values as markers, the prediction as a line and the uncertainty interval as a band.
pub fn forecast_figure(history: &[TrainingRow], forecast: &ForecastTable) -> LineChart {
    let actual = history
        .iter()
        .map(|r| ChartPoint::new(date_to_x(r.ds), r.y))
        .collect();
    let predicted = forecast
        .rows
        .iter()
        .map(|r| ChartPoint::new(date_to_x(r.ds), r.yhat))
        .collect();

    LineChart::new("Forecast Data", XAxisKind::Date)
        .with_band(uncertainty_band("Interval", forecast, |r| r.yhat_lower, |r| r.yhat_upper))
        .with_series(series("Actual", ACTUAL_COLOR, SeriesStyle::Markers, actual))
        .with_series(series("Predicted", PREDICTED_COLOR, SeriesStyle::Line, predicted))
        .with_range_slider()
        .with_width(FORECAST_CHART_WIDTH)
}

/// One panel per component: trend with its interval, then each enabled seasonality.
pub fn components_figure(model: &AdditiveModel, forecast: &ForecastTable) -> ComponentsFigure {
    let trend_points = forecast
        .rows
        .iter()
        .map(|r| ChartPoint::new(date_to_x(r.ds), r.trend))
        .collect();
    let mut panels = vec![LineChart::new("trend", XAxisKind::Date)
        .with_band(uncertainty_band("trend interval", forecast, |r| r.trend_lower, |r| r.trend_upper))
        .with_series(series("trend", PREDICTED_COLOR, SeriesStyle::Line, trend_points))];

    for (seasonality, axis) in [
        (Seasonality::Weekly, XAxisKind::Weekday),
        (Seasonality::Yearly, XAxisKind::DayOfYear),
    ] {
        if let Some(profile) = model.seasonal_profile(seasonality) {
            let points = profile
                .points
                .iter()
                .map(|(x, y)| ChartPoint::new(*x, *y))
                .collect();
            panels.push(
                LineChart::new(seasonality.name(), axis)
                    .with_series(series(seasonality.name(), PREDICTED_COLOR, SeriesStyle::Line, points)),
            );
        }
    }

    ComponentsFigure { panels }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ForecastSettings;
    use crate::forecast::{prepare_training_frame, train_model};
    use chrono::{Duration, NaiveDate};
    use shared::models::PriceBar;

    fn table(days: usize) -> PriceTable {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let bars = (0..days)
            .map(|i| PriceBar {
                date: start + Duration::days(i as i64),
                open: 50.0 + i as f64,
                high: 52.0 + i as f64,
                low: 49.0 + i as f64,
                close: 51.0 + i as f64,
                adj_close: None,
                volume: 10.0,
            })
            .collect();
        PriceTable::new("TEST", bars)
    }

    #[test]
    fn test_price_figure_has_open_and_close_series() {
        let chart = price_figure(&table(4));
        assert!(chart.range_slider);
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].name, "Stock Open");
        assert_eq!(chart.series[1].name, "Stock Close");
        assert_eq!(chart.series[0].points[0].y, 50.0);
        assert_eq!(chart.series[1].points[3].y, 54.0);
    }

    #[test]
    fn test_forecast_and_components_figures() {
        let frame = prepare_training_frame(&table(40));
        let mut model = AdditiveModel::new(ForecastSettings::default()).unwrap();
        let forecast = train_model(&mut model, &frame, 30).unwrap();

        let chart = forecast_figure(&frame.rows, &forecast);
        assert_eq!(chart.width, Some(FORECAST_CHART_WIDTH));
        assert!(chart.range_slider);
        assert_eq!(chart.series[0].name, "Actual");
        assert_eq!(chart.series[0].style, SeriesStyle::Markers);
        assert_eq!(chart.series[0].points.len(), 40);
        assert_eq!(chart.series[1].points.len(), 70);
        assert_eq!(chart.bands[0].lower.len(), 70);

        // 40 daily rows: weekly seasonality only.
        let components = components_figure(&model, &forecast);
        let titles: Vec<&str> = components.panels.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["trend", "weekly"]);
        assert_eq!(components.panels[1].x_axis, XAxisKind::Weekday);
        assert_eq!(components.panels[1].series[0].points.len(), 7);
    }
}
