//! Additive forecasting model.
//!
//! `y(t) = trend(t) + Σ seasonality(t) + ε`, where the trend is piecewise linear with
//! changepoints spread over the early part of the history and each seasonality is a
//! truncated Fourier series. Coefficients are fitted by penalised least squares; the
//! penalties play the role of priors (a tight prior on changepoint deltas, a loose
//! one on seasonal coefficients).
//!
//! Uncertainty combines the residual noise with the spread of possible future trend
//! changes, so intervals widen with the horizon.

use chrono::{Duration, NaiveDate};
use shared::chart::date_to_x;
use shared::models::{ForecastRow, ForecastTable, TrainingRow};

use crate::config::ForecastSettings;
use crate::forecast::linalg::SymmetricSystem;
use crate::forecast::ForecastError;

const YEARLY_MIN_SPAN_DAYS: f64 = 730.0;
const WEEKLY_MIN_SPAN_DAYS: f64 = 14.0;
// Noise level assumed before the first pass has residuals to measure.
const INITIAL_SIGMA: f64 = 0.05;
const SIGMA_FLOOR: f64 = 0.01;
// Intercept and slope are effectively unpenalised.
const TREND_RIDGE: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seasonality {
    Weekly,
    Yearly,
}

impl Seasonality {
    pub fn name(&self) -> &'static str {
        match self {
            Seasonality::Weekly => "weekly",
            Seasonality::Yearly => "yearly",
        }
    }

    /// Period in days.
    pub fn period(&self) -> f64 {
        match self {
            Seasonality::Weekly => 7.0,
            Seasonality::Yearly => 365.25,
        }
    }

    // A week starting on Sunday, or a whole non-leap year.
    fn profile_dates(&self) -> Vec<NaiveDate> {
        let (start, days) = match self {
            Seasonality::Weekly => (NaiveDate::from_ymd_opt(2017, 1, 1), 7),
            Seasonality::Yearly => (NaiveDate::from_ymd_opt(2017, 1, 1), 365),
        };
        start
            .map(|s| (0..days).map(|i| s + Duration::days(i)).collect())
            .unwrap_or_default()
    }
}

/// One seasonal component evaluated over a single period, for the components chart.
///
/// `points` are `(position within the period, value)`: weekday 0..6 starting Sunday,
/// or day of year 0..364.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalProfile {
    pub seasonality: Seasonality,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone)]
struct SeasonalTerm {
    seasonality: Seasonality,
    order: usize,
    /// `sin, cos` pairs for harmonics `1..=order`.
    coefficients: Vec<f64>,
}

impl SeasonalTerm {
    fn features(seasonality: Seasonality, order: usize, day: f64, out: &mut Vec<f64>) {
        let period = seasonality.period();
        for harmonic in 1..=order {
            let angle = 2.0 * std::f64::consts::PI * harmonic as f64 * day / period;
            out.push(angle.sin());
            out.push(angle.cos());
        }
    }

    fn evaluate(&self, day: f64) -> f64 {
        let mut features = Vec::with_capacity(self.order * 2);
        Self::features(self.seasonality, self.order, day, &mut features);
        features
            .iter()
            .zip(&self.coefficients)
            .map(|(x, b)| x * b)
            .sum()
    }
}

#[derive(Debug, Clone)]
struct FittedState {
    history: Vec<TrainingRow>,
    first_day: f64,
    span_days: f64,
    y_scale: f64,
    changepoints: Vec<f64>,
    k: f64,
    m: f64,
    deltas: Vec<f64>,
    seasonal: Vec<SeasonalTerm>,
    /// Residual standard deviation in scaled units.
    sigma: f64,
}

impl FittedState {
    fn scaled_time(&self, day: f64) -> f64 {
        (day - self.first_day) / self.span_days
    }

    fn trend(&self, t: f64) -> f64 {
        let bends: f64 = self
            .changepoints
            .iter()
            .zip(&self.deltas)
            .map(|(s, d)| d * (t - s).max(0.0))
            .sum();
        self.k * t + self.m + bends
    }

    /// Standard deviation of the trend at scaled time `t` from simulated future changepoints.
    fn trend_sigma(&self, t: f64) -> f64 {
        let horizon = (t - 1.0).max(0.0);
        if horizon == 0.0 || self.deltas.is_empty() {
            return 0.0;
        }
        let rate = self.changepoints.len() as f64;
        let scale = self.deltas.iter().map(|d| d.abs()).sum::<f64>() / self.deltas.len() as f64;
        (2.0 * rate * scale * scale * horizon.powi(3) / 3.0).sqrt()
    }

    fn seasonal_value(&self, seasonality: Seasonality, day: f64) -> Option<f64> {
        self.seasonal
            .iter()
            .find(|term| term.seasonality == seasonality)
            .map(|term| term.evaluate(day))
    }
}

/// Layout of one design-matrix row: `[1, t, bends.., seasonal features..]`.
struct Design<'a> {
    changepoints: &'a [f64],
    seasonal: &'a [(Seasonality, usize)],
}

impl Design<'_> {
    fn width(&self) -> usize {
        2 + self.changepoints.len() + self.seasonal.iter().map(|(_, order)| order * 2).sum::<usize>()
    }

    fn row(&self, t: f64, day: f64) -> Vec<f64> {
        let mut row = Vec::with_capacity(self.width());
        row.push(1.0);
        row.push(t);
        row.extend(self.changepoints.iter().map(|s| (t - s).max(0.0)));
        for (seasonality, order) in self.seasonal {
            SeasonalTerm::features(*seasonality, *order, day, &mut row);
        }
        row
    }
}

pub struct AdditiveModel {
    settings: ForecastSettings,
    fitted: Option<FittedState>,
}

impl AdditiveModel {
    pub fn new(settings: ForecastSettings) -> Result<Self, ForecastError> {
        settings.validate()?;
        Ok(Self {
            settings,
            fitted: None,
        })
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// The rows the model was fitted on, sorted by date.
    pub fn history(&self) -> Option<&[TrainingRow]> {
        self.fitted.as_ref().map(|f| f.history.as_slice())
    }

    pub fn has_seasonality(&self, seasonality: Seasonality) -> bool {
        self.fitted
            .as_ref()
            .map(|f| f.seasonal.iter().any(|term| term.seasonality == seasonality))
            .unwrap_or(false)
    }

    /// Fits the model. Rows with a non-finite `y` are ignored.
    pub fn fit(&mut self, rows: &[TrainingRow]) -> Result<(), ForecastError> {
        if self.fitted.is_some() {
            return Err(ForecastError::AlreadyFitted);
        }

        let mut history: Vec<TrainingRow> = rows.iter().copied().filter(|r| r.y.is_finite()).collect();
        if history.len() < 2 {
            return Err(ForecastError::InsufficientData { rows: history.len() });
        }
        history.sort_by_key(|r| r.ds);

        let days: Vec<f64> = history.iter().map(|r| date_to_x(r.ds)).collect();
        let first_day = days[0];
        let span_days = days[days.len() - 1] - first_day;
        if span_days <= 0.0 {
            return Err(ForecastError::InsufficientData { rows: 1 });
        }

        let y_scale = match history.iter().map(|r| r.y.abs()).fold(0.0, f64::max) {
            s if s > 0.0 => s,
            _ => 1.0,
        };
        let ts: Vec<f64> = days.iter().map(|d| (d - first_day) / span_days).collect();
        let ys: Vec<f64> = history.iter().map(|r| r.y / y_scale).collect();

        let changepoints = self.place_changepoints(&ts);
        let seasonal = self.enabled_seasonalities(&days, span_days);
        let design = Design {
            changepoints: &changepoints,
            seasonal: &seasonal,
        };
        let rows: Vec<Vec<f64>> = ts.iter().zip(&days).map(|(t, d)| design.row(*t, *d)).collect();

        let first = self.solve(&design, &rows, &ys, INITIAL_SIGMA)?;
        let sigma_guess = residual_sigma(&rows, &ys, &first).max(SIGMA_FLOOR);
        let beta = self.solve(&design, &rows, &ys, sigma_guess)?;
        let sigma = residual_sigma(&rows, &ys, &beta);

        let n_cp = changepoints.len();
        let mut offset = 2 + n_cp;
        let mut terms = Vec::with_capacity(seasonal.len());
        for (seasonality, order) in &seasonal {
            let width = order * 2;
            terms.push(SeasonalTerm {
                seasonality: *seasonality,
                order: *order,
                coefficients: beta[offset..offset + width].to_vec(),
            });
            offset += width;
        }

        tracing::debug!(
            rows = history.len(),
            changepoints = n_cp,
            seasonalities = ?seasonal.iter().map(|(s, _)| s.name()).collect::<Vec<_>>(),
            sigma = sigma * y_scale,
            "Additive model fitted"
        );

        self.fitted = Some(FittedState {
            history,
            first_day,
            span_days,
            y_scale,
            changepoints,
            m: beta[0],
            k: beta[1],
            deltas: beta[2..2 + n_cp].to_vec(),
            seasonal: terms,
            sigma,
        });
        Ok(())
    }

    /// History dates followed by `periods` consecutive calendar days.
    pub fn make_future_dataframe(&self, periods: usize) -> Result<Vec<NaiveDate>, ForecastError> {
        let fitted = self.fitted.as_ref().ok_or(ForecastError::NotFitted)?;
        let mut dates: Vec<NaiveDate> = fitted.history.iter().map(|r| r.ds).collect();
        if let Some(last) = dates.last().copied() {
            dates.extend((1..=periods as i64).map(|i| last + Duration::days(i)));
        }
        Ok(dates)
    }

    pub fn predict(&self, dates: &[NaiveDate]) -> Result<ForecastTable, ForecastError> {
        let fitted = self.fitted.as_ref().ok_or(ForecastError::NotFitted)?;
        let z = normal_quantile((1.0 + self.settings.interval_width) / 2.0);
        let scale = fitted.y_scale;

        let rows = dates
            .iter()
            .map(|ds| {
                let day = date_to_x(*ds);
                let t = fitted.scaled_time(day);
                let trend = fitted.trend(t);
                let trend_sigma = fitted.trend_sigma(t);
                let weekly = fitted.seasonal_value(Seasonality::Weekly, day);
                let yearly = fitted.seasonal_value(Seasonality::Yearly, day);
                let additive = weekly.unwrap_or(0.0) + yearly.unwrap_or(0.0);
                let yhat = trend + additive;
                let spread = z * (fitted.sigma.powi(2) + trend_sigma.powi(2)).sqrt();

                ForecastRow {
                    ds: *ds,
                    trend: trend * scale,
                    trend_lower: (trend - z * trend_sigma) * scale,
                    trend_upper: (trend + z * trend_sigma) * scale,
                    weekly: weekly.map(|v| v * scale),
                    yearly: yearly.map(|v| v * scale),
                    additive_terms: additive * scale,
                    yhat_lower: (yhat - spread) * scale,
                    yhat_upper: (yhat + spread) * scale,
                    yhat: yhat * scale,
                }
            })
            .collect();

        Ok(ForecastTable { rows })
    }

    /// The fitted seasonality over one period, or `None` when it is disabled.
    pub fn seasonal_profile(&self, seasonality: Seasonality) -> Option<SeasonalProfile> {
        let fitted = self.fitted.as_ref()?;
        let points = seasonality
            .profile_dates()
            .into_iter()
            .enumerate()
            .map(|(i, ds)| {
                let value = fitted.seasonal_value(seasonality, date_to_x(ds))?;
                Some((i as f64, value * fitted.y_scale))
            })
            .collect::<Option<Vec<_>>>()?;
        Some(SeasonalProfile { seasonality, points })
    }

    // Uniform over the first `changepoint_range` of rows, excluding the first row.
    fn place_changepoints(&self, ts: &[f64]) -> Vec<f64> {
        let hist_size = (ts.len() as f64 * self.settings.changepoint_range).floor() as usize;
        let mut count = self.settings.n_changepoints;
        if count + 1 > hist_size {
            count = hist_size.saturating_sub(1);
        }
        if count == 0 {
            return Vec::new();
        }
        let last = (hist_size - 1) as f64;
        (1..=count)
            .map(|i| {
                let index = (last * i as f64 / count as f64).round() as usize;
                ts[index]
            })
            .collect()
    }

    fn enabled_seasonalities(&self, days: &[f64], span_days: f64) -> Vec<(Seasonality, usize)> {
        let min_spacing = days
            .windows(2)
            .map(|w| w[1] - w[0])
            .filter(|d| *d > 0.0)
            .fold(f64::INFINITY, f64::min);

        let mut enabled = Vec::new();
        if span_days >= YEARLY_MIN_SPAN_DAYS && self.settings.yearly_order > 0 {
            enabled.push((Seasonality::Yearly, self.settings.yearly_order));
        }
        if span_days >= WEEKLY_MIN_SPAN_DAYS && min_spacing < 7.0 && self.settings.weekly_order > 0 {
            enabled.push((Seasonality::Weekly, self.settings.weekly_order));
        }
        enabled
    }

    fn solve(
        &self,
        design: &Design<'_>,
        rows: &[Vec<f64>],
        ys: &[f64],
        sigma: f64,
    ) -> Result<Vec<f64>, ForecastError> {
        let mut system = SymmetricSystem::new(design.width());
        for (row, y) in rows.iter().zip(ys) {
            system.add_row(row, *y);
        }

        let variance = sigma * sigma;
        let delta_penalty = variance / self.settings.changepoint_prior_scale.powi(2);
        let seasonal_penalty = variance / self.settings.seasonality_prior_scale.powi(2);
        system.add_ridge(0, TREND_RIDGE);
        system.add_ridge(1, TREND_RIDGE);
        let n_cp = design.changepoints.len();
        for i in 2..2 + n_cp {
            system.add_ridge(i, delta_penalty);
        }
        for i in 2 + n_cp..system.size() {
            system.add_ridge(i, seasonal_penalty);
        }

        system.solve().ok_or(ForecastError::SingularSystem)
    }
}

fn residual_sigma(rows: &[Vec<f64>], ys: &[f64], beta: &[f64]) -> f64 {
    let sse: f64 = rows
        .iter()
        .zip(ys)
        .map(|(row, y)| {
            let fit: f64 = row.iter().zip(beta).map(|(x, b)| x * b).sum();
            (y - fit).powi(2)
        })
        .sum();
    (sse / ys.len() as f64).sqrt()
}

/// Inverse of the standard normal CDF (Acklam's rational approximation).
pub fn normal_quantile(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];
    const P_LOW: f64 = 0.02425;

    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    let tail = |q: f64| {
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };

    if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Weekday};

    fn daily_rows(days: usize, f: impl Fn(usize) -> f64) -> Vec<TrainingRow> {
        let start = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();
        (0..days)
            .map(|i| TrainingRow {
                ds: start + Duration::days(i as i64),
                y: f(i),
            })
            .collect()
    }

    fn fitted(rows: &[TrainingRow]) -> AdditiveModel {
        let mut model = AdditiveModel::new(ForecastSettings::default()).unwrap();
        model.fit(rows).unwrap();
        model
    }

    #[test]
    fn test_normal_quantile_known_values() {
        assert!(normal_quantile(0.5).abs() < 1e-9);
        assert!((normal_quantile(0.9) - 1.281_551_6).abs() < 1e-6);
        assert!((normal_quantile(0.975) - 1.959_964).abs() < 1e-6);
        assert!((normal_quantile(0.01) + 2.326_348).abs() < 1e-5);
        assert!((normal_quantile(0.1) + normal_quantile(0.9)).abs() < 1e-9);
    }

    #[test]
    fn test_recovers_linear_trend() {
        let rows = daily_rows(120, |i| 10.0 + 0.5 * i as f64);
        let model = fitted(&rows);
        let dates = model.make_future_dataframe(30).unwrap();
        let forecast = model.predict(&dates).unwrap();

        for (row, actual) in forecast.rows.iter().zip(&rows) {
            assert!((row.yhat - actual.y).abs() < 0.05, "{} vs {}", row.yhat, actual.y);
        }
        // Extrapolation keeps the slope.
        let last = forecast.rows.last().unwrap();
        let expected = 10.0 + 0.5 * 149.0;
        assert!((last.yhat - expected).abs() < 0.5, "{} vs {}", last.yhat, expected);
    }

    #[test]
    fn test_future_dataframe_appends_calendar_days() {
        let rows = daily_rows(20, |i| i as f64 + 1.0);
        let model = fitted(&rows);
        let dates = model.make_future_dataframe(365).unwrap();
        assert_eq!(dates.len(), 20 + 365);
        assert_eq!(dates[20], rows[19].ds + Duration::days(1));
        assert_eq!(*dates.last().unwrap(), rows[19].ds + Duration::days(365));
    }

    #[test]
    fn test_bounds_are_ordered_and_widen_with_horizon() {
        let rows = daily_rows(400, |i| {
            let x = i as f64;
            100.0 + 0.1 * x + 3.0 * (x * 0.7).sin() + if i > 200 { 0.05 * (x - 200.0) } else { 0.0 }
        });
        let model = fitted(&rows);
        let dates = model.make_future_dataframe(365).unwrap();
        let forecast = model.predict(&dates).unwrap();

        assert_eq!(forecast.len(), 400 + 365);
        for row in &forecast.rows {
            assert!(row.yhat_lower <= row.yhat && row.yhat <= row.yhat_upper);
            assert!(row.trend_lower <= row.trend && row.trend <= row.trend_upper);
        }
        let near = &forecast.rows[401];
        let far = forecast.rows.last().unwrap();
        assert!(far.yhat_upper - far.yhat_lower > near.yhat_upper - near.yhat_lower);
    }

    #[test]
    fn test_seasonalities_follow_history_span() {
        let short = fitted(&daily_rows(10, |i| i as f64 + 1.0));
        assert!(!short.has_seasonality(Seasonality::Weekly));
        assert!(!short.has_seasonality(Seasonality::Yearly));

        let month = fitted(&daily_rows(30, |i| i as f64 + 1.0));
        assert!(month.has_seasonality(Seasonality::Weekly));
        assert!(!month.has_seasonality(Seasonality::Yearly));
        assert!(month.seasonal_profile(Seasonality::Yearly).is_none());

        let long = fitted(&daily_rows(800, |i| (i as f64 * 0.01).sin() + 5.0));
        assert!(long.has_seasonality(Seasonality::Yearly));
        let profile = long.seasonal_profile(Seasonality::Yearly).unwrap();
        assert_eq!(profile.points.len(), 365);
        assert_eq!(long.seasonal_profile(Seasonality::Weekly).unwrap().points.len(), 7);
    }

    #[test]
    fn test_weekly_pattern_is_captured() {
        // Five-day trading weeks with a Monday dip.
        let start = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();
        let rows: Vec<TrainingRow> = (0..140)
            .map(|i| start + Duration::days(i))
            .filter(|d| d.weekday().number_from_monday() <= 5)
            .map(|ds| TrainingRow {
                ds,
                y: if ds.weekday() == Weekday::Mon { 45.0 } else { 50.0 },
            })
            .collect();
        let model = fitted(&rows);
        let forecast = model.predict(&[start, start + Duration::days(2)]).unwrap();
        assert!(forecast.rows[0].yhat < forecast.rows[1].yhat);
        assert!(forecast.rows[0].weekly.unwrap() < forecast.rows[1].weekly.unwrap());
        assert!(forecast.rows[0].yearly.is_none());
    }

    #[test]
    fn test_rejects_insufficient_rows() {
        let mut model = AdditiveModel::new(ForecastSettings::default()).unwrap();
        let mut rows = daily_rows(1, |_| 1.0);
        assert_eq!(model.fit(&rows), Err(ForecastError::InsufficientData { rows: 1 }));

        rows.push(TrainingRow {
            ds: rows[0].ds + Duration::days(1),
            y: f64::NAN,
        });
        assert_eq!(model.fit(&rows), Err(ForecastError::InsufficientData { rows: 1 }));
        assert!(model.fit(&[]).is_err());
    }

    #[test]
    fn test_predict_requires_fit_and_fit_runs_once() {
        let mut model = AdditiveModel::new(ForecastSettings::default()).unwrap();
        assert_eq!(model.make_future_dataframe(1), Err(ForecastError::NotFitted));
        assert_eq!(model.predict(&[]), Err(ForecastError::NotFitted));

        let rows = daily_rows(5, |i| i as f64);
        model.fit(&rows).unwrap();
        assert_eq!(model.fit(&rows), Err(ForecastError::AlreadyFitted));
    }

    #[test]
    fn test_unsorted_history_is_sorted() {
        let mut rows = daily_rows(30, |i| 2.0 * i as f64 + 1.0);
        rows.reverse();
        let model = fitted(&rows);
        let history = model.history().unwrap();
        assert!(history.windows(2).all(|w| w[0].ds < w[1].ds));
    }
}
