//! Plain chart descriptions and the geometry needed to draw them as SVG.
//!
//! The engine builds [`LineChart`]s from tables; the GUI projects them onto a
//! [`Viewport`] and emits SVG primitives. Keeping the arithmetic here lets it be
//! tested without a webview.

use chrono::{Datelike, NaiveDate};

/// Days between 0001-01-01 (CE day 1) and 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Converts a date to its x coordinate (days since 1970-01-01).
pub fn date_to_x(date: NaiveDate) -> f64 {
    (date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE) as f64
}

pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32 + UNIX_EPOCH_DAYS_FROM_CE)
}

/// What the x values of a chart mean, which decides how ticks are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XAxisKind {
    /// Days since 1970-01-01.
    Date,
    /// 0 = Sunday .. 6 = Saturday.
    Weekday,
    /// 0 = January 1 .. 364 = December 31 of a non-leap year.
    DayOfYear,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

impl ChartPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesStyle {
    Line,
    Markers,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: String,
    pub style: SeriesStyle,
    pub points: Vec<ChartPoint>,
}

/// A shaded region between two curves sampled at the same x values.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub name: String,
    pub color: String,
    pub lower: Vec<ChartPoint>,
    pub upper: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_axis: XAxisKind,
    pub series: Vec<Series>,
    pub bands: Vec<Band>,
    pub range_slider: bool,
    /// Fixed pixel width, or `None` to use the configured default.
    pub width: Option<u32>,
}

impl LineChart {
    pub fn new(title: impl Into<String>, x_axis: XAxisKind) -> Self {
        Self {
            title: title.into(),
            x_axis,
            series: Vec::new(),
            bands: Vec::new(),
            range_slider: false,
            width: None,
        }
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_band(mut self, band: Band) -> Self {
        self.bands.push(band);
        self
    }

    pub fn with_range_slider(mut self) -> Self {
        self.range_slider = true;
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    fn all_points(&self) -> impl Iterator<Item = &ChartPoint> {
        self.series
            .iter()
            .flat_map(|s| s.points.iter())
            .chain(self.bands.iter().flat_map(|b| b.lower.iter().chain(b.upper.iter())))
    }

    /// Smallest and largest x over every series and band.
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        extent(self.all_points().map(|p| p.x))
    }

    /// Smallest and largest y among points whose x lies in `[x0, x1]`.
    pub fn y_extent_within(&self, x0: f64, x1: f64) -> Option<(f64, f64)> {
        extent(
            self.all_points()
                .filter(|p| p.x >= x0 && p.x <= x1)
                .map(|p| p.y),
        )
    }

    /// Copy of the chart restricted to `[x0, x1]`.
    pub fn clipped(&self, x0: f64, x1: f64) -> LineChart {
        let keep = |points: &[ChartPoint]| -> Vec<ChartPoint> {
            points.iter().copied().filter(|p| p.x >= x0 && p.x <= x1).collect()
        };
        LineChart {
            series: self
                .series
                .iter()
                .map(|s| Series {
                    points: keep(&s.points),
                    ..s.clone()
                })
                .collect(),
            bands: self
                .bands
                .iter()
                .map(|b| Band {
                    lower: keep(&b.lower),
                    upper: keep(&b.upper),
                    ..b.clone()
                })
                .collect(),
            ..self.clone()
        }
    }
}

fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// The portion of the x extent selected with the range slider, as fractions in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeSelection {
    pub start: f64,
    pub end: f64,
}

impl RangeSelection {
    pub fn full() -> Self {
        Self { start: 0.0, end: 1.0 }
    }

    /// Clamps both handles to `[0, 1]` and swaps them if they cross.
    pub fn new(start: f64, end: f64) -> Self {
        let a = start.clamp(0.0, 1.0);
        let b = end.clamp(0.0, 1.0);
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Maps the selection onto a concrete `(lo, hi)` extent.
    pub fn apply(&self, (lo, hi): (f64, f64)) -> (f64, f64) {
        let span = hi - lo;
        (lo + span * self.start, lo + span * self.end)
    }
}

impl Default for RangeSelection {
    fn default() -> Self {
        Self::full()
    }
}

/// A range selection remembered together with the x extent it was made on.
/// Once the extent changes (a new ticker or window) the full range is shown again.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PinnedSelection {
    extent: Option<(f64, f64)>,
    selection: RangeSelection,
}

impl PinnedSelection {
    pub fn pinned(extent: (f64, f64), selection: RangeSelection) -> Self {
        Self {
            extent: Some(extent),
            selection,
        }
    }

    pub fn for_extent(&self, extent: (f64, f64)) -> RangeSelection {
        if self.extent == Some(extent) {
            self.selection
        } else {
            RangeSelection::full()
        }
    }
}

/// Pixel area of a chart and the data ranges mapped onto it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl Viewport {
    /// Viewport with the default margins. Degenerate ranges are widened so projection never divides by zero.
    pub fn new(width: f64, height: f64, x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        Self {
            width,
            height,
            margin_left: 64.0,
            margin_right: 16.0,
            margin_top: 32.0,
            margin_bottom: 40.0,
            x_range: widen(x_range),
            y_range: pad(widen(y_range), 0.05),
        }
    }

    pub fn plot_width(&self) -> f64 {
        (self.width - self.margin_left - self.margin_right).max(1.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.height - self.margin_top - self.margin_bottom).max(1.0)
    }

    pub fn project_x(&self, x: f64) -> f64 {
        let (lo, hi) = self.x_range;
        self.margin_left + (x - lo) / (hi - lo) * self.plot_width()
    }

    pub fn project_y(&self, y: f64) -> f64 {
        let (lo, hi) = self.y_range;
        self.margin_top + (hi - y) / (hi - lo) * self.plot_height()
    }

    pub fn project(&self, point: ChartPoint) -> (f64, f64) {
        (self.project_x(point.x), self.project_y(point.y))
    }

    pub fn bottom(&self) -> f64 {
        self.margin_top + self.plot_height()
    }

    pub fn right(&self) -> f64 {
        self.margin_left + self.plot_width()
    }
}

fn widen((lo, hi): (f64, f64)) -> (f64, f64) {
    if (hi - lo).abs() < f64::EPSILON {
        (lo - 1.0, hi + 1.0)
    } else {
        (lo, hi)
    }
}

fn pad((lo, hi): (f64, f64), fraction: f64) -> (f64, f64) {
    let margin = (hi - lo) * fraction;
    (lo - margin, hi + margin)
}

/// SVG `points` attribute for a polyline through `points`.
pub fn svg_points(points: &[ChartPoint], viewport: &Viewport) -> String {
    points
        .iter()
        .map(|p| {
            let (x, y) = viewport.project(*p);
            format!("{:.2},{:.2}", x, y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// SVG `points` attribute for the polygon enclosing a band: upper edge forward, lower edge back.
pub fn band_polygon(band: &Band, viewport: &Viewport) -> String {
    band.upper
        .iter()
        .chain(band.lower.iter().rev())
        .map(|p| {
            let (x, y) = viewport.project(*p);
            format!("{:.2},{:.2}", x, y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Round-number ticks covering `[lo, hi]`, roughly `target` of them.
pub fn nice_ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    if !(hi > lo) || target == 0 {
        return vec![lo];
    }
    let raw = (hi - lo) / target as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * magnitude);

    let mut ticks = Vec::new();
    let mut tick = (lo / step).ceil() * step;
    while tick <= hi + step * 1e-9 {
        ticks.push(tick);
        tick += step;
    }
    ticks
}

/// Month-start ticks between two date x values, thinned to at most `target` ticks.
pub fn date_ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    let (Some(first), Some(last)) = (x_to_date(lo), x_to_date(hi)) else {
        return Vec::new();
    };
    let months_spanned = (last.year() - first.year()) * 12 + last.month() as i32 - first.month() as i32 + 1;
    let stride = [1, 2, 3, 6, 12, 24, 60]
        .into_iter()
        .find(|s| months_spanned / s <= target.max(1) as i32)
        .unwrap_or(120);

    let mut ticks = Vec::new();
    let (mut year, mut month) = (first.year(), first.month() as i32);
    loop {
        let Some(date) = NaiveDate::from_ymd_opt(year, month as u32, 1) else {
            break;
        };
        if date > last {
            break;
        }
        if date >= first && (year * 12 + month - 1) % stride == 0 {
            ticks.push(date_to_x(date));
        }
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }
    ticks
}

const WEEKDAYS: [&str; 7] = ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"];

pub fn x_tick_label(kind: XAxisKind, x: f64) -> String {
    match kind {
        XAxisKind::Date => x_to_date(x)
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_default(),
        XAxisKind::Weekday => WEEKDAYS
            .get(x.round().rem_euclid(7.0) as usize)
            .map(|d| d.to_string())
            .unwrap_or_default(),
        XAxisKind::DayOfYear => NaiveDate::from_yo_opt(2017, x.round() as u32 + 1)
            .map(|d| d.format("%B %-d").to_string())
            .unwrap_or_default(),
    }
}

pub fn x_ticks(kind: XAxisKind, lo: f64, hi: f64) -> Vec<f64> {
    match kind {
        XAxisKind::Date => date_ticks(lo, hi, 8),
        XAxisKind::Weekday => (0..7).map(f64::from).filter(|x| *x >= lo && *x <= hi).collect(),
        XAxisKind::DayOfYear => (1..=12)
            .filter_map(|m| NaiveDate::from_ymd_opt(2017, m, 1))
            .map(|d| (d.ordinal0()) as f64)
            .filter(|x| *x >= lo && *x <= hi)
            .collect(),
    }
}

/// A stack of panels drawn one above the other (trend, weekly, yearly ...).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComponentsFigure {
    pub panels: Vec<LineChart>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(points: &[(f64, f64)]) -> Series {
        Series {
            name: "s".to_string(),
            color: "#000".to_string(),
            style: SeriesStyle::Line,
            points: points.iter().map(|(x, y)| ChartPoint::new(*x, *y)).collect(),
        }
    }

    #[test]
    fn test_date_x_round_trips_through_epoch() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(date_to_x(epoch), 0.0);
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(x_to_date(date_to_x(date)), Some(date));
    }

    #[test]
    fn test_viewport_maps_extent_to_plot_area() {
        let vp = Viewport::new(700.0, 400.0, (0.0, 10.0), (0.0, 100.0));
        let (x0, _) = vp.project(ChartPoint::new(0.0, 50.0));
        let (x1, _) = vp.project(ChartPoint::new(10.0, 50.0));
        assert!((x0 - vp.margin_left).abs() < 1e-9);
        assert!((x1 - vp.right()).abs() < 1e-9);

        // Higher values are drawn closer to the top.
        assert!(vp.project_y(90.0) < vp.project_y(10.0));
        assert!(vp.project_y(vp.y_range.0) <= vp.bottom() + 1e-9);
    }

    #[test]
    fn test_viewport_widens_flat_ranges() {
        let vp = Viewport::new(100.0, 100.0, (5.0, 5.0), (3.0, 3.0));
        assert!(vp.x_range.1 > vp.x_range.0);
        assert!(vp.project_y(3.0).is_finite());
    }

    #[test]
    fn test_range_selection_orders_and_clamps() {
        let sel = RangeSelection::new(1.4, 0.25);
        assert_eq!(sel, RangeSelection { start: 0.25, end: 1.0 });
        assert_eq!(sel.apply((100.0, 200.0)), (125.0, 200.0));
        assert_eq!(RangeSelection::full().apply((3.0, 9.0)), (3.0, 9.0));
    }

    #[test]
    fn test_pinned_selection_resets_on_new_extent() {
        let narrowed = RangeSelection::new(0.5, 0.75);
        let pinned = PinnedSelection::pinned((0.0, 10.0), narrowed);
        assert_eq!(pinned.for_extent((0.0, 10.0)), narrowed);
        assert_eq!(pinned.for_extent((0.0, 20.0)), RangeSelection::full());
        assert_eq!(PinnedSelection::default().for_extent((0.0, 10.0)), RangeSelection::full());
    }

    #[test]
    fn test_clipped_keeps_points_inside_window() {
        let chart = LineChart::new("t", XAxisKind::Date)
            .with_series(line(&[(0.0, 1.0), (5.0, 2.0), (10.0, 30.0)]));
        let clipped = chart.clipped(0.0, 6.0);
        assert_eq!(clipped.series[0].points.len(), 2);
        assert_eq!(chart.y_extent_within(0.0, 6.0), Some((1.0, 2.0)));
        assert_eq!(chart.x_extent(), Some((0.0, 10.0)));
    }

    #[test]
    fn test_band_polygon_closes_the_region() {
        let band = Band {
            name: "b".to_string(),
            color: "#000".to_string(),
            lower: vec![ChartPoint::new(0.0, 0.0), ChartPoint::new(1.0, 0.0)],
            upper: vec![ChartPoint::new(0.0, 1.0), ChartPoint::new(1.0, 1.0)],
        };
        let vp = Viewport::new(100.0, 100.0, (0.0, 1.0), (0.0, 1.0));
        assert_eq!(band_polygon(&band, &vp).split(' ').count(), 4);
    }

    #[test]
    fn test_nice_ticks_use_round_steps() {
        assert_eq!(nice_ticks(0.0, 100.0, 5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        let ticks = nice_ticks(123.4, 187.9, 4);
        assert!(ticks.iter().all(|t| *t >= 123.4 && *t <= 187.9));
        assert!(!ticks.is_empty());
    }

    #[test]
    fn test_date_ticks_fall_on_month_starts() {
        let lo = date_to_x(NaiveDate::from_ymd_opt(2023, 1, 15).unwrap());
        let hi = date_to_x(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        let ticks = date_ticks(lo, hi, 8);
        assert!(!ticks.is_empty() && ticks.len() <= 8);
        for t in ticks {
            assert_eq!(x_to_date(t).unwrap().day(), 1);
        }
    }

    #[test]
    fn test_tick_labels() {
        assert_eq!(x_tick_label(XAxisKind::Weekday, 0.0), "Sunday");
        assert_eq!(x_tick_label(XAxisKind::Weekday, 6.0), "Saturday");
        assert_eq!(x_tick_label(XAxisKind::DayOfYear, 0.0), "January 1");
        assert_eq!(x_tick_label(XAxisKind::DayOfYear, 364.0), "December 31");
        let x = date_to_x(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(x_tick_label(XAxisKind::Date, x), "Mar 2024");
    }
}
