// SVG line chart with an optional range slider under the plot.
#![allow(non_snake_case)]
use dioxus::prelude::*;
use shared::chart::{
    band_polygon, nice_ticks, svg_points, x_tick_label, x_ticks, LineChart, PinnedSelection,
    RangeSelection, SeriesStyle, Viewport,
};

use crate::config::AppConfig;

const SLIDER_STEPS: f64 = 1000.0;

struct Tick {
    pos: f64,
    // Position of the label along the other axis.
    label_pos: f64,
    label: String,
}

fn y_label(value: f64) -> String {
    if value.abs() >= 1000.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

#[component]
pub fn LineChartView(chart: LineChart, height: u32) -> Element {
    let config = use_context::<AppConfig>();
    let mut pinned = use_signal(PinnedSelection::default);

    let Some(extent) = chart.x_extent() else {
        return rsx! {
            div { class: "chart", "No data to plot" }
        };
    };

    let width = chart.width.unwrap_or(config.chart.width) as f64;
    let selection = pinned.read().for_extent(extent);
    let (x0, x1) = selection.apply(extent);
    let visible = chart.clipped(x0, x1);
    let y_range = visible.y_extent_within(x0, x1).unwrap_or((0.0, 1.0));
    let vp = Viewport::new(width, height as f64, (x0, x1), y_range);

    let style = &config.chart;
    let font_size = style.font_size;
    let axis_color = style.axis_color.clone();
    let grid_color = if style.grid.enabled { style.grid.color.clone() } else { "none".to_string() };
    let line_width = style.line_width;
    let marker_radius = style.marker_radius;

    let y_ticks: Vec<Tick> = nice_ticks(vp.y_range.0, vp.y_range.1, 6)
        .into_iter()
        .map(|v| {
            let pos = vp.project_y(v);
            Tick { pos, label_pos: pos + 4.0, label: y_label(v) }
        })
        .collect();
    let x_tick_marks: Vec<Tick> = x_ticks(chart.x_axis, x0, x1)
        .into_iter()
        .map(|v| Tick {
            pos: vp.project_x(v),
            label_pos: vp.bottom() + 16.0,
            label: x_tick_label(chart.x_axis, v),
        })
        .collect();

    let bands: Vec<(String, String)> = visible
        .bands
        .iter()
        .map(|b| (band_polygon(b, &vp), b.color.clone()))
        .collect();
    let lines: Vec<(String, String)> = visible
        .series
        .iter()
        .filter(|s| s.style == SeriesStyle::Line)
        .map(|s| (svg_points(&s.points, &vp), s.color.clone()))
        .collect();
    let markers: Vec<(f64, f64, String)> = visible
        .series
        .iter()
        .filter(|s| s.style == SeriesStyle::Markers)
        .flat_map(|s| {
            s.points.iter().map(move |p| {
                let (x, y) = vp.project(*p);
                (x, y, s.color.clone())
            })
        })
        .collect();
    let legend: Vec<(String, String)> = chart
        .series
        .iter()
        .map(|s| (s.name.clone(), s.color.clone()))
        .collect();

    let left = vp.margin_left;
    let right = vp.right();
    let top = vp.margin_top;
    let bottom = vp.bottom();
    let y_label_x = left - 6.0;
    let title_size = font_size + 2;
    let title = chart.title.clone();
    let title_x = width / 2.0;
    let start_pos = (selection.start * SLIDER_STEPS).round();
    let end_pos = (selection.end * SLIDER_STEPS).round();
    let range_text = format!(
        "{} – {}",
        x_tick_label(chart.x_axis, x0),
        x_tick_label(chart.x_axis, x1)
    );

    rsx! {
        div {
            class: "chart",
            div {
                class: "legend",
                for (i, (name, color)) in legend.into_iter().enumerate() {
                    span {
                        key: "{i}",
                        style: "margin-right: 16px; color: {color};",
                        "■ {name}"
                    }
                }
            }
            svg {
                "width": "{width}",
                "height": "{height}",
                "viewBox": "0 0 {width} {height}",
                text {
                    "x": "{title_x}",
                    "y": "18",
                    "text-anchor": "middle",
                    "font-size": "{title_size}",
                    "fill": "{axis_color}",
                    "{title}"
                }
                for (i, Tick { pos, label_pos, label }) in y_ticks.iter().enumerate() {
                    g {
                        key: "y{i}",
                        line {
                            "x1": "{left}",
                            "x2": "{right}",
                            "y1": "{pos}",
                            "y2": "{pos}",
                            "stroke": "{grid_color}",
                        }
                        text {
                            "x": "{y_label_x}",
                            "y": "{label_pos}",
                            "text-anchor": "end",
                            "font-size": "{font_size}",
                            "fill": "{axis_color}",
                            "{label}"
                        }
                    }
                }
                for (i, Tick { pos, label_pos, label }) in x_tick_marks.iter().enumerate() {
                    g {
                        key: "x{i}",
                        line {
                            "x1": "{pos}",
                            "x2": "{pos}",
                            "y1": "{top}",
                            "y2": "{bottom}",
                            "stroke": "{grid_color}",
                        }
                        text {
                            "x": "{pos}",
                            "y": "{label_pos}",
                            "text-anchor": "middle",
                            "font-size": "{font_size}",
                            "fill": "{axis_color}",
                            "{label}"
                        }
                    }
                }
                for (i, (points, color)) in bands.iter().enumerate() {
                    polygon {
                        key: "b{i}",
                        "points": "{points}",
                        "fill": "{color}",
                        "stroke": "none",
                    }
                }
                for (i, (points, color)) in lines.iter().enumerate() {
                    polyline {
                        key: "l{i}",
                        "points": "{points}",
                        "fill": "none",
                        "stroke": "{color}",
                        "stroke-width": "{line_width}",
                    }
                }
                for (i, (x, y, color)) in markers.iter().enumerate() {
                    circle {
                        key: "m{i}",
                        "cx": "{x}",
                        "cy": "{y}",
                        "r": "{marker_radius}",
                        "fill": "{color}",
                    }
                }
                line {
                    "x1": "{left}",
                    "x2": "{right}",
                    "y1": "{bottom}",
                    "y2": "{bottom}",
                    "stroke": "{axis_color}",
                }
            }
            if chart.range_slider {
                div {
                    class: "range-slider",
                    style: "width: {width}px;",
                    input {
                        r#type: "range",
                        min: "0",
                        max: "{SLIDER_STEPS}",
                        value: "{start_pos}",
                        oninput: move |evt| {
                            if let Ok(v) = evt.value().parse::<f64>() {
                                let end = pinned.read().for_extent(extent).end;
                                pinned.set(PinnedSelection::pinned(
                                    extent,
                                    RangeSelection::new(v / SLIDER_STEPS, end),
                                ));
                            }
                        },
                    }
                    input {
                        r#type: "range",
                        min: "0",
                        max: "{SLIDER_STEPS}",
                        value: "{end_pos}",
                        oninput: move |evt| {
                            if let Ok(v) = evt.value().parse::<f64>() {
                                let start = pinned.read().for_extent(extent).start;
                                pinned.set(PinnedSelection::pinned(
                                    extent,
                                    RangeSelection::new(start, v / SLIDER_STEPS),
                                ));
                            }
                        },
                    }
                    span { "{range_text}" }
                }
            }
        }
    }
}
