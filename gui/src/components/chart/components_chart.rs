// One panel per forecast component, stacked vertically.
#![allow(non_snake_case)]
use dioxus::prelude::*;
use shared::chart::ComponentsFigure;

use super::line_chart::LineChartView;
use crate::config::AppConfig;

#[component]
pub fn ComponentsChart(figure: ComponentsFigure) -> Element {
    let config = use_context::<AppConfig>();
    let height = config.chart.component_height;
    rsx! {
        div {
            class: "components-chart",
            for (i, panel) in figure.panels.into_iter().enumerate() {
                LineChartView { key: "{i}", chart: panel, height }
            }
        }
    }
}
