// "Forecast" tab: forecast table tail, forecast chart and components chart
#![allow(non_snake_case)]
use dioxus::prelude::*;
use engine::models::TabOutcome;

use super::alert::{Alert, ErrorBox};
use super::chart::{ComponentsChart, LineChartView};
use super::data_table::DataTable;
use super::spinner::Spinner;
use crate::config::AppConfig;
use crate::services::MarketService;
use crate::state::AppState;

#[component]
pub fn ForecastTab() -> Element {
    let state = use_context::<Signal<AppState>>();
    let service = use_context::<MarketService>();
    let config = use_context::<AppConfig>();

    // Fetches on its own; it does not share the Current tab's table.
    let forecast = use_resource(move || {
        let service = service.clone();
        let inputs = state.read().inputs();
        async move { service.forecast(inputs).await }
    });

    let height = config.chart.height;
    let content = match &*forecast.read_unchecked() {
        // Covers both the fetch and the model fit.
        None => rsx! {
            Spinner { text: String::from("Loading data...") }
        },
        Some(Err(e)) => rsx! {
            ErrorBox { message: format!("{:#}", e) }
        },
        Some(Ok(TabOutcome::Notice(notice))) => rsx! {
            Alert { notice: notice.clone() }
        },
        Some(Ok(TabOutcome::Ready(view))) => rsx! {
            h3 { "Raw Data (last 5 cols)" }
            DataTable { view: view.forecast_tail.clone() }
            h3 { "Forecast Data" }
            LineChartView { chart: view.forecast_chart.clone(), height }
            h3 { "Forecast Components" }
            ComponentsChart { figure: view.components.clone() }
        },
    };
    content
}
