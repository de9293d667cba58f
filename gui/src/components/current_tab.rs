// "Current" tab: raw table head and the open/close chart
#![allow(non_snake_case)]
use dioxus::prelude::*;
use engine::models::TabOutcome;

use super::alert::{Alert, ErrorBox};
use super::chart::LineChartView;
use super::data_table::DataTable;
use super::spinner::Spinner;
use crate::config::AppConfig;
use crate::services::MarketService;
use crate::state::AppState;

#[component]
pub fn CurrentTab() -> Element {
    let state = use_context::<Signal<AppState>>();
    let service = use_context::<MarketService>();
    let config = use_context::<AppConfig>();

    // Re-runs, fetch included, whenever the ticker or the years change.
    let current = use_resource(move || {
        let service = service.clone();
        let inputs = state.read().inputs();
        async move { service.current(inputs).await }
    });

    let height = config.chart.height;
    let content = match &*current.read_unchecked() {
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
            h3 { "Raw Data (first 5 cols)" }
            DataTable { view: view.raw_head.clone() }
            h3 { "Time Series Data" }
            LineChartView { chart: view.chart.clone(), height }
        },
    };
    content
}
