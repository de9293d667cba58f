#![allow(non_snake_case)]
use dioxus::prelude::*;
use shared::utils::{MAX_YEARS, MIN_YEARS};

use crate::components::{CurrentTab, ForecastTab, TabBar};
use crate::config::AppConfig;
use crate::services::MarketService;
use crate::state::{AppState, Tab};

#[component]
pub fn App() -> Element {
    let config = use_context_provider(AppConfig::load_or_default);
    let default_years = config.app.default_years;
    let mut state = use_signal(|| AppState::new(default_years));
    use_context_provider(|| state);
    use_context_provider(MarketService::from_env);

    let active = use_signal(Tab::default);
    // Follows the slider while dragging; `state` only changes on release.
    let mut shown_years = use_signal(|| default_years);

    let css = config.palette().stylesheet();
    let title = config.app.title.clone();
    let ticker = state.read().ticker.clone();
    let years = shown_years();
    let current_style = if active() == Tab::Current { "" } else { "display: none;" };
    let forecast_style = if active() == Tab::Forecast { "" } else { "display: none;" };

    rsx! {
        style { "{css}" }
        div {
            class: "dashboard",
            h1 { "{title}" }
            div {
                class: "controls",
                label { "for": "ticker", "Enter Stock Ticker" }
                input {
                    id: "ticker",
                    r#type: "text",
                    value: "{ticker}",
                    onchange: move |evt| {
                        let value = evt.value();
                        tracing::debug!(ticker = %value, "Ticker changed");
                        state.write().set_ticker(value);
                    },
                }
                label { "for": "years", "Data Range (years): {years}" }
                input {
                    id: "years",
                    r#type: "range",
                    min: "{MIN_YEARS}",
                    max: "{MAX_YEARS}",
                    step: "1",
                    value: "{years}",
                    oninput: move |evt| {
                        if let Ok(v) = evt.value().parse::<u32>() {
                            shown_years.set(v);
                        }
                    },
                    onchange: move |evt| {
                        if let Ok(v) = evt.value().parse::<u32>() {
                            tracing::debug!(years = v, "Data range changed");
                            state.write().set_years(v);
                        }
                    },
                }
            }
            TabBar { active }
            div { style: "{current_style}", CurrentTab {} }
            div { style: "{forecast_style}", ForecastTab {} }
        }
    }
}
