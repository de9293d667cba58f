// Warning/error boxes shown in place of a tab's content
#![allow(non_snake_case)]
use dioxus::prelude::*;
use engine::models::Notice;

#[component]
pub fn Alert(notice: Notice) -> Element {
    let class = match notice {
        Notice::Warning(_) => "alert warning",
        Notice::Error(_) => "alert error",
    };
    let icon = notice.icon();
    let message = notice.message();
    rsx! {
        div {
            class: "{class}",
            role: "alert",
            "{icon} {message}"
        }
    }
}

/// Failures other than the two input guards (network, provider, model).
#[component]
pub fn ErrorBox(message: String) -> Element {
    rsx! {
        div {
            class: "alert error",
            role: "alert",
            "🚨 {message}"
        }
    }
}
