#![allow(non_snake_case)]
use dioxus::prelude::*;

#[component]
pub fn Spinner(text: String) -> Element {
    rsx! {
        div { class: "spinner", "⏳ {text}" }
    }
}
