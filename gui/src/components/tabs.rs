#![allow(non_snake_case)]
use dioxus::prelude::*;

use crate::state::Tab;

/// Tab headers. Switching only changes which body is visible; nothing is refetched.
#[component]
pub fn TabBar(active: Signal<Tab>) -> Element {
    let mut active = active;
    rsx! {
        div {
            class: "tab-bar",
            for tab in Tab::ALL {
                {
                    let label = tab.label();
                    let class = if active() == tab { "active" } else { "" };
                    rsx! {
                        button {
                            key: "{label}",
                            class: "{class}",
                            onclick: move |_| active.set(tab),
                            "{label}"
                        }
                    }
                }
            }
        }
    }
}
