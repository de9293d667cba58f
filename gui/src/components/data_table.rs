// Renders a TableView preview as an HTML table with its row index
#![allow(non_snake_case)]
use dioxus::prelude::*;
use shared::utils::TableView;

#[component]
pub fn DataTable(view: TableView) -> Element {
    rsx! {
        table {
            class: "data-table",
            thead {
                tr {
                    th { "" }
                    for column in view.columns.iter() {
                        th { key: "{column}", "{column}" }
                    }
                }
            }
            tbody {
                for (index, row) in view.index.iter().zip(view.rows.iter()) {
                    tr {
                        key: "{index}",
                        th { "{index}" }
                        for (i, cell) in row.iter().enumerate() {
                            td { key: "{i}", "{cell}" }
                        }
                    }
                }
            }
        }
    }
}
