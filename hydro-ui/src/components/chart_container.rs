//! Chart container component.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// DOM id Plotly renders into
    pub id: String,
    #[props(default = 400)]
    pub min_height: u32,
}

/// A container div for a Plotly chart. Plotly replaces its contents on
/// every plot, so the div itself is never re-created.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let style = format!(
        "min-height: {}px; position: relative; width: 100%;",
        props.min_height
    );

    rsx! {
        div {
            style: "{style}",
            div {
                id: "{props.id}",
                style: "width: 100%; min-height: inherit;",
            }
        }
    }
}
