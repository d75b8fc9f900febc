//! Date range picker for the series chart.

use crate::js_bridge;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct DateRangePickerProps {
    /// DOM id flatpickr attaches to
    pub id: String,
}

/// A text input turned into a flatpickr range picker once mounted. Picked
/// ranges are reported through the bridge callback, not through `onchange`,
/// so clearing or re-bounding it from code never reaches the dashboard.
#[component]
pub fn DateRangePicker(props: DateRangePickerProps) -> Element {
    let id = props.id.clone();
    use_effect(move || js_bridge::init_range_picker(&id));

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            label {
                r#for: "{props.id}",
                style: "font-weight: bold;",
                "Range: "
            }
            input {
                id: "{props.id}",
                r#type: "text",
                readonly: true,
                placeholder: "All data",
                style: "width: 220px;",
            }
        }
    }
}
