//! Dropdown selector for the measured parameter of the selected station.

use crate::handle::DashboardHandle;
use crate::state::AppState;
use dioxus::prelude::*;
use hydro_dashboard::state::Event as Selection;

#[component]
pub fn ParameterSelector() -> Element {
    let state = use_context::<AppState>();
    let handle = use_context::<DashboardHandle>();
    let parameters = state.parameters.read().clone();
    let selected = (state.selected_parameter)();

    let on_change = move |evt: Event<FormData>| {
        handle.send(Selection::ParameterSelected(evt.value()));
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "parameter-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Parameter: "
            }
            select {
                id: "parameter-select",
                disabled: parameters.is_empty(),
                onchange: on_change,
                for parameter in parameters.iter() {
                    option {
                        value: "{parameter.field}",
                        selected: parameter.field == selected,
                        "{parameter.label}"
                    }
                }
            }
        }
    }
}
