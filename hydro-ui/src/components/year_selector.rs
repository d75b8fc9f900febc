//! Dropdown selector for the year shown in the yearly chart.

use crate::handle::DashboardHandle;
use crate::state::AppState;
use dioxus::prelude::*;
use hydro_dashboard::state::Event as Selection;

#[component]
pub fn YearSelector() -> Element {
    let state = use_context::<AppState>();
    let handle = use_context::<DashboardHandle>();
    let years = state.years.read().clone();
    let selected = (state.selected_year)();

    let on_change = move |evt: Event<FormData>| {
        match evt.value().parse::<i32>() {
            Ok(year) => handle.send(Selection::YearSelected(year)),
            Err(e) => log::warn!("Ignoring year {:?}: {e}", evt.value()),
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "year-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Year: "
            }
            select {
                id: "year-select",
                disabled: years.is_empty(),
                onchange: on_change,
                for year in years.iter() {
                    option {
                        value: "{year}",
                        selected: Some(*year) == selected,
                        "{year}"
                    }
                }
            }
        }
    }
}
