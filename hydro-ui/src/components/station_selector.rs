//! Dropdown selector for choosing a station.

use crate::handle::DashboardHandle;
use crate::state::AppState;
use dioxus::prelude::*;
use hydro_dashboard::state::{Event as Selection, SelectionSource};

/// Station dropdown. Shows the selection held by the dashboard and reports
/// user changes to it; marker clicks update it through the same path.
#[component]
pub fn StationSelector() -> Element {
    let state = use_context::<AppState>();
    let handle = use_context::<DashboardHandle>();
    let stations = state.stations.read().clone();
    let selected = (state.selected_station)();

    let on_change = move |evt: Event<FormData>| {
        handle.send(Selection::StationSelected {
            station: evt.value(),
            source: SelectionSource::Dropdown,
        });
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "station-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Station: "
            }
            select {
                id: "station-select",
                onchange: on_change,
                for station in stations.iter() {
                    option {
                        value: "{station.id}",
                        selected: station.id == selected,
                        "{station.display_label()}"
                    }
                }
            }
        }
    }
}
