//! Application state managed via Dioxus context.
//!
//! `AppState` bundles the dropdown signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with
//! `use_context::<AppState>()`. The signals mirror the dashboard's
//! `SelectionState`; components never write them, they send events.

use dioxus::prelude::*;
use hydro_core::parameter::Parameter;
use hydro_core::station::Station;
use hydro_dashboard::state::{Phase, SelectionState};
use hydro_dashboard::widgets::SelectorView;

#[derive(Clone, Copy)]
pub struct AppState {
    /// Whether the station list is still loading
    pub loading: Signal<bool>,
    pub stations: Signal<Vec<Station>>,
    pub parameters: Signal<Vec<Parameter>>,
    /// Most recent first
    pub years: Signal<Vec<i32>>,
    pub selected_station: Signal<String>,
    pub selected_parameter: Signal<String>,
    pub selected_year: Signal<Option<i32>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            loading: Signal::new(true),
            stations: Signal::new(Vec::new()),
            parameters: Signal::new(Vec::new()),
            years: Signal::new(Vec::new()),
            selected_station: Signal::new(String::new()),
            selected_parameter: Signal::new(String::new()),
            selected_year: Signal::new(None),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `value` only if it differs, so unchanged dropdowns do not re-render.
fn assign<T: PartialEq + 'static>(mut signal: Signal<T>, value: T) {
    if *signal.peek() != value {
        signal.set(value);
    }
}

impl SelectorView for AppState {
    fn show(&self, selection: &SelectionState) {
        assign(self.loading, selection.phase() == Phase::Idle);
        assign(self.stations, selection.stations().to_vec());
        assign(self.parameters, selection.parameters().to_vec());
        assign(self.years, selection.years().to_vec());
        assign(self.selected_station, selection.station().to_string());
        assign(self.selected_parameter, selection.parameter().to_string());
        assign(self.selected_year, selection.year());
    }
}
