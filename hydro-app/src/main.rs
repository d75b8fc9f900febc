//! Hydro Station Dashboard
//!
//! Pick a station from the dropdown or the map, then a measured parameter
//! and a year. The yearly chart overlays that year's hourly values on the
//! station's monthly percentile bands (Q10 to Q90, Q30 to Q70, median). The
//! series chart below shows the raw measurements over a picked date range,
//! or over everything the station has when no range is picked.
//!
//! Data comes from the station API on the origin that served the page.

use dioxus::prelude::*;
use hydro_api::ApiConfig;
use hydro_dashboard::DashboardConfig;
use hydro_ui::components::{
    ChartContainer, ChartHeader, DateRangePicker, ErrorDisplay, LoadingSpinner, MapContainer,
    ParameterSelector, StationSelector, YearSelector,
};
use hydro_ui::handle::DashboardHandle;
use hydro_ui::js_bridge;
use hydro_ui::state::AppState;
use hydro_ui::widgets::{MAP_ID, RANGE_PICKER_ID, SERIES_CHART_ID, YEARLY_CHART_ID};

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("hydro-root"))
        .launch(App);
}

/// The API lives next to the page.
fn api_config() -> ApiConfig {
    match web_sys::window().and_then(|w| w.location().origin().ok()) {
        Some(origin) => ApiConfig::new(origin),
        None => {
            log::warn!("No page origin, falling back to the default API URL");
            ApiConfig::default()
        }
    }
}

#[component]
fn App() -> Element {
    let state = use_context_provider(AppState::new);

    let launched = use_hook(move || {
        js_bridge::init_dashboard(&[MAP_ID, YEARLY_CHART_ID, SERIES_CHART_ID, RANGE_PICKER_ID]);
        DashboardHandle::launch(api_config(), DashboardConfig::default(), state)
            .map_err(|e| e.to_string())
    });
    let body = match launched {
        Ok(handle) => rsx! { DashboardView { handle } },
        Err(message) => rsx! { ErrorDisplay { message } },
    };

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",
            h2 { style: "margin: 0 0 12px 0;", "Hydrological Stations" }
            {body}
        }
    }
}

#[component]
fn DashboardView(handle: DashboardHandle) -> Element {
    use_context_provider(|| handle.clone());
    let state = use_context::<AppState>();

    rsx! {
        div {
            style: "display: flex; flex-wrap: wrap; gap: 12px; align-items: flex-end; margin-bottom: 8px;",
            StationSelector {}
            ParameterSelector {}
            YearSelector {}
        }
        if (state.loading)() {
            LoadingSpinner {}
        }

        MapContainer { id: MAP_ID.to_string() }

        div {
            style: "margin-top: 16px;",
            ChartHeader {
                title: "Selected year".to_string(),
                note: "Hourly values over the monthly percentiles of all measured years".to_string(),
            }
            ChartContainer { id: YEARLY_CHART_ID.to_string(), min_height: 450 }
        }

        div {
            style: "margin-top: 16px;",
            ChartHeader {
                title: "Measurements".to_string(),
                note: "Gaps in the line are gaps in the data".to_string(),
            }
            DateRangePicker { id: RANGE_PICKER_ID.to_string() }
            ChartContainer { id: SERIES_CHART_ID.to_string(), min_height: 400 }
        }
    }
}
