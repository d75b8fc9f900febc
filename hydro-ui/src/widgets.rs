//! Browser implementations of the dashboard widget traits, drawing through
//! the JS bridge.

use crate::js_bridge::{self, js_literal};
use crate::state::AppState;
use chrono::NaiveDate;
use hydro_core::station::{Coordinates, FeatureCollection};
use hydro_dashboard::config::MarkerStyle;
use hydro_dashboard::trace::{Layout, Trace};
use hydro_dashboard::widgets::{ChartKind, ChartSurface, MapView, PickerRange, RangePicker, Widgets};

/// DOM ids of the widget containers.
pub const YEARLY_CHART_ID: &str = "yearlyChart";
pub const SERIES_CHART_ID: &str = "seriesChart";
pub const MAP_ID: &str = "map";
pub const RANGE_PICKER_ID: &str = "rangePicker";

pub struct PlotlyCharts;

impl ChartSurface for PlotlyCharts {
    fn plot(&self, chart: ChartKind, traces: &[Trace], layout: &Layout) {
        let container_id = match chart {
            ChartKind::Yearly => YEARLY_CHART_ID,
            ChartKind::Series => SERIES_CHART_ID,
        };
        js_bridge::plot(container_id, &js_literal(traces), &js_literal(layout));
    }
}

pub struct LeafletMap;

impl MapView for LeafletMap {
    fn show_stations(&self, stations: &FeatureCollection, style: &MarkerStyle) {
        js_bridge::add_stations(&js_literal(stations), &js_literal(style));
    }

    fn set_view(&self, center: Coordinates, zoom: u8) {
        js_bridge::set_map_view(MAP_ID, center.lat, center.lon, zoom);
    }

    fn style_marker(&self, station_id: &str, style: &MarkerStyle) {
        js_bridge::style_marker(station_id, &js_literal(style));
    }
}

pub struct FlatpickrRange;

impl RangePicker for FlatpickrRange {
    fn set_allowed(&self, min: NaiveDate, max: NaiveDate) {
        let range = PickerRange {
            allowed_min: Some(min),
            allowed_max: Some(max),
            selected_start: None,
            selected_end: None,
        };
        js_bridge::set_picker_bounds(&js_literal(&range));
    }

    fn clear_selection(&self) {
        js_bridge::clear_picker();
    }
}

/// Widgets for the browser; the dropdowns are the app's signals.
pub fn browser_widgets(state: AppState) -> Widgets {
    Widgets {
        charts: Box::new(PlotlyCharts),
        map: Box::new(LeafletMap),
        picker: Box::new(FlatpickrRange),
        selectors: Box::new(state),
    }
}
