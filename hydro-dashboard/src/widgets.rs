//! Boundaries to the rendering layer. Implementations draw; they make no
//! selection decisions.

use crate::config::MarkerStyle;
use crate::state::SelectionState;
use crate::trace::{Layout, Trace};
use chrono::NaiveDate;
use hydro_core::station::{Coordinates, FeatureCollection};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Yearly,
    Series,
}

/// Draws an ordered trace list with its layout, replacing what was there.
pub trait ChartSurface {
    fn plot(&self, chart: ChartKind, traces: &[Trace], layout: &Layout);
}

pub trait MapView {
    /// Add one marker per feature. Clicks on a marker must be reported back
    /// with the feature id.
    fn show_stations(&self, stations: &FeatureCollection, style: &MarkerStyle);
    fn set_view(&self, center: Coordinates, zoom: u8);
    fn style_marker(&self, station_id: &str, style: &MarkerStyle);
}

/// The date range widget. Its allowed bounds and its selected range are
/// independent.
pub trait RangePicker {
    fn set_allowed(&self, min: NaiveDate, max: NaiveDate);
    fn clear_selection(&self);
}

/// The station, parameter and year dropdowns. Showing a selection is a
/// programmatic assignment and must not be reported back as a user change.
pub trait SelectorView {
    fn show(&self, selection: &SelectionState);
}

/// Range picker state, in the shape the widget takes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerRange {
    pub allowed_min: Option<NaiveDate>,
    pub allowed_max: Option<NaiveDate>,
    pub selected_start: Option<NaiveDate>,
    pub selected_end: Option<NaiveDate>,
}

pub struct Widgets {
    pub charts: Box<dyn ChartSurface>,
    pub map: Box<dyn MapView>,
    pub picker: Box<dyn RangePicker>,
    pub selectors: Box<dyn SelectorView>,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picker_range_serializes_camel_case() {
        let range = PickerRange {
            allowed_min: NaiveDate::from_ymd_opt(2015, 6, 1),
            allowed_max: NaiveDate::from_ymd_opt(2024, 9, 30),
            selected_start: None,
            selected_end: None,
        };
        let json = serde_json::to_value(&range).unwrap();
        assert_eq!(json["allowedMin"], "2015-06-01");
        assert_eq!(json["allowedMax"], "2024-09-30");
        assert!(json["selectedStart"].is_null());
    }
}
