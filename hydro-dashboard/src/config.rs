//! Dashboard settings: map view, marker styles, chart colours, and how
//! out-of-order responses are treated.

use crate::state::StalePolicy;
use hydro_core::station::Coordinates;
use serde::{Deserialize, Serialize};

/// Circle marker style, in the shape Leaflet's `setStyle` takes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    pub radius: f64,
    pub fill_color: String,
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
    pub fill_opacity: f64,
}

impl MarkerStyle {
    pub fn station() -> Self {
        Self {
            radius: 6.0,
            fill_color: "#002f61".to_string(),
            color: "#000".to_string(),
            weight: 1.0,
            opacity: 1.0,
            fill_opacity: 0.7,
        }
    }

    pub fn active_station() -> Self {
        Self {
            fill_color: "#39be74".to_string(),
            fill_opacity: 1.0,
            ..Self::station()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Initial view before any station is selected.
    pub center: Coordinates,
    pub zoom: u8,
    /// Zoom used when panning to a selected station.
    pub focus_zoom: u8,
    pub marker: MarkerStyle,
    pub active_marker: MarkerStyle,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: Coordinates {
                lon: 15.4730,
                lat: 49.8175,
            },
            zoom: 6,
            focus_zoom: 16,
            marker: MarkerStyle::station(),
            active_marker: MarkerStyle::active_station(),
        }
    }
}

/// Colours of the chart traces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    /// Fill of the Q10 to Q90 band.
    pub outer_band: String,
    /// Fill of the Q30 to Q70 band.
    pub inner_band: String,
    pub median: String,
    pub measured: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            outer_band: "rgba(0,100,80,0.2)".to_string(),
            inner_band: "rgba(0,176,246,0.2)".to_string(),
            median: "#f00069".to_string(),
            measured: "#005f85".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub chart: ChartStyle,
    #[serde(default)]
    pub stale_policy: StalePolicy,
}
