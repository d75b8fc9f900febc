//! The dashboard cascade without a browser: widgets log what they would
//! draw, and the selection it settles on is reported.

use chrono::NaiveDate;
use hydro_api::DataFetcher;
use hydro_core::station::{Coordinates, FeatureCollection};
use hydro_dashboard::config::MarkerStyle;
use hydro_dashboard::state::{Phase, SelectionSource, SelectionState};
use hydro_dashboard::trace::{Layout, Trace};
use hydro_dashboard::widgets::{
    ChartKind, ChartSurface, MapView, RangePicker, SelectorView, Widgets,
};
use hydro_dashboard::{Dashboard, DashboardConfig, Event};
use log::{debug, info};
use std::fmt;

/// Widgets that only log.
struct LogWidgets;

impl ChartSurface for LogWidgets {
    fn plot(&self, chart: ChartKind, traces: &[Trace], layout: &Layout) {
        let points: usize = traces.iter().map(|t| t.x.len()).sum();
        info!(
            "{chart:?} chart \"{}\": {} traces, {points} points, y axis {}",
            layout.title,
            traces.len(),
            layout.yaxis.title
        );
    }
}

impl MapView for LogWidgets {
    fn show_stations(&self, stations: &FeatureCollection, _style: &MarkerStyle) {
        info!("Map shows {} stations", stations.features.len());
    }

    fn set_view(&self, center: Coordinates, zoom: u8) {
        info!("Map view at {:.4}, {:.4} zoom {zoom}", center.lat, center.lon);
    }

    fn style_marker(&self, station_id: &str, style: &MarkerStyle) {
        debug!("Marker {station_id} filled {}", style.fill_color);
    }
}

impl RangePicker for LogWidgets {
    fn set_allowed(&self, min: NaiveDate, max: NaiveDate) {
        info!("Range picker allows {min} to {max}");
    }

    fn clear_selection(&self) {
        debug!("Range picker cleared");
    }
}

impl SelectorView for LogWidgets {
    fn show(&self, selection: &SelectionState) {
        debug!(
            "Dropdowns: {:?} / {:?} / {:?}",
            selection.station(),
            selection.parameter(),
            selection.year()
        );
    }
}

/// Where the cascade came to rest.
#[derive(Debug, Clone, PartialEq)]
pub struct Settled {
    pub station: String,
    pub parameter: String,
    pub year: Option<i32>,
    pub years: Vec<i32>,
    pub phase: Phase,
}

impl Settled {
    fn from_state(state: &SelectionState) -> Self {
        Self {
            station: state.station().to_string(),
            parameter: state.parameter().to_string(),
            year: state.year(),
            years: state.years().to_vec(),
            phase: state.phase(),
        }
    }
}

impl fmt::Display for Settled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "station:   {}", self.station)?;
        writeln!(f, "parameter: {}", self.parameter)?;
        match self.year {
            Some(year) => writeln!(f, "year:      {year}")?,
            None => writeln!(f, "year:      -")?,
        }
        let years: Vec<String> = self.years.iter().map(|y| y.to_string()).collect();
        writeln!(f, "years:     {}", years.join(", "))?;
        write!(f, "phase:     {:?}", self.phase)
    }
}

/// Load everything, let the defaults settle, then select `station` if given.
pub async fn run_cascade<F: DataFetcher>(fetcher: F, station: Option<&str>) -> Settled {
    let widgets = Widgets {
        charts: Box::new(LogWidgets),
        map: Box::new(LogWidgets),
        picker: Box::new(LogWidgets),
        selectors: Box::new(LogWidgets),
    };
    let dashboard = Dashboard::new(fetcher, widgets, DashboardConfig::default());
    dashboard.run(dashboard.start()).await;

    if let Some(station) = station {
        dashboard
            .send(Event::StationSelected {
                station: station.to_string(),
                source: SelectionSource::Dropdown,
            })
            .await;
    }

    let settled = Settled::from_state(&dashboard.selection());
    settled
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydro_api::fetcher::scripted::ScriptedFetcher;

    fn fetcher() -> ScriptedFetcher {
        let fetcher = ScriptedFetcher::new();
        fetcher
            .respond(
                "/api/stations/geo/",
                r#"{"type": "FeatureCollection", "features": []}"#,
            )
            .respond(
                "/api/stations/",
                r#"[{"st_name": "S1", "st_label": "One"}, {"st_name": "S2", "st_label": "Two"}]"#,
            )
            .respond(
                "/api/stations/S1/values/",
                r#"[{"django_field_name": "h2o_temp", "parameter": "Water Temp", "unit": "°C"}]"#,
            )
            .respond("/api/stations/S1/years/", "[2020, 2021]")
            .respond("/api/stations/S1/h2o_temp/2021/yearly-data/", "[]")
            .respond("/api/stations/S1/h2o_temp/percentiles/", "[]")
            .respond(
                "/api/stations/S1/h2o_temp/dataseries/?start=&end=",
                r#"{"min_date": null, "max_date": null, "data": []}"#,
            )
            .respond("/api/stations/S2/values/", "[]");
        fetcher
    }

    #[tokio::test]
    async fn test_defaults_settle() {
        let settled = run_cascade(fetcher(), None).await;
        assert_eq!(
            settled,
            Settled {
                station: "S1".to_string(),
                parameter: "h2o_temp".to_string(),
                year: Some(2021),
                years: vec![2021, 2020],
                phase: Phase::ChartsReady,
            }
        );
        assert!(settled.to_string().contains("years:     2021, 2020"));
    }

    #[tokio::test]
    async fn test_station_without_parameters_stops_early() {
        let settled = run_cascade(fetcher(), Some("S2")).await;
        assert_eq!(settled.station, "S2");
        assert_eq!(settled.parameter, "");
        assert_eq!(settled.year, None);
        assert_eq!(settled.phase, Phase::ParametersLoaded);
        assert!(settled.to_string().contains("year:      -"));
    }
}
