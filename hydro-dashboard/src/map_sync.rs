//! Keeps the station map and the selection in step.
//!
//! Selection → map: pan to the selected station and restyle every marker.
//! Map → selection: a marker click becomes the same `StationSelected` event
//! the dropdown produces. The dropdown is then updated from state, which is
//! inert, so the click advances the cascade exactly once.

use crate::config::MapConfig;
use crate::state::{Event, SelectionSource};
use crate::widgets::MapView;
use hydro_core::station::{FeatureCollection, StationIndex};
use log::{debug, warn};
use std::cell::OnceCell;

pub struct MapSync {
    view: Box<dyn MapView>,
    config: MapConfig,
    index: OnceCell<StationIndex>,
}

impl MapSync {
    pub fn new(view: Box<dyn MapView>, config: MapConfig) -> Self {
        Self {
            view,
            config,
            index: OnceCell::new(),
        }
    }

    pub fn show_initial_view(&self) {
        self.view.set_view(self.config.center, self.config.zoom);
    }

    /// Add the station markers and remember their coordinates for the rest
    /// of the session. Only the first collection is kept.
    pub fn install(&self, stations: FeatureCollection) {
        let index = StationIndex::from_features(&stations);
        if self.index.set(index).is_err() {
            warn!("Station geometry already loaded, ignoring a second collection");
            return;
        }
        self.view.show_stations(&stations, &self.config.marker);
    }

    pub fn index(&self) -> Option<&StationIndex> {
        self.index.get()
    }

    /// Pan to `station_id` and mark it active.
    pub fn focus(&self, station_id: &str) {
        let Some(index) = self.index.get() else {
            debug!("Station geometry not loaded yet, cannot focus {station_id}");
            return;
        };
        match index.get(station_id) {
            Some(coordinates) => self.view.set_view(coordinates, self.config.focus_zoom),
            None => debug!("No coordinates for station {station_id}"),
        }
        for id in index.ids() {
            let style = if id == station_id {
                &self.config.active_marker
            } else {
                &self.config.marker
            };
            self.view.style_marker(id, style);
        }
    }

    pub fn marker_clicked(&self, station_id: &str) -> Event {
        Event::StationSelected {
            station: station_id.to_string(),
            source: SelectionSource::Map,
        }
    }
}
