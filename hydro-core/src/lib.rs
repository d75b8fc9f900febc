//! Core types shared by the hydro dashboard crates.
//!
//! Everything here mirrors the JSON contracts of the station API:
//! - `station`: station list entries, the GeoJSON geometry collection and
//!   the session-wide id → coordinates index
//! - `parameter`: measured quantities available at a station
//! - `observation`: hourly/series points, percentile rows and ranged series
//! - `dates`: date formatting and parsing at the API boundary

pub mod dates;
pub mod observation;
pub mod parameter;
pub mod station;
