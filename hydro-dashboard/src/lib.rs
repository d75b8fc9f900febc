//! UI-agnostic core of the hydro station dashboard.
//!
//! This crate provides:
//! - `state`: the station → parameter → year selection cascade as an explicit
//!   state machine with per-step request tickets
//! - `map_sync`: selection ↔ map binding (pan, marker highlight, marker clicks)
//! - `yearly_chart`: one year of hourly values over layered percentile bands
//! - `series_chart`: a gap-preserving series over an arbitrary range
//! - `trace`: Plotly-shaped trace and layout descriptors
//! - `widgets`: the traits the rendering layer implements
//! - `dashboard`: the orchestrator that runs the cascade against a `DataFetcher`

pub mod config;
pub mod dashboard;
pub mod map_sync;
pub mod series_chart;
pub mod state;
pub mod trace;
pub mod widgets;
pub mod yearly_chart;

pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use state::{Event, SelectionState, Task};
