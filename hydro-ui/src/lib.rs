//! Browser rendering for the hydro station dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Plotly, Leaflet and flatpickr calls via `js_sys::eval()`
//! - `widgets`: the dashboard's widget traits implemented on that bridge
//! - `state`: reactive AppState with Dioxus Signals
//! - `handle`: runs a `Dashboard` on the browser event loop
//! - `components`: reusable RSX components (selectors, containers, etc.)

pub mod components;
pub mod handle;
pub mod js_bridge;
pub mod state;
pub mod widgets;
