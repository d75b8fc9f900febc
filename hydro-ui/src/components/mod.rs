//! Reusable Dioxus RSX components for the dashboard.

mod chart_container;
mod chart_header;
mod date_range_picker;
mod error_display;
mod loading_spinner;
mod map_container;
mod parameter_selector;
mod station_selector;
mod year_selector;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use date_range_picker::DateRangePicker;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use map_container::MapContainer;
pub use parameter_selector::ParameterSelector;
pub use station_selector::StationSelector;
pub use year_selector::YearSelector;
