//! Runs the selection cascade against a `DataFetcher` and the widgets.
//!
//! [`Dashboard::dispatch`] applies an event, performs the synchronous effects
//! (map focus, range reset, dropdown refresh) and returns the asynchronous
//! tasks. [`Dashboard::perform`] runs one task and returns the follow-up
//! event, if any. A browser driver spawns each task on its own so responses
//! interleave by latency; [`Dashboard::run`] drains them one at a time.
//!
//! Every failure is logged and leaves state as it was.

use crate::config::DashboardConfig;
use crate::map_sync::MapSync;
use crate::series_chart::SeriesChartBuilder;
use crate::state::{Effect, Event, SelectionState, SeriesRequest, Task, Ticket, YearlyRequest};
use crate::widgets::{ChartKind, ChartSurface, RangePicker, SelectorView, Widgets};
use crate::yearly_chart::YearlyChartBuilder;
use futures::future::join;
use hydro_api::DataFetcher;
use hydro_core::parameter::Parameter;
use log::{debug, error, info};
use std::cell::{Ref, RefCell};
use std::collections::VecDeque;

pub struct Dashboard<F> {
    fetcher: F,
    state: RefCell<SelectionState>,
    map: MapSync,
    charts: Box<dyn ChartSurface>,
    picker: Box<dyn RangePicker>,
    selectors: Box<dyn SelectorView>,
    yearly: YearlyChartBuilder,
    series: SeriesChartBuilder,
}

impl<F: DataFetcher> Dashboard<F> {
    pub fn new(fetcher: F, widgets: Widgets, config: DashboardConfig) -> Self {
        Self {
            fetcher,
            state: RefCell::new(SelectionState::new(config.stale_policy)),
            map: MapSync::new(widgets.map, config.map),
            charts: widgets.charts,
            picker: widgets.picker,
            selectors: widgets.selectors,
            yearly: YearlyChartBuilder::new(config.chart.clone()),
            series: SeriesChartBuilder::new(config.chart),
        }
    }

    /// Show the initial map view and return the startup loads.
    pub fn start(&self) -> Vec<Task> {
        self.map.show_initial_view();
        vec![Task::StationGeometry, Task::Stations]
    }

    pub fn selection(&self) -> Ref<'_, SelectionState> {
        self.state.borrow()
    }

    pub fn map(&self) -> &MapSync {
        &self.map
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn marker_clicked(&self, station_id: &str) -> Vec<Task> {
        self.dispatch(self.map.marker_clicked(station_id))
    }

    pub fn dispatch(&self, event: Event) -> Vec<Task> {
        let effects = self.state.borrow_mut().apply(event);
        let mut tasks = Vec::new();
        for effect in effects {
            match effect {
                Effect::FocusStation(station) => self.map.focus(&station),
                Effect::ResetRange => self.picker.clear_selection(),
                Effect::Run(task) => tasks.push(task),
            }
        }
        self.selectors.show(&self.state.borrow());
        tasks
    }

    pub async fn perform(&self, task: Task) -> Option<Event> {
        match task {
            Task::Stations => match self.fetcher.list_stations().await {
                Ok(stations) => Some(Event::StationsLoaded(stations)),
                Err(e) => {
                    error!("Error fetching stations: {e}");
                    None
                }
            },
            Task::StationGeometry => {
                match self.fetcher.list_station_geometry().await {
                    Ok(collection) => {
                        info!("Loaded geometry for {} stations", collection.features.len());
                        self.map.install(collection);
                    }
                    Err(e) => error!("Error fetching station geometry: {e}"),
                }
                None
            }
            Task::Parameters { ticket, station } => {
                match self.fetcher.list_parameters(&station).await {
                    Ok(parameters) => Some(Event::ParametersLoaded { ticket, parameters }),
                    Err(e) => {
                        error!("Error fetching parameters of {station}: {e}");
                        None
                    }
                }
            }
            Task::Years {
                ticket,
                station,
                parameter,
            } => match self.fetcher.list_years(&station, &parameter).await {
                Ok(years) => Some(Event::YearsLoaded { ticket, years }),
                Err(e) => {
                    error!("Error fetching years of {station}: {e}");
                    None
                }
            },
            Task::YearlyChart { ticket, request } => self.render_yearly(ticket, request).await,
            Task::SeriesChart { ticket, request } => self.render_series(ticket, request).await,
        }
    }

    /// Perform tasks and dispatch their results until nothing is pending.
    pub async fn run(&self, tasks: Vec<Task>) {
        let mut queue: VecDeque<Task> = tasks.into();
        while let Some(task) = queue.pop_front() {
            if let Some(event) = self.perform(task).await {
                queue.extend(self.dispatch(event));
            }
        }
    }

    /// Dispatch `event` and run everything it triggers.
    pub async fn send(&self, event: Event) {
        let tasks = self.dispatch(event);
        self.run(tasks).await;
    }

    async fn render_yearly(&self, ticket: Ticket, request: YearlyRequest) -> Option<Event> {
        let YearlyRequest {
            station,
            parameter,
            year,
        } = request;
        let (hourly, percentiles) = join(
            self.fetcher.get_yearly_hourly(&station, &parameter, year),
            self.fetcher.get_percentiles(&station, &parameter),
        )
        .await;
        let (hourly, percentiles) = match (hourly, percentiles) {
            (Ok(hourly), Ok(percentiles)) => (hourly, percentiles),
            (Err(e), _) | (_, Err(e)) => {
                error!("Error fetching yearly chart data for {station}/{parameter}/{year}: {e}");
                return None;
            }
        };

        if !self.state.borrow().accepts(ticket) {
            debug!("Dropping stale yearly chart for {station}/{parameter}/{year}");
            return None;
        }
        // Labels come from the selection as it is now, not as it was when
        // the request went out.
        let parameter = self.parameter_or_key(&parameter);
        let chart = self.yearly.build(year, &parameter, &hourly, &percentiles);
        self.charts
            .plot(ChartKind::Yearly, &chart.traces(), &chart.layout);
        Some(Event::ChartRendered(ticket))
    }

    async fn render_series(&self, ticket: Ticket, request: SeriesRequest) -> Option<Event> {
        let SeriesRequest {
            station,
            parameter,
            start,
            end,
        } = request;
        let series = match self
            .fetcher
            .get_series(&station, &parameter, start, end)
            .await
        {
            Ok(series) => series,
            Err(e) => {
                error!("Error fetching series for {station}/{parameter}: {e}");
                return None;
            }
        };

        if !self.state.borrow().accepts(ticket) {
            debug!("Dropping stale series chart for {station}/{parameter}");
            return None;
        }
        let parameter = self.parameter_or_key(&parameter);
        let chart = self.series.build(&parameter, &series);
        self.charts
            .plot(ChartKind::Series, &chart.traces(), &chart.layout);
        if let Some((min, max)) = chart.available {
            self.picker.set_allowed(min, max);
        }
        Some(Event::ChartRendered(ticket))
    }

    fn parameter_or_key(&self, key: &str) -> Parameter {
        let state = self.state.borrow();
        state
            .current_parameter()
            .or_else(|| state.parameters().iter().find(|p| p.field == key))
            .cloned()
            .unwrap_or_else(|| Parameter::unlabeled(key))
    }
}
