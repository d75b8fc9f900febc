//! Station → parameter → year selection as an explicit state machine.
//!
//! `SelectionState::apply` takes an [`Event`] and returns the [`Effect`]s it
//! requires: synchronous widget updates and asynchronous [`Task`]s. Nothing
//! here performs I/O. Fetch results come back as events carrying the
//! [`Ticket`] their task was issued with; a ticket stops being current as
//! soon as its cascade step is invalidated, so late responses for an older
//! selection are dropped instead of overwriting a newer one.

use chrono::NaiveDate;
use hydro_core::parameter::Parameter;
use hydro_core::station::Station;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Cascade steps that issue requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Parameters,
    Years,
    YearlyChart,
    SeriesChart,
}

/// Identifies the request a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub step: Step,
    pub generation: u64,
}

#[derive(Debug, Clone, Default)]
struct Generations {
    parameters: u64,
    years: u64,
    yearly: u64,
    series: u64,
}

impl Generations {
    fn slot(&mut self, step: Step) -> &mut u64 {
        match step {
            Step::Parameters => &mut self.parameters,
            Step::Years => &mut self.years,
            Step::YearlyChart => &mut self.yearly,
            Step::SeriesChart => &mut self.series,
        }
    }

    fn current(&self, step: Step) -> u64 {
        match step {
            Step::Parameters => self.parameters,
            Step::Years => self.years,
            Step::YearlyChart => self.yearly,
            Step::SeriesChart => self.series,
        }
    }

    /// Invalidate outstanding requests of `step` and hand out a new ticket.
    fn issue(&mut self, step: Step) -> Ticket {
        let slot = self.slot(step);
        *slot += 1;
        Ticket {
            step,
            generation: *slot,
        }
    }

    fn invalidate(&mut self, steps: &[Step]) {
        for step in steps {
            *self.slot(*step) += 1;
        }
    }
}

/// What to do with a response whose ticket is no longer current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Drop it.
    #[default]
    Discard,
    /// Apply it anyway: whichever response arrives last wins, even when it
    /// belongs to an older selection.
    LastWriterWins,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    StationsLoaded,
    ParametersLoaded,
    YearsLoaded,
    ChartsReady,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    Dropdown,
    Map,
    /// First entry picked when a list loads.
    Default,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    StationsLoaded(Vec<Station>),
    StationSelected {
        station: String,
        source: SelectionSource,
    },
    ParametersLoaded {
        ticket: Ticket,
        parameters: Vec<Parameter>,
    },
    ParameterSelected(String),
    YearsLoaded {
        ticket: Ticket,
        years: Vec<i32>,
    },
    YearSelected(i32),
    /// Both endpoints of a date range picked.
    RangeSelected {
        start: NaiveDate,
        end: NaiveDate,
    },
    ChartRendered(Ticket),
}

impl Event {
    /// Range event for the dates currently picked in the range widget, if
    /// exactly two are picked.
    pub fn from_picked_dates(dates: &[NaiveDate]) -> Option<Event> {
        match dates {
            [start, end] => Some(Event::RangeSelected {
                start: *start,
                end: *end,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearlyRequest {
    pub station: String,
    pub parameter: String,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRequest {
    pub station: String,
    pub parameter: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Asynchronous work requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    Stations,
    StationGeometry,
    Parameters {
        ticket: Ticket,
        station: String,
    },
    Years {
        ticket: Ticket,
        station: String,
        parameter: String,
    },
    YearlyChart {
        ticket: Ticket,
        request: YearlyRequest,
    },
    SeriesChart {
        ticket: Ticket,
        request: SeriesRequest,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Pan to the station and highlight its marker.
    FocusStation(String),
    /// Clear the range picker's selected range (not its allowed bounds).
    ResetRange,
    Run(Task),
}

/// The current selection and the option lists it was made from.
#[derive(Debug, Clone)]
pub struct SelectionState {
    stations: Vec<Station>,
    parameters: Vec<Parameter>,
    years: Vec<i32>,
    station: String,
    parameter: String,
    year: Option<i32>,
    range: Option<(NaiveDate, NaiveDate)>,
    phase: Phase,
    generations: Generations,
    policy: StalePolicy,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(StalePolicy::default())
    }
}

impl SelectionState {
    pub fn new(policy: StalePolicy) -> Self {
        Self {
            stations: Vec::new(),
            parameters: Vec::new(),
            years: Vec::new(),
            station: String::new(),
            parameter: String::new(),
            year: None,
            range: None,
            phase: Phase::Idle,
            generations: Generations::default(),
            policy,
        }
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Year options, most recent first.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Selected station id, empty when none.
    pub fn station(&self) -> &str {
        &self.station
    }

    /// Selected parameter key, empty when none.
    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.range
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn policy(&self) -> StalePolicy {
        self.policy
    }

    pub fn current_parameter(&self) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.field == self.parameter)
    }

    /// Whether a response carrying `ticket` should be applied.
    pub fn accepts(&self, ticket: Ticket) -> bool {
        match self.policy {
            StalePolicy::Discard => self.generations.current(ticket.step) == ticket.generation,
            StalePolicy::LastWriterWins => true,
        }
    }

    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::StationsLoaded(stations) => {
                info!("Loaded {} stations", stations.len());
                self.stations = stations;
                self.phase = Phase::StationsLoaded;
                match self.stations.first().map(|s| s.id.clone()) {
                    Some(first) => self.select_station(first, SelectionSource::Default),
                    None => Vec::new(),
                }
            }
            Event::StationSelected { station, source } => {
                if station.is_empty() {
                    return Vec::new();
                }
                if !self.stations.is_empty() && !self.stations.iter().any(|s| s.id == station) {
                    warn!("Ignoring selection of unknown station {station}");
                    return Vec::new();
                }
                self.select_station(station, source)
            }
            Event::ParametersLoaded { ticket, parameters } => {
                if !self.accepts(ticket) {
                    debug!("Dropping stale parameter list ({ticket:?})");
                    return Vec::new();
                }
                self.parameters = parameters;
                self.phase = Phase::ParametersLoaded;
                match self.parameters.first().map(|p| p.field.clone()) {
                    Some(first) => self.select_parameter(first),
                    None => {
                        info!("Station {} has no parameters", self.station);
                        Vec::new()
                    }
                }
            }
            Event::ParameterSelected(parameter) => {
                if self.station.is_empty() || parameter.is_empty() {
                    return Vec::new();
                }
                if !self.parameters.iter().any(|p| p.field == parameter) {
                    warn!("Ignoring unknown parameter {parameter} for {}", self.station);
                    return Vec::new();
                }
                self.select_parameter(parameter)
            }
            Event::YearsLoaded { ticket, mut years } => {
                if !self.accepts(ticket) {
                    debug!("Dropping stale year list ({ticket:?})");
                    return Vec::new();
                }
                years.sort_unstable_by(|a, b| b.cmp(a));
                years.dedup();
                self.years = years;
                self.phase = Phase::YearsLoaded;
                match self.years.first().copied() {
                    Some(latest) => {
                        self.year = Some(latest);
                        let mut effects = self.rebuild_yearly();
                        effects.extend(self.rebuild_series());
                        effects
                    }
                    None => {
                        info!(
                            "No years for {} / {}, nothing to chart",
                            self.station, self.parameter
                        );
                        Vec::new()
                    }
                }
            }
            Event::YearSelected(year) => {
                if self.station.is_empty() || self.parameter.is_empty() {
                    return Vec::new();
                }
                if !self.years.contains(&year) {
                    warn!("Ignoring year {year} without data for {}", self.station);
                    return Vec::new();
                }
                self.year = Some(year);
                self.phase = Phase::YearsLoaded;
                self.rebuild_yearly()
            }
            Event::RangeSelected { start, end } => {
                if self.station.is_empty() || self.parameter.is_empty() {
                    return Vec::new();
                }
                let range = if start <= end {
                    (start, end)
                } else {
                    (end, start)
                };
                self.range = Some(range);
                self.rebuild_series()
            }
            Event::ChartRendered(ticket) => {
                if self.generations.current(ticket.step) == ticket.generation {
                    self.phase = Phase::ChartsReady;
                }
                Vec::new()
            }
        }
    }

    fn select_station(&mut self, station: String, source: SelectionSource) -> Vec<Effect> {
        info!("Station {station} selected ({source:?})");
        self.station = station.clone();
        self.parameters.clear();
        self.parameter.clear();
        self.years.clear();
        self.year = None;
        self.phase = Phase::StationsLoaded;
        self.generations
            .invalidate(&[Step::Years, Step::YearlyChart, Step::SeriesChart]);
        let ticket = self.generations.issue(Step::Parameters);

        let mut effects = Vec::new();
        if source != SelectionSource::Default {
            effects.push(Effect::FocusStation(station.clone()));
        }
        effects.push(Effect::Run(Task::Parameters { ticket, station }));
        effects
    }

    fn select_parameter(&mut self, parameter: String) -> Vec<Effect> {
        info!("Parameter {parameter} selected for {}", self.station);
        self.parameter = parameter.clone();
        self.years.clear();
        self.year = None;
        self.range = None;
        self.phase = Phase::ParametersLoaded;
        self.generations
            .invalidate(&[Step::YearlyChart, Step::SeriesChart]);
        let ticket = self.generations.issue(Step::Years);

        vec![
            Effect::ResetRange,
            Effect::Run(Task::Years {
                ticket,
                station: self.station.clone(),
                parameter,
            }),
        ]
    }

    fn rebuild_yearly(&mut self) -> Vec<Effect> {
        let Some(year) = self.year else {
            return Vec::new();
        };
        let ticket = self.generations.issue(Step::YearlyChart);
        vec![Effect::Run(Task::YearlyChart {
            ticket,
            request: YearlyRequest {
                station: self.station.clone(),
                parameter: self.parameter.clone(),
                year,
            },
        })]
    }

    fn rebuild_series(&mut self) -> Vec<Effect> {
        let ticket = self.generations.issue(Step::SeriesChart);
        vec![Effect::Run(Task::SeriesChart {
            ticket,
            request: SeriesRequest {
                station: self.station.clone(),
                parameter: self.parameter.clone(),
                start: self.range.map(|(start, _)| start),
                end: self.range.map(|(_, end)| end),
            },
        })]
    }
}
