//! Drives a `Dashboard` from the browser event loop.
//!
//! Events from dropdowns, marker clicks and the range picker go through one
//! channel and are dispatched in order. Every task the dispatch returns runs
//! on its own, so responses come back in whatever order the network delivers
//! them; the dashboard's tickets sort out which ones still apply.

use crate::js_bridge;
use crate::state::AppState;
use crate::widgets::browser_widgets;
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::StreamExt;
use hydro_api::{ApiConfig, HttpFetcher};
use hydro_core::dates::parse_date;
use hydro_dashboard::{Dashboard, DashboardConfig, Event, Task};
use log::warn;
use std::rc::Rc;

#[derive(Clone)]
pub struct DashboardHandle {
    dashboard: Rc<Dashboard<HttpFetcher>>,
    events: UnboundedSender<Event>,
}

impl DashboardHandle {
    /// Build the dashboard, hook up the JS callbacks and start loading.
    /// Must be called from within a component.
    pub fn launch(
        api: ApiConfig,
        config: DashboardConfig,
        state: AppState,
    ) -> hydro_api::Result<Self> {
        let fetcher = HttpFetcher::new(api)?;
        let dashboard = Rc::new(Dashboard::new(fetcher, browser_widgets(state), config));
        let (events, receiver) = mpsc::unbounded();
        let handle = Self { dashboard, events };

        handle.install_callbacks();
        dioxus::prelude::spawn(handle.clone().drive(receiver));
        Ok(handle)
    }

    pub fn send(&self, event: Event) {
        if self.events.unbounded_send(event).is_err() {
            warn!("Dashboard is not running, dropping event");
        }
    }

    async fn drive(self, mut receiver: UnboundedReceiver<Event>) {
        for task in self.dashboard.start() {
            self.spawn_task(task);
        }
        while let Some(event) = receiver.next().await {
            for task in self.dashboard.dispatch(event) {
                self.spawn_task(task);
            }
        }
    }

    fn spawn_task(&self, task: Task) {
        let handle = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Some(event) = handle.dashboard.perform(task).await {
                handle.send(event);
            }
        });
    }

    fn install_callbacks(&self) {
        let handle = self.clone();
        js_bridge::on_marker_click(move |station_id| {
            handle.send(handle.dashboard.map().marker_clicked(&station_id));
        });

        let handle = self.clone();
        js_bridge::on_range_change(move |start, end| {
            let picked: Vec<_> = [start.as_str(), end.as_str()]
                .into_iter()
                .filter_map(parse_date)
                .collect();
            match Event::from_picked_dates(&picked) {
                Some(event) => handle.send(event),
                None => warn!("Ignoring unparseable range {start} to {end}"),
            }
        });
    }
}

impl PartialEq for DashboardHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.dashboard, &other.dashboard)
    }
}
