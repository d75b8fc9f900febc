use crate::endpoint::Endpoint;
use crate::error::{FetchError, Result};
use chrono::NaiveDate;
use hydro_core::observation::{DataSeries, HourlyPoint, PercentileRow};
use hydro_core::parameter::Parameter;
use hydro_core::station::{FeatureCollection, Station};
use serde::de::DeserializeOwned;

/// Asynchronous reads against the station API.
///
/// Implementors only provide `get_text`; the typed reads decode its body
/// and classify decoding failures as `MalformedResponse`. Every read may
/// legitimately return an empty collection.
///
/// The futures are not `Send`: the dashboard runs on a single-threaded
/// executor (the browser event loop or a current-thread runtime).
#[allow(async_fn_in_trait)]
pub trait DataFetcher {
    /// Fetch the raw body of an endpoint.
    async fn get_text(&self, endpoint: &Endpoint) -> Result<String>;

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T> {
        let body = self.get_text(endpoint).await?;
        serde_json::from_str(&body).map_err(|source| FetchError::MalformedResponse {
            url: endpoint.path(),
            source,
        })
    }

    async fn list_stations(&self) -> Result<Vec<Station>> {
        self.get_json(&Endpoint::Stations).await
    }

    async fn list_station_geometry(&self) -> Result<FeatureCollection> {
        self.get_json(&Endpoint::StationGeometry).await
    }

    async fn list_parameters(&self, station: &str) -> Result<Vec<Parameter>> {
        self.get_json(&Endpoint::Parameters {
            station: station.to_string(),
        })
        .await
    }

    /// Years with measurements for a station. The server's list is
    /// station-wide, so `parameter` only scopes the request to the caller's
    /// cascade step.
    async fn list_years(&self, station: &str, parameter: &str) -> Result<Vec<i32>> {
        log::debug!("Listing years of {station} for {parameter}");
        self.get_json(&Endpoint::Years {
            station: station.to_string(),
        })
        .await
    }

    async fn get_yearly_hourly(
        &self,
        station: &str,
        parameter: &str,
        year: i32,
    ) -> Result<Vec<HourlyPoint>> {
        self.get_json(&Endpoint::YearlyData {
            station: station.to_string(),
            field: parameter.to_string(),
            year,
        })
        .await
    }

    async fn get_percentiles(&self, station: &str, parameter: &str) -> Result<Vec<PercentileRow>> {
        self.get_json(&Endpoint::Percentiles {
            station: station.to_string(),
            field: parameter.to_string(),
        })
        .await
    }

    async fn get_series(
        &self,
        station: &str,
        parameter: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<DataSeries> {
        self.get_json(&Endpoint::DataSeries {
            station: station.to_string(),
            field: parameter.to_string(),
            start,
            end,
        })
        .await
    }
}

/// In-memory fetcher serving canned bodies by path, for tests.
#[cfg(any(test, feature = "testing"))]
pub mod scripted {
    use super::DataFetcher;
    use crate::endpoint::Endpoint;
    use crate::error::{FetchError, Result};
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    pub struct ScriptedFetcher {
        responses: RefCell<HashMap<String, std::result::Result<String, String>>>,
        requests: RefCell<Vec<String>>,
    }

    impl ScriptedFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        /// Serve `body` for `path`.
        pub fn respond(&self, path: &str, body: &str) -> &Self {
            self.responses
                .borrow_mut()
                .insert(path.to_string(), Ok(body.to_string()));
            self
        }

        /// Fail requests to `path` with a network error.
        pub fn fail(&self, path: &str, message: &str) -> &Self {
            self.responses
                .borrow_mut()
                .insert(path.to_string(), Err(message.to_string()));
            self
        }

        /// Paths requested so far, in order.
        pub fn requests(&self) -> Vec<String> {
            self.requests.borrow().clone()
        }

        pub fn clear_requests(&self) {
            self.requests.borrow_mut().clear();
        }

        pub fn request_count(&self, path: &str) -> usize {
            self.requests.borrow().iter().filter(|p| *p == path).count()
        }
    }

    impl DataFetcher for ScriptedFetcher {
        async fn get_text(&self, endpoint: &Endpoint) -> Result<String> {
            let path = endpoint.path();
            self.requests.borrow_mut().push(path.clone());
            match self.responses.borrow().get(&path) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(message)) => Err(FetchError::Network {
                    url: path,
                    message: message.clone(),
                }),
                None => Err(FetchError::Network {
                    message: "no scripted response".to_string(),
                    url: path,
                }),
            }
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::scripted::ScriptedFetcher;
    use super::*;
    use crate::error::FailureKind;

    #[tokio::test]
    async fn test_typed_reads_decode_bodies() {
        let fetcher = ScriptedFetcher::new();
        fetcher
            .respond(
                "/api/stations/",
                r#"[{"st_name": "S1", "st_label": "Upper Brook"}]"#,
            )
            .respond("/api/stations/S1/years/", "[2020, 2021]");

        let stations = fetcher.list_stations().await.unwrap();
        assert_eq!(stations[0].id, "S1");

        let years = fetcher.list_years("S1", "h2o_temp").await.unwrap();
        assert_eq!(years, vec![2020, 2021]);
        assert_eq!(
            fetcher.requests(),
            vec!["/api/stations/", "/api/stations/S1/years/"]
        );
    }

    #[tokio::test]
    async fn test_empty_collections_are_not_errors() {
        let fetcher = ScriptedFetcher::new();
        fetcher.respond("/api/stations/S1/years/", "[]");
        let years = fetcher.list_years("S1", "h2o_temp").await.unwrap();
        assert!(years.is_empty());
    }

    #[tokio::test]
    async fn test_failures_are_classified() {
        let fetcher = ScriptedFetcher::new();
        fetcher
            .respond("/api/stations/S1/values/", r#"{"detail": "Not found."}"#)
            .fail("/api/stations/S2/values/", "connection reset");

        let malformed = fetcher.list_parameters("S1").await.unwrap_err();
        assert_eq!(malformed.kind(), FailureKind::MalformedResponse);
        assert_eq!(malformed.url(), "/api/stations/S1/values/");

        let network = fetcher.list_parameters("S2").await.unwrap_err();
        assert_eq!(network.kind(), FailureKind::Network);
        assert!(network.to_string().contains("connection reset"));
    }
}
