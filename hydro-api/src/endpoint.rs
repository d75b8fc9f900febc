use chrono::NaiveDate;
use hydro_core::dates::format_date_for_backend;
use std::fmt;

/// A route of the station API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Stations,
    StationGeometry,
    Parameters {
        station: String,
    },
    /// Years are station-wide on the server; the path carries no parameter.
    Years {
        station: String,
    },
    YearlyData {
        station: String,
        field: String,
        year: i32,
    },
    Percentiles {
        station: String,
        field: String,
    },
    DataSeries {
        station: String,
        field: String,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl Endpoint {
    /// Path and query relative to the API origin.
    pub fn path(&self) -> String {
        match self {
            Endpoint::Stations => "/api/stations/".to_string(),
            Endpoint::StationGeometry => "/api/stations/geo/".to_string(),
            Endpoint::Parameters { station } => format!("/api/stations/{station}/values/"),
            Endpoint::Years { station } => format!("/api/stations/{station}/years/"),
            Endpoint::YearlyData {
                station,
                field,
                year,
            } => format!("/api/stations/{station}/{field}/{year}/yearly-data/"),
            Endpoint::Percentiles { station, field } => {
                format!("/api/stations/{station}/{field}/percentiles/")
            }
            Endpoint::DataSeries {
                station,
                field,
                start,
                end,
            } => format!(
                "/api/stations/{station}/{field}/dataseries/?start={}&end={}",
                format_date_for_backend(*start),
                format_date_for_backend(*end)
            ),
        }
    }

    /// Whether the request must be marked as an XHR.
    ///
    /// The server reshapes percentile rows for charting and only honours a
    /// series date range when it sees `X-Requested-With: XMLHttpRequest`.
    pub fn is_chart_request(&self) -> bool {
        matches!(
            self,
            Endpoint::Percentiles { .. } | Endpoint::DataSeries { .. }
        )
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_paths() {
        assert_eq!(Endpoint::Stations.path(), "/api/stations/");
        assert_eq!(Endpoint::StationGeometry.path(), "/api/stations/geo/");
        let station = "S1".to_string();
        assert_eq!(
            Endpoint::Parameters {
                station: station.clone()
            }
            .path(),
            "/api/stations/S1/values/"
        );
        assert_eq!(
            Endpoint::Years { station }.path(),
            "/api/stations/S1/years/"
        );
    }

    #[test]
    fn test_chart_paths() {
        let yearly = Endpoint::YearlyData {
            station: "S1".to_string(),
            field: "h2o_temp".to_string(),
            year: 2021,
        };
        assert_eq!(yearly.path(), "/api/stations/S1/h2o_temp/2021/yearly-data/");
        assert!(!yearly.is_chart_request());

        let percentiles = Endpoint::Percentiles {
            station: "S1".to_string(),
            field: "h2o_temp".to_string(),
        };
        assert_eq!(percentiles.path(), "/api/stations/S1/h2o_temp/percentiles/");
        assert!(percentiles.is_chart_request());
    }

    #[test]
    fn test_series_path_serializes_bounds() {
        let unbounded = Endpoint::DataSeries {
            station: "S1".to_string(),
            field: "wl_mm".to_string(),
            start: None,
            end: None,
        };
        assert_eq!(
            unbounded.path(),
            "/api/stations/S1/wl_mm/dataseries/?start=&end="
        );

        let ranged = Endpoint::DataSeries {
            station: "S1".to_string(),
            field: "wl_mm".to_string(),
            start: NaiveDate::from_ymd_opt(2024, 3, 5),
            end: NaiveDate::from_ymd_opt(2024, 11, 20),
        };
        assert_eq!(
            ranged.path(),
            "/api/stations/S1/wl_mm/dataseries/?start=2024-03-05&end=2024-11-20"
        );
        assert!(ranged.is_chart_request());
    }
}
