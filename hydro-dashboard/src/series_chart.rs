//! Series chart: raw measurements over an arbitrary range, with gaps left
//! visible.

use crate::config::ChartStyle;
use crate::trace::{Axis, Layout, Trace, TraceRole};
use chrono::NaiveDate;
use hydro_core::observation::DataSeries;
use hydro_core::parameter::Parameter;

pub const TITLE: &str = "Time series";
pub const SERIES_NAME: &str = "Hourly Values";

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesChart {
    pub trace: Trace,
    pub layout: Layout,
    /// Everything the station has for the parameter, independent of the
    /// requested range. Feeds the range picker's allowed bounds.
    pub available: Option<(NaiveDate, NaiveDate)>,
}

impl SeriesChart {
    pub fn traces(&self) -> Vec<Trace> {
        vec![self.trace.clone()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct SeriesChartBuilder {
    style: ChartStyle,
}

impl SeriesChartBuilder {
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }

    pub fn build(&self, parameter: &Parameter, series: &DataSeries) -> SeriesChart {
        // Missing points stay null and are not bridged: a break in the line
        // is a break in coverage.
        let trace = Trace::line(
            TraceRole::Measured,
            SERIES_NAME,
            series.data.iter().map(|p| p.date.clone()).collect(),
            series.data.iter().map(|p| p.value).collect(),
            self.style.measured.clone(),
        )
        .connect_gaps(false);

        SeriesChart {
            trace,
            layout: Layout {
                title: TITLE.to_string(),
                xaxis: Axis::dates("date"),
                yaxis: Axis::titled(parameter.axis_title()),
            },
            available: series.bounds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydro_core::observation::SeriesPoint;

    fn parameter() -> Parameter {
        Parameter {
            field: "wl_mm".to_string(),
            label: "Water Level".to_string(),
            unit: "mm".to_string(),
        }
    }

    fn series() -> DataSeries {
        DataSeries {
            min_date: NaiveDate::from_ymd_opt(2015, 6, 1),
            max_date: NaiveDate::from_ymd_opt(2024, 9, 30),
            data: vec![
                SeriesPoint::new("2024-03-05T00:00:00Z", Some(120.0)),
                SeriesPoint::new("2024-03-05T01:00:00Z", None),
                SeriesPoint::new("2024-03-05T02:00:00Z", None),
                SeriesPoint::new("2024-03-05T03:00:00Z", Some(118.5)),
            ],
        }
    }

    #[test]
    fn test_single_gap_preserving_trace() {
        let chart = SeriesChartBuilder::default().build(&parameter(), &series());
        let traces = chart.traces();
        assert_eq!(traces.len(), 1);
        assert!(!traces[0].connectgaps);
        assert_eq!(traces[0].y, vec![Some(120.0), None, None, Some(118.5)]);
        assert_eq!(traces[0].x.len(), 4);
        assert_eq!(traces[0].name, SERIES_NAME);
    }

    #[test]
    fn test_layout_and_bounds() {
        let chart = SeriesChartBuilder::default().build(&parameter(), &series());
        assert_eq!(chart.layout.title, TITLE);
        assert_eq!(chart.layout.xaxis.title, "date");
        assert_eq!(chart.layout.xaxis.kind, Some("date"));
        assert_eq!(chart.layout.xaxis.range, None);
        assert_eq!(chart.layout.yaxis.title, "Water Level [mm]");
        assert_eq!(
            chart.available,
            Some((
                NaiveDate::from_ymd_opt(2015, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 9, 30).unwrap()
            ))
        );
    }

    #[test]
    fn test_empty_series() {
        let empty = DataSeries {
            min_date: None,
            max_date: None,
            data: Vec::new(),
        };
        let chart = SeriesChartBuilder::default().build(&parameter(), &empty);
        assert!(chart.trace.x.is_empty());
        assert_eq!(chart.available, None);
    }
}
