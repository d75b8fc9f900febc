//! Yearly chart: one calendar year of hourly measurements drawn over the
//! historical percentile envelope.
//!
//! The envelope is modelled as two nested bands (Q10 to Q90 outside, Q30 to Q70
//! inside) around the median. [`YearlyChart::traces`] lowers it onto a
//! surface that fills each trace to the one submitted just before it, which
//! needs invisible control traces so every band edge fills towards its
//! intended neighbour instead of the axis.

use crate::config::ChartStyle;
use crate::trace::{Axis, HoverInfo, Layout, Trace, TraceRole, TRANSPARENT};
use hydro_core::dates::{anchor_month_day, timestamp_year, year_bounds};
use hydro_core::observation::{HourlyPoint, PercentileRow, Quantile};
use hydro_core::parameter::Parameter;
use log::warn;

pub const TITLE: &str = "Hourly data and monthly percentiles (all measured years)";
pub const MEDIAN_NAME: &str = "Median";
pub const MEASURED_NAME: &str = "Hourly Values";
pub const CONTROL_NAME: &str = "control line";
pub const OUTER_BAND: &str = "Q10 to Q90";
pub const INNER_BAND: &str = "Q30 to Q70";

/// One quantile across the anchored percentile dates.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileCurve {
    pub quantile: Quantile,
    pub y: Vec<Option<f64>>,
}

impl QuantileCurve {
    fn from_rows(quantile: Quantile, rows: &[PercentileRow]) -> Self {
        Self {
            quantile,
            y: rows.iter().map(|row| row.quantile(quantile)).collect(),
        }
    }
}

/// A shaded region between two quantile curves.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub name: &'static str,
    pub lower: QuantileCurve,
    pub upper: QuantileCurve,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// Percentile dates anchored to the displayed year.
    pub x: Vec<String>,
    pub outer: Band,
    pub inner: Band,
    pub median: QuantileCurve,
    /// Rows whose quantiles are not non-decreasing. They are drawn as
    /// delivered, so their bands render inverted.
    pub unordered_rows: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearlyChart {
    pub year: i32,
    pub envelope: Envelope,
    pub hourly_x: Vec<String>,
    pub hourly_y: Vec<Option<f64>>,
    pub median_color: String,
    pub measured_color: String,
    pub layout: Layout,
}

impl YearlyChart {
    /// Traces in submission order.
    ///
    /// `tonexty` fills towards the previous trace, so the order is:
    /// control(Q50), control(Q30), Q10 (fills up to Q30), control(Q50),
    /// Q30 (fills up to Q50), control(Q50), median, Q70 (fills down to the
    /// median), Q90 (fills down to Q70), measured values on top.
    pub fn traces(&self) -> Vec<Trace> {
        let envelope = &self.envelope;
        let x = &envelope.x;
        let outer = &envelope.outer;
        let inner = &envelope.inner;

        let control = |curve: &QuantileCurve, group: Option<&str>| {
            let trace = Trace::line(
                TraceRole::Control,
                CONTROL_NAME,
                x.clone(),
                curve.y.clone(),
                TRANSPARENT,
            )
            .legend(false)
            .hover(HoverInfo::Skip)
            .connect_gaps(true);
            match group {
                Some(group) => trace.in_group(group),
                None => trace,
            }
        };

        // The lower edge stays out of the legend; the upper edge stands in
        // for the whole band.
        let lower_edge = |band: &Band| {
            Trace::line(
                TraceRole::BandBoundary,
                band.lower.quantile.label(),
                x.clone(),
                band.lower.y.clone(),
                TRANSPARENT,
            )
            .filled_to_previous(band.color.clone())
            .in_group(band.name)
            .legend(false)
            .hover(HoverInfo::Y)
            .connect_gaps(true)
        };
        let upper_edge = |band: &Band| {
            Trace::line(
                TraceRole::BandBoundary,
                band.name,
                x.clone(),
                band.upper.y.clone(),
                TRANSPARENT,
            )
            .filled_to_previous(band.color.clone())
            .in_group(band.name)
            .hover(HoverInfo::Y)
            .connect_gaps(true)
        };

        let median = Trace::line(
            TraceRole::Median,
            MEDIAN_NAME,
            x.clone(),
            envelope.median.y.clone(),
            self.median_color.clone(),
        )
        .hover(HoverInfo::Y)
        .connect_gaps(true);

        let measured = Trace::line(
            TraceRole::Measured,
            MEASURED_NAME,
            self.hourly_x.clone(),
            self.hourly_y.clone(),
            self.measured_color.clone(),
        )
        .connect_gaps(true);

        vec![
            control(&envelope.median, None),
            control(&inner.lower, Some(inner.name)),
            lower_edge(outer),
            control(&envelope.median, Some(inner.name)),
            lower_edge(inner),
            control(&envelope.median, None),
            median,
            upper_edge(inner),
            upper_edge(outer),
            measured,
        ]
    }
}

/// Shapes hourly values and percentile rows into a [`YearlyChart`].
#[derive(Debug, Clone, Default)]
pub struct YearlyChartBuilder {
    style: ChartStyle,
}

impl YearlyChartBuilder {
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }

    /// Build the chart for `year`.
    ///
    /// Percentile rows are anchored to the calendar year of the first hourly
    /// point, or to `year` when there are none. The x-axis always spans the
    /// whole of `year`.
    pub fn build(
        &self,
        year: i32,
        parameter: &Parameter,
        hourly: &[HourlyPoint],
        percentiles: &[PercentileRow],
    ) -> YearlyChart {
        let anchor_year = hourly
            .first()
            .and_then(|point| timestamp_year(&point.date))
            .unwrap_or(year);

        let envelope = self.envelope(anchor_year, percentiles);
        if envelope.unordered_rows > 0 {
            warn!(
                "{} of {} percentile rows for {} are not in ascending order",
                envelope.unordered_rows,
                percentiles.len(),
                parameter.field
            );
        }

        let (first_day, last_day) = year_bounds(year);
        let layout = Layout {
            title: TITLE.to_string(),
            xaxis: Axis::dates(format!("date ({year})")).with_range(first_day, last_day),
            yaxis: Axis::titled(parameter.axis_title()),
        };

        YearlyChart {
            year,
            envelope,
            hourly_x: hourly.iter().map(|p| p.date.clone()).collect(),
            hourly_y: hourly.iter().map(|p| p.value).collect(),
            median_color: self.style.median.clone(),
            measured_color: self.style.measured.clone(),
            layout,
        }
    }

    fn envelope(&self, anchor_year: i32, rows: &[PercentileRow]) -> Envelope {
        let curve = |q| QuantileCurve::from_rows(q, rows);
        Envelope {
            x: rows
                .iter()
                .map(|row| anchor_month_day(anchor_year, &row.month_day))
                .collect(),
            outer: Band {
                name: OUTER_BAND,
                lower: curve(Quantile::Q10),
                upper: curve(Quantile::Q90),
                color: self.style.outer_band.clone(),
            },
            inner: Band {
                name: INNER_BAND,
                lower: curve(Quantile::Q30),
                upper: curve(Quantile::Q70),
                color: self.style.inner_band.clone(),
            },
            median: curve(Quantile::Q50),
            unordered_rows: rows.iter().filter(|row| !row.is_ordered()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::Fill;

    fn parameter() -> Parameter {
        Parameter {
            field: "h2o_temp".to_string(),
            label: "Water Temp".to_string(),
            unit: "°C".to_string(),
        }
    }

    fn row(month_day: &str, base: f64) -> PercentileRow {
        PercentileRow {
            month_day: month_day.to_string(),
            q10: Some(base + 1.0),
            q20: Some(base + 2.0),
            q30: Some(base + 3.0),
            q40: Some(base + 4.0),
            q50: Some(base + 5.0),
            q60: Some(base + 6.0),
            q70: Some(base + 7.0),
            q80: Some(base + 8.0),
            q90: Some(base + 9.0),
        }
    }

    fn percentiles() -> Vec<PercentileRow> {
        vec![
            row("01-01T00:00:00", 0.0),
            row("01-15T00:00:00", 10.0),
            row("02-15T00:00:00", 20.0),
            row("12-31T00:00:00", 30.0),
        ]
    }

    fn hourly() -> Vec<HourlyPoint> {
        vec![
            HourlyPoint::new("2021-01-01T00:00:00Z", Some(4.1)),
            HourlyPoint::new("2021-01-01T01:00:00Z", None),
            HourlyPoint::new("2021-01-01T02:00:00Z", Some(4.3)),
        ]
    }

    #[test]
    fn test_trace_order_and_roles() {
        let chart = YearlyChartBuilder::default().build(2021, &parameter(), &hourly(), &percentiles());
        let traces = chart.traces();
        assert_eq!(traces.len(), 10);

        let roles: Vec<TraceRole> = traces.iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![
                TraceRole::Control,
                TraceRole::Control,
                TraceRole::BandBoundary,
                TraceRole::Control,
                TraceRole::BandBoundary,
                TraceRole::Control,
                TraceRole::Median,
                TraceRole::BandBoundary,
                TraceRole::BandBoundary,
                TraceRole::Measured,
            ]
        );

        // q-values by position: row 0 has q10=1, q30=3, q50=5, q70=7, q90=9
        let first_y: Vec<Option<f64>> = traces.iter().take(9).map(|t| t.y[0]).collect();
        assert_eq!(
            first_y,
            vec![
                Some(5.0),
                Some(3.0),
                Some(1.0),
                Some(5.0),
                Some(3.0),
                Some(5.0),
                Some(5.0),
                Some(7.0),
                Some(9.0),
            ]
        );
    }

    #[test]
    fn test_each_band_edge_fills_to_its_neighbour() {
        let chart = YearlyChartBuilder::default().build(2021, &parameter(), &hourly(), &percentiles());
        let traces = chart.traces();

        for (i, trace) in traces.iter().enumerate() {
            if trace.fill != Some(Fill::ToNextY) {
                continue;
            }
            let anchor = &traces[i - 1];
            let expected_anchor = match trace.y[0] {
                Some(v) if v == 1.0 => 3.0, // Q10 → Q30
                Some(v) if v == 3.0 => 5.0, // Q30 → Q50
                Some(v) if v == 7.0 => 5.0, // Q70 → median
                Some(v) if v == 9.0 => 7.0, // Q90 → Q70
                other => panic!("unexpected filled trace starting at {other:?}"),
            };
            assert_eq!(anchor.y[0], Some(expected_anchor));
        }
        assert_eq!(
            traces.iter().filter(|t| t.fill == Some(Fill::ToNextY)).count(),
            4
        );
        assert!(traces[9].fill.is_none());
    }

    #[test]
    fn test_legend_grouping() {
        let chart = YearlyChartBuilder::default().build(2021, &parameter(), &hourly(), &percentiles());
        let traces = chart.traces();

        let legend: Vec<&str> = traces
            .iter()
            .filter(|t| t.in_legend())
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(legend, vec![MEDIAN_NAME, INNER_BAND, OUTER_BAND, MEASURED_NAME]);

        let outer_group: Vec<&str> = traces
            .iter()
            .filter(|t| t.legendgroup.as_deref() == Some(OUTER_BAND))
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(outer_group, vec!["Q10", OUTER_BAND]);

        for control in traces.iter().filter(|t| t.role == TraceRole::Control) {
            assert!(!control.in_legend());
            assert_eq!(control.hoverinfo, Some(HoverInfo::Skip));
            assert_eq!(control.line.color, TRANSPARENT);
        }
    }

    #[test]
    fn test_percentiles_anchor_to_first_hourly_year() {
        let chart = YearlyChartBuilder::default().build(2021, &parameter(), &hourly(), &percentiles());
        let rows = percentiles();
        assert_eq!(chart.envelope.x.len(), rows.len());
        for (x, row) in chart.envelope.x.iter().zip(&rows) {
            assert_eq!(*x, format!("2021-{}", row.month_day));
        }
        for trace in chart.traces().iter().take(9) {
            assert_eq!(trace.x, chart.envelope.x);
        }
    }

    #[test]
    fn test_anchor_follows_data_not_selection() {
        let hourly = vec![HourlyPoint::new("2019-01-01T00:00:00", Some(1.0))];
        let chart = YearlyChartBuilder::default().build(2021, &parameter(), &hourly, &percentiles());
        assert!(chart.envelope.x.iter().all(|x| x.starts_with("2019-")));
        assert_eq!(chart.layout.xaxis.title, "date (2021)");
    }

    #[test]
    fn test_empty_hourly_keeps_shape() {
        let chart = YearlyChartBuilder::default().build(2021, &parameter(), &[], &percentiles());
        let traces = chart.traces();
        assert_eq!(traces.len(), 10);
        assert!(traces[9].x.is_empty());
        assert!(traces[9].y.is_empty());
        assert!(chart.envelope.x[0].starts_with("2021-"));

        let bare = YearlyChartBuilder::default().build(2021, &parameter(), &[], &[]);
        let traces = bare.traces();
        assert_eq!(traces.len(), 10);
        assert!(traces.iter().all(|t| t.y.is_empty()));
    }

    #[test]
    fn test_layout_spans_selected_year() {
        let chart = YearlyChartBuilder::default().build(2021, &parameter(), &hourly(), &percentiles());
        assert_eq!(chart.layout.title, TITLE);
        assert_eq!(chart.layout.xaxis.title, "date (2021)");
        assert_eq!(
            chart.layout.xaxis.range,
            Some(["2021-01-01".to_string(), "2021-12-31".to_string()])
        );
        assert_eq!(chart.layout.yaxis.title, "Water Temp [°C]");
    }

    #[test]
    fn test_gap_policy() {
        let chart = YearlyChartBuilder::default().build(2021, &parameter(), &hourly(), &percentiles());
        let traces = chart.traces();
        assert!(traces.iter().all(|t| t.connectgaps));
        assert_eq!(traces[9].y, vec![Some(4.1), None, Some(4.3)]);
    }

    #[test]
    fn test_unordered_rows_are_counted_not_fixed() {
        let mut rows = percentiles();
        rows[1].q10 = Some(100.0);
        let chart = YearlyChartBuilder::default().build(2021, &parameter(), &hourly(), &rows);
        assert_eq!(chart.envelope.unordered_rows, 1);
        assert_eq!(chart.envelope.outer.lower.y[1], Some(100.0));
    }

    #[test]
    fn test_band_colours_follow_style() {
        let style = ChartStyle {
            outer_band: "red".to_string(),
            inner_band: "blue".to_string(),
            ..ChartStyle::default()
        };
        let chart = YearlyChartBuilder::new(style).build(2021, &parameter(), &hourly(), &percentiles());
        let traces = chart.traces();
        assert_eq!(traces[2].fillcolor.as_deref(), Some("red"));
        assert_eq!(traces[4].fillcolor.as_deref(), Some("blue"));
        assert_eq!(traces[7].fillcolor.as_deref(), Some("blue"));
        assert_eq!(traces[8].fillcolor.as_deref(), Some("red"));
    }
}
