//! Trace and layout descriptors, serialized in the shape Plotly's
//! `newPlot(el, traces, layout)` takes. They carry no behaviour; the
//! charting surface renders them as-is.

use serde::Serialize;

/// What a trace is for. Not sent to the chart; lets renderers and tests
/// tell the fill scaffolding apart from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceRole {
    /// Invisible fill anchor for the following boundary trace.
    Control,
    /// Edge of a percentile band, filled down to the previous trace.
    BandBoundary,
    Median,
    Measured,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Fill {
    #[serde(rename = "none")]
    None,
    /// Fill to the trace submitted just before this one.
    #[serde(rename = "tonexty")]
    ToNextY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HoverInfo {
    #[serde(rename = "y")]
    Y,
    #[serde(rename = "none")]
    Skip,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub color: String,
}

pub const TRANSPARENT: &str = "transparent";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mode: &'static str,
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<Option<f64>>,
    pub line: Line,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fillcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legendgroup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverinfo: Option<HoverInfo>,
    pub connectgaps: bool,
    #[serde(skip)]
    pub role: TraceRole,
}

impl Trace {
    /// A plain line trace.
    pub fn line(
        role: TraceRole,
        name: impl Into<String>,
        x: Vec<String>,
        y: Vec<Option<f64>>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            kind: "scatter",
            mode: "lines",
            name: name.into(),
            x,
            y,
            line: Line {
                color: color.into(),
            },
            fill: None,
            fillcolor: None,
            showlegend: None,
            legendgroup: None,
            hoverinfo: None,
            connectgaps: false,
            role,
        }
    }

    pub fn filled_to_previous(mut self, color: impl Into<String>) -> Self {
        self.fill = Some(Fill::ToNextY);
        self.fillcolor = Some(color.into());
        self
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.legendgroup = Some(group.into());
        self
    }

    pub fn legend(mut self, show: bool) -> Self {
        self.showlegend = Some(show);
        self
    }

    pub fn hover(mut self, hover: HoverInfo) -> Self {
        self.hoverinfo = Some(hover);
        self
    }

    pub fn connect_gaps(mut self, connect: bool) -> Self {
        self.connectgaps = connect;
        self
    }

    /// Whether the trace gets its own legend entry.
    pub fn in_legend(&self) -> bool {
        self.showlegend.unwrap_or(true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[String; 2]>,
}

impl Axis {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: None,
            range: None,
        }
    }

    pub fn dates(title: impl Into<String>) -> Self {
        Self {
            kind: Some("date"),
            ..Self::titled(title)
        }
    }

    pub fn with_range(mut self, from: String, to: String) -> Self {
        self.range = Some([from, to]);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    pub xaxis: Axis,
    pub yaxis: Axis,
}
