use crate::dates::deserialize_bound;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single (timestamp, value) measurement. Missing measurements keep their
/// timestamp with a null value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateValue {
    pub date: String,
    #[serde(default)]
    pub value: Option<f64>,
}

impl DateValue {
    pub fn new(date: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            date: date.into(),
            value,
        }
    }
}

/// One hour of the selected year, from the `yearly-data` endpoint.
pub type HourlyPoint = DateValue;

/// One point of a ranged series, from the `dataseries` endpoint.
pub type SeriesPoint = DateValue;

/// The nine precomputed quantiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quantile {
    Q10,
    Q20,
    Q30,
    Q40,
    Q50,
    Q60,
    Q70,
    Q80,
    Q90,
}

impl Quantile {
    pub const ALL: [Quantile; 9] = [
        Quantile::Q10,
        Quantile::Q20,
        Quantile::Q30,
        Quantile::Q40,
        Quantile::Q50,
        Quantile::Q60,
        Quantile::Q70,
        Quantile::Q80,
        Quantile::Q90,
    ];

    /// The quantiles drawn on the yearly chart, lowest first.
    pub const CHARTED: [Quantile; 5] = [
        Quantile::Q10,
        Quantile::Q30,
        Quantile::Q50,
        Quantile::Q70,
        Quantile::Q90,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Quantile::Q10 => "Q10",
            Quantile::Q20 => "Q20",
            Quantile::Q30 => "Q30",
            Quantile::Q40 => "Q40",
            Quantile::Q50 => "Q50",
            Quantile::Q60 => "Q60",
            Quantile::Q70 => "Q70",
            Quantile::Q80 => "Q80",
            Quantile::Q90 => "Q90",
        }
    }
}

/// Quantiles of one month-day across all measured years.
///
/// `month_day` has no year (e.g. `03-15T00:00:00`); the yearly chart anchors
/// it to the year being displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileRow {
    #[serde(rename = "string_date_without_year")]
    pub month_day: String,
    #[serde(default)]
    pub q10: Option<f64>,
    #[serde(default)]
    pub q20: Option<f64>,
    #[serde(default)]
    pub q30: Option<f64>,
    #[serde(default)]
    pub q40: Option<f64>,
    #[serde(default)]
    pub q50: Option<f64>,
    #[serde(default)]
    pub q60: Option<f64>,
    #[serde(default)]
    pub q70: Option<f64>,
    #[serde(default)]
    pub q80: Option<f64>,
    #[serde(default)]
    pub q90: Option<f64>,
}

impl PercentileRow {
    pub fn quantile(&self, quantile: Quantile) -> Option<f64> {
        match quantile {
            Quantile::Q10 => self.q10,
            Quantile::Q20 => self.q20,
            Quantile::Q30 => self.q30,
            Quantile::Q40 => self.q40,
            Quantile::Q50 => self.q50,
            Quantile::Q60 => self.q60,
            Quantile::Q70 => self.q70,
            Quantile::Q80 => self.q80,
            Quantile::Q90 => self.q90,
        }
    }

    /// Whether the present quantiles are non-decreasing. Nulls are skipped.
    pub fn is_ordered(&self) -> bool {
        let present: Vec<f64> = Quantile::ALL
            .iter()
            .filter_map(|q| self.quantile(*q))
            .collect();
        present.windows(2).all(|pair| pair[0] <= pair[1])
    }
}

/// Response of the `dataseries` endpoint: the requested slice plus the
/// bounds of everything the station has for that parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataSeries {
    #[serde(deserialize_with = "deserialize_bound", default)]
    pub min_date: Option<NaiveDate>,
    #[serde(deserialize_with = "deserialize_bound", default)]
    pub max_date: Option<NaiveDate>,
    #[serde(default)]
    pub data: Vec<SeriesPoint>,
}

impl DataSeries {
    /// Full available bounds, when both are known.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.min_date, self.max_date) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: [Option<f64>; 9]) -> PercentileRow {
        PercentileRow {
            month_day: "01-15T00:00:00".to_string(),
            q10: values[0],
            q20: values[1],
            q30: values[2],
            q40: values[3],
            q50: values[4],
            q60: values[5],
            q70: values[6],
            q80: values[7],
            q90: values[8],
        }
    }

    #[test]
    fn test_percentile_row_decoding() {
        let rows: Vec<PercentileRow> = serde_json::from_str(
            r#"[{"string_date_without_year": "01-15T00:00:00",
                 "q10": 1.0, "q20": 2.0, "q30": 3.0, "q40": 4.0, "q50": 5.0,
                 "q60": 6.0, "q70": 7.0, "q80": 8.0, "q90": null}]"#,
        )
        .unwrap();
        assert_eq!(rows[0].month_day, "01-15T00:00:00");
        assert_eq!(rows[0].quantile(Quantile::Q50), Some(5.0));
        assert_eq!(rows[0].quantile(Quantile::Q90), None);
    }

    #[test]
    fn test_quantile_ordering() {
        let ordered = row([
            Some(1.0),
            Some(1.0),
            Some(2.0),
            None,
            Some(3.0),
            Some(4.0),
            Some(5.0),
            Some(6.0),
            Some(7.0),
        ]);
        assert!(ordered.is_ordered());

        let inverted = row([
            Some(9.0),
            Some(2.0),
            Some(3.0),
            Some(4.0),
            Some(5.0),
            Some(6.0),
            Some(7.0),
            Some(8.0),
            Some(1.0),
        ]);
        assert!(!inverted.is_ordered());
    }

    #[test]
    fn test_data_series_decoding() {
        let series: DataSeries = serde_json::from_str(
            r#"{"min_date": "01-04-2019", "max_date": "30-09-2024",
                "data": [{"date": "2024-09-30T22:00:00Z", "value": 4.2},
                         {"date": "2024-09-30T23:00:00Z", "value": null}]}"#,
        )
        .unwrap();
        assert_eq!(
            series.bounds(),
            Some((
                NaiveDate::from_ymd_opt(2019, 4, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 9, 30).unwrap()
            ))
        );
        assert_eq!(series.data.len(), 2);
        assert_eq!(series.data[1].value, None);
    }

    #[test]
    fn test_data_series_without_bounds() {
        let series: DataSeries =
            serde_json::from_str(r#"{"min_date": null, "max_date": null, "data": []}"#).unwrap();
        assert_eq!(series.bounds(), None);
        assert!(series.data.is_empty());
    }

    #[test]
    fn test_data_series_rejects_garbage_bounds() {
        let result: Result<DataSeries, _> =
            serde_json::from_str(r#"{"min_date": "soon", "max_date": "later", "data": []}"#);
        assert!(result.is_err());
    }
}
