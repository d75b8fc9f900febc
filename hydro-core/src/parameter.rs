use serde::{Deserialize, Serialize};

/// A measured quantity available at a station, as listed by
/// `GET /api/stations/{id}/values/`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Parameter {
    /// Column key used in data URLs, e.g. `h2o_temp`.
    #[serde(rename = "django_field_name")]
    pub field: String,
    /// Display name, e.g. "Water Temp".
    #[serde(rename = "parameter")]
    pub label: String,
    pub unit: String,
}

impl Parameter {
    /// Stand-in for a key the station does not describe.
    pub fn unlabeled(field: &str) -> Self {
        Self {
            field: field.to_string(),
            label: field.to_string(),
            unit: String::new(),
        }
    }

    /// Y-axis title: `"<label> [<unit>]"`, or just the label without a unit.
    pub fn axis_title(&self) -> String {
        if self.unit.is_empty() {
            self.label.clone()
        } else {
            format!("{} [{}]", self.label, self.unit)
        }
    }
}
