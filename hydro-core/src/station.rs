use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// A monitoring station as listed by `GET /api/stations/`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Station {
    /// Station key, also the backing table name on the server.
    #[serde(rename = "st_name")]
    pub id: String,
    /// Human-readable name. Some stations have none.
    #[serde(rename = "st_label", default)]
    pub label: Option<String>,
}

impl Station {
    /// Text shown in the station dropdown, falling back to the id.
    pub fn display_label(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => &self.id,
        }
    }
}

/// WGS84 position of a station marker.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinates {
    pub lon: f64,
    pub lat: f64,
}

/// Point geometry of a station feature. GeoJSON stores `[lon, lat]`;
/// a trailing elevation, if present, is ignored.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct PointGeometry {
    #[serde(rename = "type", default = "point_type")]
    pub kind: String,
    #[serde(deserialize_with = "deserialize_position")]
    pub coordinates: [f64; 2],
}

impl PointGeometry {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            lon: self.coordinates[0],
            lat: self.coordinates[1],
        }
    }
}

fn point_type() -> String {
    "Point".to_string()
}

fn deserialize_position<'de, D>(deserializer: D) -> Result<[f64; 2], D::Error>
where
    D: Deserializer<'de>,
{
    let position = Vec::<f64>::deserialize(deserializer)?;
    match position.as_slice() {
        [lon, lat, ..] => Ok([*lon, *lat]),
        _ => Err(serde::de::Error::invalid_length(
            position.len(),
            &"a position with at least two elements",
        )),
    }
}

#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct StationProperties {
    #[serde(default)]
    pub st_label: Option<String>,
}

/// One marker on the station map.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct StationFeature {
    pub id: String,
    #[serde(rename = "type", default = "feature_type")]
    pub kind: String,
    #[serde(default)]
    pub geometry: Option<PointGeometry>,
    #[serde(default)]
    pub properties: StationProperties,
}

fn feature_type() -> String {
    "Feature".to_string()
}

/// GeoJSON payload of `GET /api/stations/geo/`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default = "collection_type")]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<StationFeature>,
}

fn collection_type() -> String {
    "FeatureCollection".to_string()
}

impl FeatureCollection {
    pub fn new(features: Vec<StationFeature>) -> Self {
        Self {
            kind: collection_type(),
            features,
        }
    }
}

/// Station id → coordinates, built once from the geometry load.
///
/// Features without geometry are skipped; they can still be selected from
/// the dropdown but the map will not pan to them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationIndex {
    coordinates: HashMap<String, Coordinates>,
    order: Vec<String>,
}

impl StationIndex {
    pub fn from_features(collection: &FeatureCollection) -> Self {
        let mut index = StationIndex::default();
        for feature in &collection.features {
            let Some(geometry) = &feature.geometry else {
                log::debug!("Station {} has no geometry", feature.id);
                continue;
            };
            if index
                .coordinates
                .insert(feature.id.clone(), geometry.coordinates())
                .is_none()
            {
                index.order.push(feature.id.clone());
            }
        }
        index
    }

    pub fn get(&self, station_id: &str) -> Option<Coordinates> {
        self.coordinates.get(station_id).copied()
    }

    /// Station ids in feature order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEO_JSON: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"id": "tmavy", "type": "Feature",
             "geometry": {"type": "Point", "coordinates": [15.47, 49.81]},
             "properties": {"st_label": "Tmavy potok"}},
            {"id": "kocaba", "type": "Feature",
             "geometry": {"type": "Point", "coordinates": [14.30, 49.90, 312.0]},
             "properties": {"st_label": null}},
            {"id": "nowhere", "type": "Feature", "geometry": null, "properties": {}}
        ]
    }"#;

    #[test]
    fn test_station_list_decoding() {
        let stations: Vec<Station> = serde_json::from_str(
            r#"[{"st_name": "S1", "st_label": "Upper Brook"}, {"st_name": "S2", "st_label": null}]"#,
        )
        .unwrap();
        assert_eq!(stations[0].id, "S1");
        assert_eq!(stations[0].display_label(), "Upper Brook");
        assert_eq!(stations[1].display_label(), "S2");
    }

    #[test]
    fn test_index_from_features() {
        let collection: FeatureCollection = serde_json::from_str(GEO_JSON).unwrap();
        assert_eq!(collection.features.len(), 3);

        let index = StationIndex::from_features(&collection);
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.get("tmavy"),
            Some(Coordinates {
                lon: 15.47,
                lat: 49.81
            })
        );
        assert_eq!(index.get("kocaba").map(|c| c.lat), Some(49.90));
        assert_eq!(index.get("nowhere"), None);
        assert_eq!(index.ids().collect::<Vec<_>>(), vec!["tmavy", "kocaba"]);
    }

    #[test]
    fn test_short_position_is_rejected() {
        let result: Result<PointGeometry, _> =
            serde_json::from_str(r#"{"type": "Point", "coordinates": [15.0]}"#);
        assert!(result.is_err());
    }
}
