//! Joining snapshots to map geometry.
//!
//! Only feature names are read from the GeoJSON; coordinates are left to the
//! rendering layer.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::snapshot::DatasetSnapshot;

/// GADM level-1 property holding the region name.
pub const DEFAULT_NAME_PROPERTY: &str = "NAME_1";

#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    #[error("invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a FeatureCollection, found {0:?}")]
    NotFeatureCollection(String),
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

/// Region names exposed by a geometry source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeometryIndex {
    names: BTreeSet<String>,
    /// Features without a string value for the name property.
    unnamed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JoinReport {
    pub matched: Vec<String>,
    /// Snapshot keys with no geometry feature; these are not drawn.
    pub data_without_geometry: Vec<String>,
    /// Features with no data; these are drawn in the no-data color.
    pub geometry_without_data: Vec<String>,
}

impl JoinReport {
    /// Share of snapshot keys that found a feature, in `[0, 1]`.
    pub fn coverage(&self) -> f64 {
        let total = self.matched.len() + self.data_without_geometry.len();
        if total == 0 {
            0.0
        } else {
            self.matched.len() as f64 / total as f64
        }
    }

    pub fn is_complete(&self) -> bool {
        self.data_without_geometry.is_empty()
    }
}

impl GeometryIndex {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            unnamed: 0,
        }
    }

    /// Reads feature names from a GeoJSON FeatureCollection.
    pub fn from_geojson(text: &str, property: &str) -> Result<Self, GeometryError> {
        let collection: FeatureCollection = serde_json::from_str(text)?;
        if collection.kind != "FeatureCollection" {
            return Err(GeometryError::NotFeatureCollection(collection.kind));
        }
        let mut index = Self::default();
        for feature in collection.features {
            let name = feature
                .properties
                .as_ref()
                .and_then(|props| props.get(property))
                .and_then(Value::as_str);
            match name {
                Some(name) => {
                    index.names.insert(name.to_string());
                }
                None => index.unnamed += 1,
            }
        }
        tracing::debug!(
            features = index.names.len(),
            unnamed = index.unnamed,
            property,
            "read geometry feature names"
        );
        Ok(index)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn unnamed(&self) -> usize {
        self.unnamed
    }

    pub fn join(&self, snapshot: &DatasetSnapshot) -> JoinReport {
        let mut report = JoinReport::default();
        for key in snapshot.regions().keys() {
            if self.names.contains(key) {
                report.matched.push(key.clone());
            } else {
                report.data_without_geometry.push(key.clone());
            }
        }
        report.geometry_without_data = self
            .names
            .iter()
            .filter(|name| snapshot.get(name).is_none())
            .cloned()
            .collect();
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_feature_names() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"NAME_1": "Karelia"}, "geometry": null},
                {"type": "Feature", "properties": {"NAME_1": "Komi"}, "geometry": null},
                {"type": "Feature", "properties": {"NAME_1": 7}, "geometry": null},
                {"type": "Feature", "geometry": null}
            ]
        }"#;
        let index = GeometryIndex::from_geojson(text, DEFAULT_NAME_PROPERTY).expect("geojson");
        assert_eq!(index.names().collect::<Vec<_>>(), vec!["Karelia", "Komi"]);
        assert_eq!(index.unnamed(), 2);
    }

    #[test]
    fn custom_property() {
        let text = r#"{"type":"FeatureCollection","features":[{"properties":{"name":"Tver"}}]}"#;
        let index = GeometryIndex::from_geojson(text, "name").expect("geojson");
        assert!(index.contains("Tver"));
    }

    #[test]
    fn rejects_other_geojson_types() {
        let err = GeometryIndex::from_geojson(r#"{"type":"Feature"}"#, DEFAULT_NAME_PROPERTY)
            .unwrap_err();
        assert!(matches!(err, GeometryError::NotFeatureCollection(kind) if kind == "Feature"));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = GeometryIndex::from_geojson("{", DEFAULT_NAME_PROPERTY).unwrap_err();
        assert!(matches!(err, GeometryError::Json(_)));
    }

    #[test]
    fn coverage_of_empty_report() {
        assert_eq!(JoinReport::default().coverage(), 0.0);
    }
}
