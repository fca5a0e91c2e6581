//! GeoJSON features and feature collections.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::geometry::Geometry;

pub type Properties = Map<String, JsonValue>;

// One variant each, so a mismatched "type" member fails to deserialize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
enum FeatureTag {
    #[default]
    Feature,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
enum FeatureCollectionTag {
    #[default]
    FeatureCollection,
}

/// A geometry plus free-form properties.
///
/// Serializes with `"type": "Feature"`. `id` and `bbox` are omitted when
/// unset; `properties` is always written, as `{}` when empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    tag: FeatureTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,
    pub geometry: Geometry,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Properties,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            tag: FeatureTag::Feature,
            id: None,
            bbox: None,
            geometry,
            properties: Properties::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_bbox(mut self, bbox: Vec<f64>) -> Self {
        self.bbox = Some(bbox);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// An ordered list of features, serialized with `"type": "FeatureCollection"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    tag: FeatureCollectionTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            tag: FeatureCollectionTag::FeatureCollection,
            bbox: None,
            features,
        }
    }

    pub fn with_bbox(mut self, bbox: Vec<f64>) -> Self {
        self.bbox = Some(bbox);
        self
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Properties, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Properties>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl From<Feature> for geojson::Feature {
    fn from(f: Feature) -> Self {
        geojson::Feature {
            bbox: f.bbox,
            geometry: Some(f.geometry.into()),
            id: f.id.map(geojson::feature::Id::String),
            properties: Some(f.properties),
            foreign_members: None,
        }
    }
}

impl From<FeatureCollection> for geojson::FeatureCollection {
    fn from(fc: FeatureCollection) -> Self {
        geojson::FeatureCollection {
            bbox: fc.bbox,
            features: fc.features.into_iter().map(Into::into).collect(),
            foreign_members: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Position;
    use serde_json::json;

    fn point() -> Geometry {
        Geometry::Point(Position::new(&[1.0, 2.0]).unwrap())
    }

    #[test]
    fn test_empty_properties_serialized() {
        let f = Feature::new(point());
        assert_eq!(
            serde_json::to_string(&f).unwrap(),
            r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[1.0,2.0]},"properties":{}}"#
        );
    }

    #[test]
    fn test_optional_members() {
        let f = Feature::new(point())
            .with_id("a")
            .with_bbox(vec![1.0, 2.0, 1.0, 2.0])
            .with_property("name", "Home");
        let v = serde_json::to_value(&f).unwrap();
        assert_eq!(v["id"], "a");
        assert_eq!(v["bbox"], json!([1.0, 2.0, 1.0, 2.0]));
        assert_eq!(v["properties"]["name"], "Home");
    }

    #[test]
    fn test_empty_collection() {
        let fc = FeatureCollection::new(Vec::new());
        assert_eq!(
            serde_json::to_string(&fc).unwrap(),
            r#"{"type":"FeatureCollection","features":[]}"#
        );

        let fc = fc.with_bbox(vec![0.0, 0.0, 1.0, 1.0]);
        let v = serde_json::to_value(&fc).unwrap();
        assert_eq!(v["bbox"], json!([0.0, 0.0, 1.0, 1.0]));
    }

    #[test]
    fn test_deserialize_null_properties() {
        let f: Feature = serde_json::from_str(
            r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[1.0,2.0]},"properties":null}"#,
        )
        .unwrap();
        assert!(f.properties.is_empty());
    }

    #[test]
    fn test_wrong_tag_rejected() {
        let res = serde_json::from_str::<FeatureCollection>(r#"{"type":"Feature","features":[]}"#);
        assert!(res.is_err());

        let res = serde_json::from_str::<Feature>(
            r#"{"type":"FeatureCollection","geometry":{"type":"Point","coordinates":[1.0,2.0]},"properties":{}}"#,
        );
        assert!(res.is_err());

        let res = serde_json::from_str::<FeatureCollection>(r#"{"features":[]}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_tagged_round_trip() {
        let fc = FeatureCollection::new(vec![Feature::new(point())]);
        let json = serde_json::to_string(&fc).unwrap();
        let back: FeatureCollection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fc);
    }

    #[test]
    fn test_into_geojson_collection() {
        let fc = FeatureCollection::new(vec![Feature::new(point()).with_id("x")]);
        let gj: geojson::FeatureCollection = fc.into();
        assert_eq!(gj.features.len(), 1);
        assert!(matches!(
            &gj.features[0].id,
            Some(geojson::feature::Id::String(id)) if id == "x"
        ));
    }
}
