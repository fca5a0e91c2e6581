//! GeoJSON geometries, see <https://datatracker.ietf.org/doc/html/rfc7946#section-3.1>.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A longitude/latitude pair with an optional elevation.
///
/// Always holds 2 or 3 values; there is no way to build one with any other
/// length, including through deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct Position(Vec<f64>);

impl Position {
    /// Copy `values` into a new position.
    ///
    /// Fails with [`Error::InvalidPosition`] unless there are exactly two or
    /// three values. Coordinate ranges are not checked.
    pub fn new(values: &[f64]) -> Result<Self, Error> {
        Self::try_from(values.to_vec())
    }

    pub fn lon(&self) -> f64 {
        self.0[0]
    }

    pub fn lat(&self) -> f64 {
        self.0[1]
    }

    pub fn elevation(&self) -> Option<f64> {
        self.0.get(2).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl TryFrom<Vec<f64>> for Position {
    type Error = Error;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        match values.len() {
            2 | 3 => Ok(Self(values)),
            len => Err(Error::InvalidPosition { len }),
        }
    }
}

impl TryFrom<&[f64]> for Position {
    type Error = Error;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<Position> for Vec<f64> {
    fn from(p: Position) -> Self {
        p.0
    }
}

/// The geometry variants this crate produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Position),
    MultiPoint(Vec<Position>),
    LineString(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
}

impl Geometry {
    /// The GeoJSON `type` member for this geometry.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Point(_) => "Point",
            Self::MultiPoint(_) => "MultiPoint",
            Self::LineString(_) => "LineString",
            Self::MultiLineString(_) => "MultiLineString",
        }
    }
}

impl From<Geometry> for geojson::Value {
    fn from(g: Geometry) -> Self {
        fn line(positions: Vec<Position>) -> Vec<Vec<f64>> {
            positions.into_iter().map(Vec::from).collect()
        }

        match g {
            Geometry::Point(p) => geojson::Value::Point(p.into()),
            Geometry::MultiPoint(ps) => geojson::Value::MultiPoint(line(ps)),
            Geometry::LineString(ps) => geojson::Value::LineString(line(ps)),
            Geometry::MultiLineString(lines) => {
                geojson::Value::MultiLineString(lines.into_iter().map(line).collect())
            }
        }
    }
}
