use crate::error::Error;
use crate::feature::{Feature, FeatureCollection};
use crate::geometry::{Geometry, Position};
use crate::gpx_types::*;

/// Convert parsed GPX data to a GeoJSON FeatureCollection.
///
/// Produces at most three features, always in this order:
/// 1. all waypoints as one `MultiPoint`;
/// 2. all tracks as one `MultiLineString`, one line per track;
/// 3. all routes as one `MultiLineString`, one line per route.
///
/// A category with no entries produces no feature. Positions are
/// `[lon, lat, ele]`; nothing is simplified or reprojected.
pub fn to_feature_collection(data: &Gpx) -> Result<FeatureCollection, Error> {
    let mut features = Vec::new();

    if !data.waypoints.is_empty() {
        let points = to_positions(&data.waypoints)?;
        features.push(Feature::new(Geometry::MultiPoint(points)));
    }

    if !data.tracks.is_empty() {
        let lines = data
            .tracks
            .iter()
            .map(|trk| to_positions(&trk.points))
            .collect::<Result<Vec<_>, _>>()?;
        features.push(Feature::new(Geometry::MultiLineString(lines)));
    }

    if !data.routes.is_empty() {
        let lines = data
            .routes
            .iter()
            .map(|rte| to_positions(&rte.points))
            .collect::<Result<Vec<_>, _>>()?;
        features.push(Feature::new(Geometry::MultiLineString(lines)));
    }

    tracing::debug!(features = features.len(), "converted GPX to GeoJSON");
    Ok(FeatureCollection::new(features))
}

impl Gpx {
    /// Shorthand for [`to_feature_collection`].
    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        to_feature_collection(self)
    }
}

fn to_positions(points: &[Waypoint]) -> Result<Vec<Position>, Error> {
    points.iter().map(point_position).collect()
}

fn point_position(pt: &Waypoint) -> Result<Position, Error> {
    Position::new(&[pt.lon, pt.lat, pt.ele])
}
