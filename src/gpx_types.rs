//! In-memory model of a GPX document, see <https://www.topografix.com/gpx.asp>.

use chrono::{DateTime, FixedOffset};

/// Parsed GPX document containing all waypoints, routes, and tracks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gpx {
    pub metadata: Metadata,
    pub waypoints: Vec<Waypoint>,
    pub routes: Vec<Route>,
    pub tracks: Vec<Track>,
}

/// General information about the GPX file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub link: Option<Link>,
    pub bounds: Option<Bounds>,
    pub time: Option<DateTime<FixedOffset>>,
}

/// Extents of all the data in the file.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

/// A single point (used for wpt, rtept, trkpt).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Waypoint {
    pub lat: f64,
    pub lon: f64,
    /// Metres; 0.0 when the point has no `<ele>`.
    pub ele: f64,
    pub name: Option<String>,
    pub desc: Option<String>,
    pub point_type: Option<String>,
    pub link: Option<Link>,
}

impl Waypoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            ..Default::default()
        }
    }

    pub fn with_ele(mut self, ele: f64) -> Self {
        self.ele = ele;
        self
    }
}

/// A URL with its description and MIME type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Link {
    pub href: Option<String>,
    pub text: Option<String>,
    pub mime_type: Option<String>,
}

/// A planned route (<rte>).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub route_type: Option<String>,
    pub link: Option<Link>,
    pub points: Vec<Waypoint>,
}

/// A recorded track (<trk>).
///
/// Points of every `<trkseg>` are kept in one list, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub track_type: Option<String>,
    pub link: Option<Link>,
    pub points: Vec<Waypoint>,
}
