//! Convert [GPX](https://www.topografix.com/gpx.asp) documents to
//! [GeoJSON](https://datatracker.ietf.org/doc/html/rfc7946).
//!
//! Waypoints become one `MultiPoint` feature, tracks and routes one
//! `MultiLineString` feature each. Usable as a Rust library or, through
//! wasm-bindgen, from JavaScript.
//!
//! ```
//! let gpx = r#"<gpx version="1.1"><wpt lat="52.0" lon="-1.5"><ele>100</ele></wpt></gpx>"#;
//! let json = gpx2geojson::convert(gpx, &Default::default()).unwrap();
//! assert!(json.contains(r#""coordinates":[[-1.5,52.0,100.0]]"#));
//! ```

pub mod converter;
pub mod error;
pub mod feature;
pub mod geometry;
pub mod gpx_types;
pub mod options;
pub mod parser;

use serde::Serialize;
use wasm_bindgen::prelude::*;

pub use crate::converter::to_feature_collection;
pub use crate::error::{Error, ParseError};
pub use crate::feature::{Feature, FeatureCollection};
pub use crate::geometry::{Geometry, Position};
pub use crate::gpx_types::Gpx;
pub use crate::options::{OutputOptions, to_json};
pub use crate::parser::parse_gpx;

/// Parse, convert and serialize in one step.
pub fn convert(gpx: &str, opts: &OutputOptions) -> Result<String, Error> {
    let data = parse_gpx(gpx)?;
    let fc = to_feature_collection(&data)?;
    to_json(&fc, opts)
}

/// Convert GPX string to GeoJSON, returned as a JS object.
#[wasm_bindgen(js_name = gpxToGeoJson)]
pub fn gpx_to_geojson(gpx_string: &str) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let data = parse_gpx(gpx_string)?;
    let fc = to_feature_collection(&data)?;
    // Plain objects rather than Maps, so the result can go straight to a map library.
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    fc.serialize(&serializer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert GPX string to GeoJSON, returned as a JSON string.
#[wasm_bindgen(js_name = gpxToGeoJsonString)]
pub fn gpx_to_geojson_string(gpx_string: &str, options: JsValue) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    Ok(convert(gpx_string, &opts)?)
}

fn parse_options(options: JsValue) -> Result<OutputOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        Ok(OutputOptions::default())
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
