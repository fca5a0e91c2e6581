use serde::Deserialize;

use crate::error::Error;
use crate::feature::FeatureCollection;

/// Options controlling how a FeatureCollection is written out.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    /// Indent the JSON with two spaces (default: false)
    #[serde(default)]
    pub pretty: bool,
}

impl OutputOptions {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

/// Serialize a FeatureCollection to a GeoJSON string.
pub fn to_json(fc: &FeatureCollection, opts: &OutputOptions) -> Result<String, Error> {
    let json = if opts.pretty {
        serde_json::to_string_pretty(fc)?
    } else {
        serde_json::to_string(fc)?
    };
    Ok(json)
}
