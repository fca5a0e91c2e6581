use quick_xml::events::attributes::AttrError;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors returned by conversion and serialization.
#[derive(Debug, Error)]
pub enum Error {
    /// A coordinate tuple did not hold 2 or 3 values.
    #[error("invalid number of positional elements: {len} (expected 2 or 3)")]
    InvalidPosition { len: usize },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("unable to generate JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised while reading a GPX document.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("XML parse error at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("document has no root element")]
    MissingRoot,

    #[error("unexpected root element <{found}>, expected <gpx>")]
    UnexpectedRoot { found: String },

    #[error("unexpected end of document inside <{element}>")]
    UnexpectedEof { element: String },

    #[error("malformed attribute on <{element}>: {source}")]
    Attribute {
        element: &'static str,
        #[source]
        source: AttrError,
    },

    #[error("missing attribute '{attribute}' on <{element}>")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("invalid value '{value}' for attribute '{attribute}' on <{element}>")]
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },

    #[error("invalid number '{value}' in <{element}>")]
    InvalidNumber { element: &'static str, value: String },

    #[error("invalid timestamp '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("unknown entity '&{entity};' in <{element}>")]
    UnknownEntity { element: String, entity: String },

    #[error("invalid UTF-8 in <{element}>")]
    Utf8 { element: String },

    #[error("invalid escape sequence: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
}

impl From<Error> for JsValue {
    fn from(e: Error) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

impl From<ParseError> for JsValue {
    fn from(e: ParseError) -> Self {
        Error::from(e).into()
    }
}
