pub mod converter;
pub mod error;
pub mod geometry;
pub mod gpx_types;
pub mod options;
pub mod parser;
pub mod xml_tree;

use serde::Serialize;
use wasm_bindgen::prelude::*;

pub use crate::error::GpxParseError;
pub use crate::gpx_types::GpxData;
pub use crate::options::ParseOptions;

/// Parse a GPX string, returned as a JS object with metadata, waypoints,
/// routes, tracks and sections.
#[wasm_bindgen(js_name = parseGpx)]
pub fn gpx_to_model(gpx_string: &str, options: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let gpx_data = parser::parse_gpx_with_options(gpx_string, &opts)?;
    to_js(&gpx_data)
}

/// Convert GPX string to GeoJSON, returned as a JS object.
#[wasm_bindgen(js_name = gpxToGeoJson)]
pub fn gpx_to_geojson(gpx_string: &str, options: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let gpx_data = parser::parse_gpx_with_options(gpx_string, &opts)?;
    to_js(&converter::to_feature_collection(&gpx_data))
}

/// Convert GPX string to GeoJSON, returned as a JSON string.
#[wasm_bindgen(js_name = gpxToGeoJsonString)]
pub fn gpx_to_geojson_string(gpx_string: &str, options: JsValue) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let gpx_data = parser::parse_gpx_with_options(gpx_string, &opts)?;
    converter::to_geojson_string(&gpx_data).map_err(|e| js_sys::Error::new(&e.to_string()).into())
}

/// Serialize maps as plain objects and `None` as `null`, like `JSON.parse` would.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| js_sys::Error::new(&e.to_string()).into())
}

fn parse_options(options: JsValue) -> Result<ParseOptions, GpxParseError> {
    if options.is_undefined() || options.is_null() {
        Ok(ParseOptions::default())
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| GpxParseError::Options(e.to_string()))
    }
}
