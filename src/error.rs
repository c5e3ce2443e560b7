use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum GpxParseError {
    /// The input could not be read as an XML tree at all.
    #[error("Malformed GPX document: {0}")]
    MalformedDocument(String),

    #[error("Invalid options: {0}")]
    Options(String),
}

impl From<roxmltree::Error> for GpxParseError {
    fn from(e: roxmltree::Error) -> Self {
        Self::MalformedDocument(e.to_string())
    }
}

impl From<GpxParseError> for JsValue {
    fn from(e: GpxParseError) -> Self {
        js_sys::Error::new(&e.to_string()).into()
    }
}
