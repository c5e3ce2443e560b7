use serde::Deserialize;

/// Options for parsing a GPX document. Unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOptions {
    /// Split every track into distance-bounded sections (default: false)
    #[serde(default)]
    pub calculate_sections: bool,

    /// Minimum length of a section in meters (default: 100)
    #[serde(default = "default_section_length")]
    pub section_length: f64,

    /// Round distance and elevation outputs to this many decimals (default: unrounded)
    #[serde(default)]
    pub precision: Option<u32>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            calculate_sections: false,
            section_length: default_section_length(),
            precision: None,
        }
    }
}

fn default_section_length() -> f64 {
    100.0
}
