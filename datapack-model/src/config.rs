use datapack_types::Result;
use serde::{Deserialize, Serialize};

/// Output options for the packet text formats.
///
/// Parsing never depends on these settings; they only shape what
/// `to_json_with` / `to_xml_with` produce.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextFormatConfig {
    /// Pretty-print JSON output.
    pub pretty_json: bool,
    /// Indent nested XML elements by this many spaces per level.
    pub xml_indent: Option<usize>,
    /// Prefix XML output with an `<?xml ...?>` declaration.
    pub xml_declaration: bool,
}

impl TextFormatConfig {
    /// Human-readable output: pretty JSON, two-space XML indentation and a
    /// declaration line.
    #[must_use]
    pub fn pretty() -> Self {
        Self {
            pretty_json: true,
            xml_indent: Some(2),
            xml_declaration: true,
        }
    }

    /// Loads a configuration from JSON. Missing keys keep their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
