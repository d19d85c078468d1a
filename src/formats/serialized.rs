//! Structured formats: the snapshot tree serialized with serde

use super::registry::{FormatError, Formatter};
use crate::snapshot::NodeSnapshot;

/// Pretty-printed JSON
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, snapshot: &NodeSnapshot) -> Result<String, FormatError> {
        serde_json::to_string_pretty(snapshot)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Snapshot tree as pretty-printed JSON"
    }
}

/// YAML document
pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, snapshot: &NodeSnapshot) -> Result<String, FormatError> {
        serde_yaml::to_string(snapshot).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Snapshot tree as YAML"
    }
}
