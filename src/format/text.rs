//! Human-readable text output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::geo::LocationResult;
use serde_json::Value;

/// Text formatter - one `field: value` line per present field
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, result: &LocationResult) -> Result<String> {
        let width = result
            .fields()
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0);

        let mut output = String::new();
        for (name, value) in result.fields() {
            output.push_str(&format!("{:width$}: {}\n", name, display_value(value)));
        }

        Ok(output)
    }
}

/// Strings print bare, everything else as JSON
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
