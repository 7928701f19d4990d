//! JSON output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::geo::LocationResult;

/// JSON formatter - outputs the result as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Pretty-printed JSON object"
    }

    fn format(&self, result: &LocationResult) -> Result<String> {
        Ok(serde_json::to_string_pretty(result)?)
    }
}
