use serde_json::Value;

use super::highlight::{self, Grammar};
use super::Rendered;

pub(super) const PARSE_FAILURE: &str = "Failed to format JSON: Error parsing data";

/// Parse, pretty-print with two-space indentation, highlight. Malformed
/// input yields the fixed failure string; the raw content is deliberately
/// not echoed back.
pub(super) fn render(data: &str) -> Rendered {
    let value: Value = match serde_json::from_str(data) {
        Ok(value) => value,
        Err(_) => return Rendered::plain_only(PARSE_FAILURE),
    };
    let plain = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
    let highlighted = highlight::highlight(&plain, Grammar::Json);
    Rendered { plain, highlighted }
}
