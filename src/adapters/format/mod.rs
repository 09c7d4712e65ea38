//! Message payload rendering.
//!
//! Turns a raw payload into a display form for the selected format. A
//! render never fails: malformed input degrades to a descriptive inline
//! string instead of an error.

mod hex;
mod highlight;
mod json;
mod text;
mod xml;

use serde_json::Value;

use crate::application::settings::{DataField, DataFormat};
use crate::domain::Message;

pub const NO_DATA: &str = "No data to format";

/// A rendered payload: the plain pretty-printed body plus a best-effort
/// highlighted form for terminal display. When highlighting is not
/// applicable (or fails), `highlighted` holds the plain body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub plain: String,
    pub highlighted: String,
}

impl Rendered {
    fn plain_only(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            highlighted: text.clone(),
            plain: text,
        }
    }
}

/// Renders `data` under `format`. A missing payload renders as [`NO_DATA`].
pub fn render(data: Option<&str>, format: DataFormat) -> Rendered {
    let Some(data) = data else {
        return Rendered::plain_only(NO_DATA);
    };
    match format {
        DataFormat::Json => json::render(data),
        DataFormat::Xml => xml::render(data),
        DataFormat::Hex => Rendered::plain_only(hex::render(data)),
        DataFormat::Text => Rendered::plain_only(text::render(data)),
    }
}

/// Renders the selected field of a message. Scalar fields render from their
/// string form; structured fields are serialized to canonical JSON text
/// first and then handed to the converter.
pub fn render_field(message: &Message, field: DataField, format: DataFormat) -> Rendered {
    let payload = match field {
        DataField::Key => message.key.clone(),
        DataField::Value => message.value.clone(),
        DataField::Partition => message.partition.to_string(),
        DataField::Offset => message.offset.to_string(),
        DataField::Timestamp => message.timestamp.to_string(),
        DataField::Headers => match serde_json::to_value(&message.headers) {
            Ok(Value::Null) => return Rendered::plain_only(NO_DATA),
            Ok(value) => value.to_string(),
            Err(_) => return Rendered::plain_only(NO_DATA),
        },
    };
    render(Some(&payload), format)
}
