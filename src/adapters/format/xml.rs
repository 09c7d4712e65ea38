use anyhow::{anyhow, bail};
use quick_xml::events::Event;
use quick_xml::{Reader, Writer};

use super::highlight::{self, Grammar};
use super::Rendered;

pub(super) const PARSE_FAILURE: &str = "Failed to format XML: Error parsing data";

/// Parse, re-emit with two-space indentation, highlight. Malformed input
/// yields the fixed failure string; the raw content is deliberately not
/// echoed back.
pub(super) fn render(data: &str) -> Rendered {
    match pretty_print(data) {
        Ok(plain) => {
            let highlighted = highlight::highlight(&plain, Grammar::Xml);
            Rendered { plain, highlighted }
        }
        Err(_) => Rendered::plain_only(PARSE_FAILURE),
    }
}

/// Streams the document through an indenting writer, rejecting input that
/// is not a well-formed element tree (no root element, unbalanced or
/// mismatched tags, broken attributes).
fn pretty_print(data: &str) -> anyhow::Result<String> {
    let mut reader = Reader::from_str(data);
    reader.trim_text(true);

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let mut depth = 0usize;
    let mut saw_root = false;

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(e) => {
                for attr in e.attributes() {
                    attr?;
                }
                depth += 1;
                saw_root = true;
                writer.write_event(Event::Start(e))?;
            }
            Event::Empty(e) => {
                for attr in e.attributes() {
                    attr?;
                }
                saw_root = true;
                writer.write_event(Event::Empty(e))?;
            }
            Event::End(e) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| anyhow!("closing tag without opener"))?;
                writer.write_event(Event::End(e))?;
            }
            event => writer.write_event(event)?,
        }
    }

    if !saw_root || depth != 0 {
        bail!("document has no complete root element");
    }
    Ok(String::from_utf8(writer.into_inner())?)
}
