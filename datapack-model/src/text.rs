//! JSON (format A) and XML (format B) encoding of packet content.

use crate::config::TextFormatConfig;
use datapack_types::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Serialize;
use serde::de::DeserializeOwned;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Empty or whitespace-only input is treated as "nothing to apply".
pub(crate) fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

pub(crate) fn write_json<T: Serialize + ?Sized>(
    value: &T,
    config: &TextFormatConfig,
) -> Result<String> {
    let text = if config.pretty_json {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}

pub(crate) fn read_json<T: DeserializeOwned>(text: &str) -> Result<T> {
    Ok(serde_json::from_str(text)?)
}

pub(crate) fn write_xml<T: Serialize + ?Sized>(
    value: &T,
    root: &str,
    config: &TextFormatConfig,
) -> Result<String> {
    let mut out = String::new();
    if config.xml_declaration {
        out.push_str(XML_DECLARATION);
        if config.xml_indent.is_some() {
            out.push('\n');
        }
    }

    let mut serializer = quick_xml::se::Serializer::with_root(&mut out, Some(root))?;
    if let Some(width) = config.xml_indent {
        serializer.indent(' ', width);
    }
    value.serialize(serializer)?;
    Ok(out)
}

/// Parses `text` after checking that its root element is named `root`.
pub(crate) fn read_xml<T: DeserializeOwned>(text: &str, root: &str) -> Result<T> {
    let found = root_element_name(text)?;
    if found != root {
        return Err(Error::RootMismatch {
            expected: root.to_owned(),
            found,
        });
    }
    Ok(quick_xml::de::from_str(text)?)
}

/// Name of the first element in the document, or an empty string if the
/// document has no element at all.
fn root_element_name(text: &str) -> Result<String> {
    let mut reader = Reader::from_str(text);
    loop {
        match reader.read_event()? {
            Event::Start(element) | Event::Empty(element) => {
                return Ok(String::from_utf8_lossy(element.name().as_ref()).into_owned());
            }
            Event::Eof => return Ok(String::new()),
            _ => {}
        }
    }
}
