//! XML utilities shared by the package codec

mod namespace;

pub use namespace::*;

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;

/// Get an attribute value by local name, ignoring any namespace prefix
pub fn get_attr(element: &BytesStart, local: &str) -> Option<String> {
    element
        .attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.local_name().as_ref() == local.as_bytes())
        .map(|a| match a.unescape_value() {
            Ok(v) => v.into_owned(),
            Err(_) => String::from_utf8_lossy(&a.value).into_owned(),
        })
}

/// Get the w:val attribute (common in OOXML)
pub fn get_w_val(element: &BytesStart) -> Option<String> {
    get_attr(element, "val")
}

/// Parse a boolean value from OOXML (handles "1", "true", "on", or missing val)
pub fn parse_bool(element: &BytesStart) -> bool {
    match get_w_val(element) {
        None => true, // <w:b/>
        Some(v) => matches!(v.as_str(), "1" | "true" | "on"),
    }
}

/// Whether `c` is allowed in an XML 1.0 document
pub fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Reject text that cannot be written into an XML part
pub fn check_text(text: &str, context: &str) -> Result<()> {
    match text.chars().find(|c| !is_xml_char(*c)) {
        None => Ok(()),
        Some(c) => Err(Error::Encoding(format!(
            "{} contains U+{:04X}, which XML 1.0 cannot represent",
            context, c as u32
        ))),
    }
}

/// Skip an element and all its children (after its start tag was read)
pub fn skip_element<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<()> {
    let target = start.name().as_ref().to_vec();
    let mut depth = 1;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == target => depth += 1,
            Event::End(e) if e.name().as_ref() == target => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Event::Eof => {
                return Err(Error::SchemaViolation(format!(
                    "unexpected end of part inside <{}>",
                    String::from_utf8_lossy(&target)
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Read the text content of the current element up to its end tag.
///
/// Child elements are skipped; whitespace is kept verbatim.
pub fn read_text<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<String> {
    let target = start.name().as_ref().to_vec();
    let mut text = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(t) => text.push_str(&t.unescape()?),
            Event::CData(c) => text.push_str(std::str::from_utf8(&c)?),
            Event::Start(e) => skip_element(reader, &e)?,
            Event::End(e) if e.name().as_ref() == target => break,
            Event::Eof => {
                return Err(Error::SchemaViolation(format!(
                    "unexpected end of part inside <{}>",
                    String::from_utf8_lossy(&target)
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}
