//! Core properties part (docProps/core.xml)

use crate::document::CoreProperties;
use crate::error::{Error, Result};
use crate::xml::{self, check_text, read_text, skip_element};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub(crate) fn serialize_core_properties(props: &CoreProperties) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new(
        "1.0",
        Some("UTF-8"),
        Some("yes"),
    )))?;

    let mut start = BytesStart::new("cp:coreProperties");
    for (attr, value) in xml::core_properties_namespaces() {
        start.push_attribute((attr, value));
    }
    writer.write_event(Event::Start(start))?;

    for (name, value) in props.text_fields() {
        if let Some(value) = value {
            check_text(value, name)?;
            writer.write_event(Event::Start(BytesStart::new(name)))?;
            writer.write_event(Event::Text(BytesText::from_escaped(escape(value))))?;
            writer.write_event(Event::End(BytesEnd::new(name)))?;
        }
    }

    for (name, value) in [
        ("dcterms:created", props.created),
        ("dcterms:modified", props.modified),
    ] {
        if let Some(value) = value {
            let mut elem = BytesStart::new(name);
            elem.push_attribute(("xsi:type", "dcterms:W3CDTF"));
            writer.write_event(Event::Start(elem))?;
            writer.write_event(Event::Text(BytesText::new(
                &value.format(DATE_FORMAT).to_string(),
            )))?;
            writer.write_event(Event::End(BytesEnd::new(name)))?;
        }
    }

    writer.write_event(Event::End(BytesEnd::new("cp:coreProperties")))?;
    Ok(writer.into_inner())
}

pub(crate) fn parse_core_properties(xml: &str) -> Result<CoreProperties> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut props = CoreProperties::default();
    let mut seen_root = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let local = e.local_name();
                if !seen_root {
                    if local.as_ref() != b"coreProperties" {
                        return Err(unexpected_root(&e));
                    }
                    seen_root = true;
                    buf.clear();
                    continue;
                }
                match local.as_ref() {
                    b"created" | b"modified" => {
                        let text = read_text(&mut reader, &e)?;
                        let value = parse_datetime(text.trim())?;
                        if local.as_ref() == b"created" {
                            props.created = value;
                        } else {
                            props.modified = value;
                        }
                    }
                    name => match text_field(&mut props, name) {
                        Some(slot) => *slot = Some(read_text(&mut reader, &e)?),
                        None => skip_element(&mut reader, &e)?,
                    },
                }
            }
            Event::Empty(e) => {
                if !seen_root {
                    if e.local_name().as_ref() != b"coreProperties" {
                        return Err(unexpected_root(&e));
                    }
                    break;
                }
                if let Some(slot) = text_field(&mut props, e.local_name().as_ref()) {
                    *slot = Some(String::new());
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(props)
}

fn text_field<'a>(props: &'a mut CoreProperties, local: &[u8]) -> Option<&'a mut Option<String>> {
    match local {
        b"title" => Some(&mut props.title),
        b"subject" => Some(&mut props.subject),
        b"creator" => Some(&mut props.author),
        b"keywords" => Some(&mut props.keywords),
        b"description" => Some(&mut props.description),
        b"lastModifiedBy" => Some(&mut props.last_modified_by),
        _ => None,
    }
}

fn unexpected_root(e: &BytesStart) -> Error {
    Error::SchemaViolation(format!(
        "root element is <{}>, expected cp:coreProperties",
        String::from_utf8_lossy(e.name().as_ref())
    ))
}

/// Parse a W3CDTF timestamp. An empty value means unset.
fn parse_datetime(s: &str) -> Result<Option<DateTime<Utc>>> {
    if s.is_empty() {
        return Ok(None);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.fZ", "%Y-%m-%dT%H:%M:%SZ", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(Some(dt.and_utc()));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(Some(dt.and_utc()));
        }
    }
    Err(Error::SchemaViolation(format!("invalid W3CDTF timestamp '{}'", s)))
}
