//! Styles part (word/styles.xml)

use crate::document::HeadingLevel;
use crate::error::Result;
use crate::xml::{self, get_attr, get_w_val};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// Serialize the fixed style sheet: `Normal` plus `Heading1`..`Heading9`
pub(crate) fn serialize_default_styles() -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new(
        "1.0",
        Some("UTF-8"),
        Some("yes"),
    )))?;

    let mut start = BytesStart::new("w:styles");
    start.push_attribute(("xmlns:w", xml::W));
    writer.write_event(Event::Start(start))?;

    let mut normal = BytesStart::new("w:style");
    normal.push_attribute(("w:type", "paragraph"));
    normal.push_attribute(("w:default", "1"));
    normal.push_attribute(("w:styleId", "Normal"));
    writer.write_event(Event::Start(normal))?;
    write_val(&mut writer, "w:name", "Normal")?;
    writer.write_event(Event::Empty(BytesStart::new("w:qFormat")))?;
    writer.write_event(Event::End(BytesEnd::new("w:style")))?;

    for n in HeadingLevel::MIN..=HeadingLevel::MAX {
        write_heading_style(&mut writer, n)?;
    }

    writer.write_event(Event::End(BytesEnd::new("w:styles")))?;
    Ok(writer.into_inner())
}

fn write_heading_style<W: Write>(writer: &mut Writer<W>, n: u8) -> Result<()> {
    let style_id = format!("Heading{}", n);
    let mut start = BytesStart::new("w:style");
    start.push_attribute(("w:type", "paragraph"));
    start.push_attribute(("w:styleId", style_id.as_str()));
    writer.write_event(Event::Start(start))?;

    write_val(writer, "w:name", &format!("heading {}", n))?;
    write_val(writer, "w:basedOn", "Normal")?;
    write_val(writer, "w:next", "Normal")?;
    write_val(writer, "w:uiPriority", "9")?;
    writer.write_event(Event::Empty(BytesStart::new("w:qFormat")))?;

    writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;
    writer.write_event(Event::Empty(BytesStart::new("w:keepNext")))?;
    write_val(writer, "w:outlineLvl", &(n - 1).to_string())?;
    writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;

    let size = match n {
        1 => "32",
        2 => "26",
        3 => "24",
        _ => "22",
    };
    writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;
    writer.write_event(Event::Empty(BytesStart::new("w:b")))?;
    write_val(writer, "w:sz", size)?;
    writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;

    writer.write_event(Event::End(BytesEnd::new("w:style")))?;
    Ok(())
}

fn write_val<W: Write>(writer: &mut Writer<W>, name: &str, val: &str) -> Result<()> {
    let mut elem = BytesStart::new(name);
    elem.push_attribute(("w:val", val));
    writer.write_event(Event::Empty(elem))?;
    Ok(())
}

/// Paragraph style ids mapped to the heading level they stand for
#[derive(Clone, Debug, Default)]
pub(crate) struct StyleMap {
    styles: BTreeMap<String, Option<HeadingLevel>>,
}

impl StyleMap {
    pub(crate) fn from_xml(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);
        let mut buf = Vec::new();
        let mut map = Self::default();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) if e.local_name().as_ref() == b"style" => {
                    let is_paragraph = get_attr(&e, "type").as_deref() == Some("paragraph");
                    let style_id = get_attr(&e, "styleId");
                    let level = parse_style(&mut reader)?;
                    if let (true, Some(id)) = (is_paragraph, style_id) {
                        map.styles.insert(id, level);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        log::trace!("parsed {} paragraph styles", map.styles.len());
        Ok(map)
    }

    /// Heading level for a `w:pStyle` value.
    ///
    /// Styles declared in the part win; undeclared ids fall back to the
    /// `HeadingN` naming convention.
    pub(crate) fn heading_level(&self, style_id: &str) -> Option<HeadingLevel> {
        match self.styles.get(style_id) {
            Some(level) => *level,
            None => HeadingLevel::from_style_id(style_id),
        }
    }
}

/// Read a `w:style` body and return the heading level its name implies
fn parse_style<R: BufRead>(reader: &mut Reader<R>) -> Result<Option<HeadingLevel>> {
    let mut level = None;
    let mut depth = 1;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                if depth == 1 && e.local_name().as_ref() == b"name" {
                    level = get_w_val(&e).and_then(|n| HeadingLevel::from_style_name(&n));
                }
                depth += 1;
            }
            Event::Empty(e) => {
                if depth == 1 && e.local_name().as_ref() == b"name" {
                    level = get_w_val(&e).and_then(|n| HeadingLevel::from_style_name(&n));
                }
            }
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Event::Eof => {
                return Err(crate::error::Error::SchemaViolation(
                    "unexpected end of part inside <w:style>".to_string(),
                ))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_styles_declare_all_headings() {
        let xml = String::from_utf8(serialize_default_styles().unwrap()).unwrap();
        let map = StyleMap::from_xml(&xml).unwrap();

        assert_eq!(map.heading_level("Normal"), None);
        for n in 1..=9 {
            assert_eq!(
                map.heading_level(&format!("Heading{}", n)),
                Some(HeadingLevel::new(n).unwrap())
            );
        }
        assert!(xml.contains(r#"<w:outlineLvl w:val="8"/>"#));
    }

    #[test]
    fn test_localized_style_ids_resolve_by_name() {
        let xml = r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
            <w:style w:type="paragraph" w:styleId="berschrift2"><w:name w:val="heading 2"/></w:style>
            <w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="Title"/></w:style>
            <w:style w:type="character" w:styleId="Heading3Char"><w:name w:val="heading 3"/></w:style>
        </w:styles>"#;
        let map = StyleMap::from_xml(xml).unwrap();

        assert_eq!(map.heading_level("berschrift2").map(HeadingLevel::get), Some(2));
        assert_eq!(map.heading_level("Heading1"), None);
        assert_eq!(map.heading_level("Heading3Char"), None);
        assert_eq!(map.heading_level("heading4").map(HeadingLevel::get), Some(4));
    }
}
