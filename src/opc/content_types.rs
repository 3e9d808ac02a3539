//! Content Types handling for OPC packages
//!
//! Parses and generates `[Content_Types].xml`

use crate::error::{Error, Result};
use crate::opc::PartUri;
use crate::xml::CT;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// Content types definition for an OPC package.
///
/// Both tables are ordered so the manifest serializes identically every time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentTypes {
    /// Default extension mappings (extension -> content type)
    defaults: BTreeMap<String, String>,
    /// Override mappings (part URI -> content type)
    overrides: BTreeMap<PartUri, String>,
}

impl ContentTypes {
    /// Create a new ContentTypes with standard defaults
    pub fn new() -> Self {
        let mut ct = Self::default();
        ct.add_default("rels", RELATIONSHIPS);
        ct.add_default("xml", XML);
        ct
    }

    /// Parse from XML string
    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        Self::from_reader(&mut reader)
    }

    /// Parse from a reader
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self> {
        let mut ct = Self::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Empty(e) | Event::Start(e) => match e.name().local_name().as_ref() {
                    b"Default" => {
                        let ext = required_attr(&e, "Extension")?;
                        let content_type = required_attr(&e, "ContentType")?;
                        ct.defaults.insert(ext.to_lowercase(), content_type);
                    }
                    b"Override" => {
                        let part_name = required_attr(&e, "PartName")?;
                        let content_type = required_attr(&e, "ContentType")?;
                        ct.overrides.insert(PartUri::new(&part_name)?, content_type);
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(ct)
    }

    /// Serialize to XML bytes
    pub fn to_xml(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(buf)
    }

    /// Write to a writer
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut xml = Writer::new(writer);

        xml.write_event(Event::Decl(BytesDecl::new(
            "1.0",
            Some("UTF-8"),
            Some("yes"),
        )))?;

        let mut types = BytesStart::new("Types");
        types.push_attribute(("xmlns", CT));
        xml.write_event(Event::Start(types))?;

        for (ext, content_type) in &self.defaults {
            let mut default = BytesStart::new("Default");
            default.push_attribute(("Extension", ext.as_str()));
            default.push_attribute(("ContentType", content_type.as_str()));
            xml.write_event(Event::Empty(default))?;
        }

        for (uri, content_type) in &self.overrides {
            let mut override_elem = BytesStart::new("Override");
            override_elem.push_attribute(("PartName", uri.as_str()));
            override_elem.push_attribute(("ContentType", content_type.as_str()));
            xml.write_event(Event::Empty(override_elem))?;
        }

        xml.write_event(Event::End(BytesEnd::new("Types")))?;

        Ok(())
    }

    /// Add a default extension mapping
    pub fn add_default(&mut self, extension: &str, content_type: &str) {
        self.defaults
            .insert(extension.to_lowercase(), content_type.to_string());
    }

    /// Add an override for a specific part
    pub fn add_override(&mut self, uri: &PartUri, content_type: &str) {
        self.overrides.insert(uri.clone(), content_type.to_string());
    }

    /// Get the content type for a part
    pub fn get(&self, uri: &PartUri) -> Option<&str> {
        if let Some(ct) = self.overrides.get(uri) {
            return Some(ct);
        }

        uri.extension()
            .and_then(|ext| self.defaults.get(&ext.to_lowercase()))
            .map(|s| s.as_str())
    }
}

/// Get a required attribute value from a manifest element
fn required_attr(element: &BytesStart, name: &str) -> Result<String> {
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == name.as_bytes() {
            return Ok(attr.unescape_value()?.into_owned());
        }
    }
    Err(Error::MissingAttribute {
        element: String::from_utf8_lossy(element.name().as_ref()).to_string(),
        attr: name.to_string(),
    })
}

// Well-known content types
pub const RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
pub const XML: &str = "application/xml";
pub const MAIN_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
pub const MAIN_TEMPLATE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.template.main+xml";
pub const MAIN_DOCUMENT_MACRO: &str = "application/vnd.ms-word.document.macroEnabled.main+xml";
pub const MAIN_TEMPLATE_MACRO: &str = "application/vnd.ms-word.template.macroEnabledTemplate.main+xml";
pub const STYLES: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
pub const CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";

/// Whether `content_type` identifies a WordprocessingML main document part
pub fn is_main_document(content_type: &str) -> bool {
    matches!(
        content_type,
        MAIN_DOCUMENT | MAIN_TEMPLATE | MAIN_DOCUMENT_MACRO | MAIN_TEMPLATE_MACRO
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_content_types() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="XML" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

        let ct = ContentTypes::from_xml(xml).unwrap();

        assert_eq!(ct.defaults.get("rels"), Some(&RELATIONSHIPS.to_string()));
        assert_eq!(ct.defaults.get("xml"), Some(&XML.to_string()));

        let doc_uri = PartUri::new("/word/document.xml").unwrap();
        assert_eq!(ct.get(&doc_uri), Some(MAIN_DOCUMENT));

        let other = PartUri::new("/word/other.xml").unwrap();
        assert_eq!(ct.get(&other), Some(XML));
    }

    #[test]
    fn test_missing_attribute() {
        let xml = r#"<Types><Default Extension="rels"/></Types>"#;
        assert!(matches!(
            ContentTypes::from_xml(xml),
            Err(Error::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_roundtrip() {
        let mut ct = ContentTypes::new();
        ct.add_override(&PartUri::new("/word/document.xml").unwrap(), MAIN_DOCUMENT);
        ct.add_override(&PartUri::new("/docProps/core.xml").unwrap(), CORE_PROPERTIES);

        let xml = ct.to_xml().unwrap();
        let ct2 = ContentTypes::from_xml(std::str::from_utf8(&xml).unwrap()).unwrap();

        assert_eq!(ct, ct2);
    }

    #[test]
    fn test_serialization_is_ordered() {
        let mut a = ContentTypes::new();
        a.add_override(&PartUri::new("/word/styles.xml").unwrap(), STYLES);
        a.add_override(&PartUri::new("/docProps/core.xml").unwrap(), CORE_PROPERTIES);

        let mut b = ContentTypes::new();
        b.add_override(&PartUri::new("/docProps/core.xml").unwrap(), CORE_PROPERTIES);
        b.add_override(&PartUri::new("/word/styles.xml").unwrap(), STYLES);

        assert_eq!(a.to_xml().unwrap(), b.to_xml().unwrap());
    }

    #[test]
    fn test_main_document_types() {
        assert!(is_main_document(MAIN_DOCUMENT));
        assert!(is_main_document(MAIN_TEMPLATE_MACRO));
        assert!(!is_main_document(STYLES));
    }
}
