//! Relationships handling for OPC packages
//!
//! Parses and generates `.rels` files

use crate::error::{Error, Result};
use crate::xml::PR;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::{BufRead, Write};

/// Collection of relationships, kept in document order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relationships {
    items: Vec<Relationship>,
    /// Next auto-generated ID number
    next_id: u32,
}

impl Default for Relationships {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1, // rId1 is the first generated ID
        }
    }
}

/// A single relationship
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target path (relative or absolute)
    pub target: String,
    /// Target mode
    pub target_mode: TargetMode,
}

/// Target mode for relationships
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TargetMode {
    /// Internal target (part within the package)
    #[default]
    Internal,
    /// External target (hyperlink, etc.)
    External,
}

impl Relationships {
    /// Create empty relationships
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from XML string
    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        Self::from_reader(&mut reader)
    }

    /// Parse from a reader
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self> {
        let mut rels = Self::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Empty(e) | Event::Start(e) => {
                    if e.name().local_name().as_ref() == b"Relationship" {
                        let rel = parse_relationship(&e)?;
                        if rels.get(&rel.id).is_some() {
                            return Err(Error::MalformedPackage(format!(
                                "duplicate relationship id '{}'",
                                rel.id
                            )));
                        }
                        rels.items.push(rel);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        rels.update_next_id();
        Ok(rels)
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

        xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

        let mut rels_elem = BytesStart::new("Relationships");
        rels_elem.push_attribute(("xmlns", PR));
        xml.write_event(Event::Start(rels_elem))?;

        for rel in &self.items {
            let mut rel_elem = BytesStart::new("Relationship");
            rel_elem.push_attribute(("Id", rel.id.as_str()));
            rel_elem.push_attribute(("Type", rel.rel_type.as_str()));
            rel_elem.push_attribute(("Target", rel.target.as_str()));

            if rel.target_mode == TargetMode::External {
                rel_elem.push_attribute(("TargetMode", "External"));
            }

            xml.write_event(Event::Empty(rel_elem))?;
        }

        xml.write_event(Event::End(BytesEnd::new("Relationships")))?;

        Ok(())
    }

    /// Get a relationship by ID
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.items.iter().find(|r| r.id == id)
    }

    /// Get the first internal relationship of a given type
    pub fn by_type(&self, rel_type: &str) -> Option<&Relationship> {
        self.items
            .iter()
            .find(|r| r.rel_type == rel_type && r.target_mode == TargetMode::Internal)
    }

    /// Add a relationship (auto-generates ID)
    pub fn add(&mut self, rel_type: &str, target: &str) -> String {
        let id = self.generate_id();
        self.add_with_id(&id, rel_type, target, TargetMode::Internal);
        id
    }

    /// Add a relationship with a specific ID, replacing any existing one
    pub fn add_with_id(&mut self, id: &str, rel_type: &str, target: &str, mode: TargetMode) {
        let rel = Relationship {
            id: id.to_string(),
            rel_type: rel_type.to_string(),
            target: target.to_string(),
            target_mode: mode,
        };
        match self.items.iter_mut().find(|r| r.id == id) {
            Some(existing) => *existing = rel,
            None => self.items.push(rel),
        }
        self.update_next_id();
    }

    /// Iterate over all relationships
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.items.iter()
    }

    /// Number of relationships
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn generate_id(&mut self) -> String {
        let id = format!("rId{}", self.next_id);
        self.next_id += 1;
        id
    }

    /// Update next_id based on existing relationships
    fn update_next_id(&mut self) {
        let max_id = self
            .items
            .iter()
            .filter_map(|r| r.id.strip_prefix("rId")?.parse::<u32>().ok())
            .max()
            .unwrap_or(0);

        self.next_id = self.next_id.max(max_id + 1);
    }
}

/// Parse a single Relationship element
fn parse_relationship(element: &BytesStart) -> Result<Relationship> {
    let mut id = None;
    let mut rel_type = None;
    let mut target = None;
    let mut target_mode = TargetMode::Internal;

    for attr in element.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?.into_owned();

        match attr.key.local_name().as_ref() {
            b"Id" => id = Some(value),
            b"Type" => rel_type = Some(value),
            b"Target" => target = Some(value),
            b"TargetMode" => {
                if value == "External" {
                    target_mode = TargetMode::External;
                }
            }
            _ => {}
        }
    }

    let missing = |attr: &str| Error::MissingAttribute {
        element: "Relationship".into(),
        attr: attr.into(),
    };

    Ok(Relationship {
        id: id.ok_or_else(|| missing("Id"))?,
        rel_type: rel_type.ok_or_else(|| missing("Type"))?,
        target: target.ok_or_else(|| missing("Target"))?,
        target_mode,
    })
}

// Well-known relationship types
pub mod rel_types {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const STYLES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
}

#[cfg(test)]
mod tests {
    use super::*;

    const HYPERLINK: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";

    #[test]
    fn test_parse_relationships() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com" TargetMode="External"/>
</Relationships>"#;

        let rels = Relationships::from_xml(xml).unwrap();

        assert_eq!(rels.len(), 2);

        let r1 = rels.get("rId1").unwrap();
        assert_eq!(r1.target, "word/document.xml");
        assert_eq!(r1.target_mode, TargetMode::Internal);

        let r2 = rels.get("rId2").unwrap();
        assert_eq!(r2.target, "https://example.com");
        assert_eq!(r2.target_mode, TargetMode::External);

        // external targets are never parts
        assert!(rels.by_type(HYPERLINK).is_none());
    }

    #[test]
    fn test_by_type() {
        let xml = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId7" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

        let mut rels = Relationships::from_xml(xml).unwrap();
        let doc = rels.by_type(rel_types::OFFICE_DOCUMENT).unwrap();
        assert_eq!(doc.target, "word/document.xml");

        // generated IDs continue after the highest parsed one
        assert_eq!(rels.add(rel_types::STYLES, "styles.xml"), "rId8");
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let xml = r#"<Relationships>
  <Relationship Id="rId1" Type="a" Target="x.xml"/>
  <Relationship Id="rId1" Type="b" Target="y.xml"/>
</Relationships>"#;
        assert!(matches!(
            Relationships::from_xml(xml),
            Err(Error::MalformedPackage(_))
        ));
    }

    #[test]
    fn test_missing_target() {
        let xml = r#"<Relationships><Relationship Id="rId1" Type="a"/></Relationships>"#;
        assert!(matches!(
            Relationships::from_xml(xml),
            Err(Error::MissingAttribute { ref attr, .. }) if attr == "Target"
        ));
    }

    #[test]
    fn test_roundtrip_preserves_order() {
        let mut rels = Relationships::new();
        rels.add(rel_types::STYLES, "styles.xml");
        rels.add(rel_types::CORE_PROPERTIES, "docProps/core.xml");
        rels.add_with_id("rId9", HYPERLINK, "https://example.com", TargetMode::External);

        let xml = rels.to_xml().unwrap();
        let rels2 = Relationships::from_xml(std::str::from_utf8(&xml).unwrap()).unwrap();

        assert_eq!(rels2.len(), 3);
        let ids: Vec<_> = rels2.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["rId1", "rId2", "rId9"]);
        assert_eq!(rels2.get("rId9").unwrap().target_mode, TargetMode::External);
    }

    #[test]
    fn test_auto_id() {
        let mut rels = Relationships::new();
        let id1 = rels.add(rel_types::STYLES, "styles.xml");
        let id2 = rels.add(rel_types::CORE_PROPERTIES, "core.xml");

        assert_eq!(id1, "rId1");
        assert_eq!(id2, "rId2");
    }
}
