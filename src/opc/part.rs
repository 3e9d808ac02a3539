//! Part representation for OPC packages

use crate::opc::{PartUri, Relationships};

/// A part within an OPC package
#[derive(Clone, Debug)]
pub struct Part {
    /// Part URI
    uri: PartUri,
    /// Content type
    content_type: String,
    /// Part data
    data: Vec<u8>,
    /// Part relationships (if any)
    relationships: Option<Relationships>,
}

impl Part {
    /// Create a new part
    pub fn new(uri: PartUri, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            uri,
            content_type: content_type.into(),
            data,
            relationships: None,
        }
    }

    /// Get the part URI
    pub fn uri(&self) -> &PartUri {
        &self.uri
    }

    /// Get the content type
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Get the raw data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get data as UTF-8 string
    pub fn data_as_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.data)
    }

    /// Get relationships
    pub fn relationships(&self) -> Option<&Relationships> {
        self.relationships.as_ref()
    }

    /// Set relationships
    pub fn set_relationships(&mut self, rels: Relationships) {
        self.relationships = Some(rels);
    }

    /// Builder form of [`Part::set_relationships`]
    pub fn with_relationships(mut self, rels: Relationships) -> Self {
        self.relationships = Some(rels);
        self
    }
}
