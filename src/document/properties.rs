//! Core document properties (docProps/core.xml)

use chrono::{DateTime, Utc};

/// Document-level metadata.
///
/// `None` means unset and is omitted from the package; `Some("")` is an
/// explicitly empty value and survives a round-trip as such.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoreProperties {
    pub title: Option<String>,
    pub subject: Option<String>,
    /// Written as `dc:creator`
    pub author: Option<String>,
    pub keywords: Option<String>,
    pub description: Option<String>,
    pub last_modified_by: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

impl CoreProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no property is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Text-valued properties with their element names, in writing order
    pub(crate) fn text_fields(&self) -> [(&'static str, Option<&str>); 6] {
        [
            ("dc:title", self.title.as_deref()),
            ("dc:subject", self.subject.as_deref()),
            ("dc:creator", self.author.as_deref()),
            ("cp:keywords", self.keywords.as_deref()),
            ("dc:description", self.description.as_deref()),
            ("cp:lastModifiedBy", self.last_modified_by.as_deref()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert!(CoreProperties::new().is_empty());
        assert!(!CoreProperties::new().with_title("").is_empty());
    }

    #[test]
    fn test_text_fields_order() {
        let props = CoreProperties::new()
            .with_title("Study Protocol Draft v1")
            .with_author("Dr. Smith");
        let names: Vec<_> = props
            .text_fields()
            .iter()
            .filter(|(_, v)| v.is_some())
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(names, ["dc:title", "dc:creator"]);
    }
}
