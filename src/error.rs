//! Error types for docwright

use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Caller error, rejected before any mutation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Text that cannot be represented in an XML part
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Not a zip archive, or a required part or relationship is missing
    #[error("Malformed package: {0}")]
    MalformedPackage(String),

    /// A required part does not follow the supported WordprocessingML subset
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// Recognized content outside the supported subset (tables, images, ...)
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),

    #[error("Invalid part URI: {0}")]
    InvalidPartUri(String),

    #[error("Missing attribute '{attr}' on element '{element}'")]
    MissingAttribute { element: String, attr: String },
}

impl Error {
    /// Whether this error only reports content the reader chose not to model
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::UnsupportedFeature(_))
    }

    /// Fold container-level plumbing errors into `MalformedPackage`
    pub(crate) fn into_malformed(self) -> Self {
        match self {
            Error::Zip(e) => Error::MalformedPackage(e.to_string()),
            Error::Xml(e) => Error::MalformedPackage(e.to_string()),
            Error::XmlAttr(e) => Error::MalformedPackage(e.to_string()),
            Error::Utf8(e) => Error::MalformedPackage(e.to_string()),
            e @ (Error::InvalidPartUri(_) | Error::MissingAttribute { .. }) => {
                Error::MalformedPackage(e.to_string())
            }
            other => other,
        }
    }

    /// Fold XML plumbing errors raised inside a part into `SchemaViolation`
    pub(crate) fn in_part(self, part: &str) -> Self {
        match self {
            Error::Xml(e) => Error::SchemaViolation(format!("{}: {}", part, e)),
            Error::XmlAttr(e) => Error::SchemaViolation(format!("{}: {}", part, e)),
            Error::Utf8(e) => Error::SchemaViolation(format!("{}: {}", part, e)),
            Error::MissingAttribute { element, attr } => Error::SchemaViolation(format!(
                "{}: missing attribute '{}' on element '{}'",
                part, attr, element
            )),
            other => other,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_malformed_keeps_io() {
        let err = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(matches!(err.into_malformed(), Error::Io(_)));
    }

    #[test]
    fn test_into_malformed_folds_part_uri() {
        let err = Error::InvalidPartUri("//x".into()).into_malformed();
        assert!(matches!(err, Error::MalformedPackage(_)));
    }

    #[test]
    fn test_in_part_keeps_unsupported() {
        let err = Error::UnsupportedFeature("table".into()).in_part("/word/document.xml");
        assert!(err.is_unsupported());
    }

    #[test]
    fn test_in_part_missing_attribute() {
        let err = Error::MissingAttribute {
            element: "w:color".into(),
            attr: "w:val".into(),
        }
        .in_part("/word/document.xml");
        match err {
            Error::SchemaViolation(msg) => assert!(msg.contains("w:color")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
