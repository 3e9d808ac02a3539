//! Part URI handling for OPC packages

use crate::error::{Error, Result};
use std::fmt;

/// Represents a URI to a part within an OPC package.
///
/// Part URIs are always absolute paths starting with '/'.
/// Example: `/word/document.xml`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartUri {
    path: String,
}

impl PartUri {
    /// Create a new PartUri from a string.
    ///
    /// The path will be normalized (leading '/' ensured, no trailing '/').
    pub fn new(path: &str) -> Result<Self> {
        let path = path.trim();

        if path.is_empty() || path == "/" {
            return Err(Error::InvalidPartUri("empty path".into()));
        }

        let normalized = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        let normalized = normalized.trim_end_matches('/').to_string();

        if normalized.contains("//") {
            return Err(Error::InvalidPartUri(format!(
                "invalid path '{}': contains double slashes",
                path
            )));
        }

        if normalized.split('/').any(|s| s == "." || s == "..") {
            return Err(Error::InvalidPartUri(format!(
                "invalid path '{}': contains dot segments",
                path
            )));
        }

        Ok(Self { path: normalized })
    }

    /// Resolve a relationship target declared at the package root (`/_rels/.rels`).
    pub fn from_package_target(target: &str) -> Result<Self> {
        resolve_against("", target)
    }

    /// Get the path as a string slice
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Name of the zip entry holding this part (no leading '/')
    pub fn zip_path(&self) -> &str {
        &self.path[1..]
    }

    /// Get the file name portion
    pub fn file_name(&self) -> Option<&str> {
        self.path.rsplit('/').next()
    }

    /// Get the file extension
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        let (_, ext) = name.rsplit_once('.')?;
        Some(ext).filter(|ext| !ext.is_empty())
    }

    /// Get the parent directory path ("" for parts at the package root)
    fn parent_dir(&self) -> &str {
        match self.path.rfind('/') {
            Some(pos) => &self.path[..pos],
            None => "",
        }
    }

    /// Get the relationships URI for this part.
    ///
    /// For `/word/document.xml`, returns `/word/_rels/document.xml.rels`
    pub fn relationships_uri(&self) -> PartUri {
        let file_name = self.file_name().unwrap_or("");
        PartUri {
            path: format!("{}/_rels/{}.rels", self.parent_dir(), file_name),
        }
    }

    /// Resolve a relative path against this URI.
    ///
    /// For `/word/document.xml` and `../media/image1.png`, returns `/media/image1.png`
    pub fn resolve(&self, relative: &str) -> Result<PartUri> {
        resolve_against(self.parent_dir(), relative)
    }

    /// Check if this URI points to a relationships file
    pub fn is_relationships(&self) -> bool {
        self.path.contains("/_rels/") && self.path.ends_with(".rels")
    }
}

fn resolve_against(base_dir: &str, relative: &str) -> Result<PartUri> {
    if relative.starts_with('/') {
        return PartUri::new(relative);
    }

    let mut parts: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();

    for segment in relative.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                if parts.pop().is_none() {
                    return Err(Error::InvalidPartUri(format!(
                        "'{}' escapes the package root",
                        relative
                    )));
                }
            }
            s => parts.push(s),
        }
    }

    PartUri::new(&format!("/{}", parts.join("/")))
}

impl fmt::Display for PartUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

impl std::str::FromStr for PartUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PartUri::new(s)
    }
}

/// Part URIs written by this crate
pub mod well_known {
    pub const DOCUMENT: &str = "/word/document.xml";
    pub const STYLES: &str = "/word/styles.xml";
    pub const CORE_PROPS: &str = "/docProps/core.xml";
}
