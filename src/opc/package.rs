//! OPC Package implementation
//!
//! Handles reading and writing DOCX files as ZIP packages. Writing is
//! deterministic: entries come out in a fixed order with fixed timestamps
//! and permissions, so the same parts always produce the same bytes.

use crate::error::{Error, Result};
use crate::opc::relationships::{rel_types, TargetMode};
use crate::opc::{ContentTypes, Part, PartUri, Relationships};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, Write};
use std::path::Path;
use zip::read::ZipArchive;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

const CONTENT_TYPES_ENTRY: &str = "[Content_Types].xml";
const PACKAGE_RELS_ENTRY: &str = "_rels/.rels";

/// Compression applied to every zip entry
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Compression {
    /// DEFLATE at the zip crate's default level
    #[default]
    Deflated,
    /// No compression
    Stored,
}

/// An OPC package (ZIP-based container for DOCX)
#[derive(Debug)]
pub struct Package {
    /// Parts in insertion order
    parts: Vec<Part>,
    /// Package-level relationships (/_rels/.rels)
    relationships: Relationships,
    /// Content types ([Content_Types].xml)
    content_types: ContentTypes,
}

impl Package {
    /// Create a new empty package
    pub fn new() -> Self {
        Self {
            parts: Vec::new(),
            relationships: Relationships::new(),
            content_types: ContentTypes::new(),
        }
    }

    /// Open a package from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        log::debug!("opening package {}", path.as_ref().display());
        Self::from_reader(BufReader::new(file))
    }

    /// Open a package from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Open a package from a reader.
    ///
    /// Fails with `MalformedPackage` when the input is not a zip archive or
    /// lacks the content-types manifest or the package relationships.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Self::read_archive(reader).map_err(Error::into_malformed)
    }

    fn read_archive<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;

        let content_types = match read_entry_string(&mut archive, CONTENT_TYPES_ENTRY)? {
            Some(xml) => ContentTypes::from_xml(&xml)?,
            None => {
                return Err(Error::MalformedPackage(format!(
                    "missing {}",
                    CONTENT_TYPES_ENTRY
                )))
            }
        };

        let relationships = match read_entry_string(&mut archive, PACKAGE_RELS_ENTRY)? {
            Some(xml) => Relationships::from_xml(&xml)?,
            None => {
                return Err(Error::MalformedPackage(format!(
                    "missing {}",
                    PACKAGE_RELS_ENTRY
                )))
            }
        };

        let mut package = Self {
            parts: Vec::new(),
            relationships,
            content_types,
        };
        package.read_parts(&mut archive)?;
        package.read_part_relationships(&mut archive)?;

        log::debug!(
            "read package with {} parts and {} package relationships",
            package.parts.len(),
            package.relationships.len()
        );
        Ok(package)
    }

    /// Save the package to a file.
    ///
    /// The archive is assembled in memory and written to a temporary file
    /// next to `path`, which then replaces `path` in one rename. On failure
    /// `path` is untouched and the temporary file is removed.
    pub fn save<P: AsRef<Path>>(&self, path: P, compression: Compression) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes(compression)?;

        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| Error::Io(e.error))?;

        log::debug!("saved package to {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }

    /// Save the package to bytes
    pub fn to_bytes(&self, compression: Compression) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to(Cursor::new(&mut buf), compression)?;
        Ok(buf)
    }

    /// Write the package to a writer.
    ///
    /// Entry order: content types, package relationships, part relationships,
    /// then parts in insertion order.
    pub fn write_to<W: Write + Seek>(&self, writer: W, compression: Compression) -> Result<()> {
        let method = match compression {
            Compression::Deflated => CompressionMethod::Deflated,
            Compression::Stored => CompressionMethod::Stored,
        };
        let options = SimpleFileOptions::default()
            .compression_method(method)
            .last_modified_time(zip::DateTime::default())
            .unix_permissions(0o644);

        let mut zip = ZipWriter::new(writer);

        zip.start_file(CONTENT_TYPES_ENTRY, options)?;
        self.content_types.write_to(&mut zip)?;

        zip.start_file(PACKAGE_RELS_ENTRY, options)?;
        self.relationships.write_to(&mut zip)?;

        for part in &self.parts {
            if let Some(rels) = part.relationships().filter(|r| !r.is_empty()) {
                let rels_uri = part.uri().relationships_uri();
                zip.start_file(rels_uri.zip_path(), options)?;
                rels.write_to(&mut zip)?;
            }
        }

        for part in &self.parts {
            zip.start_file(part.uri().zip_path(), options)?;
            zip.write_all(part.data())?;
        }

        zip.finish()?;
        Ok(())
    }

    /// Get a part by URI
    pub fn part(&self, uri: &PartUri) -> Option<&Part> {
        self.parts.iter().find(|p| p.uri() == uri)
    }

    /// Add a part to the package, replacing any part with the same URI
    pub fn add_part(&mut self, part: Part) {
        self.content_types.add_override(part.uri(), part.content_type());
        match self.parts.iter_mut().find(|p| p.uri() == part.uri()) {
            Some(existing) => *existing = part,
            None => self.parts.push(part),
        }
    }

    /// Get all parts
    pub fn parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter()
    }

    /// Get package-level relationships
    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    /// Get mutable package-level relationships
    pub fn relationships_mut(&mut self) -> &mut Relationships {
        &mut self.relationships
    }

    /// Get content types
    pub fn content_types(&self) -> &ContentTypes {
        &self.content_types
    }

    /// Follow the first package-level relationship of `rel_type`
    pub fn part_by_rel_type(&self, rel_type: &str) -> Option<&Part> {
        let rel = self.relationships.by_type(rel_type)?;
        let uri = PartUri::from_package_target(&rel.target).ok()?;
        self.part(&uri)
    }

    /// Follow the first relationship of `rel_type` declared by `source`
    pub fn related_part(&self, source: &Part, rel_type: &str) -> Option<&Part> {
        let rel = source.relationships()?.by_type(rel_type)?;
        let uri = source.uri().resolve(&rel.target).ok()?;
        self.part(&uri)
    }

    /// Locate the main document part through the package relationships.
    pub fn main_document_part(&self) -> Result<&Part> {
        let rel = self
            .relationships
            .by_type(rel_types::OFFICE_DOCUMENT)
            .ok_or_else(|| {
                Error::MalformedPackage("no officeDocument relationship in /_rels/.rels".into())
            })?;
        let uri = PartUri::from_package_target(&rel.target).map_err(Error::into_malformed)?;
        self.part(&uri).ok_or_else(|| {
            Error::MalformedPackage(format!(
                "officeDocument relationship {} targets missing part {}",
                rel.id, uri
            ))
        })
    }

    // === Private methods ===

    fn read_parts<R: Read + Seek>(&mut self, archive: &mut ZipArchive<R>) -> Result<()> {
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();

            if file.is_dir() || name == CONTENT_TYPES_ENTRY {
                continue;
            }

            let uri = PartUri::new(&name)?;
            if uri.is_relationships() {
                continue;
            }

            let content_type = match self.content_types.get(&uri) {
                Some(ct) => ct.to_string(),
                None => {
                    log::trace!("part {} has no declared content type", uri);
                    "application/octet-stream".to_string()
                }
            };

            let mut data = Vec::new();
            file.read_to_end(&mut data)?;

            self.parts.push(Part::new(uri, content_type, data));
        }

        Ok(())
    }

    fn read_part_relationships<R: Read + Seek>(
        &mut self,
        archive: &mut ZipArchive<R>,
    ) -> Result<()> {
        for part in &mut self.parts {
            let rels_uri = part.uri().relationships_uri();
            if let Some(xml) = read_entry_string(archive, rels_uri.zip_path())? {
                let rels = Relationships::from_xml(&xml)?;
                if rels.iter().any(|r| {
                    r.target_mode == TargetMode::Internal && part.uri().resolve(&r.target).is_err()
                }) {
                    return Err(Error::MalformedPackage(format!(
                        "{} contains an unresolvable target",
                        rels_uri
                    )));
                }
                part.set_relationships(rels);
            }
        }

        Ok(())
    }
}

impl Default for Package {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a zip entry as UTF-8 text, `None` if the entry does not exist
fn read_entry_string<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    Ok(Some(content))
}
