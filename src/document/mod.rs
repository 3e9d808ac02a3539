//! Document model - high-level API for DOCX documents

mod block;
mod color;
mod heading;
mod paragraph;
mod properties;
mod run;

pub use block::{Block, BlockKind};
pub use color::Rgb;
pub use heading::{Heading, HeadingLevel};
pub use paragraph::{Alignment, Paragraph};
pub use properties::CoreProperties;
pub use run::{Run, RunFormat};

use crate::docx::{self, ReadOptions, WriteOptions};
use crate::error::Result;
use crate::opc::Package;
use std::path::Path;

/// A word-processing document: core metadata plus blocks in reading order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    core_properties: CoreProperties,
    blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document with unset metadata
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(core_properties: CoreProperties, blocks: Vec<Block>) -> Self {
        Self {
            core_properties,
            blocks,
        }
    }

    /// Open a document from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with(path, &ReadOptions::default())
    }

    /// Same as [`Document::open`]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open(path)
    }

    /// Open a document from a file path with explicit reader options
    pub fn load_with<P: AsRef<Path>>(path: P, options: &ReadOptions) -> Result<Self> {
        let package = Package::open(path)?;
        docx::read_document(&package, options)
    }

    /// Open a document from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes_with(bytes, &ReadOptions::default())
    }

    /// Open a document from bytes with explicit reader options
    pub fn from_bytes_with(bytes: &[u8], options: &ReadOptions) -> Result<Self> {
        let package = Package::from_bytes(bytes)?;
        docx::read_document(&package, options)
    }

    /// Save the document to a file.
    ///
    /// Either the whole package is written or `path` is left as it was.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save_with(path, &WriteOptions::default())
    }

    /// Save the document to a file with explicit writer options
    pub fn save_with<P: AsRef<Path>>(&self, path: P, options: &WriteOptions) -> Result<()> {
        let package = docx::build_package(self)?;
        package.save(path, options.compression)
    }

    /// Save the document to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.to_bytes_with(&WriteOptions::default())
    }

    /// Save the document to bytes with explicit writer options
    pub fn to_bytes_with(&self, options: &WriteOptions) -> Result<Vec<u8>> {
        let package = docx::build_package(self)?;
        package.to_bytes(options.compression)
    }

    /// Append a heading. Non-empty `text` becomes its first run.
    ///
    /// Fails with `InvalidArgument` when `level` is outside 1..=9; the
    /// document is not modified in that case.
    pub fn add_heading(&mut self, text: impl Into<String>, level: u8) -> Result<&mut Heading> {
        let mut heading = Heading::new(HeadingLevel::new(level)?);
        let text = text.into();
        if !text.is_empty() {
            heading.push_run(Run::new(text));
        }

        self.blocks.push(Block::Heading(heading));
        match self.blocks.last_mut() {
            Some(Block::Heading(h)) => Ok(h),
            _ => unreachable!("a heading was just pushed"),
        }
    }

    /// Append an empty paragraph; runs are appended to the returned value
    pub fn add_paragraph(&mut self) -> &mut Paragraph {
        self.blocks.push(Block::Paragraph(Paragraph::new()));
        match self.blocks.last_mut() {
            Some(Block::Paragraph(p)) => p,
            _ => unreachable!("a paragraph was just pushed"),
        }
    }

    /// Append a paragraph holding one plain run of `text`
    pub fn add_text_paragraph(&mut self, text: impl Into<String>) -> &mut Paragraph {
        let para = self.add_paragraph();
        para.push_run(Run::new(text));
        para
    }

    /// Blocks in reading order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn block_mut(&mut self, index: usize) -> Option<&mut Block> {
        self.blocks.get_mut(index)
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// All headings, in order
    pub fn headings(&self) -> impl Iterator<Item = &Heading> {
        self.blocks.iter().filter_map(Block::as_heading)
    }

    /// All body paragraphs (headings excluded), in order
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(Block::as_paragraph)
    }

    /// Text of every block, one line per block
    pub fn text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn core_properties(&self) -> &CoreProperties {
        &self.core_properties
    }

    pub fn core_properties_mut(&mut self) -> &mut CoreProperties {
        &mut self.core_properties
    }

    pub fn set_core_properties(&mut self, props: CoreProperties) {
        self.core_properties = props;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_new_document_is_empty() {
        let doc = Document::new();
        assert_eq!(doc.block_count(), 0);
        assert!(doc.core_properties().is_empty());
        assert_eq!(doc.text(), "");
    }

    #[test]
    fn test_add_heading_rejects_bad_level() {
        let mut doc = Document::new();
        for level in [0, 10, 255] {
            assert!(matches!(
                doc.add_heading("Introduction", level),
                Err(Error::InvalidArgument(_))
            ));
        }
        assert_eq!(doc.block_count(), 0);
    }

    #[test]
    fn test_add_heading() {
        let mut doc = Document::new();
        let heading = doc.add_heading("Introduction", 1).unwrap();
        assert_eq!(heading.level().get(), 1);
        assert_eq!(heading.runs().len(), 1);

        let empty = doc.add_heading("", 2).unwrap();
        assert!(empty.runs().is_empty());

        assert_eq!(doc.headings().count(), 2);
        assert_eq!(doc.block(0).unwrap().kind(), BlockKind::Heading);
    }

    #[test]
    fn test_blocks_keep_order() {
        let mut doc = Document::new();
        doc.add_heading("Results", 1).unwrap();
        let para = doc.add_paragraph();
        para.append_run("The primary outcome measure showed significant improvement ", RunFormat::new());
        para.append_run("(p < 0.001)", RunFormat::new()).set_bold(true);
        doc.add_text_paragraph("Secondary outcomes.");

        let kinds: Vec<_> = doc.blocks().iter().map(Block::kind).collect();
        assert_eq!(
            kinds,
            [BlockKind::Heading, BlockKind::Paragraph, BlockKind::Paragraph]
        );
        assert_eq!(doc.paragraphs().count(), 2);
        assert_eq!(
            doc.text(),
            "Results\nThe primary outcome measure showed significant improvement (p < 0.001)\nSecondary outcomes."
        );
    }

    #[test]
    fn test_append_run_through_block() {
        let mut doc = Document::new();
        doc.add_heading("Limit", 2).unwrap();
        doc.block_mut(0)
            .unwrap()
            .append_run("ations", RunFormat::new().color(Rgb::RED));

        let block = doc.block(0).unwrap();
        assert_eq!(block.text(), "Limitations");
        assert_eq!(block.runs()[1].color(), Some(Rgb::RED));
    }

    #[test]
    fn test_document_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Document>();
    }
}
