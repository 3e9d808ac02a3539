//! # docwright
//!
//! Build word-processing documents in memory and store them as DOCX
//! (OOXML WordprocessingML) packages, or read such packages back.
//!
//! ## Features
//!
//! - Headings (levels 1-9), paragraphs and runs with bold, italic and color
//! - Core metadata (title, author, dates, ...)
//! - Deterministic output: the same document always produces the same bytes
//! - Atomic saves: a failed save never leaves a partial file behind
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docwright::{CoreProperties, Document, RunFormat};
//!
//! # fn main() -> docwright::Result<()> {
//! let mut doc = Document::new();
//! doc.set_core_properties(CoreProperties::new().with_title("Report").with_author("Dr. Smith"));
//! doc.add_heading("Results", 1)?;
//! let para = doc.add_paragraph();
//! para.append_run("Improvement was significant ", RunFormat::new());
//! para.append_run("(p < 0.001)", RunFormat::new().bold());
//! doc.save("report.docx")?;
//!
//! let back = Document::open("report.docx")?;
//! assert_eq!(back, doc);
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod docx;
pub mod error;
pub mod opc;
pub mod xml;

pub use document::{
    Alignment, Block, BlockKind, CoreProperties, Document, Heading, HeadingLevel, Paragraph, Rgb,
    Run, RunFormat,
};
pub use docx::{Compression, ReadOptions, UnsupportedPolicy, WriteOptions};
pub use error::{Error, Result};
pub use opc::{Package, Part, PartUri};
