//! Block-level content of a document body

use crate::document::{Heading, Paragraph, Run, RunFormat};

/// Discriminant of [`Block`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Heading,
    Paragraph,
}

/// A block in document reading order
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Heading(Heading),
    Paragraph(Paragraph),
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Heading(_) => BlockKind::Heading,
            Block::Paragraph(_) => BlockKind::Paragraph,
        }
    }

    pub fn runs(&self) -> &[Run] {
        match self {
            Block::Heading(h) => h.runs(),
            Block::Paragraph(p) => p.runs(),
        }
    }

    /// Concatenated text of all runs
    pub fn text(&self) -> String {
        match self {
            Block::Heading(h) => h.text(),
            Block::Paragraph(p) => p.text(),
        }
    }

    /// Append a run to whichever variant this is
    pub fn append_run(&mut self, text: impl Into<String>, format: RunFormat) -> &mut Run {
        match self {
            Block::Heading(h) => h.append_run(text, format),
            Block::Paragraph(p) => p.append_run(text, format),
        }
    }

    pub fn as_heading(&self) -> Option<&Heading> {
        match self {
            Block::Heading(h) => Some(h),
            Block::Paragraph(_) => None,
        }
    }

    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Block::Paragraph(p) => Some(p),
            Block::Heading(_) => None,
        }
    }
}

impl From<Heading> for Block {
    fn from(heading: Heading) -> Self {
        Block::Heading(heading)
    }
}

impl From<Paragraph> for Block {
    fn from(paragraph: Paragraph) -> Self {
        Block::Paragraph(paragraph)
    }
}
