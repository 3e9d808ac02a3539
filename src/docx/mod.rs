//! WordprocessingML codec: maps a [`Document`](crate::Document) to and from
//! the parts of an OPC package.

mod core_props;
mod reader;
mod styles;
mod writer;

pub(crate) use reader::read_document;
pub(crate) use writer::build_package;

pub use crate::opc::Compression;

/// What the reader does with recognized content outside the supported subset
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnsupportedPolicy {
    /// Fail with `Error::UnsupportedFeature`
    #[default]
    Reject,
    /// Drop the content and keep reading
    Skip,
}

/// Options for reading a package
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReadOptions {
    pub unsupported: UnsupportedPolicy,
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip tables, images, tracked changes and fields instead of failing
    pub fn skip_unsupported(mut self) -> Self {
        self.unsupported = UnsupportedPolicy::Skip;
        self
    }
}

/// Options for writing a package
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteOptions {
    pub compression: Compression,
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }
}
