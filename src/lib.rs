use std::{io, path::PathBuf};

use buffer::FontBufReaderError;
use tables::Tag;
use thiserror::Error;

pub mod buffer;
pub mod checksum;
pub mod collection;
pub mod config;
pub mod extract;
pub mod font;
pub mod output_path;
pub mod tables;
pub mod validation;

#[cfg(test)]
mod test_data;

pub use collection::TrueTypeCollection;
pub use config::{ConfigOverrides, Configuration};
pub use extract::{extract, extract_all};
pub use font::TrueTypeFont;
pub use validation::ValidationResult;

pub type Result<T> = std::result::Result<T, ExtractTtcError>;

/// Every valid collection starts with this tag
pub const TTC_TAG: Tag = Tag::new(b"ttcf");

/// Version 1.0 collection header
pub const TTC_VERSION_1: u32 = 0x0001_0000;

/// Collection header with the trailing DSIG fields
pub const TTC_VERSION_2: u32 = 0x0002_0000;

pub const SUPPORTED_VERSIONS: [u32; 2] = [TTC_VERSION_1, TTC_VERSION_2];

pub const HEAD_TAG: Tag = Tag::new(b"head");

/// The whole-file checksum of a font with a correct `head.checksumAdjustment`
pub const CHECKSUM_ADJUSTMENT_MAGIC: u32 = 0xB1B0_AFBA;

/// Table payloads start on 4-byte boundaries
pub const TABLE_ALIGNMENT: u64 = 4;

/// Where a structural parse stopped and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The source ended in the middle of a structure.
    UnexpectedEof { position: u64 },

    /// A magic tag didn't match.
    BadTag { expected: Tag, found: Tag },

    /// An offset points outside of the source.
    OffsetOutOfRange { offset: u64, source_len: u64 },

    /// A table directory entry describes bytes outside of the source.
    TableOutOfRange {
        tag: Tag,
        offset: u32,
        length: u32,
        source_len: u64,
    },

    /// The `head` table is too short to hold its fixed leading fields.
    HeadTooShort { length: usize },

    /// A table payload's size disagrees with its directory entry.
    PayloadLengthMismatch { tag: Tag, expected: u32, found: usize },

    /// The directory size disagrees with the offset table's `numTables`.
    TableCountMismatch { expected: u16, found: usize },
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedEof { position } => write!(f, "unexpected end of file at byte {position}"),
            Self::BadTag { expected, found } => write!(f, "expected tag '{expected}', found '{found}'"),
            Self::OffsetOutOfRange { offset, source_len } => {
                write!(f, "offset {offset} is outside of the {source_len} byte source")
            }
            Self::TableOutOfRange {
                tag,
                offset,
                length,
                source_len,
            } => write!(
                f,
                "table '{tag}' ({length} bytes at {offset}) extends past the {source_len} byte source"
            ),
            Self::HeadTooShort { length } => write!(f, "'head' table is only {length} bytes long"),
            Self::PayloadLengthMismatch { tag, expected, found } => {
                write!(f, "table '{tag}' holds {found} bytes, directory says {expected}")
            }
            Self::TableCountMismatch { expected, found } => {
                write!(f, "{found} directory entries for {expected} tables")
            }
        }
    }
}

/// Broad failure categories, one per CLI exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Argument,
    Read,
    Invalid,
    Write,
    Extraction,
}

#[derive(Debug, Error)]
pub enum ExtractTtcError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("could not open '{}': {source}", path.display())]
    OpenFailure { path: PathBuf, source: io::Error },

    #[error("could not read font data: {0}")]
    ReadFailure(#[source] io::Error),

    #[error("file does not look like a ttc file: {0}")]
    InvalidContainer(ParseErrorKind),

    #[error("invalid font: {0}")]
    InvalidFont(ParseErrorKind),

    #[error("could not write '{}': {source}", path.display())]
    WriteFailure { path: PathBuf, source: io::Error },

    #[error("could not write font data: {0}")]
    SinkFailure(#[source] io::Error),

    #[error("missing table data for tag '{0}'")]
    MissingPayload(Tag),

    #[error("font has no 'head' table")]
    MissingHeadTable,
}

impl ExtractTtcError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidArgument(_) => ErrorClass::Argument,
            Self::OpenFailure { .. } | Self::ReadFailure(_) => ErrorClass::Read,
            Self::InvalidContainer(_) | Self::InvalidFont(_) => ErrorClass::Invalid,
            Self::WriteFailure { .. } | Self::SinkFailure(_) => ErrorClass::Write,
            Self::MissingPayload(_) | Self::MissingHeadTable => ErrorClass::Extraction,
        }
    }

    /// Maps a reader error hit while parsing the collection header
    pub(crate) fn container(err: FontBufReaderError) -> Self {
        match err {
            FontBufReaderError::UnexpectedEof { position } => {
                Self::InvalidContainer(ParseErrorKind::UnexpectedEof { position })
            }
            FontBufReaderError::ReadError(err) | FontBufReaderError::FailedToSeek(err) => Self::ReadFailure(err),
        }
    }

    /// Maps a reader error hit while parsing a single font
    pub(crate) fn font(err: FontBufReaderError) -> Self {
        match err {
            FontBufReaderError::UnexpectedEof { position } => {
                Self::InvalidFont(ParseErrorKind::UnexpectedEof { position })
            }
            FontBufReaderError::ReadError(err) | FontBufReaderError::FailedToSeek(err) => Self::ReadFailure(err),
        }
    }

    pub(crate) fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::OpenFailure {
            path: path.into(),
            source,
        }
    }
}
