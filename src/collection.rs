use std::{
    io::{Read, Seek},
    path::Path,
};

use crate::{
    ExtractTtcError, ParseErrorKind, Result, SUPPORTED_VERSIONS, TTC_TAG, TrueTypeFont, ValidationResult,
    buffer::FontBufReader, tables::Tag,
};

/// The header of a [TrueType Collection](https://learn.microsoft.com/en-us/typography/opentype/spec/otff#ttc-header),
/// locating every font bundled in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrueTypeCollection {
    pub tag: Tag,
    pub major_version: u16,
    pub minor_version: u16,
    pub num_fonts: u32,
    /// Offsets of each font's offset table from the start of the collection
    pub font_offsets: Vec<u32>,
}

impl TrueTypeCollection {
    /// Parses the collection header from the start of `reader`.
    ///
    /// # Errors
    ///
    /// * `InvalidContainer` with `BadTag` when the file doesn't start with `ttcf`
    /// * `InvalidContainer` with `UnexpectedEof` when the offset table is cut short
    /// * `InvalidContainer` with `OffsetOutOfRange` when a font offset points
    ///   past the end of the source
    /// * `ReadFailure` for any other I/O problem
    pub fn parse_header<B: Read + Seek>(reader: &mut FontBufReader<B>) -> Result<Self> {
        reader.seek_to(0).map_err(ExtractTtcError::container)?;

        let tag = Tag::from(reader.read_tag().map_err(ExtractTtcError::container)?);
        if tag != TTC_TAG {
            return Err(ExtractTtcError::InvalidContainer(ParseErrorKind::BadTag {
                expected: TTC_TAG,
                found: tag,
            }));
        }

        let major_version = reader.read_u16().map_err(ExtractTtcError::container)?;
        let minor_version = reader.read_u16().map_err(ExtractTtcError::container)?;
        let num_fonts = reader.read_u32().map_err(ExtractTtcError::container)?;

        // read the whole offset array at once; a bogus count fails here
        // instead of allocating
        let raw = reader
            .read_vec((num_fonts as usize).saturating_mul(4))
            .map_err(ExtractTtcError::container)?;
        let font_offsets: Vec<u32> = raw
            .chunks_exact(4)
            .map(|b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
            .collect();

        let source_len = reader.source_len();
        if let Some(&offset) = font_offsets.iter().find(|&&offset| u64::from(offset) >= source_len) {
            return Err(ExtractTtcError::InvalidContainer(ParseErrorKind::OffsetOutOfRange {
                offset: offset.into(),
                source_len,
            }));
        }

        let collection = Self {
            tag,
            major_version,
            minor_version,
            num_fonts,
            font_offsets,
        };
        if !collection.is_supported_version() {
            log::warn!(
                "unknown collection version {}.{}, reading it as version 1",
                major_version,
                minor_version
            );
        }
        log::debug!("collection holds {} font(s) at {:?}", num_fonts, collection.font_offsets);

        Ok(collection)
    }

    /// Opens and parses the collection header of the file at `path`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut reader = FontBufReader::open(path.as_ref())?;
        Self::parse_header(&mut reader)
    }

    /// Parses every font of the collection, in offset order
    pub fn extract_fonts<B: Read + Seek>(&self, reader: &mut FontBufReader<B>) -> Result<Vec<TrueTypeFont>> {
        self.font_offsets
            .iter()
            .map(|&offset| TrueTypeFont::parse_at(reader, offset.into()))
            .collect()
    }

    /// `(major << 16) | minor`, e.g. 0x00010000 for version 1.0
    pub fn version(&self) -> u32 {
        (u32::from(self.major_version) << 16) | u32::from(self.minor_version)
    }

    pub fn is_supported_version(&self) -> bool {
        SUPPORTED_VERSIONS.contains(&self.version())
    }

    pub fn validate(&self) -> ValidationResult {
        ValidationResult::new()
            .check(self.tag == TTC_TAG, || format!("unexpected tag '{}'", self.tag))
            .check(self.num_fonts > 0, || "collection holds no fonts".into())
            .check(self.font_offsets.len() == self.num_fonts as usize, || {
                format!(
                    "{} font offsets for {} fonts",
                    self.font_offsets.len(),
                    self.num_fonts
                )
            })
    }

    pub fn is_structurally_valid(&self) -> bool {
        self.validate().is_valid()
    }
}
