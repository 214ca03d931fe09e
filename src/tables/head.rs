use crate::{ExtractTtcError, ParseErrorKind};

/// Byte offset of `checkSumAdjustment` inside the `head` payload
pub const CHECKSUM_ADJUSTMENT_OFFSET: usize = 8;

/// Magic number, obsolete, always set to 0x5F0F3CF5
pub const HEAD_MAGIC_NUMBER: u32 = 0x5F0F_3CF5;

/// A read-only view of the fields of the
/// [head table](https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6head.html)
/// that matter when moving a font between files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Head {
    /// Almost always 0x00010000
    pub version: u32,

    /// Font revision set by the font author/manufacturer
    pub font_revision: u32,

    /// To compute: set it to 0, sum the entire font as a u32,
    /// then store 0xB1B0AFBA - sum.
    pub checksum_adjustment: u32,

    pub magic_number: u32,

    /// Units per em (ranges from 64 to 16384), absent on a truncated table
    pub units_per_em: Option<u16>,
}

impl Head {
    /// Reads the leading fields from a raw `head` payload.
    ///
    /// Fails with `HeadTooShort` when the payload ends before the
    /// magic number.
    pub fn from_buffer(buf: &[u8]) -> Result<Self, ExtractTtcError> {
        check_len(buf)?;

        let be_u32 = |at: usize| u32::from_be_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]]);
        Ok(Self {
            version: be_u32(0),
            font_revision: be_u32(4),
            checksum_adjustment: be_u32(CHECKSUM_ADJUSTMENT_OFFSET),
            magic_number: be_u32(12),
            units_per_em: buf.get(18..20).map(|b| u16::from_be_bytes([b[0], b[1]])),
        })
    }

    pub fn has_valid_magic(&self) -> bool {
        self.magic_number == HEAD_MAGIC_NUMBER
    }
}

/// Length of the fixed fields up to and including the magic number
pub const MIN_HEAD_LEN: usize = 16;

/// Ensures a `head` payload holds every field up to the magic number, so a
/// writable font always has a readable `head`
pub(crate) fn check_len(payload: &[u8]) -> Result<(), ExtractTtcError> {
    if payload.len() < MIN_HEAD_LEN {
        return Err(ExtractTtcError::InvalidFont(ParseErrorKind::HeadTooShort {
            length: payload.len(),
        }));
    }
    Ok(())
}
