use std::{
    fmt,
    io::{self, Read, Seek, Write},
};

use crate::{
    ExtractTtcError,
    buffer::{FontBufReader, FontBufWriter},
};

pub mod head;

/// Size of the offset table at the start of every font
pub const OFFSET_TABLE_LEN: u64 = 12;

/// Size of one table directory entry
pub const TABLE_RECORD_LEN: u64 = 16;

/// A four byte table or container tag such as `head` or `ttcf`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag([u8; 4]);

impl Tag {
    pub const fn new(bytes: &[u8; 4]) -> Self {
        Self(*bytes)
    }

    pub fn to_be_bytes(self) -> [u8; 4] {
        self.0
    }
}

impl From<[u8; 4]> for Tag {
    fn from(value: [u8; 4]) -> Self {
        Self(value)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // tags are ascii by convention but nothing stops a broken file
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02X}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({self})")
    }
}

/// Represents the offset subtable at the start of a font
/// providing us with important info such as the number of tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetTable {
    pub sfnt_version: u32,
    pub num_tables: u16,
    pub search_range: u16,
    pub entry_selector: u16,
    pub range_shift: u16,
}

impl OffsetTable {
    /// Constructs the offset sub table from its 12 raw bytes.
    pub fn from_buffer(buf: &[u8; 12]) -> Self {
        Self {
            sfnt_version: u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]),
            num_tables: u16::from_be_bytes([buf[4], buf[5]]),
            search_range: u16::from_be_bytes([buf[6], buf[7]]),
            entry_selector: u16::from_be_bytes([buf[8], buf[9]]),
            range_shift: u16::from_be_bytes([buf[10], buf[11]]),
        }
    }

    /// Reads the offset table at the reader's current position
    pub(crate) fn from_reader<B: Read + Seek>(reader: &mut FontBufReader<B>) -> Result<Self, ExtractTtcError> {
        let mut buffer = [0u8; 12];
        reader.read_exact(&mut buffer).map_err(ExtractTtcError::font)?;

        Ok(Self::from_buffer(&buffer))
    }

    pub(crate) fn write<W: Write + Seek>(&self, writer: &mut FontBufWriter<W>) -> io::Result<()> {
        writer.write_u32(self.sfnt_version)?;
        writer.write_u16(self.num_tables)?;
        writer.write_u16(self.search_range)?;
        writer.write_u16(self.entry_selector)?;
        writer.write_u16(self.range_shift)
    }

    /// Returns the number of tables in the font
    pub fn num_tables(&self) -> u16 {
        self.num_tables
    }
}

/// One record of the table directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDirectoryEntry {
    pub tag: Tag,
    /// The checksum of the table, used to verify the integrity of its data.
    pub checksum: u32,
    /// The offset of the table, in bytes, from the beginning of the file
    /// holding it. Inside a collection this is relative to the collection,
    /// not to the font.
    pub offset: u32,
    /// The length of this table in bytes, without padding.
    pub length: u32,
}

impl TableDirectoryEntry {
    /// Constructs an entry from its 16 raw bytes.
    ///
    /// * Bytes 0-3: Tag
    /// * Bytes 4-7: Checksum of the table
    /// * Bytes 8-11: Offset of the table from the beginning of the file
    /// * Bytes 12-15: Length of the table in bytes
    ///
    /// # Examples
    ///
    /// ```
    /// use extract_ttc::tables::{Tag, TableDirectoryEntry};
    ///
    /// let buffer: [u8; 16] = [
    ///     b'g', b'l', b'y', b'f',
    ///     0x12, 0x34, 0x56, 0x78,
    ///     0x00, 0x01, 0x00, 0x00,
    ///     0x00, 0x00, 0x0A, 0x00,
    /// ];
    ///
    /// let entry = TableDirectoryEntry::from_buffer(&buffer);
    /// assert_eq!(entry.tag, Tag::new(b"glyf"));
    /// assert_eq!(entry.checksum, 0x12345678);
    /// assert_eq!(entry.offset, 0x00010000);
    /// assert_eq!(entry.length, 0x00000A00);
    /// ```
    pub fn from_buffer(buf: &[u8; 16]) -> Self {
        Self {
            tag: Tag::new(&[buf[0], buf[1], buf[2], buf[3]]),
            checksum: u32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]),
            offset: u32::from_be_bytes([buf[8], buf[9], buf[10], buf[11]]),
            length: u32::from_be_bytes([buf[12], buf[13], buf[14], buf[15]]),
        }
    }

    /// Reads `num_tables` directory entries starting at the reader's
    /// current position.
    pub(crate) fn read_directory<B: Read + Seek>(
        reader: &mut FontBufReader<B>,
        num_tables: u16,
    ) -> Result<Vec<Self>, ExtractTtcError> {
        // the whole directory is read in one go and then split into records
        let buffer = reader
            .read_vec(usize::from(num_tables) * TABLE_RECORD_LEN as usize)
            .map_err(ExtractTtcError::font)?;

        Ok(buffer
            .chunks_exact(TABLE_RECORD_LEN as usize)
            .map(|raw| {
                let mut record = [0u8; 16];
                record.copy_from_slice(raw);
                Self::from_buffer(&record)
            })
            .collect())
    }

    /// Writes the entry with `offset` in place of the stored one
    pub(crate) fn write<W: Write + Seek>(&self, writer: &mut FontBufWriter<W>, offset: u32) -> io::Result<()> {
        writer.write_bytes(&self.tag.to_be_bytes())?;
        writer.write_u32(self.checksum)?;
        writer.write_u32(offset)?;
        writer.write_u32(self.length)
    }

    /// Absolute position of the offset field of directory entry `index`
    /// in a standalone font
    pub(crate) fn offset_field_position(index: usize) -> u64 {
        OFFSET_TABLE_LEN + TABLE_RECORD_LEN * index as u64 + 8
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn tag_display_escapes_binary() {
        assert_eq!(Tag::new(b"OS/2").to_string(), "OS/2");
        assert_eq!(Tag::new(b"cvt ").to_string(), "cvt ");
        assert_eq!(Tag::new(&[0, b'a', b'b', 0xFF]).to_string(), "\\x00ab\\xFF");
    }

    #[test]
    fn offset_table_from_buffer() {
        let table = OffsetTable::from_buffer(&[0, 1, 0, 0, 0, 11, 0, 128, 0, 3, 0, 48]);
        assert_eq!(
            table,
            OffsetTable {
                sfnt_version: 0x00010000,
                num_tables: 11,
                search_range: 128,
                entry_selector: 3,
                range_shift: 48,
            }
        );
    }

    #[test]
    fn directory_truncated_is_invalid_font() {
        let mut data = vec![0u8; 12 + 20];
        data[4..6].copy_from_slice(&2u16.to_be_bytes());
        let mut reader = FontBufReader::from_buffer(Cursor::new(data)).unwrap();
        let offset_table = OffsetTable::from_reader(&mut reader).unwrap();
        let err = TableDirectoryEntry::read_directory(&mut reader, offset_table.num_tables()).unwrap_err();
        assert!(matches!(err, ExtractTtcError::InvalidFont(_)), "{err:?}");
    }

    #[test]
    fn offset_field_positions() {
        assert_eq!(TableDirectoryEntry::offset_field_position(0), 20);
        assert_eq!(TableDirectoryEntry::offset_field_position(3), 12 + 48 + 8);
    }
}
