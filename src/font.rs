use std::{
    collections::BTreeMap,
    fs,
    io::{self, Cursor, Read, Seek, Write},
    path::Path,
};

use crate::{
    ExtractTtcError, HEAD_TAG, ParseErrorKind, Result, TABLE_ALIGNMENT, ValidationResult,
    buffer::{FontBufReader, FontBufWriter},
    checksum::{checksum_adjustment, file_checksum, table_checksum},
    tables::{
        OffsetTable, Tag, TableDirectoryEntry,
        head::{self, CHECKSUM_ADJUSTMENT_OFFSET, Head},
    },
};

/// A single font: its offset table, table directory and the raw table
/// payloads copied out of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrueTypeFont {
    pub offset_table: OffsetTable,
    /// Directory entries in file order. Offsets refer to the source the
    /// font was read from.
    pub table_directory: Vec<TableDirectoryEntry>,
    table_data: BTreeMap<Tag, Vec<u8>>,
}

/// A directory entry whose stored checksum doesn't match its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumMismatch {
    pub tag: Tag,
    pub stored: u32,
    pub computed: u32,
}

impl TrueTypeFont {
    pub fn new(
        offset_table: OffsetTable,
        table_directory: Vec<TableDirectoryEntry>,
        table_data: BTreeMap<Tag, Vec<u8>>,
    ) -> Self {
        Self {
            offset_table,
            table_directory,
            table_data,
        }
    }

    /// Parses the font whose offset table starts at `offset`.
    ///
    /// Table offsets are absolute positions in the source, so inside a
    /// collection every payload is read relative to the collection start.
    pub fn parse_at<B: Read + Seek>(reader: &mut FontBufReader<B>, offset: u64) -> Result<Self> {
        let source_len = reader.source_len();
        if offset >= source_len {
            return Err(ExtractTtcError::InvalidFont(ParseErrorKind::OffsetOutOfRange {
                offset,
                source_len,
            }));
        }

        reader.seek_to(offset).map_err(ExtractTtcError::font)?;
        let offset_table = OffsetTable::from_reader(reader)?;
        let table_directory = TableDirectoryEntry::read_directory(reader, offset_table.num_tables())?;

        let mut table_data = BTreeMap::new();
        for entry in &table_directory {
            if u64::from(entry.offset) + u64::from(entry.length) > source_len {
                return Err(ExtractTtcError::InvalidFont(ParseErrorKind::TableOutOfRange {
                    tag: entry.tag,
                    offset: entry.offset,
                    length: entry.length,
                    source_len,
                }));
            }

            reader.seek_to(entry.offset.into()).map_err(ExtractTtcError::font)?;
            let payload = reader.read_vec(entry.length as usize).map_err(ExtractTtcError::font)?;
            table_data.insert(entry.tag, payload);
        }

        log::debug!(
            "font at {offset}: sfnt version {:#010X}, {} tables",
            offset_table.sfnt_version,
            table_directory.len()
        );

        Ok(Self {
            offset_table,
            table_directory,
            table_data,
        })
    }

    /// Reads a standalone font file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut reader = FontBufReader::open(path.as_ref())?;
        Self::parse_at(&mut reader, 0)
    }

    pub fn table_data(&self, tag: Tag) -> Option<&[u8]> {
        self.table_data.get(&tag).map(Vec::as_slice)
    }

    pub fn has_table(&self, tag: Tag) -> bool {
        self.table_directory.iter().any(|entry| entry.tag == tag)
    }

    pub fn find_table_entry(&self, tag: Tag) -> Option<&TableDirectoryEntry> {
        self.table_directory.iter().find(|entry| entry.tag == tag)
    }

    pub fn head_table_entry(&self) -> Option<&TableDirectoryEntry> {
        self.find_table_entry(HEAD_TAG)
    }

    /// Decodes the leading fields of the `head` table
    pub fn head(&self) -> Result<Head> {
        let payload = self.table_data(HEAD_TAG).ok_or(ExtractTtcError::MissingHeadTable)?;
        Head::from_buffer(payload)
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::new()
            .check(
                self.table_directory.len() == usize::from(self.offset_table.num_tables),
                || {
                    format!(
                        "{} directory entries for {} tables",
                        self.table_directory.len(),
                        self.offset_table.num_tables
                    )
                },
            )
            .check(self.table_data.len() == self.table_directory.len(), || {
                format!(
                    "{} table payloads for {} directory entries",
                    self.table_data.len(),
                    self.table_directory.len()
                )
            });

        for entry in &self.table_directory {
            result = match self.table_data.get(&entry.tag) {
                None => result.with_error(format!("table '{}' has no payload", entry.tag)),
                Some(data) => result.check(data.len() == entry.length as usize, || {
                    format!(
                        "table '{}' holds {} bytes, directory says {}",
                        entry.tag,
                        data.len(),
                        entry.length
                    )
                }),
            };
        }

        result.check(self.head_table_entry().is_some(), || "font has no 'head' table".into())
    }

    pub fn is_structurally_valid(&self) -> bool {
        self.validate().is_valid()
    }

    /// Recomputes every table checksum and returns the entries that disagree
    /// with the directory
    pub fn checksum_mismatches(&self) -> Vec<ChecksumMismatch> {
        self.table_directory
            .iter()
            .filter_map(|entry| {
                let computed = table_checksum(entry.tag, self.table_data(entry.tag)?);
                (computed != entry.checksum).then_some(ChecksumMismatch {
                    tag: entry.tag,
                    stored: entry.checksum,
                    computed,
                })
            })
            .collect()
    }

    /// Serializes the font as a standalone file into `sink`, returning the
    /// number of bytes written.
    ///
    /// The file is laid out in memory first since the checksum adjustment
    /// depends on every byte, so `sink` only has to support appending.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> Result<usize> {
        let bytes = self.to_bytes()?;
        sink.write_all(&bytes).map_err(ExtractTtcError::SinkFailure)?;
        Ok(bytes.len())
    }

    /// Writes the font to `path`, returning the file size
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<u64> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        fs::write(path, &bytes).map_err(|source| ExtractTtcError::WriteFailure {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(bytes.len() as u64)
    }

    /// Lays out the font as a standalone file.
    ///
    /// 1. offset table and directory, with zero offsets
    /// 2. payloads in directory order, each 4-byte aligned, back-patching the
    ///    real offset into the directory
    /// 3. `head.checksumAdjustment` computed over the finished bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.check_writable()?;

        let mut writer = FontBufWriter::new(Cursor::new(Vec::new()));
        let head_offset = self.write_layout(&mut writer).map_err(ExtractTtcError::SinkFailure)?;
        let mut bytes = writer.into_inner().into_inner();

        let adjustment = checksum_adjustment(file_checksum(&bytes));
        let field = head_offset as usize + CHECKSUM_ADJUSTMENT_OFFSET;
        bytes[field..field + 4].copy_from_slice(&adjustment.to_be_bytes());

        Ok(bytes)
    }

    /// Runs passes 1 and 2, returning where the `head` table landed
    fn write_layout<W: Write + Seek>(&self, writer: &mut FontBufWriter<W>) -> io::Result<u32> {
        self.offset_table.write(writer)?;
        for entry in &self.table_directory {
            entry.write(writer, 0)?;
        }

        let mut head_offset = 0;
        for (index, entry) in self.table_directory.iter().enumerate() {
            let offset = u32::try_from(writer.position()?)
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "font exceeds 4 GiB"))?;
            // presence was checked up front
            let data = self.table_data.get(&entry.tag).map(Vec::as_slice).unwrap_or_default();

            if entry.tag == HEAD_TAG {
                head_offset = offset;
                let mut head = data.to_vec();
                head[CHECKSUM_ADJUSTMENT_OFFSET..CHECKSUM_ADJUSTMENT_OFFSET + 4].fill(0);
                writer.write_bytes(&head)?;
            } else {
                writer.write_bytes(data)?;
            }
            writer.pad_to(TABLE_ALIGNMENT)?;
            writer.patch_u32_at(TableDirectoryEntry::offset_field_position(index), offset)?;
        }

        Ok(head_offset)
    }

    /// Everything `write_layout` relies on, checked before a byte is written
    fn check_writable(&self) -> Result<()> {
        let expected = self.offset_table.num_tables;
        if self.table_directory.len() != usize::from(expected) {
            return Err(ExtractTtcError::InvalidFont(ParseErrorKind::TableCountMismatch {
                expected,
                found: self.table_directory.len(),
            }));
        }

        for entry in &self.table_directory {
            let data = self
                .table_data
                .get(&entry.tag)
                .ok_or(ExtractTtcError::MissingPayload(entry.tag))?;
            if data.len() != entry.length as usize {
                return Err(ExtractTtcError::InvalidFont(ParseErrorKind::PayloadLengthMismatch {
                    tag: entry.tag,
                    expected: entry.length,
                    found: data.len(),
                }));
            }
        }
        if !self.has_table(HEAD_TAG) {
            return Err(ExtractTtcError::MissingHeadTable);
        }
        head::check_len(self.table_data(HEAD_TAG).unwrap_or_default())
    }
}
