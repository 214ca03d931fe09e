use std::{
    fs::File,
    io::{self, BufReader, Read, Seek, SeekFrom, Write},
    path::Path,
};

use thiserror::Error;

use crate::ExtractTtcError;

macro_rules! impl_read {
    ($fn_name:ident, $typ:ty) => {
        pub fn $fn_name(&mut self) -> Result<$typ, FontBufReaderError> {
            let mut buf = [0u8; size_of::<$typ>()];
            self.read_exact(&mut buf)?;

            Ok(<$typ>::from_be_bytes(buf))
        }
    };
}

macro_rules! impl_write {
    ($fn_name:ident, $typ:ty) => {
        pub fn $fn_name(&mut self, value: $typ) -> io::Result<()> {
            self.inner.write_all(&value.to_be_bytes())
        }
    };
}

/// Represents the possible errors that can occur when using `FontBufReader`.
#[derive(Error, Debug)]
pub enum FontBufReaderError {
    /// The source ended before the requested number of bytes could be read.
    /// `position` is where the failed read started.
    #[error("unexpected end of data at byte {position}")]
    UnexpectedEof { position: u64 },

    /// An error occurred during a read operation on the underlying buffer.
    #[error(transparent)]
    ReadError(#[from] io::Error),

    /// An error occurred during a seek operation on the underlying buffer.
    #[error("Failed to seek, error context: {0}")]
    FailedToSeek(io::Error),
}

/// A big-endian reader over a seekable byte source.
///
/// Font collections store absolute offsets, so every structure is read
/// by seeking from the start of the source.
pub struct FontBufReader<B: Read + Seek> {
    inner: BufReader<B>,
    len: u64,
    position: u64,
}

impl<B> FontBufReader<B>
where
    B: Read + Seek,
{
    /// Wraps a source, usually a `File` or a `Cursor` over an in-memory font,
    /// and records its total length.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use extract_ttc::buffer::FontBufReader;
    ///
    /// let data = vec![0, 0, 0, 10, 0, 0, 0, 20];
    /// let mut reader = FontBufReader::from_buffer(Cursor::new(data)).unwrap();
    ///
    /// assert_eq!(reader.source_len(), 8);
    /// reader.seek_to(4).unwrap();
    /// assert_eq!(reader.read_u32().unwrap(), 20);
    /// ```
    pub fn from_buffer(mut buffer: B) -> Result<Self, FontBufReaderError> {
        let len = buffer.seek(SeekFrom::End(0)).map_err(FontBufReaderError::FailedToSeek)?;
        buffer.seek(SeekFrom::Start(0)).map_err(FontBufReaderError::FailedToSeek)?;

        Ok(Self {
            inner: BufReader::new(buffer),
            len,
            position: 0,
        })
    }

    /// Total length of the source in bytes
    pub fn source_len(&self) -> u64 {
        self.len
    }

    /// Current read position from the start of the source
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Seeks to a specific place in the buffer
    /// from the start of the source
    pub fn seek_to(&mut self, pos: u64) -> Result<(), FontBufReaderError> {
        self.inner
            .seek(SeekFrom::Start(pos))
            .map_err(FontBufReaderError::FailedToSeek)?;
        self.position = pos;

        Ok(())
    }

    /// Fills `buf` completely or fails with `UnexpectedEof`
    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), FontBufReaderError> {
        let position = self.position;
        if let Err(err) = self.inner.read_exact(buf) {
            // the inner cursor may have moved past a partial read
            self.inner
                .seek(SeekFrom::Start(position))
                .map_err(FontBufReaderError::FailedToSeek)?;
            return Err(match err.kind() {
                io::ErrorKind::UnexpectedEof => FontBufReaderError::UnexpectedEof { position },
                _ => FontBufReaderError::ReadError(err),
            });
        }
        self.position += buf.len() as u64;

        Ok(())
    }

    /// Reads `len` bytes into a freshly allocated vector.
    ///
    /// The length is checked against the source first so a corrupt length
    /// field can't trigger a huge allocation.
    pub fn read_vec(&mut self, len: usize) -> Result<Vec<u8>, FontBufReaderError> {
        let position = self.position;
        if position.saturating_add(len as u64) > self.len {
            return Err(FontBufReaderError::UnexpectedEof { position });
        }

        let mut buf = vec![0u8; len];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    pub fn read_tag(&mut self) -> Result<[u8; 4], FontBufReaderError> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    impl_read!(read_u32, u32);
    impl_read!(read_u16, u16);
}

impl FontBufReader<File> {
    /// Opens the font or collection file at `path`
    pub fn open(path: &Path) -> Result<Self, ExtractTtcError> {
        if path.as_os_str().is_empty() {
            return Err(ExtractTtcError::InvalidArgument("path cannot be empty".into()));
        }
        let file = File::open(path).map_err(|err| ExtractTtcError::open(path, err))?;
        Self::from_buffer(file).map_err(ExtractTtcError::container)
    }
}

/// A big-endian writer over a seekable sink which can go back
/// and patch values that are only known after later data is written.
pub struct FontBufWriter<W: Write + Seek> {
    inner: W,
}

impl<W> FontBufWriter<W>
where
    W: Write + Seek,
{
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    pub fn position(&mut self) -> io::Result<u64> {
        self.inner.stream_position()
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)
    }

    /// Writes zero bytes until the position is a multiple of `alignment`,
    /// returning the number of bytes of padding
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use extract_ttc::buffer::FontBufWriter;
    ///
    /// let mut writer = FontBufWriter::new(Cursor::new(Vec::new()));
    /// writer.write_bytes(&[1, 2, 3, 4, 5]).unwrap();
    /// assert_eq!(writer.pad_to(4).unwrap(), 3);
    /// assert_eq!(writer.into_inner().into_inner(), vec![1, 2, 3, 4, 5, 0, 0, 0]);
    /// ```
    pub fn pad_to(&mut self, alignment: u64) -> io::Result<u64> {
        let pos = self.position()?;
        let padding = (alignment - (pos % alignment)) % alignment;
        for _ in 0..padding {
            self.inner.write_all(&[0])?;
        }
        Ok(padding)
    }

    /// Overwrites the big-endian u32 at `pos` and returns to the
    /// previous write position
    pub fn patch_u32_at(&mut self, pos: u64, value: u32) -> io::Result<()> {
        let current = self.position()?;
        self.inner.seek(SeekFrom::Start(pos))?;
        self.inner.write_all(&value.to_be_bytes())?;
        self.inner.seek(SeekFrom::Start(current))?;
        Ok(())
    }

    impl_write!(write_u32, u32);
    impl_write!(write_u16, u16);
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn reads_big_endian() {
        let mut reader = FontBufReader::from_buffer(Cursor::new(vec![0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC])).unwrap();
        assert_eq!(reader.read_u32().unwrap(), 0x12345678);
        assert_eq!(reader.read_u16().unwrap(), 0x9ABC);
    }

    #[test]
    fn eof_reports_start_of_failed_read() {
        let mut reader = FontBufReader::from_buffer(Cursor::new(vec![0u8; 6])).unwrap();
        reader.read_u32().unwrap();
        match reader.read_u32() {
            Err(FontBufReaderError::UnexpectedEof { position }) => assert_eq!(position, 4),
            other => panic!("expected eof, got {other:?}"),
        }
    }

    #[test]
    fn tracks_position_across_reads_and_seeks() {
        let mut reader = FontBufReader::from_buffer(Cursor::new(vec![0u8; 16])).unwrap();
        assert_eq!(reader.position(), 0);
        reader.read_u32().unwrap();
        reader.read_u16().unwrap();
        assert_eq!(reader.position(), 6);
        reader.seek_to(12).unwrap();
        reader.read_tag().unwrap();
        assert_eq!(reader.position(), 16);

        // a failed read leaves the position at its start
        reader.seek_to(14).unwrap();
        assert!(reader.read_u32().is_err());
        assert_eq!(reader.position(), 14);
        assert_eq!(reader.read_u16().unwrap(), 0);
    }

    #[test]
    fn read_vec_rejects_lengths_past_the_end() {
        let mut reader = FontBufReader::from_buffer(Cursor::new(vec![0u8; 8])).unwrap();
        reader.seek_to(2).unwrap();
        assert!(matches!(
            reader.read_vec(usize::MAX),
            Err(FontBufReaderError::UnexpectedEof { position: 2 })
        ));
        assert_eq!(reader.read_vec(6).unwrap().len(), 6);
    }

    #[test]
    fn patch_keeps_write_position() {
        let mut writer = FontBufWriter::new(Cursor::new(Vec::new()));
        writer.write_u32(0).unwrap();
        writer.write_u16(0xFFFF).unwrap();
        writer.patch_u32_at(0, 0xDEADBEEF).unwrap();
        writer.write_u16(0x0102).unwrap();
        assert_eq!(
            writer.into_inner().into_inner(),
            vec![0xDE, 0xAD, 0xBE, 0xEF, 0xFF, 0xFF, 0x01, 0x02]
        );
    }

    #[test]
    fn pad_on_boundary_is_noop() {
        let mut writer = FontBufWriter::new(Cursor::new(Vec::new()));
        writer.write_u32(7).unwrap();
        assert_eq!(writer.pad_to(4).unwrap(), 0);
    }
}
