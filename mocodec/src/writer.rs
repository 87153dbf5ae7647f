//! Byte sinks and the binary writer the MO generator emits through.

use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::Error;

/// An append-only destination for generated bytes.
///
/// Implementations may buffer until [`ByteSink::flush`] or [`ByteSink::close`].
/// `close` must be safe to call more than once; only the first call has an effect.
pub trait ByteSink {
    /// Appends bytes.
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error>;

    /// Pushes buffered bytes to the destination.
    fn flush(&mut self) -> Result<(), Error>;

    /// Flushes and releases the destination.
    fn close(&mut self) -> Result<(), Error>;
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        (**self).write(bytes)
    }

    fn flush(&mut self) -> Result<(), Error> {
        (**self).flush()
    }

    fn close(&mut self) -> Result<(), Error> {
        (**self).close()
    }
}

/// A sink that buffers in memory and writes to a file on flush.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    buffer: Vec<u8>,
    file: Option<File>,
}

impl FileSink {
    /// Creates (or truncates) the file at `path`.
    ///
    /// Fails with [`Error::NotWritable`] when the file cannot be opened for writing.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| Error::not_writable(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            buffer: Vec::new(),
            file: Some(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_closed(&self) -> bool {
        self.file.is_none()
    }
}

impl ByteSink for FileSink {
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        if self.file.is_none() {
            return Err(Error::SinkClosed);
        }
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Error> {
        let file = self.file.as_mut().ok_or(Error::SinkClosed)?;
        file.write_all(&self.buffer)?;
        file.flush()?;
        trace!(path = %self.path.display(), bytes = self.buffer.len(), "flushed sink");
        self.buffer.clear();
        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        if self.file.is_none() {
            return Ok(());
        }
        let flushed = self.flush();
        // The handle is released even when the flush failed.
        let synced = match self.file.take() {
            Some(file) => file.sync_all().map_err(Error::Io),
            None => Ok(()),
        };
        flushed.and(synced)
    }
}

/// A sink that collects everything in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    bytes: Vec<u8>,
    closed: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.bytes
    }
}

impl ByteSink for MemorySink {
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        if self.closed {
            return Err(Error::SinkClosed);
        }
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Error> {
        if self.closed {
            return Err(Error::SinkClosed);
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        self.closed = true;
        Ok(())
    }
}

/// Byte order of the 32-bit words in an MO file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

impl ByteOrder {
    pub fn encode_u32(self, value: u32) -> [u8; 4] {
        match self {
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        }
    }
}

impl std::fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ByteOrder::Little => write!(f, "little"),
            ByteOrder::Big => write!(f, "big"),
        }
    }
}

impl std::str::FromStr for ByteOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "little" | "le" => Ok(ByteOrder::Little),
            "big" | "be" => Ok(ByteOrder::Big),
            other => Err(Error::UnsupportedFormat(format!(
                "unknown byte order `{}` (expected little or big)",
                other
            ))),
        }
    }
}

/// Writes 32-bit words and raw byte runs to a [`ByteSink`], counting the bytes written.
#[derive(Debug)]
pub struct BinaryWriter<S: ByteSink> {
    sink: S,
    byte_order: ByteOrder,
    position: usize,
}

impl<S: ByteSink> BinaryWriter<S> {
    pub fn new(sink: S, byte_order: ByteOrder) -> Self {
        Self {
            sink,
            byte_order,
            position: 0,
        }
    }

    /// Number of bytes queued so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn write_u32(&mut self, value: u32) -> Result<(), Error> {
        self.write_bytes(&self.byte_order.encode_u32(value))
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.sink.write(bytes)?;
        self.position += bytes.len();
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        self.sink.flush()
    }

    pub fn close(&mut self) -> Result<(), Error> {
        self.sink.close()
    }

    pub fn into_inner(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use tempfile::TempDir;

    #[test]
    fn test_binary_writer_little_endian() {
        let mut writer = BinaryWriter::new(MemorySink::new(), ByteOrder::Little);
        writer.write_u32(0x950412de).unwrap();
        writer.write_bytes(b"ab").unwrap();
        assert_eq!(writer.position(), 6);
        assert_eq!(
            writer.into_inner().into_inner(),
            vec![0xde, 0x12, 0x04, 0x95, b'a', b'b']
        );
    }

    #[test]
    fn test_binary_writer_big_endian() {
        let mut writer = BinaryWriter::new(MemorySink::new(), ByteOrder::Big);
        writer.write_u32(0x950412de).unwrap();
        assert_eq!(writer.into_inner().bytes(), &[0x95, 0x04, 0x12, 0xde]);
    }

    #[test]
    fn test_memory_sink_rejects_writes_after_close() {
        let mut sink = MemorySink::new();
        sink.write(b"x").unwrap();
        sink.close().unwrap();
        sink.close().unwrap();
        assert!(sink.is_closed());
        assert!(matches!(sink.write(b"y"), Err(Error::SinkClosed)));
        assert_eq!(sink.into_inner(), b"x");
    }

    #[test]
    fn test_file_sink_buffers_until_flush() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.mo");
        let mut sink = FileSink::create(&path).unwrap();

        sink.write(b"hello").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"");

        sink.flush().unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");

        sink.write(b" world").unwrap();
        sink.close().unwrap();
        assert!(sink.is_closed());
        assert_eq!(std::fs::read(&path).unwrap(), b"hello world");
    }

    #[test]
    fn test_file_sink_close_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut sink = FileSink::create(dir.path().join("a.mo")).unwrap();
        sink.close().unwrap();
        sink.close().unwrap();
        assert!(matches!(sink.write(b"late"), Err(Error::SinkClosed)));
        assert!(matches!(sink.flush(), Err(Error::SinkClosed)));
    }

    #[test]
    fn test_file_sink_reports_unwritable_destination() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("messages.mo");
        let err = FileSink::create(&path).unwrap_err();
        assert!(err.is_io());
        match err {
            Error::NotWritable { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected NotWritable, got {:?}", other),
        }
    }

    #[test]
    fn test_byte_order_parsing() {
        assert_eq!(ByteOrder::from_str("LE").unwrap(), ByteOrder::Little);
        assert_eq!(ByteOrder::from_str("big").unwrap(), ByteOrder::Big);
        assert!(ByteOrder::from_str("middle").is_err());
        assert_eq!(ByteOrder::default().to_string(), "little");
    }
}
