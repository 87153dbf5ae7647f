//! Reading and writing text domain source files.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use crate::error::Error;

/// A domain source format: JSON documents or CSV rows.
///
/// # Example
///
/// ```rust,no_run
/// use mocodec::{TextDomain, formats::CsvRecord, traits::Parser};
/// let domain = TextDomain::read_from("messages.json")?;
/// Vec::<CsvRecord>::from(&domain).write_to("messages.csv")?;
/// Ok::<(), mocodec::Error>(())
/// ```
pub trait Parser {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Reads a source file.
    ///
    /// UTF-16 and UTF-8 files with a byte order mark are decoded to UTF-8
    /// first; files without a BOM pass through unchanged.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path)?;
        let decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);
        Self::from_reader(BufReader::new(decoder))
    }

    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Writes a source file as UTF-8, replacing any existing file.
    ///
    /// A path that cannot be created is reported as [`Error::NotWritable`].
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| Error::not_writable(path, e))?;
        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(bytes))
    }
}
