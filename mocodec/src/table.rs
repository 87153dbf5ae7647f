//! NUL-delimited string tables, as laid out in the body of an MO file.
//!
//! A [`StringTable`] is built once from an ordered list of strings and never
//! changes afterwards. Each entry knows its offset relative to the start of
//! the table; the absolute file offset is resolved through the table that
//! owns it (see [`PositionedEntry`]).

use std::ops::Deref;

use crate::error::Error;

const NUL_BYTE: u8 = 0x00;

/// One string of a [`StringTable`] and its position inside the table body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringTableEntry {
    content: Vec<u8>,
    relative_offset: usize,
}

impl StringTableEntry {
    /// The raw string bytes, without the trailing NUL.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Byte length of the content. The trailing NUL is not counted.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Offset of the first content byte from the start of the table body.
    pub fn relative_offset(&self) -> usize {
        self.relative_offset
    }

    /// Bytes this entry occupies in the table body, trailing NUL included.
    fn slot_len(&self) -> usize {
        self.content.len() + 1
    }
}

/// A [`StringTableEntry`] seen through the table that owns it.
#[derive(Debug, Clone, Copy)]
pub struct PositionedEntry<'a> {
    entry: &'a StringTableEntry,
    table: &'a StringTable,
}

impl<'a> PositionedEntry<'a> {
    pub fn entry(&self) -> &'a StringTableEntry {
        self.entry
    }

    /// Offset of the first content byte from the start of the file.
    pub fn absolute_offset(&self) -> usize {
        self.entry.relative_offset + self.table.start_offset
    }
}

impl Deref for PositionedEntry<'_> {
    type Target = StringTableEntry;

    fn deref(&self) -> &Self::Target {
        self.entry
    }
}

/// An immutable, ordered list of NUL-terminated strings starting at a fixed
/// file offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringTable {
    entries: Vec<StringTableEntry>,
    start_offset: usize,
    total_length: usize,
}

impl StringTable {
    /// Lays out `strings` back to back, each followed by one NUL byte.
    ///
    /// Fails with [`Error::InvalidOffset`] when `start_offset` is negative.
    pub fn new<I, S>(strings: I, start_offset: i64) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<Vec<u8>>,
    {
        if start_offset < 0 {
            return Err(Error::InvalidOffset(start_offset));
        }
        let start_offset = usize::try_from(start_offset)
            .map_err(|_| Error::OffsetOverflow(start_offset.unsigned_abs()))?;

        let mut cursor = 0;
        let entries = strings
            .into_iter()
            .map(|string| {
                let entry = StringTableEntry {
                    content: string.into(),
                    relative_offset: cursor,
                };
                cursor += entry.slot_len();
                entry
            })
            .collect();

        Ok(Self {
            entries,
            start_offset,
            total_length: cursor,
        })
    }

    /// Returns a new builder for a table.
    pub fn builder() -> StringTableBuilder {
        StringTableBuilder::new()
    }

    /// Number of entries.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Offset in bytes at which the table body starts in the file.
    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    /// Length of the table body in bytes, one NUL per entry included.
    pub fn total_length(&self) -> usize {
        self.total_length
    }

    /// Offset of the first byte after the table body.
    pub fn end_offset(&self) -> usize {
        self.start_offset + self.total_length
    }

    pub fn entries(&self) -> &[StringTableEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<PositionedEntry<'_>> {
        self.entries.get(index).map(|entry| PositionedEntry {
            entry,
            table: self,
        })
    }

    /// Iterates over the entries in table order together with their absolute offsets.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = PositionedEntry<'_>> + '_ {
        self.entries.iter().map(move |entry| PositionedEntry {
            entry,
            table: self,
        })
    }

    /// The exact on-disk table body.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.total_length);
        for entry in &self.entries {
            bytes.extend_from_slice(&entry.content);
            bytes.push(NUL_BYTE);
        }
        bytes
    }
}

/// Accumulates strings for a [`StringTable`].
///
/// ```rust
/// use mocodec::table::StringTableBuilder;
///
/// let table = StringTableBuilder::new()
///     .add("Hello")
///     .add("World")
///     .with_offset(28)
///     .build()?;
/// assert_eq!(table.to_bytes(), b"Hello\0World\0");
/// assert_eq!(table.entry(1).map(|e| e.absolute_offset()), Some(34));
/// # Ok::<(), mocodec::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringTableBuilder {
    strings: Vec<Vec<u8>>,
    offset: i64,
}

impl StringTableBuilder {
    /// Creates an empty builder with a start offset of 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a string to the table.
    pub fn add(&mut self, string: impl Into<Vec<u8>>) -> &mut Self {
        self.strings.push(string.into());
        self
    }

    /// Sets the offset in bytes at which the table starts.
    pub fn with_offset(&mut self, offset: i64) -> &mut Self {
        self.offset = offset;
        self
    }

    /// Builds a table from a snapshot of the strings added so far.
    ///
    /// May be called more than once; every call returns an independent table.
    pub fn build(&self) -> Result<StringTable, Error> {
        StringTable::new(self.strings.iter().cloned(), self.offset)
    }
}
