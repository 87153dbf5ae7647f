//! Generation of GNU gettext Machine Object (`.mo`) files.
//!
//! File layout (all header fields are 32-bit words in the chosen byte order):
//!
//! ```text
//! offset 0:      magic = 0x950412de
//! offset 4:      revision = 0
//! offset 8:      N, the number of strings
//! offset 12:     offset of the original-string descriptors (28)
//! offset 16:     offset of the translation-string descriptors (28 + 8N)
//! offset 20:     hash table size (always 0)
//! offset 24:     hash table offset (28 + 16N)
//! offset 28:     N x (length, offset) for the original strings
//! offset 28+8N:  N x (length, offset) for the translated strings
//! offset 28+16N: original strings, each NUL-terminated
//! then:          translated strings, each NUL-terminated
//! ```
//!
//! See <https://www.gnu.org/software/gettext/manual/html_node/MO-Files.html>.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    error::Error,
    table::{StringTable, StringTableBuilder},
    types::{TextDomain, Translation},
    writer::{BinaryWriter, ByteOrder, ByteSink, FileSink, MemorySink},
};

/// Magic number identifying an MO file, written in the file's byte order.
pub const MAGIC_NUMBER: u32 = 0x950412de;

/// The file format revision.
pub const REVISION: u32 = 0;

/// Size of the fixed header: seven 32-bit words.
pub const HEADER_SIZE: usize = 7 * 4;

/// Size of one (length, offset) descriptor.
pub const DESCRIPTOR_SIZE: usize = 4 + 4;

/// Separates a context from its original string.
pub const EOT_BYTE: u8 = 0x04;

/// Separates plural parts within one table entry.
pub const NUL_BYTE: u8 = 0x00;

/// Every header value of an MO file plus where the string bodies land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoLayout {
    pub count: u32,
    pub original_table_offset: u32,
    pub translation_table_offset: u32,
    pub hash_table_size: u32,
    pub hash_table_offset: u32,
    pub original_strings_offset: u32,
    pub translation_strings_offset: u32,
    pub file_size: u32,
}

/// Builds MO files from text domains.
///
/// # Example
///
/// ```rust
/// use mocodec::{MoGenerator, TextDomain, Translation};
///
/// let domain = TextDomain::new("messages", vec![Translation::new("Hello", "Bonjour")]);
/// let bytes = MoGenerator::new().generate_bytes(&domain)?;
/// assert_eq!(&bytes[..4], &[0xde, 0x12, 0x04, 0x95]);
/// assert!(bytes.ends_with(b"Hello\0Bonjour\0"));
/// # Ok::<(), mocodec::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoGenerator {
    byte_order: ByteOrder,
}

/// The two string tables of one domain, placed at their final offsets.
struct Tables {
    layout: MoLayout,
    originals: StringTable,
    translations: StringTable,
}

impl MoGenerator {
    /// Creates a generator that writes little-endian files.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Computes the layout of the MO file for `domain` without writing anything.
    pub fn layout(&self, domain: &TextDomain) -> Result<MoLayout, Error> {
        Ok(self.tables(domain)?.layout)
    }

    /// Writes the MO file for `domain` to `sink`.
    ///
    /// The sink is closed exactly once, whether or not writing succeeded.
    /// On failure the sink holds an incomplete file that must be discarded.
    pub fn generate<S: ByteSink>(&self, domain: &TextDomain, sink: S) -> Result<MoLayout, Error> {
        let mut writer = BinaryWriter::new(sink, self.byte_order);
        let written = self
            .tables(domain)
            .and_then(|tables| self.write_tables(&tables, &mut writer).map(|()| tables.layout));
        let closed = writer.close();

        let layout = written?;
        closed?;
        debug_assert_eq!(writer.position(), layout.file_size as usize);
        info!(
            domain = domain.name(),
            count = layout.count,
            bytes = layout.file_size,
            "generated MO file"
        );
        Ok(layout)
    }

    /// Generates the MO file for `domain` in memory.
    pub fn generate_bytes(&self, domain: &TextDomain) -> Result<Vec<u8>, Error> {
        let mut sink = MemorySink::new();
        self.generate(domain, &mut sink)?;
        Ok(sink.into_inner())
    }

    /// Generates the MO file for `domain` at `path`, replacing any existing file.
    pub fn generate_file<P: AsRef<Path>>(
        &self,
        domain: &TextDomain,
        path: P,
    ) -> Result<MoLayout, Error> {
        let sink = FileSink::create(path.as_ref())?;
        let layout = self.generate(domain, sink)?;
        debug!(path = %path.as_ref().display(), "wrote MO file");
        Ok(layout)
    }

    fn tables(&self, domain: &TextDomain) -> Result<Tables, Error> {
        let count = domain.count();
        let descriptors_size = count * DESCRIPTOR_SIZE;

        let original_table_offset = HEADER_SIZE;
        let translation_table_offset = original_table_offset + descriptors_size;
        let hash_table_offset = translation_table_offset + descriptors_size;
        let hash_table_size = 0;

        let originals = original_table(domain.translations(), hash_table_offset + hash_table_size * 4)?;
        let translations = translation_table(domain.translations(), originals.end_offset())?;

        let layout = MoLayout {
            count: to_u32(count)?,
            original_table_offset: to_u32(original_table_offset)?,
            translation_table_offset: to_u32(translation_table_offset)?,
            hash_table_size: to_u32(hash_table_size)?,
            hash_table_offset: to_u32(hash_table_offset)?,
            original_strings_offset: to_u32(originals.start_offset())?,
            translation_strings_offset: to_u32(translations.start_offset())?,
            file_size: to_u32(translations.end_offset())?,
        };
        debug!(domain = domain.name(), ?layout, "computed MO layout");

        Ok(Tables {
            layout,
            originals,
            translations,
        })
    }

    fn write_tables<S: ByteSink>(
        &self,
        tables: &Tables,
        writer: &mut BinaryWriter<S>,
    ) -> Result<(), Error> {
        let layout = &tables.layout;
        writer.write_u32(MAGIC_NUMBER)?;
        writer.write_u32(REVISION)?;
        writer.write_u32(layout.count)?;
        writer.write_u32(layout.original_table_offset)?;
        writer.write_u32(layout.translation_table_offset)?;
        writer.write_u32(layout.hash_table_size)?;
        writer.write_u32(layout.hash_table_offset)?;

        write_descriptors(&tables.originals, writer)?;
        write_descriptors(&tables.translations, writer)?;

        writer.write_bytes(&tables.originals.to_bytes())?;
        writer.write_bytes(&tables.translations.to_bytes())?;
        writer.flush()
    }
}

/// The original-side string of one record: `[context EOT] original [NUL translated]`.
pub fn original_string(translation: &Translation) -> Vec<u8> {
    let mut bytes = Vec::new();
    if translation.has_context() {
        bytes.extend_from_slice(translation.context().as_bytes());
        bytes.push(EOT_BYTE);
    }
    bytes.extend_from_slice(translation.original().as_bytes());
    if translation.is_plural() {
        bytes.push(NUL_BYTE);
        bytes.extend_from_slice(translation.translated().as_bytes());
    }
    bytes
}

/// The translation-side string of one record: `translated [NUL form0 NUL form1 ...]`.
pub fn translation_string(translation: &Translation) -> Vec<u8> {
    let mut bytes = translation.translated().as_bytes().to_vec();
    if let Some(forms) = translation.plural_forms() {
        bytes.push(NUL_BYTE);
        bytes.extend_from_slice(forms.join("\0").as_bytes());
    }
    bytes
}

fn original_table(translations: &[Translation], offset: usize) -> Result<StringTable, Error> {
    let mut builder = StringTableBuilder::new();
    builder.with_offset(to_i64(offset)?);
    for translation in translations {
        builder.add(original_string(translation));
    }
    builder.build()
}

fn translation_table(translations: &[Translation], offset: usize) -> Result<StringTable, Error> {
    let mut builder = StringTableBuilder::new();
    builder.with_offset(to_i64(offset)?);
    for translation in translations {
        builder.add(translation_string(translation));
    }
    builder.build()
}

fn write_descriptors<S: ByteSink>(
    table: &StringTable,
    writer: &mut BinaryWriter<S>,
) -> Result<(), Error> {
    for entry in table.iter() {
        writer.write_u32(to_u32(entry.len())?)?;
        writer.write_u32(to_u32(entry.absolute_offset())?)?;
    }
    Ok(())
}

fn to_u32(value: usize) -> Result<u32, Error> {
    u32::try_from(value).map_err(|_| Error::OffsetOverflow(value as u64))
}

fn to_i64(value: usize) -> Result<i64, Error> {
    i64::try_from(value).map_err(|_| Error::OffsetOverflow(value as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(bytes: &[u8]) -> Vec<u32> {
        bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }

    #[test]
    fn test_empty_domain_is_header_only() {
        let bytes = MoGenerator::new()
            .generate_bytes(&TextDomain::new("empty", vec![]))
            .unwrap();
        assert_eq!(bytes.len(), HEADER_SIZE);
        assert_eq!(words(&bytes), vec![MAGIC_NUMBER, 0, 0, 28, 28, 0, 28]);
    }

    #[test]
    fn test_plain_translation_layout() {
        let domain = TextDomain::new("d", vec![Translation::new("Hello", "Bonjour")]);
        let bytes = MoGenerator::new().generate_bytes(&domain).unwrap();

        assert_eq!(words(&bytes[..28]), vec![MAGIC_NUMBER, 0, 1, 28, 36, 0, 44]);
        // original descriptor, then translation descriptor
        assert_eq!(words(&bytes[28..44]), vec![5, 44, 7, 50]);
        assert_eq!(&bytes[44..], b"Hello\0Bonjour\0");
    }

    #[test]
    fn test_plural_strings() {
        let t = Translation::plural("file", "file", ["file", "files"]);
        assert_eq!(original_string(&t), b"file\0file");
        assert_eq!(translation_string(&t), b"file\0file\0files");
    }

    #[test]
    fn test_context_strings() {
        let t = Translation::new("Open", "Ouvrir").with_context("menu");
        assert_eq!(original_string(&t), b"menu\x04Open");
        assert_eq!(translation_string(&t), b"Ouvrir");
    }

    #[test]
    fn test_context_and_plural_combined() {
        let t = Translation::plural("day", "jour", ["jour", "jours"]).with_context("calendar");
        assert_eq!(original_string(&t), b"calendar\x04day\0jour");
        assert_eq!(translation_string(&t), b"jour\0jour\0jours");
    }

    #[test]
    fn test_empty_plural_forms_append_single_separator() {
        let t = Translation::new("a", "b").with_plural_forms(Vec::<String>::new());
        assert_eq!(original_string(&t), b"a\0b");
        assert_eq!(translation_string(&t), b"b\0");
    }

    #[test]
    fn test_layout_matches_generated_size() {
        let domain = TextDomain::new(
            "d",
            vec![
                Translation::new("a", "b"),
                Translation::new("Open", "Ouvrir").with_context("menu"),
            ],
        );
        let generator = MoGenerator::new();
        let layout = generator.layout(&domain).unwrap();
        let bytes = generator.generate_bytes(&domain).unwrap();

        assert_eq!(layout.file_size as usize, bytes.len());
        assert_eq!(layout.original_strings_offset, 28 + 16 * 2);
        assert_eq!(layout.translation_strings_offset, 60 + 2 + 10);
    }

    #[test]
    fn test_big_endian_header() {
        let bytes = MoGenerator::new()
            .with_byte_order(ByteOrder::Big)
            .generate_bytes(&TextDomain::default())
            .unwrap();
        assert_eq!(&bytes[..8], &[0x95, 0x04, 0x12, 0xde, 0, 0, 0, 0]);
        assert_eq!(&bytes[12..16], &[0, 0, 0, 28]);
    }

    struct FailingSink {
        closes: usize,
    }

    impl ByteSink for FailingSink {
        fn write(&mut self, _bytes: &[u8]) -> Result<(), Error> {
            Err(Error::Io(std::io::Error::other("disk full")))
        }

        fn flush(&mut self) -> Result<(), Error> {
            Ok(())
        }

        fn close(&mut self) -> Result<(), Error> {
            self.closes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_still_closes_sink_once() {
        let mut sink = FailingSink { closes: 0 };
        let err = MoGenerator::new()
            .generate(&TextDomain::default(), &mut sink)
            .unwrap_err();
        assert!(err.is_io());
        assert_eq!(sink.closes, 1);
    }

    #[test]
    fn test_generate_closes_memory_sink() {
        let mut sink = MemorySink::new();
        MoGenerator::new()
            .generate(&TextDomain::default(), &mut sink)
            .unwrap();
        assert!(sink.is_closed());
        assert_eq!(sink.bytes().len(), HEADER_SIZE);
    }
}
