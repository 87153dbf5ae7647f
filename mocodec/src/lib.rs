#![forbid(unsafe_code)]
//! GNU gettext MO file generator for Rust.
//!
//! Turns a [`TextDomain`] (an ordered list of translations) into the binary
//! Machine Object format read by `gettext` and friends: a fixed header, two
//! descriptor tables and the NUL-terminated string bodies.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mocodec::{MoGenerator, TextDomain, Translation};
//!
//! let domain = TextDomain::new(
//!     "messages",
//!     vec![
//!         Translation::new("Hello", "Bonjour"),
//!         Translation::new("Open", "Ouvrir").with_context("menu"),
//!         Translation::plural("file", "fichier", ["fichier", "fichiers"]),
//!     ],
//! );
//! MoGenerator::new().generate_file(&domain, "messages.mo")?;
//!
//! // Or compile a JSON/CSV source file directly
//! mocodec::compile("fr/messages.json", "fr/LC_MESSAGES/messages.mo")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Input constraints
//!
//! Strings are copied into the file as-is. They must not contain NUL bytes,
//! and contexts must not contain EOT (`0x04`) bytes, since the format uses
//! both as separators.

pub mod compile;
pub mod error;
pub mod formats;
pub mod generator;
pub mod table;
pub mod traits;
pub mod types;
pub mod writer;

// Re-export most used types for easy consumption
pub use crate::{
    compile::{compile, compile_with, convert_domain, load_domain},
    error::Error,
    formats::FormatType,
    generator::{MoGenerator, MoLayout},
    table::{StringTable, StringTableBuilder, StringTableEntry},
    types::{TextDomain, Translation},
    writer::{BinaryWriter, ByteOrder, ByteSink, FileSink, MemorySink},
};
