//! CLI library for testing purposes

pub mod compile;
pub mod convert;
pub mod formats;
pub mod layout;

pub use compile::{CompileOptions, CompileOutcome, compile_inputs, output_path_for};
pub use convert::run_convert_command;
pub use formats::{parse_byte_order, parse_format, parse_lang};
pub use layout::layout_report;
