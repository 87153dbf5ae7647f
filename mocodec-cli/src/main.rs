use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mocodec::{ByteOrder, formats::FormatType};
use mocodec_cli::{
    CompileOptions,
    compile::run_compile_command,
    convert::run_convert_command,
    layout::run_layout_command,
    parse_byte_order, parse_format, parse_lang,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log what the generator does (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile JSON or CSV text domains into MO files.
    Compile {
        /// The input files to compile
        #[arg(short, long = "input", required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,

        /// The output file (single input only)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory receiving `<domain>.mo` files (defaults to the current directory)
        #[arg(short = 'd', long)]
        out_dir: Option<PathBuf>,

        /// Write into `<out-dir>/<lang>/LC_MESSAGES/`
        #[arg(short, long, value_parser = parse_lang)]
        lang: Option<String>,

        /// Input format, when it cannot be inferred from the extension (json, csv)
        #[arg(short, long, value_parser = parse_format)]
        format: Option<FormatType>,

        /// Byte order of the generated files (little, big)
        #[arg(short, long, value_parser = parse_byte_order, default_value = "little")]
        endianness: ByteOrder,
    },

    /// Rewrite a JSON domain as CSV rows, or CSV rows as a JSON domain.
    Convert {
        /// The input file
        #[arg(short, long)]
        input: PathBuf,

        /// The output file
        #[arg(short, long)]
        output: PathBuf,

        /// Input format, when it cannot be inferred from the extension (json, csv)
        #[arg(long, value_parser = parse_format)]
        input_format: Option<FormatType>,

        /// Output format, when it cannot be inferred from the extension (json, csv)
        #[arg(long, value_parser = parse_format)]
        output_format: Option<FormatType>,
    },

    /// Print the computed MO layout of a text domain as JSON.
    Layout {
        /// The input file to inspect
        #[arg(short, long)]
        input: PathBuf,

        /// Input format, when it cannot be inferred from the extension (json, csv)
        #[arg(short, long, value_parser = parse_format)]
        format: Option<FormatType>,

        /// Byte order to compute the layout for (little, big)
        #[arg(short, long, value_parser = parse_byte_order, default_value = "little")]
        endianness: ByteOrder,
    },
}

fn init_tracing(verbose: bool) {
    let default_directives = if verbose {
        "mocodec=debug,mocodec_cli=debug"
    } else {
        "mocodec=warn,mocodec_cli=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.commands {
        Commands::Compile {
            inputs,
            output,
            out_dir,
            lang,
            format,
            endianness,
        } => {
            let options = CompileOptions {
                output,
                out_dir,
                lang,
                format,
                byte_order: endianness,
            };
            if !run_compile_command(inputs, options) {
                std::process::exit(1);
            }
        }
        Commands::Convert {
            input,
            output,
            input_format,
            output_format,
        } => {
            if !run_convert_command(&input, &output, input_format, output_format) {
                std::process::exit(1);
            }
        }
        Commands::Layout {
            input,
            format,
            endianness,
        } => {
            if !run_layout_command(&input, format, endianness) {
                std::process::exit(1);
            }
        }
    }
}
