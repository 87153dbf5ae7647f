use std::path::Path;

use mocodec::{convert_domain, formats::FormatType};

/// Run the convert command: print a status line and return whether it succeeded.
pub fn run_convert_command(
    input: &Path,
    output: &Path,
    input_format: Option<FormatType>,
    output_format: Option<FormatType>,
) -> bool {
    if input == output {
        eprintln!("Error: input and output are the same file: {}", input.display());
        return false;
    }

    match convert_domain(input, output, input_format, output_format) {
        Ok(domain) => {
            println!(
                "✅ {} -> {} ({} translations)",
                input.display(),
                output.display(),
                domain.count()
            );
            true
        }
        Err(e) => {
            eprintln!("❌ {}", input.display());
            eprintln!("Error: {}", e);
            false
        }
    }
}
