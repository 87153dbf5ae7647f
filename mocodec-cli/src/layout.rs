use std::path::Path;

use mocodec::{ByteOrder, Error, MoGenerator, formats::FormatType, load_domain};

/// Computes the MO layout of `input` and renders it as pretty JSON.
pub fn layout_report(
    input: &Path,
    format: Option<FormatType>,
    byte_order: ByteOrder,
) -> Result<String, Error> {
    let domain = load_domain(input, format)?;
    let layout = MoGenerator::new()
        .with_byte_order(byte_order)
        .layout(&domain)?;
    let report = serde_json::json!({
        "domain": domain.name(),
        "byte_order": byte_order,
        "layout": layout,
    });
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Run the layout command: print the report and return whether it could be computed.
pub fn run_layout_command(input: &Path, format: Option<FormatType>, byte_order: ByteOrder) -> bool {
    match layout_report(input, format, byte_order) {
        Ok(report) => {
            println!("{}", report);
            true
        }
        Err(e) => {
            eprintln!("❌ {}", input.display());
            eprintln!("Error: {}", e);
            false
        }
    }
}
