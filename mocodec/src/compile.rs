//! One-call helpers that read a domain source file and write its MO file,
//! or rewrite it in the other source format.

use std::path::Path;

use tracing::debug;

use crate::{
    error::Error,
    formats::{CsvRecord, FormatType, infer_format_from_path},
    generator::{MoGenerator, MoLayout},
    traits::Parser,
    types::TextDomain,
};

/// Reads a text domain from `path`.
///
/// The format is inferred from the extension unless given. When the source
/// carries no domain name, the file stem is used.
pub fn load_domain<P: AsRef<Path>>(path: P, format: Option<FormatType>) -> Result<TextDomain, Error> {
    let path = path.as_ref();
    let format = resolve_format(path, format)?;

    let mut domain = match format {
        FormatType::Json => TextDomain::read_from(path)?,
        FormatType::Csv => TextDomain::from(Vec::<CsvRecord>::read_from(path)?),
    };

    if domain.name.is_empty() {
        domain.name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
    }
    debug!(
        path = %path.display(),
        %format,
        domain = domain.name(),
        count = domain.count(),
        "loaded text domain"
    );
    Ok(domain)
}

fn resolve_format(path: &Path, format: Option<FormatType>) -> Result<FormatType, Error> {
    match format {
        Some(format) => Ok(format),
        None => infer_format_from_path(path).ok_or_else(|| {
            Error::UnknownFormat(format!(
                "cannot infer format from file extension: {:?}",
                path.extension()
            ))
        }),
    }
}

/// Rewrites the domain source `input` as `output`, in the format given or
/// inferred from each extension. Returns the domain that was written.
///
/// CSV rows carry no domain name, so a JSON file written from CSV takes the
/// input's file stem as its name.
pub fn convert_domain<I: AsRef<Path>, O: AsRef<Path>>(
    input: I,
    output: O,
    input_format: Option<FormatType>,
    output_format: Option<FormatType>,
) -> Result<TextDomain, Error> {
    let output = output.as_ref();
    let output_format = resolve_format(output, output_format)?;
    let domain = load_domain(input, input_format)?;

    match output_format {
        FormatType::Json => domain.write_to(output)?,
        FormatType::Csv => Vec::<CsvRecord>::from(&domain).write_to(output)?,
    }
    debug!(
        output = %output.display(),
        format = %output_format,
        count = domain.count(),
        "wrote text domain"
    );
    Ok(domain)
}

/// Compiles `input` to the MO file `output` with default settings.
///
/// ```rust,no_run
/// mocodec::compile("locale/fr/messages.json", "locale/fr/LC_MESSAGES/messages.mo")?;
/// # Ok::<(), mocodec::Error>(())
/// ```
pub fn compile<I: AsRef<Path>, O: AsRef<Path>>(input: I, output: O) -> Result<MoLayout, Error> {
    compile_with(&MoGenerator::new(), input, output, None)
}

/// Compiles `input` to `output` with an explicit generator and optional input format.
pub fn compile_with<I: AsRef<Path>, O: AsRef<Path>>(
    generator: &MoGenerator,
    input: I,
    output: O,
    format: Option<FormatType>,
) -> Result<MoLayout, Error> {
    let domain = load_domain(input, format)?;
    generator.generate_file(&domain, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_json_uses_file_stem_when_unnamed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shop.json");
        std::fs::write(&path, r#"{"translations":[{"original":"Buy","translated":"Acheter"}]}"#)
            .unwrap();

        let domain = load_domain(&path, None).unwrap();
        assert_eq!(domain.name(), "shop");
        assert_eq!(domain.count(), 1);
    }

    #[test]
    fn test_load_json_keeps_explicit_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fr.json");
        std::fs::write(&path, r#"{"name":"messages","translations":[]}"#).unwrap();

        assert_eq!(load_domain(&path, None).unwrap().name(), "messages");
    }

    #[test]
    fn test_load_with_explicit_format_ignores_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rows.txt");
        std::fs::write(&path, ",a,b\n").unwrap();

        assert!(load_domain(&path, None).is_err());
        let domain = load_domain(&path, Some(FormatType::Csv)).unwrap();
        assert_eq!(domain.name(), "rows");
        assert_eq!(domain.translations()[0].translated(), "b");
    }

    #[test]
    fn test_load_utf16_csv_with_bom() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("utf16.csv");
        let mut bytes = vec![0xff, 0xfe];
        for unit in ",Café,Kaffee\n".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        std::fs::write(&path, bytes).unwrap();

        let domain = load_domain(&path, None).unwrap();
        assert_eq!(domain.translations()[0].original(), "Café");
    }

    #[test]
    fn test_compile_writes_mo_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("messages.csv");
        let output = dir.path().join("messages.mo");
        std::fs::write(&input, ",Hello,Bonjour\n").unwrap();

        let layout = compile(&input, &output).unwrap();
        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(bytes.len(), layout.file_size as usize);
        assert!(bytes.ends_with(b"Hello\0Bonjour\0"));
    }

    #[test]
    fn test_convert_csv_to_json_and_back() {
        let dir = TempDir::new().unwrap();
        let csv = dir.path().join("shop.csv");
        let json = dir.path().join("shop.json");
        let back = dir.path().join("back.csv");
        std::fs::write(&csv, ",Buy,Acheter\nmenu,Open,Ouvrir\n,item,article,article,articles\n")
            .unwrap();

        let domain = convert_domain(&csv, &json, None, None).unwrap();
        assert_eq!(domain.count(), 3);
        let reloaded = load_domain(&json, None).unwrap();
        assert_eq!(reloaded, domain);
        assert_eq!(reloaded.name(), "shop");
        assert!(reloaded.translations()[2].is_plural());

        convert_domain(&json, &back, None, None).unwrap();
        assert_eq!(
            std::fs::read_to_string(&back).unwrap(),
            ",Buy,Acheter\nmenu,Open,Ouvrir\n,item,article,article,articles\n"
        );
    }

    #[test]
    fn test_convert_rejects_unknown_output_extension_before_reading() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("messages.po");

        let err = convert_domain(dir.path().join("missing.csv"), &output, None, None).unwrap_err();
        assert!(matches!(err, Error::UnknownFormat(_)));
        assert!(!output.exists());

        let explicit = convert_domain(
            dir.path().join("missing.csv"),
            &output,
            None,
            Some(FormatType::Json),
        )
        .unwrap_err();
        assert!(explicit.is_io());
    }
}
