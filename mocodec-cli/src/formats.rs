use std::str::FromStr;

use mocodec::{ByteOrder, formats::FormatType};
use unic_langid::LanguageIdentifier;

/// Parse an input format name, with helpful error messages.
pub fn parse_format(s: &str) -> Result<FormatType, String> {
    FormatType::from_str(s)
        .map_err(|_| format!("Unknown input format: '{}'. Supported formats: json, csv", s))
}

/// Parse a byte order name (`little`/`le` or `big`/`be`).
pub fn parse_byte_order(s: &str) -> Result<ByteOrder, String> {
    ByteOrder::from_str(s).map_err(|e| e.to_string())
}

/// Validate a locale directory name such as `fr`, `pt_BR` or `sr-Latn`.
///
/// The name is returned unchanged, since gettext locale trees keep the
/// spelling the project chose.
pub fn parse_lang(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("Language code cannot be empty".to_string());
    }
    trimmed
        .parse::<LanguageIdentifier>()
        .map(|_| trimmed.to_string())
        .map_err(|e| format!("Invalid language code '{}': {}", trimmed, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format_case_insensitive() {
        assert_eq!(parse_format("JSON"), Ok(FormatType::Json));
        assert_eq!(parse_format("csv"), Ok(FormatType::Csv));
    }

    #[test]
    fn test_parse_format_invalid() {
        let err = parse_format("po").unwrap_err();
        assert!(err.contains("Unknown input format"));
    }

    #[test]
    fn test_parse_byte_order() {
        assert_eq!(parse_byte_order("be"), Ok(ByteOrder::Big));
        assert!(parse_byte_order("sideways").is_err());
    }

    #[test]
    fn test_parse_lang_keeps_spelling() {
        assert_eq!(parse_lang("pt_BR"), Ok("pt_BR".to_string()));
        assert_eq!(parse_lang(" fr "), Ok("fr".to_string()));
        assert!(parse_lang("").is_err());
        assert!(parse_lang("not a language").is_err());
    }
}
