//! Core translation types for mocodec.
//! Input formats decode into these; the MO generator consumes them read-only.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{error::Error, traits::Parser};

/// A named collection of translations sharing one MO file.
///
/// The order of `translations` is the on-disk table order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct TextDomain {
    /// The domain name (e.g. "messages"); also the default output file stem.
    #[serde(default)]
    pub name: String,

    /// Ordered list of all translations in this domain.
    #[serde(default)]
    pub translations: Vec<Translation>,
}

impl TextDomain {
    pub fn new(name: impl Into<String>, translations: Vec<Translation>) -> Self {
        Self {
            name: name.into(),
            translations,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn translations(&self) -> &[Translation] {
        &self.translations
    }

    /// Number of translations in this domain.
    pub fn count(&self) -> usize {
        self.translations.len()
    }

    pub fn add_translation(&mut self, translation: Translation) {
        self.translations.push(translation);
    }
}

impl Parser for TextDomain {
    /// Parse a JSON domain document from any reader.
    fn from_reader<R: std::io::BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }

    /// Write the domain as pretty JSON.
    fn to_writer<W: std::io::Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut writer, self).map_err(Error::Parse)
    }
}

/// A single translation record.
///
/// A record with `plural_forms` set is a plural translation: `translated`
/// then holds the singular target form and `plural_forms` every numbered
/// form, index 0 included.
///
/// None of the strings may contain NUL (`0x00`) bytes, and `context` may not
/// contain EOT (`0x04`); the MO encoding uses both as separators and does not
/// escape them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Translation {
    /// The source string (`msgid`).
    pub original: String,

    /// The target string (`msgstr`, or `msgstr[0]`'s canonical singular for plurals).
    pub translated: String,

    /// Disambiguating context (`msgctxt`); empty means none.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub context: String,

    /// All numbered target forms for plural translations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural_forms: Option<Vec<String>>,
}

impl Translation {
    pub fn new(original: impl Into<String>, translated: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            translated: translated.into(),
            context: String::new(),
            plural_forms: None,
        }
    }

    /// Creates a plural translation.
    pub fn plural<I, S>(original: impl Into<String>, translated: impl Into<String>, forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(original, translated).with_plural_forms(forms)
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn with_plural_forms<I, S>(mut self, forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.plural_forms = Some(forms.into_iter().map(Into::into).collect());
        self
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn translated(&self) -> &str {
        &self.translated
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn has_context(&self) -> bool {
        !self.context.is_empty()
    }

    pub fn plural_forms(&self) -> Option<&[String]> {
        self.plural_forms.as_deref()
    }

    pub fn is_plural(&self) -> bool {
        self.plural_forms.is_some()
    }
}

impl Display for Translation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.has_context() {
            write!(f, "[{}] ", self.context)?;
        }
        write!(f, "{} => {}", self.original, self.translated)?;
        if let Some(forms) = &self.plural_forms {
            write!(f, " ({} plural forms)", forms.len())?;
        }
        Ok(())
    }
}
