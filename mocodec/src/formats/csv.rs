//! Support for CSV text domains.
//!
//! Rows have no header and a variable number of columns:
//! `context,original,translated[,form0,form1,...]`. A row with plural form
//! columns becomes a plural translation; an empty context column means no
//! context.
use std::io::BufRead;

use crate::{
    error::Error,
    traits::Parser,
    types::{TextDomain, Translation},
};

/// One row of a CSV domain file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRecord {
    pub context: String,
    pub original: String,
    pub translated: String,
    pub plural_forms: Vec<String>,
}

impl Parser for Vec<CsvRecord> {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let mut records = Vec::new();
        for (index, result) in rdr.records().enumerate() {
            let row = result?;
            if row.len() < 3 {
                return Err(Error::DataMismatch(format!(
                    "CSV row {} has {} column(s); expected context,original,translated[,plural forms...]",
                    index + 1,
                    row.len()
                )));
            }
            records.push(CsvRecord {
                context: row[0].to_string(),
                original: row[1].to_string(),
                translated: row[2].to_string(),
                plural_forms: row.iter().skip(3).map(str::to_string).collect(),
            });
        }
        Ok(records)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: std::io::Write>(&self, writer: W) -> Result<(), Error> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(writer);
        for record in self {
            let mut row = vec![
                record.context.as_str(),
                record.original.as_str(),
                record.translated.as_str(),
            ];
            row.extend(record.plural_forms.iter().map(String::as_str));
            wtr.write_record(&row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl From<CsvRecord> for Translation {
    fn from(record: CsvRecord) -> Self {
        let translation =
            Translation::new(record.original, record.translated).with_context(record.context);
        if record.plural_forms.is_empty() {
            translation
        } else {
            translation.with_plural_forms(record.plural_forms)
        }
    }
}

/// Plural translations without forms are written as plain rows.
impl From<&Translation> for CsvRecord {
    fn from(translation: &Translation) -> Self {
        CsvRecord {
            context: translation.context().to_string(),
            original: translation.original().to_string(),
            translated: translation.translated().to_string(),
            plural_forms: translation.plural_forms().map(<[String]>::to_vec).unwrap_or_default(),
        }
    }
}

/// The domain name is left empty; CSV files carry none.
impl From<Vec<CsvRecord>> for TextDomain {
    fn from(records: Vec<CsvRecord>) -> Self {
        TextDomain::new(
            String::new(),
            records.into_iter().map(Translation::from).collect(),
        )
    }
}

impl From<&TextDomain> for Vec<CsvRecord> {
    fn from(domain: &TextDomain) -> Self {
        domain.translations().iter().map(CsvRecord::from).collect()
    }
}
