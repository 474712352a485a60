//! Field normalization for MDRM source records.
//!
//! Turns raw CSV records into [`CatalogRow`]s: header cleanup, date
//! parsing, HTML entity decoding of free text and synthesis of the MDRM
//! identifier. Everything here is a pure transform; problems in individual
//! values become nulls and never errors.

use crate::config::{CatalogField, ColumnSpec};
use crate::constants::{AMPERSAND_ENTITY, CARRIAGE_RETURN_ENTITY, DATE_FORMATS, DATE_ONLY_FORMATS};
use crate::models::{CatalogRow, NormalizeStats};
use crate::schema::ColumnLayout;
use crate::source::SourceTable;
use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use tracing::{debug, warn};

/// Strip surrounding whitespace and trailing commas from a header name
pub fn clean_header(name: &str) -> String {
    name.trim().trim_end_matches(',').to_string()
}

/// Parse an MDRM date, returning `None` for anything unrecognised
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.date());
        }
    }

    DATE_ONLY_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// Decode the carriage-return and ampersand entities, then trim
pub fn decode_text(value: &str) -> String {
    value
        .replace(CARRIAGE_RETURN_ENTITY, "\n")
        .replace(AMPERSAND_ENTITY, "&")
        .trim()
        .to_string()
}

/// Build the MDRM identifier from the raw mnemonic and item code
pub fn synthesize_identifier(mnemonic: &str, item_code: &str) -> String {
    format!("{}{}", mnemonic, item_code)
}

/// Converts raw records into catalog rows using a resolved column layout
#[derive(Debug, Clone)]
pub struct Normalizer {
    layout: ColumnLayout,
}

impl Normalizer {
    pub fn new(layout: ColumnLayout) -> Self {
        Self { layout }
    }

    /// Clean the table's header row and resolve `spec` against it
    pub fn for_table(spec: &ColumnSpec, table: &SourceTable) -> Self {
        let headers: Vec<String> = table.headers.iter().map(|h| clean_header(h)).collect();
        debug!("Cleaned headers: {:?}", headers);

        let layout = ColumnLayout::resolve(spec, &headers);
        let absent = layout.absent_fields();
        if !absent.is_empty() {
            debug!("Fields without a source column: {:?}", absent);
        }
        Self::new(layout)
    }

    /// Normalize one record
    ///
    /// Returns `None`, dropping the row from the load, when the record is
    /// too short to reach every mapped column or longer than the header.
    /// Short rows that only leave off unmapped trailing columns are kept.
    pub fn normalize(&self, record: &StringRecord, stats: &mut NormalizeStats) -> Option<CatalogRow> {
        stats.records_read += 1;

        if record.len() < self.layout.min_record_len() || record.len() > self.layout.header_len() {
            debug!(
                "Dropping record at line {:?}: {} fields, expected {}..={}",
                record.position().map(|p| p.line()),
                record.len(),
                self.layout.min_record_len(),
                self.layout.header_len()
            );
            stats.records_dropped += 1;
            return None;
        }

        let mdrm_identifier = if self.layout.can_synthesize_identifier() {
            let mnemonic = self.raw(record, CatalogField::Mnemonic).unwrap_or_default();
            let item_code = self.raw(record, CatalogField::ItemCode).unwrap_or_default();
            non_empty(synthesize_identifier(mnemonic, item_code))
        } else {
            None
        };

        let row = CatalogRow {
            mdrm_identifier,
            mnemonic: self.plain(record, CatalogField::Mnemonic),
            item_code: self.plain(record, CatalogField::ItemCode),
            start_date: self.date(record, CatalogField::StartDate, stats),
            end_date: self.date(record, CatalogField::EndDate, stats),
            item_name: self.text(record, CatalogField::ItemName),
            confidentiality: self.plain(record, CatalogField::Confidentiality),
            item_type: self.plain(record, CatalogField::ItemType),
            reporting_form: self.plain(record, CatalogField::ReportingForm),
            description: self.text(record, CatalogField::Description),
            series_glossary: self.text(record, CatalogField::SeriesGlossary),
        };

        stats.records_normalized += 1;
        Some(row)
    }

    /// Normalize every record in the table
    pub fn normalize_all(&self, table: &SourceTable) -> (Vec<CatalogRow>, NormalizeStats) {
        let mut stats = NormalizeStats::default();
        let rows: Vec<CatalogRow> = table
            .records
            .iter()
            .filter_map(|record| self.normalize(record, &mut stats))
            .collect();

        if stats.records_dropped > 0 {
            warn!(
                "Dropped {} of {} records whose fields did not line up with the header",
                stats.records_dropped, stats.records_read
            );
        }
        if stats.unparsed_dates > 0 {
            debug!("{} date values could not be parsed", stats.unparsed_dates);
        }

        (rows, stats)
    }

    fn raw<'r>(&self, record: &'r StringRecord, field: CatalogField) -> Option<&'r str> {
        self.layout
            .slot(field)
            .index()
            .and_then(|index| record.get(index))
    }

    fn plain(&self, record: &StringRecord, field: CatalogField) -> Option<String> {
        self.raw(record, field)
            .and_then(|value| non_empty(value.to_string()))
    }

    fn text(&self, record: &StringRecord, field: CatalogField) -> Option<String> {
        self.raw(record, field)
            .and_then(|value| non_empty(decode_text(value)))
    }

    fn date(
        &self,
        record: &StringRecord,
        field: CatalogField,
        stats: &mut NormalizeStats,
    ) -> Option<NaiveDate> {
        let value = self.raw(record, field)?;
        let parsed = parse_date(value);
        if parsed.is_none() && !value.trim().is_empty() {
            stats.unparsed_dates += 1;
        }
        parsed
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
