//! MDRM source file reading.
//!
//! Loads the whole export into memory, decodes it (UTF-8 first, then a
//! single retry as Windows-1252), skips the descriptive preamble and splits
//! it into a header row and raw records.

use crate::error::{MdrmError, Result};
use csv::StringRecord;
use encoding_rs::WINDOWS_1252;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Raw tabular contents of an MDRM export
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub records: Vec<StringRecord>,
    pub encoding: &'static str,
}

impl SourceTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read an MDRM export, skipping `skip_lines` lines before the header row
pub fn read_source(path: &Path, skip_lines: usize) -> Result<SourceTable> {
    if !path.exists() {
        return Err(MdrmError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path)?;
    let (text, encoding) = decode_source(path, &bytes)?;
    parse_source(path, &text, skip_lines, encoding)
}

/// Decode raw bytes, retrying once as Windows-1252 when UTF-8 fails
pub fn decode_source(path: &Path, bytes: &[u8]) -> Result<(String, &'static str)> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    match std::str::from_utf8(bytes) {
        Ok(text) => Ok((text.to_string(), "UTF-8")),
        Err(e) => {
            warn!(
                "{} is not valid UTF-8 ({}), retrying as {}",
                path.display(),
                e,
                WINDOWS_1252.name()
            );
            let (text, had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
            if had_errors {
                return Err(MdrmError::Encoding {
                    path: path.to_path_buf(),
                    tried: format!("UTF-8 and {}", WINDOWS_1252.name()),
                });
            }
            Ok((text.into_owned(), WINDOWS_1252.name()))
        }
    }
}

fn parse_source(
    path: &Path,
    text: &str,
    skip_lines: usize,
    encoding: &'static str,
) -> Result<SourceTable> {
    let body = skip_leading_lines(text, skip_lines);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(MdrmError::InvalidFormat {
            path: path.to_path_buf(),
            reason: format!("no header row after skipping {} line(s)", skip_lines),
        });
    }

    let records = reader
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    debug!("Source headers: {:?}", headers);
    info!(
        "Loaded {} records from {} ({})",
        records.len(),
        path.display(),
        encoding
    );

    Ok(SourceTable {
        path: path.to_path_buf(),
        headers,
        records,
        encoding,
    })
}

/// Drop the first `count` lines of `text`
fn skip_leading_lines(text: &str, count: usize) -> &str {
    let mut rest = text;
    for _ in 0..count {
        match rest.find('\n') {
            Some(pos) => rest = &rest[pos + 1..],
            None => return "",
        }
    }
    rest
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_skip_leading_lines() {
        assert_eq!(skip_leading_lines("PUBLIC\na,b\n1,2\n", 1), "a,b\n1,2\n");
        assert_eq!(skip_leading_lines("a,b\n", 0), "a,b\n");
        assert_eq!(skip_leading_lines("PUBLIC", 1), "");
    }

    #[test]
    fn test_read_utf8_source() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "PUBLIC").unwrap();
        writeln!(file, "Mnemonic,Item Code,Item Name").unwrap();
        writeln!(file, "RCON,2170,TOTAL ASSETS").unwrap();
        writeln!(file, "RCFD,0010,\"CASH, DUE FROM BANKS\"").unwrap();

        let table = read_source(file.path(), 1).unwrap();

        assert_eq!(table.encoding, "UTF-8");
        assert_eq!(table.headers, vec!["Mnemonic", "Item Code", "Item Name"]);
        assert_eq!(table.len(), 2);
        assert_eq!(&table.records[1][2], "CASH, DUE FROM BANKS");
    }

    #[test]
    fn test_read_source_strips_bom() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"\xEF\xBB\xBFPUBLIC\nMnemonic\nRCON\n").unwrap();

        let table = read_source(file.path(), 1).unwrap();
        assert_eq!(table.headers, vec!["Mnemonic"]);
    }

    #[test]
    fn test_latin1_fallback() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"PUBLIC\nMnemonic,Item Name\nRCON,CAF\xC9 LOANS\n")
            .unwrap();

        let table = read_source(file.path(), 1).unwrap();

        assert_eq!(table.encoding, "windows-1252");
        assert_eq!(&table.records[0][1], "CAF\u{c9} LOANS");
    }

    #[test]
    fn test_missing_source() {
        let result = read_source(Path::new("/definitely/not/here/MDRM_CSV.csv"), 1);
        assert!(matches!(result, Err(MdrmError::SourceNotFound { .. })));
    }

    #[test]
    fn test_preamble_only_is_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "PUBLIC").unwrap();

        let result = read_source(file.path(), 1);
        assert!(matches!(result, Err(MdrmError::InvalidFormat { .. })));
    }

    #[test]
    fn test_flexible_record_lengths() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "PUBLIC").unwrap();
        writeln!(file, "Mnemonic,Item Code").unwrap();
        writeln!(file, "RCON,2170,extra").unwrap();
        writeln!(file, "RCFD").unwrap();

        let table = read_source(file.path(), 1).unwrap();
        assert_eq!(table.records[0].len(), 3);
        assert_eq!(table.records[1].len(), 1);
    }
}
