//! Category CSV loading.
//!
//! Exports are read with a single header row and every cell as text; no type
//! inference happens at read time.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use feed_model::SourceTable;

use crate::error::{IngestError, Result};

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Reads a category export from disk.
pub fn read_source_table(path: &Path) -> Result<SourceTable> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    read_source_table_from_reader(BufReader::new(file), path)
}

/// Reads a category export from any reader. `path` is only used in errors.
///
/// - Blank and all-empty records are skipped.
/// - Short records are padded with empty cells, long records truncated.
pub fn read_source_table_from_reader<R: Read>(reader: R, path: &Path) -> Result<SourceTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let parse_error = |e: csv::Error| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => record.map_err(parse_error)?.iter().map(normalize_header).collect(),
        None => {
            return Err(IngestError::EmptyCsv {
                path: path.to_path_buf(),
            });
        }
    };
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }

    let width = headers.len();
    let mut table = SourceTable::new(headers);
    let mut ragged = 0usize;
    for record in records {
        let record = record.map_err(parse_error)?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        if record.len() != width {
            ragged += 1;
        }
        let mut row: Vec<String> = record.iter().take(width).map(normalize_cell).collect();
        row.resize(width, String::new());
        table.push_row(row)?;
    }

    if ragged > 0 {
        tracing::warn!(
            path = %path.display(),
            ragged_rows = ragged,
            columns = width,
            "records with a different field count than the header were padded or truncated"
        );
    }
    tracing::debug!(
        path = %path.display(),
        rows = table.len(),
        columns = width,
        "loaded category table"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_reads_all_cells_as_text() {
        let file = create_temp_csv("ReportNo,carats,markupPrice\n00123,1.50,1000\n");
        let table = read_source_table(file.path()).unwrap();

        assert_eq!(table.headers(), ["ReportNo", "carats", "markupPrice"]);
        let row = table.row(0).unwrap();
        assert_eq!(row.get("ReportNo"), "00123");
        assert_eq!(row.get("carats"), "1.50");
    }

    #[test]
    fn test_strips_bom_and_header_whitespace() {
        let file = create_temp_csv("\u{feff}shape,  Mine   of Origin \nROUND,Colombia\n");
        let table = read_source_table(file.path()).unwrap();

        assert_eq!(table.headers(), ["shape", "Mine of Origin"]);
        assert_eq!(table.row(0).unwrap().get("Mine of Origin"), "Colombia");
    }

    #[test]
    fn test_pads_short_rows_and_skips_blank_rows() {
        let file = create_temp_csv("a,b,c\n1\n,,\n\n4,5,6,7\n");
        let table = read_source_table(file.path()).unwrap();

        assert_eq!(table.len(), 2);
        let first = table.row(0).unwrap();
        assert_eq!(first.get("a"), "1");
        assert_eq!(first.get("c"), "");
        assert_eq!(table.row(1).unwrap().get("c"), "6");
    }

    #[test]
    fn test_empty_file() {
        let file = create_temp_csv("");
        let result = read_source_table(file.path());

        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_blank_header() {
        let file = create_temp_csv(" , \n1,2\n");
        let result = read_source_table(file.path());

        assert!(matches!(result, Err(IngestError::NoHeaderDetected { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = read_source_table(Path::new("/definitely/not/here.csv"));

        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_quoted_fields() {
        let csv = "image,shape\n\"see https://x.test/a.jpg, or b\",PEAR\n";
        let table = read_source_table_from_reader(csv.as_bytes(), Path::new("inline.csv")).unwrap();

        assert_eq!(
            table.row(0).unwrap().get("image"),
            "see https://x.test/a.jpg, or b"
        );
    }
}
