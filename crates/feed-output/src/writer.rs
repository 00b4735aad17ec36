//! Feed file serialization.

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use feed_model::{CANONICAL_COLUMNS, CanonicalRow};

use crate::error::{OutputError, Result};
use crate::feed::CombinedFeed;

/// File name of the combined feed inside the output directory.
pub const FEED_FILE_NAME: &str = "combined_google_merchant_feed.csv";

/// Content type used when publishing `path`.
pub fn content_type_for(path: &Path) -> Option<&'static str> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => Some("text/csv"),
        _ => None,
    }
}

/// Writes `feed` to `path`, creating the parent directory if needed.
pub fn write_feed(path: &Path, feed: &CombinedFeed) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file = File::create(path).map_err(|source| OutputError::WriteFile {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write_feed_to(&mut writer, feed)?;
    writer.flush().map_err(|source| OutputError::WriteFile {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), rows = feed.len(), "wrote combined feed");
    Ok(())
}

/// Doubles backslashes so the reader's escape handling restores them.
///
/// The writer quotes any field holding the escape byte but only escapes
/// quotes inside it.
fn escape_backslashes(field: &str) -> Cow<'_, str> {
    if field.contains('\\') {
        Cow::Owned(field.replace('\\', "\\\\"))
    } else {
        Cow::Borrowed(field)
    }
}

/// Serializes `feed` as CSV into any writer.
pub fn write_feed_to<W: Write>(writer: W, feed: &CombinedFeed) -> Result<()> {
    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .double_quote(false)
        .escape(b'\\')
        .from_writer(writer);

    csv_writer.write_record(CANONICAL_COLUMNS)?;
    for row in feed.rows() {
        let fields = row.fields().map(escape_backslashes);
        csv_writer.write_record(fields.iter().map(|field| field.as_bytes()))?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Parses a feed written by [`write_feed_to`].
///
/// The header must match the canonical columns exactly.
pub fn read_feed<R: Read>(reader: R) -> Result<Vec<CanonicalRow>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .double_quote(false)
        .escape(Some(b'\\'))
        .from_reader(reader);

    let headers = csv_reader.headers()?;
    if !headers.iter().eq(CANONICAL_COLUMNS) {
        return Err(OutputError::HeaderMismatch {
            expected: CANONICAL_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(CanonicalRow::from_fields(record.iter())?);
    }
    Ok(rows)
}
