//! # CSV Export
//!
//! Writes table rows as CSV. Values are comma-joined with no quoting or
//! escaping: a name containing a comma shifts the columns of its line. The
//! export is meant for quick spreadsheet imports, not as a lossless format.

use crate::core::error::{AppError, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;
use std::path::PathBuf;

/// File name offered by the save dialog.
pub const DEFAULT_FILENAME: &str = "cryptos.csv";

/// Serialize `rows` under a header line of `headers`.
///
/// `headers` must match the serialized field names of `T`; the header line is
/// written even when there are no rows.
pub fn rows_to_csv<'a, T, I>(headers: &[&str], rows: I) -> Result<String>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(headers)?;
    for row in rows {
        wtr.serialize(row)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::Export(e.to_string()))
}

/// Write `contents` to `path`, replacing any existing file.
#[tracing::instrument(skip(contents), fields(path = %path.display(), bytes = contents.len()))]
pub async fn save_csv(path: PathBuf, contents: String) -> Result<PathBuf> {
    tokio::fs::write(&path, contents).await.map_err(|e| {
        tracing::error!(error = %e, "CSV write failed");
        AppError::from(e)
    })?;
    tracing::info!("CSV exported");
    Ok(path)
}
