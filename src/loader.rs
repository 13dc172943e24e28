// 📂 CSV Loader - Header-addressed rows from the screening exports
//
// Exports come from several upstream systems and are not always clean:
// files can be missing, records can be short or long, and text is not
// always valid UTF-8. None of that stops a report run.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// One CSV record addressed by (case-sensitive) column name
pub type Row = HashMap<String, String>;

/// Column value, or `""` when the column is absent
pub fn field<'a>(row: &'a Row, name: &str) -> &'a str {
    row.get(name).map(|s| s.as_str()).unwrap_or("")
}

/// Read every row of a CSV file.
///
/// A file that does not exist yields no rows. Records the CSV parser
/// rejects are skipped. Any other I/O failure is an error.
pub fn read_rows(path: &Path) -> Result<Vec<Row>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("{} not found, treating as empty", path.display());
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to open file: {}", path.display()));
        }
    };

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown.csv")
        .to_string();

    read_rows_from(file, &filename)
}

/// Read rows from any reader; `source` names it in log lines
pub fn read_rows_from<R: Read>(reader: R, source: &str) -> Result<Vec<Row>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .byte_headers()
        .with_context(|| format!("Failed to read header row in {}", source))?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let name = String::from_utf8_lossy(h).into_owned();
            if i == 0 {
                name.trim_start_matches('\u{feff}').to_string()
            } else {
                name
            }
        })
        .collect();

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for (line_num, result) in reader.byte_records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                // +2: 1-indexed plus the header row
                log::warn!("skipping malformed record at line {} in {}: {}", line_num + 2, source, e);
                skipped += 1;
                continue;
            }
        };

        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(name, value)| (name.clone(), String::from_utf8_lossy(value).into_owned()))
            .collect();
        rows.push(row);
    }

    log::info!("read {} rows from {} ({} skipped)", rows.len(), source, skipped);
    Ok(rows)
}

// ============================================================================
// TESTS
// ============================================================================
