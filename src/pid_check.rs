// 🔍 PID Check - Which student ids appear in one export but not the other
//
// Used to sanity-check that the roster and the course exports were pulled
// for the same population.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;

/// Ids from the `id` column, or `pid` when there is no `id` column.
/// Header match ignores case; values are trimmed and blanks dropped.
pub fn read_ids<P: AsRef<Path>>(path: P) -> Result<BTreeSet<String>> {
    let path = path.as_ref();
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;

    let headers = rdr
        .headers()
        .with_context(|| format!("Failed to read header row in {}", path.display()))?
        .clone();

    if headers.is_empty() {
        bail!("No columns found in {}", path.display());
    }

    let find = |wanted: &str| {
        headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').eq_ignore_ascii_case(wanted))
    };

    let Some(column) = find("id").or_else(|| find("pid")) else {
        bail!("Neither 'id' nor 'pid' column found in {}", path.display());
    };

    let mut ids = BTreeSet::new();
    for (line_num, result) in rdr.records().enumerate() {
        let record = result.with_context(|| {
            format!("Failed to parse CSV line {} in {}", line_num + 2, path.display())
        })?;
        if let Some(value) = record.get(column).map(str::trim).filter(|v| !v.is_empty()) {
            ids.insert(value.to_string());
        }
    }

    Ok(ids)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IdComparison {
    pub only_in_first: BTreeSet<String>,
    pub only_in_second: BTreeSet<String>,
}

impl IdComparison {
    pub fn between(first: &BTreeSet<String>, second: &BTreeSet<String>) -> Self {
        IdComparison {
            only_in_first: first.difference(second).cloned().collect(),
            only_in_second: second.difference(first).cloned().collect(),
        }
    }

    pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(first: P, second: Q) -> Result<Self> {
        Ok(Self::between(&read_ids(first)?, &read_ids(second)?))
    }

    pub fn is_identical(&self) -> bool {
        self.only_in_first.is_empty() && self.only_in_second.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
