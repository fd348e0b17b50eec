//! Resource-sampler CSV reader.
//!
//! The sampler writes `timestamp,name,cpu,mem` with a header row. Records are
//! returned as plain text fields; validation and normalisation belong to the
//! series builder, so ragged lines are passed through untouched.

use std::path::Path;

use crate::error::SourceError;

/// Read `path` and return its data records (header skipped).
pub fn read_stats_csv(path: &Path) -> Result<Vec<Vec<String>>, SourceError> {
    let text = std::fs::read_to_string(path).map_err(|e| SourceError::io(path, e))?;
    let records = parse_stats_csv(&text);
    tracing::debug!(path = %path.display(), records = records.len(), "read stats csv");
    Ok(records)
}

/// Split CSV text into records, dropping the header row.
///
/// Double-quoted fields may contain commas and `""` escapes. Quoted newlines
/// are not supported; the sampler never emits them.
pub fn parse_stats_csv(text: &str) -> Vec<Vec<String>> {
    text.lines().skip(1).map(split_record).collect()
}

fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            ('"', true) => in_quotes = false,
            ('"', false) if field.is_empty() => in_quotes = true,
            (',', false) => fields.push(std::mem::take(&mut field)),
            (c, _) => field.push(c),
        }
    }
    fields.push(field);
    fields
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
