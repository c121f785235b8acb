//! Raw-output normalization helpers.
//!
//! Security tools disagree about output: some emit NDJSON, some one JSON
//! document, some plain text, and most of them occasionally emit garbage
//! mid-stream. The normalization contract is that none of that aborts a
//! scan: malformed lines are skipped with a diagnostic, unstructured
//! output falls back to raw lines, and a fully empty result is a valid
//! zero-count output.

use serde_json::Value;
use tracing::debug;

/// Result of normalizing raw tool output.
///
/// `records` conform to "one JSON value per finding"; `errors` carries
/// human-readable diagnostics for whatever could not be interpreted.
/// Diagnostics are not failures — they ride inside an otherwise-successful
/// output so partial results still reach the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    /// Parsed records, one per finding.
    pub records: Vec<Value>,
    /// Human-readable diagnostics for skipped or unstructured content.
    pub errors: Vec<String>,
}

impl Normalized {
    /// A zero-count, diagnostic-free result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of parsed records.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing was parsed and nothing was diagnosed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.errors.is_empty()
    }
}

/// Normalize raw tool output into records plus diagnostics.
///
/// Interpretation order:
///
/// 1. Empty (or whitespace-only) output → a valid zero-count result.
/// 2. One whole JSON document: an array yields its elements, `null` yields
///    nothing, any other value yields a single record.
/// 3. NDJSON: every non-empty line parsed individually; a malformed line
///    is skipped with a per-line diagnostic, never aborting the rest.
/// 4. Plain-text fallback: each non-empty line becomes `{"raw": line}`
///    and one diagnostic records that the output was unstructured.
pub fn normalize(raw: &str) -> Normalized {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Normalized::empty();
    }

    // A single well-formed document (including pretty-printed JSON that
    // would never parse line-by-line).
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        let records = match value {
            Value::Null => Vec::new(),
            Value::Array(items) => items,
            other => vec![other],
        };
        return Normalized {
            records,
            errors: Vec::new(),
        };
    }

    // NDJSON: tolerate malformed lines.
    let mut records = Vec::new();
    let mut errors = Vec::new();
    for (index, line) in trimmed.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(value) => records.push(value),
            Err(err) => errors.push(format!("line {}: skipped malformed json: {err}", index + 1)),
        }
    }
    if !records.is_empty() {
        if !errors.is_empty() {
            debug!(
                skipped = errors.len(),
                parsed = records.len(),
                "skipped malformed ndjson lines"
            );
        }
        return Normalized { records, errors };
    }

    // Nothing structured at all: keep the raw lines so the caller still
    // gets the tool's findings, and say so.
    let lines: Vec<Value> = trimmed
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| serde_json::json!({ "raw": line }))
        .collect();
    let diagnostic = format!(
        "output was not structured json; captured {} raw line(s) verbatim",
        lines.len()
    );
    debug!(lines = lines.len(), "fell back to plain-text normalization");
    Normalized {
        records: lines,
        errors: vec![diagnostic],
    }
}
