//! Column coercion for loaded movie rows
//!
//! Best-effort, never fail: a cell that cannot be read as a non-negative
//! finite number becomes `0.0`, and the row is kept. Genre and name cells are
//! rendered to text unconditionally. The dashboard depends on this to stay
//! renderable over dirty data.

use cinedash_common::{MovieRecord, RawValue};
use tracing::debug;

use crate::db::RawMovieRow;

/// Numeric conversion policy: unparseable, missing, non-finite or negative
/// values become exactly `0.0`
pub fn coerce_numeric(value: &RawValue) -> f64 {
    parse_numeric(value).unwrap_or(0.0)
}

/// Text conversion policy: every value has a text form
pub fn coerce_text(value: &RawValue) -> String {
    match value {
        RawValue::Null => String::new(),
        RawValue::Integer(v) => v.to_string(),
        RawValue::Real(v) => v.to_string(),
        RawValue::Text(s) => s.clone(),
        RawValue::Blob(bytes) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn parse_numeric(value: &RawValue) -> Option<f64> {
    let number = match value {
        RawValue::Integer(v) => *v as f64,
        RawValue::Real(v) => *v,
        RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
        RawValue::Null | RawValue::Blob(_) => return None,
    };

    (number.is_finite() && number >= 0.0).then_some(number)
}

/// Coerce raw rows into typed records, preserving order and count
pub fn normalize(rows: &[RawMovieRow]) -> Vec<MovieRecord> {
    let mut defaulted = 0usize;
    let mut numeric = |value: &RawValue| match parse_numeric(value) {
        Some(n) => n,
        None => {
            defaulted += 1;
            0.0
        }
    };

    let records: Vec<MovieRecord> = rows
        .iter()
        .map(|row| MovieRecord {
            movie_name: coerce_text(&row.movie_name),
            genre: coerce_text(&row.genre),
            rating: numeric(&row.rating),
            duration_minutes: numeric(&row.duration_minutes),
            voting_counts: numeric(&row.voting_counts),
        })
        .collect();

    if defaulted > 0 {
        debug!(
            "Normalized {} rows; {} numeric cells defaulted to 0",
            records.len(),
            defaulted
        );
    }

    records
}
