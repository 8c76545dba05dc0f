//! Movie data model and filter parameter types

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One row of the `movies` table after normalization
///
/// Numeric columns are always finite and non-negative; see the normalizer
/// for the coercion policy that guarantees this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Display name (not unique)
    pub movie_name: String,
    /// Free-form category label
    pub genre: String,
    /// Rating, expected 0-10
    pub rating: f64,
    pub duration_minutes: f64,
    pub voting_counts: f64,
}

/// Untyped cell value as read from the store
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Integer(v)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Real(v)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(RawValue::Null)
    }
}

/// Inclusive interval `[lo, hi]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosedRange<T> {
    pub lo: T,
    pub hi: T,
}

impl<T: PartialOrd + Copy> ClosedRange<T> {
    pub fn new(lo: T, hi: T) -> Self {
        Self { lo, hi }
    }

    /// Inclusive on both ends
    pub fn contains(&self, value: T) -> bool {
        self.lo <= value && value <= self.hi
    }
}

impl<T: fmt::Display> fmt::Display for ClosedRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

/// Fully resolved filter selection for one recomputation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterParameters {
    /// Genres to keep; empty means nothing passes
    pub selected_genres: BTreeSet<String>,
    pub rating_range: ClosedRange<f64>,
    pub duration_range: ClosedRange<i64>,
    pub vote_range: ClosedRange<i64>,
}

impl FilterParameters {
    /// Whether a record passes the rating, duration and vote predicates
    ///
    /// Integer bounds are compared against the numeric column as floats.
    pub fn ranges_admit(&self, movie: &MovieRecord) -> bool {
        self.rating_range.contains(movie.rating)
            && ClosedRange::new(
                self.duration_range.lo as f64,
                self.duration_range.hi as f64,
            )
            .contains(movie.duration_minutes)
            && ClosedRange::new(self.vote_range.lo as f64, self.vote_range.hi as f64)
                .contains(movie.voting_counts)
    }
}
