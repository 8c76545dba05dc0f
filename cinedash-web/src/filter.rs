//! Genre and range filtering over the loaded movie table
//!
//! Filters borrow from the loaded table and never copy, mutate or reorder the
//! rows that survive.

use cinedash_common::{ClosedRange, FilterParameters, MovieRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Rating slider step
pub const RATING_STEP: f64 = 0.1;
/// Duration slider step (minutes)
pub const DURATION_STEP: i64 = 5;
/// Vote slider step
pub const VOTE_STEP: i64 = 1000;

/// Sorted distinct genre labels (multiselect options)
pub fn distinct_genres(rows: &[MovieRecord]) -> Vec<String> {
    rows.iter()
        .map(|m| m.genre.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Keep rows whose genre is selected; an empty selection keeps nothing
pub fn filter_by_genre<'a>(
    rows: &'a [MovieRecord],
    genres: &BTreeSet<String>,
) -> Vec<&'a MovieRecord> {
    rows.iter().filter(|m| genres.contains(&m.genre)).collect()
}

/// Apply the rating, duration and vote range filters
pub fn filter_by_ranges<'a>(
    rows: &[&'a MovieRecord],
    params: &FilterParameters,
) -> Vec<&'a MovieRecord> {
    rows.iter()
        .copied()
        .filter(|m| params.ranges_admit(m))
        .collect()
}

/// Full filter: genre membership, then rating, duration and vote ranges
pub fn apply<'a>(rows: &'a [MovieRecord], params: &FilterParameters) -> Vec<&'a MovieRecord> {
    let by_genre = filter_by_genre(rows, &params.selected_genres);
    if by_genre.is_empty() {
        return by_genre;
    }
    filter_by_ranges(&by_genre, params)
}

/// Bounds and step of one range slider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderDomain<T> {
    pub min: T,
    pub max: T,
    pub step: T,
}

impl<T: PartialOrd + Copy> SliderDomain<T> {
    pub fn full(&self) -> ClosedRange<T> {
        ClosedRange::new(self.min, self.max)
    }

    /// Fit a requested range into this domain
    ///
    /// Absent means the full domain. Reversed ends are swapped, each end is
    /// clamped into `[min, max]`, and a request lying entirely outside the
    /// domain resets to the full domain.
    pub fn resolve(&self, requested: Option<ClosedRange<T>>) -> ClosedRange<T> {
        let Some(r) = requested else {
            return self.full();
        };

        let (lo, hi) = if r.lo <= r.hi { (r.lo, r.hi) } else { (r.hi, r.lo) };
        // Also catches NaN bounds, which compare false both ways
        if !(hi >= self.min && lo <= self.max) {
            return self.full();
        }

        let lo = if lo < self.min { self.min } else { lo };
        let hi = if hi > self.max { self.max } else { hi };
        ClosedRange::new(lo, hi)
    }
}

/// Slider domains derived from the genre-filtered table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderDomains {
    pub rating: SliderDomain<f64>,
    pub duration: SliderDomain<i64>,
    pub votes: SliderDomain<i64>,
}

/// Min/max of each numeric column over the genre-filtered rows
///
/// Returns `None` for an empty set: there is no valid domain to build
/// sliders from. Duration and vote bounds are truncated to integers.
pub fn slider_domains(rows: &[&MovieRecord]) -> Option<SliderDomains> {
    let first = rows.first()?;

    let (mut r_min, mut r_max) = (first.rating, first.rating);
    let (mut d_min, mut d_max) = (first.duration_minutes, first.duration_minutes);
    let (mut v_min, mut v_max) = (first.voting_counts, first.voting_counts);

    for m in rows.iter().skip(1) {
        r_min = r_min.min(m.rating);
        r_max = r_max.max(m.rating);
        d_min = d_min.min(m.duration_minutes);
        d_max = d_max.max(m.duration_minutes);
        v_min = v_min.min(m.voting_counts);
        v_max = v_max.max(m.voting_counts);
    }

    Some(SliderDomains {
        rating: SliderDomain {
            min: r_min,
            max: r_max,
            step: RATING_STEP,
        },
        duration: SliderDomain {
            min: d_min.trunc() as i64,
            max: d_max.trunc() as i64,
            step: DURATION_STEP,
        },
        votes: SliderDomain {
            min: v_min.trunc() as i64,
            max: v_max.trunc() as i64,
            step: VOTE_STEP,
        },
    })
}
