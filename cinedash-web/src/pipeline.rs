//! Dashboard view computation
//!
//! `build_view` is re-run from scratch on every interaction: loaded table and
//! request in, view model out. It stops at the first empty stage and reports
//! which one, rather than rendering empty charts.

use cinedash_common::{ClosedRange, FilterParameters, MovieRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::info;

use crate::filter::{self, SliderDomains};
use crate::present::{self, Charts, RowCounts};

pub const MSG_NO_DATA: &str =
    "No movie data available. Please ensure your 'movies' table is populated.";
pub const MSG_NO_GENRE_MATCHES: &str = "No data after applying genre filter.";
pub const MSG_NO_FILTER_MATCHES: &str = "No movies match your filter criteria.";

/// Widget state sent by the UI
///
/// Absent genres means "all genres"; an empty list means the user cleared
/// the selection. Absent ranges mean "full slider domain".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub genres: Option<BTreeSet<String>>,
    #[serde(default)]
    pub rating_range: Option<ClosedRange<f64>>,
    #[serde(default)]
    pub duration_range: Option<ClosedRange<i64>>,
    #[serde(default)]
    pub vote_range: Option<ClosedRange<i64>>,
}

/// Sidebar state: options, domains and the effective selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Controls {
    pub genre_options: Vec<String>,
    pub selected_genres: BTreeSet<String>,
    /// `None` when the genre selection left nothing to bound sliders with
    pub domains: Option<SliderDomains>,
    /// Effective parameters after clamping to the domains
    pub params: Option<FilterParameters>,
}

/// Outcome of one recomputation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DashboardView {
    /// Loaded table has no rows
    NoData { message: &'static str },
    /// Genre selection matched nothing
    NoGenreMatches {
        message: &'static str,
        controls: Controls,
    },
    /// Range filters matched nothing
    NoFilterMatches {
        message: &'static str,
        controls: Controls,
        table: Vec<MovieRecord>,
        counts: RowCounts,
        caption: String,
    },
    Ready {
        controls: Controls,
        table: Vec<MovieRecord>,
        counts: RowCounts,
        caption: String,
        charts: Charts,
    },
}

impl DashboardView {
    /// Rows shown in the table view (empty for early exits)
    pub fn table(&self) -> &[MovieRecord] {
        match self {
            DashboardView::NoFilterMatches { table, .. } | DashboardView::Ready { table, .. } => {
                table.as_slice()
            }
            _ => &[],
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            DashboardView::NoData { message }
            | DashboardView::NoGenreMatches { message, .. }
            | DashboardView::NoFilterMatches { message, .. } => Some(*message),
            DashboardView::Ready { .. } => None,
        }
    }
}

/// Resolve a request against the table into concrete filter parameters
///
/// Slider domains come from the genre-filtered rows; `params` is `None` when
/// the genre selection leaves nothing to bound them with.
fn resolve_controls(table: &[MovieRecord], request: &FilterRequest) -> Controls {
    let genre_options = filter::distinct_genres(table);
    let selected_genres = request
        .genres
        .clone()
        .unwrap_or_else(|| genre_options.iter().cloned().collect());

    let by_genre = filter::filter_by_genre(table, &selected_genres);
    let domains = filter::slider_domains(&by_genre);
    let params = domains.map(|d| FilterParameters {
        selected_genres: selected_genres.clone(),
        rating_range: d.rating.resolve(request.rating_range),
        duration_range: d.duration.resolve(request.duration_range),
        vote_range: d.votes.resolve(request.vote_range),
    });

    Controls {
        genre_options,
        selected_genres,
        domains,
        params,
    }
}

/// Compute the dashboard view for one interaction
pub fn build_view(table: &[MovieRecord], request: &FilterRequest) -> DashboardView {
    if table.is_empty() {
        info!("Loaded table is empty");
        return DashboardView::NoData {
            message: MSG_NO_DATA,
        };
    }

    let controls = resolve_controls(table, request);
    let Some(params) = controls.params.clone() else {
        info!(
            "Genre filter {:?} matched no rows",
            controls.selected_genres
        );
        return DashboardView::NoGenreMatches {
            message: MSG_NO_GENRE_MATCHES,
            controls,
        };
    };

    let working = filter::apply(table, &params);
    let counts = RowCounts {
        filtered: working.len(),
        total: table.len(),
    };
    let rows: Vec<MovieRecord> = working.iter().map(|m| (*m).clone()).collect();

    if working.is_empty() {
        info!(
            "Range filters rating={} duration={} votes={} matched no rows",
            params.rating_range, params.duration_range, params.vote_range
        );
        return DashboardView::NoFilterMatches {
            message: MSG_NO_FILTER_MATCHES,
            controls,
            table: rows,
            caption: counts.caption(),
            counts,
        };
    }

    DashboardView::Ready {
        controls,
        charts: present::build_charts(&working),
        table: rows,
        caption: counts.caption(),
        counts,
    }
}
