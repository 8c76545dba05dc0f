//! Chart datasets derived from the working table
//!
//! Every function here is a pure read of the filtered rows; none filter or
//! reorder their input.

use cinedash_common::MovieRecord;
use serde::Serialize;
use std::collections::HashMap;

/// Number of rows in the top-rated chart
pub const TOP_N: usize = 10;
/// Number of equal-width rating histogram bins
pub const HISTOGRAM_BINS: usize = 10;
/// Evaluation points of the rating density curve
pub const DENSITY_POINTS: usize = 200;

/// Filtered and total row counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowCounts {
    pub filtered: usize,
    pub total: usize,
}

impl RowCounts {
    pub fn caption(&self) -> String {
        format!("Displaying {} movies (out of {}).", self.filtered, self.total)
    }
}

/// Highest-rated records, best first; ties keep their table order
pub fn top_rated(rows: &[&MovieRecord], n: usize) -> Vec<MovieRecord> {
    let mut sorted: Vec<&MovieRecord> = rows.to_vec();
    // sort_by is stable
    sorted.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    sorted.into_iter().take(n).cloned().collect()
}

/// One genre and its row count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

/// Genre frequencies, most frequent first; ties in order of first appearance
pub fn genre_counts(rows: &[&MovieRecord]) -> Vec<GenreCount> {
    let mut counts: Vec<GenreCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for m in rows {
        match index.get(m.genre.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(m.genre.as_str(), counts.len());
                counts.push(GenreCount {
                    genre: m.genre.clone(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// One histogram bin `[lower, upper)`; the last bin also includes `upper`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Rating histogram with an optional density overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingDistribution {
    pub bins: Vec<HistogramBin>,
    /// `(rating, expected count)` points, scaled to the histogram
    pub density: Option<Vec<(f64, f64)>>,
}

/// Equal-width histogram spanning the observed range
///
/// A degenerate range (all values equal) is widened by 0.5 on each side so
/// the bins keep a positive width.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let (mut lo, mut hi) = min_max(values);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: lo + width * i as f64,
            upper: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for &v in values {
        let slot = (((v - lo) / width) as usize).min(bins - 1);
        out[slot].count += 1;
    }
    out
}

/// Gaussian kernel density estimate over `[min, max]`, scaled to counts
///
/// Bandwidth follows Scott's rule: `std * n^(-1/5)` with the sample
/// standard deviation. Returns `None` for fewer than two values or zero
/// spread.
pub fn density_curve(values: &[f64], bin_width: f64, points: usize) -> Option<Vec<(f64, f64)>> {
    let n = values.len();
    if n < 2 || points < 2 {
        return None;
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std = variance.sqrt();
    if std == 0.0 || !std.is_finite() {
        return None;
    }

    let bandwidth = std * (n as f64).powf(-0.2);
    let norm = 1.0 / (bandwidth * (2.0 * std::f64::consts::PI).sqrt() * n as f64);
    let scale = n as f64 * bin_width;

    let (lo, hi) = min_max(values);
    let step = (hi - lo) / (points - 1) as f64;

    Some(
        (0..points)
            .map(|i| {
                let x = lo + step * i as f64;
                let pdf: f64 = values
                    .iter()
                    .map(|v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
                    .sum::<f64>()
                    * norm;
                (x, pdf * scale)
            })
            .collect(),
    )
}

/// Ten-bin rating histogram plus density overlay
pub fn rating_distribution(rows: &[&MovieRecord]) -> RatingDistribution {
    let ratings: Vec<f64> = rows.iter().map(|m| m.rating).collect();
    let bins = histogram(&ratings, HISTOGRAM_BINS);
    let density = bins
        .first()
        .and_then(|b| density_curve(&ratings, b.upper - b.lower, DENSITY_POINTS));

    RatingDistribution { bins, density }
}

/// Scatter points for one genre
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub genre: String,
    /// `(voting_counts, rating)` pairs in table order
    pub points: Vec<(f64, f64)>,
}

/// `(voting_counts, rating)` pairs grouped by genre, series in order of
/// first appearance
pub fn votes_vs_rating(rows: &[&MovieRecord]) -> Vec<ScatterSeries> {
    let mut series: Vec<ScatterSeries> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for m in rows {
        let i = *index.entry(m.genre.as_str()).or_insert_with(|| {
            series.push(ScatterSeries {
                genre: m.genre.clone(),
                points: Vec::new(),
            });
            series.len() - 1
        });
        series[i].points.push((m.voting_counts, m.rating));
    }
    series
}

/// All four chart datasets with their titles
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Charts {
    pub top_rated: Chart<Vec<MovieRecord>>,
    pub genre_distribution: Chart<Vec<GenreCount>>,
    pub rating_distribution: Chart<RatingDistribution>,
    pub rating_vs_votes: Chart<Vec<ScatterSeries>>,
}

/// One chart: title, axis labels and data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart<T> {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// Axis scale hint for the renderer: "linear" or "log"
    pub x_scale: &'static str,
    pub data: T,
}

impl<T> Chart<T> {
    fn linear(title: &'static str, x_label: &'static str, y_label: &'static str, data: T) -> Self {
        Self {
            title,
            x_label,
            y_label,
            x_scale: "linear",
            data,
        }
    }
}

/// Derive every chart from the filtered rows
pub fn build_charts(rows: &[&MovieRecord]) -> Charts {
    Charts {
        top_rated: Chart::linear(
            "Top 10 Movies by IMDb Rating",
            "rating",
            "movie_name",
            top_rated(rows, TOP_N),
        ),
        genre_distribution: Chart::linear(
            "Distribution of Movies Across Genres",
            "count",
            "genre",
            genre_counts(rows),
        ),
        rating_distribution: Chart::linear(
            "IMDb Rating Distribution",
            "rating",
            "Count",
            rating_distribution(rows),
        ),
        rating_vs_votes: Chart {
            x_scale: "log",
            ..Chart::linear(
                "Rating vs Voting Counts",
                "voting_counts",
                "rating",
                votes_vs_rating(rows),
            )
        },
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}
