// File: crates/biblio-core/src/types.rs
// Summary: Shared domain types (daily series, statistics result, publication markers).

use std::collections::BTreeMap;

/// Numeric tag identifier as stored by the host library.
pub type TagId = i64;

/// Which library the queries run against.
/// Contract: `library_id` matches the host store's library key verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LibraryScope {
    pub library_id: i64,
}

impl LibraryScope {
    pub const fn new(library_id: i64) -> Self {
        Self { library_id }
    }
}

/// One calendar day of the reconstructed dense series.
///
/// `day` is the canonical `YYYY-MM-DD` key. Cumulative fields are prefix
/// sums of the added fields from the first point, so they are
/// non-decreasing, and `focal_added_count <= added_count` holds whenever
/// a focal filter is active.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DailyDataPoint {
    pub day: String,
    pub added_count: u64,
    pub cumulative_count: u64,
    pub focal_added_count: u64,
    pub focal_cumulative_count: u64,
}

/// Aggregation result over one library scope.
///
/// An empty library is not an error: `daily` is empty, the counts are
/// zero and both date strings are empty. Callers branch on
/// [`Statistics::is_empty`] to render a "no data" state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Statistics {
    pub daily: Vec<DailyDataPoint>,
    pub total_count: u64,
    pub focal_count: u64,
    pub start_date: String,
    pub end_date: String,
}

impl Statistics {
    /// The explicit no-data state.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.daily.is_empty()
    }
}

/// Sparse reference-event overlay for the cumulative line.
///
/// `days` is ascending and unique; `cumulative_by_day` carries the
/// running total of event occurrences up to and including each day.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PublicationMarkers {
    pub days: Vec<String>,
    pub cumulative_by_day: BTreeMap<String, u64>,
}

impl PublicationMarkers {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// One row from the store's per-day aggregate query, validated once at
/// the aggregation boundary rather than trusted ad hoc.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayCountRow {
    pub day: String,
    pub added_count: i64,
    /// Absent when the query ran without a focal filter.
    pub focal_added_count: Option<i64>,
}

impl DayCountRow {
    /// Clamp counts into the domain: negatives become zero, the focal
    /// count never exceeds the added count, and without an active focal
    /// filter the focal count is defined as zero.
    pub fn validated(self, focal_active: bool) -> Option<(String, u64, u64)> {
        if self.day.is_empty() {
            return None;
        }
        let added = self.added_count.max(0) as u64;
        let focal = if focal_active {
            (self.focal_added_count.unwrap_or(0).max(0) as u64).min(added)
        } else {
            0
        };
        Some((self.day, added, focal))
    }
}
