// File: crates/biblio-core/src/store.rs
// Summary: External record-store boundary: query trait, shared filter predicate, errors.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{DayCountRow, LibraryScope, TagId};

/// Item types that count as scholarly records for aggregation.
pub const SCHOLARLY_TYPES: [&str; 6] = [
    "journalArticle",
    "book",
    "thesis",
    "conferencePaper",
    "patent",
    "preprint",
];

/// The one reusable record predicate consumed by every query form.
///
/// Both the fused aggregate query and the decomposed fallback columns
/// must be built from the same filter so the two paths cannot drift.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordFilter {
    /// Restrict to the scholarly item-type allow-list.
    pub scholarly_only: bool,
    /// Exclude soft-deleted records.
    pub exclude_deleted: bool,
    /// Restrict to the curated "my publications" subset.
    pub curated_only: bool,
}

impl RecordFilter {
    /// Predicate for the added-records series.
    pub const fn scholarly() -> Self {
        Self { scholarly_only: true, exclude_deleted: true, curated_only: false }
    }

    /// Predicate for the publication-marker sources.
    pub const fn publications() -> Self {
        Self { scholarly_only: true, exclude_deleted: true, curated_only: true }
    }

    pub fn type_allow_list(&self) -> &'static [&'static str] {
        if self.scholarly_only {
            &SCHOLARLY_TYPES
        } else {
            &[]
        }
    }
}

/// Store-side failure. The aggregation layer recovers every variant as
/// "zero rows"; nothing here is fatal to the caller.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("query failed: {0}")]
    Query(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Asynchronous query boundary to the host record store.
///
/// `day_counts` is the fused aggregate form; the three `*_column`
/// methods are its decomposition, aligned by array position, used only
/// when fusion yields nothing. Implementations group days by the first
/// ten characters of the record's added-timestamp.
#[async_trait]
pub trait LibraryStore: Send + Sync {
    /// Per-day added (and optionally focal) counts, ascending by day.
    async fn day_counts(
        &self,
        scope: LibraryScope,
        filter: &RecordFilter,
        focal_tag_ids: &[TagId],
    ) -> StoreResult<Vec<DayCountRow>>;

    /// Distinct days with qualifying records, ascending.
    async fn day_column(&self, scope: LibraryScope, filter: &RecordFilter)
        -> StoreResult<Vec<String>>;

    /// Added counts per day, ordered exactly like [`Self::day_column`].
    async fn added_count_column(
        &self,
        scope: LibraryScope,
        filter: &RecordFilter,
    ) -> StoreResult<Vec<i64>>;

    /// Focal counts per day, ordered exactly like [`Self::day_column`].
    async fn focal_count_column(
        &self,
        scope: LibraryScope,
        filter: &RecordFilter,
        focal_tag_ids: &[TagId],
    ) -> StoreResult<Vec<i64>>;

    /// Tag-name to tag-id resolution; unknown names are silently
    /// dropped, empty input yields empty output.
    async fn resolve_tag_ids(&self, names: &[String]) -> StoreResult<Vec<TagId>>;

    /// Explicit publish-date field values for the curated subset.
    async fn publish_dates(
        &self,
        scope: LibraryScope,
        filter: &RecordFilter,
    ) -> StoreResult<Vec<String>>;

    /// Added-timestamps for the curated subset; the fallback source.
    async fn added_timestamps(
        &self,
        scope: LibraryScope,
        filter: &RecordFilter,
    ) -> StoreResult<Vec<String>>;
}
