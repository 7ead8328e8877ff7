// File: crates/biblio-core/tests/support/mod.rs
// Purpose: Configurable in-memory LibraryStore fake shared by the core tests.

// Not every test binary touches every helper.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use biblio_core::store::{LibraryStore, RecordFilter, StoreError, StoreResult};
use biblio_core::types::{DayCountRow, LibraryScope, TagId};
use biblio_core::RefreshGate;

/// Every field is the canned answer for one trait method; `None` makes
/// that method fail. `calls` records method names in invocation order.
#[derive(Default)]
pub struct FakeStore {
    pub fused_rows: Option<Vec<DayCountRow>>,
    pub days: Option<Vec<String>>,
    pub added: Option<Vec<i64>>,
    pub focal: Option<Vec<i64>>,
    pub tag_ids: Option<Vec<TagId>>,
    pub publish_dates: Option<Vec<String>>,
    pub added_timestamps: Option<Vec<String>>,
    pub calls: Mutex<Vec<&'static str>>,
    /// When set, the fused query "starts a competing refresh" by
    /// bumping this gate, letting tests exercise the superseded path
    /// deterministically.
    pub usurper: Option<Arc<RefreshGate>>,
}

impl FakeStore {
    pub fn recorded_calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, name: &'static str) {
        self.calls.lock().unwrap().push(name);
    }

    fn answer<T: Clone>(&self, value: &Option<T>) -> StoreResult<T> {
        value
            .clone()
            .ok_or_else(|| StoreError::Query("fake store: configured failure".into()))
    }
}

#[async_trait]
impl LibraryStore for FakeStore {
    async fn day_counts(
        &self,
        _scope: LibraryScope,
        _filter: &RecordFilter,
        _focal_tag_ids: &[TagId],
    ) -> StoreResult<Vec<DayCountRow>> {
        self.record("day_counts");
        if let Some(gate) = &self.usurper {
            gate.begin();
        }
        self.answer(&self.fused_rows)
    }

    async fn day_column(
        &self,
        _scope: LibraryScope,
        _filter: &RecordFilter,
    ) -> StoreResult<Vec<String>> {
        self.record("day_column");
        self.answer(&self.days)
    }

    async fn added_count_column(
        &self,
        _scope: LibraryScope,
        _filter: &RecordFilter,
    ) -> StoreResult<Vec<i64>> {
        self.record("added_count_column");
        self.answer(&self.added)
    }

    async fn focal_count_column(
        &self,
        _scope: LibraryScope,
        _filter: &RecordFilter,
        _focal_tag_ids: &[TagId],
    ) -> StoreResult<Vec<i64>> {
        self.record("focal_count_column");
        self.answer(&self.focal)
    }

    async fn resolve_tag_ids(&self, names: &[String]) -> StoreResult<Vec<TagId>> {
        self.record("resolve_tag_ids");
        if names.is_empty() {
            return Ok(Vec::new());
        }
        self.answer(&self.tag_ids)
    }

    async fn publish_dates(
        &self,
        _scope: LibraryScope,
        _filter: &RecordFilter,
    ) -> StoreResult<Vec<String>> {
        self.record("publish_dates");
        self.answer(&self.publish_dates)
    }

    async fn added_timestamps(
        &self,
        _scope: LibraryScope,
        _filter: &RecordFilter,
    ) -> StoreResult<Vec<String>> {
        self.record("added_timestamps");
        self.answer(&self.added_timestamps)
    }
}

pub fn row(day: &str, added: i64, focal: Option<i64>) -> DayCountRow {
    DayCountRow {
        day: day.to_string(),
        added_count: added,
        focal_added_count: focal,
    }
}

pub fn scope() -> LibraryScope {
    LibraryScope::new(1)
}
