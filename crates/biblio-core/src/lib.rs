// File: crates/biblio-core/src/lib.rs
// Summary: Core library entry point; exports the aggregation domain and store boundary.

pub mod aggregate;
pub mod date;
pub mod markers;
pub mod pipeline;
pub mod prefs;
pub mod store;
pub mod types;

pub use aggregate::aggregate;
pub use date::normalize_date;
pub use markers::extract_markers;
pub use pipeline::{refresh, RefreshGate, RefreshOutcome, RefreshSnapshot};
pub use prefs::{parse_tag_filter, MemoryPreferences, PreferenceStore};
pub use store::{LibraryStore, RecordFilter, StoreError, SCHOLARLY_TYPES};
pub use types::{DailyDataPoint, DayCountRow, LibraryScope, PublicationMarkers, Statistics, TagId};
