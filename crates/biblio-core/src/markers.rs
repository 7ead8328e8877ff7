// File: crates/biblio-core/src/markers.rs
// Summary: Publication marker extraction with publish-date/added-date fallback.

use std::collections::BTreeMap;

use tracing::{debug, instrument, warn};

use crate::date::normalize_date;
use crate::store::{LibraryStore, RecordFilter};
use crate::types::{LibraryScope, PublicationMarkers};

/// Derive the sparse publication-event overlay for one library scope.
///
/// Explicit publish-date values of the curated subset are the primary
/// source; the same records' added-timestamps are used only when the
/// primary yields zero usable dates. Unparseable values are discarded
/// silently and store failures degrade to an empty marker set.
#[instrument(skip(store), fields(library = scope.library_id))]
pub async fn extract_markers(store: &dyn LibraryStore, scope: LibraryScope) -> PublicationMarkers {
    let filter = RecordFilter::publications();

    let mut raw = match store.publish_dates(scope, &filter).await {
        Ok(dates) => dates,
        Err(err) => {
            warn!(%err, "publish-date query failed; trying added timestamps");
            Vec::new()
        }
    };
    if raw.is_empty() {
        raw = match store.added_timestamps(scope, &filter).await {
            Ok(dates) => dates,
            Err(err) => {
                warn!(%err, "added-timestamp fallback failed; no markers");
                Vec::new()
            }
        };
    }

    let mut day_counts: BTreeMap<String, u64> = BTreeMap::new();
    for value in &raw {
        match normalize_date(value) {
            Some(day) => *day_counts.entry(day).or_insert(0) += 1,
            None => debug!(%value, "discarding unparseable publication date"),
        }
    }

    let days: Vec<String> = day_counts.keys().cloned().collect();
    let mut cumulative_by_day = BTreeMap::new();
    let mut running = 0u64;
    for day in &days {
        running += day_counts[day];
        cumulative_by_day.insert(day.clone(), running);
    }

    PublicationMarkers { days, cumulative_by_day }
}
