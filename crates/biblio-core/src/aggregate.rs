// File: crates/biblio-core/src/aggregate.rs
// Summary: Gap-filled daily/cumulative dual-series aggregation with query fallback.

use chrono::NaiveDate;
use tracing::{debug, instrument, warn};

use crate::store::{LibraryStore, RecordFilter};
use crate::types::{DailyDataPoint, DayCountRow, LibraryScope, Statistics, TagId};

/// Compute the dense daily/cumulative dual series for one library scope.
///
/// The fused per-day query runs first; when it yields zero rows the
/// decomposed three-query fallback is tried before declaring no-data.
/// Store failures degrade to an empty result and are never propagated.
/// An empty `focal_tag_ids` list means "no focal filter": every focal
/// count is zero, not "all records".
#[instrument(skip(store), fields(library = scope.library_id, focal = focal_tag_ids.len()))]
pub async fn aggregate(
    store: &dyn LibraryStore,
    scope: LibraryScope,
    focal_tag_ids: &[TagId],
) -> Statistics {
    let filter = RecordFilter::scholarly();

    let mut rows = match store.day_counts(scope, &filter, focal_tag_ids).await {
        Ok(rows) => rows,
        Err(err) => {
            warn!(%err, "fused day-count query failed; treating as zero rows");
            Vec::new()
        }
    };

    if rows.is_empty() {
        rows = decomposed_rows(store, scope, &filter, focal_tag_ids).await;
    }

    let focal_active = !focal_tag_ids.is_empty();
    let mut normalized: Vec<(String, u64, u64)> = rows
        .into_iter()
        .filter_map(|row| row.validated(focal_active))
        .collect();
    normalized.sort_by(|a, b| a.0.cmp(&b.0));

    if normalized.is_empty() {
        return Statistics::empty();
    }

    gap_fill(&normalized)
}

/// Decomposition fallback: distinct days, added counts and focal counts
/// as three positionally aligned columns. Exists because the host query
/// layer has been seen to drop the fused form's results; decompose
/// before declaring no-data.
async fn decomposed_rows(
    store: &dyn LibraryStore,
    scope: LibraryScope,
    filter: &RecordFilter,
    focal_tag_ids: &[TagId],
) -> Vec<DayCountRow> {
    let days = match store.day_column(scope, filter).await {
        Ok(days) => days,
        Err(err) => {
            warn!(%err, "day-column fallback failed; treating as zero rows");
            return Vec::new();
        }
    };
    let added = match store.added_count_column(scope, filter).await {
        Ok(added) => added,
        Err(err) => {
            warn!(%err, "added-count fallback failed; treating as zero rows");
            return Vec::new();
        }
    };
    if days.is_empty() || days.len() != added.len() {
        debug!(days = days.len(), added = added.len(), "fallback columns misaligned");
        return Vec::new();
    }

    let focal = if focal_tag_ids.is_empty() {
        vec![0; days.len()]
    } else {
        match store.focal_count_column(scope, filter, focal_tag_ids).await {
            Ok(focal) if focal.len() == days.len() => focal,
            Ok(focal) => {
                debug!(days = days.len(), focal = focal.len(), "focal column misaligned; zeroing");
                vec![0; days.len()]
            }
            Err(err) => {
                warn!(%err, "focal-count fallback failed; zeroing focal series");
                vec![0; days.len()]
            }
        }
    };

    days.into_iter()
        .zip(added)
        .zip(focal)
        .map(|((day, added_count), focal_added_count)| DayCountRow {
            day,
            added_count,
            focal_added_count: Some(focal_added_count),
        })
        .collect()
}

/// Walk every calendar day between the first and last observed day,
/// carrying both running sums; silent days contribute zero added counts
/// but still advance the cumulative values unchanged.
fn gap_fill(rows: &[(String, u64, u64)]) -> Statistics {
    let parse = |day: &str| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok();

    // Rows whose day key is not a real date cannot anchor the walk.
    let mut dated: Vec<(NaiveDate, u64, u64)> = rows
        .iter()
        .filter_map(|(day, added, focal)| {
            let date = parse(day);
            if date.is_none() {
                debug!(%day, "dropping row with unparseable day key");
            }
            date.map(|d| (d, *added, *focal))
        })
        .collect();
    if dated.is_empty() {
        return Statistics::empty();
    }
    dated.sort_by_key(|(d, _, _)| *d);

    let first = dated[0].0;
    let last = dated[dated.len() - 1].0;

    let mut daily = Vec::new();
    let mut cumulative = 0u64;
    let mut focal_cumulative = 0u64;
    let mut next_row = 0usize;
    let mut current = first;

    loop {
        let mut added = 0u64;
        let mut focal = 0u64;
        // Grouped queries emit one row per day; merging here keeps a
        // misbehaving store from silently losing counts.
        while next_row < dated.len() && dated[next_row].0 == current {
            added += dated[next_row].1;
            focal += dated[next_row].2;
            next_row += 1;
        }
        cumulative += added;
        focal_cumulative += focal;
        daily.push(DailyDataPoint {
            day: current.format("%Y-%m-%d").to_string(),
            added_count: added,
            cumulative_count: cumulative,
            focal_added_count: focal,
            focal_cumulative_count: focal_cumulative,
        });

        if current == last {
            break;
        }
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }

    let start_date = daily.first().map(|p| p.day.clone()).unwrap_or_default();
    let end_date = daily.last().map(|p| p.day.clone()).unwrap_or_default();
    Statistics {
        total_count: cumulative,
        focal_count: focal_cumulative,
        daily,
        start_date,
        end_date,
    }
}
