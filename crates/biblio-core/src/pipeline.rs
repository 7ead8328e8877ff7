// File: crates/biblio-core/src/pipeline.rs
// Summary: Explicit refresh pipeline with generation-counter staleness protection.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{instrument, warn};

use crate::aggregate::aggregate;
use crate::markers::extract_markers;
use crate::prefs::parse_tag_filter;
use crate::store::LibraryStore;
use crate::types::{LibraryScope, PublicationMarkers, Statistics, TagId};

/// Issues one generation token per refresh so that a slow computation
/// finishing after a newer request cannot overwrite displayed state.
#[derive(Debug, Default)]
pub struct RefreshGate {
    current: AtomicU64,
}

impl RefreshGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, superseding all earlier tokens.
    pub fn begin(&self) -> u64 {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.current.load(Ordering::SeqCst) == token
    }
}

/// Everything one refresh computed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshSnapshot {
    pub statistics: Statistics,
    pub markers: PublicationMarkers,
    pub focal_tag_ids: Vec<TagId>,
}

/// Outcome of one refresh invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    Fresh(RefreshSnapshot),
    /// A newer refresh began while this one ran; drop the result.
    Superseded,
}

/// Run one full refresh: parse the saved tag filter, resolve tag ids,
/// aggregate the dual series, then extract publication markers - a
/// strict sequential pipeline over explicit arguments. The result is
/// `Superseded` when another call to [`refresh`] with the same gate
/// started after this one.
#[instrument(skip(gate, store), fields(library = scope.library_id))]
pub async fn refresh(
    gate: &RefreshGate,
    store: &dyn LibraryStore,
    scope: LibraryScope,
    tag_filter: &str,
) -> RefreshOutcome {
    let token = gate.begin();

    let names = parse_tag_filter(tag_filter);
    let focal_tag_ids = if names.is_empty() {
        Vec::new()
    } else {
        match store.resolve_tag_ids(&names).await {
            Ok(ids) => ids,
            Err(err) => {
                warn!(%err, "tag resolution failed; refreshing without focal filter");
                Vec::new()
            }
        }
    };

    let statistics = aggregate(store, scope, &focal_tag_ids).await;
    let markers = extract_markers(store, scope).await;

    if !gate.is_current(token) {
        return RefreshOutcome::Superseded;
    }
    RefreshOutcome::Fresh(RefreshSnapshot { statistics, markers, focal_tag_ids })
}
