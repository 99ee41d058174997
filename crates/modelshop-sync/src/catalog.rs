//! Catalog synchronization
//!
//! `CatalogSync` owns the in-memory record list for one category
//! selection. The list is replaced wholesale on every successful
//! fetch, never merged. Overlapping loads are tagged with a monotone
//! ticket; a response that was superseded by a newer load is
//! discarded instead of overwriting fresher data.

use modelshop_core::{CategoryFilter, ModelRecord};
use modelshop_store::CatalogStore;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Point-in-time copy of the sync state
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    /// Records from the most recently applied fetch
    pub models: Vec<ModelRecord>,
    /// Whether a load is outstanding
    pub loading: bool,
    /// Human-readable message from the last failed fetch, if the
    /// failure has not been superseded by a successful one
    pub error: Option<String>,
}

struct SyncState {
    models: Vec<ModelRecord>,
    loading: bool,
    error: Option<String>,
}

/// Fetches and owns the current catalog record list
pub struct CatalogSync {
    store: Arc<dyn CatalogStore>,
    state: RwLock<SyncState>,
    /// Ticket of the most recently issued load
    issued: AtomicU64,
}

impl CatalogSync {
    /// Create a sync layer over a catalog store
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store,
            state: RwLock::new(SyncState {
                models: Vec::new(),
                loading: false,
                error: None,
            }),
            issued: AtomicU64::new(0),
        }
    }

    /// Fetch the record list for a category selection
    ///
    /// On success the owned list is replaced and any error cleared.
    /// On failure the previous list is preserved (stale but
    /// available) and the error message recorded. Outstanding loads
    /// are not cancelled; a response belonging to a superseded load
    /// is discarded on arrival.
    pub async fn load(&self, filter: CategoryFilter) {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(filter = %filter, ticket, "Loading catalog");

        {
            let mut state = self.state.write().await;
            // A newer load may have been issued (and even completed)
            // before this one acquired the lock; the flag belongs to
            // the newest ticket then.
            if ticket == self.issued.load(Ordering::SeqCst) {
                state.loading = true;
            }
        }

        let result = self.store.query_models(filter).await;

        let mut state = self.state.write().await;
        if ticket != self.issued.load(Ordering::SeqCst) {
            // A newer load was issued while this one was in flight;
            // its outcome owns the state now.
            debug!(filter = %filter, ticket, "Discarding stale catalog response");
            return;
        }

        state.loading = false;
        match result {
            Ok(models) => {
                debug!(filter = %filter, count = models.len(), "Catalog loaded");
                state.models = models;
                state.error = None;
            }
            Err(e) => {
                warn!(filter = %filter, error = %e, "Catalog load failed");
                state.error = Some(e.to_string());
            }
        }
    }

    /// Record a download for one model
    ///
    /// Fire-and-forget from the caller's perspective: on remote
    /// success the local copy of the record is bumped immediately,
    /// on failure local state is left untouched and the failure is
    /// only logged.
    pub async fn increment_downloads(&self, id: &str) {
        match self.store.increment_downloads(id).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                if let Some(record) = state.models.iter_mut().find(|m| m.id == id) {
                    record.downloads += 1;
                    debug!(model_id = %id, downloads = record.downloads, "Download recorded");
                }
            }
            Err(e) => {
                warn!(model_id = %id, error = %e, "Failed to record download");
            }
        }
    }

    /// Copy the current state
    pub async fn snapshot(&self) -> CatalogSnapshot {
        let state = self.state.read().await;
        CatalogSnapshot {
            models: state.models.clone(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }

    /// Find a record in the current list by id
    pub async fn get(&self, id: &str) -> Option<ModelRecord> {
        let state = self.state.read().await;
        state.models.iter().find(|m| m.id == id).cloned()
    }

    /// Resolve a storage path through the underlying store
    pub fn resolve_asset_url(&self, path: &str) -> String {
        self.store.resolve_public_url(path)
    }
}
