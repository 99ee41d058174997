//! Catalog store trait definition

use async_trait::async_trait;
use modelshop_core::{CategoryFilter, ModelRecord, ShopResult};

/// Capability interface over the hosted catalog
///
/// The sync layer and the API server only ever talk to the remote
/// service through this trait, so both run unchanged against the
/// in-memory store.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetch all records passing the filter, ordered by creation
    /// timestamp descending
    async fn query_models(&self, filter: CategoryFilter) -> ShopResult<Vec<ModelRecord>>;

    /// Increment the stored download count for one record
    async fn increment_downloads(&self, id: &str) -> ShopResult<()>;

    /// Resolve a storage path into a fetchable URL
    ///
    /// This is a pure transformation; no network round trip happens
    /// here.
    fn resolve_public_url(&self, path: &str) -> String;

    /// Get the store backend name
    fn name(&self) -> &'static str;
}
