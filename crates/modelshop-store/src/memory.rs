//! In-memory catalog store
//!
//! Backs the `--demo` daemon mode and the sync-layer tests. Queries
//! and updates can be made to fail on demand, and individual filters
//! can be given artificial latency to reproduce overlapping-load
//! orderings.

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use modelshop_core::{Category, CategoryFilter, ModelRecord, ShopError, ShopResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

use crate::traits::CatalogStore;

/// Catalog store holding records in process memory
pub struct MemoryCatalogStore {
    records: RwLock<Vec<ModelRecord>>,
    fail_queries: AtomicBool,
    fail_updates: AtomicBool,
    delays: RwLock<HashMap<CategoryFilter, Duration>>,
}

impl MemoryCatalogStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Create a store holding the given records
    pub fn with_records(records: Vec<ModelRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            fail_queries: AtomicBool::new(false),
            fail_updates: AtomicBool::new(false),
            delays: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store seeded with the demo catalog
    pub fn seeded() -> Self {
        Self::with_records(demo_records())
    }

    /// Make every subsequent query fail
    pub fn set_fail_queries(&self, fail: bool) {
        self.fail_queries.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent update fail
    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// Delay responses to queries for one filter
    pub async fn set_query_delay(&self, filter: CategoryFilter, delay: Duration) {
        self.delays.write().await.insert(filter, delay);
    }
}

impl Default for MemoryCatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn query_models(&self, filter: CategoryFilter) -> ShopResult<Vec<ModelRecord>> {
        let delay = self.delays.read().await.get(&filter).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(ShopError::Store("injected query failure".to_string()));
        }

        let records = self.records.read().await;
        let mut matched: Vec<ModelRecord> = records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn increment_downloads(&self, id: &str) -> ShopResult<()> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(ShopError::Store("injected update failure".to_string()));
        }

        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.downloads += 1;
                Ok(())
            }
            None => Err(ShopError::ModelNotFound(id.to_string())),
        }
    }

    fn resolve_public_url(&self, path: &str) -> String {
        format!("demo://models/{}", path.trim_start_matches('/'))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// The demo catalog served by `modelshopd --demo`
pub fn demo_records() -> Vec<ModelRecord> {
    let now = Utc::now();
    let entries = [
        ("1", "Modern Chair", "DesignPro", 29.99, Category::Furniture, 4.8, 1247),
        ("2", "Sci-Fi Robot", "TechArtist", 0.0, Category::Characters, 4.6, 2341),
        ("3", "Sports Car", "AutoModeler", 49.99, Category::Vehicles, 4.9, 892),
        ("4", "Medieval Sword", "FantasyCrafter", 15.99, Category::Weapons, 4.7, 1556),
        ("5", "Office Building", "ArchViz", 79.99, Category::Architecture, 4.5, 443),
        ("6", "Tree Collection", "NatureArt", 0.0, Category::Nature, 4.4, 3021),
    ];

    entries
        .iter()
        .enumerate()
        .map(|(i, (id, name, author, price, category, rating, downloads))| ModelRecord {
            id: id.to_string(),
            name: name.to_string(),
            author: author.to_string(),
            price: *price,
            category: *category,
            rating: *rating,
            downloads: *downloads,
            description: None,
            tags: None,
            file_path: format!("demo/{}.glb", id),
            thumbnail_path: None,
            // Staggered so ordering by creation time is deterministic
            created_at: now - ChronoDuration::minutes(i as i64),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_query_orders_newest_first() {
        let store = MemoryCatalogStore::seeded();
        let models = store.query_models(CategoryFilter::All).await.unwrap();
        assert_eq!(models.len(), 6);
        for pair in models.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
        assert_eq!(models[0].id, "1");
    }

    #[tokio::test]
    async fn test_query_filters_by_category() {
        let store = MemoryCatalogStore::seeded();
        let models = store
            .query_models(CategoryFilter::Only(Category::Furniture))
            .await
            .unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].name, "Modern Chair");
    }

    #[tokio::test]
    async fn test_increment_unknown_id() {
        let store = MemoryCatalogStore::seeded();
        let err = store.increment_downloads("missing").await.unwrap_err();
        assert!(matches!(err, ShopError::ModelNotFound(_)));
    }

    #[tokio::test]
    async fn test_increment_bumps_count() {
        let store = MemoryCatalogStore::seeded();
        store.increment_downloads("1").await.unwrap();
        let models = store.query_models(CategoryFilter::All).await.unwrap();
        let chair = models.iter().find(|m| m.id == "1").unwrap();
        assert_eq!(chair.downloads, 1248);
    }

    #[tokio::test]
    async fn test_injected_query_failure() {
        let store = MemoryCatalogStore::seeded();
        store.set_fail_queries(true);
        assert!(store.query_models(CategoryFilter::All).await.is_err());
        store.set_fail_queries(false);
        assert!(store.query_models(CategoryFilter::All).await.is_ok());
    }

    #[test]
    fn test_resolve_public_url() {
        let store = MemoryCatalogStore::new();
        assert_eq!(store.resolve_public_url("demo/1.glb"), "demo://models/demo/1.glb");
    }
}
