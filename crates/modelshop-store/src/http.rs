//! HTTP catalog store
//!
//! Speaks a PostgREST-style surface: row queries under `/rest/v1`,
//! named RPCs for mutations, and public object URLs under
//! `/storage/v1/object/public`.

use async_trait::async_trait;
use modelshop_core::{CategoryFilter, ModelRecord, ShopError, ShopResult, StoreConfig};
use serde_json::json;
use tracing::debug;

use crate::traits::CatalogStore;

/// Catalog store backed by a hosted PostgREST-style service
pub struct HttpCatalogStore {
    base_url: String,
    api_key: Option<String>,
    table: String,
    bucket: String,
    client: reqwest::Client,
}

impl HttpCatalogStore {
    /// Create a store from daemon configuration
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            table: config.table.clone(),
            bucket: config.bucket.clone(),
            client: reqwest::Client::new(),
        }
    }

    /// Build the row-query URL for a filter
    fn query_url(&self, filter: CategoryFilter) -> String {
        let mut url = format!(
            "{}/rest/v1/{}?select=*&order=created_at.desc",
            self.base_url, self.table
        );
        if let CategoryFilter::Only(category) = filter {
            url.push_str(&format!("&category=eq.{}", category));
        }
        url
    }

    /// Attach API key headers to a request
    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => req.header("apikey", key).bearer_auth(key),
            None => req,
        }
    }
}

#[async_trait]
impl CatalogStore for HttpCatalogStore {
    async fn query_models(&self, filter: CategoryFilter) -> ShopResult<Vec<ModelRecord>> {
        let url = self.query_url(filter);
        debug!(url = %url, "Querying catalog");

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| ShopError::Store(format!("query failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ShopError::Store(format!(
                "query returned {}: {}",
                status, body
            )));
        }

        response
            .json::<Vec<ModelRecord>>()
            .await
            .map_err(|e| ShopError::Store(format!("invalid query response: {}", e)))
    }

    async fn increment_downloads(&self, id: &str) -> ShopResult<()> {
        let url = format!("{}/rest/v1/rpc/increment_downloads", self.base_url);
        debug!(model_id = %id, "Recording download");

        let response = self
            .authorize(self.client.post(&url))
            .json(&json!({ "model_id": id }))
            .send()
            .await
            .map_err(|e| ShopError::Store(format!("update failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ShopError::ModelNotFound(id.to_string()));
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ShopError::Store(format!(
                "update returned {}: {}",
                status, body
            )));
        }

        Ok(())
    }

    fn resolve_public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            self.bucket,
            path.trim_start_matches('/')
        )
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelshop_core::Category;

    fn store() -> HttpCatalogStore {
        HttpCatalogStore::new(&StoreConfig {
            base_url: "https://shop.example.com/".to_string(),
            api_key: Some("secret".to_string()),
            table: "models".to_string(),
            bucket: "assets".to_string(),
        })
    }

    #[test]
    fn test_query_url_all() {
        assert_eq!(
            store().query_url(CategoryFilter::All),
            "https://shop.example.com/rest/v1/models?select=*&order=created_at.desc"
        );
    }

    #[test]
    fn test_query_url_filtered() {
        assert_eq!(
            store().query_url(CategoryFilter::Only(Category::Furniture)),
            "https://shop.example.com/rest/v1/models?select=*&order=created_at.desc&category=eq.Furniture"
        );
    }

    #[test]
    fn test_resolve_public_url() {
        let s = store();
        assert_eq!(
            s.resolve_public_url("chairs/modern.glb"),
            "https://shop.example.com/storage/v1/object/public/assets/chairs/modern.glb"
        );
        // Leading slashes in stored paths do not double up
        assert_eq!(
            s.resolve_public_url("/chairs/modern.glb"),
            "https://shop.example.com/storage/v1/object/public/assets/chairs/modern.glb"
        );
    }
}
