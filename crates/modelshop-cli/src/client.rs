//! API client for communicating with the daemon
//!
//! The client implements `CatalogStore` over the daemon's REST
//! surface, so the sync layer drives the CLI exactly as it would
//! drive any other frontend.

use async_trait::async_trait;
use modelshop_core::{CategoryFilter, ModelRecord, ShopError, ShopResult, UploadDraft};
use modelshop_store::CatalogStore;
use serde::Deserialize;

pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn error_from(response: reqwest::Response) -> ShopError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::NOT_FOUND {
            ShopError::ModelNotFound(body)
        } else {
            ShopError::Api(format!("{}: {}", status, body))
        }
    }

    /// Submit an upload draft for validation
    pub async fn submit_upload(&self, draft: &UploadDraft) -> ShopResult<UploadReceipt> {
        let response = self
            .client
            .post(self.url("/api/v1/uploads"))
            .json(draft)
            .send()
            .await
            .map_err(|e| ShopError::Api(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ShopError::Api(e.to_string()))
    }

    /// Fetch system status
    pub async fn status(&self) -> ShopResult<StatusResponse> {
        let response = self
            .client
            .get(self.url("/api/v1/status"))
            .send()
            .await
            .map_err(|e| ShopError::Api(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ShopError::Api(e.to_string()))
    }
}

#[async_trait]
impl CatalogStore for ApiClient {
    async fn query_models(&self, filter: CategoryFilter) -> ShopResult<Vec<ModelRecord>> {
        let mut request = self.client.get(self.url("/api/v1/models"));
        if let CategoryFilter::Only(category) = filter {
            request = request.query(&[("category", category.to_string())]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ShopError::Api(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ShopError::Api(e.to_string()))
    }

    async fn increment_downloads(&self, id: &str) -> ShopResult<()> {
        let response = self
            .client
            .post(self.url(&format!("/api/v1/models/{}/download", id)))
            .send()
            .await
            .map_err(|e| ShopError::Api(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ShopError::ModelNotFound(id.to_string()));
        }
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        Ok(())
    }

    fn resolve_public_url(&self, path: &str) -> String {
        format!("{}/api/v1/assets/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn name(&self) -> &'static str {
        "api"
    }
}

/// Response to an upload submission
#[derive(Debug, Deserialize)]
pub struct UploadReceipt {
    pub name: String,
    pub message: String,
}

/// Status response from the daemon
#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    pub version: String,
    pub backend: String,
    pub models: usize,
    pub categories: usize,
}
