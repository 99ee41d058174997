//! REST API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Json, Redirect},
    routing::{get, post},
    Router,
};
use modelshop_core::{Category, CategoryFilter, ModelRecord, ShopError, UploadDraft};
use modelshop_store::CatalogStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Application state shared across handlers
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
}

/// Create the API router
pub fn create_router(store: Arc<dyn CatalogStore>) -> Router {
    let state = Arc::new(AppState { store });

    Router::new()
        .route("/api/v1/models", get(list_models))
        .route("/api/v1/models/:id", get(get_model))
        .route("/api/v1/models/:id/download", post(record_download))
        .route("/api/v1/models/:id/preview", get(get_preview))
        .route("/api/v1/assets/*path", get(redirect_asset))
        .route("/api/v1/uploads", post(submit_upload))
        .route("/api/v1/status", get(get_status))
        .with_state(state)
}

fn store_error(e: ShopError) -> (StatusCode, String) {
    match e {
        ShopError::ModelNotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
        ShopError::UnknownCategory(_) => (StatusCode::BAD_REQUEST, e.to_string()),
        ShopError::Store(_) => (StatusCode::BAD_GATEWAY, e.to_string()),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

/// Query parameters for the model listing
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Category name, or "all"; absent means all
    pub category: Option<String>,
}

/// List models, newest first, optionally filtered by category
async fn list_models(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ModelRecord>>, (StatusCode, String)> {
    let filter = match params.category.as_deref() {
        Some(name) => name
            .parse::<CategoryFilter>()
            .map_err(store_error)?,
        None => CategoryFilter::All,
    };

    let models = state
        .store
        .query_models(filter)
        .await
        .map_err(store_error)?;

    Ok(Json(models))
}

async fn find_model(
    state: &AppState,
    id: &str,
) -> Result<ModelRecord, (StatusCode, String)> {
    let models = state
        .store
        .query_models(CategoryFilter::All)
        .await
        .map_err(store_error)?;

    models
        .into_iter()
        .find(|m| m.id == id)
        .ok_or_else(|| store_error(ShopError::ModelNotFound(id.to_string())))
}

/// Get a single model by id
async fn get_model(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ModelRecord>, (StatusCode, String)> {
    let model = find_model(&state, &id).await?;
    Ok(Json(model))
}

/// Record a download for a model
async fn record_download(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    info!(model_id = %id, "Recording download");

    state
        .store
        .increment_downloads(&id)
        .await
        .map_err(store_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Preview information for a model
#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewResponse {
    /// Public URL of the primary asset
    pub url: String,
    /// Display name for the overlay
    pub name: String,
}

/// Get the resolved preview URL for a model
async fn get_preview(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PreviewResponse>, (StatusCode, String)> {
    let model = find_model(&state, &id).await?;
    Ok(Json(PreviewResponse {
        url: state.store.resolve_public_url(&model.file_path),
        name: model.name,
    }))
}

/// Redirect a storage path to its public URL
async fn redirect_asset(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Redirect {
    Redirect::temporary(&state.store.resolve_public_url(&path))
}

/// Response to an upload submission
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadReceipt {
    /// Name the draft was submitted under
    pub name: String,
    /// Human-readable outcome notice
    pub message: String,
}

/// Validate an upload draft
///
/// There is no upload pipeline; a valid draft is acknowledged and
/// dropped.
async fn submit_upload(
    Json(draft): Json<UploadDraft>,
) -> Result<(StatusCode, Json<UploadReceipt>), (StatusCode, String)> {
    draft
        .validate()
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    info!(name = %draft.name, category = %draft.category, "Upload draft validated");

    Ok((
        StatusCode::ACCEPTED,
        Json(UploadReceipt {
            name: draft.name,
            message: "draft validated; model storage is not available yet".to_string(),
        }),
    ))
}

/// System status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Daemon version
    pub version: String,
    /// Catalog store backend name
    pub backend: String,
    /// Number of models in the catalog
    pub models: usize,
    /// Number of fixed categories
    pub categories: usize,
}

/// Get system status
async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, (StatusCode, String)> {
    let models = state
        .store
        .query_models(CategoryFilter::All)
        .await
        .map_err(store_error)?;

    Ok(Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.store.name().to_string(),
        models: models.len(),
        categories: Category::ALL.len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use modelshop_store::MemoryCatalogStore;
    use tower::ServiceExt;

    fn demo_router() -> Router {
        create_router(Arc::new(MemoryCatalogStore::seeded()))
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_models() {
        let response = demo_router()
            .oneshot(Request::builder().uri("/api/v1/models").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let models: Vec<ModelRecord> = body_json(response).await;
        assert_eq!(models.len(), 6);
    }

    #[tokio::test]
    async fn test_list_models_filtered() {
        let response = demo_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/models?category=Weapons")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let models: Vec<ModelRecord> = body_json(response).await;
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].name, "Medieval Sword");
    }

    #[tokio::test]
    async fn test_list_models_bad_category() {
        let response = demo_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/models?category=gadgets")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_download_unknown_model() {
        let response = demo_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/models/missing/download")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_download_returns_no_content() {
        let response = demo_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/models/1/download")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_preview_resolves_url() {
        let response = demo_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/models/2/preview")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let preview: PreviewResponse = body_json(response).await;
        assert_eq!(preview.url, "demo://models/demo/2.glb");
        assert_eq!(preview.name, "Sci-Fi Robot");
    }

    #[tokio::test]
    async fn test_asset_redirect() {
        let response = demo_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/assets/demo/1.glb")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers().get("location").unwrap(),
            "demo://models/demo/1.glb"
        );
    }

    #[tokio::test]
    async fn test_upload_rejects_invalid_draft() {
        let body = serde_json::json!({
            "name": "",
            "category": "Weapons",
            "files": []
        });
        let response = demo_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/uploads")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_upload_accepts_valid_draft() {
        let body = serde_json::json!({
            "name": "Pine Tree",
            "category": "Nature",
            "price": 0.0,
            "files": [{ "name": "pine.glb", "size": 1024 }]
        });
        let response = demo_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/uploads")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let receipt: UploadReceipt = body_json(response).await;
        assert_eq!(receipt.name, "Pine Tree");
    }

    #[tokio::test]
    async fn test_status() {
        let response = demo_router()
            .oneshot(Request::builder().uri("/api/v1/status").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let status: StatusResponse = body_json(response).await;
        assert_eq!(status.models, 6);
        assert_eq!(status.backend, "memory");
    }
}
