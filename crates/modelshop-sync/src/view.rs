//! Page-level view state
//!
//! `CatalogViewState` coordinates the active category, the view mode,
//! and the current selection. The selected record is derived from the
//! sync layer on every read, so a reload that drops the record
//! implicitly clears the selection.

use modelshop_core::{CategoryFilter, ModelRecord};
use std::sync::Arc;
use tracing::debug;

use crate::catalog::CatalogSync;
use crate::preview::PreviewScene;

/// Catalog rendering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Card grid
    #[default]
    Grid,
    /// One row per model
    List,
}

/// Controller for the catalog page
pub struct CatalogViewState {
    sync: Arc<CatalogSync>,
    category: CategoryFilter,
    view_mode: ViewMode,
    selected: Option<String>,
}

impl CatalogViewState {
    /// Create a view over a sync layer, with the "all" category,
    /// grid mode, and no selection
    pub fn new(sync: Arc<CatalogSync>) -> Self {
        Self {
            sync,
            category: CategoryFilter::All,
            view_mode: ViewMode::Grid,
            selected: None,
        }
    }

    /// Active category filter
    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    /// Active view mode
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Change the view mode
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// Underlying sync layer
    pub fn sync(&self) -> &Arc<CatalogSync> {
        &self.sync
    }

    /// Change the active category and reload the catalog for it
    pub async fn select_category(&mut self, filter: CategoryFilter) {
        debug!(filter = %filter, "Selecting category");
        self.category = filter;
        self.sync.load(filter).await;
    }

    /// Select a model by id
    ///
    /// Ids absent from the current list are ignored, so a stray
    /// selection can never break the preview pane.
    pub async fn select_model(&mut self, id: &str) {
        if self.sync.get(id).await.is_some() {
            self.selected = Some(id.to_string());
        } else {
            debug!(model_id = %id, "Ignoring selection of unknown model");
        }
    }

    /// The record matching the current selection, derived from the
    /// current list
    pub async fn selected_record(&self) -> Option<ModelRecord> {
        match &self.selected {
            Some(id) => self.sync.get(id).await,
            None => None,
        }
    }

    /// What the preview pane should display right now
    pub async fn preview_scene(&self) -> PreviewScene {
        match self.selected_record().await {
            Some(record) => PreviewScene::Asset {
                url: self.sync.resolve_asset_url(&record.file_path),
                name: record.name,
            },
            None => PreviewScene::Placeholder,
        }
    }
}
