//! modelshop-sync: Catalog synchronization and view selection
//!
//! This crate holds the client-side state for browsing the catalog:
//! - `CatalogSync` owns the fetched record list for the active
//!   category and applies download-count updates
//! - `CatalogViewState` tracks the active category, view mode, and
//!   selection, deriving the selected record and the preview scene

pub mod catalog;
pub mod preview;
pub mod view;

pub use catalog::{CatalogSnapshot, CatalogSync};
pub use preview::PreviewScene;
pub use view::{CatalogViewState, ViewMode};
