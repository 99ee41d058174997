//! modelshop-store: Catalog store backends
//!
//! This crate provides access to the hosted catalog:
//! - The `CatalogStore` capability trait
//! - An HTTP store speaking a PostgREST-style surface
//! - An in-memory store for demos and tests

pub mod http;
pub mod memory;
pub mod traits;

pub use http::HttpCatalogStore;
pub use memory::MemoryCatalogStore;
pub use traits::CatalogStore;
