//! modelshop-api: REST API server for modelshop
//!
//! This crate provides the REST surface for browsing the catalog:
//! - Model listing with category filtering
//! - Download recording
//! - Asset URL resolution
//! - Upload draft validation

pub mod rest;

pub use rest::create_router;
