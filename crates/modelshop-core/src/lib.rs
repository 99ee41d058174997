//! modelshop-core: Core types for the modelshop catalog
//!
//! This crate provides the fundamental types used throughout modelshop:
//! - Model records and the category enumeration
//! - Upload draft validation
//! - Configuration types
//! - Error handling

pub mod config;
pub mod error;
pub mod model;
pub mod upload;

pub use config::*;
pub use error::*;
pub use model::*;
pub use upload::*;
