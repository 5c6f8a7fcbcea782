//! Storage abstraction for shamba.
//!
//! Backend crates (e.g., shamba-store-memory) implement the [`Store`] trait so
//! the service layer doesn't depend on any specific document database or
//! persistence layout. All collection methods are **scoped by workspace**:
//! each workspace is a tenant boundary holding its own isolated collections.

use thiserror::Error;

mod store;
mod types;

pub use store::*;
pub use types::*;

/// Uniform error type for all storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,
    #[error("already exists")]
    AlreadyExists,
    #[error("conflict")]
    Conflict,
    #[error("backend error: {0}")]
    Backend(String),
}
