//! Client for the hosted storefront backend.
//!
//! Writes imported products in idempotent batches and reads the public
//! catalog through the store's remote procedures.

pub mod batch;
pub mod catalog;
pub mod client;
pub mod error;
pub(crate) mod retry;

pub use batch::{partition, write_batches, BatchResult, ImportSummary, BATCH_SIZE};
pub use catalog::{CatalogBrand, CatalogProduct, CatalogQuery, DEFAULT_PAGE_LIMIT};
pub use client::StoreClient;
pub use error::StoreError;
