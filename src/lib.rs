//! # cadop - ANS registered operators registry, converted and queryable
//!
//! cadop converts the semicolon-delimited registry export published by the
//! Brazilian health agency (ANS) into JSON, then serves it through a small
//! read-only HTTP query API with exact-match and multi-field filters.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │ Registry CSV │────▶│   Convert   │────▶│  JSON array  │────▶│  Query API  │
//! │ (`;`, latin1)│     │ (auto-enc)  │     │ (flat, null) │     │ (axum, 404) │
//! └──────────────┘     └─────────────┘     └──────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cadop::{query, store::OperatorStore};
//!
//! let store = OperatorStore::new("Relatorio_cadop.json");
//! let records = store.load().unwrap();
//! let hits = query::by_uf(&records, "SP").unwrap();
//! println!("{} operators in SP", hits.len());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain model ([`Operator`])
//! - [`convert`] - CSV to JSON conversion with auto-detection
//! - [`store`] - Data file loading
//! - [`query`] - Filter engine and named lookups
//! - [`validation`] - Dataset shape validation
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod models;

// Conversion
pub mod convert;

// Data loading
pub mod store;

// Filtering
pub mod query;

// Validation
pub mod validation;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ConvertError, QueryError, StoreError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::Operator;

// =============================================================================
// Re-exports - Conversion
// =============================================================================

pub use convert::{
    convert_bytes, convert_csv_file, decode_content, detect_delimiter, detect_encoding,
    write_json, Conversion,
};

// =============================================================================
// Re-exports - Store
// =============================================================================

pub use store::{OperatorStore, DEFAULT_DATA_FILE};

// =============================================================================
// Re-exports - Query
// =============================================================================

pub use query::{
    by_cidade, by_cnpj, by_modalidade, by_registro, by_uf, filter, todos, SearchCriteria,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{is_valid, is_valid_dataset, validate, validate_dataset};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{error_body, ApiError, TodosResponse};

// Server
pub mod server {
    pub use crate::api::server::{router, start_server};
}
