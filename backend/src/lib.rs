//! # Kiosk Devserver - local implementation of the kiosk catalogue API
//!
//! Serves the three catalogue collections (liquor master items, liquor info
//! records and offers) with the same routes and payloads as the production
//! backend, so the admin dashboard can run and be tested offline.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌──────────────┐
//! │  Dashboard  │────▶│  axum API   │────▶│ RecordStore │────▶│ snapshot.json│
//! │ (JSON/form) │     │ (validate)  │     │  (RwLock)   │     │  + images/   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types and HTTP error bodies
//! - [`models`] - Catalogue records and create payloads
//! - [`store`] - In-memory store with optional snapshot persistence
//! - [`config`] - Server configuration
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod models;

// Storage
pub mod store;

// Configuration
pub mod config;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ServerError, ServerResult, StoreError, StoreResult};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    ImageUpload,
    InfoRecord,
    MasterItem,
    NewInfoRecord,
    NewMasterItem,
    NewOfferRecord,
    OfferRecord,
};

// =============================================================================
// Re-exports - Store
// =============================================================================

pub use store::{seed, RecordCounts, RecordStore, StoredImage};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::{router, serve, start_server, AppState, ErrorBody, HealthResponse};
pub use config::{ServerConfig, DEFAULT_PORT};
