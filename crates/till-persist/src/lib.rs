//! # till-persist: Snapshot Persistence for Till POS
//!
//! Keeps a [`till_core::PosStore`] in a storage slot that survives restarts.
//! The whole state is written as one JSON document after every mutation,
//! the same way the browser front end keeps it in local storage.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Till POS Data Flow                               │
//! │                                                                         │
//! │  UI action (add to cart, checkout, edit user ...)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  till-persist (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ PersistedStore │    │   Backends    │    │  TillConfig  │  │   │
//! │  │   │ (persisted.rs) │───►│ (backend.rs)  │    │ (config.rs)  │  │   │
//! │  │   │                │    │               │    │              │  │   │
//! │  │   │ apply / reset  │    │ MemoryBackend │    │ till.toml    │  │   │
//! │  │   │ open           │    │ FileBackend   │    │ TILL_* env   │  │   │
//! │  │   └────────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │          │                                                      │   │
//! │  └──────────┼──────────────────────────────────────────────────────┘   │
//! │             ▼                                                           │
//! │      till-core PosStore (pure state, no I/O)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`backend`] - Key-value blob storage (memory, file)
//! - [`persisted`] - Restore-or-seed and save-after-mutate wrapper
//! - [`config`] - Storage location and key
//! - [`error`] - Persistence error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use till_persist::{FileBackend, PersistedStore, TillConfig};
//! use till_core::PaymentMethod;
//!
//! let config = TillConfig::load_or_default(None);
//! let backend = FileBackend::new(config.data_dir());
//! let mut pos = PersistedStore::open(backend, config.storage_key());
//!
//! pos.apply(|s| s.login("cashier@example.com", "cashier123")).ok();
//! let sale = pos.apply(|s| s.complete_transaction(PaymentMethod::Cash));
//! ```

use tracing_subscriber::EnvFilter;

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod config;
pub mod error;
pub mod persisted;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{FileBackend, MemoryBackend, SnapshotBackend};
pub use config::{StorageSettings, TillConfig};
pub use error::{PersistError, PersistResult};
pub use persisted::{PersistedStore, SNAPSHOT_VERSION};

/// Storage slot used when nothing else is configured.
pub const DEFAULT_STORAGE_KEY: &str = "pos-storage";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=till_core=trace` - Trace the state store only
/// - Default: INFO, DEBUG for till crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,till_core=debug,till_persist=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
