//! # Persistence Error Types
//!
//! Error types for snapshot storage and configuration.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io / serde_json / toml errors                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PersistError (this module)                                            │
//! │       │                                                                 │
//! │       ├──► PersistedStore: logged at warn, never reaches the caller    │
//! │       │                                                                 │
//! │       └──► TillConfig::load / till-seed: returned to the caller        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Snapshot storage and configuration errors.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Reading or writing the backing file failed.
    ///
    /// ## When This Occurs
    /// - Data directory can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The stored blob is not valid snapshot JSON.
    #[error("Snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The config file could not be parsed.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The config could not be written out as TOML.
    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Config values failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The stored envelope was written by a newer (or unknown) format.
    #[error("Unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

/// Result type for persistence operations.
pub type PersistResult<T> = Result<T, PersistError>;
