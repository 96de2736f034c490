//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities,
//! plus the crate-wide error type shared by every layer.

use serde::{Deserialize, Serialize};

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Common result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine-level errors
///
/// `OutOfRange` and `InvalidPermutation` mark contract violations on store
/// operations and are surfaced to the caller. The rest are caught, logged
/// and absorbed at the operation boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineError {
    OutOfRange(String),
    InvalidPermutation(String),
    Validation(String),
    Migration(String),
    Ingestion(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::OutOfRange(msg) => write!(f, "Out of range: {}", msg),
            EngineError::InvalidPermutation(msg) => write!(f, "Invalid permutation: {}", msg),
            EngineError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            EngineError::Migration(msg) => write!(f, "Migration failed: {}", msg),
            EngineError::Ingestion(msg) => write!(f, "Ingestion failed: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}
