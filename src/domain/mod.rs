//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO external dependencies (except serde for serialization).

mod config;
mod entity;
mod link;

pub use config::{
    Config, FieldKind, FieldMapping, LayoutMode, SourceConfig, TargetField, SCHEMA_VERSION,
};
pub use entity::{EngineError, EngineResult, Entity};
pub use link::{GroupHeading, LinkGroup, LinkId, LinkItem, UNGROUPED};
