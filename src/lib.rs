//! linkhub
//!
//! Link collection & grouping engine. Layered architecture:
//! - domain: Core entities, configuration and the shared error type
//! - store: Ordered in-memory link store
//! - mapper / grouping / migration / session: the core algorithms
//! - ingest: Async seam to the external query collaborator
//! - engine: The façade the hosting UI calls
//!
//! Rendering, persistence and query execution are external collaborators;
//! caught failures are reported through the `log` facade as
//! `error - component (operation)` triples.

pub mod domain;
pub mod engine;
pub mod grouping;
pub mod ingest;
pub mod mapper;
pub mod migration;
pub mod session;
pub mod store;

pub use domain::{
    Config, EngineError, EngineResult, FieldKind, FieldMapping, GroupHeading, LayoutMode,
    LinkGroup, LinkId, LinkItem, SourceConfig, TargetField, SCHEMA_VERSION, UNGROUPED,
};
pub use engine::LinkEngine;
pub use grouping::group_links;
pub use ingest::IngestionSource;
pub use mapper::{FieldMapper, RawRecord};
pub use migration::migrate_blob;
pub use session::{
    validate_field, EditSession, DESCRIPTION_MAX_LEN, GROUP_BY_MAX_LEN, ICON_MAX_LEN,
    REQUIRED_VALUE_ERROR, TITLE_MAX_LEN,
};
pub use store::LinkStore;
