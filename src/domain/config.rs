//! Persisted Configuration
//!
//! The versioned blob the persistence collaborator loads and saves. The
//! migrator repairs its shape on load; the mapper reads
//! `source.field_mappings` in derived mode.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::link::LinkItem;

/// Current schema version; blobs with any other version are migrated
pub const SCHEMA_VERSION: &str = "1.0";

/// The five canonical target fields every derived record is projected into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetField {
    #[serde(rename = "URL")]
    Url,
    Icon,
    GroupBy,
    Description,
    Title,
}

impl TargetField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetField::Url => "URL",
            TargetField::Icon => "Icon",
            TargetField::GroupBy => "GroupBy",
            TargetField::Description => "Description",
            TargetField::Title => "Title",
        }
    }

    /// Canonical ordering of the five fields, as rebuilt by migration
    pub fn all() -> [TargetField; 5] {
        [
            TargetField::Url,
            TargetField::Icon,
            TargetField::GroupBy,
            TargetField::Description,
            TargetField::Title,
        ]
    }
}

/// Source field type of a mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Text,
    #[serde(rename = "URL")]
    Url,
    Boolean,
    Number,
}

/// One declarative mapping from a source field onto a canonical target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub name: TargetField,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub required: bool,
    /// Source field name; `None` when no association was recovered
    #[serde(rename = "mappedTo", default, skip_serializing_if = "Option::is_none")]
    pub mapped_to: Option<String>,
}

impl FieldMapping {
    pub fn new(name: TargetField, kind: FieldKind, mapped_to: Option<String>) -> Self {
        Self {
            name,
            kind,
            required: true,
            mapped_to,
        }
    }
}

/// Presentation layout recorded in the config
///
/// The migrator only ever selects `List` or `GroupedList`; the others are
/// whatever the hosting UI last chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutMode {
    RoundIconItem,
    #[default]
    List,
    GroupedList,
    Tile,
    SquareIconItem,
}

/// Derived-mode source descriptor: mappings plus opaque query shaping
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(rename = "fieldMappings", default)]
    pub field_mappings: Vec<FieldMapping>,
    #[serde(default)]
    pub filter: Value,
    #[serde(default)]
    pub sort: Value,
    #[serde(default)]
    pub max: u64,
    #[serde(rename = "selectedSource", default)]
    pub selected_source: Value,
}

/// The persisted configuration blob
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub version: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub layout: LayoutMode,
    /// Derived mode: the store is populated from an ingestion source
    #[serde(default)]
    pub uses_list_mode: bool,
    #[serde(default)]
    pub show_description: bool,
    #[serde(default)]
    pub default_expand: bool,
    /// Explicit group-order list for the grouped layout
    #[serde(default)]
    pub groups: Vec<String>,
    /// Manually entered items
    #[serde(default)]
    pub items: Vec<LinkItem>,
    /// Query descriptor handed to the ingestion collaborator
    #[serde(default)]
    pub list_query: String,
    #[serde(default)]
    pub source: SourceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            title: String::new(),
            layout: LayoutMode::default(),
            uses_list_mode: false,
            show_description: false,
            default_expand: false,
            groups: Vec::new(),
            items: Vec::new(),
            list_query: String::new(),
            source: SourceConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_field_names() {
        assert_eq!(TargetField::Url.as_str(), "URL");
        assert_eq!(TargetField::GroupBy.as_str(), "GroupBy");
        let names: Vec<&str> = TargetField::all().iter().map(|f| f.as_str()).collect();
        assert_eq!(names, vec!["URL", "Icon", "GroupBy", "Description", "Title"]);
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.groups.push("Tools".to_string());
        config.source.field_mappings.push(FieldMapping::new(
            TargetField::Url,
            FieldKind::Url,
            Some("URL".to_string()),
        ));
        let blob = serde_json::to_string(&config).expect("serialize");
        let back: Config = serde_json::from_str(&blob).expect("deserialize");
        assert_eq!(back, config);
    }

    #[test]
    fn test_default_config_is_current_version() {
        assert_eq!(Config::default().version, SCHEMA_VERSION);
    }
}
