//! Schema Migrator
//!
//! Upgrades a persisted configuration blob to the current schema version.
//! Modeled as a small state machine keyed by the version string: one
//! deterministic transition function per version pair, applied until the
//! blob reports [`SCHEMA_VERSION`]. Runs before anything else on load.

use serde_json::{json, Value};

use crate::domain::{
    Config, EngineError, FieldKind, FieldMapping, LayoutMode, TargetField, SCHEMA_VERSION,
};

const LOG_SOURCE: &str = "SchemaMigrator";

/// Display names of the legacy mappings whose associations carry forward
const LEGACY_URL: &str = "URL";
const LEGACY_ICON: &str = "Font Awesome Icon";
const LEGACY_GROUP_BY: &str = "Group By";

type Transition = fn(Value) -> Value;

/// Transition out of `version`, or `None` once the blob is current
fn transition_for(version: &str) -> Option<Transition> {
    match version {
        SCHEMA_VERSION => None,
        // Every pre-1.0 shape goes through the same destructive reset
        _ => Some(upgrade_legacy_to_1_0),
    }
}

/// Migrate a persisted blob to the current schema.
///
/// A missing or malformed blob is replaced by a default skeleton before
/// migration proceeds. A blob already at [`SCHEMA_VERSION`] passes through
/// unchanged (the migration is one-way; re-running it is a no-op).
pub fn migrate_blob(blob: Option<&str>) -> Config {
    let mut value = match blob {
        Some(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Value::Object(map),
            Ok(_) => {
                let err = EngineError::Migration("blob is not an object".to_string());
                log::error!("{} - {} (migrate_blob)", err, LOG_SOURCE);
                default_skeleton()
            }
            Err(err) => {
                let err = EngineError::Migration(err.to_string());
                log::error!("{} - {} (migrate_blob)", err, LOG_SOURCE);
                default_skeleton()
            }
        },
        None => default_skeleton(),
    };

    while let Some(transition) = transition_for(version_of(&value)) {
        value = transition(value);
    }

    match serde_json::from_value::<Config>(value) {
        Ok(config) => config,
        Err(err) => {
            let err = EngineError::Migration(err.to_string());
            log::error!("{} - {} (migrate_blob)", err, LOG_SOURCE);
            Config::default()
        }
    }
}

/// Empty legacy-shaped skeleton: no version, no mappings, nothing selected
fn default_skeleton() -> Value {
    json!({
        "data": {
            "filter": [],
            "max": 0,
            "selectedList": {},
            "sort": {},
            "fieldMappings": []
        }
    })
}

fn version_of(value: &Value) -> &str {
    value.get("version").and_then(Value::as_str).unwrap_or("")
}

/// The one-way legacy -> 1.0 transition.
///
/// Recovers the URL / Icon / GroupBy source associations from the old
/// mapping list by display name (a missing entry yields an empty
/// association), rebuilds the five canonical mappings in fixed order, and
/// destructively resets items and groups. The old "Group By" enabled flag
/// decides between the grouped and flat layouts.
fn upgrade_legacy_to_1_0(old: Value) -> Value {
    // Legacy blobs kept the source descriptor under "data"; tolerate the
    // current key as well so a half-written blob still migrates.
    let empty = json!({});
    let old_source = old.get("data").or_else(|| old.get("source")).unwrap_or(&empty);
    let old_mappings = old_source
        .get("fieldMappings")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mapped_to = |display_name: &str| -> Option<String> {
        old_mappings
            .iter()
            .find(|m| m.get("name").and_then(Value::as_str) == Some(display_name))
            .and_then(|m| m.get("mappedTo"))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    let group_enabled = old_mappings
        .iter()
        .find(|m| m.get("name").and_then(Value::as_str) == Some(LEGACY_GROUP_BY))
        .and_then(|m| m.get("enabled"))
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let field_mappings = vec![
        FieldMapping::new(TargetField::Url, FieldKind::Url, mapped_to(LEGACY_URL)),
        FieldMapping::new(TargetField::Icon, FieldKind::Text, mapped_to(LEGACY_ICON)),
        FieldMapping::new(TargetField::GroupBy, FieldKind::Text, mapped_to(LEGACY_GROUP_BY)),
        FieldMapping::new(TargetField::Description, FieldKind::Text, None),
        FieldMapping::new(TargetField::Title, FieldKind::Text, Some("Title".to_string())),
    ];

    let mut config = Config::default();
    config.version = SCHEMA_VERSION.to_string();
    config.title = str_field(&old, "title");
    config.list_query = str_field(&old, "listQuery");
    config.layout = if group_enabled {
        LayoutMode::GroupedList
    } else {
        LayoutMode::List
    };
    config.uses_list_mode = true;
    config.show_description = false;
    // Destructive by design: prior manual items and group order are reset
    config.groups = Vec::new();
    config.items = Vec::new();
    config.source.field_mappings = field_mappings;
    config.source.filter = old_source.get("filter").cloned().unwrap_or(Value::Null);
    config.source.sort = old_source.get("sort").cloned().unwrap_or(Value::Null);
    config.source.max = old_source.get("max").and_then(Value::as_u64).unwrap_or(0);
    config.source.selected_source = old_source
        .get("selectedList")
        .or_else(|| old_source.get("selectedSource"))
        .cloned()
        .unwrap_or(Value::Null);

    serde_json::to_value(config).unwrap_or_else(|err| {
        log::error!("{} - {} (upgrade_legacy_to_1_0)", err, LOG_SOURCE);
        json!({ "version": SCHEMA_VERSION })
    })
}

fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
