//! Field Mapper
//!
//! Projects raw records from an external source into canonical link items
//! using the declarative field-mapping list. A record whose mapped URL is
//! missing is dropped; the batch continues.

use serde_json::{Map, Value};

use crate::domain::{FieldKind, FieldMapping, LinkItem, TargetField};

/// One raw record from the ingestion collaborator: an opaque key→value map
pub type RawRecord = Map<String, Value>;

/// Wire keys of a URL-kind source value (an address/display-text pair)
const URL_ADDRESS_KEY: &str = "Url";
const URL_TEXT_KEY: &str = "Description";

const LOG_SOURCE: &str = "FieldMapper";

/// Canonical fields of one projected record, before item assembly
#[derive(Debug, Default)]
struct Projection {
    url: Option<String>,
    url_text: Option<String>,
    title: Option<String>,
    description: Option<String>,
    icon: Option<String>,
    group_by: Option<String>,
}

/// Projects raw records through a field-mapping list
pub struct FieldMapper<'a> {
    mappings: &'a [FieldMapping],
}

impl<'a> FieldMapper<'a> {
    pub fn new(mappings: &'a [FieldMapping]) -> Self {
        Self { mappings }
    }

    /// Project one raw record into a link item.
    ///
    /// Returns `None` when the mapped URL is null or absent (the one
    /// de-facto-required field, enforced after projection). The returned
    /// item carries id 0; the store assigns the real identifier on add.
    pub fn project_record(&self, record: &RawRecord) -> Option<LinkItem> {
        let mut fields = Projection::default();

        for mapping in self.mappings {
            let value = mapping
                .mapped_to
                .as_deref()
                .and_then(|source| record.get(source));

            match mapping.kind {
                FieldKind::Url => {
                    // The source value is a pair: target address + display text
                    fields.url = value
                        .and_then(|v| v.get(URL_ADDRESS_KEY))
                        .and_then(value_to_string);
                    fields.url_text = value
                        .and_then(|v| v.get(URL_TEXT_KEY))
                        .and_then(value_to_string);
                }
                _ => {
                    let text = value.and_then(value_to_string);
                    match mapping.name {
                        TargetField::Title => fields.title = text,
                        TargetField::Description => fields.description = text,
                        TargetField::Icon => fields.icon = text,
                        TargetField::GroupBy => fields.group_by = text,
                        TargetField::Url => {}
                    }
                }
            }
        }

        let url = match fields.url {
            Some(url) => url,
            None => {
                log::debug!("record has no mapped URL, dropped - {} (project_record)", LOG_SOURCE);
                return None;
            }
        };

        // The display text doubles as the title unless it is just the
        // address echoed back, in which case the mapped Title wins.
        let title = match fields.url_text {
            Some(ref text) if *text == url => fields.title.unwrap_or_default(),
            Some(text) => text,
            None => String::new(),
        };

        let mut item = LinkItem::new(0, title, url);
        item.description = fields.description.unwrap_or_default();
        item.icon = fields.icon.unwrap_or_default();
        item.group_by = fields.group_by.unwrap_or_default();
        Some(item)
    }

    /// Project a whole batch, accumulating distinct non-empty group values
    /// into `groups` in first-seen order. An empty `groups` list is seeded
    /// by this pass; a non-empty one gets unseen groups appended.
    pub fn project_batch(&self, records: &[RawRecord], groups: &mut Vec<String>) -> Vec<LinkItem> {
        let mut items = Vec::new();
        for record in records {
            if let Some(item) = self.project_record(record) {
                if !item.group_by.is_empty() && !groups.iter().any(|g| g == &item.group_by) {
                    groups.push(item.group_by.clone());
                }
                items.push(item);
            }
        }
        items
    }
}

/// Verbatim copy of a scalar source value; null and composites map to None
fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => None,
        _ => None,
    }
}
