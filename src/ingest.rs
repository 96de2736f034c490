//! Ingestion Seam
//!
//! Abstract interface to the external query collaborator. The engine hands
//! over a query descriptor string and consumes the resulting ordered record
//! sequence; all query mechanics live behind this trait.

use async_trait::async_trait;

use crate::domain::{EngineResult, FieldMapping, LinkItem};
use crate::mapper::{FieldMapper, RawRecord};

/// External structured data source for derived mode.
///
/// Implementations return records as opaque key→value maps in source
/// order. Failures surface as `EngineError::Ingestion` and leave the
/// caller's state untouched.
#[async_trait]
pub trait IngestionSource: Send + Sync {
    async fn fetch(&self, query: &str) -> EngineResult<Vec<RawRecord>>;
}

/// Fetch one batch and project it through the field mappings.
///
/// On success returns the projected items, with `groups` seeded/extended
/// in first-seen order; on failure the error propagates and `groups` is
/// not modified.
pub async fn fetch_links<S: IngestionSource + ?Sized>(
    source: &S,
    query: &str,
    mappings: &[FieldMapping],
    groups: &mut Vec<String>,
) -> EngineResult<Vec<LinkItem>> {
    let records = source.fetch(query).await?;
    let mapper = FieldMapper::new(mappings);
    Ok(mapper.project_batch(&records, groups))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EngineError, FieldKind, TargetField};
    use serde_json::json;

    struct FixedSource {
        records: Vec<RawRecord>,
    }

    #[async_trait]
    impl IngestionSource for FixedSource {
        async fn fetch(&self, _query: &str) -> EngineResult<Vec<RawRecord>> {
            Ok(self.records.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl IngestionSource for FailingSource {
        async fn fetch(&self, _query: &str) -> EngineResult<Vec<RawRecord>> {
            Err(EngineError::Ingestion("query failed".to_string()))
        }
    }

    fn url_mapping() -> Vec<FieldMapping> {
        vec![
            FieldMapping::new(TargetField::Url, FieldKind::Url, Some("LinkUrl".to_string())),
            FieldMapping::new(TargetField::GroupBy, FieldKind::Text, Some("LinkCategory".to_string())),
        ]
    }

    #[tokio::test]
    async fn test_fetch_projects_and_seeds_groups() {
        let source = FixedSource {
            records: vec![
                json!({ "LinkUrl": { "Url": "https://a", "Description": "A" }, "LinkCategory": "Docs" })
                    .as_object()
                    .unwrap()
                    .clone(),
                json!({ "Title": "no url, dropped" }).as_object().unwrap().clone(),
            ],
        };

        let mut groups = Vec::new();
        let items = fetch_links(&source, "<View/>", &url_mapping(), &mut groups)
            .await
            .expect("fetch");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].url, "https://a");
        assert_eq!(groups, vec!["Docs"]);
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_groups_untouched() {
        let mut groups = vec!["Kept".to_string()];
        let err = fetch_links(&FailingSource, "<View/>", &url_mapping(), &mut groups)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Ingestion(_)));
        assert_eq!(groups, vec!["Kept"]);
    }
}
