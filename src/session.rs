//! Edit Session
//!
//! Tracks the single item currently open for editing and mediates the
//! mutation requests coming from the UI collaborator. The cursor is a
//! stable [`LinkId`], not a position, so it cannot silently drift onto a
//! different item when the store order changes.

use crate::domain::{EngineError, EngineResult, LinkId, LinkItem};
use crate::store::LinkStore;

const LOG_SOURCE: &str = "EditSession";

/// Suffixes that mark a link as a document to open in inline preview
const DOC_EXTENSIONS: [&str; 9] = [
    "pdf", "xls", "xlsx", "doc", "docx", "ppt", "pptx", "pptm", "dot",
];

/// Query marker appended to document links exactly once
const PREVIEW_MARKER: &str = "?web=1";

/// Message used when a required field is left empty
pub const REQUIRED_VALUE_ERROR: &str = "A value is required for this field.";

/// Field length limits enforced by the editor surface
pub const TITLE_MAX_LEN: usize = 80;
pub const DESCRIPTION_MAX_LEN: usize = 130;
pub const GROUP_BY_MAX_LEN: usize = 80;
pub const ICON_MAX_LEN: usize = 255;

/// Single-item edit cursor over a [`LinkStore`]
#[derive(Debug, Default)]
pub struct EditSession {
    active: Option<LinkId>,
}

impl EditSession {
    pub fn new() -> Self {
        Self { active: None }
    }

    /// Identifier of the item under edit, if any
    pub fn active_id(&self) -> Option<LinkId> {
        self.active
    }

    /// Append a blank item and point the cursor at it
    pub fn open_new(&mut self, store: &mut LinkStore) -> LinkId {
        let position = store.add(LinkItem::blank(0));
        let id = store
            .get(position)
            .map(|item| item.id)
            .unwrap_or_default();
        self.active = Some(id);
        id
    }

    /// Point the cursor at an existing item
    pub fn edit(&mut self, id: LinkId) {
        self.active = Some(id);
    }

    /// Set url and title of the item under edit, creating one when no
    /// cursor is active. The title only changes when `name` is non-empty.
    /// Document links get the inline-preview marker appended.
    pub fn set_link(&mut self, store: &mut LinkStore, url: &str, name: &str) -> LinkId {
        let id = match self.active.filter(|id| store.get_by_id(*id).is_some()) {
            Some(id) => id,
            None => self.open_new(store),
        };
        // open_new cannot fail to resolve what it just added
        if let Some(item) = store.get_mut_by_id(id) {
            item.url = with_preview_marker(url);
            if !name.is_empty() {
                item.title = name.to_string();
            }
        }
        id
    }

    /// Remove the item at `position`. The cursor is cleared when it pointed
    /// at the removed item; any other cursor stays valid because it is an
    /// identifier, not a position.
    pub fn delete_item(&mut self, store: &mut LinkStore, position: usize) -> EngineResult<()> {
        let removed = store.remove(position)?;
        if self.active == Some(removed.id) {
            self.active = None;
        }
        Ok(())
    }

    /// Reassign the group of the item with the given identifier
    pub fn set_group(&mut self, store: &mut LinkStore, id: LinkId, group: &str) {
        match store.get_mut_by_id(id) {
            Some(item) => item.group_by = group.to_string(),
            None => {
                log::debug!("no item with id {} - {} (set_group)", id, LOG_SOURCE);
            }
        }
    }

    /// Drop the cursor without touching the store
    pub fn reset_active(&mut self) {
        self.active = None;
    }

    /// Commit pending edits: drop items with empty titles, recompute the
    /// group-order list from the survivors (first-seen order, "Ungrouped"
    /// substituted for empty), and clear the cursor.
    pub fn commit(&mut self, store: &mut LinkStore) -> Vec<String> {
        store.commit();
        self.active = None;
        store.group_order()
    }
}

/// Append the inline-preview marker to document urls, exactly once.
///
/// Suffix match without a dot, as the original behaves; a url already
/// carrying the marker no longer ends with an extension and passes through
/// unchanged.
fn with_preview_marker(url: &str) -> String {
    let is_doc = DOC_EXTENSIONS.iter().any(|ext| url.ends_with(ext));
    if is_doc {
        format!("{}{}", url, PREVIEW_MARKER)
    } else {
        url.to_string()
    }
}

/// Validate one editor field against a length limit and a required flag.
///
/// Violations come back as `EngineError::Validation` carrying the
/// user-visible message: `too_long_message` when the value exceeds
/// `max_len`, [`REQUIRED_VALUE_ERROR`] when a required value is empty.
/// Non-fatal; the caller surfaces the message inline.
pub fn validate_field(
    value: &str,
    max_len: usize,
    required: bool,
    too_long_message: &str,
) -> EngineResult<()> {
    if value.len() > max_len {
        Err(EngineError::Validation(too_long_message.to_string()))
    } else if required && value.is_empty() {
        Err(EngineError::Validation(REQUIRED_VALUE_ERROR.to_string()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LinkStore;

    #[test]
    fn test_set_link_creates_when_no_cursor() {
        let mut store = LinkStore::new();
        let mut session = EditSession::new();

        let id = session.set_link(&mut store, "https://example.com", "Example");
        assert_eq!(session.active_id(), Some(id));
        let item = store.get_by_id(id).unwrap();
        assert_eq!(item.title, "Example");
        assert_eq!(item.url, "https://example.com");
    }

    #[test]
    fn test_set_link_updates_cursor_item() {
        let mut store = LinkStore::new();
        let mut session = EditSession::new();
        let id = session.open_new(&mut store);

        session.set_link(&mut store, "https://a", "First");
        session.set_link(&mut store, "https://b", "");
        let item = store.get_by_id(id).unwrap();
        assert_eq!(item.url, "https://b");
        // Empty name keeps the previous title
        assert_eq!(item.title, "First");
    }

    #[test]
    fn test_preview_marker_for_documents() {
        let mut store = LinkStore::new();
        let mut session = EditSession::new();
        let id = session.set_link(&mut store, "https://files/report.pdf", "Report");
        assert_eq!(
            store.get_by_id(id).unwrap().url,
            "https://files/report.pdf?web=1"
        );

        session.set_link(&mut store, "https://files/deck.pptm", "");
        assert_eq!(
            store.get_by_id(id).unwrap().url,
            "https://files/deck.pptm?web=1"
        );
    }

    #[test]
    fn test_preview_marker_is_never_doubled() {
        let mut store = LinkStore::new();
        let mut session = EditSession::new();
        let id = session.set_link(&mut store, "https://files/report.pdf?web=1", "Report");
        assert_eq!(
            store.get_by_id(id).unwrap().url,
            "https://files/report.pdf?web=1"
        );
    }

    #[test]
    fn test_plain_urls_get_no_marker() {
        let mut store = LinkStore::new();
        let mut session = EditSession::new();
        let id = session.set_link(&mut store, "https://example.com/page", "Page");
        assert_eq!(store.get_by_id(id).unwrap().url, "https://example.com/page");
    }

    #[test]
    fn test_delete_clears_cursor_only_for_removed_item() {
        let mut store = LinkStore::new();
        let mut session = EditSession::new();
        session.set_link(&mut store, "https://a", "A");
        session.reset_active();
        let kept = session.set_link(&mut store, "https://b", "B");

        session.delete_item(&mut store, 0).expect("delete");
        // Cursor pointed at "B", which survived at a shifted position
        assert_eq!(session.active_id(), Some(kept));

        session.delete_item(&mut store, 0).expect("delete");
        assert_eq!(session.active_id(), None);
    }

    #[test]
    fn test_commit_filters_and_recomputes_groups() {
        let mut store = LinkStore::new();
        let mut session = EditSession::new();

        let a = session.set_link(&mut store, "https://a", "A");
        session.set_group(&mut store, a, "Tools");
        session.reset_active();
        session.open_new(&mut store); // blank, dropped at commit
        session.reset_active();
        session.set_link(&mut store, "https://b", "B");

        let groups = session.commit(&mut store);
        assert_eq!(store.len(), 2);
        assert_eq!(groups, vec!["Tools", "Ungrouped"]);
        assert_eq!(session.active_id(), None);
    }

    #[test]
    fn test_set_group_unknown_id_is_a_no_op() {
        let mut store = LinkStore::new();
        let mut session = EditSession::new();
        session.set_link(&mut store, "https://a", "A");
        session.set_group(&mut store, 999, "Tools");
        assert_eq!(store.get(0).unwrap().group_by, "");
    }

    #[test]
    fn test_validate_field_limits() {
        use crate::domain::EngineError;

        assert!(validate_field("ok", TITLE_MAX_LEN, true, "too long").is_ok());
        assert_eq!(
            validate_field(&"x".repeat(TITLE_MAX_LEN + 1), TITLE_MAX_LEN, false, "too long"),
            Err(EngineError::Validation("too long".to_string()))
        );
        assert_eq!(
            validate_field("", GROUP_BY_MAX_LEN, true, "too long"),
            Err(EngineError::Validation(REQUIRED_VALUE_ERROR.to_string()))
        );
        assert!(validate_field("", DESCRIPTION_MAX_LEN, false, "too long").is_ok());
    }
}
