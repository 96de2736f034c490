//! Engine Façade
//!
//! The surface the hosting UI calls. Owns the configuration, the link
//! store and the edit cursor, and guards every operation boundary:
//! structural errors come back as `Err`, everything else is logged and
//! absorbed with state left as it was.

use crate::domain::{Config, EngineResult, LinkGroup, LinkId, LinkItem};
use crate::grouping::group_links;
use crate::ingest::{fetch_links, IngestionSource};
use crate::migration::migrate_blob;
use crate::session::EditSession;
use crate::store::LinkStore;

const LOG_SOURCE: &str = "LinkEngine";

/// Link collection engine behind a UI-collaborator surface
#[derive(Debug, Default)]
pub struct LinkEngine {
    config: Config,
    store: LinkStore,
    session: EditSession,
}

impl LinkEngine {
    /// Empty engine at the current schema version
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine from a persisted blob, migrating it first.
    /// The store is seeded from the migrated config's items.
    pub fn load(blob: Option<&str>) -> Self {
        let config = migrate_blob(blob);
        let store = LinkStore::from_items(config.items.clone());
        Self {
            config,
            store,
            session: EditSession::new(),
        }
    }

    /// Serialize the current state back into a persistable blob
    pub fn to_blob(&self) -> String {
        let mut config = self.config.clone();
        config.items = self.store.snapshot();
        match serde_json::to_string(&config) {
            Ok(blob) => blob,
            Err(err) => {
                log::error!("{} - {} (to_blob)", err, LOG_SOURCE);
                String::from("{}")
            }
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Append a manually entered item; returns its position
    pub fn add_item(&mut self, item: LinkItem) -> usize {
        self.store.add(item)
    }

    /// Open a fresh blank item for editing
    pub fn open_new(&mut self) -> LinkId {
        self.session.open_new(&mut self.store)
    }

    /// Point the edit cursor at an existing item
    pub fn edit_item(&mut self, id: LinkId) {
        self.session.edit(id);
    }

    /// Set url/title of the item under edit (creating one if needed)
    pub fn set_link(&mut self, url: &str, name: &str) -> LinkId {
        self.session.set_link(&mut self.store, url, name)
    }

    /// Remove the item at `position`; clears the cursor when it pointed
    /// at the removed item
    pub fn delete_item(&mut self, position: usize) -> EngineResult<()> {
        self.session
            .delete_item(&mut self.store, position)
            .map_err(|err| {
                log::error!("{} - {} (delete_item)", err, LOG_SOURCE);
                err
            })
    }

    /// Apply a new ordering; rejects anything that is not a bijection
    /// over the current positions
    pub fn reorder(&mut self, permutation: &[usize]) -> EngineResult<()> {
        self.store.reorder(permutation).map_err(|err| {
            log::error!("{} - {} (reorder)", err, LOG_SOURCE);
            err
        })
    }

    /// Reassign the group of the item with the given identifier
    pub fn set_group(&mut self, id: LinkId, group: &str) {
        self.session.set_group(&mut self.store, id, group);
    }

    pub fn reset_active(&mut self) {
        self.session.reset_active();
    }

    pub fn active_id(&self) -> Option<LinkId> {
        self.session.active_id()
    }

    /// Commit pending edits: drop untitled items, recompute the group
    /// order from the survivors and clear the cursor
    pub fn commit(&mut self) {
        self.config.groups = self.session.commit(&mut self.store);
    }

    /// Ordered flat view with positions stamped
    pub fn flat_view(&self) -> Vec<LinkItem> {
        self.store.snapshot()
    }

    /// Grouped view derived from the current snapshot and group order
    pub fn grouped_view(&self) -> Vec<LinkGroup> {
        group_links(&self.store.snapshot(), &self.config.groups)
    }

    /// Derived-mode refresh: run the configured query through the field
    /// mappings and replace the store contents wholesale.
    ///
    /// All-or-nothing: a fetch failure is logged and returned, with the
    /// store and group order untouched. There is no de-duplication or
    /// cancellation of overlapping refreshes; when the caller starts a
    /// second refresh before the first resolves, the later completion
    /// wins.
    pub async fn refresh<S: IngestionSource + ?Sized>(&mut self, source: &S) -> EngineResult<usize> {
        if !self.config.uses_list_mode {
            log::debug!("not in list mode, refresh skipped - {} (refresh)", LOG_SOURCE);
            return Ok(0);
        }

        let mut groups = self.config.groups.clone();
        match fetch_links(
            source,
            &self.config.list_query,
            &self.config.source.field_mappings,
            &mut groups,
        )
        .await
        {
            Ok(items) => {
                let count = items.len();
                self.store.replace_all(items);
                self.config.groups = groups;
                Ok(count)
            }
            Err(err) => {
                log::error!("{} - {} (refresh)", err, LOG_SOURCE);
                Err(err)
            }
        }
    }
}
