//! Link Entity
//!
//! A link record plus the derived grouped-view types. The grouped view is
//! rebuilt on demand and never persisted.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// Stable item identifier, assigned by the store at creation.
///
/// Never reused within a store and unaffected by reorders or removals,
/// unlike `position` which is recomputed from storage order on every
/// snapshot.
pub type LinkId = u32;

/// Sentinel group for items with an empty `group_by`
pub const UNGROUPED: &str = "Ungrouped";

/// A single link record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkItem {
    /// Unique identifier
    pub id: LinkId,
    /// Position within the store (presentational, stamped on snapshot)
    #[serde(default)]
    pub position: usize,
    /// Display title; items with an empty title are dropped at commit
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Description")]
    pub description: String,
    /// Icon name (e.g. a Font Awesome class)
    #[serde(rename = "Icon")]
    pub icon: String,
    #[serde(rename = "NewTab")]
    pub open_in_new_tab: bool,
    /// Group title; empty means the item files under [`UNGROUPED`]
    #[serde(rename = "GroupBy")]
    pub group_by: String,
}

impl LinkItem {
    /// Create a new link with the given title and url
    pub fn new(id: LinkId, title: String, url: String) -> Self {
        Self {
            id,
            position: 0,
            title,
            url,
            description: String::new(),
            icon: String::new(),
            open_in_new_tab: false,
            group_by: String::new(),
        }
    }

    /// Create a blank link, used when a new item is opened for editing
    pub fn blank(id: LinkId) -> Self {
        Self::new(id, String::new(), String::new())
    }

    /// Effective group key: `group_by` if non-empty, else [`UNGROUPED`]
    pub fn group_key(&self) -> &str {
        if self.group_by.is_empty() {
            UNGROUPED
        } else {
            &self.group_by
        }
    }
}

impl Entity for LinkItem {
    type Id = LinkId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Heading of one group in the derived view
///
/// Ids are assigned sequentially from 1 in emission order and are purely
/// presentational; they are not stable across passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupHeading {
    pub title: String,
    pub id: u32,
}

impl GroupHeading {
    pub fn new(title: String, id: u32) -> Self {
        Self { title, id }
    }
}

/// One bucket of the derived grouped view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkGroup {
    pub heading: GroupHeading,
    pub links: Vec<LinkItem>,
}

impl LinkGroup {
    pub fn new(heading: GroupHeading, links: Vec<LinkItem>) -> Self {
        Self { heading, links }
    }
}
