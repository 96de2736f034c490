//! Link Store
//!
//! Ordered in-memory collection of link records. Items are addressable by
//! position for the UI surface and by stable [`LinkId`] for targeted
//! mutation. Positions are a dense 0-based sequence with no gaps;
//! identifiers are assigned at creation and never reused.

use crate::domain::{EngineError, EngineResult, LinkId, LinkItem};

/// Ordered store of [`LinkItem`]s
#[derive(Debug)]
pub struct LinkStore {
    items: Vec<LinkItem>,
    next_id: LinkId,
}

impl Default for LinkStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkStore {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild the store from persisted items, reassigning identifiers
    pub fn from_items(items: Vec<LinkItem>) -> Self {
        let mut store = Self::new();
        for item in items {
            store.add(item);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an item, assigning it the next identifier.
    /// Returns the new position.
    pub fn add(&mut self, mut item: LinkItem) -> usize {
        item.id = self.next_id;
        self.next_id += 1;
        self.items.push(item);
        self.items.len() - 1
    }

    /// Get the item at a position
    pub fn get(&self, position: usize) -> EngineResult<&LinkItem> {
        self.items
            .get(position)
            .ok_or_else(|| out_of_range(position, self.items.len()))
    }

    /// Replace the item at a position, keeping its identifier
    pub fn set(&mut self, position: usize, mut item: LinkItem) -> EngineResult<()> {
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(position)
            .ok_or_else(|| out_of_range(position, len))?;
        item.id = slot.id;
        *slot = item;
        Ok(())
    }

    /// Stable-identity lookup
    pub fn get_by_id(&self, id: LinkId) -> Option<&LinkItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn get_mut_by_id(&mut self, id: LinkId) -> Option<&mut LinkItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Position of an item looked up by identifier
    pub fn position_of(&self, id: LinkId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Remove the item at a position; later positions shift down by one.
    /// Cursor invalidation is the caller's contract.
    pub fn remove(&mut self, position: usize) -> EngineResult<LinkItem> {
        if position >= self.items.len() {
            return Err(out_of_range(position, self.items.len()));
        }
        Ok(self.items.remove(position))
    }

    /// Remove an item by identifier; no-op when the id is unknown
    pub fn remove_by_id(&mut self, id: LinkId) -> Option<LinkItem> {
        let position = self.position_of(id)?;
        Some(self.items.remove(position))
    }

    /// Rebuild the list by reading items in the order given by `permutation`.
    ///
    /// The permutation must be a bijection over `[0, len)`; wrong length,
    /// out-of-range indices and duplicates are all rejected with
    /// `InvalidPermutation`.
    pub fn reorder(&mut self, permutation: &[usize]) -> EngineResult<()> {
        let len = self.items.len();
        if permutation.len() != len {
            return Err(EngineError::InvalidPermutation(format!(
                "expected {} positions, got {}",
                len,
                permutation.len()
            )));
        }
        let mut seen = vec![false; len];
        for &pos in permutation {
            if pos >= len {
                return Err(EngineError::InvalidPermutation(format!(
                    "position {} out of range for length {}",
                    pos, len
                )));
            }
            if seen[pos] {
                return Err(EngineError::InvalidPermutation(format!(
                    "position {} listed more than once",
                    pos
                )));
            }
            seen[pos] = true;
        }
        let mut reordered = Vec::with_capacity(len);
        for &pos in permutation {
            reordered.push(self.items[pos].clone());
        }
        self.items = reordered;
        Ok(())
    }

    /// Drop every item whose title is empty, compacting order.
    /// No other validation happens here.
    pub fn commit(&mut self) {
        self.items.retain(|item| !item.title.is_empty());
    }

    /// Deep-cloned snapshot with `position` stamped from current order
    pub fn snapshot(&self) -> Vec<LinkItem> {
        self.items
            .iter()
            .enumerate()
            .map(|(position, item)| {
                let mut copy = item.clone();
                copy.position = position;
                copy
            })
            .collect()
    }

    /// Replace the whole contents, reassigning identifiers.
    /// Used by derived-mode refresh.
    pub fn replace_all(&mut self, items: Vec<LinkItem>) {
        self.items.clear();
        for item in items {
            self.add(item);
        }
    }

    /// Distinct effective group keys in first-seen order
    /// ([`UNGROUPED`] substituted for empty)
    pub fn group_order(&self) -> Vec<String> {
        let mut groups: Vec<String> = Vec::new();
        for item in &self.items {
            let key = item.group_key();
            if !groups.iter().any(|g| g == key) {
                groups.push(key.to_string());
            }
        }
        groups
    }

    pub fn iter(&self) -> impl Iterator<Item = &LinkItem> {
        self.items.iter()
    }
}

fn out_of_range(position: usize, len: usize) -> EngineError {
    EngineError::OutOfRange(format!("position {} >= length {}", position, len))
}
