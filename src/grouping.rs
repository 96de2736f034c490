//! Grouping Engine
//!
//! Derives a grouped view from an ordered item snapshot plus an explicit
//! group-order list. Pure and idempotent: the view is rebuilt from scratch
//! on every call and never stored.

use crate::domain::{GroupHeading, LinkGroup, LinkItem};

/// Build the grouped view.
///
/// Buckets for the explicit `order` titles come first, in that order,
/// retained even when empty. Items are filed in store order under their
/// effective group key (`group_by`, or "Ungrouped" when empty); an item
/// whose key matches no existing bucket appends a new one at the end.
/// Heading ids run sequentially from 1 in emission order; item `position`
/// is restamped from the iteration index on every pass.
pub fn group_links(items: &[LinkItem], order: &[String]) -> Vec<LinkGroup> {
    let mut groups: Vec<LinkGroup> = Vec::new();
    let mut group_id: u32 = 1;

    for title in order {
        groups.push(LinkGroup::new(
            GroupHeading::new(title.clone(), group_id),
            Vec::new(),
        ));
        group_id += 1;
    }

    for (idx, item) in items.iter().enumerate() {
        let mut link = item.clone();
        link.position = idx;
        link.group_by = link.group_key().to_string();

        match groups
            .iter_mut()
            .find(|group| group.heading.title == link.group_by)
        {
            Some(group) => group.links.push(link),
            None => {
                let heading = GroupHeading::new(link.group_by.clone(), group_id);
                groups.push(LinkGroup::new(heading, vec![link]));
                group_id += 1;
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LinkItem;

    fn link(id: u32, title: &str, group: &str) -> LinkItem {
        let mut item = LinkItem::new(id, title.to_string(), format!("https://{}", title));
        item.group_by = group.to_string();
        item
    }

    fn order(titles: &[&str]) -> Vec<String> {
        titles.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_explicit_order_takes_precedence() {
        let items = vec![link(1, "one", "A"), link(2, "two", "B"), link(3, "three", "")];
        let groups = group_links(&items, &order(&["B", "A"]));

        let titles: Vec<&str> = groups.iter().map(|g| g.heading.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A", "Ungrouped"]);
        assert_eq!(groups[0].links[0].title, "two");
        assert_eq!(groups[1].links[0].title, "one");
        assert_eq!(groups[2].links[0].title, "three");
    }

    #[test]
    fn test_empty_seeded_buckets_are_retained() {
        let items = vec![link(1, "one", "A")];
        let groups = group_links(&items, &order(&["Empty", "A"]));
        assert_eq!(groups.len(), 2);
        assert!(groups[0].links.is_empty());
        assert_eq!(groups[0].heading.title, "Empty");
    }

    #[test]
    fn test_heading_ids_are_sequential_in_emission_order() {
        let items = vec![link(1, "one", "C"), link(2, "two", "D")];
        let groups = group_links(&items, &order(&["A", "B"]));
        let ids: Vec<u32> = groups.iter().map(|g| g.heading.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_item_order_within_bucket_matches_store_order() {
        let items = vec![
            link(1, "first", "A"),
            link(2, "other", "B"),
            link(3, "second", "A"),
        ];
        let groups = group_links(&items, &[]);
        let a_titles: Vec<&str> = groups[0].links.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(a_titles, vec!["first", "second"]);
    }

    #[test]
    fn test_positions_restamped_each_pass() {
        let mut items = vec![link(1, "one", ""), link(2, "two", "")];
        items[0].position = 99;
        let groups = group_links(&items, &[]);
        let positions: Vec<usize> = groups[0].links.iter().map(|l| l.position).collect();
        assert_eq!(positions, vec![0, 1]);
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let items = vec![link(1, "one", "A"), link(2, "two", ""), link(3, "three", "A")];
        let order = order(&["A"]);
        let first = group_links(&items, &order);
        let second = group_links(&items, &order);
        assert_eq!(first, second);
    }

    #[test]
    fn test_grouped_clone_carries_effective_key() {
        let items = vec![link(1, "one", "")];
        let groups = group_links(&items, &[]);
        assert_eq!(groups[0].links[0].group_by, "Ungrouped");
    }
}
