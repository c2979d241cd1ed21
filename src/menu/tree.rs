//! Menu tree builder
//!
//! Turns the flat, parent-referencing item list into an ordered forest.
//! Recovery rules:
//! - unknown parent id: the item is promoted to a root
//! - parent chain that loops: the closing edge is broken, item becomes a root
//! - duplicate id: first record wins
//! - item deeper than the configured maximum: dropped with its subtree
//!
//! Depth is measured as distance from the root on the fully assembled forest;
//! this is the only depth check in the crate, so the result is the same for
//! every input order.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::diag::DiagnosticSink;
use crate::models::MenuItemRecord;

use super::resolve::resolve_url;

/// One node of the assembled navigation forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuNode {
    pub id: i64,
    pub title: String,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub order: Option<i64>,
    /// 1-based; roots are level 1
    pub level: usize,
    pub children: Vec<MenuNode>,
}

/// Build the ordered forest from the flat record list.
///
/// `max_depth` is a positive integer; zero coerces to one.
pub fn build_forest(
    records: &[MenuItemRecord],
    max_depth: usize,
    sink: &mut dyn DiagnosticSink,
) -> Vec<MenuNode> {
    let max_depth = max_depth.max(1);

    // Index every record by id; first occurrence wins.
    let mut index: HashMap<i64, usize> = HashMap::with_capacity(records.len());
    let mut retained: Vec<usize> = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        if index.contains_key(&record.id) {
            sink.warn(
                "menu",
                format!(
                    "Duplicate menu item id {} ({}); keeping the first occurrence",
                    record.id,
                    record.display_title()
                ),
            );
            continue;
        }
        index.insert(record.id, i);
        retained.push(i);
    }

    // Link children to parents in input order.
    let mut parent_of: HashMap<i64, i64> = HashMap::new();
    let mut children_of: HashMap<i64, Vec<i64>> = HashMap::new();
    let mut roots: Vec<i64> = Vec::new();

    for &i in &retained {
        let record = &records[i];
        match record.parent_id {
            None => roots.push(record.id),
            Some(parent_id) => {
                if !index.contains_key(&parent_id) {
                    sink.warn(
                        "menu",
                        format!(
                            "Parent item {} not found for {}",
                            parent_id,
                            record.display_title()
                        ),
                    );
                    roots.push(record.id);
                } else if closes_cycle(record.id, parent_id, &parent_of) {
                    sink.warn(
                        "menu",
                        format!(
                            "Parent chain for \"{}\" loops back through item {}; treating it as a root",
                            record.display_title(),
                            parent_id
                        ),
                    );
                    roots.push(record.id);
                } else {
                    parent_of.insert(record.id, parent_id);
                    children_of.entry(parent_id).or_default().push(record.id);
                }
            }
        }
    }

    // Assemble top-down, pruning anything beyond max_depth.
    let mut forest: Vec<MenuNode> = roots
        .iter()
        .filter_map(|&id| assemble(id, 1, records, &index, &children_of, max_depth, sink))
        .collect();

    sort_siblings(&mut forest);
    forest
}

/// Would attaching `child` under `parent` close a loop?
/// Walks the already-linked ancestor chain of `parent`.
fn closes_cycle(child: i64, parent: i64, parent_of: &HashMap<i64, i64>) -> bool {
    if child == parent {
        return true;
    }
    let mut current = parent;
    while let Some(&next) = parent_of.get(&current) {
        if next == child {
            return true;
        }
        current = next;
    }
    false
}

fn assemble(
    id: i64,
    level: usize,
    records: &[MenuItemRecord],
    index: &HashMap<i64, usize>,
    children_of: &HashMap<i64, Vec<i64>>,
    max_depth: usize,
    sink: &mut dyn DiagnosticSink,
) -> Option<MenuNode> {
    let record = &records[index[&id]];

    if level > max_depth {
        diagnose_dropped(id, records, index, children_of, max_depth, sink);
        return None;
    }

    let mut node = MenuNode {
        id: record.id,
        title: record.display_title().to_string(),
        url: resolve_url(record),
        icon: record.icon.clone(),
        order: record.order,
        level,
        children: Vec::new(),
    };

    if let Some(child_ids) = children_of.get(&id) {
        for &child_id in child_ids {
            if let Some(child) =
                assemble(child_id, level + 1, records, index, children_of, max_depth, sink)
            {
                node.children.push(child);
            }
        }
    }

    Some(node)
}

/// A dropped node takes its whole subtree with it; name every item.
fn diagnose_dropped(
    id: i64,
    records: &[MenuItemRecord],
    index: &HashMap<i64, usize>,
    children_of: &HashMap<i64, Vec<i64>>,
    max_depth: usize,
    sink: &mut dyn DiagnosticSink,
) {
    let record = &records[index[&id]];
    sink.warn(
        "menu",
        format!(
            "Menu item \"{}\" exceeds maximum depth of {} and will be ignored",
            record.display_title(),
            max_depth
        ),
    );
    if let Some(child_ids) = children_of.get(&id) {
        for &child_id in child_ids {
            diagnose_dropped(child_id, records, index, children_of, max_depth, sink);
        }
    }
}

/// Sort sibling groups ascending by ordering value. Pairs where either side
/// lacks the value compare equal; the sort is stable, so unordered items keep
/// their input order.
fn sort_siblings(nodes: &mut [MenuNode]) {
    nodes.sort_by(|a, b| match (a.order, b.order) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => Ordering::Equal,
    });
    for node in nodes {
        sort_siblings(&mut node.children);
    }
}

/// Total node count of the forest.
pub fn forest_size(forest: &[MenuNode]) -> usize {
    forest
        .iter()
        .map(|n| 1 + forest_size(&n.children))
        .sum()
}

/// Deepest level present in the forest (0 for an empty forest).
pub fn forest_max_level(forest: &[MenuNode]) -> usize {
    forest
        .iter()
        .map(|n| n.level.max(forest_max_level(&n.children)))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::{CollectedDiagnostics, NullSink};

    fn item(id: i64, title: &str, parent: Option<i64>, order: Option<i64>) -> MenuItemRecord {
        MenuItemRecord {
            id,
            title: Some(title.to_string()),
            url: None,
            note: None,
            icon: None,
            parent_id: parent,
            order,
        }
    }

    #[test]
    fn roots_sort_by_ordering_value() {
        // Scenario A
        let records = vec![
            item(1, "Home", None, Some(2)),
            item(2, "About", None, Some(1)),
        ];
        let forest = build_forest(&records, 3, &mut NullSink);

        let titles: Vec<&str> = forest.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["About", "Home"]);
        assert!(forest.iter().all(|n| n.level == 1));
    }

    #[test]
    fn chain_beyond_max_depth_is_dropped_with_diagnostic() {
        // Scenario B
        let records = vec![
            item(1, "A", None, None),
            item(2, "B", Some(1), None),
            item(3, "C", Some(2), None),
            item(4, "D", Some(3), None),
        ];
        let mut sink = CollectedDiagnostics::new();
        let forest = build_forest(&records, 3, &mut sink);

        assert_eq!(forest_max_level(&forest), 3);
        assert_eq!(forest_size(&forest), 3);
        assert!(sink.contains("\"D\" exceeds maximum depth of 3"));
    }

    #[test]
    fn depth_pruning_is_insertion_order_independent() {
        // Same chain, leaf first: the prune still removes exactly D.
        let records = vec![
            item(4, "D", Some(3), None),
            item(3, "C", Some(2), None),
            item(2, "B", Some(1), None),
            item(1, "A", None, None),
        ];
        let mut sink = CollectedDiagnostics::new();
        let forest = build_forest(&records, 3, &mut sink);

        assert_eq!(forest_max_level(&forest), 3);
        assert_eq!(forest_size(&forest), 3);
        assert!(sink.contains("\"D\" exceeds maximum depth of 3"));
    }

    #[test]
    fn orphan_is_promoted_to_root_with_diagnostic() {
        // Scenario C
        let records = vec![item(5, "Orphan", Some(99), None)];
        let mut sink = CollectedDiagnostics::new();
        let forest = build_forest(&records, 3, &mut sink);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].title, "Orphan");
        assert_eq!(forest[0].level, 1);
        assert!(sink.contains("Parent item 99 not found for Orphan"));
    }

    #[test]
    fn two_node_cycle_is_broken() {
        let records = vec![item(1, "A", Some(2), None), item(2, "B", Some(1), None)];
        let mut sink = CollectedDiagnostics::new();
        let forest = build_forest(&records, 3, &mut sink);

        // A links under B (B not yet linked anywhere), B's link would close
        // the loop and is broken instead.
        assert_eq!(forest_size(&forest), 2);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].title, "B");
        assert_eq!(forest[0].children[0].title, "A");
        assert!(sink.contains("loops back"));
    }

    #[test]
    fn self_parent_is_promoted() {
        let records = vec![item(7, "Selfie", Some(7), None)];
        let mut sink = CollectedDiagnostics::new();
        let forest = build_forest(&records, 3, &mut sink);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].title, "Selfie");
        assert!(sink.contains("loops back"));
    }

    #[test]
    fn duplicate_id_keeps_first() {
        let records = vec![
            item(1, "First", None, None),
            item(1, "Second", None, None),
        ];
        let mut sink = CollectedDiagnostics::new();
        let forest = build_forest(&records, 3, &mut sink);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].title, "First");
        assert!(sink.contains("Duplicate menu item id 1"));
    }

    #[test]
    fn unordered_siblings_keep_input_order() {
        let records = vec![
            item(1, "Root", None, None),
            item(2, "X", Some(1), None),
            item(3, "Y", Some(1), Some(1)),
            item(4, "Z", Some(1), None),
        ];
        let forest = build_forest(&records, 3, &mut NullSink);

        // The comparator only orders pairs that both carry a value, so the
        // relative input order X, Y, Z is preserved.
        let titles: Vec<&str> = forest[0].children.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["X", "Y", "Z"]);
    }

    #[test]
    fn levels_follow_parent_plus_one() {
        let records = vec![
            item(1, "Root", None, None),
            item(2, "Child", Some(1), None),
            item(3, "Grandchild", Some(2), None),
        ];
        let forest = build_forest(&records, 3, &mut NullSink);

        assert_eq!(forest[0].level, 1);
        assert_eq!(forest[0].children[0].level, 2);
        assert_eq!(forest[0].children[0].children[0].level, 3);
    }

    #[test]
    fn building_twice_is_idempotent() {
        let records = vec![
            item(1, "A", None, Some(2)),
            item(2, "B", None, Some(1)),
            item(3, "C", Some(1), None),
            item(4, "D", Some(99), None),
        ];
        let first = build_forest(&records, 2, &mut NullSink);
        let second = build_forest(&records, 2, &mut NullSink);
        assert_eq!(first, second);
    }

    #[test]
    fn max_depth_one_keeps_only_roots() {
        let records = vec![
            item(1, "Root", None, None),
            item(2, "Child", Some(1), None),
        ];
        let mut sink = CollectedDiagnostics::new();
        let forest = build_forest(&records, 1, &mut sink);

        assert_eq!(forest_size(&forest), 1);
        assert!(forest[0].children.is_empty());
        assert!(sink.contains("maximum depth of 1"));
    }
}
