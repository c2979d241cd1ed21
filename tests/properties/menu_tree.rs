//! Property tests for the menu tree builder.

use proptest::prelude::*;

use atrium::diag::NullSink;
use atrium::menu::{build_forest, forest_max_level, forest_size, MenuNode};
use atrium::models::MenuItemRecord;

fn arbitrary_record() -> impl Strategy<Value = MenuItemRecord> {
    (
        0i64..24,
        proptest::option::of(0i64..24),
        proptest::option::of(0i64..10),
    )
        .prop_map(|(id, parent_id, order)| MenuItemRecord {
            id,
            title: Some(format!("Item {id}")),
            url: None,
            note: None,
            icon: None,
            parent_id,
            order,
        })
}

fn record_lists() -> impl Strategy<Value = Vec<MenuItemRecord>> {
    proptest::collection::vec(arbitrary_record(), 0..32)
}

fn count_levels(forest: &[MenuNode]) -> bool {
    fn check(node: &MenuNode, expected: usize) -> bool {
        node.level == expected && node.children.iter().all(|c| check(c, expected + 1))
    }
    forest.iter().all(|n| check(n, 1))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: The forest never exceeds the configured depth.
    #[test]
    fn property_depth_is_bounded(records in record_lists(), max_depth in 1usize..5) {
        let forest = build_forest(&records, max_depth, &mut NullSink);
        prop_assert!(forest_max_level(&forest) <= max_depth);
    }

    /// PROPERTY: Levels always increase by one from parent to child.
    #[test]
    fn property_levels_are_consistent(records in record_lists()) {
        let forest = build_forest(&records, 3, &mut NullSink);
        prop_assert!(count_levels(&forest));
    }

    /// PROPERTY: The builder never invents nodes; every placed node comes
    /// from a distinct input id.
    #[test]
    fn property_no_invented_nodes(records in record_lists()) {
        let forest = build_forest(&records, 3, &mut NullSink);
        let mut ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert!(forest_size(&forest) <= ids.len());
    }

    /// PROPERTY: Building twice from the same input yields the same forest.
    #[test]
    fn property_build_is_deterministic(records in record_lists(), max_depth in 1usize..5) {
        let first = build_forest(&records, max_depth, &mut NullSink);
        let second = build_forest(&records, max_depth, &mut NullSink);
        prop_assert_eq!(first, second);
    }

    /// PROPERTY: A record list of distinct roots is placed completely, in
    /// ordering-value order.
    #[test]
    fn property_distinct_roots_all_survive(orders in proptest::collection::vec(0i64..1000, 1..16)) {
        let records: Vec<MenuItemRecord> = orders
            .iter()
            .enumerate()
            .map(|(i, &order)| MenuItemRecord {
                id: i as i64,
                title: Some(format!("Root {i}")),
                url: None,
                note: None,
                icon: None,
                parent_id: None,
                order: Some(order),
            })
            .collect();

        let forest = build_forest(&records, 3, &mut NullSink);
        prop_assert_eq!(forest.len(), records.len());

        let placed: Vec<i64> = forest.iter().filter_map(|n| n.order).collect();
        let mut sorted = placed.clone();
        sorted.sort();
        prop_assert_eq!(placed, sorted);
    }

    /// PROPERTY: Orphans are promoted, never dropped: with max_depth covering
    /// the whole input, every distinct id lands in the forest.
    #[test]
    fn property_orphans_are_promoted(records in record_lists()) {
        let forest = build_forest(&records, 32, &mut NullSink);
        let mut ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(forest_size(&forest), ids.len());
    }
}
