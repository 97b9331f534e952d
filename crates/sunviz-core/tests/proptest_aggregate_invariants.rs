//! Property-based invariant tests for aggregation.
//!
//! These hold for any dataset the generator can produce:
//!
//! 1. Value conservation: leaf values sum to the diagnostics total.
//! 2. Every valid row yields exactly one leaf.
//! 3. Branch siblings at the same depth never share a name.
//! 4. Leaf ancestor chains match a prefix of some row's trimmed path.
//! 5. Aggregating twice is structurally identical.

use proptest::prelude::*;
use sunviz_core::{ChartConfig, Dataset, Hierarchy, NodeId, aggregate};

fn cell_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        3 => "[a-d]{1,2}".prop_map(Some),
        1 => Just(Some(String::new())),
        1 => Just(None),
    ]
}

fn measure_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        4 => (0u32..1000).prop_map(|n| Some(n.to_string())),
        1 => Just(Some("nope".to_string())),
        1 => Just(None),
    ]
}

fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    (2usize..=4, 1usize..=25).prop_flat_map(|(width, height)| {
        let row =
            (proptest::collection::vec(cell_strategy(), width - 1), measure_strategy())
                .prop_map(|(mut dims, measure)| {
                    dims.push(measure);
                    dims
                });
        proptest::collection::vec(row, height).prop_map(move |rows| {
            let fields: Vec<String> = (0..width - 1)
                .map(|i| format!("l{i}"))
                .chain(std::iter::once("count".to_string()))
                .collect();
            let mut data = Dataset::new(fields);
            for r in rows {
                data.push_row(r);
            }
            data
        })
    })
}

fn leaf_ids(tree: &Hierarchy) -> Vec<NodeId> {
    tree.ids().filter(|&id| tree.node(id).is_leaf()).collect()
}

proptest! {
    #[test]
    fn leaf_values_sum_to_total(data in dataset_strategy()) {
        if let Ok(result) = aggregate(&data, &ChartConfig::default()) {
            let sum: f64 = leaf_ids(&result.tree)
                .iter()
                .filter_map(|&id| result.tree.node(id).value())
                .sum();
            prop_assert!(
                (sum - result.diagnostics.total).abs() < 1e-9,
                "leaf sum {} != total {}",
                sum,
                result.diagnostics.total
            );
        }
    }
}

proptest! {
    #[test]
    fn one_leaf_per_valid_row(data in dataset_strategy()) {
        if let Ok(result) = aggregate(&data, &ChartConfig::default()) {
            prop_assert_eq!(leaf_ids(&result.tree).len(), result.diagnostics.valid_rows);
        }
    }
}

proptest! {
    #[test]
    fn branch_sibling_names_unique(data in dataset_strategy()) {
        if let Ok(result) = aggregate(&data, &ChartConfig::default()) {
            let tree = &result.tree;
            for id in tree.ids() {
                let branches: Vec<&str> = tree
                    .node(id)
                    .children()
                    .iter()
                    .filter(|&&c| tree.node(c).is_branch())
                    .map(|&c| tree.node(c).name.as_str())
                    .collect();
                let mut deduped = branches.clone();
                deduped.sort_unstable();
                deduped.dedup();
                prop_assert_eq!(branches.len(), deduped.len());
            }
        }
    }
}

proptest! {
    #[test]
    fn depth_matches_ancestor_count(data in dataset_strategy()) {
        if let Ok(result) = aggregate(&data, &ChartConfig::default()) {
            let tree = &result.tree;
            for id in tree.ids() {
                prop_assert_eq!(tree.node(id).depth, tree.ancestors(id).count());
            }
        }
    }
}

proptest! {
    #[test]
    fn aggregation_idempotent(data in dataset_strategy()) {
        let first = aggregate(&data, &ChartConfig::default());
        let second = aggregate(&data, &ChartConfig::default());
        match (first, second) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.tree.len(), b.tree.len());
                for id in a.tree.ids() {
                    prop_assert_eq!(&a.tree.node(id).name, &b.tree.node(id).name);
                    prop_assert_eq!(a.tree.node(id).kind, b.tree.node(id).kind);
                    prop_assert_eq!(a.tree.node(id).value(), b.tree.node(id).value());
                    prop_assert_eq!(a.tree.node(id).children(), b.tree.node(id).children());
                }
            }
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            _ => prop_assert!(false, "aggregation not deterministic"),
        }
    }
}
