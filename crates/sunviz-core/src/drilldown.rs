#![forbid(unsafe_code)]

//! Drilldown payload assembly.
//!
//! When a node is activated, the host navigation sink receives one
//! `(field, value)` pair per dimension field. Fields the node's snapshot
//! does not cover (deeper than the node, or trimmed off the row) fall back
//! to the configured null token. The measure and color fields never appear
//! in the payload.

use crate::dataset::Dataset;
use crate::tree::{Hierarchy, NodeId};

/// Build the activation payload for `node`, in dataset field order.
pub fn drilldown_payload(
    data: &Dataset,
    tree: &Hierarchy,
    node: NodeId,
    null_token: &str,
) -> Vec<(String, String)> {
    let snapshot = &tree.node(node).drilldown;
    data.dimension_indices()
        .into_iter()
        .map(|i| {
            let field = &data.fields()[i];
            let value = snapshot
                .get(field)
                .cloned()
                .unwrap_or_else(|| null_token.to_string());
            (field.clone(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::config::ChartConfig;
    use crate::dataset::Cell;

    fn dataset(fields: &[&str], rows: &[&[&str]]) -> Dataset {
        let mut data = Dataset::new(fields.iter().copied());
        for r in rows {
            let cells: Vec<Cell> = r.iter().map(|c| Some((*c).to_string())).collect();
            data.push_row(cells);
        }
        data
    }

    #[test]
    fn leaf_payload_covers_every_dimension() {
        let data = dataset(&["l1", "l2", "count"], &[&["A", "B", "5"]]);
        let result = aggregate(&data, &ChartConfig::default()).unwrap();
        let tree = &result.tree;
        let a = tree.branch_child(tree.root(), "A").unwrap();
        let leaf = tree.node(a).children()[0];

        let payload = drilldown_payload(&data, tree, leaf, "NULL");
        assert_eq!(
            payload,
            vec![
                ("l1".to_string(), "A".to_string()),
                ("l2".to_string(), "B".to_string()),
            ]
        );
    }

    #[test]
    fn branch_payload_falls_back_past_its_depth() {
        let data = dataset(&["l1", "l2", "count"], &[&["A", "B", "5"]]);
        let result = aggregate(&data, &ChartConfig::default()).unwrap();
        let tree = &result.tree;
        let a = tree.branch_child(tree.root(), "A").unwrap();

        let payload = drilldown_payload(&data, tree, a, "*");
        assert_eq!(
            payload,
            vec![
                ("l1".to_string(), "A".to_string()),
                ("l2".to_string(), "*".to_string()),
            ]
        );
    }

    #[test]
    fn color_field_is_excluded() {
        let data = dataset(
            &["l1", "color", "count"],
            &[&["A", "red", "5"]],
        );
        let result = aggregate(&data, &ChartConfig::default()).unwrap();
        let tree = &result.tree;
        let leaf = tree.node(tree.root()).children()[0];

        let payload = drilldown_payload(&data, tree, leaf, "");
        assert_eq!(payload, vec![("l1".to_string(), "A".to_string())]);
    }

    #[test]
    fn payload_values_are_delimiter_stripped() {
        let mut config = ChartConfig::default();
        config.delimiter = Some("|".to_string());
        let data = dataset(&["l1", "count"], &[&["web|tooltip|#fff", "5"]]);
        let result = aggregate(&data, &config).unwrap();
        let tree = &result.tree;
        let leaf = tree.node(tree.root()).children()[0];

        let payload = drilldown_payload(&data, tree, leaf, "");
        assert_eq!(payload, vec![("l1".to_string(), "web".to_string())]);
    }
}
