//! Edge classification against the level map.
//!
//! Only hierarchical edges (child sitting strictly below its parent)
//! take part in layout and default rendering. Same-level connectors are
//! lateral and left to the presentation layer. Edges naming an id the
//! node list does not contain are dropped outright — the upstream
//! generator is not trusted to be consistent.

use std::collections::HashMap;

use log::warn;

use super::types::Edge;

/// What an edge means for layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
	/// Connects a child (source) to a parent on a lower-numbered level.
	Hierarchical,
	/// Connects nodes on the same level, or contradicts the level order.
	Lateral,
}

/// Classify one edge. `None` means the edge references an unknown node
/// id and must be ignored everywhere downstream.
pub fn classify(edge: &Edge, levels: &HashMap<String, u32>) -> Option<EdgeKind> {
	let (Some(&child), Some(&parent)) = (levels.get(&edge.source), levels.get(&edge.target))
	else {
		return None;
	};
	if parent < child {
		Some(EdgeKind::Hierarchical)
	} else {
		Some(EdgeKind::Lateral)
	}
}

/// Classify the whole edge list, logging each dangling edge once.
/// Output is index-aligned with the input.
pub fn classify_edges(edges: &[Edge], levels: &HashMap<String, u32>) -> Vec<Option<EdgeKind>> {
	edges
		.iter()
		.map(|edge| {
			let kind = classify(edge, levels);
			if kind.is_none() {
				warn!(
					"edge {} -> {} references an unknown node id, dropping it",
					edge.source, edge.target
				);
			}
			kind
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn levels(pairs: &[(&str, u32)]) -> HashMap<String, u32> {
		pairs.iter().map(|(id, l)| (id.to_string(), *l)).collect()
	}

	#[test]
	fn child_below_parent_is_hierarchical() {
		let map = levels(&[("child", 2), ("parent", 1)]);
		let edge = Edge::new("child", "parent");
		assert_eq!(classify(&edge, &map), Some(EdgeKind::Hierarchical));
	}

	#[test]
	fn same_level_is_lateral() {
		let map = levels(&[("a", 2), ("b", 2)]);
		assert_eq!(classify(&Edge::new("a", "b"), &map), Some(EdgeKind::Lateral));
	}

	#[test]
	fn inverted_levels_are_lateral() {
		// Parent numerically below the child contradicts the
		// child-points-to-parent convention.
		let map = levels(&[("a", 1), ("b", 2)]);
		assert_eq!(classify(&Edge::new("a", "b"), &map), Some(EdgeKind::Lateral));
	}

	#[test]
	fn unknown_endpoint_is_dropped() {
		let map = levels(&[("a", 1)]);
		assert_eq!(classify(&Edge::new("ghost", "a"), &map), None);
		assert_eq!(classify(&Edge::new("a", "ghost"), &map), None);
	}

	#[test]
	fn classification_is_stable() {
		let map = levels(&[("child", 3), ("parent", 1)]);
		let edge = Edge::new("child", "parent");
		assert_eq!(classify(&edge, &map), classify(&edge, &map));
	}

	#[test]
	fn batch_output_is_index_aligned() {
		let map = levels(&[("a", 1), ("b", 2)]);
		let edges = vec![
			Edge::new("b", "a"),
			Edge::new("b", "ghost"),
			Edge::new("a", "b"),
		];
		let kinds = classify_edges(&edges, &map);
		assert_eq!(
			kinds,
			vec![Some(EdgeKind::Hierarchical), None, Some(EdgeKind::Lateral)]
		);
	}
}
