//! Progressive disclosure: which nodes and edges currently render.
//!
//! The first two levels always show. Deeper nodes appear when a parent
//! is in the expanded set, one level per expansion — revealing a child
//! does not reveal the grandchildren unless the child was expanded too.

use std::collections::{HashMap, HashSet};

use super::classify::EdgeKind;
use super::types::GraphData;

/// Levels shown without any interaction.
pub const DEFAULT_VISIBLE_DEPTH: u32 = 2;

/// The renderable subset, recomputed on every interaction.
#[derive(Clone, Debug, Default)]
pub struct VisibleSet {
	/// Ids of the nodes that should render.
	pub nodes: HashSet<String>,
	/// Indices into `GraphData::edges`: hierarchical edges with both
	/// endpoints visible.
	pub edges: Vec<usize>,
}

/// Resolve the visible subset for the current interaction state.
/// `kinds` is the index-aligned output of `classify_edges`.
pub fn resolve(
	data: &GraphData,
	levels: &HashMap<String, u32>,
	kinds: &[Option<EdgeKind>],
	expanded: &HashSet<String>,
	show_all: bool,
) -> VisibleSet {
	let ids: HashSet<&str> = data.nodes.iter().map(|n| n.id.as_str()).collect();

	let mut nodes: HashSet<String> = if show_all {
		data.nodes.iter().map(|n| n.id.clone()).collect()
	} else {
		data.nodes
			.iter()
			.filter(|n| levels.get(&n.id).copied().unwrap_or(1) <= DEFAULT_VISIBLE_DEPTH)
			.map(|n| n.id.clone())
			.collect()
	};

	if !show_all {
		// Each expanded id contributes its direct children. A child's
		// own children follow only when that child id is expanded as
		// well, which the loop covers by visiting every expanded id.
		for id in expanded {
			for edge in &data.edges {
				if edge.target == *id && ids.contains(edge.source.as_str()) {
					nodes.insert(edge.source.clone());
				}
			}
		}
	}

	let edges = data
		.edges
		.iter()
		.enumerate()
		.filter(|(i, edge)| {
			kinds.get(*i).copied().flatten() == Some(EdgeKind::Hierarchical)
				&& nodes.contains(&edge.source)
				&& nodes.contains(&edge.target)
		})
		.map(|(i, _)| i)
		.collect();

	VisibleSet { nodes, edges }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::topic_graph::classify::classify_edges;
	use crate::components::topic_graph::levels::assign_levels;
	use crate::components::topic_graph::types::{Category, Edge, Node};

	/// Chain a -> b -> c -> d (a central) plus one lateral and one
	/// dangling edge.
	fn chain() -> GraphData {
		GraphData {
			nodes: vec![
				Node::new("a", "a", Category::Central),
				Node::new("b", "b", Category::Cause),
				Node::new("b2", "b2", Category::Cause),
				Node::new("c", "c", Category::Effect),
				Node::new("d", "d", Category::Trend),
			],
			edges: vec![
				Edge::new("b", "a"),
				Edge::new("b2", "a"),
				Edge::new("c", "b"),
				Edge::new("d", "c"),
				Edge::new("b2", "b"),
				Edge::new("ghost", "a"),
			],
		}
	}

	fn visible(data: &GraphData, expanded: &[&str], show_all: bool) -> VisibleSet {
		let levels = assign_levels(data);
		let kinds = classify_edges(&data.edges, &levels);
		let expanded: HashSet<String> = expanded.iter().map(|s| s.to_string()).collect();
		resolve(data, &levels, &kinds, &expanded, show_all)
	}

	#[test]
	fn default_view_shows_first_two_levels() {
		let data = chain();
		let set = visible(&data, &[], false);
		assert!(set.nodes.contains("a"));
		assert!(set.nodes.contains("b"));
		assert!(set.nodes.contains("b2"));
		assert!(!set.nodes.contains("c"));
		assert!(!set.nodes.contains("d"));
	}

	#[test]
	fn expansion_reveals_one_level_only() {
		let data = chain();
		let set = visible(&data, &["b"], false);
		assert!(set.nodes.contains("c"));
		// c itself is not expanded, so d stays hidden.
		assert!(!set.nodes.contains("d"));
	}

	#[test]
	fn expansion_cascades_through_expanded_intermediates() {
		let data = chain();
		let set = visible(&data, &["b", "c"], false);
		assert!(set.nodes.contains("c"));
		assert!(set.nodes.contains("d"));
	}

	#[test]
	fn expanding_grows_the_visible_set() {
		let data = chain();
		let before = visible(&data, &[], false);
		let after = visible(&data, &["b"], false);
		for id in &before.nodes {
			assert!(after.nodes.contains(id), "{id} disappeared on expand");
		}
	}

	#[test]
	fn show_all_covers_every_node() {
		let data = chain();
		let set = visible(&data, &[], true);
		assert_eq!(set.nodes.len(), data.nodes.len());
	}

	#[test]
	fn lateral_and_dangling_edges_never_render() {
		let data = chain();
		let set = visible(&data, &[], true);
		// b2 -> b is lateral (both level 2), ghost -> a is dangling.
		assert!(!set.edges.contains(&4));
		assert!(!set.edges.contains(&5));
		assert_eq!(set.edges, vec![0, 1, 2, 3]);
	}

	#[test]
	fn hidden_endpoint_hides_the_edge() {
		let data = chain();
		let set = visible(&data, &[], false);
		// c is hidden, so c -> b cannot render even though it is
		// hierarchical.
		assert!(!set.edges.contains(&2));
	}
}
