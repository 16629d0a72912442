//! Level assignment: hop distance from the central node.
//!
//! Edges point child → parent, so discovery walks them backwards: the
//! children of a node are the sources of edges whose target is that
//! node. Breadth-first order guarantees every node gets the shortest
//! hop count from the root; nodes the walk never reaches fall back to
//! the root level so they still render.

use std::collections::{HashMap, HashSet, VecDeque};

use super::types::{Category, GraphData};

/// Level given to nodes the traversal never reaches.
const DETACHED_LEVEL: u32 = 1;

/// Compute a level for every node. The central node is level 1, its
/// children 2, and so on. Never fails: degenerate input (no root, no
/// edges, cycles) degrades to everything sitting at level 1.
pub fn assign_levels(data: &GraphData) -> HashMap<String, u32> {
	let ids: HashSet<&str> = data.nodes.iter().map(|n| n.id.as_str()).collect();
	let mut levels: HashMap<String, u32> = HashMap::with_capacity(data.nodes.len());

	let mut roots: Vec<&str> = data
		.nodes
		.iter()
		.filter(|n| n.category == Category::Central)
		.map(|n| n.id.as_str())
		.collect();
	if roots.is_empty() {
		roots = fallback_roots(data);
	}

	let mut queue: VecDeque<(&str, u32)> = roots.into_iter().map(|id| (id, 1)).collect();
	while let Some((id, level)) = queue.pop_front() {
		if levels.contains_key(id) {
			// First visit wins: BFS already found a shorter path.
			continue;
		}
		levels.insert(id.to_string(), level);
		for edge in &data.edges {
			if edge.target == id
				&& ids.contains(edge.source.as_str())
				&& !levels.contains_key(edge.source.as_str())
			{
				queue.push_back((edge.source.as_str(), level + 1));
			}
		}
	}

	for node in &data.nodes {
		levels.entry(node.id.clone()).or_insert(DETACHED_LEVEL);
	}
	levels
}

/// Roots when no node is tagged central: nodes that are nobody's child,
/// i.e. never the source of an edge. This matches the discovery
/// direction above — a root found here is a node BFS can walk down
/// from, not a leaf.
fn fallback_roots(data: &GraphData) -> Vec<&str> {
	let children: HashSet<&str> = data.edges.iter().map(|e| e.source.as_str()).collect();
	data.nodes
		.iter()
		.filter(|n| !children.contains(n.id.as_str()))
		.map(|n| n.id.as_str())
		.collect()
}
