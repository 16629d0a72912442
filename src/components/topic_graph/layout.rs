//! Coordinate assignment for the visible subset.
//!
//! Every level occupies a fixed horizontal band; within a band,
//! children sit centered under their parent and sibling groups are
//! swept left to right so no two boxes overlap. The whole pass is a
//! pure function of (visible nodes, visible edges, levels): identical
//! input always produces identical coordinates, so nodes the user did
//! not touch stay put across re-layouts.

use std::collections::{BTreeMap, HashMap};

use super::types::GraphData;
use super::visibility::VisibleSet;

/// Pixel constants the engine positions against.
#[derive(Clone, Copy, Debug)]
pub struct LayoutConfig {
	/// Horizontal footprint per node.
	pub node_width: f64,
	/// Vertical footprint per node.
	pub node_height: f64,
	/// Vertical gap between level bands, center to center.
	pub level_spacing: f64,
	/// Horizontal gap between same-level nodes.
	pub sibling_spacing: f64,
	/// Offset of the first level band from the canvas origin.
	pub margin: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			node_width: 180.0,
			node_height: 72.0,
			level_spacing: 150.0,
			sibling_spacing: 36.0,
			margin: 40.0,
		}
	}
}

/// A node the engine has placed; coordinates are the box center.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedNode {
	pub id: String,
	pub x: f64,
	pub y: f64,
	pub level: u32,
}

/// Seam between the controller and whichever algorithm computes
/// coordinates. The shipped strategy is [`LayeredPlacement`]; a
/// delegating strategy wrapping an external layered-drawing crate would
/// slot in here without touching the controller.
pub trait LayoutStrategy {
	/// Position every visible node. Must be deterministic and must
	/// never drop a node, whatever the edge list looks like.
	fn position(
		&self,
		data: &GraphData,
		levels: &HashMap<String, u32>,
		visible: &VisibleSet,
		config: &LayoutConfig,
	) -> Vec<PlacedNode>;
}

/// Custom recursive placement: per-level bands, children centered under
/// their parent, left-to-right sweep against overlap, orphans centered
/// as their own group.
#[derive(Clone, Copy, Debug, Default)]
pub struct LayeredPlacement;

impl LayoutStrategy for LayeredPlacement {
	fn position(
		&self,
		data: &GraphData,
		levels: &HashMap<String, u32>,
		visible: &VisibleSet,
		config: &LayoutConfig,
	) -> Vec<PlacedNode> {
		// Visible nodes in node-list order; that order is what keeps
		// siblings from jittering between passes.
		let vis: Vec<(&str, u32)> = data
			.nodes
			.iter()
			.filter(|n| visible.nodes.contains(&n.id))
			.map(|n| (n.id.as_str(), levels.get(&n.id).copied().unwrap_or(1)))
			.collect();

		let mut by_level: BTreeMap<u32, Vec<&str>> = BTreeMap::new();
		for &(id, level) in &vis {
			by_level.entry(level).or_default().push(id);
		}

		// A node's layout parent is the target of its first visible
		// hierarchical edge, except that a parent one level up beats a
		// parent further away.
		let adjacent = |child: &str, parent: &str| {
			levels.get(parent).map(|p| p + 1) == levels.get(child).copied()
		};
		let mut parent_of: HashMap<&str, &str> = HashMap::new();
		for &ei in &visible.edges {
			let edge = &data.edges[ei];
			let (child, parent) = (edge.source.as_str(), edge.target.as_str());
			let replace = match parent_of.get(child) {
				None => true,
				Some(&current) => !adjacent(child, current) && adjacent(child, parent),
			};
			if replace {
				parent_of.insert(child, parent);
			}
		}

		let mut pos: HashMap<&str, f64> = HashMap::with_capacity(vis.len());
		for (&level, members) in &by_level {
			place_level(level, members, &parent_of, levels, &mut pos, config);
		}

		vis.iter()
			.map(|&(id, level)| PlacedNode {
				id: id.to_string(),
				x: pos[id],
				y: config.margin + f64::from(level - 1) * config.level_spacing,
				level,
			})
			.collect()
	}
}

/// One sibling run with a preferred center.
struct Group<'a> {
	center: f64,
	members: Vec<&'a str>,
}

/// Place one level band. Members are grouped under their placed
/// level-above parent; nodes without one form a single group centered
/// on the canvas origin. Groups are then swept left to right, each
/// starting at its preferred position unless the previous group forces
/// it further right.
fn place_level<'a>(
	level: u32,
	members: &[&'a str],
	parent_of: &HashMap<&'a str, &'a str>,
	levels: &HashMap<String, u32>,
	pos: &mut HashMap<&'a str, f64>,
	config: &LayoutConfig,
) {
	let mut grouped: Vec<(&str, Vec<&'a str>)> = Vec::new();
	let mut orphans: Vec<&'a str> = Vec::new();

	for &id in members {
		let placed_parent = parent_of.get(id).copied().filter(|p| {
			levels.get(*p).copied() == Some(level.saturating_sub(1)) && pos.contains_key(p)
		});
		match placed_parent {
			Some(parent) => match grouped.iter_mut().find(|(p, _)| *p == parent) {
				Some((_, children)) => children.push(id),
				None => grouped.push((parent, vec![id])),
			},
			None => orphans.push(id),
		}
	}

	let mut groups: Vec<Group<'a>> = grouped
		.into_iter()
		.map(|(parent, members)| Group {
			center: pos[parent],
			members,
		})
		.collect();
	if !orphans.is_empty() {
		groups.push(Group {
			center: 0.0,
			members: orphans,
		});
	}

	// Preferred-center order keeps the sweep stable; ties fall back to
	// the first member's id.
	groups.sort_by(|a, b| {
		a.center
			.total_cmp(&b.center)
			.then_with(|| a.members[0].cmp(b.members[0]))
	});

	let step = config.node_width + config.sibling_spacing;
	let mut cursor = f64::NEG_INFINITY;
	for group in &groups {
		let width =
			group.members.len() as f64 * config.node_width
				+ (group.members.len() - 1) as f64 * config.sibling_spacing;
		let start = (group.center - width / 2.0).max(cursor);
		for (i, &id) in group.members.iter().enumerate() {
			pos.insert(id, start + config.node_width / 2.0 + i as f64 * step);
		}
		cursor = start + width + config.sibling_spacing;
	}
}
