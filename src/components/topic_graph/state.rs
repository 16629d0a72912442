//! Interaction state and the derived render pipeline.
//!
//! Two pieces of state exist: the expanded set and the show-all flag.
//! Everything else (levels, edge kinds, visible subset, coordinates) is
//! derived and rebuilt in full after every action — nothing is patched
//! incrementally, so a superseded pass leaves no residue behind.

use std::collections::{HashMap, HashSet};

use log::info;

use super::classify::{EdgeKind, classify_edges};
use super::layout::{LayeredPlacement, LayoutConfig, LayoutStrategy};
use super::levels::assign_levels;
use super::types::GraphData;
use super::visibility;

/// Zoom applied by a viewport refit never leaves this range.
const REFIT_MIN_ZOOM: f64 = 0.2;
const REFIT_MAX_ZOOM: f64 = 1.0;
/// Padding around the content bounds when fitting.
const REFIT_PADDING: f64 = 60.0;
/// Exponential approach rate of the refit animation, per second.
const REFIT_DAMPING: f64 = 5.0;

/// State transitions the host can dispatch. Node clicks arrive as
/// `Toggle` actions rather than captured callbacks.
#[derive(Clone, Debug)]
pub enum Action {
	/// Flip expansion of a node; ignored for childless nodes.
	Toggle(String),
	/// Switch the global show-all flag.
	ShowAll(bool),
	/// A freshly loaded graph; starts collapsed.
	GraphReplaced(GraphData),
}

/// One renderable node with its interaction flags. Coordinates are the
/// box center in graph space.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
	/// Index into `GraphData::nodes`.
	pub node: usize,
	pub x: f64,
	pub y: f64,
	pub level: u32,
	pub has_children: bool,
	pub is_expanded: bool,
}

/// One renderable edge, endpoints resolved to scene indices.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneEdge {
	/// Index into `GraphData::edges`.
	pub edge: usize,
	/// Scene index of the child endpoint.
	pub from: usize,
	/// Scene index of the parent endpoint.
	pub to: usize,
	pub kind: EdgeKind,
}

/// Pan/zoom applied on top of graph coordinates.
#[derive(Clone, Copy, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

/// In-flight background drag.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
	/// Total pointer travel since mousedown, used to tell a click from
	/// a drag.
	pub travel: f64,
}

#[derive(Clone, Copy, Debug)]
struct RefitTarget {
	x: f64,
	y: f64,
	k: f64,
}

/// The component's whole model: one graph, the two interaction flags,
/// and everything derived from them.
pub struct TopicGraphState {
	pub data: GraphData,
	levels: HashMap<String, u32>,
	kinds: Vec<Option<EdgeKind>>,
	child_counts: HashMap<String, usize>,
	expanded: HashSet<String>,
	show_all: bool,
	strategy: Box<dyn LayoutStrategy>,
	pub config: LayoutConfig,
	pub scene_nodes: Vec<SceneNode>,
	pub scene_edges: Vec<SceneEdge>,
	pub transform: ViewTransform,
	pub pan: PanState,
	/// Scene index currently under the pointer.
	pub hover: Option<usize>,
	refit: Option<RefitTarget>,
	pub width: f64,
	pub height: f64,
}

impl TopicGraphState {
	pub fn new(data: GraphData, width: f64, height: f64) -> Self {
		let mut state = Self {
			data: GraphData::default(),
			levels: HashMap::new(),
			kinds: Vec::new(),
			child_counts: HashMap::new(),
			expanded: HashSet::new(),
			show_all: false,
			strategy: Box::new(LayeredPlacement),
			config: LayoutConfig::default(),
			scene_nodes: Vec::new(),
			scene_edges: Vec::new(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			pan: PanState::default(),
			hover: None,
			refit: None,
			width,
			height,
		};
		state.apply(Action::GraphReplaced(data));
		state
	}

	/// Run one action through the reducer, then rebuild the derived
	/// pipeline exactly once and schedule a viewport refit.
	pub fn apply(&mut self, action: Action) {
		match action {
			Action::Toggle(id) => {
				if self.child_counts.get(&id).copied().unwrap_or(0) == 0 {
					// Nothing to reveal; skip the recomputation too.
					return;
				}
				if !self.expanded.remove(&id) {
					self.expanded.insert(id);
				}
			}
			Action::ShowAll(on) => {
				self.show_all = on;
				if on {
					// Pre-expand everything so switching back off later
					// starts from a coherent expanded set.
					self.expanded = self.data.nodes.iter().map(|n| n.id.clone()).collect();
				} else {
					self.expanded.clear();
				}
			}
			Action::GraphReplaced(data) => {
				info!(
					"graph replaced: {} nodes, {} edges",
					data.nodes.len(),
					data.edges.len()
				);
				self.data = data;
				self.expanded.clear();
				self.show_all = false;
				self.levels = assign_levels(&self.data);
				self.kinds = classify_edges(&self.data.edges, &self.levels);
				self.child_counts = count_children(&self.data);
			}
		}
		self.rebuild();
		self.schedule_refit();
	}

	/// Recompute visibility and layout from the current state.
	fn rebuild(&mut self) {
		let visible = visibility::resolve(
			&self.data,
			&self.levels,
			&self.kinds,
			&self.expanded,
			self.show_all,
		);
		let placed = self
			.strategy
			.position(&self.data, &self.levels, &visible, &self.config);

		let index_of: HashMap<&str, usize> = self
			.data
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.as_str(), i))
			.collect();
		let scene_index: HashMap<String, usize> = placed
			.iter()
			.enumerate()
			.map(|(i, p)| (p.id.clone(), i))
			.collect();

		self.scene_nodes = placed
			.iter()
			.map(|p| SceneNode {
				node: index_of[p.id.as_str()],
				x: p.x,
				y: p.y,
				level: p.level,
				has_children: self.child_counts.get(&p.id).copied().unwrap_or(0) > 0,
				is_expanded: self.show_all || self.expanded.contains(&p.id),
			})
			.collect();
		self.scene_edges = visible
			.edges
			.iter()
			.map(|&ei| {
				let edge = &self.data.edges[ei];
				SceneEdge {
					edge: ei,
					from: scene_index[&edge.source],
					to: scene_index[&edge.target],
					kind: self.kinds[ei].unwrap_or(EdgeKind::Hierarchical),
				}
			})
			.collect();
		// Scene indices changed; the next mousemove recomputes hover.
		self.hover = None;
	}

	/// Aim the viewport at the bounding box of the visible content. A
	/// newer target replaces any in-flight one.
	fn schedule_refit(&mut self) {
		if self.scene_nodes.is_empty() {
			self.refit = None;
			return;
		}
		let (hw, hh) = (self.config.node_width / 2.0, self.config.node_height / 2.0);
		let mut min_x = f64::INFINITY;
		let mut max_x = f64::NEG_INFINITY;
		let mut min_y = f64::INFINITY;
		let mut max_y = f64::NEG_INFINITY;
		for n in &self.scene_nodes {
			min_x = min_x.min(n.x - hw);
			max_x = max_x.max(n.x + hw);
			min_y = min_y.min(n.y - hh);
			max_y = max_y.max(n.y + hh);
		}
		let bounds_w = max_x - min_x + 2.0 * REFIT_PADDING;
		let bounds_h = max_y - min_y + 2.0 * REFIT_PADDING;
		let k = (self.width / bounds_w)
			.min(self.height / bounds_h)
			.clamp(REFIT_MIN_ZOOM, REFIT_MAX_ZOOM);
		let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
		self.refit = Some(RefitTarget {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		});
	}

	/// Drop any in-flight refit; called when the user takes over the
	/// viewport by panning or zooming.
	pub fn cancel_refit(&mut self) {
		self.refit = None;
	}

	/// Advance the refit animation by `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		let Some(target) = self.refit else {
			return;
		};
		let blend = (REFIT_DAMPING * dt).min(1.0);
		self.transform.x += (target.x - self.transform.x) * blend;
		self.transform.y += (target.y - self.transform.y) * blend;
		self.transform.k += (target.k - self.transform.k) * blend;
		if (target.x - self.transform.x).abs() < 0.5
			&& (target.y - self.transform.y).abs() < 0.5
			&& (target.k - self.transform.k).abs() < 1e-3
		{
			self.transform = ViewTransform {
				x: target.x,
				y: target.y,
				k: target.k,
			};
			self.refit = None;
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Scene index of the topmost node under a screen position.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let (hw, hh) = (self.config.node_width / 2.0, self.config.node_height / 2.0);
		self.scene_nodes
			.iter()
			.enumerate()
			.rev()
			.find(|(_, n)| (gx - n.x).abs() <= hw && (gy - n.y).abs() <= hh)
			.map(|(i, _)| i)
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.schedule_refit();
	}
}

/// Children per node id, counting only edges whose endpoints both
/// exist. This is what decides whether a node is expandable at all.
fn count_children(data: &GraphData) -> HashMap<String, usize> {
	let ids: HashSet<&str> = data.nodes.iter().map(|n| n.id.as_str()).collect();
	let mut counts = HashMap::new();
	for edge in &data.edges {
		if ids.contains(edge.source.as_str()) && ids.contains(edge.target.as_str()) {
			*counts.entry(edge.target.clone()).or_insert(0) += 1;
		}
	}
	counts
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::topic_graph::types::{Category, Edge, Node};

	fn node(id: &str, category: Category) -> Node {
		Node::new(id, id, category)
	}

	/// a (central) -> {b, b2}; b -> c; c -> d.
	fn chain() -> GraphData {
		GraphData {
			nodes: vec![
				node("a", Category::Central),
				node("b", Category::Cause),
				node("b2", Category::Cause),
				node("c", Category::Effect),
				node("d", Category::Trend),
			],
			edges: vec![
				Edge::new("b", "a"),
				Edge::new("b2", "a"),
				Edge::new("c", "b"),
				Edge::new("d", "c"),
			],
		}
	}

	fn state() -> TopicGraphState {
		TopicGraphState::new(chain(), 800.0, 600.0)
	}

	fn shown_ids(state: &TopicGraphState) -> Vec<&str> {
		let mut ids: Vec<&str> = state
			.scene_nodes
			.iter()
			.map(|n| state.data.nodes[n.node].id.as_str())
			.collect();
		ids.sort_unstable();
		ids
	}

	#[test]
	fn fresh_graph_starts_collapsed() {
		let s = state();
		assert!(!s.show_all);
		assert!(s.expanded.is_empty());
		assert_eq!(shown_ids(&s), vec!["a", "b", "b2"]);
	}

	#[test]
	fn toggle_reveals_and_hides_children() {
		let mut s = state();
		s.apply(Action::Toggle("b".into()));
		assert_eq!(shown_ids(&s), vec!["a", "b", "b2", "c"]);
		s.apply(Action::Toggle("b".into()));
		assert_eq!(shown_ids(&s), vec!["a", "b", "b2"]);
	}

	#[test]
	fn toggle_on_a_childless_node_skips_state_and_rebuild() {
		let mut s = state();
		let before = s.scene_nodes.clone();
		s.apply(Action::Toggle("b2".into()));
		assert!(s.expanded.is_empty());
		assert_eq!(s.scene_nodes, before);
	}

	#[test]
	fn toggling_an_already_visible_subtree_changes_no_visibility() {
		// a's children sit on level 2 and are visible anyway; the
		// toggle still registers so a later collapse is coherent.
		let mut s = state();
		let before = shown_ids(&s).join(",");
		s.apply(Action::Toggle("a".into()));
		assert!(s.expanded.contains("a"));
		assert_eq!(shown_ids(&s).join(","), before);
	}

	#[test]
	fn show_all_expands_everything_and_back() {
		let mut s = state();
		s.apply(Action::ShowAll(true));
		assert_eq!(shown_ids(&s), vec!["a", "b", "b2", "c", "d"]);
		assert_eq!(s.expanded.len(), s.data.nodes.len());
		s.apply(Action::ShowAll(false));
		assert!(s.expanded.is_empty());
		assert_eq!(shown_ids(&s), vec!["a", "b", "b2"]);
	}

	#[test]
	fn show_all_is_idempotent() {
		let mut s = state();
		s.apply(Action::ShowAll(true));
		let once = s.scene_nodes.clone();
		s.apply(Action::ShowAll(true));
		assert_eq!(s.scene_nodes, once);
	}

	#[test]
	fn replacing_the_graph_resets_interaction_state() {
		let mut s = state();
		s.apply(Action::ShowAll(true));
		s.apply(Action::GraphReplaced(chain()));
		assert!(!s.show_all);
		assert!(s.expanded.is_empty());
		assert_eq!(shown_ids(&s), vec!["a", "b", "b2"]);
	}

	#[test]
	fn expanding_never_hides_previously_visible_nodes() {
		let mut s = state();
		let before: Vec<String> = shown_ids(&s).iter().map(|s| s.to_string()).collect();
		s.apply(Action::Toggle("b".into()));
		let after = shown_ids(&s);
		for id in &before {
			assert!(after.contains(&id.as_str()));
		}
	}

	#[test]
	fn every_action_schedules_a_single_refit_target() {
		let mut s = state();
		s.apply(Action::Toggle("b".into()));
		let first = s.refit.map(|t| (t.x, t.y, t.k));
		s.apply(Action::Toggle("c".into()));
		let second = s.refit.map(|t| (t.x, t.y, t.k));
		assert!(first.is_some() && second.is_some());
		// The second target replaced the first rather than stacking.
		assert_ne!(first, second);
	}

	#[test]
	fn refit_is_damped_not_instantaneous() {
		let mut s = state();
		s.apply(Action::ShowAll(true));
		let target = s.refit.expect("refit scheduled");
		let start = s.transform.k;
		s.tick(0.016);
		let after_one = s.transform.k;
		assert_ne!(after_one, start);
		assert_ne!(after_one, target.k);
		// The animation converges and then stops.
		for _ in 0..1000 {
			s.tick(0.016);
		}
		assert!(s.refit.is_none());
		assert_eq!(s.transform.k, target.k);
	}

	#[test]
	fn user_gestures_cancel_the_refit() {
		let mut s = state();
		s.apply(Action::Toggle("b".into()));
		assert!(s.refit.is_some());
		s.cancel_refit();
		assert!(s.refit.is_none());
	}

	#[test]
	fn scene_edges_connect_scene_indices() {
		let s = state();
		for edge in &s.scene_edges {
			assert!(edge.from < s.scene_nodes.len());
			assert!(edge.to < s.scene_nodes.len());
			assert_eq!(edge.kind, EdgeKind::Hierarchical);
			// Child renders below its parent.
			assert!(s.scene_nodes[edge.from].y > s.scene_nodes[edge.to].y);
		}
	}

	#[test]
	fn expansion_flags_reach_the_scene() {
		let mut s = state();
		s.apply(Action::Toggle("b".into()));
		let b = s
			.scene_nodes
			.iter()
			.find(|n| s.data.nodes[n.node].id == "b")
			.unwrap();
		assert!(b.has_children);
		assert!(b.is_expanded);
		let b2 = s
			.scene_nodes
			.iter()
			.find(|n| s.data.nodes[n.node].id == "b2")
			.unwrap();
		assert!(!b2.has_children);
	}
}
