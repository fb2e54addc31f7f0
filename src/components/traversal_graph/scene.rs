//! Static scene elements for one layout at one viewport size.
//!
//! Each node becomes a circle with a centered label and each link a line with a
//! distance label at its midpoint. Elements carry a stable [`ElementKey`] so the
//! playback controller can restyle them in O(1) without searching by content.
//! A rebuild (new data or new viewport) throws the old scene away.

use std::collections::HashMap;
use std::fmt;

use log::warn;

use super::scale::{ScaleMaps, ScaledValues};
use super::theme::{Color, Theme};
use super::types::{GraphData, PathStep};
use super::visuals::{EdgeRole, NodeRole};

/// Stable identifier of a scene element, derived from graph indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKey {
	/// `node:<index>`
	Node(usize),
	/// `edge:<source>-<target>`, in layout order.
	Edge(usize, usize),
}

impl fmt::Display for ElementKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ElementKey::Node(i) => write!(f, "node:{}", i),
			ElementKey::Edge(s, t) => write!(f, "edge:{}-{}", s, t),
		}
	}
}

/// Current style record of a node circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeStyle {
	/// Base fill; the renderer shades a gradient from it.
	pub fill: Color,
}

impl NodeStyle {
	/// Style for a node in `role`.
	pub fn for_role(role: NodeRole, theme: &Theme) -> Self {
		let fill = match role {
			NodeRole::Neutral => theme.node.neutral,
			NodeRole::Start => theme.node.start,
			NodeRole::Goal => theme.node.goal,
			NodeRole::Visited => theme.node.visited,
		};
		Self { fill }
	}
}

/// Current style record of an edge line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStyle {
	/// Line color.
	pub stroke: Color,
	/// Line width in pixels.
	pub width: f64,
}

impl EdgeStyle {
	/// Style for an edge in `role` at the current element sizes.
	pub fn for_role(role: EdgeRole, theme: &Theme, sizes: &ScaledValues) -> Self {
		match role {
			EdgeRole::Neutral => Self {
				stroke: theme.edge.neutral,
				width: sizes.edge_line_width,
			},
			EdgeRole::Active => Self {
				stroke: theme.edge.active,
				width: sizes.active_line_width,
			},
		}
	}
}

/// A node circle and its label, in viewport coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeElement {
	/// Always [`ElementKey::Node`].
	pub key: ElementKey,
	/// Label used by path steps to refer to this node.
	pub label: String,
	/// Circle center.
	pub center: (f64, f64),
	/// Current style.
	pub style: NodeStyle,
}

/// An edge line and its distance label, in viewport coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeElement {
	/// Always [`ElementKey::Edge`].
	pub key: ElementKey,
	/// Center of the source node.
	pub from: (f64, f64),
	/// Center of the target node.
	pub to: (f64, f64),
	/// Formatted link distance.
	pub distance_text: String,
	/// Current style.
	pub style: EdgeStyle,
}

impl EdgeElement {
	/// Anchor of the distance label.
	pub fn midpoint(&self) -> (f64, f64) {
		(
			(self.from.0 + self.to.0) / 2.0,
			(self.from.1 + self.to.1) / 2.0,
		)
	}
}

/// Render distances without a trailing `.0` for whole numbers.
fn format_distance(distance: f64) -> String {
	if distance.fract().abs() < 1e-9 {
		format!("{:.0}", distance)
	} else {
		format!("{:.1}", distance)
	}
}

/// All elements of one built scene, with key and label lookup tables.
#[derive(Clone, Debug)]
pub struct Scene {
	nodes: Vec<NodeElement>,
	edges: Vec<EdgeElement>,
	/// Element key to position in `nodes` or `edges`.
	slots: HashMap<ElementKey, usize>,
	/// Node label to graph index.
	labels: HashMap<String, usize>,
	directed: bool,
	sizes: ScaledValues,
}

impl Scene {
	/// Build the static scene. Node fills start out as start / goal / neutral.
	pub fn build(
		data: &GraphData,
		maps: &ScaleMaps,
		sizes: ScaledValues,
		start: &str,
		goal: &str,
		theme: &Theme,
	) -> Self {
		let mut slots = HashMap::with_capacity(data.nodes.len() + data.links.len());
		let mut labels = HashMap::with_capacity(data.nodes.len());
		let mut centers = HashMap::with_capacity(data.nodes.len());
		let mut nodes = Vec::with_capacity(data.nodes.len());

		for node in &data.nodes {
			let key = ElementKey::Node(node.index);
			let center = maps.project(node.x, node.y);
			let role = if node.label == start {
				NodeRole::Start
			} else if node.label == goal {
				NodeRole::Goal
			} else {
				NodeRole::Neutral
			};
			slots.insert(key, nodes.len());
			labels.insert(node.label.clone(), node.index);
			centers.insert(node.index, center);
			nodes.push(NodeElement {
				key,
				label: node.label.clone(),
				center,
				style: NodeStyle::for_role(role, theme),
			});
		}

		let mut edges = Vec::with_capacity(data.links.len());
		for link in &data.links {
			let (Some(&from), Some(&to)) = (centers.get(&link.source), centers.get(&link.target))
			else {
				warn!(
					"traversal-replay: link {}-{} names a missing node, skipped",
					link.source, link.target
				);
				continue;
			};
			let key = ElementKey::Edge(link.source, link.target);
			slots.insert(key, edges.len());
			edges.push(EdgeElement {
				key,
				from,
				to,
				distance_text: format_distance(link.distance),
				style: EdgeStyle::for_role(EdgeRole::Neutral, theme, &sizes),
			});
		}

		Self {
			nodes,
			edges,
			slots,
			labels,
			directed: data.directed,
			sizes,
		}
	}

	/// Node circles in layout order.
	pub fn nodes(&self) -> &[NodeElement] {
		&self.nodes
	}

	/// Edge lines in layout order.
	pub fn edges(&self) -> &[EdgeElement] {
		&self.edges
	}

	/// Element sizes the scene was built with.
	pub fn sizes(&self) -> &ScaledValues {
		&self.sizes
	}

	/// True when the layout has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Key of the node carrying `label`.
	pub fn node_key(&self, label: &str) -> Option<ElementKey> {
		self.labels.get(label).map(|&i| ElementKey::Node(i))
	}

	/// Key of the layout edge a traversal step runs along.
	///
	/// Tries the step's own direction first, then the reverse unless the layout
	/// is directed.
	pub fn edge_key(&self, step: &PathStep) -> Option<ElementKey> {
		let source = *self.labels.get(step.source())?;
		let target = *self.labels.get(step.target())?;
		let forward = ElementKey::Edge(source, target);
		if self.slots.contains_key(&forward) {
			return Some(forward);
		}
		let backward = ElementKey::Edge(target, source);
		(!self.directed && self.slots.contains_key(&backward)).then_some(backward)
	}

	/// Node element by key.
	pub fn node(&self, key: ElementKey) -> Option<&NodeElement> {
		match key {
			ElementKey::Node(_) => self.slots.get(&key).map(|&i| &self.nodes[i]),
			ElementKey::Edge(..) => None,
		}
	}

	/// Edge element by key.
	pub fn edge(&self, key: ElementKey) -> Option<&EdgeElement> {
		match key {
			ElementKey::Edge(..) => self.slots.get(&key).map(|&i| &self.edges[i]),
			ElementKey::Node(_) => None,
		}
	}

	/// Recompute the style record of every node.
	pub fn restyle_nodes(&mut self, mut style: impl FnMut(&NodeElement) -> NodeStyle) {
		for node in &mut self.nodes {
			node.style = style(node);
		}
	}

	/// Recompute the style record of every edge.
	pub fn restyle_edges(&mut self, mut style: impl FnMut(&EdgeElement) -> EdgeStyle) {
		for edge in &mut self.edges {
			edge.style = style(edge);
		}
	}

	/// Overwrite the style record of a node. Returns `false` for unknown keys.
	pub fn set_node_style(&mut self, key: ElementKey, style: NodeStyle) -> bool {
		let ElementKey::Node(_) = key else {
			return false;
		};
		match self.slots.get(&key) {
			Some(&i) => {
				self.nodes[i].style = style;
				true
			}
			None => false,
		}
	}

	/// Overwrite the style record of an edge. Returns `false` for unknown keys.
	pub fn set_edge_style(&mut self, key: ElementKey, style: EdgeStyle) -> bool {
		let ElementKey::Edge(..) = key else {
			return false;
		};
		match self.slots.get(&key) {
			Some(&i) => {
				self.edges[i].style = style;
				true
			}
			None => false,
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::components::traversal_graph::scale::{ScaleConfig, Viewport};

	fn graph() -> GraphData {
		serde_json::from_value(json!({
			"nodes": [
				{ "index": 0, "x": 0.0, "y": 0.0, "label": "A" },
				{ "index": 1, "x": 900.0, "y": 0.0, "label": "B" },
				{ "index": 2, "x": 450.0, "y": 700.0, "label": "C" }
			],
			"links": [
				{ "source": 0, "target": 1, "distance": 7.0 },
				{ "source": 1, "target": 2, "distance": 3.4 },
				{ "source": 2, "target": 9, "distance": 1.0 }
			]
		}))
		.unwrap()
	}

	fn build(data: &GraphData) -> Scene {
		let config = ScaleConfig::default();
		let maps = ScaleMaps::compute(Viewport::new(960, 760), &config);
		let sizes = ScaledValues::new(&config, maps.k);
		Scene::build(data, &maps, sizes, "A", "C", &Theme::default())
	}

	#[test]
	fn keys_render_as_stable_identifiers() {
		assert_eq!(ElementKey::Node(4).to_string(), "node:4");
		assert_eq!(ElementKey::Edge(1, 2).to_string(), "edge:1-2");
	}

	#[test]
	fn builds_one_element_per_node_and_valid_link() {
		let scene = build(&graph());
		assert_eq!(scene.nodes().len(), 3);
		assert_eq!(scene.edges().len(), 2);
		let b = scene.node(ElementKey::Node(1)).unwrap();
		assert_eq!(b.center, (930.0, 30.0));
	}

	#[test]
	fn initial_fill_marks_start_and_goal() {
		let scene = build(&graph());
		let theme = Theme::default();
		let fill = |i| scene.node(ElementKey::Node(i)).unwrap().style.fill;
		assert_eq!(fill(0), theme.node.start);
		assert_eq!(fill(1), theme.node.neutral);
		assert_eq!(fill(2), theme.node.goal);
	}

	#[test]
	fn distance_labels_sit_at_midpoints() {
		let scene = build(&graph());
		let ab = scene.edge(ElementKey::Edge(0, 1)).unwrap();
		assert_eq!(ab.distance_text, "7");
		assert_eq!(ab.midpoint(), (480.0, 30.0));
		let bc = scene.edge(ElementKey::Edge(1, 2)).unwrap();
		assert_eq!(bc.distance_text, "3.4");
	}

	#[test]
	fn steps_resolve_in_either_direction_when_undirected() {
		let scene = build(&graph());
		assert_eq!(
			scene.edge_key(&PathStep::new("B", "A")),
			Some(ElementKey::Edge(0, 1))
		);
		assert_eq!(scene.edge_key(&PathStep::new("A", "C")), None);
		assert_eq!(scene.edge_key(&PathStep::new("A", "Q")), None);
	}

	#[test]
	fn directed_layout_only_matches_forward_steps() {
		let mut data = graph();
		data.directed = true;
		let scene = build(&data);
		assert_eq!(scene.edge_key(&PathStep::new("B", "A")), None);
		assert_eq!(
			scene.edge_key(&PathStep::new("A", "B")),
			Some(ElementKey::Edge(0, 1))
		);
	}

	#[test]
	fn style_updates_target_only_their_key() {
		let mut scene = build(&graph());
		let theme = Theme::default();
		let style = NodeStyle::for_role(NodeRole::Visited, &theme);
		assert!(scene.set_node_style(ElementKey::Node(1), style));
		assert!(!scene.set_node_style(ElementKey::Node(7), style));
		assert!(!scene.set_node_style(ElementKey::Edge(0, 1), style));
		assert_eq!(scene.node(ElementKey::Node(1)).unwrap().style, style);
		assert_eq!(
			scene.node(ElementKey::Node(0)).unwrap().style.fill,
			theme.node.start
		);
	}

	#[test]
	fn empty_graph_builds_empty_scene() {
		assert!(build(&GraphData::default()).is_empty());
	}
}
