//! Derived visual state for a playback position.
//!
//! Everything here is a pure function of the step index: calling
//! [`derive_visuals`] for step `k` gives the same answer whether playback got
//! there tick by tick, after a pause, or after the scene was rebuilt.

use std::collections::HashSet;

use super::types::{Algorithm, PathStep};

/// Color role of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRole {
	/// Not reached yet.
	Neutral,
	/// Start node. Wins over every other role.
	Start,
	/// Goal node. Wins over `Visited`.
	Goal,
	/// Target of a revealed step.
	Visited,
}

/// Color and width role of an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeRole {
	/// Thin line in the neutral color.
	Neutral,
	/// On the current search path.
	Active,
}

/// Visual state at one step index.
#[derive(Clone, Debug, PartialEq)]
pub struct Visuals {
	start: String,
	goal: String,
	visited: HashSet<String>,
	/// Edge revealed by the latest step, if any.
	pub highlighted_edge: Option<PathStep>,
	/// Earlier edges abandoned by the latest step (backtracking searches only).
	pub dehighlighted_edges: Vec<PathStep>,
	/// Every revealed edge that has not been abandoned, in reveal order.
	pub active_edges: Vec<PathStep>,
}

impl Visuals {
	/// Role of the node labelled `label`, by precedence Start, Goal, Visited.
	pub fn node_role(&self, label: &str) -> NodeRole {
		if label == self.start {
			NodeRole::Start
		} else if label == self.goal {
			NodeRole::Goal
		} else if self.visited.contains(label) {
			NodeRole::Visited
		} else {
			NodeRole::Neutral
		}
	}

	/// Whether `label` is the target of a revealed step, regardless of role
	/// precedence.
	pub fn is_visited(&self, label: &str) -> bool {
		self.visited.contains(label)
	}

	/// Target of the latest step.
	pub fn current_target(&self) -> Option<&str> {
		self.highlighted_edge.as_ref().map(PathStep::target)
	}
}

/// Compute node roles and edge changes for `step_index`.
///
/// `step_index` counts revealed steps; it is clamped to `paths.len()`.
pub fn derive_visuals(
	step_index: usize,
	paths: &[PathStep],
	start: &str,
	goal: &str,
	algorithm: Algorithm,
) -> Visuals {
	let revealed = &paths[..step_index.min(paths.len())];
	let visited = revealed.iter().map(|s| s.target().to_owned()).collect();

	// Indices into `revealed` of steps whose edge is still lit.
	let mut live: Vec<usize> = Vec::with_capacity(revealed.len());
	let mut dehighlighted = Vec::new();
	for (i, step) in revealed.iter().enumerate() {
		if algorithm.revisits_sources() {
			let latest = i + 1 == revealed.len();
			live.retain(|&j| {
				let abandoned = revealed[j].source() == step.source();
				if abandoned && latest {
					dehighlighted.push(revealed[j].clone());
				}
				!abandoned
			});
		}
		live.push(i);
	}

	Visuals {
		start: start.to_owned(),
		goal: goal.to_owned(),
		visited,
		highlighted_edge: revealed.last().cloned(),
		dehighlighted_edges: dehighlighted,
		active_edges: live.into_iter().map(|i| revealed[i].clone()).collect(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn steps(pairs: &[(&str, &str)]) -> Vec<PathStep> {
		pairs.iter().map(|(s, t)| PathStep::new(*s, *t)).collect()
	}

	#[test]
	fn step_zero_only_colors_start_and_goal() {
		let paths = steps(&[("A", "B"), ("B", "C")]);
		let v = derive_visuals(0, &paths, "A", "C", Algorithm::Dfs);
		assert_eq!(v.node_role("A"), NodeRole::Start);
		assert_eq!(v.node_role("C"), NodeRole::Goal);
		assert_eq!(v.node_role("B"), NodeRole::Neutral);
		assert!(v.highlighted_edge.is_none());
		assert!(v.active_edges.is_empty());
	}

	#[test]
	fn dfs_chain_without_backtracking() {
		let paths = steps(&[("A", "B"), ("B", "C")]);
		let v = derive_visuals(2, &paths, "A", "C", Algorithm::Dfs);
		assert_eq!(v.node_role("B"), NodeRole::Visited);
		assert_eq!(v.node_role("C"), NodeRole::Goal);
		assert!(v.is_visited("C"));
		assert_eq!(v.highlighted_edge, Some(PathStep::new("B", "C")));
		assert!(v.dehighlighted_edges.is_empty());
		assert_eq!(v.active_edges, paths);
	}

	#[test]
	fn dfs_reverts_branch_sharing_a_source() {
		let paths = steps(&[("A", "B"), ("B", "D"), ("A", "C")]);
		let v = derive_visuals(3, &paths, "A", "Z", Algorithm::Dfs);
		assert_eq!(v.dehighlighted_edges, steps(&[("A", "B")]));
		assert_eq!(v.active_edges, steps(&[("B", "D"), ("A", "C")]));
		assert_eq!(v.current_target(), Some("C"));
	}

	#[test]
	fn hill_climb_backtracks_like_dfs() {
		let paths = steps(&[("S", "X"), ("S", "Y")]);
		let v = derive_visuals(2, &paths, "S", "G", Algorithm::HillClimb);
		assert_eq!(v.dehighlighted_edges, steps(&[("S", "X")]));
		assert_eq!(v.active_edges, steps(&[("S", "Y")]));
	}

	#[test]
	fn bfs_never_reverts() {
		let paths = steps(&[("A", "B"), ("A", "C"), ("B", "D"), ("B", "E")]);
		for k in 0..=paths.len() {
			let v = derive_visuals(k, &paths, "A", "E", Algorithm::Bfs);
			assert!(v.dehighlighted_edges.is_empty());
			assert_eq!(v.active_edges, paths[..k].to_vec());
		}
	}

	#[test]
	fn reverted_edges_stay_reverted_once_dehighlighted() {
		let paths = steps(&[("A", "B"), ("A", "C"), ("A", "D")]);
		let v = derive_visuals(3, &paths, "A", "D", Algorithm::Dfs);
		// Only the edge still lit before this step is reported.
		assert_eq!(v.dehighlighted_edges, steps(&[("A", "C")]));
		assert_eq!(v.active_edges, steps(&[("A", "D")]));
	}

	#[test]
	fn visited_is_independent_of_call_history() {
		let paths = steps(&[("A", "B"), ("B", "C"), ("C", "D")]);
		let fresh = derive_visuals(2, &paths, "A", "D", Algorithm::Dfs);
		let _ = derive_visuals(3, &paths, "A", "D", Algorithm::Dfs);
		let again = derive_visuals(2, &paths, "A", "D", Algorithm::Dfs);
		assert_eq!(fresh, again);
		assert_eq!(again.node_role("C"), NodeRole::Visited);
	}

	#[test]
	fn start_keeps_its_color_when_revisited() {
		let paths = steps(&[("A", "B"), ("B", "A")]);
		let v = derive_visuals(2, &paths, "A", "C", Algorithm::Dfs);
		assert_eq!(v.node_role("A"), NodeRole::Start);
	}

	#[test]
	fn index_past_the_end_is_clamped() {
		let paths = steps(&[("A", "B")]);
		let v = derive_visuals(10, &paths, "A", "B", Algorithm::Bfs);
		assert_eq!(v.highlighted_edge, Some(PathStep::new("A", "B")));
	}
}
