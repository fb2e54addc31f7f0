//! Run data consumed by the traversal player: layout, search result and playback config.

use std::fmt;

use serde::Deserialize;

use super::error::{ConfigError, LoadError};

/// A node of the precomputed layout.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GraphNode {
	/// Dense, unique index. Links refer to nodes by this value.
	pub index: usize,
	/// Horizontal position in logical layout space.
	pub x: f64,
	/// Vertical position in logical layout space.
	pub y: f64,
	/// Unique label. Path steps refer to nodes by this value.
	pub label: String,
}

/// A layout edge between two node indices.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GraphLink {
	/// Source node index.
	pub source: usize,
	/// Target node index.
	pub target: usize,
	/// Edge weight shown at the midpoint of the line.
	#[serde(default)]
	pub distance: f64,
}

/// Complete layout: nodes and links.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct GraphData {
	/// Nodes in index order.
	pub nodes: Vec<GraphNode>,
	/// Links by node index.
	pub links: Vec<GraphLink>,
	/// When set, a path step only matches a link in its own direction.
	#[serde(default)]
	pub directed: bool,
}

/// One traversed edge, as `(source label, target label)`.
///
/// Deserializes from a two-element array such as `["A", "B"]`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Hash)]
pub struct PathStep(pub String, pub String);

impl PathStep {
	/// Step from `source` to `target`.
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self(source.into(), target.into())
	}

	/// Label of the node the step leaves.
	pub fn source(&self) -> &str {
		&self.0
	}

	/// Label of the node the step reaches.
	pub fn target(&self) -> &str {
		&self.1
	}
}

impl fmt::Display for PathStep {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "from {} to {}", self.0, self.1)
	}
}

/// Search strategy that produced the path sequence.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
	/// Depth-first search.
	#[default]
	Dfs,
	/// Breadth-first search.
	Bfs,
	/// Greedy hill climbing.
	#[serde(alias = "hill-climb", alias = "hillclimb")]
	HillClimb,
}

impl Algorithm {
	/// Whether the search can leave the same source node more than once after
	/// backtracking. Breadth-first expansion never does.
	pub fn revisits_sources(self) -> bool {
		match self {
			Algorithm::Dfs | Algorithm::HillClimb => true,
			Algorithm::Bfs => false,
		}
	}
}

/// Ordered traversal returned by the search service.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct SearchResult {
	/// Steps in traversal order.
	pub paths: Vec<PathStep>,
	/// Search that produced the steps.
	#[serde(default)]
	pub algorithm: Algorithm,
}

/// Delay between two ticks, in milliseconds. Always positive.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(try_from = "i64")]
pub struct Interval(u32);

impl Interval {
	/// Upper bound accepted by `setInterval`.
	pub const MAX_MILLIS: i64 = i32::MAX as i64;

	/// Validated interval.
	pub fn from_millis(ms: i64) -> Result<Self, ConfigError> {
		if ms <= 0 {
			return Err(ConfigError::NonPositiveInterval(ms));
		}
		if ms > Self::MAX_MILLIS {
			return Err(ConfigError::IntervalTooLarge(ms));
		}
		Ok(Self(ms as u32))
	}

	/// Milliseconds between ticks.
	pub fn as_millis(self) -> u32 {
		self.0
	}
}

impl TryFrom<i64> for Interval {
	type Error = ConfigError;

	fn try_from(ms: i64) -> Result<Self, Self::Error> {
		Self::from_millis(ms)
	}
}

impl Default for Interval {
	fn default() -> Self {
		Self(500)
	}
}

/// Playback settings chosen by the host form.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct PlaybackConfig {
	/// Tick period.
	#[serde(rename = "interval_ms", default)]
	pub interval: Interval,
	/// Label of the start node. An unknown label simply highlights nothing.
	#[serde(default)]
	pub start: String,
	/// Label of the goal node. An unknown label simply highlights nothing.
	#[serde(default)]
	pub goal: String,
}

/// One complete run: layout, traversal and playback settings arrive together.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct RunData {
	/// Layout.
	pub graph: GraphData,
	/// Traversal to replay.
	pub search: SearchResult,
	/// Playback settings.
	#[serde(default)]
	pub config: PlaybackConfig,
}

impl RunData {
	/// Parse a run document of the form `{ graph, search, config }`.
	pub fn from_json(text: &str) -> Result<Self, LoadError> {
		Ok(serde_json::from_str(text)?)
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn parses_run_document() {
		let doc = json!({
			"graph": {
				"nodes": [
					{ "index": 0, "x": 10.0, "y": 20.0, "label": "A" },
					{ "index": 1, "x": 400.0, "y": 300.0, "label": "B" }
				],
				"links": [{ "source": 0, "target": 1, "distance": 12.5 }]
			},
			"search": { "paths": [["A", "B"]], "algorithm": "hill_climb" },
			"config": { "interval_ms": 250, "start": "A", "goal": "B" }
		});

		let run = RunData::from_json(&doc.to_string()).unwrap();
		assert_eq!(run.graph.nodes.len(), 2);
		assert!(!run.graph.directed);
		assert_eq!(run.search.paths, vec![PathStep::new("A", "B")]);
		assert_eq!(run.search.algorithm, Algorithm::HillClimb);
		assert_eq!(run.config.interval.as_millis(), 250);
		assert_eq!(run.config.goal, "B");
	}

	#[test]
	fn rejects_non_positive_interval() {
		let doc = json!({
			"graph": { "nodes": [], "links": [] },
			"search": { "paths": [], "algorithm": "bfs" },
			"config": { "interval_ms": 0, "start": "A", "goal": "B" }
		});

		let err = RunData::from_json(&doc.to_string()).unwrap_err();
		assert!(matches!(err, LoadError::Parse(_)));
		assert!(err.to_string().contains("positive"));
	}

	#[test]
	fn interval_bounds() {
		assert_eq!(
			Interval::from_millis(-5),
			Err(ConfigError::NonPositiveInterval(-5))
		);
		assert_eq!(
			Interval::from_millis(Interval::MAX_MILLIS + 1),
			Err(ConfigError::IntervalTooLarge(Interval::MAX_MILLIS + 1))
		);
		assert_eq!(Interval::from_millis(1).unwrap().as_millis(), 1);
	}

	#[test]
	fn algorithm_aliases() {
		let algo: Algorithm = serde_json::from_str("\"hill-climb\"").unwrap();
		assert_eq!(algo, Algorithm::HillClimb);
		assert!(algo.revisits_sources());
		assert!(!Algorithm::Bfs.revisits_sources());
	}

	#[test]
	fn step_describes_itself() {
		assert_eq!(PathStep::new("A", "B").to_string(), "from A to B");
	}
}
