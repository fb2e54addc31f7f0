//! Playback state machine driving the replay.
//!
//! The controller owns the scene, the run being replayed and the timer. The
//! step index is the single source of truth: every style it writes into the
//! scene is derived from it through [`derive_visuals`], so a rebuild at any
//! point can reproduce the current picture from scratch.
//!
//! ```text
//!   Idle --start--> Running --tick (last)--> Complete
//!    ^               |   ^
//!    |             pause resume
//!    |               v   |
//!    +----reset---- Paused            (reset is valid from every phase)
//! ```
//!
//! Calls that do not apply to the current phase are ignored.

use log::{debug, info, warn};

use super::scale::{ScaleConfig, ScaleMaps, ScaledValues, Viewport};
use super::scene::{EdgeStyle, NodeStyle, Scene};
use super::theme::Theme;
use super::ticker::Ticker;
use super::types::{Interval, RunData};
use super::visuals::{EdgeRole, Visuals, derive_visuals};

/// Lifecycle phase of a replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
	/// Nothing scheduled, step index 0.
	#[default]
	Idle,
	/// Timer armed, advancing.
	Running,
	/// Timer disarmed, step index retained.
	Paused,
	/// Every step revealed.
	Complete,
}

/// Position of the replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackState {
	/// Number of revealed steps.
	pub step_index: usize,
	/// Current lifecycle phase.
	pub phase: Phase,
}

type ProgressObserver = Box<dyn FnMut(Option<&str>)>;
type CompletionObserver = Box<dyn FnMut()>;

fn build_scene(run: &RunData, viewport: Viewport, scale: &ScaleConfig, theme: &Theme) -> Scene {
	let maps = ScaleMaps::compute(viewport, scale);
	let sizes = ScaledValues::new(scale, maps.k);
	Scene::build(
		&run.graph,
		&maps,
		sizes,
		&run.config.start,
		&run.config.goal,
		theme,
	)
}

/// Replays one run step by step on ticks delivered by a [`Ticker`].
pub struct PlaybackController<T: Ticker> {
	run: RunData,
	viewport: Viewport,
	scale: ScaleConfig,
	theme: Theme,
	scene: Scene,
	state: PlaybackState,
	ticker: T,
	/// Used on the next arm; an armed timer keeps its old period.
	interval: Interval,
	progress: Option<String>,
	completion_fired: bool,
	on_progress: Option<ProgressObserver>,
	on_complete: Option<CompletionObserver>,
}

impl<T: Ticker> PlaybackController<T> {
	/// Controller with the default scale configuration and theme.
	pub fn new(run: RunData, viewport: Viewport, ticker: T) -> Self {
		Self::with_style(run, viewport, ticker, ScaleConfig::default(), Theme::default())
	}

	/// Controller with explicit sizing and colors.
	pub fn with_style(
		run: RunData,
		viewport: Viewport,
		ticker: T,
		scale: ScaleConfig,
		theme: Theme,
	) -> Self {
		let scene = build_scene(&run, viewport, &scale, &theme);
		Self {
			interval: run.config.interval,
			run,
			viewport,
			scale,
			theme,
			scene,
			state: PlaybackState::default(),
			ticker,
			progress: None,
			completion_fired: false,
			on_progress: None,
			on_complete: None,
		}
	}

	/// Observe the step text: `Some("from X to Y")` per tick, `None` when cleared.
	pub fn on_progress(&mut self, observer: impl FnMut(Option<&str>) + 'static) {
		self.on_progress = Some(Box::new(observer));
	}

	/// Observe completion. Invoked once per run, never on pause or reset.
	pub fn on_complete(&mut self, observer: impl FnMut() + 'static) {
		self.on_complete = Some(Box::new(observer));
	}

	/// Current step index and phase.
	pub fn state(&self) -> PlaybackState {
		self.state
	}

	/// Elements with their current styles, for rendering.
	pub fn scene(&self) -> &Scene {
		&self.scene
	}

	/// Colors used for every role.
	pub fn theme(&self) -> &Theme {
		&self.theme
	}

	/// Size the scene was last built for.
	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	/// Text of the latest step, if any has been shown since the last reset.
	pub fn progress(&self) -> Option<&str> {
		self.progress.as_deref()
	}

	/// Number of steps in the run.
	pub fn total_steps(&self) -> usize {
		self.run.search.paths.len()
	}

	/// Period used on the next arm.
	pub fn interval(&self) -> Interval {
		self.interval
	}

	#[cfg(test)]
	pub(crate) fn ticker(&self) -> &T {
		&self.ticker
	}

	/// Change the tick period. Takes effect on the next `start` or `resume`.
	pub fn set_interval(&mut self, interval: Interval) {
		self.interval = interval;
	}

	/// Replace the run. The timer is released before anything else changes.
	pub fn load(&mut self, run: RunData) {
		self.ticker.disarm();
		info!(
			"traversal-replay: loaded run with {} nodes, {} links, {} steps ({:?})",
			run.graph.nodes.len(),
			run.graph.links.len(),
			run.search.paths.len(),
			run.search.algorithm
		);
		self.interval = run.config.interval;
		self.run = run;
		self.scene = build_scene(&self.run, self.viewport, &self.scale, &self.theme);
		self.state = PlaybackState::default();
		self.completion_fired = false;
		self.set_progress(None);
		self.apply_full();
	}

	/// Rebuild the scene for a new viewport, keeping the playback position.
	pub fn resize(&mut self, viewport: Viewport) {
		if viewport == self.viewport {
			return;
		}
		self.viewport = viewport;
		self.scene = build_scene(&self.run, viewport, &self.scale, &self.theme);
		self.apply_full();
	}

	/// Begin playback from `Idle`. An empty traversal completes immediately.
	pub fn start(&mut self) {
		if self.state.phase != Phase::Idle {
			debug!("traversal-replay: start ignored while {:?}", self.state.phase);
			return;
		}
		self.apply_full();
		if self.run.search.paths.is_empty() {
			self.complete();
			return;
		}
		self.ticker.arm(self.interval);
		self.state.phase = Phase::Running;
	}

	/// Reveal the next step. Ignored unless running.
	pub fn tick(&mut self) {
		if self.state.phase != Phase::Running {
			debug!("traversal-replay: tick ignored while {:?}", self.state.phase);
			return;
		}
		let total = self.run.search.paths.len();
		if self.state.step_index >= total {
			self.complete();
			return;
		}

		let next = self.state.step_index + 1;
		let visuals = self.visuals_at(next);
		self.apply_tick(&visuals);
		let description = self.run.search.paths[self.state.step_index].to_string();
		self.state.step_index = next;
		self.set_progress(Some(description));

		if next == total {
			self.complete();
		}
	}

	/// Stop the timer, keeping the step index. Ignored unless running.
	pub fn pause(&mut self) {
		if self.state.phase != Phase::Running {
			debug!("traversal-replay: pause ignored while {:?}", self.state.phase);
			return;
		}
		self.ticker.disarm();
		self.state.phase = Phase::Paused;
	}

	/// Continue from the retained step index.
	pub fn resume(&mut self) {
		if self.state.phase != Phase::Paused {
			debug!("traversal-replay: resume ignored while {:?}", self.state.phase);
			return;
		}
		self.ticker.arm(self.interval);
		self.state.phase = Phase::Running;
	}

	/// Back to step 0 and `Idle` from any phase.
	pub fn reset(&mut self) {
		self.ticker.disarm();
		self.state = PlaybackState::default();
		self.completion_fired = false;
		self.set_progress(None);
		self.apply_full();
	}

	fn visuals_at(&self, step_index: usize) -> Visuals {
		derive_visuals(
			step_index,
			&self.run.search.paths,
			&self.run.config.start,
			&self.run.config.goal,
			self.run.search.algorithm,
		)
	}

	/// Restyle every element for the current step index.
	fn apply_full(&mut self) {
		let visuals = self.visuals_at(self.state.step_index);
		let theme = &self.theme;
		let neutral = EdgeStyle::for_role(EdgeRole::Neutral, theme, self.scene.sizes());
		let active = EdgeStyle::for_role(EdgeRole::Active, theme, self.scene.sizes());

		self.scene
			.restyle_nodes(|node| NodeStyle::for_role(visuals.node_role(&node.label), theme));
		self.scene.restyle_edges(|_| neutral);
		for step in &visuals.active_edges {
			if let Some(key) = self.scene.edge_key(step) {
				self.scene.set_edge_style(key, active);
			}
		}
	}

	/// Restyle only what the latest step changed.
	fn apply_tick(&mut self, visuals: &Visuals) {
		let neutral = EdgeStyle::for_role(EdgeRole::Neutral, &self.theme, self.scene.sizes());
		let active = EdgeStyle::for_role(EdgeRole::Active, &self.theme, self.scene.sizes());

		let mut reverted = Vec::with_capacity(visuals.dehighlighted_edges.len());
		for step in &visuals.dehighlighted_edges {
			if let Some(key) = self.scene.edge_key(step) {
				self.scene.set_edge_style(key, neutral);
				reverted.push(key);
			}
		}
		// An abandoned step can run along the same line as one still lit.
		if !reverted.is_empty() {
			for step in &visuals.active_edges {
				if let Some(key) = self.scene.edge_key(step).filter(|k| reverted.contains(k)) {
					self.scene.set_edge_style(key, active);
				}
			}
		}

		let Some(step) = &visuals.highlighted_edge else {
			return;
		};
		match self.scene.edge_key(step) {
			Some(edge) => {
				self.scene.set_edge_style(edge, active);
			}
			None => warn!("traversal-replay: no link for step {}, edge highlight skipped", step),
		}
		// The target is visited whether or not the layout links the two nodes.
		match self.scene.node_key(step.target()) {
			Some(node) => {
				let style = NodeStyle::for_role(visuals.node_role(step.target()), &self.theme);
				self.scene.set_node_style(node, style);
			}
			None => warn!(
				"traversal-replay: unknown node {:?} in step {}, node highlight skipped",
				step.target(),
				step
			),
		}
	}

	fn complete(&mut self) {
		self.ticker.disarm();
		self.state.phase = Phase::Complete;
		if self.completion_fired {
			return;
		}
		self.completion_fired = true;
		info!(
			"traversal-replay: playback complete after {} steps",
			self.state.step_index
		);
		if let Some(observer) = self.on_complete.as_mut() {
			observer();
		}
	}

	/// Every tick notifies, even when its text repeats; a clear only notifies once.
	fn set_progress(&mut self, text: Option<String>) {
		if text.is_none() && self.progress.is_none() {
			return;
		}
		self.progress = text;
		if let Some(observer) = self.on_progress.as_mut() {
			observer(self.progress.as_deref());
		}
	}
}
