//! Control surface exposed to the hosting view.
//!
//! [`PlaybackHandle`] is the shared slot the host keeps: the canvas component
//! installs its controller into it, buttons call through it. Every call is
//! safe in every phase and never panics; when nothing is installed or the
//! controller is already borrowed (a callback calling back in), it logs and
//! does nothing.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};

use super::error::ConfigError;
use super::playback::{Phase, PlaybackController, PlaybackState};
use super::ticker::{IntervalTicker, Ticker};
use super::types::Interval;

/// Operations a host may invoke at any time.
pub trait PlaybackControls {
	/// Start from `Idle`, or replay from step 0 once complete.
	fn play(&mut self);
	/// Pause while running, resume while paused, otherwise nothing.
	fn toggle_pause(&mut self);
	/// Stop the timer and return to step 0.
	fn reset_visualization(&mut self);
}

impl<T: Ticker> PlaybackControls for PlaybackController<T> {
	fn play(&mut self) {
		match self.state().phase {
			Phase::Idle => self.start(),
			Phase::Complete => {
				self.reset();
				self.start();
			}
			Phase::Running | Phase::Paused => {
				debug!("traversal-replay: already playing, start ignored")
			}
		}
	}

	fn toggle_pause(&mut self) {
		match self.state().phase {
			Phase::Running => self.pause(),
			Phase::Paused => self.resume(),
			Phase::Idle | Phase::Complete => {
				debug!("traversal-replay: nothing to pause or resume")
			}
		}
	}

	fn reset_visualization(&mut self) {
		self.reset();
	}
}

/// Cloneable handle to the controller owned by a mounted player.
pub struct PlaybackHandle<T: Ticker = IntervalTicker> {
	slot: Rc<RefCell<Option<PlaybackController<T>>>>,
}

impl<T: Ticker> Clone for PlaybackHandle<T> {
	fn clone(&self) -> Self {
		Self {
			slot: self.slot.clone(),
		}
	}
}

impl<T: Ticker> Default for PlaybackHandle<T> {
	fn default() -> Self {
		Self {
			slot: Rc::new(RefCell::new(None)),
		}
	}
}

impl<T: Ticker> PlaybackHandle<T> {
	/// Empty handle; the canvas component installs the controller.
	pub fn new() -> Self {
		Self::default()
	}

	/// Install a controller, dropping (and so disarming) any previous one.
	pub fn install(&self, controller: PlaybackController<T>) {
		match self.slot.try_borrow_mut() {
			Ok(mut slot) => *slot = Some(controller),
			Err(_) => warn!("traversal-replay: controller busy, install skipped"),
		}
	}

	/// Whether a controller is installed. A busy slot counts as installed.
	pub fn is_installed(&self) -> bool {
		self.slot.try_borrow().map(|s| s.is_some()).unwrap_or(true)
	}

	/// Run `f` against the installed controller.
	///
	/// Returns `None` when nothing is installed or the controller is in use.
	pub fn with<R>(&self, f: impl FnOnce(&mut PlaybackController<T>) -> R) -> Option<R> {
		let Ok(mut slot) = self.slot.try_borrow_mut() else {
			warn!("traversal-replay: controller busy, call dropped");
			return None;
		};
		slot.as_mut().map(f)
	}

	/// Read-only access, for rendering.
	pub fn inspect<R>(&self, f: impl FnOnce(&PlaybackController<T>) -> R) -> Option<R> {
		let slot = self.slot.try_borrow().ok()?;
		slot.as_ref().map(f)
	}

	/// Start playback, or replay from step 0 once complete.
	pub fn start(&self) {
		self.with(|c| c.play());
	}

	/// See [`PlaybackControls::toggle_pause`].
	pub fn toggle_pause(&self) {
		self.with(|c| c.toggle_pause());
	}

	/// See [`PlaybackControls::reset_visualization`].
	pub fn reset_visualization(&self) {
		self.with(|c| c.reset_visualization());
	}

	/// Validate and store a new tick interval for the next start or resume.
	pub fn set_interval(&self, ms: i64) -> Result<(), ConfigError> {
		let interval = Interval::from_millis(ms)?;
		self.with(|c| c.set_interval(interval));
		Ok(())
	}

	/// Position of the installed controller, if any.
	pub fn state(&self) -> Option<PlaybackState> {
		self.inspect(|c| c.state())
	}

	/// Drop the controller, releasing its timer.
	pub fn teardown(&self) {
		let taken = match self.slot.try_borrow_mut() {
			Ok(mut slot) => slot.take(),
			Err(_) => {
				warn!("traversal-replay: controller busy, teardown skipped");
				None
			}
		};
		drop(taken);
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::components::traversal_graph::scale::Viewport;
	use crate::components::traversal_graph::ticker::ManualTicker;
	use crate::components::traversal_graph::types::RunData;

	fn handle() -> PlaybackHandle<ManualTicker> {
		let run: RunData = serde_json::from_value(json!({
			"graph": {
				"nodes": [
					{ "index": 0, "x": 0.0, "y": 0.0, "label": "A" },
					{ "index": 1, "x": 100.0, "y": 0.0, "label": "B" }
				],
				"links": [{ "source": 0, "target": 1, "distance": 1.0 }]
			},
			"search": { "paths": [["A", "B"], ["B", "A"]], "algorithm": "dfs" },
			"config": { "interval_ms": 50, "start": "A", "goal": "B" }
		}))
		.unwrap();
		let handle = PlaybackHandle::new();
		handle.install(PlaybackController::new(
			run,
			Viewport::new(800, 600),
			ManualTicker::default(),
		));
		handle
	}

	fn phase(h: &PlaybackHandle<ManualTicker>) -> Phase {
		h.state().unwrap().phase
	}

	#[test]
	fn toggle_walks_running_and_paused() {
		let h = handle();
		h.with(|c| c.start());
		h.toggle_pause();
		assert_eq!(phase(&h), Phase::Paused);
		h.toggle_pause();
		assert_eq!(phase(&h), Phase::Running);
	}

	#[test]
	fn toggle_is_a_noop_when_idle_or_complete() {
		let h = handle();
		h.toggle_pause();
		assert_eq!(phase(&h), Phase::Idle);
		h.with(|c| {
			c.start();
			c.tick();
			c.tick();
		});
		h.toggle_pause();
		assert_eq!(phase(&h), Phase::Complete);
		assert!(!h.inspect(|c| c.ticker().is_armed()).unwrap());
	}

	#[test]
	fn reset_works_from_every_phase() {
		let h = handle();
		h.reset_visualization();
		assert_eq!(h.state(), Some(PlaybackState::default()));
		h.with(|c| {
			c.start();
			c.tick();
		});
		h.toggle_pause();
		h.reset_visualization();
		assert_eq!(h.state(), Some(PlaybackState::default()));
		assert!(!h.inspect(|c| c.ticker().is_armed()).unwrap());
	}

	#[test]
	fn start_after_reset_runs_again() {
		let h = handle();
		h.start();
		assert_eq!(phase(&h), Phase::Running);
		h.with(|c| c.tick());
		h.reset_visualization();
		assert_eq!(phase(&h), Phase::Idle);
		h.start();
		assert_eq!(phase(&h), Phase::Running);
		assert!(h.inspect(|c| c.ticker().is_armed()).unwrap());
	}

	#[test]
	fn start_replays_a_finished_run_and_ignores_a_live_one() {
		let h = handle();
		h.start();
		h.toggle_pause();
		h.start();
		assert_eq!(phase(&h), Phase::Paused);
		h.toggle_pause();
		h.with(|c| {
			c.tick();
			c.tick();
		});
		assert_eq!(phase(&h), Phase::Complete);
		h.start();
		assert_eq!(
			h.state(),
			Some(PlaybackState {
				step_index: 0,
				phase: Phase::Running
			})
		);
	}

	#[test]
	fn calls_without_a_controller_do_nothing() {
		let h: PlaybackHandle<ManualTicker> = PlaybackHandle::new();
		assert!(!h.is_installed());
		h.start();
		h.toggle_pause();
		h.reset_visualization();
		assert_eq!(h.state(), None);
		assert_eq!(h.set_interval(10), Ok(()));
	}

	#[test]
	fn reentrant_calls_are_dropped_not_panicking() {
		let h = handle();
		let inner = h.clone();
		let nested = h.with(|_| {
			inner.toggle_pause();
			inner.reset_visualization();
			inner.state()
		});
		assert_eq!(nested, Some(None));
	}

	#[test]
	fn set_interval_rejects_non_positive_values() {
		let h = handle();
		assert_eq!(h.set_interval(0), Err(ConfigError::NonPositiveInterval(0)));
		assert_eq!(h.set_interval(-20), Err(ConfigError::NonPositiveInterval(-20)));
		assert_eq!(h.inspect(|c| c.interval().as_millis()), Some(50));
		assert_eq!(h.set_interval(75), Ok(()));
		assert_eq!(h.inspect(|c| c.interval().as_millis()), Some(75));
	}

	#[test]
	fn teardown_releases_the_controller() {
		let h = handle();
		h.with(|c| c.start());
		h.teardown();
		assert!(!h.is_installed());
		assert_eq!(h.state(), None);
	}
}
