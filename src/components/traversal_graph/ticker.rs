//! Timer resource that delivers playback ticks.
//!
//! The controller only arms and disarms; whoever owns the callback turns a
//! timer firing into a call to `PlaybackController::tick`.

use log::warn;

use super::types::Interval;

/// A repeating timer with at most one pending schedule.
pub trait Ticker {
	/// Start firing every `interval`. Replaces any schedule already armed.
	fn arm(&mut self, interval: Interval);
	/// Stop firing. After this returns no further tick is delivered.
	fn disarm(&mut self);
	fn is_armed(&self) -> bool;
}

/// Browser `setInterval` timer invoking a fixed JS callback.
pub struct IntervalTicker {
	callback: js_sys::Function,
	handle: Option<i32>,
}

impl IntervalTicker {
	/// Ticker firing `callback` on every interval.
	pub fn new(callback: js_sys::Function) -> Self {
		Self {
			callback,
			handle: None,
		}
	}
}

impl Ticker for IntervalTicker {
	fn arm(&mut self, interval: Interval) {
		self.disarm();
		let Some(window) = web_sys::window() else {
			warn!("traversal-replay: no window, cannot schedule ticks");
			return;
		};
		match window.set_interval_with_callback_and_timeout_and_arguments_0(
			&self.callback,
			interval.as_millis() as i32,
		) {
			Ok(handle) => self.handle = Some(handle),
			Err(e) => warn!("traversal-replay: setInterval failed: {:?}", e),
		}
	}

	fn disarm(&mut self) {
		if let Some(handle) = self.handle.take() {
			if let Some(window) = web_sys::window() {
				window.clear_interval_with_handle(handle);
			}
		}
	}

	fn is_armed(&self) -> bool {
		self.handle.is_some()
	}
}

impl Drop for IntervalTicker {
	fn drop(&mut self) {
		self.disarm();
	}
}

/// Ticker for tests: records schedules, fires only when the test calls `tick`.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ManualTicker {
	/// Interval of the armed schedule, if any.
	pub armed: Option<Interval>,
	/// Number of `arm` calls so far.
	pub arm_count: usize,
}

#[cfg(test)]
impl Ticker for ManualTicker {
	fn arm(&mut self, interval: Interval) {
		self.armed = Some(interval);
		self.arm_count += 1;
	}

	fn disarm(&mut self) {
		self.armed = None;
	}

	fn is_armed(&self) -> bool {
		self.armed.is_some()
	}
}
