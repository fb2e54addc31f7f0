//! Leptos component hosting the traversal player on a canvas.
//!
//! The component creates the canvas, installs a [`PlaybackController`] into the
//! caller's [`PlaybackHandle`], and wires three browser callbacks to it: a
//! `setInterval` tick, a `requestAnimationFrame` redraw loop and (fullscreen
//! only) a window resize listener. A change of the `run` signal loads the new
//! run into the existing controller, which releases the old timer first.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::control::PlaybackHandle;
use super::playback::PlaybackController;
use super::render;
use super::scale::Viewport;
use super::ticker::IntervalTicker;
use super::types::RunData;

type JsCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Drops the installed controller, and with it the interval timer, once the
/// tick callback holding this guard is released by the component.
struct TeardownOnDrop(PlaybackHandle);

impl Drop for TeardownOnDrop {
	fn drop(&mut self) {
		self.0.teardown();
	}
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	let w = window.inner_width().ok()?.as_f64()?;
	let h = window.inner_height().ok()?.as_f64()?;
	Some((w, h))
}

/// Size of the drawing surface: the window when fullscreen, otherwise explicit
/// dimensions falling back to the parent container.
fn resolve_size(
	fullscreen: bool,
	window: Option<(f64, f64)>,
	explicit: (Option<f64>, Option<f64>),
	parent: Option<(f64, f64)>,
) -> Viewport {
	const FALLBACK: (f64, f64) = (800.0, 600.0);
	let (w, h) = if fullscreen {
		window.unwrap_or(FALLBACK)
	} else {
		let (pw, ph) = parent.unwrap_or(FALLBACK);
		(explicit.0.unwrap_or(pw), explicit.1.unwrap_or(ph))
	};
	Viewport::from_f64(w, h)
}

fn measure(
	canvas: &HtmlCanvasElement,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> Viewport {
	let window = web_sys::window().as_ref().and_then(window_size);
	let parent = canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64));
	resolve_size(fullscreen, window, (width, height), parent)
}

/// Replays a search traversal on a canvas element.
///
/// Pass the run via the reactive `run` signal and keep `controls` to pause,
/// resume or reset from the surrounding view. The canvas sizes itself to its
/// parent container by default; `fullscreen = true` fills the window and
/// follows its resizes. Explicit `width`/`height` override automatic sizing.
#[component]
pub fn TraversalGraphCanvas(
	#[prop(into)] run: Signal<RunData>,
	controls: PlaybackHandle,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	/// Start playback as soon as a run is loaded.
	#[prop(default = true)]
	autoplay: bool,
	/// Receives the step text after every tick, and an empty string on reset.
	#[prop(optional)]
	on_step: Option<Callback<String>>,
	/// Invoked once when the last step has been shown.
	#[prop(optional)]
	on_complete: Option<Callback<()>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let tick_cb: JsCallback = Rc::new(RefCell::new(None));
	let animate: JsCallback = Rc::new(RefCell::new(None));
	let resize_cb: JsCallback = Rc::new(RefCell::new(None));
	let controls_init = controls.clone();

	Effect::new(move |_| {
		let run_data = run.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};

		if controls_init.is_installed() {
			controls_init.with(|c| {
				c.load(run_data);
				if autoplay {
					c.start();
				}
			});
			return;
		}

		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("traversal-replay: no window, player not mounted");
			return;
		};

		let viewport = measure(&canvas, fullscreen, width, height);
		canvas.set_width(viewport.width);
		canvas.set_height(viewport.height);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					warn!("traversal-replay: 2d context has an unexpected type");
					return;
				}
			},
			_ => {
				warn!("traversal-replay: canvas has no 2d context");
				return;
			}
		};

		let guard = TeardownOnDrop(controls_init.clone());
		let tick = Closure::<dyn FnMut()>::new(move || {
			guard.0.with(|c| c.tick());
		});
		let ticker = IntervalTicker::new(tick.as_ref().unchecked_ref::<js_sys::Function>().clone());
		*tick_cb.borrow_mut() = Some(tick);

		let mut controller = PlaybackController::new(run_data, viewport, ticker);
		controller.on_progress(move |text| {
			if let Some(cb) = on_step {
				cb.run(text.unwrap_or_default().to_owned());
			}
		});
		controller.on_complete(move || {
			if let Some(cb) = on_complete {
				cb.run(());
			}
		});
		info!(
			"traversal-replay: player mounted at {}x{} with {} steps",
			viewport.width,
			viewport.height,
			controller.total_steps()
		);
		if autoplay {
			controller.start();
		}
		controls_init.install(controller);

		// Parent-sized canvases are re-measured on window resizes as well.
		if fullscreen || width.is_none() || height.is_none() {
			let (controls_resize, canvas_resize) = (controls_init.clone(), canvas.clone());
			*resize_cb.borrow_mut() = Some(Closure::new(move || {
				let viewport = measure(&canvas_resize, fullscreen, width, height);
				canvas_resize.set_width(viewport.width);
				canvas_resize.set_height(viewport.height);
				controls_resize.with(|c| c.resize(viewport));
			}));
			if let Some(ref cb) = *resize_cb.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (controls_anim, animate_inner) = (controls_init.clone(), animate.clone());
		*animate.borrow_mut() = Some(Closure::new(move || {
			controls_anim.inspect(|c| {
				let viewport = c.viewport();
				render::render(
					c.scene(),
					&ctx,
					c.theme(),
					viewport.width as f64,
					viewport.height as f64,
				);
			});
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(window) = web_sys::window() {
					let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="traversal-graph-canvas"
			style="display: block;"
		/>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fullscreen_follows_the_window() {
		let v = resolve_size(true, Some((1280.0, 720.0)), (Some(10.0), None), Some((5.0, 5.0)));
		assert_eq!(v, Viewport::new(1280, 720));
	}

	#[test]
	fn parent_sized_canvas_tracks_its_container() {
		let before = resolve_size(false, None, (None, None), Some((640.0, 480.0)));
		let after = resolve_size(false, None, (None, None), Some((1024.0, 300.0)));
		assert_eq!(before, Viewport::new(640, 480));
		assert_eq!(after, Viewport::new(1024, 300));
	}

	#[test]
	fn explicit_dimensions_override_the_container() {
		let v = resolve_size(false, None, (Some(300.0), None), Some((640.0, 480.0)));
		assert_eq!(v, Viewport::new(300, 480));
		let v = resolve_size(false, None, (None, None), None);
		assert_eq!(v, Viewport::new(800, 600));
	}
}
