//! traversal-replay: step-by-step visualization of graph search traversals.
//!
//! This crate provides a WASM-based player that draws a precomputed graph
//! layout and replays the edges visited by a DFS, BFS or hill-climb search,
//! with pause/resume and reset.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::traversal_graph::{
	GraphData, GraphLink, GraphNode, LoadError, PathStep, PlaybackHandle, RunData, SearchResult,
	TraversalGraphCanvas,
};

/// Id of the script element carrying the run document.
const RUN_ELEMENT_ID: &str = "traversal-run";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("traversal-replay: logging initialized");
}

/// Load the run from a script element with id="traversal-run".
/// Expected format: JSON with { graph, search, config }
fn load_run_data() -> Result<RunData, LoadError> {
	let missing = || LoadError::MissingElement(RUN_ELEMENT_ID);
	let window: Window = web_sys::window().ok_or_else(missing)?;
	let document = window.document().ok_or_else(missing)?;
	let element = document.get_element_by_id(RUN_ELEMENT_ID).ok_or_else(missing)?;
	let script: HtmlScriptElement = element.dyn_into().map_err(|_| missing())?;
	let json_text = script.text().map_err(|_| missing())?;

	let run = RunData::from_json(&json_text)?;
	info!(
		"traversal-replay: loaded {} nodes, {} links, {} steps",
		run.graph.nodes.len(),
		run.graph.links.len(),
		run.search.paths.len()
	);
	Ok(run)
}

/// Main application component.
/// Loads the run from the DOM and replays it with start, pause/resume and reset.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let run_data = load_run_data().unwrap_or_else(|e| {
		warn!("traversal-replay: {}", e);
		RunData::default()
	});
	let run_signal = Signal::derive(move || run_data.clone());

	let controls = PlaybackHandle::new();
	let (step_text, set_step_text) = signal(String::new());
	let (complete, set_complete) = signal(false);
	let on_step = Callback::new(move |text: String| set_step_text.set(text));
	let on_complete = Callback::new(move |_: ()| set_complete.set(true));

	let (start_controls, toggle_controls, reset_controls) =
		(controls.clone(), controls.clone(), controls.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Search Traversal Replay" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<TraversalGraphCanvas
				run=run_signal
				controls=controls
				fullscreen=true
				on_step=on_step
				on_complete=on_complete
			/>
			<div class="graph-overlay">
				<h1>"Traversal Replay"</h1>
				<p class="subtitle">{move || step_text.get()}</p>
				<p class="status">{move || if complete.get() { "Search complete" } else { "" }}</p>
				<button on:click=move |_| {
					set_complete.set(false);
					start_controls.start();
				}>"Start / Replay"</button>
				<button on:click=move |_| toggle_controls.toggle_pause()>"Pause / Resume"</button>
				<button on:click=move |_| {
					reset_controls.reset_visualization();
					set_complete.set(false);
				}>"Reset"</button>
			</div>
		</div>
	}
}
