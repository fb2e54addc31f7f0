//! Step-by-step replay of a graph search traversal.
//!
//! Renders a fixed node/edge layout on an HTML canvas and reveals the ordered
//! traversal returned by a search service one edge per tick, with:
//! - Mapping from the 900×700 logical layout space to any viewport size
//! - Start/goal/visited node coloring and active/abandoned edge styling
//! - Pause, resume and reset from the hosting view at any time
//! - Exactly one completion notification per playback
//!
//! The playback engine ([`PlaybackController`], [`derive_visuals`], [`Scene`])
//! is independent of the browser; [`TraversalGraphCanvas`] hosts it.
//!
//! # Example
//!
//! ```ignore
//! use traversal_replay::{PlaybackHandle, RunData, TraversalGraphCanvas};
//!
//! let controls = PlaybackHandle::new();
//! let run = RunData::from_json(json_text)?;
//!
//! view! {
//!     <TraversalGraphCanvas run=run controls=controls.clone() fullscreen=true />
//!     <button on:click=move |_| controls.toggle_pause()>"Pause / Resume"</button>
//! }
//! ```

mod component;
pub mod control;
pub mod error;
pub mod playback;
mod render;
pub mod scale;
pub mod scene;
pub mod theme;
pub mod ticker;
pub mod types;
pub mod visuals;

pub use component::TraversalGraphCanvas;
pub use control::{PlaybackControls, PlaybackHandle};
pub use error::{ConfigError, LoadError};
pub use playback::{Phase, PlaybackController, PlaybackState};
pub use scene::Scene;
pub use theme::Theme;
pub use types::{
	Algorithm, GraphData, GraphLink, GraphNode, Interval, PathStep, PlaybackConfig, RunData,
	SearchResult,
};
pub use visuals::derive_visuals;
