//! Errors surfaced to the hosting view.
//!
//! Everything else the player runs into (unknown labels, dangling link
//! indices, calls in the wrong phase) is absorbed and logged.

/// Rejected playback configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
	/// Zero or negative tick interval.
	#[error("tick interval must be a positive number of milliseconds, got {0}")]
	NonPositiveInterval(i64),

	/// Interval the browser timer cannot represent.
	#[error("tick interval of {0}ms exceeds the timer maximum")]
	IntervalTooLarge(i64),
}

/// Failure to obtain a run document from the page.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
	/// The element holding the document is absent or unreadable.
	#[error("no readable element with id \"{0}\"")]
	MissingElement(&'static str),

	/// The document is not a valid run.
	#[error("malformed run document: {0}")]
	Parse(#[from] serde_json::Error),
}
