//! Mapping from the fixed logical layout space to the current viewport.
//!
//! # Coordinate Spaces
//!
//! - **Logical space**: the canonical 900×700 coordinate system in which the
//!   search service computed node positions. It never changes.
//! - **Viewport space**: pixel coordinates on the canvas. Changes whenever the
//!   host container is resized.
//!
//! [`ScaleMaps::compute`] is a pure function of the logical bounds, the viewport
//! and the [`ScaleConfig`]; it never looks at a previous scale, so recomputing
//! after any number of resizes gives the same maps as computing once.
//!
//! # Sizing Behaviors
//!
//! Element sizes (radii, fonts, stroke widths) are derived from the uniform
//! factor `k`, the smaller of the two axis factors:
//!
//! - [`ScaleBehavior::Fixed`]: constant pixel size regardless of viewport.
//! - [`ScaleBehavior::Viewport`]: grows and shrinks with `k`.
//! - [`ScaleBehavior::Clamped`]: grows with `k` inside min/max pixel bounds.

/// Width of the logical layout space.
pub const LOGICAL_WIDTH: f64 = 900.0;
/// Height of the logical layout space.
pub const LOGICAL_HEIGHT: f64 = 700.0;
/// Inset kept free on every viewport edge.
pub const DEFAULT_MARGIN: f64 = 30.0;

/// Extent of the logical layout space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogicalBounds {
	/// Layout width in logical units.
	pub width: f64,
	/// Layout height in logical units.
	pub height: f64,
}

impl Default for LogicalBounds {
	fn default() -> Self {
		Self {
			width: LOGICAL_WIDTH,
			height: LOGICAL_HEIGHT,
		}
	}
}

/// Current size of the drawing surface in pixels. Both sides are at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
	/// Width in pixels.
	pub width: u32,
	/// Height in pixels.
	pub height: u32,
}

impl Viewport {
	/// Viewport of at least 1x1 pixels.
	pub fn new(width: u32, height: u32) -> Self {
		Self {
			width: width.max(1),
			height: height.max(1),
		}
	}

	/// Build from browser-reported sizes, which arrive as floats.
	pub fn from_f64(width: f64, height: f64) -> Self {
		Self::new(width.max(0.0) as u32, height.max(0.0) as u32)
	}
}

/// Defines how an element size follows the viewport.
#[derive(Clone, Debug, PartialEq)]
pub enum ScaleBehavior {
	/// Constant pixel size.
	Fixed,
	/// Proportional to the uniform factor.
	Viewport,
	/// Proportional to the uniform factor, clamped to `[min, max]` pixels.
	Clamped { min: f64, max: f64 },
}

impl ScaleBehavior {
	/// Pixel size for a base size (in logical units) at uniform factor `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::Fixed => base,
			ScaleBehavior::Viewport => base * k,
			ScaleBehavior::Clamped { min, max } => (base * k).clamp(*min, *max),
		}
	}
}

/// How the two axes relate when the viewport aspect differs from the layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AspectMode {
	/// Each axis fills its own inset range independently.
	#[default]
	Stretch,
	/// Both axes share the smaller factor; the layout is centered.
	Preserve,
}

/// Node sizing.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Circle radius in logical units.
	pub radius: f64,
	/// How the radius follows the viewport.
	pub radius_behavior: ScaleBehavior,
	/// Node label font size in logical units.
	pub label_size: f64,
	/// How the label size follows the viewport.
	pub label_behavior: ScaleBehavior,
}

/// Edge sizing.
#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	/// Stroke width of a neutral edge.
	pub line_width: f64,
	/// Stroke width of an edge revealed by the traversal.
	pub active_line_width: f64,
	/// How both line widths follow the viewport.
	pub width_behavior: ScaleBehavior,
	/// Distance label font size in logical units.
	pub distance_label_size: f64,
	/// How the distance label size follows the viewport.
	pub distance_label_behavior: ScaleBehavior,
}

/// Complete scaling configuration.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Logical space the node coordinates live in.
	pub bounds: LogicalBounds,
	/// Inset from every viewport edge, in pixels.
	pub margin: f64,
	/// Whether the axes scale independently.
	pub aspect: AspectMode,
	/// Node sizing.
	pub node: NodeScaleConfig,
	/// Edge sizing.
	pub edge: EdgeScaleConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			bounds: LogicalBounds::default(),
			margin: DEFAULT_MARGIN,
			aspect: AspectMode::Stretch,
			node: NodeScaleConfig {
				radius: 20.0,
				radius_behavior: ScaleBehavior::Clamped {
					min: 8.0,
					max: 28.0,
				},
				label_size: 16.0,
				label_behavior: ScaleBehavior::Clamped {
					min: 10.0,
					max: 20.0,
				},
			},
			edge: EdgeScaleConfig {
				line_width: 2.0,
				active_line_width: 5.0,
				width_behavior: ScaleBehavior::Fixed,
				// Distance labels follow the same clamped rule as node labels.
				distance_label_size: 12.0,
				distance_label_behavior: ScaleBehavior::Clamped {
					min: 9.0,
					max: 16.0,
				},
			},
		}
	}
}

/// Linear map from a logical interval onto a viewport interval.
///
/// Output is clamped into the target range so positions outside the logical
/// bounds still land inside the inset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearMap {
	domain: (f64, f64),
	range: (f64, f64),
}

impl LinearMap {
	/// Map `domain` onto `range`.
	pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self { domain, range }
	}

	/// Map `value`, clamped to the range.
	pub fn apply(&self, value: f64) -> f64 {
		let (d0, d1) = self.domain;
		let (r0, r1) = self.range;
		if (d1 - d0).abs() < f64::EPSILON {
			return (r0 + r1) / 2.0;
		}
		let t = ((value - d0) / (d1 - d0)).clamp(0.0, 1.0);
		r0 + t * (r1 - r0)
	}
}

/// Pixel range `[margin, size - margin]`, collapsed to the center when the
/// viewport is too small to hold both margins.
fn inset(size: f64, margin: f64) -> (f64, f64) {
	if size <= 2.0 * margin {
		(size / 2.0, size / 2.0)
	} else {
		(margin, size - margin)
	}
}

/// The x- and y-maps for one viewport, plus the uniform sizing factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleMaps {
	/// Logical x to viewport x.
	pub x: LinearMap,
	/// Logical y to viewport y.
	pub y: LinearMap,
	/// Smaller of the two axis factors. Drives element sizes.
	pub k: f64,
}

impl ScaleMaps {
	/// Maps for `viewport` under `config`.
	pub fn compute(viewport: Viewport, config: &ScaleConfig) -> Self {
		let bounds = config.bounds;
		let (x0, x1) = inset(viewport.width as f64, config.margin);
		let (y0, y1) = inset(viewport.height as f64, config.margin);
		let fx = (x1 - x0) / bounds.width;
		let fy = (y1 - y0) / bounds.height;
		let k = fx.min(fy);

		match config.aspect {
			AspectMode::Stretch => Self {
				x: LinearMap::new((0.0, bounds.width), (x0, x1)),
				y: LinearMap::new((0.0, bounds.height), (y0, y1)),
				k,
			},
			AspectMode::Preserve => {
				let ox = x0 + ((x1 - x0) - bounds.width * k) / 2.0;
				let oy = y0 + ((y1 - y0) - bounds.height * k) / 2.0;
				Self {
					x: LinearMap::new((0.0, bounds.width), (ox, ox + bounds.width * k)),
					y: LinearMap::new((0.0, bounds.height), (oy, oy + bounds.height * k)),
					k,
				}
			}
		}
	}

	/// Logical point to viewport point.
	pub fn project(&self, x: f64, y: f64) -> (f64, f64) {
		(self.x.apply(x), self.y.apply(y))
	}
}

/// Element sizes for a specific viewport, in pixels.
///
/// Create this once per scene build and hand it to the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaledValues {
	/// Uniform factor the sizes were derived from.
	pub k: f64,
	/// Circle radius.
	pub node_radius: f64,
	/// Canvas font string for node labels (e.g. "bold 16px sans-serif").
	pub label_font: String,
	/// Stroke width of a neutral edge.
	pub edge_line_width: f64,
	/// Stroke width of an active edge.
	pub active_line_width: f64,
	/// Canvas font string for distance labels.
	pub distance_font: String,
}

impl ScaledValues {
	/// Sizes for uniform factor `k`.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let label_size = config.node.label_behavior.apply(config.node.label_size, k);
		let distance_size = config
			.edge
			.distance_label_behavior
			.apply(config.edge.distance_label_size, k);

		Self {
			k,
			node_radius: config.node.radius_behavior.apply(config.node.radius, k),
			label_font: format!("bold {}px sans-serif", label_size.round()),
			edge_line_width: config.edge.width_behavior.apply(config.edge.line_width, k),
			active_line_width: config
				.edge
				.width_behavior
				.apply(config.edge.active_line_width, k),
			distance_font: format!("{}px sans-serif", distance_size.round()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn close(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-9
	}

	#[test]
	fn maps_logical_corners_to_inset_corners() {
		let maps = ScaleMaps::compute(Viewport::new(960, 760), &ScaleConfig::default());
		assert_eq!(maps.project(0.0, 0.0), (30.0, 30.0));
		assert_eq!(maps.project(900.0, 700.0), (930.0, 730.0));
		assert!(close(maps.k, 1.0));
	}

	#[test]
	fn axes_scale_independently_when_stretched() {
		let maps = ScaleMaps::compute(Viewport::new(1860, 760), &ScaleConfig::default());
		let (x, y) = maps.project(450.0, 350.0);
		assert!(close(x, 930.0));
		assert!(close(y, 380.0));
		assert!(close(maps.k, 1.0));
	}

	#[test]
	fn preserve_centers_layout_with_one_factor() {
		let config = ScaleConfig {
			aspect: AspectMode::Preserve,
			..ScaleConfig::default()
		};
		let maps = ScaleMaps::compute(Viewport::new(1860, 760), &config);
		let (left, top) = maps.project(0.0, 0.0);
		let (right, bottom) = maps.project(900.0, 700.0);
		assert!(close(right - left, 900.0));
		assert!(close(bottom - top, 700.0));
		assert!(close(left, 480.0));
	}

	#[test]
	fn clamps_points_outside_the_layout() {
		let maps = ScaleMaps::compute(Viewport::new(960, 760), &ScaleConfig::default());
		assert_eq!(maps.project(-100.0, 5000.0), (30.0, 730.0));
	}

	#[test]
	fn recompute_does_not_depend_on_history() {
		let config = ScaleConfig::default();
		let direct = ScaleMaps::compute(Viewport::new(640, 480), &config);
		let _ = ScaleMaps::compute(Viewport::new(1920, 1080), &config);
		let again = ScaleMaps::compute(Viewport::new(640, 480), &config);
		assert_eq!(direct, again);
	}

	#[test]
	fn tiny_viewport_collapses_to_center() {
		let maps = ScaleMaps::compute(Viewport::new(40, 50), &ScaleConfig::default());
		assert_eq!(maps.project(0.0, 0.0), (20.0, 25.0));
		assert_eq!(maps.project(900.0, 700.0), (20.0, 25.0));
		assert!(close(maps.k, 0.0));
	}

	#[test]
	fn zero_sized_viewport_is_lifted_to_one_pixel() {
		assert_eq!(Viewport::from_f64(0.0, -3.0), Viewport::new(1, 1));
	}

	#[test]
	fn sizes_follow_behaviors() {
		let config = ScaleConfig::default();
		let small = ScaledValues::new(&config, 0.1);
		let large = ScaledValues::new(&config, 5.0);
		assert_eq!(small.node_radius, 8.0);
		assert_eq!(large.node_radius, 28.0);
		assert_eq!(small.edge_line_width, large.edge_line_width);
		assert_eq!(large.label_font, "bold 20px sans-serif");
		assert_eq!(small.distance_font, "9px sans-serif");
		assert_eq!(ScaleBehavior::Viewport.apply(10.0, 1.5), 15.0);
	}
}
