//! Visual theming for the traversal player.
//!
//! Colors for each node and edge role, plus the canvas background.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red.
	pub r: u8,
	/// Green.
	pub g: u8,
	/// Blue.
	pub b: u8,
	/// Alpha in `0.0..=1.0`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	/// CSS `rgba(...)` string.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Fill colors for the node roles.
#[derive(Clone, Debug)]
pub struct NodeColors {
	/// Not yet reached by the traversal.
	pub neutral: Color,
	/// Start node (highlight A).
	pub start: Color,
	/// Goal node (highlight B).
	pub goal: Color,
	/// Target of an already revealed step.
	pub visited: Color,
	/// Label drawn on top of the circle.
	pub label: Color,
}

/// Stroke colors for the edge roles.
#[derive(Clone, Debug)]
pub struct EdgeColors {
	/// Default stroke color.
	pub neutral: Color,
	/// Revealed by the traversal and not abandoned.
	pub active: Color,
	/// Distance label at the midpoint.
	pub label: Color,
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Display name.
	pub name: &'static str,
	/// Canvas background.
	pub background: BackgroundStyle,
	/// Node fills per role.
	pub node: NodeColors,
	/// Edge strokes per role.
	pub edge: EdgeColors,
	/// Shade node circles with a radial gradient instead of a flat fill.
	pub node_gradient: bool,
}

impl Theme {
	/// Dark slate theme with green start, red goal and amber traversal.
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				color_secondary: Color::rgb(30, 35, 42),
				use_gradient: true,
			},
			node: NodeColors {
				neutral: Color::rgb(94, 129, 172),
				start: Color::rgb(46, 160, 67),
				goal: Color::rgb(218, 54, 51),
				visited: Color::rgb(210, 153, 34),
				label: Color::rgba(255, 255, 255, 0.95),
			},
			edge: EdgeColors {
				neutral: Color::rgba(140, 160, 180, 0.5),
				active: Color::rgb(240, 136, 62),
				label: Color::rgba(200, 210, 220, 0.85),
			},
			node_gradient: true,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}
