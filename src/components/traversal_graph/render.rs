//! Canvas rendering for the traversal player.
//!
//! Draws the current style record of every scene element. Passes, back to front:
//! 1. Background
//! 2. Edge lines, then distance labels
//! 3. Node circles, then node labels

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::scene::{EdgeElement, NodeElement, Scene};
use super::theme::Theme;

/// Renders the complete scene to the canvas.
pub fn render(
	scene: &Scene,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	width: f64,
	height: f64,
) {
	draw_background(ctx, theme, width, height);

	for edge in scene.edges() {
		draw_edge(ctx, edge);
	}
	ctx.set_font(&scene.sizes().distance_font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("bottom");
	ctx.set_fill_style_str(&theme.edge.label.to_css());
	for edge in scene.edges() {
		let (mx, my) = edge.midpoint();
		let _ = ctx.fill_text(&edge.distance_text, mx, my - 4.0);
	}

	let radius = scene.sizes().node_radius;
	for node in scene.nodes() {
		draw_node(ctx, node, theme, radius);
	}
	ctx.set_font(&scene.sizes().label_font);
	ctx.set_text_baseline("middle");
	ctx.set_fill_style_str(&theme.node.label.to_css());
	for node in scene.nodes() {
		let _ = ctx.fill_text(&node.label, node.center.0, node.center.1);
	}
}

fn draw_background(ctx: &CanvasRenderingContext2d, theme: &Theme, width: f64, height: f64) {
	let gradient = if theme.background.use_gradient {
		ctx.create_radial_gradient(
			width / 2.0,
			height / 2.0,
			0.0,
			width / 2.0,
			height / 2.0,
			width.max(height) * 0.8,
		)
		.ok()
	} else {
		None
	};

	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &theme.background.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.background.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&theme.background.color.to_css()),
	}

	ctx.fill_rect(0.0, 0.0, width, height);
}

fn draw_edge(ctx: &CanvasRenderingContext2d, edge: &EdgeElement) {
	ctx.set_stroke_style_str(&edge.style.stroke.to_css());
	ctx.set_line_width(edge.style.width);
	ctx.begin_path();
	ctx.move_to(edge.from.0, edge.from.1);
	ctx.line_to(edge.to.0, edge.to.1);
	ctx.stroke();
}

fn draw_node(ctx: &CanvasRenderingContext2d, node: &NodeElement, theme: &Theme, radius: f64) {
	let (x, y) = node.center;
	let fill = node.style.fill;

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);

	let gradient = if theme.node_gradient {
		ctx.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
			.ok()
	} else {
		None
	};
	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &fill.lighten(0.4).to_css());
			let _ = gradient.add_color_stop(0.7, &fill.to_css());
			let _ = gradient.add_color_stop(1.0, &fill.darken(0.2).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&fill.to_css()),
	}
	ctx.fill();
}
