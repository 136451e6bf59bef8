//! Canvas rendering for the knowledge graph.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Dimmed edges, then emphasized edges (world space)
//! 3. Dimmed nodes, then normal nodes, then the selection and its neighbors
//! 4. Labels on top

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::graph::{RenderEdge, RenderNode, VisualState};

use super::scale::ScaledValues;
use super::state::CanvasState;
use super::theme::{LineStyle, NodeShape, Theme};

/// Renders the complete frame to the canvas.
pub fn render(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let scale = ScaledValues::new(&state.scale, state.transform.k);

	draw_background(state, ctx, &state.theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, &scale);
	draw_nodes(state, ctx, &scale);
	draw_labels(state, ctx, &scale);

	ctx.restore();
}

fn draw_background(state: &CanvasState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let gradient = theme
		.background
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(
				state.width / 2.0,
				state.height / 2.0,
				0.0,
				state.width / 2.0,
				state.height / 2.0,
				state.width.max(state.height) * 0.8,
			)
			.ok()
		})
		.flatten();

	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &theme.background.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.background.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&theme.background.color.to_css()),
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_edges(state: &CanvasState, ctx: &CanvasRenderingContext2d, scale: &ScaledValues) {
	let emphasized = |edge: &RenderEdge| edge.state == VisualState::Highlighted;

	for pass_emphasized in [false, true] {
		for edge in &state.frame.edges {
			if !edge.visible || edge.state == VisualState::Hidden || emphasized(edge) != pass_emphasized {
				continue;
			}
			draw_edge(state, ctx, scale, edge);
		}
	}

	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_edge(state: &CanvasState, ctx: &CanvasRenderingContext2d, scale: &ScaledValues, edge: &RenderEdge) {
	let (Some(n1), Some(n2)) = (state.frame.nodes.get(edge.from), state.frame.nodes.get(edge.to)) else {
		return;
	};
	let (dx, dy) = (n2.x - n1.x, n2.y - n1.y);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}

	let theme = &state.theme;
	let style = theme.edge(edge.edge_type);
	let alpha = theme.edge_alpha(edge.state);
	ctx.set_stroke_style_str(&style.color.with_alpha(alpha).to_css());
	ctx.set_line_width(style.width * scale.edge_unit);

	let pattern = match style.line {
		LineStyle::Solid => None,
		LineStyle::Dashed => Some(scale.dash_pattern),
		LineStyle::Dotted => Some(scale.dot_pattern),
	};
	let dash = match pattern {
		Some((on, off)) => js_sys::Array::of2(&JsValue::from_f64(on), &JsValue::from_f64(off)),
		None => js_sys::Array::new(),
	};
	let _ = ctx.set_line_dash(&dash);

	let (ux, uy) = (dx / dist, dy / dist);
	let r1 = state.node_radius(edge.from, scale);
	let r2 = state.node_radius(edge.to, scale);

	ctx.begin_path();
	ctx.move_to(n1.x + ux * r1, n1.y + uy * r1);
	ctx.line_to(n2.x - ux * r2, n2.y - uy * r2);
	ctx.stroke();

	if style.tee_head {
		let _ = ctx.set_line_dash(&js_sys::Array::new());
		let (tip_x, tip_y) = (n2.x - ux * (r2 + scale.arrow_size * 0.5), n2.y - uy * (r2 + scale.arrow_size * 0.5));
		let (px, py) = (-uy * scale.arrow_size * 0.6, ux * scale.arrow_size * 0.6);
		ctx.begin_path();
		ctx.move_to(tip_x + px, tip_y + py);
		ctx.line_to(tip_x - px, tip_y - py);
		ctx.stroke();
	}
}

/// Draw order bucket: dimmed first, selection last.
fn node_layer(node: &RenderNode) -> u8 {
	match node.state {
		VisualState::Faded => 0,
		VisualState::Normal => 1,
		VisualState::Neighbor => 2,
		VisualState::Highlighted => 3,
		VisualState::Hidden => u8::MAX,
	}
}

fn draw_nodes(state: &CanvasState, ctx: &CanvasRenderingContext2d, scale: &ScaledValues) {
	for layer in 0..=3 {
		for (idx, node) in state.frame.nodes.iter().enumerate() {
			if node.visible && node_layer(node) == layer {
				draw_node(state, ctx, scale, idx, node);
			}
		}
	}
}

fn draw_node(state: &CanvasState, ctx: &CanvasRenderingContext2d, scale: &ScaledValues, idx: usize, node: &RenderNode) {
	let theme = &state.theme;
	let style = theme.node(node.node_type);
	let radius = state.node_radius(idx, scale);
	let hovered = state.hovered == Some(idx);

	ctx.set_global_alpha(theme.node_alpha(node.state));

	let fill = if hovered { style.color.lighten(0.3) } else { style.color };
	match ctx.create_radial_gradient(node.x - radius * 0.3, node.y - radius * 0.3, 0.0, node.x, node.y, radius) {
		Ok(gradient) => {
			let _ = gradient.add_color_stop(0.0, &fill.lighten(0.4).to_css());
			let _ = gradient.add_color_stop(1.0, &fill.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		Err(_) => ctx.set_fill_style_str(&fill.to_css()),
	}
	trace_shape(ctx, style.shape, node.x, node.y, radius);
	ctx.fill();

	let ring = match node.state {
		VisualState::Highlighted => Some((theme.states.selected_ring, 3.0)),
		VisualState::Neighbor => Some((theme.states.neighbor_ring, 2.0)),
		_ => None,
	};
	if let Some((color, width)) = ring {
		ctx.set_stroke_style_str(&color.to_css());
		ctx.set_line_width(width / scale.k);
		trace_shape(ctx, style.shape, node.x, node.y, radius);
		ctx.stroke();
	}

	ctx.set_global_alpha(1.0);
}

/// Begin a path outlining `shape` centered at `(x, y)`.
fn trace_shape(ctx: &CanvasRenderingContext2d, shape: NodeShape, x: f64, y: f64, r: f64) {
	ctx.begin_path();
	match shape {
		NodeShape::Ellipse => {
			let _ = ctx.ellipse(x, y, r, r, 0.0, 0.0, 2.0 * PI);
		}
		NodeShape::RoundRectangle => {
			let (hw, hh, corner) = (r * 1.3, r, r * 0.4);
			ctx.move_to(x - hw + corner, y - hh);
			let _ = ctx.arc_to(x + hw, y - hh, x + hw, y + hh, corner);
			let _ = ctx.arc_to(x + hw, y + hh, x - hw, y + hh, corner);
			let _ = ctx.arc_to(x - hw, y + hh, x - hw, y - hh, corner);
			let _ = ctx.arc_to(x - hw, y - hh, x + hw, y - hh, corner);
			ctx.close_path();
		}
		NodeShape::Diamond => {
			ctx.move_to(x, y - r * 1.2);
			ctx.line_to(x + r * 1.2, y);
			ctx.line_to(x, y + r * 1.2);
			ctx.line_to(x - r * 1.2, y);
			ctx.close_path();
		}
		NodeShape::Hexagon => {
			for i in 0..6 {
				let angle = PI / 3.0 * i as f64;
				let (px, py) = (x + r * angle.cos(), y + r * angle.sin());
				if i == 0 {
					ctx.move_to(px, py);
				} else {
					ctx.line_to(px, py);
				}
			}
			ctx.close_path();
		}
	}
}

/// Whether a node's label is drawn this frame.
fn labeled(state: &CanvasState, scale: &ScaledValues, idx: usize, node: &RenderNode) -> bool {
	match node.state {
		VisualState::Hidden | VisualState::Faded => false,
		VisualState::Highlighted | VisualState::Neighbor => true,
		VisualState::Normal => {
			state.hovered == Some(idx) || scale.show_labels || state.theme.node(node.node_type).always_labeled
		}
	}
}

fn draw_labels(state: &CanvasState, ctx: &CanvasRenderingContext2d, scale: &ScaledValues) {
	let colors = &state.theme.states;
	ctx.set_font(&scale.label_font);
	ctx.set_text_align("center");
	ctx.set_line_width(3.0 / scale.k);
	ctx.set_stroke_style_str(&colors.label_outline.to_css());
	ctx.set_fill_style_str(&colors.label_color.to_css());

	for (idx, node) in state.frame.nodes.iter().enumerate() {
		if !node.visible || !labeled(state, scale, idx, node) {
			continue;
		}
		let y = node.y + state.node_radius(idx, scale) + 12.0 / scale.k;
		let _ = ctx.stroke_text(&node.label, node.x, y);
		let _ = ctx.fill_text(&node.label, node.x, y);
	}
}
