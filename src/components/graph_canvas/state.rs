//! Canvas view state: the latest frame, pan/zoom transform and pointer tracking.
//!
//! Nothing here touches the DOM, so the geometry is testable natively.

use crate::graph::{Point, RenderFrame, SurfaceEvent};

use super::scale::{ScaleConfig, ScaledValues};
use super::theme::Theme;

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self { x: 0.0, y: 0.0, k: 1.0 }
	}
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
	/// Largest pointer travel since the press, in screen pixels.
	pub travel: f64,
}

/// View work queued by the host, performed on the next animation frame.
#[derive(Clone, Debug, Default, PartialEq)]
enum PendingView {
	#[default]
	None,
	Fit,
	Center(Point),
}

/// Everything the animation loop needs to draw a frame.
pub struct CanvasState {
	pub frame: RenderFrame,
	pub transform: ViewTransform,
	pub pan: PanState,
	/// Node under the pointer, as an index into `frame.nodes`.
	pub hovered: Option<usize>,
	pub width: f64,
	pub height: f64,
	pub scale: ScaleConfig,
	pub theme: Theme,
	pending: PendingView,
}

impl CanvasState {
	pub fn new(frame: RenderFrame, width: f64, height: f64) -> Self {
		Self {
			frame,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			pan: PanState::default(),
			hovered: None,
			width,
			height,
			scale: ScaleConfig::default(),
			theme: Theme::default(),
			pending: PendingView::Fit,
		}
	}

	/// Replace the drawn frame. The first non-empty frame is fitted.
	pub fn set_frame(&mut self, frame: RenderFrame) {
		if self.hovered.is_some_and(|idx| idx >= frame.nodes.len()) {
			self.hovered = None;
		}
		if self.frame.nodes.is_empty() && !frame.nodes.is_empty() {
			self.pending = PendingView::Fit;
		}
		self.frame = frame;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Fit the visible graph on the next frame.
	pub fn request_fit(&mut self) {
		self.pending = PendingView::Fit;
	}

	/// Center on `point` at focus zoom on the next frame.
	pub fn request_center(&mut self, point: Point) {
		self.pending = PendingView::Center(point);
	}

	/// Perform queued view work. Returns whether anything changed.
	pub fn apply_pending(&mut self) -> bool {
		match std::mem::take(&mut self.pending) {
			PendingView::None => false,
			PendingView::Fit => {
				self.fit();
				true
			}
			PendingView::Center(point) => {
				self.center_on(point, self.scale.zoom.focus_k);
				true
			}
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// World-space radius of a node, from its type and degree weight.
	pub fn node_radius(&self, idx: usize, scaled: &ScaledValues) -> f64 {
		let Some(node) = self.frame.nodes.get(idx) else {
			return 0.0;
		};
		let style = self.theme.node(node.node_type);
		scaled.node_radius * (style.size + style.degree_growth * node.weight)
	}

	/// Topmost visible node under a screen position.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scaled = ScaledValues::new(&self.scale, self.transform.k);
		self.frame
			.nodes
			.iter()
			.enumerate()
			.rev()
			.filter(|(_, node)| node.visible)
			.find(|(idx, node)| {
				let (dx, dy) = (node.x - gx, node.y - gy);
				let reach = self.node_radius(*idx, &scaled) + scaled.hit_slop;
				dx * dx + dy * dy <= reach * reach
			})
			.map(|(idx, _)| idx)
	}

	/// Begin a press at a screen position.
	pub fn press(&mut self, sx: f64, sy: f64) {
		self.pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
			travel: 0.0,
		};
	}

	/// Pointer moved. Pans while pressed, otherwise tracks hover.
	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if self.pan.active {
			let (dx, dy) = (sx - self.pan.start_x, sy - self.pan.start_y);
			self.pan.travel = self.pan.travel.max((dx * dx + dy * dy).sqrt());
			self.transform.x = self.pan.transform_start_x + dx;
			self.transform.y = self.pan.transform_start_y + dy;
		} else {
			self.hovered = self.node_at_position(sx, sy);
		}
	}

	/// End a press. A press that barely moved is a tap and yields an event.
	pub fn release(&mut self, sx: f64, sy: f64) -> Option<SurfaceEvent> {
		if !self.pan.active {
			return None;
		}
		self.pan.active = false;
		if self.pan.travel > self.scale.zoom.tap_slop {
			return None;
		}
		Some(match self.node_at_position(sx, sy) {
			Some(idx) => SurfaceEvent::NodeTapped(self.frame.nodes[idx].id.clone()),
			None => SurfaceEvent::BackgroundTapped,
		})
	}

	/// CSS cursor for the current pointer state.
	pub fn cursor(&self) -> &'static str {
		if self.pan.active {
			"grabbing"
		} else if self.hovered.is_some() {
			"pointer"
		} else {
			"grab"
		}
	}

	/// Pointer left the canvas.
	pub fn leave(&mut self) {
		self.pan.active = false;
		self.hovered = None;
	}

	/// Multiply zoom by `factor`, keeping the screen point `(sx, sy)` fixed.
	pub fn zoom_at(&mut self, factor: f64, sx: f64, sy: f64) {
		let zoom = &self.scale.zoom;
		let new_k = (self.transform.k * factor).clamp(zoom.min_k, zoom.max_k);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Zoom around the canvas center.
	pub fn zoom_centered(&mut self, factor: f64) {
		self.zoom_at(factor, self.width / 2.0, self.height / 2.0);
	}

	/// Put `point` at the canvas center at zoom `k`.
	pub fn center_on(&mut self, point: Point, k: f64) {
		let zoom = &self.scale.zoom;
		let k = k.clamp(zoom.min_k, zoom.max_k);
		self.transform = ViewTransform {
			x: self.width / 2.0 - point.x * k,
			y: self.height / 2.0 - point.y * k,
			k,
		};
	}

	/// Zoom and pan so every visible node fits with padding.
	pub fn fit(&mut self) {
		let mut bounds: Option<(f64, f64, f64, f64)> = None;
		for node in self.frame.nodes.iter().filter(|n| n.visible) {
			bounds = Some(match bounds {
				None => (node.x, node.y, node.x, node.y),
				Some((x0, y0, x1, y1)) => (x0.min(node.x), y0.min(node.y), x1.max(node.x), y1.max(node.y)),
			});
		}
		let Some((x0, y0, x1, y1)) = bounds else {
			return;
		};
		let padding = self.scale.zoom.fit_padding;
		let (avail_w, avail_h) = ((self.width - 2.0 * padding).max(1.0), (self.height - 2.0 * padding).max(1.0));
		let (span_w, span_h) = ((x1 - x0).max(1.0), (y1 - y0).max(1.0));
		let k = (avail_w / span_w).min(avail_h / span_h).min(self.scale.zoom.focus_k);
		self.center_on(Point::new((x0 + x1) / 2.0, (y0 + y1) / 2.0), k);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{NodeType, RenderNode, VisualState};

	fn node(id: &str, x: f64, y: f64, visible: bool) -> RenderNode {
		RenderNode {
			id: id.into(),
			node_type: NodeType::Drug,
			label: id.into(),
			x,
			y,
			weight: 0.0,
			visible,
			state: VisualState::Normal,
		}
	}

	fn canvas() -> CanvasState {
		let frame = RenderFrame {
			nodes: vec![
				node("a", 0.0, 0.0, true),
				node("b", 200.0, 100.0, true),
				node("hidden", 5000.0, 5000.0, false),
			],
			edges: Vec::new(),
		};
		let mut state = CanvasState::new(frame, 800.0, 600.0);
		state.apply_pending();
		state
	}

	#[test]
	fn fit_ignores_hidden_nodes_and_centers_bounds() {
		let state = canvas();
		let (cx, cy) = state.screen_to_graph(400.0, 300.0);
		assert!((cx - 100.0).abs() < 1e-6);
		assert!((cy - 50.0).abs() < 1e-6);
		assert!(state.transform.k <= state.scale.zoom.focus_k);
	}

	#[test]
	fn short_press_is_a_tap() {
		let mut state = canvas();
		state.center_on(Point::new(0.0, 0.0), 1.0);
		state.press(400.0, 300.0);
		assert_eq!(state.release(401.0, 300.0), Some(SurfaceEvent::NodeTapped("a".into())));

		state.press(10.0, 10.0);
		assert_eq!(state.release(10.0, 10.0), Some(SurfaceEvent::BackgroundTapped));
	}

	#[test]
	fn drag_pans_without_tapping() {
		let mut state = canvas();
		let before = state.transform.clone();
		state.press(100.0, 100.0);
		state.pointer_move(150.0, 130.0);
		assert_eq!(state.release(150.0, 130.0), None);
		assert!((state.transform.x - before.x - 50.0).abs() < 1e-9);
		assert!((state.transform.y - before.y - 30.0).abs() < 1e-9);
	}

	#[test]
	fn cursor_follows_hover_and_press() {
		let mut state = canvas();
		state.center_on(Point::new(0.0, 0.0), 1.0);
		state.pointer_move(10.0, 10.0);
		assert_eq!(state.cursor(), "grab");
		state.pointer_move(400.0, 300.0);
		assert_eq!(state.cursor(), "pointer");
		state.press(400.0, 300.0);
		assert_eq!(state.cursor(), "grabbing");
		state.leave();
		assert_eq!(state.cursor(), "grab");
	}

	#[test]
	fn hidden_nodes_are_not_hit() {
		let mut state = canvas();
		state.center_on(Point::new(5000.0, 5000.0), 1.0);
		assert_eq!(state.node_at_position(400.0, 300.0), None);
	}

	#[test]
	fn zoom_keeps_cursor_point_fixed() {
		let mut state = canvas();
		let anchor = state.screen_to_graph(250.0, 120.0);
		state.zoom_at(1.3, 250.0, 120.0);
		let after = state.screen_to_graph(250.0, 120.0);
		assert!((anchor.0 - after.0).abs() < 1e-9);
		assert!((anchor.1 - after.1).abs() < 1e-9);
	}

	#[test]
	fn first_content_is_fitted() {
		let mut state = CanvasState::new(RenderFrame::default(), 800.0, 600.0);
		state.apply_pending();
		state.set_frame(canvas().frame);
		assert!(state.apply_pending());
		let (cx, cy) = state.screen_to_graph(400.0, 300.0);
		assert!((cx - 100.0).abs() < 1e-6 && (cy - 50.0).abs() < 1e-6);
	}

	#[test]
	fn centering_queues_until_next_frame() {
		let mut state = canvas();
		state.request_center(Point::new(200.0, 100.0));
		assert!(state.apply_pending());
		assert!(!state.apply_pending());
		assert_eq!(state.transform.k, state.scale.zoom.focus_k);
		let (cx, cy) = state.screen_to_graph(400.0, 300.0);
		assert!((cx - 200.0).abs() < 1e-9 && (cy - 100.0).abs() < 1e-9);
	}
}
