//! What the rendering surface consumes and what it reports back.

use super::selection::VisualState;
use super::types::{EdgeType, NodeType};

/// One node as the surface should draw it.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderNode {
	/// Node id.
	pub id: String,
	/// Node type, for shape and color.
	pub node_type: NodeType,
	/// Display name.
	pub label: String,
	/// Graph-space x.
	pub x: f64,
	/// Graph-space y.
	pub y: f64,
	/// Relative importance by degree, in `0.0..=1.0`.
	pub weight: f64,
	/// Whether the node passes the current filter.
	pub visible: bool,
	/// Selection state.
	pub state: VisualState,
}

/// One edge as the surface should draw it.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderEdge {
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Index of the source in [`RenderFrame::nodes`].
	pub from: usize,
	/// Index of the target in [`RenderFrame::nodes`].
	pub to: usize,
	/// Edge type, for color and dash style.
	pub edge_type: EdgeType,
	/// Whether the edge passes the current filter.
	pub visible: bool,
	/// Selection state.
	pub state: VisualState,
}

/// Full snapshot handed to the surface after every change.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderFrame {
	/// Every node, in store order.
	pub nodes: Vec<RenderNode>,
	/// Every edge, in store order.
	pub edges: Vec<RenderEdge>,
}

/// Input reported by the surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceEvent {
	/// A node was tapped.
	NodeTapped(String),
	/// Empty canvas was tapped.
	BackgroundTapped,
}
