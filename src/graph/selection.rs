//! Per-element visual state derived from visibility and the current selection.

use super::filter::Visibility;
use super::store::GraphStore;
use super::types::{EdgeIdx, NodeIdx};

/// How a node or edge should be drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VisualState {
	/// Nothing selected.
	#[default]
	Normal,
	/// The selected node or one of its edges.
	Highlighted,
	/// Adjacent to the selected node.
	Neighbor,
	/// Visible but unrelated to the selection.
	Faded,
	/// Filtered out.
	Hidden,
}

/// Visual state of every node and edge, rebuilt from scratch on each change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisualStates {
	nodes: Vec<VisualState>,
	edges: Vec<VisualState>,
}

impl VisualStates {
	/// States for the given visibility and optional selected node.
	///
	/// A selected node that is itself hidden still highlights; its hidden
	/// neighbors and edges stay hidden.
	pub fn compute(store: &GraphStore, visibility: &Visibility, selected: Option<NodeIdx>) -> Self {
		let base = if selected.is_some() {
			VisualState::Faded
		} else {
			VisualState::Normal
		};
		let mut nodes: Vec<VisualState> = store
			.nodes()
			.map(|(idx, _)| if visibility.node(idx) { base } else { VisualState::Hidden })
			.collect();
		let mut edges: Vec<VisualState> = store
			.edges()
			.map(|(idx, _)| if visibility.edge(idx) { base } else { VisualState::Hidden })
			.collect();

		if let Some(sel) = selected {
			for &e in store.incident(sel) {
				if edges[e.0] != VisualState::Hidden {
					edges[e.0] = VisualState::Highlighted;
				}
			}
			for n in store.neighbor_indices(sel) {
				if nodes[n.0] != VisualState::Hidden {
					nodes[n.0] = VisualState::Neighbor;
				}
			}
			nodes[sel.0] = VisualState::Highlighted;
		}

		Self { nodes, edges }
	}

	/// State of a node.
	pub fn node(&self, idx: NodeIdx) -> VisualState {
		self.nodes.get(idx.0).copied().unwrap_or_default()
	}

	/// State of an edge.
	pub fn edge(&self, idx: EdgeIdx) -> VisualState {
		self.edges.get(idx.0).copied().unwrap_or_default()
	}
}
