//! Visibility filtering by node/edge type with cascading and orphan hiding.

use std::collections::HashMap;

use log::debug;

use super::store::GraphStore;
use super::types::{EdgeIdx, EdgeType, NodeIdx, NodeType};

/// Type visibility flags plus orphan hiding.
///
/// Types missing from a map are visible.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterConfig {
	/// Node type → visible.
	pub nodes: HashMap<NodeType, bool>,
	/// Edge type → visible.
	pub edges: HashMap<EdgeType, bool>,
	/// Hide nodes left without any visible edge.
	pub hide_orphans: bool,
}

impl FilterConfig {
	/// Everything visible.
	pub fn show_all() -> Self {
		Self::default()
	}

	/// Whether nodes of `node_type` pass the type filter.
	pub fn node_type_visible(&self, node_type: NodeType) -> bool {
		self.nodes.get(&node_type).copied().unwrap_or(true)
	}

	/// Whether edges of `edge_type` pass the type filter.
	pub fn edge_type_visible(&self, edge_type: EdgeType) -> bool {
		self.edges.get(&edge_type).copied().unwrap_or(true)
	}

	/// Builder: set one node type flag.
	pub fn with_node(mut self, node_type: NodeType, visible: bool) -> Self {
		self.nodes.insert(node_type, visible);
		self
	}

	/// Builder: set one edge type flag.
	pub fn with_edge(mut self, edge_type: EdgeType, visible: bool) -> Self {
		self.edges.insert(edge_type, visible);
		self
	}

	/// Builder: set orphan hiding.
	pub fn with_hide_orphans(mut self, hide: bool) -> Self {
		self.hide_orphans = hide;
		self
	}

	/// Only the given node and edge types visible; every other known type hidden.
	fn only(node_types: &[NodeType], edge_types: &[EdgeType], hide_orphans: bool) -> Self {
		Self {
			nodes: NodeType::ALL
				.iter()
				.map(|t| (*t, node_types.contains(t)))
				.collect(),
			edges: EdgeType::ALL
				.iter()
				.map(|t| (*t, edge_types.contains(t)))
				.collect(),
			hide_orphans,
		}
	}
}

/// One-click filter presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuickFilter {
	/// Drugs joined by contraindication edges only.
	ContraindicationsOnly,
	/// Drugs joined by contraindication or precaution edges.
	DrugInteractions,
	/// Everything visible.
	Reset,
}

impl QuickFilter {
	/// The filter configuration for this preset.
	pub fn config(self) -> FilterConfig {
		match self {
			QuickFilter::ContraindicationsOnly => {
				FilterConfig::only(&[NodeType::Drug], &[EdgeType::Contraindication], true)
			}
			QuickFilter::DrugInteractions => FilterConfig::only(
				&[NodeType::Drug],
				&[EdgeType::Contraindication, EdgeType::Precaution],
				true,
			),
			QuickFilter::Reset => FilterConfig::show_all(),
		}
	}

	/// Button label.
	pub fn label(self) -> &'static str {
		match self {
			QuickFilter::ContraindicationsOnly => "併用禁忌のみ",
			QuickFilter::DrugInteractions => "薬同士の相互作用",
			QuickFilter::Reset => "リセット",
		}
	}
}

/// Visible/hidden partition over every node and edge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Visibility {
	nodes: Vec<bool>,
	edges: Vec<bool>,
	visible_nodes: usize,
	visible_edges: usize,
}

impl Visibility {
	/// Everything visible.
	pub fn all(store: &GraphStore) -> Self {
		Self {
			nodes: vec![true; store.node_count()],
			edges: vec![true; store.edge_count()],
			visible_nodes: store.node_count(),
			visible_edges: store.edge_count(),
		}
	}

	/// Whether a node is visible.
	pub fn node(&self, idx: NodeIdx) -> bool {
		self.nodes.get(idx.0).copied().unwrap_or(false)
	}

	/// Whether an edge is visible.
	pub fn edge(&self, idx: EdgeIdx) -> bool {
		self.edges.get(idx.0).copied().unwrap_or(false)
	}

	/// Count of visible nodes.
	pub fn visible_nodes(&self) -> usize {
		self.visible_nodes
	}

	/// Count of visible edges.
	pub fn visible_edges(&self) -> usize {
		self.visible_edges
	}
}

/// Compute visibility. Pure: the same store and config always give the same partition.
pub fn apply_filters(store: &GraphStore, config: &FilterConfig) -> Visibility {
	let mut nodes: Vec<bool> = store
		.nodes()
		.map(|(_, node)| config.node_type_visible(node.node_type()))
		.collect();

	let edges: Vec<bool> = store
		.edges()
		.map(|(_, edge)| {
			config.edge_type_visible(edge.edge_type) && nodes[edge.source.0] && nodes[edge.target.0]
		})
		.collect();

	if config.hide_orphans {
		for (idx, _) in store.nodes() {
			if nodes[idx.0] && !store.incident(idx).iter().any(|e| edges[e.0]) {
				nodes[idx.0] = false;
			}
		}
	}

	let visible_nodes = nodes.iter().filter(|v| **v).count();
	let visible_edges = edges.iter().filter(|v| **v).count();
	debug!(
		"kusuri-graph: filter applied, {} nodes / {} edges visible",
		visible_nodes, visible_edges
	);

	Visibility {
		nodes,
		edges,
		visible_nodes,
		visible_edges,
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;
	use crate::graph::store::fixtures::scenario;
	use crate::graph::types::{GraphDocument, RawEdge, RawNode};

	fn visible_ids(store: &GraphStore, vis: &Visibility) -> Vec<String> {
		store
			.nodes()
			.filter(|(idx, _)| vis.node(*idx))
			.map(|(_, n)| n.id.clone())
			.collect()
	}

	#[test]
	fn hiding_an_edge_type_keeps_its_endpoints() {
		let store = scenario();
		let config = FilterConfig::default().with_edge(EdgeType::Contraindication, false);
		let vis = apply_filters(&store, &config);
		assert_eq!(visible_ids(&store, &vis), vec!["D1", "D2", "C1", "E1"]);
		assert_eq!(vis.visible_edges(), 2);
		assert!(!vis.edge(EdgeIdx(2)));
	}

	#[test]
	fn hidden_node_types_cascade_to_edges() {
		let store = scenario();
		let config = FilterConfig::default().with_node(NodeType::Category, false);
		let vis = apply_filters(&store, &config);
		assert!(!vis.edge(EdgeIdx(0)));
		assert_eq!(vis.visible_nodes(), 3);
		assert_eq!(vis.visible_edges(), 2);
	}

	#[test]
	fn orphans_hidden_after_cascade() {
		let store = scenario();
		let config = FilterConfig::default()
			.with_edge(EdgeType::Contraindication, false)
			.with_node(NodeType::AdverseEffect, false)
			.with_hide_orphans(true);
		let vis = apply_filters(&store, &config);
		// D2 only had the contraindication edge; E1 is hidden by type.
		assert_eq!(visible_ids(&store, &vis), vec!["D1", "C1"]);
	}

	#[test]
	fn quick_filters_produce_expected_partitions() {
		let store = scenario();
		let ci = apply_filters(&store, &QuickFilter::ContraindicationsOnly.config());
		assert_eq!(visible_ids(&store, &ci), vec!["D1", "D2"]);
		assert_eq!(ci.visible_edges(), 1);

		let reset = apply_filters(&store, &QuickFilter::Reset.config());
		assert_eq!(reset, Visibility::all(&store));
	}

	#[test]
	fn filtering_is_idempotent() {
		let store = scenario();
		let config = QuickFilter::DrugInteractions.config();
		assert_eq!(apply_filters(&store, &config), apply_filters(&store, &config));
	}

	fn arb_graph() -> impl Strategy<Value = GraphStore> {
		(1usize..24)
			.prop_flat_map(|n| {
				(
					prop::collection::vec(0usize..4, n),
					prop::collection::vec((0..n, 0..n, 0usize..5), 0..48),
				)
			})
			.prop_map(|(types, links)| {
				let nodes = types
					.iter()
					.enumerate()
					.map(|(i, t)| RawNode {
						id: format!("n{i}"),
						node_type: NodeType::ALL[*t],
						name_ja: None,
						name_en: None,
						search_name: None,
						names_alt: Vec::new(),
						therapeutic_category: None,
						code: None,
						adverse_effects: Vec::new(),
						cyp_enzymes: Vec::new(),
						efficacy: None,
						atc_code: None,
						drugbank_id: None,
						formula: None,
					})
					.collect();
				let edges = links
					.into_iter()
					.map(|(s, t, ty)| RawEdge {
						source: format!("n{s}"),
						target: format!("n{t}"),
						edge_type: EdgeType::ALL[ty],
						severity: None,
						mechanism: None,
					})
					.collect();
				GraphStore::load(GraphDocument { nodes, edges }).unwrap()
			})
	}

	fn arb_config() -> impl Strategy<Value = FilterConfig> {
		(
			prop::collection::vec(any::<bool>(), 4),
			prop::collection::vec(any::<bool>(), 5),
			any::<bool>(),
		)
			.prop_map(|(n, e, hide_orphans)| FilterConfig {
				nodes: NodeType::ALL.iter().copied().zip(n).collect(),
				edges: EdgeType::ALL.iter().copied().zip(e).collect(),
				hide_orphans,
			})
	}

	proptest! {
		#[test]
		fn visible_edges_have_visible_endpoints(store in arb_graph(), config in arb_config()) {
			let vis = apply_filters(&store, &config);
			for (idx, edge) in store.edges() {
				if vis.edge(idx) {
					prop_assert!(vis.node(edge.source) && vis.node(edge.target));
					prop_assert!(config.edge_type_visible(edge.edge_type));
				}
			}
		}

		#[test]
		fn no_visible_orphans_when_hiding_them(store in arb_graph(), config in arb_config()) {
			let config = config.with_hide_orphans(true);
			let vis = apply_filters(&store, &config);
			for (idx, _) in store.nodes() {
				if vis.node(idx) {
					prop_assert!(store.incident(idx).iter().any(|e| vis.edge(*e)));
				}
			}
		}

		#[test]
		fn counts_match_partition(store in arb_graph(), config in arb_config()) {
			let vis = apply_filters(&store, &config);
			let nodes = store.nodes().filter(|(i, _)| vis.node(*i)).count();
			let edges = store.edges().filter(|(i, _)| vis.edge(*i)).count();
			prop_assert_eq!(vis.visible_nodes(), nodes);
			prop_assert_eq!(vis.visible_edges(), edges);
		}
	}
}
