//! Immutable typed node/edge store with adjacency.

use std::collections::{HashMap, HashSet};

use log::info;

use super::error::{GraphError, ValidationError};
use super::types::{Edge, EdgeIdx, GraphDocument, Node, NodeIdx, NodeType};

/// Connected edges and neighbor nodes of a single node.
#[derive(Clone, Debug, Default)]
pub struct Connections<'a> {
	/// Edges with the node as source or target.
	pub edges: Vec<&'a Edge>,
	/// Adjacent nodes, deduplicated, in adjacency order.
	pub neighbors: Vec<&'a Node>,
}

/// Owns every node and edge of the session graph.
///
/// Built once by [`GraphStore::load`] and never mutated afterwards. Nodes and
/// edges keep document order, which is the iteration order of every query.
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	index: HashMap<String, NodeIdx>,
	adjacency: Vec<Vec<EdgeIdx>>,
}

impl GraphStore {
	/// Validate and load a document. Nothing is returned on failure.
	pub fn load(document: GraphDocument) -> Result<Self, GraphError> {
		let mut index = HashMap::with_capacity(document.nodes.len());
		let mut nodes = Vec::with_capacity(document.nodes.len());
		for raw in document.nodes {
			let idx = NodeIdx(nodes.len());
			if index.insert(raw.id.clone(), idx).is_some() {
				return Err(ValidationError::DuplicateNode(raw.id).into());
			}
			nodes.push(Node::from(raw));
		}

		let mut adjacency = vec![Vec::new(); nodes.len()];
		let mut edges = Vec::with_capacity(document.edges.len());
		for (position, raw) in document.edges.into_iter().enumerate() {
			let resolve = |id: &str| {
				index.get(id).copied().ok_or_else(|| ValidationError::DanglingEdge {
					edge: position,
					id: id.to_string(),
				})
			};
			let source = resolve(&raw.source)?;
			let target = resolve(&raw.target)?;

			let edge_idx = EdgeIdx(edges.len());
			adjacency[source.0].push(edge_idx);
			if target != source {
				adjacency[target.0].push(edge_idx);
			}
			edges.push(Edge::resolve(raw, source, target));
		}

		info!(
			"kusuri-graph: loaded {} nodes, {} edges",
			nodes.len(),
			edges.len()
		);

		Ok(Self {
			nodes,
			edges,
			index,
			adjacency,
		})
	}

	/// Number of nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of edges.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// Index of the node with `id`.
	pub fn idx(&self, id: &str) -> Option<NodeIdx> {
		self.index.get(id).copied()
	}

	/// Node with `id`, absent when unknown.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.idx(id).map(|idx| &self.nodes[idx.0])
	}

	/// Node with `id`, or [`GraphError::NotFound`].
	pub fn get_node(&self, id: &str) -> Result<&Node, GraphError> {
		self.node(id)
			.ok_or_else(|| GraphError::NotFound(id.to_string()))
	}

	/// Node at a dense index.
	///
	/// Panics if `idx` did not come from this store.
	pub fn node_at(&self, idx: NodeIdx) -> &Node {
		&self.nodes[idx.0]
	}

	/// Edge at a dense index.
	///
	/// Panics if `idx` did not come from this store.
	pub fn edge_at(&self, idx: EdgeIdx) -> &Edge {
		&self.edges[idx.0]
	}

	/// All nodes with their indices, in document order.
	pub fn nodes(&self) -> impl Iterator<Item = (NodeIdx, &Node)> + Clone + '_ {
		self.nodes.iter().enumerate().map(|(i, n)| (NodeIdx(i), n))
	}

	/// All edges with their indices, in document order.
	pub fn edges(&self) -> impl Iterator<Item = (EdgeIdx, &Edge)> + Clone + '_ {
		self.edges.iter().enumerate().map(|(i, e)| (EdgeIdx(i), e))
	}

	/// Source and target ids of an edge.
	pub fn endpoint_ids(&self, edge: &Edge) -> (&str, &str) {
		(
			&self.nodes[edge.source.0].id,
			&self.nodes[edge.target.0].id,
		)
	}

	/// Edges incident to `idx`. A self-loop appears once.
	pub fn incident(&self, idx: NodeIdx) -> &[EdgeIdx] {
		&self.adjacency[idx.0]
	}

	/// Distinct adjacent node indices, excluding `idx` itself.
	pub fn neighbor_indices(&self, idx: NodeIdx) -> Vec<NodeIdx> {
		let mut seen = HashSet::new();
		self.adjacency[idx.0]
			.iter()
			.map(|&e| self.edges[e.0].other(idx))
			.filter(|&n| n != idx && seen.insert(n))
			.collect()
	}

	/// Directly adjacent nodes in both directions. Empty for unknown ids.
	pub fn neighbors(&self, id: &str) -> Vec<&Node> {
		self.idx(id)
			.map(|idx| {
				self.neighbor_indices(idx)
					.into_iter()
					.map(|n| &self.nodes[n.0])
					.collect()
			})
			.unwrap_or_default()
	}

	/// Edges with `id` as source or target. Empty for unknown ids.
	pub fn connected_edges(&self, id: &str) -> Vec<&Edge> {
		self.idx(id)
			.map(|idx| {
				self.adjacency[idx.0]
					.iter()
					.map(|e| &self.edges[e.0])
					.collect()
			})
			.unwrap_or_default()
	}

	/// Edges and neighbors of `id` in one call.
	pub fn connections(&self, id: &str) -> Connections<'_> {
		Connections {
			edges: self.connected_edges(id),
			neighbors: self.neighbors(id),
		}
	}

	/// Number of connected edges. Zero for unknown ids.
	pub fn degree(&self, id: &str) -> usize {
		self.idx(id).map_or(0, |idx| self.adjacency[idx.0].len())
	}

	/// Nodes of one type, lazily, in document order. Clone to restart.
	pub fn nodes_of_type(&self, node_type: NodeType) -> NodesOfType<'_> {
		NodesOfType {
			inner: self.nodes.iter().enumerate(),
			node_type,
		}
	}
}

/// Iterator returned by [`GraphStore::nodes_of_type`].
#[derive(Clone, Debug)]
pub struct NodesOfType<'a> {
	inner: std::iter::Enumerate<std::slice::Iter<'a, Node>>,
	node_type: NodeType,
}

impl<'a> Iterator for NodesOfType<'a> {
	type Item = (NodeIdx, &'a Node);

	fn next(&mut self) -> Option<Self::Item> {
		let node_type = self.node_type;
		self.inner
			.by_ref()
			.find(|(_, n)| n.node_type() == node_type)
			.map(|(i, n)| (NodeIdx(i), n))
	}
}


#[cfg(test)]
mod tests {
	use super::fixtures::{scenario, store};
	use super::*;

	fn ids(nodes: &[&Node]) -> Vec<String> {
		nodes.iter().map(|n| n.id.clone()).collect()
	}

	#[test]
	fn neighbors_cover_both_directions() {
		let store = scenario();
		assert_eq!(ids(&store.neighbors("D1")), vec!["C1", "E1", "D2"]);
		assert_eq!(ids(&store.neighbors("D2")), vec!["D1"]);
		assert_eq!(store.degree("D1"), 3);
		assert_eq!(store.connected_edges("C1").len(), 1);
	}

	#[test]
	fn neighbors_are_deduplicated() {
		let store = store(serde_json::json!({
			"nodes": [{ "id": "a", "type": "drug" }, { "id": "b", "type": "drug" }],
			"edges": [
				{ "source": "a", "target": "b", "type": "contraindication" },
				{ "source": "b", "target": "a", "type": "precaution" },
				{ "source": "a", "target": "a", "type": "precaution" }
			]
		}));
		assert_eq!(ids(&store.neighbors("a")), vec!["b"]);
		assert_eq!(store.degree("a"), 3);
		assert_eq!(store.degree("b"), 2);
	}

	#[test]
	fn unknown_ids_are_empty_not_fatal() {
		let store = scenario();
		assert!(store.node("nope").is_none());
		assert!(store.neighbors("nope").is_empty());
		assert!(store.connected_edges("nope").is_empty());
		assert_eq!(store.degree("nope"), 0);
		assert!(matches!(store.get_node("nope"), Err(GraphError::NotFound(id)) if id == "nope"));
	}

	#[test]
	fn duplicate_ids_fail_validation() {
		let document: GraphDocument = serde_json::from_value(serde_json::json!({
			"nodes": [{ "id": "a", "type": "drug" }, { "id": "a", "type": "cyp" }],
			"edges": []
		}))
		.unwrap();
		match GraphStore::load(document) {
			Err(GraphError::Validation(ValidationError::DuplicateNode(id))) => assert_eq!(id, "a"),
			other => panic!("expected duplicate node error, got {other:?}"),
		}
	}

	#[test]
	fn dangling_edges_fail_validation() {
		let document: GraphDocument = serde_json::from_value(serde_json::json!({
			"nodes": [{ "id": "a", "type": "drug" }],
			"edges": [
				{ "source": "a", "target": "a", "type": "precaution" },
				{ "source": "a", "target": "ghost", "type": "precaution" }
			]
		}))
		.unwrap();
		match GraphStore::load(document) {
			Err(GraphError::Validation(ValidationError::DanglingEdge { edge, id })) => {
				assert_eq!(edge, 1);
				assert_eq!(id, "ghost");
			}
			other => panic!("expected dangling edge error, got {other:?}"),
		}
	}

	#[test]
	fn nodes_of_type_is_ordered_and_restartable() {
		let store = scenario();
		let drugs = store.nodes_of_type(NodeType::Drug);
		let first: Vec<&str> = drugs.clone().map(|(_, n)| n.id.as_str()).collect();
		let second: Vec<&str> = drugs.map(|(_, n)| n.id.as_str()).collect();
		assert_eq!(first, vec!["D1", "D2"]);
		assert_eq!(first, second);
		assert_eq!(store.nodes_of_type(NodeType::Cyp).count(), 0);
	}

	#[test]
	fn connections_pair_edges_with_neighbors() {
		let store = scenario();
		let conn = store.connections("E1");
		assert_eq!(conn.edges.len(), 1);
		assert_eq!(ids(&conn.neighbors), vec!["D1"]);
	}
}
