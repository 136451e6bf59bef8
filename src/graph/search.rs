//! Case-insensitive substring search over node names.

use log::debug;

use super::store::GraphStore;
use super::types::{NodeIdx, NodeType};

/// Search tunables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
	/// Maximum number of hits returned per query.
	pub max_results: usize,
}

impl Default for SearchConfig {
	fn default() -> Self {
		Self { max_results: 20 }
	}
}

/// One matching node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchHit {
	/// Node id.
	pub id: String,
	/// Display name.
	pub name: String,
	/// English name, shown as a subtitle when it differs from `name`.
	pub name_en: String,
	/// Node type.
	pub node_type: NodeType,
}

/// Result of a query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
	/// Empty or whitespace-only query.
	Inactive,
	/// Matches in index order, possibly none.
	Matches(Vec<SearchHit>),
}

impl SearchOutcome {
	/// Hits of an active search; empty when inactive.
	pub fn hits(&self) -> &[SearchHit] {
		match self {
			SearchOutcome::Inactive => &[],
			SearchOutcome::Matches(hits) => hits,
		}
	}
}

#[derive(Clone, Debug)]
struct Entry {
	node: NodeIdx,
	terms: Vec<String>,
}

/// Lowercased name terms per node, in store order.
#[derive(Clone, Debug)]
pub struct SearchIndex {
	entries: Vec<Entry>,
	config: SearchConfig,
}

impl SearchIndex {
	/// Index every node of `store`.
	pub fn build(store: &GraphStore, config: SearchConfig) -> Self {
		let entries: Vec<Entry> = store
			.nodes()
			.map(|(idx, node)| {
				let terms = [node.name_ja.as_str(), node.name_en.as_str()]
					.into_iter()
					.chain(node.search_name.as_deref())
					.chain(node.names_alt.iter().map(String::as_str))
					.filter(|term| !term.is_empty())
					.map(str::to_lowercase)
					.collect();
				Entry { node: idx, terms }
			})
			.collect();
		debug!("kusuri-graph: search index built over {} nodes", entries.len());
		Self { entries, config }
	}

	/// Nodes with any term containing `query`, ignoring case and surrounding whitespace.
	pub fn query(&self, store: &GraphStore, query: &str) -> SearchOutcome {
		let needle = query.trim().to_lowercase();
		if needle.is_empty() {
			return SearchOutcome::Inactive;
		}
		let hits = self
			.entries
			.iter()
			.filter(|entry| entry.terms.iter().any(|term| term.contains(&needle)))
			.take(self.config.max_results)
			.map(|entry| {
				let node = store.node_at(entry.node);
				SearchHit {
					id: node.id.clone(),
					name: node.display_name().to_string(),
					name_en: node.name_en.clone(),
					node_type: node.node_type(),
				}
			})
			.collect();
		SearchOutcome::Matches(hits)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::store::fixtures::{scenario, store};

	fn ids(outcome: &SearchOutcome) -> Vec<&str> {
		outcome.hits().iter().map(|h| h.id.as_str()).collect()
	}

	#[test]
	fn substring_match_ignores_case() {
		let store = store(serde_json::json!({
			"nodes": [
				{ "id": "a", "type": "drug", "name_ja": "アスピリン", "name_en": "Aspirin" },
				{ "id": "b", "type": "drug", "name_en": "Warfarin" }
			],
			"edges": []
		}));
		let index = SearchIndex::build(&store, SearchConfig::default());
		assert_eq!(ids(&index.query(&store, "asp")), vec!["a"]);
		assert_eq!(ids(&index.query(&store, "  ARIN ")), vec!["b"]);
		assert_eq!(ids(&index.query(&store, "スピ")), vec!["a"]);
	}

	#[test]
	fn alternate_names_are_searchable() {
		let store = store(serde_json::json!({
			"nodes": [
				{ "id": "a", "type": "drug", "name_ja": "アセトアミノフェン",
				  "search_name": "paracetamol", "names_alt": ["カロナール", ""] }
			],
			"edges": []
		}));
		let index = SearchIndex::build(&store, SearchConfig::default());
		assert_eq!(ids(&index.query(&store, "PARA")), vec!["a"]);
		assert_eq!(ids(&index.query(&store, "カロ")), vec!["a"]);
	}

	#[test]
	fn blank_query_is_inactive_and_miss_is_empty() {
		let store = scenario();
		let index = SearchIndex::build(&store, SearchConfig::default());
		assert_eq!(index.query(&store, "   "), SearchOutcome::Inactive);
		assert_eq!(index.query(&store, "zzz"), SearchOutcome::Matches(Vec::new()));
	}

	#[test]
	fn results_keep_index_order_and_truncate() {
		let nodes: Vec<serde_json::Value> = (0..30)
			.map(|i| serde_json::json!({ "id": format!("n{i}"), "type": "drug", "name_en": format!("Drug {i}") }))
			.collect();
		let store = store(serde_json::json!({ "nodes": nodes, "edges": [] }));
		let index = SearchIndex::build(&store, SearchConfig::default());
		let outcome = index.query(&store, "drug");
		assert_eq!(outcome.hits().len(), 20);
		assert_eq!(outcome.hits()[0].id, "n0");
		assert_eq!(outcome.hits()[19].id, "n19");
	}
}
