//! Six aggregate ranking views over the full graph.
//!
//! Rankings ignore filter state. Drug views deduplicate by display name,
//! keeping the highest count at the position the name first appeared, and
//! truncate to the top entries. Enzyme and effect views list every node.

use std::collections::HashMap;

use log::debug;

use super::store::GraphStore;
use super::types::{EdgeType, Node, NodeIdx, NodeType};

/// Ranking tunables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankingConfig {
	/// Length of the truncated drug views.
	pub top_n: usize,
}

impl Default for RankingConfig {
	fn default() -> Self {
		Self { top_n: 20 }
	}
}

/// The six ranking views.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RankingKind {
	/// Contraindication edges per drug.
	Contraindications,
	/// Contraindication and precaution edges per drug.
	Interactions,
	/// Listed adverse effects per drug.
	AdverseEffects,
	/// Listed CYP enzymes per drug.
	Enzymes,
	/// Connected drugs per CYP node.
	EnzymeNodes,
	/// Connected drugs per adverse effect node.
	AdverseEffectNodes,
}

impl RankingKind {
	/// All views, in tab order.
	pub const ALL: [RankingKind; 6] = [
		RankingKind::Contraindications,
		RankingKind::Interactions,
		RankingKind::AdverseEffects,
		RankingKind::Enzymes,
		RankingKind::EnzymeNodes,
		RankingKind::AdverseEffectNodes,
	];

	/// Tab label.
	pub fn label(self) -> &'static str {
		match self {
			RankingKind::Contraindications => "併用禁忌 TOP20",
			RankingKind::Interactions => "飲み合わせ注意 TOP20",
			RankingKind::AdverseEffects => "副作用が多い薬 TOP20",
			RankingKind::Enzymes => "CYP代謝が多い薬 TOP20",
			RankingKind::EnzymeNodes => "関連薬が多いCYP酵素",
			RankingKind::AdverseEffectNodes => "関連薬が多い副作用",
		}
	}

	/// Unit suffix for counts.
	pub fn unit(self) -> &'static str {
		match self {
			RankingKind::EnzymeNodes | RankingKind::AdverseEffectNodes => "薬",
			_ => "件",
		}
	}
}

/// One ranked row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankEntry {
	/// Node id (the kept one, for deduplicated views).
	pub id: String,
	/// Display name.
	pub name: String,
	/// Aggregate count.
	pub count: usize,
}

/// All six views, computed together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rankings {
	views: HashMap<RankingKind, Vec<RankEntry>>,
}

impl Rankings {
	/// Compute every view against the full store.
	pub fn compute(store: &GraphStore, config: &RankingConfig) -> Self {
		let edge_count = |idx: NodeIdx, accept: fn(EdgeType) -> bool| {
			store
				.incident(idx)
				.iter()
				.filter(|&&e| accept(store.edge_at(e).edge_type))
				.count()
		};

		let drug_view = |count: &dyn Fn(NodeIdx, &Node) -> usize| {
			let entries = store
				.nodes_of_type(NodeType::Drug)
				.map(|(idx, node)| entry(node, count(idx, node)))
				.filter(|e| e.count > 0)
				.collect();
			let mut ranked = dedup_by_name(entries);
			ranked.sort_by(|a, b| b.count.cmp(&a.count));
			ranked.truncate(config.top_n);
			ranked
		};

		let node_view = |node_type: NodeType| {
			let mut ranked: Vec<RankEntry> = store
				.nodes_of_type(node_type)
				.map(|(idx, node)| {
					let drugs = store
						.neighbor_indices(idx)
						.into_iter()
						.filter(|&n| store.node_at(n).node_type() == NodeType::Drug)
						.count();
					entry(node, drugs)
				})
				.collect();
			ranked.sort_by(|a, b| b.count.cmp(&a.count));
			ranked
		};

		let views = HashMap::from([
			(
				RankingKind::Contraindications,
				drug_view(&|idx, _| edge_count(idx, |t| t == EdgeType::Contraindication)),
			),
			(
				RankingKind::Interactions,
				drug_view(&|idx, _| edge_count(idx, EdgeType::is_interaction)),
			),
			(
				RankingKind::AdverseEffects,
				drug_view(&|_, node| node.drug().map_or(0, |d| d.adverse_effects.len())),
			),
			(
				RankingKind::Enzymes,
				drug_view(&|_, node| node.drug().map_or(0, |d| d.cyp_enzymes.len())),
			),
			(RankingKind::EnzymeNodes, node_view(NodeType::Cyp)),
			(RankingKind::AdverseEffectNodes, node_view(NodeType::AdverseEffect)),
		]);
		debug!("kusuri-graph: rankings computed");
		Self { views }
	}

	/// Rows of one view, best first.
	pub fn view(&self, kind: RankingKind) -> &[RankEntry] {
		self.views.get(&kind).map(Vec::as_slice).unwrap_or(&[])
	}
}

fn entry(node: &Node, count: usize) -> RankEntry {
	RankEntry {
		id: node.id.clone(),
		name: node.display_name().to_string(),
		count,
	}
}

/// Keep the highest-count entry per name at the slot where the name first appeared.
/// Ties keep the earlier entry.
fn dedup_by_name(entries: Vec<RankEntry>) -> Vec<RankEntry> {
	let mut slots: HashMap<String, usize> = HashMap::new();
	let mut kept: Vec<RankEntry> = Vec::new();
	for entry in entries {
		match slots.get(&entry.name) {
			Some(&slot) => {
				if entry.count > kept[slot].count {
					kept[slot] = entry;
				}
			}
			None => {
				slots.insert(entry.name.clone(), kept.len());
				kept.push(entry);
			}
		}
	}
	kept
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::store::fixtures::{scenario, store};

	fn rows(rankings: &Rankings, kind: RankingKind) -> Vec<(&str, usize)> {
		rankings
			.view(kind)
			.iter()
			.map(|e| (e.id.as_str(), e.count))
			.collect()
	}

	#[test]
	fn contraindication_counts_both_endpoints() {
		let rankings = Rankings::compute(&scenario(), &RankingConfig::default());
		assert_eq!(
			rows(&rankings, RankingKind::Contraindications),
			vec![("D1", 1), ("D2", 1)]
		);
		assert_eq!(rows(&rankings, RankingKind::AdverseEffects), vec![("D1", 1)]);
		assert_eq!(rows(&rankings, RankingKind::Enzymes), vec![("D1", 1)]);
		assert_eq!(rows(&rankings, RankingKind::AdverseEffectNodes), vec![("E1", 1)]);
		assert!(rankings.view(RankingKind::EnzymeNodes).is_empty());
	}

	#[test]
	fn duplicate_names_keep_highest_count_at_first_position() {
		let store = store(serde_json::json!({
			"nodes": [
				{ "id": "a1", "type": "drug", "name_ja": "A", "cyp_enzymes": ["1A2"] },
				{ "id": "b", "type": "drug", "name_ja": "B", "cyp_enzymes": ["1A2", "2C9"] },
				{ "id": "a2", "type": "drug", "name_ja": "A", "cyp_enzymes": ["1A2", "2C9", "3A4"] },
				{ "id": "c", "type": "drug", "name_ja": "C", "cyp_enzymes": ["2D6", "3A4"] }
			],
			"edges": []
		}));
		let rankings = Rankings::compute(&store, &RankingConfig::default());
		assert_eq!(
			rows(&rankings, RankingKind::Enzymes),
			vec![("a2", 3), ("b", 2), ("c", 2)]
		);
	}

	#[test]
	fn drug_views_truncate_and_node_views_do_not() {
		let mut nodes: Vec<serde_json::Value> = (0..25)
			.map(|i| serde_json::json!({ "id": format!("d{i}"), "type": "drug", "cyp_enzymes": ["3A4"] }))
			.collect();
		nodes.extend((0..25).map(|i| serde_json::json!({ "id": format!("c{i}"), "type": "cyp" })));
		let store = store(serde_json::json!({ "nodes": nodes, "edges": [] }));
		let rankings = Rankings::compute(&store, &RankingConfig::default());
		assert_eq!(rankings.view(RankingKind::Enzymes).len(), 20);
		assert_eq!(rankings.view(RankingKind::EnzymeNodes).len(), 25);
		// Zero-count drugs are left out.
		assert!(rankings.view(RankingKind::Contraindications).is_empty());
	}

	#[test]
	fn node_views_count_distinct_drugs() {
		let store = store(serde_json::json!({
			"nodes": [
				{ "id": "d1", "type": "drug" },
				{ "id": "d2", "type": "drug" },
				{ "id": "x", "type": "cyp" },
				{ "id": "y", "type": "cyp" }
			],
			"edges": [
				{ "source": "d1", "target": "y", "type": "metabolized_by" },
				{ "source": "d1", "target": "y", "type": "metabolized_by" },
				{ "source": "d2", "target": "y", "type": "metabolized_by" },
				{ "source": "d1", "target": "x", "type": "metabolized_by" }
			]
		}));
		let rankings = Rankings::compute(&store, &RankingConfig::default());
		assert_eq!(
			rows(&rankings, RankingKind::EnzymeNodes),
			vec![("y", 2), ("x", 1)]
		);
	}

	#[test]
	fn computation_is_deterministic() {
		let store = scenario();
		let config = RankingConfig::default();
		assert_eq!(Rankings::compute(&store, &config), Rankings::compute(&store, &config));
	}

	#[test]
	fn units_follow_view_kind() {
		assert_eq!(RankingKind::Interactions.unit(), "件");
		assert_eq!(RankingKind::AdverseEffectNodes.unit(), "薬");
	}
}
