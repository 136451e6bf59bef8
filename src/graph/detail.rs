//! Inspection data for a single node, shaped per node type.

use super::store::GraphStore;
use super::types::{AdverseEffectEntry, EdgeType, Node, NodeKind, NodeType};

/// Mechanism value that carries no information and is not shown.
const UNCLASSIFIED_MECHANISM: &str = "unclassified";

/// A reference to another node, for navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeLink {
	/// Target node id. May not exist in the store (enzyme codes without a node).
	pub id: String,
	/// Link text.
	pub name: String,
}

impl NodeLink {
	fn to(node: &Node) -> Self {
		Self {
			id: node.id.clone(),
			name: node.display_name().to_string(),
		}
	}
}

/// One interaction listed on a drug.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interaction {
	/// The other drug.
	pub partner: NodeLink,
	/// Whether the edge carries the `"CI"` marker.
	pub contraindicated: bool,
	/// Mechanism text, if informative.
	pub mechanism: Option<String>,
}

/// External reference identifiers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceInfo {
	/// DrugBank id, or the node id when absent.
	pub drugbank_id: String,
	/// ATC code.
	pub atc_code: String,
	/// Molecular formula.
	pub formula: Option<String>,
}

/// Drug-specific detail.
#[derive(Clone, Debug, PartialEq)]
pub struct DrugDetail {
	/// Efficacy text.
	pub efficacy: Option<String>,
	/// Category the drug belongs to.
	pub category: Option<NodeLink>,
	/// Enzyme links, `cyp_<code>` per listed enzyme.
	pub enzymes: Vec<NodeLink>,
	/// Interactions, contraindicated first, then by partner name.
	pub interactions: Vec<Interaction>,
	/// Contraindication count: contraindication edges or `"CI"` markers.
	pub contraindicated: usize,
	/// Precaution edges without a `"CI"` marker.
	pub precautions: usize,
	/// Listed adverse effects.
	pub adverse_effects: Vec<AdverseEffectEntry>,
	/// Present when the drug has an ATC code.
	pub reference: Option<ReferenceInfo>,
}

/// Type-specific part of a [`NodeDetail`].
#[derive(Clone, Debug, PartialEq)]
pub enum DetailBody {
	/// Drug detail.
	Drug(Box<DrugDetail>),
	/// Category code and member drugs.
	Category {
		/// Classification code.
		code: String,
		/// Connected drugs.
		drugs: Vec<NodeLink>,
	},
	/// Drugs causing this effect.
	AdverseEffect {
		/// Connected drugs.
		drugs: Vec<NodeLink>,
	},
	/// Drugs metabolized by this enzyme.
	Cyp {
		/// Connected drugs.
		drugs: Vec<NodeLink>,
	},
	/// No type-specific data.
	Other,
}

/// Everything the detail panel shows for one node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeDetail {
	/// Node id.
	pub id: String,
	/// Node type.
	pub node_type: NodeType,
	/// Display name.
	pub name: String,
	/// English name, possibly empty.
	pub name_en: String,
	/// Whether a Japanese name distinct from the English one exists.
	pub has_japanese_name: bool,
	/// Type-specific data.
	pub body: DetailBody,
}

/// Build the detail for `id`. Absent for unknown ids.
pub fn node_detail(store: &GraphStore, id: &str) -> Option<NodeDetail> {
	let node = store.node(id)?;
	let connected_drugs = || -> Vec<NodeLink> {
		store
			.neighbors(id)
			.into_iter()
			.filter(|n| n.node_type() == NodeType::Drug)
			.map(NodeLink::to)
			.collect()
	};
	let body = match &node.kind {
		NodeKind::Drug(_) => DetailBody::Drug(Box::new(drug_detail(store, node))),
		NodeKind::Category { code } => DetailBody::Category {
			code: code.clone(),
			drugs: connected_drugs(),
		},
		NodeKind::AdverseEffect => DetailBody::AdverseEffect {
			drugs: connected_drugs(),
		},
		NodeKind::Cyp => DetailBody::Cyp {
			drugs: connected_drugs(),
		},
		NodeKind::Unknown => DetailBody::Other,
	};
	Some(NodeDetail {
		id: node.id.clone(),
		node_type: node.node_type(),
		name: node.display_name().to_string(),
		name_en: node.name_en.clone(),
		has_japanese_name: !node.name_ja.is_empty() && node.name_ja != node.name_en,
		body,
	})
}

fn drug_detail(store: &GraphStore, node: &Node) -> DrugDetail {
	let Some(idx) = store.idx(&node.id) else {
		return DrugDetail::empty();
	};
	let profile = node.drug().cloned().unwrap_or_default();
	let edges: Vec<_> = store.incident(idx).iter().map(|&e| store.edge_at(e)).collect();

	let interaction_edges = || edges.iter().filter(|e| e.edge_type.is_interaction());
	let contraindicated = interaction_edges()
		.filter(|e| e.edge_type == EdgeType::Contraindication || e.is_ci())
		.count();
	let precautions = interaction_edges()
		.filter(|e| e.edge_type == EdgeType::Precaution && !e.is_ci())
		.count();

	let mut interactions: Vec<Interaction> = interaction_edges()
		.map(|e| Interaction {
			partner: NodeLink::to(store.node_at(e.other(idx))),
			contraindicated: e.is_ci(),
			mechanism: e
				.mechanism
				.clone()
				.filter(|m| m != UNCLASSIFIED_MECHANISM),
		})
		.collect();
	interactions.sort_by(|a, b| {
		b.contraindicated
			.cmp(&a.contraindicated)
			.then_with(|| a.partner.name.cmp(&b.partner.name))
	});

	let category = edges
		.iter()
		.any(|e| e.edge_type == EdgeType::BelongsToCategory)
		.then(|| {
			store
				.neighbor_indices(idx)
				.into_iter()
				.map(|n| store.node_at(n))
				.find(|n| n.node_type() == NodeType::Category)
				.map(NodeLink::to)
		})
		.flatten();

	let enzymes = profile
		.cyp_enzymes
		.iter()
		.map(|code| NodeLink {
			id: format!("cyp_{code}"),
			name: code.clone(),
		})
		.collect();

	let reference = profile.atc_code.clone().map(|atc_code| ReferenceInfo {
		drugbank_id: profile.drugbank_id.clone().unwrap_or_else(|| node.id.clone()),
		atc_code,
		formula: profile.formula.clone(),
	});

	DrugDetail {
		efficacy: profile.efficacy,
		category,
		enzymes,
		interactions,
		contraindicated,
		precautions,
		adverse_effects: profile.adverse_effects,
		reference,
	}
}

impl DrugDetail {
	fn empty() -> Self {
		Self {
			efficacy: None,
			category: None,
			enzymes: Vec::new(),
			interactions: Vec::new(),
			contraindicated: 0,
			precautions: 0,
			adverse_effects: Vec::new(),
			reference: None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::store::fixtures::{scenario, store};

	fn drug(detail: &NodeDetail) -> &DrugDetail {
		match &detail.body {
			DetailBody::Drug(d) => d,
			other => panic!("expected drug detail, got {other:?}"),
		}
	}

	#[test]
	fn drug_detail_collects_neighborhood() {
		let store = scenario();
		let detail = node_detail(&store, "D1").unwrap();
		assert_eq!(detail.name, "薬1");
		assert!(detail.has_japanese_name);
		let d = drug(&detail);
		assert_eq!(d.category, Some(NodeLink { id: "C1".into(), name: "血圧降下剤".into() }));
		assert_eq!(d.enzymes, vec![NodeLink { id: "cyp_3A4".into(), name: "3A4".into() }]);
		assert_eq!(d.contraindicated, 1);
		assert_eq!(d.precautions, 0);
		assert_eq!(d.interactions.len(), 1);
		assert_eq!(d.interactions[0].partner.name, "Drug Two");
		assert!(d.interactions[0].contraindicated);
		assert_eq!(d.adverse_effects.len(), 1);
		assert!(d.reference.is_none());
	}

	#[test]
	fn interactions_sort_contraindicated_first_then_by_name() {
		let store = store(serde_json::json!({
			"nodes": [
				{ "id": "x", "type": "drug", "name_en": "X", "atc_code": "B01AA03" },
				{ "id": "b", "type": "drug", "name_en": "Beta" },
				{ "id": "a", "type": "drug", "name_en": "Alpha" },
				{ "id": "z", "type": "drug", "name_en": "Zeta" }
			],
			"edges": [
				{ "source": "x", "target": "b", "type": "precaution", "mechanism": "unclassified" },
				{ "source": "a", "target": "x", "type": "precaution", "mechanism": "CYP2C9" },
				{ "source": "x", "target": "z", "type": "contraindication", "severity": "CI" }
			]
		}));
		let detail = node_detail(&store, "x").unwrap();
		assert!(!detail.has_japanese_name);
		let d = drug(&detail);
		let names: Vec<&str> = d.interactions.iter().map(|i| i.partner.name.as_str()).collect();
		assert_eq!(names, vec!["Zeta", "Alpha", "Beta"]);
		assert_eq!(d.interactions[1].mechanism.as_deref(), Some("CYP2C9"));
		assert_eq!(d.interactions[2].mechanism, None);
		assert_eq!((d.contraindicated, d.precautions), (1, 2));
		let reference = d.reference.as_ref().unwrap();
		assert_eq!(reference.drugbank_id, "x");
		assert_eq!(reference.atc_code, "B01AA03");
	}

	#[test]
	fn tag_details_list_connected_drugs() {
		let store = scenario();
		match node_detail(&store, "C1").unwrap().body {
			DetailBody::Category { code, drugs } => {
				assert_eq!(code, "214");
				assert_eq!(drugs, vec![NodeLink { id: "D1".into(), name: "薬1".into() }]);
			}
			other => panic!("expected category detail, got {other:?}"),
		}
		assert!(matches!(
			node_detail(&store, "E1").unwrap().body,
			DetailBody::AdverseEffect { drugs } if drugs.len() == 1
		));
		assert!(node_detail(&store, "ghost").is_none());
	}
}
