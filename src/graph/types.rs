//! Graph document and domain types.
//!
//! The JSON document is deserialized into the flat `Raw*` shapes first and
//! then converted into [`Node`]/[`NodeKind`], which carry only the attributes
//! that make sense for each node type.

use std::fmt;

use serde::{Deserialize, Deserializer};

use super::error::GraphError;

/// Node type enumeration. Unrecognized type strings load as [`NodeType::Unknown`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
	/// A drug (active ingredient).
	Drug,
	/// A therapeutic classification.
	Category,
	/// An adverse effect.
	AdverseEffect,
	/// A metabolic CYP enzyme.
	Cyp,
	/// Any type string outside the known set.
	#[serde(other)]
	Unknown,
}

impl NodeType {
	/// The four known node types, in display order.
	pub const ALL: [NodeType; 4] = [
		NodeType::Drug,
		NodeType::Category,
		NodeType::AdverseEffect,
		NodeType::Cyp,
	];

	/// Wire name of this type.
	pub fn as_str(self) -> &'static str {
		match self {
			NodeType::Drug => "drug",
			NodeType::Category => "category",
			NodeType::AdverseEffect => "adverse_effect",
			NodeType::Cyp => "cyp",
			NodeType::Unknown => "unknown",
		}
	}

	/// Human-readable label.
	pub fn label(self) -> &'static str {
		match self {
			NodeType::Drug => "薬",
			NodeType::Category => "薬効分類",
			NodeType::AdverseEffect => "副作用",
			NodeType::Cyp => "CYP酵素",
			NodeType::Unknown => "その他",
		}
	}
}

impl fmt::Display for NodeType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Edge type enumeration. Unrecognized type strings load as [`EdgeType::Unknown`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
	/// Absolute do-not-combine interaction.
	Contraindication,
	/// Caution-advised interaction.
	Precaution,
	/// Drug → adverse effect.
	CausesAdverseEffect,
	/// Drug → therapeutic category.
	BelongsToCategory,
	/// Drug → CYP enzyme.
	MetabolizedBy,
	/// Any type string outside the known set.
	#[serde(other)]
	Unknown,
}

impl EdgeType {
	/// The five known edge types, in display order.
	pub const ALL: [EdgeType; 5] = [
		EdgeType::Contraindication,
		EdgeType::Precaution,
		EdgeType::CausesAdverseEffect,
		EdgeType::BelongsToCategory,
		EdgeType::MetabolizedBy,
	];

	/// Wire name of this type.
	pub fn as_str(self) -> &'static str {
		match self {
			EdgeType::Contraindication => "contraindication",
			EdgeType::Precaution => "precaution",
			EdgeType::CausesAdverseEffect => "causes_adverse_effect",
			EdgeType::BelongsToCategory => "belongs_to_category",
			EdgeType::MetabolizedBy => "metabolized_by",
			EdgeType::Unknown => "unknown",
		}
	}

	/// Human-readable label.
	pub fn label(self) -> &'static str {
		match self {
			EdgeType::Contraindication => "併用禁忌",
			EdgeType::Precaution => "併用注意",
			EdgeType::CausesAdverseEffect => "副作用",
			EdgeType::BelongsToCategory => "分類",
			EdgeType::MetabolizedBy => "CYP代謝",
			EdgeType::Unknown => "その他",
		}
	}

	/// Whether this edge is a drug-drug interaction.
	pub fn is_interaction(self) -> bool {
		matches!(self, EdgeType::Contraindication | EdgeType::Precaution)
	}
}

impl fmt::Display for EdgeType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Adverse effect frequency class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
	/// 高頻度
	High,
	/// 中頻度
	Medium,
	/// 低頻度
	Low,
	/// まれ
	Rare,
	/// Missing or unrecognized.
	#[default]
	#[serde(other)]
	Unknown,
}

impl Frequency {
	/// Display label, `None` when the class is unknown.
	pub fn label(self) -> Option<&'static str> {
		match self {
			Frequency::High => Some("高頻度"),
			Frequency::Medium => Some("中頻度"),
			Frequency::Low => Some("低頻度"),
			Frequency::Rare => Some("まれ"),
			Frequency::Unknown => None,
		}
	}
}

/// Interaction severity marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
	/// `"CI"`: absolute contraindication.
	Contraindicated,
	/// Any other marker value.
	Precaution,
}

impl Severity {
	fn from_marker(marker: &str) -> Self {
		if marker == "CI" {
			Severity::Contraindicated
		} else {
			Severity::Precaution
		}
	}
}

/// `null` reads as the default value, like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// An adverse effect entry listed on a drug.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AdverseEffectEntry {
	/// Primary (Japanese) name.
	#[serde(deserialize_with = "null_as_default")]
	pub name: String,
	/// English name, possibly empty.
	#[serde(deserialize_with = "null_as_default")]
	pub name_en: String,
	/// Frequency class.
	#[serde(deserialize_with = "null_as_default")]
	pub frequency: Frequency,
}

/// A node as it appears in the graph document.
#[derive(Clone, Debug, Deserialize)]
pub struct RawNode {
	/// Unique node id.
	pub id: String,
	/// Node type.
	#[serde(rename = "type")]
	pub node_type: NodeType,
	/// Japanese display name.
	#[serde(default)]
	pub name_ja: Option<String>,
	/// English display name.
	#[serde(default)]
	pub name_en: Option<String>,
	/// Alternate name used only for search.
	#[serde(default)]
	pub search_name: Option<String>,
	/// Additional alternate names used only for search.
	#[serde(default, deserialize_with = "null_as_default")]
	pub names_alt: Vec<String>,
	/// Drug therapeutic category code.
	#[serde(default)]
	pub therapeutic_category: Option<String>,
	/// Category classification code.
	#[serde(default)]
	pub code: Option<String>,
	/// Drug adverse effects.
	#[serde(default, deserialize_with = "null_as_default")]
	pub adverse_effects: Vec<AdverseEffectEntry>,
	/// Drug CYP enzyme codes.
	#[serde(default, deserialize_with = "null_as_default")]
	pub cyp_enzymes: Vec<String>,
	/// Drug efficacy text.
	#[serde(default)]
	pub efficacy: Option<String>,
	/// ATC classification code.
	#[serde(default)]
	pub atc_code: Option<String>,
	/// DrugBank identifier.
	#[serde(default)]
	pub drugbank_id: Option<String>,
	/// Molecular formula.
	#[serde(default)]
	pub formula: Option<String>,
}

/// An edge as it appears in the graph document.
#[derive(Clone, Debug, Deserialize)]
pub struct RawEdge {
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Edge type.
	#[serde(rename = "type")]
	pub edge_type: EdgeType,
	/// Severity marker (`"CI"` or other).
	#[serde(default)]
	pub severity: Option<String>,
	/// Interaction mechanism classification.
	#[serde(default)]
	pub mechanism: Option<String>,
}

/// Complete graph document: nodes and edges.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphDocument {
	/// All nodes, in document order.
	pub nodes: Vec<RawNode>,
	/// All edges, in document order.
	pub edges: Vec<RawEdge>,
}

impl GraphDocument {
	/// Parse a document from JSON text.
	pub fn from_json(text: &str) -> Result<Self, GraphError> {
		Ok(serde_json::from_str(text)?)
	}
}

/// Drug-specific attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrugProfile {
	/// Ordered adverse effect list.
	pub adverse_effects: Vec<AdverseEffectEntry>,
	/// CYP enzyme codes.
	pub cyp_enzymes: Vec<String>,
	/// Two-digit therapeutic category code (may be empty).
	pub therapeutic_category: String,
	/// Efficacy text.
	pub efficacy: Option<String>,
	/// ATC code.
	pub atc_code: Option<String>,
	/// DrugBank id.
	pub drugbank_id: Option<String>,
	/// Molecular formula.
	pub formula: Option<String>,
}

/// Per-type node attributes.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
	/// Drug with its profile.
	Drug(DrugProfile),
	/// Therapeutic category with its classification code.
	Category {
		/// Classification code (may be empty).
		code: String,
	},
	/// Adverse effect.
	AdverseEffect,
	/// CYP enzyme.
	Cyp,
	/// Unrecognized type.
	Unknown,
}

/// A node in the loaded graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Unique id.
	pub id: String,
	/// Japanese name, empty when absent.
	pub name_ja: String,
	/// English name, empty when absent.
	pub name_en: String,
	/// Search-only alternate name.
	pub search_name: Option<String>,
	/// Search-only alternate names.
	pub names_alt: Vec<String>,
	/// Type-specific attributes.
	pub kind: NodeKind,
}

impl Node {
	/// Type of this node.
	pub fn node_type(&self) -> NodeType {
		match self.kind {
			NodeKind::Drug(_) => NodeType::Drug,
			NodeKind::Category { .. } => NodeType::Category,
			NodeKind::AdverseEffect => NodeType::AdverseEffect,
			NodeKind::Cyp => NodeType::Cyp,
			NodeKind::Unknown => NodeType::Unknown,
		}
	}

	/// Display name: `name_ja`, then `name_en`, then `id`. Empty strings are skipped.
	pub fn display_name(&self) -> &str {
		if !self.name_ja.is_empty() {
			&self.name_ja
		} else if !self.name_en.is_empty() {
			&self.name_en
		} else {
			&self.id
		}
	}

	/// Drug profile, if this is a drug.
	pub fn drug(&self) -> Option<&DrugProfile> {
		match &self.kind {
			NodeKind::Drug(profile) => Some(profile),
			_ => None,
		}
	}

	/// Classification code used for clustering (drugs and categories only).
	pub fn classification_code(&self) -> Option<&str> {
		match &self.kind {
			NodeKind::Drug(profile) => Some(&profile.therapeutic_category),
			NodeKind::Category { code } => Some(code),
			_ => None,
		}
	}
}

impl From<RawNode> for Node {
	fn from(raw: RawNode) -> Self {
		let kind = match raw.node_type {
			NodeType::Drug => NodeKind::Drug(DrugProfile {
				adverse_effects: raw.adverse_effects,
				cyp_enzymes: raw.cyp_enzymes,
				therapeutic_category: raw.therapeutic_category.unwrap_or_default(),
				efficacy: raw.efficacy.filter(|s| !s.is_empty()),
				atc_code: raw.atc_code.filter(|s| !s.is_empty()),
				drugbank_id: raw.drugbank_id.filter(|s| !s.is_empty()),
				formula: raw.formula.filter(|s| !s.is_empty()),
			}),
			NodeType::Category => NodeKind::Category {
				code: raw.code.unwrap_or_default(),
			},
			NodeType::AdverseEffect => NodeKind::AdverseEffect,
			NodeType::Cyp => NodeKind::Cyp,
			NodeType::Unknown => NodeKind::Unknown,
		};
		Self {
			id: raw.id,
			name_ja: raw.name_ja.unwrap_or_default(),
			name_en: raw.name_en.unwrap_or_default(),
			search_name: raw.search_name.filter(|s| !s.is_empty()),
			names_alt: raw.names_alt,
			kind,
		}
	}
}

/// Dense index of a node inside a [`GraphStore`](super::store::GraphStore).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(pub usize);

/// Dense index of an edge inside a [`GraphStore`](super::store::GraphStore).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeIdx(pub usize);

/// A resolved edge.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	/// Source node.
	pub source: NodeIdx,
	/// Target node.
	pub target: NodeIdx,
	/// Edge type.
	pub edge_type: EdgeType,
	/// Severity marker, if any.
	pub severity: Option<Severity>,
	/// Mechanism text, if any.
	pub mechanism: Option<String>,
}

impl Edge {
	pub(crate) fn resolve(raw: RawEdge, source: NodeIdx, target: NodeIdx) -> Self {
		Self {
			source,
			target,
			edge_type: raw.edge_type,
			severity: raw.severity.as_deref().map(Severity::from_marker),
			mechanism: raw.mechanism.filter(|s| !s.is_empty()),
		}
	}

	/// Whether the edge carries the `"CI"` marker.
	pub fn is_ci(&self) -> bool {
		self.severity == Some(Severity::Contraindicated)
	}

	/// The endpoint opposite to `idx`.
	pub fn other(&self, idx: NodeIdx) -> NodeIdx {
		if self.source == idx {
			self.target
		} else {
			self.source
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display_name_falls_back_in_order() {
		let doc: GraphDocument = serde_json::from_value(serde_json::json!({
			"nodes": [
				{ "id": "a", "type": "drug", "name_ja": "アスピリン", "name_en": "Aspirin" },
				{ "id": "b", "type": "drug", "name_ja": "", "name_en": "Warfarin" },
				{ "id": "c", "type": "cyp" }
			],
			"edges": []
		}))
		.unwrap();
		let names: Vec<String> = doc
			.nodes
			.into_iter()
			.map(Node::from)
			.map(|n| n.display_name().to_string())
			.collect();
		assert_eq!(names, vec!["アスピリン", "Warfarin", "c"]);
	}

	#[test]
	fn unknown_types_are_accepted() {
		let doc = GraphDocument::from_json(
			r#"{"nodes":[{"id":"x","type":"gene"}],"edges":[{"source":"x","target":"x","type":"binds"}]}"#,
		)
		.unwrap();
		assert_eq!(doc.nodes[0].node_type, NodeType::Unknown);
		assert_eq!(doc.edges[0].edge_type, EdgeType::Unknown);
	}

	#[test]
	fn drug_attributes_survive_conversion() {
		let doc = GraphDocument::from_json(
			r#"{"nodes":[{"id":"d","type":"drug","therapeutic_category":"214",
				"adverse_effects":[{"name":"頭痛","frequency":"high"},{"name":"発疹","frequency":"sometimes"}],
				"cyp_enzymes":["3A4","2D6"],"atc_code":""}],"edges":[]}"#,
		)
		.unwrap();
		let node = Node::from(doc.nodes[0].clone());
		let drug = node.drug().unwrap();
		assert_eq!(drug.therapeutic_category, "214");
		assert_eq!(drug.adverse_effects[0].frequency, Frequency::High);
		assert_eq!(drug.adverse_effects[1].frequency, Frequency::Unknown);
		assert_eq!(drug.cyp_enzymes, vec!["3A4", "2D6"]);
		assert_eq!(drug.atc_code, None);
		assert_eq!(node.classification_code(), Some("214"));
	}

	#[test]
	fn null_lists_and_names_load_as_empty() {
		let doc = GraphDocument::from_json(
			r#"{"nodes":[{"id":"d","type":"drug","name_ja":null,"names_alt":null,"cyp_enzymes":null,
				"adverse_effects":[{"name":"頭痛","name_en":null,"frequency":null}]},
				{"id":"e","type":"drug","adverse_effects":null}],"edges":[]}"#,
		)
		.unwrap();
		assert!(doc.nodes[0].names_alt.is_empty());
		assert!(doc.nodes[0].cyp_enzymes.is_empty());
		assert_eq!(doc.nodes[0].adverse_effects[0].name, "頭痛");
		assert_eq!(doc.nodes[0].adverse_effects[0].name_en, "");
		assert_eq!(doc.nodes[0].adverse_effects[0].frequency, Frequency::Unknown);
		assert!(doc.nodes[1].adverse_effects.is_empty());
	}

	#[test]
	fn severity_marker_parsing() {
		assert_eq!(Severity::from_marker("CI"), Severity::Contraindicated);
		assert_eq!(Severity::from_marker("P"), Severity::Precaution);
		assert_eq!(Severity::from_marker("ci"), Severity::Precaution);
	}

	#[test]
	fn missing_edges_array_is_a_parse_error() {
		assert!(matches!(
			GraphDocument::from_json(r#"{"nodes":[]}"#),
			Err(GraphError::Parse(_))
		));
	}
}
