//! Reverse lookup: selected tag nodes to the drugs connected to them.

use std::collections::HashMap;

use log::debug;

use super::store::GraphStore;
use super::types::{NodeIdx, NodeType};

/// A drug reached from one or more selected tags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupMatch {
	/// Drug node id.
	pub drug_id: String,
	/// Drug display name.
	pub name: String,
	/// Display names of the tags this drug connects to, in selection order.
	pub matched: Vec<String>,
}

/// Reverse lookup outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupResult {
	/// No drug connects to any selected tag.
	Empty,
	/// One tag selected: every connected drug.
	Single(Vec<LookupMatch>),
	/// Several tags selected: drugs matching all of them, then the rest.
	Partitioned {
		/// Drugs connected to every selected tag.
		all: Vec<LookupMatch>,
		/// Drugs connected to some but not all.
		some: Vec<LookupMatch>,
	},
}

impl LookupResult {
	/// Total number of drugs found.
	pub fn len(&self) -> usize {
		match self {
			LookupResult::Empty => 0,
			LookupResult::Single(list) => list.len(),
			LookupResult::Partitioned { all, some } => all.len() + some.len(),
		}
	}

	/// Whether nothing was found.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// A pickable tag node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagOption {
	/// Node id.
	pub id: String,
	/// Display name.
	pub name: String,
}

/// Find drugs connected to the selected tags of `tag_type`.
///
/// Ids that are unknown, repeated, or not of `tag_type` are skipped. Results
/// are ordered by number of matched tags, descending, then by first discovery.
pub fn reverse_lookup<S: AsRef<str>>(store: &GraphStore, tag_type: NodeType, tag_ids: &[S]) -> LookupResult {
	let mut tags: Vec<NodeIdx> = Vec::with_capacity(tag_ids.len());
	for id in tag_ids {
		match store.idx(id.as_ref()) {
			Some(idx) if store.node_at(idx).node_type() == tag_type && !tags.contains(&idx) => {
				tags.push(idx);
			}
			_ => debug!("kusuri-graph: lookup skipping tag `{}`", id.as_ref()),
		}
	}

	let mut slots: HashMap<NodeIdx, usize> = HashMap::new();
	let mut found: Vec<LookupMatch> = Vec::new();
	for &tag in &tags {
		let tag_name = store.node_at(tag).display_name();
		for drug in store.neighbor_indices(tag) {
			let node = store.node_at(drug);
			if node.node_type() != NodeType::Drug {
				continue;
			}
			let slot = *slots.entry(drug).or_insert_with(|| {
				found.push(LookupMatch {
					drug_id: node.id.clone(),
					name: node.display_name().to_string(),
					matched: Vec::new(),
				});
				found.len() - 1
			});
			found[slot].matched.push(tag_name.to_string());
		}
	}

	if found.is_empty() {
		return LookupResult::Empty;
	}
	found.sort_by(|a, b| b.matched.len().cmp(&a.matched.len()));
	if tags.len() == 1 {
		return LookupResult::Single(found);
	}
	let (all, some) = found.into_iter().partition(|m| m.matched.len() == tags.len());
	LookupResult::Partitioned { all, some }
}

/// Sort key approximating Japanese collation: case-folded, katakana folded
/// onto hiragana so both scripts interleave by reading. Kanji keep code point
/// order, so unlike a full locale collation they are not ordered by reading.
fn collation_key(name: &str) -> String {
	name.to_lowercase()
		.chars()
		.map(|c| match c {
			'\u{30A1}'..='\u{30F6}' => char::from_u32(c as u32 - 0x60).unwrap_or(c),
			_ => c,
		})
		.collect()
}

/// Tag nodes of `tag_type`, sorted by display name with [`collation_key`],
/// optionally narrowed by a case-insensitive substring of their Japanese and
/// English names.
pub fn lookup_tags(store: &GraphStore, tag_type: NodeType, filter: &str) -> Vec<TagOption> {
	let needle = filter.trim().to_lowercase();
	let mut tags: Vec<TagOption> = store
		.nodes_of_type(tag_type)
		.filter(|(_, node)| {
			needle.is_empty() || format!("{}{}", node.name_ja, node.name_en).to_lowercase().contains(&needle)
		})
		.map(|(_, node)| TagOption {
			id: node.id.clone(),
			name: node.display_name().to_string(),
		})
		.collect();
	tags.sort_by_cached_key(|tag| (collation_key(&tag.name), tag.name.clone()));
	tags
}
