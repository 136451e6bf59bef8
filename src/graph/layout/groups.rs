//! Therapeutic group table used to cluster drugs and categories.

/// Name of the catch-all group for codes that match no prefix.
pub const OTHER_GROUP: &str = "その他";

/// One cluster: a display name and the two-character code prefixes it owns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
	/// Display name.
	pub name: String,
	/// Two-character classification prefixes.
	pub prefixes: Vec<String>,
}

/// Ordered group table. Order determines each group's slot on the layout circle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupTable {
	groups: Vec<Group>,
}

impl GroupTable {
	/// Table from `(name, prefixes)` pairs, in slot order.
	pub fn new<N, P, S>(groups: impl IntoIterator<Item = (N, P)>) -> Self
	where
		N: Into<String>,
		P: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			groups: groups
				.into_iter()
				.map(|(name, prefixes)| Group {
					name: name.into(),
					prefixes: prefixes.into_iter().map(Into::into).collect(),
				})
				.collect(),
		}
	}

	/// Slot names: every table group, then the catch-all if the table lacks one.
	pub fn slot_names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.groups.iter().map(|g| g.name.as_str()).collect();
		if !names.contains(&OTHER_GROUP) {
			names.push(OTHER_GROUP);
		}
		names
	}

	/// Slot index for a classification code, by its first two characters.
	///
	/// Codes matching no prefix (including short or empty codes) land in the
	/// catch-all slot.
	pub fn slot_for_code(&self, code: &str) -> usize {
		let prefix: String = code.chars().take(2).collect();
		self.groups
			.iter()
			.position(|g| g.prefixes.iter().any(|p| *p == prefix))
			.unwrap_or_else(|| self.other_slot())
	}

	fn other_slot(&self) -> usize {
		self.groups
			.iter()
			.position(|g| g.name == OTHER_GROUP)
			.unwrap_or(self.groups.len())
	}
}

impl Default for GroupTable {
	/// Therapeutic domains of the Japanese drug classification.
	fn default() -> Self {
		Self::new([
			("神経系", vec!["11", "12", "13"]),
			("循環器", vec!["21"]),
			("消化器・呼吸器", vec!["22", "23"]),
			("ホルモン・代謝", vec!["24", "25", "31", "33", "39"]),
			("抗感染症", vec!["61", "62", "63"]),
			("免疫・腫瘍", vec!["42", "44"]),
			(OTHER_GROUP, vec!["26", "81"]),
		])
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn codes_match_by_two_character_prefix() {
		let table = GroupTable::default();
		assert_eq!(table.slot_for_code("214"), 1);
		assert_eq!(table.slot_for_code("1149"), 0);
		assert_eq!(table.slot_for_code("81"), 6);
	}

	#[test]
	fn unmatched_codes_fall_into_catch_all() {
		let table = GroupTable::default();
		assert_eq!(table.slot_for_code("99"), 6);
		assert_eq!(table.slot_for_code(""), 6);
		assert_eq!(table.slot_for_code("2"), 6);
	}

	#[test]
	fn catch_all_gets_a_slot_when_missing_from_table() {
		let table = GroupTable::new([("循環器", vec!["21"])]);
		assert_eq!(table.slot_names(), vec!["循環器", OTHER_GROUP]);
		assert_eq!(table.slot_for_code("11"), 1);
	}
}
