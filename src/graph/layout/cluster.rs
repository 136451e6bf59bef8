//! Galaxy-style cluster layout.
//!
//! Drugs and categories are grouped by the first two characters of their
//! classification code. Group centers sit on a large circle around the
//! canvas center; members fill concentric rings around their group center,
//! wider for bigger groups. Enzymes and adverse effects gather near the
//! canvas center. All jitter comes from one seeded [`Lcg`], consumed in a
//! fixed order, so the output is reproducible bit for bit.

use std::f64::consts::{FRAC_PI_2, TAU};

use super::groups::GroupTable;
use super::rng::Lcg;
use super::{Layout, LayoutConfig, Point, Viewport};
use crate::graph::store::GraphStore;
use crate::graph::types::{NodeIdx, NodeType};

pub(super) fn layout(
	store: &GraphStore,
	groups: &GroupTable,
	viewport: Viewport,
	config: &LayoutConfig,
) -> Layout {
	let center = viewport.center();
	let group_radius = viewport.width.min(viewport.height) / 2.0 * config.group_radius_factor;
	let mut rng = Lcg::new(config.seed);

	let slots = groups.slot_names();
	let mut members: Vec<Vec<NodeIdx>> = vec![Vec::new(); slots.len()];
	for node_type in [NodeType::Category, NodeType::Drug] {
		for (idx, node) in store.nodes_of_type(node_type) {
			let code = node.classification_code().unwrap_or_default();
			members[groups.slot_for_code(code)].push(idx);
		}
	}

	let max_group = members.iter().map(Vec::len).max().unwrap_or(0).max(1);
	let mut positions: Vec<Option<Point>> = vec![None; store.node_count()];

	for (slot, ids) in members.iter().enumerate() {
		if ids.is_empty() {
			continue;
		}
		let angle = TAU * slot as f64 / slots.len() as f64 - FRAC_PI_2;
		let group_center = center.polar(group_radius, angle);
		let size_ratio = ids.len() as f64 / max_group as f64;
		let spacing = config.base_ring_spacing + size_ratio * config.ring_spacing_growth;
		place_rings(ids, group_center, spacing, config, &mut rng, &mut positions);
	}

	for (idx, node) in store.nodes() {
		if positions[idx.0].is_some() {
			continue;
		}
		positions[idx.0] = match node.node_type() {
			NodeType::Cyp => {
				let angle = rng.next_f64() * TAU;
				let radius = config.enzyme_radius + rng.next_f64() * config.enzyme_spread;
				Some(center.polar(radius, angle))
			}
			NodeType::AdverseEffect => {
				let angle = rng.next_f64() * TAU;
				let radius = group_radius * config.effect_radius
					+ rng.next_f64() * group_radius * config.effect_spread;
				Some(center.polar(radius, angle))
			}
			_ => None,
		};
	}

	Layout {
		positions: positions
			.into_iter()
			.map(|p| p.unwrap_or(center))
			.collect(),
	}
}

/// Fill rings around `group_center`: ring 0 takes one node, ring `k` takes as
/// many as fit at `min_arc_length` apart on its circumference.
fn place_rings(
	ids: &[NodeIdx],
	group_center: Point,
	spacing: f64,
	config: &LayoutConfig,
	rng: &mut Lcg,
	positions: &mut [Option<Point>],
) {
	let mut placed = 0;
	let mut ring = 0usize;
	while placed < ids.len() {
		let radius = ring as f64 * spacing;
		let capacity = if ring == 0 {
			1
		} else {
			((TAU * radius / config.min_arc_length).floor() as usize).max(1)
		};
		let count = capacity.min(ids.len() - placed);
		for i in 0..count {
			let angle = TAU * i as f64 / count as f64 + rng.next_f64() * config.angular_jitter;
			let jittered = radius + (rng.next_f64() - 0.5) * spacing * config.radial_jitter;
			positions[ids[placed].0] = Some(group_center.polar(jittered, angle));
			placed += 1;
		}
		ring += 1;
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;
	use crate::graph::store::fixtures::{scenario, store};

	fn run(store: &GraphStore, viewport: Viewport) -> Layout {
		layout(store, &GroupTable::default(), viewport, &LayoutConfig::default())
	}

	fn distance(a: Point, b: Point) -> f64 {
		((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
	}

	#[test]
	fn enzymes_and_effects_stay_near_center() {
		let store = store(serde_json::json!({
			"nodes": [
				{ "id": "c", "type": "cyp", "name_en": "CYP3A4" },
				{ "id": "e", "type": "adverse_effect", "name_ja": "発疹" },
				{ "id": "u", "type": "pathway" }
			],
			"edges": []
		}));
		let viewport = Viewport::new(800.0, 600.0);
		let layout = run(&store, viewport);
		let center = viewport.center();
		let group_radius = 300.0 * 3.5;

		let enzyme = distance(layout.position(NodeIdx(0)), center);
		assert!((20.0..=70.0).contains(&enzyme), "enzyme at {enzyme}");

		let effect = distance(layout.position(NodeIdx(1)), center);
		assert!(
			(group_radius * 0.3..=group_radius * 0.6).contains(&effect),
			"effect at {effect}"
		);

		assert_eq!(layout.position(NodeIdx(2)), center);
	}

	#[test]
	fn group_members_cluster_around_their_slot() {
		let store = scenario();
		let viewport = Viewport::new(1000.0, 1000.0);
		let layout = run(&store, viewport);
		let center = viewport.center();
		let group_radius = 500.0 * 3.5;

		// C1 (214) is the first member of the 循環器 slot, so it sits in ring 0.
		let slot_angle = TAU * 1.0 / 7.0 - FRAC_PI_2;
		let slot_center = center.polar(group_radius, slot_angle);
		let c1 = layout.position(NodeIdx(2));
		assert!(distance(c1, slot_center) < 200.0 * 0.3);

		// D1 shares the slot, D2 (117) belongs to 神経系 at the top of the circle.
		let d1 = layout.position(NodeIdx(0));
		assert!(distance(d1, slot_center) < distance(d1, center));
		let top = center.polar(group_radius, -FRAC_PI_2);
		let d2 = layout.position(NodeIdx(1));
		assert!(distance(d2, top) < 200.0 * 0.3);
	}

	#[test]
	fn ring_capacity_grows_with_radius() {
		let nodes: Vec<serde_json::Value> = (0..200)
			.map(|i| serde_json::json!({ "id": format!("d{i}"), "type": "drug", "therapeutic_category": "21" }))
			.collect();
		let store = store(serde_json::json!({ "nodes": nodes, "edges": [] }));
		let viewport = Viewport::new(1000.0, 1000.0);
		let layout = run(&store, viewport);
		let slot_center = viewport
			.center()
			.polar(500.0 * 3.5, TAU / 7.0 - FRAC_PI_2);

		// Largest group: spacing 200. Ring 1 holds floor(2π·200/8) = 157 nodes.
		let spacing = 200.0;
		let ring_of = |i: usize| (distance(layout.position(NodeIdx(i)), slot_center) / spacing).round();
		assert_eq!(ring_of(0), 0.0);
		assert!((1..=157).all(|i| ring_of(i) == 1.0));
		assert!((158..200).all(|i| ring_of(i) == 2.0));
	}

	proptest! {
		#[test]
		fn layout_is_deterministic(
			codes in prop::collection::vec("[0-9]{0,3}", 0..40),
			width in 1.0f64..3000.0,
			height in 1.0f64..3000.0,
		) {
			let nodes: Vec<serde_json::Value> = codes
				.iter()
				.enumerate()
				.map(|(i, code)| match i % 4 {
					0 => serde_json::json!({ "id": format!("n{i}"), "type": "drug", "therapeutic_category": code }),
					1 => serde_json::json!({ "id": format!("n{i}"), "type": "category", "code": code }),
					2 => serde_json::json!({ "id": format!("n{i}"), "type": "cyp" }),
					_ => serde_json::json!({ "id": format!("n{i}"), "type": "adverse_effect" }),
				})
				.collect();
			let store = store(serde_json::json!({ "nodes": nodes, "edges": [] }));
			let viewport = Viewport::new(width, height);
			let a = run(&store, viewport);
			let b = run(&store, viewport);
			prop_assert_eq!(a.len(), store.node_count());
			let bits = |l: &Layout| l.positions().iter().map(|p| (p.x.to_bits(), p.y.to_bits())).collect::<Vec<_>>();
			prop_assert_eq!(bits(&a), bits(&b));
		}
	}
}
