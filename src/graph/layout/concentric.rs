//! Concentric rings by degree: hubs in the middle, isolated nodes outside.

use std::f64::consts::TAU;

use super::{Layout, LayoutConfig, Viewport};
use crate::graph::store::GraphStore;

/// Ring index for a node of the given degree.
fn ring_for_degree(degree: usize) -> usize {
	match degree {
		d if d > 50 => 0,
		d if d > 15 => 1,
		d if d > 5 => 2,
		d if d > 2 => 3,
		d if d > 0 => 4,
		_ => 5,
	}
}

pub(super) fn layout(store: &GraphStore, viewport: Viewport, config: &LayoutConfig) -> Layout {
	let center = viewport.center();
	let mut rings: [Vec<usize>; 6] = Default::default();
	for (idx, _) in store.nodes() {
		rings[ring_for_degree(store.incident(idx).len())].push(idx.0);
	}

	let mut positions = vec![center; store.node_count()];
	for (ring, members) in rings.iter().enumerate() {
		let radius = config.concentric_radii[ring];
		for (i, &idx) in members.iter().enumerate() {
			let angle = TAU * i as f64 / members.len() as f64;
			positions[idx] = center.polar(radius, angle);
		}
	}
	Layout { positions }
}
