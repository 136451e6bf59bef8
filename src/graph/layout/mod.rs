//! Node placement strategies.
//!
//! Every strategy is a pure function of the store, the group table, the
//! viewport and a [`LayoutConfig`]; it produces exactly one [`Point`] per
//! node and never touches graph data.
//!
//! - [`LayoutMode::Cluster`]: galaxy-style clusters per therapeutic group
//!   (the default).
//! - [`LayoutMode::Concentric`]: rings by node degree.
//! - [`LayoutMode::Force`]: force-directed relaxation seeded from the cluster
//!   layout.

mod cluster;
mod concentric;
mod force;
pub mod groups;
pub mod rng;

use std::str::FromStr;

use log::debug;

use super::store::GraphStore;
use super::types::NodeIdx;
use groups::GroupTable;

/// A 2D coordinate in graph space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate.
	pub y: f64,
}

impl Point {
	/// Point at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Point at `radius` and `angle` around `self`.
	pub fn polar(self, radius: f64, angle: f64) -> Self {
		Self {
			x: self.x + angle.cos() * radius,
			y: self.y + angle.sin() * radius,
		}
	}
}

/// Canvas dimensions the layout is computed for.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
	/// Width in pixels.
	pub width: f64,
	/// Height in pixels.
	pub height: f64,
}

impl Viewport {
	/// Viewport of `width` × `height`.
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Zero-area or non-finite viewports (e.g. not yet rendered).
	pub fn is_degenerate(&self) -> bool {
		!(self.width.is_finite() && self.height.is_finite())
			|| self.width <= 0.0
			|| self.height <= 0.0
	}

	/// Canvas center. Non-finite dimensions count as zero.
	pub fn center(&self) -> Point {
		let half = |v: f64| if v.is_finite() { v / 2.0 } else { 0.0 };
		Point::new(half(self.width), half(self.height))
	}
}

/// Tunables for the layout strategies.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	/// LCG seed.
	pub seed: u64,
	/// Group circle radius as a multiple of `min(W, H) / 2`.
	pub group_radius_factor: f64,
	/// Ring spacing of the smallest group.
	pub base_ring_spacing: f64,
	/// Extra ring spacing for the largest group.
	pub ring_spacing_growth: f64,
	/// Minimum arc length per node on a ring.
	pub min_arc_length: f64,
	/// Maximum angular jitter in radians.
	pub angular_jitter: f64,
	/// Radial jitter as a fraction of ring spacing.
	pub radial_jitter: f64,
	/// Inner radius of the enzyme band.
	pub enzyme_radius: f64,
	/// Width of the enzyme band.
	pub enzyme_spread: f64,
	/// Inner radius of the effect band, as a fraction of the group radius.
	pub effect_radius: f64,
	/// Width of the effect band, as a fraction of the group radius.
	pub effect_spread: f64,
	/// Ring radii of the concentric layout, innermost first.
	pub concentric_radii: [f64; 6],
	/// Ticks run by the force layout.
	pub force_iterations: usize,
	/// Time step per force tick.
	pub force_time_step: f32,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			seed: rng::DEFAULT_SEED,
			group_radius_factor: 3.5,
			base_ring_spacing: 80.0,
			ring_spacing_growth: 120.0,
			min_arc_length: 8.0,
			angular_jitter: 0.15,
			radial_jitter: 0.3,
			enzyme_radius: 20.0,
			enzyme_spread: 50.0,
			effect_radius: 0.3,
			effect_spread: 0.3,
			concentric_radii: [0.0, 120.0, 240.0, 360.0, 480.0, 600.0],
			force_iterations: 300,
			force_time_step: 0.016,
		}
	}
}

/// Available layout strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutMode {
	/// Clusters by therapeutic group.
	#[default]
	Cluster,
	/// Rings by degree.
	Concentric,
	/// Force-directed.
	Force,
}

impl LayoutMode {
	/// All modes, in menu order.
	pub const ALL: [LayoutMode; 3] = [LayoutMode::Cluster, LayoutMode::Concentric, LayoutMode::Force];

	/// Mode by name. Unknown names fall back to [`LayoutMode::Concentric`].
	pub fn from_name(name: &str) -> Self {
		name.parse().unwrap_or(LayoutMode::Concentric)
	}

	/// Canonical name.
	pub fn as_str(self) -> &'static str {
		match self {
			LayoutMode::Cluster => "cluster",
			LayoutMode::Concentric => "concentric",
			LayoutMode::Force => "force",
		}
	}

	/// Menu label.
	pub fn label(self) -> &'static str {
		match self {
			LayoutMode::Cluster => "クラスター",
			LayoutMode::Concentric => "同心円",
			LayoutMode::Force => "力学モデル",
		}
	}
}

impl FromStr for LayoutMode {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"cluster" => Ok(LayoutMode::Cluster),
			"concentric" => Ok(LayoutMode::Concentric),
			"force" | "cose" => Ok(LayoutMode::Force),
			_ => Err(()),
		}
	}
}

/// One position per node, indexed by [`NodeIdx`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
	positions: Vec<Point>,
}

impl Layout {
	/// Every node at `point`.
	pub fn uniform(count: usize, point: Point) -> Self {
		Self {
			positions: vec![point; count],
		}
	}

	/// Position of a node.
	pub fn position(&self, idx: NodeIdx) -> Point {
		self.positions.get(idx.0).copied().unwrap_or_default()
	}

	/// All positions in node order.
	pub fn positions(&self) -> &[Point] {
		&self.positions
	}

	/// Number of placed nodes.
	pub fn len(&self) -> usize {
		self.positions.len()
	}

	/// Whether no node is placed.
	pub fn is_empty(&self) -> bool {
		self.positions.is_empty()
	}
}

/// Compute positions for every node with the given strategy.
///
/// A degenerate viewport places every node at its center.
pub fn apply_layout(
	store: &GraphStore,
	mode: LayoutMode,
	groups: &GroupTable,
	viewport: Viewport,
	config: &LayoutConfig,
) -> Layout {
	if viewport.is_degenerate() {
		debug!("kusuri-graph: degenerate viewport {viewport:?}, collapsing layout");
		return Layout::uniform(store.node_count(), viewport.center());
	}

	let layout = match mode {
		LayoutMode::Cluster => cluster::layout(store, groups, viewport, config),
		LayoutMode::Concentric => concentric::layout(store, viewport, config),
		LayoutMode::Force => {
			let seed = cluster::layout(store, groups, viewport, config);
			force::relax(store, &seed, config)
		}
	};
	debug!(
		"kusuri-graph: {} layout placed {} nodes",
		mode.as_str(),
		layout.len()
	);
	layout
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::store::fixtures::scenario;

	#[test]
	fn layout_names_resolve() {
		assert_eq!(LayoutMode::from_name("cluster"), LayoutMode::Cluster);
		assert_eq!(LayoutMode::from_name("cose"), LayoutMode::Force);
		assert_eq!(LayoutMode::from_name("breadthfirst"), LayoutMode::Concentric);
	}

	#[test]
	fn degenerate_viewport_collapses_to_one_point() {
		let store = scenario();
		for viewport in [
			Viewport::new(0.0, 0.0),
			Viewport::new(800.0, 0.0),
			Viewport::new(f64::NAN, 600.0),
		] {
			for mode in LayoutMode::ALL {
				let layout = apply_layout(
					&store,
					mode,
					&GroupTable::default(),
					viewport,
					&LayoutConfig::default(),
				);
				assert_eq!(layout.len(), store.node_count());
				let first = layout.positions()[0];
				assert!(first.x.is_finite() && first.y.is_finite());
				assert!(layout.positions().iter().all(|p| *p == first));
			}
		}
	}

	#[test]
	fn every_mode_places_every_node_finitely() {
		let store = scenario();
		for mode in LayoutMode::ALL {
			let layout = apply_layout(
				&store,
				mode,
				&GroupTable::default(),
				Viewport::new(1024.0, 768.0),
				&LayoutConfig::default(),
			);
			assert_eq!(layout.len(), store.node_count());
			assert!(layout.positions().iter().all(|p| p.x.is_finite() && p.y.is_finite()));
		}
	}
}
