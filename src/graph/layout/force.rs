//! Force-directed relaxation on top of a seed layout.
//!
//! Runs the `force_graph` simulation for a fixed number of fixed-size ticks,
//! so the result depends only on the seed positions and the edge set.

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::{Layout, LayoutConfig, Point};
use crate::graph::store::GraphStore;

fn simulation_parameters() -> SimulationParameters {
	SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	}
}

pub(super) fn relax(store: &GraphStore, seed: &Layout, config: &LayoutConfig) -> Layout {
	let mut graph: ForceGraph<usize, ()> = ForceGraph::new(simulation_parameters());

	let handles: Vec<_> = store
		.nodes()
		.map(|(idx, _)| {
			let start = seed.position(idx);
			graph.add_node(NodeData {
				x: start.x as f32,
				y: start.y as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: idx.0,
			})
		})
		.collect();

	for (_, edge) in store.edges() {
		if edge.source != edge.target {
			graph.add_edge(
				handles[edge.source.0],
				handles[edge.target.0],
				EdgeData::default(),
			);
		}
	}

	for _ in 0..config.force_iterations {
		graph.update(config.force_time_step);
	}

	let mut positions = seed.positions().to_vec();
	graph.visit_nodes(|node| {
		let (x, y) = (node.x() as f64, node.y() as f64);
		// Coincident nodes can blow up; keep their seed position instead.
		if x.is_finite() && y.is_finite() {
			positions[node.data.user_data] = Point::new(x, y);
		}
	});
	Layout { positions }
}
