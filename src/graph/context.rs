//! Session context: the loaded store plus every piece of derived state.
//!
//! [`GraphContext`] is the single owner of filter, layout, selection, search
//! and ranking state. Each operation recomputes what it affects wholesale;
//! search index and rankings are built on first use and kept until they are
//! explicitly rebuilt or invalidated.

use log::{debug, error, info};

use super::detail::{NodeDetail, node_detail};
use super::error::GraphError;
use super::filter::{self, FilterConfig, QuickFilter, Visibility};
use super::frame::{RenderEdge, RenderFrame, RenderNode, SurfaceEvent};
use super::layout::groups::GroupTable;
use super::layout::{self, Layout, LayoutConfig, LayoutMode, Point, Viewport};
use super::lookup::{self, LookupResult, TagOption};
use super::ranking::{RankingConfig, Rankings};
use super::search::{SearchConfig, SearchIndex, SearchOutcome};
use super::selection::VisualStates;
use super::store::GraphStore;
use super::types::{GraphDocument, Node, NodeIdx, NodeType};

/// Tunables for every engine in the context.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EngineConfig {
	/// Cluster group table.
	pub groups: GroupTable,
	/// Layout tunables.
	pub layout: LayoutConfig,
	/// Search tunables.
	pub search: SearchConfig,
	/// Ranking tunables.
	pub ranking: RankingConfig,
}

/// Node and edge counts, total and currently visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphStats {
	/// Nodes in the store.
	pub total_nodes: usize,
	/// Edges in the store.
	pub total_edges: usize,
	/// Nodes passing the filter.
	pub visible_nodes: usize,
	/// Edges passing the filter.
	pub visible_edges: usize,
}

/// Owns the store and all derived session state.
#[derive(Clone, Debug)]
pub struct GraphContext {
	store: GraphStore,
	config: EngineConfig,
	filter: FilterConfig,
	visibility: Visibility,
	layout_mode: LayoutMode,
	layout: Layout,
	layout_revision: u64,
	viewport: Viewport,
	selected: Option<NodeIdx>,
	visual: VisualStates,
	focus_revision: u64,
	search_index: Option<SearchIndex>,
	rankings: Option<Rankings>,
}

impl GraphContext {
	/// Context over an already loaded store, laid out for `viewport`.
	pub fn new(store: GraphStore, viewport: Viewport, config: EngineConfig) -> Self {
		let visibility = Visibility::all(&store);
		let visual = VisualStates::compute(&store, &visibility, None);
		let layout_mode = LayoutMode::default();
		let layout = layout::apply_layout(&store, layout_mode, &config.groups, viewport, &config.layout);
		Self {
			store,
			config,
			filter: FilterConfig::show_all(),
			visibility,
			layout_mode,
			layout,
			layout_revision: 0,
			viewport,
			selected: None,
			visual,
			focus_revision: 0,
			search_index: None,
			rankings: None,
		}
	}

	/// Validate `document` and build a fresh context. A reload always goes
	/// through here, so no cache outlives the store it was built from.
	pub fn load(document: GraphDocument, viewport: Viewport, config: EngineConfig) -> Result<Self, GraphError> {
		let store = GraphStore::load(document)?;
		Ok(Self::new(store, viewport, config))
	}

	/// The underlying store.
	pub fn store(&self) -> &GraphStore {
		&self.store
	}

	/// Current filter configuration.
	pub fn filter_config(&self) -> &FilterConfig {
		&self.filter
	}

	/// Current visibility partition.
	pub fn visibility(&self) -> &Visibility {
		&self.visibility
	}

	/// Replace the filter configuration and recompute visibility.
	pub fn apply_filters(&mut self, config: FilterConfig) -> &Visibility {
		self.visibility = filter::apply_filters(&self.store, &config);
		self.filter = config;
		self.refresh_visual();
		&self.visibility
	}

	/// Apply a preset.
	pub fn apply_quick_filter(&mut self, preset: QuickFilter) -> &Visibility {
		debug!("kusuri-graph: quick filter {preset:?}");
		self.apply_filters(preset.config())
	}

	/// Active layout strategy.
	pub fn layout_mode(&self) -> LayoutMode {
		self.layout_mode
	}

	/// Current positions.
	pub fn layout(&self) -> &Layout {
		&self.layout
	}

	/// Bumped whenever positions are recomputed.
	pub fn layout_revision(&self) -> u64 {
		self.layout_revision
	}

	/// Re-run layout by name. Unknown names use the concentric layout.
	pub fn apply_layout(&mut self, name: &str) -> LayoutMode {
		let mode = LayoutMode::from_name(name);
		self.apply_layout_mode(mode);
		mode
	}

	/// Re-run layout with `mode`.
	pub fn apply_layout_mode(&mut self, mode: LayoutMode) {
		self.layout_mode = mode;
		self.relayout();
	}

	fn relayout(&mut self) {
		self.layout = layout::apply_layout(
			&self.store,
			self.layout_mode,
			&self.config.groups,
			self.viewport,
			&self.config.layout,
		);
		self.layout_revision += 1;
	}

	/// Current viewport.
	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	/// Record the surface size. Positions are recomputed only when the
	/// previous viewport could not be laid out.
	pub fn resize(&mut self, viewport: Viewport) {
		let was_degenerate = self.viewport.is_degenerate();
		self.viewport = viewport;
		if was_degenerate && !viewport.is_degenerate() {
			self.relayout();
		}
	}

	/// Search node names. Builds the index on first use.
	pub fn search(&mut self, query: &str) -> SearchOutcome {
		let index = self
			.search_index
			.get_or_insert_with(|| SearchIndex::build(&self.store, self.config.search.clone()));
		index.query(&self.store, query)
	}

	/// Rebuild the search index now.
	pub fn rebuild_search_index(&mut self) {
		self.search_index = Some(SearchIndex::build(&self.store, self.config.search.clone()));
	}

	/// All ranking views. Computed once, against the full graph.
	pub fn rankings(&mut self) -> &Rankings {
		let store = &self.store;
		let config = &self.config.ranking;
		self.rankings
			.get_or_insert_with(|| Rankings::compute(store, config))
	}

	/// Drop cached rankings; the next call recomputes them.
	pub fn invalidate_rankings(&mut self) {
		self.rankings = None;
	}

	/// Whether rankings are currently cached.
	pub fn rankings_cached(&self) -> bool {
		self.rankings.is_some()
	}

	/// Drugs connected to the selected tags.
	pub fn reverse_lookup<S: AsRef<str>>(&self, tag_type: NodeType, tag_ids: &[S]) -> LookupResult {
		lookup::reverse_lookup(&self.store, tag_type, tag_ids)
	}

	/// Pickable tags of `tag_type`.
	pub fn lookup_tags(&self, tag_type: NodeType, filter: &str) -> Vec<TagOption> {
		lookup::lookup_tags(&self.store, tag_type, filter)
	}

	/// Select a node. Unknown ids leave the selection unchanged.
	pub fn select(&mut self, id: &str) -> bool {
		let Some(idx) = self.store.idx(id) else {
			debug!("kusuri-graph: ignoring selection of unknown node `{id}`");
			return false;
		};
		self.selected = Some(idx);
		self.refresh_visual();
		true
	}

	/// Clear the selection.
	pub fn deselect(&mut self) {
		self.selected = None;
		self.refresh_visual();
	}

	/// Selected node.
	pub fn selected(&self) -> Option<&Node> {
		self.selected.map(|idx| self.store.node_at(idx))
	}

	/// Select a node and ask the surface to center on it.
	pub fn focus_node(&mut self, id: &str) -> bool {
		if !self.select(id) {
			return false;
		}
		self.focus_revision += 1;
		true
	}

	/// Bumped by every successful [`focus_node`](Self::focus_node).
	pub fn focus_revision(&self) -> u64 {
		self.focus_revision
	}

	/// Position of the selected node, for centering.
	pub fn focus_target(&self) -> Option<Point> {
		self.selected.map(|idx| self.layout.position(idx))
	}

	/// React to a surface event.
	pub fn handle_event(&mut self, event: SurfaceEvent) {
		match event {
			SurfaceEvent::NodeTapped(id) => {
				self.select(&id);
			}
			SurfaceEvent::BackgroundTapped => self.deselect(),
		}
	}

	/// Snapshot for the surface.
	pub fn frame(&self) -> RenderFrame {
		let max_degree = self
			.store
			.nodes()
			.map(|(idx, _)| self.store.incident(idx).len())
			.max()
			.unwrap_or(0)
			.max(1);
		let nodes = self
			.store
			.nodes()
			.map(|(idx, node)| {
				let position = self.layout.position(idx);
				RenderNode {
					id: node.id.clone(),
					node_type: node.node_type(),
					label: node.display_name().to_string(),
					x: position.x,
					y: position.y,
					weight: (self.store.incident(idx).len() as f64 / max_degree as f64).sqrt(),
					visible: self.visibility.node(idx),
					state: self.visual.node(idx),
				}
			})
			.collect();
		let edges = self
			.store
			.edges()
			.map(|(idx, edge)| {
				let (source, target) = self.store.endpoint_ids(edge);
				RenderEdge {
					source: source.to_string(),
					target: target.to_string(),
					from: edge.source.0,
					to: edge.target.0,
					edge_type: edge.edge_type,
					visible: self.visibility.edge(idx),
					state: self.visual.edge(idx),
				}
			})
			.collect();
		RenderFrame { nodes, edges }
	}

	/// Total and visible counts.
	pub fn stats(&self) -> GraphStats {
		GraphStats {
			total_nodes: self.store.node_count(),
			total_edges: self.store.edge_count(),
			visible_nodes: self.visibility.visible_nodes(),
			visible_edges: self.visibility.visible_edges(),
		}
	}

	/// Detail of the selected node.
	pub fn selected_detail(&self) -> Option<NodeDetail> {
		self.selected()
			.and_then(|node| node_detail(&self.store, &node.id))
	}

	fn refresh_visual(&mut self) {
		self.visual = VisualStates::compute(&self.store, &self.visibility, self.selected);
	}
}

/// Session load state.
#[derive(Clone, Debug, Default)]
pub enum LoadState {
	/// Nothing loaded yet.
	#[default]
	NotLoaded,
	/// The last load failed; a new load may be attempted.
	Failed(String),
	/// A graph is loaded.
	Loaded(Box<GraphContext>),
}

impl LoadState {
	/// State after a load attempt. Failures are logged and kept as a message.
	pub fn from_result(result: Result<GraphContext, GraphError>) -> Self {
		match result {
			Ok(context) => {
				let stats = context.stats();
				info!(
					"kusuri-graph: session ready ({} nodes, {} edges)",
					stats.total_nodes, stats.total_edges
				);
				LoadState::Loaded(Box::new(context))
			}
			Err(err) => {
				error!("kusuri-graph: load failed: {err}");
				LoadState::Failed(err.to_string())
			}
		}
	}

	/// Loaded context.
	pub fn context(&self) -> Option<&GraphContext> {
		match self {
			LoadState::Loaded(context) => Some(&**context),
			_ => None,
		}
	}

	/// Loaded context, mutably.
	pub fn context_mut(&mut self) -> Option<&mut GraphContext> {
		match self {
			LoadState::Loaded(context) => Some(&mut **context),
			_ => None,
		}
	}

	/// Whether a graph is loaded.
	pub fn is_loaded(&self) -> bool {
		matches!(self, LoadState::Loaded(_))
	}

	/// Failure message of the last load.
	pub fn error(&self) -> Option<&str> {
		match self {
			LoadState::Failed(message) => Some(message),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::lookup::LookupMatch;
	use crate::graph::ranking::RankingKind;
	use crate::graph::selection::VisualState;
	use crate::graph::store::fixtures::scenario;
	use crate::graph::types::EdgeType;

	fn context() -> GraphContext {
		GraphContext::new(scenario(), Viewport::new(1024.0, 768.0), EngineConfig::default())
	}

	#[test]
	fn end_to_end_scenario() {
		let mut ctx = context();

		ctx.apply_filters(FilterConfig::default().with_edge(EdgeType::Contraindication, false));
		let frame = ctx.frame();
		assert!(frame.nodes.iter().all(|n| n.visible));
		let ci = frame
			.edges
			.iter()
			.find(|e| e.edge_type == EdgeType::Contraindication)
			.unwrap();
		assert!(!ci.visible);

		let ranked: Vec<(&str, usize)> = ctx
			.rankings()
			.view(RankingKind::Contraindications)
			.iter()
			.map(|e| (e.id.as_str(), e.count))
			.collect();
		assert_eq!(ranked, vec![("D1", 1), ("D2", 1)]);

		match ctx.reverse_lookup(NodeType::AdverseEffect, &["E1"]) {
			LookupResult::Single(list) => {
				let ids: Vec<&str> = list.iter().map(|m: &LookupMatch| m.drug_id.as_str()).collect();
				assert_eq!(ids, vec!["D1"]);
			}
			other => panic!("expected single list, got {other:?}"),
		}
	}

	#[test]
	fn caches_are_lazy_and_explicitly_invalidated() {
		let mut ctx = context();
		assert!(!ctx.rankings_cached());
		let first = ctx.rankings().clone();
		assert!(ctx.rankings_cached());

		// Rankings ignore filters.
		ctx.apply_quick_filter(QuickFilter::ContraindicationsOnly);
		assert_eq!(ctx.rankings(), &first);

		ctx.invalidate_rankings();
		assert!(!ctx.rankings_cached());
		assert_eq!(ctx.rankings(), &first);
	}

	#[test]
	fn search_builds_index_on_demand() {
		let mut ctx = context();
		assert_eq!(ctx.search("drug two").hits()[0].id, "D2");
		ctx.rebuild_search_index();
		assert_eq!(ctx.search(""), SearchOutcome::Inactive);
	}

	#[test]
	fn surface_events_drive_selection() {
		let mut ctx = context();
		ctx.handle_event(SurfaceEvent::NodeTapped("D2".into()));
		assert_eq!(ctx.selected().map(|n| n.id.as_str()), Some("D2"));
		let frame = ctx.frame();
		assert_eq!(frame.nodes[1].state, VisualState::Highlighted);
		assert_eq!(frame.nodes[0].state, VisualState::Neighbor);
		assert_eq!(frame.nodes[2].state, VisualState::Faded);

		ctx.handle_event(SurfaceEvent::NodeTapped("ghost".into()));
		assert_eq!(ctx.selected().map(|n| n.id.as_str()), Some("D2"));

		ctx.handle_event(SurfaceEvent::BackgroundTapped);
		assert!(ctx.selected().is_none());
		assert!(ctx.frame().nodes.iter().all(|n| n.state == VisualState::Normal));
	}

	#[test]
	fn focus_selects_and_bumps_revision() {
		let mut ctx = context();
		assert!(ctx.focus_node("C1"));
		assert_eq!(ctx.focus_revision(), 1);
		assert_eq!(ctx.focus_target(), Some(ctx.layout().position(NodeIdx(2))));
		assert!(!ctx.focus_node("ghost"));
		assert_eq!(ctx.focus_revision(), 1);
		assert_eq!(ctx.selected_detail().map(|d| d.id), Some("C1".to_string()));
	}

	#[test]
	fn layout_switch_and_first_resize_relayout() {
		let mut ctx = GraphContext::new(scenario(), Viewport::new(0.0, 0.0), EngineConfig::default());
		assert_eq!(ctx.layout_revision(), 0);
		ctx.resize(Viewport::new(800.0, 600.0));
		assert_eq!(ctx.layout_revision(), 1);
		ctx.resize(Viewport::new(900.0, 600.0));
		assert_eq!(ctx.layout_revision(), 1);

		assert_eq!(ctx.apply_layout("grid"), LayoutMode::Concentric);
		assert_eq!(ctx.layout_mode(), LayoutMode::Concentric);
		assert_eq!(ctx.layout_revision(), 2);
	}

	#[test]
	fn stats_follow_filters() {
		let mut ctx = context();
		ctx.apply_quick_filter(QuickFilter::ContraindicationsOnly);
		assert_eq!(
			ctx.stats(),
			GraphStats {
				total_nodes: 4,
				total_edges: 3,
				visible_nodes: 2,
				visible_edges: 1,
			}
		);
	}

	#[test]
	fn failed_load_is_recoverable() {
		let document: GraphDocument = serde_json::from_value(serde_json::json!({
			"nodes": [{ "id": "a", "type": "drug" }],
			"edges": [{ "source": "a", "target": "b", "type": "precaution" }]
		}))
		.unwrap();
		let state = LoadState::from_result(GraphContext::load(
			document,
			Viewport::new(800.0, 600.0),
			EngineConfig::default(),
		));
		assert!(!state.is_loaded());
		assert!(state.error().is_some_and(|m| m.contains("`b`")));
	}
}
