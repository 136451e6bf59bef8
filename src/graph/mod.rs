//! In-memory drug knowledge graph engine.
//!
//! The graph is loaded once into an immutable [`GraphStore`]; everything
//! else (visibility, positions, selection, search, rankings) is derived from
//! it and owned by a [`GraphContext`]. All operations are synchronous. Only
//! document loading and translation cross an async boundary.
//!
//! # Example
//!
//! ```ignore
//! use kusuri_graph::graph::{EngineConfig, GraphContext, GraphDocument, QuickFilter, Viewport};
//!
//! let document = GraphDocument::from_json(text)?;
//! let mut ctx = GraphContext::load(document, Viewport::new(1280.0, 800.0), EngineConfig::default())?;
//! ctx.apply_quick_filter(QuickFilter::ContraindicationsOnly);
//! let frame = ctx.frame();
//! ```

mod context;
pub mod detail;
mod error;
pub mod filter;
mod frame;
pub mod layout;
pub mod lookup;
pub mod ranking;
pub mod search;
pub mod selection;
mod store;
pub mod translate;
mod types;

pub use context::{EngineConfig, GraphContext, GraphStats, LoadState};
pub use detail::{DetailBody, DrugDetail, Interaction, NodeDetail, NodeLink, ReferenceInfo, node_detail};
pub use error::{GraphError, ValidationError};
pub use filter::{FilterConfig, QuickFilter, Visibility, apply_filters};
pub use frame::{RenderEdge, RenderFrame, RenderNode, SurfaceEvent};
pub use layout::groups::{Group, GroupTable};
pub use layout::{Layout, LayoutConfig, LayoutMode, Point, Viewport, apply_layout};
pub use lookup::{LookupMatch, LookupResult, TagOption, lookup_tags, reverse_lookup};
pub use ranking::{RankEntry, RankingConfig, RankingKind, Rankings};
pub use search::{SearchConfig, SearchHit, SearchIndex, SearchOutcome};
pub use selection::{VisualState, VisualStates};
pub use store::{Connections, GraphStore, NodesOfType};
pub use translate::{CachedTranslator, MyMemoryTranslator, TranslationCache, Translator};
pub use types::{
	AdverseEffectEntry, DrugProfile, Edge, EdgeIdx, EdgeType, Frequency, GraphDocument, Node, NodeIdx,
	NodeKind, NodeType, RawEdge, RawNode, Severity,
};
