//! Sidebar panels around the graph canvas.
//!
//! Every panel reads and mutates the shared [`Session`]. Mutations that change
//! what the canvas draws go through [`update_context`]; lazy cache fills
//! (search index, rankings) go through [`peek_context`] so they do not trigger
//! a redraw.

mod detail;
mod filters;
mod lookup;
mod ranking;
mod search;

use leptos::prelude::*;

use crate::graph::{GraphContext, LoadState};

pub use detail::{DetailPanel, SharedTranslator};
pub use filters::{FilterPanel, LayoutPanel, StatsPanel};
pub use lookup::LookupPanel;
pub use ranking::RankingPanel;
pub use search::SearchPanel;

/// Reactive handle to the loaded graph session.
pub type Session = RwSignal<LoadState>;

/// Mutate the loaded context and notify subscribers. `None` when nothing is loaded.
pub fn update_context<R>(session: Session, f: impl FnOnce(&mut GraphContext) -> R) -> Option<R> {
	let mut out = None;
	session.update(|state| out = state.context_mut().map(f));
	out
}

/// Mutate the loaded context without notifying subscribers.
pub fn peek_context<R>(session: Session, f: impl FnOnce(&mut GraphContext) -> R) -> Option<R> {
	let mut out = None;
	session.update_untracked(|state| out = state.context_mut().map(f));
	out
}

/// Read the loaded context, tracking the session.
pub fn read_context<R>(session: Session, f: impl FnOnce(&GraphContext) -> R) -> Option<R> {
	session.with(|state| state.context().map(f))
}

/// Select a node and center the canvas on it.
pub fn focus(session: Session, id: &str) {
	if update_context(session, |ctx| ctx.focus_node(id)) == Some(false) {
		log::debug!("kusuri-graph: no node `{id}` to focus");
	}
}
