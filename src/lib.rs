//! kusuri-graph: interactive knowledge graph explorer for prescription drugs.
//!
//! Drugs, therapeutic categories, adverse effects and CYP enzymes are loaded
//! into an in-memory graph engine ([`graph`]) and explored through a canvas
//! surface plus sidebar panels ([`components`]). The engine is plain Rust and
//! runs natively; only loading, translation and the UI need a browser.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::*;
use log::{Level, info};

pub mod components;
pub mod graph;
pub mod loader;

use components::graph_canvas::GraphCanvas;
use components::panels::{
	DetailPanel, FilterPanel, LayoutPanel, LookupPanel, RankingPanel, SearchPanel, Session, SharedTranslator,
	StatsPanel, read_context, update_context,
};
use graph::{
	CachedTranslator, EngineConfig, GraphContext, LoadState, MyMemoryTranslator, SurfaceEvent, Viewport,
};
use loader::{LoaderConfig, load_document};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("kusuri-graph: logging initialized");
}

/// Load the graph document and replace the session with the result.
fn reload(session: Session, viewport: RwSignal<Viewport>) {
	spawn_local(async move {
		let result = load_document(&LoaderConfig::default())
			.await
			.and_then(|document| GraphContext::load(document, viewport.get_untracked(), EngineConfig::default()));
		session.set(LoadState::from_result(result));
	});
}

/// Main application component.
/// Loads the graph document and renders the canvas with its sidebar panels.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let session: Session = RwSignal::new(LoadState::NotLoaded);
	let viewport = RwSignal::new(Viewport::default());
	let translator: StoredValue<SharedTranslator, LocalStorage> =
		StoredValue::new_local(Rc::new(CachedTranslator::new(MyMemoryTranslator::default())));
	reload(session, viewport);

	let frame = Signal::derive(move || read_context(session, GraphContext::frame).unwrap_or_default());
	let layout_revision = Signal::derive(move || read_context(session, GraphContext::layout_revision).unwrap_or(0));
	let focus = Signal::derive(move || {
		read_context(session, |ctx| (ctx.focus_revision(), ctx.focus_target())).unwrap_or((0, None))
	});

	let on_event = Callback::new(move |event: SurfaceEvent| {
		update_context(session, |ctx| ctx.handle_event(event));
	});
	let on_resize = Callback::new(move |next: Viewport| {
		viewport.set(next);
		update_context(session, |ctx| ctx.resize(next));
	});

	let status = move || {
		session.with(|state| match state {
			LoadState::NotLoaded => Some(view! { <div class="load-status">"読み込み中…"</div> }.into_any()),
			LoadState::Failed(message) => Some(
				view! {
					<div class="load-status error">
						<p>{format!("データの読み込みに失敗しました: {message}")}</p>
						<button on:click=move |_| {
							session.set(LoadState::NotLoaded);
							reload(session, viewport);
						}>"再読み込み"</button>
					</div>
				}
				.into_any(),
			),
			LoadState::Loaded(_) => None,
		})
	};

	view! {
		<Html attr:lang="ja" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="くすりグラフ" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<GraphCanvas
				frame=frame
				layout_revision=layout_revision
				focus=focus
				on_event=on_event
				on_resize=on_resize
				fullscreen=true
			/>
			{status}
			<aside class="graph-overlay sidebar">
				<h1>"くすりグラフ"</h1>
				<StatsPanel session=session />
				<SearchPanel session=session />
				<FilterPanel session=session />
				<LayoutPanel session=session />
				<RankingPanel session=session />
				<LookupPanel session=session />
			</aside>
			<DetailPanel session=session translator=translator />
		</div>
	}
}
