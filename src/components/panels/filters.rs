use leptos::prelude::*;

use crate::graph::{EdgeType, FilterConfig, LayoutMode, NodeType, QuickFilter};

use super::{Session, read_context, update_context};

const QUICK_FILTERS: [QuickFilter; 3] = [
	QuickFilter::ContraindicationsOnly,
	QuickFilter::DrugInteractions,
	QuickFilter::Reset,
];

/// Type checkboxes, orphan hiding and quick filter presets.
#[component]
pub fn FilterPanel(session: Session) -> impl IntoView {
	let current = move || read_context(session, |ctx| ctx.filter_config().clone()).unwrap_or_default();
	let apply = move |edit: &dyn Fn(FilterConfig) -> FilterConfig| {
		let next = edit(current());
		update_context(session, |ctx| {
			ctx.apply_filters(next);
		});
	};

	let node_toggles = NodeType::ALL
		.into_iter()
		.map(|node_type| {
			view! {
				<label class=format!("filter-toggle type-{node_type}")>
					<input
						type="checkbox"
						prop:checked=move || current().node_type_visible(node_type)
						on:change=move |ev| {
							let on = event_target_checked(&ev);
							apply(&|config| config.with_node(node_type, on));
						}
					/>
					{node_type.label()}
				</label>
			}
		})
		.collect_view();

	let edge_toggles = EdgeType::ALL
		.into_iter()
		.map(|edge_type| {
			view! {
				<label class=format!("filter-toggle edge-{edge_type}")>
					<input
						type="checkbox"
						prop:checked=move || current().edge_type_visible(edge_type)
						on:change=move |ev| {
							let on = event_target_checked(&ev);
							apply(&|config| config.with_edge(edge_type, on));
						}
					/>
					{edge_type.label()}
				</label>
			}
		})
		.collect_view();

	let presets = QUICK_FILTERS
		.into_iter()
		.map(|preset| {
			view! {
				<button
					class="quick-filter"
					on:click=move |_| {
						update_context(session, |ctx| {
							ctx.apply_quick_filter(preset);
						});
					}
				>
					{preset.label()}
				</button>
			}
		})
		.collect_view();

	view! {
		<section class="panel filter-panel">
			<h2>"フィルター"</h2>
			<div class="quick-filters">{presets}</div>
			<div class="filter-group">{node_toggles}</div>
			<div class="filter-group">{edge_toggles}</div>
			<label class="filter-toggle">
				<input
					type="checkbox"
					prop:checked=move || current().hide_orphans
					on:change=move |ev| {
						let on = event_target_checked(&ev);
						apply(&|config| config.with_hide_orphans(on));
					}
				/>
				"孤立ノードを隠す"
			</label>
		</section>
	}
}

/// Layout strategy picker.
#[component]
pub fn LayoutPanel(session: Session) -> impl IntoView {
	let mode = move || read_context(session, |ctx| ctx.layout_mode()).unwrap_or_default();
	let options = LayoutMode::ALL
		.into_iter()
		.map(|m| view! { <option value=m.as_str()>{m.label()}</option> })
		.collect_view();

	view! {
		<section class="panel layout-panel">
			<h2>"レイアウト"</h2>
			<select
				prop:value=move || mode().as_str()
				on:change=move |ev| {
					let name = event_target_value(&ev);
					update_context(session, |ctx| ctx.apply_layout(&name));
				}
			>
				{options}
			</select>
		</section>
	}
}

/// Visible and total node/edge counts.
#[component]
pub fn StatsPanel(session: Session) -> impl IntoView {
	let stats = move || read_context(session, |ctx| ctx.stats()).unwrap_or_default();
	view! {
		<p class="stats">
			{move || {
				let s = stats();
				format!(
					"ノード {} / {} ・ エッジ {} / {}",
					s.visible_nodes,
					s.total_nodes,
					s.visible_edges,
					s.total_edges,
				)
			}}
		</p>
	}
}
