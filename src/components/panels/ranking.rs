use leptos::prelude::*;

use crate::graph::{RankEntry, RankingKind};

use super::{Session, focus, peek_context};

/// Tabbed top-N rankings. Computed on first open, then cached by the session.
#[component]
pub fn RankingPanel(session: Session) -> impl IntoView {
	let open = RwSignal::new(false);
	let active = RwSignal::new(RankingKind::Contraindications);

	let entries = move || -> Vec<RankEntry> {
		if !open.get() {
			return Vec::new();
		}
		let kind = active.get();
		session.track();
		peek_context(session, |ctx| ctx.rankings().view(kind).to_vec()).unwrap_or_default()
	};

	let tabs = RankingKind::ALL
		.into_iter()
		.map(|kind| {
			view! {
				<button
					class="ranking-tab"
					class:active=move || active.get() == kind
					on:click=move |_| active.set(kind)
				>
					{kind.label()}
				</button>
			}
		})
		.collect_view();

	let rows = move || {
		let unit = active.get().unit();
		entries()
			.into_iter()
			.enumerate()
			.map(|(rank, entry)| {
				let RankEntry { id, name, count } = entry;
				view! {
					<li class="ranking-row" on:click=move |_| focus(session, &id)>
						<span class="rank">{rank + 1}</span>
						<span class="ranking-name">{name}</span>
						<span class="ranking-count">{format!("{count}{unit}")}</span>
					</li>
				}
			})
			.collect_view()
	};

	view! {
		<section class="panel ranking-panel">
			<h2 class="collapsible" on:click=move |_| open.update(|o| *o = !*o)>
				"ランキング"
			</h2>
			<div class="ranking-body" class:hidden=move || !open.get()>
				<div class="ranking-tabs">{tabs}</div>
				<ol class="ranking-list">{rows}</ol>
			</div>
		</section>
	}
}
