use leptos::prelude::*;

use crate::graph::SearchOutcome;

use super::{Session, focus, peek_context};

/// Name search box with a clickable result list.
#[component]
pub fn SearchPanel(session: Session) -> impl IntoView {
	let query = RwSignal::new(String::new());
	let outcome = RwSignal::new(SearchOutcome::Inactive);

	let on_input = move |ev| {
		let text = event_target_value(&ev);
		let found = peek_context(session, |ctx| ctx.search(&text)).unwrap_or(SearchOutcome::Inactive);
		query.set(text);
		outcome.set(found);
	};

	let results = move || {
		outcome.with(|current| match current {
			SearchOutcome::Inactive => ().into_any(),
			SearchOutcome::Matches(hits) if hits.is_empty() => {
				view! { <p class="search-empty">"該当なし"</p> }.into_any()
			}
			SearchOutcome::Matches(hits) => hits
				.iter()
				.map(|hit| {
					let id = hit.id.clone();
					let subtitle = (!hit.name_en.is_empty() && hit.name_en != hit.name).then(|| hit.name_en.clone());
					view! {
						<li
							class="search-result"
							on:click=move |_| {
								focus(session, &id);
								query.set(String::new());
								outcome.set(SearchOutcome::Inactive);
							}
						>
							<span class=format!("type-badge type-{}", hit.node_type)>{hit.node_type.label()}</span>
							<span class="search-name">{hit.name.clone()}</span>
							{subtitle.map(|en| view! { <span class="search-sub">{en}</span> })}
						</li>
					}
				})
				.collect_view()
				.into_any(),
		})
	};

	view! {
		<section class="panel search-panel">
			<input
				type="search"
				placeholder="薬・副作用・CYP酵素を検索"
				prop:value=move || query.get()
				on:input=on_input
			/>
			<ul class="search-results">{results}</ul>
		</section>
	}
}
