use leptos::prelude::*;

use crate::graph::{LookupMatch, LookupResult, NodeType};

use super::{Session, focus, read_context};

const TAG_TYPES: [NodeType; 3] = [NodeType::AdverseEffect, NodeType::Cyp, NodeType::Category];

fn title(tag_type: NodeType) -> &'static str {
	match tag_type {
		NodeType::AdverseEffect => "関連する薬を探す",
		NodeType::Cyp => "代謝される薬を探す",
		_ => "所属する薬を探す",
	}
}

fn match_rows(session: Session, matches: Vec<LookupMatch>) -> impl IntoView {
	matches
		.into_iter()
		.map(|m| {
			let LookupMatch { drug_id, name, matched } = m;
			view! {
				<li class="lookup-row" on:click=move |_| focus(session, &drug_id)>
					<span class="lookup-name">{name}</span>
					<span class="lookup-tags">{matched.join("・")}</span>
				</li>
			}
		})
		.collect_view()
}

/// Reverse lookup: pick tags of one type, list the drugs connected to them.
#[component]
pub fn LookupPanel(session: Session) -> impl IntoView {
	let tag_type = RwSignal::new(NodeType::AdverseEffect);
	let filter = RwSignal::new(String::new());
	let picked = RwSignal::new(Vec::<String>::new());

	let switch_type = move |next: NodeType| {
		tag_type.set(next);
		filter.set(String::new());
		picked.set(Vec::new());
	};
	let toggle = move |id: String| {
		picked.update(|ids| match ids.iter().position(|t| *t == id) {
			Some(pos) => {
				ids.remove(pos);
			}
			None => ids.push(id),
		});
	};

	let type_buttons = TAG_TYPES
		.into_iter()
		.map(|t| {
			view! {
				<button
					class="lookup-type"
					class:active=move || tag_type.get() == t
					on:click=move |_| switch_type(t)
				>
					{t.label()}
				</button>
			}
		})
		.collect_view();

	let tags = move || {
		let (t, text) = (tag_type.get(), filter.get());
		read_context(session, |ctx| ctx.lookup_tags(t, &text))
			.unwrap_or_default()
			.into_iter()
			.map(|tag| {
				let (id, toggle_id) = (tag.id.clone(), tag.id);
				view! {
					<li
						class="lookup-tag"
						class:picked=move || picked.with(|ids| ids.contains(&id))
						on:click=move |_| toggle(toggle_id.clone())
					>
						{tag.name}
					</li>
				}
			})
			.collect_view()
	};

	let results = move || {
		let t = tag_type.get();
		let ids = picked.get();
		if ids.is_empty() {
			return view! { <p class="lookup-hint">"タグを選択してください"</p> }.into_any();
		}
		match read_context(session, |ctx| ctx.reverse_lookup(t, ids.as_slice())).unwrap_or(LookupResult::Empty) {
			LookupResult::Empty => view! { <p class="lookup-hint">"該当する薬はありません"</p> }.into_any(),
			LookupResult::Single(matches) => view! {
				<p class="lookup-count">{format!("{}件", matches.len())}</p>
				<ul class="lookup-results">{match_rows(session, matches)}</ul>
			}
			.into_any(),
			LookupResult::Partitioned { all, some } => view! {
				<h3>{format!("すべて該当 ({}件)", all.len())}</h3>
				<ul class="lookup-results">{match_rows(session, all)}</ul>
				<h3>{format!("一部該当 ({}件)", some.len())}</h3>
				<ul class="lookup-results">{match_rows(session, some)}</ul>
			}
			.into_any(),
		}
	};

	view! {
		<section class="panel lookup-panel">
			<h2>{move || title(tag_type.get())}</h2>
			<div class="lookup-types">{type_buttons}</div>
			<input
				type="search"
				placeholder="絞り込み"
				prop:value=move || filter.get()
				on:input=move |ev| filter.set(event_target_value(&ev))
			/>
			<ul class="lookup-tags">{tags}</ul>
			<button class="lookup-clear" on:click=move |_| picked.set(Vec::new())>
				"選択解除"
			</button>
			<div class="lookup-output">{results}</div>
		</section>
	}
}
