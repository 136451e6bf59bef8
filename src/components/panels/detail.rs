use std::collections::HashMap;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::debug;

use crate::graph::{
	CachedTranslator, DetailBody, DrugDetail, Frequency, MyMemoryTranslator, NodeDetail, NodeLink, NodeType,
	Translator,
};

use super::{Session, focus, read_context, update_context};

/// Translator shared by every translate button in the session.
pub type SharedTranslator = Rc<CachedTranslator<MyMemoryTranslator>>;

#[derive(Clone, Debug, PartialEq)]
enum Translation {
	Pending,
	Done(String),
	Failed,
}

fn frequency_class(frequency: Frequency) -> &'static str {
	match frequency {
		Frequency::High => "freq-high",
		Frequency::Medium => "freq-medium",
		Frequency::Low => "freq-low",
		Frequency::Rare => "freq-rare",
		Frequency::Unknown => "freq-unknown",
	}
}

fn link_items(session: Session, links: Vec<NodeLink>) -> impl IntoView {
	links
		.into_iter()
		.map(|NodeLink { id, name }| {
			view! {
				<li>
					<a class="detail-link" href="#" on:click=move |ev| {
						ev.prevent_default();
						focus(session, &id);
					}>{name}</a>
				</li>
			}
		})
		.collect_view()
}

fn drug_links_section(session: Session, heading: &str, drugs: Vec<NodeLink>) -> impl IntoView {
	view! {
		<div class="detail-section">
			<h4>{format!("{heading}（{}件）", drugs.len())}</h4>
			<ul>{link_items(session, drugs)}</ul>
		</div>
	}
}

/// Detail of the selected node, with translation for English-only text.
#[component]
pub fn DetailPanel(session: Session, translator: StoredValue<SharedTranslator, LocalStorage>) -> impl IntoView {
	let translations = RwSignal::new(HashMap::<String, Translation>::new());
	let detail = Memo::new(move |_| read_context(session, |ctx| ctx.selected_detail()).flatten());

	let translate = move |text: String| {
		translations.update(|t| {
			t.insert(text.clone(), Translation::Pending);
		});
		let translator = translator.get_value();
		spawn_local(async move {
			let status = match translator.translate(&text).await {
				Ok(translated) => Translation::Done(translated),
				Err(err) => {
					debug!("kusuri-graph: keeping `{text}` untranslated: {err}");
					Translation::Failed
				}
			};
			translations.update(|t| {
				t.insert(text, status);
			});
		});
	};

	let translation = move |text: String, prompt: &'static str| {
		move || {
			let status = translations.with(|t| t.get(&text).cloned());
			let retry = text.clone();
			match status {
				None => view! {
					<button class="translate-btn" on:click=move |_| translate(retry.clone())>{prompt}</button>
				}
				.into_any(),
				Some(Translation::Pending) => view! { <span class="translate-pending">"翻訳中…"</span> }.into_any(),
				Some(Translation::Done(translated)) => view! { <p class="translated">{translated}</p> }.into_any(),
				Some(Translation::Failed) => view! {
					<button class="translate-btn failed" on:click=move |_| translate(retry.clone())>
						"翻訳に失敗しました（再試行）"
					</button>
				}
				.into_any(),
			}
		}
	};

	let drug_body = move |d: DrugDetail| {
		let DrugDetail {
			efficacy,
			category,
			enzymes,
			interactions,
			contraindicated,
			precautions,
			adverse_effects,
			reference,
		} = d;

		let efficacy = efficacy.map(|text| {
			view! {
				<div class="detail-section">
					<h4>"効能・効果"</h4>
					<p class="efficacy-text">{text.clone()}</p>
					{translation(text, "🌐 日本語に翻訳")}
				</div>
			}
		});

		let category = category.map(|link| {
			view! {
				<div class="detail-section">
					<h4>"薬効分類"</h4>
					<ul>{link_items(session, vec![link])}</ul>
				</div>
			}
		});

		let enzymes = (!enzymes.is_empty()).then(|| {
			view! {
				<div class="detail-section">
					<h4>"代謝酵素（CYP）"</h4>
					<ul class="detail-tags cyp">{link_items(session, enzymes)}</ul>
				</div>
			}
		});

		let interactions = (!interactions.is_empty()).then(|| {
			let heading = if contraindicated > 0 {
				format!("飲み合わせ（禁忌 {contraindicated}件 / 注意 {precautions}件）")
			} else {
				format!("飲み合わせ（注意 {precautions}件）")
			};
			let rows = interactions
				.into_iter()
				.map(|item| {
					let id = item.partner.id;
					let (class, badge) = if item.contraindicated { ("CI", "禁忌") } else { ("P", "注意") };
					view! {
						<div class="detail-ddi-item">
							<span class=format!("detail-ddi-severity {class}")>{badge}</span>
							<a class="detail-link" href="#" on:click=move |ev| {
								ev.prevent_default();
								focus(session, &id);
							}>{item.partner.name}</a>
							{item.mechanism.map(|m| view! { <span class="detail-mechanism">{m}</span> })}
						</div>
					}
				})
				.collect_view();
			view! {
				<div class="detail-section">
					<h4>{heading}</h4>
					<div class="detail-ddi-list">{rows}</div>
				</div>
			}
		});

		let adverse = (!adverse_effects.is_empty()).then(|| {
			let count = adverse_effects.len();
			let rows = adverse_effects
				.into_iter()
				.map(|ae| {
					let badge = ae.frequency.label().map(|label| {
						view! { <span class=format!("detail-tag ae {}", frequency_class(ae.frequency))>{label}</span> }
					});
					let en = (!ae.name_en.is_empty()).then(|| view! { <span class="detail-en">{format!(" ({})", ae.name_en)}</span> });
					view! { <li>{badge}{ae.name}{en}</li> }
				})
				.collect_view();
			view! {
				<div class="detail-section">
					<h4>{format!("副作用（{count}件）")}</h4>
					<ul>{rows}</ul>
				</div>
			}
		});

		let reference = reference.map(|r| {
			view! {
				<div class="detail-section">
					<h4>"その他情報"</h4>
					<p class="detail-reference">
						{format!("DrugBank: {}", r.drugbank_id)}<br />
						{format!("ATC: {}", r.atc_code)}<br />
						{r.formula.map(|f| format!("分子式: {f}"))}
					</p>
				</div>
			}
		});

		view! { {efficacy}{category}{enzymes}{interactions}{adverse}{reference} }.into_any()
	};

	let render = move |d: NodeDetail| {
		let NodeDetail {
			node_type,
			name,
			name_en,
			has_japanese_name,
			body,
			..
		} = d;

		let header_sub = match &body {
			DetailBody::Category { code, .. } => Some(format!("薬効分類コード: {code}")),
			_ if has_japanese_name => Some(name_en.clone()),
			_ => None,
		};
		let name_translation = (!has_japanese_name && node_type == NodeType::Drug && !name_en.is_empty())
			.then(|| translation(name_en, "🌐 日本語名を取得"));

		let body = match body {
			DetailBody::Drug(drug) => drug_body(*drug),
			DetailBody::Category { drugs, .. } => drug_links_section(session, "この分類の薬", drugs).into_any(),
			DetailBody::AdverseEffect { drugs } => drug_links_section(session, "関連する薬", drugs).into_any(),
			DetailBody::Cyp { drugs } => view! {
				<p class="detail-note">
					"同じCYP酵素で代謝される薬同士は、飲み合わせで血中濃度が変動するリスクがあります。"
				</p>
				{drug_links_section(session, "この酵素で代謝される薬", drugs)}
			}
			.into_any(),
			DetailBody::Other => ().into_any(),
		};

		view! {
			<div class="detail-header">
				<div class="detail-name-ja">{name}</div>
				{header_sub.map(|sub| view! { <div class="detail-name-en">{sub}</div> })}
				{name_translation}
				<span class=format!("detail-type-badge type-{node_type}")>{node_type.label()}</span>
			</div>
			{body}
		}
	};

	view! {
		<aside class="detail-panel" class:hidden=move || detail.with(Option::is_none)>
			<button
				class="detail-close"
				title="閉じる"
				on:click=move |_| {
					update_context(session, |ctx| ctx.deselect());
				}
			>
				"×"
			</button>
			{move || detail.get().map(render)}
		</aside>
	}
}
