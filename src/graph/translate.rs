//! English → Japanese translation for drug names and efficacy text.
//!
//! Translation is an optional collaborator: failures surface as
//! [`GraphError::LookupFailure`] and never touch graph state. Successful
//! results are cached per exact input for the session.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;

use log::{debug, warn};
use serde::Deserialize;

use super::error::GraphError;
use crate::loader::fetch_text;

/// Something that turns English text into Japanese.
pub trait Translator {
	/// Translate `text`. Errors are recoverable; callers may retry.
	fn translate(&self, text: &str) -> impl Future<Output = Result<String, GraphError>>;
}

/// Successful translations keyed by exact input.
#[derive(Clone, Debug, Default)]
pub struct TranslationCache {
	entries: HashMap<String, String>,
}

impl TranslationCache {
	/// Cached translation of `text`.
	pub fn get(&self, text: &str) -> Option<&str> {
		self.entries.get(text).map(String::as_str)
	}

	/// Remember a translation.
	pub fn insert(&mut self, text: impl Into<String>, translated: impl Into<String>) {
		self.entries.insert(text.into(), translated.into());
	}

	/// Number of cached entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether nothing is cached.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Wraps a translator with a session cache. Failures are not cached.
#[derive(Debug, Default)]
pub struct CachedTranslator<T> {
	inner: T,
	cache: RefCell<TranslationCache>,
}

impl<T: Translator> CachedTranslator<T> {
	/// Cache in front of `inner`.
	pub fn new(inner: T) -> Self {
		Self {
			inner,
			cache: RefCell::new(TranslationCache::default()),
		}
	}

	/// Number of cached translations.
	pub fn cached(&self) -> usize {
		self.cache.borrow().len()
	}
}

impl<T: Translator> Translator for CachedTranslator<T> {
	async fn translate(&self, text: &str) -> Result<String, GraphError> {
		if let Some(hit) = self.cache.borrow().get(text) {
			debug!("kusuri-graph: translation cache hit");
			return Ok(hit.to_string());
		}
		let translated = self.inner.translate(text).await?;
		self.cache.borrow_mut().insert(text, translated.as_str());
		Ok(translated)
	}
}

/// Client for the public MyMemory translation API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MyMemoryTranslator {
	/// Endpoint URL, without query.
	pub endpoint: String,
	/// Language pair, e.g. `en|ja`.
	pub langpair: String,
}

impl Default for MyMemoryTranslator {
	fn default() -> Self {
		Self {
			endpoint: "https://api.mymemory.translated.net/get".into(),
			langpair: "en|ja".into(),
		}
	}
}

impl MyMemoryTranslator {
	fn request_url(&self, text: &str) -> String {
		let query = String::from(js_sys::encode_uri_component(text));
		format!("{}?q={}&langpair={}", self.endpoint, query, self.langpair)
	}
}

impl Translator for MyMemoryTranslator {
	async fn translate(&self, text: &str) -> Result<String, GraphError> {
		let body = fetch_text(&self.request_url(text))
			.await
			.map_err(|e| GraphError::LookupFailure(e.to_string()))
			.inspect_err(|e| warn!("kusuri-graph: {e}"))?;
		parse_translation(text, &body).inspect_err(|e| warn!("kusuri-graph: {e}"))
	}
}

#[derive(Deserialize)]
struct MyMemoryResponse {
	#[serde(rename = "responseData")]
	response_data: Option<MyMemoryData>,
}

#[derive(Deserialize)]
struct MyMemoryData {
	#[serde(rename = "translatedText")]
	translated_text: Option<String>,
}

/// Extract the translation from a MyMemory response body. An empty result or
/// one identical to `original` counts as a failure.
pub fn parse_translation(original: &str, body: &str) -> Result<String, GraphError> {
	let response: MyMemoryResponse =
		serde_json::from_str(body).map_err(|e| GraphError::LookupFailure(e.to_string()))?;
	response
		.response_data
		.and_then(|data| data.translated_text)
		.filter(|text| !text.is_empty() && text != original)
		.ok_or_else(|| GraphError::LookupFailure(format!("no translation for `{original}`")))
}
