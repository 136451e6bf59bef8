//! Graph document loading: inline script element first, HTTP fetch second.

use log::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlScriptElement, Request, RequestInit, RequestMode, Response};

use crate::graph::{GraphDocument, GraphError};

/// Where the graph document comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoaderConfig {
	/// Id of a `<script type="application/json">` element holding the document.
	pub script_id: String,
	/// URL fetched when the script element is absent.
	pub document_url: String,
}

impl Default for LoaderConfig {
	fn default() -> Self {
		Self {
			script_id: "graph-data".into(),
			document_url: "data/graph/graph-light.json".into(),
		}
	}
}

/// Document text embedded in the page, if any.
fn inline_document_text(script_id: &str) -> Option<String> {
	let document = web_sys::window()?.document()?;
	let element = document.get_element_by_id(script_id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok().filter(|text| !text.trim().is_empty())
}

/// GET `url` and return the body as text.
pub async fn fetch_text(url: &str) -> Result<String, GraphError> {
	let fail = |reason: String| GraphError::Fetch {
		url: url.to_string(),
		reason,
	};

	let opts = RequestInit::new();
	opts.set_method("GET");
	opts.set_mode(RequestMode::Cors);
	let request =
		Request::new_with_str_and_init(url, &opts).map_err(|e| fail(format!("request error: {e:?}")))?;

	let window = web_sys::window().ok_or_else(|| fail("no window".into()))?;
	let response: Response = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(|e| fail(format!("fetch error: {e:?}")))?
		.dyn_into()
		.map_err(|_| fail("response is not a Response".into()))?;

	if !response.ok() {
		return Err(fail(format!("HTTP {}", response.status())));
	}

	let body = response
		.text()
		.map_err(|e| fail(format!("body promise error: {e:?}")))?;
	let text = JsFuture::from(body)
		.await
		.map_err(|e| fail(format!("body error: {e:?}")))?;
	text.as_string()
		.ok_or_else(|| fail("body is not text".into()))
}

/// Load the graph document from the page, or fetch it when not embedded.
pub async fn load_document(config: &LoaderConfig) -> Result<GraphDocument, GraphError> {
	let text = match inline_document_text(&config.script_id) {
		Some(text) => {
			info!("kusuri-graph: using inline document #{}", config.script_id);
			text
		}
		None => {
			info!("kusuri-graph: fetching {}", config.document_url);
			fetch_text(&config.document_url).await?
		}
	};
	GraphDocument::from_json(&text).inspect_err(|e| warn!("kusuri-graph: {e}"))
}
