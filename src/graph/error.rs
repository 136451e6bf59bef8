//! Error types for the graph engine.

use thiserror::Error;

/// Structural problems in a graph document. Fatal to loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
	/// Two nodes share an id.
	#[error("duplicate node id `{0}`")]
	DuplicateNode(String),
	/// An edge endpoint does not name a loaded node.
	#[error("edge #{edge} references unknown node `{id}`")]
	DanglingEdge {
		/// Position of the edge in the document.
		edge: usize,
		/// The unresolved node id.
		id: String,
	},
}

/// Errors surfaced by the engine and its loading/translation boundary.
#[derive(Debug, Error)]
pub enum GraphError {
	/// Malformed graph document.
	#[error("invalid graph document: {0}")]
	Validation(#[from] ValidationError),
	/// Query against an unknown node id.
	#[error("node `{0}` not found")]
	NotFound(String),
	/// Document text is not valid graph JSON.
	#[error("failed to parse graph document: {0}")]
	Parse(#[from] serde_json::Error),
	/// Network failure while fetching a document.
	#[error("failed to fetch `{url}`: {reason}")]
	Fetch {
		/// Requested URL.
		url: String,
		/// Failure description.
		reason: String,
	},
	/// Translation collaborator failure. Recoverable; callers may retry.
	#[error("translation lookup failed: {0}")]
	LookupFailure(String),
}
