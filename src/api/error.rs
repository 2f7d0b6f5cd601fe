use thiserror::Error;

/// Every way a graph request can end without a usable payload.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FetchError {
	#[error("no value selected in `{0}`")]
	EmptySelection(&'static str),

	#[error("request failed: {0}")]
	Transport(String),

	#[error("server responded with status {0}")]
	Status(u16),

	#[error("malformed response body: {0}")]
	Decode(String),

	#[error("invalid graph: {0}")]
	InvalidGraph(String),
}

impl From<serde_json::Error> for FetchError {
	fn from(err: serde_json::Error) -> Self {
		FetchError::Decode(err.to_string())
	}
}
