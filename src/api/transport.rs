use std::fmt;
use std::future::Future;

use gloo_net::http::Request;

use super::FetchError;

/// HTTP verb of a graph request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
	Get,
	Post,
}

impl fmt::Display for Method {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Method::Get => "GET",
			Method::Post => "POST",
		})
	}
}

/// Status and body of a completed call, before interpretation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
	pub status: u16,
	pub body: String,
}

/// Issues a single bodiless request and reports what came back.
pub trait Transport {
	/// Sends one request. Errors only when no response was received at all.
	fn send(&self, method: Method, address: &str) -> impl Future<Output = Result<RawResponse, FetchError>>;
}

/// Browser `fetch` through `gloo-net`.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

impl Transport for GlooTransport {
	async fn send(&self, method: Method, address: &str) -> Result<RawResponse, FetchError> {
		let builder = match method {
			Method::Get => Request::get(address),
			Method::Post => Request::post(address),
		};
		let response = builder
			.send()
			.await
			.map_err(|e| FetchError::Transport(e.to_string()))?;
		let status = response.status();
		let body = response
			.text()
			.await
			.map_err(|e| FetchError::Transport(e.to_string()))?;
		Ok(RawResponse { status, body })
	}
}
