use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use log::{debug, warn};

use super::{FetchError, Method, RawResponse, Transport};
use crate::graph::GraphPayload;

/// Hands out one ticket per request. Only the newest ticket is current.
#[derive(Clone, Debug, Default)]
pub struct RequestTracker {
	latest: Rc<Cell<u64>>,
}

impl RequestTracker {
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts a new request generation, superseding every earlier ticket.
	pub fn begin(&self) -> RequestTicket {
		let generation = self.latest.get() + 1;
		self.latest.set(generation);
		RequestTicket {
			generation,
			latest: Rc::clone(&self.latest),
		}
	}
}

/// Proof of which request generation a response belongs to.
#[derive(Debug)]
pub struct RequestTicket {
	generation: u64,
	latest: Rc<Cell<u64>>,
}

impl RequestTicket {
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// False once a newer request has begun.
	pub fn is_current(&self) -> bool {
		self.latest.get() == self.generation
	}
}

/// Turns a raw response into a validated payload.
pub fn interpret(response: RawResponse) -> Result<GraphPayload, FetchError> {
	if response.status != 200 {
		return Err(FetchError::Status(response.status));
	}
	let payload: GraphPayload = serde_json::from_str(&response.body)?;
	payload.validate().map_err(FetchError::InvalidGraph)?;
	Ok(payload)
}

/// Sends exactly one request and interprets the outcome.
pub async fn dispatch<T: Transport>(
	transport: &T,
	method: Method,
	address: &str,
) -> Result<GraphPayload, FetchError> {
	debug!("{method} {address}");
	let response = transport.send(method, address).await?;
	interpret(response)
}

/// Dispatches graph requests and drops responses that a newer request superseded.
pub struct GraphLoader<T> {
	transport: Rc<T>,
	tracker: RequestTracker,
}

impl<T: Transport + 'static> GraphLoader<T> {
	pub fn new(transport: T) -> Self {
		Self {
			transport: Rc::new(transport),
			tracker: RequestTracker::new(),
		}
	}

	/// Begins a request immediately. The future resolves to `None` when a later
	/// request was issued before this one completed.
	pub fn fetch(
		&self,
		method: Method,
		address: String,
	) -> impl Future<Output = Option<Result<GraphPayload, FetchError>>> + use<T> {
		let ticket = self.tracker.begin();
		let transport = Rc::clone(&self.transport);
		async move {
			let result = dispatch(&*transport, method, &address).await;
			if ticket.is_current() {
				Some(result)
			} else {
				debug!(
					"dropping response of superseded request #{} ({address})",
					ticket.generation()
				);
				None
			}
		}
	}

	/// Spawns the request on the local executor. `on_complete` runs once with
	/// the outcome unless the request gets superseded.
	pub fn load<F>(&self, method: Method, address: String, on_complete: F)
	where
		F: FnOnce(Result<GraphPayload, FetchError>) + 'static,
	{
		let request = self.fetch(method, address);
		leptos::task::spawn_local(async move {
			if let Some(result) = request.await {
				if let Err(err) = &result {
					warn!("graph request failed: {err}");
				}
				on_complete(result);
			}
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn response(status: u16, body: &str) -> RawResponse {
		RawResponse {
			status,
			body: body.to_string(),
		}
	}

	#[test]
	fn ok_response_yields_nodes_and_edges() {
		let payload = interpret(response(200, r#"{"nodes":[{"id":1}],"edges":[]}"#)).unwrap();
		assert_eq!(payload.nodes.len(), 1);
		assert_eq!(payload.nodes[0].id, crate::graph::NodeId::Number(1));
		assert!(payload.edges.is_empty());
	}

	#[test]
	fn non_200_status_is_reported() {
		assert_eq!(
			interpret(response(404, "not found")),
			Err(FetchError::Status(404))
		);
		assert_eq!(
			interpret(response(204, r#"{"nodes":[],"edges":[]}"#)),
			Err(FetchError::Status(204))
		);
	}

	#[test]
	fn unparseable_body_is_a_decode_error() {
		assert!(matches!(
			interpret(response(200, "<html>oops</html>")),
			Err(FetchError::Decode(_))
		));
	}

	#[test]
	fn dangling_edge_is_an_invalid_graph() {
		let result = interpret(response(
			200,
			r#"{"nodes":[{"id":1}],"edges":[{"from":1,"to":2}]}"#,
		));
		assert!(matches!(result, Err(FetchError::InvalidGraph(_))));
	}

	#[test]
	fn newer_ticket_supersedes_older() {
		let tracker = RequestTracker::new();
		let first = tracker.begin();
		assert!(first.is_current());

		let second = tracker.begin();
		assert!(!first.is_current());
		assert!(second.is_current());
		assert_eq!(second.generation(), first.generation() + 1);
	}

	#[test]
	fn cloned_tracker_shares_generations() {
		let tracker = RequestTracker::new();
		let ticket = tracker.begin();
		tracker.clone().begin();
		assert!(!ticket.is_current());
	}
}
