pub mod home;
pub mod not_found;
pub mod whole;

use std::fmt;

use leptos::prelude::*;

use crate::api::FetchError;
use crate::graph::GraphPayload;

/// Progress of the latest graph request, shown under the controls.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadState {
	#[default]
	Idle,
	Loading,
	Loaded {
		nodes: usize,
		edges: usize,
	},
	Failed(FetchError),
}

impl fmt::Display for LoadState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			LoadState::Idle => f.write_str("Pick two pages and press \"Find path\"."),
			LoadState::Loading => f.write_str("Loading..."),
			LoadState::Loaded { nodes, edges } => write!(f, "{nodes} pages, {edges} links"),
			LoadState::Failed(err) => write!(f, "Error: {err}"),
		}
	}
}

impl LoadState {
	/// State after a request finished with `result`.
	pub fn from_result(result: &Result<GraphPayload, FetchError>) -> Self {
		match result {
			Ok(payload) => LoadState::Loaded {
				nodes: payload.nodes.len(),
				edges: payload.edges.len(),
			},
			Err(err) => LoadState::Failed(err.clone()),
		}
	}
}

/// Publishes a finished request. A failure keeps the previous drawing.
pub fn apply_result(
	result: Result<GraphPayload, FetchError>,
	graph: RwSignal<Option<GraphPayload>>,
	status: RwSignal<LoadState>,
) {
	status.set(LoadState::from_result(&result));
	if let Ok(payload) = result {
		graph.set(Some(payload));
	}
}

#[component]
pub fn StatusLine(status: RwSignal<LoadState>) -> impl IntoView {
	view! {
		<p
			class="status"
			class:error=move || status.with(|s| matches!(s, LoadState::Failed(_)))
		>
			{move || status.with(LoadState::to_string)}
		</p>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{GraphNode, NodeId};

	#[test]
	fn success_reports_counts() {
		let payload = GraphPayload {
			nodes: vec![GraphNode::new(NodeId::Number(1))],
			edges: vec![],
		};
		let state = LoadState::from_result(&Ok(payload));
		assert_eq!(state, LoadState::Loaded { nodes: 1, edges: 0 });
		assert_eq!(state.to_string(), "1 pages, 0 links");
	}

	fn one_node() -> GraphPayload {
		GraphPayload {
			nodes: vec![GraphNode::new(NodeId::Number(1))],
			edges: vec![],
		}
	}

	#[test]
	fn failed_request_keeps_previous_graph() {
		let owner = Owner::new();
		owner.with(|| {
			let graph = RwSignal::new(Some(one_node()));
			let status = RwSignal::new(LoadState::Loading);

			apply_result(Err(FetchError::Status(404)), graph, status);

			assert_eq!(graph.get_untracked(), Some(one_node()));
			assert_eq!(
				status.get_untracked(),
				LoadState::Failed(FetchError::Status(404))
			);
		});
	}

	#[test]
	fn successful_request_replaces_graph() {
		let owner = Owner::new();
		owner.with(|| {
			let graph = RwSignal::new(None);
			let status = RwSignal::new(LoadState::Loading);

			apply_result(Ok(one_node()), graph, status);

			assert_eq!(graph.get_untracked(), Some(one_node()));
			assert_eq!(status.get_untracked(), LoadState::Loaded { nodes: 1, edges: 0 });
		});
	}

	#[test]
	fn failure_is_visible() {
		let state = LoadState::from_result(&Err(FetchError::Status(404)));
		assert_eq!(state.to_string(), "Error: server responded with status 404");
	}
}
