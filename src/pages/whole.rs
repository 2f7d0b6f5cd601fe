use leptos::prelude::*;

use super::{LoadState, StatusLine, apply_result};
use crate::api::{GlooTransport, GraphLoader, Method};
use crate::components::network::{NetworkCanvas, RenderOptions};
use crate::config::ViewerConfig;
use crate::graph::GraphPayload;

/// Every page the server knows, fetched once on mount.
#[component]
pub fn WholeGraph() -> impl IntoView {
	let config = use_context::<ViewerConfig>().unwrap_or_default();
	let graph = RwSignal::new(None::<GraphPayload>);
	let status = RwSignal::new(LoadState::Loading);
	let options = RwSignal::new(RenderOptions::default());
	let loader = StoredValue::new_local(GraphLoader::new(GlooTransport));

	let endpoint = config.network_endpoint.clone();
	Effect::new(move |_| {
		let address = endpoint.clone();
		loader.with_value(|loader| {
			loader.load(Method::Post, address, move |result| {
				apply_result(result, graph, status)
			})
		});
	});

	view! {
		<div class="whole-graph">
			<div class="controls">
				<a href="/">"Back to path finder"</a>
			</div>
			<StatusLine status=status />
			<NetworkCanvas payload=graph options=options container_id=config.container_id.clone() />
		</div>
	}
}
