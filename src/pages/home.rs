use leptos::ev::MouseEvent;
use leptos::prelude::*;
use log::info;

use super::{LoadState, StatusLine, apply_result};
use crate::api::{GlooTransport, GraphLoader, Method, PathQuery};
use crate::components::network::{ConfigPanel, NetworkCanvas, RenderOptions};
use crate::components::selection::SelectionList;
use crate::config::ViewerConfig;
use crate::graph::GraphPayload;

/// Path finder: pick two pages, fetch the path between them and draw it.
#[component]
pub fn Home() -> impl IntoView {
	let config = use_context::<ViewerConfig>().unwrap_or_default();
	let from = RwSignal::new(None::<String>);
	let to = RwSignal::new(None::<String>);
	let graph = RwSignal::new(None::<GraphPayload>);
	let status = RwSignal::new(LoadState::Idle);
	let options = RwSignal::new(RenderOptions::default());
	let loader = StoredValue::new_local(GraphLoader::new(GlooTransport));

	let ready = move || from.with(Option::is_some) && to.with(Option::is_some);

	let endpoint = config.path_endpoint.clone();
	let on_request = move |_: MouseEvent| {
		let query = PathQuery::new(
			from.get_untracked().unwrap_or_default(),
			to.get_untracked().unwrap_or_default(),
		);
		let query = match query {
			Ok(query) => query,
			Err(err) => {
				status.set(LoadState::Failed(err));
				return;
			}
		};
		info!("looking up path {} -> {}", query.from(), query.to());
		status.set(LoadState::Loading);
		let address = query.address(&endpoint);
		loader.with_value(|loader| {
			loader.load(Method::Post, address, move |result| {
				apply_result(result, graph, status)
			})
		});
	};

	view! {
		<div class="path-finder">
			<div class="controls">
				<SelectionList
					id=config.from_list_id.clone()
					label="From "
					choices=config.choices.clone()
					selected=from
				/>
				<SelectionList
					id=config.to_list_id.clone()
					label="To "
					choices=config.choices.clone()
					selected=to
				/>
				<button on:click=on_request disabled=move || !ready()>
					"Find path"
				</button>
				<a href="/graph">"Whole graph"</a>
			</div>
			<StatusLine status=status />
			<ConfigPanel options=options />
			<NetworkCanvas payload=graph options=options container_id=config.container_id.clone() />
		</div>
	}
}
