use leptos::prelude::*;
use log::warn;
use path_graph_viewer::config::ViewerConfig;
use path_graph_viewer::{App, init_logging};

fn main() {
	let loaded = ViewerConfig::load();
	let config = loaded.as_ref().ok().cloned().unwrap_or_default();
	init_logging(config.level());
	if let Err(e) = loaded {
		warn!("{e}; using defaults");
	}
	mount_to_body(move || view! { <App config=config /> })
}
