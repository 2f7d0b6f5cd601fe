//! Leptos client-side app that looks up the link path between two pages and
//! draws it as a force-directed network.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

pub mod api;
pub mod components;
pub mod config;
pub mod graph;
mod pages;

use crate::config::ViewerConfig;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;
use crate::pages::whole::WholeGraph;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging(level: Level) {
	let _ = console_log::init_with_level(level);
	console_error_panic_hook::set_once();
	info!("Logging initialized at {level}");
}

/// Routes the path finder, the whole-graph view and 404's.
#[component]
pub fn App(config: ViewerConfig) -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();
	provide_context(config);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		<Title text="Page path explorer" />

		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/graph") view=WholeGraph />
			</Routes>
		</Router>
	}
}
