//! Protein/kinase network view: a force-directed SVG graph rendered with
//! Leptos, plus the `init` entry point embedding pages call.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};
use wasm_bindgen::prelude::*;

// Modules
mod components;
mod pages;

pub use crate::components::network_view::{
	KinaseInfo, LayoutOptions, NestedProtein, NetworkConfig, NetworkData, NetworkError,
	NetworkView, ProteinInfo, mount,
};

// Top-Level pages
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Render a protein network into the page.
///
/// `config` is a plain object with `element` (CSS selector matching exactly
/// one element), `data` (`{ protein, kinases }`) and optionally
/// `minimalRadius` and `ratio`. The data object is not modified.
#[wasm_bindgen]
pub fn init(config: JsValue) -> Result<(), JsValue> {
	init_logging();
	let json = js_sys::JSON::stringify(&config)
		.map(String::from)
		.map_err(NetworkError::dom)?;
	let config = NetworkConfig::from_json(&json)?;
	mount(config)?;
	Ok(())
}

/// An app router which renders the demo network and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Kinase network" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
