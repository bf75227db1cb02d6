//! Leptos client-side app wiring and routes, plus the directory, graph and
//! store modules behind them.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// only linked for its `js` feature, which lets `rand` seed itself in the browser
use getrandom as _;

// Modules
mod components;
pub mod config;
pub mod directory;
mod pages;
pub mod profile;
pub mod store;

pub use components::network_graph::{Graph, GraphEdge, GraphNode, SimulationParameters};

// Top-Level pages
use crate::pages::home::Home;
use crate::pages::join::Join;
use crate::pages::not_found::NotFound;

/// Site name shown in the nav and footer.
pub const BRAND: &str = "du.network";
/// School the directory is for.
pub const SCHOOL: &str = "university of denver";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router for the directory and the join form, with a 404 fallback
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text=BRAND />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />
		<Meta name="description" content="find the builders at your school." />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/join") view=Join />
			</Routes>
		</Router>
	}
}
