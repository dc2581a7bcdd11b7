//! NEXUS ROOT browser client: Leptos app wiring, routes and the hooks the
//! surrounding game loop uses to feed the event channels.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};
use wasm_bindgen::prelude::*;

// Modules
mod api;
mod components;
mod config;
mod error;
mod events;
mod hud;
mod network;
mod pages;
mod scheduler;

// Top-Level pages
use crate::components::terminal::CommandLine;
use crate::pages::home::Home;
use crate::pages::lan::Lan;
use crate::pages::login::Login;
use crate::pages::not_found::NotFound;
use crate::pages::pvp::Pvp;
use crate::pages::settings::{LiveSettings, SettingsPage};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Feed an `updateResources` broadcast from outside the app.
#[wasm_bindgen]
pub fn publish_resources(cpu: f64, ram: f64, credits: f64, trace: f64) {
	events::update_resources().publish(&hud::ResourceSnapshot {
		cpu,
		ram,
		credits: credits as i64,
		trace,
	});
}

/// Feed a `commandSuccess` broadcast from outside the app. `payload` is the
/// JSON `{data: {type, content?, ...}}`.
#[wasm_bindgen]
pub fn publish_command_success(payload: &str) -> Result<(), JsValue> {
	let completion: network::CommandCompletion =
		serde_json::from_str(payload).map_err(|e| JsValue::from_str(&e.to_string()))?;
	events::command_success().publish(&completion);
	Ok(())
}

/// An app router which renders the main menu and the game views, and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();
	provide_context(CommandLine(RwSignal::new(String::new())));
	let settings = RwSignal::new(config::Settings::load());
	provide_context(LiveSettings(settings));

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text="NEXUS ROOT" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div
			class=move || settings.get().class_name()
			style=move || settings.get().root_style()
		>
			<Router>
				<Routes fallback=|| view! { <NotFound /> }>
					<Route path=path!("/") view=Home />
					<Route path=path!("/lan") view=Lan />
					<Route path=path!("/pvp") view=Pvp />
					<Route path=path!("/settings") view=SettingsPage />
					<Route path=path!("/login") view=Login />
				</Routes>
			</Router>
		</div>
	}
}
