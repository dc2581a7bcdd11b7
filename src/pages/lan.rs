use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::hud::ResourceHud;
use crate::components::network_view::NetworkView;
use crate::components::terminal::Terminal;

/// Network topology view with the terminal underneath.
#[component]
pub fn Lan() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			<div class="lan-scene">
				<ResourceHud />
				<div class="lan-header">
					<h1>"LAN Tree Chart"</h1>
					<A href="/">"Back to Menu"</A>
				</div>
				<div class="lan-graph">
					<NetworkView />
				</div>
				<Terminal />
			</div>
		</ErrorBoundary>
	}
}
