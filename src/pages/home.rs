use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use log::warn;

use crate::api::ApiClient;
use crate::config;

/// Main menu.
#[component]
pub fn Home() -> impl IntoView {
	let missions = RwSignal::new(None::<Result<Vec<String>, String>>);
	spawn_local(async move {
		let result = ApiClient::new(config::API_BASE)
			.missions(&config::player_name())
			.await
			.map(|list| list.iter().map(|m| m.summary()).collect())
			.map_err(|err| {
				warn!("mission list failed: {err}");
				err.to_string()
			});
		let _ = missions.try_set(Some(result));
	});

	view! {
		<div class="menu">
			<h1>"NEXUS ROOT"</h1>
			<nav>
				<A href="/lan">"View LAN"</A>
				<A href="/pvp">"3v3 PvP Battle"</A>
				<A href="/settings">"Settings"</A>
				<A href="/login">"Login"</A>
			</nav>
			<section class="menu-missions">
				{move || match missions.get() {
					Some(Ok(list)) if list.is_empty() => view! { <p>"No missions"</p> }.into_any(),
					Some(Ok(list)) => {
						view! {
							<ul>
								{list.into_iter().map(|m| view! { <li>{m}</li> }).collect_view()}
							</ul>
						}
							.into_any()
					}
					Some(Err(err)) => view! { <p class="error">{format!("Error: {err}")}</p> }.into_any(),
					None => view! { <p>"Loading..."</p> }.into_any(),
				}}
			</section>
		</div>
	}
}
