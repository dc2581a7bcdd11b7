use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use log::warn;

use crate::api::{ApiClient, PvpState, TeamMember};
use crate::config;
use crate::scheduler::{BrowserScheduler, Scheduler};

fn poll(teams: RwSignal<Option<PvpState>>) {
	spawn_local(async move {
		match ApiClient::new(config::API_BASE).pvp_state().await {
			Ok(state) => {
				let _ = teams.try_set(Some(state));
			}
			// keep showing the last good state
			Err(err) => warn!("pvp sync failed: {err}"),
		}
	});
}

fn team_view(title: &'static str, members: Vec<TeamMember>) -> impl IntoView {
	view! {
		<section class="pvp-team">
			<h2>{title}</h2>
			<ul>
				{members
					.into_iter()
					.map(|m| view! { <li>{format!("- {} ({})", m.name, m.status)}</li> })
					.collect_view()}
			</ul>
		</section>
	}
}

/// Read-only team status, refreshed on a timer.
#[component]
pub fn Pvp() -> impl IntoView {
	let teams = RwSignal::new(None::<PvpState>);
	poll(teams);
	let token = BrowserScheduler.schedule(config::PVP_POLL_INTERVAL, Box::new(move || poll(teams)));
	// dropping the token on disposal cancels the interval
	let _token = StoredValue::new_local(token);

	view! {
		<div class="pvp">
			<div class="pvp-header">
				<h1>"3v3 PvP Battle"</h1>
				<A href="/">"Back to Menu"</A>
			</div>
			{move || match teams.get() {
				Some(state) => {
					view! {
						<div>
							{team_view("Team A", state.team_a)}
							{team_view("Team B", state.team_b)}
						</div>
					}
						.into_any()
				}
				None => view! { <p>"Loading..."</p> }.into_any(),
			}}
		</div>
	}
}
