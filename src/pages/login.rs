use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use log::info;

use crate::api::ApiClient;
use crate::config;

#[component]
pub fn Login() -> impl IntoView {
	let username = RwSignal::new(String::new());
	let password = RwSignal::new(String::new());
	let error = RwSignal::new(None::<String>);
	let navigate = use_navigate();

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		let (user, pass) = (username.get_untracked(), password.get_untracked());
		let navigate = navigate.clone();
		spawn_local(async move {
			match ApiClient::new(config::API_BASE).login(&user, &pass).await {
				Ok(token) => {
					config::store_session(&user, &token);
					info!("logged in as {user}");
					navigate("/", Default::default());
				}
				Err(err) => {
					let _ = error.try_set(Some(err.to_string()));
				}
			}
		});
	};

	view! {
		<div class="login">
			<h1>"Login"</h1>
			<form on:submit=on_submit>
				<label>
					"Username:"
					<input
						type="text"
						prop:value=move || username.get()
						on:input=move |ev| username.set(event_target_value(&ev))
					/>
				</label>
				<label>
					"Password:"
					<input
						type="password"
						prop:value=move || password.get()
						on:input=move |ev| password.set(event_target_value(&ev))
					/>
				</label>
				<button type="submit">"Login"</button>
			</form>
			{move || error.get().map(|e| view! { <p class="error">{e}</p> })}
		</div>
	}
}
