use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, warn};

use crate::api::ApiClient;
use crate::config;
use crate::events;
use crate::network::CommandCompletion;

const SCROLLBACK: usize = 200;

/// The shared command input. Other views may write a proposed command into it;
/// only the terminal submits.
#[derive(Clone, Copy)]
pub struct CommandLine(pub RwSignal<String>);

fn push_line(lines: RwSignal<Vec<String>>, line: String) {
	let _ = lines.try_update(|lines| {
		lines.push(line);
		if lines.len() > SCROLLBACK {
			let excess = lines.len() - SCROLLBACK;
			lines.drain(..excess);
		}
	});
}

#[component]
pub fn Terminal() -> impl IntoView {
	let line = use_context::<CommandLine>()
		.map(|c| c.0)
		.unwrap_or_else(|| RwSignal::new(String::new()));
	let output = RwSignal::new(Vec::<String>::new());
	let player = config::player_name();

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		let command = line.get_untracked().trim().to_string();
		if command.is_empty() {
			return;
		}
		line.set(String::new());
		push_line(output, format!("> {command}"));

		let player = player.clone();
		spawn_local(async move {
			let api = ApiClient::new(config::API_BASE);
			match api.execute_command(&player, &command).await {
				Ok(response) => {
					debug!("command `{command}` finished in {:?} ms", response.execution_time_ms);
					if !response.output.is_empty() {
						push_line(output, response.output.clone());
					}
					events::command_success().publish(&CommandCompletion {
						data: response.data,
					});
				}
				Err(err) => {
					warn!("command `{command}` failed: {err}");
					push_line(output, format!("error: {err}"));
				}
			}
		});
	};

	view! {
		<div class="terminal">
			<div class="terminal-output">
				{move || {
					output
						.get()
						.into_iter()
						.map(|l| view! { <div class="terminal-line">{l}</div> })
						.collect_view()
				}}
			</div>
			<form class="terminal-input" on:submit=on_submit>
				<span>"$ "</span>
				<input
					type="text"
					prop:value=move || line.get()
					on:input=move |ev| line.set(event_target_value(&ev))
				/>
			</form>
		</div>
	}
}
