use leptos::prelude::*;
use leptos_router::components::A;

use crate::config::Settings;

/// The live settings. The app root styles itself from this signal, so a
/// change applies without a reload.
#[derive(Clone, Copy)]
pub struct LiveSettings(pub RwSignal<Settings>);

/// Layout and font size, persisted on every change.
#[component]
pub fn SettingsPage() -> impl IntoView {
	let settings = use_context::<LiveSettings>()
		.map(|c| c.0)
		.unwrap_or_else(|| RwSignal::new(Settings::load()));
	let change = move |f: fn(&mut Settings)| {
		settings.update(|s| {
			f(s);
			s.save();
		});
	};

	view! {
		<div class="settings">
			<div class="settings-header">
				<h1>"Game Settings"</h1>
				<A href="/">"Back to Menu"</A>
			</div>
			<div class="settings-row">
				<span>"UI Layout:"</span>
				<button on:click=move |_| change(|s| s.layout = s.layout.next())>
					{move || format!("{:?}", settings.get().layout)}
				</button>
			</div>
			<div class="settings-row">
				<span>"Font Size:"</span>
				<button on:click=move |_| change(|s| s.font_size = s.font_size.next())>
					{move || format!("{:?}", settings.get().font_size)}
				</button>
			</div>
		</div>
	}
}
