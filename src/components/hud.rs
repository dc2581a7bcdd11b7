use leptos::prelude::*;

use crate::events;
use crate::hud::{Gauge, ResourceSnapshot};

fn gauge_view(gauge: Gauge) -> impl IntoView {
	let color = gauge.color();
	view! {
		<div class="hud-gauge">
			<span style=format!("color: {color};")>{gauge.label}</span>
			<div class="hud-bar">
				<div
					class="hud-bar-fill"
					style=format!("width: {}%; background: {color};", gauge.fill * 100.0)
				/>
			</div>
		</div>
	}
}

/// Resource overlay. Shows whatever the last `updateResources` broadcast said.
#[component]
pub fn ResourceHud() -> impl IntoView {
	let snapshot = RwSignal::new(ResourceSnapshot::default());
	let subscription = events::update_resources().subscribe(move |update: &ResourceSnapshot| {
		let _ = snapshot.try_set(*update);
	});
	// unsubscribes when the owner is disposed
	let _subscription = StoredValue::new_local(subscription);

	view! {
		<div class="hud">
			{move || gauge_view(snapshot.get().trace_gauge())}
			{move || gauge_view(snapshot.get().cpu_gauge())}
			{move || gauge_view(snapshot.get().ram_gauge())}
			<span class="hud-credits">{move || snapshot.get().credits_label()}</span>
		</div>
	}
}
