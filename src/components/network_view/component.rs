use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::info;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use crate::api::ApiClient;
use crate::components::file_viewer::FileViewer;
use crate::components::terminal::CommandLine;
use crate::config;
use crate::events;
use crate::network::layout::LayoutState;
use crate::network::sync::SyncLoop;
use crate::network::commands::CommandVerb;
use crate::network::view::{Overlay, SceneEffect, ViewEvent, ViewState};
use crate::scheduler::BrowserScheduler;

const SECONDARY_BUTTON: i16 = 2;

struct Scene {
	view: ViewState,
	layout: Option<LayoutState>,
	sync_loop: Option<SyncLoop>,
}

/// Browser callbacks that must be released with the scene.
#[derive(Default)]
struct FrameLoop {
	animate: Option<Closure<dyn FnMut()>>,
	frame_id: Option<i32>,
}

#[derive(Clone)]
struct SceneHandle {
	scene: Rc<RefCell<Scene>>,
	frames: Rc<RefCell<FrameLoop>>,
	api: ApiClient,
	player: String,
	command_line: RwSignal<String>,
	overlay: RwSignal<Option<Overlay>>,
	status: RwSignal<String>,
}

impl SceneHandle {
	fn dispatch(&self, event: ViewEvent) {
		let (effects, overlay, status) = {
			let mut guard = self.scene.borrow_mut();
			if guard.view.is_torn_down() {
				return;
			}
			let Scene { view, layout, .. } = &mut *guard;
			let effects = view.reduce(event);
			if let Some(layout) = layout.as_mut() {
				layout.sync(view.mission(), view.generation());
			}
			(effects, view.overlay().cloned(), view.status_line())
		};
		// the signals are gone once the owner is disposed
		let _ = self.overlay.try_set(overlay);
		let _ = self.status.try_set(status);
		for effect in effects {
			match effect {
				SceneEffect::WriteCommandLine(line) => {
					let _ = self.command_line.try_set(line);
				}
				SceneEffect::RequestSync => self.sync(),
			}
		}
	}

	/// One poll cycle. Overlapping cycles are not deduplicated.
	fn sync(&self) {
		if self.scene.borrow().view.is_torn_down() {
			return;
		}
		let this = self.clone();
		spawn_local(async move {
			let result = this.api.active_mission(&this.player).await;
			this.dispatch(ViewEvent::Synced(result));
		});
	}

	fn start(&self) {
		let poller = self.clone();
		let listener = self.clone();
		let sync_loop = SyncLoop::start(
			&BrowserScheduler,
			config::NETWORK_POLL_INTERVAL,
			&events::command_success(),
			Rc::new(move || poller.sync()),
			move |completion| listener.dispatch(ViewEvent::CommandCompleted(completion.clone())),
		);
		self.scene.borrow_mut().sync_loop = Some(sync_loop);
		self.sync();
	}

	fn teardown(&self) {
		self.dispatch(ViewEvent::TearDown);
		// drops the timer and the completion subscription
		let sync_loop = self.scene.borrow_mut().sync_loop.take();
		drop(sync_loop);

		let mut frames = self.frames.borrow_mut();
		if let (Some(window), Some(id)) = (web_sys::window(), frames.frame_id.take()) {
			let _ = window.cancel_animation_frame(id);
		}
		frames.animate = None;
		info!("network view torn down");
	}

	fn with_layout<R>(&self, f: impl FnOnce(&mut LayoutState) -> R) -> Option<R> {
		self.scene.borrow_mut().layout.as_mut().map(f)
	}
}

fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// The canvas fills its container; an unsized container gets 800x600.
fn container_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	let parent = canvas.parent_element();
	let width = parent.as_ref().map_or(0, |p| p.client_width());
	let height = parent.as_ref().map_or(0, |p| p.client_height());
	(
		if width > 0 { width as f64 } else { 800.0 },
		if height > 0 { height as f64 } else { 600.0 },
	)
}

#[component]
pub fn NetworkView() -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let command_line = use_context::<CommandLine>()
		.map(|c| c.0)
		.unwrap_or_else(|| RwSignal::new(String::new()));
	let overlay = RwSignal::new(None::<Overlay>);
	let status = RwSignal::new(String::from("Connecting..."));

	let handle = SceneHandle {
		scene: Rc::new(RefCell::new(Scene {
			view: ViewState::default(),
			layout: None,
			sync_loop: None,
		})),
		frames: Rc::new(RefCell::new(FrameLoop::default())),
		api: ApiClient::new(config::API_BASE),
		player: config::player_name(),
		command_line,
		overlay,
		status,
	};
	let scene = StoredValue::new_local(handle.clone());
	on_cleanup(move || {
		scene.try_with_value(SceneHandle::teardown);
	});

	let handle_init = handle.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = container_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			log::error!("2d canvas context unavailable");
			return;
		};
		{
			let mut s = handle_init.scene.borrow_mut();
			let mut layout = LayoutState::new(w, h);
			layout.sync(s.view.mission(), s.view.generation());
			s.layout = Some(layout);
		}

		let (scene_anim, frames_inner) = (handle_init.scene.clone(), handle_init.frames.clone());
		let animate = Closure::<dyn FnMut()>::new(move || {
			if let Some(ref mut l) = scene_anim.borrow_mut().layout {
				l.tick(0.016);
				render::render(l, &ctx);
			}
			let mut frames = frames_inner.borrow_mut();
			let next = match (web_sys::window(), frames.animate.as_ref()) {
				(Some(win), Some(cb)) => win.request_animation_frame(cb.as_ref().unchecked_ref()).ok(),
				_ => None,
			};
			frames.frame_id = next;
		});
		let first = window.request_animation_frame(animate.as_ref().unchecked_ref()).ok();
		{
			let mut frames = handle_init.frames.borrow_mut();
			frames.animate = Some(animate);
			frames.frame_id = first;
		}

		handle_init.start();
	});

	let h = handle.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() == SECONDARY_BUTTON {
			return;
		}
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(Some(node)) = h.with_layout(|l| l.press(x, y)) {
			h.dispatch(ViewEvent::Press(node));
		}
	};

	let h = handle.clone();
	let on_contextmenu = move |ev: MouseEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(Some(node)) = h.with_layout(|l| l.node_at_position(x, y)) {
			h.dispatch(ViewEvent::OpenMenu { node, x, y });
		}
	};

	let h = handle.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some((x, y)) = pointer(canvas_ref, &ev) {
			h.with_layout(|l| l.pointer_move(x, y));
		}
	};

	let h = handle.clone();
	let on_mouseup = move |_: MouseEvent| {
		h.with_layout(LayoutState::release);
	};

	let h = handle.clone();
	let on_mouseleave = move |_: MouseEvent| {
		h.with_layout(LayoutState::release);
	};

	let h = handle;
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some((x, y)) = pointer(canvas_ref, &ev) {
			h.with_layout(|l| l.zoom(x, y, ev.delta_y()));
		}
	};

	let select = move |verb: CommandVerb| {
		scene.with_value(|h| {
			h.dispatch(ViewEvent::Select {
				verb,
				now: js_sys::Date::now(),
			})
		});
	};
	let close = Callback::new(move |_: ()| {
		scene.with_value(|h| h.dispatch(ViewEvent::CloseOverlay));
	});

	view! {
		<div class="network-view" style="position: relative;">
			<canvas
				node_ref=canvas_ref
				class="network-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:contextmenu=on_contextmenu
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<div class="network-status">{move || status.get()}</div>
			{move || match overlay.get() {
				Some(Overlay::ContextMenu { target, x, y, .. }) => {
					view! {
						<ul
							class="context-menu"
							style=format!("position: absolute; left: {x}px; top: {y}px;")
						>
							<li class="context-menu-title">{target}</li>
							{CommandVerb::VOCABULARY
								.into_iter()
								.map(|verb| {
									view! {
										<li class="context-menu-item" on:click=move |_| select(verb)>
											{verb.as_str()}
										</li>
									}
								})
								.collect_view()}
						</ul>
					}
						.into_any()
				}
				Some(Overlay::FileViewer { content }) => {
					view! { <FileViewer content=content on_close=close /> }.into_any()
				}
				None => ().into_any(),
			}}
		</div>
	}
}
