//! Poll-cycle triggers for a live scene.

use std::rc::Rc;
use std::time::Duration;

use crate::events::{EventBus, Subscription};
use crate::network::commands::CommandCompletion;
use crate::scheduler::{CancellationToken, Scheduler};

/// Everything that can start a poll cycle while a scene is alive. Dropping it
/// cancels the timer and detaches the completion listener.
pub struct SyncLoop {
	_timer: CancellationToken,
	_completions: Subscription,
}

impl SyncLoop {
	/// `poll` runs on every tick. `on_completion` runs for every completion
	/// event and is expected to request its own poll.
	pub fn start(
		scheduler: &impl Scheduler,
		interval: Duration,
		completions: &EventBus<CommandCompletion>,
		poll: Rc<dyn Fn()>,
		on_completion: impl Fn(&CommandCompletion) + 'static,
	) -> Self {
		let timer = scheduler.schedule(interval, Box::new(move || poll()));
		let subscription = completions.subscribe(on_completion);
		Self {
			_timer: timer,
			_completions: subscription,
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::{Cell, RefCell};

	use super::*;
	use crate::error::ApiError;
	use crate::network::builder::tests::infiltrate_corp;
	use crate::network::view::{Overlay, SceneEffect, ViewEvent, ViewState};
	use crate::scheduler::manual::ManualScheduler;

	/// Scene double: counts fetches and feeds canned results into a view state.
	struct Harness {
		state: Rc<RefCell<ViewState>>,
		fetches: Rc<Cell<u32>>,
		next: Rc<RefCell<Result<bool, ApiError>>>,
	}

	impl Harness {
		fn new() -> Self {
			Self {
				state: Rc::default(),
				fetches: Rc::default(),
				next: Rc::new(RefCell::new(Ok(true))),
			}
		}

		fn poll(&self) -> Rc<dyn Fn()> {
			let (state, fetches, next) = (self.state.clone(), self.fetches.clone(), self.next.clone());
			Rc::new(move || {
				fetches.set(fetches.get() + 1);
				let result = next
					.borrow()
					.clone()
					.map(|has| has.then(infiltrate_corp));
				state.borrow_mut().reduce(ViewEvent::Synced(result));
			})
		}

		fn start(&self, clock: &ManualScheduler, bus: &EventBus<CommandCompletion>) -> SyncLoop {
			let poll = self.poll();
			let (state, on_sync) = (self.state.clone(), poll.clone());
			SyncLoop::start(clock, Duration::from_secs(3), bus, poll, move |completion| {
				let effects = state
					.borrow_mut()
					.reduce(ViewEvent::CommandCompleted(completion.clone()));
				if effects.contains(&SceneEffect::RequestSync) {
					on_sync();
				}
			})
		}
	}

	#[test]
	fn polls_on_interval() {
		let (clock, bus, h) = (ManualScheduler::default(), EventBus::new(), Harness::new());
		let _sync = h.start(&clock, &bus);
		clock.advance(Duration::from_secs(9));
		assert_eq!(h.fetches.get(), 3);
		assert_eq!(h.state.borrow().generation(), 3);
	}

	#[test]
	fn rebuild_never_stacks_trees() {
		let (clock, bus, h) = (ManualScheduler::default(), EventBus::new(), Harness::new());
		let _sync = h.start(&clock, &bus);
		clock.advance(Duration::from_secs(30));
		assert_eq!(h.state.borrow().mission().unwrap().len(), 3);
	}

	#[test]
	fn completion_triggers_fetch_and_viewer() {
		let (clock, bus, h) = (ManualScheduler::default(), EventBus::new(), Harness::new());
		let _sync = h.start(&clock, &bus);
		let completion: CommandCompletion =
			serde_json::from_str(r#"{"data": {"type": "file_content", "content": "secret.txt"}}"#)
				.unwrap();
		bus.publish(&completion);
		assert_eq!(h.fetches.get(), 1);
		assert_eq!(
			h.state.borrow().overlay(),
			Some(&Overlay::FileViewer {
				content: "secret.txt".into()
			})
		);
	}

	#[test]
	fn failed_poll_leaves_graph_alone() {
		let (clock, bus, h) = (ManualScheduler::default(), EventBus::new(), Harness::new());
		let _sync = h.start(&clock, &bus);
		clock.advance(Duration::from_secs(3));
		let gateway = h.state.borrow().mission().unwrap().find("Gateway").unwrap();
		h.state.borrow_mut().reduce(ViewEvent::Press(gateway));
		let before = h.state.borrow().mission().cloned();

		*h.next.borrow_mut() = Err(ApiError::Transport("connection refused".into()));
		clock.advance(Duration::from_secs(3));
		assert_eq!(h.fetches.get(), 2);
		assert_eq!(h.state.borrow().mission().cloned(), before);
		assert!(h.state.borrow().last_error().is_some());
	}

	#[test]
	fn teardown_stops_fetches_and_listener() {
		let (clock, bus, h) = (ManualScheduler::default(), EventBus::new(), Harness::new());
		let sync = h.start(&clock, &bus);
		clock.advance(Duration::from_secs(3));
		assert_eq!(h.fetches.get(), 1);

		h.state.borrow_mut().reduce(ViewEvent::TearDown);
		drop(sync);
		clock.advance(Duration::from_secs(60));
		bus.publish(&CommandCompletion::default());

		assert_eq!(h.fetches.get(), 1);
		assert_eq!(clock.active(), 0);
		assert_eq!(bus.subscriber_count(), 0);
	}
}
