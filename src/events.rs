//! Typed process-wide channels.
//!
//! Every topic is an [`EventBus`] with many subscribers. Subscribing hands back a
//! [`Subscription`]; dropping it removes the listener, so a scene that owns its
//! subscriptions cannot outlive them.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::hud::ResourceSnapshot;
use crate::network::commands::CommandCompletion;

type Listener<T> = Rc<dyn Fn(&T)>;

struct Listeners<T> {
	next_id: u64,
	entries: Vec<(u64, Listener<T>)>,
}

pub struct EventBus<T> {
	inner: Rc<RefCell<Listeners<T>>>,
}

impl<T> Clone for EventBus<T> {
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
		}
	}
}

impl<T: 'static> Default for EventBus<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: 'static> EventBus<T> {
	pub fn new() -> Self {
		Self {
			inner: Rc::new(RefCell::new(Listeners {
				next_id: 0,
				entries: Vec::new(),
			})),
		}
	}

	#[must_use = "dropping the subscription unsubscribes immediately"]
	pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
		let id = {
			let mut inner = self.inner.borrow_mut();
			let id = inner.next_id;
			inner.next_id += 1;
			inner.entries.push((id, Rc::new(listener)));
			id
		};
		let weak: Weak<RefCell<Listeners<T>>> = Rc::downgrade(&self.inner);
		Subscription::new(move || {
			if let Some(inner) = weak.upgrade() {
				inner.borrow_mut().entries.retain(|(entry, _)| *entry != id);
			}
		})
	}

	/// Listeners may subscribe or unsubscribe while being called; changes apply
	/// from the next publish on.
	pub fn publish(&self, event: &T) {
		let listeners: Vec<Listener<T>> = self
			.inner
			.borrow()
			.entries
			.iter()
			.map(|(_, l)| l.clone())
			.collect();
		for listener in listeners {
			listener(event);
		}
	}

	#[cfg(test)]
	pub fn subscriber_count(&self) -> usize {
		self.inner.borrow().entries.len()
	}
}

/// Disposer returned by [`EventBus::subscribe`].
pub struct Subscription {
	dispose: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
	fn new(dispose: impl FnOnce() + 'static) -> Self {
		Self {
			dispose: Some(Box::new(dispose)),
		}
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(dispose) = self.dispose.take() {
			dispose();
		}
	}
}

thread_local! {
	static COMMAND_SUCCESS: EventBus<CommandCompletion> = EventBus::new();
	static UPDATE_RESOURCES: EventBus<ResourceSnapshot> = EventBus::new();
}

/// `commandSuccess`: published by the terminal when the backend answers.
pub fn command_success() -> EventBus<CommandCompletion> {
	COMMAND_SUCCESS.with(EventBus::clone)
}

/// `updateResources`: published by the game loop, consumed by the HUD.
pub fn update_resources() -> EventBus<ResourceSnapshot> {
	UPDATE_RESOURCES.with(EventBus::clone)
}
