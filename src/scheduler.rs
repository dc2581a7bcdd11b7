//! Repeating timers whose lifetime is a value.

use std::time::Duration;

/// Cancels its timer when dropped.
#[must_use = "dropping the token cancels the timer"]
pub struct CancellationToken {
	cancel: Option<Box<dyn FnOnce()>>,
}

impl CancellationToken {
	pub fn new(cancel: impl FnOnce() + 'static) -> Self {
		Self {
			cancel: Some(Box::new(cancel)),
		}
	}
}

impl Drop for CancellationToken {
	fn drop(&mut self) {
		if let Some(cancel) = self.cancel.take() {
			cancel();
		}
	}
}

pub trait Scheduler {
	fn schedule(&self, interval: Duration, task: Box<dyn FnMut()>) -> CancellationToken;
}

/// `setInterval` on the browser event loop.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
	fn schedule(&self, interval: Duration, mut task: Box<dyn FnMut()>) -> CancellationToken {
		let millis = u32::try_from(interval.as_millis()).unwrap_or(u32::MAX);
		let handle = gloo_timers::callback::Interval::new(millis, move || task());
		CancellationToken::new(move || drop(handle))
	}
}
