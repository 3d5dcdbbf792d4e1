/* src/spawn/mod.rs */

//!
//! Background tasks with cancellation and a completion signal.
//!
//! Every task runs under a child of the caller's [`CancellationToken`] and
//! is controlled through a [`Handle`]:
//!
//! - [`run`] executes a function once.
//! - [`tick`] executes a function on a fixed period.
//! - [`chan`] .. [`chan6`] dispatch values from up to six inboxes, with an
//!   optional ticker and an optional drain on cancellation.

mod chan;
mod handle;

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

pub use chan::{ChanOptions, Inbox, TickFn, chan, chan2, chan3, chan4, chan5, chan6};
pub use handle::Handle;

/// Fires the completion signal and cancels the task token however the task ends.
struct DoneGuard {
	token: CancellationToken,
	done: watch::Sender<bool>,
}

impl Drop for DoneGuard {
	fn drop(&mut self) {
		self.token.cancel();
		self.done.send_replace(true);
	}
}

fn spawn<F, Fut>(parent: &CancellationToken, f: F) -> Handle
where
	F: FnOnce(CancellationToken) -> Fut,
	Fut: Future<Output = ()> + Send + 'static,
{
	let token = parent.child_token();
	let (done_tx, done_rx) = watch::channel(false);
	let guard = DoneGuard {
		token: token.clone(),
		done: done_tx,
	};
	let task = f(token.clone());
	tokio::spawn(async move {
		let _guard = guard;
		task.await;
	});
	Handle::new(token, done_rx)
}

/// Runs `f` once in the background.
///
/// `f` receives a token that is cancelled when the handle is cancelled or
/// `parent` is cancelled; it is expected to return promptly after that.
pub fn run<F, Fut>(parent: &CancellationToken, f: F) -> Handle
where
	F: FnOnce(CancellationToken) -> Fut,
	Fut: Future<Output = ()> + Send + 'static,
{
	spawn(parent, f)
}

/// Runs `f` every `period` until cancelled.
///
/// The first call happens one period after start. Calls never overlap: a
/// slow call delays the next tick instead of stacking up missed ones.
///
/// # Panics
///
/// Panics if `period` is zero.
pub fn tick<F, Fut>(parent: &CancellationToken, mut f: F, period: Duration) -> Handle
where
	F: FnMut(CancellationToken) -> Fut + Send + 'static,
	Fut: Future<Output = ()> + Send + 'static,
{
	assert!(!period.is_zero(), "tick period must be non-zero");
	spawn(parent, move |token| async move {
		let mut ticker = new_interval(period);
		loop {
			tokio::select! {
				biased;
				_ = token.cancelled() => break,
				_ = ticker.tick() => f(token.clone()).await,
			}
		}
		tracing::debug!(?period, "tick task stopped");
	})
}

fn new_interval(period: Duration) -> Interval {
	let mut interval = tokio::time::interval_at(Instant::now() + period, period);
	interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
	interval
}
