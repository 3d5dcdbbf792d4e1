/* src/spawn/handle.rs */

use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Controls a background task.
///
/// Cloning a handle yields another controller for the same task.
#[derive(Debug, Clone)]
pub struct Handle {
	token: CancellationToken,
	done: watch::Receiver<bool>,
}

impl Handle {
	pub(super) fn new(token: CancellationToken, done: watch::Receiver<bool>) -> Self {
		Self { token, done }
	}

	/// Requests the task to stop. Idempotent and non-blocking.
	pub fn cancel(&self) {
		self.token.cancel();
	}

	/// Returns true once cancellation was requested, or the task has ended.
	pub fn is_cancelled(&self) -> bool {
		self.token.is_cancelled()
	}

	/// Returns true once the task function has returned.
	pub fn is_finished(&self) -> bool {
		*self.done.borrow()
	}

	/// The token the task observes.
	pub fn token(&self) -> &CancellationToken {
		&self.token
	}

	/// Waits until the task function has returned.
	pub async fn wait(&self) {
		let mut done = self.done.clone();
		// The sender only goes away after flagging completion.
		let _ = done.wait_for(|finished| *finished).await;
	}

	/// Waits for the task to finish or for `ctx` to be cancelled, whichever
	/// comes first. Does not cancel the task.
	///
	/// Returns true if the task finished.
	pub async fn join(&self, ctx: &CancellationToken) -> bool {
		tokio::select! {
			_ = self.wait() => true,
			_ = ctx.cancelled() => self.is_finished(),
		}
	}

	/// Like [`join`](Self::join), bounded by a timeout instead of a token.
	pub async fn join_timeout(&self, timeout: Duration) -> bool {
		tokio::time::timeout(timeout, self.wait()).await.is_ok()
	}
}
