/* src/spawn/chan.rs */

use std::future::Future;
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tokio::sync::mpsc;
use tokio::time::Interval;
use tokio_util::sync::CancellationToken;

use super::{Handle, new_interval, spawn};

/// A receiving end a channel task can select on.
pub trait Inbox: Send + 'static {
	type Item: Send + 'static;

	/// Waits for the next value; `None` once the channel is closed and empty.
	fn recv(&mut self) -> impl Future<Output = Option<Self::Item>> + Send;

	/// Takes an already buffered value without waiting.
	fn try_recv(&mut self) -> Option<Self::Item>;
}

impl<T: Send + 'static> Inbox for mpsc::Receiver<T> {
	type Item = T;

	fn recv(&mut self) -> impl Future<Output = Option<T>> + Send {
		mpsc::Receiver::recv(self)
	}

	fn try_recv(&mut self) -> Option<T> {
		mpsc::Receiver::try_recv(self).ok()
	}
}

impl<T: Send + 'static> Inbox for mpsc::UnboundedReceiver<T> {
	type Item = T;

	fn recv(&mut self) -> impl Future<Output = Option<T>> + Send {
		mpsc::UnboundedReceiver::recv(self)
	}

	fn try_recv(&mut self) -> Option<T> {
		mpsc::UnboundedReceiver::try_recv(self).ok()
	}
}

/// Boxed ticker callback.
pub type TickFn = Box<dyn FnMut(CancellationToken) -> BoxFuture<'static, ()> + Send>;

/// Options for the `chan*` family.
#[derive(Default)]
pub struct ChanOptions {
	ticker: Option<(Duration, TickFn)>,
	cleanup: bool,
}

impl ChanOptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Also runs `f` every `period`, in the same loop as the inboxes.
	///
	/// # Panics
	///
	/// Panics if `period` is zero.
	pub fn with_ticker<F, Fut>(mut self, period: Duration, mut f: F) -> Self
	where
		F: FnMut(CancellationToken) -> Fut + Send + 'static,
		Fut: Future<Output = ()> + Send + 'static,
	{
		assert!(!period.is_zero(), "ticker period must be non-zero");
		self.ticker = Some((period, Box::new(move |token| f(token).boxed())));
		self
	}

	/// On cancellation, hands every value already buffered in the inboxes to
	/// its handler before the task ends.
	pub fn with_cleanup(mut self, cleanup: bool) -> Self {
		self.cleanup = cleanup;
		self
	}
}

impl std::fmt::Debug for ChanOptions {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ChanOptions")
			.field("ticker", &self.ticker.as_ref().map(|(period, _)| period))
			.field("cleanup", &self.cleanup)
			.finish()
	}
}

async fn next_tick(interval: &mut Option<Interval>) {
	match interval {
		Some(interval) => {
			interval.tick().await;
		}
		None => std::future::pending().await,
	}
}

macro_rules! chan_task {
	($(#[$attr:meta])* $name:ident => $(($I:ident, $F:ident, $Fut:ident, $rx:ident, $f:ident)),+) => {
		$(#[$attr])*
		#[allow(clippy::too_many_arguments)]
		pub fn $name<$($I, $F, $Fut),+>(
			parent: &CancellationToken,
			$(mut $rx: $I, mut $f: $F,)+
			options: ChanOptions,
		) -> Handle
		where
			$(
				$I: Inbox,
				$F: FnMut(CancellationToken, <$I as Inbox>::Item) -> $Fut + Send + 'static,
				$Fut: Future<Output = ()> + Send + 'static,
			)+
		{
			let ChanOptions { ticker, cleanup } = options;
			spawn(parent, move |token| async move {
				let (mut interval, mut on_tick) = match ticker {
					Some((period, f)) => (Some(new_interval(period)), Some(f)),
					None => (None, None),
				};
				loop {
					tokio::select! {
						_ = token.cancelled() => break,
						_ = next_tick(&mut interval), if interval.is_some() => {
							if let Some(f) = on_tick.as_mut() {
								f(token.clone()).await;
							}
						}
						$(
							Some(value) = $rx.recv() => $f(token.clone(), value).await,
						)+
					}
				}
				if cleanup {
					$(
						while let Some(value) = $rx.try_recv() {
							$f(token.clone(), value).await;
						}
					)+
				}
			})
		}
	};
}

chan_task! {
	/// Dispatches values from one inbox to `f1` until cancelled.
	chan => (I1, F1, Fut1, rx1, f1)
}

chan_task! {
	/// Dispatches values from two inboxes, each to its own handler.
	chan2 => (I1, F1, Fut1, rx1, f1), (I2, F2, Fut2, rx2, f2)
}

chan_task! {
	/// Dispatches values from three inboxes.
	chan3 => (I1, F1, Fut1, rx1, f1), (I2, F2, Fut2, rx2, f2), (I3, F3, Fut3, rx3, f3)
}

chan_task! {
	/// Dispatches values from four inboxes.
	chan4 => (I1, F1, Fut1, rx1, f1), (I2, F2, Fut2, rx2, f2), (I3, F3, Fut3, rx3, f3),
		(I4, F4, Fut4, rx4, f4)
}

chan_task! {
	/// Dispatches values from five inboxes.
	chan5 => (I1, F1, Fut1, rx1, f1), (I2, F2, Fut2, rx2, f2), (I3, F3, Fut3, rx3, f3),
		(I4, F4, Fut4, rx4, f4), (I5, F5, Fut5, rx5, f5)
}

chan_task! {
	/// Dispatches values from six inboxes.
	chan6 => (I1, F1, Fut1, rx1, f1), (I2, F2, Fut2, rx2, f2), (I3, F3, Fut3, rx3, f3),
		(I4, F4, Fut4, rx4, f4), (I5, F5, Fut5, rx5, f5), (I6, F6, Fut6, rx6, f6)
}
