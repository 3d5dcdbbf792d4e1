/* src/holder/store/mod.rs */

mod read;
mod write;

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use arc_swap::ArcSwapOption;

use super::{Hub, Meta};
#[cfg(feature = "events")]
use super::HoldEvent;

/// Default event channel capacity.
#[cfg(feature = "events")]
pub const DEFAULT_EVENT_CAPACITY: usize = 16;

type Factory<H> = Box<dyn Fn() -> H + Send + Sync>;

/// A hub together with the metadata it was installed with.
pub(crate) struct Snapshot<H> {
	pub(crate) hub: Arc<H>,
	pub(crate) meta: Meta,
}

/// Holds the current configuration snapshot.
///
/// Reads are wait-free loads of an atomically swapped pointer. Writes build a
/// complete new hub first and publish it with a single swap, so readers see
/// either the previous snapshot or the new one, never anything in between.
///
/// The store is designed for a single writer (the initial load, then one
/// refresher); concurrent writers are safe but race for the last swap.
pub struct Store<H> {
	pub(crate) inner: ArcSwapOption<Snapshot<H>>,
	pub(crate) version: AtomicU64,
	pub(crate) factory: Factory<H>,
	#[cfg(feature = "events")]
	pub(crate) events: tokio::sync::broadcast::Sender<HoldEvent<H>>,
}

impl<H: Hub> Store<H> {
	/// Creates an empty store that builds each new hub with `factory`.
	pub fn new<F>(factory: F) -> Self
	where
		F: Fn() -> H + Send + Sync + 'static,
	{
		Self {
			inner: ArcSwapOption::empty(),
			version: AtomicU64::new(0),
			factory: Box::new(factory),
			#[cfg(feature = "events")]
			events: tokio::sync::broadcast::channel(DEFAULT_EVENT_CAPACITY).0,
		}
	}

	/// Creates an empty store with custom event channel capacity.
	///
	/// Note: Events may be dropped if subscribers process slower than
	/// the refresh rate and the channel fills up.
	#[cfg(feature = "events")]
	pub fn with_event_capacity<F>(factory: F, capacity: usize) -> Self
	where
		F: Fn() -> H + Send + Sync + 'static,
	{
		Self {
			events: tokio::sync::broadcast::channel(capacity).0,
			..Self::new(factory)
		}
	}
}

impl<H: Hub + Default> Default for Store<H> {
	fn default() -> Self {
		Self::new(H::default)
	}
}

impl<H> fmt::Debug for Store<H> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let snapshot = self.inner.load();
		let mut s = f.debug_struct("Store");
		s.field("loaded", &snapshot.is_some());
		if let Some(snapshot) = snapshot.as_ref() {
			s.field("version", &snapshot.meta.version);
			s.field("checksum", &snapshot.meta.checksum);
		}
		s.finish_non_exhaustive()
	}
}
