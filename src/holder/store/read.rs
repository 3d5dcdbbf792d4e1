/* src/holder/store/read.rs */

use std::sync::Arc;

#[cfg(feature = "events")]
use super::super::HoldEvent;
use super::super::{Hub, Meta};
use super::Store;

impl<H: Hub> Store<H> {
	/// Returns the current snapshot. This is a wait-free operation.
	///
	/// # Panics
	///
	/// Panics if no load has succeeded yet. The first load must complete
	/// before any call to `latest`; use [`try_latest`](Self::try_latest)
	/// where that cannot be guaranteed.
	pub fn latest(&self) -> Arc<H> {
		match self.try_latest() {
			Some(hub) => hub,
			None => panic!("livecfg: Store::latest called before the first successful load"),
		}
	}

	/// Returns the current snapshot, or `None` before the first load.
	pub fn try_latest(&self) -> Option<Arc<H>> {
		self.inner
			.load()
			.as_ref()
			.map(|snapshot| Arc::clone(&snapshot.hub))
	}

	/// Returns metadata of the current snapshot.
	pub fn meta(&self) -> Option<Meta> {
		self.inner.load().as_ref().map(|snapshot| snapshot.meta.clone())
	}

	/// Returns the checksum the current snapshot was installed with.
	pub fn checksum(&self) -> Option<String> {
		self.inner
			.load()
			.as_ref()
			.and_then(|snapshot| snapshot.meta.checksum.clone())
	}

	/// Returns true once a load has succeeded.
	pub fn is_loaded(&self) -> bool {
		self.inner.load().is_some()
	}

	/// Returns the version of the current snapshot, `0` before the first load.
	pub fn version(&self) -> u64 {
		self.inner
			.load()
			.as_ref()
			.map_or(0, |snapshot| snapshot.meta.version)
	}

	/// Subscribes to snapshot swap events.
	#[cfg(feature = "events")]
	pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<HoldEvent<H>> {
		self.events.subscribe()
	}
}
