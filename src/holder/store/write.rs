/* src/holder/store/write.rs */

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Instant;

#[cfg(feature = "events")]
use super::super::HoldEvent;
use super::super::{HoldError, Hub, Meta};
use super::{Snapshot, Store};
use crate::format::AnyFormat;

impl<H: Hub> Store<H> {
	/// Parses `data` into a fresh hub and makes it the current snapshot.
	///
	/// On failure the store is left untouched and the previous snapshot
	/// keeps serving reads.
	pub fn parse(&self, data: &[u8], format: AnyFormat) -> Result<Arc<H>, HoldError> {
		self.commit(data, format, None)
	}

	/// Like [`parse`](Self::parse), recording `checksum` with the snapshot.
	///
	/// The checksum only becomes visible if the parse succeeds.
	pub(crate) fn commit(
		&self,
		data: &[u8],
		format: AnyFormat,
		checksum: Option<String>,
	) -> Result<Arc<H>, HoldError> {
		let mut hub = (self.factory)();
		hub.parse(data, format)?;

		let hub = Arc::new(hub);
		let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
		let meta = Meta {
			version,
			loaded_at: Instant::now(),
			checksum,
		};

		let old = self.inner.swap(Some(Arc::new(Snapshot {
			hub: Arc::clone(&hub),
			meta: meta.clone(),
		})));
		tracing::trace!(version, "snapshot swapped");

		#[cfg(feature = "events")]
		{
			let event = match old {
				Some(old) => HoldEvent::Updated {
					old: Arc::clone(&old.hub),
					new: Arc::clone(&hub),
					meta,
				},
				None => HoldEvent::Loaded {
					hub: Arc::clone(&hub),
					meta,
				},
			};
			let _ = self.events.send(event);
		}

		#[cfg(not(feature = "events"))]
		{
			let _ = (old, meta);
		}

		Ok(hub)
	}
}
