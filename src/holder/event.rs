/* src/holder/event.rs */

use std::sync::Arc;

use super::Meta;

/// Events emitted by the store after each snapshot swap.
#[derive(Debug)]
pub enum HoldEvent<H> {
	/// The first snapshot was installed.
	Loaded { hub: Arc<H>, meta: Meta },
	/// A snapshot replaced an older one.
	Updated { old: Arc<H>, new: Arc<H>, meta: Meta },
}

impl<H> Clone for HoldEvent<H> {
	fn clone(&self) -> Self {
		match self {
			Self::Loaded { hub, meta } => Self::Loaded {
				hub: Arc::clone(hub),
				meta: meta.clone(),
			},
			Self::Updated { old, new, meta } => Self::Updated {
				old: Arc::clone(old),
				new: Arc::clone(new),
				meta: meta.clone(),
			},
		}
	}
}

impl<H> HoldEvent<H> {
	/// The hub that is live after this event.
	pub fn current(&self) -> &Arc<H> {
		match self {
			Self::Loaded { hub, .. } => hub,
			Self::Updated { new, .. } => new,
		}
	}

	pub fn meta(&self) -> &Meta {
		match self {
			Self::Loaded { meta, .. } | Self::Updated { meta, .. } => meta,
		}
	}
}
