/* src/holder/meta.rs */

use std::time::Instant;

/// Metadata of the current snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
	/// Version number, incremented on each successful swap.
	pub version: u64,
	/// When the snapshot was swapped in.
	pub loaded_at: Instant,
	/// Checksum reported by the remote source, if any.
	pub checksum: Option<String>,
}
