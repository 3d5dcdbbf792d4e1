/* src/loader/error.rs */

use std::path::PathBuf;

use crate::format::FormatError;
use crate::holder::HoldError;

/// Boxed error returned by custom fetch functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised by a single load attempt.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
	/// Content negotiation or envelope assembly failed.
	#[error(transparent)]
	Format(#[from] FormatError),

	/// The hub rejected the payload.
	#[error(transparent)]
	Hold(#[from] HoldError),

	/// The wildcard scope reached the byte-level load path.
	#[error("scope \"*\" must be resolved before loading")]
	UnresolvedWildcard,

	/// The source descriptor could not be interpreted.
	#[error("invalid source {descriptor:?}: {reason}")]
	InvalidSource { descriptor: String, reason: String },

	/// A scope file name escapes the configured directory.
	#[error("sandbox violation: {name:?}")]
	SandboxViolation { name: String },

	/// A scope file could not be read.
	#[error("failed to read {}: {error}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		error: std::io::Error,
	},

	/// The HTTP request failed.
	#[cfg(feature = "http")]
	#[error("http error: {0}")]
	Http(#[from] reqwest::Error),

	/// The remote answered with a non-success status.
	#[cfg(feature = "http")]
	#[error("unexpected http status: {0}")]
	Status(u16),

	/// A custom fetch function failed.
	#[error("fetch error: {0}")]
	Fetch(#[source] BoxError),
}

impl LoadError {
	/// Returns true for failures worth retrying on the next refresh.
	///
	/// Configuration errors (unsupported content type, unresolved wildcard,
	/// malformed source, sandbox violation) will fail the same way again.
	pub fn is_transient(&self) -> bool {
		match self {
			Self::Format(FormatError::Unsupported(_))
			| Self::UnresolvedWildcard
			| Self::InvalidSource { .. }
			| Self::SandboxViolation { .. } => false,
			Self::Format(_) | Self::Hold(_) | Self::Io { .. } | Self::Fetch(_) => true,
			#[cfg(feature = "http")]
			Self::Http(_) | Self::Status(_) => true,
		}
	}

	pub(crate) fn invalid_source(descriptor: &str, reason: impl Into<String>) -> Self {
		Self::InvalidSource {
			descriptor: descriptor.to_string(),
			reason: reason.into(),
		}
	}
}
