/* src/holder/error.rs */

use crate::format::FormatError;

/// Errors raised while building or querying a hub.
#[derive(Debug, thiserror::Error)]
pub enum HoldError {
	/// The payload could not be decoded with the negotiated format.
	#[error(transparent)]
	Format(#[from] FormatError),

	/// The payload decoded but its content is unacceptable.
	#[error("invalid content: {0}")]
	Invalid(String),

	/// A row with the same id already exists.
	#[error("duplicated key: {key}")]
	DuplicatedKey { key: String },

	/// The requested key was not found.
	#[error("key not found: {key}")]
	NotFound { key: String },

	/// The operation is not permitted on this value.
	#[error("operation not allowed: {0}")]
	OperationNotAllowed(String),

	/// Validation error from validator crate.
	#[cfg(feature = "validate")]
	#[error("validation failed: {0}")]
	Validation(#[from] validator::ValidationErrors),
}
