/* src/holder/hub.rs */

use std::ops::Deref;

use serde::de::DeserializeOwned;

use super::HoldError;
use crate::format::{AnyFormat, Format};

/// A decoded configuration object.
///
/// The store creates a fresh hub for every load and calls [`Hub::parse`]
/// on it exactly once. The hub only becomes visible to readers if `parse`
/// succeeds, so an implementation may leave itself half-built on error.
pub trait Hub: Send + Sync + 'static {
	/// Parses `data` with the negotiated `format` into `self`.
	fn parse(&mut self, data: &[u8], format: AnyFormat) -> Result<(), HoldError>;
}

/// Optional validation hook for [`Typed`] hubs.
#[cfg(feature = "validate")]
pub trait ValidateConfig: validator::Validate {
	fn validate_config(&self) -> Result<(), HoldError> {
		self.validate().map_err(HoldError::Validation)
	}
}

#[cfg(feature = "validate")]
impl<T: validator::Validate> ValidateConfig for T {}

#[cfg(not(feature = "validate"))]
pub trait ValidateConfig {
	fn validate_config(&self) -> Result<(), HoldError> {
		Ok(())
	}
}

#[cfg(not(feature = "validate"))]
impl<T> ValidateConfig for T {}

/// A hub that decodes the whole document into `T`.
///
/// For directory sources the document is the scope envelope, so `T` usually
/// has one field per scope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Typed<T>(pub T);

impl<T> Typed<T> {
	pub fn into_inner(self) -> T {
		self.0
	}
}

impl<T> Deref for Typed<T> {
	type Target = T;

	fn deref(&self) -> &T {
		&self.0
	}
}

impl<T> Hub for Typed<T>
where
	T: DeserializeOwned + ValidateConfig + Send + Sync + 'static,
{
	fn parse(&mut self, data: &[u8], format: AnyFormat) -> Result<(), HoldError> {
		let value: T = format.decode(data)?;
		value.validate_config()?;
		self.0 = value;
		Ok(())
	}
}
