/* src/format/mod.rs */

//!
//! Content negotiation: maps a declared content type to a codec.
//!
//! [`ContentType::resolve`] is the single entry point. It yields an
//! [`AnyFormat`], which carries the file extension and the encode/decode pair
//! for one of the supported formats.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

mod json;
pub use json::Json;

#[cfg(feature = "toml")]
mod toml;
#[cfg(feature = "toml")]
pub use self::toml::Toml;

#[cfg(feature = "yaml")]
mod yaml;
#[cfg(feature = "yaml")]
pub use yaml::Yaml;

/// Errors raised by codecs and content negotiation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
	/// The declared content type maps to no supported codec.
	#[error("unsupported content type: {0:?}")]
	Unsupported(String),

	/// The payload could not be decoded.
	#[error("decode error: {0}")]
	Decode(String),

	/// A value could not be encoded.
	#[error("encode error: {0}")]
	Encode(String),
}

/// A codec: one extension plus a matching encode/decode pair.
pub trait Format: Send + Sync {
	/// Supported file extensions, canonical first.
	fn extensions(&self) -> &'static [&'static str];

	/// The canonical file extension.
	fn extension(&self) -> &'static str {
		self.extensions()[0]
	}

	/// Decodes raw bytes into the target type.
	fn decode<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T, FormatError>;

	/// Encodes a value into raw bytes.
	fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, FormatError>;

	/// Wraps per-scope documents into one keyed document of this format.
	///
	/// Every part must itself be a valid document of this format; the result
	/// maps each scope name to its part.
	fn envelope(&self, parts: &BTreeMap<String, Vec<u8>>) -> Result<Vec<u8>, FormatError>;
}

/// The codec selected by content negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnyFormat {
	Json,
	#[cfg(feature = "yaml")]
	Yaml,
	#[cfg(feature = "toml")]
	Toml,
}

impl AnyFormat {
	/// Selects the codec owning a file extension.
	pub fn from_extension(ext: &str) -> Option<Self> {
		let ext = ext.trim_start_matches('.');
		if Json.extensions().contains(&ext) {
			return Some(Self::Json);
		}
		#[cfg(feature = "yaml")]
		if Yaml.extensions().contains(&ext) {
			return Some(Self::Yaml);
		}
		#[cfg(feature = "toml")]
		if Toml.extensions().contains(&ext) {
			return Some(Self::Toml);
		}
		None
	}
}

impl Format for AnyFormat {
	fn extensions(&self) -> &'static [&'static str] {
		match self {
			Self::Json => Json.extensions(),
			#[cfg(feature = "yaml")]
			Self::Yaml => Yaml.extensions(),
			#[cfg(feature = "toml")]
			Self::Toml => Toml.extensions(),
		}
	}

	fn decode<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T, FormatError> {
		match self {
			Self::Json => Json.decode(input),
			#[cfg(feature = "yaml")]
			Self::Yaml => Yaml.decode(input),
			#[cfg(feature = "toml")]
			Self::Toml => Toml.decode(input),
		}
	}

	fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, FormatError> {
		match self {
			Self::Json => Json.encode(value),
			#[cfg(feature = "yaml")]
			Self::Yaml => Yaml.encode(value),
			#[cfg(feature = "toml")]
			Self::Toml => Toml.encode(value),
		}
	}

	fn envelope(&self, parts: &BTreeMap<String, Vec<u8>>) -> Result<Vec<u8>, FormatError> {
		match self {
			Self::Json => Json.envelope(parts),
			#[cfg(feature = "yaml")]
			Self::Yaml => Yaml.envelope(parts),
			#[cfg(feature = "toml")]
			Self::Toml => Toml.envelope(parts),
		}
	}
}

/// A declared content type such as `application/yaml; charset=utf-8`.
///
/// The empty content type stands for JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentType(String);

impl ContentType {
	pub const JSON: &'static str = "application/json";
	pub const YAML: &'static str = "application/yaml";
	pub const TOML: &'static str = "application/toml";

	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	pub fn json() -> Self {
		Self::new(Self::JSON)
	}

	pub fn yaml() -> Self {
		Self::new(Self::YAML)
	}

	pub fn toml() -> Self {
		Self::new(Self::TOML)
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// The media type without parameters.
	pub fn essence(&self) -> &str {
		let media = match self.0.split_once(';') {
			Some((media, _params)) => media,
			None => &self.0,
		};
		media.trim()
	}

	/// The value sent in a `Content-Type` header.
	pub fn header_value(&self) -> &str {
		if self.0.is_empty() { Self::JSON } else { &self.0 }
	}

	/// Selects the codec for this content type.
	pub fn resolve(&self) -> Result<AnyFormat, FormatError> {
		let essence = self.essence();
		if essence.is_empty() || essence.eq_ignore_ascii_case(Self::JSON) {
			return Ok(AnyFormat::Json);
		}
		#[cfg(feature = "yaml")]
		if essence.eq_ignore_ascii_case(Self::YAML) {
			return Ok(AnyFormat::Yaml);
		}
		#[cfg(feature = "toml")]
		if essence.eq_ignore_ascii_case(Self::TOML) {
			return Ok(AnyFormat::Toml);
		}
		Err(FormatError::Unsupported(self.0.clone()))
	}
}

impl fmt::Display for ContentType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.header_value())
	}
}

impl From<&str> for ContentType {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl From<String> for ContentType {
	fn from(value: String) -> Self {
		Self(value)
	}
}
