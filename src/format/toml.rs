/* src/format/toml.rs */

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{Format, FormatError};

/// TOML codec using `toml`.
pub struct Toml;

impl Format for Toml {
	fn extensions(&self) -> &'static [&'static str] {
		&["toml"]
	}

	fn decode<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T, FormatError> {
		let s = std::str::from_utf8(input).map_err(|e| FormatError::Decode(e.to_string()))?;
		toml::from_str(s).map_err(|e| FormatError::Decode(e.to_string()))
	}

	fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, FormatError> {
		toml::to_string(value)
			.map(String::into_bytes)
			.map_err(|e| FormatError::Encode(e.to_string()))
	}

	fn envelope(&self, parts: &BTreeMap<String, Vec<u8>>) -> Result<Vec<u8>, FormatError> {
		// A TOML document is always a table, so each part becomes a sub-table.
		let mut doc = toml::Table::new();
		for (scope, bytes) in parts {
			let table: toml::Table = self
				.decode(bytes)
				.map_err(|e| FormatError::Decode(format!("{scope}: {e}")))?;
			doc.insert(scope.clone(), toml::Value::Table(table));
		}
		self.encode(&doc)
	}
}
