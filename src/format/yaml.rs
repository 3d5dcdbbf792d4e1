/* src/format/yaml.rs */

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{Format, FormatError};

/// YAML codec using `serde_yaml`.
pub struct Yaml;

impl Format for Yaml {
	fn extensions(&self) -> &'static [&'static str] {
		&["yaml", "yml"]
	}

	fn decode<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T, FormatError> {
		serde_yaml::from_slice(input).map_err(|e| FormatError::Decode(e.to_string()))
	}

	fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, FormatError> {
		serde_yaml::to_string(value)
			.map(String::into_bytes)
			.map_err(|e| FormatError::Encode(e.to_string()))
	}

	fn envelope(&self, parts: &BTreeMap<String, Vec<u8>>) -> Result<Vec<u8>, FormatError> {
		let mut doc: BTreeMap<&str, serde_yaml::Value> = BTreeMap::new();
		for (scope, bytes) in parts {
			let value = self
				.decode(bytes)
				.map_err(|e| FormatError::Decode(format!("{scope}: {e}")))?;
			doc.insert(scope, value);
		}
		self.encode(&doc)
	}
}
