/* src/format/json.rs */

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;

use super::{Format, FormatError};

/// JSON codec using `serde_json`.
pub struct Json;

impl Format for Json {
	fn extensions(&self) -> &'static [&'static str] {
		&["json"]
	}

	fn decode<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T, FormatError> {
		serde_json::from_slice(input).map_err(|e| FormatError::Decode(e.to_string()))
	}

	fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, FormatError> {
		serde_json::to_vec(value).map_err(|e| FormatError::Encode(e.to_string()))
	}

	fn envelope(&self, parts: &BTreeMap<String, Vec<u8>>) -> Result<Vec<u8>, FormatError> {
		// Parts are embedded as raw JSON, never re-parsed into values.
		let mut doc: BTreeMap<&str, &RawValue> = BTreeMap::new();
		for (scope, bytes) in parts {
			let raw: &RawValue = serde_json::from_slice(bytes)
				.map_err(|e| FormatError::Decode(format!("{scope}: {e}")))?;
			doc.insert(scope, raw);
		}
		self.encode(&doc)
	}
}
