/* src/loader/source/memory.rs */

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::super::BoxError;
use super::Fetch;
use crate::format::{ContentType, Format};
use crate::scope::Scopes;

/// A simple in-memory source useful for testing and embedded environments.
///
/// Holds one document per scope and serves the same keyed envelope a
/// directory source would produce.
#[derive(Debug, Default)]
pub struct MemorySource {
	data: BTreeMap<String, Vec<u8>>,
}

impl MemorySource {
	/// Creates a new empty MemorySource.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts the document for a scope.
	pub fn insert(&mut self, scope: &str, value: impl Into<Vec<u8>>) {
		self.data.insert(scope.to_string(), value.into());
	}
}

#[async_trait]
impl Fetch for MemorySource {
	async fn fetch(&self, content_type: &ContentType, scopes: &Scopes) -> Result<Vec<u8>, BoxError> {
		let format = content_type.resolve()?;
		let mut parts = BTreeMap::new();
		for scope in scopes.iter() {
			let bytes = self
				.data
				.get(scope)
				.ok_or_else(|| format!("scope not found: {scope}"))?;
			parts.insert(scope.to_string(), bytes.clone());
		}
		Ok(format.envelope(&parts)?)
	}
}
