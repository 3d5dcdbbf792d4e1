/* src/loader/options.rs */

use std::fmt;
use std::sync::Arc;

use super::{Fetch, Namer};
use crate::format::ContentType;
use crate::scope::Scopes;

/// Everything one load call needs.
///
/// ```ignore
/// let options = LoadOptions::new("file:///etc/game")
///     .content_type(ContentType::yaml())
///     .scopes(["item", "shop"]);
/// ```
#[derive(Clone, Default)]
pub struct LoadOptions {
	/// Source descriptor, ignored when `fetch` is set.
	pub source: String,
	/// Declared content type; empty means JSON.
	pub content_type: ContentType,
	/// Scopes to load. Normalized by the load call.
	pub scopes: Scopes,
	/// File naming for directory sources; `scope.ext` when unset.
	pub namer: Option<Namer>,
	/// Custom fetch function bypassing both built-in loaders.
	pub fetch: Option<Arc<dyn Fetch>>,
	/// Shared HTTP client; a default client is built per load when unset.
	#[cfg(feature = "http")]
	pub http_client: Option<reqwest::Client>,
}

impl LoadOptions {
	pub fn new(source: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			..Self::default()
		}
	}

	pub fn content_type(mut self, content_type: impl Into<ContentType>) -> Self {
		self.content_type = content_type.into();
		self
	}

	pub fn scopes<I, S>(mut self, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scopes = scopes.into_iter().collect();
		self
	}

	pub fn namer(mut self, namer: impl Into<Namer>) -> Self {
		self.namer = Some(namer.into());
		self
	}

	pub fn fetch(mut self, fetch: impl Fetch + 'static) -> Self {
		self.fetch = Some(Arc::new(fetch));
		self
	}

	#[cfg(feature = "http")]
	pub fn http_client(mut self, client: reqwest::Client) -> Self {
		self.http_client = Some(client);
		self
	}
}

impl fmt::Debug for LoadOptions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut s = f.debug_struct("LoadOptions");
		s.field("source", &self.source);
		s.field("content_type", &self.content_type);
		s.field("scopes", &self.scopes);
		s.field("namer", &self.namer);
		s.field("fetch", &self.fetch.is_some());
		s.finish_non_exhaustive()
	}
}
