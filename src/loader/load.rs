/* src/loader/load.rs */

use super::{LoadError, LoadOptions, Source};
use crate::holder::{Hub, Store};

impl<H: Hub> Store<H> {
	/// Loads the configuration described by `options` into the store.
	///
	/// Returns `Ok(true)` when a new snapshot was installed and `Ok(false)`
	/// when there was nothing to do: the scope set normalized to empty, or
	/// the HTTP source reported an unchanged checksum. On error the previous
	/// snapshot stays current.
	///
	/// The wildcard scope must be resolved to concrete names by the caller;
	/// passing it here is [`LoadError::UnresolvedWildcard`].
	pub async fn load(&self, options: &LoadOptions) -> Result<bool, LoadError> {
		let scopes = options.scopes.clone().normalize();
		if scopes.is_empty() {
			return Ok(false);
		}
		if scopes.is_wildcard() {
			return Err(LoadError::UnresolvedWildcard);
		}

		if let Some(fetch) = &options.fetch {
			let format = options.content_type.resolve()?;
			let data = fetch
				.fetch(&options.content_type, &scopes)
				.await
				.map_err(LoadError::Fetch)?;
			self.parse(&data, format)?;
			return Ok(true);
		}

		match Source::parse(&options.source)? {
			#[cfg(feature = "http")]
			Source::Http(url) => super::source::http::load(self, options, url, &scopes).await,
			#[cfg(feature = "fs")]
			Source::Dir { path, ext } => {
				super::source::file::load(self, options, &path, ext.as_deref(), &scopes).await?;
				Ok(true)
			}
			#[allow(unreachable_patterns)]
			_ => Err(LoadError::invalid_source(
				&options.source,
				"source kind not enabled in this build",
			)),
		}
	}
}
