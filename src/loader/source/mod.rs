/* src/loader/source/mod.rs */

use std::path::PathBuf;

use url::Url;

use super::LoadError;

mod fetch;
pub use fetch::{Fetch, FetchFn};

mod memory;
pub use memory::MemorySource;

#[cfg(feature = "fs")]
pub(crate) mod file;

#[cfg(feature = "http")]
pub(crate) mod http;
#[cfg(feature = "http")]
pub use http::HEADER_CHECKSUM;

/// Where configuration bytes come from, parsed from a source descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
	/// `http://` or `https://` endpoint.
	Http(Url),
	/// A directory holding one file per scope.
	Dir {
		path: PathBuf,
		/// Extension from a `?ext=` query, overriding the negotiated one.
		ext: Option<String>,
	},
}

impl Source {
	/// Parses a source descriptor.
	///
	/// - `http://...`, `https://...`: HTTP source.
	/// - `file:///dir?ext=yaml`: directory source with an extension override.
	/// - anything else: a filesystem path, made absolute.
	pub fn parse(descriptor: &str) -> Result<Self, LoadError> {
		if descriptor.is_empty() {
			return Err(LoadError::invalid_source(descriptor, "empty source"));
		}

		if descriptor.starts_with("http://") || descriptor.starts_with("https://") {
			let url = Url::parse(descriptor)
				.map_err(|e| LoadError::invalid_source(descriptor, e.to_string()))?;
			return Ok(Self::Http(url));
		}

		if descriptor.starts_with("file://") {
			let url = Url::parse(descriptor)
				.map_err(|e| LoadError::invalid_source(descriptor, e.to_string()))?;
			let path = url
				.to_file_path()
				.map_err(|()| LoadError::invalid_source(descriptor, "not a local directory"))?;
			let ext = url
				.query_pairs()
				.find(|(key, _)| key == "ext")
				.map(|(_, value)| value.into_owned())
				.filter(|value| !value.is_empty());
			return Ok(Self::Dir { path, ext });
		}

		let path = std::path::absolute(descriptor).map_err(|error| LoadError::Io {
			path: PathBuf::from(descriptor),
			error,
		})?;
		Ok(Self::Dir { path, ext: None })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_http_sources() {
		let source = Source::parse("https://example.com/cfg").unwrap();
		assert!(matches!(source, Source::Http(url) if url.path() == "/cfg"));
	}

	#[test]
	fn parses_file_urls_with_ext() {
		let source = Source::parse("file:///etc/cfg?ext=yaml").unwrap();
		assert_eq!(
			source,
			Source::Dir {
				path: PathBuf::from("/etc/cfg"),
				ext: Some("yaml".to_string()),
			}
		);
		let source = Source::parse("file:///etc/cfg").unwrap();
		assert!(matches!(source, Source::Dir { ext: None, .. }));
	}

	#[test]
	fn plain_paths_become_absolute() {
		match Source::parse("conf/game").unwrap() {
			Source::Dir { path, ext } => {
				assert!(path.is_absolute());
				assert!(path.ends_with("conf/game"));
				assert_eq!(ext, None);
			}
			other => panic!("unexpected source {other:?}"),
		}
	}

	#[test]
	fn rejects_bad_descriptors() {
		assert!(matches!(
			Source::parse(""),
			Err(LoadError::InvalidSource { .. })
		));
		assert!(matches!(
			Source::parse("file://remote-host/etc/cfg"),
			Err(LoadError::InvalidSource { .. })
		));
	}
}
