/* src/loader/source/file.rs */

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use tokio::fs;

use super::super::{LoadError, LoadOptions};
use crate::format::{AnyFormat, ContentType, Format, FormatError};
use crate::holder::{Hub, Store};
use crate::scope::Scopes;

/// Loads every scope file under `dir` and installs the combined envelope.
///
/// All-or-nothing: the first missing or unreadable file aborts the load
/// before anything is decoded into the store.
pub(crate) async fn load<H: Hub>(
	store: &Store<H>,
	options: &LoadOptions,
	dir: &Path,
	ext: Option<&str>,
	scopes: &Scopes,
) -> Result<(), LoadError> {
	let format = negotiate(&options.content_type, ext)?;
	let ext = ext.unwrap_or(format.extension());

	let mut parts = BTreeMap::new();
	for scope in scopes.iter() {
		let name = match &options.namer {
			Some(namer) => namer.file_name(scope, ext),
			None => format!("{scope}.{ext}"),
		};
		let path = resolve_secure(dir, &name)?;
		tracing::debug!(scope, path = %path.display(), "reading scope file");
		let bytes = fs::read(&path)
			.await
			.map_err(|error| LoadError::Io { path, error })?;
		parts.insert(scope.to_string(), bytes);
	}

	let data = format.envelope(&parts)?;
	store.parse(&data, format)?;
	Ok(())
}

/// The `?ext=` override decides the codec only when no content type is declared.
fn negotiate(content_type: &ContentType, ext: Option<&str>) -> Result<AnyFormat, FormatError> {
	match ext {
		Some(ext) if content_type.is_empty() => {
			AnyFormat::from_extension(ext).ok_or_else(|| FormatError::Unsupported(ext.to_string()))
		}
		_ => content_type.resolve(),
	}
}

/// Joins `name` onto `dir`, refusing names that leave the directory.
fn resolve_secure(dir: &Path, name: &str) -> Result<PathBuf, LoadError> {
	let escapes = Path::new(name).components().any(|component| {
		matches!(
			component,
			Component::ParentDir | Component::RootDir | Component::Prefix(_)
		)
	});
	if escapes || name.is_empty() {
		return Err(LoadError::SandboxViolation {
			name: name.to_string(),
		});
	}
	Ok(dir.join(name))
}
