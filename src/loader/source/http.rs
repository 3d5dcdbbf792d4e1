/* src/loader/source/http.rs */

use reqwest::header::CONTENT_TYPE;
use url::Url;

use super::super::{LoadError, LoadOptions};
use crate::format::ContentType;
use crate::holder::{Hub, Store};
use crate::scope::Scopes;

/// Header carrying the checksum of the configuration document.
pub const HEADER_CHECKSUM: &str = "X-Checksum";

/// Fetches the document over HTTP and installs it unless the checksum is unchanged.
///
/// Returns `Ok(false)` when the remote reports the checksum already held by
/// the store; nothing is decoded in that case. A new checksum is recorded
/// together with the snapshot, so a failed parse leaves the old one in place.
pub(crate) async fn load<H: Hub>(
	store: &Store<H>,
	options: &LoadOptions,
	url: Url,
	scopes: &Scopes,
) -> Result<bool, LoadError> {
	let format = options.content_type.resolve()?;
	let held = store.checksum();

	let client = match &options.http_client {
		Some(client) => client.clone(),
		None => reqwest::Client::builder().build()?,
	};
	let (checksum, body) = fetch(&client, url, held.as_deref(), &options.content_type, scopes).await?;

	if checksum.is_some() && checksum == held {
		tracing::debug!(checksum = ?held, "remote configuration unchanged");
		return Ok(false);
	}

	store.commit(&body, format, checksum)?;
	Ok(true)
}

async fn fetch(
	client: &reqwest::Client,
	url: Url,
	checksum: Option<&str>,
	content_type: &ContentType,
	scopes: &Scopes,
) -> Result<(Option<String>, Vec<u8>), LoadError> {
	tracing::debug!(url = %url, has_checksum = checksum.is_some(), "fetching configuration");

	let mut request = client
		.get(url)
		.header(CONTENT_TYPE, content_type.header_value())
		.body(scopes.to_string());
	if let Some(checksum) = checksum {
		request = request.header(HEADER_CHECKSUM, checksum);
	}

	let response = request.send().await?;
	let status = response.status();
	if !status.is_success() {
		return Err(LoadError::Status(status.as_u16()));
	}

	let checksum = response
		.headers()
		.get(HEADER_CHECKSUM)
		.and_then(|value| value.to_str().ok())
		.filter(|value| !value.is_empty())
		.map(str::to_owned);
	if checksum.is_none() {
		tracing::warn!("response carries no {HEADER_CHECKSUM} header");
	}

	let body = response.bytes().await?;
	Ok((checksum, body.to_vec()))
}
