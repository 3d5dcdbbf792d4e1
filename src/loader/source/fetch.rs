/* src/loader/source/fetch.rs */

use async_trait::async_trait;

use super::super::BoxError;
use crate::format::ContentType;
use crate::scope::Scopes;

/// A caller-supplied fetch function that replaces the built-in loaders.
///
/// The returned bytes are decoded with the format negotiated for
/// `content_type` and must form one document for all `scopes`.
#[async_trait]
pub trait Fetch: Send + Sync {
	async fn fetch(&self, content_type: &ContentType, scopes: &Scopes) -> Result<Vec<u8>, BoxError>;
}

/// Adapts a synchronous closure into a [`Fetch`].
pub struct FetchFn<F>(pub F);

#[async_trait]
impl<F> Fetch for FetchFn<F>
where
	F: Fn(&ContentType, &Scopes) -> Result<Vec<u8>, BoxError> + Send + Sync,
{
	async fn fetch(&self, content_type: &ContentType, scopes: &Scopes) -> Result<Vec<u8>, BoxError> {
		(self.0)(content_type, scopes)
	}
}
