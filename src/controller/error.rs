/* src/controller/error.rs */

use thiserror::Error;

use crate::loader::LoadError;

/// Errors that can occur in the refresh client.
#[derive(Debug, Error)]
pub enum ClientError {
	#[error("load error: {0}")]
	Load(#[from] LoadError),

	#[error("client not initialized, call init() before start()")]
	NotInitialized,

	#[error("refresh task already started")]
	AlreadyStarted,

	#[error("builder error: {0}")]
	Builder(String),

	#[cfg(feature = "http")]
	#[error("http client error: {0}")]
	Http(#[from] reqwest::Error),
}
