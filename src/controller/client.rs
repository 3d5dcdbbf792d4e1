/* src/controller/client.rs */

//!
//! Refresh client: one synchronous load, then periodic background refresh.

use std::fmt;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::{ClientError, ClientOptions};
use crate::holder::{Hub, Store};
use crate::loader::{Fetch, LoadOptions, Namer};
use crate::spawn::{self, Handle};

/// Keeps a [`Store`] current from a configured source.
///
/// The lifecycle is `init` (one synchronous load, fatal on failure), then
/// `start` (periodic refresh in the background; failures are logged and the
/// previous snapshot keeps serving), then `shutdown`.
///
/// ```ignore
/// let mut client = Client::new(options, Typed::<GameConfig>::default);
/// client.init().await?;
/// client.start(&shutdown_token)?;
/// let config = client.latest();
/// // ...
/// client.shutdown(&deadline_token).await;
/// ```
pub struct Client<H: Hub> {
	store: Arc<Store<H>>,
	options: ClientOptions,
	fetch: Option<Arc<dyn Fetch>>,
	#[cfg(feature = "http")]
	http_client: Option<reqwest::Client>,
	load_options: Option<Arc<LoadOptions>>,
	handle: Option<Handle>,
}

impl<H: Hub> Drop for Client<H> {
	fn drop(&mut self) {
		if let Some(handle) = self.handle.take() {
			handle.cancel();
		}
	}
}

/// Builder for the refresh client.
pub struct ClientBuilder<H: Hub> {
	options: ClientOptions,
	store: Option<Arc<Store<H>>>,
	factory: Option<Box<dyn Fn() -> H + Send + Sync>>,
	fetch: Option<Arc<dyn Fetch>>,
	#[cfg(feature = "http")]
	http_client: Option<reqwest::Client>,
}

impl<H: Hub> ClientBuilder<H> {
	pub fn new() -> Self {
		Self {
			options: ClientOptions::default(),
			store: None,
			factory: None,
			fetch: None,
			#[cfg(feature = "http")]
			http_client: None,
		}
	}

	pub fn options(mut self, options: ClientOptions) -> Self {
		self.options = options;
		self
	}

	/// Uses an existing store, for example one shared with other components.
	pub fn store(mut self, store: Arc<Store<H>>) -> Self {
		self.store = Some(store);
		self
	}

	/// Builds a new store whose hubs come from `factory`.
	pub fn factory<F>(mut self, factory: F) -> Self
	where
		F: Fn() -> H + Send + Sync + 'static,
	{
		self.factory = Some(Box::new(factory));
		self
	}

	/// Replaces both built-in loaders with a custom fetch function.
	pub fn fetch(mut self, fetch: impl Fetch + 'static) -> Self {
		self.fetch = Some(Arc::new(fetch));
		self
	}

	/// Uses a preconfigured HTTP client; `options.timeout` is then ignored.
	#[cfg(feature = "http")]
	pub fn http_client(mut self, client: reqwest::Client) -> Self {
		self.http_client = Some(client);
		self
	}

	pub fn build(self) -> Result<Client<H>, ClientError> {
		let store = match (self.store, self.factory) {
			(Some(store), _) => store,
			(None, Some(factory)) => Arc::new(Store::new(factory)),
			(None, None) => {
				return Err(ClientError::Builder(
					"store or factory is required".to_string(),
				));
			}
		};

		Ok(Client {
			store,
			options: self.options,
			fetch: self.fetch,
			#[cfg(feature = "http")]
			http_client: self.http_client,
			load_options: None,
			handle: None,
		})
	}
}

impl<H: Hub> Default for ClientBuilder<H> {
	fn default() -> Self {
		Self::new()
	}
}

impl<H: Hub> Client<H> {
	pub fn builder() -> ClientBuilder<H> {
		ClientBuilder::new()
	}

	/// Creates a client with a fresh store whose hubs come from `factory`.
	pub fn new<F>(options: ClientOptions, factory: F) -> Self
	where
		F: Fn() -> H + Send + Sync + 'static,
	{
		Self {
			store: Arc::new(Store::new(factory)),
			options,
			fetch: None,
			#[cfg(feature = "http")]
			http_client: None,
			load_options: None,
			handle: None,
		}
	}

	/// Returns the current snapshot.
	///
	/// # Panics
	///
	/// Panics if called before [`init`](Self::init) has succeeded.
	pub fn latest(&self) -> Arc<H> {
		self.store.latest()
	}

	/// Returns the current snapshot, or `None` before the first load.
	pub fn try_latest(&self) -> Option<Arc<H>> {
		self.store.try_latest()
	}

	/// The store this client refreshes. Clone it to read from other tasks.
	pub fn store(&self) -> &Arc<Store<H>> {
		&self.store
	}

	pub fn options(&self) -> &ClientOptions {
		&self.options
	}

	/// Returns true while the refresh task is running.
	pub fn is_running(&self) -> bool {
		self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
	}

	/// Resolves the load options and performs the first load.
	///
	/// Any failure here is returned; the client must not be started
	/// until `init` succeeds.
	pub async fn init(&mut self) -> Result<bool, ClientError> {
		let load_options = Arc::new(self.resolve()?);
		let changed = self.store.load(&load_options).await?;
		tracing::info!(
			source = %self.options.source,
			scopes = %load_options.scopes,
			version = self.store.version(),
			"configuration loaded"
		);
		self.load_options = Some(load_options);
		Ok(changed)
	}

	fn resolve(&self) -> Result<LoadOptions, ClientError> {
		let mut load_options = LoadOptions::new(self.options.source.clone())
			.content_type(self.options.content_type.clone());
		load_options.scopes = self.options.scopes.clone();
		load_options.namer = self.options.naming.map(Namer::from);
		load_options.fetch = self.fetch.clone();

		#[cfg(feature = "http")]
		{
			let client = match &self.http_client {
				Some(client) => client.clone(),
				None => {
					let mut builder = reqwest::Client::builder();
					if !self.options.timeout.is_zero() {
						builder = builder.timeout(self.options.timeout);
					}
					builder.build()?
				}
			};
			load_options.http_client = Some(client);
		}

		Ok(load_options)
	}

	/// Spawns the periodic refresh task under `parent`.
	///
	/// A zero refresh interval leaves the client without a refresh task.
	pub fn start(&mut self, parent: &CancellationToken) -> Result<(), ClientError> {
		let load_options = self
			.load_options
			.clone()
			.ok_or(ClientError::NotInitialized)?;
		if self.is_running() {
			return Err(ClientError::AlreadyStarted);
		}

		let interval = self.options.refresh_interval;
		if interval.is_zero() {
			tracing::debug!("refresh interval is zero, periodic refresh disabled");
			return Ok(());
		}

		let store = Arc::clone(&self.store);
		let handle = spawn::tick(
			parent,
			move |token| {
				let store = Arc::clone(&store);
				let load_options = Arc::clone(&load_options);
				async move { refresh(&store, &load_options, &token).await }
			},
			interval,
		);
		tracing::debug!(?interval, "refresh task started");
		self.handle = Some(handle);
		Ok(())
	}

	/// Stops the refresh task and waits for it, bounded by `ctx`.
	///
	/// Calling it again, or without a running task, does nothing.
	pub async fn shutdown(&mut self, ctx: &CancellationToken) {
		if let Some(handle) = self.handle.take() {
			handle.cancel();
			if !handle.join(ctx).await {
				tracing::warn!("refresh task did not stop before the shutdown deadline");
			}
		}
	}

	/// Runs one load on the caller's task, outside the schedule.
	pub async fn reload(&self) -> Result<bool, ClientError> {
		let load_options = self.load_options.as_ref().ok_or(ClientError::NotInitialized)?;
		Ok(self.store.load(load_options).await?)
	}

	/// Subscribes to snapshot swap events.
	#[cfg(feature = "events")]
	pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<crate::holder::HoldEvent<H>> {
		self.store.subscribe()
	}
}

/// One scheduled refresh. Errors are logged; the schedule goes on.
async fn refresh<H: Hub>(store: &Store<H>, options: &LoadOptions, token: &CancellationToken) {
	tokio::select! {
		_ = token.cancelled() => {
			tracing::debug!("refresh abandoned on shutdown");
		}
		result = store.load(options) => match result {
			Ok(true) => tracing::info!(version = store.version(), "configuration refreshed"),
			Ok(false) => tracing::debug!("configuration unchanged"),
			Err(error) => tracing::error!(
				%error,
				transient = error.is_transient(),
				"failed to refresh configuration"
			),
		},
	}
}

impl<H: Hub> fmt::Debug for Client<H> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut s = f.debug_struct("Client");
		s.field("store", &self.store);
		s.field("options", &self.options);
		s.field("fetch", &self.fetch.is_some());
		s.field("initialized", &self.load_options.is_some());
		s.field("running", &self.is_running());
		s.finish_non_exhaustive()
	}
}
