/* src/lib.rs */

//!
//! Versioned, scope-partitioned configuration delivery.
//!
//! A configuration is split into named **scopes** (`item`, `shop`, ...). A
//! consumer picks the scopes it needs, loads them from a directory or an
//! HTTP endpoint, and reads the result through an atomically swapped
//! snapshot while a background task keeps it current.
//!
//! - **scope**: Scope-set algebra (normalize, wildcard, membership).
//! - **format**: Content negotiation and the JSON, YAML and TOML codecs.
//! - **holder**: The snapshot [`Store`](holder::Store) and the [`Hub`](holder::Hub) contract.
//! - **loader**: Directory, HTTP and custom-fetch loaders.
//! - **spawn**: Cancellable background tasks (`run`, `tick`, `chan`..`chan6`).
//! - **controller**: The refresh [`Client`](controller::Client).
//!
//! ## Feature Flags
//!
//! - `full`: Enables all features (default).
//! - `holder`: The snapshot store.
//! - `events`: Broadcasts snapshot swap events from the store.
//! - `validate`: Runs `validator` checks on [`Typed`](holder::Typed) hubs.
//! - `loader`: Load orchestration and naming conventions.
//! - `fs`, `http`: Directory and HTTP sources.
//! - `yaml`, `toml`: Extra codecs; JSON is always available.
//! - `spawn`: The task lifecycle primitives.
//! - `controller`: The refresh client (requires `loader` + `spawn`).
//!
//! ## Basic Usage
//!
//! See `demos/refresh.rs` for a complete example.

pub mod format;
pub mod scope;

#[cfg(feature = "holder")]
pub mod holder;

#[cfg(feature = "loader")]
pub mod loader;

#[cfg(feature = "spawn")]
pub mod spawn;

#[cfg(feature = "controller")]
pub mod controller;

pub use format::{AnyFormat, ContentType, Format, FormatError};
pub use scope::Scopes;
