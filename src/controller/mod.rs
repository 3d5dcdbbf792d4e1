/* src/controller/mod.rs */

//!
//! The refresh client.
//!
//! [`Client`] wires a [`Store`](crate::holder::Store) to a source: one
//! synchronous load at `init`, then a background task that reloads on a
//! fixed interval until shut down.

mod client;
mod error;
mod options;

pub use client::{Client, ClientBuilder};
pub use error::ClientError;
pub use options::{ClientOptions, DEFAULT_TIMEOUT};
