/* src/loader/mod.rs */

//!
//! Loaders: turn a source descriptor and a scope set into a snapshot.
//!
//! [`Store::load`](crate::holder::Store::load) picks the strategy:
//!
//! - a custom [`Fetch`] when one is configured,
//! - the HTTP loader for `http://` and `https://` sources (`http` feature),
//! - the directory loader for `file://` URLs and plain paths (`fs` feature).

mod error;
mod load;
mod namer;
mod options;
mod source;

pub use error::{BoxError, LoadError};
pub use namer::{Namer, NamerFn, NamingStyle, UnknownNamingStyle};
pub use options::LoadOptions;
#[cfg(feature = "http")]
pub use source::HEADER_CHECKSUM;
pub use source::{Fetch, FetchFn, MemorySource, Source};
