/* src/holder/mod.rs */

//!
//! The snapshot store and the hub contract.

mod error;
#[cfg(feature = "events")]
mod event;
mod hub;
mod meta;
mod store;
mod table;

pub use error::HoldError;
#[cfg(feature = "events")]
pub use event::HoldEvent;
pub use hub::{Hub, Typed, ValidateConfig};
pub use meta::Meta;
#[cfg(feature = "events")]
pub use store::DEFAULT_EVENT_CAPACITY;
pub use store::Store;
pub use table::{Row, Table};
