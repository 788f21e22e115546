//! Key-value configuration store persisted as a single JSON document.
//!
//! Built for small devices: one file, full read-modify-write per accessor,
//! a hard ceiling on the serialized size, and a fixed error taxonomy
//! reported through a last-error channel. The backing filesystem is a
//! trait ([`Filesystem`]); [`HostFs`] covers host builds and tests.

pub mod error;
pub mod hostfs;
pub mod store;
pub mod traits;
pub mod value;

pub use error::ErrorKind;
pub use hostfs::HostFs;
pub use store::ConfigStore;
pub use traits::Filesystem;
pub use value::{ConfigValue, Document};
