//! Platform abstraction layer.
//!
//! - [`Storage`]: keyed string slots that hold the persisted journal
//!
//! [`NativeStorage`] keeps one file per slot in the data directory.
//! [`MemoryStorage`] keeps slots in memory and backs the session tests.

mod memory;
mod storage;

pub mod native;

pub use memory::MemoryStorage;
pub use native::NativeStorage;
pub use storage::Storage;
