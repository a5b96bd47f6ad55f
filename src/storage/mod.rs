pub mod keys;
pub mod memory_store;
pub mod persistence;
pub mod sqlite_store;

pub use memory_store::MemoryStore;
pub use persistence::Persistence;
pub use sqlite_store::SqliteStore;

use crate::error::ContactsResult;

/// String key-value storage. Everything durable goes through this port, so
/// the repository and credential logic never see the concrete backend.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> ContactsResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> ContactsResult<()>;

    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> ContactsResult<()>;
}
