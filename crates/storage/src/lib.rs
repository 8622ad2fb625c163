pub mod error;
pub mod file;
pub mod memory;

pub use error::{StorageError, StorageResult};
pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Key holding the username of the remembered session.
pub const CURRENT_USER_KEY: &str = "currentUser";
/// Key holding the JSON array of registered usernames.
pub const KNOWN_USERS_KEY: &str = "knownUsers";

/// String key-value persistence shared by the account store and session controller.
///
/// Each call is atomic on its own; there is no multi-key transaction.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&self, key: &str) -> StorageResult<()>;
}
