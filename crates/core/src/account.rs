use std::sync::Arc;

use aura_storage::{KNOWN_USERS_KEY, KeyValueStore, StorageError};
use snafu::{ResultExt, Snafu, ensure};

use crate::username::Username;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum AccountError {
    #[snafu(display("username '{username}' already exists"))]
    AlreadyExists { username: String },
    #[snafu(display("stored account list under '{key}' is not a JSON array of strings"))]
    CorruptAccounts {
        stage: &'static str,
        key: &'static str,
        source: serde_json::Error,
    },
    #[snafu(display("failed to serialize account list on `{stage}`"))]
    SerializeAccounts {
        stage: &'static str,
        source: serde_json::Error,
    },
    #[snafu(display("account storage failed on `{stage}`: {source}"))]
    AccountStorage {
        stage: &'static str,
        source: StorageError,
    },
}

pub type AccountResult<T> = Result<T, AccountError>;

/// Set of registered usernames. There are no passwords and no removal path.
#[derive(Clone)]
pub struct AccountStore {
    store: Arc<dyn KeyValueStore>,
}

impl AccountStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn exists(&self, username: &Username) -> AccountResult<bool> {
        Ok(self
            .known_users()?
            .iter()
            .any(|known| known == username.as_str()))
    }

    pub fn register(&self, username: &Username) -> AccountResult<()> {
        let mut users = self.known_users()?;
        ensure!(
            !users.iter().any(|known| known == username.as_str()),
            AlreadyExistsSnafu {
                username: username.as_str(),
            }
        );

        users.push(username.as_str().to_string());
        let payload = serde_json::to_string(&users).context(SerializeAccountsSnafu {
            stage: "serialize-known-users",
        })?;
        self.store
            .set(KNOWN_USERS_KEY, &payload)
            .context(AccountStorageSnafu {
                stage: "write-known-users",
            })?;

        tracing::info!(username = %username, known_user_count = users.len(), "registered user");
        Ok(())
    }

    /// Registered names in registration order.
    pub fn known_users(&self) -> AccountResult<Vec<String>> {
        let raw = self
            .store
            .get(KNOWN_USERS_KEY)
            .context(AccountStorageSnafu {
                stage: "read-known-users",
            })?;

        match raw {
            Some(raw) if !raw.trim().is_empty() => {
                serde_json::from_str(&raw).context(CorruptAccountsSnafu {
                    stage: "parse-known-users",
                    key: KNOWN_USERS_KEY,
                })
            }
            _ => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use aura_storage::MemoryStore;

    use super::*;

    fn name(raw: &str) -> Username {
        Username::parse(raw).unwrap()
    }

    #[test]
    fn register_adds_name_exactly_once() {
        let kv = Arc::new(MemoryStore::new());
        let accounts = AccountStore::new(kv.clone());

        accounts.register(&name("alice")).unwrap();

        assert!(accounts.exists(&name("alice")).unwrap());
        assert_eq!(accounts.known_users().unwrap(), vec!["alice".to_string()]);
        assert_eq!(
            kv.get(KNOWN_USERS_KEY).unwrap().as_deref(),
            Some("[\"alice\"]")
        );
    }

    #[test]
    fn duplicate_registration_leaves_store_untouched() {
        let kv = Arc::new(MemoryStore::new());
        let accounts = AccountStore::new(kv.clone());
        accounts.register(&name("alice")).unwrap();
        let before = kv.get(KNOWN_USERS_KEY).unwrap();

        let error = accounts.register(&name(" alice ")).unwrap_err();

        assert!(matches!(error, AccountError::AlreadyExists { .. }));
        assert_eq!(kv.get(KNOWN_USERS_KEY).unwrap(), before);
    }

    #[test]
    fn corrupt_account_list_is_reported_and_not_overwritten() {
        let kv = Arc::new(MemoryStore::new());
        kv.set(KNOWN_USERS_KEY, "{not json").unwrap();
        let accounts = AccountStore::new(kv.clone());

        let error = accounts.register(&name("alice")).unwrap_err();

        assert!(matches!(error, AccountError::CorruptAccounts { .. }));
        assert_eq!(
            kv.get(KNOWN_USERS_KEY).unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn missing_key_reads_as_no_users() {
        let accounts = AccountStore::new(Arc::new(MemoryStore::new()));
        assert!(!accounts.exists(&name("bob")).unwrap());
    }
}
