use std::sync::Arc;

use aura_core::{AccountStore, AppConfig, SessionController};
use aura_llm::{LlmProvider, UnavailableProvider, create_provider};
use aura_storage::{JsonFileStore, KeyValueStore, MemoryStore};

/// Long-lived dependencies shared by every view in the window.
#[derive(Clone)]
pub struct AppServices {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn KeyValueStore>,
    pub provider: Arc<dyn LlmProvider>,
}

impl AppServices {
    pub fn from_config(config: AppConfig) -> Self {
        let store = open_store(&config);
        let provider = open_provider(&config);

        Self {
            config: Arc::new(config),
            store,
            provider,
        }
    }

    pub fn accounts(&self) -> AccountStore {
        AccountStore::new(self.store.clone())
    }

    pub fn restore_session(&self) -> SessionController {
        SessionController::restore(self.store.clone())
    }
}

/// Opens the JSON key-value file, or an in-memory store if it cannot be read.
pub fn open_store(config: &AppConfig) -> Arc<dyn KeyValueStore> {
    let path = config.storage_path();
    match JsonFileStore::open(path.clone()) {
        Ok(store) => {
            tracing::info!(path = ?path, "opened key-value store");
            Arc::new(store)
        }
        Err(error) => {
            tracing::error!(
                path = ?path,
                error = %error,
                "failed to open key-value store, accounts will not be remembered"
            );
            Arc::new(MemoryStore::new())
        }
    }
}

/// Creates the configured provider, or one that fails every request.
pub fn open_provider(config: &AppConfig) -> Arc<dyn LlmProvider> {
    match create_provider(config.provider.to_provider_config()) {
        Ok(provider) => {
            tracing::info!(
                provider_id = %provider.id(),
                model_id = %provider.default_model(),
                "initialized chat provider"
            );
            provider
        }
        Err(error) => {
            tracing::warn!(error = %error, "chat provider unavailable, replies will fall back");
            Arc::new(UnavailableProvider::new(
                error.to_string(),
                config.provider.model_id.clone(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use aura_core::Username;

    use super::*;

    fn config_in(dir: &std::path::Path) -> AppConfig {
        AppConfig {
            data_dir: Some(dir.to_path_buf()),
            ..AppConfig::default()
        }
    }

    #[test]
    fn blank_api_key_yields_unavailable_provider() {
        let dir = tempfile::tempdir().unwrap();
        let services = AppServices::from_config(config_in(dir.path()));

        assert_eq!(services.provider.id(), "unavailable");
    }

    #[test]
    fn configured_key_yields_openai_provider() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.provider.api_key = "sk-test".to_string();

        let services = AppServices::from_config(config);

        assert_eq!(services.provider.id(), "openai");
    }

    #[test]
    fn session_is_remembered_across_service_instances() {
        let dir = tempfile::tempdir().unwrap();
        let user = Username::parse("carol").unwrap();

        {
            let services = AppServices::from_config(config_in(dir.path()));
            services.accounts().register(&user).unwrap();
            services.restore_session().login(user.clone()).unwrap();
        }

        let services = AppServices::from_config(config_in(dir.path()));
        assert_eq!(services.restore_session().current_user(), Some(&user));
        assert!(services.accounts().exists(&user).unwrap());
    }
}
