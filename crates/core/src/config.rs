use std::path::{Path, PathBuf};

use aura_llm::{DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL, ProviderConfig, RIG_OPENAI_PROVIDER_ID};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized};
use serde::{Deserialize, Deserializer, Serialize};
use snafu::{ResultExt, Snafu};

pub const CONFIG_DIRECTORY_NAME: &str = "aura";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const ENV_PREFIX: &str = "AURA_";
pub const DEFAULT_APP_NAME: &str = "Aura";
pub const DEFAULT_WELCOME_MESSAGE: &str = "Hi, I'm Aura. How can I help you today?";

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConfigError {
    #[snafu(display("failed to extract configuration on `{stage}`: {source}"))]
    Extract {
        stage: &'static str,
        source: figment::Error,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    #[serde(deserialize_with = "scalar_string")]
    pub provider_id: String,
    #[serde(deserialize_with = "scalar_string")]
    pub api_key: String,
    #[serde(deserialize_with = "scalar_string")]
    pub base_url: String,
    #[serde(deserialize_with = "scalar_string")]
    pub model_id: String,
    #[serde(deserialize_with = "optional_scalar_string")]
    pub preamble: Option<String>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            provider_id: RIG_OPENAI_PROVIDER_ID.to_string(),
            api_key: String::new(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model_id: DEFAULT_OPENAI_MODEL.to_string(),
            preamble: None,
        }
    }
}

impl ProviderSettings {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn to_provider_config(&self) -> ProviderConfig {
        let config = ProviderConfig::new(
            &self.provider_id,
            &self.api_key,
            &self.base_url,
            &self.model_id,
        );
        match &self.preamble {
            Some(preamble) => config.with_preamble(preamble),
            None => config,
        }
    }

    fn normalized(mut self) -> Self {
        let defaults = Self::default();
        self.provider_id = non_blank_or(self.provider_id, defaults.provider_id);
        self.api_key = self.api_key.trim().to_string();
        self.base_url = non_blank_or(self.base_url, defaults.base_url);
        self.model_id = non_blank_or(self.model_id, defaults.model_id);
        self.preamble = self
            .preamble
            .filter(|preamble| !preamble.trim().is_empty());
        self
    }
}

/// Application settings: serialized defaults, then `config.json`, then `AURA_*` env vars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(deserialize_with = "scalar_string")]
    pub app_name: String,
    #[serde(deserialize_with = "scalar_string")]
    pub welcome_message: String,
    pub data_dir: Option<PathBuf>,
    pub provider: ProviderSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
            data_dir: None,
            provider: ProviderSettings::default(),
        }
    }
}

impl AppConfig {
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|path| path.join(CONFIG_DIRECTORY_NAME))
            .unwrap_or_else(|| PathBuf::from(".aura"))
    }

    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join(CONFIG_FILE_NAME)
    }

    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .map(|path| path.join(CONFIG_DIRECTORY_NAME))
            .unwrap_or_else(|| PathBuf::from(".aura"))
    }

    pub fn figment(config_path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Json::file(config_path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn from_figment(figment: Figment) -> ConfigResult<Self> {
        let config = figment.extract::<Self>().context(ExtractSnafu {
            stage: "extract-app-config",
        })?;
        Ok(config.normalized())
    }

    /// Loads from the default locations, falling back to defaults on any error.
    pub fn load() -> Self {
        let path = Self::default_config_path();
        let config = match Self::from_figment(Self::figment(&path)) {
            Ok(config) => config,
            Err(error) => {
                tracing::warn!(path = ?path, error = %error, "failed to load config, using defaults");
                Self::default()
            }
        };
        config.with_openai_env_fallback(|name| std::env::var(name).ok())
    }

    /// Fills a blank API key (and its base URL and model) from the `OPENAI_*` variables.
    pub fn with_openai_env_fallback(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if self.provider.has_api_key() {
            return self;
        }

        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let Some(api_key) = read("OPENAI_API_KEY") else {
            return self;
        };

        self.provider.api_key = api_key;
        if let Some(base_url) = read("OPENAI_BASE_URL") {
            self.provider.base_url = base_url;
        }
        if let Some(model_id) = read("OPENAI_MODEL") {
            self.provider.model_id = model_id;
        }
        tracing::info!("using OPENAI_API_KEY from the environment");
        self
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(Self::default_data_dir)
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir().join(aura_storage::file::STORAGE_FILE_NAME)
    }

    fn normalized(mut self) -> Self {
        let defaults = Self::default();
        self.app_name = non_blank_or(self.app_name, defaults.app_name);
        self.welcome_message = non_blank_or(self.welcome_message, defaults.welcome_message);
        self.provider = self.provider.normalized();
        self
    }
}

/// Environment values such as `12345` or `true` arrive typed; string settings take them verbatim.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Flag(bool),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Text(text) => text,
            Scalar::Unsigned(number) => number.to_string(),
            Scalar::Signed(number) => number.to_string(),
            Scalar::Float(number) => number.to_string(),
            Scalar::Flag(flag) => flag.to_string(),
        }
    }
}

fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(String::from)
}

fn optional_scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Scalar>::deserialize(deserializer).map(|value| value.map(String::from))
}

fn non_blank_or(value: String, fallback: String) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback
    } else {
        trimmed.to_string()
    }
}
