//! Configuration management
//!
//! Storage credentials come from one of three places, checked in order:
//! an explicit [`StorageConfig`] handed to the facade, the `MINIO_*`
//! environment variables, and the optional TOML config file at
//! `~/.config/docstore/config.toml` (or `$STORE_CONFIG_DIR/config.toml`).
//! The file is read-only to this crate; a `schema_version` newer than
//! [`SCHEMA_VERSION`] is rejected.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Environment variable holding the storage endpoint
pub const ENV_ENDPOINT: &str = "MINIO_ENDPOINT";
/// Environment variable holding the access key ID
pub const ENV_ACCESS_ID: &str = "MINIO_ACCESS_ID";
/// Environment variable holding the secret access key
pub const ENV_ACCESS_KEY: &str = "MINIO_ACCESS_KEY";
/// Environment variable toggling TLS
pub const ENV_USE_SSL: &str = "MINIO_USE_SSL";
/// Environment variable holding the region
pub const ENV_REGION: &str = "MINIO_REGION";
/// Environment variable overriding the config directory
pub const ENV_CONFIG_DIR: &str = "STORE_CONFIG_DIR";

const DEFAULT_REGION: &str = "us-east-1";

/// Connection settings for the object storage service
#[derive(Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// `host[:port]` or a full `http(s)://` URL
    pub endpoint: String,
    /// Access key ID
    pub access_key: String,
    /// Secret access key
    pub secret_key: String,
    /// Connect over TLS when the endpoint carries no scheme
    pub use_ssl: bool,
    /// Region used for request signing
    pub region: String,
}

impl StorageConfig {
    /// Create a config with TLS enabled and the default region
    pub fn new(
        endpoint: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            use_ssl: true,
            region: DEFAULT_REGION.to_string(),
        }
    }

    /// Set the TLS flag
    pub fn with_ssl(mut self, use_ssl: bool) -> Self {
        self.use_ssl = use_ssl;
        self
    }

    /// Set the region
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Resolve configuration from the process environment, falling back
    /// to the config file for anything the environment does not set.
    pub fn from_env() -> Result<Self> {
        let manager = match ConfigManager::new() {
            Ok(manager) => Some(manager),
            Err(e) => {
                tracing::debug!("Skipping config file: {e}");
                None
            }
        };
        Self::from_lookup(|name| std::env::var(name).ok(), manager.as_ref())
    }

    /// Resolve configuration from a variable lookup and the config file
    /// behind `manager`.
    ///
    /// A config file that cannot be loaded is ignored, with a warning, when
    /// the lookup already supplies every required value.
    pub fn from_lookup<F>(lookup: F, manager: Option<&ConfigManager>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match manager {
            Some(manager) => match manager.load() {
                Ok(config) => config.storage,
                Err(e) if has_required_vars(&lookup) => {
                    tracing::warn!(
                        path = %manager.config_path().display(),
                        "Ignoring config file: {e}"
                    );
                    StorageSection::default()
                }
                Err(e) => return Err(e),
            },
            None => StorageSection::default(),
        };
        Self::resolve(lookup, &file)
    }

    /// Resolve configuration from a variable lookup and a config file section.
    ///
    /// Variables win over file values. Endpoint, access key and secret key
    /// are required; TLS defaults to on and the region to `us-east-1`.
    pub fn resolve<F>(lookup: F, file: &StorageSection) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str, fallback: &Option<String>| {
            lookup(name)
                .or_else(|| fallback.clone())
                .ok_or_else(|| {
                    Error::Config(format!("Missing value for {name} environment variable"))
                })
        };

        let endpoint = required(ENV_ENDPOINT, &file.endpoint)?;
        let access_key = required(ENV_ACCESS_ID, &file.access_key)?;
        let secret_key = required(ENV_ACCESS_KEY, &file.secret_key)?;

        let use_ssl = match lookup(ENV_USE_SSL) {
            Some(value) => parse_bool(ENV_USE_SSL, &value)?,
            None => file.use_ssl.unwrap_or(true),
        };

        let region = lookup(ENV_REGION)
            .or_else(|| file.region.clone())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        Ok(Self {
            endpoint,
            access_key,
            secret_key,
            use_ssl,
            region,
        })
    }

    /// Get the endpoint as a URL the SDK can connect to
    ///
    /// A bare `host[:port]` gets `https://` or `http://` depending on
    /// `use_ssl`; an endpoint that already carries a scheme is kept as is.
    pub fn endpoint_url(&self) -> Result<String> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(Error::Config("Endpoint cannot be empty".into()));
        }

        let url = if endpoint.contains("://") {
            url::Url::parse(endpoint)?
        } else {
            let scheme = if self.use_ssl { "https" } else { "http" };
            url::Url::parse(&format!("{scheme}://{endpoint}"))?
        };

        match url.scheme() {
            "http" | "https" => Ok(url.as_str().trim_end_matches('/').to_string()),
            other => Err(Error::Config(format!(
                "Unsupported endpoint scheme '{other}', expected http or https"
            ))),
        }
    }
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("use_ssl", &self.use_ssl)
            .field("region", &self.region)
            .finish()
    }
}

fn has_required_vars<F>(lookup: &F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    [ENV_ENDPOINT, ENV_ACCESS_ID, ENV_ACCESS_KEY]
        .iter()
        .all(|name| lookup(name).is_some())
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::Config(format!(
            "Invalid boolean '{value}' for {name} environment variable"
        ))),
    }
}

/// Main configuration file structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Layout version of the file
    pub schema_version: u32,

    /// Storage connection settings
    #[serde(default)]
    pub storage: StorageSection,
}

/// `[storage]` table of the config file; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageSection {
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default)]
    pub access_key: Option<String>,

    #[serde(default)]
    pub secret_key: Option<String>,

    #[serde(default)]
    pub use_ssl: Option<bool>,

    #[serde(default)]
    pub region: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            storage: StorageSection::default(),
        }
    }
}

/// Locates and reads the config file
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os(ENV_CONFIG_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or_else(|| Error::Config("Could not determine config directory".into()))?
                .join("docstore"),
        };
        Ok(Self {
            config_path: config_dir.join("config.toml"),
        })
    }

    /// Create a ConfigManager with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist, returns a default configuration.
    /// Errors name the file.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }

        let path = self.config_path.display();
        tracing::debug!(path = %path, "Loading config file");
        let content = std::fs::read_to_string(&self.config_path)
            .map_err(|e| Error::Config(format!("Failed to read {path}: {e}")))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {path}: {e}")))?;

        if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file {path} has version {}, newer than supported version {}. Please upgrade store.",
                config.schema_version, SCHEMA_VERSION
            )));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn temp_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let manager = ConfigManager::with_path(config_path);
        (manager, temp_dir)
    }

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_resolve_from_env() {
        let lookup = env(&[
            (ENV_ENDPOINT, "play.min.io"),
            (ENV_ACCESS_ID, "access"),
            (ENV_ACCESS_KEY, "secret"),
        ]);
        let config = StorageConfig::resolve(lookup, &StorageSection::default()).unwrap();
        assert_eq!(config.endpoint, "play.min.io");
        assert_eq!(config.access_key, "access");
        assert_eq!(config.secret_key, "secret");
        assert!(config.use_ssl);
        assert_eq!(config.region, "us-east-1");
    }

    #[test]
    fn test_resolve_missing_endpoint() {
        let lookup = env(&[(ENV_ACCESS_ID, "access"), (ENV_ACCESS_KEY, "secret")]);
        let err = StorageConfig::resolve(lookup, &StorageSection::default()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err
            .to_string()
            .contains("Missing value for MINIO_ENDPOINT environment variable"));
    }

    #[test]
    fn test_resolve_missing_secret() {
        let lookup = env(&[(ENV_ENDPOINT, "localhost:9000"), (ENV_ACCESS_ID, "access")]);
        let err = StorageConfig::resolve(lookup, &StorageSection::default()).unwrap_err();
        assert!(err.to_string().contains(ENV_ACCESS_KEY));
    }

    #[test]
    fn test_resolve_env_overrides_file() {
        let file = StorageSection {
            endpoint: Some("file-host:9000".into()),
            access_key: Some("file-access".into()),
            secret_key: Some("file-secret".into()),
            use_ssl: Some(false),
            region: Some("eu-west-1".into()),
        };
        let lookup = env(&[(ENV_ENDPOINT, "env-host:9000"), (ENV_USE_SSL, "true")]);
        let config = StorageConfig::resolve(lookup, &file).unwrap();
        assert_eq!(config.endpoint, "env-host:9000");
        assert_eq!(config.access_key, "file-access");
        assert_eq!(config.secret_key, "file-secret");
        assert!(config.use_ssl);
        assert_eq!(config.region, "eu-west-1");
    }

    #[test]
    fn test_resolve_invalid_ssl_flag() {
        let lookup = env(&[
            (ENV_ENDPOINT, "localhost:9000"),
            (ENV_ACCESS_ID, "access"),
            (ENV_ACCESS_KEY, "secret"),
            (ENV_USE_SSL, "maybe"),
        ]);
        let err = StorageConfig::resolve(lookup, &StorageSection::default()).unwrap_err();
        assert!(err.to_string().contains(ENV_USE_SSL));
    }

    #[test]
    fn test_endpoint_url_from_host() {
        let config = StorageConfig::new("localhost:9000", "a", "b");
        assert_eq!(config.endpoint_url().unwrap(), "https://localhost:9000");

        let config = config.with_ssl(false);
        assert_eq!(config.endpoint_url().unwrap(), "http://localhost:9000");
    }

    #[test]
    fn test_endpoint_url_with_scheme() {
        let config = StorageConfig::new("http://minio.internal:9000/", "a", "b");
        assert_eq!(config.endpoint_url().unwrap(), "http://minio.internal:9000");
    }

    #[test]
    fn test_endpoint_url_rejects_other_schemes() {
        let config = StorageConfig::new("ftp://minio.internal", "a", "b");
        assert!(matches!(config.endpoint_url(), Err(Error::Config(_))));

        let config = StorageConfig::new("  ", "a", "b");
        assert!(matches!(config.endpoint_url(), Err(Error::Config(_))));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = StorageConfig::new("localhost:9000", "access", "supersecret");
        let debug = format!("{config:?}");
        assert!(debug.contains("access"));
        assert!(!debug.contains("supersecret"));
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let (manager, _temp_dir) = temp_config_manager();
        let config = manager.load().unwrap();
        assert_eq!(config.schema_version, SCHEMA_VERSION);
        assert!(config.storage.endpoint.is_none());
    }

    #[test]
    fn test_load_hand_written_file() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(
            manager.config_path(),
            r#"
            schema_version = 1

            [storage]
            endpoint = "minio.local:9000"
            access_key = "ak"
            secret_key = "sk"
            "#,
        )
        .unwrap();

        let loaded = manager.load().unwrap();
        let config = StorageConfig::resolve(|_| None, &loaded.storage).unwrap();
        assert_eq!(config.endpoint, "minio.local:9000");
        assert_eq!(config.access_key, "ak");
        assert_eq!(config.secret_key, "sk");
    }

    #[test]
    fn test_schema_version_too_new() {
        let (manager, _temp_dir) = temp_config_manager();

        let content = format!(
            r#"
            schema_version = {}
            "#,
            SCHEMA_VERSION + 1
        );
        std::fs::write(manager.config_path(), content).unwrap();

        let result = manager.load();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("newer than supported"));
    }

    #[test]
    fn test_older_schema_version_loads() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(
            manager.config_path(),
            "schema_version = 0\n[storage]\nendpoint = \"old-host:9000\"\n",
        )
        .unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.storage.endpoint.as_deref(), Some("old-host:9000"));
    }

    #[test]
    fn test_malformed_file_error_names_path() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(manager.config_path(), "schema_version = [oops").unwrap();

        let err = manager.load().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err
            .to_string()
            .contains(&manager.config_path().display().to_string()));
    }

    #[test]
    fn test_malformed_file_ignored_when_env_complete() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(manager.config_path(), "schema_version = [oops").unwrap();

        let lookup = env(&[
            (ENV_ENDPOINT, "localhost:9000"),
            (ENV_ACCESS_ID, "access"),
            (ENV_ACCESS_KEY, "secret"),
        ]);
        let config = StorageConfig::from_lookup(lookup, Some(&manager)).unwrap();
        assert_eq!(config.endpoint, "localhost:9000");
        assert!(config.use_ssl);
    }

    #[test]
    fn test_malformed_file_fails_when_env_incomplete() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(manager.config_path(), "schema_version = [oops").unwrap();

        let lookup = env(&[(ENV_ENDPOINT, "localhost:9000")]);
        let err = StorageConfig::from_lookup(lookup, Some(&manager)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_from_lookup_uses_file_values() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(
            manager.config_path(),
            "schema_version = 1\n[storage]\naccess_key = \"ak\"\nsecret_key = \"sk\"\nuse_ssl = false\n",
        )
        .unwrap();

        let lookup = env(&[(ENV_ENDPOINT, "localhost:9000")]);
        let config = StorageConfig::from_lookup(lookup, Some(&manager)).unwrap();
        assert_eq!(config.access_key, "ak");
        assert_eq!(config.secret_key, "sk");
        assert!(!config.use_ssl);
    }
}
