//! Global configuration loader for NekoNet.
//!
//! Reads `config.toml` from the data directory (`~/.neko/` in production)
//! and deserializes it into [`GlobalConfig`]. Falls back to sensible defaults
//! when the file is missing or malformed.

use std::path::Path;

use neko_types::chat::ResponseMode;
use neko_types::config::GlobalConfig;

/// Problems found in an otherwise parseable configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid endpoint URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("provider '{0}' is not configured")]
    UnknownProvider(String),

    #[error("invalid mode: {0}")]
    InvalidMode(String),
}

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// Parse `mode` and check that a provider mode names a configured provider.
pub fn resolve_mode(config: &GlobalConfig, mode: &str) -> Result<ResponseMode, ConfigError> {
    let mode: ResponseMode = mode.parse().map_err(ConfigError::InvalidMode)?;
    match &mode {
        ResponseMode::Local => Ok(mode),
        ResponseMode::Provider(id) if config.providers.iter().any(|p| &p.id == id) => Ok(mode),
        ResponseMode::Provider(id) => Err(ConfigError::UnknownProvider(id.clone())),
    }
}

/// The mode new sessions start in, falling back to local with a warning.
pub fn default_mode(config: &GlobalConfig) -> ResponseMode {
    resolve_mode(config, &config.default_mode).unwrap_or_else(|err| {
        tracing::warn!("default_mode: {err}, starting in local mode");
        ResponseMode::Local
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_global_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.default_mode, "local");
        assert_eq!(config.adapter_timeout_ms, 8_000);
        assert!(config.providers.is_empty());
    }

    #[tokio::test]
    async fn load_global_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(
            &config_path,
            r#"
default_mode = "remote-b"
adapter_timeout_ms = 3000

[[providers]]
id = "remote-b"
name = "Remote B"

[[providers.endpoints]]
order = 1
url = "https://mirror-two.example/api"

[[providers.endpoints]]
order = 0
url = "https://mirror-one.example/api"
query_param = "prompt"
fields = ["/data/text"]
"#,
        )
        .await
        .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.adapter_timeout_ms, 3_000);
        assert_eq!(config.providers.len(), 1);
        let sorted = config.providers[0].sorted_endpoints();
        assert_eq!(sorted[0].query_param, "prompt");
        assert_eq!(sorted[1].query_param, "q");
        assert_eq!(
            default_mode(&config),
            ResponseMode::Provider("remote-b".to_string())
        );
    }

    #[tokio::test]
    async fn load_global_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(&config_path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.default_mode, "local");
        assert!(config.providers.is_empty());
    }

    #[test]
    fn resolve_mode_rejects_unknown_provider() {
        let config = GlobalConfig::default();
        assert_eq!(
            resolve_mode(&config, "remote-x"),
            Err(ConfigError::UnknownProvider("remote-x".to_string()))
        );
        assert_eq!(
            resolve_mode(&config, "remote-x").unwrap_err().to_string(),
            "provider 'remote-x' is not configured"
        );
        assert_eq!(resolve_mode(&config, "LOCAL"), Ok(ResponseMode::Local));
        assert!(matches!(resolve_mode(&config, "  "), Err(ConfigError::InvalidMode(_))));
    }

    #[test]
    fn default_mode_falls_back_to_local() {
        let config = GlobalConfig {
            default_mode: "remote-x".to_string(),
            ..GlobalConfig::default()
        };
        assert_eq!(default_mode(&config), ResponseMode::Local);
    }
}
