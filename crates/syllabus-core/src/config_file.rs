use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_LLM_API_URL: &str = "https://router.huggingface.co/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "meta-llama/Llama-3.1-8B-Instruct:novita";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub llm: Option<LlmConfig>,
    pub server: Option<ServerConfig>,
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct LlmConfig {
    pub api_url: Option<String>,
    pub model: Option<String>,
    pub api_token: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub timeout_secs: Option<u64>,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("api_token", &self.api_token.as_ref().map(|_| "***"))
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: Option<u16>,
    pub max_upload_mb: Option<usize>,
}

/// Platform config directory path: `<config_dir>/syllabus-qna/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("syllabus-qna").join("config.toml"))
}

/// Load config by cascading CWD `.syllabus-qna.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".syllabus-qna.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    match load_strict(path) {
        Ok(config) => Some(config),
        Err(ConfigError::Io { .. }) => None,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable config file");
            None
        }
    }
}

/// Load a config the user pointed at explicitly; any failure is reported.
pub fn load_strict(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let base_llm = base.llm.unwrap_or_default();
    let over_llm = overlay.llm.unwrap_or_default();
    let base_server = base.server.unwrap_or_default();
    let over_server = overlay.server.unwrap_or_default();

    ConfigFile {
        llm: Some(LlmConfig {
            api_url: over_llm.api_url.or(base_llm.api_url),
            model: over_llm.model.or(base_llm.model),
            api_token: over_llm.api_token.or(base_llm.api_token),
            max_tokens: over_llm.max_tokens.or(base_llm.max_tokens),
            temperature: over_llm.temperature.or(base_llm.temperature),
            timeout_secs: over_llm.timeout_secs.or(base_llm.timeout_secs),
        }),
        server: Some(ServerConfig {
            port: over_server.port.or(base_server.port),
            max_upload_mb: over_server.max_upload_mb.or(base_server.max_upload_mb),
        }),
    }
}

/// Fully resolved settings: environment > config file > built-in defaults.
#[derive(Clone)]
pub struct ServiceConfig {
    pub llm_api_url: String,
    pub llm_model: String,
    pub llm_api_token: Option<String>,
    pub llm_max_tokens: u32,
    pub llm_temperature: f32,
    /// Outbound request timeout. `None` means the HTTP client default.
    pub llm_timeout_secs: Option<u64>,
    pub port: u16,
    pub max_upload_mb: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            llm_api_url: DEFAULT_LLM_API_URL.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            llm_api_token: None,
            llm_max_tokens: 2000,
            llm_temperature: 0.8,
            llm_timeout_secs: None,
            port: DEFAULT_PORT,
            max_upload_mb: 20,
        }
    }
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("llm_api_url", &self.llm_api_url)
            .field("llm_model", &self.llm_model)
            .field("llm_api_token", &self.llm_api_token.as_ref().map(|_| "***"))
            .field("llm_max_tokens", &self.llm_max_tokens)
            .field("llm_temperature", &self.llm_temperature)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("port", &self.port)
            .field("max_upload_mb", &self.max_upload_mb)
            .finish()
    }
}

impl ServiceConfig {
    /// Resolve from a config file and the process environment.
    pub fn from_env(file: &ConfigFile) -> Self {
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Resolve with an injectable environment lookup.
    ///
    /// Recognized variables: `HF_TOKEN`, `LLM_API_URL`, `LLM_MODEL`,
    /// `SYLLABUS_PORT`.
    pub fn resolve(file: &ConfigFile, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let llm = file.llm.clone().unwrap_or_default();
        let server = file.server.clone().unwrap_or_default();
        let env_nonempty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        Self {
            llm_api_url: env_nonempty("LLM_API_URL")
                .or(llm.api_url)
                .unwrap_or(defaults.llm_api_url),
            llm_model: env_nonempty("LLM_MODEL")
                .or(llm.model)
                .unwrap_or(defaults.llm_model),
            llm_api_token: env_nonempty("HF_TOKEN").or(llm.api_token),
            llm_max_tokens: llm.max_tokens.unwrap_or(defaults.llm_max_tokens),
            llm_temperature: llm.temperature.unwrap_or(defaults.llm_temperature),
            llm_timeout_secs: llm.timeout_secs,
            port: env_nonempty("SYLLABUS_PORT")
                .and_then(|v| v.trim().parse().ok())
                .or(server.port)
                .unwrap_or(defaults.port),
            max_upload_mb: server.max_upload_mb.unwrap_or(defaults.max_upload_mb),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn llm_section_round_trip_toml() {
        let config = ConfigFile {
            llm: Some(LlmConfig {
                model: Some("my-model".to_string()),
                max_tokens: Some(512),
                ..Default::default()
            }),
            ..Default::default()
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: ConfigFile = toml::from_str(&toml_str).unwrap();
        let llm = parsed.llm.unwrap();
        assert_eq!(llm.model.as_deref(), Some("my-model"));
        assert_eq!(llm.max_tokens, Some(512));
    }

    #[test]
    fn merge_overlay_wins_base_preserved() {
        let base = ConfigFile {
            llm: Some(LlmConfig {
                model: Some("base-model".to_string()),
                temperature: Some(0.2),
                ..Default::default()
            }),
            server: Some(ServerConfig {
                port: Some(8080),
                ..Default::default()
            }),
        };
        let overlay = ConfigFile {
            llm: Some(LlmConfig {
                model: Some("overlay-model".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge(base, overlay);
        let llm = merged.llm.unwrap();
        assert_eq!(llm.model.as_deref(), Some("overlay-model"));
        assert_eq!(llm.temperature, Some(0.2));
        assert_eq!(merged.server.unwrap().port, Some(8080));
    }

    #[test]
    fn resolve_defaults() {
        let config = ServiceConfig::resolve(&ConfigFile::default(), |_| None);
        assert_eq!(config.llm_api_url, DEFAULT_LLM_API_URL);
        assert_eq!(config.llm_model, DEFAULT_LLM_MODEL);
        assert_eq!(config.port, 5000);
        assert!(config.llm_api_token.is_none());
    }

    #[test]
    fn resolve_env_overrides_file() {
        let file: ConfigFile = toml::from_str(
            "[llm]\nmodel = \"file-model\"\napi_token = \"file-token\"\n[server]\nport = 7000\n",
        )
        .unwrap();
        let config = ServiceConfig::resolve(&file, |key| match key {
            "HF_TOKEN" => Some("env-token".to_string()),
            "SYLLABUS_PORT" => Some("9000".to_string()),
            "LLM_MODEL" => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config.llm_api_token.as_deref(), Some("env-token"));
        assert_eq!(config.port, 9000);
        // Blank env values fall through to the file.
        assert_eq!(config.llm_model, "file-model");
    }

    #[test]
    fn debug_masks_token() {
        let config = ServiceConfig {
            llm_api_token: Some("secret".to_string()),
            ..ServiceConfig::default()
        };
        let shown = format!("{config:?}");
        assert!(!shown.contains("secret"));
        assert!(shown.contains("***"));
    }

    #[test]
    fn load_strict_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[llm\nmodel = 1").unwrap();
        assert!(matches!(load_strict(&path), Err(ConfigError::Parse { .. })));
        assert!(load_from_path(&path).is_none());
        assert!(load_from_path(&dir.path().join("missing.toml")).is_none());
    }
}
