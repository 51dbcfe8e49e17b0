mod file_config;

pub use file_config::{FileConfig, LlmConfig, SpotifyConfig};

use crate::llm::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use crate::server::{RequestsLoggingLevel, ServerConfig};
use crate::track_search::MAX_SEARCH_LIMIT;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;
use std::time::Duration;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub catalog_path: Option<PathBuf>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub llm_timeout_sec: u64,
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
    pub search_timeout_sec: u64,
    pub search_limit: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            logging_level: RequestsLoggingLevel::Path,
            frontend_dir_path: None,
            catalog_path: None,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            llm_timeout_sec: 15,
            spotify_client_id: None,
            spotify_client_secret: None,
            search_timeout_sec: 10,
            search_limit: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Core settings
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub catalog_path: Option<PathBuf>,

    // Capabilities, None when their credentials are missing
    pub llm: Option<LlmSettings>,
    pub spotify: Option<SpotifySettings>,

    pub search_limit: usize,
}

#[derive(Clone)]
pub struct LlmSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub temperature: f32,
}

#[derive(Clone)]
pub struct SpotifySettings {
    pub client_id: String,
    pub client_secret: String,
    pub timeout: Duration,
}

// Keep credentials out of debug logs.
impl std::fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSettings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl std::fmt::Debug for SpotifySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotifySettings")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let port = file.port.unwrap_or(cli.port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        let catalog_path = file
            .catalog_path
            .map(PathBuf::from)
            .or_else(|| cli.catalog_path.clone());
        if let Some(path) = &catalog_path {
            if !path.is_file() {
                bail!("Catalog file does not exist: {:?}", path);
            }
        }

        // LLM settings - present only when an API key is available
        let llm_file = file.llm.unwrap_or_default();
        let llm_timeout_sec = llm_file.timeout_sec.unwrap_or(cli.llm_timeout_sec);
        if llm_timeout_sec == 0 {
            bail!("llm timeout_sec must be greater than 0");
        }
        let llm = non_empty(llm_file.api_key)
            .or_else(|| non_empty(cli.gemini_api_key.clone()))
            .map(|api_key| LlmSettings {
                api_key,
                model: llm_file.model.unwrap_or_else(|| cli.gemini_model.clone()),
                base_url: llm_file
                    .base_url
                    .unwrap_or_else(|| cli.gemini_base_url.clone()),
                timeout: Duration::from_secs(llm_timeout_sec),
                temperature: llm_file.temperature.unwrap_or(0.3),
            });

        // Spotify settings - both id and secret are required
        let spotify_file = file.spotify.unwrap_or_default();
        let client_id = non_empty(spotify_file.client_id)
            .or_else(|| non_empty(cli.spotify_client_id.clone()));
        let client_secret = non_empty(spotify_file.client_secret)
            .or_else(|| non_empty(cli.spotify_client_secret.clone()));
        let search_timeout_sec = spotify_file
            .timeout_sec
            .unwrap_or(cli.search_timeout_sec);
        if search_timeout_sec == 0 {
            bail!("spotify timeout_sec must be greater than 0");
        }
        let search_timeout = Duration::from_secs(search_timeout_sec);
        let spotify = match (client_id, client_secret) {
            (Some(client_id), Some(client_secret)) => Some(SpotifySettings {
                client_id,
                client_secret,
                timeout: search_timeout,
            }),
            (None, None) => None,
            _ => bail!("Both spotify client id and client secret must be provided together"),
        };

        let search_limit = spotify_file.search_limit.unwrap_or(cli.search_limit);
        if search_limit == 0 || search_limit > MAX_SEARCH_LIMIT {
            bail!(
                "search_limit must be between 1 and {}, got {}",
                MAX_SEARCH_LIMIT,
                search_limit
            );
        }

        Ok(Self {
            port,
            logging_level,
            frontend_dir_path,
            catalog_path,
            llm,
            spotify,
            search_limit,
        })
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            requests_logging_level: self.logging_level.clone(),
            port: self.port,
            frontend_dir_path: self.frontend_dir_path.clone(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
