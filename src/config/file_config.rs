use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub port: Option<u16>,
    pub logging_level: Option<String>,
    pub frontend_dir_path: Option<String>,
    pub catalog_path: Option<String>,

    // Feature configs
    pub llm: Option<LlmConfig>,
    pub spotify: Option<SpotifyConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_sec: Option<u64>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct SpotifyConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub timeout_sec: Option<u64>,
    pub search_limit: Option<usize>,
}

impl FileConfig {
    /// Loads a TOML config file. A relative `catalog_path` is resolved
    /// against the directory containing the config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let mut config: FileConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        if let (Some(catalog_path), Some(config_dir)) = (&config.catalog_path, path.parent()) {
            let catalog_path = Path::new(catalog_path);
            if catalog_path.is_relative() {
                let resolved = config_dir.join(catalog_path);
                config.catalog_path = Some(resolved.to_string_lossy().into_owned());
            }
        }

        Ok(config)
    }
}
