use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use moodtunes_server::config::{AppConfig, CliConfig, FileConfig};
use moodtunes_server::llm::{
    CompletionOptions, GeminiProvider, LlmProvider, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL,
};
use moodtunes_server::mood::{MoodCatalog, MoodClassifier};
use moodtunes_server::resolver::{CatalogMoodResolver, TextMoodResolver};
use moodtunes_server::server::{run_server, RequestsLoggingLevel};
use moodtunes_server::track_search::{SpotifyClient, TrackSearch};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    if path_buf.is_absolute() {
        return Ok(path_buf);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(path_buf))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to a TOML config file. Its values override the CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 5000)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// TOML file replacing the built-in mood catalog.
    #[clap(long, value_parser = parse_path)]
    pub catalog_path: Option<PathBuf>,

    /// Gemini API key. Without it, moods are detected by keywords only.
    #[clap(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Gemini model used for mood classification.
    #[clap(long, default_value = DEFAULT_GEMINI_MODEL)]
    pub gemini_model: String,

    /// Base URL of the Gemini API.
    #[clap(long, default_value = DEFAULT_GEMINI_BASE_URL)]
    pub gemini_base_url: String,

    /// Timeout in seconds for LLM requests.
    #[clap(long, default_value_t = 15)]
    pub llm_timeout_sec: u64,

    /// Spotify client id. Mood song search is disabled without credentials.
    #[clap(long, env = "SPOTIFY_CLIENT_ID")]
    pub spotify_client_id: Option<String>,

    /// Spotify client secret.
    #[clap(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    pub spotify_client_secret: Option<String>,

    /// Timeout in seconds for Spotify requests.
    #[clap(long, default_value_t = 10)]
    pub search_timeout_sec: u64,

    /// Maximum number of songs returned per mood search (1-50).
    #[clap(long, default_value_t = 10)]
    pub search_limit: usize,
}

impl From<&CliArgs> for CliConfig {
    fn from(args: &CliArgs) -> Self {
        CliConfig {
            port: args.port,
            logging_level: args.logging_level.clone(),
            frontend_dir_path: args.frontend_dir_path.clone(),
            catalog_path: args.catalog_path.clone(),
            gemini_api_key: args.gemini_api_key.clone(),
            gemini_model: args.gemini_model.clone(),
            gemini_base_url: args.gemini_base_url.clone(),
            llm_timeout_sec: args.llm_timeout_sec,
            spotify_client_id: args.spotify_client_id.clone(),
            spotify_client_secret: args.spotify_client_secret.clone(),
            search_timeout_sec: args.search_timeout_sec,
            search_limit: args.search_limit,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config file {:?}...", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let config = AppConfig::resolve(&CliConfig::from(&cli_args), file_config)?;

    let catalog = match &config.catalog_path {
        Some(path) => {
            info!("Loading mood catalog from {:?}...", path);
            MoodCatalog::load(path)?
        }
        None => MoodCatalog::curated(),
    };

    let classifier = match &config.llm {
        Some(llm) => {
            info!(model = %llm.model, "Gemini mood classification enabled");
            let provider = GeminiProvider::new(&llm.base_url, &llm.model, &llm.api_key);
            if let Err(e) = provider.health_check().await {
                warn!(error = %e, "Gemini health check failed, requests may fall back to keywords");
            }
            let options = CompletionOptions {
                temperature: llm.temperature,
                max_tokens: None,
                timeout: llm.timeout,
            };
            Some(MoodClassifier::new(Arc::new(provider), options))
        }
        None => {
            warn!("GEMINI_API_KEY is not set, mood detection will use the keyword fallback");
            None
        }
    };

    let search: Option<Arc<dyn TrackSearch>> = match &config.spotify {
        Some(spotify) => {
            match SpotifyClient::new(&spotify.client_id, &spotify.client_secret, spotify.timeout) {
                Ok(client) => {
                    info!("Spotify search enabled");
                    Some(Arc::new(client))
                }
                Err(e) => {
                    warn!(error = %e, "Failed to initialize Spotify client, song search disabled");
                    None
                }
            }
        }
        None => {
            warn!("Spotify credentials not set, song search disabled");
            None
        }
    };

    let text_resolver = Arc::new(TextMoodResolver::new(Arc::new(catalog), classifier));
    let catalog_resolver = Arc::new(CatalogMoodResolver::new(search, config.search_limit));
    info!(
        llm = text_resolver.has_llm(),
        song_search = catalog_resolver.is_available(),
        port = config.port,
        "Starting server"
    );

    run_server(config.server_config(), text_resolver, catalog_resolver).await
}
