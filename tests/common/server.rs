//! Test server lifecycle management
//!
//! Each test gets its own server on a random port. The server shuts down
//! when the `TestServer` is dropped.

use moodtunes_server::llm::{CompletionOptions, GeminiProvider};
use moodtunes_server::mood::{MoodCatalog, MoodClassifier};
use moodtunes_server::resolver::{CatalogMoodResolver, TextMoodResolver};
use moodtunes_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use moodtunes_server::track_search::{SpotifyClient, TrackSearch};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::{FakeGemini, FakeSpotify};

pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,
    pub client: reqwest::Client,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a server wired to the given fakes. `None` leaves the
    /// corresponding capability unconfigured.
    pub async fn spawn(gemini: Option<&FakeGemini>, spotify: Option<&FakeSpotify>) -> Self {
        let classifier = gemini.map(|fake| {
            let provider = GeminiProvider::new(&fake.base_url, "gemini-test", "test-key");
            let options = CompletionOptions {
                timeout: Duration::from_secs(2),
                ..Default::default()
            };
            MoodClassifier::new(Arc::new(provider), options)
        });

        let search: Option<Arc<dyn TrackSearch>> = spotify.map(|fake| {
            let client = SpotifyClient::new("client-id", "client-secret", Duration::from_secs(2))
                .expect("Failed to create Spotify client")
                .with_endpoints(&fake.token_url(), &fake.api_base());
            Arc::new(client) as Arc<dyn TrackSearch>
        });

        let text_resolver = Arc::new(TextMoodResolver::new(
            Arc::new(MoodCatalog::curated()),
            classifier,
        ));
        let catalog_resolver = Arc::new(CatalogMoodResolver::new(search, 10));

        let config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            port: 0,
            frontend_dir_path: None,
        };
        let app = make_app(config, text_resolver, catalog_resolver);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
            _shutdown_tx: Some(shutdown_tx),
        }
    }

    pub async fn post_json(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .expect("Request failed")
    }
}
