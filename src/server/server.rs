use anyhow::{Context, Result};
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::info;

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{log_requests, state::*, ServerConfig};
use crate::mood::Mood;
use crate::resolver::{
    resolve_mood_to_catalog, resolve_text_to_music, CatalogMoodResolver, ClassificationSource,
    TextMoodResolver,
};
use crate::track_search::SearchedTrack;

#[derive(Deserialize, Debug, Default)]
struct GenerateMusicBody {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Serialize, Debug)]
struct GenerateMusicResponse {
    pub mood: Mood,
    pub title: String,
    #[serde(rename = "videoId")]
    pub video_id: String,
    pub vibe: String,
    pub source: ClassificationSource,
}

#[derive(Deserialize, Debug, Default)]
struct GetSongsBody {
    #[serde(default)]
    pub mood: Option<String>,
}

#[derive(Serialize, Debug)]
struct GetSongsResponse {
    pub spotify_songs: Vec<SearchedTrack>,
}

#[derive(Serialize, Debug)]
struct ErrorBody<'a> {
    pub error: &'a str,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorBody { error: message })).into_response()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

async fn home() -> impl IntoResponse {
    "Moodtunes server is running"
}

async fn get_moods() -> Json<Vec<&'static str>> {
    Json(Mood::ALL.iter().map(Mood::as_str).collect())
}

async fn generate_music(
    State(resolver): State<GuardedTextResolver>,
    Json(body): Json<GenerateMusicBody>,
) -> Response {
    let Some(text) = non_blank(body.text) else {
        return error_response(StatusCode::BAD_REQUEST, "Text prompt not provided");
    };

    let resolution = resolve_text_to_music(&resolver, &text).await;

    // Only reachable if the catalog holds an entry without an id.
    if resolution.reference.external_id.is_empty() {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, &resolution.title);
    }

    Json(GenerateMusicResponse {
        mood: resolution.mood,
        title: resolution.title,
        video_id: resolution.reference.external_id,
        vibe: resolution.vibe,
        source: resolution.source,
    })
    .into_response()
}

async fn get_songs(
    State(resolver): State<GuardedCatalogResolver>,
    Json(body): Json<GetSongsBody>,
) -> Response {
    let Some(label) = non_blank(body.mood) else {
        return error_response(StatusCode::BAD_REQUEST, "Mood not provided");
    };

    let mood = Mood::from_label_or_neutral(&label);
    let spotify_songs = resolve_mood_to_catalog(&resolver, mood).await;
    Json(GetSongsResponse { spotify_songs }).into_response()
}

pub fn make_app(
    config: ServerConfig,
    text_resolver: Arc<TextMoodResolver>,
    catalog_resolver: Arc<CatalogMoodResolver>,
) -> Router {
    let state = ServerState::new(config.clone(), text_resolver, catalog_resolver);

    let api_routes: Router = Router::new()
        .route("/generate_music", post(generate_music))
        .route("/get_songs", post(get_songs))
        .route("/moods", get(get_moods))
        .with_state(state.clone());

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new().route("/", get(home)),
    };

    home_router
        .merge(api_routes)
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(
    config: ServerConfig,
    text_resolver: Arc<TextMoodResolver>,
    catalog_resolver: Arc<CatalogMoodResolver>,
) -> Result<()> {
    let port = config.port;
    let app = make_app(config, text_resolver, catalog_resolver);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;

    info!("Ready to serve at port {}!", port);
    Ok(axum::serve(listener, app).await?)
}
