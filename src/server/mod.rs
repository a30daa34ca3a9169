//! Mock catalog backend.
//!
//! Stands in for the real search proxy during development: a health
//! probe and a `/search` endpoint answering every query with the demo
//! catalog. Not part of the player core.

use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;

use crate::errors::AppError;
use crate::models::{Source, Track};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    query: String,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    20
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/search", get(search))
}

pub async fn run(port: u16) -> Result<(), AppError> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("[Server] Listening on http://{}", addr);
    axum::serve(listener, router())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "message": "Server is running" }))
}

async fn search(Query(params): Query<SearchParams>) -> Response {
    if params.query.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Query parameter is required" })),
        )
            .into_response();
    }

    log::info!(
        "[Server] Searching for: {}, limit: {}",
        params.query,
        params.limit
    );
    let tracks: Vec<Track> = demo_tracks().into_iter().take(params.limit).collect();
    Json(tracks).into_response()
}

const DEMO_AUDIO_URL: &str =
    "https://audio-samples.github.io/samples/mp3/blizzard_biased/blizzard_biased.mp3";

/// Static demo catalog served while no real provider is reachable.
pub fn demo_tracks() -> Vec<Track> {
    let entries: [(&str, &str, &str, &str, u64, &str, &str); 6] = [
        (
            "demo_1",
            "Jazz Improvisation",
            "Free Jazz Collective",
            "Open Source Jazz",
            180,
            "https://images.unsplash.com/photo-1511192336575-5a79af67a629?w=300&h=300&fit=crop",
            "Jazz",
        ),
        (
            "demo_2",
            "Classical Symphony",
            "Open Orchestra",
            "Public Domain Classics",
            240,
            "https://images.unsplash.com/photo-1493225457124-a3eb161ffa5f?w=300&h=300&fit=crop",
            "Classical",
        ),
        (
            "demo_3",
            "Electronic Beats",
            "Digital Commons",
            "Free Electronic Music",
            200,
            "https://images.unsplash.com/photo-1493225457124-a3eb161ffa5f?w=300&h=300&fit=crop",
            "Electronic",
        ),
        (
            "demo_4",
            "Folk Ballad",
            "Traditional Folk",
            "Public Domain Folk",
            160,
            "https://images.unsplash.com/photo-1511192336575-5a79af67a629?w=300&h=300&fit=crop",
            "Folk",
        ),
        (
            "demo_5",
            "Rock Anthem",
            "Indie Rock Band",
            "Open Source Rock",
            220,
            "https://images.unsplash.com/photo-1493225457124-a3eb161ffa5f?w=300&h=300&fit=crop",
            "Rock",
        ),
        (
            "demo_6",
            "Blues Guitar",
            "Delta Blues",
            "Public Domain Blues",
            190,
            "https://images.unsplash.com/photo-1511192336575-5a79af67a629?w=300&h=300&fit=crop",
            "Blues",
        ),
    ];

    entries
        .into_iter()
        .map(|(id, title, artist, album, duration, image, genre)| Track {
            id: id.to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            album: album.to_string(),
            duration,
            preview_duration: duration,
            image: image.to_string(),
            preview_url: Some(DEMO_AUDIO_URL.to_string()),
            full_track_url: Some(DEMO_AUDIO_URL.to_string()),
            stream_url: Some(DEMO_AUDIO_URL.to_string()),
            download_url: Some(DEMO_AUDIO_URL.to_string()),
            source: Source::Jiosaavn,
            license: Some("Creative Commons".to_string()),
            genre: Some(genre.to_string()),
        })
        .collect()
}
