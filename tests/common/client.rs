//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per endpoint. When API routes or request
//! formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .unwrap_or_else(|e| panic!("GET {} failed: {}", path, e))
    }

    async fn post(&self, path: &str, body: Value) -> Response {
        self.client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap_or_else(|e| panic!("POST {} failed: {}", path, e))
    }

    async fn put(&self, path: &str, body: Value) -> Response {
        self.client
            .put(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap_or_else(|e| panic!("PUT {} failed: {}", path, e))
    }

    async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .unwrap_or_else(|e| panic!("DELETE {} failed: {}", path, e))
    }

    /// GET /
    pub async fn get_home(&self) -> Response {
        self.get("/").await
    }

    // ========================================================================
    // Artist Endpoints
    // ========================================================================

    /// GET /artists
    pub async fn get_artists(&self) -> Response {
        self.get("/artists").await
    }

    /// GET /artists/{id}
    pub async fn get_artist(&self, id: i64) -> Response {
        self.get(&format!("/artists/{}", id)).await
    }

    /// POST /artists
    pub async fn create_artist(&self, name: &str) -> Response {
        self.post("/artists", json!({ "name": name })).await
    }

    /// PUT /artists/{id}
    pub async fn update_artist(&self, id: i64, name: &str) -> Response {
        self.put(&format!("/artists/{}", id), json!({ "name": name }))
            .await
    }

    /// DELETE /artists/{id}
    pub async fn delete_artist(&self, id: i64) -> Response {
        self.delete(&format!("/artists/{}", id)).await
    }

    // ========================================================================
    // Song Endpoints
    // ========================================================================

    /// GET /songs
    pub async fn get_songs(&self) -> Response {
        self.get("/songs").await
    }

    /// GET /songs/{id}
    pub async fn get_song(&self, id: i64) -> Response {
        self.get(&format!("/songs/{}", id)).await
    }

    /// GET /songs/by-artist/{artistId}
    pub async fn get_songs_by_artist(&self, artist_id: i64) -> Response {
        self.get(&format!("/songs/by-artist/{}", artist_id)).await
    }

    /// POST /songs
    pub async fn create_song(&self, title: &str, duration_seconds: i64, artist_id: i64) -> Response {
        self.post(
            "/songs",
            json!({
                "title": title,
                "durationSeconds": duration_seconds,
                "artistId": artist_id
            }),
        )
        .await
    }

    /// PUT /songs/{id}
    pub async fn update_song(
        &self,
        id: i64,
        title: &str,
        duration_seconds: i64,
        artist_id: i64,
    ) -> Response {
        self.put(
            &format!("/songs/{}", id),
            json!({
                "title": title,
                "durationSeconds": duration_seconds,
                "artistId": artist_id
            }),
        )
        .await
    }

    /// DELETE /songs/{id}
    pub async fn delete_song(&self, id: i64) -> Response {
        self.delete(&format!("/songs/{}", id)).await
    }

    // ========================================================================
    // Playlist Endpoints
    // ========================================================================

    /// GET /playlists
    pub async fn get_playlists(&self) -> Response {
        self.get("/playlists").await
    }

    /// GET /playlists/{id}
    pub async fn get_playlist(&self, id: i64) -> Response {
        self.get(&format!("/playlists/{}", id)).await
    }

    /// GET /playlists/{id}/songs
    pub async fn get_playlist_songs(&self, id: i64) -> Response {
        self.get(&format!("/playlists/{}/songs", id)).await
    }

    /// POST /playlists
    pub async fn create_playlist(&self, name: &str, song_ids: &[i64]) -> Response {
        self.post("/playlists", json!({ "name": name, "songIds": song_ids }))
            .await
    }

    /// PUT /playlists/{id}
    pub async fn update_playlist(&self, id: i64, name: &str, song_ids: &[i64]) -> Response {
        self.put(
            &format!("/playlists/{}", id),
            json!({ "name": name, "songIds": song_ids }),
        )
        .await
    }

    /// DELETE /playlists/{id}
    pub async fn delete_playlist(&self, id: i64) -> Response {
        self.delete(&format!("/playlists/{}", id)).await
    }

    /// POST with a raw body, for malformed request checks
    pub async fn post_raw(&self, path: &str, body: &'static str) -> Response {
        self.client
            .post(self.url(path))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .unwrap_or_else(|e| panic!("POST {} failed: {}", path, e))
    }
}
