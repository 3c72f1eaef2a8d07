use anyhow::{Context, Result};
use std::time::Duration;

use tracing::{error, info};

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::{log_requests, state::*, ServerConfig};
use crate::music_store::StoreCounts;
use crate::resources::{
    artists, playlists, songs, ArtistBody, ArtistDto, PlaylistBody, PlaylistDto, ResourceError,
    ResourceResult, SongBody, SongDto,
};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    #[serde(flatten)]
    pub counts: CountsBody,
}

#[derive(Serialize)]
struct CountsBody {
    artists: usize,
    songs: usize,
    playlists: usize,
}

impl From<StoreCounts> for CountsBody {
    fn from(counts: StoreCounts) -> Self {
        CountsBody {
            artists: counts.artists,
            songs: counts.songs,
            playlists: counts.playlists,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

impl IntoResponse for ResourceError {
    fn into_response(self) -> Response {
        match self {
            ResourceError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ResourceError::Validation(error) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody { error })).into_response()
            }
            ResourceError::Storage(err) => {
                error!("Storage failure: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

fn created<T: Serialize>(location: String, body: T) -> Response {
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(body)).into_response()
}

async fn home(State(state): State<ServerState>) -> ResourceResult<Json<ServerStats>> {
    let counts = state.store.counts()?;
    Ok(Json(ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        counts: counts.into(),
    }))
}

async fn get_artists(State(store): State<GuardedMusicStore>) -> ResourceResult<Json<Vec<ArtistDto>>> {
    Ok(Json(artists::list(&store)?))
}

async fn get_artist(
    State(store): State<GuardedMusicStore>,
    Path(id): Path<i64>,
) -> ResourceResult<Json<ArtistDto>> {
    Ok(Json(artists::find(&store, id)?))
}

async fn post_artist(
    State(store): State<GuardedMusicStore>,
    Json(body): Json<ArtistBody>,
) -> ResourceResult<Response> {
    let artist = artists::create(&store, &body)?;
    Ok(created(format!("/artists/{}", artist.id), artist))
}

async fn put_artist(
    State(store): State<GuardedMusicStore>,
    Path(id): Path<i64>,
    Json(body): Json<ArtistBody>,
) -> ResourceResult<StatusCode> {
    artists::update(&store, id, &body)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_artist(
    State(store): State<GuardedMusicStore>,
    Path(id): Path<i64>,
) -> ResourceResult<StatusCode> {
    artists::delete(&store, id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_songs(State(store): State<GuardedMusicStore>) -> ResourceResult<Json<Vec<SongDto>>> {
    Ok(Json(songs::list(&store)?))
}

async fn get_song(
    State(store): State<GuardedMusicStore>,
    Path(id): Path<i64>,
) -> ResourceResult<Json<SongDto>> {
    Ok(Json(songs::find(&store, id)?))
}

async fn get_songs_by_artist(
    State(store): State<GuardedMusicStore>,
    Path(artist_id): Path<i64>,
) -> ResourceResult<Json<Vec<SongDto>>> {
    Ok(Json(songs::list_by_artist(&store, artist_id)?))
}

async fn post_song(
    State(store): State<GuardedMusicStore>,
    Json(body): Json<SongBody>,
) -> ResourceResult<Response> {
    let song = songs::create(&store, &body)?;
    Ok(created(format!("/songs/{}", song.id), song))
}

async fn put_song(
    State(store): State<GuardedMusicStore>,
    Path(id): Path<i64>,
    Json(body): Json<SongBody>,
) -> ResourceResult<StatusCode> {
    songs::update(&store, id, &body)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_song(
    State(store): State<GuardedMusicStore>,
    Path(id): Path<i64>,
) -> ResourceResult<StatusCode> {
    songs::delete(&store, id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_playlists(
    State(store): State<GuardedMusicStore>,
) -> ResourceResult<Json<Vec<PlaylistDto>>> {
    Ok(Json(playlists::list(&store)?))
}

async fn get_playlist(
    State(store): State<GuardedMusicStore>,
    Path(id): Path<i64>,
) -> ResourceResult<Json<PlaylistDto>> {
    Ok(Json(playlists::find(&store, id)?))
}

async fn get_playlist_songs(
    State(store): State<GuardedMusicStore>,
    Path(id): Path<i64>,
) -> ResourceResult<Json<Vec<SongDto>>> {
    Ok(Json(playlists::songs(&store, id)?))
}

async fn post_playlist(
    State(store): State<GuardedMusicStore>,
    Json(body): Json<PlaylistBody>,
) -> ResourceResult<Response> {
    let playlist = playlists::create(&store, &body)?;
    Ok(created(format!("/playlists/{}", playlist.id), playlist))
}

async fn put_playlist(
    State(store): State<GuardedMusicStore>,
    Path(id): Path<i64>,
    Json(body): Json<PlaylistBody>,
) -> ResourceResult<StatusCode> {
    playlists::update(&store, id, &body)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_playlist(
    State(store): State<GuardedMusicStore>,
    Path(id): Path<i64>,
) -> ResourceResult<StatusCode> {
    playlists::delete(&store, id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn make_app(config: ServerConfig, store: GuardedMusicStore) -> Router {
    let state = ServerState::new(config, store);

    let artist_routes: Router = Router::new()
        .route("/", get(get_artists).post(post_artist))
        .route(
            "/{id}",
            get(get_artist).put(put_artist).delete(delete_artist),
        )
        .with_state(state.clone());

    let song_routes: Router = Router::new()
        .route("/", get(get_songs).post(post_song))
        .route("/{id}", get(get_song).put(put_song).delete(delete_song))
        .route("/by-artist/{artist_id}", get(get_songs_by_artist))
        .with_state(state.clone());

    let playlist_routes: Router = Router::new()
        .route("/", get(get_playlists).post(post_playlist))
        .route(
            "/{id}",
            get(get_playlist).put(put_playlist).delete(delete_playlist),
        )
        .route("/{id}/songs", get(get_playlist_songs))
        .with_state(state.clone());

    Router::new()
        .route("/", get(home))
        .with_state(state.clone())
        .nest("/artists", artist_routes)
        .nest("/songs", song_routes)
        .nest("/playlists", playlist_routes)
        .layer(middleware::from_fn_with_state(state, log_requests))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!("Failed to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received, draining connections...");
}

pub async fn run_server(store: GuardedMusicStore, config: ServerConfig) -> Result<()> {
    let port = config.port;
    let app = make_app(config, store);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;

    info!("Ready to serve at port {}!", port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}
