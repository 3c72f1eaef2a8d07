use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

use super::songs::SongDto;
use super::{ResourceError, ResourceResult};
use crate::music_store::{Playlist, PlaylistSong, SqliteMusicStore, StoreSession};

const INVALID_SONG_IDS: &str = "One or more song IDs are invalid";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistDto {
    pub id: i64,
    pub name: String,
    pub song_ids: Vec<i64>,
}

impl PlaylistDto {
    fn new(playlist: Playlist, links: &[PlaylistSong]) -> Self {
        PlaylistDto {
            id: playlist.id,
            name: playlist.name,
            song_ids: links.iter().map(|link| link.song_id).collect(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistBody {
    pub name: String,
    #[serde(default)]
    pub song_ids: Vec<i64>,
}

/// Drop repeated ids, keeping the first occurrence, so every (playlist, song)
/// pair is written once.
fn distinct_song_ids(song_ids: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::with_capacity(song_ids.len());
    song_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect()
}

fn ensure_songs_exist(session: &StoreSession, song_ids: &[i64]) -> ResourceResult<()> {
    let missing = session.missing_song_ids(song_ids)?;
    if missing.is_empty() {
        Ok(())
    } else {
        debug!("Rejecting playlist: unknown song ids {:?}", missing);
        Err(ResourceError::Validation(INVALID_SONG_IDS.to_string()))
    }
}

pub fn list(store: &SqliteMusicStore) -> ResourceResult<Vec<PlaylistDto>> {
    let session = store.session()?;
    let playlists = session.query_playlists_with_links()?;
    Ok(playlists
        .into_iter()
        .map(|(playlist, links)| PlaylistDto::new(playlist, &links))
        .collect())
}

pub fn find(store: &SqliteMusicStore, id: i64) -> ResourceResult<PlaylistDto> {
    let session = store.session()?;
    let playlist = session.find_playlist(id)?.ok_or(ResourceError::NotFound)?;
    let links = session.playlist_links(id)?;
    Ok(PlaylistDto::new(playlist, &links))
}

/// The playlist's songs in playlist order.
pub fn songs(store: &SqliteMusicStore, id: i64) -> ResourceResult<Vec<SongDto>> {
    let session = store.session()?;
    let loaded = session.load_playlist(id)?.ok_or(ResourceError::NotFound)?;
    Ok(loaded.songs.into_iter().map(SongDto::from).collect())
}

pub fn create(store: &SqliteMusicStore, body: &PlaylistBody) -> ResourceResult<PlaylistDto> {
    let song_ids = distinct_song_ids(&body.song_ids);

    let session = store.session()?;
    ensure_songs_exist(&session, &song_ids)?;
    let playlist = session.add_playlist(&body.name)?;
    session.link_songs(playlist.id, &song_ids)?;
    session.save()?;

    info!(
        "Created playlist {} ({}) with {} songs",
        playlist.id,
        playlist.name,
        song_ids.len()
    );
    Ok(PlaylistDto {
        id: playlist.id,
        name: playlist.name,
        song_ids,
    })
}

/// Replaces the name and the whole membership of a playlist.
pub fn update(store: &SqliteMusicStore, id: i64, body: &PlaylistBody) -> ResourceResult<()> {
    let song_ids = distinct_song_ids(&body.song_ids);

    let session = store.session()?;
    if session.find_playlist(id)?.is_none() {
        return Err(ResourceError::NotFound);
    }
    ensure_songs_exist(&session, &song_ids)?;
    session.rename_playlist(id, &body.name)?;
    session.clear_links(id)?;
    session.link_songs(id, &song_ids)?;
    session.save()?;
    Ok(())
}

pub fn delete(store: &SqliteMusicStore, id: i64) -> ResourceResult<()> {
    let session = store.session()?;
    if !session.remove_playlist(id)? {
        return Err(ResourceError::NotFound);
    }
    session.save()?;
    info!("Deleted playlist {}", id);
    Ok(())
}
