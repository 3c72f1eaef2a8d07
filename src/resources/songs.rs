use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ResourceError, ResourceResult};
use crate::music_store::{NewSong, Song, SqliteMusicStore, StoreSession};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongDto {
    pub id: i64,
    pub title: String,
    pub duration_seconds: i64,
    pub artist_id: i64,
}

impl From<Song> for SongDto {
    fn from(song: Song) -> Self {
        SongDto {
            id: song.id,
            title: song.title,
            duration_seconds: song.duration_seconds,
            artist_id: song.artist_id,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongBody {
    pub title: String,
    pub duration_seconds: i64,
    pub artist_id: i64,
}

impl From<&SongBody> for NewSong {
    fn from(body: &SongBody) -> Self {
        NewSong {
            title: body.title.clone(),
            duration_seconds: body.duration_seconds,
            artist_id: body.artist_id,
        }
    }
}

fn ensure_artist_exists(session: &StoreSession, artist_id: i64) -> ResourceResult<()> {
    if session.artist_exists(artist_id)? {
        Ok(())
    } else {
        debug!("Rejecting song: artist {} does not exist", artist_id);
        Err(ResourceError::Validation(format!(
            "Artist with ID {} not found",
            artist_id
        )))
    }
}

pub fn list(store: &SqliteMusicStore) -> ResourceResult<Vec<SongDto>> {
    let session = store.session()?;
    let songs = session.query_songs()?;
    Ok(songs.into_iter().map(SongDto::from).collect())
}

pub fn find(store: &SqliteMusicStore, id: i64) -> ResourceResult<SongDto> {
    let session = store.session()?;
    session
        .find_song(id)?
        .map(SongDto::from)
        .ok_or(ResourceError::NotFound)
}

/// Songs of one artist. An unknown artist simply has no songs.
pub fn list_by_artist(store: &SqliteMusicStore, artist_id: i64) -> ResourceResult<Vec<SongDto>> {
    let session = store.session()?;
    let songs = session.query_songs_by_artist(artist_id)?;
    Ok(songs.into_iter().map(SongDto::from).collect())
}

pub fn create(store: &SqliteMusicStore, body: &SongBody) -> ResourceResult<SongDto> {
    let session = store.session()?;
    ensure_artist_exists(&session, body.artist_id)?;
    let song = session.add_song(&body.into())?;
    session.save()?;
    info!("Created song {} ({})", song.id, song.title);
    Ok(song.into())
}

/// Replaces title, duration and artist. The new artist must exist.
pub fn update(store: &SqliteMusicStore, id: i64, body: &SongBody) -> ResourceResult<()> {
    let session = store.session()?;
    if session.find_song(id)?.is_none() {
        return Err(ResourceError::NotFound);
    }
    ensure_artist_exists(&session, body.artist_id)?;
    session.replace_song(&NewSong::from(body).with_id(id))?;
    session.save()?;
    Ok(())
}

pub fn delete(store: &SqliteMusicStore, id: i64) -> ResourceResult<()> {
    let session = store.session()?;
    if !session.remove_song(id)? {
        return Err(ResourceError::NotFound);
    }
    session.save()?;
    info!("Deleted song {}", id);
    Ok(())
}
