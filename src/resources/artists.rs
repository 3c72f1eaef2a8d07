use serde::{Deserialize, Serialize};
use tracing::info;

use super::{ResourceError, ResourceResult};
use crate::music_store::{Artist, SqliteMusicStore};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistDto {
    pub id: i64,
    pub name: String,
}

impl From<Artist> for ArtistDto {
    fn from(artist: Artist) -> Self {
        ArtistDto {
            id: artist.id,
            name: artist.name,
        }
    }
}

/// Request body for create and update. An `id` sent by the client is ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct ArtistBody {
    pub name: String,
}

pub fn list(store: &SqliteMusicStore) -> ResourceResult<Vec<ArtistDto>> {
    let session = store.session()?;
    let artists = session.query_artists()?;
    Ok(artists.into_iter().map(ArtistDto::from).collect())
}

pub fn find(store: &SqliteMusicStore, id: i64) -> ResourceResult<ArtistDto> {
    let session = store.session()?;
    session
        .find_artist(id)?
        .map(ArtistDto::from)
        .ok_or(ResourceError::NotFound)
}

pub fn create(store: &SqliteMusicStore, body: &ArtistBody) -> ResourceResult<ArtistDto> {
    let session = store.session()?;
    let artist = session.add_artist(&body.name)?;
    session.save()?;
    info!("Created artist {} ({})", artist.id, artist.name);
    Ok(artist.into())
}

pub fn update(store: &SqliteMusicStore, id: i64, body: &ArtistBody) -> ResourceResult<()> {
    let session = store.session()?;
    let artist = Artist {
        id,
        name: body.name.clone(),
    };
    if !session.replace_artist(&artist)? {
        return Err(ResourceError::NotFound);
    }
    session.save()?;
    Ok(())
}

/// Deletes the artist and every song it owns.
pub fn delete(store: &SqliteMusicStore, id: i64) -> ResourceResult<()> {
    let session = store.session()?;
    if session.find_artist(id)?.is_none() {
        return Err(ResourceError::NotFound);
    }
    let songs = session.query_songs_by_artist(id)?;
    session.remove_artist(id)?;
    session.save()?;
    info!("Deleted artist {} and its {} songs", id, songs.len());
    Ok(())
}
