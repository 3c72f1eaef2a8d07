//! Resource handlers for artists, songs and playlists.
//!
//! Each operation opens one [`StoreSession`](crate::music_store::StoreSession)
//! on the store it is given, so every operation is a single transaction: it
//! either saves everything it wrote or nothing at all.

pub mod artists;
pub mod playlists;
pub mod songs;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Not found")]
    NotFound,

    /// A referenced id does not exist.
    #[error("{0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

pub type ResourceResult<T> = Result<T, ResourceError>;

pub use artists::{ArtistBody, ArtistDto};
pub use playlists::{PlaylistBody, PlaylistDto};
pub use songs::{SongBody, SongDto};
