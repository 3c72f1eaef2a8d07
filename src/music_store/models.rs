//! Stored entities.
//!
//! Relationships are plain foreign-key fields resolved by id lookup in the
//! store; entities never hold references to each other.

// =============================================================================
// Core Entities
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artist {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Song {
    pub id: i64,
    pub title: String,
    pub duration_seconds: i64,
    pub artist_id: i64,
}

/// A song that has not been inserted yet, so it has no id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewSong {
    pub title: String,
    pub duration_seconds: i64,
    pub artist_id: i64,
}

impl NewSong {
    pub fn with_id(self, id: i64) -> Song {
        Song {
            id,
            title: self.title,
            duration_seconds: self.duration_seconds,
            artist_id: self.artist_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Playlist {
    pub id: i64,
    pub name: String,
}

// =============================================================================
// Association Rows
// =============================================================================

/// Links one playlist to one song. `(playlist_id, song_id)` is unique;
/// `position` orders the songs within the playlist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaylistSong {
    pub playlist_id: i64,
    pub song_id: i64,
    pub position: i64,
}

// =============================================================================
// Loaded Shapes
// =============================================================================

/// A playlist together with the songs it references, in playlist order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedPlaylist {
    pub playlist: Playlist,
    pub songs: Vec<Song>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreCounts {
    pub artists: usize,
    pub songs: usize,
    pub playlists: usize,
}
