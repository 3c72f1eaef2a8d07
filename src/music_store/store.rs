//! SQLite-backed music store.
//!
//! All reads and writes go through a [`StoreSession`], which owns the connection
//! lock and one immediate transaction for as long as it lives. `save()` commits;
//! dropping the session without saving rolls everything back.

use super::models::*;
use super::schema::MUSIC_VERSIONED_SCHEMAS;
use crate::sqlite_persistence::open_versioned;
use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

pub struct SqliteMusicStore {
    conn: Mutex<Connection>,
}

impl SqliteMusicStore {
    /// Open (or create) the music database at `db_path`, migrating it to the
    /// latest schema version if needed.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();
        let conn = Connection::open_with_flags(
            db_path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open music database at {:?}", db_path))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::from_connection(conn)
    }

    /// A store backed by a private in-memory database.
    pub fn in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> Result<Self> {
        open_versioned(&mut conn, MUSIC_VERSIONED_SCHEMAS)?;
        let store = SqliteMusicStore {
            conn: Mutex::new(conn),
        };

        let counts = store.counts()?;
        info!(
            "Opened music store: {} artists, {} songs, {} playlists",
            counts.artists, counts.songs, counts.playlists
        );
        Ok(store)
    }

    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("Music store connection lock is poisoned"))
    }

    /// Start a session. Blocks until any other session has finished.
    pub fn session(&self) -> Result<StoreSession<'_>> {
        let conn = self.lock()?;
        conn.execute_batch("BEGIN IMMEDIATE")?;
        Ok(StoreSession { conn, open: true })
    }

    pub fn counts(&self) -> Result<StoreCounts> {
        let conn = self.lock()?;
        let count = |table: &str| -> Result<usize> {
            let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| {
                r.get(0)
            })?;
            Ok(n as usize)
        };
        Ok(StoreCounts {
            artists: count("artists")?,
            songs: count("songs")?,
            playlists: count("playlists")?,
        })
    }
}

/// One transaction against the music store.
pub struct StoreSession<'a> {
    conn: MutexGuard<'a, Connection>,
    open: bool,
}

impl Drop for StoreSession<'_> {
    fn drop(&mut self) {
        // Read-only sessions are never saved and end here too.
        if self.open {
            if let Err(e) = self.conn.execute_batch("ROLLBACK") {
                warn!("Failed to roll back store session: {}", e);
            }
        }
    }
}

fn parse_artist_row(row: &rusqlite::Row) -> rusqlite::Result<Artist> {
    Ok(Artist {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

fn parse_song_row(row: &rusqlite::Row) -> rusqlite::Result<Song> {
    Ok(Song {
        id: row.get(0)?,
        title: row.get(1)?,
        duration_seconds: row.get(2)?,
        artist_id: row.get(3)?,
    })
}

fn parse_playlist_row(row: &rusqlite::Row) -> rusqlite::Result<Playlist> {
    Ok(Playlist {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

fn parse_link_row(row: &rusqlite::Row) -> rusqlite::Result<PlaylistSong> {
    Ok(PlaylistSong {
        playlist_id: row.get(0)?,
        song_id: row.get(1)?,
        position: row.get(2)?,
    })
}

impl StoreSession<'_> {
    /// Commit everything done in this session.
    pub fn save(mut self) -> Result<()> {
        self.conn
            .execute_batch("COMMIT")
            .context("Failed to commit store session")?;
        self.open = false;
        Ok(())
    }

    // =========================================================================
    // Artists
    // =========================================================================

    pub fn find_artist(&self, id: i64) -> Result<Option<Artist>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, name FROM artists WHERE id = ?1")?;
        Ok(stmt.query_row(params![id], parse_artist_row).optional()?)
    }

    pub fn artist_exists(&self, id: i64) -> Result<bool> {
        Ok(self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM artists WHERE id = ?1)",
            params![id],
            |r| r.get(0),
        )?)
    }

    pub fn query_artists(&self) -> Result<Vec<Artist>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, name FROM artists ORDER BY id")?;
        let artists = stmt
            .query_map([], parse_artist_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(artists)
    }

    pub fn add_artist(&self, name: &str) -> Result<Artist> {
        self.conn
            .execute("INSERT INTO artists (name) VALUES (?1)", params![name])
            .context("Could not insert artist")?;
        let id = self.conn.last_insert_rowid();
        debug!("add_artist() assigned id {}", id);
        Ok(Artist {
            id,
            name: name.to_string(),
        })
    }

    /// Overwrite every field of an existing artist. Returns false if there is no
    /// artist with that id.
    pub fn replace_artist(&self, artist: &Artist) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE artists SET name = ?1 WHERE id = ?2",
            params![&artist.name, artist.id],
        )?;
        Ok(changed > 0)
    }

    /// Remove an artist together with its songs and their playlist memberships.
    pub fn remove_artist(&self, id: i64) -> Result<bool> {
        let links = self.conn.execute(
            "DELETE FROM playlist_songs WHERE song_id IN (SELECT id FROM songs WHERE artist_id = ?1)",
            params![id],
        )?;
        let songs = self
            .conn
            .execute("DELETE FROM songs WHERE artist_id = ?1", params![id])?;
        let removed = self
            .conn
            .execute("DELETE FROM artists WHERE id = ?1", params![id])?;
        debug!(
            "remove_artist({id}) removed {songs} songs and {links} playlist entries"
        );
        Ok(removed > 0)
    }

    // =========================================================================
    // Songs
    // =========================================================================

    pub fn find_song(&self, id: i64) -> Result<Option<Song>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, title, duration_seconds, artist_id FROM songs WHERE id = ?1",
        )?;
        Ok(stmt.query_row(params![id], parse_song_row).optional()?)
    }

    pub fn song_exists(&self, id: i64) -> Result<bool> {
        Ok(self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM songs WHERE id = ?1)",
            params![id],
            |r| r.get(0),
        )?)
    }

    /// The subset of `ids` that do not reference an existing song, in input order.
    pub fn missing_song_ids(&self, ids: &[i64]) -> Result<Vec<i64>> {
        let mut missing = Vec::new();
        for &id in ids {
            if !self.song_exists(id)? {
                missing.push(id);
            }
        }
        Ok(missing)
    }

    pub fn query_songs(&self) -> Result<Vec<Song>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, title, duration_seconds, artist_id FROM songs ORDER BY id",
        )?;
        let songs = stmt
            .query_map([], parse_song_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(songs)
    }

    pub fn query_songs_by_artist(&self, artist_id: i64) -> Result<Vec<Song>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, title, duration_seconds, artist_id FROM songs WHERE artist_id = ?1 ORDER BY id",
        )?;
        let songs = stmt
            .query_map(params![artist_id], parse_song_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(songs)
    }

    pub fn add_song(&self, song: &NewSong) -> Result<Song> {
        self.conn
            .execute(
                "INSERT INTO songs (title, duration_seconds, artist_id) VALUES (?1, ?2, ?3)",
                params![&song.title, song.duration_seconds, song.artist_id],
            )
            .context("Could not insert song")?;
        let id = self.conn.last_insert_rowid();
        debug!("add_song() assigned id {}", id);
        Ok(song.clone().with_id(id))
    }

    pub fn replace_song(&self, song: &Song) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE songs SET title = ?1, duration_seconds = ?2, artist_id = ?3 WHERE id = ?4",
            params![&song.title, song.duration_seconds, song.artist_id, song.id],
        )?;
        Ok(changed > 0)
    }

    /// Remove a song and every playlist membership pointing at it.
    pub fn remove_song(&self, id: i64) -> Result<bool> {
        let links = self
            .conn
            .execute("DELETE FROM playlist_songs WHERE song_id = ?1", params![id])?;
        let removed = self
            .conn
            .execute("DELETE FROM songs WHERE id = ?1", params![id])?;
        debug!("remove_song({id}) removed {links} playlist entries");
        Ok(removed > 0)
    }

    // =========================================================================
    // Playlists
    // =========================================================================

    pub fn find_playlist(&self, id: i64) -> Result<Option<Playlist>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, name FROM playlists WHERE id = ?1")?;
        Ok(stmt.query_row(params![id], parse_playlist_row).optional()?)
    }

    pub fn query_playlists(&self) -> Result<Vec<Playlist>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, name FROM playlists ORDER BY id")?;
        let playlists = stmt
            .query_map([], parse_playlist_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(playlists)
    }

    /// Every playlist with its association rows in playlist order.
    pub fn query_playlists_with_links(&self) -> Result<Vec<(Playlist, Vec<PlaylistSong>)>> {
        let playlists = self.query_playlists()?;

        let mut stmt = self.conn.prepare_cached(
            "SELECT playlist_id, song_id, position FROM playlist_songs ORDER BY playlist_id, position",
        )?;
        let mut links_by_playlist: HashMap<i64, Vec<PlaylistSong>> = HashMap::new();
        for link in stmt.query_map([], parse_link_row)? {
            let link = link?;
            links_by_playlist
                .entry(link.playlist_id)
                .or_default()
                .push(link);
        }

        Ok(playlists
            .into_iter()
            .map(|playlist| {
                let links = links_by_playlist.remove(&playlist.id).unwrap_or_default();
                (playlist, links)
            })
            .collect())
    }

    pub fn add_playlist(&self, name: &str) -> Result<Playlist> {
        self.conn
            .execute("INSERT INTO playlists (name) VALUES (?1)", params![name])
            .context("Could not insert playlist")?;
        let id = self.conn.last_insert_rowid();
        debug!("add_playlist() assigned id {}", id);
        Ok(Playlist {
            id,
            name: name.to_string(),
        })
    }

    pub fn rename_playlist(&self, id: i64, name: &str) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE playlists SET name = ?1 WHERE id = ?2",
            params![name, id],
        )?;
        Ok(changed > 0)
    }

    /// Remove a playlist and its association rows.
    pub fn remove_playlist(&self, id: i64) -> Result<bool> {
        let links = self.clear_links(id)?;
        let removed = self
            .conn
            .execute("DELETE FROM playlists WHERE id = ?1", params![id])?;
        debug!("remove_playlist({id}) removed {links} playlist entries");
        Ok(removed > 0)
    }

    pub fn playlist_links(&self, playlist_id: i64) -> Result<Vec<PlaylistSong>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT playlist_id, song_id, position FROM playlist_songs WHERE playlist_id = ?1 ORDER BY position",
        )?;
        let links = stmt
            .query_map(params![playlist_id], parse_link_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(links)
    }

    /// Append songs to the end of a playlist. Linking a song that is already in the
    /// playlist violates the `(playlist_id, song_id)` key and fails.
    pub fn link_songs(&self, playlist_id: i64, song_ids: &[i64]) -> Result<()> {
        let next_position: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM playlist_songs WHERE playlist_id = ?1",
            params![playlist_id],
            |r| r.get(0),
        )?;

        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO playlist_songs (playlist_id, song_id, position) VALUES (?1, ?2, ?3)",
        )?;
        for (offset, song_id) in song_ids.iter().enumerate() {
            stmt.execute(params![playlist_id, song_id, next_position + offset as i64])
                .with_context(|| {
                    format!("Could not link song {} to playlist {}", song_id, playlist_id)
                })?;
        }
        Ok(())
    }

    pub fn clear_links(&self, playlist_id: i64) -> Result<usize> {
        Ok(self.conn.execute(
            "DELETE FROM playlist_songs WHERE playlist_id = ?1",
            params![playlist_id],
        )?)
    }

    /// Load a playlist eagerly with the songs its association rows reference.
    pub fn load_playlist(&self, id: i64) -> Result<Option<LoadedPlaylist>> {
        let playlist = match self.find_playlist(id)? {
            Some(playlist) => playlist,
            None => return Ok(None),
        };
        let mut stmt = self.conn.prepare_cached(
            "SELECT s.id, s.title, s.duration_seconds, s.artist_id
             FROM playlist_songs ps
             JOIN songs s ON s.id = ps.song_id
             WHERE ps.playlist_id = ?1
             ORDER BY ps.position",
        )?;
        let songs = stmt
            .query_map(params![id], parse_song_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(LoadedPlaylist { playlist, songs }))
    }
}
