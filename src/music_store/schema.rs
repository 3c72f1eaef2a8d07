//! SQLite schema definitions for the music database.
//!
//! Every foreign key is declared `ON DELETE RESTRICT`: dependent rows are removed
//! explicitly by the store before their owner, and the database refuses any delete
//! that would leave a dangling reference.

use crate::sqlite_column;
use crate::sqlite_persistence::{
    Column, ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema,
};

// =============================================================================
// Core Tables
// =============================================================================

pub(super) const ARTISTS_TABLE: Table = Table {
    name: "artists",
    columns: &[
        sqlite_column!(
            "id",
            &SqlType::Integer,
            is_primary_key = true,
            is_auto_increment = true
        ),
        sqlite_column!("name", &SqlType::Text, non_null = true),
    ],
    primary_key: &[],
    indices: &[],
};

pub(super) const SONGS_TABLE: Table = Table {
    name: "songs",
    columns: &[
        sqlite_column!(
            "id",
            &SqlType::Integer,
            is_primary_key = true,
            is_auto_increment = true
        ),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("duration_seconds", &SqlType::Integer, non_null = true),
        sqlite_column!(
            "artist_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "artists",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Restrict,
            })
        ),
    ],
    primary_key: &[],
    indices: &[("idx_songs_artist", "artist_id")],
};

pub(super) const PLAYLISTS_TABLE: Table = Table {
    name: "playlists",
    columns: &[
        sqlite_column!(
            "id",
            &SqlType::Integer,
            is_primary_key = true,
            is_auto_increment = true
        ),
        sqlite_column!("name", &SqlType::Text, non_null = true),
    ],
    primary_key: &[],
    indices: &[],
};

// =============================================================================
// Junction Tables
// =============================================================================

/// Playlist <-> Song membership, keyed by the pair.
pub(super) const PLAYLIST_SONGS_TABLE: Table = Table {
    name: "playlist_songs",
    columns: &[
        sqlite_column!(
            "playlist_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "playlists",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Restrict,
            })
        ),
        sqlite_column!(
            "song_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "songs",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Restrict,
            })
        ),
        sqlite_column!("position", &SqlType::Integer, non_null = true),
    ],
    primary_key: &["playlist_id", "song_id"],
    indices: &[("idx_playlist_songs_song", "song_id")],
};

// =============================================================================
// Versioned Schema Definition
// =============================================================================

pub const MUSIC_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[
        ARTISTS_TABLE,
        SONGS_TABLE,
        PLAYLISTS_TABLE,
        PLAYLIST_SONGS_TABLE,
    ],
    migration: None,
}];
