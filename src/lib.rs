//! Playlist Pilot music catalog server
//!
//! Artists, songs and playlists stored in SQLite and served over HTTP.
//! The library exposes the internal modules for the binary and the
//! end-to-end tests.

pub mod config;
pub mod music_store;
pub mod resources;
pub mod server;
pub mod sqlite_persistence;

pub use music_store::SqliteMusicStore;
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
