//! Shared constants for end-to-end tests
//!
//! Ids follow insertion order in `fixtures::seed_catalog`. When the seed
//! data changes, update only this file and the fixtures.

// ============================================================================
// Seeded Artists
// ============================================================================

pub const QUEEN_ID: i64 = 1;
pub const QUEEN_NAME: &str = "Queen";

pub const ABBA_ID: i64 = 2;
pub const ABBA_NAME: &str = "ABBA";

/// An artist with no songs.
pub const SILENT_ARTIST_ID: i64 = 3;
pub const SILENT_ARTIST_NAME: &str = "John Cage";

// ============================================================================
// Seeded Songs
// ============================================================================

pub const BOHEMIAN_RHAPSODY_ID: i64 = 1;
pub const BOHEMIAN_RHAPSODY_TITLE: &str = "Bohemian Rhapsody";
pub const BOHEMIAN_RHAPSODY_SECONDS: i64 = 354;

pub const SOMEBODY_TO_LOVE_ID: i64 = 2;
pub const SOMEBODY_TO_LOVE_TITLE: &str = "Somebody to Love";

pub const DANCING_QUEEN_ID: i64 = 3;
pub const DANCING_QUEEN_TITLE: &str = "Dancing Queen";

pub const WATERLOO_ID: i64 = 4;
pub const WATERLOO_TITLE: &str = "Waterloo";

pub const SEEDED_SONGS_COUNT: usize = 4;

// ============================================================================
// Seeded Playlists
// ============================================================================

/// Holds Waterloo, Bohemian Rhapsody and Dancing Queen, in that order.
pub const ROAD_TRIP_ID: i64 = 1;
pub const ROAD_TRIP_NAME: &str = "Road Trip";

/// An id that is never assigned in the seeded database.
pub const UNKNOWN_ID: i64 = 9_999;

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
