//! Seed data for end-to-end tests

use super::constants::*;
use anyhow::Result;
use playlist_pilot_server::music_store::{NewSong, SqliteMusicStore};

/// Fills an empty store with three artists, four songs and one playlist.
/// The ids match the ones in `constants`.
pub fn seed_catalog(store: &SqliteMusicStore) -> Result<()> {
    let session = store.session()?;

    let queen = session.add_artist(QUEEN_NAME)?;
    let abba = session.add_artist(ABBA_NAME)?;
    session.add_artist(SILENT_ARTIST_NAME)?;

    let songs = [
        (BOHEMIAN_RHAPSODY_TITLE, BOHEMIAN_RHAPSODY_SECONDS, queen.id),
        (SOMEBODY_TO_LOVE_TITLE, 296, queen.id),
        (DANCING_QUEEN_TITLE, 231, abba.id),
        (WATERLOO_TITLE, 167, abba.id),
    ];
    for (title, duration_seconds, artist_id) in songs {
        session.add_song(&NewSong {
            title: title.to_string(),
            duration_seconds,
            artist_id,
        })?;
    }

    let road_trip = session.add_playlist(ROAD_TRIP_NAME)?;
    session.link_songs(
        road_trip.id,
        &[WATERLOO_ID, BOHEMIAN_RHAPSODY_ID, DANCING_QUEEN_ID],
    )?;

    session.save()
}
