mod models;
mod schema;
mod store;

pub use models::*;
pub use schema::MUSIC_VERSIONED_SCHEMAS;
pub use store::{SqliteMusicStore, StoreSession};
