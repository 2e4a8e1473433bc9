//! Convenience re-exports for common types

pub use crate::database::{JsonDatabase, LeagueSnapshot, StoreConfig};
pub use crate::error::StoreError;
pub use crate::repository::CollectionStore;
pub use crate::storage::FileStorage;

pub use pitwall_schemas::prelude::{
    Driver, EventCollection, EventType, RaceEvent, RacePosition, Team, TeamCollection,
};
