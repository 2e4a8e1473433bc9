//! Convenience re-exports for common types

pub use crate::collection::{
    Collection, EventCollection, IdCounter, TeamCollection, driver_team_map,
};
pub use crate::error::SchemaError;
pub use crate::model::{Driver, EventType, RaceEvent, RacePosition, Record, Team};
