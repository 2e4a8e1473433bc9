//! Convenience re-exports for common types

pub use crate::aggregate::{
    DriverResult, DriverStanding, PointTotals, Standings, TeamResult, TeamStanding,
    compute_standings, compute_standings_in,
};
pub use crate::error::StandingsError;
pub use crate::round::LatestRound;
pub use crate::scoring::points_for;

pub use pitwall_schemas::prelude::{Driver, EventType, RaceEvent, RacePosition, Team};
