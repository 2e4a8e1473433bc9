//! Scoring policy and championship standings for Pitwall
//!
//! Points are awarded once, when results are submitted, using the
//! [`scoring`] tables. Standings are then derived from the stored events on
//! every read:
//!
//! - [`scoring`]: finishing position to points, per event type
//! - [`entry`]: turn submitted driver orders into grid and result positions
//! - [`round`]: find the latest race round (events sharing the newest day)
//! - [`aggregate`]: team and driver point totals, result history and the
//!   change since the latest round
//! - [`error`]: errors raised when events reference unknown teams or drivers
//!
//! # Example
//!
//! ```
//! use pitwall_standings::prelude::*;
//! use pitwall_standings::entry::build_results;
//! use std::collections::HashMap;
//!
//! let team = Team {
//!     id: 1,
//!     name: "Nyoom".to_string(),
//!     drivers: vec![
//!         Driver { id: 10, name: "Ada".to_string() },
//!         Driver { id: 11, name: "Bo".to_string() },
//!     ],
//! };
//! let roster = HashMap::from([(10, 1), (11, 1)]);
//!
//! let mut event = RaceEvent::new("Opener", 1_700_000_000, EventType::Race);
//! event.results = build_results(&[10, 11], EventType::Race, &roster)?;
//!
//! let standings = compute_standings_in(&[team], &[event], &chrono::Utc)?;
//! assert_eq!(standings.teams[0].totals.points, 43);
//! # Ok::<(), StandingsError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod aggregate;
pub mod entry;
pub mod error;
pub mod prelude;
pub mod round;
pub mod scoring;

pub use aggregate::{
    DriverResult, DriverStanding, PointTotals, Standings, TeamResult, TeamStanding,
    compute_standings, compute_standings_in,
};
pub use error::StandingsError;
pub use round::LatestRound;
pub use scoring::points_for;

/// Result type for standings operations
pub type Result<T> = std::result::Result<T, StandingsError>;
