//! Error types for standings computation

use thiserror::Error;

/// Errors raised while scoring or aggregating
///
/// Every variant means the stored data references something that does not
/// exist. Aggregation never skips such entries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StandingsError {
    /// A result references a team that is not in the roster
    #[error("Event {event_id} references unknown team {team_id}")]
    UnknownTeam {
        /// Event holding the result
        event_id: u64,
        /// Missing team
        team_id: u64,
    },

    /// A result references a driver that is not in the roster
    #[error("Event {event_id} references unknown driver {driver_id}")]
    UnknownDriver {
        /// Event holding the result
        event_id: u64,
        /// Missing driver
        driver_id: u64,
    },

    /// A submitted driver is not on any team
    #[error("Driver {driver_id} is not on any team")]
    UnregisteredDriver {
        /// Submitted driver
        driver_id: u64,
    },

    /// A submitted order lists the same driver twice
    #[error("Driver {driver_id} is listed more than once")]
    DuplicateDriver {
        /// Repeated driver
        driver_id: u64,
    },
}

impl StandingsError {
    /// Check if this error was caused by caller input rather than stored data
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::UnregisteredDriver { .. } | Self::DuplicateDriver { .. }
        )
    }
}
