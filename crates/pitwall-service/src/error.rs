//! Error types for league operations

use pitwall_standings::StandingsError;
use pitwall_store::StoreError;
use thiserror::Error;

/// Errors raised by the league facade and its configuration
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Record store failure, including missing records
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Submission or aggregation failure
    #[error(transparent)]
    Standings(#[from] StandingsError),

    /// A team update names more drivers than the team has slots
    #[error("Team {team_id} has {slots} driver slots, {submitted} names submitted")]
    TooManyDrivers {
        /// Team being updated
        team_id: u64,
        /// Drivers on the team
        slots: usize,
        /// Driver names in the update
        submitted: usize,
    },

    /// The driver is not on the given team
    #[error("Team {team_id} has no driver {driver_id}")]
    DriverNotFound {
        /// Team searched
        team_id: u64,
        /// Driver requested
        driver_id: u64,
    },

    /// An editor login entry is not of the form `user=pass`
    #[error("Invalid editor credentials {entry:?}, expected user=pass")]
    InvalidEditor {
        /// Offending entry, password stripped
        entry: String,
    },
}

impl ServiceError {
    /// Check if the requested record does not exist
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Store(err) => err.is_not_found(),
            Self::DriverNotFound { .. } => true,
            _ => false,
        }
    }

    /// Check if the caller's input was rejected
    pub fn is_bad_input(&self) -> bool {
        match self {
            Self::Standings(err) => err.is_input_error(),
            Self::TooManyDrivers { .. } | Self::InvalidEditor { .. } => true,
            _ => false,
        }
    }
}
