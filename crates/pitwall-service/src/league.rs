//! League facade
//!
//! Combines the record store, the scoring policy and the standings
//! aggregator into the operations the HTTP routes expose. Every call reads
//! the collections afresh; nothing is cached between calls.

use chrono::TimeZone;
use pitwall_schemas::{Driver, EventType, RaceEvent, Team, driver_team_map};
use pitwall_standings::entry::{build_results, build_starting_grid};
use pitwall_standings::{Standings, compute_standings, compute_standings_in};
use pitwall_store::{JsonDatabase, StoreConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ServiceError;
use crate::view::{EventView, NameIndex};

/// A new or replacement race event as submitted by an editor
///
/// Grid and results are driver IDs in order; positions, teams and points
/// are filled in from the current roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSubmission {
    /// Event name
    pub name: String,
    /// Start time, Unix seconds
    pub race_date_unix: i64,
    /// Event type code
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Driver IDs in grid order
    #[serde(default)]
    pub starting_grid: Vec<u64>,
    /// Driver IDs in finishing order
    #[serde(default)]
    pub results: Vec<u64>,
}

/// A driver name as submitted by an editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverSubmission {
    /// Driver name
    pub name: String,
}

/// A team as submitted by an editor
///
/// On creation every driver becomes a new slot. On update the drivers rename
/// the existing slots in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSubmission {
    /// Team name
    pub name: String,
    /// Driver names in slot order
    #[serde(default)]
    pub drivers: Vec<DriverSubmission>,
}

/// League operations over a [`JsonDatabase`]
#[derive(Debug, Clone)]
pub struct League {
    db: JsonDatabase,
}

impl League {
    /// Wrap an open database
    pub fn new(db: JsonDatabase) -> Self {
        Self { db }
    }

    /// Open the database described by `config`
    pub async fn open(config: StoreConfig) -> Result<Self, ServiceError> {
        Ok(Self::new(JsonDatabase::open(config).await?))
    }

    /// Underlying database
    pub fn database(&self) -> &JsonDatabase {
        &self.db
    }

    /// Standings with race days in local time
    pub async fn standings(&self) -> Result<Standings, ServiceError> {
        let snapshot = self.db.snapshot().await?;
        Ok(compute_standings(&snapshot.teams, &snapshot.events)?)
    }

    /// Standings with race days in `tz`
    pub async fn standings_in<Tz: TimeZone>(&self, tz: &Tz) -> Result<Standings, ServiceError> {
        let snapshot = self.db.snapshot().await?;
        Ok(compute_standings_in(&snapshot.teams, &snapshot.events, tz)?)
    }

    /// A single team with its roster
    pub async fn team(&self, team_id: u64) -> Result<Team, ServiceError> {
        Ok(self.db.get_team(team_id).await?)
    }

    /// Register a team and its drivers, assigning fresh IDs
    pub async fn add_team(&self, submission: TeamSubmission) -> Result<Team, ServiceError> {
        let team = Team::new(
            submission.name,
            submission.drivers.into_iter().map(|driver| driver.name),
        );
        let team = self.db.add_team(team).await?;

        info!(team_id = team.id, drivers = team.drivers.len(), "Team registered");
        Ok(team)
    }

    /// Rename a team and, positionally, its existing drivers
    ///
    /// Slots beyond the submitted names keep their current name. Submitting
    /// more names than the team has slots is rejected without any change.
    pub async fn rename_team(
        &self,
        team_id: u64,
        submission: TeamSubmission,
    ) -> Result<Team, ServiceError> {
        let team = self
            .db
            .modify_team(team_id, |team| {
                if submission.drivers.len() > team.drivers.len() {
                    return Err(ServiceError::TooManyDrivers {
                        team_id,
                        slots: team.drivers.len(),
                        submitted: submission.drivers.len(),
                    });
                }

                team.name = submission.name;
                for (driver, renamed) in team.drivers.iter_mut().zip(submission.drivers) {
                    driver.name = renamed.name;
                }
                Ok(team.clone())
            })
            .await?;

        info!(team_id, "Team renamed");
        Ok(team)
    }

    /// Rename one driver of a team; the driver keeps its ID
    pub async fn rename_driver(
        &self,
        team_id: u64,
        driver_id: u64,
        submission: DriverSubmission,
    ) -> Result<Driver, ServiceError> {
        let driver = self
            .db
            .modify_team(team_id, |team| {
                let driver = team
                    .driver_mut(driver_id)
                    .ok_or(ServiceError::DriverNotFound { team_id, driver_id })?;
                driver.name = submission.name;
                Ok::<_, ServiceError>(driver.clone())
            })
            .await?;

        info!(team_id, driver_id, "Driver renamed");
        Ok(driver)
    }

    /// Remove a team; events keep referencing its IDs
    pub async fn delete_team(&self, team_id: u64) -> Result<(), ServiceError> {
        Ok(self.db.delete_team(team_id).await?)
    }

    /// Every event with names resolved, in stored order
    pub async fn events_view(&self) -> Result<Vec<EventView>, ServiceError> {
        let snapshot = self.db.snapshot().await?;
        let names = NameIndex::from_teams(&snapshot.teams);

        Ok(snapshot
            .events
            .iter()
            .map(|event| EventView::new(event, &names))
            .collect())
    }

    /// One event with names resolved
    pub async fn event_view(&self, event_id: u64) -> Result<EventView, ServiceError> {
        let teams = self.db.list_teams().await?;
        let event = self.db.get_event(event_id).await?;

        Ok(EventView::new(&event, &NameIndex::from_teams(&teams)))
    }

    /// Score and store a new event
    pub async fn create_event(&self, submission: EventSubmission) -> Result<RaceEvent, ServiceError> {
        let event = self.score(submission).await?;
        let event = self.db.add_event(event).await?;

        info!(
            event_id = event.id,
            event_type = %event.event_type,
            results = event.results.len(),
            "Event recorded"
        );
        Ok(event)
    }

    /// Rescore an event from `submission` and store it under `event_id`
    pub async fn replace_event(
        &self,
        event_id: u64,
        submission: EventSubmission,
    ) -> Result<RaceEvent, ServiceError> {
        let mut event = self.score(submission).await?;
        event.id = event_id;
        self.db.update_event(event.clone()).await?;

        info!(event_id, "Event replaced");
        Ok(event)
    }

    /// Remove an event
    pub async fn delete_event(&self, event_id: u64) -> Result<(), ServiceError> {
        Ok(self.db.delete_event(event_id).await?)
    }

    async fn score(&self, submission: EventSubmission) -> Result<RaceEvent, ServiceError> {
        let teams = self.db.list_teams().await?;
        let roster = driver_team_map(&teams);
        debug!(drivers = roster.len(), "Scoring submission against roster");

        let grid = build_starting_grid(&submission.starting_grid, &roster)?;
        let results = build_results(&submission.results, submission.event_type, &roster)?;

        Ok(RaceEvent::new(
            submission.name,
            submission.race_date_unix,
            submission.event_type,
        )
        .with_starting_grid(grid)
        .with_results(results))
    }
}
