//! Teams and events database

use std::path::PathBuf;

use pitwall_schemas::{EventCollection, RaceEvent, Team, TeamCollection};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::StoreError;
use crate::repository::CollectionStore;
use crate::storage::FileStorage;

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the collection documents
    pub data_dir: PathBuf,
    /// File name of the teams document
    pub teams_file: String,
    /// File name of the events document
    pub events_file: String,
    /// Write through a temp file and rename instead of rewriting in place
    pub atomic_writes: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            teams_file: "teams.json".to_string(),
            events_file: "events.json".to_string(),
            atomic_writes: true,
        }
    }
}

impl StoreConfig {
    /// Create a configuration with the specified data directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Set the atomic writes option
    pub fn with_atomic_writes(mut self, enabled: bool) -> Self {
        self.atomic_writes = enabled;
        self
    }

    /// Full path of the teams document
    pub fn teams_path(&self) -> PathBuf {
        self.data_dir.join(&self.teams_file)
    }

    /// Full path of the events document
    pub fn events_path(&self) -> PathBuf {
        self.data_dir.join(&self.events_file)
    }
}

/// Teams and events read back-to-back
///
/// The two reads are not atomic with respect to each other; a write landing
/// in between is visible in one list and not the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeagueSnapshot {
    /// All teams in stored order
    pub teams: Vec<Team>,
    /// All events in stored order
    pub events: Vec<RaceEvent>,
}

/// The league record store: teams and race events in two JSON documents
#[derive(Debug, Clone)]
pub struct JsonDatabase {
    config: StoreConfig,
    teams: CollectionStore<TeamCollection>,
    events: CollectionStore<EventCollection>,
}

impl JsonDatabase {
    /// Open the database, creating the data directory if needed
    ///
    /// Missing documents are not created until the first write.
    pub async fn open(config: StoreConfig) -> Result<Self, StoreError> {
        let storage = FileStorage::new(config.atomic_writes);
        storage.ensure_dir(&config.data_dir).await?;

        info!(
            data_dir = ?config.data_dir,
            atomic_writes = config.atomic_writes,
            "Opened league database"
        );

        Ok(Self {
            teams: CollectionStore::new(config.teams_path(), storage.clone()),
            events: CollectionStore::new(config.events_path(), storage),
            config,
        })
    }

    /// Configuration this database was opened with
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// All teams in stored order
    pub async fn list_teams(&self) -> Result<Vec<Team>, StoreError> {
        self.teams.list().await
    }

    /// Team by ID
    pub async fn get_team(&self, id: u64) -> Result<Team, StoreError> {
        self.teams.get(id).await
    }

    /// Store a new team, assigning IDs to it and its drivers
    pub async fn add_team(&self, team: Team) -> Result<Team, StoreError> {
        self.teams.add(team).await
    }

    /// Replace the team with the same ID
    pub async fn update_team(&self, team: Team) -> Result<(), StoreError> {
        self.teams.update(team).await
    }

    /// Change a stored team in place under the teams write lock
    ///
    /// See [`CollectionStore::modify`].
    pub async fn modify_team<R, E, F>(&self, id: u64, change: F) -> Result<R, E>
    where
        F: FnOnce(&mut Team) -> Result<R, E>,
        E: From<StoreError>,
    {
        self.teams.modify(id, change).await
    }

    /// Remove a team; unknown IDs are ignored
    pub async fn delete_team(&self, id: u64) -> Result<(), StoreError> {
        self.teams.delete(id).await
    }

    /// All events in stored order
    pub async fn list_events(&self) -> Result<Vec<RaceEvent>, StoreError> {
        self.events.list().await
    }

    /// Event by ID
    pub async fn get_event(&self, id: u64) -> Result<RaceEvent, StoreError> {
        self.events.get(id).await
    }

    /// Store a new event, assigning its ID
    pub async fn add_event(&self, event: RaceEvent) -> Result<RaceEvent, StoreError> {
        self.events.add(event).await
    }

    /// Replace the event with the same ID
    pub async fn update_event(&self, event: RaceEvent) -> Result<(), StoreError> {
        self.events.update(event).await
    }

    /// Remove an event; unknown IDs are ignored
    pub async fn delete_event(&self, id: u64) -> Result<(), StoreError> {
        self.events.delete(id).await
    }

    /// Read teams, then events
    pub async fn snapshot(&self) -> Result<LeagueSnapshot, StoreError> {
        let teams = self.teams.list().await?;
        let events = self.events.list().await?;
        Ok(LeagueSnapshot { teams, events })
    }
}
