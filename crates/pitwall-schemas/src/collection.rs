//! Persisted collections and their ID counters
//!
//! Each collection is written and read as a single JSON document. The
//! counters for the next free IDs are part of that document, so every
//! allocation happens in the same read-modify-write as the data change.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::model::{RaceEvent, Record, Team};

/// Next-available ID counter
///
/// `allocate` hands out the current value and then bumps it, so a fresh
/// counter produces 0 first. IDs are never handed out twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdCounter(u64);

impl IdCounter {
    /// Create a counter whose next allocation returns `next`
    pub const fn new(next: u64) -> Self {
        Self(next)
    }

    /// Value the next allocation will return
    pub const fn peek(self) -> u64 {
        self.0
    }

    /// Return the current value and advance, or `None` once `u64` is exhausted
    pub fn allocate(&mut self) -> Option<u64> {
        let id = self.0;
        self.0 = self.0.checked_add(1)?;
        Some(id)
    }
}

/// A persisted set of records plus the counters used to number them
pub trait Collection: Default + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Record type stored in this collection
    type Item: Record;

    /// Collection name, used in logs and errors
    const NAME: &'static str;

    /// Records in stored order
    fn records(&self) -> &[Self::Item];

    /// Mutable access to the stored records
    fn records_mut(&mut self) -> &mut Vec<Self::Item>;

    /// Consume the collection, yielding its records
    fn into_records(self) -> Vec<Self::Item>;

    /// Assign fresh IDs to `record` (and anything it owns)
    ///
    /// Counters only move when every allocation for the record succeeds.
    fn assign_ids(&mut self, record: &mut Self::Item) -> Result<(), SchemaError>;
}

/// Teams document: `{teams, next_team_id, next_driver_id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamCollection {
    /// All teams in stored order
    #[serde(default)]
    pub teams: Vec<Team>,
    /// Next team ID
    #[serde(default)]
    pub next_team_id: IdCounter,
    /// Next driver ID, shared by every team
    #[serde(default)]
    pub next_driver_id: IdCounter,
}

impl TeamCollection {
    /// Map each driver ID to the ID of the team that owns it
    pub fn driver_team_map(&self) -> HashMap<u64, u64> {
        driver_team_map(&self.teams)
    }
}

/// Map each driver ID to the ID of the team that owns it
pub fn driver_team_map(teams: &[Team]) -> HashMap<u64, u64> {
    teams
        .iter()
        .flat_map(|team| team.drivers.iter().map(move |driver| (driver.id, team.id)))
        .collect()
}

impl Collection for TeamCollection {
    type Item = Team;

    const NAME: &'static str = "teams";

    fn records(&self) -> &[Team] {
        &self.teams
    }

    fn records_mut(&mut self) -> &mut Vec<Team> {
        &mut self.teams
    }

    fn into_records(self) -> Vec<Team> {
        self.teams
    }

    fn assign_ids(&mut self, team: &mut Team) -> Result<(), SchemaError> {
        let mut team_ids = self.next_team_id;
        let mut driver_ids = self.next_driver_id;

        team.id = team_ids
            .allocate()
            .ok_or_else(|| SchemaError::id_exhausted("next_team_id"))?;
        for driver in &mut team.drivers {
            driver.id = driver_ids
                .allocate()
                .ok_or_else(|| SchemaError::id_exhausted("next_driver_id"))?;
        }

        self.next_team_id = team_ids;
        self.next_driver_id = driver_ids;
        Ok(())
    }
}

/// Events document: `{events, next_event_id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCollection {
    /// All events in stored order
    #[serde(default)]
    pub events: Vec<RaceEvent>,
    /// Next event ID
    #[serde(default)]
    pub next_event_id: IdCounter,
}

impl Collection for EventCollection {
    type Item = RaceEvent;

    const NAME: &'static str = "events";

    fn records(&self) -> &[RaceEvent] {
        &self.events
    }

    fn records_mut(&mut self) -> &mut Vec<RaceEvent> {
        &mut self.events
    }

    fn into_records(self) -> Vec<RaceEvent> {
        self.events
    }

    fn assign_ids(&mut self, event: &mut RaceEvent) -> Result<(), SchemaError> {
        event.id = self
            .next_event_id
            .allocate()
            .ok_or_else(|| SchemaError::id_exhausted("next_event_id"))?;
        Ok(())
    }
}
