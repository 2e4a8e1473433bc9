//! League record types

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use crate::error::SchemaError;

/// A record that lives in a persisted collection and is addressed by a numeric ID
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Human readable kind, used in logs and errors
    const KIND: &'static str;

    /// Identifier of this record
    fn id(&self) -> u64;
}

/// A driver, always owned by exactly one team
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    /// Globally unique driver ID, never reused
    pub id: u64,
    /// Display name
    pub name: String,
}

impl Driver {
    /// Create a driver that has not been assigned an ID yet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }
}

/// A team and its ordered driver line-up
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Unique team ID
    pub id: u64,
    /// Display name
    pub name: String,
    /// Drivers in slot order
    #[serde(default)]
    pub drivers: Vec<Driver>,
}

impl Team {
    /// Create a team from a name and its drivers' names, in slot order
    pub fn new<I, S>(name: impl Into<String>, drivers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: 0,
            name: name.into(),
            drivers: drivers.into_iter().map(Driver::new).collect(),
        }
    }

    /// Find a driver of this team by ID
    pub fn driver(&self, driver_id: u64) -> Option<&Driver> {
        self.drivers.iter().find(|d| d.id == driver_id)
    }

    /// Find a driver of this team by ID for modification
    pub fn driver_mut(&mut self, driver_id: u64) -> Option<&mut Driver> {
        self.drivers.iter_mut().find(|d| d.id == driver_id)
    }
}

impl Record for Team {
    const KIND: &'static str = "team";

    fn id(&self) -> u64 {
        self.id
    }
}

/// Kind of race event
///
/// The kind selects the scoring table and whether points count towards the
/// season or the pre-season standings. Persisted as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum EventType {
    /// Full-distance race, season standings
    Race,
    /// Sprint race, season standings
    Sprint,
    /// Full-distance race, pre-season standings
    PreSeasonRace,
    /// Sprint race, pre-season standings
    PreSeasonSprint,
}

impl EventType {
    /// All event types, in their persisted order
    pub const ALL: [EventType; 4] = [
        EventType::Race,
        EventType::Sprint,
        EventType::PreSeasonRace,
        EventType::PreSeasonSprint,
    ];

    /// Display label
    pub fn name(self) -> &'static str {
        match self {
            EventType::Race => "Race",
            EventType::Sprint => "Sprint",
            EventType::PreSeasonRace => "Pre-Season race",
            EventType::PreSeasonSprint => "Pre-Season sprint",
        }
    }

    /// Whether points from this event go to the pre-season bucket
    pub fn is_pre_season(self) -> bool {
        matches!(self, EventType::PreSeasonRace | EventType::PreSeasonSprint)
    }

    /// Whether this event is scored with the sprint table
    pub fn is_sprint(self) -> bool {
        matches!(self, EventType::Sprint | EventType::PreSeasonSprint)
    }

    /// Persisted numeric code
    pub fn code(self) -> u8 {
        match self {
            EventType::Race => 1,
            EventType::Sprint => 2,
            EventType::PreSeasonRace => 3,
            EventType::PreSeasonSprint => 4,
        }
    }
}

impl TryFrom<u8> for EventType {
    type Error = SchemaError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(EventType::Race),
            2 => Ok(EventType::Sprint),
            3 => Ok(EventType::PreSeasonRace),
            4 => Ok(EventType::PreSeasonSprint),
            other => Err(SchemaError::UnknownEventType(other)),
        }
    }
}

impl From<EventType> for u8 {
    fn from(event_type: EventType) -> Self {
        event_type.code()
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One slot of a starting grid or a result sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RacePosition {
    /// 1-based position
    pub position: u64,
    /// Points awarded; always 0 on a starting grid
    pub points: u64,
    /// Driver occupying the slot
    pub driver_id: u64,
    /// Team the driver belonged to when the event was recorded
    pub team_id: u64,
}

/// A recorded race event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceEvent {
    /// Unique event ID
    pub id: u64,
    /// Display name
    pub name: String,
    /// Event start as Unix seconds
    #[serde(rename = "date_unix")]
    pub date: i64,
    /// Event kind
    #[serde(rename = "race_type")]
    pub event_type: EventType,
    /// Grid order at the start
    #[serde(rename = "starting", default)]
    pub starting_grid: Vec<RacePosition>,
    /// Finishing order with awarded points
    #[serde(default)]
    pub results: Vec<RacePosition>,
}

impl RaceEvent {
    /// Create an event without grid or results
    pub fn new(name: impl Into<String>, date: i64, event_type: EventType) -> Self {
        Self {
            id: 0,
            name: name.into(),
            date,
            event_type,
            starting_grid: Vec::new(),
            results: Vec::new(),
        }
    }

    /// Replace the starting grid
    pub fn with_starting_grid(mut self, grid: Vec<RacePosition>) -> Self {
        self.starting_grid = grid;
        self
    }

    /// Replace the results
    pub fn with_results(mut self, results: Vec<RacePosition>) -> Self {
        self.results = results;
        self
    }
}

impl Record for RaceEvent {
    const KIND: &'static str = "event";

    fn id(&self) -> u64 {
        self.id
    }
}
