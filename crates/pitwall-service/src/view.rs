//! Read models for race events
//!
//! Stored events only hold IDs. Views resolve team and driver names against
//! the current roster; IDs no longer on the roster render as an empty name.

use std::collections::HashMap;

use pitwall_schemas::{RaceEvent, RacePosition, Team};
use serde::Serialize;

/// Team and driver names by ID
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    teams: HashMap<u64, String>,
    drivers: HashMap<u64, String>,
}

impl NameIndex {
    /// Index every team and driver in `teams`
    pub fn from_teams(teams: &[Team]) -> Self {
        let mut index = Self::default();
        for team in teams {
            index.teams.insert(team.id, team.name.clone());
            for driver in &team.drivers {
                index.drivers.insert(driver.id, driver.name.clone());
            }
        }
        index
    }

    /// Team name, empty if unknown
    pub fn team(&self, team_id: u64) -> &str {
        self.teams.get(&team_id).map_or("", String::as_str)
    }

    /// Driver name, empty if unknown
    pub fn driver(&self, driver_id: u64) -> &str {
        self.drivers.get(&driver_id).map_or("", String::as_str)
    }
}

/// A starting grid slot with names
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridSlotView {
    /// Driver ID
    pub driver_id: u64,
    /// Driver name, empty if the driver is no longer on a roster
    pub driver_name: String,
    /// Team name, empty if the team was deleted
    pub team_name: String,
    /// 1-based grid position
    pub position: u64,
}

/// A result line with names
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    /// Driver ID
    pub driver_id: u64,
    /// Driver name, empty if the driver is no longer on a roster
    pub driver_name: String,
    /// Team name, empty if the team was deleted
    pub team_name: String,
    /// 1-based finishing position
    pub position: u64,
    /// Points awarded when the result was recorded
    pub points: u64,
}

/// A race event with names resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventView {
    /// Event ID
    pub id: u64,
    /// Event name
    pub name: String,
    /// Event type label
    #[serde(rename = "type")]
    pub event_type: &'static str,
    /// Start time, Unix seconds
    pub race_date_unix: i64,
    /// Grid in position order
    pub starting_grid: Vec<GridSlotView>,
    /// Results in finishing order
    pub results: Vec<ResultView>,
}

impl EventView {
    /// Resolve `event` against `names`
    pub fn new(event: &RaceEvent, names: &NameIndex) -> Self {
        Self {
            id: event.id,
            name: event.name.clone(),
            event_type: event.event_type.name(),
            race_date_unix: event.date,
            starting_grid: event
                .starting_grid
                .iter()
                .map(|slot| grid_slot(slot, names))
                .collect(),
            results: event
                .results
                .iter()
                .map(|line| result_line(line, names))
                .collect(),
        }
    }
}

fn grid_slot(slot: &RacePosition, names: &NameIndex) -> GridSlotView {
    GridSlotView {
        driver_id: slot.driver_id,
        driver_name: names.driver(slot.driver_id).to_string(),
        team_name: names.team(slot.team_id).to_string(),
        position: slot.position,
    }
}

fn result_line(line: &RacePosition, names: &NameIndex) -> ResultView {
    ResultView {
        driver_id: line.driver_id,
        driver_name: names.driver(line.driver_id).to_string(),
        team_name: names.team(line.team_id).to_string(),
        position: line.position,
        points: line.points,
    }
}
