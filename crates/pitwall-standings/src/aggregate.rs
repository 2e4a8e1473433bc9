//! Championship standings aggregation
//!
//! Turns the roster and the recorded events into per-team and per-driver
//! totals. Each entity tracks four buckets:
//!
//! - `points` / `pre_season_points`: everything recorded so far
//! - `prev_points` / `prev_pre_season_points`: the same, minus the latest
//!   round, so the difference is the change the latest round caused
//!
//! Season events (race, sprint) feed the first pair of each, pre-season
//! events the second.

use std::collections::HashMap;

use chrono::{Local, TimeZone};
use pitwall_schemas::{Driver, RaceEvent, Team};
use serde::Serialize;
use tracing::debug;

use crate::error::StandingsError;
use crate::round::LatestRound;

/// Point buckets for one team or driver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PointTotals {
    /// Season points, all events
    pub points: u64,
    /// Season points before the latest round
    pub prev_points: u64,
    /// Pre-season points, all events
    pub pre_season_points: u64,
    /// Pre-season points before the latest round
    pub prev_pre_season_points: u64,
}

impl PointTotals {
    fn record(&mut self, points: u64, pre_season: bool, in_latest_round: bool) {
        let (total, previous) = if pre_season {
            (&mut self.pre_season_points, &mut self.prev_pre_season_points)
        } else {
            (&mut self.points, &mut self.prev_points)
        };

        *total = total.saturating_add(points);
        if !in_latest_round {
            *previous = previous.saturating_add(points);
        }
    }

    /// Season points gained in the latest round
    pub fn delta(&self) -> u64 {
        self.points.saturating_sub(self.prev_points)
    }

    /// Pre-season points gained in the latest round
    pub fn pre_season_delta(&self) -> u64 {
        self.pre_season_points.saturating_sub(self.prev_pre_season_points)
    }
}

/// One result line in a team's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamResult {
    /// Event the result belongs to
    pub event_id: u64,
    /// Event name
    pub event_name: String,
    /// Driver who scored it
    pub driver_name: String,
    /// Points awarded
    pub points: u64,
    /// Finishing position, 1-based
    pub position: u64,
}

/// One result line in a driver's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverResult {
    /// Event the result belongs to
    pub event_id: u64,
    /// Event name
    pub event_name: String,
    /// Points awarded
    pub points: u64,
    /// Finishing position, 1-based
    pub position: u64,
}

/// Aggregated standing of one driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverStanding {
    /// Driver ID
    pub id: u64,
    /// Driver name
    pub name: String,
    /// Point buckets
    #[serde(flatten)]
    pub totals: PointTotals,
    /// Results in event order
    pub results: Vec<DriverResult>,
}

impl DriverStanding {
    fn new(driver: &Driver) -> Self {
        Self {
            id: driver.id,
            name: driver.name.clone(),
            totals: PointTotals::default(),
            results: Vec::new(),
        }
    }
}

/// Aggregated standing of one team and its drivers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamStanding {
    /// Team ID
    pub id: u64,
    /// Team name
    pub name: String,
    /// Point buckets
    #[serde(flatten)]
    pub totals: PointTotals,
    /// Results of all drivers, in event order
    pub results: Vec<TeamResult>,
    /// Drivers in roster slot order, never padded
    pub drivers: Vec<DriverStanding>,
}

impl TeamStanding {
    fn new(team: &Team) -> Self {
        Self {
            id: team.id,
            name: team.name.clone(),
            totals: PointTotals::default(),
            results: Vec::new(),
            drivers: Vec::with_capacity(team.drivers.len()),
        }
    }

    /// Driver in roster slot `slot`, or `None` if the team has fewer drivers
    pub fn driver_slot(&self, slot: usize) -> Option<&DriverStanding> {
        self.drivers.get(slot)
    }
}

/// Standings of every team, in roster order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standings {
    /// Teams in roster order
    pub teams: Vec<TeamStanding>,
    /// Events that make up the latest round
    pub latest_round: LatestRound,
}

impl Standings {
    /// Standing of the team with `team_id`
    pub fn team(&self, team_id: u64) -> Option<&TeamStanding> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    /// Standing of the driver with `driver_id`
    pub fn driver(&self, driver_id: u64) -> Option<&DriverStanding> {
        self.teams
            .iter()
            .flat_map(|t| t.drivers.iter())
            .find(|d| d.id == driver_id)
    }
}

/// Compute standings with race days in the local time zone
pub fn compute_standings(
    teams: &[Team],
    events: &[RaceEvent],
) -> Result<Standings, StandingsError> {
    compute_standings_in(teams, events, &Local)
}

/// Compute standings with race days in `tz`
///
/// Fails on the first result whose team or driver is not in `teams`.
pub fn compute_standings_in<Tz: TimeZone>(
    teams: &[Team],
    events: &[RaceEvent],
    tz: &Tz,
) -> Result<Standings, StandingsError> {
    let latest_round = LatestRound::from_events(events, tz);

    let mut team_slots: HashMap<u64, usize> = HashMap::with_capacity(teams.len());
    let mut team_standings: Vec<TeamStanding> = Vec::with_capacity(teams.len());
    let mut drivers: HashMap<u64, DriverStanding> = HashMap::new();

    for team in teams {
        team_slots.entry(team.id).or_insert(team_standings.len());
        team_standings.push(TeamStanding::new(team));
        for driver in &team.drivers {
            drivers
                .entry(driver.id)
                .or_insert_with(|| DriverStanding::new(driver));
        }
    }

    for event in events {
        let in_latest_round = latest_round.contains(event.id);
        let pre_season = event.event_type.is_pre_season();

        for result in &event.results {
            let driver = drivers
                .get_mut(&result.driver_id)
                .ok_or(StandingsError::UnknownDriver {
                    event_id: event.id,
                    driver_id: result.driver_id,
                })?;
            let team = team_slots
                .get(&result.team_id)
                .and_then(|&slot| team_standings.get_mut(slot))
                .ok_or(StandingsError::UnknownTeam {
                    event_id: event.id,
                    team_id: result.team_id,
                })?;

            team.totals.record(result.points, pre_season, in_latest_round);
            team.results.push(TeamResult {
                event_id: event.id,
                event_name: event.name.clone(),
                driver_name: driver.name.clone(),
                points: result.points,
                position: result.position,
            });

            driver.totals.record(result.points, pre_season, in_latest_round);
            driver.results.push(DriverResult {
                event_id: event.id,
                event_name: event.name.clone(),
                points: result.points,
                position: result.position,
            });
        }
    }

    for (team, standing) in teams.iter().zip(team_standings.iter_mut()) {
        standing.drivers = team
            .drivers
            .iter()
            .filter_map(|driver| drivers.remove(&driver.id))
            .collect();
    }

    debug!(
        teams = team_standings.len(),
        events = events.len(),
        latest_round_events = latest_round.event_ids().count(),
        "Computed standings"
    );

    Ok(Standings {
        teams: team_standings,
        latest_round,
    })
}
