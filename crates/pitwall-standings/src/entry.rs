//! Submission helpers for grids and results
//!
//! Editors submit a plain list of driver IDs in order. These helpers fill in
//! the 1-based position, the owning team and, for results, the points.

use std::collections::{HashMap, HashSet};

use pitwall_schemas::{EventType, RacePosition};

use crate::error::StandingsError;
use crate::scoring::points_for;

/// Build a result sheet from drivers in finishing order
///
/// `roster` maps driver IDs to their current team.
pub fn build_results(
    driver_ids: &[u64],
    event_type: EventType,
    roster: &HashMap<u64, u64>,
) -> Result<Vec<RacePosition>, StandingsError> {
    build_positions(driver_ids, roster, |index| points_for(index, event_type))
}

/// Build a starting grid from drivers in grid order; grid slots carry no points
pub fn build_starting_grid(
    driver_ids: &[u64],
    roster: &HashMap<u64, u64>,
) -> Result<Vec<RacePosition>, StandingsError> {
    build_positions(driver_ids, roster, |_| 0)
}

fn build_positions(
    driver_ids: &[u64],
    roster: &HashMap<u64, u64>,
    points: impl Fn(usize) -> u64,
) -> Result<Vec<RacePosition>, StandingsError> {
    let mut seen = HashSet::with_capacity(driver_ids.len());

    (1u64..)
        .zip(driver_ids.iter().enumerate())
        .map(|(position, (index, &driver_id))| {
            if !seen.insert(driver_id) {
                return Err(StandingsError::DuplicateDriver { driver_id });
            }
            let team_id = *roster
                .get(&driver_id)
                .ok_or(StandingsError::UnregisteredDriver { driver_id })?;

            Ok(RacePosition {
                position,
                points: points(index),
                driver_id,
                team_id,
            })
        })
        .collect()
}
