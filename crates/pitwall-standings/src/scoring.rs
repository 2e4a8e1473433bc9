//! Position to points tables
//!
//! Points are computed when results are submitted and stored with them.
//! Changing these tables does not rescore events already on disk.

use pitwall_schemas::EventType;

/// Points for the top ten of a full-distance race, winner first
pub const RACE_POINTS: [u64; 10] = [25, 18, 15, 12, 10, 8, 6, 4, 2, 1];

/// Points for a sprint win; each following place gets one point less
pub const SPRINT_MAX_POINTS: u64 = 8;

/// Points for finishing at 0-based `index` in an event of `event_type`
///
/// Pre-season events use the same tables as their season counterparts.
pub fn points_for(index: usize, event_type: EventType) -> u64 {
    if event_type.is_sprint() {
        let index = u64::try_from(index).unwrap_or(u64::MAX);
        SPRINT_MAX_POINTS.saturating_sub(index)
    } else {
        RACE_POINTS.get(index).copied().unwrap_or(0)
    }
}
