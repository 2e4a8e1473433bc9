//! Latest race round detection
//!
//! A round is every event held on the most recent calendar day. Days are
//! computed in a caller-supplied time zone; the service uses local time.

use std::collections::BTreeSet;

use chrono::{TimeZone, Timelike};
use pitwall_schemas::RaceEvent;
use serde::Serialize;
use tracing::warn;

/// Events strictly less than this many seconds older than the newest day join the round
pub const ROUND_WINDOW_SECS: i64 = 60;

/// The set of events forming the most recent race round
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LatestRound {
    day: Option<i64>,
    event_ids: BTreeSet<u64>,
}

impl LatestRound {
    /// Scan `events` in order and collect the latest round
    ///
    /// An event on a later day than any seen so far starts a new round. An
    /// event whose day is less than [`ROUND_WINDOW_SECS`] older than the
    /// current day joins it. Anything older is ignored.
    pub fn from_events<Tz: TimeZone>(events: &[RaceEvent], tz: &Tz) -> Self {
        let mut round = Self::default();

        for event in events {
            let Some(day) = day_start(event.date, tz) else {
                warn!(event_id = event.id, date = event.date, "Event date out of range, skipping");
                continue;
            };

            match round.day {
                Some(current) if day <= current => {
                    if current.saturating_sub(day) < ROUND_WINDOW_SECS {
                        round.event_ids.insert(event.id);
                    }
                }
                _ => {
                    round.day = Some(day);
                    round.event_ids.clear();
                    round.event_ids.insert(event.id);
                }
            }
        }

        round
    }

    /// Whether `event_id` belongs to the latest round
    pub fn contains(&self, event_id: u64) -> bool {
        self.event_ids.contains(&event_id)
    }

    /// Start of the latest round's day as Unix seconds, if there are any events
    pub fn day(&self) -> Option<i64> {
        self.day
    }

    /// IDs of the events in the latest round, ascending
    pub fn event_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.event_ids.iter().copied()
    }

    /// Whether no event has been seen
    pub fn is_empty(&self) -> bool {
        self.event_ids.is_empty()
    }
}

/// Unix seconds of the local midnight starting the day of `timestamp`
///
/// Returns `None` if `timestamp` is not representable.
pub fn day_start<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> Option<i64> {
    let local = tz.timestamp_opt(timestamp, 0).single()?;
    let midnight = local.date_naive().and_hms_opt(0, 0, 0)?;

    match tz.from_local_datetime(&midnight).earliest() {
        Some(start) => Some(start.timestamp()),
        // midnight skipped by a DST change; fall back to the current offset
        None => timestamp.checked_sub(i64::from(local.num_seconds_from_midnight())),
    }
}
