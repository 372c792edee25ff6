//! Overlap lane assignment for one day of in-day entries.
//!
//! The day is a grid of 96 fifteen-minute cells, each tracking occupancy for
//! [`LANE_COUNT`] side-by-side lanes. Entries are placed greedily in input
//! order: the first of lanes 0-3 free at the entry's starting cell wins,
//! otherwise the entry goes to the overflow lane 4, which is never checked for
//! collisions. The calendar draws at most five columns, so the cap is fixed.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::model::CombinedTimeEventInDayEntry;
use crate::sizing::{duration_in_quarters, MINUTES_PER_QUARTER};
use crate::splitter::MINUTES_PER_DAY;
use crate::time::start_instant;

pub const LANE_COUNT: usize = 5;
pub const OVERFLOW_LANE: usize = LANE_COUNT - 1;
pub const CELLS_PER_DAY: usize = (MINUTES_PER_DAY / MINUTES_PER_QUARTER) as usize;

/// Lane index per time-event id.
pub type LaneOffsets = BTreeMap<String, usize>;

/// Half-open range of grid cells an entry covers: its start cell plus
/// `duration_in_quarters` cells, clipped to the day.
fn cell_range(offset_mins: i64, duration_mins: u32) -> (usize, usize) {
    let start = offset_mins.clamp(0, i64::from(MINUTES_PER_DAY) - 1);
    let first = (start / i64::from(MINUTES_PER_QUARTER)) as usize;
    let quarters = duration_in_quarters(start, duration_mins) as usize;
    (first, (first + quarters).min(CELLS_PER_DAY))
}

/// Assign each entry of one day a lane in `0..LANE_COUNT`.
///
/// `day_start` is the instant the day's grid begins at, in the same frame the
/// entries' start times are read in. Pass entries sorted by start and end
/// (see [`crate::ordering::sort_in_day`]) for sensible results; the scan
/// order decides ties.
#[tracing::instrument(skip(entries), fields(count = entries.len()))]
pub fn assign_lanes(
    entries: &[CombinedTimeEventInDayEntry],
    day_start: DateTime<Utc>,
) -> Result<LaneOffsets> {
    let mut grid = [[false; LANE_COUNT]; CELLS_PER_DAY];
    let mut offsets = LaneOffsets::new();

    for entry in entries {
        let block = &entry.time_event;
        let offset_mins = (start_instant(block)? - day_start).num_minutes();
        let (first, last) = cell_range(offset_mins, block.duration_mins);

        let lane = (0..OVERFLOW_LANE)
            .find(|&lane| !grid[first][lane])
            .unwrap_or(OVERFLOW_LANE);
        if lane == OVERFLOW_LANE {
            tracing::debug!(id = %block.id, cell = first, "all lanes busy, using overflow lane");
        }

        for cell in &mut grid[first..last] {
            cell[lane] = true;
        }
        offsets.insert(block.id.clone(), lane);
    }

    Ok(offsets)
}
