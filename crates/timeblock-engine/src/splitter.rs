//! Split in-day blocks that cross midnight into per-day fragments.
//!
//! An in-day block may cover at most three calendar days. The first fragment
//! runs to 23:59 of the start day, a middle fragment covers the whole second
//! day, and the last fragment starts at 00:00 and receives whatever remains of
//! the original duration, so the fragment durations always sum to the
//! original `duration_mins`.

use chrono::{Duration, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::model::{CombinedTimeEventInDayEntry, TimeEventInDayBlock};
use crate::time::{end_instant, format_time_in_day, start_instant};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Largest calendar-day span (end date minus start date) the in-day model supports.
pub const MAX_SPAN_DAYS: i64 = 2;

/// Which day of the original block a fragment covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentDay {
    Day1,
    Day2,
    Day3,
}

/// The result of splitting one in-day entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitInDayEntry {
    pub day1: CombinedTimeEventInDayEntry,
    pub day2: Option<CombinedTimeEventInDayEntry>,
    pub day3: Option<CombinedTimeEventInDayEntry>,
}

impl SplitInDayEntry {
    /// Present fragments in day order.
    pub fn fragments(&self) -> impl Iterator<Item = (FragmentDay, &CombinedTimeEventInDayEntry)> {
        std::iter::once((FragmentDay::Day1, &self.day1))
            .chain(self.day2.iter().map(|e| (FragmentDay::Day2, e)))
            .chain(self.day3.iter().map(|e| (FragmentDay::Day3, e)))
    }

    pub fn into_fragments(self) -> Vec<CombinedTimeEventInDayEntry> {
        std::iter::once(self.day1)
            .chain(self.day2)
            .chain(self.day3)
            .collect()
    }
}

/// Calendar days between the block's start date and end date.
pub fn span_days(block: &TimeEventInDayBlock) -> Result<i64> {
    let start = start_instant(block)?;
    let end = end_instant(block)?;
    Ok((end.date_naive() - start.date_naive()).num_days())
}

/// Reject blocks the splitter cannot represent.
///
/// Call at the input boundary to fail before any layout work is done.
pub fn check_supported_span(block: &TimeEventInDayBlock) -> Result<()> {
    let days = span_days(block)?;
    if days > MAX_SPAN_DAYS {
        return Err(LayoutError::UnsupportedDuration {
            id: block.id.clone(),
            days: days + 1,
        });
    }
    Ok(())
}

fn fragment(
    block: &TimeEventInDayBlock,
    date: NaiveDate,
    time: NaiveTime,
    duration_mins: u32,
) -> TimeEventInDayBlock {
    TimeEventInDayBlock {
        start_date: date,
        start_time_in_day: Some(format_time_in_day(time)),
        duration_mins,
        ..block.clone()
    }
}

/// Split `entry` into one fragment per calendar day it touches.
///
/// The entry's time event must already be in the display zone.
#[tracing::instrument(skip(entry), fields(id = %entry.time_event.id))]
pub fn split_in_day_entry(entry: &CombinedTimeEventInDayEntry) -> Result<SplitInDayEntry> {
    let block = &entry.time_event;
    let start = start_instant(block)?;
    let days = span_days(block)?;

    if days == 0 {
        return Ok(SplitInDayEntry {
            day1: entry.clone(),
            day2: None,
            day3: None,
        });
    }
    if days > MAX_SPAN_DAYS {
        return Err(LayoutError::UnsupportedDuration {
            id: block.id.clone(),
            days: days + 1,
        });
    }

    let start_of_day_mins = start.hour() * 60 + start.minute();
    let day1_mins = (MINUTES_PER_DAY - 1).saturating_sub(start_of_day_mins);
    let day1 = entry.with_time_event(fragment(
        block,
        block.start_date,
        start.time(),
        day1_mins,
    ));

    let midnight = NaiveTime::MIN;
    let next_date = block.start_date + Duration::days(1);
    let remaining = block.duration_mins.saturating_sub(day1_mins);

    tracing::debug!(days = days + 1, day1_mins, "splitting block across midnight");

    if days == 1 {
        return Ok(SplitInDayEntry {
            day1,
            day2: Some(entry.with_time_event(fragment(block, next_date, midnight, remaining))),
            day3: None,
        });
    }

    let day2 = entry.with_time_event(fragment(block, next_date, midnight, MINUTES_PER_DAY));
    let day3 = entry.with_time_event(fragment(
        block,
        next_date + Duration::days(1),
        midnight,
        remaining.saturating_sub(MINUTES_PER_DAY),
    ));
    Ok(SplitInDayEntry {
        day1,
        day2: Some(day2),
        day3: Some(day3),
    })
}
