//! End-to-end calendar layout: zone conversion, partitioning, lane assignment.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::lanes::{assign_lanes, LaneOffsets};
use crate::model::{CombinedTimeEventFullDaysEntry, CombinedTimeEventInDayEntry};
use crate::partition::{partition_full_days, partition_in_day, DayBuckets};
use crate::splitter::check_supported_span;
use crate::time::{block_to_zone, parse_timezone};

/// Settings for one layout pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// IANA zone the calendar is displayed in.
    pub timezone: String,
    /// Keep soft-deleted blocks.
    pub include_archived: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            include_archived: false,
        }
    }
}

/// The entries a calendar view is built from, as served by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarInput {
    pub in_day: Vec<CombinedTimeEventInDayEntry>,
    pub full_days: Vec<CombinedTimeEventFullDaysEntry>,
}

/// Display-ready buckets plus lane offsets for every in-day bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarLayout {
    pub full_days: DayBuckets<CombinedTimeEventFullDaysEntry>,
    pub in_day: DayBuckets<CombinedTimeEventInDayEntry>,
    pub lanes: BTreeMap<NaiveDate, LaneOffsets>,
}

impl CalendarLayout {
    /// Build the layout for `input` in the zone named by `options`.
    ///
    /// In-day blocks are converted from UTC storage into the display zone
    /// before they are split, so fragments break at local midnight.
    #[tracing::instrument(skip(input), fields(in_day = input.in_day.len(), full_days = input.full_days.len()))]
    pub fn build(input: &CalendarInput, options: &LayoutOptions) -> Result<Self> {
        let tz = parse_timezone(&options.timezone)?;

        let in_day = input
            .in_day
            .iter()
            .filter(|e| options.include_archived || !e.time_event.archived)
            .map(|e| -> Result<CombinedTimeEventInDayEntry> {
                let local = e.with_time_event(block_to_zone(&e.time_event, &tz)?);
                check_supported_span(&local.time_event)?;
                Ok(local)
            })
            .collect::<Result<Vec<_>>>()?;

        let full_days: Vec<_> = input
            .full_days
            .iter()
            .filter(|e| options.include_archived || !e.time_event.archived)
            .cloned()
            .collect();

        let in_day = partition_in_day(&in_day)?;
        let lanes = in_day
            .iter()
            .map(|(date, bucket)| -> Result<(NaiveDate, LaneOffsets)> {
                let day_start = date.and_time(NaiveTime::MIN).and_utc();
                Ok((*date, assign_lanes(bucket, day_start)?))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(Self {
            full_days: partition_full_days(&full_days),
            in_day,
            lanes,
        })
    }

    /// Lane of the fragment `id` on `date`, if it was laid out there.
    pub fn lane_of(&self, date: NaiveDate, id: &str) -> Option<usize> {
        self.lanes.get(&date)?.get(id).copied()
    }
}
