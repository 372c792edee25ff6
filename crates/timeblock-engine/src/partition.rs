//! Group time-event entries into per-calendar-day buckets.
//!
//! An entry spanning N days lands in exactly N buckets: full-day entries as N
//! memberships of the same record, in-day entries as N distinct fragments.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::Result;
use crate::model::{CombinedTimeEventFullDaysEntry, CombinedTimeEventInDayEntry};
use crate::ordering::{compare_full_days, in_day_sort_key};
use crate::splitter::split_in_day_entry;

/// Entries keyed by calendar date, iterated chronologically.
pub type DayBuckets<T> = BTreeMap<NaiveDate, Vec<T>>;

/// Bucket full-day entries under every date they occupy.
///
/// Each bucket is ordered by namespace rank, then start date.
pub fn partition_full_days(
    entries: &[CombinedTimeEventFullDaysEntry],
) -> DayBuckets<CombinedTimeEventFullDaysEntry> {
    let mut buckets: DayBuckets<CombinedTimeEventFullDaysEntry> = BTreeMap::new();

    for entry in entries {
        for date in entry.time_event.dates() {
            buckets.entry(date).or_default().push(entry.clone());
        }
    }

    for bucket in buckets.values_mut() {
        bucket.sort_by(compare_full_days);
    }

    buckets
}

/// Split in-day entries at midnight and bucket each fragment under its date.
///
/// Each bucket is ordered by start, then end. Entries must already be in the
/// display zone.
#[tracing::instrument(skip(entries), fields(count = entries.len()))]
pub fn partition_in_day(
    entries: &[CombinedTimeEventInDayEntry],
) -> Result<DayBuckets<CombinedTimeEventInDayEntry>> {
    let mut keyed: BTreeMap<NaiveDate, Vec<(_, CombinedTimeEventInDayEntry)>> = BTreeMap::new();

    for entry in entries {
        for fragment in split_in_day_entry(entry)?.into_fragments() {
            let key = in_day_sort_key(&fragment)?;
            keyed
                .entry(fragment.time_event.start_date)
                .or_default()
                .push((key, fragment));
        }
    }

    let buckets = keyed
        .into_iter()
        .map(|(date, mut bucket)| {
            bucket.sort_by_key(|(key, _)| *key);
            (date, bucket.into_iter().map(|(_, entry)| entry).collect())
        })
        .collect::<DayBuckets<_>>();

    tracing::trace!(days = buckets.len(), "partitioned in-day entries");
    Ok(buckets)
}
