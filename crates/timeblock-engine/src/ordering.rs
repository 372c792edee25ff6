//! Canonical orderings for entries inside a day bucket.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::model::{CombinedTimeEventFullDaysEntry, CombinedTimeEventInDayEntry, TimeEventNamespace};
use crate::time::{end_instant, start_instant};

/// Full-day namespaces in display order.
pub const FULL_DAYS_NAMESPACE_ORDER: [TimeEventNamespace; 3] = [
    TimeEventNamespace::Vacation,
    TimeEventNamespace::PersonBirthday,
    TimeEventNamespace::ScheduleFullDaysBlock,
];

/// Sort rank of a full-day namespace. Namespaces outside
/// [`FULL_DAYS_NAMESPACE_ORDER`] all share the last rank.
pub fn namespace_rank(namespace: &TimeEventNamespace) -> usize {
    FULL_DAYS_NAMESPACE_ORDER
        .iter()
        .position(|known| known == namespace)
        .unwrap_or(FULL_DAYS_NAMESPACE_ORDER.len())
}

/// Namespace rank first, then start date.
pub fn compare_full_days(
    a: &CombinedTimeEventFullDaysEntry,
    b: &CombinedTimeEventFullDaysEntry,
) -> Ordering {
    namespace_rank(&a.time_event.namespace)
        .cmp(&namespace_rank(&b.time_event.namespace))
        .then_with(|| a.time_event.start_date.cmp(&b.time_event.start_date))
}

/// Stable sort of full-day entries; the input is left untouched.
pub fn sort_full_days(
    entries: &[CombinedTimeEventFullDaysEntry],
) -> Vec<CombinedTimeEventFullDaysEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(compare_full_days);
    sorted
}

/// The `(start, end)` key in-day entries sort by.
pub fn in_day_sort_key(entry: &CombinedTimeEventInDayEntry) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    Ok((start_instant(&entry.time_event)?, end_instant(&entry.time_event)?))
}

/// Stable sort of in-day entries by start, then end.
///
/// Fails if any entry lacks a parseable start time.
pub fn sort_in_day(
    entries: &[CombinedTimeEventInDayEntry],
) -> Result<Vec<CombinedTimeEventInDayEntry>> {
    let mut keyed = entries
        .iter()
        .map(|entry| -> Result<_> { Ok((in_day_sort_key(entry)?, entry.clone())) })
        .collect::<Result<Vec<_>>>()?;
    keyed.sort_by_key(|(key, _)| *key);
    Ok(keyed.into_iter().map(|(_, entry)| entry).collect())
}
