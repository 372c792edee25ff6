//! Property-based tests for conversion, splitting, partitioning and lanes.

use chrono::{NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use proptest::prelude::*;
use timeblock_engine::splitter::span_days;
use timeblock_engine::time::{parse_time_in_day, parse_timezone};
use timeblock_engine::{
    assign_lanes, convert_to_utc, convert_to_zone, partition_in_day, split_in_day_entry,
    CombinedTimeEventInDayEntry, InDayEntry, TimeEventInDayBlock, TimeEventNamespace,
    ZonedParams, LANE_COUNT,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_timezone() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("UTC".to_string()),
        Just("America/New_York".to_string()),
        Just("America/Los_Angeles".to_string()),
        Just("Europe/London".to_string()),
        Just("Asia/Tokyo".to_string()),
        Just("Asia/Kolkata".to_string()),
        Just("Australia/Sydney".to_string()),
    ]
}

/// Dates in May-August, clear of every DST transition in the zones above,
/// so wall-clock times are never ambiguous.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2025i32..=2027, 5u32..=8, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn arb_time() -> impl Strategy<Value = String> {
    (0u32..24, 0u32..60).prop_map(|(h, m)| format!("{:02}:{:02}", h, m))
}

/// A start time plus a duration that keeps the block within three calendar days.
fn arb_in_day_block() -> impl Strategy<Value = (NaiveDate, u32, u32)> {
    (arb_date(), 0u32..1440)
        .prop_flat_map(|(date, start)| (Just(date), Just(start), 0u32..(3 * 1440 - start)))
}

fn entry(id: String, date: NaiveDate, start_mins: u32, duration_mins: u32) -> CombinedTimeEventInDayEntry {
    CombinedTimeEventInDayEntry {
        time_event: TimeEventInDayBlock {
            id: id.clone(),
            namespace: TimeEventNamespace::InboxTask,
            start_date: date,
            start_time_in_day: Some(format!("{:02}:{:02}", start_mins / 60, start_mins % 60)),
            duration_mins,
            archived: false,
        },
        entry: InDayEntry::InboxTask {
            ref_id: id,
            name: "task".to_string(),
            status: "accepted".to_string(),
        },
    }
}

fn arb_entries() -> impl Strategy<Value = Vec<CombinedTimeEventInDayEntry>> {
    prop::collection::vec(arb_in_day_block(), 0..20).prop_map(|blocks| {
        blocks
            .into_iter()
            .enumerate()
            .map(|(i, (date, start, dur))| entry(format!("te-{i}"), date, start, dur))
            .collect()
    })
}

fn minutes_of(time: &str) -> u32 {
    let t: NaiveTime = parse_time_in_day(time).unwrap();
    t.hour() * 60 + t.minute()
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: zone conversion round-trips
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn zone_conversion_round_trips(date in arb_date(), time in arb_time(), tz in arb_timezone()) {
        let tz = parse_timezone(&tz).unwrap();
        let original = ZonedParams { start_date: date, start_time_in_day: Some(time) };

        let local = convert_to_zone(&original, &tz).unwrap();
        let back = convert_to_utc(&local, &tz).unwrap();

        prop_assert_eq!(back, original);
    }
}

// ---------------------------------------------------------------------------
// Property 2: fragments preserve duration and tile the original interval
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn split_preserves_total_duration((date, start, dur) in arb_in_day_block()) {
        let e = entry("te".to_string(), date, start, dur);
        let split = split_in_day_entry(&e).unwrap();
        let fragments: Vec<_> = split.fragments().map(|(_, f)| f.time_event.clone()).collect();

        let total: u32 = fragments.iter().map(|f| f.duration_mins).sum();
        prop_assert_eq!(total, dur);
        prop_assert_eq!(fragments.len() as i64, span_days(&e.time_event).unwrap() + 1);

        for (i, f) in fragments.iter().enumerate() {
            let offset = minutes_of(f.start_time_in_day.as_deref().unwrap());
            prop_assert_eq!(f.start_date, date + chrono::Duration::days(i as i64));
            prop_assert!(offset + f.duration_mins <= 1440, "fragment overruns its day");
            if i > 0 {
                prop_assert_eq!(offset, 0);
            }
            if i + 1 < fragments.len() {
                prop_assert!(offset + f.duration_mins >= 1439, "non-final fragment must reach 23:59");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: every entry lands in exactly the buckets its range touches
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn partition_covers_each_touched_day(entries in arb_entries()) {
        let buckets = partition_in_day(&entries).unwrap();

        for e in &entries {
            let span = span_days(&e.time_event).unwrap();
            let holding: Vec<_> = buckets
                .iter()
                .filter(|(_, bucket)| bucket.iter().any(|f| f.time_event.id == e.time_event.id))
                .map(|(date, _)| *date)
                .collect();
            let expected: Vec<_> = (0..=span)
                .map(|d| e.time_event.start_date + chrono::Duration::days(d))
                .collect();
            prop_assert_eq!(holding, expected);
        }

        for (date, bucket) in &buckets {
            for f in bucket {
                prop_assert_eq!(f.time_event.start_date, *date);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: partitioning is idempotent
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn partition_is_idempotent(entries in arb_entries()) {
        let first = partition_in_day(&entries).unwrap();
        let second = partition_in_day(&entries).unwrap();
        prop_assert_eq!(first, second);
    }
}

// ---------------------------------------------------------------------------
// Property 5: lanes stay in range and cover every entry of the day
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn lanes_are_bounded(entries in arb_entries()) {
        let buckets = partition_in_day(&entries).unwrap();
        for (date, bucket) in &buckets {
            let day_start = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
            let lanes = assign_lanes(bucket, day_start).unwrap();
            for f in bucket {
                let lane = lanes.get(&f.time_event.id).copied();
                prop_assert!(matches!(lane, Some(l) if l < LANE_COUNT));
            }
        }
    }
}
