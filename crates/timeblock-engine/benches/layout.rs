use std::hint::black_box;

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use timeblock_engine::{
    CalendarInput, CalendarLayout, CombinedTimeEventInDayEntry, InDayEntry, LayoutOptions,
    TimeEventInDayBlock, TimeEventNamespace,
};

/// A month of days with `per_day` overlapping in-day blocks each.
fn month_input(per_day: usize) -> CalendarInput {
    let first = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap_or_default();
    let in_day = first
        .iter_days()
        .take(31)
        .enumerate()
        .flat_map(|(day, date)| {
            (0..per_day).map(move |i| {
                let start = (i * 37) % (23 * 60);
                CombinedTimeEventInDayEntry {
                    time_event: TimeEventInDayBlock {
                        id: format!("te-{day}-{i}"),
                        namespace: TimeEventNamespace::ScheduleEventInDay,
                        start_date: date,
                        start_time_in_day: Some(format!("{:02}:{:02}", start / 60, start % 60)),
                        duration_mins: 30 + (i as u32 * 13) % 150,
                        archived: false,
                    },
                    entry: InDayEntry::ScheduleEvent {
                        ref_id: format!("ev-{day}-{i}"),
                        name: format!("Event {i}"),
                    },
                }
            })
        })
        .collect();
    CalendarInput {
        in_day,
        full_days: Vec::new(),
    }
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout.build");
    for (case, per_day) in [("sparse", 4), ("busy", 24), ("packed", 96)] {
        let input = month_input(per_day);
        let options = LayoutOptions {
            timezone: "America/New_York".to_string(),
            ..LayoutOptions::default()
        };
        group.throughput(Throughput::Elements(input.in_day.len() as u64));
        group.bench_function(case, |b| {
            b.iter(|| CalendarLayout::build(black_box(&input), black_box(&options)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
