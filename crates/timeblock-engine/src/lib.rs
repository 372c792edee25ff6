//! # timeblock-engine
//!
//! Time-zone-aware layout of calendar time blocks.
//!
//! Takes time events paired with the entries that own them (inbox tasks,
//! schedule events, birthdays, vacations), moves in-day blocks from UTC
//! storage into a display zone, splits blocks that cross midnight, buckets
//! everything by calendar day, and packs overlapping in-day blocks into a
//! fixed set of display lanes. Every function is pure and synchronous.
//!
//! ## Modules
//!
//! - [`time`] — UTC instants and zone conversion for `(date, HH:mm)` pairs
//! - [`dst`] — DST gap/overlap resolution policies
//! - [`splitter`] — split cross-midnight blocks into per-day fragments
//! - [`partition`] — group entries into per-day buckets
//! - [`ordering`] — canonical in-bucket sort orders
//! - [`lanes`] — greedy overlap lane assignment on a 15-minute grid
//! - [`sizing`] — rem/quarter conversions and label clipping
//! - [`layout`] — the whole pipeline in one call
//! - [`model`] — time-event records and owning entries
//! - [`error`] — Error types

pub mod dst;
pub mod error;
pub mod lanes;
pub mod layout;
pub mod model;
pub mod ordering;
pub mod partition;
pub mod sizing;
pub mod splitter;
pub mod time;

pub use dst::DstPolicy;
pub use error::LayoutError;
pub use lanes::{assign_lanes, LaneOffsets, LANE_COUNT};
pub use layout::{CalendarInput, CalendarLayout, LayoutOptions};
pub use model::{
    CombinedTimeEventFullDaysEntry, CombinedTimeEventInDayEntry, FullDaysEntry, InDayEntry,
    TimeEventFullDaysBlock, TimeEventInDayBlock, TimeEventNamespace,
};
pub use partition::{partition_full_days, partition_in_day, DayBuckets};
pub use sizing::{
    clip_label_to_width, duration_in_quarters, minutes_to_rems, EstimatedTextMeasure,
    TextMeasure,
};
pub use splitter::{split_in_day_entry, FragmentDay, SplitInDayEntry};
pub use time::{convert_to_utc, convert_to_zone, end_instant, start_instant, ZonedParams};
