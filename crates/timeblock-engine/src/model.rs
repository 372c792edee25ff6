//! Time-event records and the domain entries that own them.
//!
//! These mirror the shapes the backend API hands to the calendar view. Every
//! value here is a transient view model: conversions and splits produce new
//! values instead of mutating the caller's records.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Tag identifying which kind of domain entity produced a time event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TimeEventNamespace {
    ScheduleEventInDay,
    ScheduleFullDaysBlock,
    InboxTask,
    PersonBirthday,
    Vacation,
    /// A namespace this build does not know about, kept verbatim.
    Unknown(String),
}

impl TimeEventNamespace {
    pub fn as_str(&self) -> &str {
        match self {
            TimeEventNamespace::ScheduleEventInDay => "schedule-event-in-day",
            TimeEventNamespace::ScheduleFullDaysBlock => "schedule-full-days-block",
            TimeEventNamespace::InboxTask => "inbox-task",
            TimeEventNamespace::PersonBirthday => "person-birthday",
            TimeEventNamespace::Vacation => "vacation",
            TimeEventNamespace::Unknown(raw) => raw,
        }
    }
}

impl From<String> for TimeEventNamespace {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "schedule-event-in-day" => TimeEventNamespace::ScheduleEventInDay,
            "schedule-full-days-block" => TimeEventNamespace::ScheduleFullDaysBlock,
            "inbox-task" => TimeEventNamespace::InboxTask,
            "person-birthday" => TimeEventNamespace::PersonBirthday,
            "vacation" => TimeEventNamespace::Vacation,
            _ => TimeEventNamespace::Unknown(raw),
        }
    }
}

impl From<TimeEventNamespace> for String {
    fn from(ns: TimeEventNamespace) -> Self {
        match ns {
            TimeEventNamespace::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TimeEventNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled block with a time-of-day component.
///
/// `start_date` and `start_time_in_day` are stored in UTC. The time stays a
/// raw `HH:mm` string because editor state may hold it half-typed or absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEventInDayBlock {
    pub id: String,
    pub namespace: TimeEventNamespace,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub start_time_in_day: Option<String>,
    pub duration_mins: u32,
    #[serde(default)]
    pub archived: bool,
}

/// A block covering whole calendar days.
///
/// Occupies `[start_date, start_date + duration_days - 1]` inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEventFullDaysBlock {
    pub id: String,
    pub namespace: TimeEventNamespace,
    pub start_date: NaiveDate,
    pub duration_days: u32,
    #[serde(default)]
    pub archived: bool,
}

impl TimeEventFullDaysBlock {
    /// Calendar dates this block occupies, in order.
    ///
    /// A zero `duration_days` still yields the start date so every block
    /// lands in at least one bucket.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take(self.duration_days.max(1) as usize)
    }
}

/// Domain entries that can own an in-day time event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entry_kind", rename_all = "snake_case")]
pub enum InDayEntry {
    InboxTask {
        ref_id: String,
        name: String,
        status: String,
    },
    ScheduleEvent {
        ref_id: String,
        name: String,
    },
}

impl InDayEntry {
    pub fn display_name(&self) -> &str {
        match self {
            InDayEntry::InboxTask { name, .. } | InDayEntry::ScheduleEvent { name, .. } => name,
        }
    }
}

/// Domain entries that can own a full-days time event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entry_kind", rename_all = "snake_case")]
pub enum FullDaysEntry {
    ScheduleFullDays { ref_id: String, name: String },
    PersonBirthday { ref_id: String, person_name: String },
    Vacation { ref_id: String, name: String },
}

impl FullDaysEntry {
    pub fn display_name(&self) -> &str {
        match self {
            FullDaysEntry::ScheduleFullDays { name, .. } | FullDaysEntry::Vacation { name, .. } => {
                name
            }
            FullDaysEntry::PersonBirthday { person_name, .. } => person_name,
        }
    }
}

/// An in-day time event paired with the entry that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedTimeEventInDayEntry {
    pub time_event: TimeEventInDayBlock,
    pub entry: InDayEntry,
}

impl CombinedTimeEventInDayEntry {
    /// The same owning entry with its embedded time event replaced.
    pub fn with_time_event(&self, time_event: TimeEventInDayBlock) -> Self {
        Self {
            time_event,
            entry: self.entry.clone(),
        }
    }
}

/// A full-days time event paired with the entry that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedTimeEventFullDaysEntry {
    pub time_event: TimeEventFullDaysBlock,
    pub entry: FullDaysEntry,
}
