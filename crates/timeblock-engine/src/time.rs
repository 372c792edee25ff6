//! Instants and time-zone conversion for in-day time events.
//!
//! Blocks are stored as a UTC `(start_date, start_time_in_day)` pair. The
//! conversions here reinterpret that pair in a display zone and back, using
//! `chrono-tz` so DST transitions roll the date correctly.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::dst::DstPolicy;
use crate::error::{LayoutError, Result};
use crate::model::TimeEventInDayBlock;

const TIME_IN_DAY_FORMAT: &str = "%H:%M";

/// A date plus optional time of day, as carried by editor forms and blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZonedParams {
    pub start_date: NaiveDate,
    #[serde(default)]
    pub start_time_in_day: Option<String>,
}

impl From<&TimeEventInDayBlock> for ZonedParams {
    fn from(block: &TimeEventInDayBlock) -> Self {
        Self {
            start_date: block.start_date,
            start_time_in_day: block.start_time_in_day.clone(),
        }
    }
}

/// Resolve an IANA zone name such as `"America/New_York"`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| LayoutError::InvalidTimezone(name.to_string()))
}

/// Parse an `HH:mm` time of day.
pub fn parse_time_in_day(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), TIME_IN_DAY_FORMAT)
        .map_err(|e| LayoutError::InvalidTime(format!("'{}': {}", raw, e)))
}

/// Format a time of day as `HH:mm`.
pub fn format_time_in_day(time: NaiveTime) -> String {
    time.format(TIME_IN_DAY_FORMAT).to_string()
}

fn naive_start(block: &TimeEventInDayBlock) -> Result<NaiveDateTime> {
    let raw = block.start_time_in_day.as_deref().ok_or_else(|| {
        LayoutError::InvalidTime(format!("block {} has no start time", block.id))
    })?;
    Ok(block.start_date.and_time(parse_time_in_day(raw)?))
}

/// The block's start, reading its date and time as UTC.
pub fn start_instant(block: &TimeEventInDayBlock) -> Result<DateTime<Utc>> {
    Ok(naive_start(block)?.and_utc())
}

/// The block's start plus `duration_mins`.
pub fn end_instant(block: &TimeEventInDayBlock) -> Result<DateTime<Utc>> {
    Ok(start_instant(block)? + Duration::minutes(i64::from(block.duration_mins)))
}

/// Reinterpret a UTC `(date, time)` pair as wall-clock time in `tz`.
///
/// A pair without a time passes through unchanged; editor state may be
/// partially filled and form validation rejects it later.
pub fn convert_to_zone(params: &ZonedParams, tz: &Tz) -> Result<ZonedParams> {
    let Some(raw) = params.start_time_in_day.as_deref() else {
        tracing::trace!(date = %params.start_date, "no start time, passing through");
        return Ok(params.clone());
    };
    let utc = params.start_date.and_time(parse_time_in_day(raw)?).and_utc();
    let local = utc.with_timezone(tz).naive_local();
    Ok(ZonedParams {
        start_date: local.date(),
        start_time_in_day: Some(format_time_in_day(local.time())),
    })
}

/// Interpret a `(date, time)` pair as wall-clock time in `tz` and express it in UTC.
///
/// Uses [`DstPolicy::default`] for times in a DST gap or overlap.
pub fn convert_to_utc(params: &ZonedParams, tz: &Tz) -> Result<ZonedParams> {
    convert_to_utc_with_policy(params, tz, DstPolicy::default())
}

/// Same as [`convert_to_utc`] with an explicit DST policy.
pub fn convert_to_utc_with_policy(
    params: &ZonedParams,
    tz: &Tz,
    policy: DstPolicy,
) -> Result<ZonedParams> {
    let Some(raw) = params.start_time_in_day.as_deref() else {
        tracing::trace!(date = %params.start_date, "no start time, passing through");
        return Ok(params.clone());
    };
    let local = params.start_date.and_time(parse_time_in_day(raw)?);
    let utc = policy.resolve(tz, local)?.naive_utc();
    Ok(ZonedParams {
        start_date: utc.date(),
        start_time_in_day: Some(format_time_in_day(utc.time())),
    })
}

/// A copy of `block` with its start moved from UTC storage into `tz`.
pub fn block_to_zone(block: &TimeEventInDayBlock, tz: &Tz) -> Result<TimeEventInDayBlock> {
    let converted = convert_to_zone(&ZonedParams::from(block), tz)?;
    Ok(TimeEventInDayBlock {
        start_date: converted.start_date,
        start_time_in_day: converted.start_time_in_day,
        ..block.clone()
    })
}

/// A copy of `block` with its start moved from wall-clock in `tz` back to UTC.
pub fn block_to_utc(
    block: &TimeEventInDayBlock,
    tz: &Tz,
    policy: DstPolicy,
) -> Result<TimeEventInDayBlock> {
    let converted = convert_to_utc_with_policy(&ZonedParams::from(block), tz, policy)?;
    Ok(TimeEventInDayBlock {
        start_date: converted.start_date,
        start_time_in_day: converted.start_time_in_day,
        ..block.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_digit_hours_and_minutes() {
        let t = parse_time_in_day("09:05").unwrap();
        assert_eq!(format_time_in_day(t), "09:05");
    }

    #[test]
    fn rejects_out_of_range_time() {
        assert!(matches!(
            parse_time_in_day("24:30"),
            Err(LayoutError::InvalidTime(_))
        ));
        assert!(parse_time_in_day("9h30").is_err());
    }

    #[test]
    fn unknown_zone_is_an_error() {
        assert_eq!(
            parse_timezone("Mars/Olympus_Mons").unwrap_err(),
            LayoutError::InvalidTimezone("Mars/Olympus_Mons".to_string())
        );
    }
}
