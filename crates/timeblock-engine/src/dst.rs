//! DST resolution policies for wall-clock to UTC conversion.

use chrono::{DateTime, Duration, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Policy for wall-clock times that fall in a DST gap or overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DstPolicy {
    /// Take the earlier instant of an ambiguous time; shift gap times forward.
    #[default]
    Earliest,
    /// Take the later instant of an ambiguous time; shift gap times forward.
    Latest,
    /// Reject both ambiguous and nonexistent wall-clock times.
    Strict,
}

impl DstPolicy {
    /// Resolve a wall-clock time in `tz` to a UTC instant.
    ///
    /// A time inside a spring-forward gap is read with the offset in force
    /// just before the gap, which moves it forward by the gap length
    /// (02:30 on a US spring-forward day becomes 03:30 local).
    pub fn resolve(self, tz: &Tz, local: NaiveDateTime) -> Result<DateTime<Utc>> {
        let resolved = match tz.from_local_datetime(&local) {
            chrono::LocalResult::Single(dt) => dt,
            chrono::LocalResult::Ambiguous(early, late) => match self {
                DstPolicy::Earliest => early,
                DstPolicy::Latest => late,
                DstPolicy::Strict => {
                    return Err(LayoutError::InvalidTime(format!(
                        "{} is ambiguous in {}",
                        local, tz
                    )));
                }
            },
            chrono::LocalResult::None => {
                if self == DstPolicy::Strict {
                    return Err(LayoutError::InvalidTime(format!(
                        "{} does not exist in {}",
                        local, tz
                    )));
                }
                tracing::debug!(%local, %tz, "wall-clock time falls in a DST gap, shifting forward");
                let before_gap = tz
                    .offset_from_utc_datetime(&(local - Duration::days(1)))
                    .fix();
                let utc = local - Duration::seconds(i64::from(before_gap.local_minus_utc()));
                return Ok(utc.and_utc());
            }
        };
        Ok(resolved.with_timezone(&Utc))
    }
}
