/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 logtee contributors
 */

use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, NaiveDate, Timelike};

/// Calendar interval that decides which physical file an event lands in.
/// Buckets are computed in local time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RollInterval {
    Day,
    Hour,
}

impl RollInterval {
    /// Monotonic bucket ordinal for `t`. Two instants share a file iff
    /// their ordinals are equal.
    pub(crate) fn bucket(&self, t: &DateTime<Local>) -> i64 {
        let days = i64::from(t.num_days_from_ce());
        match self {
            RollInterval::Day => days,
            RollInterval::Hour => days * 24 + i64::from(t.hour()),
        }
    }

    /// The bucket id as encoded into rotated file names.
    pub(crate) fn suffix(&self, t: &DateTime<Local>) -> String {
        let items = match self {
            RollInterval::Day => logtee_datetime::format::bucket::DAY,
            RollInterval::Hour => logtee_datetime::format::bucket::HOUR,
        };
        t.format_with_items(items.iter()).to_string()
    }

    /// Check that `s` is a well-formed bucket suffix for this interval.
    /// Suffixes are zero padded, so lexicographic order on valid suffixes
    /// is chronological order.
    pub(crate) fn is_valid_suffix(&self, s: &str) -> bool {
        match self {
            RollInterval::Day => NaiveDate::from_str(s).is_ok(),
            RollInterval::Hour => {
                let Some((date, hour)) = s.rsplit_once('-') else {
                    return false;
                };
                if NaiveDate::from_str(date).is_err() {
                    return false;
                }
                matches!(u32::from_str(hour), Ok(h) if hour.len() == 2 && h < 24)
            }
        }
    }
}

impl FromStr for RollInterval {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" | "daily" => Ok(RollInterval::Day),
            "hour" | "hourly" => Ok(RollInterval::Hour),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, mo, d, h, 30, 0).unwrap()
    }

    #[test]
    fn day_bucket_changes_at_midnight() {
        let i = RollInterval::Day;
        assert_eq!(i.bucket(&at(2026, 3, 1, 0)), i.bucket(&at(2026, 3, 1, 23)));
        assert_ne!(i.bucket(&at(2026, 3, 1, 23)), i.bucket(&at(2026, 3, 2, 0)));
    }

    #[test]
    fn hour_bucket_changes_on_the_hour() {
        let i = RollInterval::Hour;
        assert_eq!(i.bucket(&at(2026, 3, 1, 8)), i.bucket(&at(2026, 3, 1, 8)));
        assert_ne!(i.bucket(&at(2026, 3, 1, 8)), i.bucket(&at(2026, 3, 1, 9)));
        assert_ne!(i.bucket(&at(2026, 3, 1, 23)), i.bucket(&at(2026, 3, 2, 23)));
    }

    #[test]
    fn suffix_round_trip() {
        let t = at(2026, 3, 1, 8);
        assert_eq!(RollInterval::Day.suffix(&t), "2026-03-01");
        assert_eq!(RollInterval::Hour.suffix(&t), "2026-03-01-08");
        assert!(RollInterval::Day.is_valid_suffix("2026-03-01"));
        assert!(RollInterval::Hour.is_valid_suffix("2026-03-01-08"));
    }

    #[test]
    fn suffix_validation_rejects_noise() {
        assert!(!RollInterval::Day.is_valid_suffix("2026-13-01"));
        assert!(!RollInterval::Day.is_valid_suffix("backup"));
        assert!(!RollInterval::Hour.is_valid_suffix("2026-03-01"));
        assert!(!RollInterval::Hour.is_valid_suffix("2026-03-01-24"));
        assert!(!RollInterval::Hour.is_valid_suffix("2026-03-01-8"));
    }

    #[test]
    fn parse_names() {
        assert_eq!(RollInterval::from_str("day").unwrap(), RollInterval::Day);
        assert_eq!(RollInterval::from_str("Hourly").unwrap(), RollInterval::Hour);
        assert!(RollInterval::from_str("weekly").is_err());
    }
}
