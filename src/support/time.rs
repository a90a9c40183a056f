use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

/// Display format shared by the console and the audit log
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Whole minutes elapsed from `from` to `to`, truncated toward zero.
/// Negative when the clock went backwards.
pub fn minutes_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_minutes()
}

pub fn format_timestamp<Tz: TimeZone>(ts: DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    ts.format(DISPLAY_FORMAT).to_string()
}

/// Render a stored UTC instant as local wall-clock time for operators
pub fn format_local(ts: DateTime<Utc>) -> String {
    format_timestamp(ts.with_timezone(&Local))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};

    #[test]
    fn minutes_between_truncates() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        assert_eq!(minutes_between(start, start + Duration::seconds(119)), 1);
        assert_eq!(minutes_between(start, start - Duration::minutes(3)), -3);
    }

    #[test]
    fn timestamp_format() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_timestamp(ts), "2024-01-02 03:04:05");
    }

    #[test]
    fn timestamp_is_rendered_in_the_given_zone() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        assert_eq!(format_timestamp(ts.with_timezone(&ist)), "2024-01-02 08:34:05");
    }

    #[test]
    fn local_rendering_uses_system_zone() {
        let ts = Utc.with_ymd_and_hms(2024, 7, 15, 23, 30, 0).unwrap();
        let expected = ts.with_timezone(&Local).naive_local().to_string();
        assert_eq!(format_local(ts), expected);
    }
}
