//! Dates as the portal expects them: `yyyy-mm-dd` in China Standard Time.

use crate::error::{ErrorKind, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y/%-m/%-d %H:%M:%S";
const SHANGHAI_OFFSET_SECS: i32 = 8 * 3600;

fn shanghai_now() -> DateTime<FixedOffset> {
    let tz = FixedOffset::east_opt(SHANGHAI_OFFSET_SECS).expect("+08:00 is a valid offset");
    Utc::now().with_timezone(&tz)
}

/// Today's date in Asia/Shanghai (UTC+8, no DST).
pub fn today() -> String {
    shanghai_now().format(DATE_FORMAT).to_string()
}

/// Local wall-clock time such as `2025/3/1 14:05:09`, stamped on images.
pub fn now_timestamp() -> String {
    shanghai_now().format(TIMESTAMP_FORMAT).to_string()
}

/// Checks a `yyyy-mm-dd` string and returns it normalized.
pub fn parse_date(s: &str) -> Result<String> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map(|d| d.format(DATE_FORMAT).to_string())
        .map_err(|e| ErrorKind::ValidationError(format!("invalid date {s:?}: {e}")).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn today_is_well_formed() {
        let d = today();
        assert_eq!(d.len(), 10);
        assert!(parse_date(&d).is_ok());
    }

    #[test]
    fn timestamp_has_date_and_time() {
        let ts = now_timestamp();
        let (day, time) = ts.split_once(' ').unwrap();
        assert_eq!(day.split('/').count(), 3);
        assert_eq!(time.len(), 8);
    }

    #[test]
    fn dates_are_validated() {
        assert_eq!(parse_date(" 2025-03-01 ").unwrap(), "2025-03-01");
        assert!(parse_date("2025-02-30").is_err());
        assert!(parse_date("03/01/2025").is_err());
    }
}
