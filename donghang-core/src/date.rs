//! Transaction-date resolution for the date-confirmation step.

use anyhow::Result;
use chrono::{Datelike, Days, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use regex::Regex;

/// Today's calendar date in an IANA timezone (profile default Asia/Seoul).
pub fn today_in(tz: &str) -> Result<NaiveDate> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
    Ok(Utc::now().with_timezone(&tz).date_naive())
}

/// Current hour of day (0–23) in an IANA timezone.
pub fn local_hour(tz: &str) -> Result<u32> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
    Ok(Utc::now().with_timezone(&tz).hour())
}

/// Resolve a date answer like "오늘", "어제" or "3월 5일" against `today`.
///
/// `None` means the answer wasn't a date; the caller re-prompts.
/// Explicit month/day answers resolve within the current year.
pub fn resolve_transaction_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let t = text.trim();

    if t.contains("그저께") || t.contains("그제") {
        return today.checked_sub_days(Days::new(2));
    }
    if t.contains("어제") {
        return today.checked_sub_days(Days::new(1));
    }
    if t.contains("오늘") || t.contains("지금") {
        return Some(today);
    }

    let re = Regex::new(r"(\d{1,2})\s*월\s*(\d{1,2})\s*일").ok()?;
    let caps = re.captures(t)?;
    let month: u32 = caps.get(1)?.as_str().parse().ok()?;
    let day: u32 = caps.get(2)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(today.year(), month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 7).unwrap()
    }

    #[test]
    fn test_relative_words() {
        assert_eq!(resolve_transaction_date("오늘", base()), Some(base()));
        assert_eq!(
            resolve_transaction_date("어제 쓴 거야", base()),
            NaiveDate::from_ymd_opt(2025, 8, 6)
        );
        assert_eq!(
            resolve_transaction_date("그저께", base()),
            NaiveDate::from_ymd_opt(2025, 8, 5)
        );
    }

    #[test]
    fn test_explicit_month_day() {
        assert_eq!(
            resolve_transaction_date("3월 5일", base()),
            NaiveDate::from_ymd_opt(2025, 3, 5)
        );
        assert_eq!(
            resolve_transaction_date("12월31일에 썼어", base()),
            NaiveDate::from_ymd_opt(2025, 12, 31)
        );
    }

    #[test]
    fn test_invalid_calendar_date_is_rejected() {
        assert_eq!(resolve_transaction_date("2월 30일", base()), None);
    }

    #[test]
    fn test_non_date_answers_are_none() {
        assert_eq!(resolve_transaction_date("글쎄요", base()), None);
        assert_eq!(resolve_transaction_date("", base()), None);
    }

    #[test]
    fn test_today_in_seoul() {
        // Asia/Seoul has no DST; this must always resolve.
        assert!(today_in("Asia/Seoul").is_ok());
        assert!(today_in("Not/AZone").is_err());
    }
}
