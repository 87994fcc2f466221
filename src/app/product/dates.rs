//! 发布日期校验与修订日期推导

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone};

/// ISO 日历日期格式
pub const ISO_DATE: &str = "%Y-%m-%d";

/// 发布日期校验错误码
pub const RELEASE_DATE_INVALID: &str = "releaseDateInvalid";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("无效的日期")]
pub struct InvalidDate;

/// 本地时区的今天（时间部分归零）
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// 解析日历日期，接受 `YYYY-MM-DD` 或 RFC 3339 时间戳（换算到本地时区后取日期）
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    parse_calendar_date_in(value, &Local)
}

/// 同 [`parse_calendar_date`]，时间戳换算到 `tz` 中的日期
pub fn parse_calendar_date_in<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, ISO_DATE).ok().or_else(|| {
        DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|dt| dt.with_timezone(tz).date_naive())
    })
}

pub fn format_iso(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

/// 以给定的“今天”校验发布日期。
///
/// 空值视为通过（必填由表单规则负责）；无法解析或早于今天的日期返回 [`InvalidDate`]。
pub fn validate_release_date_at(value: Option<&str>, today: NaiveDate) -> Result<(), InvalidDate> {
    let value = match value.map(str::trim) {
        None | Some("") => return Ok(()),
        Some(value) => value,
    };

    match parse_calendar_date(value) {
        Some(date) if date >= today => Ok(()),
        _ => Err(InvalidDate),
    }
}

pub fn validate_release_date(value: Option<&str>) -> Result<(), InvalidDate> {
    validate_release_date_at(value, today())
}

/// 修订日期 = 发布日期 + 1 年，月日不变。
///
/// 2 月 29 日顺延到次年 3 月 1 日；超出日期范围时返回 `None`。
pub fn revision_date_for(release: NaiveDate) -> Option<NaiveDate> {
    let year = release.year().checked_add(1)?;
    release
        .with_year(year)
        .or_else(|| release.succ_opt().and_then(|next| next.with_year(year)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_and_missing_values_pass() {
        let today = date(2026, 10, 19);
        assert!(validate_release_date_at(None, today).is_ok());
        assert!(validate_release_date_at(Some(""), today).is_ok());
        assert!(validate_release_date_at(Some("   "), today).is_ok());
    }

    #[test]
    fn past_dates_fail_today_and_future_pass() {
        let today = date(2026, 10, 19);
        assert_eq!(
            validate_release_date_at(Some("2026-10-18"), today),
            Err(InvalidDate)
        );
        assert!(validate_release_date_at(Some("2026-10-19"), today).is_ok());
        assert!(validate_release_date_at(Some("2027-01-01"), today).is_ok());
    }

    #[test]
    fn time_of_day_is_ignored() {
        let today = date(2026, 10, 19);
        assert!(validate_release_date_at(Some("2026-10-19T12:00:00+00:00"), today).is_ok());
        assert!(validate_release_date_at(Some("2026-10-17T12:00:00+00:00"), today).is_err());
    }

    #[test]
    fn timestamps_use_the_date_of_the_target_zone() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let lima = FixedOffset::west_opt(5 * 3600).unwrap();

        let late_utc = "2026-10-18T22:30:00Z";
        assert_eq!(parse_calendar_date_in(late_utc, &utc), Some(date(2026, 10, 18)));
        assert_eq!(parse_calendar_date_in(late_utc, &tokyo), Some(date(2026, 10, 19)));

        let early_tokyo = "2026-10-19T03:00:00+09:00";
        assert_eq!(parse_calendar_date_in(early_tokyo, &lima), Some(date(2026, 10, 18)));

        assert_eq!(parse_calendar_date_in("2026-10-19", &lima), Some(date(2026, 10, 19)));
    }

    #[test]
    fn unparsable_input_fails() {
        let today = date(2026, 10, 19);
        assert!(validate_release_date_at(Some("not-a-date"), today).is_err());
        assert!(validate_release_date_at(Some("2026-13-40"), today).is_err());
    }

    #[test]
    fn validator_uses_local_today() {
        let yesterday = format_iso(today() - Duration::days(1));
        let tomorrow = format_iso(today() + Duration::days(1));
        assert!(validate_release_date(Some(&yesterday)).is_err());
        assert!(validate_release_date(Some(&format_iso(today()))).is_ok());
        assert!(validate_release_date(Some(&tomorrow)).is_ok());
    }

    #[test]
    fn revision_keeps_month_and_day() {
        assert_eq!(revision_date_for(date(2030, 6, 15)), Some(date(2031, 6, 15)));
        assert_eq!(revision_date_for(date(2030, 12, 31)), Some(date(2031, 12, 31)));
    }

    #[test]
    fn leap_day_rolls_to_march_first() {
        assert_eq!(revision_date_for(date(2028, 2, 29)), Some(date(2029, 3, 1)));
    }

    #[test]
    fn revision_formats_as_iso() {
        let revision = revision_date_for(date(2030, 1, 5)).unwrap();
        assert_eq!(format_iso(revision), "2031-01-05");
    }
}
