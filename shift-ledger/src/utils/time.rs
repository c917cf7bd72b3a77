//! 时间工具函数 — 账本时区转换
//!
//! Shift 只存 `i64` Unix millis；按天、周、年归属的判断
//! 一律在配置的时区下完成，不用 UTC。

use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, NaiveTime, Weekday};
use chrono_tz::Tz;
use shared::error::{AppError, AppResult, ErrorCode};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::with_message(ErrorCode::InvalidFormat, format!("Invalid date format: {}", date))
            .with_detail("value", date)
    })
}

/// 日期 + 时刻 → Unix millis (账本时区)
///
/// 夏令时跳跃：不存在的本地时间向后顺延一小时 (02:30 → 03:30)，
/// 结果仍落在同一本地日期。重叠时段取较早的时刻。
pub fn date_time_to_millis(date: NaiveDate, time: NaiveTime, tz: Tz) -> i64 {
    let naive = date.and_time(time);
    naive
        .and_local_timezone(tz)
        .earliest()
        .or_else(|| (naive + Duration::hours(1)).and_local_timezone(tz).earliest())
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// 时间戳在账本时区下的日历日期
pub fn local_date(millis: i64, tz: Tz) -> NaiveDate {
    DateTime::from_timestamp_millis(millis)
        .unwrap_or_default()
        .with_timezone(&tz)
        .date_naive()
}

/// 时间戳在账本时区下的年份
pub fn local_year(millis: i64, tz: Tz) -> i32 {
    local_date(millis, tz).year()
}

/// `date` 所在周的第一天，周从 `week_start` 开始
pub fn week_start_for(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = (date.weekday().num_days_from_monday() + 7
        - week_start.num_days_from_monday())
        % 7;
    date - Days::new(u64::from(offset))
}
