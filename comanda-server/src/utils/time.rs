//! 时间工具函数 — 业务时区转换
//!
//! 所有日期→时间戳转换统一在 API handler 层完成，
//! repository 层只接收 `i64` Unix millis。

use chrono::NaiveDate;
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// 当前 Unix millis
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 日期 + 时分秒 → Unix millis (业务时区)
///
/// DST gap fallback: 如果本地时间不存在 (夏令时跳跃)，fallback 到 UTC。
pub fn date_hms_to_millis(date: NaiveDate, hour: u32, min: u32, sec: u32, tz: Tz) -> i64 {
    let naive = match date.and_hms_opt(hour, min, sec) {
        Some(n) => n,
        None => date.and_hms_opt(0, 0, 0).unwrap_or_default(),
    };
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// 日期开始 (00:00:00) → Unix millis (业务时区)
///
/// 订座日期统一归一化到当天零点，查询用精确匹配。
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    date_hms_to_millis(date, 0, 0, 0, tz)
}

/// 当前日期 (业务时区)
pub fn today(tz: Tz) -> NaiveDate {
    chrono::Utc::now().with_timezone(&tz).date_naive()
}
