//! 时间类型模块
//!
//! `Timestamp`: 可序列化的毫秒时间戳，用于会话过期判断、交易流水号和日期展示。
//! 当前时间由调用方注入（浏览器端取 `Date.now()`），便于在原生目标上测试。

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};
use std::time::Duration;

/// 毫秒时间戳
///
/// 内部存储为 `i64`，表示自 Unix 纪元以来的毫秒数
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// 创建新的时间戳
    #[inline]
    pub const fn new(ms: i64) -> Self {
        Self(ms)
    }

    /// 获取毫秒值
    #[inline]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_millis())
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }

    /// 从日期的零点（UTC）创建
    pub fn from_date(date: NaiveDate) -> Self {
        let dt = date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
        Self::from_datetime(dt)
    }

    /// 解析时间字符串
    ///
    /// 依次尝试 RFC 3339、无时区的 `YYYY-MM-DDTHH:MM:SS`（按 UTC）和纯日期 `YYYY-MM-DD`。
    /// 返回 None 如果解析失败
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self::from_datetime(dt.with_timezone(&Utc)));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(Self::from_datetime(naive.and_utc()));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .map(Self::from_date)
    }

    /// ISO 8601 字符串，毫秒精度，形如 `2025-01-01T00:00:00.000Z`
    pub fn to_rfc3339(&self) -> String {
        self.to_datetime()
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_default()
    }

    /// 所在日期（UTC）
    pub fn date(&self) -> Option<NaiveDate> {
        self.to_datetime().map(|dt| dt.date_naive())
    }

    /// 短日期展示，`dd/mm/yyyy`
    pub fn format_date(&self) -> String {
        self.date()
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_default()
    }
}

impl From<i64> for Timestamp {
    fn from(ms: i64) -> Self {
        Self(ms)
    }
}

impl From<Timestamp> for i64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl Add<Duration> for Timestamp {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        let ms = i64::try_from(rhs.as_millis()).unwrap_or(i64::MAX);
        Self(self.0.saturating_add(ms))
    }
}

impl Sub<Timestamp> for Timestamp {
    type Output = Duration;

    /// 计算两个时间戳之间的差值（返回 Duration）
    fn sub(self, rhs: Timestamp) -> Self::Output {
        let diff_ms = (self.0 - rhs.0).max(0);
        Duration::from_millis(diff_ms as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        let a = Timestamp::parse("2030-05-01T10:00:00Z").unwrap();
        let b = Timestamp::parse("2030-05-01T10:00:00").unwrap();
        let c = Timestamp::parse("2030-05-01").unwrap();
        assert_eq!(a, b);
        assert_eq!(a - c, Duration::from_secs(10 * 3600));
        assert!(Timestamp::parse("not a date").is_none());
    }

    #[test]
    fn test_iso_roundtrip_and_display() {
        let ts = Timestamp::parse("2030-05-01T10:00:00+03:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2030-05-01T07:00:00.000Z");
        assert_eq!(ts.format_date(), "01/05/2030");
        assert_eq!(Timestamp::parse(&ts.to_rfc3339()), Some(ts));
    }

    #[test]
    fn test_add_duration() {
        let ts = Timestamp::new(1_000) + Duration::from_secs(2);
        assert_eq!(ts.as_millis(), 3_000);
    }

    #[test]
    fn test_add_huge_duration_saturates() {
        let now = Timestamp::new(1_700_000_000_000);
        let later = now + Duration::from_secs(u64::MAX);
        assert_eq!(later, Timestamp::new(i64::MAX));
        assert!(later > now);
    }
}
