use chrono::NaiveDate;
use shadownet_shared::Timestamp;

/// 当前时间（浏览器时钟）
pub fn now() -> Timestamp {
    Timestamp::new(js_sys::Date::now() as i64)
}

/// 当前 UTC 日期
pub fn today() -> NaiveDate {
    now().date().unwrap_or_default()
}
