//! 宽松的字段解码器
//!
//! 后端返回的 JSON 字段类型不固定（数字可能是字符串，布尔值可能是 0/1），
//! 这里统一转换成前端使用的类型。

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// null 视为空字符串
pub fn nullable_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

/// 数字或字符串统一为字符串
pub fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// 数字或数字字符串转为 f64，无法解析的字符串得到 NaN
pub fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        Value::Null => 0.0,
        _ => f64::NAN,
    })
}

/// 布尔、0/1 或 "true"/"1" 字符串
pub fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
        _ => false,
    })
}

/// 只保留字符串形式的提示文本
pub fn optional_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "lenient_f64")]
        cost: f64,
        #[serde(deserialize_with = "lenient_bool")]
        flag: bool,
    }

    #[test]
    fn test_lenient_values() {
        let p: Probe = serde_json::from_value(json!({ "cost": "abc", "flag": "TRUE" })).unwrap();
        assert!(p.cost.is_nan());
        assert!(p.flag);

        let p: Probe = serde_json::from_value(json!({ "cost": 12.5, "flag": 0 })).unwrap();
        assert_eq!(p.cost, 12.5);
        assert!(!p.flag);
    }
}
