//! 运行时配置
//!
//! 通过注入的查找函数读取配置项，读不到或无法解析时使用默认值。
//! 前端在编译期用 `option_env!` 提供这些值。

use crate::format::Currency;
use std::time::Duration;

// 默认值
const DEFAULT_API_URL: &str = "https://alvins.pythonanywhere.com";
const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;
/// 超出该值的有效期按非法值处理
const MAX_SESSION_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;
const DEFAULT_REDIRECT_DELAY_MS: u32 = 2000;
const DEFAULT_LOG_LEVEL: &str = "info";

// 配置键
pub const KEY_API_URL: &str = "STOREFRONT_API_URL";
pub const KEY_PAYMENT_URL: &str = "STOREFRONT_PAYMENT_URL";
pub const KEY_CURRENCY: &str = "STOREFRONT_CURRENCY";
pub const KEY_SESSION_TTL_SECS: &str = "STOREFRONT_SESSION_TTL_SECS";
pub const KEY_ROLE_POLICY: &str = "STOREFRONT_ROLE_POLICY";
pub const KEY_REDIRECT_DELAY_MS: &str = "STOREFRONT_REDIRECT_DELAY_MS";
pub const KEY_LOG_LEVEL: &str = "STOREFRONT_LOG_LEVEL";

/// 管理员身份的判定方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RolePolicy {
    /// 沿用旧流程：提交的用户名/密码等于固定的管理员凭据即视为管理员
    #[default]
    Credentials,
    /// 只信任服务端返回的 `user.role`
    Server,
}

impl RolePolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "credentials" | "literal" => Some(Self::Credentials),
            "server" => Some(Self::Server),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// 后端 API 根地址（不含末尾斜杠）
    pub api_base_url: String,
    /// 备用支付网关地址，None 时使用 `/api/mpesa_payment`
    pub payment_url: Option<String>,
    pub currency: Currency,
    /// 服务端未下发过期时间时，本地会话的有效期
    pub session_ttl: Duration,
    pub role_policy: RolePolicy,
    /// 商品创建成功后跳转前的等待时间
    pub redirect_delay_ms: u32,
    pub log_level: log::Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            api_base_url: var(KEY_API_URL)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),

            payment_url: var(KEY_PAYMENT_URL),

            currency: var(KEY_CURRENCY)
                .map(|c| Currency::from_code(&c))
                .unwrap_or_default(),

            session_ttl: Duration::from_secs(
                var(KEY_SESSION_TTL_SECS)
                    .and_then(|v| v.parse().ok())
                    .filter(|secs| (1..=MAX_SESSION_TTL_SECS).contains(secs))
                    .unwrap_or(DEFAULT_SESSION_TTL_SECS),
            ),

            role_policy: var(KEY_ROLE_POLICY)
                .and_then(|v| RolePolicy::parse(&v))
                .unwrap_or_default(),

            redirect_delay_ms: var(KEY_REDIRECT_DELAY_MS)
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_REDIRECT_DELAY_MS),

            log_level: var(KEY_LOG_LEVEL)
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.parse().unwrap_or(log::Level::Info)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.payment_url, None);
        assert_eq!(config.currency, Currency::kes());
        assert_eq!(config.session_ttl, Duration::from_secs(86_400));
        assert_eq!(config.role_policy, RolePolicy::Credentials);
        assert_eq!(config.redirect_delay_ms, 2000);
        assert_eq!(config.log_level, log::Level::Info);
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (KEY_API_URL, "http://localhost:5000/"),
            (KEY_PAYMENT_URL, "  "),
            (KEY_CURRENCY, "usd"),
            (KEY_SESSION_TTL_SECS, "0"),
            (KEY_ROLE_POLICY, "Server"),
            (KEY_REDIRECT_DELAY_MS, "soon"),
            (KEY_LOG_LEVEL, "debug"),
        ]);
        let config = AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert_eq!(config.payment_url, None);
        assert_eq!(config.currency.symbol, "$");
        assert_eq!(config.session_ttl, Duration::from_secs(86_400));
        assert_eq!(config.role_policy, RolePolicy::Server);
        assert_eq!(config.redirect_delay_ms, 2000);
        assert_eq!(config.log_level, log::Level::Debug);
    }

    #[test]
    fn test_oversized_session_ttl_falls_back() {
        let config = AppConfig::from_lookup(|k| {
            (k == KEY_SESSION_TTL_SECS).then(|| u64::MAX.to_string())
        });
        assert_eq!(config.session_ttl, Duration::from_secs(DEFAULT_SESSION_TTL_SECS));
    }
}
