//! 编译期配置
//!
//! 构建时通过环境变量注入（例如 `STOREFRONT_API_URL=... trunk build`），
//! 未设置的项使用 `AppConfig` 的默认值。

use shadownet_shared::config::{
    AppConfig, KEY_API_URL, KEY_CURRENCY, KEY_LOG_LEVEL, KEY_PAYMENT_URL, KEY_REDIRECT_DELAY_MS,
    KEY_ROLE_POLICY, KEY_SESSION_TTL_SECS,
};

fn build_env(key: &str) -> Option<&'static str> {
    match key {
        KEY_API_URL => option_env!("STOREFRONT_API_URL"),
        KEY_PAYMENT_URL => option_env!("STOREFRONT_PAYMENT_URL"),
        KEY_CURRENCY => option_env!("STOREFRONT_CURRENCY"),
        KEY_SESSION_TTL_SECS => option_env!("STOREFRONT_SESSION_TTL_SECS"),
        KEY_ROLE_POLICY => option_env!("STOREFRONT_ROLE_POLICY"),
        KEY_REDIRECT_DELAY_MS => option_env!("STOREFRONT_REDIRECT_DELAY_MS"),
        KEY_LOG_LEVEL => option_env!("STOREFRONT_LOG_LEVEL"),
        _ => None,
    }
}

pub fn load() -> AppConfig {
    AppConfig::from_lookup(|key| build_env(key).map(str::to_string))
}
