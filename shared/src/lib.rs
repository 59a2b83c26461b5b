//! Shadow Net 共享核心库
//!
//! 与浏览器无关的纯 Rust 部分，前端和测试共同依赖：
//! - 领域模型（用户、商品、会话）
//! - API 协议与 HTTP 抽象层
//! - 会话存储生命周期
//! - 表单校验、目录过滤/分页、金额格式化
//! - 各业务流程逻辑（注册登录、支付、商品创建）

use serde::{Deserialize, Serialize};

pub mod account;
pub mod api;
pub mod catalog;
pub mod config;
pub mod date;
pub mod error;
pub mod format;
pub mod guard;
pub mod http;
pub mod payment;
pub mod product;
pub mod protocol;
mod serde_helper;
pub mod session;
pub mod submit;
pub mod validation;

pub use date::Timestamp;
pub use error::{ApiError, ValidationError};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const STORAGE_KEY_USER: &str = "user";
pub const STORAGE_KEY_TOKEN: &str = "token";
pub const STORAGE_KEY_EXPIRY: &str = "expiry";

/// 未提供图片时使用的占位图
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/150";

/// 兼容旧流程的管理员凭据（仅在 `RolePolicy::Credentials` 下生效）
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 用户角色
///
/// 服务端可能返回任意字符串，未识别的值原样保留在 `Other` 中。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Role {
    Admin,
    #[default]
    User,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Other(s) => s,
        }
    }
}

impl From<Option<String>> for Role {
    fn from(value: Option<String>) -> Self {
        match value.as_deref().map(str::trim) {
            None | Some("") => Role::User,
            Some(s) if s.eq_ignore_ascii_case("admin") => Role::Admin,
            Some(s) if s.eq_ignore_ascii_case("user") => Role::User,
            Some(s) => Role::Other(s.to_string()),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 服务端返回的用户记录
///
/// 除 `username` / `role` 外的字段保存在 `extra` 中，持久化时原样写回。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default, deserialize_with = "serde_helper::nullable_string")]
    pub username: String,
    #[serde(default)]
    pub role: Role,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserRecord {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
            extra: serde_json::Map::new(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// 商品
///
/// 后端字段类型并不稳定（数字/字符串混用），解码时统一做宽松处理。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "serde_helper::string_or_number")]
    pub product_id: String,
    #[serde(default, deserialize_with = "serde_helper::nullable_string")]
    pub product_name: String,
    #[serde(default, deserialize_with = "serde_helper::nullable_string")]
    pub product_desc: String,
    #[serde(default, deserialize_with = "serde_helper::lenient_f64")]
    pub product_cost: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "serde_helper::lenient_bool")]
    pub is_free: bool,
    #[serde(default)]
    pub expiration_date: Option<String>,
}

impl Product {
    /// 展示用图片地址，缺失时回退到占位图
    pub fn display_image(&self) -> &str {
        match self.image_url.as_deref() {
            Some(url) if !url.trim().is_empty() => url,
            _ => PLACEHOLDER_IMAGE_URL,
        }
    }

    /// 免费商品的过期时间
    pub fn expires_at(&self) -> Option<Timestamp> {
        self.expiration_date.as_deref().and_then(Timestamp::parse)
    }
}

/// 注册 / 登录接口的响应体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default, deserialize_with = "serde_helper::optional_text")]
    pub success: Option<String>,
    #[serde(default)]
    pub user: Option<UserRecord>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub expiry: Option<String>,
}

/// 支付接口的响应体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentResponse {
    #[serde(default, deserialize_with = "serde_helper::lenient_bool")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// 通用的服务端消息体，用于从错误响应中提取 `message`
#[derive(Debug, Deserialize)]
pub(crate) struct ServerMessage {
    #[serde(default)]
    pub message: Option<String>,
}
