//! 错误类型
//!
//! - `ApiError`: 与远端 API 交互时的失败（传输、状态码、业务拒绝、解码、取消）
//! - `ValidationError`: 客户端表单校验失败，`Display` 即展示给用户的文案

use thiserror::Error;

// =========================================================
// API 错误
// =========================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// 网络层失败（无法连接、CORS、fetch 抛错）
    #[error("network error: {0}")]
    Transport(String),

    /// 非 2xx 响应，`message` 为响应体中的 `message` 字段（如果有）
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },

    /// 2xx 但业务上失败（如登录响应中没有 user）
    #[error("request rejected by server")]
    Rejected { message: Option<String> },

    /// 响应体无法解析
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// 请求所属视图已销毁
    #[error("request aborted")]
    Aborted,
}

impl ApiError {
    /// 服务端提供的结构化提示信息
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } | ApiError::Rejected { message } => message
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    /// 优先使用服务端消息，否则使用调用方给出的兜底文案
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

// =========================================================
// 表单校验错误
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("All fields are required.")]
    MissingFields,
    #[error("Username and password are required.")]
    MissingCredentials,
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("Password must be at least 6 characters long.")]
    PasswordTooShort,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please enter a valid 10-digit phone number.")]
    InvalidPhone,
    #[error("Please enter a valid 10-digit phone number starting with 07.")]
    InvalidPaymentPhone,
    #[error("Please upload a valid image file.")]
    InvalidImage,
    #[error("Price must be a valid number greater than 0.")]
    InvalidPrice,
    #[error("Please set an expiration date for free files.")]
    MissingExpiration,
    #[error("Expiration date cannot be in the past.")]
    ExpirationInPast,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = ApiError::Status {
            status: 400,
            message: Some("Username taken".into()),
        };
        assert_eq!(err.user_message("fallback"), "Username taken");

        let err = ApiError::Rejected {
            message: Some("   ".into()),
        };
        assert_eq!(err.user_message("fallback"), "fallback");

        let err = ApiError::Transport("offline".into());
        assert_eq!(err.server_message(), None);
        assert_eq!(err.user_message("fallback"), "fallback");
    }
}
