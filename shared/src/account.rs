//! 注册 / 登录流程
//!
//! 校验表单 -> 调用远端接口 -> 生成会话 -> 决定落地页。
//! 会话的持久化由调用方（前端的会话上下文）完成。

use crate::api::StorefrontApi;
use crate::config::RolePolicy;
use crate::error::{ApiError, ValidationError};
use crate::http::HttpClient;
use crate::session::Session;
use crate::validation::{SignInForm, SignUpForm};
use crate::{ADMIN_PASSWORD, ADMIN_USERNAME, AuthResponse, Role, Timestamp, UserRecord};
use std::time::Duration;
use thiserror::Error;

pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";
pub const INVALID_CREDENTIALS: &str = "Invalid username or password.";

/// 登录后的落地页
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    /// 管理员：商品创建页
    ProductCreation,
    /// 普通用户：商品目录
    Catalog,
}

/// 成功登录/注册的结果
#[derive(Debug, Clone, PartialEq)]
pub struct SignedIn {
    pub session: Session,
    pub landing: Landing,
    /// 服务端返回的成功提示（注册接口的 `success` 字段）
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccountError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AccountError {
    /// 展示给用户的文案
    pub fn user_message(&self) -> String {
        match self {
            AccountError::Invalid(e) => e.to_string(),
            AccountError::Api(e) => e.user_message(GENERIC_FAILURE),
        }
    }
}

/// 决定落地页，`Credentials` 策略下命中管理员凭据时同时把角色提升为 admin
pub fn resolve_landing(
    policy: RolePolicy,
    username: &str,
    password: &str,
    user: &mut UserRecord,
) -> Landing {
    let is_admin = match policy {
        RolePolicy::Credentials => {
            let matched = username == ADMIN_USERNAME && password == ADMIN_PASSWORD;
            if matched {
                user.role = Role::Admin;
            }
            matched
        }
        RolePolicy::Server => user.is_admin(),
    };

    if is_admin {
        Landing::ProductCreation
    } else {
        Landing::Catalog
    }
}

/// 账户流程控制器
pub struct AccountLogic<'a, C: HttpClient> {
    api: &'a StorefrontApi<C>,
    policy: RolePolicy,
    session_ttl: Duration,
}

impl<'a, C: HttpClient> AccountLogic<'a, C> {
    pub fn new(api: &'a StorefrontApi<C>, policy: RolePolicy, session_ttl: Duration) -> Self {
        Self {
            api,
            policy,
            session_ttl,
        }
    }

    pub async fn sign_up(&self, form: &SignUpForm, now: Timestamp) -> Result<SignedIn, AccountError> {
        let req = form.validate()?;
        let resp = self.api.sign_up(&req).await?;

        let notice = resp.success.clone();
        let Some(signed_in) = self.establish(resp.clone(), &req.username, &req.password, now) else {
            log::warn!("sign-up response carried no user record");
            return Err(ApiError::Rejected {
                message: resp.message,
            }
            .into());
        };

        log::info!("sign-up succeeded, landing on {:?}", signed_in.landing);
        Ok(SignedIn { notice, ..signed_in })
    }

    pub async fn sign_in(&self, form: &SignInForm, now: Timestamp) -> Result<SignedIn, AccountError> {
        let req = form.validate()?;
        let resp = self.api.sign_in(&req).await?;

        let message = resp.message.clone();
        match self.establish(resp, &req.username, &req.password, now) {
            Some(signed_in) => {
                log::info!("sign-in succeeded, landing on {:?}", signed_in.landing);
                Ok(signed_in)
            }
            None => {
                log::info!("sign-in rejected by server");
                Err(ApiError::Rejected {
                    message: Some(message.unwrap_or_else(|| INVALID_CREDENTIALS.to_string())),
                }
                .into())
            }
        }
    }

    /// 从响应构造会话；服务端未提供 token/expiry 时在本地生成
    fn establish(
        &self,
        resp: AuthResponse,
        username: &str,
        password: &str,
        now: Timestamp,
    ) -> Option<SignedIn> {
        let mut user = resp.user?;
        let landing = resolve_landing(self.policy, username, password, &mut user);

        let token = resp
            .token
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| format!("local-{}", uuid::Uuid::new_v4()));

        let expiry = resp
            .expiry
            .as_deref()
            .and_then(Timestamp::parse)
            .filter(|ts| *ts > now)
            .unwrap_or(now + self.session_ttl);

        Some(SignedIn {
            session: Session {
                user,
                token,
                expiry,
            },
            landing,
            notice: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{MockHttpClient, RequestBody};
    use crate::session::{MemoryStore, SessionStore};
    use serde_json::json;

    const BASE: &str = "https://shop.test";
    const SIGNIN_URL: &str = "https://shop.test/api/signin";
    const SIGNUP_URL: &str = "https://shop.test/api/signup";
    const NOW: Timestamp = Timestamp::new(1_700_000_000_000);
    const TTL: Duration = Duration::from_secs(3600);

    fn sign_in_form(username: &str, password: &str) -> SignInForm {
        SignInForm {
            username: username.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn test_admin_credentials_land_on_product_creation() {
        let client = MockHttpClient::new();
        client.mock_response(
            SIGNIN_URL,
            200,
            json!({ "user": { "username": "admin", "role": "admin" } }),
        );
        let api = StorefrontApi::new(BASE, client);
        let logic = AccountLogic::new(&api, RolePolicy::Credentials, TTL);

        let signed_in = logic
            .sign_in(&sign_in_form("admin", "admin123"), NOW)
            .await
            .unwrap();

        assert_eq!(signed_in.landing, Landing::ProductCreation);
        assert!(signed_in.session.user.is_admin());
        assert!(signed_in.session.token.starts_with("local-"));
        assert_eq!(signed_in.session.expiry, NOW + TTL);

        let RequestBody::Multipart(form) = api.client().last_request().unwrap().body else {
            panic!("sign-in must be multipart");
        };
        assert_eq!(form.text_value("username"), Some("admin"));
    }

    #[tokio::test]
    async fn test_other_credentials_land_on_catalog() {
        let client = MockHttpClient::new();
        client.mock_response(
            SIGNIN_URL,
            200,
            json!({ "user": { "username": "admin", "role": "admin" } }),
        );
        let api = StorefrontApi::new(BASE, client);
        let logic = AccountLogic::new(&api, RolePolicy::Credentials, TTL);

        let signed_in = logic
            .sign_in(&sign_in_form("admin", "hunter2"), NOW)
            .await
            .unwrap();
        assert_eq!(signed_in.landing, Landing::Catalog);
    }

    #[tokio::test]
    async fn test_server_policy_trusts_only_server_role() {
        let client = MockHttpClient::new();
        client.mock_response(
            SIGNIN_URL,
            200,
            json!({ "user": { "username": "admin", "role": "user" }, "token": "srv", "expiry": "2099-01-01T00:00:00Z" }),
        );
        let api = StorefrontApi::new(BASE, client);
        let logic = AccountLogic::new(&api, RolePolicy::Server, TTL);

        let signed_in = logic
            .sign_in(&sign_in_form("admin", "admin123"), NOW)
            .await
            .unwrap();

        assert_eq!(signed_in.landing, Landing::Catalog);
        assert!(!signed_in.session.user.is_admin());
        assert_eq!(signed_in.session.token, "srv");
        assert_eq!(
            signed_in.session.expiry,
            Timestamp::parse("2099-01-01T00:00:00Z").unwrap()
        );
    }

    #[tokio::test]
    async fn test_sign_in_without_user_surfaces_message() {
        let client = MockHttpClient::new();
        client.mock_response(SIGNIN_URL, 200, json!({ "message": "Account locked" }));
        let api = StorefrontApi::new(BASE, client);
        let logic = AccountLogic::new(&api, RolePolicy::Credentials, TTL);

        let err = logic
            .sign_in(&sign_in_form("jane", "secret"), NOW)
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Account locked");

        let client = MockHttpClient::new();
        client.mock_response(SIGNIN_URL, 200, json!({}));
        let api = StorefrontApi::new(BASE, client);
        let logic = AccountLogic::new(&api, RolePolicy::Credentials, TTL);
        let err = logic
            .sign_in(&sign_in_form("jane", "secret"), NOW)
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_transport_failure_is_generic() {
        let client = MockHttpClient::new();
        client.mock_error(SIGNIN_URL, ApiError::Transport("offline".into()));
        let api = StorefrontApi::new(BASE, client);
        let logic = AccountLogic::new(&api, RolePolicy::Credentials, TTL);

        let err = logic
            .sign_in(&sign_in_form("jane", "secret"), NOW)
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }

    #[tokio::test]
    async fn test_invalid_form_makes_no_request() {
        let api = StorefrontApi::new(BASE, MockHttpClient::new());
        let logic = AccountLogic::new(&api, RolePolicy::Credentials, TTL);

        let form = SignUpForm {
            username: "jane".into(),
            email: "jane@example.com".into(),
            phone: "0712345678".into(),
            password: "secret".into(),
            confirm_password: "secrets".into(),
        };
        let err = logic.sign_up(&form, NOW).await.unwrap_err();

        assert_eq!(err, AccountError::Invalid(ValidationError::PasswordMismatch));
        assert_eq!(api.client().request_count(), 0);
    }

    #[tokio::test]
    async fn test_sign_up_session_survives_restore() {
        let client = MockHttpClient::new();
        client.mock_response(
            SIGNUP_URL,
            200,
            json!({ "success": "Account created", "user": { "username": "jane" } }),
        );
        let api = StorefrontApi::new(BASE, client);
        let logic = AccountLogic::new(&api, RolePolicy::Credentials, TTL);

        let form = SignUpForm {
            username: "jane".into(),
            email: "jane@example.com".into(),
            phone: "0712345678".into(),
            password: "secret".into(),
            confirm_password: "secret".into(),
        };
        let signed_in = logic.sign_up(&form, NOW).await.unwrap();
        assert_eq!(signed_in.notice.as_deref(), Some("Account created"));
        assert_eq!(signed_in.landing, Landing::Catalog);

        let store = SessionStore::new(MemoryStore::new());
        let session = &signed_in.session;
        assert!(store.login(&session.user, &session.token, session.expiry));
        let restored = store.restore(NOW + Duration::from_secs(60)).unwrap();
        assert_eq!(restored.username, "jane");
    }
}
