//! M-Pesa 支付触发
//!
//! 本地手机号校验 -> 转换为国际格式 -> 生成交易流水号 -> 带令牌调用支付接口。
//! 所有结果对本次尝试都是终态，不做重试。

use crate::api::StorefrontApi;
use crate::error::{ApiError, ValidationError};
use crate::http::HttpClient;
use crate::protocol::PaymentRequest;
use crate::Timestamp;
use thiserror::Error;

/// 本地号码的中继前缀
pub const TRUNK_PREFIX: &str = "07";
/// 肯尼亚国家代码
pub const COUNTRY_CODE: &str = "254";

pub const PAYMENT_FAILED: &str = "Payment failed. Please try again.";
pub const PAYMENT_ERROR: &str = "An error occurred. Please try again.";
pub const PAYMENT_INITIATED: &str =
    "Payment initiated successfully. Please check your phone to complete the transaction.";

/// 通过校验的本地手机号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// 解析本地格式号码：恰好 10 位数字且以 `07` 开头
    pub fn parse_local(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        let valid = input.len() == 10
            && input.starts_with(TRUNK_PREFIX)
            && input.chars().all(|c| c.is_ascii_digit());
        if valid {
            Ok(Self(input.to_string()))
        } else {
            Err(ValidationError::InvalidPaymentPhone)
        }
    }

    /// 去掉首位 0，加上国家代码：`0712345678` -> `254712345678`
    pub fn to_international(&self) -> String {
        format!("{}{}", COUNTRY_CODE, &self.0[1..])
    }
}

/// 基于时间的交易流水号
pub fn transaction_reference(now: Timestamp) -> String {
    format!("REF-{}", now.as_millis())
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaymentError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// 接口返回 `success: false`
    #[error("payment declined")]
    Declined { message: Option<String> },
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl PaymentError {
    pub fn user_message(&self) -> String {
        match self {
            PaymentError::Invalid(e) => e.to_string(),
            PaymentError::Declined { message } => message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(PAYMENT_FAILED)
                .to_string(),
            PaymentError::Api(_) => PAYMENT_ERROR.to_string(),
        }
    }
}

/// 支付流程控制器
pub struct PaymentLogic<'a, C: HttpClient> {
    api: &'a StorefrontApi<C>,
    /// 备用支付网关，None 时使用默认接口
    endpoint: Option<&'a str>,
}

impl<'a, C: HttpClient> PaymentLogic<'a, C> {
    pub fn new(api: &'a StorefrontApi<C>, endpoint: Option<&'a str>) -> Self {
        Self { api, endpoint }
    }

    /// 发起支付，成功返回提交的交易流水号
    pub async fn pay(
        &self,
        phone_input: &str,
        amount: f64,
        token: Option<&str>,
        now: Timestamp,
    ) -> Result<String, PaymentError> {
        let phone = PhoneNumber::parse_local(phone_input)?;

        let req = PaymentRequest {
            phone_number: phone.to_international(),
            amount,
            transaction_reference: transaction_reference(now),
        };

        let resp = match self.api.initiate_payment(&req, token, self.endpoint).await {
            Ok(resp) => resp,
            // 2xx 但响应体不是预期的 JSON：没有 success 字段，按拒绝处理
            Err(ApiError::Decode(e)) => {
                log::warn!("payment {} reply undecodable: {}", req.transaction_reference, e);
                return Err(PaymentError::Declined { message: None });
            }
            Err(e) => {
                log::warn!("payment request failed: {}", e);
                return Err(e.into());
            }
        };

        if resp.success {
            log::info!("payment {} initiated", req.transaction_reference);
            Ok(req.transaction_reference)
        } else {
            log::info!("payment {} declined", req.transaction_reference);
            Err(PaymentError::Declined {
                message: resp.message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{MockHttpClient, RequestBody};
    use serde_json::json;

    const BASE: &str = "https://shop.test";
    const PAY_URL: &str = "https://shop.test/api/mpesa_payment";
    const NOW: Timestamp = Timestamp::new(1_700_000_000_123);

    #[test]
    fn test_phone_rules() {
        let phone = PhoneNumber::parse_local("0712345678").unwrap();
        assert_eq!(phone.to_international(), "254712345678");

        for bad in ["12345", "0812345678", "071234567", "07123456789", "07123x5678", ""] {
            assert_eq!(
                PhoneNumber::parse_local(bad),
                Err(ValidationError::InvalidPaymentPhone),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_reference_is_time_based() {
        assert_eq!(transaction_reference(NOW), "REF-1700000000123");
    }

    #[tokio::test]
    async fn test_successful_payment_request_shape() {
        let client = MockHttpClient::new();
        client.mock_response(PAY_URL, 200, json!({ "success": true }));
        let api = StorefrontApi::new(BASE, client);
        let logic = PaymentLogic::new(&api, None);

        let reference = logic.pay("0712345678", 1500.0, Some("tok"), NOW).await.unwrap();
        assert_eq!(reference, "REF-1700000000123");

        let sent = api.client().last_request().unwrap();
        assert_eq!(sent.header("Authorization"), Some("Bearer tok"));
        let RequestBody::Json(body) = sent.body else {
            panic!("payment body must be JSON");
        };
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["phoneNumber"], "254712345678");
        assert_eq!(body["amount"], 1500.0);
    }

    #[tokio::test]
    async fn test_invalid_phone_aborts_without_request() {
        let api = StorefrontApi::new(BASE, MockHttpClient::new());
        let logic = PaymentLogic::new(&api, None);

        let err = logic.pay("12345", 10.0, Some("tok"), NOW).await.unwrap_err();
        assert_eq!(
            err.user_message(),
            "Please enter a valid 10-digit phone number starting with 07."
        );
        assert_eq!(api.client().request_count(), 0);
    }

    #[tokio::test]
    async fn test_declined_and_failed_messages() {
        let client = MockHttpClient::new();
        client.mock_response(
            PAY_URL,
            200,
            json!({ "success": false, "message": "Insufficient funds" }),
        );
        let api = StorefrontApi::new(BASE, client);
        let err = PaymentLogic::new(&api, None)
            .pay("0712345678", 10.0, None, NOW)
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Insufficient funds");

        let client = MockHttpClient::new();
        client.mock_response(PAY_URL, 200, json!({ "success": false }));
        let api = StorefrontApi::new(BASE, client);
        let err = PaymentLogic::new(&api, None)
            .pay("0712345678", 10.0, None, NOW)
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), PAYMENT_FAILED);

        let client = MockHttpClient::new();
        client.mock_response(PAY_URL, 500, json!({ "message": "gateway down" }));
        let api = StorefrontApi::new(BASE, client);
        let err = PaymentLogic::new(&api, None)
            .pay("0712345678", 10.0, None, NOW)
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), PAYMENT_ERROR);
    }

    #[tokio::test]
    async fn test_non_json_reply_counts_as_declined() {
        let client = MockHttpClient::new();
        client.mock_text(PAY_URL, 200, "Accepted");
        let api = StorefrontApi::new(BASE, client);

        let err = PaymentLogic::new(&api, None)
            .pay("0712345678", 10.0, None, NOW)
            .await
            .unwrap_err();
        assert_eq!(err, PaymentError::Declined { message: None });
        assert_eq!(err.user_message(), PAYMENT_FAILED);
    }

    #[tokio::test]
    async fn test_alternative_gateway() {
        let client = MockHttpClient::new();
        client.mock_response("https://pay.test/payment", 200, json!({ "success": "true" }));
        let api = StorefrontApi::new(BASE, client);
        let logic = PaymentLogic::new(&api, Some("https://pay.test/payment"));

        assert!(logic.pay("0712345678", 10.0, None, NOW).await.is_ok());
    }
}
