//! 商品创建表单
//!
//! 校验管理员填写的商品信息并组装 multipart 请求。

use crate::Timestamp;
use crate::account::GENERIC_FAILURE;
use crate::api::StorefrontApi;
use crate::error::{ApiError, ValidationError};
use crate::http::HttpClient;
use crate::protocol::CreateProductRequest;
use chrono::NaiveDate;
use thiserror::Error;

pub const PRODUCT_ADDED: &str = "Product added successfully!";

/// 已读入内存的图片文件
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// 只接受 `image/*`
pub fn check_image_type(content_type: &str) -> Result<(), ValidationError> {
    if content_type.trim().to_ascii_lowercase().starts_with("image/") {
        Ok(())
    } else {
        Err(ValidationError::InvalidImage)
    }
}

/// 表单草稿，字段保持用户输入的原样
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: Option<ImageUpload>,
    pub is_free: bool,
    pub expiration_date: Option<NaiveDate>,
}

impl ProductDraft {
    /// 校验并转换为请求；`today` 用于判断过期日期是否已过
    pub fn validate(&self, today: NaiveDate) -> Result<CreateProductRequest, ValidationError> {
        let Some(image) = self.image.as_ref() else {
            return Err(ValidationError::MissingFields);
        };
        if self.name.is_empty() || self.description.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        check_image_type(&image.content_type)?;

        let product_cost = if self.is_free {
            "0".to_string()
        } else {
            let price = self.price.trim();
            match price.parse::<f64>() {
                Ok(v) if v.is_finite() && v > 0.0 => price.to_string(),
                _ => return Err(ValidationError::InvalidPrice),
            }
        };

        let expiration_date = if self.is_free {
            let date = self.expiration_date.ok_or(ValidationError::MissingExpiration)?;
            if date < today {
                return Err(ValidationError::ExpirationInPast);
            }
            Some(Timestamp::from_date(date))
        } else {
            None
        };

        Ok(CreateProductRequest {
            product_name: self.name.clone(),
            product_desc: self.description.clone(),
            product_cost,
            photo: image.clone(),
            is_free: self.is_free,
            expiration_date,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProductError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ProductError {
    /// 服务端错误不做字段映射，统一显示通用文案
    pub fn user_message(&self) -> String {
        match self {
            ProductError::Invalid(e) => e.to_string(),
            ProductError::Api(_) => GENERIC_FAILURE.to_string(),
        }
    }
}

/// 商品创建流程控制器
pub struct ProductLogic<'a, C: HttpClient> {
    api: &'a StorefrontApi<C>,
}

impl<'a, C: HttpClient> ProductLogic<'a, C> {
    pub fn new(api: &'a StorefrontApi<C>) -> Self {
        Self { api }
    }

    pub async fn create(&self, draft: &ProductDraft, today: NaiveDate) -> Result<(), ProductError> {
        let req = draft.validate(today)?;
        self.api
            .add_product(&req)
            .await
            .inspect_err(|e| log::warn!("product creation failed: {}", e))?;
        log::info!("product created (free: {})", req.is_free);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{MockHttpClient, RequestBody};
    use serde_json::json;

    const BASE: &str = "https://shop.test";
    const ADD_URL: &str = "https://shop.test/api/addproduct";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn image() -> ImageUpload {
        ImageUpload {
            file_name: "shoe.jpg".into(),
            content_type: "image/jpeg".into(),
            bytes: vec![0xff, 0xd8],
        }
    }

    fn paid_draft() -> ProductDraft {
        ProductDraft {
            name: "Sneakers".into(),
            description: "Running shoes".into(),
            price: "2500".into(),
            image: Some(image()),
            is_free: false,
            expiration_date: None,
        }
    }

    #[test]
    fn test_paid_product_validation() {
        let req = paid_draft().validate(today()).unwrap();
        assert_eq!(req.product_cost, "2500");
        assert_eq!(req.expiration_date, None);

        for bad in ["", "abc", "0", "-3"] {
            let mut draft = paid_draft();
            draft.price = bad.into();
            assert_eq!(draft.validate(today()), Err(ValidationError::InvalidPrice), "{bad}");
        }
    }

    #[test]
    fn test_required_fields_and_image_type() {
        let mut draft = paid_draft();
        draft.image = None;
        assert_eq!(draft.validate(today()), Err(ValidationError::MissingFields));

        let mut draft = paid_draft();
        draft.name.clear();
        assert_eq!(draft.validate(today()), Err(ValidationError::MissingFields));

        let mut draft = paid_draft();
        draft.image = Some(ImageUpload {
            content_type: "application/pdf".into(),
            ..image()
        });
        assert_eq!(draft.validate(today()), Err(ValidationError::InvalidImage));
    }

    #[test]
    fn test_free_product_expiration_rules() {
        let mut draft = paid_draft();
        draft.is_free = true;
        draft.price = "not used".into();
        assert_eq!(draft.validate(today()), Err(ValidationError::MissingExpiration));

        draft.expiration_date = NaiveDate::from_ymd_opt(2025, 5, 31);
        assert_eq!(draft.validate(today()), Err(ValidationError::ExpirationInPast));

        draft.expiration_date = Some(today());
        let req = draft.validate(today()).unwrap();
        assert_eq!(req.product_cost, "0");
        assert_eq!(
            req.expiration_date.map(|t| t.to_rfc3339()).as_deref(),
            Some("2025-06-01T00:00:00.000Z")
        );
    }

    #[tokio::test]
    async fn test_free_without_expiration_makes_no_request() {
        let api = StorefrontApi::new(BASE, MockHttpClient::new());
        let mut draft = paid_draft();
        draft.is_free = true;

        let err = ProductLogic::new(&api).create(&draft, today()).await.unwrap_err();
        assert_eq!(err, ProductError::Invalid(ValidationError::MissingExpiration));
        assert_eq!(api.client().request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_posts_multipart() {
        let client = MockHttpClient::new();
        client.mock_response(ADD_URL, 200, json!({ "message": "ok" }));
        let api = StorefrontApi::new(BASE, client);

        ProductLogic::new(&api).create(&paid_draft(), today()).await.unwrap();

        let RequestBody::Multipart(form) = api.client().last_request().unwrap().body else {
            panic!("product body must be multipart");
        };
        assert_eq!(form.text_value("product_name"), Some("Sneakers"));
        assert_eq!(form.text_value("product_cost"), Some("2500"));
    }

    #[tokio::test]
    async fn test_plain_text_ack_is_success() {
        let client = MockHttpClient::new();
        client.mock_text(ADD_URL, 200, "Product added successfully");
        let api = StorefrontApi::new(BASE, client);

        assert_eq!(
            ProductLogic::new(&api).create(&paid_draft(), today()).await,
            Ok(())
        );
        assert_eq!(api.client().request_count(), 1);
    }

    #[tokio::test]
    async fn test_server_error_is_generic() {
        let client = MockHttpClient::new();
        client.mock_response(ADD_URL, 400, json!({ "message": "bad photo" }));
        let api = StorefrontApi::new(BASE, client);

        let err = ProductLogic::new(&api)
            .create(&paid_draft(), today())
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }
}
