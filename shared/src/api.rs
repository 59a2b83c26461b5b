use crate::error::ApiError;
use crate::http::{HttpClient, HttpRequest, HttpResponse};
use crate::protocol::{
    ApiRequest, CreateProductRequest, ListProductsRequest, PaymentRequest, SignInRequest,
    SignUpRequest,
};
use crate::{AuthResponse, PaymentResponse, Product};

/// 远端商店 API 客户端
///
/// 只负责 HTTP 通信和响应分类，不含业务规则。
#[derive(Clone, Debug, PartialEq)]
pub struct StorefrontApi<C> {
    pub base_url: String,
    client: C,
}

impl<C: HttpClient> StorefrontApi<C> {
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 发送请求并检查状态码，不解析响应体
    async fn send_checked<T: ApiRequest>(
        &self,
        url: &str,
        req: &T,
        bearer: Option<&str>,
    ) -> Result<HttpResponse, ApiError> {
        let mut http = HttpRequest::new(url, T::METHOD).with_body(req.body()?);
        if let Some(token) = bearer {
            http = http.with_header("Authorization", &format!("Bearer {}", token));
        }

        let res = self.client.send(http).await?;

        if !res.ok() {
            log::warn!("{} {} -> {}", T::METHOD.as_str(), T::PATH, res.status);
            return Err(ApiError::Status {
                status: res.status,
                message: res.message(),
            });
        }
        Ok(res)
    }

    // 核心泛型方法
    async fn execute_at<T: ApiRequest>(
        &self,
        url: &str,
        req: &T,
        bearer: Option<&str>,
    ) -> Result<T::Response, ApiError> {
        let res = self.send_checked(url, req, bearer).await?;

        if res.body.trim().is_empty() {
            return Ok(serde_json::from_str("null")?);
        }
        res.json::<T::Response>()
    }

    async fn execute<T: ApiRequest>(&self, req: &T) -> Result<T::Response, ApiError> {
        let url = self.url(T::PATH);
        self.execute_at(&url, req, None).await
    }

    /// 注册
    pub async fn sign_up(&self, req: &SignUpRequest) -> Result<AuthResponse, ApiError> {
        self.execute(req).await
    }

    /// 登录
    pub async fn sign_in(&self, req: &SignInRequest) -> Result<AuthResponse, ApiError> {
        self.execute(req).await
    }

    /// 获取全部商品
    pub async fn get_products(&self) -> Result<Vec<Product>, ApiError> {
        self.execute(&ListProductsRequest).await
    }

    /// 添加商品
    ///
    /// 任何 2xx 都算成功，响应体可能是 JSON、纯文本或空。
    pub async fn add_product(&self, req: &CreateProductRequest) -> Result<(), ApiError> {
        let url = self.url(CreateProductRequest::PATH);
        self.send_checked(&url, req, None).await.map(|_ack| ())
    }

    /// 发起支付
    ///
    /// `endpoint` 为空时使用默认的 `/api/mpesa_payment`，否则可以是完整 URL 或路径。
    pub async fn initiate_payment(
        &self,
        req: &PaymentRequest,
        token: Option<&str>,
        endpoint: Option<&str>,
    ) -> Result<PaymentResponse, ApiError> {
        let url = self.url(endpoint.unwrap_or(PaymentRequest::PATH));
        self.execute_at(&url, req, token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, MockHttpClient, RequestBody};
    use serde_json::json;

    const BASE: &str = "https://shop.test";

    #[tokio::test]
    async fn test_get_products_decodes_list() {
        let client = MockHttpClient::new();
        client.mock_response(
            "https://shop.test/api/getproducts",
            200,
            json!([{ "product_id": 1, "product_name": "Phone", "product_desc": "Android", "product_cost": 9000 }]),
        );
        let api = StorefrontApi::new("https://shop.test/", client);

        let products = api.get_products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].product_name, "Phone");

        let req = api.client().last_request().unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.body, RequestBody::Empty);
    }

    #[tokio::test]
    async fn test_non_2xx_keeps_server_message() {
        let client = MockHttpClient::new();
        client.mock_response(
            "https://shop.test/api/signin",
            401,
            json!({ "message": "Invalid credentials" }),
        );
        let api = StorefrontApi::new(BASE, client);

        let err = api
            .sign_in(&SignInRequest {
                username: "a".into(),
                password: "b".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ApiError::Status {
                status: 401,
                message: Some("Invalid credentials".into())
            }
        );
    }

    #[tokio::test]
    async fn test_payment_sends_bearer_to_custom_endpoint() {
        let client = MockHttpClient::new();
        client.mock_response(
            "https://pay.test/payment",
            200,
            json!({ "success": true }),
        );
        let api = StorefrontApi::new(BASE, client);

        let req = PaymentRequest {
            phone_number: "254712345678".into(),
            amount: 10.0,
            transaction_reference: "REF-5".into(),
        };
        let res = api
            .initiate_payment(&req, Some("tok"), Some("https://pay.test/payment"))
            .await
            .unwrap();
        assert!(res.success);

        let sent = api.client().last_request().unwrap();
        assert_eq!(sent.header("authorization"), Some("Bearer tok"));
        assert_eq!(sent.header("Content-Type"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_any_2xx_ack_is_accepted() {
        let client = MockHttpClient::new();
        client.mock_text("https://shop.test/api/addproduct", 201, "");
        let api = StorefrontApi::new(BASE, client);

        let req = CreateProductRequest {
            product_name: "n".into(),
            product_desc: "d".into(),
            product_cost: "1".into(),
            photo: crate::product::ImageUpload {
                file_name: "a.png".into(),
                content_type: "image/png".into(),
                bytes: vec![],
            },
            is_free: false,
            expiration_date: None,
        };
        assert!(api.add_product(&req).await.is_ok());

        let client = MockHttpClient::new();
        client.mock_text("https://shop.test/api/addproduct", 200, "Product added");
        let api = StorefrontApi::new(BASE, client);
        assert!(api.add_product(&req).await.is_ok());

        let client = MockHttpClient::new();
        client.mock_text("https://shop.test/api/addproduct", 500, "<html>oops</html>");
        let api = StorefrontApi::new(BASE, client);
        assert_eq!(
            api.add_product(&req).await,
            Err(ApiError::Status {
                status: 500,
                message: None
            })
        );
    }
}
