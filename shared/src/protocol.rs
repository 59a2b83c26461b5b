use crate::error::ApiError;
use crate::http::{HttpMethod, MultipartForm, RequestBody};
use crate::product::ImageUpload;
use crate::{AuthResponse, PaymentResponse, Product, Timestamp};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path (or suffix).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// Encodes the request body.
    fn body(&self) -> Result<RequestBody, ApiError>;
}

// =========================================================
// Request Definitions
// =========================================================

/// Create an account
#[derive(Debug, Clone, PartialEq)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl ApiRequest for SignUpRequest {
    type Response = AuthResponse;
    const PATH: &'static str = "/api/signup";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn body(&self) -> Result<RequestBody, ApiError> {
        Ok(RequestBody::Multipart(
            MultipartForm::new()
                .text("username", &self.username)
                .text("email", &self.email)
                .text("phone", &self.phone)
                .text("password", &self.password),
        ))
    }
}

/// Sign in with username and password
#[derive(Debug, Clone, PartialEq)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

impl ApiRequest for SignInRequest {
    type Response = AuthResponse;
    const PATH: &'static str = "/api/signin";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn body(&self) -> Result<RequestBody, ApiError> {
        Ok(RequestBody::Multipart(
            MultipartForm::new()
                .text("username", &self.username)
                .text("password", &self.password),
        ))
    }
}

/// List all products (no server-side filtering or paging)
#[derive(Debug, Clone, Copy, Default)]
pub struct ListProductsRequest;

impl ApiRequest for ListProductsRequest {
    type Response = Vec<Product>;
    const PATH: &'static str = "/api/getproducts";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn body(&self) -> Result<RequestBody, ApiError> {
        Ok(RequestBody::Empty)
    }
}

/// Create a product. Any 2xx counts as success; the ack body is never decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProductRequest {
    pub product_name: String,
    pub product_desc: String,
    /// Decimal text as typed by the admin, `"0"` for free products.
    pub product_cost: String,
    pub photo: ImageUpload,
    pub is_free: bool,
    pub expiration_date: Option<Timestamp>,
}

impl ApiRequest for CreateProductRequest {
    type Response = serde_json::Value;
    const PATH: &'static str = "/api/addproduct";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn body(&self) -> Result<RequestBody, ApiError> {
        // The legacy backend expects the literal string "null" for paid products.
        let expiration = self
            .expiration_date
            .map(|ts| ts.to_rfc3339())
            .unwrap_or_else(|| "null".to_string());

        Ok(RequestBody::Multipart(
            MultipartForm::new()
                .text("product_name", &self.product_name)
                .text("product_desc", &self.product_desc)
                .text("product_cost", &self.product_cost)
                .file(
                    "product_photo",
                    &self.photo.file_name,
                    &self.photo.content_type,
                    self.photo.bytes.clone(),
                )
                .text("is_free", self.is_free.to_string())
                .text("expiration_date", expiration),
        ))
    }
}

/// Initiate an M-Pesa STK push
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub phone_number: String,
    pub amount: f64,
    pub transaction_reference: String,
}

impl ApiRequest for PaymentRequest {
    type Response = PaymentResponse;
    const PATH: &'static str = "/api/mpesa_payment";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn body(&self) -> Result<RequestBody, ApiError> {
        let json = serde_json::to_string(self).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(RequestBody::Json(json))
    }
}
