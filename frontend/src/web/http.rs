//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现共享库的 `HttpClient` trait。
//! multipart 请求体交给浏览器的 `FormData`，由浏览器生成边界和 Content-Type。

use super::abort::ViewScope;
use async_trait::async_trait;
use shadownet_shared::error::ApiError;
use shadownet_shared::http::{
    FormPart, HttpClient, HttpRequest, HttpResponse, MultipartForm, RequestBody,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Headers, Request, RequestInit, Response};

fn transport(context: &str, e: JsValue) -> ApiError {
    ApiError::Transport(format!("{}: {:?}", context, e))
}

/// 将 `MultipartForm` 转换为浏览器 `FormData`
fn to_form_data(form: &MultipartForm) -> Result<FormData, ApiError> {
    let data = FormData::new().map_err(|e| transport("创建 FormData 失败", e))?;

    for part in &form.parts {
        match part {
            FormPart::Text { name, value } => {
                data.append_with_str(name, value)
                    .map_err(|e| transport("写入表单字段失败", e))?;
            }
            FormPart::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                let chunks = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes.as_slice()));
                let options = BlobPropertyBag::new();
                options.set_type(content_type);
                let blob = Blob::new_with_u8_array_sequence_and_options(&chunks, &options)
                    .map_err(|e| transport("创建 Blob 失败", e))?;
                data.append_with_blob_and_filename(name, &blob, file_name)
                    .map_err(|e| transport("写入文件字段失败", e))?;
            }
        }
    }

    Ok(data)
}

/// 基于 fetch 的 HTTP 客户端
///
/// 绑定了 `ViewScope` 时，请求会随视图卸载而中止。
#[derive(Clone, Copy, Default)]
pub struct FetchClient {
    scope: Option<ViewScope>,
}

impl FetchClient {
    pub fn new(scope: Option<ViewScope>) -> Self {
        Self { scope }
    }

    fn aborted(&self) -> bool {
        self.scope.is_some_and(|s| !s.is_alive())
    }
}

#[async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        if self.aborted() {
            return Err(ApiError::Aborted);
        }

        let headers = Headers::new().map_err(|e| transport("创建 Headers 失败", e))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| transport("设置 Header 失败", e))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        match &req.body {
            RequestBody::Empty => {}
            RequestBody::Json(body) => opts.set_body(&JsValue::from_str(body)),
            RequestBody::Multipart(form) => opts.set_body(&to_form_data(form)?.into()),
        }

        if let Some(signal) = self.scope.and_then(|s| s.signal()) {
            opts.set_signal(Some(&signal));
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| transport("请求构建失败", e))?;

        let window = web_sys::window()
            .ok_or_else(|| ApiError::Transport("无法获取 window 对象".to_string()))?;

        let resp_value = match JsFuture::from(window.fetch_with_request(&request)).await {
            Ok(v) => v,
            Err(_) if self.aborted() => return Err(ApiError::Aborted),
            Err(e) => return Err(transport("网络错误", e)),
        };

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| ApiError::Decode(format!("Response 类型转换失败: {:?}", e)))?;
        let status = response.status();

        let promise = response
            .text()
            .map_err(|e| ApiError::Decode(format!("{:?}", e)))?;
        let body = match JsFuture::from(promise).await {
            Ok(text) => text.as_string().unwrap_or_default(),
            Err(_) if self.aborted() => return Err(ApiError::Aborted),
            Err(e) => return Err(ApiError::Decode(format!("{:?}", e))),
        };

        if self.aborted() {
            return Err(ApiError::Aborted);
        }

        log::debug!("{} {} -> {}", req.method.as_str(), req.url, status);
        Ok(HttpResponse { status, body })
    }
}
