use crate::web::{FetchClient, ViewScope};
use leptos::prelude::*;
use shadownet_shared::api::StorefrontApi;
use shadownet_shared::config::AppConfig;
use std::sync::Arc;

/// API 上下文
///
/// 持有运行时配置，按需为每个视图构造绑定了 `ViewScope` 的客户端。
#[derive(Clone)]
pub struct ApiContext {
    config: Arc<AppConfig>,
}

impl ApiContext {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 构造随视图卸载而中止的 API 客户端
    pub fn client(&self, scope: ViewScope) -> StorefrontApi<FetchClient> {
        StorefrontApi::new(
            self.config.api_base_url.clone(),
            FetchClient::new(Some(scope)),
        )
    }
}

pub fn use_api() -> ApiContext {
    use_context::<ApiContext>().expect("ApiContext should be provided")
}
