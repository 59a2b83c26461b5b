//! Shadow Net 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 会话状态管理
//! - `api`: 远程接口上下文
//! - `components`: UI 组件层

mod api;
mod auth;
mod config;
mod components {
    pub mod add_product;
    pub mod catalog;
    pub mod dashboard;
    pub mod icons;
    mod payment;
    pub mod sign_in;
    pub mod sign_up;
    mod status_alert;
}

// 原生 Web API 封装模块
pub(crate) mod web;

use crate::api::ApiContext;
use crate::auth::{SessionContext, use_session};
use crate::components::add_product::AddProductPage;
use crate::components::catalog::CatalogPage;
use crate::components::dashboard::DashboardPage;
use crate::components::icons::Bolt;
use crate::components::sign_in::SignInPage;
use crate::components::sign_up::SignUpPage;

use leptos::prelude::*;
use shadownet_shared::config::AppConfig;
use shadownet_shared::guard::RouteAccess;

use web::route::AppRoute;
use web::router::{Link, Router, RouterOutlet};

/// 读取构建时注入的运行配置
pub fn load_config() -> AppConfig {
    config::load()
}

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::SignUp => view! { <SignUpPage /> }.into_any(),
        AppRoute::SignIn => view! { <SignInPage /> }.into_any(),
        AppRoute::Catalog => view! { <CatalogPage /> }.into_any(),
        AppRoute::AddProduct => view! { <AddProductPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Unauthorized => view! { <UnauthorizedPage /> }.into_any(),
    }
}

#[component]
fn UnauthorizedPage() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-[60vh]">
            <div class="text-center space-y-4">
                <h1 class="text-5xl font-bold text-error">"403"</h1>
                <p class="text-xl">"You are not authorized to view this page."</p>
                <Link to=AppRoute::Catalog class="btn btn-primary">"Back to products"</Link>
            </div>
        </div>
    }
}

/// 顶部标题栏
#[component]
fn Header() -> impl IntoView {
    let session = use_session();
    let signed_in = session.is_authenticated_signal();

    view! {
        <header class="navbar bg-base-100 shadow-sm px-4">
            <div class="flex-1 gap-2">
                <Bolt attr:class="h-6 w-6 text-primary" />
                <h1 class="text-xl font-bold">"Shadow Net - It's all about speed"</h1>
            </div>
            <Show when=move || signed_in.get()>
                <Link to=AppRoute::Dashboard class="btn btn-ghost btn-sm">"Dashboard"</Link>
            </Show>
        </header>
    }
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    // 1. 远程接口上下文
    provide_context(ApiContext::new(config));

    // 2. 从 localStorage 恢复会话
    let session = SessionContext::restore();
    provide_context(session);

    // 3. 守卫回调和认证信号注入路由服务，路由层不直接依赖会话实现
    let guard = Callback::new(move |access: RouteAccess| session.check(&access));
    let is_authenticated = session.is_authenticated_signal();

    view! {
        <div class="min-h-screen bg-base-200">
            <Router guard=guard is_authenticated=is_authenticated>
                <Header />
                <main>
                    <RouterOutlet matcher=route_matcher />
                </main>
            </Router>
        </div>
    }
}
