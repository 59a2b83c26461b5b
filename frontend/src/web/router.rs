//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程。

use leptos::prelude::*;
use shadownet_shared::guard::{GuardOutcome, RouteAccess};
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 写入 History 状态（push 或 replace）
fn write_history_state(path: &str, use_push: bool) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let result = if use_push {
        history.push_state_with_url(&JsValue::NULL, "", Some(path))
    } else {
        history.replace_state_with_url(&JsValue::NULL, "", Some(path))
    };
    if let Err(e) = result {
        log::warn!("[Router] history update failed: {:?}", e);
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入守卫回调和认证信号实现与会话系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 路由守卫（注入的回调，每次导航都会重新校验会话）
    guard: Callback<RouteAccess, GuardOutcome>,
    /// 认证状态（注入的信号，用于登出后的自动重定向）
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(guard: Callback<RouteAccess, GuardOutcome>, is_authenticated: Signal<bool>) -> Self {
        let (current_route, set_route) = signal(AppRoute::fallback());
        Self {
            current_route,
            set_route,
            guard,
            is_authenticated,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 导航到指定路由
    pub fn navigate_to(&self, route: AppRoute) {
        self.navigate_to_route(route, true);
    }

    fn navigate_path(&self, path: &str, use_push: bool) {
        match AppRoute::from_path(path) {
            Some(route) => self.navigate_to_route(route, use_push),
            None => {
                log::debug!("[Router] Unknown path {}, redirecting to sign-up.", path);
                self.navigate_to_route(AppRoute::fallback(), false);
            }
        }
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        // --- Step 1: 验证目标路由 ---
        let resolved = match self.guard.run(target_route.access()) {
            GuardOutcome::Render => target_route,
            GuardOutcome::RedirectToSignIn => {
                log::debug!("[Router] Access to {} denied. Redirecting to sign-in.", target_route);
                AppRoute::auth_failure_redirect()
            }
            GuardOutcome::RedirectToUnauthorized => {
                log::debug!("[Router] Role mismatch for {}. Redirecting.", target_route);
                AppRoute::forbidden_redirect()
            }
        };

        // --- Step 2: 加载页面 (更新状态) ---
        write_history_state(resolved.to_path(), use_push);
        self.set_route.set(resolved);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;

        // popstate 时也执行守卫逻辑，重定向使用 replace 以免污染历史
        let closure = Closure::<dyn Fn()>::new(move || {
            router.navigate_path(&current_path(), false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置认证状态变化时的自动重定向
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        // 使用 Effect 监听认证状态变化
        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let route = current_route.get_untracked();

            // 用户登出，如果在受保护页面则重定向到登录
            if !is_auth && route.access() != RouteAccess::Public {
                let redirect = AppRoute::auth_failure_redirect();
                write_history_state(redirect.to_path(), true);
                set_route.set(redirect);
                log::info!("[Router] Session ended, redirecting to sign-in.");
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(
    guard: Callback<RouteAccess, GuardOutcome>,
    is_authenticated: Signal<bool>,
) -> RouterService {
    let router = RouterService::new(guard, is_authenticated);

    // 初始路由同样经过守卫
    router.navigate_path(&current_path(), false);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 路由守卫
    guard: Callback<RouteAccess, GuardOutcome>,
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    // 提供路由服务到 Context
    provide_router(guard, is_authenticated);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接，点击时走路由服务而不是整页刷新
#[component]
pub fn Link(
    /// 目标路由
    to: AppRoute,
    #[prop(optional, into)] class: String,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate_to(to);
    };

    view! {
        <a href=to.to_path() class=class on:click=on_click>
            {children()}
        </a>
    }
}
