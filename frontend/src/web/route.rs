//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其访问要求。

use shadownet_shared::Role;
use shadownet_shared::account::Landing;
use shadownet_shared::guard::RouteAccess;
use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 注册页面 (默认路由)
    #[default]
    SignUp,
    SignIn,
    /// 商品目录 (需要认证)
    Catalog,
    /// 商品创建 (仅管理员)
    AddProduct,
    /// 控制面板 (需要认证)
    Dashboard,
    Unauthorized,
}

impl AppRoute {
    const ALL: [AppRoute; 6] = [
        Self::SignUp,
        Self::SignIn,
        Self::Catalog,
        Self::AddProduct,
        Self::Dashboard,
        Self::Unauthorized,
    ];

    /// 将 URL path 解析为路由枚举
    ///
    /// 匹配不区分大小写，忽略末尾斜杠；`/` 和未知路径返回 None，由路由器重定向到注册页。
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        Self::ALL
            .into_iter()
            .find(|route| route.to_path().eq_ignore_ascii_case(path))
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::SignUp => "/SignUp",
            Self::SignIn => "/SignIn",
            Self::Catalog => "/GetProducts",
            Self::AddProduct => "/AddProduct",
            Self::Dashboard => "/dashboard",
            Self::Unauthorized => "/unauthorized",
        }
    }

    /// **核心守卫逻辑：定义该路由的访问要求**
    pub fn access(&self) -> RouteAccess {
        match self {
            Self::SignUp | Self::SignIn | Self::Unauthorized => RouteAccess::Public,
            Self::Catalog | Self::Dashboard => RouteAccess::Authenticated,
            Self::AddProduct => RouteAccess::Role(Role::Admin),
        }
    }

    /// 未登录时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::SignIn
    }

    /// 角色不符时的重定向目标
    pub fn forbidden_redirect() -> Self {
        Self::Unauthorized
    }

    /// 无法识别的路径统一落到注册页
    pub fn fallback() -> Self {
        Self::SignUp
    }
}

impl From<Landing> for AppRoute {
    fn from(landing: Landing) -> Self {
        match landing {
            Landing::ProductCreation => Self::AddProduct,
            Landing::Catalog => Self::Catalog,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_round_trip() {
        for route in AppRoute::ALL {
            assert_eq!(AppRoute::from_path(route.to_path()), Some(route));
        }
    }

    #[test]
    fn test_matching_is_lenient() {
        assert_eq!(AppRoute::from_path("/signin"), Some(AppRoute::SignIn));
        assert_eq!(AppRoute::from_path("/GetProducts/"), Some(AppRoute::Catalog));
        assert_eq!(AppRoute::from_path("/"), None);
        assert_eq!(AppRoute::from_path(""), None);
        assert_eq!(AppRoute::from_path("/nope"), None);
    }

    #[test]
    fn test_access_requirements() {
        assert_eq!(AppRoute::SignUp.access(), RouteAccess::Public);
        assert_eq!(AppRoute::Catalog.access(), RouteAccess::Authenticated);
        assert_eq!(AppRoute::AddProduct.access(), RouteAccess::Role(Role::Admin));
    }

    #[test]
    fn test_landing_routes() {
        assert_eq!(AppRoute::from(Landing::ProductCreation), AppRoute::AddProduct);
        assert_eq!(AppRoute::from(Landing::Catalog), AppRoute::Catalog);
    }
}
