//! 路由守卫
//!
//! 纯函数：输入路由的访问要求和当前会话，输出渲染或重定向的决定。

use crate::session::{KeyValueStore, SessionStore};
use crate::{Role, Timestamp, UserRecord};

/// 路由的访问要求
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    /// 任何人可访问
    Public,
    /// 需要登录
    Authenticated,
    /// 需要登录且角色匹配
    Role(Role),
}

/// 守卫决定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Render,
    RedirectToSignIn,
    RedirectToUnauthorized,
}

/// 根据当前用户判断能否访问
pub fn decide(access: &RouteAccess, user: Option<&UserRecord>) -> GuardOutcome {
    match (access, user) {
        (RouteAccess::Public, _) => GuardOutcome::Render,
        (_, None) => GuardOutcome::RedirectToSignIn,
        (RouteAccess::Role(required), Some(user)) if &user.role != required => {
            GuardOutcome::RedirectToUnauthorized
        }
        _ => GuardOutcome::Render,
    }
}

/// 重新校验存储中的会话后再做判断
///
/// 受保护路由每次挂载都会走这里，过期会话被强制清除。
pub fn check<S: KeyValueStore>(
    access: &RouteAccess,
    store: &SessionStore<S>,
    now: Timestamp,
) -> GuardOutcome {
    if *access == RouteAccess::Public {
        return GuardOutcome::Render;
    }
    let session = store.validate(now);
    decide(access, session.as_ref().map(|s| &s.user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryStore;

    const NOW: Timestamp = Timestamp::new(1_700_000_000_000);

    #[test]
    fn test_decide_rules() {
        let admin = UserRecord::new("root", Role::Admin);
        let user = UserRecord::new("jane", Role::User);
        let admin_only = RouteAccess::Role(Role::Admin);

        assert_eq!(decide(&RouteAccess::Public, None), GuardOutcome::Render);
        assert_eq!(
            decide(&RouteAccess::Authenticated, None),
            GuardOutcome::RedirectToSignIn
        );
        assert_eq!(
            decide(&RouteAccess::Authenticated, Some(&user)),
            GuardOutcome::Render
        );
        assert_eq!(
            decide(&admin_only, Some(&user)),
            GuardOutcome::RedirectToUnauthorized
        );
        assert_eq!(decide(&admin_only, Some(&admin)), GuardOutcome::Render);
        assert_eq!(decide(&admin_only, None), GuardOutcome::RedirectToSignIn);
    }

    #[test]
    fn test_expired_session_redirects_even_with_user() {
        let store = SessionStore::new(MemoryStore::new());
        store.login(
            &UserRecord::new("jane", Role::User),
            "tok",
            Timestamp::new(NOW.as_millis() - 1),
        );

        assert_eq!(
            check(&RouteAccess::Authenticated, &store, NOW),
            GuardOutcome::RedirectToSignIn
        );
        // 守卫顺带清理了过期状态
        assert!(store.load().is_none());
    }

    #[test]
    fn test_public_route_leaves_stored_session_untouched() {
        let store = SessionStore::new(MemoryStore::new());
        store.login(
            &UserRecord::new("jane", Role::User),
            "tok",
            Timestamp::new(NOW.as_millis() - 1),
        );

        assert_eq!(check(&RouteAccess::Public, &store, NOW), GuardOutcome::Render);
        assert!(store.load().is_some());

        // 进入受保护路由时才清理，之后读取到的用户为空
        check(&RouteAccess::Authenticated, &store, NOW);
        assert_eq!(store.load().map(|s| s.user), None);
    }

    #[test]
    fn test_valid_session_renders() {
        let store = SessionStore::new(MemoryStore::new());
        store.login(
            &UserRecord::new("root", Role::Admin),
            "tok",
            Timestamp::new(NOW.as_millis() + 1),
        );

        assert_eq!(
            check(&RouteAccess::Role(Role::Admin), &store, NOW),
            GuardOutcome::Render
        );
    }
}
