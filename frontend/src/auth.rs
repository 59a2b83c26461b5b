//! 认证模块
//!
//! 管理会话状态，与路由系统解耦。
//! 持久化交给 `SessionStore<BrowserStorage>`，这里只维护一份响应式的当前用户，
//! 路由服务通过注入的守卫回调和认证信号来读取它。

use crate::web::{BrowserStorage, now};
use leptos::prelude::*;
use shadownet_shared::UserRecord;
use shadownet_shared::guard::{self, GuardOutcome, RouteAccess};
use shadownet_shared::session::{Session, SessionStore};

fn store() -> SessionStore<BrowserStorage> {
    SessionStore::new(BrowserStorage)
}

/// 会话上下文
///
/// 通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct SessionContext {
    user: RwSignal<Option<UserRecord>>,
}

impl SessionContext {
    /// 创建会话上下文并从 localStorage 恢复上次的会话
    ///
    /// 残缺或过期的会话会被清除。
    pub fn restore() -> Self {
        let user = store().restore(now());
        match &user {
            Some(_) => log::info!("session restored"),
            None => log::debug!("no stored session"),
        }
        Self {
            user: RwSignal::new(user),
        }
    }

    /// 当前用户（响应式）
    pub fn user(&self) -> Signal<Option<UserRecord>> {
        self.user.into()
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let user = self.user;
        Signal::derive(move || user.with(Option::is_some))
    }

    /// 登录并持久化会话
    ///
    /// 存储写入失败时返回 false，此时不会留下残缺的会话。
    pub fn login(&self, session: &Session) -> bool {
        let stored = store().login(&session.user, &session.token, session.expiry);
        if stored {
            self.user.set(Some(session.user.clone()));
        } else {
            self.user.set(None);
        }
        stored
    }

    /// 注销并清除状态
    ///
    /// 导航将由路由服务的认证状态监听自动处理。
    pub fn logout(&self) {
        store().logout();
        self.user.set(None);
        log::info!("signed out");
    }

    /// 重新校验存储中的会话，并同步到响应式状态
    pub fn revalidate(&self) -> Option<Session> {
        let session = store().validate(now());
        self.sync(session.as_ref().map(|s| &s.user));
        session
    }

    /// 路由守卫：每次导航都重新校验会话
    ///
    /// 校验后的存储状态同步回响应式信号，过期会话会让界面立即变为未登录。
    pub fn check(&self, access: &RouteAccess) -> GuardOutcome {
        let store = store();
        let outcome = guard::check(access, &store, now());
        if *access != RouteAccess::Public {
            self.sync(store.load().as_ref().map(|s| &s.user));
        }
        outcome
    }

    /// 当前令牌
    pub fn token(&self) -> Option<String> {
        store().token()
    }

    fn sync(&self, user: Option<&UserRecord>) {
        let changed = self.user.with_untracked(|current| current.as_ref() != user);
        if changed {
            self.user.set(user.cloned());
        }
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}
