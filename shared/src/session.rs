//! 会话存储
//!
//! 会话由三个键共同组成：`user`、`token`、`expiry`。
//! 三者缺一、格式错误或已过期都视为未登录，并立即清空全部三个键。

use crate::{STORAGE_KEY_EXPIRY, STORAGE_KEY_TOKEN, STORAGE_KEY_USER, Timestamp, UserRecord};
use std::collections::HashMap;
use std::sync::Mutex;

/// 键值存储抽象
///
/// 浏览器端由 `localStorage` 实现；每次调用都是一次同步写入。
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str) -> bool;
}

/// 内存键值存储
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .lock()
            .map(|mut m| m.insert(key.to_string(), value.to_string()))
            .is_ok()
    }

    fn remove(&self, key: &str) -> bool {
        self.entries.lock().map(|mut m| m.remove(key)).is_ok()
    }
}

/// 完整的会话
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: UserRecord,
    pub token: String,
    pub expiry: Timestamp,
}

impl Session {
    pub fn is_valid_at(&self, now: Timestamp) -> bool {
        !self.token.is_empty() && self.expiry > now
    }
}

/// 会话存储服务
///
/// 显式持有底层存储，由调用方注入，生命周期为 restore -> login/logout -> validate。
#[derive(Debug, Clone, Default)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// 读取存储中的会话，不做过期判断
    ///
    /// 任意字段缺失或无法解析都返回 None。
    pub fn load(&self) -> Option<Session> {
        let user = self.storage.get(STORAGE_KEY_USER)?;
        let token = self.storage.get(STORAGE_KEY_TOKEN)?;
        let expiry = self.storage.get(STORAGE_KEY_EXPIRY)?;

        let user: UserRecord = serde_json::from_str(&user).ok()?;
        let expiry = Timestamp::parse(&expiry)?;

        Some(Session {
            user,
            token,
            expiry,
        })
    }

    /// 启动时恢复会话
    ///
    /// 有效则返回用户，否则清空残留状态。
    pub fn restore(&self, now: Timestamp) -> Option<UserRecord> {
        self.validate(now).map(|s| s.user)
    }

    /// 重新校验存储中的会话，无效时强制登出
    pub fn validate(&self, now: Timestamp) -> Option<Session> {
        match self.load() {
            Some(session) if session.is_valid_at(now) => Some(session),
            _ => {
                self.logout();
                None
            }
        }
    }

    /// 写入完整会话
    pub fn login(&self, user: &UserRecord, token: &str, expiry: Timestamp) -> bool {
        let user_json = match serde_json::to_string(user) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("failed to serialise user record: {}", e);
                return false;
            }
        };

        let stored = self.storage.set(STORAGE_KEY_USER, &user_json)
            && self.storage.set(STORAGE_KEY_TOKEN, token)
            && self.storage.set(STORAGE_KEY_EXPIRY, &expiry.to_rfc3339());

        if !stored {
            log::warn!("session storage rejected write, clearing partial session");
            self.logout();
        }
        stored
    }

    /// 清空全部会话字段
    pub fn logout(&self) {
        self.storage.remove(STORAGE_KEY_USER);
        self.storage.remove(STORAGE_KEY_TOKEN);
        self.storage.remove(STORAGE_KEY_EXPIRY);
    }

    /// 当前存储的令牌（不校验过期）
    pub fn token(&self) -> Option<String> {
        self.storage.get(STORAGE_KEY_TOKEN)
    }
}
