//! 视图作用域
//!
//! 把 `AbortController` 和存活标记绑定到组件的生命周期：
//! 组件卸载时中止所有未完成的 fetch，迟到的响应不会再写入已销毁的状态。

use leptos::prelude::*;
use web_sys::{AbortController, AbortSignal};

#[derive(Clone, Copy)]
pub struct ViewScope {
    controller: StoredValue<Option<AbortController>, LocalStorage>,
    alive: StoredValue<bool>,
}

impl ViewScope {
    fn new() -> Self {
        let controller = AbortController::new()
            .inspect_err(|e| log::warn!("AbortController unavailable: {:?}", e))
            .ok();
        Self {
            controller: StoredValue::new_local(controller),
            alive: StoredValue::new(true),
        }
    }

    /// 传给 fetch 的中止信号
    pub fn signal(&self) -> Option<AbortSignal> {
        self.controller
            .try_with_value(|c| c.as_ref().map(AbortController::signal))
            .flatten()
    }

    /// 所属视图仍然挂载
    pub fn is_alive(&self) -> bool {
        self.alive.try_get_value().unwrap_or(false)
    }

    pub fn cancel(&self) {
        if !self.is_alive() {
            return;
        }
        self.alive.try_set_value(false);
        self.controller.try_with_value(|c| {
            if let Some(c) = c {
                c.abort();
            }
        });
    }
}

/// 创建绑定到当前组件的作用域，组件清理时自动取消
pub fn use_view_scope() -> ViewScope {
    let scope = ViewScope::new();
    on_cleanup(move || scope.cancel());
    scope
}
