//! 定时器封装模块
//!
//! 使用 `web_sys` 的原生定时器 API 替代 `gloo-timers`。

use wasm_bindgen::prelude::*;

/// 一次性定时器
///
/// 封装 `setTimeout` API。当 `Timeout` 被 drop 时，未触发的回调会被取消。
pub struct Timeout {
    handle: i32,
    #[allow(dead_code)]
    closure: Closure<dyn FnMut()>,
}

impl Timeout {
    /// 创建新的一次性定时器
    ///
    /// 无法获取 window 或注册失败时返回 None。
    pub fn new<F>(millis: u32, callback: F) -> Option<Self>
    where
        F: FnOnce() + 'static,
    {
        let closure = Closure::<dyn FnMut()>::once(callback);
        let window = web_sys::window()?;

        let handle = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                i32::try_from(millis).unwrap_or(i32::MAX),
            )
            .inspect_err(|e| log::warn!("setTimeout failed: {:?}", e))
            .ok()?;

        Some(Self { handle, closure })
    }

    /// 取消定时器
    ///
    /// 通常不需要手动调用，因为 drop 时会自动清除。
    pub fn cancel(&self) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(self.handle);
        }
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.cancel();
    }
}
