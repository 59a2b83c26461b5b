//! 表单状态管理模块
//!
//! 将零散的 signal 整合为 `FormState` 结构体，负责：
//! - 数据的持有
//! - 数据的重置
//! - 数据到商品草稿的转换

use chrono::NaiveDate;
use leptos::prelude::*;
use shadownet_shared::product::{ImageUpload, ProductDraft};

/// `<input type="date">` 的取值格式
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，非常适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct FormState {
    pub name: RwSignal<String>,
    pub description: RwSignal<String>,
    pub price: RwSignal<String>,
    /// 选中后立即读入内存的图片
    pub image: RwSignal<Option<ImageUpload>>,
    pub is_free: RwSignal<bool>,
    /// 日期输入框的原始值（yyyy-mm-dd），未选择时为空
    pub expiration: RwSignal<String>,
}

impl FormState {
    /// 创建新的表单状态，所有字段使用默认值
    pub fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            price: RwSignal::new(String::new()),
            image: RwSignal::new(None),
            is_free: RwSignal::new(false),
            expiration: RwSignal::new(String::new()),
        }
    }

    /// 重置表单到初始状态
    pub fn reset(&self) {
        self.name.set(String::new());
        self.description.set(String::new());
        self.price.set(String::new());
        self.image.set(None);
        self.is_free.set(false);
        self.expiration.set(String::new());
    }

    /// 将表单状态转换为商品草稿
    pub fn to_draft(&self) -> ProductDraft {
        let expiration_date = self
            .expiration
            .with_untracked(|raw| NaiveDate::parse_from_str(raw.trim(), DATE_INPUT_FORMAT).ok());

        ProductDraft {
            name: self.name.get_untracked(),
            description: self.description.get_untracked(),
            price: self.price.get_untracked(),
            image: self.image.get_untracked(),
            is_free: self.is_free.get_untracked(),
            expiration_date,
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
