//! 商品目录的客户端过滤与分页
//!
//! 后端一次返回全部商品，搜索、分类和分页都在本地完成。

use crate::Product;

pub const PAGE_SIZE: usize = 5;

/// 分类下拉框中"全部"的取值
pub const CATEGORY_ALL: &str = "All";
pub const CATEGORIES: [&str; 2] = ["Electronics", "Clothing"];

pub const FETCH_FAILED: &str = "Failed to fetch products. Please try again later.";
pub const NO_PRODUCTS: &str = "No products found.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// 解析下拉框的值，`All` 为哨兵值
    pub fn from_value(value: &str) -> Self {
        if value == CATEGORY_ALL {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(value.to_string())
        }
    }

    pub fn as_value(&self) -> &str {
        match self {
            CategoryFilter::All => CATEGORY_ALL,
            CategoryFilter::Named(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogFilter {
    pub query: String,
    pub category: CategoryFilter,
}

impl CatalogFilter {
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = match &self.category {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => product.category.as_deref() == Some(name.as_str()),
        };
        if !category_ok {
            return false;
        }

        let needle = self.query.to_lowercase();
        needle.is_empty()
            || product.product_name.to_lowercase().contains(&needle)
            || product.product_desc.to_lowercase().contains(&needle)
    }

    /// 保持原顺序返回匹配的商品
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

/// 分页状态，页码从 1 开始
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size.max(1))
    }

    /// 页码按钮，结果为空时没有按钮
    pub fn pages(&self, total: usize) -> std::ops::RangeInclusive<usize> {
        1..=self.page_count(total)
    }

    /// 当前页的切片 `[size*(k-1), size*k)`，越界时为空
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.current_page.saturating_sub(1) * self.page_size;
        let end = (start + self.page_size).min(items.len());
        items.get(start..end).unwrap_or(&[])
    }

    /// 当前页的元素及其在整个列表中的位置
    pub fn positioned<'a, T>(&self, items: &'a [T]) -> impl Iterator<Item = (usize, &'a T)> {
        let offset = self.current_page.saturating_sub(1) * self.page_size;
        self.window(items)
            .iter()
            .enumerate()
            .map(move |(i, item)| (offset + i, item))
    }

    pub fn go_to(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// 过滤条件变化后回到第一页
    pub fn reset(&mut self) {
        self.current_page = 1;
    }
}
