//! 商品目录页
//!
//! 挂载时拉取一次全部商品，搜索、分类和分页都在本地完成。

use crate::api::use_api;
use crate::components::icons::Search;
use crate::components::payment::MpesaPayment;
use crate::web::{Timeout, use_view_scope};
use leptos::prelude::*;
use leptos::task::spawn_local;
use shadownet_shared::Product;
use shadownet_shared::catalog::{
    CATEGORIES, CATEGORY_ALL, CatalogFilter, CategoryFilter, FETCH_FAILED, NO_PRODUCTS,
    PAGE_SIZE, Pagination,
};
use shadownet_shared::format::{Currency, format_price};
use shadownet_shared::payment::PAYMENT_INITIATED;

const NOTIFICATION_MS: u32 = 3000;

#[derive(Debug, Clone, PartialEq)]
enum LoadState {
    Loading,
    Loaded(Vec<Product>),
    Failed,
}

#[component]
pub fn CatalogPage() -> impl IntoView {
    let api = use_api();
    let scope = use_view_scope();
    let load = RwSignal::new(LoadState::Loading);
    let currency = api.config().currency.clone();

    // 初始加载
    spawn_local(async move {
        let result = api.client(scope).get_products().await;
        if !scope.is_alive() {
            return;
        }
        match result {
            Ok(products) => {
                log::info!("loaded {} products", products.len());
                load.set(LoadState::Loaded(products));
            }
            Err(e) => {
                log::warn!("failed to load products: {}", e);
                load.set(LoadState::Failed);
            }
        }
    });

    view! {
        <div class="max-w-3xl mx-auto p-4 md:p-8 space-y-6">
            <h2 class="text-3xl font-bold text-center">"Our Products"</h2>
            {move || match load.get() {
                LoadState::Loading => view! { <CatalogSkeleton /> }.into_any(),
                LoadState::Failed => view! {
                    <div role="alert" class="alert alert-error justify-center">
                        <span>{FETCH_FAILED}</span>
                    </div>
                }
                .into_any(),
                LoadState::Loaded(products) => view! {
                    <CatalogBrowser products=products currency=currency.clone() />
                }
                .into_any(),
            }}
        </div>
    }
}

/// 搜索、分类、分页和支付面板
#[component]
fn CatalogBrowser(products: Vec<Product>, currency: Currency) -> impl IntoView {
    let filter = RwSignal::new(CatalogFilter::default());
    let pager = RwSignal::new(Pagination::default());
    let selected = RwSignal::new(Option::<Product>::None);
    let notification = RwSignal::new(Option::<String>::None);
    let notification_timer = StoredValue::new_local(Option::<Timeout>::None);
    let currency = StoredValue::new(currency);

    let filtered = Memo::new(move |_| {
        filter.with(|f| f.apply(&products).into_iter().cloned().collect::<Vec<_>>())
    });
    // 以过滤结果中的位置作为行键，缺失或重复的 product_id 不会让卡片互相覆盖
    let page_items = move || {
        pager.with(|p| {
            filtered.with(|items| {
                p.positioned(items)
                    .map(|(position, product)| (position, product.clone()))
                    .collect::<Vec<_>>()
            })
        })
    };

    // 过滤条件变化后回到第一页
    let set_query = move |query: String| {
        filter.update(|f| f.query = query);
        pager.update(Pagination::reset);
    };
    let set_category = move |value: &str| {
        filter.update(|f| f.category = CategoryFilter::from_value(value));
        pager.update(Pagination::reset);
    };

    let on_paid = Callback::new(move |()| {
        selected.set(None);
        notification.set(Some(PAYMENT_INITIATED.to_string()));
        notification_timer.set_value(Timeout::new(NOTIFICATION_MS, move || {
            notification.set(None)
        }));
    });
    let on_close = Callback::new(move |()| selected.set(None));
    let on_buy = Callback::new(move |product: Product| selected.set(Some(product)));

    view! {
        // 通知提示框
        {move || notification.get().map(|msg| view! {
            <div class="toast toast-top toast-end z-50">
                <div class="alert alert-success shadow-lg">
                    <span>{msg}</span>
                </div>
            </div>
        })}

        <label class="input input-bordered flex items-center gap-2">
            <Search attr:class="h-4 w-4 opacity-70" />
            <input type="text" class="grow" placeholder="Search products..."
                prop:value=move || filter.with(|f| f.query.clone())
                on:input=move |ev| set_query(event_target_value(&ev))
            />
        </label>

        <div class="flex flex-wrap justify-center gap-2">
            {std::iter::once(CATEGORY_ALL)
                .chain(CATEGORIES)
                .map(|value| view! {
                    <button
                        class=move || if filter.with(|f| f.category.as_value() == value) {
                            "btn btn-primary btn-sm"
                        } else {
                            "btn btn-outline btn-primary btn-sm"
                        }
                        on:click=move |_| set_category(value)
                    >
                        {value}
                    </button>
                })
                .collect_view()}
        </div>

        <Show
            when=move || filtered.with(|items| !items.is_empty())
            fallback=|| view! { <p class="text-center text-base-content/60">{NO_PRODUCTS}</p> }
        >
            <div class="space-y-4">
                <For
                    each=page_items
                    key=|(position, product)| (*position, product.product_id.clone())
                    children=move |(_, product): (usize, Product)| view! {
                        <ProductCard product=product currency=currency.get_value() on_buy=on_buy />
                    }
                />
            </div>
        </Show>

        // 同一时间只有一个支付面板，选择其他商品会替换它
        {move || selected.get().map(|product| view! {
            <MpesaPayment
                product_name=product.product_name
                amount=product.product_cost
                on_success=on_paid
                on_close=on_close
            />
        })}

        <div class="flex justify-center">
            <div class="join">
                {move || {
                    let total = filtered.with(Vec::len);
                    let current = pager.with(|p| p.current_page);
                    pager
                        .with(|p| p.pages(total))
                        .map(|page| view! {
                            <button
                                class=if page == current { "join-item btn btn-active" } else { "join-item btn" }
                                on:click=move |_| pager.update(|p| p.go_to(page))
                            >
                                {page}
                            </button>
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

/// 单个商品卡片
#[component]
fn ProductCard(product: Product, currency: Currency, on_buy: Callback<Product>) -> impl IntoView {
    let price = format_price(product.product_cost, &currency);
    let expires = product
        .is_free
        .then(|| product.expires_at().map(|ts| ts.format_date()))
        .flatten();
    let image = product.display_image().to_string();
    let name = product.product_name.clone();
    let description = product.product_desc.clone();
    let is_free = product.is_free;

    view! {
        <div class="card bg-base-100 shadow-md">
            <figure>
                <img src=image alt=name.clone() class="h-48 w-full object-cover" />
            </figure>
            <div class="card-body">
                <h3 class="card-title">
                    {name}
                    <Show when=move || is_free>
                        <span class="badge badge-success">"Free"</span>
                    </Show>
                </h3>
                <p>"Description: " {description}</p>
                <p>"Price: " {price}</p>
                {expires.map(|date| view! { <p>"Expires on: " {date}</p> })}
                <button class="btn btn-primary w-full" on:click=move |_| on_buy.run(product.clone())>
                    "Buy"
                </button>
            </div>
        </div>
    }
}

/// 加载中的骨架卡片
#[component]
fn CatalogSkeleton() -> impl IntoView {
    (0..PAGE_SIZE)
        .map(|_| {
            view! {
                <div class="card bg-base-100 shadow-md">
                    <div class="card-body gap-3">
                        <div class="skeleton h-6 w-1/2"></div>
                        <div class="skeleton h-4 w-full"></div>
                        <div class="skeleton h-4 w-2/3"></div>
                    </div>
                </div>
            }
        })
        .collect_view()
}
