//! 仪表盘
//!
//! 登录后的概览页：当前用户、会话有效期、商品数量，以及注销入口。

use crate::api::use_api;
use crate::auth::use_session;
use crate::components::icons::{LogOut, Plus, ShoppingBag};
use crate::web::route::AppRoute;
use crate::web::router::Link;
use crate::web::use_view_scope;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let scope = use_view_scope();

    let user = session.user();
    let expiry = session.revalidate().map(|s| s.expiry.format_date());
    let product_count = RwSignal::new(Option::<usize>::None);
    let loading = RwSignal::new(true);

    spawn_local(async move {
        let result = api.client(scope).get_products().await;
        if !scope.is_alive() {
            return;
        }
        match result {
            Ok(products) => product_count.set(Some(products.len())),
            Err(e) => log::warn!("dashboard product count unavailable: {}", e),
        }
        loading.set(false);
    });

    let username = move || user.with(|u| u.as_ref().map(|u| u.username.clone()).unwrap_or_default());
    let role = move || user.with(|u| u.as_ref().map(|u| u.role.to_string()).unwrap_or_default());
    let is_admin = move || user.with(|u| u.as_ref().is_some_and(|u| u.is_admin()));

    view! {
        <div class="max-w-4xl mx-auto p-4 md:p-8 space-y-6">
            <div class="flex flex-col md:flex-row md:items-center justify-between gap-4">
                <div>
                    <h2 class="text-3xl font-bold">"Welcome, " {username}</h2>
                    <p class="text-base-content/70">"Signed in as " <span class="badge badge-outline">{role}</span></p>
                </div>
                <button class="btn btn-outline btn-error" on:click=move |_| session.logout()>
                    <LogOut attr:class="h-4 w-4" />
                    "Logout"
                </button>
            </div>

            <div class="stats stats-vertical lg:stats-horizontal shadow w-full bg-base-100">
                <div class="stat">
                    <div class="stat-figure text-primary">
                        <ShoppingBag attr:class="h-8 w-8" />
                    </div>
                    <div class="stat-title">"Products"</div>
                    <div class="stat-value text-primary">
                        {move || if loading.get() {
                            view! { <span class="loading loading-spinner loading-md"></span> }.into_any()
                        } else {
                            product_count
                                .get()
                                .map_or_else(|| "-".to_string(), |n| n.to_string())
                                .into_any()
                        }}
                    </div>
                </div>

                <div class="stat">
                    <div class="stat-title">"Session expires"</div>
                    <div class="stat-value text-secondary text-2xl">
                        {expiry.unwrap_or_else(|| "-".to_string())}
                    </div>
                </div>
            </div>

            <div class="flex flex-wrap gap-3">
                <Link to=AppRoute::Catalog class="btn btn-primary">
                    <ShoppingBag attr:class="h-4 w-4" />
                    "Browse products"
                </Link>
                <Show when=is_admin>
                    <Link to=AppRoute::AddProduct class="btn btn-secondary">
                        <Plus attr:class="h-4 w-4" />
                        "Add product"
                    </Link>
                </Show>
            </div>
        </div>
    }
}
