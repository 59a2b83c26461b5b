//! 商品创建页（仅管理员）

mod form_state;
mod pricing_section;
mod product_fields;

use crate::api::use_api;
use crate::components::icons::Plus;
use crate::components::status_alert::{StatusAlert, submit_label};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use crate::web::{Timeout, today, use_view_scope};
use form_state::FormState;
use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use pricing_section::PricingSection;
use product_fields::ProductFields;
use shadownet_shared::product::{PRODUCT_ADDED, ProductLogic};
use shadownet_shared::submit::SubmitState;

#[component]
pub fn AddProductPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();
    let scope = use_view_scope();

    let form = FormState::new();
    let status = RwSignal::new(SubmitState::Idle);
    let file_input = NodeRef::<Input>::new();
    // 离开页面时 StoredValue 被释放，未触发的跳转随之取消
    let redirect_timer = StoredValue::new_local(Option::<Timeout>::None);
    let redirect_delay = api.config().redirect_delay_ms;

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let mut started = false;
        status.update(|s| started = s.begin());
        if !started {
            return;
        }

        let draft = form.to_draft();
        let api = api.clone();
        spawn_local(async move {
            let client = api.client(scope);
            let result = ProductLogic::new(&client).create(&draft, today()).await;

            if !scope.is_alive() {
                return;
            }

            match result {
                Ok(()) => {
                    status.update(|s| s.succeed(Some(PRODUCT_ADDED.to_string())));
                    form.reset();
                    if let Some(input) = file_input.get_untracked() {
                        input.set_value("");
                    }
                    redirect_timer.set_value(Timeout::new(redirect_delay, move || {
                        router.navigate_to(AppRoute::Catalog)
                    }));
                }
                Err(e) => status.update(|s| s.fail(e.user_message())),
            }
        });
    };

    view! {
        <div class="flex justify-center mt-8 px-4">
            <div class="card w-full max-w-lg shadow-2xl bg-base-100">
                <form class="card-body space-y-2" on:submit=on_submit>
                    <h2 class="card-title text-2xl justify-center">"Add Product"</h2>
                    <StatusAlert state=status />

                    <ProductFields state=form status=status file_input=file_input />
                    <PricingSection state=form />

                    <div class="form-control mt-4">
                        <button type="submit" class="btn btn-primary gap-2"
                            disabled=move || status.with(SubmitState::is_submitting)
                        >
                            <Plus attr:class="h-4 w-4" />
                            {submit_label(status, "Add Product", "Adding Product...")}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
