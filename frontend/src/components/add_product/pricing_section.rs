//! 定价表单组件
//!
//! 免费/付费切换：付费时填写价格，免费时必须设置过期日期。

use leptos::prelude::*;

use super::form_state::{DATE_INPUT_FORMAT, FormState};
use crate::web::today;

#[component]
pub fn PricingSection(state: FormState) -> impl IntoView {
    let min_date = today().format(DATE_INPUT_FORMAT).to_string();
    let toggle_class = move |free: bool| {
        if state.is_free.get() == free {
            "btn btn-primary join-item"
        } else {
            "btn btn-outline btn-primary join-item"
        }
    };

    view! {
        <div class="form-control">
            <label for="product_cost" class="label">
                <span class="label-text">"Price"</span>
            </label>
            <input id="product_cost" type="number" placeholder="Enter price"
                class="input input-bordered w-full"
                prop:disabled=move || state.is_free.get()
                prop:value=move || state.price.get()
                on:input=move |ev| state.price.set(event_target_value(&ev))
            />
        </div>

        <div class="form-control">
            <label class="label">
                <span class="label-text">"Is this product free?"</span>
            </label>
            <div class="join">
                <button type="button" class=move || toggle_class(true)
                    on:click=move |_| state.is_free.set(true)
                >
                    "Free"
                </button>
                <button type="button" class=move || toggle_class(false)
                    on:click=move |_| state.is_free.set(false)
                >
                    "Paid"
                </button>
            </div>
        </div>

        // 条件渲染：仅免费商品需要过期日期
        <Show when=move || state.is_free.get()>
            <div class="form-control">
                <label for="expiration_date" class="label">
                    <span class="label-text">"Expiration Date"</span>
                </label>
                <input id="expiration_date" type="date"
                    class="input input-bordered w-full"
                    min=min_date.clone()
                    prop:value=move || state.expiration.get()
                    on:input=move |ev| state.expiration.set(event_target_value(&ev))
                />
            </div>
        </Show>
    }
}
