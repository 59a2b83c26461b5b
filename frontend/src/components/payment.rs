//! M-Pesa 支付面板

use crate::api::use_api;
use crate::auth::use_session;
use crate::components::icons::XMark;
use crate::web::{now, use_view_scope};
use leptos::prelude::*;
use leptos::task::spawn_local;
use shadownet_shared::format::format_amount;
use shadownet_shared::payment::PaymentLogic;
use shadownet_shared::submit::SubmitState;

#[component]
pub fn MpesaPayment(
    /// 被购买的商品名
    product_name: String,
    /// 支付金额
    amount: f64,
    /// 支付请求已被网关接受
    #[prop(into)]
    on_success: Callback<()>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let scope = use_view_scope();

    let phone = RwSignal::new(String::new());
    let state = RwSignal::new(SubmitState::Idle);
    let symbol = api.config().currency.symbol.clone();

    let on_pay = move |_: leptos::ev::MouseEvent| {
        let mut started = false;
        state.update(|s| started = s.begin());
        if !started {
            return;
        }

        let phone_input = phone.get_untracked();
        let api = api.clone();
        spawn_local(async move {
            let client = api.client(scope);
            let token = session.token();
            let result = PaymentLogic::new(&client, api.config().payment_url.as_deref())
                .pay(&phone_input, amount, token.as_deref(), now())
                .await;

            if !scope.is_alive() {
                return;
            }

            match result {
                Ok(_reference) => {
                    state.update(|s| s.succeed(None));
                    on_success.run(());
                }
                Err(e) => state.update(|s| s.fail(e.user_message())),
            }
        });
    };

    let pay_label = move || {
        if state.with(SubmitState::is_submitting) {
            "Processing...".to_string()
        } else {
            format!("Pay {} {}", symbol, format_amount(amount))
        }
    };

    view! {
        <div class="card bg-base-100 shadow-xl mt-6">
            <div class="card-body">
                <div class="flex items-center justify-between">
                    <h3 class="card-title">"Payment for " {product_name}</h3>
                    <button class="btn btn-ghost btn-sm btn-circle" on:click=move |_| on_close.run(())>
                        <XMark attr:class="h-5 w-5" />
                    </button>
                </div>

                <div class="form-control">
                    <label class="label" for="phoneNumber">
                        <span class="label-text">"Enter your M-Pesa phone number:"</span>
                    </label>
                    <input id="phoneNumber" type="tel" placeholder="07XX XXX XXX" maxlength="10"
                        class="input input-bordered"
                        prop:value=phone
                        on:input=move |ev| phone.set(event_target_value(&ev))
                    />
                </div>

                {move || state.with(|s| s.error().map(str::to_string)).map(|msg| view! {
                    <div class="text-error text-sm">{msg}</div>
                })}

                <button class="btn btn-success w-full mt-2"
                    disabled=move || state.with(SubmitState::is_submitting)
                    on:click=on_pay
                >
                    {pay_label}
                </button>
            </div>
        </div>
    }
}
