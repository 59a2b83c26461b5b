use crate::api::use_api;
use crate::auth::use_session;
use crate::components::status_alert::{StatusAlert, submit_label};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use crate::web::{now, use_view_scope};
use leptos::prelude::*;
use leptos::task::spawn_local;
use shadownet_shared::account::{AccountLogic, GENERIC_FAILURE};
use shadownet_shared::submit::SubmitState;
use shadownet_shared::validation::SignUpForm;

#[component]
pub fn SignUpPage() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let router = use_router();
    let scope = use_view_scope();

    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let state = RwSignal::new(SubmitState::Idle);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let mut started = false;
        state.update(|s| started = s.begin());
        if !started {
            return;
        }

        let form = SignUpForm {
            username: username.get_untracked(),
            email: email.get_untracked(),
            phone: phone.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };

        let api = api.clone();
        spawn_local(async move {
            let client = api.client(scope);
            let config = api.config();
            let result = AccountLogic::new(&client, config.role_policy, config.session_ttl)
                .sign_up(&form, now())
                .await;

            if !scope.is_alive() {
                return;
            }

            match result {
                Ok(signed_in) => {
                    if !session.login(&signed_in.session) {
                        state.update(|s| s.fail(GENERIC_FAILURE));
                        return;
                    }
                    state.update(|s| s.succeed(signed_in.notice));
                    router.navigate_to(signed_in.landing.into());
                }
                Err(e) => state.update(|s| s.fail(e.user_message())),
            }
        });
    };

    view! {
        <div class="flex justify-center mt-8 px-4">
            <div class="card w-full max-w-md shadow-2xl bg-base-100">
                <form class="card-body" on:submit=on_submit>
                    <h2 class="card-title text-2xl justify-center mb-2">"Sign Up"</h2>
                    <StatusAlert state=state />

                    <div class="form-control">
                        <label class="label" for="username">
                            <span class="label-text">"Username"</span>
                        </label>
                        <input id="username" type="text" placeholder="Enter username"
                            class="input input-bordered"
                            prop:value=username
                            on:input=move |ev| username.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="email">
                            <span class="label-text">"Email"</span>
                        </label>
                        <input id="email" type="email" placeholder="Enter email"
                            class="input input-bordered"
                            prop:value=email
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="phone">
                            <span class="label-text">"Phone"</span>
                        </label>
                        <input id="phone" type="tel" placeholder="07XXXXXXXX" maxlength="10"
                            class="input input-bordered"
                            prop:value=phone
                            on:input=move |ev| phone.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="password">
                            <span class="label-text">"Password"</span>
                        </label>
                        <input id="password" type="password" placeholder="Enter password"
                            class="input input-bordered"
                            prop:value=password
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="confirm_password">
                            <span class="label-text">"Confirm Password"</span>
                        </label>
                        <input id="confirm_password" type="password" placeholder="Confirm password"
                            class="input input-bordered"
                            prop:value=confirm_password
                            on:input=move |ev| confirm_password.set(event_target_value(&ev))
                        />
                    </div>

                    <div class="form-control mt-6">
                        <button type="submit" class="btn btn-primary"
                            disabled=move || state.with(SubmitState::is_submitting)
                        >
                            {submit_label(state, "Sign Up", "Signing Up...")}
                        </button>
                    </div>

                    <p class="text-center mt-3">
                        "Already have an account? "
                        <Link to=AppRoute::SignIn class="link link-primary">"Sign In"</Link>
                    </p>
                </form>
            </div>
        </div>
    }
}
