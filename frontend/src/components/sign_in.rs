use crate::api::use_api;
use crate::auth::use_session;
use crate::components::icons::ShieldCheck;
use crate::components::status_alert::{StatusAlert, submit_label};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use crate::web::{now, use_view_scope};
use leptos::prelude::*;
use leptos::task::spawn_local;
use shadownet_shared::account::{AccountLogic, GENERIC_FAILURE};
use shadownet_shared::submit::SubmitState;
use shadownet_shared::validation::SignInForm;

#[component]
pub fn SignInPage() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let router = use_router();
    let scope = use_view_scope();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let state = RwSignal::new(SubmitState::Idle);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let mut started = false;
        state.update(|s| started = s.begin());
        if !started {
            return;
        }

        let form = SignInForm {
            username: username.get_untracked(),
            password: password.get_untracked(),
        };

        let api = api.clone();
        spawn_local(async move {
            let client = api.client(scope);
            let config = api.config();
            let result = AccountLogic::new(&client, config.role_policy, config.session_ttl)
                .sign_in(&form, now())
                .await;

            if !scope.is_alive() {
                return;
            }

            match result {
                Ok(signed_in) if session.login(&signed_in.session) => {
                    state.update(SubmitState::reset);
                    router.navigate_to(signed_in.landing.into());
                }
                Ok(_) => state.update(|s| s.fail(GENERIC_FAILURE)),
                Err(e) => state.update(|s| s.fail(e.user_message())),
            }
        });
    };

    view! {
        <div class="flex justify-center mt-8 px-4">
            <div class="card w-full max-w-md shadow-2xl bg-base-100">
                <form class="card-body" on:submit=on_submit>
                    <div class="flex flex-col items-center gap-2 mb-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <ShieldCheck attr:class="h-8 w-8" />
                        </div>
                        <h2 class="card-title text-2xl">"Sign In"</h2>
                    </div>
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
                        <label class="label" for="password">
                            <span class="label-text">"Password"</span>
                        </label>
                        <input id="password" type="password" placeholder="Enter your password"
                            class="input input-bordered"
                            prop:value=password
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </div>

                    <div class="form-control mt-6">
                        <button type="submit" class="btn btn-primary"
                            disabled=move || state.with(SubmitState::is_submitting)
                        >
                            {submit_label(state, "Sign In", "Signing In...")}
                        </button>
                    </div>

                    <p class="text-center mt-3">
                        "Don't have an account? "
                        <Link to=AppRoute::SignUp class="link link-primary">"Sign Up"</Link>
                    </p>
                </form>
            </div>
        </div>
    }
}
