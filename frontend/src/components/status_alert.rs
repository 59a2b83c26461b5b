use leptos::prelude::*;
use shadownet_shared::submit::SubmitState;

/// 根据提交状态显示错误或成功提示
#[component]
pub fn StatusAlert(state: RwSignal<SubmitState>) -> impl IntoView {
    let error = move || state.with(|s| s.error().map(str::to_string));
    let success = move || state.with(|s| s.success().map(str::to_string));

    view! {
        {move || error().map(|msg| view! {
            <div role="alert" class="alert alert-error text-sm py-2">
                <span>{msg}</span>
            </div>
        })}
        {move || success().map(|msg| view! {
            <div role="alert" class="alert alert-success text-sm py-2">
                <span>{msg}</span>
            </div>
        })}
    }
}

/// 提交按钮的内容：提交中显示加载动画
pub fn submit_label(
    state: RwSignal<SubmitState>,
    idle: &'static str,
    busy: &'static str,
) -> impl Fn() -> AnyView + Send + Sync + 'static {
    move || {
        if state.with(SubmitState::is_submitting) {
            view! { <span class="loading loading-spinner"></span> {busy} }.into_any()
        } else {
            idle.into_any()
        }
    }
}
