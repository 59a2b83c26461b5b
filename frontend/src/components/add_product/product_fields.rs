//! 基础信息表单组件
//!
//! 负责商品名称、描述和图片的 UI 渲染。
//! 图片在选择时校验类型并读入内存，提交时不再访问 DOM。

use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use shadownet_shared::product::{ImageUpload, check_image_type};
use shadownet_shared::submit::SubmitState;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};

use super::form_state::FormState;

/// 读取文件内容
async fn read_file(file: &File) -> Option<Vec<u8>> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .inspect_err(|e| log::warn!("failed to read selected image: {:?}", e))
        .ok()?;
    Some(js_sys::Uint8Array::new(&buffer).to_vec())
}

#[component]
pub fn ProductFields(
    state: FormState,
    /// 提交状态，用于显示图片校验错误
    status: RwSignal<SubmitState>,
    file_input: NodeRef<Input>,
) -> impl IntoView {
    let on_image_change = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            state.image.set(None);
            return;
        };

        let content_type = file.type_();
        if let Err(e) = check_image_type(&content_type) {
            state.image.set(None);
            status.update(|s| s.fail(e.to_string()));
            return;
        }

        status.update(SubmitState::reset);
        spawn_local(async move {
            let upload = read_file(&file).await.map(|bytes| ImageUpload {
                file_name: file.name(),
                content_type,
                bytes,
            });
            state.image.set(upload);
        });
    };

    view! {
        <div class="form-control">
            <label for="product_name" class="label">
                <span class="label-text">"Product Name"</span>
            </label>
            <input id="product_name" type="text" placeholder="Enter product name"
                class="input input-bordered w-full"
                prop:value=move || state.name.get()
                on:input=move |ev| state.name.set(event_target_value(&ev))
            />
        </div>

        <div class="form-control">
            <label for="product_desc" class="label">
                <span class="label-text">"Description"</span>
            </label>
            <textarea id="product_desc" rows="3" placeholder="Enter product description"
                class="textarea textarea-bordered w-full"
                prop:value=move || state.description.get()
                on:input=move |ev| state.description.set(event_target_value(&ev))
            ></textarea>
        </div>

        <div class="form-control">
            <label for="product_photo" class="label">
                <span class="label-text">"Product Image"</span>
            </label>
            <input id="product_photo" type="file" accept="image/*"
                class="file-input file-input-bordered w-full"
                node_ref=file_input
                on:change=on_image_change
            />
        </div>
    }
}
