//! Drag-and-drop / browse image uploader.
//!
//! Emits the selected file as base64 payload plus MIME type; the preview is
//! rendered from the same data, so replacing an upload releases the old one
//! with the signal value.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::commands::ImagePayload;

#[component]
pub fn ImageDrop(
    /// Field label above the drop zone.
    label: Signal<String>,
    /// Unique DOM id for the hidden file input.
    input_id: &'static str,
    /// The uploaded image, owned by the parent page.
    image: RwSignal<Option<ImagePayload>>,
    /// Invoked after a successful load, e.g. to request prompt suggestions.
    #[prop(optional)]
    on_upload: Option<Callback<ImagePayload>>,
) -> impl IntoView {
    let (is_over, set_is_over) = signal(false);
    let (is_loading, set_is_loading) = signal(false);

    let handle_file = move |file: web_sys::File| {
        let mime_type = file.type_();
        if !mime_type.starts_with("image/") {
            return;
        }
        set_is_loading.set(true);
        spawn_local(async move {
            match read_file_as_base64(file).await {
                Ok(data) => {
                    let payload = ImagePayload { data, mime_type };
                    image.set(Some(payload.clone()));
                    if let Some(cb) = on_upload {
                        cb.run(payload);
                    }
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to read file: {}", e).into());
                }
            }
            set_is_loading.set(false);
        });
    };

    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        set_is_over.set(false);
        if let Some(file) = ev.data_transfer().and_then(|dt| dt.files()).and_then(|f| f.get(0)) {
            handle_file(file);
        }
    };

    let on_input_change = move |ev: web_sys::Event| {
        let input: web_sys::HtmlInputElement =
            ev.target().unwrap().dyn_into().expect("file input element");
        if let Some(file) = input.files().and_then(|f| f.get(0)) {
            handle_file(file);
        }
        input.set_value("");
    };

    let preview_url = move || {
        image
            .get()
            .map(|img| format!("data:{};base64,{}", img.mime_type, img.data))
    };

    view! {
        <div class="image-drop">
            <style>{include_str!("image_drop.css")}</style>
            <label class="field-label">{move || label.get()}</label>

            {move || match preview_url() {
                Some(src) => view! {
                    <div class="image-preview-wrap">
                        <img src=src class="image-preview" alt="Uploaded preview" />
                        <button
                            class="image-clear"
                            aria-label="Clear uploaded image"
                            on:click=move |_| image.set(None)
                        >
                            "×"
                        </button>
                    </div>
                }.into_any(),
                None => view! {
                    <div
                        class="drop-zone"
                        class:drop-zone-active=move || is_over.get()
                        on:dragover=move |ev: web_sys::DragEvent| {
                            ev.prevent_default();
                            set_is_over.set(true);
                        }
                        on:dragleave=move |_| set_is_over.set(false)
                        on:drop=on_drop
                    >
                        <Show
                            when=move || is_loading.get()
                            fallback=move || view! {
                                <div class="drop-zone-content">
                                    <p class="drop-main">"Drag & drop your image here, or"</p>
                                    <label for=input_id class="btn btn-secondary">"Browse Files"</label>
                                    <input
                                        type="file"
                                        id=input_id
                                        accept="image/*"
                                        style="display: none"
                                        on:change=on_input_change
                                    />
                                    <p class="drop-formats">"Supports: JPG, PNG, WEBP"</p>
                                </div>
                            }
                        >
                            <p class="drop-main">"Loading image..."</p>
                        </Show>
                    </div>
                }.into_any(),
            }}
        </div>
    }
}

/// Read a File's bytes and base64-encode them.
async fn read_file_as_base64(file: web_sys::File) -> Result<String, String> {
    use js_sys::{ArrayBuffer, Uint8Array};
    use wasm_bindgen_futures::JsFuture;

    let array_buffer: ArrayBuffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{:?}", e))?
        .dyn_into()
        .map_err(|_| "Failed to convert to ArrayBuffer".to_string())?;

    let bytes = Uint8Array::new(&array_buffer).to_vec();
    Ok(base64_encode(&bytes))
}

/// Simple base64 encoder (avoiding extra dependencies in WASM).
fn base64_encode(bytes: &[u8]) -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

    let mut result = String::with_capacity(bytes.len().div_ceil(3) * 4);

    for chunk in bytes.chunks(3) {
        let b0 = chunk[0] as usize;
        let b1 = chunk.get(1).copied().unwrap_or(0) as usize;
        let b2 = chunk.get(2).copied().unwrap_or(0) as usize;

        result.push(ALPHABET[b0 >> 2] as char);
        result.push(ALPHABET[((b0 & 0x03) << 4) | (b1 >> 4)] as char);

        if chunk.len() > 1 {
            result.push(ALPHABET[((b1 & 0x0f) << 2) | (b2 >> 6)] as char);
        } else {
            result.push('=');
        }

        if chunk.len() > 2 {
            result.push(ALPHABET[b2 & 0x3f] as char);
        } else {
            result.push('=');
        }
    }

    result
}
