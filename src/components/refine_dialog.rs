//! Refinement dialog over a generated image.
//!
//! Editing -> Submitting -> preview of the candidate, where the user either
//! saves (replacing the history head and the displayed image), goes back for
//! another change, or closes. Closing at any point discards everything.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, ImagePayload};
use crate::components::image_drop::ImageDrop;

#[derive(Debug, Clone)]
enum RefineState {
    Editing,
    Submitting,
    Preview(String),
    Failed(String),
}

#[component]
pub fn RefineDialog(
    /// The currently displayed generated image.
    image_data_url: String,
    language: String,
    /// Called with the accepted image after the history head was replaced.
    on_accepted: Callback<String>,
    on_close: Callback<()>,
) -> impl IntoView {
    let state = RwSignal::new(RefineState::Editing);
    let instruction = RwSignal::new(String::new());
    let decal = RwSignal::new(None::<ImagePayload>);

    let en = language == "en";
    let strings = RefineStrings::for_lang(en);
    let lang_for_accept = language.clone();

    let source_url = image_data_url.clone();
    let on_apply = move |_| {
        let text = instruction.get();
        if text.trim().is_empty() {
            return;
        }
        state.set(RefineState::Submitting);
        let url = source_url.clone();
        let decal_image = decal.get();
        spawn_local(async move {
            match commands::refine_image(&url, &text, decal_image).await {
                Ok(new_url) => state.set(RefineState::Preview(new_url)),
                Err(e) => state.set(RefineState::Failed(e)),
            }
        });
    };

    let on_save = move |candidate: String| {
        let text = instruction.get();
        let lang = lang_for_accept.clone();
        spawn_local(async move {
            match commands::accept_refinement(&candidate, &text, &lang).await {
                Ok(()) => on_accepted.run(candidate),
                Err(e) => state.set(RefineState::Failed(e)),
            }
        });
    };

    view! {
        <div class="refine-overlay">
            <style>{include_str!("refine_dialog.css")}</style>
            <div class="refine-dialog">
                <div class="refine-header">
                    <h3>{strings.title}</h3>
                    <button class="refine-close" on:click=move |_| on_close.run(())>"×"</button>
                </div>

                {move || match state.get() {
                    RefineState::Editing => {
                        let on_apply = on_apply.clone();
                        view! {
                            <div class="refine-body">
                                <img src=image_data_url.clone() class="refine-source" alt="Image being refined" />
                                <label class="field-label">{strings.prompt_label}</label>
                                <textarea
                                    class="input"
                                    rows=3
                                    placeholder=strings.prompt_placeholder
                                    prop:value=move || instruction.get()
                                    on:input=move |ev| instruction.set(event_target_value(&ev))
                                />
                                <ImageDrop
                                    label=Signal::derive(move || strings.decal_label.to_string())
                                    input_id="refine-decal-input"
                                    image=decal
                                />
                                <button class="btn btn-primary" on:click=on_apply>
                                    {strings.apply}
                                </button>
                            </div>
                        }.into_any()
                    }

                    RefineState::Submitting => view! {
                        <div class="refine-body refine-waiting">
                            <div class="spinner"></div>
                            <p>{strings.applying}</p>
                        </div>
                    }.into_any(),

                    RefineState::Preview(candidate) => {
                        let save_candidate = candidate.clone();
                        let on_save = on_save.clone();
                        view! {
                            <div class="refine-body">
                                <img src=candidate.clone() class="refine-source" alt="Refined image preview" />
                                <div class="refine-actions">
                                    <button
                                        class="btn btn-primary"
                                        on:click=move |_| on_save(save_candidate.clone())
                                    >
                                        {strings.save}
                                    </button>
                                    <button
                                        class="btn btn-secondary"
                                        on:click=move |_| state.set(RefineState::Editing)
                                    >
                                        {strings.retry}
                                    </button>
                                </div>
                            </div>
                        }.into_any()
                    }

                    RefineState::Failed(message) => view! {
                        <div class="refine-body">
                            <p class="refine-error">{message}</p>
                            <div class="refine-actions">
                                <button
                                    class="btn btn-secondary"
                                    on:click=move |_| state.set(RefineState::Editing)
                                >
                                    {strings.retry}
                                </button>
                                <button class="btn btn-secondary" on:click=move |_| on_close.run(())>
                                    {strings.close}
                                </button>
                            </div>
                        </div>
                    }.into_any(),
                }}
            </div>
        </div>
    }
}

#[derive(Clone, Copy)]
struct RefineStrings {
    title: &'static str,
    prompt_label: &'static str,
    prompt_placeholder: &'static str,
    decal_label: &'static str,
    apply: &'static str,
    applying: &'static str,
    save: &'static str,
    retry: &'static str,
    close: &'static str,
}

impl RefineStrings {
    fn for_lang(en: bool) -> Self {
        if en {
            Self {
                title: "Refine Image",
                prompt_label: "Describe your changes",
                prompt_placeholder: "e.g., make the sky more dramatic, add a tree on the left",
                decal_label: "Detail image to add (optional)",
                apply: "Apply",
                applying: "Applying...",
                save: "Save & Replace",
                retry: "Make Another Change",
                close: "Close",
            }
        } else {
            Self {
                title: "Tinh chỉnh Ảnh",
                prompt_label: "Mô tả thay đổi",
                prompt_placeholder: "ví dụ: làm cho bầu trời kịch tính hơn, thêm một cái cây ở bên trái",
                decal_label: "Ảnh chi tiết để thêm vào (tùy chọn)",
                apply: "Áp dụng",
                applying: "Đang áp dụng...",
                save: "Lưu & Thay thế",
                retry: "Thay đổi khác",
                close: "Đóng",
            }
        }
    }
}
