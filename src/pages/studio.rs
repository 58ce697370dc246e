//! The studio: feature sidebar, request form, output panel, history.
//!
//! Exactly one generation is in flight at a time; the trigger is disabled
//! while a request is pending. Suggestions are fire-and-forget: only the
//! result matching the latest upload is displayed.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::app::{LanguageContext, SelectedFeature};
use crate::commands::{self, GenerateRequest, GenerationOutcome, ImagePayload, RenderSettings, RerunRequest, StructuredPayload};
use crate::components::history_panel::HistoryPanel;
use crate::components::image_drop::ImageDrop;
use crate::components::lang_switcher::LangSwitcher;
use crate::components::refine_dialog::RefineDialog;
use crate::components::report_table::ReportTable;
use crate::features::{self, FeatureKey, ImageUpload, Output, FEATURES};

#[derive(Debug, Clone)]
enum StudioState {
    Idle,
    Generating,
    Image(String),
    Report(StructuredPayload),
}

#[component]
pub fn StudioPage() -> impl IntoView {
    let lang_ctx = expect_context::<LanguageContext>();
    let selected = expect_context::<SelectedFeature>();
    let language = lang_ctx.language;

    let prompt = RwSignal::new(String::new());
    let negative_prompt = RwSignal::new(String::new());
    let style_preset = RwSignal::new(String::from("none"));
    let aspect_ratio = RwSignal::new(String::from("1:1"));
    let detail_level = RwSignal::new(String::from("medium"));

    let drawing_scale = RwSignal::new(String::from("1:100"));
    let line_thickness = RwSignal::new(String::from("medium"));
    let line_style = RwSignal::new(String::from("solid"));
    let symbol_library = RwSignal::new(String::from("generic"));

    let start_date = RwSignal::new(String::new());
    let end_date = RwSignal::new(String::new());
    let worker_count = RwSignal::new(String::new());
    let dim_length = RwSignal::new(String::new());
    let dim_width = RwSignal::new(String::new());
    let dim_height = RwSignal::new(String::new());

    let main_image = RwSignal::new(None::<ImagePayload>);
    let decal_image = RwSignal::new(None::<ImagePayload>);

    let state = RwSignal::new(StudioState::Idle);
    let error = RwSignal::new(None::<String>);
    let suggestions = RwSignal::new(Vec::<String>::new());
    let suggestion_seq = RwSignal::new(0u32);
    let show_refine = RwSignal::new(false);
    let (history_refresh, set_history_refresh) = signal(0u32);

    let is_generating = move || matches!(state.get(), StudioState::Generating);
    let feature = move || features::info(selected.0.get());
    let en = move || language.get() == "en";

    let reset_form = move || {
        prompt.set(String::new());
        negative_prompt.set(String::new());
        style_preset.set("none".to_string());
        aspect_ratio.set("1:1".to_string());
        detail_level.set("medium".to_string());
        drawing_scale.set("1:100".to_string());
        line_thickness.set("medium".to_string());
        line_style.set("solid".to_string());
        symbol_library.set("generic".to_string());
        start_date.set(String::new());
        end_date.set(String::new());
        worker_count.set(String::new());
        dim_length.set(String::new());
        dim_width.set(String::new());
        dim_height.set(String::new());
        main_image.set(None);
        decal_image.set(None);
        state.set(StudioState::Idle);
        error.set(None);
        suggestions.set(Vec::new());
        show_refine.set(false);
    };

    let select_feature = move |key: FeatureKey| {
        selected.0.set(key);
        reset_form();
    };

    // Assemble the settings bag for the active feature from the form state.
    let build_settings = move || {
        let info = feature();
        let mut settings = RenderSettings::default();

        if info.output == Output::Image && main_image.get().is_none() {
            let preset = style_preset.get();
            if preset != "none" {
                settings.style_preset = Some(preset);
            }
            let negative = negative_prompt.get();
            if !negative.trim().is_empty() {
                settings.negative_prompt = Some(negative);
            }
            settings.aspect_ratio = Some(aspect_ratio.get());
            settings.detail_level = Some(detail_level.get());
        }

        if info.key == FeatureKey::RealToTechDrawing {
            settings.drawing_scale = Some(drawing_scale.get());
            settings.line_thickness = Some(line_thickness.get());
            settings.line_style = Some(line_style.get());
            settings.symbol_library = Some(symbol_library.get());
        }

        if info.key == FeatureKey::TaskGenerator {
            let start = start_date.get();
            if !start.is_empty() {
                settings.start_date = Some(start);
            }
            let end = end_date.get();
            if !end.is_empty() {
                settings.end_date = Some(end);
            }
            settings.worker_count = worker_count.get().trim().parse().ok();
            settings.dimension_length = dim_length.get().trim().parse().ok();
            settings.dimension_width = dim_width.get().trim().parse().ok();
            settings.dimension_height = dim_height.get().trim().parse().ok();
        }

        settings
    };

    let on_generate = move |_| {
        if is_generating() {
            return;
        }
        error.set(None);
        state.set(StudioState::Generating);

        let request = GenerateRequest {
            feature: feature().key,
            prompt: prompt.get(),
            primary_image: main_image.get(),
            decal_image: decal_image.get(),
            settings: build_settings(),
        };
        let lang = language.get_untracked();

        spawn_local(async move {
            match commands::generate(request, &lang).await {
                Ok(GenerationOutcome::Image { data_url }) => {
                    state.set(StudioState::Image(data_url));
                    set_history_refresh.update(|n| *n += 1);
                }
                Ok(GenerationOutcome::Structured { payload }) => {
                    state.set(StudioState::Report(payload));
                }
                Err(e) => {
                    state.set(StudioState::Idle);
                    error.set(Some(e));
                }
            }
        });
    };

    // Fire-and-forget suggestions; a newer upload supersedes older results.
    let on_main_upload = Callback::new(move |image: ImagePayload| {
        let seq = suggestion_seq.get_untracked() + 1;
        suggestion_seq.set(seq);
        suggestions.set(Vec::new());

        let key = feature().key;
        let lang = language.get_untracked();
        spawn_local(async move {
            if let Ok(list) = commands::suggest_prompts(key, image, &lang).await {
                if suggestion_seq.get_untracked() == seq {
                    suggestions.set(list);
                }
            }
        });
    });

    let on_rerun = Callback::new(move |request: RerunRequest| {
        select_feature(request.feature);
        prompt.set(request.prompt);

        let s = request.settings;
        if let Some(v) = s.style_preset {
            style_preset.set(v);
        }
        if let Some(v) = s.negative_prompt {
            negative_prompt.set(v);
        }
        if let Some(v) = s.aspect_ratio {
            aspect_ratio.set(v);
        }
        if let Some(v) = s.detail_level {
            detail_level.set(v);
        }
        if let Some(v) = s.drawing_scale {
            drawing_scale.set(v);
        }
        if let Some(v) = s.line_thickness {
            line_thickness.set(v);
        }
        if let Some(v) = s.line_style {
            line_style.set(v);
        }
        if let Some(v) = s.symbol_library {
            symbol_library.set(v);
        }
        if let Some(v) = s.start_date {
            start_date.set(v);
        }
        if let Some(v) = s.end_date {
            end_date.set(v);
        }
        if let Some(v) = s.worker_count {
            worker_count.set(v.to_string());
        }
        if let Some(v) = s.dimension_length {
            dim_length.set(v.to_string());
        }
        if let Some(v) = s.dimension_width {
            dim_width.set(v.to_string());
        }
        if let Some(v) = s.dimension_height {
            dim_height.set(v.to_string());
        }
    });

    let navigate = use_navigate();

    view! {
        <div class="studio">
            <style>{include_str!("studio.css")}</style>

            <aside class="studio-sidebar">
                <div class="sidebar-header">
                    <h1 class="logo">"Arch-AI"</h1>
                </div>
                <ul class="nav-list">
                    {FEATURES.iter().map(|f| {
                        let key = f.key;
                        view! {
                            <li
                                class="nav-item"
                                class:nav-item-selected=move || selected.0.get() == key
                                on:click=move |_| select_feature(key)
                            >
                                {move || f.title(&language.get())}
                            </li>
                        }
                    }).collect::<Vec<_>>()}
                </ul>
                <div class="sidebar-footer">
                    <a href="/settings" class="nav-item nav-link">
                        {move || if en() { "Settings" } else { "Cài đặt" }}
                    </a>
                </div>
            </aside>

            <section class="studio-main">
                <header class="studio-header">
                    <div class="studio-header-left">
                        <button
                            class="back-button"
                            on:click=move |_| navigate("/", Default::default())
                        >
                            "←"
                        </button>
                        <div>
                            <h2 class="studio-title">{move || feature().title(&language.get())}</h2>
                            <p class="studio-description">{move || feature().description(&language.get())}</p>
                        </div>
                    </div>
                    <LangSwitcher />
                </header>

                <div class="studio-content">
                    <div class="input-panel">
                        // Uploaders: smart edit takes two images, others at most one.
                        {move || {
                            let info = feature();
                            if info.key == FeatureKey::SmartEdit {
                                view! {
                                    <ImageDrop
                                        label=Signal::derive(move || if en() {
                                            "Main Image to Edit".to_string()
                                        } else {
                                            "Ảnh chính cần chỉnh sửa".to_string()
                                        })
                                        input_id="main-image-input"
                                        image=main_image
                                        on_upload=on_main_upload
                                    />
                                    <ImageDrop
                                        label=Signal::derive(move || if en() {
                                            "Detail Image (Decal)".to_string()
                                        } else {
                                            "Ảnh Chi tiết (Decal)".to_string()
                                        })
                                        input_id="decal-image-input"
                                        image=decal_image
                                    />
                                }.into_any()
                            } else if info.image_upload != ImageUpload::None {
                                view! {
                                    <ImageDrop
                                        label=Signal::derive(move || feature().upload_label(&language.get()).to_string())
                                        input_id="main-image-input"
                                        image=main_image
                                        on_upload=on_main_upload
                                    />
                                }.into_any()
                            } else {
                                ().into_any()
                            }
                        }}

                        {move || (!suggestions.get().is_empty()).then(|| view! {
                            <div class="suggestion-chips">
                                {suggestions.get().into_iter().map(|s| {
                                    let fill = s.clone();
                                    view! {
                                        <button
                                            class="suggestion-chip"
                                            on:click=move |_| prompt.set(fill.clone())
                                        >
                                            {s}
                                        </button>
                                    }
                                }).collect::<Vec<_>>()}
                            </div>
                        })}

                        <label class="field-label" for="prompt-input">
                            {move || if en() { "Prompt" } else { "Yêu cầu" }}
                        </label>
                        <textarea
                            id="prompt-input"
                            class="input"
                            rows=5
                            placeholder=move || feature().placeholder(&language.get())
                            prop:value=move || prompt.get()
                            on:input=move |ev| prompt.set(event_target_value(&ev))
                        />

                        // Text-to-image options, shown while no image is attached.
                        {move || {
                            let info = feature();
                            (info.output == Output::Image
                                && info.key != FeatureKey::SmartEdit
                                && main_image.get().is_none())
                            .then(|| view! {
                                <div class="option-group">
                                    <label class="field-label">
                                        {move || if en() { "Style Preset" } else { "Phong cách" }}
                                    </label>
                                    <select
                                        class="input"
                                        prop:value=move || style_preset.get()
                                        on:change=move |ev| style_preset.set(event_target_value(&ev))
                                    >
                                        <option value="none">{move || if en() { "Default" } else { "Mặc định" }}</option>
                                        <option value="photorealistic">{move || if en() { "Photorealistic" } else { "Chân thực" }}</option>
                                        <option value="cartoon">{move || if en() { "Cartoon" } else { "Hoạt hình" }}</option>
                                        <option value="impressionist">{move || if en() { "Impressionist" } else { "Ấn tượng" }}</option>
                                        <option value="digital_art">{move || if en() { "Digital Art" } else { "Nghệ thuật số" }}</option>
                                        <option value="cinematic">{move || if en() { "Cinematic" } else { "Điện ảnh" }}</option>
                                    </select>

                                    <label class="field-label">
                                        {move || if en() { "Negative Prompt" } else { "Yêu cầu Phủ định" }}
                                    </label>
                                    <textarea
                                        class="input"
                                        rows=2
                                        placeholder=move || if en() {
                                            "Things to avoid in the image, e.g., text, red color, ugly"
                                        } else {
                                            "Những thứ cần tránh trong ảnh, ví dụ: văn bản, màu đỏ, xấu xí"
                                        }
                                        prop:value=move || negative_prompt.get()
                                        on:input=move |ev| negative_prompt.set(event_target_value(&ev))
                                    />

                                    <label class="field-label">
                                        {move || if en() { "Aspect Ratio" } else { "Tỷ lệ Khung hình" }}
                                    </label>
                                    <select
                                        class="input"
                                        prop:value=move || aspect_ratio.get()
                                        on:change=move |ev| aspect_ratio.set(event_target_value(&ev))
                                    >
                                        <option value="1:1">"1:1"</option>
                                        <option value="16:9">"16:9"</option>
                                        <option value="9:16">"9:16"</option>
                                        <option value="4:3">"4:3"</option>
                                        <option value="3:4">"3:4"</option>
                                    </select>

                                    <label class="field-label">
                                        {move || if en() { "Detail Level" } else { "Mức độ Chi tiết" }}
                                    </label>
                                    <select
                                        class="input"
                                        prop:value=move || detail_level.get()
                                        on:change=move |ev| detail_level.set(event_target_value(&ev))
                                    >
                                        <option value="low">{move || if en() { "Low" } else { "Thấp" }}</option>
                                        <option value="medium">{move || if en() { "Medium" } else { "Trung bình" }}</option>
                                        <option value="high">{move || if en() { "High" } else { "Cao" }}</option>
                                    </select>
                                </div>
                            })
                        }}

                        // Technical drawing options.
                        {move || (feature().key == FeatureKey::RealToTechDrawing).then(|| view! {
                            <div class="option-group">
                                <label class="field-label">
                                    {move || if en() { "Drawing Scale" } else { "Tỷ lệ Bản vẽ" }}
                                </label>
                                <input
                                    type="text"
                                    class="input"
                                    placeholder="e.g., 1:100, 1:50"
                                    prop:value=move || drawing_scale.get()
                                    on:input=move |ev| drawing_scale.set(event_target_value(&ev))
                                />

                                <label class="field-label">
                                    {move || if en() { "Line Thickness" } else { "Độ dày Nét vẽ" }}
                                </label>
                                <select
                                    class="input"
                                    prop:value=move || line_thickness.get()
                                    on:change=move |ev| line_thickness.set(event_target_value(&ev))
                                >
                                    <option value="thin">{move || if en() { "Thin" } else { "Mỏng" }}</option>
                                    <option value="medium">{move || if en() { "Medium" } else { "Vừa" }}</option>
                                    <option value="thick">{move || if en() { "Thick" } else { "Dày" }}</option>
                                </select>

                                <label class="field-label">
                                    {move || if en() { "Line Style" } else { "Kiểu Nét vẽ" }}
                                </label>
                                <select
                                    class="input"
                                    prop:value=move || line_style.get()
                                    on:change=move |ev| line_style.set(event_target_value(&ev))
                                >
                                    <option value="solid">{move || if en() { "Solid" } else { "Nét liền" }}</option>
                                    <option value="dashed">{move || if en() { "Dashed" } else { "Nét đứt" }}</option>
                                    <option value="dotted">{move || if en() { "Dotted" } else { "Nét chấm" }}</option>
                                </select>

                                <label class="field-label">
                                    {move || if en() { "Symbol Library" } else { "Thư viện Ký hiệu" }}
                                </label>
                                <select
                                    class="input"
                                    prop:value=move || symbol_library.get()
                                    on:change=move |ev| symbol_library.set(event_target_value(&ev))
                                >
                                    <option value="generic">{move || if en() { "Generic" } else { "Chung" }}</option>
                                    <option value="ansi">"ANSI"</option>
                                    <option value="iso">"ISO"</option>
                                </select>
                            </div>
                        })}

                        // Task generator options.
                        {move || (feature().key == FeatureKey::TaskGenerator).then(|| view! {
                            <div class="option-group">
                                <div class="field-row">
                                    <div>
                                        <label class="field-label">
                                            {move || if en() { "Start Date" } else { "Ngày Bắt đầu" }}
                                        </label>
                                        <input
                                            type="date"
                                            class="input"
                                            prop:value=move || start_date.get()
                                            on:input=move |ev| start_date.set(event_target_value(&ev))
                                        />
                                    </div>
                                    <div>
                                        <label class="field-label">
                                            {move || if en() { "End Date" } else { "Ngày Kết thúc" }}
                                        </label>
                                        <input
                                            type="date"
                                            class="input"
                                            prop:value=move || end_date.get()
                                            on:input=move |ev| end_date.set(event_target_value(&ev))
                                        />
                                    </div>
                                </div>

                                <label class="field-label">
                                    {move || if en() { "Number of Workers" } else { "Số lượng Nhân công" }}
                                </label>
                                <input
                                    type="number"
                                    class="input"
                                    min=0
                                    prop:value=move || worker_count.get()
                                    on:input=move |ev| worker_count.set(event_target_value(&ev))
                                />

                                <label class="field-label">
                                    {move || if en() { "Actual Dimensions (meters)" } else { "Kích thước thực tế (mét)" }}
                                </label>
                                <div class="field-row">
                                    <input
                                        type="number"
                                        class="input"
                                        placeholder=move || if en() { "Length" } else { "Dài" }
                                        prop:value=move || dim_length.get()
                                        on:input=move |ev| dim_length.set(event_target_value(&ev))
                                    />
                                    <input
                                        type="number"
                                        class="input"
                                        placeholder=move || if en() { "Width" } else { "Rộng" }
                                        prop:value=move || dim_width.get()
                                        on:input=move |ev| dim_width.set(event_target_value(&ev))
                                    />
                                    <input
                                        type="number"
                                        class="input"
                                        placeholder=move || if en() { "Height" } else { "Cao" }
                                        prop:value=move || dim_height.get()
                                        on:input=move |ev| dim_height.set(event_target_value(&ev))
                                    />
                                </div>
                            </div>
                        })}

                        <button
                            class="btn btn-primary generate-btn"
                            disabled=move || is_generating()
                            on:click=on_generate
                        >
                            {move || match (is_generating(), en()) {
                                (true, true) => "Generating...",
                                (true, false) => "Đang tạo...",
                                (false, true) => "Generate",
                                (false, false) => "Tạo",
                            }}
                        </button>
                        {move || error.get().map(|e| view! { <p class="error-text">{e}</p> })}
                    </div>

                    <div class="output-panel">
                        {move || match state.get() {
                            StudioState::Idle => view! {
                                <p class="placeholder-text">
                                    {move || if en() {
                                        "Your result will appear here."
                                    } else {
                                        "Kết quả của bạn sẽ xuất hiện ở đây."
                                    }}
                                </p>
                            }.into_any(),

                            StudioState::Generating => view! {
                                <div class="loading-indicator">
                                    <div class="spinner"></div>
                                    <p>{move || if en() {
                                        "Architecting your vision..."
                                    } else {
                                        "Kiến tạo tầm nhìn của bạn..."
                                    }}</p>
                                </div>
                            }.into_any(),

                            StudioState::Image(data_url) => {
                                let refine_url = data_url.clone();
                                view! {
                                    <div class="generated-image-wrap">
                                        <img src=data_url.clone() class="generated-image" alt="Generated result" />
                                        <div class="image-actions">
                                            <a
                                                class="btn btn-secondary"
                                                href=data_url
                                                download="arch-ai-render.jpg"
                                            >
                                                {move || if en() { "Download Image" } else { "Tải xuống Ảnh" }}
                                            </a>
                                            <button
                                                class="btn btn-secondary"
                                                on:click=move |_| show_refine.set(true)
                                            >
                                                {move || if en() { "Edit Image" } else { "Chỉnh sửa Ảnh" }}
                                            </button>
                                        </div>

                                        {move || show_refine.get().then(|| {
                                            let url = refine_url.clone();
                                            view! {
                                                <RefineDialog
                                                    image_data_url=url
                                                    language=language.get()
                                                    on_accepted=Callback::new(move |new_url: String| {
                                                        show_refine.set(false);
                                                        state.set(StudioState::Image(new_url));
                                                        set_history_refresh.update(|n| *n += 1);
                                                    })
                                                    on_close=Callback::new(move |_| show_refine.set(false))
                                                />
                                            }
                                        })}
                                    </div>
                                }.into_any()
                            }

                            StudioState::Report(payload) => view! {
                                <ReportTable payload=payload language=language.get() />
                            }.into_any(),
                        }}
                    </div>
                </div>
            </section>

            <HistoryPanel refresh=history_refresh language=language on_rerun=on_rerun />
        </div>
    }
}
