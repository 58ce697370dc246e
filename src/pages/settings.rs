//! Settings: Gemini API key storage.
//!
//! The key lives in the OS keychain on the backend; this page only ever
//! learns whether one is present.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::app::LanguageContext;
use crate::commands;
use crate::components::lang_switcher::LangSwitcher;

#[component]
pub fn SettingsPage() -> impl IntoView {
    let lang_ctx = expect_context::<LanguageContext>();
    let en = move || lang_ctx.language.get() == "en";

    let key_input = RwSignal::new(String::new());
    let has_key = RwSignal::new(false);
    let status = RwSignal::new(None::<String>);

    let refresh_status = move || {
        spawn_local(async move {
            if let Ok(present) = commands::api_key_present().await {
                has_key.set(present);
            }
        });
    };
    refresh_status();

    let on_save = move |_| {
        let key = key_input.get();
        if key.trim().is_empty() {
            return;
        }
        spawn_local(async move {
            match commands::set_api_key(key.trim()).await {
                Ok(()) => {
                    key_input.set(String::new());
                    has_key.set(true);
                    status.set(Some("Saved.".to_string()));
                }
                Err(e) => status.set(Some(e)),
            }
        });
    };

    let on_delete = move |_| {
        spawn_local(async move {
            match commands::delete_api_key().await {
                Ok(()) => {
                    has_key.set(false);
                    status.set(Some("Removed.".to_string()));
                }
                Err(e) => status.set(Some(e)),
            }
        });
    };

    let navigate = use_navigate();

    view! {
        <div class="settings-page">
            <style>{include_str!("settings.css")}</style>
            <header class="settings-header">
                <button
                    class="back-button"
                    on:click=move |_| navigate("/", Default::default())
                >
                    "←"
                </button>
                <h2>{move || if en() { "Settings" } else { "Cài đặt" }}</h2>
                <LangSwitcher />
            </header>

            <section class="settings-card">
                <h3>"Gemini API Key"</h3>
                <p class="settings-hint">
                    {move || if en() {
                        "Stored in the system keychain. Required for all generation features."
                    } else {
                        "Được lưu trong keychain hệ thống. Bắt buộc cho mọi tính năng tạo ảnh."
                    }}
                </p>
                <p class="settings-status">
                    {move || match (has_key.get(), en()) {
                        (true, true) => "An API key is configured.",
                        (true, false) => "Đã cấu hình API key.",
                        (false, true) => "No API key configured yet.",
                        (false, false) => "Chưa có API key.",
                    }}
                </p>
                <div class="settings-row">
                    <input
                        type="password"
                        class="input"
                        placeholder="AIza..."
                        prop:value=move || key_input.get()
                        on:input=move |ev| key_input.set(event_target_value(&ev))
                    />
                    <button class="btn btn-primary" on:click=on_save>
                        {move || if en() { "Save" } else { "Lưu" }}
                    </button>
                    <button class="btn btn-secondary" on:click=on_delete>
                        {move || if en() { "Remove" } else { "Xóa" }}
                    </button>
                </div>
                {move || status.get().map(|s| view! { <p class="settings-message">{s}</p> })}
            </section>
        </div>
    }
}
