//! VI/EN language toggle. The choice is persisted through preferences so it
//! survives restarts.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::LanguageContext;
use crate::commands;

#[component]
pub fn LangSwitcher() -> impl IntoView {
    let ctx = expect_context::<LanguageContext>();

    let choose = move |code: &'static str| {
        ctx.set_language.set(code.to_string());
        spawn_local(async move {
            let _ = commands::set_language(code).await;
        });
    };

    view! {
        <div class="lang-switcher">
            <button
                class="lang-btn"
                class:lang-btn-active=move || ctx.language.get() == "vi"
                on:click=move |_| choose("vi")
            >
                "VI"
            </button>
            <button
                class="lang-btn"
                class:lang-btn-active=move || ctx.language.get() == "en"
                on:click=move |_| choose("en")
            >
                "EN"
            </button>
        </div>
    }
}
