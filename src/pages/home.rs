//! Landing page: one card per tool.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::{LanguageContext, SelectedFeature};
use crate::components::lang_switcher::LangSwitcher;
use crate::features::FEATURES;

#[component]
pub fn HomePage() -> impl IntoView {
    let lang_ctx = expect_context::<LanguageContext>();
    let selected = expect_context::<SelectedFeature>();

    let title = move || {
        if lang_ctx.language.get() == "en" {
            "AI Architectural Design Suite"
        } else {
            "Bộ công cụ Thiết kế Kiến trúc AI"
        }
    };
    let subtitle = move || {
        if lang_ctx.language.get() == "en" {
            "Select a specialized tool to bring your vision to life."
        } else {
            "Chọn một công cụ chuyên biệt để biến tầm nhìn của bạn thành hiện thực."
        }
    };

    view! {
        <div class="home-page">
            <style>{include_str!("home.css")}</style>
            <header class="home-header">
                <div class="home-header-actions">
                    <LangSwitcher />
                    <a href="/settings" class="btn btn-secondary btn-small">
                        {move || if lang_ctx.language.get() == "en" { "Settings" } else { "Cài đặt" }}
                    </a>
                </div>
                <h1 class="home-title">{title}</h1>
                <p class="home-subtitle">{subtitle}</p>
            </header>

            <div class="services-grid">
                {FEATURES.iter().map(|feature| {
                    let key = feature.key;
                    let navigate = use_navigate();
                    view! {
                        <div
                            class="service-card"
                            on:click=move |_| {
                                selected.0.set(key);
                                navigate("/studio", Default::default());
                            }
                        >
                            <h3 class="service-card-title">
                                {move || feature.title(&lang_ctx.language.get())}
                            </h3>
                            <p class="service-card-description">
                                {move || feature.description(&lang_ctx.language.get())}
                            </p>
                        </div>
                    }
                }).collect::<Vec<_>>()}
            </div>
        </div>
    }
}
