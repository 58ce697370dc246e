//! Render history panel: newest-first list of completed generations with a
//! re-run action that restores the prompt and settings (never the image).

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, HistoryEntry, RerunRequest};

#[component]
pub fn HistoryPanel(
    /// Bumped by the parent after each recorded generation.
    refresh: ReadSignal<u32>,
    language: ReadSignal<String>,
    on_rerun: Callback<RerunRequest>,
) -> impl IntoView {
    let (entries, set_entries) = signal::<Vec<HistoryEntry>>(Vec::new());

    Effect::new(move |_| {
        let _ = refresh.get();
        spawn_local(async move {
            if let Ok(list) = commands::list_history().await {
                set_entries.set(list);
            }
        });
    });

    let title = move || {
        if language.get() == "en" { "Render History" } else { "Lịch sử Kết xuất" }
    };
    let empty_text = move || {
        if language.get() == "en" { "No renders yet." } else { "Chưa có bản kết xuất nào." }
    };
    let rerun_label = move || {
        if language.get() == "en" { "Re-run" } else { "Chạy lại" }
    };

    view! {
        <aside class="history-panel">
            <style>{include_str!("history_panel.css")}</style>
            <h3 class="history-title">{title}</h3>

            {move || {
                let list = entries.get();
                if list.is_empty() {
                    view! { <p class="history-empty">{empty_text()}</p> }.into_any()
                } else {
                    view! {
                        <ul class="history-list">
                            {list.into_iter().map(|entry| {
                                let id = entry.id;
                                view! {
                                    <li class="history-item">
                                        <img src=entry.image_data_url class="history-image" alt="History item" />
                                        <h4 class="history-item-title">{entry.feature_title}</h4>
                                        <p class="history-item-prompt">{entry.prompt}</p>
                                        <div class="history-item-footer">
                                            <small class="history-timestamp">{entry.created_at}</small>
                                            <button
                                                class="btn btn-small btn-secondary"
                                                on:click=move |_| {
                                                    spawn_local(async move {
                                                        if let Ok(request) = commands::rerun_entry(id).await {
                                                            on_rerun.run(request);
                                                        }
                                                    });
                                                }
                                            >
                                                {rerun_label()}
                                            </button>
                                        </div>
                                    </li>
                                }
                            }).collect::<Vec<_>>()}
                        </ul>
                    }.into_any()
                }
            }}
        </aside>
    }
}
