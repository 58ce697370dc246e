mod commands;
pub mod dispatch;
mod error;
pub mod export;
pub mod features;
pub mod gemini;
pub mod history;
pub mod media;
pub mod prompts;
pub mod refine;
pub mod suggest;
pub mod validation;

pub use error::StudioError;

pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tauri::Builder::default()
        .plugin(tauri_plugin_store::Builder::new().build())
        .manage(history::HistoryState::default())
        .invoke_handler(tauri::generate_handler![
            commands::generate::generate,
            commands::refine::refine_image,
            commands::refine::accept_refinement,
            commands::history::list_history,
            commands::history::rerun_entry,
            commands::suggest::suggest_prompts,
            commands::export::export_report,
            commands::settings::set_api_key,
            commands::settings::api_key_present,
            commands::settings::delete_api_key,
            commands::settings::get_language,
            commands::settings::set_language,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
