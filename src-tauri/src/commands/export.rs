//! Report export command.

use serde::Serialize;

use crate::export;
use crate::prompts::Language;
use crate::validation::StructuredPayload;

/// A rendered export, ready for the frontend to offer as a download.
#[derive(Debug, Serialize)]
pub struct ExportedReport {
    pub file_name: String,
    pub content: String,
}

#[tauri::command]
pub fn export_report(
    payload: StructuredPayload,
    language: String,
) -> Result<ExportedReport, String> {
    let language = Language::from_code(&language);
    Ok(ExportedReport {
        file_name: export::file_name(&payload).to_string(),
        content: export::to_csv(&payload, language),
    })
}
