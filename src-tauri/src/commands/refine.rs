//! Refinement commands: run a refinement round, accept the result.

use tauri::State;
use tracing::info;

use super::{settings::gemini_api_key, ImagePayload};
use crate::history::HistoryState;
use crate::prompts::Language;
use crate::refine;

/// Run one refinement round against the current generated image. Returns the
/// candidate image as a data URL; nothing is recorded until the user accepts.
#[tauri::command]
pub async fn refine_image(
    image_data_url: String,
    instruction: String,
    decal_image: Option<ImagePayload>,
) -> Result<String, String> {
    let api_key = gemini_api_key()?;
    let decal = decal_image.map(ImagePayload::into_encoded).transpose()?;

    let refined = refine::refine(&api_key, &image_data_url, &instruction, decal.as_ref()).await?;
    Ok(refined.to_data_url())
}

/// Accept a refinement: replace the image and prompt of the most recent
/// history entry, annotating the prompt with the localized refined marker.
#[tauri::command]
pub fn accept_refinement(
    state: State<'_, HistoryState>,
    image_data_url: String,
    instruction: String,
    language: String,
) -> Result<(), String> {
    let language = Language::from_code(&language);
    let annotated = refine::refined_prompt(&instruction, language);

    let mut history = state.0.lock().map_err(|_| "history state poisoned")?;
    history.replace_head(image_data_url, annotated)?;
    info!("Refinement accepted; history head replaced");
    Ok(())
}
