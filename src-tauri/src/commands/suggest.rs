//! Prompt-suggestion command, called fire-and-forget after an image upload.

use super::{settings::gemini_api_key, ImagePayload};
use crate::features::FeatureKey;
use crate::prompts::Language;
use crate::suggest;

#[tauri::command]
pub async fn suggest_prompts(
    feature: FeatureKey,
    image: ImagePayload,
    language: String,
) -> Result<Vec<String>, String> {
    let api_key = gemini_api_key()?;
    let language = Language::from_code(&language);
    let encoded = image.into_encoded()?;

    suggest::suggest_prompts(&api_key, feature, &encoded, language)
        .await
        .map_err(String::from)
}
