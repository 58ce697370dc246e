//! The main generation command.
//!
//! Builds a `GenerationRequest` from the IPC payload, dispatches it, and on
//! an image success records a history entry with the settings bag active at
//! invocation time. Structured-text successes are returned without touching
//! the ledger.

use serde::Deserialize;
use tauri::State;
use tracing::info;

use super::{settings::gemini_api_key, ImagePayload};
use crate::dispatch::{self, GenerationOutcome, GenerationRequest, RenderSettings};
use crate::features::FeatureKey;
use crate::history::{HistoryState, RenderHistory};
use crate::prompts::{self, Language};

/// Generation request as sent by the frontend.
#[derive(Debug, Deserialize)]
pub struct GenerateArgs {
    pub feature: FeatureKey,
    pub prompt: String,
    pub primary_image: Option<ImagePayload>,
    pub decal_image: Option<ImagePayload>,
    #[serde(default)]
    pub settings: RenderSettings,
}

#[tauri::command]
pub async fn generate(
    state: State<'_, HistoryState>,
    request: GenerateArgs,
    language: String,
) -> Result<GenerationOutcome, String> {
    let language = Language::from_code(&language);
    let api_key = gemini_api_key()?;

    let primary_image = request
        .primary_image
        .map(ImagePayload::into_encoded)
        .transpose()?;
    let decal_image = request
        .decal_image
        .map(ImagePayload::into_encoded)
        .transpose()?;

    let generation = GenerationRequest {
        feature: request.feature,
        prompt: request.prompt,
        primary_image,
        decal_image,
        settings: request.settings,
    };

    let outcome = dispatch::dispatch(&api_key, language, &generation).await?;

    {
        let mut history = state.0.lock().map_err(|_| "history state poisoned")?;
        record_outcome(&mut history, &generation, &outcome, language);
    }

    Ok(outcome)
}

/// Ledger recording rule: image successes append exactly one entry at the
/// head; structured-text successes leave history untouched. Split out so the
/// rule is testable without a remote call.
pub fn record_outcome(
    history: &mut RenderHistory,
    request: &GenerationRequest,
    outcome: &GenerationOutcome,
    language: Language,
) -> Option<u64> {
    match outcome {
        GenerationOutcome::Image { data_url } => {
            let id = history.append(
                request.feature,
                prompts::feature_title(request.feature, language).to_string(),
                request.prompt.clone(),
                data_url.clone(),
                request.settings.clone(),
            );
            info!("Recorded history entry {} for {:?}", id, request.feature);
            Some(id)
        }
        GenerationOutcome::Structured { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{CostReport, CostSummary, StructuredPayload};

    fn image_request() -> GenerationRequest {
        GenerationRequest {
            feature: FeatureKey::SurrealExterior,
            prompt: "glass villa at sunset".to_string(),
            primary_image: None,
            decal_image: None,
            settings: RenderSettings {
                style_preset: Some("cinematic".to_string()),
                detail_level: Some("high".to_string()),
                aspect_ratio: Some("16:9".to_string()),
                ..RenderSettings::default()
            },
        }
    }

    fn image_outcome() -> GenerationOutcome {
        GenerationOutcome::Image {
            data_url: "data:image/jpeg;base64,QUJD".to_string(),
        }
    }

    fn structured_outcome() -> GenerationOutcome {
        GenerationOutcome::Structured {
            payload: StructuredPayload::CostReport(CostReport {
                currency: "USD".to_string(),
                summary: CostSummary {
                    total_area: 100.0,
                    total_cost: 50000.0,
                },
                breakdown: Vec::new(),
            }),
        }
    }

    #[test]
    fn test_image_success_appends_exactly_one_entry_at_head() {
        let mut history = RenderHistory::new();
        let id = record_outcome(&mut history, &image_request(), &image_outcome(), Language::En);
        assert!(id.is_some());

        let entries = history.list();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].feature, FeatureKey::SurrealExterior);
        assert_eq!(entries[0].feature_title, "Surreal Exterior Render");
        assert_eq!(entries[0].settings, image_request().settings);
    }

    #[test]
    fn test_structured_success_leaves_history_untouched() {
        let mut history = RenderHistory::new();
        let before = history.len();

        let mut request = image_request();
        request.feature = FeatureKey::CostCalculation;
        let id = record_outcome(&mut history, &request, &structured_outcome(), Language::En);

        assert!(id.is_none());
        assert_eq!(history.len(), before);
    }

    #[test]
    fn test_recorded_settings_survive_rerun_round_trip() {
        let mut history = RenderHistory::new();
        let request = image_request();
        let id = record_outcome(&mut history, &request, &image_outcome(), Language::Vi)
            .expect("image outcomes are recorded");

        let rerun = history.rerun(id).unwrap();
        assert_eq!(rerun.feature, request.feature);
        assert_eq!(rerun.prompt, request.prompt);
        assert_eq!(rerun.settings, request.settings);
    }

    #[test]
    fn test_title_is_captured_in_active_language() {
        let mut history = RenderHistory::new();
        record_outcome(&mut history, &image_request(), &image_outcome(), Language::Vi);
        assert_eq!(history.list()[0].feature_title, "Render Ngoại thất Siêu thực");
    }
}
