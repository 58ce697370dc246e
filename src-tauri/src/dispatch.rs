//! Request validation and dispatch to the correct generation capability.
//!
//! Per invocation: validate preconditions, pick the capability from the
//! feature's output kind and attached images, call it, and normalize the
//! result into a `GenerationOutcome`. Validation always runs before any
//! remote call, so an invalid request never leaves the process.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::StudioError;
use crate::features::{self, Feature, FeatureKey, ImageRequirement, OutputKind};
use crate::gemini;
use crate::media::EncodedImage;
use crate::prompts::{self, Language};
use crate::validation::{self, SchemaKind};

/// Everything the user can tune per invocation, kept verbatim in history so
/// a rerun reproduces the exact same request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    // text-to-image
    pub style_preset: Option<String>,
    pub negative_prompt: Option<String>,
    pub aspect_ratio: Option<String>,
    pub detail_level: Option<String>,
    // technical drawing
    pub drawing_scale: Option<String>,
    pub line_thickness: Option<String>,
    pub line_style: Option<String>,
    pub symbol_library: Option<String>,
    // task generator
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub worker_count: Option<u32>,
    pub dimension_length: Option<f64>,
    pub dimension_width: Option<f64>,
    pub dimension_height: Option<f64>,
}

/// One generation request, assembled by the controller from UI state.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub feature: FeatureKey,
    pub prompt: String,
    pub primary_image: Option<EncodedImage>,
    pub decal_image: Option<EncodedImage>,
    pub settings: RenderSettings,
}

/// Normalized result of a successful invocation. Failures are `StudioError`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationOutcome {
    Image { data_url: String },
    Structured { payload: validation::StructuredPayload },
}

/// Precondition checks. Rejections here are `Validation` errors: shown
/// inline, fully recoverable, and guaranteed to precede any remote call.
pub fn validate(feature: &Feature, request: &GenerationRequest) -> Result<(), StudioError> {
    if request.prompt.trim().is_empty() {
        return Err(StudioError::validation("Please enter a prompt."));
    }

    if feature.key == FeatureKey::SmartEdit {
        if request.primary_image.is_none() || request.decal_image.is_none() {
            return Err(StudioError::validation(
                "Please upload both the main image and the detail image for this feature.",
            ));
        }
        return Ok(());
    }

    if feature.image_requirement == ImageRequirement::Required && request.primary_image.is_none() {
        return Err(StudioError::validation(
            "Please upload an image for this feature.",
        ));
    }

    Ok(())
}

/// Validate and dispatch one request, returning the normalized outcome.
pub async fn dispatch(
    api_key: &str,
    language: Language,
    request: &GenerationRequest,
) -> Result<GenerationOutcome, StudioError> {
    let feature = features::lookup(request.feature);
    validate(&feature, request)?;

    info!("Dispatching {:?} generation", feature.key);

    if feature.key == FeatureKey::SmartEdit {
        let (Some(primary), Some(decal)) = (&request.primary_image, &request.decal_image) else {
            return Err(StudioError::validation(
                "Please upload both the main image and the detail image for this feature.",
            ));
        };
        return dispatch_smart_edit(api_key, primary, decal, &request.prompt).await;
    }

    match feature.output_kind {
        OutputKind::StructuredText => dispatch_structured(api_key, language, &feature, request).await,
        OutputKind::Image => match &request.primary_image {
            Some(image) => dispatch_image_edit(api_key, language, request, image).await,
            None => dispatch_text_to_image(api_key, request).await,
        },
    }
}

/// Composite edit: exactly two images, ordered (primary, decal), plus the
/// fixed template sentence.
async fn dispatch_smart_edit(
    api_key: &str,
    primary: &EncodedImage,
    decal: &EncodedImage,
    prompt: &str,
) -> Result<GenerationOutcome, StudioError> {
    let instruction = prompts::smart_edit_instruction(prompt);

    let image = gemini::edit_image(api_key, &[primary, decal], &instruction).await?;
    Ok(GenerationOutcome::Image {
        data_url: image.to_data_url(),
    })
}

async fn dispatch_structured(
    api_key: &str,
    language: Language,
    feature: &Feature,
    request: &GenerationRequest,
) -> Result<GenerationOutcome, StudioError> {
    let (kind, system_instruction, schema) = match feature.key {
        FeatureKey::CostCalculation => (
            SchemaKind::CostReport,
            prompts::cost_system_instruction(language),
            prompts::cost_report_schema(),
        ),
        FeatureKey::TaskGenerator => (
            SchemaKind::TaskPlan,
            prompts::task_system_instruction(language, &request.settings),
            prompts::task_plan_schema(),
        ),
        _ => unreachable!("only cost and task features produce structured text"),
    };

    // Only features that allow an upload may attach one.
    let image = match feature.image_requirement {
        ImageRequirement::None => None,
        _ => request.primary_image.as_ref(),
    };

    let json = gemini::generate_structured(
        api_key,
        &request.prompt,
        image,
        &system_instruction,
        &schema,
    )
    .await?;
    let payload = validation::validate(&json, kind)?;

    Ok(GenerationOutcome::Structured { payload })
}

async fn dispatch_image_edit(
    api_key: &str,
    language: Language,
    request: &GenerationRequest,
    image: &EncodedImage,
) -> Result<GenerationOutcome, StudioError> {
    let instruction =
        prompts::image_instruction(request.feature, &request.prompt, &request.settings, language);

    let result = gemini::edit_image(api_key, &[image], &instruction).await?;
    Ok(GenerationOutcome::Image {
        data_url: result.to_data_url(),
    })
}

async fn dispatch_text_to_image(
    api_key: &str,
    request: &GenerationRequest,
) -> Result<GenerationOutcome, StudioError> {
    let final_prompt = prompts::text_to_image_prompt(&request.prompt, &request.settings);
    let aspect_ratio = request.settings.aspect_ratio.as_deref().unwrap_or("1:1");

    let images = gemini::generate_images(
        api_key,
        &final_prompt,
        request.settings.negative_prompt.as_deref(),
        aspect_ratio,
        1,
    )
    .await?;

    // sampleCount is 1; the first image is the result.
    let image = images.into_iter().next().ok_or(StudioError::NoImageGenerated)?;
    Ok(GenerationOutcome::Image {
        data_url: image.to_data_url(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(feature: FeatureKey) -> GenerationRequest {
        GenerationRequest {
            feature,
            prompt: "glass villa at sunset".to_string(),
            primary_image: None,
            decal_image: None,
            settings: RenderSettings::default(),
        }
    }

    fn stub_image() -> EncodedImage {
        EncodedImage {
            data: "QUJD".to_string(),
            mime_type: "image/jpeg".to_string(),
        }
    }

    #[test]
    fn test_validate_rejects_empty_prompt() {
        let mut req = request(FeatureKey::SurrealExterior);
        req.prompt = "   ".to_string();
        let feature = features::lookup(req.feature);
        let result = validate(&feature, &req);
        assert!(matches!(result, Err(StudioError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_missing_required_image() {
        for key in [
            FeatureKey::InstantInterior,
            FeatureKey::MasterPlan,
            FeatureKey::SketchupFinalize,
            FeatureKey::PlanTo3d,
            FeatureKey::RealToTechDrawing,
        ] {
            let feature = features::lookup(key);
            let result = validate(&feature, &request(key));
            assert!(
                matches!(result, Err(StudioError::Validation(_))),
                "{:?} must require an image",
                key
            );
        }
    }

    #[test]
    fn test_validate_accepts_optional_without_image() {
        for key in [
            FeatureKey::SurrealExterior,
            FeatureKey::CostCalculation,
            FeatureKey::TaskGenerator,
        ] {
            let feature = features::lookup(key);
            assert!(validate(&feature, &request(key)).is_ok(), "{:?}", key);
        }
    }

    #[test]
    fn test_validate_smart_edit_needs_both_images() {
        let feature = features::lookup(FeatureKey::SmartEdit);

        let mut only_primary = request(FeatureKey::SmartEdit);
        only_primary.primary_image = Some(stub_image());
        assert!(validate(&feature, &only_primary).is_err());

        let mut only_decal = request(FeatureKey::SmartEdit);
        only_decal.decal_image = Some(stub_image());
        assert!(validate(&feature, &only_decal).is_err());

        let mut both = request(FeatureKey::SmartEdit);
        both.primary_image = Some(stub_image());
        both.decal_image = Some(stub_image());
        assert!(validate(&feature, &both).is_ok());
    }

    #[tokio::test]
    async fn test_dispatch_rejects_before_any_remote_call() {
        // An invalid key would make any HTTP attempt fail differently; a
        // Validation error proves the request never left validation.
        let result = dispatch(
            "invalid-key",
            Language::En,
            &request(FeatureKey::InstantInterior),
        )
        .await;
        assert!(matches!(result, Err(StudioError::Validation(_))));
    }

    #[test]
    fn test_settings_serde_round_trip() {
        let mut settings = RenderSettings::default();
        settings.style_preset = Some("cinematic".to_string());
        settings.aspect_ratio = Some("16:9".to_string());
        settings.worker_count = Some(5);
        settings.dimension_length = Some(12.5);

        let json = serde_json::to_string(&settings).unwrap();
        let back: RenderSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
