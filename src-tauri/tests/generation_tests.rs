//! Cross-module scenarios for the generation pipeline: validation gating,
//! prompt assembly, structured-output validation, and the history ledger.

use archai_tauri::dispatch::{self, GenerationRequest, RenderSettings};
use archai_tauri::features::{self, FeatureKey, ImageRequirement};
use archai_tauri::history::RenderHistory;
use archai_tauri::media::EncodedImage;
use archai_tauri::prompts::{self, Language};
use archai_tauri::validation::{self, SchemaKind, StructuredPayload};
use serde_json::json;

fn request(feature: FeatureKey, prompt: &str) -> GenerationRequest {
    GenerationRequest {
        feature,
        prompt: prompt.to_string(),
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
fn required_image_features_never_pass_validation_without_one() {
    for feature in features::all() {
        if feature.image_requirement != ImageRequirement::Required {
            continue;
        }
        let result = dispatch::validate(feature, &request(feature.key, "a prompt"));
        assert!(result.is_err(), "{:?} must reject without an image", feature.key);
    }
}

#[test]
fn smart_edit_rejects_single_image() {
    let feature = features::lookup(FeatureKey::SmartEdit);

    let mut req = request(FeatureKey::SmartEdit, "apply this tile pattern to the facade");
    req.primary_image = Some(stub_image());
    assert!(dispatch::validate(&feature, &req).is_err());

    req.decal_image = Some(stub_image());
    assert!(dispatch::validate(&feature, &req).is_ok());
}

#[test]
fn exterior_render_scenario_assembles_expected_prompt() {
    // feature = exterior render, no image, cinematic style, high detail.
    let settings = RenderSettings {
        style_preset: Some("cinematic".to_string()),
        detail_level: Some("high".to_string()),
        aspect_ratio: Some("16:9".to_string()),
        ..RenderSettings::default()
    };

    let prompt = prompts::text_to_image_prompt("glass villa at sunset", &settings);
    assert_eq!(
        prompt,
        "A cinematic, dramatic, wide-angle shot of glass villa at sunset, intricate details, hyper-detailed, sharp focus"
    );
}

#[test]
fn smart_edit_scenario_composes_template_sentence() {
    let instruction = prompts::smart_edit_instruction("apply this tile pattern to the facade");
    assert!(instruction.contains("the second image"));
    assert!(instruction.contains("\"apply this tile pattern to the facade\""));
}

#[test]
fn task_scenario_without_dimensions_has_no_dimension_clause() {
    let settings = RenderSettings {
        start_date: Some("2024-01-01".to_string()),
        end_date: Some("2024-01-31".to_string()),
        worker_count: Some(5),
        ..RenderSettings::default()
    };
    let instruction = prompts::task_system_instruction(Language::En, &settings);
    assert!(instruction.contains("2024-01-01"));
    assert!(instruction.contains("5 workers"));
    assert!(!instruction.contains("dimensions"));
}

#[test]
fn task_response_missing_worker_breakdown_is_malformed() {
    let response = json!({ "projectName": "Villa refit" });
    assert!(validation::validate(&response, SchemaKind::TaskPlan).is_err());
}

#[test]
fn cost_response_round_trip_through_validator() {
    let response = json!({
        "currency": "VND",
        "summary": { "total_area": 200.0, "total_cost": 4500000000.0 },
        "breakdown": []
    });
    let payload = validation::validate(&response, SchemaKind::CostReport).unwrap();
    let StructuredPayload::CostReport(report) = payload else {
        panic!("expected cost report");
    };
    assert_eq!(report.currency, "VND");
    assert!(report.breakdown.is_empty());
}

#[test]
fn ledger_append_and_rerun_round_trip() {
    let mut history = RenderHistory::new();
    let settings = RenderSettings {
        style_preset: Some("cinematic".to_string()),
        detail_level: Some("high".to_string()),
        aspect_ratio: Some("16:9".to_string()),
        ..RenderSettings::default()
    };

    let id = history.append(
        FeatureKey::SurrealExterior,
        prompts::feature_title(FeatureKey::SurrealExterior, Language::En).to_string(),
        "glass villa at sunset".to_string(),
        "data:image/jpeg;base64,QUJD".to_string(),
        settings.clone(),
    );

    assert_eq!(history.list()[0].id, id);

    let rerun = history.rerun(id).unwrap();
    assert_eq!(rerun.settings, settings);
    assert_eq!(rerun.prompt, "glass villa at sunset");
    // The settings bag round-trips; the image deliberately does not.
}

#[test]
fn failed_validation_leaves_ledger_untouched() {
    let history = RenderHistory::new();
    let feature = features::lookup(FeatureKey::InstantInterior);
    let result = dispatch::validate(&feature, &request(FeatureKey::InstantInterior, "redo it"));
    assert!(result.is_err());
    assert!(history.is_empty());
}
