use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::features::FeatureKey;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

// -- Payload types matching the backend structs --

/// An uploaded image: raw file bytes base64-encoded, plus MIME type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagePayload {
    pub data: String,
    pub mime_type: String,
}

/// Per-invocation settings bag. Field names match the backend exactly so a
/// rerun restores the form field-for-field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub style_preset: Option<String>,
    pub negative_prompt: Option<String>,
    pub aspect_ratio: Option<String>,
    pub detail_level: Option<String>,
    pub drawing_scale: Option<String>,
    pub line_thickness: Option<String>,
    pub line_style: Option<String>,
    pub symbol_library: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub worker_count: Option<u32>,
    pub dimension_length: Option<f64>,
    pub dimension_width: Option<f64>,
    pub dimension_height: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub feature: FeatureKey,
    pub prompt: String,
    pub primary_image: Option<ImagePayload>,
    pub decal_image: Option<ImagePayload>,
    pub settings: RenderSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationOutcome {
    Image { data_url: String },
    Structured { payload: StructuredPayload },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuredPayload {
    CostReport(CostReport),
    TaskPlan(TaskPlan),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostReport {
    pub currency: String,
    pub summary: CostSummary,
    pub breakdown: Vec<CostLineItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    pub total_area: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostLineItem {
    pub item: String,
    pub cost: f64,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPlan {
    pub project_name: String,
    pub worker_breakdown: Vec<WorkerGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerGroup {
    pub worker_type: String,
    pub estimated_workers: u32,
    pub tasks: Vec<TaskItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskItem {
    pub task_name: String,
    pub priority: String,
    pub timeframe: String,
}

/// One history ledger entry, newest first in `list_history`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub feature: FeatureKey,
    pub feature_title: String,
    pub prompt: String,
    pub image_data_url: String,
    pub created_at: String,
    pub settings: RenderSettings,
}

/// Request skeleton from a rerun; the image is never restored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RerunRequest {
    pub feature: FeatureKey,
    pub prompt: String,
    pub settings: RenderSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportedReport {
    pub file_name: String,
    pub content: String,
}

// -- Arg structs for serialization --

#[derive(Serialize)]
struct GenerateArgs {
    request: GenerateRequest,
    language: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefineImageArgs {
    image_data_url: String,
    instruction: String,
    decal_image: Option<ImagePayload>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AcceptRefinementArgs {
    image_data_url: String,
    instruction: String,
    language: String,
}

#[derive(Serialize)]
struct RerunEntryArgs {
    id: u64,
}

#[derive(Serialize)]
struct SuggestPromptsArgs {
    feature: FeatureKey,
    image: ImagePayload,
    language: String,
}

#[derive(Serialize)]
struct ExportReportArgs {
    payload: StructuredPayload,
    language: String,
}

#[derive(Serialize)]
struct SetApiKeyArgs {
    key: String,
}

#[derive(Serialize)]
struct SetLanguageArgs {
    code: String,
}

// -- Typed invoke helpers --

fn to_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| "Unknown error".to_string())
}

async fn invoke_parsed<T: for<'de> Deserialize<'de>>(
    cmd: &str,
    args: JsValue,
) -> Result<T, String> {
    let result = invoke(cmd, args).await.map_err(to_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| format!("Failed to parse response: {}", e))
}

/// Run one generation. Image successes are recorded into history by the
/// backend; report successes are not.
pub async fn generate(
    request: GenerateRequest,
    language: &str,
) -> Result<GenerationOutcome, String> {
    let args = serde_wasm_bindgen::to_value(&GenerateArgs {
        request,
        language: language.to_string(),
    })
    .map_err(|e| e.to_string())?;

    invoke_parsed("generate", args).await
}

/// One refinement round; returns the candidate image as a data URL.
pub async fn refine_image(
    image_data_url: &str,
    instruction: &str,
    decal_image: Option<ImagePayload>,
) -> Result<String, String> {
    let args = serde_wasm_bindgen::to_value(&RefineImageArgs {
        image_data_url: image_data_url.to_string(),
        instruction: instruction.to_string(),
        decal_image,
    })
    .map_err(|e| e.to_string())?;

    invoke_parsed("refine_image", args).await
}

/// Accept a refinement result: rewrites the history head.
pub async fn accept_refinement(
    image_data_url: &str,
    instruction: &str,
    language: &str,
) -> Result<(), String> {
    let args = serde_wasm_bindgen::to_value(&AcceptRefinementArgs {
        image_data_url: image_data_url.to_string(),
        instruction: instruction.to_string(),
        language: language.to_string(),
    })
    .map_err(|e| e.to_string())?;

    invoke("accept_refinement", args)
        .await
        .map(|_| ())
        .map_err(to_error)
}

pub async fn list_history() -> Result<Vec<HistoryEntry>, String> {
    let args = serde_wasm_bindgen::to_value(&serde_json::json!({})).map_err(|e| e.to_string())?;
    invoke_parsed("list_history", args).await
}

pub async fn rerun_entry(id: u64) -> Result<RerunRequest, String> {
    let args = serde_wasm_bindgen::to_value(&RerunEntryArgs { id }).map_err(|e| e.to_string())?;
    invoke_parsed("rerun_entry", args).await
}

/// Ask for 3-4 starting prompts for the uploaded image. Fire-and-forget:
/// callers discard stale results when a newer upload supersedes them.
pub async fn suggest_prompts(
    feature: FeatureKey,
    image: ImagePayload,
    language: &str,
) -> Result<Vec<String>, String> {
    let args = serde_wasm_bindgen::to_value(&SuggestPromptsArgs {
        feature,
        image,
        language: language.to_string(),
    })
    .map_err(|e| e.to_string())?;

    invoke_parsed("suggest_prompts", args).await
}

pub async fn export_report(
    payload: StructuredPayload,
    language: &str,
) -> Result<ExportedReport, String> {
    let args = serde_wasm_bindgen::to_value(&ExportReportArgs {
        payload,
        language: language.to_string(),
    })
    .map_err(|e| e.to_string())?;

    invoke_parsed("export_report", args).await
}

pub async fn set_api_key(key: &str) -> Result<(), String> {
    let args = serde_wasm_bindgen::to_value(&SetApiKeyArgs {
        key: key.to_string(),
    })
    .map_err(|e| e.to_string())?;

    invoke("set_api_key", args).await.map(|_| ()).map_err(to_error)
}

pub async fn api_key_present() -> Result<bool, String> {
    let args = serde_wasm_bindgen::to_value(&serde_json::json!({})).map_err(|e| e.to_string())?;
    invoke_parsed("api_key_present", args).await
}

pub async fn delete_api_key() -> Result<(), String> {
    let args = serde_wasm_bindgen::to_value(&serde_json::json!({})).map_err(|e| e.to_string())?;
    invoke("delete_api_key", args).await.map(|_| ()).map_err(to_error)
}

pub async fn get_language() -> Result<String, String> {
    let args = serde_wasm_bindgen::to_value(&serde_json::json!({})).map_err(|e| e.to_string())?;
    invoke_parsed("get_language", args).await
}

pub async fn set_language(code: &str) -> Result<(), String> {
    let args = serde_wasm_bindgen::to_value(&SetLanguageArgs {
        code: code.to_string(),
    })
    .map_err(|e| e.to_string())?;

    invoke("set_language", args).await.map(|_| ()).map_err(to_error)
}
