//! Gemini REST API calls for all three generation capabilities.
//!
//! Image editing and structured generation go through `generateContent`;
//! text-to-image goes through the Imagen `predict` endpoint. No call is
//! retried; failures surface immediately and the user re-triggers manually.

use std::time::Duration;

use serde_json::{json, Value};
use tracing::{error, info};

use crate::error::StudioError;
use crate::media::EncodedImage;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Multimodal model used for image-to-image and composite edits.
pub const EDIT_MODEL: &str = "gemini-2.5-flash-image-preview";
/// Text model used for structured JSON output and prompt suggestions.
pub const TEXT_MODEL: &str = "gemini-2.5-flash";
/// Dedicated text-to-image model.
pub const IMAGE_MODEL: &str = "imagen-4.0-generate-001";

/// Edit one or two images according to an instruction.
///
/// Parts are ordered images-first (primary, then decal), instruction last.
/// The response must carry at least one inline image part; a text-only
/// answer is a `NoImageGenerated` failure.
pub async fn edit_image(
    api_key: &str,
    images: &[&EncodedImage],
    instruction: &str,
) -> Result<EncodedImage, StudioError> {
    let mut parts: Vec<Value> = images
        .iter()
        .map(|img| {
            json!({ "inlineData": { "mimeType": img.mime_type, "data": img.data } })
        })
        .collect();
    parts.push(json!({ "text": instruction }));

    let body = json!({
        "contents": [{ "parts": parts }],
        "generationConfig": { "responseModalities": ["IMAGE", "TEXT"] }
    });

    info!("Requesting image edit with {} source image(s)", images.len());
    let response = post_json(api_key, EDIT_MODEL, "generateContent", &body).await?;

    extract_inline_image(&response).ok_or(StudioError::NoImageGenerated)
}

/// Generate images from a text prompt.
///
/// Always requests JPEG output. The negative prompt is only sent when
/// non-blank. An empty prediction list is a `NoImageGenerated` failure.
pub async fn generate_images(
    api_key: &str,
    prompt: &str,
    negative_prompt: Option<&str>,
    aspect_ratio: &str,
    count: u32,
) -> Result<Vec<EncodedImage>, StudioError> {
    let mut parameters = json!({
        "sampleCount": count,
        "aspectRatio": aspect_ratio,
        "outputMimeType": "image/jpeg"
    });
    if let Some(negative) = negative_prompt {
        if !negative.trim().is_empty() {
            parameters["negativePrompt"] = json!(negative);
        }
    }

    let body = json!({
        "instances": [{ "prompt": prompt }],
        "parameters": parameters
    });

    info!("Requesting {} image(s) at aspect ratio {}", count, aspect_ratio);
    let response = post_json(api_key, IMAGE_MODEL, "predict", &body).await?;

    let images: Vec<EncodedImage> = response["predictions"]
        .as_array()
        .map(|predictions| {
            predictions
                .iter()
                .filter_map(|p| {
                    let data = p["bytesBase64Encoded"].as_str()?;
                    let mime_type = p["mimeType"].as_str().unwrap_or("image/jpeg");
                    Some(EncodedImage {
                        data: data.to_string(),
                        mime_type: mime_type.to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    if images.is_empty() {
        return Err(StudioError::NoImageGenerated);
    }
    Ok(images)
}

/// Generate JSON conforming to a declared schema.
///
/// The optional image precedes the instruction text, matching the part
/// ordering used by the image paths. Returns the parsed JSON document;
/// schema-shape checking is the validator's job.
pub async fn generate_structured(
    api_key: &str,
    instruction: &str,
    image: Option<&EncodedImage>,
    system_instruction: &str,
    schema: &Value,
) -> Result<Value, StudioError> {
    let mut parts: Vec<Value> = Vec::new();
    if let Some(img) = image {
        parts.push(json!({ "inlineData": { "mimeType": img.mime_type, "data": img.data } }));
    }
    parts.push(json!({ "text": instruction }));

    let body = json!({
        "contents": [{ "parts": parts }],
        "systemInstruction": { "parts": [{ "text": system_instruction }] },
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": schema
        }
    });

    let response = post_json(api_key, TEXT_MODEL, "generateContent", &body).await?;
    let text = collect_text(&response).ok_or_else(|| {
        StudioError::MalformedResponse("response contained no text".to_string())
    })?;

    let cleaned = strip_markdown_json(&text);
    serde_json::from_str(&cleaned).map_err(|e| {
        let truncated = if cleaned.len() > 500 {
            format!("{}...", &cleaned[..500])
        } else {
            cleaned.clone()
        };
        error!("Structured response is not valid JSON: {} ({})", e, truncated);
        StudioError::MalformedResponse(format!("response is not valid JSON: {}", e))
    })
}

/// Free-form text generation over an image, used for prompt suggestions.
pub async fn suggest_text(
    api_key: &str,
    instruction: &str,
    image: &EncodedImage,
) -> Result<String, StudioError> {
    let body = json!({
        "contents": [{
            "parts": [
                { "inlineData": { "mimeType": image.mime_type, "data": image.data } },
                { "text": instruction }
            ]
        }]
    });

    let response = post_json(api_key, TEXT_MODEL, "generateContent", &body).await?;
    collect_text(&response)
        .ok_or_else(|| StudioError::Remote("suggestion response contained no text".to_string()))
}

/// Build the shared HTTP client with a 60-second timeout.
fn build_api_client() -> Result<reqwest::Client, StudioError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()
        .map_err(|e| StudioError::Remote(format!("Failed to build HTTP client: {}", e)))
}

/// POST a JSON body to `{model}:{method}` and parse the response envelope.
async fn post_json(
    api_key: &str,
    model: &str,
    method: &str,
    body: &Value,
) -> Result<Value, StudioError> {
    let client = build_api_client()?;
    let url = format!("{}/{}:{}", API_BASE, model, method);

    let response = client
        .post(&url)
        .header("x-goog-api-key", api_key)
        .header("content-type", "application/json")
        .json(body)
        .send()
        .await
        .map_err(|e| {
            let msg = if e.is_timeout() {
                format!("API timeout after 60s for model '{}'", model)
            } else {
                format!("API request failed for model '{}': {}", model, e)
            };
            error!("{}", msg);
            StudioError::Remote(msg)
        })?;

    let status = response.status();
    let body_text = response
        .text()
        .await
        .map_err(|e| StudioError::Remote(format!("Failed to read API response: {}", e)))?;

    if !status.is_success() {
        let truncated = if body_text.len() > 1024 {
            format!("{}...", &body_text[..1024])
        } else {
            body_text
        };
        let msg = format!("API error {} from model '{}': {}", status, model, truncated);
        error!("{}", msg);
        return Err(StudioError::Remote(msg));
    }

    serde_json::from_str(&body_text)
        .map_err(|e| StudioError::Remote(format!("Failed to parse API response wrapper: {}", e)))
}

/// Pull the first inline image out of the first candidate, if any.
fn extract_inline_image(response: &Value) -> Option<EncodedImage> {
    response["candidates"][0]["content"]["parts"]
        .as_array()?
        .iter()
        .find_map(|part| {
            let inline = &part["inlineData"];
            let data = inline["data"].as_str()?;
            let mime_type = inline["mimeType"].as_str().unwrap_or("image/png");
            Some(EncodedImage {
                data: data.to_string(),
                mime_type: mime_type.to_string(),
            })
        })
}

/// Concatenate the text parts of the first candidate.
fn collect_text(response: &Value) -> Option<String> {
    let parts = response["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Strip markdown code fences if the model wrapped its JSON in ```json ... ```.
fn strip_markdown_json(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.starts_with("```") {
        let after_open = if let Some(pos) = trimmed.find('\n') {
            &trimmed[pos + 1..]
        } else {
            trimmed
        };
        let cleaned = after_open.trim_end();
        if let Some(stripped) = cleaned.strip_suffix("```") {
            stripped.trim().to_string()
        } else {
            cleaned.to_string()
        }
    } else {
        trimmed.to_string()
    }
}
