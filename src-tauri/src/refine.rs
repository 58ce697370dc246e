//! Refinement of a previously generated image.
//!
//! One round takes the current output (as a data URL), an instruction, and
//! optionally a decal image, and produces a candidate replacement. Acceptance
//! is a separate step handled by the history ledger's `replace_head`; nothing
//! here mutates state.

use crate::error::StudioError;
use crate::gemini;
use crate::media::{self, EncodedImage};
use crate::prompts::{self, Language};

/// Run one refinement round against the current generated image.
pub async fn refine(
    api_key: &str,
    current_image_data_url: &str,
    instruction: &str,
    decal: Option<&EncodedImage>,
) -> Result<EncodedImage, StudioError> {
    if instruction.trim().is_empty() {
        return Err(StudioError::validation("Please describe your changes."));
    }

    let current = media::encode_from_data_url(current_image_data_url)?;

    let mut images: Vec<&EncodedImage> = vec![&current];
    if let Some(decal) = decal {
        images.push(decal);
    }

    gemini::edit_image(api_key, &images, instruction).await
}

/// Prompt text recorded in history when a refinement is accepted: the
/// refinement instruction annotated with the localized "Refined" marker.
pub fn refined_prompt(instruction: &str, language: Language) -> String {
    format!("{} ({})", instruction, prompts::refined_label(language))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_refine_rejects_blank_instruction() {
        let result = refine("key", "data:image/png;base64,QUJD", "  ", None).await;
        assert!(matches!(result, Err(StudioError::Validation(_))));
    }

    #[tokio::test]
    async fn test_refine_rejects_bad_data_url_before_network() {
        let result = refine("key", "not-a-data-url", "darker sky", None).await;
        assert!(matches!(result, Err(StudioError::Decode(_))));
    }

    #[test]
    fn test_refined_prompt_is_annotated() {
        assert_eq!(
            refined_prompt("make the sky more dramatic", Language::En),
            "make the sky more dramatic (Refined)"
        );
        assert_eq!(
            refined_prompt("thêm một cái cây", Language::Vi),
            "thêm một cái cây (Đã tinh chỉnh)"
        );
    }
}
