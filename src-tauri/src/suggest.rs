//! Prompt suggestions from an uploaded image.
//!
//! Fire-and-forget: the studio requests suggestions when an image is
//! dropped, and simply discards the result if a newer upload supersedes it.
//! Failures are logged and swallowed by the caller; they never block
//! generation.

use tracing::info;

use crate::error::StudioError;
use crate::features::FeatureKey;
use crate::gemini;
use crate::media::EncodedImage;
use crate::prompts::{self, Language};

/// Maximum number of suggestions surfaced to the user.
const MAX_SUGGESTIONS: usize = 4;

/// Ask the text model for 3-4 starting prompts for the given feature and
/// uploaded image.
pub async fn suggest_prompts(
    api_key: &str,
    feature: FeatureKey,
    image: &EncodedImage,
    language: Language,
) -> Result<Vec<String>, StudioError> {
    let instruction = prompts::suggestion_prompt(feature, language);
    let text = gemini::suggest_text(api_key, instruction, image).await?;

    let suggestions = parse_suggestions(&text);
    info!("Parsed {} prompt suggestions", suggestions.len());
    Ok(suggestions)
}

/// Split a free-form answer into clean one-line suggestions, tolerating
/// bullets, numbering, and surrounding quotes.
fn parse_suggestions(text: &str) -> Vec<String> {
    text.lines()
        .map(clean_suggestion_line)
        .filter(|line| !line.is_empty())
        .take(MAX_SUGGESTIONS)
        .collect()
}

fn clean_suggestion_line(line: &str) -> String {
    let mut cleaned = line.trim();

    cleaned = cleaned
        .trim_start_matches(['-', '*', '•'])
        .trim_start();

    // Numbered lists: "1." / "2)" prefixes.
    if let Some(rest) = cleaned
        .split_once(['.', ')'])
        .filter(|(head, _)| !head.is_empty() && head.chars().all(|c| c.is_ascii_digit()))
        .map(|(_, rest)| rest)
    {
        cleaned = rest.trim_start();
    }

    cleaned.trim_matches('"').trim_matches('\'').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bulleted_suggestions() {
        let text = "- change wall material to brick\n- add plants to the balcony\n- make the sky clearer";
        let suggestions = parse_suggestions(text);
        assert_eq!(
            suggestions,
            vec![
                "change wall material to brick",
                "add plants to the balcony",
                "make the sky clearer"
            ]
        );
    }

    #[test]
    fn test_parse_numbered_and_quoted_suggestions() {
        let text = "1. \"render with concrete and glass, daylight\"\n2) place in an urban context at dusk\n\n";
        let suggestions = parse_suggestions(text);
        assert_eq!(
            suggestions,
            vec![
                "render with concrete and glass, daylight",
                "place in an urban context at dusk"
            ]
        );
    }

    #[test]
    fn test_parse_caps_at_four() {
        let text = "a\nb\nc\nd\ne\nf";
        assert_eq!(parse_suggestions(text).len(), 4);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        assert!(parse_suggestions("\n  \n\t\n").is_empty());
    }
}
