//! Session-scoped render history.
//!
//! Append-only, newest-first ledger of completed image generations together
//! with the exact settings used, so any entry can be re-run. Lives entirely
//! in memory and dies with the session; only image-producing generations are
//! recorded, and a failed generation never creates an entry.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::dispatch::RenderSettings;
use crate::error::StudioError;
use crate::features::FeatureKey;

/// One completed image generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Monotonic by creation time, unique within the session.
    pub id: u64,
    pub feature: FeatureKey,
    /// Localized title captured at creation time, not re-derived later.
    pub feature_title: String,
    pub prompt: String,
    pub image_data_url: String,
    pub created_at: String,
    pub settings: RenderSettings,
}

/// Request skeleton reconstructed from a stored entry. The source image is
/// intentionally absent: images are not persisted in history, so a feature
/// that requires one will be rejected at generation time until the user
/// re-supplies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerunRequest {
    pub feature: FeatureKey,
    pub prompt: String,
    pub settings: RenderSettings,
}

/// The ledger itself. Insertion is always at the head; nothing is ever
/// truncated automatically.
#[derive(Debug, Default)]
pub struct RenderHistory {
    entries: Vec<HistoryEntry>,
    next_id: u64,
}

impl RenderHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed generation at the head of the ledger.
    pub fn append(
        &mut self,
        feature: FeatureKey,
        feature_title: String,
        prompt: String,
        image_data_url: String,
        settings: RenderSettings,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        self.entries.insert(
            0,
            HistoryEntry {
                id,
                feature,
                feature_title,
                prompt,
                image_data_url,
                created_at: chrono::Local::now().to_rfc3339(),
                settings,
            },
        );
        id
    }

    /// Replace only the image and prompt of the most recent entry, keeping
    /// its id, feature, title, settings, and timestamp. Used when a
    /// refinement result is accepted.
    pub fn replace_head(
        &mut self,
        image_data_url: String,
        prompt: String,
    ) -> Result<(), StudioError> {
        let head = self.entries.first_mut().ok_or(StudioError::EmptyHistory)?;
        head.image_data_url = image_data_url;
        head.prompt = prompt;
        Ok(())
    }

    /// Snapshot of all entries, most recent first.
    pub fn list(&self) -> Vec<HistoryEntry> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rebuild a request from a stored entry, minus any image.
    pub fn rerun(&self, id: u64) -> Result<RerunRequest, StudioError> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| StudioError::validation(format!("No history entry with id {}", id)))?;

        Ok(RerunRequest {
            feature: entry.feature,
            prompt: entry.prompt.clone(),
            settings: entry.settings.clone(),
        })
    }
}

/// Tauri-managed wrapper. All mutation goes through this single lock.
#[derive(Debug, Default)]
pub struct HistoryState(pub Mutex<RenderHistory>);

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_settings() -> RenderSettings {
        RenderSettings {
            style_preset: Some("cinematic".to_string()),
            aspect_ratio: Some("16:9".to_string()),
            detail_level: Some("high".to_string()),
            ..RenderSettings::default()
        }
    }

    fn append_sample(history: &mut RenderHistory, prompt: &str) -> u64 {
        history.append(
            FeatureKey::SurrealExterior,
            "Surreal Exterior Render".to_string(),
            prompt.to_string(),
            "data:image/jpeg;base64,QUJD".to_string(),
            sample_settings(),
        )
    }

    #[test]
    fn test_append_inserts_at_head() {
        let mut history = RenderHistory::new();
        append_sample(&mut history, "first");
        append_sample(&mut history, "second");

        let entries = history.list();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].prompt, "second");
        assert_eq!(entries[1].prompt, "first");
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut history = RenderHistory::new();
        let a = append_sample(&mut history, "a");
        let b = append_sample(&mut history, "b");
        let c = append_sample(&mut history, "c");
        assert!(a < b && b < c);
    }

    #[test]
    fn test_replace_head_keeps_identity_and_settings() {
        let mut history = RenderHistory::new();
        append_sample(&mut history, "old prompt");
        let before = history.list()[0].clone();

        history
            .replace_head(
                "data:image/png;base64,WFla".to_string(),
                "old prompt (Refined: more dramatic sky)".to_string(),
            )
            .unwrap();

        let after = history.list()[0].clone();
        assert_eq!(after.id, before.id);
        assert_eq!(after.feature, before.feature);
        assert_eq!(after.feature_title, before.feature_title);
        assert_eq!(after.settings, before.settings);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.image_data_url, "data:image/png;base64,WFla");
        assert!(after.prompt.contains("Refined"));
    }

    #[test]
    fn test_replace_head_on_empty_ledger_fails() {
        let mut history = RenderHistory::new();
        let result = history.replace_head("data:x".to_string(), "p".to_string());
        assert!(matches!(result, Err(StudioError::EmptyHistory)));
    }

    #[test]
    fn test_replace_head_only_touches_the_head() {
        let mut history = RenderHistory::new();
        append_sample(&mut history, "older");
        append_sample(&mut history, "newer");

        history
            .replace_head("data:new".to_string(), "newer refined".to_string())
            .unwrap();

        let entries = history.list();
        assert_eq!(entries[1].prompt, "older");
        assert_eq!(entries[1].image_data_url, "data:image/jpeg;base64,QUJD");
    }

    #[test]
    fn test_rerun_round_trips_settings_without_image() {
        let mut history = RenderHistory::new();
        let id = append_sample(&mut history, "glass villa at sunset");

        let rerun = history.rerun(id).unwrap();
        assert_eq!(rerun.feature, FeatureKey::SurrealExterior);
        assert_eq!(rerun.prompt, "glass villa at sunset");
        assert_eq!(rerun.settings, sample_settings());
    }

    #[test]
    fn test_rerun_unknown_id_fails() {
        let history = RenderHistory::new();
        assert!(history.rerun(42).is_err());
    }
}
