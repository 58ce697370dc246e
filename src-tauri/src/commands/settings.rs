//! API key storage and user preferences.
//!
//! The Gemini key lives in the OS keychain; everything else (language, last
//! selected feature) goes through the preferences store.

use keyring::Entry;
use tauri::AppHandle;
use tauri_plugin_store::StoreExt;
use tracing::{info, warn};

const KEYCHAIN_SERVICE: &str = "archai-gemini-api";
const KEYCHAIN_USER: &str = "archai";
const PREFERENCES_FILE: &str = "preferences.json";

/// Read the Gemini API key for a generation call. Missing key is a
/// user-facing configuration error, not a crash.
pub fn gemini_api_key() -> Result<String, String> {
    let entry = Entry::new(KEYCHAIN_SERVICE, KEYCHAIN_USER).map_err(|e| e.to_string())?;
    match entry.get_password() {
        Ok(key) => Ok(key),
        Err(keyring::Error::NoEntry) => {
            Err("No Gemini API key configured. Please set it in Settings.".to_string())
        }
        Err(e) => Err(format!("Failed to read API key: {}", e)),
    }
}

#[tauri::command]
pub fn set_api_key(key: &str) -> Result<(), String> {
    info!("Storing Gemini API key");
    let entry = Entry::new(KEYCHAIN_SERVICE, KEYCHAIN_USER).map_err(|e| {
        warn!("Failed to create keyring entry: {}", e);
        e.to_string()
    })?;
    entry.set_password(key).map_err(|e| {
        warn!("Failed to store API key: {}", e);
        e.to_string()
    })
}

#[tauri::command]
pub fn api_key_present() -> Result<bool, String> {
    let entry = Entry::new(KEYCHAIN_SERVICE, KEYCHAIN_USER).map_err(|e| e.to_string())?;
    match entry.get_password() {
        Ok(_) => Ok(true),
        Err(keyring::Error::NoEntry) => Ok(false),
        Err(e) => Err(e.to_string()),
    }
}

#[tauri::command]
pub fn delete_api_key() -> Result<(), String> {
    info!("Deleting Gemini API key");
    let entry = Entry::new(KEYCHAIN_SERVICE, KEYCHAIN_USER).map_err(|e| e.to_string())?;
    match entry.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

#[tauri::command]
pub fn get_language(app: AppHandle) -> Result<String, String> {
    let store = app.store(PREFERENCES_FILE).map_err(|e| e.to_string())?;
    Ok(store
        .get("language")
        .and_then(|v| v.as_str().map(|s| s.to_string()))
        .unwrap_or_else(|| "vi".to_string()))
}

#[tauri::command]
pub fn set_language(app: AppHandle, code: &str) -> Result<(), String> {
    info!("Setting UI language to {}", code);
    let store = app.store(PREFERENCES_FILE).map_err(|e| e.to_string())?;
    store.set("language", serde_json::json!(code));
    store.save().map_err(|e| {
        warn!("Failed to save preferences: {}", e);
        e.to_string()
    })
}
