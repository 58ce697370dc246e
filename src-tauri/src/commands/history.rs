//! History ledger commands: listing and rerun reconstruction.

use tauri::State;

use crate::history::{HistoryEntry, HistoryState, RerunRequest};

#[tauri::command]
pub fn list_history(state: State<'_, HistoryState>) -> Result<Vec<HistoryEntry>, String> {
    let history = state.0.lock().map_err(|_| "history state poisoned")?;
    Ok(history.list())
}

/// Rebuild a request from a stored entry. The source image is not restored;
/// features that require one will be rejected at generation time until the
/// user re-supplies it.
#[tauri::command]
pub fn rerun_entry(state: State<'_, HistoryState>, id: u64) -> Result<RerunRequest, String> {
    let history = state.0.lock().map_err(|_| "history state poisoned")?;
    history.rerun(id).map_err(String::from)
}
