use crate::models::HistoryEntry;
use crate::AppState;
use tauri::State;

#[tauri::command]
pub fn get_query_history(state: State<'_, AppState>) -> Result<Vec<HistoryEntry>, String> {
    let history = state.history.lock().map_err(|_| "history store poisoned")?;
    Ok(history.entries().to_vec())
}

#[tauri::command]
pub fn clear_query_history(state: State<'_, AppState>) -> Result<Vec<HistoryEntry>, String> {
    let mut history = state.history.lock().map_err(|_| "history store poisoned")?;
    Ok(history.clear().to_vec())
}
