use crate::config::AppConfig;
use crate::context::CLEAR_ALL_DATA_PROMPT;
use crate::db::AppStateExt;
use tauri::AppHandle;

#[tauri::command]
pub fn get_config(app: AppHandle) -> Result<AppConfig, String> {
    let state = app.app_state();
    let ctx = state.0.lock().map_err(|e| e.to_string())?;

    Ok(ctx.config().clone())
}

#[tauri::command]
pub async fn clear_all_data(app: AppHandle) -> Result<(), String> {
    let confirmed = super::ask(&app, "Clear All Data", CLEAR_ALL_DATA_PROMPT);

    let state = app.app_state();
    let mut ctx = state.0.lock().map_err(|e| e.to_string())?;

    ctx.clear_all_data(&confirmed).map_err(|e| e.to_string())
}
