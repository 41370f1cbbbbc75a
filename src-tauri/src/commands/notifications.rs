use crate::db::AppStateExt;
use crate::models::Notification;
use tauri::AppHandle;

#[tauri::command]
pub fn get_notifications(app: AppHandle) -> Result<Vec<Notification>, String> {
    let state = app.app_state();
    let ctx = state.0.lock().map_err(|e| e.to_string())?;

    Ok(ctx.session().notifications().to_vec())
}

#[tauri::command]
pub fn get_unread_count(app: AppHandle) -> Result<usize, String> {
    let state = app.app_state();
    let ctx = state.0.lock().map_err(|e| e.to_string())?;

    Ok(ctx.session().unread_count())
}

#[tauri::command]
pub fn mark_notification_read(app: AppHandle, id: String) -> Result<bool, String> {
    let state = app.app_state();
    let mut ctx = state.0.lock().map_err(|e| e.to_string())?;

    ctx.mark_notification_read(&id).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn clear_notifications(app: AppHandle) -> Result<(), String> {
    let state = app.app_state();
    let mut ctx = state.0.lock().map_err(|e| e.to_string())?;

    ctx.clear_notifications().map_err(|e| e.to_string())
}
