use crate::db::AppStateExt;
use crate::models::{AuthState, Theme, User};
use crate::views::ViewMode;
use tauri::AppHandle;

#[tauri::command]
pub fn get_auth_state(app: AppHandle) -> Result<AuthState, String> {
    let state = app.app_state();
    let ctx = state.0.lock().map_err(|e| e.to_string())?;

    Ok(ctx.session().auth_state().clone())
}

#[tauri::command]
pub fn login(app: AppHandle, email: String, password: String) -> Result<User, String> {
    let state = app.app_state();
    let mut ctx = state.0.lock().map_err(|e| e.to_string())?;

    ctx.login(&email, &password).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn signup(app: AppHandle, name: String, email: String, password: String) -> Result<User, String> {
    let state = app.app_state();
    let mut ctx = state.0.lock().map_err(|e| e.to_string())?;

    ctx.signup(&name, &email, &password).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn logout(app: AppHandle) -> Result<(), String> {
    let state = app.app_state();
    let mut ctx = state.0.lock().map_err(|e| e.to_string())?;

    ctx.logout().map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_theme(app: AppHandle) -> Result<Theme, String> {
    let state = app.app_state();
    let ctx = state.0.lock().map_err(|e| e.to_string())?;

    Ok(ctx.session().theme())
}

#[tauri::command]
pub fn toggle_theme(app: AppHandle) -> Result<Theme, String> {
    let state = app.app_state();
    let mut ctx = state.0.lock().map_err(|e| e.to_string())?;

    ctx.toggle_theme().map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_view_mode(app: AppHandle) -> Result<ViewMode, String> {
    let state = app.app_state();
    let ctx = state.0.lock().map_err(|e| e.to_string())?;

    Ok(ctx.view_mode())
}

#[tauri::command]
pub fn toggle_view_mode(app: AppHandle) -> Result<ViewMode, String> {
    let state = app.app_state();
    let mut ctx = state.0.lock().map_err(|e| e.to_string())?;

    Ok(ctx.toggle_view_mode())
}
