use crate::db::AppStateExt;
use crate::models::{Sale, SalesSummary};
use crate::views::SaleFilter;
use tauri::AppHandle;

#[tauri::command]
pub fn get_sales(app: AppHandle, filter: Option<SaleFilter>) -> Result<Vec<Sale>, String> {
    let state = app.app_state();
    let ctx = state.0.lock().map_err(|e| e.to_string())?;

    let sales = ctx
        .sales(&filter.unwrap_or_default())
        .map_err(|e| e.to_string())?;

    Ok(sales.into_iter().cloned().collect())
}

#[tauri::command]
pub fn get_sales_summary(app: AppHandle) -> Result<SalesSummary, String> {
    let state = app.app_state();
    let ctx = state.0.lock().map_err(|e| e.to_string())?;

    ctx.sales_summary().map_err(|e| e.to_string())
}
