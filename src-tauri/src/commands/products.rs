use crate::context::DELETE_PRODUCT_PROMPT;
use crate::db::AppStateExt;
use crate::models::{DashboardStats, Product};
use crate::views::{ProductFacets, ProductFilter};
use tauri::AppHandle;

#[tauri::command]
pub fn get_products(app: AppHandle, filter: Option<ProductFilter>) -> Result<Vec<Product>, String> {
    let state = app.app_state();
    let ctx = state.0.lock().map_err(|e| e.to_string())?;

    let products = ctx
        .products(&filter.unwrap_or_default())
        .map_err(|e| e.to_string())?;

    Ok(products.into_iter().cloned().collect())
}

#[tauri::command]
pub fn get_product_facets(app: AppHandle) -> Result<ProductFacets, String> {
    let state = app.app_state();
    let ctx = state.0.lock().map_err(|e| e.to_string())?;

    ctx.product_facets().map_err(|e| e.to_string())
}

#[tauri::command]
pub fn update_product(app: AppHandle, product: Product) -> Result<(), String> {
    let state = app.app_state();
    let mut ctx = state.0.lock().map_err(|e| e.to_string())?;

    ctx.update_product(product).map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn delete_product(app: AppHandle, id: String) -> Result<Product, String> {
    // Ask before taking the lock; the dialog blocks until answered
    let confirmed = super::ask(&app, "Delete Product", DELETE_PRODUCT_PROMPT);

    let state = app.app_state();
    let mut ctx = state.0.lock().map_err(|e| e.to_string())?;

    ctx.delete_product(&id, &confirmed).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_drafts(app: AppHandle) -> Result<Vec<Product>, String> {
    let state = app.app_state();
    let ctx = state.0.lock().map_err(|e| e.to_string())?;

    let inventory = ctx.inventory().map_err(|e| e.to_string())?;
    Ok(inventory.drafts().to_vec())
}

#[tauri::command]
pub fn delete_draft(app: AppHandle, id: String) -> Result<Product, String> {
    let state = app.app_state();
    let mut ctx = state.0.lock().map_err(|e| e.to_string())?;

    ctx.delete_draft(&id).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_dashboard_stats(app: AppHandle) -> Result<DashboardStats, String> {
    let state = app.app_state();
    let ctx = state.0.lock().map_err(|e| e.to_string())?;

    ctx.dashboard_stats().map_err(|e| e.to_string())
}
