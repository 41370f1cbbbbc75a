use crate::db::AppStateExt;
use crate::models::Document;
use crate::views::{format_size, DocumentFilter};
use serde::Serialize;
use tauri::AppHandle;
use tauri_plugin_opener::OpenerExt;

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRow {
    #[serde(flatten)]
    pub document: Document,
    pub size_label: String,
}

#[tauri::command]
pub fn get_documents(
    app: AppHandle,
    filter: Option<DocumentFilter>,
) -> Result<Vec<DocumentRow>, String> {
    let state = app.app_state();
    let ctx = state.0.lock().map_err(|e| e.to_string())?;

    let documents = ctx
        .documents(&filter.unwrap_or_default())
        .map_err(|e| e.to_string())?;

    Ok(documents
        .into_iter()
        .map(|d| DocumentRow {
            document: d.clone(),
            size_label: format_size(d.size),
        })
        .collect())
}

/// Opens the document's URL with the system handler.
#[tauri::command]
pub fn open_document(app: AppHandle, id: String) -> Result<(), String> {
    let url = {
        let state = app.app_state();
        let ctx = state.0.lock().map_err(|e| e.to_string())?;
        let inventory = ctx.inventory().map_err(|e| e.to_string())?;

        inventory
            .documents()
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.url.clone())
            .ok_or_else(|| format!("Document not found: {}", id))?
    };

    tracing::info!(id = %id, url = %url, "Opening document");
    app.opener()
        .open_url(url, None::<&str>)
        .map_err(|e| e.to_string())
}
