use crate::db::AppStateExt;
use crate::models::{Stock, StockLevel};
use crate::views::StockFilter;
use serde::Serialize;
use tauri::AppHandle;

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StockRow {
    #[serde(flatten)]
    pub stock: Stock,
    pub level: StockLevel,
    pub status_label: &'static str,
}

impl From<&Stock> for StockRow {
    fn from(stock: &Stock) -> Self {
        let level = stock.level();
        StockRow {
            stock: stock.clone(),
            level,
            status_label: level.label(),
        }
    }
}

#[tauri::command]
pub fn get_stocks(app: AppHandle, filter: Option<StockFilter>) -> Result<Vec<StockRow>, String> {
    let state = app.app_state();
    let ctx = state.0.lock().map_err(|e| e.to_string())?;

    let stocks = ctx
        .stocks(&filter.unwrap_or_default())
        .map_err(|e| e.to_string())?;

    Ok(stocks.into_iter().map(StockRow::from).collect())
}

#[tauri::command]
pub fn get_low_stock(app: AppHandle) -> Result<Vec<Stock>, String> {
    let state = app.app_state();
    let ctx = state.0.lock().map_err(|e| e.to_string())?;

    let inventory = ctx.inventory().map_err(|e| e.to_string())?;
    Ok(inventory.low_stock().into_iter().cloned().collect())
}
