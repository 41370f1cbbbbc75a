use crate::catalog::FormOptions;
use crate::db::AppStateExt;
use crate::models::{ItemType, Product, ProductType};
use crate::wizard::{self, BundleItemField, ProductPatch, StepInfo, VariantField, WizardSnapshot, WizardStep};
use tauri::AppHandle;

/// Runs `edit` against the wizard and returns its new state. The boolean
/// result of navigation ops is already reflected in the snapshot.
fn edit_wizard<F>(app: &AppHandle, edit: F) -> Result<WizardSnapshot, String>
where
    F: FnOnce(&mut wizard::ProductWizard),
{
    let state = app.app_state();
    let mut ctx = state.0.lock().map_err(|e| e.to_string())?;

    edit(ctx.wizard_mut().map_err(|e| e.to_string())?);
    ctx.wizard()
        .map(|w| w.snapshot())
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_wizard_steps() -> Vec<StepInfo> {
    wizard::steps()
}

#[tauri::command]
pub fn get_form_options(item_type: ItemType, category: Option<String>) -> FormOptions {
    FormOptions::new(item_type, category.as_deref().unwrap_or_default())
}

#[tauri::command]
pub fn get_wizard_state(app: AppHandle) -> Result<WizardSnapshot, String> {
    let state = app.app_state();
    let ctx = state.0.lock().map_err(|e| e.to_string())?;

    ctx.wizard()
        .map(|w| w.snapshot())
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn wizard_next(app: AppHandle) -> Result<WizardSnapshot, String> {
    edit_wizard(&app, |w| {
        w.advance();
    })
}

#[tauri::command]
pub fn wizard_previous(app: AppHandle) -> Result<WizardSnapshot, String> {
    edit_wizard(&app, |w| {
        w.retreat();
    })
}

#[tauri::command]
pub fn wizard_goto_step(app: AppHandle, step: WizardStep) -> Result<WizardSnapshot, String> {
    edit_wizard(&app, |w| {
        w.goto_step(step);
    })
}

#[tauri::command]
pub fn wizard_update_field(app: AppHandle, patch: ProductPatch) -> Result<WizardSnapshot, String> {
    edit_wizard(&app, |w| w.update_field(patch))
}

#[tauri::command]
pub fn wizard_change_product_type(
    app: AppHandle,
    product_type: ProductType,
) -> Result<WizardSnapshot, String> {
    edit_wizard(&app, |w| w.change_product_type(product_type))
}

#[tauri::command]
pub fn wizard_add_variant(app: AppHandle) -> Result<WizardSnapshot, String> {
    edit_wizard(&app, |w| {
        w.add_variant();
    })
}

#[tauri::command]
pub fn wizard_update_variant(
    app: AppHandle,
    index: usize,
    field: VariantField,
) -> Result<WizardSnapshot, String> {
    edit_wizard(&app, |w| {
        w.update_variant(index, field);
    })
}

#[tauri::command]
pub fn wizard_remove_variant(app: AppHandle, index: usize) -> Result<WizardSnapshot, String> {
    edit_wizard(&app, |w| {
        w.remove_variant(index);
    })
}

#[tauri::command]
pub fn wizard_add_variant_image(
    app: AppHandle,
    index: usize,
    image_url: String,
) -> Result<WizardSnapshot, String> {
    edit_wizard(&app, |w| {
        w.add_variant_image(index, image_url);
    })
}

#[tauri::command]
pub fn wizard_remove_variant_image(
    app: AppHandle,
    index: usize,
    image_index: usize,
) -> Result<WizardSnapshot, String> {
    edit_wizard(&app, |w| {
        w.remove_variant_image(index, image_index);
    })
}

#[tauri::command]
pub fn wizard_add_bundle_item(app: AppHandle) -> Result<WizardSnapshot, String> {
    edit_wizard(&app, |w| {
        w.add_bundle_item();
    })
}

#[tauri::command]
pub fn wizard_update_bundle_item(
    app: AppHandle,
    index: usize,
    field: BundleItemField,
) -> Result<WizardSnapshot, String> {
    edit_wizard(&app, |w| {
        w.update_bundle_item(index, field);
    })
}

#[tauri::command]
pub fn wizard_remove_bundle_item(app: AppHandle, index: usize) -> Result<WizardSnapshot, String> {
    edit_wizard(&app, |w| {
        w.remove_bundle_item(index);
    })
}

#[tauri::command]
pub fn wizard_add_image(app: AppHandle, image_url: String) -> Result<WizardSnapshot, String> {
    edit_wizard(&app, |w| w.add_image(image_url))
}

#[tauri::command]
pub fn wizard_remove_image(app: AppHandle, index: usize) -> Result<WizardSnapshot, String> {
    edit_wizard(&app, |w| {
        w.remove_image(index);
    })
}

#[tauri::command]
pub fn wizard_add_keyword(app: AppHandle, keyword: String) -> Result<WizardSnapshot, String> {
    edit_wizard(&app, |w| {
        w.add_keyword(&keyword);
    })
}

#[tauri::command]
pub fn wizard_remove_keyword(app: AppHandle, keyword: String) -> Result<WizardSnapshot, String> {
    edit_wizard(&app, |w| {
        w.remove_keyword(&keyword);
    })
}

#[tauri::command]
pub fn wizard_generate_barcode(app: AppHandle) -> Result<WizardSnapshot, String> {
    edit_wizard(&app, |w| {
        w.generate_barcode(&mut rand::thread_rng());
    })
}

#[tauri::command]
pub fn wizard_reset(app: AppHandle) -> Result<WizardSnapshot, String> {
    edit_wizard(&app, |w| w.reset())
}

/// `None` when name, SKU or category is still missing.
#[tauri::command]
pub fn wizard_save_product(app: AppHandle) -> Result<Option<Product>, String> {
    let state = app.app_state();
    let mut ctx = state.0.lock().map_err(|e| e.to_string())?;

    ctx.save_product().map_err(|e| e.to_string())
}

#[tauri::command]
pub fn wizard_save_draft(app: AppHandle) -> Result<Product, String> {
    let state = app.app_state();
    let mut ctx = state.0.lock().map_err(|e| e.to_string())?;

    ctx.save_draft().map_err(|e| e.to_string())
}

#[tauri::command]
pub fn wizard_resume_draft(app: AppHandle, id: String) -> Result<WizardSnapshot, String> {
    let state = app.app_state();
    let mut ctx = state.0.lock().map_err(|e| e.to_string())?;

    ctx.resume_draft(&id).map_err(|e| e.to_string())?;
    ctx.wizard()
        .map(|w| w.snapshot())
        .map_err(|e| e.to_string())
}
