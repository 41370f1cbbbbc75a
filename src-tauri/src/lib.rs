pub mod catalog;
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod inventory;
pub mod logging;
pub mod models;
pub mod seed;
pub mod session;
pub mod store;
pub mod views;
pub mod wizard;

#[cfg(feature = "desktop")]
mod commands;

#[cfg(test)]
mod tests;

#[cfg(feature = "desktop")]
pub use desktop::run;

#[cfg(feature = "desktop")]
mod desktop {
    use crate::commands::{documents, notifications, products, sales, session, settings, stocks, wizard};
    use crate::config::{AppConfig, CONFIG_FILE_NAME};
    use crate::context::{AppContext, AppState};
    use crate::db::Database;
    use crate::logging::init_tracing;
    use std::sync::Arc;
    use tauri::{
        menu::{Menu, MenuItem},
        tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent},
        Manager,
    };

    #[cfg_attr(mobile, tauri::mobile_entry_point)]
    pub fn run() {
        let result = tauri::Builder::default()
            .plugin(tauri_plugin_opener::init())
            .plugin(tauri_plugin_dialog::init())
            .setup(|app| {
                // Load config and logging before anything touches storage
                let app_dir = app.path().app_data_dir()?;
                let config = AppConfig::load(&app_dir.join(CONFIG_FILE_NAME))?;
                init_tracing(&config.logging);

                let db = Database::new(app.handle(), &config.storage.database_file)?;
                db.initialize()?;
                let context = AppContext::new(config, Arc::new(db))?;
                app.manage(AppState::new(context));

                // Create tray menu
                let quit = MenuItem::with_id(app, "quit", "Quit", true, None::<&str>)?;
                let menu = Menu::with_items(app, &[&quit])?;

                let mut tray = TrayIconBuilder::new()
                    .tooltip("MUN-C Inventory")
                    .menu(&menu)
                    .show_menu_on_left_click(false);
                if let Some(icon) = app.default_window_icon() {
                    tray = tray.icon(icon.clone());
                }

                let _tray = tray
                    .on_tray_icon_event(|tray, event| {
                        if let TrayIconEvent::Click {
                            button: MouseButton::Left,
                            button_state: MouseButtonState::Up,
                            ..
                        } = event
                        {
                            let app = tray.app_handle();
                            if let Some(window) = app.get_webview_window("main") {
                                if window.is_visible().unwrap_or(false) {
                                    let _ = window.hide();
                                } else {
                                    let _ = window.show();
                                    let _ = window.set_focus();
                                }
                            }
                        }
                    })
                    .on_menu_event(|app, event| {
                        if event.id == "quit" {
                            tracing::info!("Quit requested from tray");
                            app.exit(0);
                        }
                    })
                    .build(app)?;

                Ok(())
            })
            .invoke_handler(tauri::generate_handler![
                // Session
                session::get_auth_state,
                session::login,
                session::signup,
                session::logout,
                session::get_theme,
                session::toggle_theme,
                session::get_view_mode,
                session::toggle_view_mode,
                // Notifications
                notifications::get_notifications,
                notifications::get_unread_count,
                notifications::mark_notification_read,
                notifications::clear_notifications,
                // Products
                products::get_products,
                products::get_product_facets,
                products::update_product,
                products::delete_product,
                products::get_drafts,
                products::delete_draft,
                products::get_dashboard_stats,
                // Product wizard
                wizard::get_wizard_steps,
                wizard::get_form_options,
                wizard::get_wizard_state,
                wizard::wizard_next,
                wizard::wizard_previous,
                wizard::wizard_goto_step,
                wizard::wizard_update_field,
                wizard::wizard_change_product_type,
                wizard::wizard_add_variant,
                wizard::wizard_update_variant,
                wizard::wizard_remove_variant,
                wizard::wizard_add_variant_image,
                wizard::wizard_remove_variant_image,
                wizard::wizard_add_bundle_item,
                wizard::wizard_update_bundle_item,
                wizard::wizard_remove_bundle_item,
                wizard::wizard_add_image,
                wizard::wizard_remove_image,
                wizard::wizard_add_keyword,
                wizard::wizard_remove_keyword,
                wizard::wizard_generate_barcode,
                wizard::wizard_reset,
                wizard::wizard_save_product,
                wizard::wizard_save_draft,
                wizard::wizard_resume_draft,
                // Stocks
                stocks::get_stocks,
                stocks::get_low_stock,
                // Sales
                sales::get_sales,
                sales::get_sales_summary,
                // Documents
                documents::get_documents,
                documents::open_document,
                // Settings
                settings::get_config,
                settings::clear_all_data,
            ])
            .run(tauri::generate_context!());

        if let Err(e) = result {
            tracing::error!(error = %e, "Application exited with an error");
            std::process::exit(1);
        }
    }
}
