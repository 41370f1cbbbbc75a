pub mod documents;
pub mod notifications;
pub mod products;
pub mod sales;
pub mod session;
pub mod settings;
pub mod stocks;
pub mod wizard;

use tauri::AppHandle;
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};

/// Shows a blocking OK/Cancel dialog. Only call this from async commands,
/// and never while holding the context lock.
pub(crate) fn ask(app: &AppHandle, title: &str, message: &str) -> bool {
    app.dialog()
        .message(message)
        .title(title)
        .kind(MessageDialogKind::Warning)
        .buttons(MessageDialogButtons::OkCancel)
        .blocking_show()
}
