//! Root-owned application state.
//!
//! One [`AppContext`] holds the session, the inventory collections and the
//! product wizard. Everything except sign-in, theme and notifications requires
//! an authenticated session.

use crate::config::AppConfig;
use crate::db::Database;
use crate::error::{InventoryError, Result};
use crate::inventory::Inventory;
use crate::models::{
    DashboardStats, Document, NotificationType, Product, Sale, SalesSummary, Stock, Theme, User,
};
use crate::session::Session;
use crate::store::{KeyValueStore, Storage};
use crate::views::{DocumentFilter, ProductFacets, ProductFilter, SaleFilter, StockFilter, ViewMode};
use crate::wizard::ProductWizard;
use std::path::Path;
use std::sync::{Arc, Mutex};

pub const DELETE_PRODUCT_PROMPT: &str = "Are you sure you want to delete this product?";
pub const CLEAR_ALL_DATA_PROMPT: &str =
    "Are you sure you want to clear all data? This action cannot be undone.";

/// Blocking yes/no question put to the user before a destructive action.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// An answer obtained before the call, e.g. from a dialog shown by the shell.
impl Confirm for bool {
    fn confirm(&self, _message: &str) -> bool {
        *self
    }
}

pub struct AppContext {
    config: AppConfig,
    storage: Storage,
    session: Session,
    inventory: Inventory,
    wizard: ProductWizard,
    view_mode: ViewMode,
}

/// Shared handle managed by the desktop shell.
pub struct AppState(pub Mutex<AppContext>);

impl AppState {
    pub fn new(context: AppContext) -> Self {
        Self(Mutex::new(context))
    }
}

impl AppContext {
    pub fn new(config: AppConfig, backend: Arc<dyn KeyValueStore>) -> Result<Self> {
        let storage = Storage::new(backend, config.storage.key_prefix.clone());
        let session = Session::load(storage.clone())?;
        let inventory = Inventory::load(storage.clone(), &config.seed)?;

        tracing::info!(
            prefix = %storage.prefix(),
            authenticated = session.is_authenticated(),
            theme = session.theme().as_str(),
            "Application context ready"
        );

        Ok(Self {
            config,
            storage,
            session,
            inventory,
            wizard: ProductWizard::new(),
            view_mode: ViewMode::default(),
        })
    }

    /// Opens (creating if needed) the SQLite store under `data_dir`.
    pub fn open(config: AppConfig, data_dir: &Path) -> Result<Self> {
        let db = Database::open(&data_dir.join(&config.storage.database_file))?;
        db.initialize()?;
        Self::new(config, Arc::new(db))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn ensure_authenticated(&self) -> Result<()> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(InventoryError::NotAuthenticated)
        }
    }

    // ===== SESSION =====

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<User> {
        self.session.login(email, password).cloned()
    }

    pub fn signup(&mut self, name: &str, email: &str, password: &str) -> Result<User> {
        self.session.signup(name, email, password).cloned()
    }

    /// Signs out and discards any half-finished wizard input.
    pub fn logout(&mut self) -> Result<()> {
        self.wizard.reset();
        self.session.logout()
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        self.session.toggle_theme()
    }

    pub fn mark_notification_read(&mut self, id: &str) -> Result<bool> {
        self.session.mark_as_read(id)
    }

    pub fn clear_notifications(&mut self) -> Result<()> {
        self.session.clear_notifications()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn toggle_view_mode(&mut self) -> ViewMode {
        self.view_mode = self.view_mode.toggled();
        self.view_mode
    }

    // ===== COLLECTIONS =====

    pub fn inventory(&self) -> Result<&Inventory> {
        self.ensure_authenticated()?;
        Ok(&self.inventory)
    }

    pub fn products(&self, filter: &ProductFilter) -> Result<Vec<&Product>> {
        Ok(filter.apply(self.inventory()?.products()))
    }

    pub fn product_facets(&self) -> Result<ProductFacets> {
        Ok(ProductFacets::collect(self.inventory()?.products()))
    }

    pub fn stocks(&self, filter: &StockFilter) -> Result<Vec<&Stock>> {
        Ok(filter.apply(self.inventory()?.stocks()))
    }

    pub fn sales(&self, filter: &SaleFilter) -> Result<Vec<&Sale>> {
        Ok(filter.apply(self.inventory()?.sales()))
    }

    pub fn documents(&self, filter: &DocumentFilter) -> Result<Vec<&Document>> {
        Ok(filter.apply(self.inventory()?.documents()))
    }

    pub fn dashboard_stats(&self) -> Result<DashboardStats> {
        Ok(self.inventory()?.dashboard_stats())
    }

    pub fn sales_summary(&self) -> Result<SalesSummary> {
        Ok(self.inventory()?.sales_summary())
    }

    /// Replaces a product wholesale; the caller supplies the full entity.
    pub fn update_product(&mut self, product: Product) -> Result<()> {
        self.ensure_authenticated()?;

        let title = format!("{} Updated", product.item_type.label());
        let message = format!("{} has been updated successfully.", product.name);
        self.inventory.update_product(product)?;
        self.session
            .add_notification(NotificationType::Success, &title, &message)?;
        Ok(())
    }

    /// Deletes a product and its stock row once the user confirms. Declining
    /// returns [`InventoryError::Cancelled`] and changes nothing.
    pub fn delete_product(&mut self, id: &str, confirm: &dyn Confirm) -> Result<Product> {
        self.ensure_authenticated()?;
        if self.inventory.product(id).is_none() {
            return Err(InventoryError::ProductNotFound(id.to_string()));
        }
        if !confirm.confirm(DELETE_PRODUCT_PROMPT) {
            return Err(InventoryError::Cancelled);
        }

        let removed = self.inventory.delete_product(id)?;
        let title = format!("{} Deleted", removed.item_type.label());
        let message = format!("{} has been removed from inventory.", removed.name);
        self.session
            .add_notification(NotificationType::Info, &title, &message)?;
        Ok(removed)
    }

    pub fn delete_draft(&mut self, id: &str) -> Result<Product> {
        self.ensure_authenticated()?;
        self.inventory.delete_draft(id)
    }

    // ===== WIZARD =====

    pub fn wizard(&self) -> Result<&ProductWizard> {
        self.ensure_authenticated()?;
        Ok(&self.wizard)
    }

    /// Direct access for field edits and step navigation. Saving goes through
    /// [`AppContext::save_product`] and [`AppContext::save_draft`].
    pub fn wizard_mut(&mut self) -> Result<&mut ProductWizard> {
        self.ensure_authenticated()?;
        Ok(&mut self.wizard)
    }

    /// Finishes the wizard. Returns `Ok(None)` when the draft is not valid yet.
    pub fn save_product(&mut self) -> Result<Option<Product>> {
        self.ensure_authenticated()?;
        let Some(product) = self.wizard.finalize_save() else {
            return Ok(None);
        };

        let title = format!("{} Added Successfully", product.item_type.label());
        let message = format!("{} has been added to your inventory.", product.name);
        let saved = self.inventory.add_product(product)?.clone();
        self.session
            .add_notification(NotificationType::Success, &title, &message)?;
        Ok(Some(saved))
    }

    pub fn save_draft(&mut self) -> Result<Product> {
        self.ensure_authenticated()?;
        let draft = self.wizard.save_draft();
        self.inventory.add_draft(draft.clone())?;
        self.session.add_notification(
            NotificationType::Info,
            "Draft Saved",
            "Product saved as draft successfully!",
        )?;
        Ok(draft)
    }

    /// Loads a stored draft into the wizard. The stored copy is kept.
    pub fn resume_draft(&mut self, id: &str) -> Result<()> {
        self.ensure_authenticated()?;
        let draft = self
            .inventory
            .drafts()
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| InventoryError::DraftNotFound(id.to_string()))?;
        self.wizard.resume(draft);
        Ok(())
    }

    // ===== SETTINGS =====

    /// Wipes every stored key and starts over as on first run: signed out,
    /// light theme, fresh demo data.
    pub fn clear_all_data(&mut self, confirm: &dyn Confirm) -> Result<()> {
        if !confirm.confirm(CLEAR_ALL_DATA_PROMPT) {
            return Err(InventoryError::Cancelled);
        }

        self.storage.clear_all()?;
        self.session = Session::load(self.storage.clone())?;
        self.inventory = Inventory::load(self.storage.clone(), &self.config.seed)?;
        self.wizard.reset();
        self.view_mode = ViewMode::default();

        tracing::info!("All stored data cleared");
        Ok(())
    }
}
