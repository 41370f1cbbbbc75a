//! Integration tests for the inventory state and its persistence
//! These tests run against in-memory stores, or a temp-dir SQLite file where reload matters

#[cfg(test)]
mod tests {
    use crate::catalog::{self, FormOptions};
    use crate::config::{AppConfig, SeedConfig};
    use crate::context::{AppContext, Confirm, CLEAR_ALL_DATA_PROMPT, DELETE_PRODUCT_PROMPT};
    use crate::db::Database;
    use crate::error::InventoryError;
    use crate::inventory::Inventory;
    use crate::models::{
        ItemType, NotificationType, Product, ProductType, Stock, StockLevel, Theme, UserRole,
    };
    use crate::seed;
    use crate::session::Session;
    use crate::store::{KeyValueStore, Loaded, MemoryStore, Storage, StoreKey};
    use crate::views::{
        format_size, DocumentFilter, ProductFacets, ProductFilter, SaleFilter, StockFilter,
        ViewMode,
    };
    use crate::wizard::{
        steps, BundleItemField, ProductPatch, ProductWizard, VariantField, WizardStep,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::sync::Arc;

    /// Fixed seed so the generated stock and sale numbers are reproducible
    fn test_config() -> AppConfig {
        AppConfig {
            seed: SeedConfig {
                enabled: true,
                rng_seed: Some(42),
            },
            ..Default::default()
        }
    }

    fn setup_context() -> (Arc<MemoryStore>, AppContext) {
        let store = Arc::new(MemoryStore::new());
        let ctx = AppContext::new(test_config(), store.clone()).expect("Failed to build context");
        (store, ctx)
    }

    fn setup_logged_in() -> (Arc<MemoryStore>, AppContext) {
        let (store, mut ctx) = setup_context();
        ctx.login("admin@munc.com", "secret").expect("Failed to log in");
        (store, ctx)
    }

    fn storage_for(store: &Arc<MemoryStore>) -> Storage {
        Storage::new(store.clone(), "munc")
    }

    fn valid_patch(name: &str, sku: &str, category: &str) -> ProductPatch {
        ProductPatch {
            name: Some(name.to_string()),
            sku: Some(sku.to_string()),
            category: Some(category.to_string()),
            ..Default::default()
        }
    }

    fn stock(current: u32, min: u32) -> Stock {
        Stock {
            id: "stock-x".to_string(),
            product_id: "x".to_string(),
            product_name: "Widget".to_string(),
            current_stock: current,
            min_stock: min,
            max_stock: min * 4,
            location: "Main Warehouse - Delhi".to_string(),
            last_updated: String::new(),
        }
    }

    // ===== STORE TESTS =====

    #[test]
    fn test_keys_are_namespaced() {
        assert_eq!(StoreKey::Products.namespaced("munc"), "munc-products");
        assert_eq!(StoreKey::ProductDrafts.namespaced("munc"), "munc-product-drafts");
        assert_eq!(StoreKey::AuthState.namespaced("munc"), "munc-auth-state");
        assert_eq!(StoreKey::ALL.len(), 8);
    }

    #[test]
    fn test_corrupt_value_is_reported_not_raised() {
        let store = Arc::new(MemoryStore::new());
        let storage = storage_for(&store);

        storage.write_raw(StoreKey::Theme, "{not json").unwrap();
        assert!(matches!(
            storage.load::<Theme>(StoreKey::Theme).unwrap(),
            Loaded::Corrupt
        ));
        assert!(matches!(
            storage.load::<Theme>(StoreKey::Notifications).unwrap(),
            Loaded::Missing
        ));
    }

    #[test]
    fn test_clear_all_leaves_other_namespaces() {
        let store = Arc::new(MemoryStore::new());
        store.set("other-products", "[]").unwrap();
        let storage = storage_for(&store);
        storage.save(StoreKey::Theme, &Theme::Dark).unwrap();

        storage.clear_all().unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("other-products").unwrap(), Some("[]".to_string()));
    }

    #[test]
    fn test_database_kv_roundtrip_and_prefix_clear() {
        let db = Database::open_in_memory().expect("Failed to open database");
        db.initialize().expect("Failed to initialize database");

        db.set("munc-theme", "\"dark\"").unwrap();
        db.set("munc-theme", "\"light\"").unwrap();
        db.set("munc%-x", "1").unwrap();
        db.set("muncx-y", "2").unwrap();
        assert_eq!(db.get("munc-theme").unwrap(), Some("\"light\"".to_string()));

        // '%' in the prefix must not act as a wildcard
        db.clear("munc%-").unwrap();
        assert_eq!(db.get("munc%-x").unwrap(), None);
        assert!(db.get("munc-theme").unwrap().is_some());
        assert!(db.get("muncx-y").unwrap().is_some());

        db.remove("munc-theme").unwrap();
        assert_eq!(db.get("munc-theme").unwrap(), None);
    }

    #[test]
    fn test_database_migration_adds_updated_at() {
        let db = Database::open_in_memory().expect("Failed to open database");
        {
            let conn = db.conn.lock().unwrap();
            conn.execute_batch(
                "CREATE TABLE kv_store (key TEXT PRIMARY KEY NOT NULL, value TEXT NOT NULL);
                 INSERT INTO kv_store (key, value) VALUES ('munc-theme', '\"dark\"');",
            )
            .expect("Failed to create legacy table");
        }

        db.initialize().expect("Migration failed");
        // Second run must be a no-op
        db.initialize().expect("Repeated migration failed");

        let conn = db.conn.lock().unwrap();
        let columns: Vec<String> = conn
            .prepare("PRAGMA table_info(kv_store)")
            .unwrap()
            .query_map([], |row| row.get::<_, String>(1))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();
        assert!(columns.contains(&"updated_at".to_string()));
        drop(conn);

        assert_eq!(db.get("munc-theme").unwrap(), Some("\"dark\"".to_string()));
    }

    #[test]
    fn test_fresh_database_has_updated_at() {
        let db = Database::open_in_memory().expect("Failed to open database");
        db.initialize().expect("Failed to initialize database");
        db.set("munc-theme", "\"dark\"").unwrap();

        let conn = db.conn.lock().unwrap();
        let sql: String = conn
            .query_row(
                "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = 'kv_store'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        // Declared by the schema itself, not added by ALTER TABLE
        assert!(sql.contains("updated_at DATETIME DEFAULT CURRENT_TIMESTAMP"));

        let stamped: Option<String> = conn
            .query_row(
                "SELECT updated_at FROM kv_store WHERE key = 'munc-theme'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(stamped.is_some());
    }

    // ===== CONFIG TESTS =====

    #[test]
    fn test_config_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [storage]
            key_prefix = "test"

            [seed]
            rng_seed = 7
            "#,
        )
        .expect("Failed to parse config");

        assert_eq!(config.storage.key_prefix, "test");
        assert_eq!(config.storage.database_file, "munc_inventory.db");
        assert!(config.seed.enabled);
        assert_eq!(config.seed.rng_seed, Some(7));
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_config_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("munc.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_config_rejects_bad_toml() {
        let result = AppConfig::from_toml_str("[storage\nkey_prefix = ");
        assert!(matches!(result, Err(InventoryError::Config(_))));
    }

    // ===== BOOTSTRAP TESTS =====

    #[test]
    fn test_first_run_seeds_demo_data() {
        let (store, ctx) = setup_logged_in();
        let inventory = ctx.inventory().unwrap();

        assert_eq!(inventory.products().len(), 5);
        assert_eq!(inventory.stocks().len(), 5);
        assert_eq!(inventory.sales().len(), 5);
        assert_eq!(inventory.documents().len(), 3);
        assert!(inventory.drafts().is_empty());

        // Seeded collections are written back immediately
        let storage = storage_for(&store);
        for key in [StoreKey::Products, StoreKey::Stocks, StoreKey::Sales, StoreKey::Documents] {
            assert!(storage.raw(key).unwrap().is_some(), "{:?} not persisted", key);
        }
    }

    #[test]
    fn test_seeded_stock_follows_product() {
        let (_store, ctx) = setup_logged_in();
        let inventory = ctx.inventory().unwrap();

        let headphones = inventory.stock_for("1").expect("Missing stock for product 1");
        assert_eq!(headphones.id, "stock-1");
        assert_eq!(headphones.product_name, "Premium Wireless Headphones");
        assert_eq!(headphones.current_stock, 50);
        assert_eq!(headphones.min_stock, 10);
        assert_eq!(headphones.max_stock, 100);
        assert_eq!(headphones.location, "Main Warehouse - Delhi");

        // No initial stock: random level, maximum from the fallback of 50
        let consultation = inventory.stock_for("2").unwrap();
        assert!((10..110).contains(&consultation.current_stock));
        assert_eq!(consultation.max_stock, 100);
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let (_a_store, a) = setup_logged_in();
        let (_b_store, b) = setup_logged_in();

        let levels = |ctx: &AppContext| -> Vec<u32> {
            ctx.inventory()
                .unwrap()
                .stocks()
                .iter()
                .map(|s| s.current_stock)
                .collect()
        };
        assert_eq!(levels(&a), levels(&b));
    }

    #[test]
    fn test_seed_sales_use_selling_price() {
        let mut rng = StdRng::seed_from_u64(3);
        let sales = seed::sample_sales(&seed::sample_products(), &mut rng);

        assert_eq!(sales.len(), 5);
        for sale in &sales {
            assert!((1..=5).contains(&sale.quantity));
            assert!((sale.total_price - sale.unit_price * sale.quantity as f64).abs() < 0.01);
            assert_eq!(sale.payment_method, "card");
        }
        assert!((sales[0].unit_price - 12000.0).abs() < 0.01);
    }

    #[test]
    fn test_seeding_disabled_starts_empty() {
        let store = Arc::new(MemoryStore::new());
        let config = AppConfig {
            seed: SeedConfig {
                enabled: false,
                rng_seed: None,
            },
            ..Default::default()
        };
        let mut ctx = AppContext::new(config, store).unwrap();
        ctx.login("a@b.c", "x").unwrap();

        let inventory = ctx.inventory().unwrap();
        assert!(inventory.products().is_empty());
        assert!(inventory.stocks().is_empty());
    }

    #[test]
    fn test_corrupt_products_are_reseeded() {
        let store = Arc::new(MemoryStore::new());
        let storage = storage_for(&store);
        storage.write_raw(StoreKey::Products, "garbage").unwrap();

        let inventory = Inventory::load(storage.clone(), &test_config().seed).unwrap();
        assert_eq!(inventory.products().len(), 5);

        let persisted = storage.load::<Vec<Product>>(StoreKey::Products).unwrap();
        assert_eq!(persisted.into_option().map(|p| p.len()), Some(5));
    }

    #[test]
    fn test_corrupt_stocks_start_empty_and_stay_untouched() {
        let store = Arc::new(MemoryStore::new());
        let storage = storage_for(&store);
        storage.write_raw(StoreKey::Stocks, "[{").unwrap();

        let inventory = Inventory::load(storage.clone(), &test_config().seed).unwrap();
        assert!(inventory.stocks().is_empty());
        assert_eq!(storage.raw(StoreKey::Stocks).unwrap(), Some("[{".to_string()));
    }

    #[test]
    fn test_corrupt_auth_state_means_signed_out() {
        let store = Arc::new(MemoryStore::new());
        let storage = storage_for(&store);
        storage.write_raw(StoreKey::AuthState, "{\"user\":").unwrap();
        storage.save(StoreKey::Theme, &Theme::Dark).unwrap();

        let session = Session::load(storage).unwrap();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert_eq!(session.theme(), Theme::Dark);
    }

    // ===== SESSION TESTS =====

    #[test]
    fn test_login_derives_name_from_email() {
        let (_store, mut ctx) = setup_context();

        let user = ctx.login("jane.doe@munc.com", "pw").unwrap();
        assert_eq!(user.name, "jane.doe");
        assert_eq!(user.id, "1");
        assert_eq!(user.role, UserRole::Admin);
        assert!(ctx.session().is_authenticated());

        let last = ctx.session().notifications().last().unwrap();
        assert_eq!(last.title, "Welcome back!");
        assert_eq!(last.kind, NotificationType::Success);
    }

    #[test]
    fn test_login_requires_both_fields() {
        let (_store, mut ctx) = setup_context();

        assert!(matches!(
            ctx.login("", "pw"),
            Err(InventoryError::InvalidCredentials)
        ));
        assert!(matches!(
            ctx.login("a@b.c", ""),
            Err(InventoryError::InvalidCredentials)
        ));
        assert!(!ctx.session().is_authenticated());
        assert!(ctx.session().notifications().is_empty());
    }

    #[test]
    fn test_signup_creates_regular_user() {
        let (_store, mut ctx) = setup_context();

        let user = ctx.signup("Jane", "jane@munc.com", "pw").unwrap();
        assert_eq!(user.name, "Jane");
        assert_eq!(user.role, UserRole::User);
        assert_ne!(user.id, "1");
        assert_eq!(
            ctx.session().notifications().last().unwrap().title,
            "Account created!"
        );
    }

    #[test]
    fn test_logout_clears_auth_and_wizard() {
        let (store, mut ctx) = setup_logged_in();
        ctx.wizard_mut().unwrap().update_field(valid_patch("Thing", "T-1", "toys"));

        ctx.logout().unwrap();

        assert!(!ctx.session().is_authenticated());
        assert_eq!(storage_for(&store).raw(StoreKey::AuthState).unwrap(), None);
        assert!(matches!(
            ctx.inventory(),
            Err(InventoryError::NotAuthenticated)
        ));

        ctx.login("admin@munc.com", "secret").unwrap();
        assert!(ctx.wizard().unwrap().draft().name.is_empty());
    }

    #[test]
    fn test_theme_toggle_twice_restores_theme() {
        let (store, mut ctx) = setup_context();
        assert_eq!(ctx.session().theme(), Theme::Light);
        let before = ctx.session().notifications().len();

        assert_eq!(ctx.toggle_theme().unwrap(), Theme::Dark);
        assert_eq!(ctx.toggle_theme().unwrap(), Theme::Light);

        let notifications = ctx.session().notifications();
        assert_eq!(notifications.len(), before + 2);
        assert_eq!(notifications[before].message, "Switched to dark mode successfully.");
        assert_eq!(notifications[before + 1].message, "Switched to light mode successfully.");

        let stored = storage_for(&store).load::<Theme>(StoreKey::Theme).unwrap();
        assert_eq!(stored.into_option(), Some(Theme::Light));
    }

    #[test]
    fn test_mark_as_read_is_idempotent() {
        let (_store, mut ctx) = setup_logged_in();
        let id = ctx.session().notifications()[0].id.clone();
        assert_eq!(ctx.session().unread_count(), 1);

        assert!(ctx.mark_notification_read(&id).unwrap());
        assert!(ctx.mark_notification_read(&id).unwrap());
        assert_eq!(ctx.session().unread_count(), 0);

        assert!(!ctx.mark_notification_read("missing").unwrap());
    }

    #[test]
    fn test_clear_notifications() {
        let (store, mut ctx) = setup_logged_in();
        ctx.clear_notifications().unwrap();

        assert!(ctx.session().notifications().is_empty());
        assert_eq!(storage_for(&store).raw(StoreKey::Notifications).unwrap(), None);
    }

    #[test]
    fn test_view_mode_toggles() {
        let (_store, mut ctx) = setup_context();
        assert_eq!(ctx.view_mode(), ViewMode::Grid);
        assert_eq!(ctx.toggle_view_mode(), ViewMode::List);
        assert_eq!(ctx.toggle_view_mode(), ViewMode::Grid);
    }

    // ===== AUTH GATE TESTS =====

    #[test]
    fn test_collections_require_login() {
        let (_store, mut ctx) = setup_context();

        assert!(matches!(
            ctx.products(&ProductFilter::default()),
            Err(InventoryError::NotAuthenticated)
        ));
        assert!(matches!(
            ctx.dashboard_stats(),
            Err(InventoryError::NotAuthenticated)
        ));
        assert!(matches!(
            ctx.delete_product("1", &true),
            Err(InventoryError::NotAuthenticated)
        ));

        assert!(matches!(
            ctx.wizard_mut(),
            Err(InventoryError::NotAuthenticated)
        ));
        assert!(matches!(ctx.wizard(), Err(InventoryError::NotAuthenticated)));
        assert!(matches!(
            ctx.save_product(),
            Err(InventoryError::NotAuthenticated)
        ));
        assert!(matches!(
            ctx.save_draft(),
            Err(InventoryError::NotAuthenticated)
        ));

        // Signing in opens an untouched wizard
        ctx.login("admin@munc.com", "secret").unwrap();
        assert!(ctx.wizard().unwrap().draft().name.is_empty());
    }

    // ===== WIZARD TESTS =====

    #[test]
    fn test_wizard_steps_metadata() {
        let info = steps();
        assert_eq!(info.len(), 4);
        assert_eq!(info[0].title, "General Information");
        assert_eq!(info[3].number, 4);
        assert_eq!(WizardStep::Variants.next(), None);
        assert_eq!(WizardStep::GeneralInformation.previous(), None);
    }

    #[test]
    fn test_wizard_gate_blocks_advance() {
        let mut wizard = ProductWizard::new();
        assert!(!wizard.can_advance());
        assert!(!wizard.advance());
        assert_eq!(wizard.step(), WizardStep::GeneralInformation);

        wizard.update_field(valid_patch("Lamp", "LMP-1", "home"));
        assert!(wizard.advance());
        assert!(wizard.advance());
        assert!(wizard.advance());
        assert_eq!(wizard.step(), WizardStep::Variants);
        assert!(!wizard.can_advance());
        assert!(!wizard.advance());

        assert!(wizard.retreat());
        assert_eq!(wizard.step(), WizardStep::DescriptionMedia);
    }

    #[test]
    fn test_wizard_goto_only_backwards() {
        let mut wizard = ProductWizard::new();
        wizard.update_field(valid_patch("Lamp", "LMP-1", "home"));
        wizard.advance();

        assert!(!wizard.goto_step(WizardStep::Variants));
        assert_eq!(wizard.step(), WizardStep::PricingTax);
        assert!(wizard.goto_step(WizardStep::GeneralInformation));
        assert_eq!(wizard.step(), WizardStep::GeneralInformation);
    }

    #[test]
    fn test_update_field_merges() {
        let mut wizard = ProductWizard::new();
        wizard.update_field(valid_patch("Lamp", "LMP-1", "home"));
        wizard.update_field(ProductPatch {
            selling_price: Some(499.0),
            ..Default::default()
        });

        let draft = wizard.draft();
        assert_eq!(draft.name, "Lamp");
        assert_eq!(draft.selling_price, Some(499.0));
        assert_eq!(draft.brand, None);
    }

    #[test]
    fn test_product_type_payloads_are_exclusive() {
        let mut wizard = ProductWizard::new();
        wizard.update_field(valid_patch("Shirt", "SH-1", "clothing"));

        wizard.change_product_type(ProductType::Variant);
        assert_eq!(wizard.draft().variants.len(), 1);
        assert_eq!(wizard.draft().variants[0].sku, "SH-1-VAR-001");
        assert!(wizard.draft().bundle_items.is_empty());
        assert_eq!(wizard.draft().reorder_level, Some(25));
        assert!(wizard.draft().track_serial);

        wizard.change_product_type(ProductType::Bundle);
        assert!(wizard.draft().variants.is_empty());
        assert_eq!(wizard.draft().bundle_items.len(), 1);
        assert_eq!(wizard.draft().bundle_items[0].quantity, 1);
        assert_eq!(wizard.draft().lead_time.as_deref(), Some("3-days"));

        wizard.change_product_type(ProductType::Simple);
        assert!(wizard.draft().variants.is_empty());
        assert!(wizard.draft().bundle_items.is_empty());
        assert_eq!(wizard.draft().reorder_level, Some(10));
        assert!(!wizard.draft().batch_tracking);
    }

    #[test]
    fn test_variant_editing() {
        let mut wizard = ProductWizard::new();
        wizard.change_product_type(ProductType::Variant);
        assert_eq!(wizard.draft().variants[0].sku, "SKU-VAR-001");

        let added = wizard.add_variant().sku.clone();
        assert_eq!(added, "SKU-VAR-2");

        assert!(wizard.update_variant(1, VariantField::Color("Red".to_string())));
        assert!(wizard.update_variant(1, VariantField::Stock(7)));
        assert!(!wizard.update_variant(5, VariantField::Price(1.0)));
        assert_eq!(wizard.draft().variants[1].color, "Red");
        assert_eq!(wizard.draft().variants[1].stock, 7);

        assert!(wizard.add_variant_image(0, "blob:a".to_string()));
        assert!(wizard.remove_variant_image(0, 0));
        assert!(!wizard.remove_variant_image(0, 0));

        assert!(wizard.remove_variant(0).is_some());
        assert_eq!(wizard.draft().variants.len(), 1);
        assert!(wizard.remove_variant(3).is_none());
    }

    #[test]
    fn test_bundle_total_and_prior_items_untouched() {
        let mut wizard = ProductWizard::new();
        wizard.change_product_type(ProductType::Bundle);
        wizard.update_bundle_item(0, BundleItemField::Quantity(2));
        wizard.update_bundle_item(0, BundleItemField::Price(50.0));
        let first = wizard.draft().bundle_items[0].clone();

        wizard.add_bundle_item();
        wizard.update_bundle_item(1, BundleItemField::Price(150.0));

        assert_eq!(wizard.draft().bundle_items[0], first);
        assert!((wizard.bundle_total() - 250.0).abs() < 0.01);

        wizard.remove_bundle_item(1);
        assert!((wizard.bundle_total() - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_bundle_item_copies_catalog_entry() {
        let mut wizard = ProductWizard::new();
        wizard.change_product_type(ProductType::Bundle);

        wizard.update_bundle_item(0, BundleItemField::ProductId("2".to_string()));
        let item = &wizard.draft().bundle_items[0];
        assert_eq!(item.product_id, "2");
        assert_eq!(item.product_name, "Wireless Mouse");
        assert!((item.price - 1200.0).abs() < 0.01);

        // The copy is a snapshot and can be overridden
        wizard.update_bundle_item(0, BundleItemField::Price(999.0));
        assert!((wizard.draft().bundle_items[0].price - 999.0).abs() < 0.01);
        assert!((catalog::find_bundle_entry(ItemType::Goods, "2").unwrap().price - 1200.0).abs() < 0.01);

        // Services look up the service catalog
        wizard.update_field(ProductPatch {
            item_type: Some(ItemType::Services),
            ..Default::default()
        });
        wizard.update_bundle_item(0, BundleItemField::ProductId("s3".to_string()));
        assert_eq!(wizard.draft().bundle_items[0].product_name, "Training Session");

        // Unknown ids keep the current name and price
        wizard.update_bundle_item(0, BundleItemField::ProductId("nope".to_string()));
        assert_eq!(wizard.draft().bundle_items[0].product_name, "Training Session");
        assert_eq!(wizard.draft().bundle_items[0].product_id, "nope");
    }

    #[test]
    fn test_images_keywords_and_barcode() {
        let mut wizard = ProductWizard::new();
        wizard.add_image("blob:1".to_string());
        wizard.add_image("blob:2".to_string());
        assert!(wizard.remove_image(0));
        assert_eq!(wizard.draft().images, vec!["blob:2".to_string()]);
        assert!(!wizard.remove_image(4));

        assert!(wizard.add_keyword("Durable"));
        assert!(!wizard.add_keyword("Durable"));
        assert!(wizard.remove_keyword("Durable"));
        assert!(wizard.draft().keywords.is_empty());
        assert!(wizard.suggested_keywords().contains(&"Warranty"));

        let mut rng = StdRng::seed_from_u64(9);
        let barcode = wizard.generate_barcode(&mut rng).to_string();
        assert!(!barcode.is_empty() && barcode.len() <= 12);
        assert!(barcode.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(wizard.draft().barcode.as_deref(), Some(barcode.as_str()));
    }

    #[test]
    fn test_finalize_rejects_invalid_draft() {
        let mut wizard = ProductWizard::new();
        wizard.update_field(ProductPatch {
            name: Some("No SKU".to_string()),
            category: Some("toys".to_string()),
            ..Default::default()
        });
        let before = wizard.clone();

        assert!(wizard.finalize_save().is_none());
        assert_eq!(wizard, before);
    }

    #[test]
    fn test_finalize_assigns_fresh_ids_and_resets() {
        let mut wizard = ProductWizard::new();
        wizard.update_field(valid_patch("A", "A-1", "toys"));
        wizard.advance();
        let first = wizard.finalize_save().expect("Valid draft should save");

        assert_eq!(wizard.step(), WizardStep::GeneralInformation);
        assert!(wizard.draft().name.is_empty());

        wizard.update_field(valid_patch("A", "A-1", "toys"));
        let second = wizard.finalize_save().unwrap();

        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);
        assert!(!first.created_at.is_empty());
        assert!(!first.is_draft);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut wizard = ProductWizard::new();
        assert!(!wizard.snapshot().is_valid);

        wizard.update_field(valid_patch("A", "A-1", "toys"));
        let snapshot = wizard.snapshot();
        assert!(snapshot.is_valid);
        assert!(snapshot.can_advance);
        assert_eq!(snapshot.step, WizardStep::GeneralInformation);
        assert_eq!(snapshot.draft.sku, "A-1");
    }

    // ===== CATALOG TESTS =====

    #[test]
    fn test_form_options_depend_on_item_type() {
        let goods = FormOptions::new(ItemType::Goods, "electronics");
        assert_eq!(goods.product_types.len(), 3);
        assert!(goods.sub_categories.iter().any(|o| o.value == "accessories"));
        assert_eq!(goods.bundle_catalog.len(), 5);

        let services = FormOptions::new(ItemType::Services, "installation");
        assert_eq!(services.product_types.len(), 2);
        assert!(services
            .product_types
            .iter()
            .all(|o| o.product_type != ProductType::Variant));
        assert!(services.sub_categories.is_empty());
        assert_eq!(services.bundle_catalog.len(), 4);

        assert_eq!(catalog::warehouse_name("warehouse-b"), Some("Secondary Warehouse - Mumbai"));
        assert_eq!(catalog::warehouse_name("nowhere"), None);
    }

    // ===== PRODUCT TESTS =====

    #[test]
    fn test_save_product_adds_product_stock_and_notification() {
        let (_store, mut ctx) = setup_logged_in();
        ctx.wizard_mut().unwrap().update_field(ProductPatch {
            initial_stock: Some(5),
            reorder_level: Some(10),
            warehouse: Some("warehouse-c".to_string()),
            ..valid_patch("Desk Lamp", "LMP-001", "home")
        });

        let saved = ctx.save_product().unwrap().expect("Product should be saved");
        let inventory = ctx.inventory().unwrap();
        assert_eq!(inventory.products().len(), 6);
        assert_eq!(inventory.products().last().unwrap().id, saved.id);

        let stock = inventory.stock_for(&saved.id).expect("Stock row missing");
        assert_eq!(stock.id, format!("stock-{}", saved.id));
        assert_eq!(stock.current_stock, 5);
        assert_eq!(stock.min_stock, 10);
        assert_eq!(stock.max_stock, 10);
        assert_eq!(stock.location, "Distribution Center - Bangalore");
        assert!(stock.is_low());

        let last = ctx.session().notifications().last().unwrap();
        assert_eq!(last.title, "Product Added Successfully");
        assert_eq!(last.message, "Desk Lamp has been added to your inventory.");
    }

    #[test]
    fn test_save_service_uses_service_wording() {
        let (_store, mut ctx) = setup_logged_in();
        ctx.wizard_mut().unwrap().update_field(ProductPatch {
            item_type: Some(ItemType::Services),
            ..valid_patch("Audit", "SRV-9", "consulting")
        });

        let saved = ctx.save_product().unwrap().unwrap();
        let stock = ctx.inventory().unwrap().stock_for(&saved.id).unwrap().clone();
        assert_eq!(stock.current_stock, 0);
        assert_eq!(stock.max_stock, 0);
        assert_eq!(stock.location, "Main Warehouse - Delhi");

        let last = ctx.session().notifications().last().unwrap();
        assert_eq!(last.title, "Service Added Successfully");
    }

    #[test]
    fn test_save_invalid_product_is_noop() {
        let (_store, mut ctx) = setup_logged_in();
        let notifications = ctx.session().notifications().len();

        assert!(ctx.save_product().unwrap().is_none());
        assert_eq!(ctx.inventory().unwrap().products().len(), 5);
        assert_eq!(ctx.session().notifications().len(), notifications);
    }

    #[test]
    fn test_update_product_syncs_stock_name() {
        let (_store, mut ctx) = setup_logged_in();
        let mut product = ctx.inventory().unwrap().product("4").unwrap().clone();
        product.name = "Rugged Phone Case".to_string();

        ctx.update_product(product).unwrap();

        let inventory = ctx.inventory().unwrap();
        assert_eq!(inventory.product("4").unwrap().name, "Rugged Phone Case");
        assert_eq!(inventory.stock_for("4").unwrap().product_name, "Rugged Phone Case");
        assert_eq!(
            ctx.session().notifications().last().unwrap().title,
            "Product Updated"
        );
    }

    #[test]
    fn test_update_missing_product_fails() {
        let (_store, mut ctx) = setup_logged_in();
        let product = Product {
            id: "missing".to_string(),
            ..Default::default()
        };

        assert!(matches!(
            ctx.update_product(product),
            Err(InventoryError::ProductNotFound(id)) if id == "missing"
        ));
    }

    #[test]
    fn test_delete_removes_exactly_one_stock_and_keeps_sales() {
        let (_store, mut ctx) = setup_logged_in();

        let removed = ctx.delete_product("1", &true).unwrap();
        assert_eq!(removed.name, "Premium Wireless Headphones");

        let inventory = ctx.inventory().unwrap();
        assert_eq!(inventory.products().len(), 4);
        assert_eq!(inventory.stocks().len(), 4);
        assert!(inventory.stock_for("1").is_none());
        assert!(inventory.stocks().iter().all(|s| s.product_id != "1"));
        // Sales are history and stay
        assert!(inventory.sales().iter().any(|s| s.product_id == "1"));

        let last = ctx.session().notifications().last().unwrap();
        assert_eq!(last.title, "Product Deleted");
        assert_eq!(last.kind, NotificationType::Info);
    }

    #[test]
    fn test_delete_service_wording() {
        let (_store, mut ctx) = setup_logged_in();
        ctx.delete_product("2", &true).unwrap();
        assert_eq!(
            ctx.session().notifications().last().unwrap().message,
            "Technical Consultation has been removed from inventory."
        );
    }

    #[test]
    fn test_declined_delete_changes_nothing() {
        let (_store, mut ctx) = setup_logged_in();
        let asked = RefCell::new(None);
        let decline = |message: &str| {
            *asked.borrow_mut() = Some(message.to_string());
            false
        };

        let result = ctx.delete_product("1", &decline);
        assert!(matches!(result, Err(InventoryError::Cancelled)));
        assert_eq!(asked.borrow().as_deref(), Some(DELETE_PRODUCT_PROMPT));
        assert_eq!(ctx.inventory().unwrap().products().len(), 5);
        assert_eq!(ctx.inventory().unwrap().stocks().len(), 5);
    }

    #[test]
    fn test_delete_unknown_product_does_not_ask() {
        let (_store, mut ctx) = setup_logged_in();
        let asked = RefCell::new(false);
        let confirm = |_: &str| {
            *asked.borrow_mut() = true;
            true
        };

        assert!(matches!(
            ctx.delete_product("nope", &confirm),
            Err(InventoryError::ProductNotFound(_))
        ));
        assert!(!*asked.borrow());
    }

    // ===== DRAFT TESTS =====

    #[test]
    fn test_save_draft_keeps_wizard_state() {
        let (_store, mut ctx) = setup_logged_in();
        ctx.wizard_mut().unwrap().update_field(ProductPatch {
            name: Some("Half done".to_string()),
            ..Default::default()
        });

        let draft = ctx.save_draft().unwrap();
        assert!(draft.is_draft);
        assert_eq!(ctx.wizard().unwrap().draft().name, "Half done");
        assert_eq!(ctx.inventory().unwrap().drafts().len(), 1);
        assert_eq!(ctx.inventory().unwrap().products().len(), 5);
        assert_eq!(
            ctx.session().notifications().last().unwrap().title,
            "Draft Saved"
        );
    }

    #[test]
    fn test_resume_and_delete_draft() {
        let (_store, mut ctx) = setup_logged_in();
        ctx.wizard_mut().unwrap().update_field(valid_patch("Chair", "CH-1", "home"));
        let draft = ctx.save_draft().unwrap();
        ctx.wizard_mut().unwrap().reset();

        ctx.resume_draft(&draft.id).unwrap();
        assert_eq!(ctx.wizard().unwrap().draft().name, "Chair");
        assert!(!ctx.wizard().unwrap().draft().is_draft);
        assert!(ctx.wizard().unwrap().draft().id.is_empty());

        // Finishing a resumed draft produces a new id
        let saved = ctx.save_product().unwrap().unwrap();
        assert_ne!(saved.id, draft.id);

        ctx.delete_draft(&draft.id).unwrap();
        assert!(ctx.inventory().unwrap().drafts().is_empty());
        assert!(matches!(
            ctx.delete_draft(&draft.id),
            Err(InventoryError::DraftNotFound(_))
        ));
        assert!(matches!(
            ctx.resume_draft("nope"),
            Err(InventoryError::DraftNotFound(_))
        ));
    }

    #[test]
    fn test_draft_flag_serialization() {
        let draft = Product {
            is_draft: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["isDraft"], true);

        let json = serde_json::to_value(Product::default()).unwrap();
        assert!(json.get("isDraft").is_none());
        assert_eq!(json["itemType"], "goods");
        assert_eq!(json["status"], "returnable");
    }

    // ===== STOCK TESTS =====

    #[test]
    fn test_low_stock_threshold() {
        assert!(stock(5, 10).is_low());
        assert!(stock(10, 10).is_low());
        assert!(!stock(15, 10).is_low());

        assert_eq!(stock(5, 10).level(), StockLevel::Low);
        assert_eq!(stock(15, 10).level(), StockLevel::Moderate);
        assert_eq!(stock(21, 10).level(), StockLevel::Healthy);
        assert_eq!(StockLevel::Low.label(), "Low Stock");
        assert_eq!(StockLevel::Healthy.label(), "In Stock");
    }

    #[test]
    fn test_stock_filter() {
        let mut other = stock(50, 10);
        other.product_name = "Gadget".to_string();
        other.location = "Regional Hub - Chennai".to_string();
        let stocks = vec![stock(5, 10), other];

        let low = StockFilter {
            low_stock_only: true,
            ..Default::default()
        };
        assert_eq!(low.apply(&stocks).len(), 1);

        let by_name = StockFilter {
            search: "gadg".to_string(),
            ..Default::default()
        };
        assert_eq!(by_name.apply(&stocks)[0].product_name, "Gadget");

        let by_location = StockFilter {
            location: "Regional Hub - Chennai".to_string(),
            ..Default::default()
        };
        assert_eq!(by_location.apply(&stocks).len(), 1);
    }

    // ===== FILTER TESTS =====

    #[test]
    fn test_empty_filter_returns_everything_in_order() {
        let (_store, ctx) = setup_logged_in();
        let all = ctx.products(&ProductFilter::default()).unwrap();
        let ids: Vec<&str> = all.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);

        assert_eq!(ctx.stocks(&StockFilter::default()).unwrap().len(), 5);
        assert_eq!(ctx.sales(&SaleFilter::default()).unwrap().len(), 5);
        assert_eq!(ctx.documents(&DocumentFilter::default()).unwrap().len(), 3);
    }

    #[test]
    fn test_product_filters_combine() {
        let products = seed::sample_products();

        let search = ProductFilter {
            search: "WH-0".to_string(),
            ..Default::default()
        };
        assert_eq!(search.apply(&products).len(), 1);

        let services = ProductFilter {
            item_type: Some(ItemType::Services),
            ..Default::default()
        };
        let ids: Vec<&str> = services.apply(&products).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "5"]);

        let bundles_in_electronics = ProductFilter {
            category: "electronics".to_string(),
            product_type: Some(ProductType::Bundle),
            ..Default::default()
        };
        assert_eq!(bundles_in_electronics.apply(&products)[0].id, "3");
    }

    #[test]
    fn test_dashboard_search_includes_category() {
        let products = seed::sample_products();

        let plain = ProductFilter {
            search: "consulting".to_string(),
            ..Default::default()
        };
        assert!(plain.apply(&products).is_empty());
        assert_eq!(ProductFilter::dashboard("consulting").apply(&products).len(), 1);
    }

    #[test]
    fn test_product_facets() {
        let facets = ProductFacets::collect(&seed::sample_products());
        assert_eq!(facets.categories, vec!["electronics", "consulting", "installation"]);
        assert_eq!(facets.item_types, vec![ItemType::Goods, ItemType::Services]);
        assert_eq!(facets.product_types.len(), 3);
    }

    #[test]
    fn test_sale_and_document_filters() {
        let (_store, ctx) = setup_logged_in();

        let by_customer = SaleFilter {
            search: "customer 2".to_string(),
            ..Default::default()
        };
        let found = ctx.sales(&by_customer).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].product_id, "2");

        let invoices = DocumentFilter {
            doc_type: Some(crate::models::DocumentType::Invoice),
            ..Default::default()
        };
        assert_eq!(ctx.documents(&invoices).unwrap()[0].id, "doc-2");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(512), "0.5 KB");
    }

    // ===== REPORT TESTS =====

    #[test]
    fn test_dashboard_and_sales_summary_agree() {
        let (_store, ctx) = setup_logged_in();
        let stats = ctx.dashboard_stats().unwrap();
        let summary = ctx.sales_summary().unwrap();

        assert_eq!(stats.total_products, 5);
        assert!((stats.total_sales - summary.total_revenue).abs() < 0.01);
        assert_eq!(stats.completed_sales, summary.completed);
        assert_eq!(summary.completed + summary.pending + summary.cancelled, 5);

        let low = ctx.inventory().unwrap().low_stock().len();
        assert_eq!(stats.low_stock_items, low);
    }

    // ===== PERSISTENCE TESTS =====

    #[test]
    fn test_state_survives_reload_from_disk() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let saved;
        {
            let mut ctx = AppContext::open(test_config(), dir.path()).unwrap();
            ctx.login("admin@munc.com", "secret").unwrap();
            ctx.toggle_theme().unwrap();
            let wizard = ctx.wizard_mut().unwrap();
            wizard.update_field(valid_patch("Kettle", "KT-1", "home"));
            wizard.change_product_type(ProductType::Bundle);
            wizard.update_bundle_item(0, BundleItemField::ProductId("3".to_string()));
            wizard.add_keyword("Durable");
            saved = ctx.save_product().unwrap().unwrap();
            ctx.delete_product("3", &true).unwrap();
        }

        let ctx = AppContext::open(test_config(), dir.path()).unwrap();
        assert!(ctx.session().is_authenticated());
        assert_eq!(ctx.session().user().unwrap().email, "admin@munc.com");
        assert_eq!(ctx.session().theme(), Theme::Dark);

        let inventory = ctx.inventory().unwrap();
        assert_eq!(inventory.product(&saved.id), Some(&saved));
        assert!(inventory.product("3").is_none());
        assert!(inventory.stock_for(&saved.id).is_some());
        assert_eq!(inventory.products().len(), 5);
        assert_eq!(inventory.stocks().len(), 5);
        assert_eq!(ctx.session().notifications().len(), 4);
    }

    #[test]
    fn test_full_precision_prices_survive_reload() {
        let store = Arc::new(MemoryStore::new());
        let saved;
        {
            let mut ctx = AppContext::new(test_config(), store.clone()).unwrap();
            ctx.login("admin@munc.com", "secret").unwrap();
            ctx.wizard_mut().unwrap().update_field(ProductPatch {
                selling_price: Some(1234.5678901234567),
                purchase_price: Some(0.1 + 0.2),
                tax_rate: Some(18.000000000000004),
                ..valid_patch("Scale", "SC-1", "home")
            });
            ctx.wizard_mut().unwrap().change_product_type(ProductType::Variant);
            ctx.wizard_mut()
                .unwrap()
                .update_variant(0, VariantField::Price(99.99999999999999));
            saved = ctx.save_product().unwrap().unwrap();
        }

        let ctx = AppContext::new(test_config(), store).unwrap();
        let reloaded = ctx.inventory().unwrap().product(&saved.id);
        assert_eq!(reloaded, Some(&saved));
        assert_eq!(reloaded.unwrap().selling_price, Some(1234.5678901234567));
    }

    #[test]
    fn test_reload_does_not_reseed() {
        let store = Arc::new(MemoryStore::new());
        {
            let mut ctx = AppContext::new(test_config(), store.clone()).unwrap();
            ctx.login("a@b.c", "x").unwrap();
            ctx.delete_product("1", &true).unwrap();
            ctx.delete_product("2", &true).unwrap();
        }

        let ctx = AppContext::new(test_config(), store).unwrap();
        assert_eq!(ctx.inventory().unwrap().products().len(), 3);
    }

    // ===== SETTINGS TESTS =====

    #[test]
    fn test_clear_all_data_starts_over() {
        let (store, mut ctx) = setup_logged_in();
        ctx.toggle_theme().unwrap();
        ctx.delete_product("1", &true).unwrap();
        ctx.wizard_mut().unwrap().update_field(valid_patch("X", "X-1", "toys"));
        ctx.save_draft().unwrap();
        store.set("other-theme", "\"dark\"").unwrap();

        ctx.clear_all_data(&true).unwrap();

        assert!(!ctx.session().is_authenticated());
        assert_eq!(ctx.session().theme(), Theme::Light);
        assert!(ctx.session().notifications().is_empty());
        assert_eq!(store.get("other-theme").unwrap(), Some("\"dark\"".to_string()));

        ctx.login("a@b.c", "x").unwrap();
        assert!(ctx.wizard().unwrap().draft().name.is_empty());
        let inventory = ctx.inventory().unwrap();
        assert_eq!(inventory.products().len(), 5);
        assert!(inventory.drafts().is_empty());
    }

    #[test]
    fn test_clear_all_data_declined() {
        let (_store, mut ctx) = setup_logged_in();
        let asked = RefCell::new(String::new());
        let decline = |message: &str| {
            *asked.borrow_mut() = message.to_string();
            false
        };

        assert!(matches!(
            ctx.clear_all_data(&decline),
            Err(InventoryError::Cancelled)
        ));
        assert_eq!(asked.borrow().as_str(), CLEAR_ALL_DATA_PROMPT);
        assert!(ctx.session().is_authenticated());
    }

    #[test]
    fn test_confirm_impls() {
        assert!(true.confirm("anything"));
        assert!(!false.confirm("anything"));
        let only_delete = |m: &str| m == DELETE_PRODUCT_PROMPT;
        assert!(only_delete.confirm(DELETE_PRODUCT_PROMPT));
        assert!(!only_delete.confirm(CLEAR_ALL_DATA_PROMPT));
    }
}
