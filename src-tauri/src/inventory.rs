use crate::catalog::{warehouse_name, DEFAULT_LOCATION};
use crate::config::SeedConfig;
use crate::error::{InventoryError, Result};
use crate::models::{
    now_iso, DashboardStats, Document, Product, Sale, SaleStatus, SalesSummary, Stock,
};
use crate::seed;
use crate::store::{Loaded, Storage, StoreKey};

const DEFAULT_MIN_STOCK: u32 = 10;

/// Builds the stock row paired with `product`. `fallback_current` is used when
/// the product has no initial stock; the maximum is twice the initial stock,
/// or twice `fallback_initial` when none was given.
pub(crate) fn derive_stock(product: &Product, fallback_current: u32, fallback_initial: u32) -> Stock {
    let location = match product.warehouse.as_deref() {
        Some(code) if !code.is_empty() => warehouse_name(code).unwrap_or(code).to_string(),
        _ => DEFAULT_LOCATION.to_string(),
    };

    Stock {
        id: format!("stock-{}", product.id),
        product_id: product.id.clone(),
        product_name: product.name.clone(),
        current_stock: product.initial_stock.unwrap_or(fallback_current),
        min_stock: product.reorder_level.unwrap_or(DEFAULT_MIN_STOCK),
        max_stock: product
            .initial_stock
            .unwrap_or(fallback_initial)
            .saturating_mul(2),
        location,
        last_updated: now_iso(),
    }
}

/// Owner of the product, stock, sale, document and draft collections. Every
/// mutator writes the collections it touched before returning.
pub struct Inventory {
    storage: Storage,
    products: Vec<Product>,
    stocks: Vec<Stock>,
    sales: Vec<Sale>,
    documents: Vec<Document>,
    drafts: Vec<Product>,
}

impl Inventory {
    /// Loads every collection, seeding demo data where a key was never written.
    ///
    /// Unreadable products are replaced by the demo set; any other unreadable
    /// collection starts empty and is left untouched in storage until the next
    /// write.
    pub fn load(storage: Storage, seed_config: &SeedConfig) -> Result<Self> {
        let mut rng = seed::seed_rng(seed_config);
        let seeding = seed_config.enabled;

        let products = match storage.load::<Vec<Product>>(StoreKey::Products)? {
            Loaded::Present(products) => products,
            Loaded::Missing | Loaded::Corrupt => {
                let products = if seeding { seed::sample_products() } else { Vec::new() };
                storage.save(StoreKey::Products, &products)?;
                tracing::info!(count = products.len(), "Seeded products");
                products
            }
        };

        let stocks = match storage.load::<Vec<Stock>>(StoreKey::Stocks)? {
            Loaded::Present(stocks) => stocks,
            Loaded::Corrupt => Vec::new(),
            Loaded::Missing => {
                let stocks = if seeding {
                    seed::sample_stocks(&seed::sample_products(), &mut rng)
                } else {
                    Vec::new()
                };
                storage.save(StoreKey::Stocks, &stocks)?;
                stocks
            }
        };

        let sales = match storage.load::<Vec<Sale>>(StoreKey::Sales)? {
            Loaded::Present(sales) => sales,
            Loaded::Corrupt => Vec::new(),
            Loaded::Missing => {
                let sales = if seeding {
                    seed::sample_sales(&seed::sample_products(), &mut rng)
                } else {
                    Vec::new()
                };
                storage.save(StoreKey::Sales, &sales)?;
                sales
            }
        };

        let documents = match storage.load::<Vec<Document>>(StoreKey::Documents)? {
            Loaded::Present(documents) => documents,
            Loaded::Corrupt => Vec::new(),
            Loaded::Missing => {
                let documents = if seeding { seed::sample_documents() } else { Vec::new() };
                storage.save(StoreKey::Documents, &documents)?;
                documents
            }
        };

        let drafts = storage
            .load::<Vec<Product>>(StoreKey::ProductDrafts)?
            .into_option()
            .unwrap_or_default();

        tracing::info!(
            products = products.len(),
            stocks = stocks.len(),
            sales = sales.len(),
            documents = documents.len(),
            drafts = drafts.len(),
            "Inventory loaded"
        );

        Ok(Self {
            storage,
            products,
            stocks,
            sales,
            documents,
            drafts,
        })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn stocks(&self) -> &[Stock] {
        &self.stocks
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn drafts(&self) -> &[Product] {
        &self.drafts
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn stock_for(&self, product_id: &str) -> Option<&Stock> {
        self.stocks.iter().find(|s| s.product_id == product_id)
    }

    pub fn low_stock(&self) -> Vec<&Stock> {
        self.stocks.iter().filter(|s| s.is_low()).collect()
    }

    /// Appends a finished product and its derived stock row.
    pub fn add_product(&mut self, product: Product) -> Result<&Product> {
        let stock = derive_stock(&product, 0, 0);
        tracing::info!(id = %product.id, sku = %product.sku, "Adding product");

        self.products.push(product);
        self.stocks.push(stock);
        self.storage.save(StoreKey::Products, &self.products)?;
        self.storage.save(StoreKey::Stocks, &self.stocks)?;

        Ok(&self.products[self.products.len() - 1])
    }

    /// Replaces the product with the same id wholesale. The paired stock row
    /// picks up the new name.
    pub fn update_product(&mut self, product: Product) -> Result<()> {
        let slot = self
            .products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or_else(|| InventoryError::ProductNotFound(product.id.clone()))?;

        if let Some(stock) = self.stocks.iter_mut().find(|s| s.product_id == product.id) {
            stock.product_name = product.name.clone();
            stock.last_updated = now_iso();
        }

        tracing::info!(id = %product.id, "Updating product");
        *slot = product;

        self.storage.save(StoreKey::Products, &self.products)?;
        self.storage.save(StoreKey::Stocks, &self.stocks)?;
        Ok(())
    }

    /// Removes the product and its stock row. Sales referencing it stay as
    /// they are; they carry their own copy of the product name and price.
    pub fn delete_product(&mut self, id: &str) -> Result<Product> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| InventoryError::ProductNotFound(id.to_string()))?;

        let removed = self.products.remove(index);
        self.stocks.retain(|s| s.product_id != id);
        tracing::info!(id = %id, "Deleted product");

        self.storage.save(StoreKey::Products, &self.products)?;
        self.storage.save(StoreKey::Stocks, &self.stocks)?;
        Ok(removed)
    }

    pub fn add_draft(&mut self, draft: Product) -> Result<()> {
        tracing::info!(id = %draft.id, "Saving product draft");
        self.drafts.push(draft);
        self.storage.save(StoreKey::ProductDrafts, &self.drafts)
    }

    pub fn delete_draft(&mut self, id: &str) -> Result<Product> {
        let index = self
            .drafts
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| InventoryError::DraftNotFound(id.to_string()))?;

        let removed = self.drafts.remove(index);
        self.storage.save(StoreKey::ProductDrafts, &self.drafts)?;
        Ok(removed)
    }

    pub fn dashboard_stats(&self) -> DashboardStats {
        DashboardStats {
            total_products: self.products.len(),
            low_stock_items: self.stocks.iter().filter(|s| s.is_low()).count(),
            total_sales: self.sales.iter().map(|s| s.total_price).sum(),
            completed_sales: self.count_sales(SaleStatus::Completed),
        }
    }

    pub fn sales_summary(&self) -> SalesSummary {
        SalesSummary {
            total_revenue: self.sales.iter().map(|s| s.total_price).sum(),
            completed: self.count_sales(SaleStatus::Completed),
            pending: self.count_sales(SaleStatus::Pending),
            cancelled: self.count_sales(SaleStatus::Cancelled),
        }
    }

    fn count_sales(&self, status: SaleStatus) -> usize {
        self.sales.iter().filter(|s| s.status == status).count()
    }
}
