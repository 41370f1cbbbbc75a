//! Filtering for the list screens.
//!
//! Every filter is a conjunction of predicates. An empty filter value means
//! "don't filter on this", so a default filter returns the whole collection
//! in its original order.

use crate::models::{Document, DocumentType, ItemType, Product, ProductType, Sale, SaleStatus, Stock};
use serde::{Deserialize, Serialize};

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFilter {
    pub search: String,
    /// Dashboard search also looks at the category.
    pub search_category: bool,
    pub category: String,
    pub item_type: Option<ItemType>,
    pub product_type: Option<ProductType>,
}

impl ProductFilter {
    pub fn dashboard(search: &str) -> Self {
        Self {
            search: search.to_string(),
            search_category: true,
            ..Default::default()
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = needle.is_empty()
            || contains_ci(&product.name, &needle)
            || contains_ci(&product.sku, &needle)
            || (self.search_category && contains_ci(&product.category, &needle));
        let matches_category = self.category.is_empty() || product.category == self.category;
        let matches_item_type = self.item_type.map_or(true, |t| product.item_type == t);
        let matches_product_type = self.product_type.map_or(true, |t| product.product_type == t);

        matches_search && matches_category && matches_item_type && matches_product_type
    }

    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Values offered in the dashboard's filter dropdowns, drawn from the
/// products currently on hand.
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductFacets {
    pub categories: Vec<String>,
    pub item_types: Vec<ItemType>,
    pub product_types: Vec<ProductType>,
}

impl ProductFacets {
    /// Distinct values in first-seen order; empty categories are skipped.
    pub fn collect(products: &[Product]) -> Self {
        let mut facets = Self::default();

        for product in products {
            if !product.category.is_empty() && !facets.categories.contains(&product.category) {
                facets.categories.push(product.category.clone());
            }
            if !facets.item_types.contains(&product.item_type) {
                facets.item_types.push(product.item_type);
            }
            if !facets.product_types.contains(&product.product_type) {
                facets.product_types.push(product.product_type);
            }
        }

        facets
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StockFilter {
    pub search: String,
    pub low_stock_only: bool,
    pub location: String,
}

impl StockFilter {
    pub fn matches(&self, stock: &Stock) -> bool {
        let needle = self.search.to_lowercase();
        (needle.is_empty() || contains_ci(&stock.product_name, &needle))
            && (!self.low_stock_only || stock.is_low())
            && (self.location.is_empty() || stock.location == self.location)
    }

    pub fn apply<'a>(&self, stocks: &'a [Stock]) -> Vec<&'a Stock> {
        stocks.iter().filter(|s| self.matches(s)).collect()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SaleFilter {
    pub search: String,
    pub status: Option<SaleStatus>,
}

impl SaleFilter {
    pub fn matches(&self, sale: &Sale) -> bool {
        let needle = self.search.to_lowercase();
        (needle.is_empty()
            || contains_ci(&sale.product_name, &needle)
            || contains_ci(&sale.customer_name, &needle))
            && self.status.map_or(true, |s| sale.status == s)
    }

    pub fn apply<'a>(&self, sales: &'a [Sale]) -> Vec<&'a Sale> {
        sales.iter().filter(|s| self.matches(s)).collect()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentFilter {
    pub search: String,
    pub doc_type: Option<DocumentType>,
}

impl DocumentFilter {
    pub fn matches(&self, document: &Document) -> bool {
        let needle = self.search.to_lowercase();
        (needle.is_empty() || contains_ci(&document.name, &needle))
            && self.doc_type.map_or(true, |t| document.doc_type == t)
    }

    pub fn apply<'a>(&self, documents: &'a [Document]) -> Vec<&'a Document> {
        documents.iter().filter(|d| self.matches(d)).collect()
    }
}

/// Human-readable size as shown on document cards, e.g. `2.0 KB`.
pub fn format_size(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}
