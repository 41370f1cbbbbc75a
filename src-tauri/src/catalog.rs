//! Fixed option lists offered by the product form.

use crate::models::{ItemType, ProductType};
use serde::Serialize;

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> SelectOption {
    SelectOption { value, label }
}

/// An entry a bundle line can point at.
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub price: f64,
}

const GOODS_CATEGORIES: &[SelectOption] = &[
    opt("electronics", "Electronics"),
    opt("clothing", "Clothing & Fashion"),
    opt("books", "Books & Media"),
    opt("home", "Home & Garden"),
    opt("sports", "Sports & Outdoors"),
    opt("automotive", "Automotive"),
    opt("health", "Health & Beauty"),
    opt("food", "Food & Beverages"),
    opt("toys", "Toys & Games"),
];

const SERVICE_CATEGORIES: &[SelectOption] = &[
    opt("consulting", "Consulting"),
    opt("maintenance", "Maintenance & Repair"),
    opt("installation", "Installation Services"),
    opt("training", "Training & Education"),
    opt("support", "Technical Support"),
    opt("design", "Design Services"),
    opt("development", "Development Services"),
    opt("cleaning", "Cleaning Services"),
    opt("delivery", "Delivery Services"),
];

const GOODS_BUNDLE_CATALOG: &[CatalogEntry] = &[
    CatalogEntry { id: "1", name: "Premium Laptop Stand", price: 2500.0 },
    CatalogEntry { id: "2", name: "Wireless Mouse", price: 1200.0 },
    CatalogEntry { id: "3", name: "USB-C Hub", price: 3500.0 },
    CatalogEntry { id: "4", name: "Laptop Sleeve", price: 800.0 },
    CatalogEntry { id: "5", name: "Portable Charger", price: 1800.0 },
];

const SERVICE_BUNDLE_CATALOG: &[CatalogEntry] = &[
    CatalogEntry { id: "s1", name: "Installation Service", price: 500.0 },
    CatalogEntry { id: "s2", name: "Setup & Configuration", price: 800.0 },
    CatalogEntry { id: "s3", name: "Training Session", price: 1500.0 },
    CatalogEntry { id: "s4", name: "Technical Support", price: 1000.0 },
];

pub fn categories(item_type: ItemType) -> &'static [SelectOption] {
    match item_type {
        ItemType::Goods => GOODS_CATEGORIES,
        ItemType::Services => SERVICE_CATEGORIES,
    }
}

const CONSULTING_SUBCATEGORIES: &[SelectOption] = &[
    opt("business", "Business Consulting"),
    opt("technical", "Technical Consulting"),
    opt("financial", "Financial Consulting"),
    opt("legal", "Legal Consulting"),
];

const MAINTENANCE_SUBCATEGORIES: &[SelectOption] = &[
    opt("hvac", "HVAC Maintenance"),
    opt("electrical", "Electrical Maintenance"),
    opt("plumbing", "Plumbing Services"),
    opt("general", "General Maintenance"),
];

const TRAINING_SUBCATEGORIES: &[SelectOption] = &[
    opt("corporate", "Corporate Training"),
    opt("technical", "Technical Training"),
    opt("safety", "Safety Training"),
    opt("software", "Software Training"),
];

const ELECTRONICS_SUBCATEGORIES: &[SelectOption] = &[
    opt("smartphones", "Smartphones"),
    opt("laptops", "Laptops"),
    opt("tablets", "Tablets"),
    opt("accessories", "Accessories"),
];

const CLOTHING_SUBCATEGORIES: &[SelectOption] = &[
    opt("mens", "Men's Clothing"),
    opt("womens", "Women's Clothing"),
    opt("kids", "Kids' Clothing"),
    opt("shoes", "Shoes"),
];

/// Sub-categories depend on both the item type and the chosen category;
/// most categories have none.
pub fn sub_categories(item_type: ItemType, category: &str) -> &'static [SelectOption] {
    match (item_type, category) {
        (ItemType::Services, "consulting") => CONSULTING_SUBCATEGORIES,
        (ItemType::Services, "maintenance") => MAINTENANCE_SUBCATEGORIES,
        (ItemType::Services, "training") => TRAINING_SUBCATEGORIES,
        (ItemType::Goods, "electronics") => ELECTRONICS_SUBCATEGORIES,
        (ItemType::Goods, "clothing") => CLOTHING_SUBCATEGORIES,
        _ => &[],
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductTypeOption {
    pub product_type: ProductType,
    pub label: &'static str,
    pub description: &'static str,
}

/// Services cannot have variants; their bundles are called packages.
pub fn product_types(item_type: ItemType) -> Vec<ProductTypeOption> {
    match item_type {
        ItemType::Goods => vec![
            ProductTypeOption {
                product_type: ProductType::Simple,
                label: "Simple Product",
                description: "A single product without variations",
            },
            ProductTypeOption {
                product_type: ProductType::Variant,
                label: "Variable Product",
                description: "Product with variations (size, color, material, etc.)",
            },
            ProductTypeOption {
                product_type: ProductType::Bundle,
                label: "Bundle Product",
                description: "Multiple products sold together as a package",
            },
        ],
        ItemType::Services => vec![
            ProductTypeOption {
                product_type: ProductType::Simple,
                label: "Simple Product",
                description: "A single service without variations",
            },
            ProductTypeOption {
                product_type: ProductType::Bundle,
                label: "Service Package",
                description: "Multiple services bundled together",
            },
        ],
    }
}

pub fn bundle_catalog(item_type: ItemType) -> &'static [CatalogEntry] {
    match item_type {
        ItemType::Goods => GOODS_BUNDLE_CATALOG,
        ItemType::Services => SERVICE_BUNDLE_CATALOG,
    }
}

pub fn find_bundle_entry(item_type: ItemType, id: &str) -> Option<&'static CatalogEntry> {
    bundle_catalog(item_type).iter().find(|entry| entry.id == id)
}

pub fn suggested_keywords(item_type: ItemType) -> &'static [&'static str] {
    match item_type {
        ItemType::Services => &[
            "Professional Services",
            "Consultation",
            "Expert Support",
            "Quality Service",
            "Reliable",
            "Experienced",
            "Certified",
            "On-time Delivery",
        ],
        ItemType::Goods => &[
            "High Quality",
            "Durable",
            "Premium",
            "Best Price",
            "Fast Delivery",
            "Warranty",
            "Genuine Product",
            "Top Brand",
        ],
    }
}

/// Display name of a warehouse code, used as the default stock location.
pub fn warehouse_name(code: &str) -> Option<&'static str> {
    match code {
        "warehouse-a" => Some("Main Warehouse - Delhi"),
        "warehouse-b" => Some("Secondary Warehouse - Mumbai"),
        "warehouse-c" => Some("Distribution Center - Bangalore"),
        "warehouse-d" => Some("Regional Hub - Chennai"),
        _ => None,
    }
}

pub const DEFAULT_LOCATION: &str = "Main Warehouse - Delhi";

/// Every option list the product form shows for one item type.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormOptions {
    pub categories: &'static [SelectOption],
    pub sub_categories: &'static [SelectOption],
    pub product_types: Vec<ProductTypeOption>,
    pub bundle_catalog: &'static [CatalogEntry],
    pub suggested_keywords: &'static [&'static str],
}

impl FormOptions {
    pub fn new(item_type: ItemType, category: &str) -> Self {
        Self {
            categories: categories(item_type),
            sub_categories: sub_categories(item_type, category),
            product_types: product_types(item_type),
            bundle_catalog: bundle_catalog(item_type),
            suggested_keywords: suggested_keywords(item_type),
        }
    }
}
