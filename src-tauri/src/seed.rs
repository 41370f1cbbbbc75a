//! First-run demo data.
//!
//! Products and documents are fixed. Stock quantities and sales figures are
//! drawn from an RNG, seeded from [`SeedConfig::rng_seed`] when set.

use crate::config::SeedConfig;
use crate::inventory::derive_stock;
use crate::models::{
    now_iso, BundleItem, Document, DocumentType, ItemType, Product, ProductType, ProductVariant,
    Sale, SaleStatus, Stock,
};
use chrono::{Duration, SecondsFormat, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MAX_SEED_SALES: usize = 8;

pub fn seed_rng(config: &SeedConfig) -> StdRng {
    match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn variant(id: &str, color: &str, sku: &str, price: f64, stock: u32) -> ProductVariant {
    ProductVariant {
        id: id.to_string(),
        color: color.to_string(),
        sku: sku.to_string(),
        price,
        stock,
        ..Default::default()
    }
}

fn bundle_item(id: &str, product_id: &str, name: &str, price: f64) -> BundleItem {
    BundleItem {
        id: id.to_string(),
        product_id: product_id.to_string(),
        product_name: name.to_string(),
        quantity: 1,
        price,
    }
}

fn keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Five products covering every item type / product type combination.
pub fn sample_products() -> Vec<Product> {
    let created_at = now_iso();

    vec![
        Product {
            id: "1".to_string(),
            created_at: created_at.clone(),
            item_type: ItemType::Goods,
            product_type: ProductType::Variant,
            name: "Premium Wireless Headphones".to_string(),
            sku: "WH-001".to_string(),
            barcode: Some("1234567890123".to_string()),
            category: "electronics".to_string(),
            sub_category: Some("accessories".to_string()),
            brand: Some("apple".to_string()),
            supplier: Some("supplier1".to_string()),
            warehouse: Some("warehouse-a".to_string()),
            purchase_price: Some(8000.0),
            selling_price: Some(12000.0),
            initial_stock: Some(50),
            description: Some(
                "High-quality wireless headphones with noise cancellation and premium sound quality"
                    .to_string(),
            ),
            keywords: keywords(&["wireless", "headphones", "premium", "noise cancellation"]),
            variants: vec![
                variant("v1", "Black", "WH-001-BLK", 12000.0, 20),
                variant("v2", "White", "WH-001-WHT", 12000.0, 15),
                variant("v3", "Silver", "WH-001-SLV", 12500.0, 15),
            ],
            ..Default::default()
        },
        Product {
            id: "2".to_string(),
            created_at: created_at.clone(),
            item_type: ItemType::Services,
            product_type: ProductType::Simple,
            name: "Technical Consultation".to_string(),
            sku: "SRV-001".to_string(),
            category: "consulting".to_string(),
            sub_category: Some("technical".to_string()),
            service_type: Some("one-time".to_string()),
            duration: Some(2),
            duration_unit: Some("hours".to_string()),
            selling_price: Some(2500.0),
            description: Some(
                "Expert technical consultation for IT infrastructure and system optimization"
                    .to_string(),
            ),
            keywords: keywords(&["consultation", "technical", "expert", "IT"]),
            ..Default::default()
        },
        Product {
            id: "3".to_string(),
            created_at: created_at.clone(),
            item_type: ItemType::Goods,
            product_type: ProductType::Bundle,
            name: "Office Starter Bundle".to_string(),
            sku: "BND-001".to_string(),
            category: "electronics".to_string(),
            selling_price: Some(25000.0),
            description: Some(
                "Complete office setup bundle with laptop accessories and peripherals".to_string(),
            ),
            bundle_items: vec![
                bundle_item("b1", "1", "Premium Laptop Stand", 2500.0),
                bundle_item("b2", "2", "Wireless Mouse", 1200.0),
                bundle_item("b3", "3", "USB-C Hub", 3500.0),
                bundle_item("b4", "4", "Laptop Sleeve", 800.0),
            ],
            ..Default::default()
        },
        Product {
            id: "4".to_string(),
            created_at: created_at.clone(),
            item_type: ItemType::Goods,
            product_type: ProductType::Simple,
            name: "Smartphone Case".to_string(),
            sku: "ACC-001".to_string(),
            category: "electronics".to_string(),
            sub_category: Some("accessories".to_string()),
            purchase_price: Some(200.0),
            selling_price: Some(500.0),
            initial_stock: Some(100),
            description: Some(
                "Protective smartphone case with premium materials and shock absorption"
                    .to_string(),
            ),
            ..Default::default()
        },
        Product {
            id: "5".to_string(),
            created_at,
            item_type: ItemType::Services,
            product_type: ProductType::Bundle,
            name: "Installation Service Package".to_string(),
            sku: "SRV-PKG-001".to_string(),
            category: "installation".to_string(),
            service_type: Some("project".to_string()),
            selling_price: Some(5000.0),
            description: Some(
                "Complete installation service package with setup and training".to_string(),
            ),
            bundle_items: vec![
                bundle_item("s1", "s1", "Installation Service", 500.0),
                bundle_item("s2", "s2", "Setup & Configuration", 800.0),
                bundle_item("s3", "s3", "Training Session", 1500.0),
                bundle_item("s4", "s4", "Technical Support", 1000.0),
            ],
            ..Default::default()
        },
    ]
}

/// Products without an initial stock get a random level between 10 and 109.
pub fn sample_stocks<R: Rng>(products: &[Product], rng: &mut R) -> Vec<Stock> {
    products
        .iter()
        .map(|product| {
            let fallback_current = rng.gen_range(10..110);
            derive_stock(product, fallback_current, 50)
        })
        .collect()
}

pub fn sample_sales<R: Rng>(products: &[Product], rng: &mut R) -> Vec<Sale> {
    let batch = Utc::now().timestamp_millis();

    products
        .iter()
        .take(MAX_SEED_SALES)
        .enumerate()
        .map(|(index, product)| {
            let quantity: u32 = rng.gen_range(1..=5);
            let unit_price = product
                .selling_price
                .unwrap_or_else(|| rng.gen_range(100..1100) as f64);
            let age = Duration::seconds(rng.gen_range(0..30 * 24 * 60 * 60));
            let status = match rng.gen_range(0..3) {
                0 => SaleStatus::Completed,
                1 => SaleStatus::Pending,
                _ => SaleStatus::Cancelled,
            };

            Sale {
                id: format!("sale-{}-{}", batch, index),
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                quantity,
                unit_price,
                total_price: unit_price * quantity as f64,
                customer_name: format!("Customer {}", index + 1),
                customer_email: format!("customer{}@example.com", index + 1),
                sale_date: (Utc::now() - age).to_rfc3339_opts(SecondsFormat::Millis, true),
                status,
                payment_method: "card".to_string(),
            }
        })
        .collect()
}

pub fn sample_documents() -> Vec<Document> {
    let created_at = now_iso();

    let doc = |id: &str, name: &str, doc_type: DocumentType, url: &str, size: u64| Document {
        id: id.to_string(),
        name: name.to_string(),
        doc_type,
        url: url.to_string(),
        created_at: created_at.clone(),
        size,
    };

    vec![
        doc(
            "doc-1",
            "Inventory Report Q4 2024",
            DocumentType::Report,
            "/documents/inventory-q4.pdf",
            2048,
        ),
        doc(
            "doc-2",
            "Sales Invoice #001",
            DocumentType::Invoice,
            "/documents/invoice-001.pdf",
            1024,
        ),
        doc(
            "doc-3",
            "Purchase Receipt #PR-001",
            DocumentType::Receipt,
            "/documents/receipt-001.pdf",
            512,
        ),
    ]
}
