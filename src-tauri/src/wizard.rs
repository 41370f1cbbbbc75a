//! Four-step product creation form.
//!
//! The wizard owns an in-progress [`Product`] and the current step. Edits are
//! plain merges; the only gate is that name, SKU and category are filled in
//! before moving past the first step or saving. A failed gate is reported as
//! `false` / `None`, never as an error.

use crate::catalog::{self, find_bundle_entry};
use crate::models::{
    new_id, now_iso, BundleItem, ItemType, Product, ProductType, ProductVariant, ReturnPolicy,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "camelCase")]
pub enum WizardStep {
    #[default]
    GeneralInformation,
    PricingTax,
    DescriptionMedia,
    Variants,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::GeneralInformation,
        WizardStep::PricingTax,
        WizardStep::DescriptionMedia,
        WizardStep::Variants,
    ];

    /// 1-based position shown in the step indicator.
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::GeneralInformation => 1,
            WizardStep::PricingTax => 2,
            WizardStep::DescriptionMedia => 3,
            WizardStep::Variants => 4,
        }
    }

    pub fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::GeneralInformation => Some(WizardStep::PricingTax),
            WizardStep::PricingTax => Some(WizardStep::DescriptionMedia),
            WizardStep::DescriptionMedia => Some(WizardStep::Variants),
            WizardStep::Variants => None,
        }
    }

    pub fn previous(&self) -> Option<WizardStep> {
        match self {
            WizardStep::GeneralInformation => None,
            WizardStep::PricingTax => Some(WizardStep::GeneralInformation),
            WizardStep::DescriptionMedia => Some(WizardStep::PricingTax),
            WizardStep::Variants => Some(WizardStep::DescriptionMedia),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::GeneralInformation => "General Information",
            WizardStep::PricingTax => "Pricing & Tax",
            WizardStep::DescriptionMedia => "Description & Media",
            WizardStep::Variants => "Variants",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            WizardStep::GeneralInformation => {
                "Basic Info • Category • Supplier • Inventory • Product Type"
            }
            WizardStep::PricingTax => "All price and tax-related information",
            WizardStep::DescriptionMedia => "Images • Description • Documents • SEO",
            WizardStep::Variants => "Product Type and Variants Configuration",
        }
    }
}

/// Partial update merged into the draft. `None` leaves a field untouched.
///
/// Product type, variants and bundle items are absent on purpose: they only
/// change through the wizard's dedicated operations.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPatch {
    pub item_type: Option<ItemType>,
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub brand: Option<String>,
    pub barcode: Option<String>,
    pub ean: Option<String>,
    pub supplier: Option<String>,
    pub supplier_sku: Option<String>,
    pub warehouse: Option<String>,
    pub status: Option<ReturnPolicy>,
    pub service_type: Option<String>,
    pub duration: Option<u32>,
    pub duration_unit: Option<String>,
    pub initial_stock: Option<u32>,
    pub reorder_level: Option<u32>,
    pub lead_time: Option<String>,
    pub track_serial: Option<bool>,
    pub batch_tracking: Option<bool>,
    pub purchase_price: Option<f64>,
    pub selling_price: Option<f64>,
    pub wholesale_price: Option<String>,
    pub quantity: Option<u32>,
    pub unit: Option<String>,
    pub discount_price: Option<f64>,
    pub tax_rate: Option<f64>,
    pub hsn_sac: Option<String>,
    pub price_include_gst: Option<bool>,
    pub gst_rate: Option<f64>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub keywords: Option<Vec<String>>,
}

impl ProductPatch {
    pub fn apply_to(self, product: &mut Product) {
        if let Some(v) = self.item_type {
            product.item_type = v;
        }
        if let Some(v) = self.name {
            product.name = v;
        }
        if let Some(v) = self.sku {
            product.sku = v;
        }
        if let Some(v) = self.category {
            product.category = v;
        }
        if let Some(v) = self.status {
            product.status = v;
        }
        if let Some(v) = self.track_serial {
            product.track_serial = v;
        }
        if let Some(v) = self.batch_tracking {
            product.batch_tracking = v;
        }
        if let Some(v) = self.price_include_gst {
            product.price_include_gst = v;
        }
        if let Some(v) = self.images {
            product.images = v;
        }
        if let Some(v) = self.keywords {
            product.keywords = v;
        }

        merge(&mut product.sub_category, self.sub_category);
        merge(&mut product.brand, self.brand);
        merge(&mut product.barcode, self.barcode);
        merge(&mut product.ean, self.ean);
        merge(&mut product.supplier, self.supplier);
        merge(&mut product.supplier_sku, self.supplier_sku);
        merge(&mut product.warehouse, self.warehouse);
        merge(&mut product.service_type, self.service_type);
        merge(&mut product.duration, self.duration);
        merge(&mut product.duration_unit, self.duration_unit);
        merge(&mut product.initial_stock, self.initial_stock);
        merge(&mut product.reorder_level, self.reorder_level);
        merge(&mut product.lead_time, self.lead_time);
        merge(&mut product.purchase_price, self.purchase_price);
        merge(&mut product.selling_price, self.selling_price);
        merge(&mut product.wholesale_price, self.wholesale_price);
        merge(&mut product.quantity, self.quantity);
        merge(&mut product.unit, self.unit);
        merge(&mut product.discount_price, self.discount_price);
        merge(&mut product.tax_rate, self.tax_rate);
        merge(&mut product.hsn_sac, self.hsn_sac);
        merge(&mut product.gst_rate, self.gst_rate);
        merge(&mut product.description, self.description);
        merge(&mut product.seo_title, self.seo_title);
        merge(&mut product.seo_description, self.seo_description);
    }
}

fn merge<T>(slot: &mut Option<T>, incoming: Option<T>) {
    if incoming.is_some() {
        *slot = incoming;
    }
}

/// One attribute of a variant, with its new value.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum VariantField {
    Color(String),
    Size(String),
    Material(String),
    Weight(String),
    Sku(String),
    Price(f64),
    Stock(u32),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum BundleItemField {
    /// Points the line at a catalog entry, copying its name and price.
    ProductId(String),
    ProductName(String),
    Quantity(u32),
    Price(f64),
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StepInfo {
    pub step: WizardStep,
    pub number: u8,
    pub title: &'static str,
    pub subtitle: &'static str,
}

pub fn steps() -> Vec<StepInfo> {
    WizardStep::ALL
        .iter()
        .map(|step| StepInfo {
            step: *step,
            number: step.number(),
            title: step.title(),
            subtitle: step.subtitle(),
        })
        .collect()
}

/// What the form needs to render itself after any wizard operation.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WizardSnapshot {
    pub step: WizardStep,
    pub draft: Product,
    pub is_valid: bool,
    pub can_advance: bool,
    pub bundle_total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductWizard {
    step: WizardStep,
    draft: Product,
}

impl Default for ProductWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::GeneralInformation,
            draft: Product::default(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &Product {
        &self.draft
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            step: self.step,
            draft: self.draft.clone(),
            is_valid: self.is_valid(),
            can_advance: self.can_advance(),
            bundle_total: self.bundle_total(),
        }
    }

    /// Name, SKU and category are all filled in.
    pub fn is_valid(&self) -> bool {
        !self.draft.name.is_empty() && !self.draft.sku.is_empty() && !self.draft.category.is_empty()
    }

    pub fn can_advance(&self) -> bool {
        self.step.next().is_some() && self.is_valid()
    }

    /// Moves one step forward. Returns `false` and stays put when the draft is
    /// invalid or this is the last step.
    pub fn advance(&mut self) -> bool {
        if !self.is_valid() {
            return false;
        }
        match self.step.next() {
            Some(next) => {
                self.step = next;
                true
            }
            None => false,
        }
    }

    pub fn retreat(&mut self) -> bool {
        match self.step.previous() {
            Some(previous) => {
                self.step = previous;
                true
            }
            None => false,
        }
    }

    /// Jumps back to an earlier (or the current) step. Forward jumps are refused.
    pub fn goto_step(&mut self, step: WizardStep) -> bool {
        if step > self.step {
            return false;
        }
        self.step = step;
        true
    }

    pub fn update_field(&mut self, patch: ProductPatch) {
        patch.apply_to(&mut self.draft);
    }

    /// Switches the product type, clearing the other type's payload and
    /// applying that type's inventory presets. Variant and bundle types get one
    /// starter row when they have none.
    pub fn change_product_type(&mut self, product_type: ProductType) {
        let draft = &mut self.draft;
        draft.product_type = product_type;

        match product_type {
            ProductType::Simple => {
                draft.variants.clear();
                draft.bundle_items.clear();
                draft.track_serial = false;
                draft.batch_tracking = false;
                draft.lead_time = Some("1-week".to_string());
                draft.reorder_level = Some(10);
            }
            ProductType::Variant => {
                draft.bundle_items.clear();
                if draft.variants.is_empty() {
                    let sku = format!("{}-VAR-001", sku_base(&draft.sku));
                    draft.variants.push(default_variant(sku, draft.selling_price));
                }
                draft.track_serial = true;
                draft.batch_tracking = true;
                draft.lead_time = Some("2-weeks".to_string());
                draft.reorder_level = Some(25);
            }
            ProductType::Bundle => {
                draft.variants.clear();
                if draft.bundle_items.is_empty() {
                    draft.bundle_items.push(default_bundle_item());
                }
                draft.track_serial = false;
                draft.batch_tracking = true;
                draft.lead_time = Some("3-days".to_string());
                draft.reorder_level = Some(5);
            }
        }
    }

    pub fn add_variant(&mut self) -> &ProductVariant {
        let sku = format!(
            "{}-VAR-{}",
            sku_base(&self.draft.sku),
            self.draft.variants.len() + 1
        );
        self.draft
            .variants
            .push(default_variant(sku, self.draft.selling_price));
        &self.draft.variants[self.draft.variants.len() - 1]
    }

    pub fn update_variant(&mut self, index: usize, field: VariantField) -> bool {
        let Some(variant) = self.draft.variants.get_mut(index) else {
            return false;
        };

        match field {
            VariantField::Color(v) => variant.color = v,
            VariantField::Size(v) => variant.size = v,
            VariantField::Material(v) => variant.material = v,
            VariantField::Weight(v) => variant.weight = v,
            VariantField::Sku(v) => variant.sku = v,
            VariantField::Price(v) => variant.price = v,
            VariantField::Stock(v) => variant.stock = v,
        }
        true
    }

    pub fn remove_variant(&mut self, index: usize) -> Option<ProductVariant> {
        if index < self.draft.variants.len() {
            Some(self.draft.variants.remove(index))
        } else {
            None
        }
    }

    /// `image_url` is an opaque reference (typically a blob URL).
    pub fn add_variant_image(&mut self, index: usize, image_url: String) -> bool {
        match self.draft.variants.get_mut(index) {
            Some(variant) => {
                variant.images.push(image_url);
                true
            }
            None => false,
        }
    }

    pub fn remove_variant_image(&mut self, index: usize, image_index: usize) -> bool {
        match self.draft.variants.get_mut(index) {
            Some(variant) if image_index < variant.images.len() => {
                variant.images.remove(image_index);
                true
            }
            _ => false,
        }
    }

    pub fn add_bundle_item(&mut self) -> &BundleItem {
        self.draft.bundle_items.push(default_bundle_item());
        &self.draft.bundle_items[self.draft.bundle_items.len() - 1]
    }

    /// Pointing a line at a catalog entry copies that entry's name and price.
    /// The copy is a snapshot; later catalog changes do not reach it.
    pub fn update_bundle_item(&mut self, index: usize, field: BundleItemField) -> bool {
        let item_type = self.draft.item_type;
        let Some(item) = self.draft.bundle_items.get_mut(index) else {
            return false;
        };

        match field {
            BundleItemField::ProductId(id) => {
                if let Some(entry) = find_bundle_entry(item_type, &id) {
                    item.product_name = entry.name.to_string();
                    item.price = entry.price;
                }
                item.product_id = id;
            }
            BundleItemField::ProductName(v) => item.product_name = v,
            BundleItemField::Quantity(v) => item.quantity = v,
            BundleItemField::Price(v) => item.price = v,
        }
        true
    }

    pub fn remove_bundle_item(&mut self, index: usize) -> Option<BundleItem> {
        if index < self.draft.bundle_items.len() {
            Some(self.draft.bundle_items.remove(index))
        } else {
            None
        }
    }

    /// Sum of quantity × price over the bundle lines, computed on each call.
    pub fn bundle_total(&self) -> f64 {
        self.draft.bundle_total()
    }

    pub fn add_image(&mut self, image_url: String) {
        self.draft.images.push(image_url);
    }

    pub fn remove_image(&mut self, index: usize) -> bool {
        if index < self.draft.images.len() {
            self.draft.images.remove(index);
            true
        } else {
            false
        }
    }

    /// Adds a keyword unless it is already present.
    pub fn add_keyword(&mut self, keyword: &str) -> bool {
        if self.draft.keywords.iter().any(|k| k == keyword) {
            return false;
        }
        self.draft.keywords.push(keyword.to_string());
        true
    }

    pub fn remove_keyword(&mut self, keyword: &str) -> bool {
        let before = self.draft.keywords.len();
        self.draft.keywords.retain(|k| k != keyword);
        self.draft.keywords.len() != before
    }

    pub fn suggested_keywords(&self) -> &'static [&'static str] {
        catalog::suggested_keywords(self.draft.item_type)
    }

    /// Fills the barcode with a random number below 10^12.
    pub fn generate_barcode<R: Rng>(&mut self, rng: &mut R) -> &str {
        let barcode: u64 = rng.gen_range(0..1_000_000_000_000);
        self.draft.barcode = Some(barcode.to_string());
        self.draft.barcode.as_deref().unwrap_or_default()
    }

    /// Produces the finished product and resets the wizard, or returns `None`
    /// and changes nothing when the draft is invalid.
    pub fn finalize_save(&mut self) -> Option<Product> {
        if !self.is_valid() {
            return None;
        }

        let mut product = std::mem::take(&mut self.draft);
        product.id = new_id();
        product.created_at = now_iso();
        product.is_draft = false;

        self.reset();
        Some(product)
    }

    /// Snapshot of the current draft marked as such. The wizard keeps its
    /// state so editing can continue.
    pub fn save_draft(&self) -> Product {
        let mut draft = self.draft.clone();
        draft.id = new_id();
        draft.created_at = now_iso();
        draft.is_draft = true;
        draft
    }

    /// Reopens a stored draft for editing, starting at the first step.
    pub fn resume(&mut self, draft: Product) {
        self.step = WizardStep::GeneralInformation;
        self.draft = Product {
            id: String::new(),
            created_at: String::new(),
            is_draft: false,
            ..draft
        };
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

fn sku_base(sku: &str) -> &str {
    if sku.is_empty() {
        "SKU"
    } else {
        sku
    }
}

fn default_variant(sku: String, selling_price: Option<f64>) -> ProductVariant {
    ProductVariant {
        id: new_id(),
        sku,
        price: selling_price.unwrap_or(0.0),
        ..Default::default()
    }
}

fn default_bundle_item() -> BundleItem {
    BundleItem {
        id: new_id(),
        product_id: String::new(),
        product_name: String::new(),
        quantity: 1,
        price: 0.0,
    }
}
