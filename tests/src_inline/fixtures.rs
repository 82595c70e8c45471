//! Shared catalog fixtures for inline tests.

use std::collections::BTreeMap;
use std::path::Path;

use tempfile::TempDir;

use crate::catalog::{
    BundleRule, Catalog, PanelEntry, PanelType, PricingRule, SequencingSpec, VolumeDiscount,
};
use crate::input::categories::Category;
use crate::input::load_catalog;
use crate::model::account::AccountType;

pub const CATEGORIES_CSV: &str = "\
Category Name,Prices File,Full Set Panel
Explore,explore_prices.csv,Explore 3K
Target,target_prices.csv,
";

pub const EXPLORE_PRICES_CSV: &str = "\
Panel Name,Panel type,Batch Size,Product Name,Sequencing Kit,Sequencing Qty per Batch
Cardiometabolic,Combinable,8,Explore 384 Cardiometabolic,NovaSeq S1,0.5
Inflammation,Combinable,8,Explore 384 Inflammation,NovaSeq S1,0.5
Oncology,Combinable,16,Explore 384 Oncology,NovaSeq S2,0.25
Explore 3K,Standalone,8,Explore 3072,NovaSeq S4,1.6
Explore HT,Standalone,96,Explore HT,NovaSeq S4,0.9
Broken,Combinable,abc,Broken Product,,
";

pub const TARGET_PRICES_CSV: &str = "\
Panel Name,Panel type,Batch Size,Product Name,Sequencing Kit,Sequencing Qty per Batch
Target 96 Immune,Combinable,88,Target 96,,
";

pub const RULES_CSV: &str = "\
Product Name,Internal Price,External Academic Price,External Commercial Price,Bundle Size,Bundle Product Name,Sample Number for Discount,Discount Percentage,Sequencing Kit,Sequencing Qty per Batch
Explore 384 Cardiometabolic,1000,1500,2000,4,Explore 384 Cardiometabolic x4,,,,
Explore 384 Cardiometabolic x4,3600,5400,7200,,,,,NovaSeq S2,1.5
Explore 384 Inflammation,1000,1500,2000,,,10,10,,
Explore 384 Oncology,1200,1800,,,,,,,
Explore 3072,8000,12000,16000,,,,,,
Target 96,300,450,600,,,,,,
NovaSeq S1,500,600,700,,,,,,
NovaSeq S2,900,1000,1100,,,,,,
NovaSeq S4,2000,2200,2400,,,,,,
";

pub fn write_catalog_dir(dir: &Path) {
    std::fs::write(dir.join("categories.csv"), CATEGORIES_CSV).unwrap();
    std::fs::write(dir.join("explore_prices.csv"), EXPLORE_PRICES_CSV).unwrap();
    std::fs::write(dir.join("target_prices.csv"), TARGET_PRICES_CSV).unwrap();
    std::fs::write(dir.join("pricing_rules.csv"), RULES_CSV).unwrap();
}

/// The "Explore" category of the fixture catalog, loaded from disk.
pub fn explore_catalog() -> (TempDir, Catalog) {
    let dir = tempfile::tempdir().unwrap();
    write_catalog_dir(dir.path());
    let catalog = load_catalog(dir.path(), "Explore").unwrap();
    (dir, catalog)
}

pub fn category(name: &str) -> Category {
    Category {
        name: name.to_string(),
        prices_file: format!("{}.csv", name.to_ascii_lowercase()),
        full_set_panel: None,
    }
}

pub fn panel(name: &str, batch_size: Option<u32>, product: &str) -> PanelEntry {
    PanelEntry {
        panel_name: name.to_string(),
        panel_type: PanelType::Combinable,
        batch_size,
        product_name: product.to_string(),
        sequencing: None,
    }
}

pub fn with_kit(mut entry: PanelEntry, kit: &str, qty: f64) -> PanelEntry {
    entry.sequencing = Some(SequencingSpec {
        kit_name: kit.to_string(),
        qty_per_unit: qty,
    });
    entry
}

/// Same unit price for every account type.
pub fn rule(product: &str, price: f64) -> PricingRule {
    PricingRule {
        product_name: product.to_string(),
        prices: AccountType::ALL.into_iter().map(|a| (a, price)).collect::<BTreeMap<_, _>>(),
        discount: None,
        bundle: None,
        sequencing_override: None,
    }
}

pub fn with_bundle(mut r: PricingRule, size: u32, bundle_product: &str) -> PricingRule {
    r.bundle = Some(BundleRule {
        bundle_size: size,
        bundle_product_name: bundle_product.to_string(),
    });
    r
}

pub fn with_discount(mut r: PricingRule, threshold: u32, percent: f64) -> PricingRule {
    r.discount = Some(VolumeDiscount { threshold, percent });
    r
}

pub fn with_override(mut r: PricingRule, kit: &str, qty: f64) -> PricingRule {
    r.sequencing_override = Some(SequencingSpec {
        kit_name: kit.to_string(),
        qty_per_unit: qty,
    });
    r
}

pub fn catalog(panels: Vec<PanelEntry>, rules: Vec<PricingRule>) -> Catalog {
    Catalog::new(category("Test"), panels, rules)
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
